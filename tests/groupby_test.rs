use tabrs::{agg, Cell, Column, Error, FloatColumn, IntColumn, Label, StrColumn, Table};

fn posts() -> Table {
    Table::new(vec![
        Column::Str(StrColumn::with_nulls(
            "lang",
            vec!["en", "en", "es", ""]
                .into_iter()
                .map(|s| s.to_string())
                .collect(),
            vec![false, false, false, true],
        )
        .unwrap()),
        Column::Str(StrColumn::from_strs(
            "kind",
            &["text", "photo", "text", "text"],
        )),
        Column::Int(IntColumn::new("likes", vec![10, 3, 7, 2])),
        Column::Float(FloatColumn::with_nulls(
            "score",
            vec![0.5, 0.0, 1.5, 2.0],
            vec![false, true, false, false],
        )
        .unwrap()),
    ])
    .unwrap()
}

#[test]
fn test_null_is_its_own_group() {
    let table = posts();
    let grouped = table.group_by(&["lang"]).unwrap();
    assert_eq!(grouped.group_count(), 3);

    let counts = grouped
        .aggregate(&["lang"], |_, values| Ok(Cell::Int(values.len() as i64)))
        .unwrap();
    // first-encounter order: en, es, null
    assert_eq!(
        counts.index().labels(),
        vec![
            Label::from("en"),
            Label::from("es"),
            Label::One(Cell::Null)
        ]
    );
    assert_eq!(
        counts.column("lang").unwrap().cells(),
        vec![Cell::Int(2), Cell::Int(1), Cell::Int(1)]
    );
}

#[test]
fn test_size_per_group() {
    let table = posts();
    let sizes = table.group_by(&["kind"]).unwrap().size().unwrap();
    assert_eq!(sizes.index().labels(), vec![Label::from("text"), Label::from("photo")]);
    assert_eq!(
        sizes.column("count").unwrap().cells(),
        vec![Cell::Int(3), Cell::Int(1)]
    );
}

#[test]
fn test_aggregate_sum_and_mean_skip_nulls() {
    let table = posts();
    let grouped = table.group_by(&["kind"]).unwrap();

    let sums = grouped.aggregate(&["likes"], agg::sum).unwrap();
    assert_eq!(
        sums.column("likes").unwrap().cells(),
        vec![Cell::Int(19), Cell::Int(3)]
    );

    // score of the only photo row is null, so its mean is null
    let means = grouped.aggregate(&["score"], agg::mean).unwrap();
    let cells = means.column("score").unwrap().cells();
    assert_eq!(cells[0], Cell::Float((0.5 + 1.5 + 2.0) / 3.0));
    assert_eq!(cells[1], Cell::Null);
}

#[test]
fn test_aggregate_receives_nulls_in_order() {
    let table = posts();
    let grouped = table.group_by(&["kind"]).unwrap();
    let firsts = grouped
        .aggregate(&["score"], |_, values| Ok(values[0].clone()))
        .unwrap();
    // the photo group's single score is null and it reaches the function
    assert_eq!(
        firsts.column("score").unwrap().cells(),
        vec![Cell::Float(0.5), Cell::Null]
    );
}

#[test]
fn test_multi_key_grouping_makes_tuple_labels() {
    let table = posts();
    let summary = table
        .pivot_table(&["lang", "kind"], &["likes"], agg::sum)
        .unwrap();

    assert_eq!(summary.row_count(), 4);
    assert_eq!(
        summary.index().labels()[0],
        Label::Tuple(vec![Cell::from("en"), Cell::from("text")])
    );
    assert_eq!(
        summary.column("likes").unwrap().cells(),
        vec![Cell::Int(10), Cell::Int(3), Cell::Int(7), Cell::Int(2)]
    );
}

#[test]
fn test_unknown_columns_fail_fast() {
    let table = posts();
    let err = table.group_by(&["nope"]).unwrap_err();
    assert!(matches!(err, Error::ColumnNotFound(_)));

    let grouped = table.group_by(&["lang"]).unwrap();
    let err = grouped.aggregate(&["nope"], agg::count).unwrap_err();
    assert!(matches!(err, Error::ColumnNotFound(_)));

    let err = table.group_by(&[]).unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
}

#[test]
fn test_group_rows_positions() {
    let table = posts();
    let grouped = table.group_by(&["lang"]).unwrap();
    assert_eq!(grouped.group_rows(&Label::from("en")), Some(&[0usize, 1][..]));
    assert_eq!(grouped.group_rows(&Label::One(Cell::Null)), Some(&[3usize][..]));
    assert_eq!(grouped.group_rows(&Label::from("de")), None);
}

#[test]
fn test_nan_key_groups_with_nan_apart_from_null() {
    let table = Table::new(vec![
        Column::Float(
            FloatColumn::with_nulls(
                "score",
                vec![f64::NAN, 1.0, f64::NAN, 0.0],
                vec![false, false, false, true],
            )
            .unwrap(),
        ),
        Column::Int(IntColumn::new("likes", vec![1, 2, 3, 4])),
    ])
    .unwrap();

    let grouped = table.group_by(&["score"]).unwrap();
    // NaN, 1.0 and null are three distinct keys
    assert_eq!(grouped.group_count(), 3);
    assert_eq!(
        grouped.group_rows(&Label::One(Cell::Float(f64::NAN))),
        Some(&[0usize, 2][..])
    );
    assert_eq!(
        grouped.group_rows(&Label::One(Cell::Null)),
        Some(&[3usize][..])
    );
}

#[test]
fn test_integer_sum_overflow_is_an_error() {
    let table = Table::new(vec![
        Column::Str(StrColumn::from_strs("kind", &["text", "text"])),
        Column::Int(IntColumn::new("likes", vec![i64::MAX, 1])),
    ])
    .unwrap();
    let err = table
        .group_by(&["kind"])
        .unwrap()
        .aggregate(&["likes"], agg::sum)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
}

#[test]
fn test_count_ignores_nulls_but_size_does_not() {
    let table = posts();
    let grouped = table.group_by(&["kind"]).unwrap();

    let counted = grouped.aggregate(&["score"], agg::count).unwrap();
    assert_eq!(
        counted.column("score").unwrap().cells(),
        vec![Cell::Int(3), Cell::Int(0)]
    );

    let sized = grouped.aggregate(&["score"], agg::size).unwrap();
    assert_eq!(
        sized.column("score").unwrap().cells(),
        vec![Cell::Int(3), Cell::Int(1)]
    );
}
