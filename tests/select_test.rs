use tabrs::{
    BoolColumn, Cell, Column, Error, FloatColumn, IntColumn, Label, Mask, StrColumn, Table,
};

fn posts() -> Table {
    Table::new(vec![
        Column::Str(StrColumn::with_nulls(
            "lang",
            vec!["en", "es", "en", "", "fr"]
                .into_iter()
                .map(|s| s.to_string())
                .collect(),
            vec![false, false, false, true, false],
        )
        .unwrap()),
        Column::Int(IntColumn::new("likes", vec![10, 3, 7, 2, 9])),
    ])
    .unwrap()
}

#[test]
fn test_select_columns_order_and_sharing() {
    let table = posts();
    let selected = table.select_columns(&["likes", "lang"]).unwrap();
    assert_eq!(selected.column_names(), vec!["likes", "lang"]);
    assert_eq!(selected.row_count(), table.row_count());

    let err = table.select_columns(&["nope"]).unwrap_err();
    assert!(matches!(err, Error::ColumnNotFound(_)));
}

#[test]
fn test_select_rows_by_position_preserves_labels() {
    let table = posts();
    let slice = table.select_rows_by_position(1..4).unwrap();
    assert_eq!(slice.row_count(), 3);
    // labels are the original positions, not reset to zero
    assert_eq!(
        slice.index().labels(),
        vec![Label::from(1i64), Label::from(2i64), Label::from(3i64)]
    );

    // sub-selecting the identity range returns the same rows
    let again = slice.select_rows_by_position(0..3).unwrap();
    assert_eq!(
        again.column("likes").unwrap().cells(),
        slice.column("likes").unwrap().cells()
    );
    assert_eq!(again.index().labels(), slice.index().labels());

    let err = table.select_rows_by_position(3..9).unwrap_err();
    assert!(matches!(err, Error::IndexOutOfBounds { .. }));
}

#[test]
fn test_select_rows_by_label() {
    let mut table = posts();
    table.set_index_from_column("lang").unwrap();

    // non-unique label selects every match, in label order
    let selected = table
        .select_rows_by_label(&[Label::from("en"), Label::from("fr")])
        .unwrap();
    assert_eq!(
        selected.column("likes").unwrap().cells(),
        vec![Cell::Int(10), Cell::Int(7), Cell::Int(9)]
    );

    let err = table.select_rows_by_label(&[Label::from("de")]).unwrap_err();
    assert!(matches!(err, Error::LabelNotFound(_)));
}

#[test]
fn test_mask_eq_excludes_null_rows_both_ways() {
    let table = posts();
    let en = table.select_by_mask(&table.mask_eq("lang", &Cell::from("en")).unwrap()).unwrap();
    assert_eq!(
        en.column("likes").unwrap().cells(),
        vec![Cell::Int(10), Cell::Int(7)]
    );

    // the null lang row is excluded from the negation too
    let not_en = table
        .select_by_mask(&table.mask_ne("lang", &Cell::from("en")).unwrap())
        .unwrap();
    assert_eq!(
        not_en.column("likes").unwrap().cells(),
        vec![Cell::Int(3), Cell::Int(9)]
    );
}

#[test]
fn test_mask_comparison_type_checked() {
    let table = posts();
    let err = table.mask_gt("lang", &Cell::Int(3)).unwrap_err();
    assert!(matches!(err, Error::IncomparableTypes { .. }));

    let err = table.mask_eq("likes", &Cell::Null).unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
}

#[test]
fn test_three_valued_logic_truth_table() {
    let a = BoolColumn::with_nulls(
        "a",
        vec![true, true, false, false, false, true],
        vec![false, true, false, true, false, false],
    )
    .unwrap();
    let b = BoolColumn::new("b", vec![true, true, true, false, false, false]);

    // a: T, null, F, null, F, T
    let and = a.and(&b).unwrap();
    assert_eq!(and.get(0).unwrap(), Some(true)); // T and T
    assert_eq!(and.get(1).unwrap(), None); // null and T
    assert_eq!(and.get(2).unwrap(), Some(false)); // F and T
    assert_eq!(and.get(3).unwrap(), Some(false)); // null and F
    assert_eq!(and.get(5).unwrap(), Some(false)); // T and F

    let or = a.or(&b).unwrap();
    assert_eq!(or.get(1).unwrap(), Some(true)); // null or T
    assert_eq!(or.get(3).unwrap(), None); // null or F
    assert_eq!(or.get(4).unwrap(), Some(false)); // F or F

    let not = a.not();
    assert_eq!(not.get(0).unwrap(), Some(false));
    assert_eq!(not.get(1).unwrap(), None); // not null
}

#[test]
fn test_mask_and_matches_row_intersection() {
    let table = posts();
    let en = table.mask_eq("lang", &Cell::from("en")).unwrap();
    let popular = table.mask_gt("likes", &Cell::Int(8)).unwrap();

    let combined = table.select_by_mask(&en.and(&popular).unwrap()).unwrap();

    let left = table.select_by_mask(&en).unwrap();
    let right = table.select_by_mask(&popular).unwrap();
    let left_labels = left.index().labels();
    let intersection: Vec<Label> = right
        .index()
        .labels()
        .into_iter()
        .filter(|l| left_labels.contains(l))
        .collect();
    assert_eq!(combined.index().labels(), intersection);
}

#[test]
fn test_mask_index_must_match() {
    let table = posts();
    let other = table.select_rows_by_position(0..3).unwrap();
    let mask = other.mask_eq("lang", &Cell::from("en")).unwrap();
    let err = table.select_by_mask(&mask).unwrap_err();
    assert!(matches!(err, Error::IndexMismatch(_)));

    // same length but different labels is still a mismatch
    let shifted = table.select_rows_by_position(0..5).unwrap();
    let mut relabeled = shifted.clone();
    relabeled
        .set_index(tabrs::Index::from_cells(
            vec![
                Cell::from("a"),
                Cell::from("b"),
                Cell::from("c"),
                Cell::from("d"),
                Cell::from("e"),
            ],
            None,
        ))
        .unwrap();
    let mask = relabeled.mask_gt("likes", &Cell::Int(0)).unwrap();
    let err = table.select_by_mask(&mask).unwrap_err();
    assert!(matches!(err, Error::IndexMismatch(_)));
}

#[test]
fn test_mask_with_never_sees_null_cells() {
    let table = posts();
    let mask = table
        .mask_with("lang", |cell| match cell {
            Cell::Str(s) => s.starts_with('e'),
            other => panic!("predicate called on {:?}", other),
        })
        .unwrap();

    // the null lang row stays null in the mask
    assert_eq!(mask.values().get(3).unwrap(), None);

    let selected = table.select_by_mask(&mask).unwrap();
    assert_eq!(
        selected.column("likes").unwrap().cells(),
        vec![Cell::Int(10), Cell::Int(3), Cell::Int(7)]
    );
}

#[test]
fn test_mask_or_and_not() {
    let table = posts();
    let es = table.mask_eq("lang", &Cell::from("es")).unwrap();
    let fr = table.mask_eq("lang", &Cell::from("fr")).unwrap();

    let either = es.or(&fr).unwrap();
    assert!(either.index().same_labels(table.index()));
    let selected = table.select_by_mask(&either).unwrap();
    assert_eq!(
        selected.column("likes").unwrap().cells(),
        vec![Cell::Int(3), Cell::Int(9)]
    );

    // negation keeps the null row null, so it is still excluded
    let neither = either.not();
    assert!(neither.index().same_labels(table.index()));
    assert_eq!(neither.values().get(3).unwrap(), None);
    let rest = table.select_by_mask(&neither).unwrap();
    assert_eq!(
        rest.column("likes").unwrap().cells(),
        vec![Cell::Int(10), Cell::Int(7)]
    );

    // OR on masks from different indices is rejected
    let other = table.select_rows_by_position(0..3).unwrap();
    let short = other.mask_eq("lang", &Cell::from("en")).unwrap();
    let err = es.or(&short).unwrap_err();
    assert!(matches!(err, Error::IndexMismatch(_)));
}

#[test]
fn test_mask_eq_matches_nan() {
    let table = Table::new(vec![
        Column::Float(FloatColumn::new("score", vec![0.5, f64::NAN, 1.5])),
        Column::Int(IntColumn::new("likes", vec![1, 2, 3])),
    ])
    .unwrap();
    let picked = table
        .select_by_mask(&table.mask_eq("score", &Cell::Float(f64::NAN)).unwrap())
        .unwrap();
    assert_eq!(picked.column("likes").unwrap().cells(), vec![Cell::Int(2)]);
}

#[test]
fn test_labeled_mask_operands_must_share_labels() {
    let labels = |last: &str| {
        tabrs::Index::from_cells(
            vec![
                Cell::from("a"),
                Cell::from("b"),
                Cell::from("c"),
                Cell::from("d"),
                Cell::from(last),
            ],
            None,
        )
    };
    let mut left = posts();
    left.set_index(labels("e")).unwrap();
    let mut right = left.clone();

    let a = left.mask_gt("likes", &Cell::Int(5)).unwrap();
    let b = right.mask_lt("likes", &Cell::Int(5)).unwrap();
    assert!(a.and(&b).is_ok());

    right.set_index(labels("x")).unwrap();
    let c = right.mask_lt("likes", &Cell::Int(5)).unwrap();
    let err = a.and(&c).unwrap_err();
    assert!(matches!(err, Error::IndexMismatch(_)));
}

#[test]
fn test_drop_nulls() {
    let table = posts();
    let clean = table.drop_nulls(&["lang"]).unwrap();
    assert_eq!(clean.row_count(), 4);
    assert_eq!(
        clean.column("likes").unwrap().cells(),
        vec![Cell::Int(10), Cell::Int(3), Cell::Int(7), Cell::Int(9)]
    );
}

#[test]
fn test_manual_mask_requires_matching_length() {
    let table = posts();
    let err = Mask::new(
        BoolColumn::new("m", vec![true, false]),
        table.index().clone(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::LengthMismatch { .. }));
}
