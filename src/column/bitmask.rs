use std::sync::Arc;

/// Packed null bitmap. A set bit marks the position as null.
///
/// Shared via `Arc` so that selections can reuse a column's bitmap
/// without copying.
#[derive(Debug, Clone)]
pub struct BitMask {
    bytes: Arc<[u8]>,
    len: usize,
    null_count: usize,
}

impl BitMask {
    /// Build a bitmap from a per-position null flag vector.
    pub fn from_flags(nulls: &[bool]) -> Self {
        let mut bytes = vec![0u8; nulls.len().div_ceil(8)];
        let mut null_count = 0;
        for (i, &is_null) in nulls.iter().enumerate() {
            if is_null {
                bytes[i / 8] |= 1 << (i % 8);
                null_count += 1;
            }
        }
        BitMask {
            bytes: bytes.into(),
            len: nulls.len(),
            null_count,
        }
    }

    /// Number of positions covered by the bitmap.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the given position is null. Out-of-range positions
    /// read as not null.
    pub fn is_null(&self, pos: usize) -> bool {
        if pos >= self.len {
            return false;
        }
        (self.bytes[pos / 8] & (1 << (pos % 8))) != 0
    }

    /// Number of null positions.
    pub fn null_count(&self) -> usize {
        self.null_count
    }

    /// Whether any position is null.
    pub fn any(&self) -> bool {
        self.null_count > 0
    }

    /// Iterate the null flag of every position in order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |i| self.is_null(i))
    }

    /// Gather the null flags at the given positions into a new bitmap.
    pub fn take(&self, positions: &[usize]) -> Self {
        let flags: Vec<bool> = positions.iter().map(|&p| self.is_null(p)).collect();
        BitMask::from_flags(&flags)
    }
}
