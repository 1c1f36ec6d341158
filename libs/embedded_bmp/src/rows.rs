use core::iter::FusedIterator;

use crate::{BmpError, Result, SourceImage};

impl SourceImage {
    /// Returns output row `row` (0 = top of the picture) without padding.
    ///
    /// Rows are stored bottom-up, so output row `i` is source row
    /// `height - 1 - i`.
    pub fn row<'d>(&self, data: &'d [u8], row: u32) -> Result<&'d [u8]> {
        if row >= self.height() {
            return Err(BmpError::RowOutOfRange { row, height: self.height() });
        }
        let source_row = (self.height() - 1 - row) as usize;
        let span = source_row
            .checked_mul(self.row_stride())
            .and_then(|offset| offset.checked_add(self.data_offset() as usize))
            .and_then(|start| start.checked_add(self.unpadded_row_bytes()).map(|end| (start, end)));
        let Some((start, end)) = span else {
            return Err(BmpError::OutOfBounds { row, needed: usize::MAX, available: data.len() });
        };
        data.get(start..end).ok_or(BmpError::OutOfBounds {
            row,
            needed: end,
            available: data.len(),
        })
    }

    /// Iterates all rows top-to-bottom. Stops after the first error.
    pub fn rows<'d>(&self, data: &'d [u8]) -> Rows<'d> {
        Rows { image: *self, data, next: 0, failed: false }
    }
}

pub struct Rows<'d> {
    image: SourceImage,
    data: &'d [u8],
    next: u32,
    failed: bool,
}

impl<'d> Iterator for Rows<'d> {
    type Item = Result<&'d [u8]>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.next >= self.image.height() {
            return None;
        }
        let row = self.image.row(self.data, self.next);
        self.next += 1;
        self.failed = row.is_err();
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            return (0, Some(0));
        }
        let remaining = (self.image.height() - self.next) as usize;
        (0, Some(remaining))
    }
}

impl FusedIterator for Rows<'_> {}
