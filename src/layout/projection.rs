//! # Row Projection
//!
//! Each page head keeps only some of the header's columns. The header
//! indices of those columns are computed once per page head, sorted by the
//! header's display order, and then applied to every row.

use crate::error::{QuotationError, Result};
use crate::model::{Header, PageHead, Row};

/// Header indices covered by one page head, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    indices: Vec<usize>,
}

impl Projection {
    pub fn new(header: &Header, head: &[String]) -> Result<Self> {
        let mut indices = head
            .iter()
            .map(|label| {
                header.position(label).ok_or_else(|| {
                    QuotationError::config(format!(
                        "column {:?} is not found in the given column header",
                        label
                    ))
                })
            })
            .collect::<Result<Vec<usize>>>()?;
        indices.sort_by_key(|&i| header.order_key(i));
        Ok(Self { indices })
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Page head labels in the same order as projected cells.
    pub fn head(&self, header: &Header) -> PageHead {
        self.indices
            .iter()
            .map(|&i| header.entries()[i].label.clone())
            .collect()
    }

    /// Select this page head's cells from a full row. The row must already
    /// be aligned to the header.
    ///
    /// # Panics
    ///
    /// Panics if `row` is shorter than the header this projection was built
    /// from. Run [`check_shape`] first on rows from outside the crate.
    pub fn apply(&self, row: &[String]) -> Row {
        self.indices.iter().map(|&i| row[i].clone()).collect()
    }

    pub fn apply_all(&self, rows: &[Row]) -> Vec<Row> {
        rows.iter().map(|row| self.apply(row)).collect()
    }
}

/// Reject a row that is not aligned to the header.
pub fn check_shape(header: &Header, row: &[String]) -> Result<()> {
    if row.len() != header.len() {
        return Err(QuotationError::Shape {
            expected: header.len(),
            actual: row.len(),
        });
    }
    Ok(())
}
