//! # Supplier Partitioning
//!
//! Supplier columns are split into chunks of [`SUPPLIERS_PER_HEAD`], in the
//! order they were marked. Each chunk becomes one page head: the mandatory
//! columns followed by the chunk.

use crate::error::{QuotationError, Result};
use crate::model::{Header, PageHead};

pub const SUPPLIERS_PER_HEAD: usize = 3;

/// Check that every supplier names a header column, exactly once.
pub fn validate_suppliers(header: &Header, suppliers: &[String]) -> Result<()> {
    for (i, supplier) in suppliers.iter().enumerate() {
        if !header.contains(supplier) {
            return Err(QuotationError::config(format!(
                "supplier {:?} is not found in the given column header",
                supplier
            )));
        }
        if suppliers[..i].contains(supplier) {
            return Err(QuotationError::config(format!(
                "supplier {:?} is marked more than once",
                supplier
            )));
        }
    }
    Ok(())
}

/// Header labels that are not suppliers, in header order.
pub fn mandatory_columns(header: &Header, suppliers: &[String]) -> Vec<String> {
    header
        .labels()
        .filter(|label| !suppliers.iter().any(|s| s.as_str() == *label))
        .map(str::to_string)
        .collect()
}

/// One page head per chunk of suppliers: `mandatory ++ chunk`.
pub fn partition(mandatory: &[String], suppliers: &[String]) -> Vec<PageHead> {
    suppliers
        .chunks(SUPPLIERS_PER_HEAD)
        .map(|chunk| mandatory.iter().chain(chunk).cloned().collect())
        .collect()
}
