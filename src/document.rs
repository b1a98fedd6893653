//! # Quotation Document
//!
//! The stateful front of the pager. A document is configured once (header,
//! suppliers, purpose), then rows are added one at a time. Every accepted
//! row rebuilds the projected row table of every page head; quotations are
//! short enough that the full rebuild is cheap.
//!
//! Generating pages does not change the document. Each call starts from the
//! current header, suppliers and rows, and numbers pages from 1.

use std::fmt;

use crate::error::{QuotationError, Result};
use crate::layout::partition::validate_suppliers;
use crate::layout::probe::HeightProbe;
use crate::layout::projection::check_shape;
use crate::layout::{LayoutEngine, PageHeadPlan};
use crate::model::{Header, HeaderEntry, LayoutConfig, Page, Row};

/// Identifies a document to the host that renders it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentId(pub String);

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(s: &str) -> Self {
        DocumentId(s.to_string())
    }
}

/// A price quotation being assembled.
#[derive(Debug)]
pub struct QuotationDocument {
    id: DocumentId,
    engine: LayoutEngine,
    purpose: Option<String>,
    suppliers: Option<Vec<String>>,
    header: Option<Header>,
    rows: Vec<Row>,
    plans: Vec<PageHeadPlan>,
    /// `projected[i]` holds every row projected onto `plans[i]`.
    projected: Vec<Vec<Row>>,
}

impl QuotationDocument {
    pub fn new(id: impl Into<DocumentId>, config: LayoutConfig) -> Result<Self> {
        Ok(Self {
            id: id.into(),
            engine: LayoutEngine::new(config)?,
            purpose: None,
            suppliers: None,
            header: None,
            rows: Vec::new(),
            plans: Vec::new(),
            projected: Vec::new(),
        })
    }

    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    pub fn config(&self) -> &LayoutConfig {
        self.engine.config()
    }

    pub fn set_purpose(&mut self, purpose: impl Into<String>) {
        self.purpose = Some(purpose.into());
    }

    pub fn purpose(&self) -> Option<&str> {
        self.purpose.as_deref()
    }

    /// Mark columns as suppliers, in the order their page heads should take.
    /// If the header is already set, every supplier must name one of its
    /// columns.
    pub fn mark_as_supplier<I, S>(&mut self, suppliers: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ensure_no_rows("suppliers")?;
        let suppliers: Vec<String> = suppliers.into_iter().map(Into::into).collect();
        if let Some(header) = &self.header {
            validate_suppliers(header, &suppliers)?;
        }
        self.suppliers = Some(suppliers);
        self.replan()
    }

    /// Set the column header. If suppliers are already marked, each must
    /// appear in the header.
    pub fn set_column_header<I, E>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = E>,
        E: Into<HeaderEntry>,
    {
        self.ensure_no_rows("column header")?;
        let header = Header::new(entries)?;
        if let Some(suppliers) = &self.suppliers {
            validate_suppliers(&header, suppliers)?;
        }
        self.header = Some(header);
        self.replan()
    }

    pub fn header(&self) -> Option<&Header> {
        self.header.as_ref()
    }

    pub fn suppliers(&self) -> Option<&[String]> {
        self.suppliers.as_deref()
    }

    /// Append a row aligned to the header. A rejected row leaves the
    /// document unchanged.
    pub fn add_row<I, S>(&mut self, cells: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let header = self
            .header
            .as_ref()
            .ok_or_else(|| QuotationError::config("column header not set"))?;
        if self.suppliers.is_none() {
            return Err(QuotationError::config("suppliers not set"));
        }

        let row: Row = cells.into_iter().map(Into::into).collect();
        check_shape(header, &row)?;

        self.rows.push(row);
        self.rebuild_projections();
        log::debug!("{}: row {} added", self.id, self.rows.len());
        Ok(())
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn page_heads(&self) -> Vec<&[String]> {
        self.plans.iter().map(|plan| plan.head.as_slice()).collect()
    }

    /// Rows of page head `index`, projected onto its columns.
    pub fn projected_rows(&self, index: usize) -> Option<&[Row]> {
        self.projected.get(index).map(Vec::as_slice)
    }

    /// Paginate the current rows. Requires header, suppliers and purpose.
    pub fn generate(&self, probe: &mut dyn HeightProbe) -> Result<Vec<Page>> {
        if self.header.is_none() {
            return Err(QuotationError::config("column header not set"));
        }
        if self.suppliers.is_none() {
            return Err(QuotationError::config("suppliers not set"));
        }
        let purpose = self
            .purpose
            .as_deref()
            .ok_or_else(|| QuotationError::config("purpose not set"))?;

        let pages = self
            .engine
            .paginate(&self.plans, &self.projected, Some(purpose), probe)?;
        log::info!("{}: generated {} pages from {} rows", self.id, pages.len(), self.rows.len());
        Ok(pages)
    }

    fn ensure_no_rows(&self, what: &str) -> Result<()> {
        if !self.rows.is_empty() {
            return Err(QuotationError::config(format!(
                "{} cannot change after rows were added",
                what
            )));
        }
        Ok(())
    }

    fn replan(&mut self) -> Result<()> {
        self.plans = match (&self.header, &self.suppliers) {
            (Some(header), Some(suppliers)) => self.engine.plan(header, suppliers)?,
            _ => Vec::new(),
        };
        self.rebuild_projections();
        Ok(())
    }

    fn rebuild_projections(&mut self) {
        self.projected = self
            .plans
            .iter()
            .map(|plan| plan.projection.apply_all(&self.rows))
            .collect();
    }
}
