//! # Quotation Layout
//!
//! The pager works in two dimensions at once.
//!
//! Across the page, the number of table units is fixed but the number of
//! supplier columns is not. Suppliers are therefore split into groups of
//! three, and each group together with the mandatory columns forms a *page
//! head*: one family of pages sharing a column layout.
//!
//! Down the page, rows are appended until the measured content would exceed
//! the printable height. The rest carries over to a new page, and a page
//! that ends early is padded with blank rows so all pages match.
//!
//! ```text
//! header + suppliers
//!       ↓
//!   [partition]   — page heads: mandatory ++ up to 3 suppliers
//!       ↓
//!   [projection]  — each row reduced to one page head's columns
//!       ↓
//!   [columns]     — colspan per column
//!       ↓
//!   [page_fill]   — rows flow into pages, measured by a HeightProbe
//!       ↓
//!   pages, numbered across all page heads
//! ```

pub mod columns;
pub mod page_fill;
pub mod partition;
pub mod probe;
pub mod projection;

use crate::error::Result;
use crate::model::{Header, LayoutConfig, Page, PageHead, Row};
use crate::text::truncate_to_budget;

use page_fill::PageFiller;
use probe::HeightProbe;
use projection::Projection;

/// Everything needed to lay out one page head.
#[derive(Debug, Clone, PartialEq)]
pub struct PageHeadPlan {
    /// Column labels in display order, aligned with projected rows.
    pub head: PageHead,
    pub projection: Projection,
    /// Colspan per column of `head`.
    pub widths: Vec<usize>,
}

/// The pagination engine.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self {
            config: LayoutConfig::default(),
        }
    }
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Split the header into page heads and precompute their projections
    /// and column widths. Suppliers must already be validated.
    pub fn plan(&self, header: &Header, suppliers: &[String]) -> Result<Vec<PageHeadPlan>> {
        let mandatory = partition::mandatory_columns(header, suppliers);
        let mut heads = partition::partition(&mandatory, suppliers);
        if heads.is_empty() {
            heads.push(mandatory);
        }

        heads
            .iter()
            .map(|group| {
                let projection = Projection::new(header, group)?;
                let head = projection.head(header);
                let widths = columns::column_widths(self.config.unit_budget, &head);
                Ok(PageHeadPlan {
                    head,
                    projection,
                    widths,
                })
            })
            .collect()
    }

    /// Validate inputs, project rows and paginate every page head.
    pub fn generate(
        &self,
        header: &Header,
        suppliers: &[String],
        rows: &[Row],
        purpose: Option<&str>,
        probe: &mut dyn HeightProbe,
    ) -> Result<Vec<Page>> {
        partition::validate_suppliers(header, suppliers)?;
        for row in rows {
            projection::check_shape(header, row)?;
        }
        let plans = self.plan(header, suppliers)?;
        let projected: Vec<Vec<Row>> = plans
            .iter()
            .map(|plan| plan.projection.apply_all(rows))
            .collect();
        self.paginate(&plans, &projected, purpose, probe)
    }

    /// Run the page filler once per page head, in order, with one page
    /// counter across all of them. `projected[i]` holds the rows of `plans[i]`.
    pub fn paginate(
        &self,
        plans: &[PageHeadPlan],
        projected: &[Vec<Row>],
        purpose: Option<&str>,
        probe: &mut dyn HeightProbe,
    ) -> Result<Vec<Page>> {
        let printable_height = self.config.printable_height();
        let mut filler = PageFiller::new(probe, printable_height);
        let mut pages: Vec<Page> = Vec::new();
        let mut caption = purpose;

        for (plan, rows) in plans.iter().zip(projected) {
            let rows = self.truncate_cells(rows, &plan.widths);
            let first_number = pages.len() + 1;
            let group_pages = filler.fill(&plan.head, &plan.widths, rows, caption, first_number)?;
            log::debug!(
                "page head {:?}: {} pages starting at {}",
                plan.head,
                group_pages.len(),
                first_number
            );
            pages.extend(group_pages);
            caption = None;
        }

        log::info!(
            "Paginated {} page heads into {} pages (printable height {:.1}mm)",
            plans.len(),
            pages.len(),
            printable_height
        );
        Ok(pages)
    }

    fn truncate_cells(&self, rows: &[Row], widths: &[usize]) -> Vec<Row> {
        match self.config.cell_chars_per_unit {
            None => rows.to_vec(),
            Some(per_unit) => rows
                .iter()
                .map(|row| {
                    row.iter()
                        .zip(widths)
                        .map(|(cell, &span)| truncate_to_budget(cell, per_unit * span))
                        .collect()
                })
                .collect(),
        }
    }
}
