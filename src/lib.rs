//! # Quotation Pager
//!
//! A page-native layout engine for price-quotation tables.
//!
//! A quotation has a handful of mandatory columns (item, unit, quantity...)
//! and any number of supplier columns. A page only has room for so many
//! columns and so many rows, so the table is cut both ways: suppliers are
//! grouped into page heads of three, and the rows of each page head flow
//! into as many pages as they need. Short pages are padded with blank rows
//! so every sheet prints at the same height.
//!
//! The engine never draws anything. How tall a page is comes from a
//! [`HeightProbe`](layout::probe::HeightProbe) owned by the renderer, and
//! finished pages go to an [`Exporter`](export::Exporter).
//!
//! ## Architecture
//!
//! ```text
//! Header + suppliers + rows
//!       ↓
//!   [model]     — header, rows, pages, host configuration
//!       ↓
//!   [layout]    — page heads, projection, colspans, page filling
//!       ↓
//!   [document]  — stateful quotation: configure once, add rows, generate
//!       ↓
//!   [export]    — page sequence + sheet geometry to an artifact
//! ```

pub mod document;
pub mod error;
pub mod export;
pub mod layout;
pub mod model;
pub mod text;

pub use document::{DocumentId, QuotationDocument};
pub use error::{QuotationError, Result};

use layout::probe::HeightProbe;
use layout::LayoutEngine;
use model::{Header, HeaderEntry, LayoutConfig, Page, Row};

/// Paginate a quotation in one call.
///
/// Validates the header, suppliers and rows, then returns every page in
/// page-head order, numbered from 1.
pub fn paginate(
    header: &[HeaderEntry],
    suppliers: &[String],
    rows: &[Row],
    purpose: Option<&str>,
    config: &LayoutConfig,
    probe: &mut dyn HeightProbe,
) -> Result<Vec<Page>> {
    let header = Header::new(header.iter().cloned())?;
    let engine = LayoutEngine::new(config.clone())?;
    engine.generate(&header, suppliers, rows, purpose, probe)
}

/// Like [`paginate`], with the page settings given as JSON.
pub fn paginate_with_json_config(
    header: &[HeaderEntry],
    suppliers: &[String],
    rows: &[Row],
    purpose: Option<&str>,
    config_json: &str,
    probe: &mut dyn HeightProbe,
) -> Result<Vec<Page>> {
    let config = LayoutConfig::from_json(config_json)?;
    paginate(header, suppliers, rows, purpose, &config, probe)
}
