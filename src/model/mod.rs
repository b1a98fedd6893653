//! # Quotation Model
//!
//! The input and output representation for the pager. A quotation is a
//! header of labelled columns, a subset of those columns marked as suppliers,
//! and a list of rows aligned to the header. The pager turns that into
//! [`Page`]s: each page carries one page head (the mandatory columns plus up
//! to three supplier columns), the colspans of those columns, and the rows
//! that fit.
//!
//! Host configuration lives in [`LayoutConfig`]. Every field has a default,
//! so an empty JSON object is a valid configuration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{QuotationError, Result};

/// Cell values of one row, aligned to the header.
pub type Row = Vec<String>;

/// One column of the header: a group label used for ordering and the
/// column label that identifies the column everywhere else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderEntry {
    pub group: String,
    pub label: String,
}

impl HeaderEntry {
    pub fn new(group: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            label: label.into(),
        }
    }
}

impl<G: Into<String>, L: Into<String>> From<(G, L)> for HeaderEntry {
    fn from((group, label): (G, L)) -> Self {
        HeaderEntry::new(group, label)
    }
}

/// The ordered, validated column header of a quotation.
///
/// The display order is computed once here: columns are ordered by the rank
/// of their group's first appearance, then by header position. Everything
/// downstream sorts by [`Header::order_key`] instead of re-sorting labels.
#[derive(Debug, Clone)]
pub struct Header {
    entries: Vec<HeaderEntry>,
    index: HashMap<String, usize>,
    order: Vec<usize>,
}

impl Header {
    pub fn new<I, E>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<HeaderEntry>,
    {
        let entries: Vec<HeaderEntry> = entries.into_iter().map(Into::into).collect();
        if entries.is_empty() {
            return Err(QuotationError::config("column header must not be empty"));
        }

        let mut index = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            if entry.label.is_empty() {
                return Err(QuotationError::config(format!(
                    "column {} has an empty label",
                    i
                )));
            }
            if index.insert(entry.label.clone(), i).is_some() {
                return Err(QuotationError::config(format!(
                    "duplicate column label {:?} in header",
                    entry.label
                )));
            }
        }

        let mut group_rank: HashMap<&str, usize> = HashMap::new();
        for entry in &entries {
            let next = group_rank.len();
            group_rank.entry(entry.group.as_str()).or_insert(next);
        }
        let mut by_display: Vec<usize> = (0..entries.len()).collect();
        by_display.sort_by_key(|&i| (group_rank[entries[i].group.as_str()], i));
        let mut order = vec![0; entries.len()];
        for (position, &i) in by_display.iter().enumerate() {
            order[i] = position;
        }

        Ok(Self {
            entries,
            index,
            order,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[HeaderEntry] {
        &self.entries
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.label.as_str())
    }

    /// Header index of a column label.
    pub fn position(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    /// Display rank of the column at header index `i`.
    pub fn order_key(&self, i: usize) -> usize {
        self.order[i]
    }
}

/// An ordered group of column labels sharing one page layout.
pub type PageHead = Vec<String>;

/// A row as placed on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "cells")]
pub enum PageRow {
    /// Real quotation data, projected onto the page head.
    Data(Row),
    /// Padding with no content, one invisible cell per column.
    Blank,
}

impl PageRow {
    pub fn is_blank(&self) -> bool {
        matches!(self, PageRow::Blank)
    }

    pub fn cells(&self) -> Option<&[String]> {
        match self {
            PageRow::Data(cells) => Some(cells),
            PageRow::Blank => None,
        }
    }
}

/// A fully paginated page ready for a renderer or exporter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// 1-based, global across all page heads.
    pub number: usize,
    pub head: PageHead,
    /// Colspan of each column of `head`.
    pub widths: Vec<usize>,
    /// Only the first page of the first page head carries the purpose caption.
    pub has_purpose: bool,
    pub rows: Vec<PageRow>,
}

impl Page {
    pub fn data_rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter().filter_map(|r| match r {
            PageRow::Data(cells) => Some(cells),
            PageRow::Blank => None,
        })
    }

    pub fn blank_count(&self) -> usize {
        self.rows.iter().filter(|r| r.is_blank()).count()
    }
}

// ── Host configuration ─────────────────────────────────────────

/// Supported paper sizes in millimetres.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum PaperSize {
    #[default]
    A4,
    Legal,
    Custom {
        width_mm: f64,
        height_mm: f64,
    },
}

impl PaperSize {
    /// Returns (width, height) in millimetres, portrait.
    pub fn dimensions(&self) -> (f64, f64) {
        match self {
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::Legal => (216.0, 356.0),
            PaperSize::Custom {
                width_mm,
                height_mm,
            } => (*width_mm, *height_mm),
        }
    }

    fn validate(&self) -> Result<()> {
        let (w, h) = self.dimensions();
        if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
            return Err(QuotationError::config(format!(
                "invalid paper size {}x{} mm",
                w, h
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Portrait,
    #[default]
    Landscape,
}

/// Page settings supplied by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    pub paper: PaperSize,
    pub orientation: Orientation,
    /// Number of table units (colspans) across one page.
    pub unit_budget: usize,
    /// Fixed allowance subtracted from the sheet height to get the printable height.
    pub vertical_padding_mm: f64,
    /// Physical-to-pixel scale, used only for export geometry.
    pub px_per_mm: f64,
    /// When set, cells are truncated to this many characters per unit of colspan.
    pub cell_chars_per_unit: Option<usize>,
    /// Share of the sheet width taken by the table.
    pub table_width_ratio: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            paper: PaperSize::A4,
            orientation: Orientation::Landscape,
            unit_budget: 9,
            vertical_padding_mm: 20.0,
            px_per_mm: 96.0 / 25.4,
            cell_chars_per_unit: None,
            table_width_ratio: 0.9,
        }
    }
}

impl LayoutConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: LayoutConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.paper.validate()?;
        if self.unit_budget == 0 {
            return Err(QuotationError::config("unit budget must be at least 1"));
        }
        if !(self.px_per_mm.is_finite() && self.px_per_mm > 0.0) {
            return Err(QuotationError::config("pxPerMm must be positive"));
        }
        if !self.vertical_padding_mm.is_finite() || self.vertical_padding_mm < 0.0 {
            return Err(QuotationError::config(
                "verticalPaddingMm must be a non-negative number",
            ));
        }
        if !(self.table_width_ratio > 0.0 && self.table_width_ratio <= 1.0) {
            return Err(QuotationError::config(
                "tableWidthRatio must be in (0, 1]",
            ));
        }
        if self.printable_height() <= 0.0 {
            return Err(QuotationError::config(format!(
                "verticalPaddingMm {} leaves no printable height on a {:.0}mm sheet",
                self.vertical_padding_mm,
                self.sheet_dimensions().1
            )));
        }
        Ok(())
    }

    /// (width, height) of the sheet in millimetres after orientation.
    pub fn sheet_dimensions(&self) -> (f64, f64) {
        let (w, h) = self.paper.dimensions();
        match self.orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }

    /// Height budget rows are measured against.
    pub fn printable_height(&self) -> f64 {
        self.sheet_dimensions().1 - self.vertical_padding_mm
    }
}
