//! # Height Probes
//!
//! The pager never computes how tall a page is. It asks a [`HeightProbe`],
//! which stands in for the rendering surface: given a tentative page, report
//! its measured content height in millimetres. This keeps pagination
//! deterministic under test (a [`FixedRowProbe`] is pure arithmetic) while a
//! real renderer can measure wrapped text however it likes.

use crate::error::ProbeError;
use crate::model::{LayoutConfig, PageRow};
use crate::text::count_lines;

/// A tentative page as handed to the probe.
#[derive(Debug, Clone, Copy)]
pub struct SheetDraft<'a> {
    pub head: &'a [String],
    /// Colspan per column of `head`.
    pub widths: &'a [usize],
    /// Caption text when this page carries the purpose block.
    pub purpose: Option<&'a str>,
    pub rows: &'a [PageRow],
}

/// Measurement capability supplied by the rendering surface.
pub trait HeightProbe {
    /// Measured height of the draft's content, in millimetres.
    fn measure(&mut self, sheet: &SheetDraft<'_>) -> Result<f64, ProbeError>;
}

impl<P: HeightProbe + ?Sized> HeightProbe for &mut P {
    fn measure(&mut self, sheet: &SheetDraft<'_>) -> Result<f64, ProbeError> {
        (**self).measure(sheet)
    }
}

/// Every row has the same height, regardless of content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedRowProbe {
    pub header_height: f64,
    pub purpose_height: f64,
    pub row_height: f64,
}

impl FixedRowProbe {
    pub fn new(header_height: f64, purpose_height: f64, row_height: f64) -> Self {
        Self {
            header_height,
            purpose_height,
            row_height,
        }
    }
}

impl HeightProbe for FixedRowProbe {
    fn measure(&mut self, sheet: &SheetDraft<'_>) -> Result<f64, ProbeError> {
        let purpose = if sheet.purpose.is_some() {
            self.purpose_height
        } else {
            0.0
        };
        Ok(self.header_height + purpose + sheet.rows.len() as f64 * self.row_height)
    }
}

/// Estimates heights from average glyph width and line height.
///
/// A cell's width is its share of the table: the table takes
/// `table_width_ratio` of the sheet width and is divided into as many units
/// as the widest row spans. Text is wrapped at UAX#14 opportunities.
#[derive(Debug, Clone, PartialEq)]
pub struct TextMetricsProbe {
    pub table_width_mm: f64,
    pub unit_budget: usize,
    pub char_width_mm: f64,
    pub line_height_mm: f64,
    /// Vertical padding of one body or header cell (top + bottom).
    pub cell_padding_mm: f64,
}

impl TextMetricsProbe {
    pub fn new(config: &LayoutConfig) -> Self {
        let (sheet_w, _) = config.sheet_dimensions();
        Self {
            table_width_mm: sheet_w * config.table_width_ratio,
            unit_budget: config.unit_budget,
            char_width_mm: 2.1,
            line_height_mm: 5.0,
            cell_padding_mm: 3.0,
        }
    }

    fn chars_per_line(&self, span: usize, total_span: usize) -> usize {
        let width = self.table_width_mm * span as f64 / total_span.max(1) as f64;
        ((width / self.char_width_mm).floor() as usize).max(1)
    }

    fn cells_height<'a, I>(&self, cells: I, widths: &[usize], total_span: usize) -> f64
    where
        I: IntoIterator<Item = &'a str>,
    {
        let lines = cells
            .into_iter()
            .zip(widths)
            .map(|(text, &span)| count_lines(text, self.chars_per_line(span, total_span)))
            .max()
            .unwrap_or(1);
        lines as f64 * self.line_height_mm + self.cell_padding_mm
    }
}

impl HeightProbe for TextMetricsProbe {
    fn measure(&mut self, sheet: &SheetDraft<'_>) -> Result<f64, ProbeError> {
        let total_span = sheet.widths.iter().sum::<usize>().max(self.unit_budget);

        let mut height = self.cells_height(
            sheet.head.iter().map(String::as_str),
            sheet.widths,
            total_span,
        );

        if let Some(purpose) = sheet.purpose {
            let slot = self.unit_budget.saturating_sub(1).max(1);
            height += self.cells_height(
                ["Purpose:", purpose],
                &[1, slot],
                total_span,
            );
        }

        let blank_height = self.line_height_mm + self.cell_padding_mm;
        for row in sheet.rows {
            height += match row {
                PageRow::Data(cells) => {
                    self.cells_height(cells.iter().map(String::as_str), sheet.widths, total_span)
                }
                PageRow::Blank => blank_height,
            };
        }

        Ok(height)
    }
}
