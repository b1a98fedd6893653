//! # Page Filling
//!
//! Rows for one page head flow into pages. Each row is appended
//! tentatively and the page is re-measured; if the page grew past the
//! printable height the row comes back off and it, with everything after
//! it, is carried to a fresh page. A page that took all of its rows without
//! overflowing is padded with blank rows up to the printable height, so every
//! page of a quotation has the same rendered height.
//!
//! Measurement is cumulative: the probe always sees the whole page as it
//! stands, never a single row in isolation.

use std::collections::VecDeque;

use crate::error::{QuotationError, Result};
use crate::layout::probe::{HeightProbe, SheetDraft};
use crate::model::{Page, PageRow, Row};

/// What to do with a row that was just appended tentatively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowFit {
    /// The page is still within the printable height.
    Place,
    /// The page overflowed; take the row back and carry it over.
    Overflow,
    /// The page overflowed, but the row is alone on a page without the
    /// purpose caption. Keep it there, since a fresh page would overflow the
    /// same way.
    ForcePlace,
}

/// Decide whether the last appended row stays on the page.
///
/// A lone row under the purpose caption is carried over rather than forced:
/// the next page has no caption and may have room for it.
pub fn decide_fit(
    measured_height: f64,
    printable_height: f64,
    data_rows_on_page: usize,
    has_caption: bool,
) -> RowFit {
    if measured_height <= printable_height {
        return RowFit::Place;
    }
    if data_rows_on_page <= 1 && !has_caption {
        return RowFit::ForcePlace;
    }
    RowFit::Overflow
}

/// Paginates the rows of one page head against a probe.
pub struct PageFiller<'p> {
    probe: &'p mut dyn HeightProbe,
    printable_height: f64,
}

impl<'p> PageFiller<'p> {
    pub fn new(probe: &'p mut dyn HeightProbe, printable_height: f64) -> Self {
        Self {
            probe,
            printable_height,
        }
    }

    pub fn printable_height(&self) -> f64 {
        self.printable_height
    }

    fn measure(
        &mut self,
        head: &[String],
        widths: &[usize],
        purpose: Option<&str>,
        rows: &[PageRow],
    ) -> Result<f64> {
        self.probe
            .measure(&SheetDraft {
                head,
                widths,
                purpose,
                rows,
            })
            .map_err(QuotationError::Probe)
    }

    /// Lay out `rows` for one page head. Pages are numbered from
    /// `first_number`; only the first page gets the purpose caption.
    pub fn fill(
        &mut self,
        head: &[String],
        widths: &[usize],
        rows: Vec<Row>,
        mut purpose: Option<&str>,
        first_number: usize,
    ) -> Result<Vec<Page>> {
        let mut pending: VecDeque<Row> = rows.into();
        let mut pages = Vec::new();
        let mut number = first_number;

        loop {
            let mut page_rows: Vec<PageRow> = Vec::new();
            let mut data_rows = 0usize;
            let mut overflowed = false;

            while let Some(row) = pending.pop_front() {
                page_rows.push(PageRow::Data(row));
                data_rows += 1;
                let height = self.measure(head, widths, purpose, &page_rows)?;

                match decide_fit(height, self.printable_height, data_rows, purpose.is_some()) {
                    RowFit::Place => {}
                    RowFit::ForcePlace => {
                        log::warn!(
                            "page {}: row is {:.1}mm tall on an empty page (printable {:.1}mm), placing it alone",
                            number,
                            height,
                            self.printable_height
                        );
                    }
                    RowFit::Overflow => {
                        if let Some(PageRow::Data(row)) = page_rows.pop() {
                            pending.push_front(row);
                        }
                        data_rows -= 1;
                        overflowed = true;
                        log::debug!(
                            "page {}: overflow after {} rows, carrying {} to the next page",
                            number,
                            data_rows,
                            pending.len()
                        );
                        break;
                    }
                }
            }

            if !overflowed {
                self.pad(head, widths, purpose, &mut page_rows, number)?;
            }

            pages.push(Page {
                number,
                head: head.to_vec(),
                widths: widths.to_vec(),
                has_purpose: purpose.is_some(),
                rows: page_rows,
            });
            number += 1;
            purpose = None;

            if pending.is_empty() {
                break;
            }
        }

        Ok(pages)
    }

    /// Append blank rows until the page reaches the printable height.
    fn pad(
        &mut self,
        head: &[String],
        widths: &[usize],
        purpose: Option<&str>,
        page_rows: &mut Vec<PageRow>,
        number: usize,
    ) -> Result<()> {
        let mut height = self.measure(head, widths, purpose, page_rows)?;
        let mut blanks = 0usize;

        while height < self.printable_height {
            page_rows.push(PageRow::Blank);
            let next = self.measure(head, widths, purpose, page_rows)?;
            if next <= height {
                page_rows.pop();
                log::warn!(
                    "page {}: blank row did not add height, stopping padding at {:.1}mm",
                    number,
                    height
                );
                break;
            }
            height = next;
            blanks += 1;
        }

        if blanks > 0 {
            log::debug!("page {}: padded with {} blank rows", number, blanks);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProbeError;
    use crate::layout::probe::FixedRowProbe;

    fn head() -> Vec<String> {
        vec!["item".to_string(), "sup1".to_string()]
    }

    fn rows(n: usize) -> Vec<Row> {
        (1..=n).map(|i| vec![format!("row {}", i), i.to_string()]).collect()
    }

    fn data_cells(page: &Page) -> Vec<String> {
        page.data_rows().map(|r| r[0].clone()).collect()
    }

    #[test]
    fn fits_below_threshold() {
        assert_eq!(decide_fit(99.0, 100.0, 3, false), RowFit::Place);
        assert_eq!(decide_fit(100.0, 100.0, 3, true), RowFit::Place);
    }

    #[test]
    fn overflow_above_threshold() {
        assert_eq!(decide_fit(100.5, 100.0, 3, false), RowFit::Overflow);
    }

    #[test]
    fn lone_row_is_forced() {
        assert_eq!(decide_fit(500.0, 100.0, 1, false), RowFit::ForcePlace);
    }

    #[test]
    fn lone_row_under_caption_is_carried() {
        assert_eq!(decide_fit(500.0, 100.0, 1, true), RowFit::Overflow);
    }

    #[test]
    fn tall_caption_pushes_first_row_to_next_page() {
        // caption page: 10 + 150 + 50 = 210 > 190, but 10 + 50 fits without it
        let mut probe = FixedRowProbe::new(10.0, 150.0, 50.0);
        let mut filler = PageFiller::new(&mut probe, 190.0);
        let pages = filler
            .fill(&head(), &[1, 1], rows(2), Some("long purpose"), 1)
            .unwrap();

        assert_eq!(pages.len(), 2);
        assert!(pages[0].has_purpose);
        assert!(pages[0].rows.is_empty());
        assert_eq!(data_cells(&pages[1]), vec!["row 1", "row 2"]);
        // 10 + 2 x 50 = 110, padded to 210 with two blanks
        assert_eq!(pages[1].blank_count(), 2);
    }

    #[test]
    fn oversized_row_under_caption_lands_alone_on_next_page() {
        let mut probe = FixedRowProbe::new(10.0, 20.0, 300.0);
        let mut filler = PageFiller::new(&mut probe, 190.0);
        let pages = filler
            .fill(&head(), &[1, 1], rows(1), Some("purpose"), 1)
            .unwrap();

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].data_rows().count(), 0);
        assert_eq!(data_cells(&pages[1]), vec!["row 1"]);
    }

    #[test]
    fn rows_overflow_in_order() {
        // header 10 + 4 rows x 10 = 50 per page
        let mut probe = FixedRowProbe::new(10.0, 0.0, 10.0);
        let mut filler = PageFiller::new(&mut probe, 50.0);
        let pages = filler.fill(&head(), &[1, 1], rows(10), None, 1).unwrap();

        assert_eq!(pages.len(), 3);
        assert_eq!(data_cells(&pages[0]), vec!["row 1", "row 2", "row 3", "row 4"]);
        assert_eq!(data_cells(&pages[1]), vec!["row 5", "row 6", "row 7", "row 8"]);
        assert_eq!(data_cells(&pages[2]), vec!["row 9", "row 10"]);
        assert_eq!(pages[0].blank_count(), 0);
        assert_eq!(pages[1].blank_count(), 0);
        assert_eq!(pages[2].blank_count(), 2);
        let numbers: Vec<usize> = pages.iter().map(|p| p.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn purpose_only_on_first_page() {
        let mut probe = FixedRowProbe::new(10.0, 10.0, 10.0);
        let mut filler = PageFiller::new(&mut probe, 50.0);
        let pages = filler
            .fill(&head(), &[1, 1], rows(6), Some("Office supplies"), 4)
            .unwrap();
        assert!(pages[0].has_purpose);
        assert!(pages[1..].iter().all(|p| !p.has_purpose));
        // 3 rows fit under the caption, the rest go to the next page
        assert_eq!(pages[0].data_rows().count(), 3);
        assert_eq!(pages[1].data_rows().count(), 3);
        assert_eq!(pages[0].number, 4);
    }

    #[test]
    fn empty_rows_yield_one_padded_page() {
        let mut probe = FixedRowProbe::new(10.0, 0.0, 10.0);
        let mut filler = PageFiller::new(&mut probe, 35.0);
        let pages = filler.fill(&head(), &[1, 1], Vec::new(), None, 1).unwrap();
        assert_eq!(pages.len(), 1);
        // 10 + 3 x 10 = 40 >= 35, and 30 < 35
        assert_eq!(pages[0].blank_count(), 3);
    }

    #[test]
    fn oversized_row_does_not_loop() {
        let mut probe = FixedRowProbe::new(10.0, 0.0, 100.0);
        let mut filler = PageFiller::new(&mut probe, 50.0);
        let pages = filler.fill(&head(), &[1, 1], rows(3), None, 1).unwrap();
        assert_eq!(pages.len(), 3);
        assert!(pages.iter().all(|p| p.data_rows().count() == 1));
    }

    struct FlatProbe;

    impl HeightProbe for FlatProbe {
        fn measure(&mut self, _sheet: &SheetDraft<'_>) -> std::result::Result<f64, ProbeError> {
            Ok(1.0)
        }
    }

    #[test]
    fn padding_stops_without_progress() {
        let mut probe = FlatProbe;
        let mut filler = PageFiller::new(&mut probe, 50.0);
        let pages = filler.fill(&head(), &[1, 1], rows(2), None, 1).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].blank_count(), 0);
    }

    struct FailingProbe;

    impl HeightProbe for FailingProbe {
        fn measure(&mut self, _sheet: &SheetDraft<'_>) -> std::result::Result<f64, ProbeError> {
            Err("surface detached".into())
        }
    }

    #[test]
    fn probe_failure_propagates() {
        let mut probe = FailingProbe;
        let mut filler = PageFiller::new(&mut probe, 50.0);
        let err = filler.fill(&head(), &[1, 1], rows(1), None, 1).unwrap_err();
        assert!(matches!(err, QuotationError::Probe(_)));
        assert_eq!(err.to_string(), "surface detached");
    }
}
