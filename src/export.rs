//! # Export
//!
//! Finished pages go to an [`Exporter`] together with the physical sheet
//! geometry. The pixel scale from [`LayoutConfig::px_per_mm`] is only
//! applied here. The built-in [`JsonExporter`] writes a serializable
//! snapshot, for hosts that rasterize elsewhere or for debug tooling.

use serde::{Deserialize, Serialize};

use crate::error::{QuotationError, Result};
use crate::model::{LayoutConfig, Orientation, Page};

/// Physical size of one sheet, after orientation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetGeometry {
    pub width_mm: f64,
    pub height_mm: f64,
    pub orientation: Orientation,
    pub width_px: f64,
    pub height_px: f64,
}

impl SheetGeometry {
    pub fn from_config(config: &LayoutConfig) -> Self {
        let (width_mm, height_mm) = config.sheet_dimensions();
        Self {
            width_mm,
            height_mm,
            orientation: config.orientation,
            width_px: width_mm * config.px_per_mm,
            height_px: height_mm * config.px_per_mm,
        }
    }
}

/// Turns a page sequence into a document artifact.
pub trait Exporter {
    type Output;

    fn export(&self, pages: &[Page], geometry: &SheetGeometry) -> Result<Self::Output>;
}

/// Everything an exporter sees, in one serializable value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSnapshot {
    pub geometry: SheetGeometry,
    pub purpose: Option<String>,
    pub pages: Vec<Page>,
}

/// Writes a [`LayoutSnapshot`] as JSON bytes.
#[derive(Debug, Clone, Default)]
pub struct JsonExporter {
    pub pretty: bool,
    /// Purpose caption to embed, for pages with `has_purpose`.
    pub purpose: Option<String>,
}

impl JsonExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    pub fn with_purpose(mut self, purpose: impl Into<String>) -> Self {
        self.purpose = Some(purpose.into());
        self
    }
}

impl Exporter for JsonExporter {
    type Output = Vec<u8>;

    fn export(&self, pages: &[Page], geometry: &SheetGeometry) -> Result<Vec<u8>> {
        let snapshot = LayoutSnapshot {
            geometry: *geometry,
            purpose: self.purpose.clone(),
            pages: pages.to_vec(),
        };
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(&snapshot)
        } else {
            serde_json::to_vec(&snapshot)
        }
        .map_err(|e| QuotationError::Export(e.to_string()))?;
        log::debug!("Exported {} pages as {} bytes of JSON", pages.len(), bytes.len());
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PageRow, PaperSize};

    #[test]
    fn geometry_applies_orientation_and_scale() {
        let config = LayoutConfig {
            paper: PaperSize::A4,
            orientation: Orientation::Landscape,
            px_per_mm: 2.0,
            ..Default::default()
        };
        let geometry = SheetGeometry::from_config(&config);
        assert_eq!(geometry.width_mm, 297.0);
        assert_eq!(geometry.height_mm, 210.0);
        assert_eq!(geometry.width_px, 594.0);
        assert_eq!(geometry.height_px, 420.0);
    }

    #[test]
    fn json_snapshot_round_trips() {
        let pages = vec![Page {
            number: 1,
            head: vec!["item".into()],
            widths: vec![9],
            has_purpose: true,
            rows: vec![PageRow::Data(vec!["Pen".into()]), PageRow::Blank],
        }];
        let geometry = SheetGeometry::from_config(&LayoutConfig::default());
        let bytes = JsonExporter::new()
            .with_purpose("Office supplies")
            .export(&pages, &geometry)
            .unwrap();
        let snapshot: LayoutSnapshot = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(snapshot.pages, pages);
        assert_eq!(snapshot.purpose.as_deref(), Some("Office supplies"));

        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["pages"][0]["rows"][1]["type"], "Blank");
        assert_eq!(value["pages"][0]["hasPurpose"], true);
    }
}
