//! Export module for saving grids to image and JSON files.
//!
//! Supports an RGB color preview, a 16-bit PNG altitude map and JSON
//! snapshot dumps.

mod json;
mod png;

use thiserror::Error;

use crate::geometry::GridShape;
use crate::terrain::HexCell;

pub use json::export_snapshots_json;
pub use png::{
    channel_u8, export_altitude_png, export_color_preview, preview_dimensions,
    AltitudeExportOptions, PreviewOptions,
};

/// Errors that can occur during export.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Nothing to export: the grid is empty")]
    EmptyWorld,
    #[error("Grid of {len} cells does not match a {rows}x{width} shape")]
    ShapeMismatch { len: usize, rows: usize, width: usize },
    #[error("Invalid altitude range: min ({0}) >= max ({1})")]
    InvalidRange(f64, f64),
}

fn check_grid(cells: &[HexCell], shape: GridShape) -> Result<(), ExportError> {
    if cells.is_empty() {
        return Err(ExportError::EmptyWorld);
    }
    if cells.len() != shape.len() {
        return Err(ExportError::ShapeMismatch {
            len: cells.len(),
            rows: shape.rows,
            width: shape.width,
        });
    }
    Ok(())
}
