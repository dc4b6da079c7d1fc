//! JSON dumps of cell snapshots.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use super::ExportError;
use crate::terrain::{CellSnapshot, GridStats, HexCell};

#[derive(Serialize)]
struct SnapshotDocument<'a> {
    width: usize,
    stats: &'a GridStats,
    cells: Vec<CellSnapshot>,
}

/// Writes `{ width, stats, cells: [snapshot...] }` as pretty JSON.
pub fn export_snapshots_json(
    cells: &[HexCell],
    width: usize,
    water_level: f64,
    path: &Path,
) -> Result<(), ExportError> {
    if cells.is_empty() {
        return Err(ExportError::EmptyWorld);
    }
    let stats = GridStats::of(cells, water_level);
    let doc = SnapshotDocument {
        width,
        stats: &stats,
        cells: cells.iter().map(HexCell::snapshot).collect(),
    };

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &doc)?;
    writer.flush()?;
    log::debug!("wrote {} cell snapshots to {}", cells.len(), path.display());
    Ok(())
}
