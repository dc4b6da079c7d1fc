//! PNG export of hex grids.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ImageBuffer, ImageEncoder, Luma, Rgb};

use super::{check_grid, ExportError};
use crate::geometry::GridShape;
use crate::terrain::HexCell;

/// Options for the color preview.
#[derive(Debug, Clone)]
pub struct PreviewOptions {
    /// Pixels per cell side. Odd rows are shifted by half of this.
    pub cell_px: u32,
    /// Color of the pixels no hex covers (the stagger margin).
    pub background: [u8; 3],
    pub compression: CompressionType,
    pub filter: FilterType,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            cell_px: 4,
            background: [0, 0, 0],
            compression: CompressionType::Default,
            filter: FilterType::Adaptive,
        }
    }
}

/// Options for the 16-bit altitude map.
#[derive(Debug, Clone)]
pub struct AltitudeExportOptions {
    /// Altitude mapped to 0 and 65535; `None` uses the grid's own range.
    pub range: Option<(f64, f64)>,
    pub compression: CompressionType,
    pub filter: FilterType,
}

impl Default for AltitudeExportOptions {
    fn default() -> Self {
        Self {
            range: None,
            compression: CompressionType::Default,
            filter: FilterType::Adaptive,
        }
    }
}

/// Quantizes a `[0, 1]` color channel.
pub fn channel_u8(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Pixel size of the preview for `shape`: offset `x` runs across, `y` down.
pub fn preview_dimensions(shape: GridShape, cell_px: u32) -> (u32, u32) {
    let w = shape.rows as u32 * cell_px + cell_px / 2;
    let h = shape.width as u32 * cell_px;
    (w, h)
}

/// Exports cell colors as an RGB PNG, each hex drawn as a square block.
///
/// Blocks on odd rows are shifted right half a block, matching the hex
/// stagger. Cell positions follow from the storage index, not the stored
/// offsets. Colors come from the cells as they are; classify first.
pub fn export_color_preview(
    cells: &[HexCell],
    shape: GridShape,
    path: &Path,
    options: &PreviewOptions,
) -> Result<(), ExportError> {
    check_grid(cells, shape)?;
    let px = options.cell_px.max(1);
    let (w, h) = preview_dimensions(shape, px);

    let mut img: ImageBuffer<Rgb<u8>, Vec<u8>> =
        ImageBuffer::from_pixel(w, h, Rgb(options.background));

    for (i, c) in cells.iter().enumerate() {
        let at = shape.offset_of(i);
        let x = at.x as u32;
        let y = at.y as u32;
        let left = x * px + if y % 2 == 1 { px / 2 } else { 0 };
        let top = y * px;
        let rgb = Rgb(c.color.map(channel_u8));
        for dy in 0..px {
            for dx in 0..px {
                img.put_pixel(left + dx, top + dy, rgb);
            }
        }
    }

    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let encoder = PngEncoder::new_with_quality(writer, options.compression, options.filter);
    encoder.write_image(img.as_raw(), w, h, image::ExtendedColorType::Rgb8)?;

    log::debug!("wrote {}x{} color preview to {}", w, h, path.display());
    Ok(())
}

/// Exports altitudes as a 16-bit grayscale PNG, one pixel per cell.
pub fn export_altitude_png(
    cells: &[HexCell],
    shape: GridShape,
    path: &Path,
    options: &AltitudeExportOptions,
) -> Result<(), ExportError> {
    check_grid(cells, shape)?;

    let (min, max) = match options.range {
        Some((min, max)) if min >= max => return Err(ExportError::InvalidRange(min, max)),
        Some(range) => range,
        None => altitude_range(cells),
    };
    let span = max - min;

    let w = shape.rows as u32;
    let h = shape.width as u32;
    let mut img: ImageBuffer<Luma<u16>, Vec<u16>> = ImageBuffer::new(w, h);
    for (i, c) in cells.iter().enumerate() {
        let at = shape.offset_of(i);
        // A flat grid maps entirely to black.
        let normalized = if span > 0.0 {
            ((c.altitude - min) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let value = (normalized * 65535.0) as u16;
        img.put_pixel(at.x as u32, at.y as u32, Luma([value]));
    }

    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let encoder = PngEncoder::new_with_quality(writer, options.compression, options.filter);

    let byte_slice: &[u8] = bytemuck::cast_slice(img.as_raw());
    encoder.write_image(byte_slice, w, h, image::ExtendedColorType::L16)?;

    log::debug!(
        "wrote {}x{} altitude map [{:.3}, {:.3}] to {}",
        w,
        h,
        min,
        max,
        path.display()
    );
    Ok(())
}

fn altitude_range(cells: &[HexCell]) -> (f64, f64) {
    cells.iter().fold((f64::MAX, f64::MIN), |(lo, hi), c| {
        (lo.min(c.altitude), hi.max(c.altitude))
    })
}
