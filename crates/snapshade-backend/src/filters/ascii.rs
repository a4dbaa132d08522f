//! ASCII-art rendering.
//!
//! The image is area-averaged down to a character grid and each cell's
//! brightness picks a glyph from a density ramp.

use std::fmt;

use snapshade_spec::validation::MAX_ASCII_CELLS;
use snapshade_spec::AsciiParams;

use super::FilterError;
use crate::buffer::PixelBuffer;
use crate::color::rgb_average;
use crate::resample::resize_area;

/// Rendered ASCII art.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsciiArt {
    /// Characters per line.
    pub columns: u32,
    /// Number of lines.
    pub rows: u32,
    /// The art, one `\n`-terminated line per row.
    pub text: String,
}

impl fmt::Display for AsciiArt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Character grid for a `width x height` image.
///
/// Rows are scaled by `char_aspect` since glyphs are taller than wide.
pub fn ascii_grid_size(width: u32, height: u32, params: &AsciiParams) -> (u32, u32) {
    let cols = params.columns.max(1);
    if width == 0 {
        return (cols, 1);
    }
    let rows = (height as f64 * cols as f64 / width as f64 * params.char_aspect).floor();
    (cols, (rows as u32).max(1))
}

pub fn ascii_art(input: &PixelBuffer, params: &AsciiParams) -> Result<AsciiArt, FilterError> {
    let mut ramp: Vec<char> = params.density.chars().collect();
    if ramp.len() < 2 {
        return Err(FilterError::InvalidParameter(format!(
            "density ramp needs at least 2 characters, got {}",
            ramp.len()
        )));
    }
    if params.invert {
        ramp.reverse();
    }

    let (columns, rows) = ascii_grid_size(input.width(), input.height(), params);
    if columns as u64 * rows as u64 > MAX_ASCII_CELLS {
        return Err(FilterError::InvalidParameter(format!(
            "{}x{} character grid exceeds {} cells",
            columns, rows, MAX_ASCII_CELLS
        )));
    }
    let grid = resize_area(input, columns, rows)?;

    let last = (ramp.len() - 1) as f64;
    let mut text = String::with_capacity((columns as usize + 1) * rows as usize);
    for y in 0..rows {
        for x in 0..columns {
            // Alpha does not take part in the brightness.
            let avg = rgb_average(grid.get(x, y));
            let idx = ((avg / 255.0) * last).floor() as usize;
            text.push(ramp[idx.min(ramp.len() - 1)]);
        }
        text.push('\n');
    }

    Ok(AsciiArt {
        columns,
        rows,
        text,
    })
}
