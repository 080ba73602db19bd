//! Rendering sinograms and histograms as PNG images.
//!
//! Nothing here fails on empty input: a sinogram without projections or
//! leaves is written as a single white pixel.

use std::path::Path;

use image::{GrayImage, ImageFormat, Luma};
use log::info;

use crate::error::{Error, Result};
use crate::histogram::Histogram;
use crate::sinogram::{OpenTime, Sinogram};
use crate::utils::group_digits;

const WHITE: u8 = 255;
const BLACK: u8 = 0;

/// Columns and rows in the grid of per-angle maps
const MONTAGE: (u32, u32) = (6, 9);

/// Width and height, in pixels, of one histogram bar
const BAR: (u32, u32) = (8, 200);

/// Grey level of an open-time: `0.0 -> BLACK`, `1.0 -> WHITE`
#[inline]
fn grey(t: OpenTime) -> u8 {
    (t.clamp(0.0, 1.0) * WHITE as OpenTime).round() as u8
}

fn placeholder() -> GrayImage { GrayImage::from_pixel(1, 1, Luma([WHITE])) }

/// Largest image, in pixels, that will be rendered
const MAX_PIXELS: u64 = 1 << 30;

/// `n` blocks of `scale` pixels; `None` if that does not fit in a `u32`
fn scaled(n: usize, scale: u32) -> Option<u32> {
    u32::try_from(n).ok()?.checked_mul(scale)
}

/// `n` tiles of `tile` pixels, each followed by a one-pixel gutter, plus the
/// leading gutter
fn tiled(n: u32, tile: u32) -> Option<u32> {
    n.checked_mul(tile.checked_add(1)?)?.checked_add(1)
}

/// Check that a `width x height` image can be rendered
fn canvas(width: Option<u32>, height: Option<u32>) -> Result<(u32, u32)> {
    match width.zip(height) {
        Some((w, h)) if w as u64 * h as u64 <= MAX_PIXELS => Ok((w, h)),
        _ => Err(Error::Export(format!(
            "image would exceed {} pixels: reduce the scale or the number of bins",
            group_digits(MAX_PIXELS)))),
    }
}

fn save(image: &GrayImage, path: &Path) -> Result<()> {
    image.save_with_format(path, ImageFormat::Png)?;
    info!("wrote {}x{} image to {}", image.width(), image.height(), path.display());
    Ok(())
}

/// Sinogram with one `scale x scale` block per leaf and projection, leaves
/// across, projections down. Reversed grey: open leaves are dark.
pub fn render(sinogram: &Sinogram, scale: u32) -> Result<GrayImage> {
    let (rows, cols) = sinogram.data().dim();
    if rows == 0 || cols == 0 { return Ok(placeholder()) }
    let scale = scale.max(1);
    let (width, height) = canvas(scaled(cols, scale), scaled(rows, scale))?;
    let data = sinogram.data();
    Ok(GrayImage::from_fn(width, height, |x, y| {
        let t = data[[(y / scale) as usize, (x / scale) as usize]];
        Luma([WHITE - grey(t)])
    }))
}

pub fn to_png(sinogram: &Sinogram, path: &Path, scale: u32) -> Result<()> {
    save(&render(sinogram, scale)?, path)
}

/// Crop, unshuffle, and tile the per-angle maps in a 6 x 9 grid, separated
/// by a one-pixel white gutter. Normal grey: open leaves are bright.
pub fn render_unshuffled(sinogram: &Sinogram, scale: u32) -> Result<GrayImage> {
    let angles = sinogram.crop().unshuffle();
    let leaves = angles.first().map_or(0, |a| a.ncols());
    let depth  = angles.iter().map(|a| a.nrows()).max().unwrap_or(0);
    if leaves == 0 || depth == 0 { return Ok(placeholder()) }

    let scale = scale.max(1);
    let (ncols, nrows) = MONTAGE;
    let (tile_w, tile_h) = canvas(scaled(leaves, scale), scaled(depth, scale))?;
    let (width, height) = canvas(tiled(ncols, tile_w), tiled(nrows, tile_h))?;
    let mut image = GrayImage::from_pixel(width, height, Luma([WHITE]));
    for (n, angle) in angles.iter().enumerate() {
        let n = n as u32;
        let (x0, y0) = (1 + (n % ncols) * (tile_w + 1), 1 + (n / ncols) * (tile_h + 1));
        // Short angles are padded with closed leaves
        for y in 0..tile_h {
            for x in 0..tile_w {
                let t = angle
                    .get(((y / scale) as usize, (x / scale) as usize))
                    .copied()
                    .unwrap_or(0.0);
                image.put_pixel(x0 + x, y0 + y, Luma([grey(t)]));
            }
        }
    }
    Ok(image)
}

pub fn unshuffled_to_png(sinogram: &Sinogram, path: &Path, scale: u32) -> Result<()> {
    save(&render_unshuffled(sinogram, scale)?, path)
}

/// Bar chart: one black bar per bin, the fullest bin reaching the top.
pub fn render_histogram(histogram: &Histogram) -> Result<GrayImage> {
    let counts = histogram.bins().iter().map(|b| b.count).collect::<Vec<_>>();
    if counts.is_empty() { return Ok(placeholder()) }
    let biggest = counts.iter().copied().max().unwrap_or(0).max(1);
    let (bar_w, height) = BAR;
    let (width, height) = canvas(scaled(counts.len(), bar_w), Some(height))?;
    Ok(GrayImage::from_fn(width, height, |x, y| {
        let count = counts[(x / bar_w) as usize];
        let bar_h = (count as u64 * height as u64 / biggest as u64) as u32;
        // One pixel gap between bars
        let in_bar = x % bar_w != bar_w - 1 && y >= height - bar_h;
        Luma([if in_bar { BLACK } else { WHITE }])
    }))
}

pub fn histogram_to_png(histogram: &Histogram, path: &Path) -> Result<()> {
    save(&render_histogram(histogram)?, path)
}
