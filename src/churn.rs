// The pixel filter itself.
// Visual expectation: every call recolors exactly one pixel, walking the image
// in reading order (left→right, top→bottom) and wrapping back to the top-left
// corner. The "noise" is pure index arithmetic, so the same image + same number
// of steps always looks the same.

use crate::types::{Raster, Rgb};

/// Pixels changed per STEP click.
pub const STEP_BATCH: usize = 2500;
/// Pixels changed per timer tick while running.
pub const AUTO_BATCH: usize = 900;
/// Timer period while running.
pub const AUTO_INTERVAL_MS: u64 = 15;

/// The color rule for the pixel at linear index `t`.
/// Every channel wraps modulo 256 instead of clamping.
#[inline]
pub fn transform(c: Rgb, t: usize) -> Rgb {
    let r = (255 - c.r as usize + t % 97) & 255;
    let g = (c.g as usize + 40 + (t / 3) % 83) & 255;
    let b = (c.b as usize + 80 + (t / 7) % 71) & 255;
    Rgb::new(r as u8, g as u8, b as u8)
}

/// Recolor the pixel under `cursor` and return the next cursor.
///
/// A cursor at or past the end restarts at 0 *before* the read, so the
/// returned value may equal `width * height`; the next call wraps it.
/// Zero-area rasters are left alone and the cursor comes back unchanged.
pub fn mutate_pixel<R: Raster + ?Sized>(raster: &mut R, cursor: usize) -> usize {
    let w = raster.width();
    let total = w * raster.height();
    if total == 0 {
        return cursor;
    }

    let t = if cursor >= total { 0 } else { cursor };
    let (x, y) = (t % w, t / w);

    let c = raster.get_pixel(x, y);
    raster.set_pixel(x, y, transform(c, t));

    t + 1
}

/// Apply `mutate_pixel` `count` times, threading the cursor through.
/// With no raster loaded this does nothing and hands the cursor back.
///
/// Callers repaint once after a batch, not per pixel.
pub fn run_batch<R: Raster + ?Sized>(raster: Option<&mut R>, cursor: usize, count: usize) -> usize {
    let Some(raster) = raster else {
        return cursor;
    };
    let mut cursor = cursor;
    for _ in 0..count {
        cursor = mutate_pixel(&mut *raster, cursor);
    }
    cursor
}
