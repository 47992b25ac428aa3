// Core types shared by the filter, the loader and the drawing code.

use image::RgbImage;

/// A screen-ready pixel grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    pub width: usize,      // pixels per row
    pub height: usize,     // number of rows
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb, row-major
}

impl FrameBuffer {
    /// A buffer of `width * height` pixels, all set to `fill`.
    pub fn new(width: usize, height: usize, fill: u32) -> Self {
        Self { width, height, pixels: vec![fill; width * height] }
    }

    /// Copy any raster into the packed 0x00RRGGBB layout.
    pub fn from_raster<R: Raster>(src: &R) -> Self {
        let (w, h) = (src.width(), src.height());
        let mut pixels = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                pixels.push(src.get_pixel(x, y).pack());
            }
        }
        Self { width: w, height: h, pixels }
    }

    /// Change the size in place, reusing the allocation. Contents are reset to `fill`.
    pub fn resize(&mut self, width: usize, height: usize, fill: u32) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width * height, fill);
    }
}

/// One 8-bit-per-channel color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pack as 0x00RRGGBB.
    #[inline]
    pub const fn pack(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    #[inline]
    pub const fn unpack(px: u32) -> Self {
        Self {
            r: ((px >> 16) & 0xFF) as u8,
            g: ((px >> 8) & 0xFF) as u8,
            b: (px & 0xFF) as u8,
        }
    }
}

/// Per-pixel read/write access to a fixed-size RGB grid.
/// The filter only talks to this, so it runs the same on a window buffer
/// or on a decoded `image` buffer.
pub trait Raster {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    /// Caller guarantees `x < width` and `y < height`.
    fn get_pixel(&self, x: usize, y: usize) -> Rgb;
    fn set_pixel(&mut self, x: usize, y: usize, color: Rgb);
}

impl Raster for FrameBuffer {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn get_pixel(&self, x: usize, y: usize) -> Rgb {
        Rgb::unpack(self.pixels[y * self.width + x])
    }

    #[inline]
    fn set_pixel(&mut self, x: usize, y: usize, color: Rgb) {
        self.pixels[y * self.width + x] = color.pack();
    }
}

impl Raster for RgbImage {
    fn width(&self) -> usize {
        self.dimensions().0 as usize
    }

    fn height(&self) -> usize {
        self.dimensions().1 as usize
    }

    fn get_pixel(&self, x: usize, y: usize) -> Rgb {
        let p = image::ImageBuffer::get_pixel(self, x as u32, y as u32);
        Rgb::new(p[0], p[1], p[2])
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: Rgb) {
        self.put_pixel(x as u32, y as u32, image::Rgb([color.r, color.g, color.b]));
    }
}

/// Axis-aligned rectangle in window pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub w: usize,
    pub h: usize,
}

impl Rect {
    pub const fn new(x: usize, y: usize, w: usize, h: usize) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, px: usize, py: usize) -> bool {
        px >= self.x && py >= self.y && px < self.x + self.w && py < self.y + self.h
    }

    /// A `w`x`h` rect centered inside `self` (clipped to it when larger).
    pub fn centered(&self, w: usize, h: usize) -> Rect {
        let w = w.min(self.w);
        let h = h.min(self.h);
        Rect::new(self.x + (self.w - w) / 2, self.y + (self.h - h) / 2, w, h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_matches_minifb_layout() {
        let c = Rgb::new(0x12, 0x34, 0x56);
        assert_eq!(c.pack(), 0x00_12_34_56);
        assert_eq!(Rgb::unpack(0xFF_12_34_56), c); // top byte ignored
    }

    #[test]
    fn framebuffer_is_row_major() {
        let mut fb = FrameBuffer::new(3, 2, 0);
        fb.set_pixel(2, 1, Rgb::new(1, 2, 3));
        assert_eq!(fb.pixels[5], 0x00_01_02_03);
        assert_eq!(fb.get_pixel(2, 1), Rgb::new(1, 2, 3));
    }

    #[test]
    fn from_raster_copies_rgb_image() {
        let mut img = RgbImage::new(2, 2);
        Raster::set_pixel(&mut img, 1, 0, Rgb::new(10, 20, 30));
        let fb = FrameBuffer::from_raster(&img);
        assert_eq!((fb.width, fb.height), (2, 2));
        assert_eq!(fb.pixels[1], Rgb::new(10, 20, 30).pack());
        assert_eq!(fb.pixels[0], 0);
    }

    #[test]
    fn rect_centering_and_hits() {
        let host = Rect::new(100, 50, 200, 60);
        let inner = host.centered(180, 46);
        assert_eq!(inner, Rect::new(110, 57, 180, 46));
        assert!(inner.contains(110, 57));
        assert!(!inner.contains(290, 57));
        assert_eq!(Rect::new(0, 0, 10, 10).centered(50, 50), Rect::new(0, 0, 10, 10));
    }
}
