// Window + software drawing utilities.
// Visual effects provided here:
// 1) A resizable window that shows whatever the screen buffer holds.
// 2) Filled/beveled rectangles for panes and buttons.
// 3) Images stretched to fill a pane.
// 4) A tiny 5x7 bitmap font (scalable) for button labels and the status line.

use crate::error::{Error, Result};
use crate::types::{FrameBuffer, Rect, Rgb};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create a resizable window.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize, target_fps: usize) -> Result<Self> {
        let opts = WindowOptions { resize: true, ..WindowOptions::default() };
        let mut window =
            Window::new(title, width, height, opts).map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(target_fps);
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<()> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Pump window events without drawing (used while a dialog was open).
    pub fn pump(&mut self) {
        self.window.update();
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Current client-area size; changes when the user drags the border.
    pub fn size(&self) -> (usize, usize) {
        self.window.get_size()
    }

    /// Mouse position in window pixels, None when outside.
    pub fn mouse_pos(&self) -> Option<(usize, usize)> {
        self.window
            .get_mouse_pos(MouseMode::Discard)
            .map(|(x, y)| (x.max(0.0) as usize, y.max(0.0) as usize))
    }

    pub fn left_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }

    // keyboard shortcut for ▶/⏸
    pub fn space_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::Space, KeyRepeat::No)
    }

    // keyboard shortcut for STEP; held Enter keeps stepping
    pub fn enter_pressed(&self) -> bool {
        self.window.is_key_pressed(Key::Enter, KeyRepeat::Yes)
    }
}

/* ---------- Color helpers (button hover / press feedback) ---------- */

/// Move each channel `amount` of the way toward white.
pub fn lighten(c: Rgb, amount: f32) -> Rgb {
    let a = amount.clamp(0.0, 1.0);
    let up = |v: u8| (v as f32 + (255.0 - v as f32) * a) as u8;
    Rgb::new(up(c.r), up(c.g), up(c.b))
}

/// Scale each channel down by `amount`.
pub fn darken(c: Rgb, amount: f32) -> Rgb {
    let a = amount.clamp(0.0, 1.0);
    let down = |v: u8| (v as f32 * (1.0 - a)) as u8;
    Rgb::new(down(c.r), down(c.g), down(c.b))
}

/* ---------- Software drawing: pixels, rects, stretched images ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// Fill `r` (clipped to the buffer) with one color.
pub fn fill_rect(fb: &mut FrameBuffer, r: Rect, color: u32) {
    let x1 = (r.x + r.w).min(fb.width);
    let y1 = (r.y + r.h).min(fb.height);
    if r.x >= x1 {
        return;
    }
    for y in r.y..y1 {
        let row = y * fb.width;
        fb.pixels[row + r.x..row + x1].fill(color);
    }
}

/// Two-tone 2px frame: `dark` on the top/left edges, `light` on bottom/right.
/// Visual: the pane looks sunk into the window.
pub fn draw_bevel(fb: &mut FrameBuffer, r: Rect, dark: u32, light: u32) {
    if r.w < 4 || r.h < 4 {
        return;
    }
    fill_rect(fb, Rect::new(r.x, r.y, r.w, 2), dark);
    fill_rect(fb, Rect::new(r.x, r.y, 2, r.h), dark);
    fill_rect(fb, Rect::new(r.x, r.y + r.h - 2, r.w, 2), light);
    fill_rect(fb, Rect::new(r.x + r.w - 2, r.y, 2, r.h), light);
}

/// Nearest-neighbour stretch of `src` to exactly cover `dst_rect`.
/// Visual: the whole image fills the pane, aspect ratio ignored.
pub fn blit_stretched(dst: &mut FrameBuffer, src: &FrameBuffer, dst_rect: Rect) {
    if src.width == 0 || src.height == 0 || dst_rect.w == 0 || dst_rect.h == 0 {
        return;
    }
    let x1 = (dst_rect.x + dst_rect.w).min(dst.width);
    let y1 = (dst_rect.y + dst_rect.h).min(dst.height);

    // Column lookup is the same for every row.
    let cols: Vec<usize> = (dst_rect.x..x1)
        .map(|x| (x - dst_rect.x) * src.width / dst_rect.w)
        .collect();

    for y in dst_rect.y..y1 {
        let sy = (y - dst_rect.y) * src.height / dst_rect.h;
        let src_row = &src.pixels[sy * src.width..(sy + 1) * src.width];
        let dst_row = y * dst.width;
        for (i, &sx) in cols.iter().enumerate() {
            dst.pixels[dst_row + dst_rect.x + i] = src_row[sx];
        }
    }
}

/// ▶ centered in `r`, `size` pixels tall.
pub fn draw_play_glyph(fb: &mut FrameBuffer, r: Rect, size: usize, color: u32) {
    let h = size.min(r.h) as i32;
    let w = h * 7 / 8;
    let x0 = (r.x + r.w / 2) as i32 - w / 2;
    let y0 = (r.y + r.h / 2) as i32 - h / 2;
    for row in 0..h {
        // widest in the middle row, a point at top and bottom
        let dist = (row - h / 2).abs();
        let len = w - (dist * w * 2) / h.max(1);
        for col in 0..len {
            put_pixel(fb, x0 + col, y0 + row, color);
        }
    }
}

/// ⏸ centered in `r`, `size` pixels tall.
pub fn draw_pause_glyph(fb: &mut FrameBuffer, r: Rect, size: usize, color: u32) {
    let h = size.min(r.h);
    let bar = (h / 3).max(2);
    let gap = bar;
    let total = bar * 2 + gap;
    let x0 = r.x + r.w.saturating_sub(total) / 2;
    let y0 = r.y + r.h.saturating_sub(h) / 2;
    fill_rect(fb, Rect::new(x0, y0, bar, h), color);
    fill_rect(fb, Rect::new(x0 + bar + gap, y0, bar, h), color);
}

/* ---------- 5x7 bitmap font ---------- */

/// Return a 5x7 glyph bitmap. Lowercase is drawn as uppercase.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    // Helper macro to define a glyph quickly
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        // Digits 0..9
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        // Punctuation that shows up in file names and status messages
        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        ',' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b01000),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),
        '_' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b11111),
        '/' => g!(0b00001,0b00001,0b00010,0b00100,0b01000,0b10000,0b10000),
        '(' => g!(0b00010,0b00100,0b01000,0b01000,0b01000,0b00100,0b00010),
        ')' => g!(0b01000,0b00100,0b00010,0b00010,0b00010,0b00100,0b01000),
        '\'' => g!(0b00100,0b00100,0b00000,0b00000,0b00000,0b00000,0b00000),

        _ => None,
    }
}

/// Width in pixels of `text` drawn at `scale`.
pub fn text_width_5x7(text: &str, scale: usize) -> usize {
    let n = text.chars().count();
    if n == 0 { 0 } else { (n * 6 - 1) * scale }
}

/// Draw a single 5x7 character at (x,y), each font pixel a `scale`x`scale` block.
/// Visual: a glyph with a 1-font-pixel black shadow for contrast.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: u32, scale: i32) {
    if let Some(rows) = glyph5x7(ch) {
        // Shadow pass first, then the glyph on top
        for (dx, dy, c) in [(scale, scale, 0x00000000), (0, 0, color)] {
            for (ry, rowbits) in rows.iter().enumerate() {
                for rx in 0..5 {
                    if (rowbits & (1 << (4 - rx))) == 0 {
                        continue;
                    }
                    let px = x + rx * scale + dx;
                    let py = y + ry as i32 * scale + dy;
                    for sy in 0..scale {
                        for sx in 0..scale {
                            put_pixel(fb, px + sx, py + sy, c);
                        }
                    }
                }
            }
        }
    }
}

/// Draw a text string using 5x7 glyphs. Unknown characters leave a gap.
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: u32, scale: usize) {
    let s = scale.max(1) as i32;
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color, s);
        x += 6 * s; // 5 pixels glyph width + 1 pixel spacing
    }
}

/// Draw `text` centered in `r`.
pub fn draw_text_centered(fb: &mut FrameBuffer, r: Rect, text: &str, color: u32, scale: usize) {
    let scale = scale.max(1);
    let tw = text_width_5x7(text, scale) as i32;
    let th = (7 * scale) as i32;
    let x = r.x as i32 + (r.w as i32 - tw) / 2;
    let y = r.y as i32 + (r.h as i32 - th) / 2;
    draw_text_5x7(fb, x, y, text, color, scale);
}
