// Layout and button behaviour for the two-pane window.
// Visual expectation:
//   ┌──────────────────────────────────────────────┐
//   │ [LOAD LEFT]                     [LOAD RIGHT] │  70 px top bar
//   ├───────────────────────┬──────────────────────┤
//   │      left image       │     right image      │  92 %
//   ├───────────────────────┼──────────────────────┤
//   │        [STEP]         │        [▶/⏸]         │   8 %
//   └───────────────────────┴──────────────────────┘
// plus a one-line status strip along the bottom edge.

use crate::draw::{darken, lighten};
use crate::types::{Rect, Rgb};

pub const BG: Rgb = Rgb::new(18, 18, 18);
pub const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
pub const LOAD_BASE: Rgb = Rgb::new(128, 0, 128);   // purple
pub const STEP_BASE: Rgb = Rgb::new(30, 144, 255);  // dodger blue
pub const START_BASE: Rgb = Rgb::new(50, 205, 50);  // lime green
pub const STOP_BASE: Rgb = Rgb::new(139, 0, 0);     // dark red
pub const TEXT: Rgb = Rgb::new(255, 255, 255);
pub const TEXT_DIM: Rgb = Rgb::new(150, 150, 150);

pub const BUTTON_W: usize = 180;
pub const BUTTON_H: usize = 46;
const TOP_BAR_H: usize = 70;
const PAD: usize = 2;
const STATUS_H: usize = 14;

/// Every clickable thing in the window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    LoadLeft,
    LoadRight,
    Step,
    StartStop,
}

impl Control {
    pub const ALL: [Control; 4] = [Control::LoadLeft, Control::LoadRight, Control::Step, Control::StartStop];
}

/// Where everything goes for one window size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    pub width: usize,
    pub height: usize,
    pub load_left: Rect,
    pub load_right: Rect,
    pub left_pane: Rect,
    pub right_pane: Rect,
    pub step: Rect,
    pub start_stop: Rect,
    pub status: Rect,
}

impl Layout {
    /// Lay out a `width`x`height` canvas, never smaller than `min`.
    pub fn compute(width: usize, height: usize, min: (usize, usize)) -> Self {
        let width = width.max(min.0);
        let height = height.max(min.1);

        let inner_w = width - 2 * PAD;
        let inner_h = height - 2 * PAD - STATUS_H;

        // Top bar: buttons hug the outer edges, vertically centered.
        let bar = Rect::new(PAD, PAD, inner_w, TOP_BAR_H);
        let by = bar.y + (TOP_BAR_H - BUTTON_H) / 2;
        let load_left = Rect::new(bar.x, by, BUTTON_W, BUTTON_H);
        let load_right = Rect::new(bar.x + bar.w - BUTTON_W, by, BUTTON_W, BUTTON_H);

        // Grid below: two equal columns, 92/8 row split.
        let grid_y = bar.y + TOP_BAR_H;
        let grid_h = inner_h - TOP_BAR_H;
        let col_w = inner_w / 2;
        let pane_h = grid_h * 92 / 100;
        let host_h = grid_h - pane_h;

        let left_pane = Rect::new(PAD, grid_y, col_w, pane_h);
        let right_pane = Rect::new(PAD + col_w, grid_y, inner_w - col_w, pane_h);

        let left_host = Rect::new(left_pane.x, grid_y + pane_h, left_pane.w, host_h);
        let right_host = Rect::new(right_pane.x, grid_y + pane_h, right_pane.w, host_h);

        Self {
            width,
            height,
            load_left,
            load_right,
            left_pane,
            right_pane,
            step: left_host.centered(BUTTON_W, BUTTON_H),
            start_stop: right_host.centered(BUTTON_W, BUTTON_H),
            status: Rect::new(PAD, height - PAD - STATUS_H, inner_w, STATUS_H),
        }
    }

    pub fn rect(&self, c: Control) -> Rect {
        match c {
            Control::LoadLeft => self.load_left,
            Control::LoadRight => self.load_right,
            Control::Step => self.step,
            Control::StartStop => self.start_stop,
        }
    }

    /// Topmost control under (x,y).
    pub fn hit(&self, x: usize, y: usize) -> Option<Control> {
        Control::ALL.into_iter().find(|&c| self.rect(c).contains(x, y))
    }

    /// Map a mouse position in window pixels onto this canvas.
    /// Below the minimum size the canvas is stretched down to fit the window,
    /// so the position has to be scaled back up.
    pub fn to_canvas(&self, pos: (usize, usize), window: (usize, usize)) -> (usize, usize) {
        let scale = |p: usize, win: usize, canvas: usize| {
            if win == 0 || win >= canvas { p } else { (p * canvas / win).min(canvas - 1) }
        };
        (scale(pos.0, window.0, self.width), scale(pos.1, window.1, self.height))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Look {
    Normal,
    Hover,
    Pressed,
    Disabled,
}

/// Fill color for a button with base color `base` in state `look`.
pub fn button_fill(base: Rgb, look: Look) -> Rgb {
    match look {
        Look::Normal => base,
        Look::Hover => lighten(base, 0.12),
        Look::Pressed => darken(base, 0.10),
        // washed out toward the background
        Look::Disabled => Rgb::new(
            ((base.r as u16 + BG.r as u16 * 2) / 3) as u8,
            ((base.g as u16 + BG.g as u16 * 2) / 3) as u8,
            ((base.b as u16 + BG.b as u16 * 2) / 3) as u8,
        ),
    }
}

/// Turns raw mouse samples into clicks: press and release on the same control.
#[derive(Debug, Default)]
pub struct Pointer {
    pos: Option<(usize, usize)>,
    was_down: bool,
    pressed_on: Option<Control>,
}

impl Pointer {
    /// Feed one frame of mouse state. Returns the clicked control, if any.
    pub fn update(&mut self, layout: &Layout, pos: Option<(usize, usize)>, down: bool) -> Option<Control> {
        self.pos = pos;
        let over = pos.and_then(|(x, y)| layout.hit(x, y));

        let mut clicked = None;
        if down && !self.was_down {
            self.pressed_on = over;
        } else if !down && self.was_down {
            if self.pressed_on.is_some() && self.pressed_on == over {
                clicked = over;
            }
            self.pressed_on = None;
        }
        self.was_down = down;
        clicked
    }

    /// How `c` should look right now (ignoring enabled state).
    pub fn look(&self, layout: &Layout, c: Control) -> Look {
        let over = self.pos.map(|(x, y)| layout.rect(c).contains(x, y)).unwrap_or(false);
        match (over, self.was_down && self.pressed_on == Some(c)) {
            (true, true) => Look::Pressed,
            (true, false) => Look::Hover,
            _ => Look::Normal,
        }
    }

    /// Forget a half-finished press (e.g. a modal dialog swallowed the release).
    pub fn reset(&mut self) {
        self.was_down = false;
        self.pressed_on = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIN: (usize, usize) = (900, 600);

    #[test]
    fn default_window_layout() {
        let l = Layout::compute(1100, 720, MIN);
        assert_eq!(l.load_left.x, 2);
        assert_eq!(l.load_right.x + l.load_right.w, 1098);
        assert_eq!(l.left_pane.w + l.right_pane.w, 1096);
        assert_eq!(l.left_pane.y, 72);
        assert!(l.step.y >= l.left_pane.y + l.left_pane.h);
        assert!(l.status.y >= l.step.y + l.step.h);
        assert_eq!(l.status.y + l.status.h, 718);
    }

    #[test]
    fn bottom_buttons_center_under_their_pane() {
        let l = Layout::compute(1100, 720, MIN);
        let mid = |r: Rect| r.x + r.w / 2;
        assert!(mid(l.step).abs_diff(mid(l.left_pane)) <= 1);
        assert!(mid(l.start_stop).abs_diff(mid(l.right_pane)) <= 1);
    }

    #[test]
    fn tiny_window_is_clamped_to_minimum() {
        let l = Layout::compute(100, 50, MIN);
        assert_eq!((l.width, l.height), MIN);
        assert!(l.load_left.x + l.load_left.w < l.load_right.x);
    }

    #[test]
    fn hit_testing() {
        let l = Layout::compute(1100, 720, MIN);
        let c = l.step.centered(1, 1);
        assert_eq!(l.hit(c.x, c.y), Some(Control::Step));
        let p = l.left_pane.centered(1, 1);
        assert_eq!(l.hit(p.x, p.y), None);
    }

    #[test]
    fn click_needs_press_and_release_on_same_control() {
        let l = Layout::compute(1100, 720, MIN);
        let step = l.step.centered(1, 1);
        let load = l.load_left.centered(1, 1);
        let mut p = Pointer::default();

        assert_eq!(p.update(&l, Some((step.x, step.y)), true), None);
        assert_eq!(p.look(&l, Control::Step), Look::Pressed);
        assert_eq!(p.update(&l, Some((step.x, step.y)), false), Some(Control::Step));
        assert_eq!(p.look(&l, Control::Step), Look::Hover);

        // press on STEP, release on LOAD LEFT: no click
        p.update(&l, Some((step.x, step.y)), true);
        assert_eq!(p.update(&l, Some((load.x, load.y)), false), None);

        // press outside, release on a button: no click
        p.update(&l, None, true);
        assert_eq!(p.update(&l, Some((load.x, load.y)), false), None);
    }

    #[test]
    fn small_window_clicks_land_on_stretched_buttons() {
        // 600x400 window showing the 900x600 minimum canvas
        let l = Layout::compute(600, 400, MIN);
        assert_eq!((l.width, l.height), (900, 600));
        let step = l.step.centered(1, 1);
        let on_screen = (step.x * 600 / 900, step.y * 400 / 600);
        let (x, y) = l.to_canvas(on_screen, (600, 400));
        assert_eq!(l.hit(x, y), Some(Control::Step));

        let mut p = Pointer::default();
        p.update(&l, Some((x, y)), true);
        assert_eq!(p.update(&l, Some((x, y)), false), Some(Control::Step));
    }

    #[test]
    fn big_window_positions_pass_through() {
        let l = Layout::compute(1100, 720, MIN);
        assert_eq!(l.to_canvas((1099, 719), (1100, 720)), (1099, 719));
        assert_eq!(l.to_canvas((5, 5), (0, 0)), (5, 5));
    }

    #[test]
    fn reset_drops_pending_press() {
        let l = Layout::compute(1100, 720, MIN);
        let step = l.step.centered(1, 1);
        let mut p = Pointer::default();
        p.update(&l, Some((step.x, step.y)), true);
        p.reset();
        assert_eq!(p.update(&l, Some((step.x, step.y)), false), None);
    }

    #[test]
    fn button_fill_states() {
        assert_eq!(button_fill(STEP_BASE, Look::Normal), STEP_BASE);
        assert_eq!(button_fill(STEP_BASE, Look::Hover), lighten(STEP_BASE, 0.12));
        assert_eq!(button_fill(STEP_BASE, Look::Pressed), darken(STEP_BASE, 0.10));
        let d = button_fill(STEP_BASE, Look::Disabled);
        assert!(d.b < STEP_BASE.b && d.b > BG.b);
    }
}
