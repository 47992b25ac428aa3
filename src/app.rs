// The event loop: window input → Events → AppState → Effects → pixels on screen.
// Visual expectation per frame:
//   • buttons react to hover/press; STEP and ▶ stay greyed until their image exists
//   • a pane is re-blitted only after a batch touched it (or the window resized)
//   • the status strip shows sizes, cursors, and the last load problem, if any

use std::time::Instant;

use log::{debug, info};

use crate::config::Config;
use crate::draw::{
    blit_stretched, draw_bevel, draw_pause_glyph, draw_play_glyph, draw_text_5x7,
    draw_text_centered, fill_rect, Drawer,
};
use crate::error::Result;
use crate::loader::pick_and_load;
use crate::state::{AppState, Effect, Event, Pane, RunState, Side};
use crate::ticker::Ticker;
use crate::types::{FrameBuffer, Rect};
use crate::ui::{self, Control, Layout, Look, Pointer};

pub const TITLE: &str = "Image Pixel Filter";

/// Which parts of the screen buffer are out of date.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Damage {
    pub full: bool,
    pub left: bool,
    pub right: bool,
}

impl Damage {
    pub fn all() -> Self {
        Self { full: true, left: true, right: true }
    }

    pub fn mark(&mut self, pane: Pane) {
        match pane {
            Pane::Left => self.left = true,
            Pane::Right => self.right = true,
        }
    }
}

pub struct App {
    cfg: Config,
    drawer: Drawer,
    state: AppState,
    ticker: Ticker,
    layout: Layout,
    pointer: Pointer,
    screen: FrameBuffer,
    damage: Damage,
    message: String, // last user-facing problem, shown in the status strip
}

impl App {
    pub fn new(cfg: Config) -> Result<Self> {
        let drawer = Drawer::new(TITLE, cfg.window_width, cfg.window_height, cfg.target_fps)?;
        let (w, h) = drawer.size();
        let layout = Layout::compute(w, h, (cfg.min_width, cfg.min_height));
        let screen = FrameBuffer::new(layout.width, layout.height, ui::BG.pack());
        info!(
            "window {}x{}, step batch {}, auto batch {} every {:?}",
            layout.width, layout.height, cfg.step_batch, cfg.auto_batch, cfg.tick_interval
        );

        Ok(Self {
            state: AppState::new(cfg.step_batch, cfg.auto_batch),
            ticker: Ticker::new(cfg.tick_interval),
            cfg,
            drawer,
            layout,
            pointer: Pointer::default(),
            screen,
            damage: Damage::all(),
            message: String::new(),
        })
    }

    /* ------------------------------ Main loop ------------------------------ */
    pub fn run(&mut self) -> Result<()> {
        while self.drawer.is_open() && !self.drawer.esc_pressed() {
            // 1) Follow window resizes.
            let (w, h) = self.drawer.size();
            let layout = Layout::compute(w, h, (self.cfg.min_width, self.cfg.min_height));
            if layout != self.layout {
                debug!("resized to {}x{}", layout.width, layout.height);
                self.layout = layout;
                self.screen.resize(layout.width, layout.height, ui::BG.pack());
                self.damage = Damage::all();
            }

            // 2) Inputs: mouse clicks, then keyboard shortcuts.
            let window = (w, h);
            let pos = self.drawer.mouse_pos().map(|p| self.layout.to_canvas(p, window));
            let clicked = self.pointer.update(&self.layout, pos, self.drawer.left_mouse_down());
            if let Some(control) = clicked {
                self.trigger(control);
            }
            if self.drawer.enter_pressed() {
                self.trigger(Control::Step);
            }
            if self.drawer.space_pressed_once() {
                self.trigger(Control::StartStop);
            }

            // 3) Timer.
            if self.ticker.poll(Instant::now()) {
                self.dispatch(Event::Tick);
            }

            // 4) Paint what changed and show it.
            render_frame(
                &mut self.screen,
                &self.layout,
                &self.state,
                &self.pointer,
                &self.message,
                self.damage,
            );
            self.damage = Damage::default();
            self.drawer.present(&self.screen)?;
        }

        self.ticker.stop();
        info!("window closed");
        Ok(())
    }

    /// A button (or its shortcut) was activated.
    fn trigger(&mut self, control: Control) {
        match control {
            Control::LoadLeft => self.load(Pane::Left),
            Control::LoadRight => self.load(Pane::Right),
            Control::Step if self.state.can_step() => self.dispatch(Event::Step),
            Control::StartStop if self.state.can_toggle() => self.dispatch(Event::ToggleRun),
            _ => {}
        }
    }

    fn load(&mut self, pane: Pane) {
        let title = match pane {
            Pane::Left => "Select Left Image",
            Pane::Right => "Select Right Image",
        };

        // Blocks until the dialog closes; the window gets no events meanwhile.
        let picked = pick_and_load(title);
        self.pointer.reset();
        self.drawer.pump();

        if picked.is_none() {
            debug!("{title}: cancelled");
        }
        let effects = apply_load(&mut self.state, pane, picked, &mut self.message);
        apply_effects(&effects, &mut self.ticker, &mut self.damage, Instant::now());
    }

    fn dispatch(&mut self, event: Event) {
        let effects = self.state.handle(event);
        apply_effects(&effects, &mut self.ticker, &mut self.damage, Instant::now());
        debug_assert_eq!(self.ticker.is_running(), self.state.run_state() == RunState::Running);
    }
}

/// Fold the outcome of a load attempt into the state.
/// Cancelled or failed loads change nothing but the status message.
pub fn apply_load(
    state: &mut AppState,
    pane: Pane,
    picked: Option<Result<FrameBuffer>>,
    message: &mut String,
) -> Vec<Effect> {
    match picked {
        None => Vec::new(),
        Some(Err(e)) => {
            *message = e.to_string();
            Vec::new()
        }
        Some(Ok(buffer)) => {
            message.clear();
            let event = match pane {
                Pane::Left => Event::LoadedLeft(buffer),
                Pane::Right => Event::LoadedRight(buffer),
            };
            state.handle(event)
        }
    }
}

/// Carry out what the state asked for: timer on/off, panes to repaint.
pub fn apply_effects(effects: &[Effect], ticker: &mut Ticker, damage: &mut Damage, now: Instant) {
    for effect in effects {
        match *effect {
            Effect::Repaint(pane) => damage.mark(pane),
            Effect::StartTicker => ticker.start(now),
            Effect::StopTicker => ticker.stop(),
        }
    }
}

/// Is `c` clickable in this state?
pub fn control_enabled(state: &AppState, c: Control) -> bool {
    match c {
        Control::LoadLeft | Control::LoadRight => true,
        Control::Step => state.can_step(),
        Control::StartStop => state.can_toggle(),
    }
}

/// One-line summary for the bottom strip.
pub fn status_text(state: &AppState, message: &str) -> String {
    fn side(name: &str, s: &Side) -> String {
        match s.buffer() {
            Some(b) => format!("{name} {}x{} at {}", b.width, b.height, s.cursor()),
            None => format!("{name} empty"),
        }
    }
    let run = match state.run_state() {
        RunState::Running => "running",
        RunState::Stopped => "stopped",
    };
    let mut text = format!("{} | {} ({run})", side("left", state.left()), side("right", state.right()));
    if !message.is_empty() {
        text.push_str(" | ");
        text.push_str(message);
    }
    text
}

/// Paint one frame into `screen`. Panes are only re-blitted when damaged;
/// buttons and the status strip are cheap and redrawn every time.
pub fn render_frame(
    screen: &mut FrameBuffer,
    layout: &Layout,
    state: &AppState,
    pointer: &Pointer,
    message: &str,
    damage: Damage,
) {
    if damage.full {
        let whole = Rect::new(0, 0, screen.width, screen.height);
        fill_rect(screen, whole, ui::BG.pack());
    }
    if damage.full || damage.left {
        paint_pane(screen, layout.left_pane, state.left());
    }
    if damage.full || damage.right {
        paint_pane(screen, layout.right_pane, state.right());
    }

    for c in Control::ALL {
        let rect = layout.rect(c);
        let enabled = control_enabled(state, c);
        let look = if enabled { pointer.look(layout, c) } else { Look::Disabled };
        let base = match c {
            Control::LoadLeft | Control::LoadRight => ui::LOAD_BASE,
            Control::Step => ui::STEP_BASE,
            Control::StartStop if state.run_state() == RunState::Running => ui::STOP_BASE,
            Control::StartStop => ui::START_BASE,
        };
        fill_rect(screen, rect, ui::button_fill(base, look).pack());

        let ink = (if enabled { ui::TEXT } else { ui::TEXT_DIM }).pack();
        match c {
            Control::LoadLeft => draw_text_centered(screen, rect, "LOAD LEFT", ink, 2),
            Control::LoadRight => draw_text_centered(screen, rect, "LOAD RIGHT", ink, 2),
            Control::Step => draw_text_centered(screen, rect, "STEP", ink, 2),
            Control::StartStop if state.run_state() == RunState::Running => {
                draw_pause_glyph(screen, rect, 20, ink)
            }
            Control::StartStop => draw_play_glyph(screen, rect, 20, ink),
        }
    }

    fill_rect(screen, layout.status, ui::BG.pack());
    draw_text_5x7(
        screen,
        layout.status.x as i32 + 4,
        layout.status.y as i32 + 3,
        &status_text(state, message),
        ui::TEXT_DIM.pack(),
        1,
    );
}

fn paint_pane(screen: &mut FrameBuffer, rect: Rect, side: &Side) {
    fill_rect(screen, rect, ui::PANEL_BG.pack());
    if let Some(img) = side.buffer() {
        // leave room for the 2px bevel
        let inner = Rect::new(rect.x + 2, rect.y + 2, rect.w.saturating_sub(4), rect.h.saturating_sub(4));
        blit_stretched(screen, img, inner);
    }
    draw_bevel(screen, rect, 0x00_40_40_40, 0x00_90_90_90);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::churn::{AUTO_BATCH, STEP_BATCH};
    use crate::error::Error;
    use crate::types::Rgb;

    const MIN: (usize, usize) = (900, 600);

    fn setup() -> (FrameBuffer, Layout, AppState, Pointer) {
        let layout = Layout::compute(900, 600, MIN);
        let screen = FrameBuffer::new(layout.width, layout.height, 0);
        (screen, layout, AppState::new(STEP_BATCH, AUTO_BATCH), Pointer::default())
    }

    fn at_center(screen: &FrameBuffer, r: Rect) -> u32 {
        let c = r.centered(1, 1);
        screen.pixels[c.y * screen.width + c.x]
    }

    fn running_right_side() -> AppState {
        let mut s = AppState::new(STEP_BATCH, AUTO_BATCH);
        s.handle(Event::LoadedRight(FrameBuffer::new(40, 40, Rgb::new(9, 9, 9).pack())));
        s.handle(Event::ToggleRun);
        s.handle(Event::Tick);
        s
    }

    #[test]
    fn failed_load_keeps_running_right_side() {
        let mut s = running_right_side();
        let before = s.right().buffer().cloned();
        let mut message = String::new();

        let picked = Some(Err(Error::Config("bad file".into())));
        let effects = apply_load(&mut s, Pane::Right, picked, &mut message);

        assert!(effects.is_empty());
        assert_eq!(message, "Config error: bad file");
        assert_eq!(s.run_state(), RunState::Running);
        assert_eq!(s.right().cursor(), AUTO_BATCH);
        assert_eq!(s.right().buffer().cloned(), before);
    }

    #[test]
    fn cancelled_load_changes_nothing() {
        let mut s = running_right_side();
        let mut message = String::from("Could not load x.png");

        assert!(apply_load(&mut s, Pane::Right, None, &mut message).is_empty());
        assert!(apply_load(&mut s, Pane::Left, None, &mut message).is_empty());

        assert_eq!(message, "Could not load x.png");
        assert_eq!(s.run_state(), RunState::Running);
        assert_eq!(s.right().cursor(), AUTO_BATCH);
        assert!(!s.left().is_loaded());
    }

    #[test]
    fn good_load_clears_message_and_stops_right() {
        let mut s = running_right_side();
        let mut message = String::from("old problem");
        let picked = Some(Ok(FrameBuffer::new(3, 3, 0)));

        let effects = apply_load(&mut s, Pane::Right, picked, &mut message);

        assert_eq!(effects, vec![Effect::StopTicker, Effect::Repaint(Pane::Right)]);
        assert!(message.is_empty());
        assert_eq!(s.run_state(), RunState::Stopped);
        assert_eq!(s.right().cursor(), 0);
    }

    #[test]
    fn toggle_arms_ticker_and_ticks_repaint_right() {
        let interval = Duration::from_millis(15);
        let mut s = AppState::new(STEP_BATCH, AUTO_BATCH);
        let mut ticker = Ticker::new(interval);
        let mut damage = Damage::default();
        let t0 = Instant::now();

        let effects = s.handle(Event::LoadedRight(FrameBuffer::new(40, 40, 0)));
        apply_effects(&effects, &mut ticker, &mut damage, t0);
        assert!(damage.right && !damage.left);
        assert!(!ticker.is_running());

        let effects = s.handle(Event::ToggleRun);
        apply_effects(&effects, &mut ticker, &mut damage, t0);
        assert!(ticker.is_running());

        damage = Damage::default();
        assert!(ticker.poll(t0 + interval));
        let effects = s.handle(Event::Tick);
        apply_effects(&effects, &mut ticker, &mut damage, t0 + interval);
        assert!(damage.right);
        assert_eq!(s.right().cursor(), AUTO_BATCH);

        let effects = s.handle(Event::ToggleRun);
        apply_effects(&effects, &mut ticker, &mut damage, t0 + interval);
        assert!(!ticker.is_running());
        assert!(!ticker.poll(t0 + interval * 10));
    }

    #[test]
    fn guards_follow_loaded_images() {
        let mut s = AppState::new(STEP_BATCH, AUTO_BATCH);
        assert!(control_enabled(&s, Control::LoadLeft));
        assert!(!control_enabled(&s, Control::Step));
        assert!(!control_enabled(&s, Control::StartStop));
        s.handle(Event::LoadedRight(FrameBuffer::new(2, 2, 0)));
        assert!(control_enabled(&s, Control::StartStop));
        assert!(!control_enabled(&s, Control::Step));
    }

    #[test]
    fn status_text_mentions_both_sides_and_message() {
        let mut s = AppState::new(STEP_BATCH, AUTO_BATCH);
        s.handle(Event::LoadedLeft(FrameBuffer::new(4, 3, 0)));
        let text = status_text(&s, "Could not load x.png");
        assert_eq!(text, "left 4x3 at 0 | right empty (stopped) | Could not load x.png");
    }

    #[test]
    fn full_frame_shows_image_in_its_pane() {
        let (mut screen, layout, mut state, pointer) = setup();
        let red = Rgb::new(200, 0, 0).pack();
        state.handle(Event::LoadedLeft(FrameBuffer::new(8, 8, red)));

        render_frame(&mut screen, &layout, &state, &pointer, "", Damage::all());

        assert_eq!(at_center(&screen, layout.left_pane), red);
        assert_eq!(at_center(&screen, layout.right_pane), ui::PANEL_BG.pack());
    }

    #[test]
    fn undamaged_pane_is_left_alone() {
        let (mut screen, layout, mut state, pointer) = setup();
        render_frame(&mut screen, &layout, &state, &pointer, "", Damage::all());

        let blue = Rgb::new(0, 0, 200).pack();
        state.handle(Event::LoadedRight(FrameBuffer::new(8, 8, blue)));

        render_frame(&mut screen, &layout, &state, &pointer, "", Damage::default());
        assert_eq!(at_center(&screen, layout.right_pane), ui::PANEL_BG.pack());

        let mut d = Damage::default();
        d.mark(Pane::Right);
        render_frame(&mut screen, &layout, &state, &pointer, "", d);
        assert_eq!(at_center(&screen, layout.right_pane), blue);
    }

    #[test]
    fn start_stop_turns_red_while_running() {
        let (mut screen, layout, mut state, pointer) = setup();
        state.handle(Event::LoadedRight(FrameBuffer::new(2, 2, 0)));
        state.handle(Event::ToggleRun);

        render_frame(&mut screen, &layout, &state, &pointer, "", Damage::all());

        let r = layout.start_stop;
        assert_eq!(screen.pixels[(r.y + 1) * screen.width + r.x + 1], ui::STOP_BASE.pack());
    }
}
