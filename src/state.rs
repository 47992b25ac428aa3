// Everything the window needs to remember between frames, minus the window.
// Visual expectation: the left image only changes when you click STEP; the
// right image keeps changing on its own while the ▶/⏸ button shows ⏸.
//
// Input arrives as `Event`s; the answer is a list of `Effect`s the event loop
// carries out (repaint a pane, start/stop the timer). No toolkit types in here.

use log::{debug, info};

use crate::churn::run_batch;
use crate::types::FrameBuffer;

/// Which half of the window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pane {
    Left,
    Right,
}

/// One image plus its scan position.
#[derive(Debug, Default)]
pub struct Side {
    buffer: Option<FrameBuffer>,
    cursor: usize,
}

impl Side {
    /// Swap in a freshly loaded image; the old one is dropped here.
    pub fn load(&mut self, buffer: FrameBuffer) {
        self.buffer = Some(buffer);
        self.cursor = 0;
    }

    pub fn is_loaded(&self) -> bool {
        self.buffer.is_some()
    }

    pub fn buffer(&self) -> Option<&FrameBuffer> {
        self.buffer.as_ref()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Run one batch. Returns false when there was nothing to work on.
    pub fn advance(&mut self, count: usize) -> bool {
        if self.buffer.is_none() {
            return false;
        }
        self.cursor = run_batch(self.buffer.as_mut(), self.cursor, count);
        true
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Stopped,
    Running,
}

/// Things that happen to the app.
#[derive(Debug)]
pub enum Event {
    LoadedLeft(FrameBuffer),
    LoadedRight(FrameBuffer),
    Step,
    ToggleRun,
    Tick,
}

/// Things the app asks the outside world to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    Repaint(Pane),
    StartTicker,
    StopTicker,
}

#[derive(Debug)]
pub struct AppState {
    left: Side,
    right: Side,
    run: RunState,
    step_batch: usize,
    auto_batch: usize,
}

impl AppState {
    pub fn new(step_batch: usize, auto_batch: usize) -> Self {
        Self {
            left: Side::default(),
            right: Side::default(),
            run: RunState::Stopped,
            step_batch,
            auto_batch,
        }
    }

    pub fn left(&self) -> &Side {
        &self.left
    }

    pub fn right(&self) -> &Side {
        &self.right
    }

    pub fn run_state(&self) -> RunState {
        self.run
    }

    /// STEP is live once a left image exists.
    pub fn can_step(&self) -> bool {
        self.left.is_loaded()
    }

    /// ▶/⏸ is live once a right image exists.
    pub fn can_toggle(&self) -> bool {
        self.right.is_loaded()
    }

    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::LoadedLeft(buffer) => {
                info!("left image loaded ({}x{})", buffer.width, buffer.height);
                self.left.load(buffer);
                vec![Effect::Repaint(Pane::Left)]
            }

            Event::LoadedRight(buffer) => {
                // Never swap the buffer under a running timer.
                let mut effects = self.stop();
                info!("right image loaded ({}x{})", buffer.width, buffer.height);
                self.right.load(buffer);
                effects.push(Effect::Repaint(Pane::Right));
                effects
            }

            Event::Step => {
                if self.left.advance(self.step_batch) {
                    debug!("step: left cursor now {}", self.left.cursor);
                    vec![Effect::Repaint(Pane::Left)]
                } else {
                    Vec::new()
                }
            }

            Event::ToggleRun => match self.run {
                RunState::Stopped if self.can_toggle() => {
                    info!("auto-advance started");
                    self.run = RunState::Running;
                    vec![Effect::StartTicker]
                }
                RunState::Stopped => Vec::new(),
                RunState::Running => self.stop(),
            },

            Event::Tick => {
                if self.run == RunState::Running && self.right.advance(self.auto_batch) {
                    vec![Effect::Repaint(Pane::Right)]
                } else {
                    Vec::new()
                }
            }
        }
    }

    fn stop(&mut self) -> Vec<Effect> {
        if self.run == RunState::Running {
            info!("auto-advance stopped");
            self.run = RunState::Stopped;
            vec![Effect::StopTicker]
        } else {
            Vec::new()
        }
    }
}
