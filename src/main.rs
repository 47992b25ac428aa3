// What you SEE:
// • Two black panes. LOAD LEFT / LOAD RIGHT open a file picker and show the image.
// • STEP recolors the next 2500 pixels of the left image (reading order, wraps around).
// • ▶ starts recoloring the right image 900 pixels every 15 ms; ⏸ pauses it.
// • Enter = STEP, Space = ▶/⏸, ESC quits. Set RUST_LOG=debug for chatty logs.

mod app;
mod churn;
mod config;
mod draw;
mod error;
mod loader;
mod state;
mod ticker;
mod types;
mod ui;

use app::App;
use config::Config;
use error::Error;

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    /* --- Settings (defaults + PIXEL_FILTER_* env overrides) --- */
    let cfg = Config::from_env()?;

    /* --- Window + state ---
       Visual: window opens with two empty panes; STEP and ▶ are greyed out. */
    let mut app = App::new(cfg)?;

    app.run()
}
