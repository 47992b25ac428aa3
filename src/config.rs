// Tunables. Defaults reproduce the classic look; env vars let you play with
// batch sizes without rebuilding:
//   PIXEL_FILTER_STEP_BATCH=10000 PIXEL_FILTER_INTERVAL_MS=30 cargo run

use std::time::Duration;

use log::warn;

use crate::churn::{AUTO_BATCH, AUTO_INTERVAL_MS, STEP_BATCH};
use crate::error::{Error, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub step_batch: usize,     // pixels per STEP click (left pane)
    pub auto_batch: usize,     // pixels per timer tick (right pane)
    pub tick_interval: Duration,
    pub window_width: usize,
    pub window_height: usize,
    pub min_width: usize,      // layout never shrinks below this
    pub min_height: usize,
    pub target_fps: usize,     // main loop rate; keep it well above 1000 / tick ms
}

impl Default for Config {
    fn default() -> Self {
        Self {
            step_batch: STEP_BATCH,
            auto_batch: AUTO_BATCH,
            tick_interval: Duration::from_millis(AUTO_INTERVAL_MS),
            window_width: 1100,
            window_height: 720,
            min_width: 900,
            min_height: 600,
            target_fps: 250,
        }
    }
}

impl Config {
    pub const ENV_STEP_BATCH: &'static str = "PIXEL_FILTER_STEP_BATCH";
    pub const ENV_AUTO_BATCH: &'static str = "PIXEL_FILTER_AUTO_BATCH";
    pub const ENV_INTERVAL_MS: &'static str = "PIXEL_FILTER_INTERVAL_MS";

    /// Defaults, overridden by whatever env vars are set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` but with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(v) = parse_var(&lookup, Self::ENV_STEP_BATCH)? {
            cfg.step_batch = v as usize;
        }
        if let Some(v) = parse_var(&lookup, Self::ENV_AUTO_BATCH)? {
            cfg.auto_batch = v as usize;
        }
        if let Some(v) = parse_var(&lookup, Self::ENV_INTERVAL_MS)? {
            cfg.tick_interval = Duration::from_millis(v);
        }
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.step_batch == 0 {
            return Err(Error::Config("step batch must be at least 1".into()));
        }
        if self.auto_batch == 0 {
            return Err(Error::Config("auto batch must be at least 1".into()));
        }
        if self.tick_interval.is_zero() {
            return Err(Error::Config("tick interval must be at least 1 ms".into()));
        }
        if self.target_fps == 0 {
            return Err(Error::Config("target fps must be at least 1".into()));
        }
        if self.min_width == 0 || self.min_height == 0 {
            return Err(Error::Config("minimum window size must be non-zero".into()));
        }
        if self.window_width < self.min_width || self.window_height < self.min_height {
            warn!(
                "window {}x{} is below the {}x{} minimum; layout will be clamped",
                self.window_width, self.window_height, self.min_width, self.min_height
            );
        }
        Ok(())
    }
}

fn parse_var<F>(lookup: &F, key: &str) -> Result<Option<u64>>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|e| Error::Config(format!("{key}={raw:?}: {e}"))),
    }
}
