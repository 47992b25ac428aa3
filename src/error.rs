// One error type for the whole app.
// Every variant states *where* things went wrong; none of them is fatal once
// the window is up (load failures just leave the previous image in place).
use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    // Creating the window failed
    #[error("Window init error: {0}")]
    WindowInit(String),

    // Updating the window buffer failed
    #[error("Window update error: {0}")]
    WindowUpdate(String),

    // The picked file could not be opened or decoded as an image
    #[error("Could not load {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    // Decoded fine, but there is nothing to mutate
    #[error("Image {} has no pixels ({width}x{height})", .path.display())]
    EmptyImage {
        path: PathBuf,
        width: u32,
        height: u32,
    },

    // A setting is out of range
    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
