// Turns a file on disk into a buffer suitable for the window.
// Visual expectation: after a successful load the picked picture fills its
// pane; after a failed one nothing on screen changes.

use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::{Error, Result};
use crate::types::FrameBuffer;

/// Extensions offered in the open dialog's "Images" filter.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif"];

/// Decode `path` and convert it to 0x00RRGGBB pixels.
/// Alpha is dropped; palette/16-bit/grey formats are widened to RGB8 first.
pub fn load_raster(path: &Path) -> Result<FrameBuffer> {
    // 1) Decode whatever format it is (format is sniffed from content + extension).
    let decoded = image::open(path).map_err(|source| Error::Load {
        path: path.to_path_buf(),
        source,
    })?;

    // 2) A 0x0 image would leave the pane "loaded" with nothing to mutate.
    ensure_pixels(path, decoded.width(), decoded.height())?;

    // 3) Pack it for the screen.
    let rgb = decoded.to_rgb8();
    let fb = FrameBuffer::from_raster(&rgb);
    debug!("decoded {} as {}x{}", path.display(), fb.width, fb.height);
    Ok(fb)
}

// The bundled png/jpeg/bmp/gif decoders already refuse zero dimensions;
// this covers any decoder that lets one through.
fn ensure_pixels(path: &Path, width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::EmptyImage { path: path.to_path_buf(), width, height });
    }
    Ok(())
}

/// Show the native open-file dialog. None when the user cancels.
pub fn pick_image(title: &str) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title(title)
        .add_filter("Images", IMAGE_EXTENSIONS)
        .add_filter("All files", &["*"])
        .pick_file()
}

/// Dialog + decode in one go. None when the dialog was cancelled.
/// Decode failures are logged here and handed back for the status line.
pub fn pick_and_load(title: &str) -> Option<Result<FrameBuffer>> {
    let path = pick_image(title)?;
    let res = load_raster(&path);
    if let Err(e) = &res {
        warn!("{e}");
    }
    Some(res)
}
