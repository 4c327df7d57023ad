// One error type for the whole tool.
// Every variant states *where* things went wrong.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("image load error: {0}")]
    ImageLoad(String), // Opening/decoding the source image failed

    #[error("screen query error: {0}")]
    Screen(String), // Asking the OS for the monitor size failed

    #[error("window init error: {0}")]
    WindowInit(String), // Creating the window failed

    #[error("window update error: {0}")]
    WindowUpdate(String), // Updating the window buffer failed

    #[error("preset file error: {0}")]
    PresetFile(String), // Reading/parsing the presets JSON failed

    #[error("invalid preset '{name}': min {min:?} is above max {max:?}")]
    InvalidPreset {
        name: String,
        min: [u8; 3],
        max: [u8; 3],
    },

    #[error("size mismatch: {0}")]
    SizeMismatch(String), // Working and original buffers disagree on dimensions

    #[error("category '{0}' has no points to sample")]
    EmptyCategory(String), // Recompute asked for a range over zero points

    #[error("point ({x}, {y}) is outside the {width}x{height} image")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },
}
