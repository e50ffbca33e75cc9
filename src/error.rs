//! Errors raised while building shape tables.
//!
//! Rendering itself has no error channel; everything here happens at set-up
//! time, before an envelope runs.

/// Reasons a shape table could not be built.
#[derive(thiserror::Error, Debug)]
pub enum ShapeTableError {
    #[error("Shape table needs {expected} samples, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    #[error("Shape table is flat: minimum and maximum are equal")]
    Flat,

    #[error("Shape source has {0} samples, need at least 2")]
    TooFewSamples(usize),

    #[cfg(feature = "shape-loader")]
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),
}
