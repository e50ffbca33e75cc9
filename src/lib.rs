//! Envshaper - a real-time shaped amplitude envelope for 16-bit sample streams
//!
//! This library multiplies a stream of fixed-size sample blocks by a gain that
//! follows a table-defined curve through attack, hold and decay, with
//! click-free re-triggering and bounded automatic repeats.

pub mod block;
pub mod envelope;
mod error;
pub mod shape;
pub mod source;

// Re-export commonly used types at the crate root
pub use block::{AudioBlock, BLOCK_SAMPLES, BlockPool, BlockQueue, BlockStream};
pub use envelope::{EnvelopeConfig, EnvelopeState, ShapedEnvelope, TriggerHandle};
pub use envshaper_macros::shape_table;
pub use error::ShapeTableError;
pub use shape::{FULL_SCALE, LinearTransform, PhaseAccumulator, SILENCE, ShapeTable};
pub use source::{ConstantSource, SampleSource, SineSource, WhiteNoise};
