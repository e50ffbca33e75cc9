//! Shaped amplitude envelope with attack, hold, decay and click-free re-triggering.
//!
//! This module provides:
//! - `ShapedEnvelope` - the envelope state machine and gain engine
//! - `EnvelopeState` - its phases and transition table
//! - `EnvelopeConfig` - phase lengths in samples
//! - `TriggerHandle` - lock-free triggering from a control thread

mod config;
mod shaper;
mod state;
mod trigger;

pub use config::EnvelopeConfig;
pub use shaper::ShapedEnvelope;
pub use state::EnvelopeState;
pub use trigger::TriggerHandle;
