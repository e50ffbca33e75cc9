//! Cross-thread trigger delivery.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

/// Sends triggers to a `ShapedEnvelope` from another thread.
///
/// Triggers are counted in an atomic and applied by the envelope at the
/// start of its next block, before any sample of that block is touched. The
/// render thread therefore never observes a half-applied trigger, and
/// neither side ever blocks.
///
/// # Examples
///
/// ```
/// use envshaper::{EnvelopeConfig, EnvelopeState, ShapedEnvelope};
///
/// let mut env = ShapedEnvelope::new(EnvelopeConfig::new(64, 0, 64));
/// let trigger = env.trigger_handle();
///
/// std::thread::spawn(move || trigger.note_on()).join().unwrap();
///
/// let mut block = [1000i16; 128];
/// env.process_block(&mut block);
/// assert_eq!(env.state(), EnvelopeState::Decay);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TriggerHandle {
    pending: Arc<AtomicU32>,
}

impl TriggerHandle {
    /// Creates a handle with no pending triggers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues one trigger.
    pub fn note_on(&self) {
        self.pending.fetch_add(1, Ordering::Release);
    }

    /// Number of triggers not yet picked up by the envelope.
    pub fn pending(&self) -> u32 {
        self.pending.load(Ordering::Acquire)
    }

    /// Takes all pending triggers, leaving none.
    pub(crate) fn take(&self) -> u32 {
        self.pending.swap(0, Ordering::Acquire)
    }
}
