//! The shaped envelope: state machine plus gain engine.

use super::{EnvelopeConfig, EnvelopeState, TriggerHandle};
use crate::block::BlockStream;
use crate::shape::{
    INVERTED_EXPONENTIAL, LinearTransform, PhaseAccumulator, SILENCE, ShapeTable, apply_gain,
};
use tracing::{debug, trace};

/// Triggers applied per block. Two triggers in a row reach a state a third
/// cannot change, so anything beyond that is redundant.
const MAX_TRIGGERS_PER_BLOCK: u32 = 2;

/// Amplitude envelope that shapes a stream of 16-bit sample blocks.
///
/// Each trigger runs the envelope through **Attack** (silence to full
/// scale), an optional **Hold** at full scale and **Decay** back to
/// silence. Every phase traces the same `ShapeTable`, rescaled to the
/// phase's start and end gain. After a decay the envelope restarts itself
/// up to `max_retriggers` times, then goes idle.
///
/// Triggering a running envelope with forced decay configured first ramps
/// the current gain down to silence over `forced_decay_samples` and only
/// then restarts the attack, so a re-trigger never clicks. Without forced
/// decay the attack restarts immediately.
///
/// # Examples
///
/// ```
/// use envshaper::{EnvelopeConfig, EnvelopeState, ShapedEnvelope};
///
/// let config = EnvelopeConfig::new(32, 16, 64).with_forced_decay(8);
/// let mut env = ShapedEnvelope::new(config);
///
/// env.note_on();
/// assert_eq!(env.state(), EnvelopeState::Attack);
///
/// let mut block = [i16::MAX; 128];
/// env.process_block(&mut block);
///
/// // Starts silent, peaks during hold, silent again once decayed
/// assert_eq!(block[0], 0);
/// assert_eq!(block[40], i16::MAX);
/// assert_eq!(block[127], 0);
/// assert_eq!(env.state(), EnvelopeState::Idle);
/// ```
#[derive(Debug)]
pub struct ShapedEnvelope {
    config: EnvelopeConfig,
    table: &'static ShapeTable,
    state: EnvelopeState,
    remaining: u32,
    phase: PhaseAccumulator,
    transform: LinearTransform,
    retriggers: u32,
    gain: i32,
    triggers: TriggerHandle,
}

impl ShapedEnvelope {
    /// Creates an idle envelope using the inverted exponential shape.
    pub fn new(config: EnvelopeConfig) -> Self {
        Self {
            config,
            table: &INVERTED_EXPONENTIAL,
            state: EnvelopeState::Idle,
            remaining: 0,
            phase: PhaseAccumulator::default(),
            transform: LinearTransform::default(),
            retriggers: 0,
            gain: SILENCE,
            triggers: TriggerHandle::new(),
        }
    }

    /// Uses a different shape table for all phases.
    ///
    /// # Examples
    ///
    /// ```
    /// use envshaper::{EnvelopeConfig, ShapedEnvelope, shape::LINEAR};
    ///
    /// let env = ShapedEnvelope::new(EnvelopeConfig::new(100, 0, 100)).with_table(&LINEAR);
    /// assert_eq!(env.table(), &LINEAR);
    /// ```
    pub fn with_table(mut self, table: &'static ShapeTable) -> Self {
        self.table = table;
        self
    }

    /// Returns a handle that triggers this envelope from another thread.
    pub fn trigger_handle(&self) -> TriggerHandle {
        self.triggers.clone()
    }

    /// Replaces the configuration. The running phase keeps its length; new
    /// values apply from the next phase entry.
    pub fn set_config(&mut self, config: EnvelopeConfig) {
        self.config = config;
    }

    /// Current configuration.
    pub fn config(&self) -> &EnvelopeConfig {
        &self.config
    }

    /// Shape table traced by every phase.
    pub fn table(&self) -> &'static ShapeTable {
        self.table
    }

    /// Current phase.
    pub fn state(&self) -> EnvelopeState {
        self.state
    }

    /// Returns true unless the envelope is idle.
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// Samples left in the current phase.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Automatic re-triggers still available in this run.
    pub fn retriggers_remaining(&self) -> u32 {
        self.retriggers
    }

    /// Q16 gain applied to the most recent sample.
    pub fn gain(&self) -> i32 {
        self.gain
    }

    /// Triggers the envelope.
    ///
    /// - Idle, or forced decay disabled: restart the attack from silence and
    ///   reset the re-trigger count.
    /// - Attack, hold or decay: ramp from the current gain to silence over
    ///   `forced_decay_samples`, then restart the attack.
    /// - Already ramping down: ignored.
    pub fn note_on(&mut self) {
        trace!(state = ?self.state, "note on");

        if self.state == EnvelopeState::Idle || !self.config.has_forced_decay() {
            self.retriggers = self.config.max_retriggers;
            self.enter(EnvelopeState::Attack);
        } else if self.state != EnvelopeState::Forced {
            self.enter(EnvelopeState::Forced);
        }
    }

    /// Stops immediately and discards pending triggers.
    pub fn reset(&mut self) {
        self.triggers.take();
        self.state = EnvelopeState::Idle;
        self.remaining = 0;
        self.phase = PhaseAccumulator::default();
        self.transform = LinearTransform::default();
        self.retriggers = 0;
        self.gain = SILENCE;
    }

    /// Advances one sample and returns its Q16 gain.
    ///
    /// Crosses into the next phase first if the current one has run out, so
    /// the returned gain always belongs to the phase that owns this sample.
    /// Returns `SILENCE` while idle.
    pub fn next_gain(&mut self) -> i32 {
        if self.state == EnvelopeState::Idle {
            return SILENCE;
        }

        if self.remaining == 0 {
            let next = self.state.successor(&self.config, &mut self.retriggers);
            self.enter(next);
            if self.state == EnvelopeState::Idle {
                return SILENCE;
            }
        }

        let interpolated = self.table.interpolate(&self.phase);
        let gain = self.transform.apply(interpolated);

        self.phase.advance();
        self.remaining -= 1;
        self.gain = gain;
        gain
    }

    /// Applies the envelope to a block of samples in place.
    ///
    /// Pending triggers are applied first. An envelope that is idle at that
    /// point leaves the block untouched and returns `false`. Otherwise every
    /// sample is scaled by its gain; if the envelope finishes partway
    /// through, the rest of the block is zeroed. Returns `true` when the
    /// block was rendered.
    pub fn process_block(&mut self, samples: &mut [i16]) -> bool {
        self.apply_pending_triggers();

        if self.state == EnvelopeState::Idle {
            return false;
        }

        let mut samples = samples.iter_mut();
        for sample in samples.by_ref() {
            let gain = self.next_gain();
            if self.state == EnvelopeState::Idle {
                *sample = 0;
                break;
            }
            *sample = apply_gain(gain, *sample);
        }
        for sample in samples {
            *sample = 0;
        }

        true
    }

    /// Renders one block from `stream`.
    ///
    /// Skips the tick when the stream has no block to offer. An idle
    /// envelope releases the block without transmitting it; otherwise the
    /// shaped block is transmitted downstream and then released.
    pub fn update<S: BlockStream>(&mut self, stream: &mut S) {
        self.apply_pending_triggers();

        let Some(mut block) = stream.receive_writable() else {
            return;
        };

        if self.process_block(block.samples_mut()) {
            stream.transmit(&block);
        }
        stream.release(block);
    }

    fn apply_pending_triggers(&mut self) {
        let pending = self.triggers.take().min(MAX_TRIGGERS_PER_BLOCK);
        for _ in 0..pending {
            self.note_on();
        }
    }

    /// Enters `state`, passing straight through any zero-length phases.
    fn enter(&mut self, mut state: EnvelopeState) {
        let mut duration = state.duration(&self.config);
        while state.is_active() && duration == 0 {
            debug!(?state, "skipping zero-length phase");
            state = state.successor(&self.config, &mut self.retriggers);
            duration = state.duration(&self.config);
        }

        let (start, end) = match state {
            EnvelopeState::Forced => (self.gain, SILENCE),
            other => other.levels(),
        };

        trace!(from = ?self.state, to = ?state, duration, "phase change");
        if state == EnvelopeState::Idle {
            debug!("envelope finished");
            self.gain = SILENCE;
        }

        self.state = state;
        self.remaining = duration;
        self.phase = PhaseAccumulator::for_duration(duration);
        self.transform = LinearTransform::between(start, end, self.table);
    }
}
