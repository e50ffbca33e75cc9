//! Envelope timing configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Phase lengths and re-trigger limit for a `ShapedEnvelope`.
///
/// Durations are in samples. The envelope does not validate them: a zero
/// length simply skips that phase, and a zero `forced_decay_samples`
/// disables the click-free re-trigger ramp.
///
/// # Examples
///
/// ```
/// use envshaper::EnvelopeConfig;
///
/// let config = EnvelopeConfig::new(441, 0, 4410)
///     .with_forced_decay(64)
///     .with_max_retriggers(2);
///
/// assert_eq!(config.cycle_samples(), 4851);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnvelopeConfig {
    /// Samples spent rising from silence to full scale
    pub attack_samples: u32,
    /// Samples spent at full scale before decaying
    pub hold_samples: u32,
    /// Samples spent falling back to silence
    pub decay_samples: u32,
    /// Length of the ramp to silence on a mid-envelope re-trigger; 0 disables it
    pub forced_decay_samples: u32,
    /// Automatic attack/decay repeats after the initial trigger
    pub max_retriggers: u32,
}

impl EnvelopeConfig {
    /// Creates a configuration with no forced decay and no repeats.
    ///
    /// # Arguments
    ///
    /// * `attack_samples` - Attack length in samples
    /// * `hold_samples` - Hold length in samples (0 goes straight to decay)
    /// * `decay_samples` - Decay length in samples
    pub fn new(attack_samples: u32, hold_samples: u32, decay_samples: u32) -> Self {
        Self {
            attack_samples,
            hold_samples,
            decay_samples,
            forced_decay_samples: 0,
            max_retriggers: 0,
        }
    }

    /// Converts phase lengths in seconds to samples.
    ///
    /// Negative or non-finite times are treated as zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use envshaper::EnvelopeConfig;
    ///
    /// // 10ms attack, 50ms hold, 300ms decay at 44.1kHz
    /// let config = EnvelopeConfig::from_seconds(0.01, 0.05, 0.3, 44100.0);
    /// assert_eq!(config.attack_samples, 441);
    /// assert_eq!(config.hold_samples, 2205);
    /// assert_eq!(config.decay_samples, 13230);
    /// ```
    pub fn from_seconds(attack: f64, hold: f64, decay: f64, sample_rate: f64) -> Self {
        Self::new(
            seconds_to_samples(attack, sample_rate),
            seconds_to_samples(hold, sample_rate),
            seconds_to_samples(decay, sample_rate),
        )
    }

    /// Sets the hold length in samples.
    pub fn with_hold(mut self, samples: u32) -> Self {
        self.hold_samples = samples;
        self
    }

    /// Sets the forced decay length in samples.
    pub fn with_forced_decay(mut self, samples: u32) -> Self {
        self.forced_decay_samples = samples;
        self
    }

    /// Sets the forced decay length from seconds.
    pub fn with_forced_decay_seconds(mut self, seconds: f64, sample_rate: f64) -> Self {
        self.forced_decay_samples = seconds_to_samples(seconds, sample_rate);
        self
    }

    /// Sets how many times the envelope restarts itself after decaying.
    pub fn with_max_retriggers(mut self, count: u32) -> Self {
        self.max_retriggers = count;
        self
    }

    /// Length of one attack/hold/decay cycle in samples.
    pub fn cycle_samples(&self) -> u64 {
        self.attack_samples as u64 + self.hold_samples as u64 + self.decay_samples as u64
    }

    /// Returns true if a mid-envelope trigger ramps down before restarting.
    pub fn has_forced_decay(&self) -> bool {
        self.forced_decay_samples > 0
    }
}

fn seconds_to_samples(seconds: f64, sample_rate: f64) -> u32 {
    let samples = (seconds * sample_rate).round();
    if samples.is_finite() && samples > 0.0 {
        samples.min(u32::MAX as f64) as u32
    } else {
        0
    }
}
