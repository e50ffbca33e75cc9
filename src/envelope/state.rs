//! Envelope phases and the transition table between them.

use super::EnvelopeConfig;
use crate::shape::{FULL_SCALE, SILENCE};

/// Phase of a shaped envelope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EnvelopeState {
    /// Not running; output is silent and blocks pass through untouched
    #[default]
    Idle,
    /// Rising from silence to full scale
    Attack,
    /// Holding at full scale
    Hold,
    /// Falling from full scale to silence
    Decay,
    /// Short ramp to silence before a re-trigger restarts the attack
    Forced,
}

impl EnvelopeState {
    /// Configured length of this phase in samples. Zero for `Idle`.
    pub fn duration(self, config: &EnvelopeConfig) -> u32 {
        match self {
            EnvelopeState::Idle => 0,
            EnvelopeState::Attack => config.attack_samples,
            EnvelopeState::Hold => config.hold_samples,
            EnvelopeState::Decay => config.decay_samples,
            EnvelopeState::Forced => config.forced_decay_samples,
        }
    }

    /// Gain range `(start, end)` the phase traces.
    ///
    /// `Forced` really starts at whatever gain was playing when it was
    /// entered; full scale is its nominal start.
    pub fn levels(self) -> (i32, i32) {
        match self {
            EnvelopeState::Idle => (SILENCE, SILENCE),
            EnvelopeState::Attack => (SILENCE, FULL_SCALE),
            EnvelopeState::Hold => (FULL_SCALE, FULL_SCALE),
            EnvelopeState::Decay | EnvelopeState::Forced => (FULL_SCALE, SILENCE),
        }
    }

    /// Phase that follows once this one has run out of samples.
    ///
    /// A completed `Decay` spends one of `retriggers` to start another
    /// attack, or goes `Idle` when none are left. It also goes `Idle` when
    /// a whole attack/hold/decay cycle would take zero samples, since such
    /// a cycle could never produce output.
    pub fn successor(self, config: &EnvelopeConfig, retriggers: &mut u32) -> EnvelopeState {
        match self {
            EnvelopeState::Idle => EnvelopeState::Idle,
            EnvelopeState::Attack if config.hold_samples > 0 => EnvelopeState::Hold,
            EnvelopeState::Attack | EnvelopeState::Hold => EnvelopeState::Decay,
            EnvelopeState::Decay if *retriggers > 0 && config.cycle_samples() > 0 => {
                *retriggers -= 1;
                EnvelopeState::Attack
            }
            EnvelopeState::Decay => EnvelopeState::Idle,
            EnvelopeState::Forced => EnvelopeState::Attack,
        }
    }

    /// Returns true for every phase except `Idle`.
    pub fn is_active(self) -> bool {
        self != EnvelopeState::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(hold: u32) -> EnvelopeConfig {
        EnvelopeConfig::new(10, hold, 10).with_forced_decay(5)
    }

    #[test]
    fn test_attack_goes_to_hold_when_configured() {
        let mut retriggers = 0;
        assert_eq!(
            EnvelopeState::Attack.successor(&config(4), &mut retriggers),
            EnvelopeState::Hold
        );
        assert_eq!(
            EnvelopeState::Attack.successor(&config(0), &mut retriggers),
            EnvelopeState::Decay
        );
    }

    #[test]
    fn test_hold_and_forced() {
        let mut retriggers = 0;
        assert_eq!(
            EnvelopeState::Hold.successor(&config(4), &mut retriggers),
            EnvelopeState::Decay
        );
        assert_eq!(
            EnvelopeState::Forced.successor(&config(4), &mut retriggers),
            EnvelopeState::Attack
        );
        assert_eq!(
            EnvelopeState::Idle.successor(&config(4), &mut retriggers),
            EnvelopeState::Idle
        );
    }

    #[test]
    fn test_decay_spends_retriggers() {
        let config = config(0);
        let mut retriggers = 2;

        assert_eq!(
            EnvelopeState::Decay.successor(&config, &mut retriggers),
            EnvelopeState::Attack
        );
        assert_eq!(retriggers, 1);
        assert_eq!(
            EnvelopeState::Decay.successor(&config, &mut retriggers),
            EnvelopeState::Attack
        );
        assert_eq!(retriggers, 0);
        assert_eq!(
            EnvelopeState::Decay.successor(&config, &mut retriggers),
            EnvelopeState::Idle
        );
        assert_eq!(retriggers, 0);
    }

    #[test]
    fn test_zero_length_cycle_does_not_repeat() {
        let config = EnvelopeConfig::new(0, 0, 0).with_max_retriggers(5);
        let mut retriggers = 5;
        assert_eq!(
            EnvelopeState::Decay.successor(&config, &mut retriggers),
            EnvelopeState::Idle
        );
        assert_eq!(retriggers, 5);
    }

    #[test]
    fn test_levels() {
        assert_eq!(EnvelopeState::Attack.levels(), (SILENCE, FULL_SCALE));
        assert_eq!(EnvelopeState::Hold.levels(), (FULL_SCALE, FULL_SCALE));
        assert_eq!(EnvelopeState::Decay.levels(), (FULL_SCALE, SILENCE));
        assert!(!EnvelopeState::Idle.is_active());
        assert!(EnvelopeState::Forced.is_active());
    }
}
