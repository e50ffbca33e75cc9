//! Wrapping 32-bit phase accumulator.

/// Position within the current envelope phase.
///
/// The accumulator wraps naturally at 2^32. Setting the increment to
/// `2^32 / duration` makes one phase sweep the whole table domain exactly
/// once in `duration` samples.
///
/// # Examples
///
/// ```
/// use envshaper::shape::PhaseAccumulator;
///
/// let mut phase = PhaseAccumulator::for_duration(4);
/// assert_eq!(phase.increment(), 1 << 30);
///
/// phase.advance();
/// phase.advance();
/// assert_eq!(phase.index(), 128);
/// assert_eq!(phase.fraction(), 0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhaseAccumulator {
    phase: u32,
    increment: u32,
}

impl PhaseAccumulator {
    /// Starts a sweep lasting `samples` samples.
    ///
    /// A zero duration yields a stalled accumulator; envelopes skip
    /// zero-length phases before they are rendered. A one-sample sweep
    /// saturates the increment at `u32::MAX`.
    pub fn for_duration(samples: u32) -> Self {
        let increment = match samples {
            0 => 0,
            n => u32::try_from((1u64 << 32) / n as u64).unwrap_or(u32::MAX),
        };

        Self {
            phase: 0,
            increment,
        }
    }

    /// Creates an accumulator at an arbitrary position.
    pub fn from_raw(phase: u32, increment: u32) -> Self {
        Self { phase, increment }
    }

    /// Raw accumulator value.
    pub fn phase(&self) -> u32 {
        self.phase
    }

    /// Amount added per sample.
    pub fn increment(&self) -> u32 {
        self.increment
    }

    /// Table interval selected by the top 8 bits, in 0..256.
    #[inline]
    pub fn index(&self) -> usize {
        (self.phase >> 24) as usize
    }

    /// Blend weight toward the next table entry from bits 8..24, in 0..65536.
    #[inline]
    pub fn fraction(&self) -> u32 {
        (self.phase >> 8) & 0xFFFF
    }

    /// Moves forward by one sample.
    #[inline]
    pub fn advance(&mut self) {
        self.phase = self.phase.wrapping_add(self.increment);
    }
}
