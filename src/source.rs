//! Sample sources for feeding blocks into an envelope.
//!
//! These stand in for whatever produces audio upstream of the envelope:
//! a constant level for measuring gain, a sine for listening, and white
//! noise for stress tests.

use crate::shape::PhaseAccumulator;
use rand::Rng;
use std::f64::consts::PI;

/// Anything that produces signed 16-bit samples one at a time.
pub trait SampleSource {
    /// Produces the next sample.
    fn next_sample(&mut self) -> i16;

    /// Fills a buffer with samples.
    ///
    /// Default implementation calls `next_sample()` for each element.
    fn fill(&mut self, buffer: &mut [i16]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample();
        }
    }
}

/// A source that always returns the same sample.
///
/// # Examples
///
/// ```
/// use envshaper::{ConstantSource, SampleSource};
///
/// let mut dc = ConstantSource::new(i16::MAX);
/// assert_eq!(dc.next_sample(), i16::MAX);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstantSource {
    value: i16,
}

impl ConstantSource {
    pub fn new(value: i16) -> Self {
        Self { value }
    }
}

impl SampleSource for ConstantSource {
    fn next_sample(&mut self) -> i16 {
        self.value
    }

    fn fill(&mut self, buffer: &mut [i16]) {
        buffer.fill(self.value);
    }
}

/// A sine wave driven by a 32-bit phase accumulator.
#[derive(Debug, Clone, Copy)]
pub struct SineSource {
    phase: PhaseAccumulator,
    amplitude: f64,
}

impl SineSource {
    /// Creates a sine source.
    ///
    /// # Arguments
    ///
    /// * `frequency` - Frequency in Hz
    /// * `amplitude` - Peak level, 0.0 to 1.0 of full scale (clamped)
    /// * `sample_rate` - Sample rate in Hz
    ///
    /// # Examples
    ///
    /// ```
    /// use envshaper::{SampleSource, SineSource};
    ///
    /// let mut sine = SineSource::new(440.0, 0.5, 44100.0);
    /// assert_eq!(sine.next_sample(), 0);
    /// ```
    pub fn new(frequency: f64, amplitude: f64, sample_rate: f64) -> Self {
        let cycle = (frequency / sample_rate).rem_euclid(1.0);
        let increment = (cycle * 4_294_967_296.0) as u32;
        Self {
            phase: PhaseAccumulator::from_raw(0, increment),
            amplitude: amplitude.clamp(0.0, 1.0),
        }
    }
}

impl SampleSource for SineSource {
    fn next_sample(&mut self) -> i16 {
        let angle = self.phase.phase() as f64 / 4_294_967_296.0 * 2.0 * PI;
        self.phase.advance();
        (angle.sin() * self.amplitude * i16::MAX as f64).round() as i16
    }
}

/// Uniform white noise.
pub struct WhiteNoise<R: Rng = rand::rngs::ThreadRng> {
    rng: R,
    peak: i16,
}

impl WhiteNoise<rand::rngs::ThreadRng> {
    /// Creates full-scale white noise using the thread-local RNG.
    pub fn new() -> Self {
        Self::with_rng(rand::thread_rng())
    }
}

impl Default for WhiteNoise<rand::rngs::ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> WhiteNoise<R> {
    /// Creates full-scale white noise using a custom RNG.
    ///
    /// # Examples
    ///
    /// ```
    /// use envshaper::{SampleSource, WhiteNoise};
    /// use rand::SeedableRng;
    ///
    /// let rng = rand::rngs::StdRng::seed_from_u64(42);
    /// let mut noise = WhiteNoise::with_rng(rng).with_peak(1000);
    /// let sample = noise.next_sample();
    /// assert!((-1000..=1000).contains(&sample));
    /// ```
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            peak: i16::MAX,
        }
    }

    /// Limits samples to `-peak..=peak`.
    pub fn with_peak(mut self, peak: i16) -> Self {
        self.peak = peak.max(0);
        self
    }
}

impl<R: Rng> SampleSource for WhiteNoise<R> {
    fn next_sample(&mut self) -> i16 {
        self.rng.gen_range(-self.peak..=self.peak)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_constant_fill() {
        let mut source = ConstantSource::new(-42);
        let mut buffer = [0i16; 16];
        source.fill(&mut buffer);
        assert!(buffer.iter().all(|&s| s == -42));
    }

    #[test]
    fn test_sine_peaks() {
        // 1/4 of the sample rate: 0, +peak, 0, -peak
        let mut sine = SineSource::new(11025.0, 1.0, 44100.0);
        let samples: Vec<i16> = (0..4).map(|_| sine.next_sample()).collect();
        assert_eq!(samples[0], 0);
        assert_eq!(samples[1], i16::MAX);
        assert!(samples[2].abs() <= 1);
        assert_eq!(samples[3], -i16::MAX);
    }

    #[test]
    fn test_noise_range() {
        let rng = rand::rngs::StdRng::seed_from_u64(7);
        let mut noise = WhiteNoise::with_rng(rng).with_peak(500);
        for _ in 0..10_000 {
            let sample = noise.next_sample();
            assert!((-500..=500).contains(&sample));
        }
    }

    #[test]
    fn test_noise_varies() {
        let mut noise = WhiteNoise::new();
        let samples: Vec<i16> = (0..100).map(|_| noise.next_sample()).collect();
        let first = samples[0];
        assert!(!samples.iter().all(|&s| s == first));
    }
}
