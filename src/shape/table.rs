//! Read-only envelope shape tables.

use super::PhaseAccumulator;
use crate::ShapeTableError;
use envshaper_macros::shape_table;

#[cfg(feature = "shape-loader")]
use std::path::Path;

/// Number of interpolation intervals in a shape table.
pub const TABLE_SIZE: usize = 256;

/// Stored entries per table: one per interval plus a trailing guard entry.
pub const SHAPE_TABLE_LEN: usize = TABLE_SIZE + 1;

/// Fast rise, slow settle. The default envelope shape.
pub static INVERTED_EXPONENTIAL: ShapeTable =
    ShapeTable::from_array(shape_table!("inverted_exponential(4)"));

/// Slow rise, fast finish.
pub static EXPONENTIAL: ShapeTable = ShapeTable::from_array(shape_table!("exponential(4)"));

/// Straight ramp.
pub static LINEAR: ShapeTable = ShapeTable::from_array(shape_table!("linear"));

/// Smoothstep ease in and out.
pub static S_CURVE: ShapeTable = ShapeTable::from_array(shape_table!("s_curve"));

/// A curve sampled at `SHAPE_TABLE_LEN` evenly spaced points.
///
/// Every envelope phase sweeps the same table once; the phase's
/// `LinearTransform` maps the table's smallest value to the phase's start
/// gain and its largest value to the end gain. Tables never change after
/// construction and are shared as `&'static ShapeTable`.
///
/// # Examples
///
/// ```
/// use envshaper::shape::{INVERTED_EXPONENTIAL, PhaseAccumulator};
///
/// let table = &INVERTED_EXPONENTIAL;
/// assert_eq!(table.min(), 0);
/// assert_eq!(table.max(), 32767);
///
/// // Start of the sweep reads the first entry exactly
/// let phase = PhaseAccumulator::for_duration(100);
/// assert_eq!(table.interpolate(&phase), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeTable {
    samples: [i16; SHAPE_TABLE_LEN],
    min: i16,
    max: i16,
}

impl ShapeTable {
    /// Creates a table from a full array, guard entry included.
    ///
    /// Usable in `static` items together with the `shape_table!` macro.
    ///
    /// # Panics
    ///
    /// Panics (at compile time in a `static`) if every entry is equal.
    pub const fn from_array(samples: [i16; SHAPE_TABLE_LEN]) -> Self {
        let mut min = samples[0];
        let mut max = samples[0];
        let mut i = 1;
        while i < SHAPE_TABLE_LEN {
            if samples[i] < min {
                min = samples[i];
            }
            if samples[i] > max {
                max = samples[i];
            }
            i += 1;
        }
        assert!(max > min, "shape table must not be flat");
        Self { samples, min, max }
    }

    /// Creates a table from a slice of exactly `SHAPE_TABLE_LEN` entries.
    ///
    /// # Errors
    ///
    /// Returns `ShapeTableError::WrongLength` for any other length and
    /// `ShapeTableError::Flat` if all entries are equal.
    ///
    /// # Examples
    ///
    /// ```
    /// use envshaper::shape::{SHAPE_TABLE_LEN, ShapeTable};
    ///
    /// let ramp: Vec<i16> = (0..SHAPE_TABLE_LEN as i16).map(|i| i * 100).collect();
    /// let table = ShapeTable::from_samples(&ramp).unwrap();
    /// assert_eq!(table.max(), 25600);
    ///
    /// assert!(ShapeTable::from_samples(&ramp[..10]).is_err());
    /// ```
    pub fn from_samples(samples: &[i16]) -> Result<Self, ShapeTableError> {
        let samples: [i16; SHAPE_TABLE_LEN] =
            samples
                .try_into()
                .map_err(|_| ShapeTableError::WrongLength {
                    expected: SHAPE_TABLE_LEN,
                    actual: samples.len(),
                })?;

        let min = samples.iter().copied().min().unwrap_or_default();
        let max = samples.iter().copied().max().unwrap_or_default();
        if min == max {
            return Err(ShapeTableError::Flat);
        }

        Ok(Self { samples, min, max })
    }

    /// Creates a table by sampling a function over [0, 1].
    ///
    /// The function's output is clamped to [-1, 1] and scaled to the full
    /// 16-bit range. The guard entry holds `f(1.0)`.
    ///
    /// # Errors
    ///
    /// Returns `ShapeTableError::Flat` if the sampled curve is constant.
    ///
    /// # Examples
    ///
    /// ```
    /// use envshaper::shape::ShapeTable;
    ///
    /// let squared = ShapeTable::from_fn(|t| t * t).unwrap();
    /// assert_eq!(squared.min(), 0);
    /// assert_eq!(squared.max(), 32767);
    /// ```
    pub fn from_fn<F>(f: F) -> Result<Self, ShapeTableError>
    where
        F: Fn(f64) -> f64,
    {
        let samples: Vec<i16> = (0..SHAPE_TABLE_LEN)
            .map(|i| {
                let t = i as f64 / TABLE_SIZE as f64;
                (f(t).clamp(-1.0, 1.0) * i16::MAX as f64).round() as i16
            })
            .collect();

        Self::from_samples(&samples)
    }

    /// Loads a table from the first channel of a WAV file (requires the
    /// `shape-loader` feature).
    ///
    /// The file's samples are treated as one curve and linearly resampled
    /// onto `SHAPE_TABLE_LEN` points, so files of any length work.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, holds fewer than two
    /// samples, or resamples to a flat curve.
    #[cfg(feature = "shape-loader")]
    pub fn from_wav_file<P: AsRef<Path>>(path: P) -> Result<Self, ShapeTableError> {
        let mut reader = hound::WavReader::open(path)?;
        let spec = reader.spec();

        let samples: Vec<f64> = match spec.sample_format {
            hound::SampleFormat::Float => reader
                .samples::<f32>()
                .map(|s| s.map(|v| v as f64))
                .collect::<Result<_, _>>()?,
            hound::SampleFormat::Int => {
                let max_value = (1i64 << (spec.bits_per_sample - 1)) as f64;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f64 / max_value))
                    .collect::<Result<_, _>>()?
            }
        };

        let channel: Vec<f64> = samples
            .iter()
            .step_by(spec.channels.max(1) as usize)
            .copied()
            .collect();

        if channel.len() < 2 {
            return Err(ShapeTableError::TooFewSamples(channel.len()));
        }

        let last = (channel.len() - 1) as f64;
        Self::from_fn(|t| {
            let position = t * last;
            let index = (position.floor() as usize).min(channel.len() - 2);
            let frac = position - index as f64;
            channel[index] + frac * (channel[index + 1] - channel[index])
        })
    }

    /// Leaks the table so it can be shared for the rest of the process.
    ///
    /// Envelopes borrow their table for `'static`; runtime-built tables are
    /// created once at start-up and handed out through this.
    pub fn leak(self) -> &'static ShapeTable {
        Box::leak(Box::new(self))
    }

    /// Smallest value in the table.
    pub fn min(&self) -> i16 {
        self.min
    }

    /// Largest value in the table.
    pub fn max(&self) -> i16 {
        self.max
    }

    /// All entries, guard included.
    pub fn samples(&self) -> &[i16; SHAPE_TABLE_LEN] {
        &self.samples
    }

    /// Reads the curve at the accumulator's position.
    ///
    /// The top 8 bits of the phase pick a table interval and the next 16 bits
    /// blend its two endpoints. The result always lies between `min()` and
    /// `max()`.
    #[inline]
    pub fn interpolate(&self, phase: &PhaseAccumulator) -> i32 {
        let index = phase.index();
        let weight = phase.fraction() as i64;

        let v0 = self.samples[index] as i64;
        let v1 = self.samples[index + 1] as i64;

        ((v0 * (0x10000 - weight) + v1 * weight) >> 16) as i32
    }
}

impl Default for ShapeTable {
    fn default() -> Self {
        INVERTED_EXPONENTIAL.clone()
    }
}
