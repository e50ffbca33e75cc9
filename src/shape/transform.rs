//! Linear rescaling of a shape table onto a gain range.

use super::ShapeTable;

/// Fractional bits of the multiplier.
const FRAC_BITS: u32 = 30;

/// Added before the final shift so endpoints round instead of truncating.
const ROUNDING: i64 = 1 << (FRAC_BITS - 1);

/// Maps interpolated table values onto a phase's gain range.
///
/// Built so that the table's smallest value becomes exactly `start` and its
/// largest exactly `end`. The curve keeps its shape: an attack runs it from
/// silence up to full scale, a decay runs the same curve from full scale
/// down to silence, and a hold with `start == end` is flat.
///
/// # Examples
///
/// ```
/// use envshaper::shape::{FULL_SCALE, INVERTED_EXPONENTIAL, LinearTransform, SILENCE};
///
/// let table = &INVERTED_EXPONENTIAL;
/// let decay = LinearTransform::between(FULL_SCALE, SILENCE, table);
///
/// assert_eq!(decay.apply(table.min() as i32), FULL_SCALE);
/// assert_eq!(decay.apply(table.max() as i32), SILENCE);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinearTransform {
    multiplier: i64,
    offset: i64,
}

impl LinearTransform {
    /// Computes coefficients taking the table's range onto `start..=end`.
    ///
    /// `start` and `end` are Q16 gains, normally between `SILENCE` and
    /// `FULL_SCALE`.
    pub fn between(start: i32, end: i32, table: &ShapeTable) -> Self {
        let min = table.min() as i64;
        let span = table.max() as i64 - min;

        let multiplier = (((end - start) as i64) << FRAC_BITS) / span;
        let offset = ((start as i64) << FRAC_BITS) - multiplier * min + ROUNDING;

        Self { multiplier, offset }
    }

    /// Multiplier with `FRAC_BITS` fractional bits.
    pub fn multiplier(&self) -> i64 {
        self.multiplier
    }

    /// Offset with `FRAC_BITS` fractional bits, rounding included.
    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// Returns the Q16 gain for an interpolated table value.
    #[inline]
    pub fn apply(&self, interpolated: i32) -> i32 {
        ((self.multiplier * interpolated as i64 + self.offset) >> FRAC_BITS) as i32
    }
}
