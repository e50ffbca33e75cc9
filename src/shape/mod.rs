//! Shape tables and the fixed-point engine that reads them.
//!
//! This module provides the pieces that turn a phase position into a gain:
//! - `ShapeTable` - a read-only curve with one guard entry
//! - `PhaseAccumulator` - a wrapping 32-bit position sweeping the table once per phase
//! - `LinearTransform` - rescales the curve onto a phase's start and end gain
//!
//! Gains are Q16 fixed point: `SILENCE` is `0` and `FULL_SCALE` is `1 << 16`.

mod phase;
mod table;
mod transform;

pub use phase::PhaseAccumulator;
pub use table::{
    EXPONENTIAL, INVERTED_EXPONENTIAL, LINEAR, S_CURVE, SHAPE_TABLE_LEN, ShapeTable, TABLE_SIZE,
};
pub use transform::LinearTransform;

/// Q16 gain that mutes a sample.
pub const SILENCE: i32 = 0;

/// Q16 gain that passes a sample through unchanged.
pub const FULL_SCALE: i32 = 1 << 16;

/// Applies a Q16 gain to a signed 16-bit sample.
///
/// # Examples
///
/// ```
/// use envshaper::shape::{FULL_SCALE, apply_gain};
///
/// assert_eq!(apply_gain(FULL_SCALE, -1200), -1200);
/// assert_eq!(apply_gain(FULL_SCALE / 2, 1000), 500);
/// assert_eq!(apply_gain(0, i16::MAX), 0);
/// ```
#[inline]
pub fn apply_gain(gain: i32, sample: i16) -> i16 {
    ((gain * sample as i32) >> 16) as i16
}
