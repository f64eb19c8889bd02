#[cfg(feature = "pyffi")]
use pyo3::prelude::*;

#[cfg(feature = "f64")]
use core::f64::consts::PI;
#[cfg(not(feature = "f64"))]
use core::f32::consts::PI;

use crate::Float;

/// Convert degrees to radians.
///
/// The published CIEDE2000 equations state their angular constants in degrees,
/// whereas Rust's trigonometric functions expect radians. This function
/// bridges the two.
///
/// # Examples
///
/// ```
/// # use ciede2000::degrees_to_radians;
/// assert_eq!(degrees_to_radians(0.0), 0.0);
/// assert!((degrees_to_radians(90.0) - 1.5707963267948966).abs() < 1e-6);
/// ```
#[allow(clippy::suboptimal_flops)]
#[cfg_attr(feature = "pyffi", pyfunction)]
#[must_use]
#[inline]
pub fn degrees_to_radians(deg: Float) -> Float {
    deg * PI / 180.0
}

/// Convert radians to degrees.
///
/// This function is the inverse of [`degrees_to_radians`], modulo floating
/// point error.
#[allow(clippy::suboptimal_flops)]
#[cfg_attr(feature = "pyffi", pyfunction)]
#[must_use]
#[inline]
pub fn radians_to_degrees(rad: Float) -> Float {
    rad * 180.0 / PI
}

// ====================================================================================================================
