//! # CIEDE2000
//!
//! This crate computes ΔE2000, the CIE's perceptual color difference between
//! two colors in CIE L*a*b*. Unlike Euclidian distance in L*a*b*, ΔE2000
//! accounts for the space's perceptual non-uniformity, which is particularly
//! pronounced for saturated colors, for near-neutral colors along the a* axis,
//! and for blues.
//!
//! The implementation follows Gaurav Sharma, Wencheng Wu, and Edul N. Dalal's
//! [implementation notes](http://www.ece.rochester.edu/~gsharma/ciede2000/)
//! and reproduces all 34 pairs of their supplementary test data to within
//! 1e-4. The parametric weighting factors [`K_L`], [`K_C`], and [`K_H`] are
//! fixed at 1.
//!
//!
//! ## 1. Overview
//!
//! The crate's main abstractions are:
//!
//!   * [`delta_e_2000`] computes the **color difference** from six
//!     coordinates. It is a pure, total function: It never fails, neutral
//!     colors never produce not-a-number, and not-a-number or infinite inputs
//!     simply propagate.
//!   * [`Lab`] is a small **value type** for colors in CIE L*a*b*. It offers
//!     [`Lab::delta_e`] as a more convenient interface to the same
//!     computation and parses from as well as formats to the CSS `lab()`
//!     notation.
//!   * [`degrees_to_radians`] and [`radians_to_degrees`] convert between
//!     **angle units**, since the published formula states its constants in
//!     degrees.
//!
//! The crate does not convert between color spaces, does not validate that
//! colors are within some gamut, and does not cache results.
//!
//!
//! ## 2. Examples
//!
//! ```
//! # use ciede2000::{delta_e_2000, Lab};
//! # use ciede2000::error::LabFormatError;
//! // Compare two colors given by their coordinates
//! let d = delta_e_2000(50.0, 2.5, 0.0, 56.0, -27.0, -3.0);
//! assert!((d - 31.9030).abs() < 1e-4);
//!
//! // Or parse them first
//! let blue: Lab = "lab(50 -1.3802 -84.2814)".parse()?;
//! let bluer: Lab = "lab(50 0 -82.7485)".parse()?;
//! assert!((blue.delta_e(&bluer) - 1.0).abs() < 1e-4);
//! # Ok::<(), LabFormatError>(())
//! ```
//!
//!
//! ## 3. Optional Features
//!
//! The crate supports two feature flags:
//!
//!   - **`f64`** selects the eponymous type as floating point type [`Float`]
//!     and `u64` as [`Bits`] instead of `f32` as [`Float`] and `u32` as
//!     [`Bits`]. This feature is enabled by default.
//!   - **`pyffi`** controls the Python integration through
//!     [PyO3](https://pyo3.rs/). This feature is disabled by default.
//!
//! Items that are only available in Python are decorated with <i
//! class=python-only>Python only!</i>.
//!
//!
//! ## 4. Diagnostics
//!
//! The crate emits [`tracing`](https://docs.rs/tracing) events when
//! [`delta_e_2000`] sees non-finite coordinates and when parsing a [`Lab`]
//! color fails. Without a subscriber installed, these events cost next to
//! nothing.

/// The floating point type in use.
#[cfg(feature = "f64")]
pub type Float = f64;
/// The floating point type in use.
#[cfg(not(feature = "f64"))]
pub type Float = f32;

/// [`Float`]'s bits.
#[cfg(feature = "f64")]
pub type Bits = u64;
/// [`Float`]'s bits.
#[cfg(not(feature = "f64"))]
pub type Bits = u32;

mod angle;
mod difference;
mod equality;
pub mod error;
mod lab;

#[cfg(feature = "pyffi")]
pub use equality::close_enough;

#[doc(hidden)]
pub use equality::to_eq_bits;

pub use angle::{degrees_to_radians, radians_to_degrees};
pub use difference::{delta_e_2000, K_C, K_H, K_L, POW_25_TO_7};
pub use lab::Lab;

#[cfg(feature = "pyffi")]
use pyo3::prelude::*;

#[doc(hidden)]
#[cfg(feature = "pyffi")]
#[pymodule]
pub fn ciede2000(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(close_enough, m)?)?;
    m.add_function(wrap_pyfunction!(degrees_to_radians, m)?)?;
    m.add_function(wrap_pyfunction!(radians_to_degrees, m)?)?;
    m.add_function(wrap_pyfunction!(delta_e_2000, m)?)?;

    m.add_class::<Lab>()?;

    m.add("K_L", K_L)?;
    m.add("K_C", K_C)?;
    m.add("K_H", K_H)?;
    m.add("POW_25_TO_7", POW_25_TO_7)?;

    Ok(())
}
