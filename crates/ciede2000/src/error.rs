//! Utility module with the crate's errors.
//!
//! The color difference itself never fails. Only parsing a [`Lab`](crate::Lab)
//! color from its string representation does.

#[cfg(feature = "pyffi")]
use pyo3::{exceptions::PyValueError, prelude::*};

/// An erroneous L*a*b* color format.
///
/// Like PyO3 requires, all variants are unit variants without associated
/// state. The loss of information is limited, since the only format is the
/// CSS `lab()` function with three space-separated coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabFormatError {
    /// A color format that does not start with `lab`.
    UnknownFormat,

    /// A color format without the opening parenthesis. For example,
    /// `lab 50 2.5 0)` is missing the opening parenthesis.
    NoOpeningParenthesis,

    /// A color format without the closing parenthesis. For example,
    /// `lab(50 2.5 0` is missing the closing parenthesis.
    NoClosingParenthesis,

    /// A color format with fewer than three coordinates. For example,
    /// `lab(50 2.5)` is missing the third coordinate.
    MissingCoordinate,

    /// A color format with a malformed floating point number as coordinate.
    /// For example, `lab(50 2..5 0)` has a malformed second coordinate, and
    /// `lab(50% 2.5 0)` has a coordinate with a unit.
    MalformedFloat,

    /// A color format with more than three coordinates. For example,
    /// `lab(50 2.5 0 1)` has one coordinate too many.
    TooManyCoordinates,
}

impl core::fmt::Display for LabFormatError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        use LabFormatError::*;

        match *self {
            UnknownFormat => f.write_str("color format should start with `lab` but does not"),
            NoOpeningParenthesis => {
                f.write_str("color format should include an opening parenthesis but has none")
            }
            NoClosingParenthesis => {
                f.write_str("color format should include a closing parenthesis but has none")
            }
            MissingCoordinate => {
                f.write_str("color format should have 3 coordinates but is missing one")
            }
            MalformedFloat => {
                f.write_str("color format coordinates should be floating point numbers but are not")
            }
            TooManyCoordinates => {
                f.write_str("color format should have 3 coordinates but has more")
            }
        }
    }
}

impl core::error::Error for LabFormatError {}

#[cfg(feature = "pyffi")]
impl From<LabFormatError> for PyErr {
    fn from(value: LabFormatError) -> Self {
        PyValueError::new_err(value.to_string())
    }
}
