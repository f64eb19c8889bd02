use core::str::FromStr;

#[cfg(feature = "pyffi")]
use pyo3::prelude::*;

use crate::angle::radians_to_degrees;
use crate::difference::{delta_e_2000, hue_angle};
use crate::equality::to_eq_coordinates;
use crate::error::LabFormatError;
use crate::Float;

/// A color in CIE L*a*b*.
///
/// Every color has three coordinates, the lightness L*, which conventionally
/// falls into `0..=100`, and the two opponent axes a* (green–red) and b*
/// (blue–yellow), which are unbounded. This type does not validate
/// coordinates, since gamut legality is the caller's concern.
///
/// # Equality Testing and Hashing
///
/// Like [`f64`], colors are not trivially comparable. Hence this type prepares
/// coordinates before equality testing and hashing:
///
///   * To turn coordinates into comparable entities, replace not-a-numbers
///     with positive zero;
///   * To allow for floating point error, multiply by 1e12 (or 1e4 for `f32`)
///     and then round;
///   * To make zeros comparable, replace negative zero with positive zero;
///   * To convince Rust that coordinates are comparable, convert to bits.
///
/// ## Coordinate Access
///
/// Code can access individual coordinates by indexing a color with integers
/// `0..=2` or through [`Lab::lightness`], [`Lab::a`], and [`Lab::b`].
#[cfg_attr(
    feature = "pyffi",
    pyclass(eq, frozen, hash, sequence, module = "ciede2000")
)]
#[derive(Clone, Copy)]
pub struct Lab {
    coordinates: [Float; 3],
}

#[cfg_attr(feature = "pyffi", pymethods)]
impl Lab {
    /// Instantiate a new color with the given lightness, a*, and b*.
    ///
    /// ```
    /// # use ciede2000::Lab;
    /// let blue = Lab::new(50.0, 2.6772, -79.7751);
    /// assert_eq!(blue.as_ref(), &[50.0, 2.6772, -79.7751]);
    /// ```
    #[cfg(feature = "pyffi")]
    #[new]
    #[inline]
    pub const fn new(l: Float, a: Float, b: Float) -> Self {
        Self {
            coordinates: [l, a, b],
        }
    }

    /// Instantiate a new color with the given lightness, a*, and b*.
    ///
    /// ```
    /// # use ciede2000::Lab;
    /// let blue = Lab::new(50.0, 2.6772, -79.7751);
    /// assert_eq!(blue.as_ref(), &[50.0, 2.6772, -79.7751]);
    /// ```
    #[cfg(not(feature = "pyffi"))]
    #[inline]
    pub const fn new(l: Float, a: Float, b: Float) -> Self {
        Self {
            coordinates: [l, a, b],
        }
    }

    /// Parse a color from its string representation. <i
    /// class=python-only>Python only!</i>
    ///
    /// This method implements the same functionality as `Lab`'s `FromStr`
    /// implementation and is available in Python only.
    #[cfg(feature = "pyffi")]
    #[staticmethod]
    pub fn parse(s: &str) -> Result<Lab, LabFormatError> {
        Lab::from_str(s)
    }

    /// Access the coordinates. <i class=python-only>Python only!</i>
    #[cfg(feature = "pyffi")]
    pub fn coordinates(&self) -> [Float; 3] {
        self.coordinates
    }

    /// Get this color's length, which is 3. <i class=python-only>Python
    /// only!</i>
    #[cfg(feature = "pyffi")]
    pub fn __len__(&self) -> usize {
        3
    }

    /// Read coordinates by index. <i class=python-only>Python only!</i>
    #[cfg(feature = "pyffi")]
    pub fn __getitem__(&self, index: isize) -> PyResult<Float> {
        match index {
            -3..=-1 => Ok(self.coordinates[(3 + index) as usize]),
            0..=2 => Ok(self.coordinates[index as usize]),
            _ => Err(pyo3::exceptions::PyIndexError::new_err(
                "Invalid coordinate index",
            )),
        }
    }

    /// Get the lightness L*.
    #[inline]
    pub fn lightness(&self) -> Float {
        self.coordinates[0]
    }

    /// Get the a* coordinate.
    #[inline]
    pub fn a(&self) -> Float {
        self.coordinates[1]
    }

    /// Get the b* coordinate.
    #[inline]
    pub fn b(&self) -> Float {
        self.coordinates[2]
    }

    /// Compute this color's chroma, i.e., its distance from the neutral axis.
    ///
    /// ```
    /// # use ciede2000::Lab;
    /// assert_eq!(Lab::new(50.0, 3.0, -4.0).chroma(), 5.0);
    /// ```
    #[inline]
    pub fn chroma(&self) -> Float {
        self.a().hypot(self.b())
    }

    /// Compute this color's hue angle in degrees.
    ///
    /// The result falls into `0..360`. Neutral colors have a hue of zero.
    /// Note that this is the plain CIELAB hue angle, without the a* correction
    /// applied by [`Lab::delta_e`].
    ///
    /// ```
    /// # use ciede2000::Lab;
    /// assert_eq!(Lab::new(50.0, 0.0, 0.0).hue(), 0.0);
    /// assert!((Lab::new(50.0, 0.0, -10.0).hue() - 270.0).abs() < 1e-9);
    /// ```
    #[inline]
    pub fn hue(&self) -> Float {
        radians_to_degrees(hue_angle(self.a(), self.b()))
    }

    /// Determine whether this color is neutral, i.e., has zero chroma.
    #[inline]
    pub fn is_neutral(&self) -> bool {
        self.a() == 0.0 && self.b() == 0.0
    }

    /// Compute ΔE2000 between this and the other color.
    ///
    /// This method delegates to [`delta_e_2000`]. The result is symmetric.
    ///
    /// ```
    /// # use ciede2000::Lab;
    /// let gray = Lab::new(50.0, 2.5, 0.0);
    /// let green = Lab::new(61.0, -5.0, 29.0);
    /// assert!((gray.delta_e(&green) - 22.8977).abs() < 1e-4);
    /// assert_eq!(gray.delta_e(&green), green.delta_e(&gray));
    /// ```
    #[inline]
    pub fn delta_e(&self, other: &Self) -> Float {
        let [l1, a1, b1] = self.coordinates;
        let [l2, a2, b2] = other.coordinates;
        delta_e_2000(l1, a1, b1, l2, a2, b2)
    }

    /// Convert this color to its debug representation. <i
    /// class=python-only>Python only!</i>
    #[cfg(feature = "pyffi")]
    pub fn __repr__(&self) -> String {
        format!("{:?}", self)
    }

    /// Convert this color to its string representation. <i
    /// class=python-only>Python only!</i>
    #[cfg(feature = "pyffi")]
    pub fn __str__(&self) -> String {
        format!("{}", self)
    }
}

impl Default for Lab {
    /// Create the default color, which is black.
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

impl From<[Float; 3]> for Lab {
    fn from(value: [Float; 3]) -> Self {
        Self { coordinates: value }
    }
}

impl From<Lab> for [Float; 3] {
    fn from(value: Lab) -> Self {
        value.coordinates
    }
}

/// Parse a color in CSS `lab()` notation.
///
/// The string must already be trimmed and lowercase. The three coordinates
/// must be space-separated and unitless (i.e., no `%`). The `none` keyword for
/// missing coordinates is not supported.
fn parse(s: &str) -> Result<[Float; 3], LabFormatError> {
    let rest = s
        .strip_prefix("lab")
        .ok_or(LabFormatError::UnknownFormat)?;

    // Munge parentheses after trimming leading whitespace
    let body = rest
        .trim_start()
        .strip_prefix('(')
        .ok_or(LabFormatError::NoOpeningParenthesis)
        .and_then(|rest| {
            rest.strip_suffix(')')
                .ok_or(LabFormatError::NoClosingParenthesis)
        })?;

    #[inline]
    fn parse_coordinate(s: Option<&str>) -> Result<Float, LabFormatError> {
        s.ok_or(LabFormatError::MissingCoordinate)
            .and_then(|t| t.parse().map_err(|_| LabFormatError::MalformedFloat))
    }

    // Munge coordinates. Iterator eats all leading or trailing white space.
    let mut iter = body.split_whitespace();
    let l = parse_coordinate(iter.next())?;
    let a = parse_coordinate(iter.next())?;
    let b = parse_coordinate(iter.next())?;
    if iter.next().is_some() {
        return Err(LabFormatError::TooManyCoordinates);
    }

    Ok([l, a, b])
}

impl FromStr for Lab {
    type Err = LabFormatError;

    /// Instantiate a color from its string representation.
    ///
    /// Before parsing the string slice, this method trims any leading and
    /// trailing white space while also converting ASCII letters to lower case.
    /// That makes parsing effectively case-insensitive. It recognizes the
    /// modern syntax for the CSS `lab()` function with three space-separated,
    /// unitless coordinates.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ciede2000::Lab;
    /// # use ciede2000::error::LabFormatError;
    /// use std::str::FromStr;
    ///
    /// let blue = Lab::from_str("lab(50 2.6772 -79.7751)")?;
    /// assert_eq!(blue, Lab::new(50.0, 2.6772, -79.7751));
    ///
    /// let gray: Lab = str::parse("  LAB( 50 0 0 ) ")?;
    /// assert_eq!(gray, Lab::new(50.0, 0.0, 0.0));
    /// # Ok::<(), LabFormatError>(())
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowercase = s.trim().to_ascii_lowercase();
        parse(lowercase.as_str())
            .map(Self::from)
            .inspect_err(|error| tracing::debug!(input = s, %error, "unable to parse Lab color"))
    }
}

impl TryFrom<&str> for Lab {
    type Error = LabFormatError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Lab::from_str(value)
    }
}

impl TryFrom<String> for Lab {
    type Error = LabFormatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Lab::from_str(value.as_str())
    }
}

impl AsRef<[Float; 3]> for Lab {
    fn as_ref(&self) -> &[Float; 3] {
        &self.coordinates
    }
}

impl core::ops::Index<usize> for Lab {
    type Output = Float;

    /// Access the coordinate with the given index.
    ///
    /// # Panics
    ///
    /// This method panics if `2 < index`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ciede2000::Lab;
    /// let orange = Lab::new(58.0, 24.0, 15.0);
    /// assert_eq!(orange[2], 15.0);
    /// ```
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.coordinates[index]
    }
}

impl core::hash::Hash for Lab {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        to_eq_coordinates(&self.coordinates).hash(state);
    }
}

impl PartialEq for Lab {
    /// Determine whether this color equals the other color.
    ///
    /// Both equality testing and hashing normalize coordinates with the same
    /// steps, so that equal colors also have equal hashes.
    ///
    /// ```
    /// # use ciede2000::{Float, Lab};
    /// let delta = 2.0 * (10.0 as Float).powi(-(Float::DIGITS as i32));
    /// assert_eq!(
    ///     Lab::new(50.0, Float::NAN, -0.0),
    ///     Lab::new(50.0 + delta, 0.0, 0.0),
    /// );
    /// ```
    fn eq(&self, other: &Self) -> bool {
        if self.coordinates == other.coordinates {
            return true;
        }

        to_eq_coordinates(&self.coordinates) == to_eq_coordinates(&other.coordinates)
    }
}

impl Eq for Lab {}

impl core::fmt::Debug for Lab {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let [l, a, b] = self.coordinates;
        f.write_fmt(format_args!("Lab({}, {}, {})", l, a, b))
    }
}

impl core::fmt::Display for Lab {
    /// Format this color.
    ///
    /// This method formats the color in CSS format using the `lab()` function
    /// and three space-separated coordinates. It respects the formatter's
    /// precision, defaulting to 4 digits past the decimal, which is the
    /// precision of the published CIEDE2000 test data. Not-a-number
    /// coordinates format as `none`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ciede2000::{Float, Lab};
    /// let blue = Lab::new(50.0, 2.6772, -79.7751);
    /// assert_eq!(format!("{}", blue), "lab(50 2.6772 -79.7751)");
    /// assert_eq!(format!("{:.1}", blue), "lab(50 2.7 -79.8)");
    /// assert_eq!(format!("{}", Lab::new(50.0, Float::NAN, 0.0)), "lab(50 none 0)");
    /// ```
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("lab(")?;

        // More digits than the float type holds would overflow the factor.
        let precision = f.precision().unwrap_or(4).min(Float::DIGITS as usize);
        let factor = (10.0 as Float).powi(precision as i32);
        for (index, coordinate) in self.coordinates.iter().enumerate() {
            if coordinate.is_nan() {
                f.write_str("none")?;
            } else {
                // CSS wants no trailing zeros. Rounding avoids them, for the
                // most part. If the fractional part is zero, we do need an
                // explicit precision---of zero!
                let c = (coordinate * factor).round() / factor;
                if c == c.trunc() {
                    f.write_fmt(format_args!("{:.0}", c))?;
                } else {
                    f.write_fmt(format_args!("{}", c))?;
                }
            }

            if index < 2 {
                f.write_str(" ")?;
            }
        }

        f.write_str(")")
    }
}

// ====================================================================================================================
