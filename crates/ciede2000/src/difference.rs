#[cfg(feature = "pyffi")]
use pyo3::prelude::*;

#[cfg(feature = "f64")]
use core::f64::consts::{PI, TAU};
#[cfg(not(feature = "f64"))]
use core::f32::consts::{PI, TAU};

use crate::angle::degrees_to_radians;
use crate::Float;

/// The parametric weighting factor for lightness.
///
/// Sharma, Wu, and Dalal set all three parametric weighting factors to unity
/// for every ΔE2000 value reported in their paper. So does this crate.
pub const K_L: Float = 1.0;

/// The parametric weighting factor for chroma.
pub const K_C: Float = 1.0;

/// The parametric weighting factor for hue.
pub const K_H: Float = 1.0;

/// 25 raised to the 7th power.
///
/// This constant appears in both the a* correction factor G and the rotation
/// factor R<sub>C</sub>.
pub const POW_25_TO_7: Float = 6103515625.0;

/// Compute the chroma-dependent weight `√(C⁷ / (C⁷ + 25⁷))`.
///
/// The result approaches 0 for neutral colors and 1 for highly saturated ones.
#[inline]
fn chroma_weight(chroma: Float) -> Float {
    let chroma7 = chroma.powi(7);
    (chroma7 / (chroma7 + POW_25_TO_7)).sqrt()
}

/// Compute the hue angle in radians from the (corrected) a* and b* values.
///
/// The hue is zero at the origin, no matter how `atan2` treats that point.
/// Otherwise, it falls into `0..2π`.
#[inline]
pub(crate) fn hue_angle(a: Float, b: Float) -> Float {
    if b == 0.0 && a == 0.0 {
        return 0.0;
    }

    let h = b.atan2(a);
    if h < 0.0 {
        // Tiny negative angles round up to a full turn.
        let h = h + TAU;
        if h < TAU {
            h
        } else {
            0.0
        }
    } else {
        h
    }
}

/// Compute the signed hue difference `h2 - h1` along the shorter arc.
///
/// If either color has zero chroma, i.e., `chroma_product` is zero, the hue is
/// undefined and the difference is zero.
#[inline]
fn hue_difference(chroma_product: Float, h1: Float, h2: Float) -> Float {
    if chroma_product == 0.0 {
        return 0.0;
    }

    let δh = h2 - h1;
    if δh < -PI {
        δh + TAU
    } else if PI < δh {
        δh - TAU
    } else {
        δh
    }
}

/// Compute the mean hue along the shorter arc.
///
/// If either color has zero chroma, the mean is the plain sum of both hues,
/// not their average. That's just how the published formula defines it.
#[inline]
fn mean_hue(chroma_product: Float, h1: Float, h2: Float) -> Float {
    let sum = h1 + h2;
    if chroma_product == 0.0 {
        sum
    } else if (h1 - h2).abs() <= PI {
        sum / 2.0
    } else if sum < TAU {
        (sum + TAU) / 2.0
    } else {
        (sum - TAU) / 2.0
    }
}

/// Compute the hue rotation term T for the given mean hue in radians.
#[allow(clippy::suboptimal_flops)]
#[inline]
fn hue_rotation(h: Float) -> Float {
    1.0 - 0.17 * (h - degrees_to_radians(30.0)).cos()
        + 0.24 * (2.0 * h).cos()
        + 0.32 * (3.0 * h + degrees_to_radians(6.0)).cos()
        - 0.20 * (4.0 * h - degrees_to_radians(63.0)).cos()
}

/// Compute ΔE2000 for two colors in CIE L*a*b*.
///
/// This function implements the CIEDE2000 color difference exactly as
/// described by Gaurav Sharma, Wencheng Wu, and Edul N. Dalal in "The CIEDE2000
/// Color-Difference Formula: Implementation Notes, Supplementary Test Data, and
/// Mathematical Observations" (Color Research & Application, 2005). The
/// parametric weighting factors [`K_L`], [`K_C`], and [`K_H`] are all 1.
///
/// Unlike Euclidian distance in L*a*b*, ΔE2000 compensates for the space's
/// perceptual non-uniformity, notably for near-neutral colors along the a*
/// axis, for blues around 275º, and for highly saturated colors. A difference
/// of about 1 is barely noticeable.
///
/// The result is non-negative, zero for identical colors, and symmetric in its
/// two colors. The function is total: Neutral colors with zero chroma have a
/// hue of zero and zero hue difference, so they never produce not-a-number.
/// However, not-a-number or infinite coordinates propagate to a not-a-number
/// result. The coordinates are not validated in any other way.
///
/// # Examples
///
/// ```
/// # use ciede2000::delta_e_2000;
/// let d = delta_e_2000(50.0, 2.6772, -79.7751, 50.0, 0.0, -82.7485);
/// assert!((d - 2.0425).abs() < 1e-4);
///
/// let d = delta_e_2000(50.0, 2.5, 0.0, 73.0, 25.0, -18.0);
/// assert!((d - 27.1492).abs() < 1e-4);
/// ```
#[allow(non_snake_case, clippy::suboptimal_flops)]
#[cfg_attr(feature = "pyffi", pyfunction)]
#[must_use]
pub fn delta_e_2000(L1: Float, a1: Float, b1: Float, L2: Float, a2: Float, b2: Float) -> Float {
    // Chroma and the a* correction factor G
    let C1 = a1.hypot(b1);
    let C2 = a2.hypot(b2);
    let barC = (C1 + C2) / 2.0;
    let G = 0.5 * (1.0 - chroma_weight(barC));

    let a1_prime = (1.0 + G) * a1;
    let a2_prime = (1.0 + G) * a2;

    // Corrected chroma and hue
    let C1_prime = a1_prime.hypot(b1);
    let C2_prime = a2_prime.hypot(b2);
    let h1_prime = hue_angle(a1_prime, b1);
    let h2_prime = hue_angle(a2_prime, b2);

    // Differences
    let ΔL_prime = L2 - L1;
    let ΔC_prime = C2_prime - C1_prime;
    let C_prime_product = C1_prime * C2_prime;
    let Δh_prime = hue_difference(C_prime_product, h1_prime, h2_prime);
    let ΔH_prime = 2.0 * C_prime_product.sqrt() * (Δh_prime / 2.0).sin();

    // Means
    let barL_prime = (L1 + L2) / 2.0;
    let barC_prime = (C1_prime + C2_prime) / 2.0;
    let barh_prime = mean_hue(C_prime_product, h1_prime, h2_prime);

    // Weighting functions
    let T = hue_rotation(barh_prime);
    let Δθ = degrees_to_radians(30.0)
        * (-((barh_prime - degrees_to_radians(275.0)) / degrees_to_radians(25.0)).powi(2)).exp();
    let R_C = 2.0 * chroma_weight(barC_prime);
    let L50 = (barL_prime - 50.0).powi(2);
    let S_L = 1.0 + 0.015 * L50 / (20.0 + L50).sqrt();
    let S_C = 1.0 + 0.045 * barC_prime;
    let S_H = 1.0 + 0.015 * barC_prime * T;
    let R_T = -(2.0 * Δθ).sin() * R_C;

    // Combine the weighted terms
    let ΔL = ΔL_prime / (K_L * S_L);
    let ΔC = ΔC_prime / (K_C * S_C);
    let ΔH = ΔH_prime / (K_H * S_H);
    let result = (ΔL * ΔL + ΔC * ΔC + ΔH * ΔH + R_T * ΔC * ΔH).sqrt();

    if result.is_nan() {
        tracing::trace!(L1, a1, b1, L2, a2, b2, "ΔE2000 of non-finite coordinates");
    }

    result
}

// ====================================================================================================================

#[cfg(test)]
mod test {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use rand_distr::{Distribution, Normal};

    use super::{
        delta_e_2000, hue_angle, hue_difference, mean_hue, K_C, K_H, K_L, POW_25_TO_7, PI, TAU,
    };
    use crate::angle::{degrees_to_radians, radians_to_degrees};
    use crate::assert_close_enough;
    use crate::Float;

    /// The 34 color pairs with L1, a1, b1, L2, a2, b2, and ΔE2000 from Table 1
    /// of Sharma, Wu, and Dalal's supplementary test data.
    const REFERENCE_PAIRS: [[Float; 7]; 34] = [
        [50.0000, 2.6772, -79.7751, 50.0000, 0.0000, -82.7485, 2.0425],
        [50.0000, 3.1571, -77.2803, 50.0000, 0.0000, -82.7485, 2.8615],
        [50.0000, 2.8361, -74.0200, 50.0000, 0.0000, -82.7485, 3.4412],
        [50.0000, -1.3802, -84.2814, 50.0000, 0.0000, -82.7485, 1.0000],
        [50.0000, -1.1848, -84.8006, 50.0000, 0.0000, -82.7485, 1.0000],
        [50.0000, -0.9009, -85.5211, 50.0000, 0.0000, -82.7485, 1.0000],
        [50.0000, 0.0000, 0.0000, 50.0000, -1.0000, 2.0000, 2.3669],
        [50.0000, -1.0000, 2.0000, 50.0000, 0.0000, 0.0000, 2.3669],
        [50.0000, 2.4900, -0.0010, 50.0000, -2.4900, 0.0009, 7.1792],
        [50.0000, 2.4900, -0.0010, 50.0000, -2.4900, 0.0010, 7.1792],
        [50.0000, 2.4900, -0.0010, 50.0000, -2.4900, 0.0011, 7.2195],
        [50.0000, 2.4900, -0.0010, 50.0000, -2.4900, 0.0012, 7.2195],
        [50.0000, -0.0010, 2.4900, 50.0000, 0.0009, -2.4900, 4.8045],
        [50.0000, -0.0010, 2.4900, 50.0000, 0.0010, -2.4900, 4.8045],
        [50.0000, -0.0010, 2.4900, 50.0000, 0.0011, -2.4900, 4.7461],
        [50.0000, 2.5000, 0.0000, 50.0000, 0.0000, -2.5000, 4.3065],
        [50.0000, 2.5000, 0.0000, 73.0000, 25.0000, -18.0000, 27.1492],
        [50.0000, 2.5000, 0.0000, 61.0000, -5.0000, 29.0000, 22.8977],
        [50.0000, 2.5000, 0.0000, 56.0000, -27.0000, -3.0000, 31.9030],
        [50.0000, 2.5000, 0.0000, 58.0000, 24.0000, 15.0000, 19.4535],
        [50.0000, 2.5000, 0.0000, 50.0000, 3.1736, 0.5854, 1.0000],
        [50.0000, 2.5000, 0.0000, 50.0000, 3.2972, 0.0000, 1.0000],
        [50.0000, 2.5000, 0.0000, 50.0000, 1.8634, 0.5757, 1.0000],
        [50.0000, 2.5000, 0.0000, 50.0000, 3.2592, 0.3350, 1.0000],
        [60.2574, -34.0099, 36.2677, 60.4626, -34.1751, 39.4387, 1.2644],
        [63.0109, -31.0961, -5.8663, 62.8187, -29.7946, -4.0864, 1.2630],
        [61.2901, 3.7196, -5.3901, 61.4292, 2.2480, -4.9620, 1.8731],
        [35.0831, -44.1164, 3.7933, 35.0232, -40.0716, 1.5901, 1.8645],
        [22.7233, 20.0904, -46.6940, 23.0331, 14.9730, -42.5619, 2.0373],
        [36.4612, 47.8580, 18.3852, 36.2715, 50.5065, 21.2231, 1.4146],
        [90.8027, -2.0831, 1.4410, 91.1528, -1.6435, 0.0447, 1.4441],
        [90.9257, -0.5406, -0.9208, 88.6381, -0.8985, -0.7239, 1.5381],
        [6.7747, -0.2908, -2.4247, 5.8714, -0.0985, -2.2286, 0.6377],
        [2.0776, 0.0795, -1.1350, 0.9033, -0.0636, -0.5514, 0.9082],
    ];

    fn random_lab(rng: &mut StdRng, ab: &Normal<Float>) -> [Float; 3] {
        [
            rng.random_range(0.0..=100.0),
            ab.sample(rng),
            ab.sample(rng),
        ]
    }

    #[test]
    fn test_reference_pairs() {
        for (index, &[l1, a1, b1, l2, a2, b2, expected]) in REFERENCE_PAIRS.iter().enumerate() {
            let actual = delta_e_2000(l1, a1, b1, l2, a2, b2);
            assert!(
                (actual - expected).abs() < 1e-4,
                "pair {}: expected {:.4}, got {}",
                index + 1,
                expected,
                actual
            );

            // The table lists each pair only once, so also check the reverse.
            let reversed = delta_e_2000(l2, a2, b2, l1, a1, b1);
            assert!(
                (actual - reversed).abs() < 1e-9,
                "pair {}: {} differs from reversed {}",
                index + 1,
                actual,
                reversed
            );
        }
    }

    #[test]
    fn test_identity() {
        for &[l1, a1, b1, l2, a2, b2, _] in REFERENCE_PAIRS.iter() {
            assert_eq!(delta_e_2000(l1, a1, b1, l1, a1, b1), 0.0, "ΔE(X, X) should be 0");
            assert_eq!(delta_e_2000(l2, a2, b2, l2, a2, b2), 0.0, "ΔE(Y, Y) should be 0");
        }
    }

    #[test]
    fn test_random_colors() {
        let mut rng = StdRng::seed_from_u64(0x00de_2000);
        let ab = Normal::new(0.0, 40.0).expect("standard deviation is positive");

        for _ in 0..10_000 {
            let [l1, a1, b1] = random_lab(&mut rng, &ab);
            let [l2, a2, b2] = random_lab(&mut rng, &ab);

            let forward = delta_e_2000(l1, a1, b1, l2, a2, b2);
            let backward = delta_e_2000(l2, a2, b2, l1, a1, b1);

            assert!(forward.is_finite(), "ΔE should be finite for finite colors");
            assert!(0.0 <= forward, "ΔE should be non-negative, is {}", forward);
            assert!(
                (forward - backward).abs() < 1e-9,
                "ΔE should be symmetric: {} vs {}",
                forward,
                backward
            );
            assert_eq!(
                forward.to_bits(),
                delta_e_2000(l1, a1, b1, l2, a2, b2).to_bits(),
                "ΔE should be deterministic"
            );
            assert_eq!(
                delta_e_2000(l1, a1, b1, l1, a1, b1),
                0.0,
                "ΔE(X, X) should be 0"
            );
        }
    }

    #[test]
    fn test_grays() {
        // Pure lightness difference: ΔL' / S_L with mean lightness 55
        let d = delta_e_2000(50.0, 0.0, 0.0, 60.0, 0.0, 0.0);
        let l50: Float = 25.0;
        let expected = 10.0 / (1.0 + 0.015 * l50 / (20.0 + l50).sqrt());
        assert_close_enough!(d, expected);
        assert!((d - 9.4706).abs() < 1e-4, "ΔE of grays is {}", d);

        // Gray against chromatic color exercises the undefined-hue branches
        for (a, b) in [(0.0, 0.0), (-0.0, 0.0), (0.0, -0.0), (-0.0, -0.0)] {
            let d = delta_e_2000(0.0, a, b, 100.0, 0.0, 0.0);
            assert!(d.is_finite(), "black vs white should be finite");
            let d = delta_e_2000(50.0, a, b, 50.0, 20.0, -35.0);
            assert!(d.is_finite() && 0.0 < d, "gray vs blue should be positive");
        }
    }

    #[test]
    fn test_non_finite() {
        assert!(
            delta_e_2000(Float::NAN, 0.0, 0.0, 50.0, 0.0, 0.0).is_nan(),
            "NaN lightness should propagate"
        );
        assert!(
            delta_e_2000(50.0, Float::INFINITY, 0.0, 50.0, 0.0, 0.0).is_nan(),
            "infinite a* should yield NaN"
        );
    }

    #[test]
    fn test_hue_angle() {
        assert_eq!(hue_angle(0.0, 0.0), 0.0, "origin should have zero hue");
        assert_eq!(hue_angle(-0.0, 0.0), 0.0, "origin should have zero hue");
        assert_close_enough!(hue_angle(1.0, 0.0), 0.0);
        assert_close_enough!(hue_angle(0.0, 1.0), PI / 2.0);
        assert_close_enough!(hue_angle(-1.0, 0.0), PI);
        assert_close_enough!(hue_angle(0.0, -1.0), 3.0 * PI / 2.0);
        assert_close_enough!(radians_to_degrees(hue_angle(1.0, -1.0)), 315.0);

        let h = hue_angle(1.0, -1e-12);
        assert!((0.0..TAU).contains(&h), "hue {} should be in 0..2π", h);

        // Adding 2π to this angle rounds to exactly 2π.
        let h = hue_angle(1.0, -1e-300);
        assert!((0.0..TAU).contains(&h), "hue {} should be in 0..2π", h);
        assert_eq!(h, 0.0, "a full turn should wrap to zero");
    }

    #[test]
    fn test_constants() {
        assert_eq!([K_L, K_C, K_H], [1.0, 1.0, 1.0], "weighting factors should be unity");
        assert_eq!(POW_25_TO_7, (25.0 as Float).powi(7), "25⁷ should be exact");
    }

    #[test]
    fn test_hue_difference() {
        let deg = degrees_to_radians;

        assert_eq!(hue_difference(0.0, deg(10.0), deg(200.0)), 0.0, "gray has no Δh");
        assert_close_enough!(hue_difference(1.0, deg(10.0), deg(40.0)), deg(30.0));
        assert_close_enough!(hue_difference(1.0, deg(40.0), deg(10.0)), deg(-30.0));

        // Across the 0º/360º boundary, the difference is the shorter arc.
        assert_close_enough!(hue_difference(1.0, deg(1.0), deg(359.0)), deg(-2.0));
        assert_close_enough!(hue_difference(1.0, deg(359.0), deg(1.0)), deg(2.0));
        assert_close_enough!(hue_difference(1.0, deg(10.0), deg(100.0)), deg(90.0));
    }

    #[test]
    fn test_mean_hue() {
        let deg = degrees_to_radians;

        // Zero chroma sums hues without averaging them.
        assert_close_enough!(mean_hue(0.0, deg(30.0), deg(40.0)), deg(70.0));

        assert_close_enough!(mean_hue(1.0, deg(30.0), deg(40.0)), deg(35.0));
        assert_close_enough!(mean_hue(1.0, deg(1.0), deg(300.0)), deg(330.5));
        assert_close_enough!(mean_hue(1.0, deg(300.0), deg(250.0)), deg(275.0));
        assert_close_enough!(mean_hue(1.0, deg(200.0), deg(350.0)), deg(275.0));
        assert_close_enough!(mean_hue(1.0, deg(190.0), deg(359.0)), deg(274.5));
        assert_close_enough!(mean_hue(1.0, deg(185.0), deg(4.0)), deg(274.5));
        assert_close_enough!(mean_hue(1.0, deg(350.0), deg(100.0)), deg(45.0));
    }

    #[test]
    fn test_hue_wraparound() {
        let chroma = 20.0;
        let color = |hue: Float| {
            let h = degrees_to_radians(hue);
            (chroma * h.cos(), chroma * h.sin())
        };

        let (a1, b1) = color(1.0);
        let (a2, b2) = color(359.0);
        let across = delta_e_2000(50.0, a1, b1, 50.0, a2, b2);

        let (a3, b3) = color(3.0);
        let within = delta_e_2000(50.0, a1, b1, 50.0, a3, b3);

        let (a4, b4) = color(181.0);
        let opposite = delta_e_2000(50.0, a1, b1, 50.0, a4, b4);

        assert!(across < 1.0, "2º apart across 0º should be small, is {}", across);
        assert!(
            (across - within).abs() < 0.1 * within,
            "2º apart should be similar: {} vs {}",
            across,
            within
        );
        assert!(10.0 * across < opposite, "opposite hues should be far apart");
    }
}
