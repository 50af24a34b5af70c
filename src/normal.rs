//! Box-Muller transform from raw words to standard normal deviates
//!
//! The first word of a pair sets the angle on (-pi, pi), the second the
//! radius. Both marginals are N(0, 1) and the two components of a pair are
//! independent. The open-interval conversions guarantee the radius term
//! never sees `ln(0)`.

use crate::convert::{open01_f32, open01_f64, open11_f32, open11_f64};

/// One pair of raw words to one pair of normal deviates, single precision
#[inline]
pub(crate) fn normal_pair_f32(w0: u32, w1: u32) -> (f32, f32) {
    let theta = std::f32::consts::PI * open11_f32(w0);
    let r = (-2.0 * open01_f32(w1).ln()).sqrt();
    let (sin, cos) = theta.sin_cos();
    (r * cos, r * sin)
}

/// One pair of raw 64-bit words to one pair of normal deviates, double precision
#[inline]
pub(crate) fn normal_pair_f64(u0: u64, u1: u64) -> (f64, f64) {
    let theta = std::f64::consts::PI * open11_f64(u0);
    let r = (-2.0 * open01_f64(u1).ln()).sqrt();
    let (sin, cos) = theta.sin_cos();
    (r * cos, r * sin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::philox::philox4x32_10;

    #[test]
    fn test_pair_radius_identity() {
        // cos^2 + sin^2 = 1, so x^2 + y^2 must reconstruct -2 ln(u).
        for i in 0..1000u32 {
            let w = philox4x32_10([i, 0, 0, 0], [5, 11]);
            let u0 = crate::convert::join_words(w[0], w[1]);
            let u1 = crate::convert::join_words(w[2], w[3]);
            let (x, y) = normal_pair_f64(u0, u1);

            let r_sq = -2.0 * open01_f64(u1).ln();
            assert!(
                (x * x + y * y - r_sq).abs() < 1e-12,
                "pair {} lost the radius: {} vs {}",
                i,
                x * x + y * y,
                r_sq
            );
        }
    }

    #[test]
    fn test_pairs_are_finite() {
        for i in 0..1000u32 {
            let w = philox4x32_10([i, 1, 2, 3], [17, 29]);
            let (x32, y32) = normal_pair_f32(w[0], w[1]);
            assert!(x32.is_finite() && y32.is_finite(), "f32 pair {} not finite", i);

            let (x64, y64) = normal_pair_f64(
                crate::convert::join_words(w[0], w[1]),
                crate::convert::join_words(w[2], w[3]),
            );
            assert!(x64.is_finite() && y64.is_finite(), "f64 pair {} not finite", i);
        }
    }
}
