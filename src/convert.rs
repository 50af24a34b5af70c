//! Bit-pattern to floating-point conversions
//!
//! Every conversion here is fixed point with a half-ulp offset: take the top
//! mantissa-minus-one bits of the raw word, add 0.5, scale by an exact power
//! of two. Each step is exact in IEEE arithmetic, so the outputs are
//! identical on every backend and never touch the interval endpoints. The
//! endpoints matter: the normal transform feeds a uniform draw into `ln`,
//! which must never see 0.0.

/// Map a raw word to the open interval (0, 1)
///
/// Output is one of 2^23 equispaced values in `[2^-24, 1 - 2^-24]`.
#[inline(always)]
pub fn open01_f32(u: u32) -> f32 {
    ((u >> 9) as f32 + 0.5) * (1.0 / 8388608.0)
}

/// Map a raw 64-bit word to the open interval (0, 1)
///
/// Output is one of 2^52 equispaced values in `[2^-53, 1 - 2^-53]`.
#[inline(always)]
pub fn open01_f64(u: u64) -> f64 {
    ((u >> 12) as f64 + 0.5) * (1.0 / 4503599627370496.0)
}

/// Map a raw word to the open interval (-1, 1)
///
/// Arithmetic shift keeps the sign bit, so the full word range covers the
/// interval symmetrically. Used for the Box-Muller angle.
#[inline(always)]
pub fn open11_f32(u: u32) -> f32 {
    ((u as i32 >> 8) as f32 + 0.5) * (1.0 / 8388608.0)
}

/// Map a raw 64-bit word to the open interval (-1, 1)
#[inline(always)]
pub fn open11_f64(u: u64) -> f64 {
    ((u as i64 >> 11) as f64 + 0.5) * (1.0 / 4503599627370496.0)
}

/// Assemble a 64-bit word from two raw words, high word first
#[inline(always)]
pub fn join_words(hi: u32, lo: u32) -> u64 {
    ((hi as u64) << 32) | lo as u64
}
