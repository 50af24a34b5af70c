//! Random streams addressed by a five-word identity
//!
//! A stream is one lane through the Philox counter space. The two seed words
//! form the permutation key and never change; the three counter words place
//! the stream, and a fourth internal word counts draws within it. Opening a
//! stream costs nothing, so the intended usage is fine grained: one stream
//! per (timestep, particle) pair, or per decision site, rebuilt on the spot
//! wherever a random number is needed.

use crate::convert::{join_words, open01_f32, open01_f64};
use crate::philox::philox4x32_10;

/// Identity of one random stream: two seed words and three counter words
///
/// Identical identities always reproduce identical sequences; identities
/// differing in any word give statistically independent streams. All-zero is
/// a valid identity and is what [`Default`] produces, mirroring unused slots
/// simply being left at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StreamId {
    /// First seed word, low half of the permutation key
    pub seed1: u32,
    /// Second seed word, high half of the permutation key
    pub seed2: u32,
    /// First user counter word
    pub counter1: u32,
    /// Second user counter word
    pub counter2: u32,
    /// Third user counter word
    pub counter3: u32,
}

impl StreamId {
    /// Build an identity from its five words
    pub fn new(seed1: u32, seed2: u32, counter1: u32, counter2: u32, counter3: u32) -> Self {
        StreamId {
            seed1,
            seed2,
            counter1,
            counter2,
            counter3,
        }
    }
}

/// A deterministic random stream
///
/// Every draw evaluates the keyed permutation at the current counter and
/// advances the draw word. There is no other state: rebuilding a stream from
/// the same five words resumes the exact sequence from the top, and two
/// streams never interact no matter how they are scheduled.
///
/// ```
/// use stochr::Stream;
///
/// let mut a = Stream::new(1, 2, 3, 4, 5);
/// let mut b = Stream::new(1, 2, 3, 4, 5);
/// assert_eq!(a.next_u32(), b.next_u32());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stream {
    key: [u32; 2],
    ctr: [u32; 4],
}

impl Stream {
    /// Open the stream identified by five words
    ///
    /// `seed1`/`seed2` stay fixed for the life of the stream. The three
    /// counter words select the stream; a simulation typically maps them to
    /// timestep, particle tag and a per-use salt. Unused slots are
    /// conventionally zero.
    pub fn new(seed1: u32, seed2: u32, counter1: u32, counter2: u32, counter3: u32) -> Self {
        // Reversed packing: counter1 occupies the top counter word, the
        // bottom word counts draws and starts at zero.
        Stream {
            key: [seed1, seed2],
            ctr: [0, counter3, counter2, counter1],
        }
    }

    /// Evaluate the permutation at the current counter and advance it
    ///
    /// The draw word wraps after 2^32 blocks without carrying into the user
    /// counter words, at which point the stream repeats.
    #[inline]
    fn next_block(&mut self) -> [u32; 4] {
        let out = philox4x32_10(self.ctr, self.key);
        self.ctr[0] = self.ctr[0].wrapping_add(1);
        out
    }

    /// Draw the next raw 32-bit word
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        self.next_block()[0]
    }

    /// Draw the next raw 64-bit word
    ///
    /// Words 0 and 1 of one permutation output, word 0 in the high half;
    /// the same pairing the double-precision draws use. One counter tick.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        let out = self.next_block();
        join_words(out[0], out[1])
    }

    /// Draw a single-precision uniform strictly inside (0, 1)
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        open01_f32(self.next_block()[0])
    }

    /// Draw a double-precision uniform strictly inside (0, 1)
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        let out = self.next_block();
        open01_f64(join_words(out[0], out[1]))
    }

    /// Draw a uniform deviate in (0, 1) at precision `T`
    #[inline]
    pub fn uniform<T: Real>(&mut self) -> T {
        T::uniform(self)
    }

    /// Draw a uniform deviate in `[a, b)`
    ///
    /// No bounds checking; the caller guarantees `a < b`.
    ///
    /// ```
    /// use stochr::Stream;
    ///
    /// let mut rng = Stream::new(8, 0, 0, 0, 0);
    /// let dx = rng.uniform_in(-0.5f32, 0.5);
    /// assert!(dx >= -0.5 && dx < 0.5);
    /// ```
    #[inline]
    pub fn uniform_in<T: Real>(&mut self, a: T, b: T) -> T {
        T::uniform_in(self, a, b)
    }

    /// Draw a standard normal deviate
    ///
    /// One counter tick. Internally a full Box-Muller pair is computed and
    /// the sine component thrown away; caching it would make the draw
    /// position no longer the only state, so half the entropy is the price
    /// of exact replayability. Bulk fills keep both components.
    #[inline]
    pub fn normal<T: Real>(&mut self) -> T {
        T::normal(self)
    }
}

impl From<StreamId> for Stream {
    fn from(id: StreamId) -> Self {
        Stream::new(id.seed1, id.seed2, id.counter1, id.counter2, id.counter3)
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// Floating-point precisions the draw surface produces
///
/// Sealed, implemented for `f32` and `f64` only. The methods are dispatch
/// hooks for [`Stream`] and the fill kernels rather than a surface to call
/// directly.
pub trait Real: sealed::Sealed + Copy {
    /// Uniform deviate in (0, 1)
    fn uniform(stream: &mut Stream) -> Self;
    /// Uniform deviate in `[a, b)`
    fn uniform_in(stream: &mut Stream, a: Self, b: Self) -> Self;
    /// Standard normal deviate
    fn normal(stream: &mut Stream) -> Self;
    /// Fill a slice with uniform deviates for one identity
    fn fill_uniform(out: &mut [Self], id: StreamId);
    /// Fill a slice with standard normal deviates for one identity
    fn fill_normal(out: &mut [Self], id: StreamId);
}

impl Real for f32 {
    #[inline]
    fn uniform(stream: &mut Stream) -> f32 {
        stream.next_f32()
    }

    #[inline]
    fn uniform_in(stream: &mut Stream, a: f32, b: f32) -> f32 {
        a + (b - a) * stream.next_f32()
    }

    #[inline]
    fn normal(stream: &mut Stream) -> f32 {
        let out = stream.next_block();
        crate::normal::normal_pair_f32(out[0], out[1]).0
    }

    fn fill_uniform(out: &mut [f32], id: StreamId) {
        crate::fill::uniform_f32(out, id);
    }

    fn fill_normal(out: &mut [f32], id: StreamId) {
        crate::fill::normal_f32(out, id);
    }
}

impl Real for f64 {
    #[inline]
    fn uniform(stream: &mut Stream) -> f64 {
        stream.next_f64()
    }

    #[inline]
    fn uniform_in(stream: &mut Stream, a: f64, b: f64) -> f64 {
        a + (b - a) * stream.next_f64()
    }

    #[inline]
    fn normal(stream: &mut Stream) -> f64 {
        let out = stream.next_block();
        crate::normal::normal_pair_f64(join_words(out[0], out[1]), join_words(out[2], out[3])).0
    }

    fn fill_uniform(out: &mut [f64], id: StreamId) {
        crate::fill::uniform_f64(out, id);
    }

    fn fill_normal(out: &mut [f64], id: StreamId) {
        crate::fill::normal_f64(out, id);
    }
}

#[cfg(feature = "rand_core")]
impl rand_core::RngCore for Stream {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        Stream::next_u32(self)
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        Stream::next_u64(self)
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        rand_core::impls::fill_bytes_via_next(self, dst)
    }
}

#[cfg(feature = "rand_core")]
impl rand_core::SeedableRng for Stream {
    /// Five little-endian u32 words in constructor order:
    /// seed1, seed2, counter1, counter2, counter3.
    type Seed = [u8; 20];

    fn from_seed(seed: Self::Seed) -> Self {
        let mut words = [0u32; 5];
        for (word, bytes) in words.iter_mut().zip(seed.chunks_exact(4)) {
            *word = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        }
        Stream::new(words[0], words[1], words[2], words[3], words[4])
    }
}
