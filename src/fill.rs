//! Bulk fill kernels
//!
//! One counter block yields four raw words, and the kernels consume whole
//! blocks: single precision packs 4 values per block, double precision 2.
//! Element `4*b` (or `2*b`) of a filled slice therefore equals the `b`-th
//! scalar draw for the same identity, and a fill of any length is a prefix
//! of every longer fill. Chunk position recovers the block index on the
//! parallel paths, so the output never depends on the thread count.

use crate::convert::{join_words, open01_f32, open01_f64};
use crate::normal::{normal_pair_f32, normal_pair_f64};
use crate::philox::philox4x32_10;
use crate::stream::{Real, StreamId};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Parallelization threshold: skip Rayon for small fills (overhead > benefit)
#[cfg(feature = "rayon")]
const PARALLEL_THRESHOLD: usize = 4096;

/// Elements per parallel chunk, a multiple of the four-word block width
#[cfg(feature = "rayon")]
const CHUNK_SIZE: usize = 4096;

/// Fill a slice with uniform deviates in (0, 1) for one stream identity
///
/// ```
/// use stochr::{fill_uniform, StreamId};
///
/// let mut noise = vec![0.0f32; 1024];
/// fill_uniform(&mut noise, StreamId::new(7, 0, 0, 0, 0));
/// assert!(noise.iter().all(|&x| x > 0.0 && x < 1.0));
/// ```
pub fn fill_uniform<T: Real>(out: &mut [T], id: StreamId) {
    T::fill_uniform(out, id);
}

/// Fill a slice with standard normal deviates for one stream identity
///
/// Unlike the scalar draw, both Box-Muller components of each pair land in
/// the output, so nothing is wasted on bulk paths.
pub fn fill_normal<T: Real>(out: &mut [T], id: StreamId) {
    T::fill_normal(out, id);
}

/// Evaluate the block at position `b` of the identity's counter ray
#[inline(always)]
fn block(id: &StreamId, b: u32) -> [u32; 4] {
    philox4x32_10(
        [b, id.counter3, id.counter2, id.counter1],
        [id.seed1, id.seed2],
    )
}

pub(crate) fn uniform_f32(out: &mut [f32], id: StreamId) {
    #[cfg(feature = "rayon")]
    if out.len() >= PARALLEL_THRESHOLD {
        out.par_chunks_mut(CHUNK_SIZE)
            .enumerate()
            .for_each(|(chunk_idx, chunk)| {
                uniform_f32_serial(chunk, &id, (chunk_idx * CHUNK_SIZE / 4) as u32);
            });
        return;
    }

    // Serial fallback for small fills
    uniform_f32_serial(out, &id, 0);
}

fn uniform_f32_serial(out: &mut [f32], id: &StreamId, first_block: u32) {
    for (b, chunk) in out.chunks_mut(4).enumerate() {
        let words = block(id, first_block.wrapping_add(b as u32));
        for (dst, &w) in chunk.iter_mut().zip(words.iter()) {
            *dst = open01_f32(w);
        }
    }
}

pub(crate) fn uniform_f64(out: &mut [f64], id: StreamId) {
    #[cfg(feature = "rayon")]
    if out.len() >= PARALLEL_THRESHOLD {
        out.par_chunks_mut(CHUNK_SIZE)
            .enumerate()
            .for_each(|(chunk_idx, chunk)| {
                uniform_f64_serial(chunk, &id, (chunk_idx * CHUNK_SIZE / 2) as u32);
            });
        return;
    }

    uniform_f64_serial(out, &id, 0);
}

fn uniform_f64_serial(out: &mut [f64], id: &StreamId, first_block: u32) {
    for (b, chunk) in out.chunks_mut(2).enumerate() {
        let words = block(id, first_block.wrapping_add(b as u32));
        let values = [
            open01_f64(join_words(words[0], words[1])),
            open01_f64(join_words(words[2], words[3])),
        ];
        for (dst, &v) in chunk.iter_mut().zip(values.iter()) {
            *dst = v;
        }
    }
}

pub(crate) fn normal_f32(out: &mut [f32], id: StreamId) {
    #[cfg(feature = "rayon")]
    if out.len() >= PARALLEL_THRESHOLD {
        out.par_chunks_mut(CHUNK_SIZE)
            .enumerate()
            .for_each(|(chunk_idx, chunk)| {
                normal_f32_serial(chunk, &id, (chunk_idx * CHUNK_SIZE / 4) as u32);
            });
        return;
    }

    normal_f32_serial(out, &id, 0);
}

fn normal_f32_serial(out: &mut [f32], id: &StreamId, first_block: u32) {
    for (b, chunk) in out.chunks_mut(4).enumerate() {
        let words = block(id, first_block.wrapping_add(b as u32));
        let (x0, y0) = normal_pair_f32(words[0], words[1]);
        let (x1, y1) = normal_pair_f32(words[2], words[3]);
        let values = [x0, y0, x1, y1];
        for (dst, &v) in chunk.iter_mut().zip(values.iter()) {
            *dst = v;
        }
    }
}

pub(crate) fn normal_f64(out: &mut [f64], id: StreamId) {
    #[cfg(feature = "rayon")]
    if out.len() >= PARALLEL_THRESHOLD {
        out.par_chunks_mut(CHUNK_SIZE)
            .enumerate()
            .for_each(|(chunk_idx, chunk)| {
                normal_f64_serial(chunk, &id, (chunk_idx * CHUNK_SIZE / 2) as u32);
            });
        return;
    }

    normal_f64_serial(out, &id, 0);
}

fn normal_f64_serial(out: &mut [f64], id: &StreamId, first_block: u32) {
    for (b, chunk) in out.chunks_mut(2).enumerate() {
        let words = block(id, first_block.wrapping_add(b as u32));
        let (x, y) = normal_pair_f64(
            join_words(words[0], words[1]),
            join_words(words[2], words[3]),
        );
        let values = [x, y];
        for (dst, &v) in chunk.iter_mut().zip(values.iter()) {
            *dst = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_blocks_truncate() {
        let id = StreamId::new(5, 6, 7, 8, 9);
        let mut long = vec![0.0f64; 9];
        normal_f64(&mut long, id);

        for n in [0usize, 1, 2, 3, 5, 8] {
            let mut short = vec![0.0f64; n];
            normal_f64(&mut short, id);
            assert_eq!(&short[..], &long[..n], "length {} is not a prefix", n);
        }
    }

    #[test]
    fn test_fill_values_stay_in_range() {
        let id = StreamId::new(1, 2, 3, 4, 5);

        let mut uf = vec![0.0f32; 1021];
        uniform_f32(&mut uf, id);
        for (i, &x) in uf.iter().enumerate() {
            assert!(x > 0.0 && x < 1.0, "uniform_f32[{}] = {} out of range", i, x);
        }

        let mut ud = vec![0.0f64; 1021];
        uniform_f64(&mut ud, id);
        for (i, &x) in ud.iter().enumerate() {
            assert!(x > 0.0 && x < 1.0, "uniform_f64[{}] = {} out of range", i, x);
        }
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn test_parallel_fill_matches_serial() {
        let id = StreamId::new(11, 22, 33, 0, 0);
        let n = 10 * PARALLEL_THRESHOLD + 3;

        let mut par = vec![0.0f32; n];
        uniform_f32(&mut par, id);
        let mut ser = vec![0.0f32; n];
        uniform_f32_serial(&mut ser, &id, 0);
        assert_eq!(par, ser, "parallel uniform fill diverged from serial");

        let mut par_n = vec![0.0f64; n];
        normal_f64(&mut par_n, id);
        let mut ser_n = vec![0.0f64; n];
        normal_f64_serial(&mut ser_n, &id, 0);
        assert_eq!(par_n, ser_n, "parallel normal fill diverged from serial");
    }
}
