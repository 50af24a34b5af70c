//! Integration tests for bulk fills and the backend abstraction
//!
//! Tests verify:
//! - Fill output is bit-identical to the scalar draw sequence
//! - Partial blocks truncate (a shorter fill is a prefix of a longer one)
//! - Normal fills keep both Box-Muller components and pass moment checks
//! - CpuBackend matches the free kernels and works as a trait object
//! - Rayon and serial paths agree on large buffers

use stochr::{fill_normal, fill_uniform, Backend, CpuBackend, Stream, StreamId};

// ============================================================================
// Fill vs scalar coherence
// ============================================================================

#[test]
fn test_uniform_fill_f32_matches_scalar_draws() {
    let id = StreamId::new(11, 22, 33, 44, 55);
    let mut buf = vec![0.0f32; 1024];
    fill_uniform(&mut buf, id);

    // Each counter block yields four f32 draws; the scalar stream takes
    // one draw per block, so it walks the fill at stride four.
    let mut s = Stream::from(id);
    for b in 0..256 {
        assert_eq!(
            buf[4 * b].to_bits(),
            s.next_f32().to_bits(),
            "block {} head diverged",
            b
        );
    }
}

#[test]
fn test_uniform_fill_f64_matches_scalar_draws() {
    let id = StreamId::new(11, 22, 33, 44, 55);
    let mut buf = vec![0.0f64; 512];
    fill_uniform(&mut buf, id);

    let mut s = Stream::from(id);
    for b in 0..256 {
        assert_eq!(
            buf[2 * b].to_bits(),
            s.next_f64().to_bits(),
            "block {} head diverged",
            b
        );
    }
}

#[test]
fn test_normal_fill_matches_scalar_draws() {
    let id = StreamId::new(5, 6, 7, 8, 9);

    let mut f64s = vec![0.0f64; 64];
    fill_normal(&mut f64s, id);
    let mut s = Stream::from(id);
    for b in 0..32 {
        let x: f64 = s.normal();
        assert_eq!(f64s[2 * b].to_bits(), x.to_bits(), "f64 block {} diverged", b);
    }

    let mut f32s = vec![0.0f32; 64];
    fill_normal(&mut f32s, id);
    let mut t = Stream::from(id);
    for b in 0..16 {
        let x: f32 = t.normal();
        assert_eq!(f32s[4 * b].to_bits(), x.to_bits(), "f32 block {} diverged", b);
    }
}

// ============================================================================
// Partial blocks
// ============================================================================

#[test]
fn test_short_fill_is_prefix_of_long_fill() {
    let id = StreamId::new(1, 2, 3, 4, 5);

    let mut full = vec![0.0f32; 16];
    fill_uniform(&mut full, id);
    for len in [1usize, 2, 3, 5, 7, 13, 15] {
        let mut short = vec![0.0f32; len];
        fill_uniform(&mut short, id);
        for i in 0..len {
            assert_eq!(
                short[i].to_bits(),
                full[i].to_bits(),
                "len {} index {}",
                len,
                i
            );
        }
    }

    let mut full_n = vec![0.0f64; 16];
    fill_normal(&mut full_n, id);
    for len in [1usize, 3, 9, 15] {
        let mut short = vec![0.0f64; len];
        fill_normal(&mut short, id);
        for i in 0..len {
            assert_eq!(
                short[i].to_bits(),
                full_n[i].to_bits(),
                "normal len {} index {}",
                len,
                i
            );
        }
    }
}

// ============================================================================
// Normal fill statistics
// ============================================================================

#[test]
fn test_normal_fill_moments() {
    let mut buf = vec![0.0f64; 1_000_000];
    fill_normal(&mut buf, StreamId::new(777, 0, 0, 0, 0));

    let n = buf.len() as f64;
    let mean = buf.iter().sum::<f64>() / n;
    let variance = buf.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / n;

    assert!(mean.abs() < 0.01, "mean should be ~0, got {}", mean);
    assert!(
        (variance - 1.0).abs() < 0.02,
        "variance should be ~1, got {}",
        variance
    );
    assert!(buf.iter().all(|x| x.is_finite()));
}

// ============================================================================
// Backend abstraction
// ============================================================================

#[test]
fn test_cpu_backend_matches_free_kernels() {
    let id = StreamId::new(21, 42, 63, 84, 105);
    let backend = CpuBackend;
    assert_eq!(backend.name(), "cpu");

    let mut via_backend = vec![0.0f32; 100];
    let mut via_kernel = vec![0.0f32; 100];
    backend.fill_uniform_f32(id, &mut via_backend).unwrap();
    fill_uniform(&mut via_kernel, id);
    assert_eq!(via_backend, via_kernel);

    let mut normal_backend = vec![0.0f64; 100];
    let mut normal_kernel = vec![0.0f64; 100];
    backend.fill_normal_f64(id, &mut normal_backend).unwrap();
    fill_normal(&mut normal_kernel, id);
    assert_eq!(normal_backend, normal_kernel);
}

#[test]
fn test_backend_as_trait_object() {
    let backend: &dyn Backend = &CpuBackend;
    let mut buf = vec![0.0f64; 32];
    backend
        .fill_uniform_f64(StreamId::new(1, 1, 1, 1, 1), &mut buf)
        .unwrap();
    assert!(buf.iter().all(|&x| x > 0.0 && x < 1.0));
}

// ============================================================================
// Parallel path
// ============================================================================

#[cfg(feature = "rayon")]
#[test]
fn test_large_fill_matches_scalar_prefix() {
    // Large enough to cross the Rayon threshold and exercise chunked
    // block-index math across many chunks.
    let id = StreamId::new(0xABCD, 0x1234, 0, 0, 0);
    let mut buf = vec![0.0f32; 100_000];
    fill_uniform(&mut buf, id);

    let mut s = Stream::from(id);
    for b in 0..25_000 {
        assert_eq!(
            buf[4 * b].to_bits(),
            s.next_f32().to_bits(),
            "block {} diverged",
            b
        );
    }
}
