//! Execution backends for bulk fills
//!
//! The same fill semantics behind one trait, with per-backend capability
//! errors. The host backend is always available and infallible; accelerator
//! backends can be missing at runtime or lack a precision, which is why the
//! trait methods return [`Result`] while the plain kernels do not.

use crate::error::Result;
use crate::fill;
use crate::stream::StreamId;

/// Bulk-fill capability of one execution backend
///
/// Implementations write the same values the host kernels produce for the
/// same identity: bit-exact for uniform output, and matching to platform
/// rounding in the transcendental steps for normal output.
pub trait Backend {
    /// Backend name used in errors and logs
    fn name(&self) -> &'static str;

    /// Fill `out` with single-precision uniforms in (0, 1)
    fn fill_uniform_f32(&self, id: StreamId, out: &mut [f32]) -> Result<()>;

    /// Fill `out` with double-precision uniforms in (0, 1)
    fn fill_uniform_f64(&self, id: StreamId, out: &mut [f64]) -> Result<()>;

    /// Fill `out` with single-precision standard normals
    fn fill_normal_f32(&self, id: StreamId, out: &mut [f32]) -> Result<()>;

    /// Fill `out` with double-precision standard normals
    fn fill_normal_f64(&self, id: StreamId, out: &mut [f64]) -> Result<()>;
}

/// Host backend running the kernels in [`crate::fill`]
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuBackend;

impl Backend for CpuBackend {
    fn name(&self) -> &'static str {
        "cpu"
    }

    fn fill_uniform_f32(&self, id: StreamId, out: &mut [f32]) -> Result<()> {
        fill::uniform_f32(out, id);
        Ok(())
    }

    fn fill_uniform_f64(&self, id: StreamId, out: &mut [f64]) -> Result<()> {
        fill::uniform_f64(out, id);
        Ok(())
    }

    fn fill_normal_f32(&self, id: StreamId, out: &mut [f32]) -> Result<()> {
        fill::normal_f32(out, id);
        Ok(())
    }

    fn fill_normal_f64(&self, id: StreamId, out: &mut [f64]) -> Result<()> {
        fill::normal_f64(out, id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpu_backend_is_infallible() {
        let backend = CpuBackend;
        let id = StreamId::new(10, 20, 30, 40, 50);

        let mut f = vec![0.0f32; 65];
        backend.fill_uniform_f32(id, &mut f).unwrap();
        backend.fill_normal_f32(id, &mut f).unwrap();

        let mut d = vec![0.0f64; 65];
        backend.fill_uniform_f64(id, &mut d).unwrap();
        backend.fill_normal_f64(id, &mut d).unwrap();

        assert_eq!(backend.name(), "cpu");
    }

    #[test]
    fn test_backend_as_trait_object() {
        let backend: &dyn Backend = &CpuBackend;
        let mut buf = vec![0.0f64; 64];
        backend.fill_uniform_f64(StreamId::default(), &mut buf).unwrap();
        assert!(buf.iter().all(|&x| x > 0.0 && x < 1.0));
    }
}
