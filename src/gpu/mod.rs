//! wgpu backend running WGSL twins of the host fill kernels
//!
//! Uniform fills are bit-exact against [`CpuBackend`](crate::CpuBackend);
//! normal fills match to the device's transcendental precision. Double
//! precision is rejected as a backend limitation since WGSL has no native
//! f64.

mod shaders;

use std::sync::mpsc;
use std::time::Duration;

use crate::backend::Backend;
use crate::error::{Error, Result};
use crate::stream::StreamId;

/// Workgroup size for the compute shaders
const WORKGROUP_SIZE: u32 = 256;

/// Compute number of workgroups for n counter blocks
#[inline]
fn workgroup_count(blocks: u32) -> u32 {
    (blocks + WORKGROUP_SIZE - 1) / WORKGROUP_SIZE
}

/// Shader parameters; layout mirrors the WGSL `FillParams` struct
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct FillParams {
    numel: u32,
    seed1: u32,
    seed2: u32,
    counter1: u32,
    counter2: u32,
    counter3: u32,
    _pad0: u32,
    _pad1: u32,
}

/// Backend running the fill kernels on a wgpu compute device
///
/// Construction requests an adapter and device and compiles both pipelines
/// up front; per-fill work is one dispatch plus a staging-buffer readback.
pub struct WgpuBackend {
    device: wgpu::Device,
    queue: wgpu::Queue,
    layout: wgpu::BindGroupLayout,
    uniform_pipeline: wgpu::ComputePipeline,
    normal_pipeline: wgpu::ComputePipeline,
}

impl WgpuBackend {
    /// Request the highest-power adapter and build the compute pipelines
    ///
    /// Fails with [`Error::Backend`] when no adapter or device is available,
    /// which is the signal for callers to stay on [`CpuBackend`](crate::CpuBackend).
    pub fn new() -> Result<Self> {
        let (device, queue) = pollster::block_on(async {
            let instance = wgpu::Instance::default();

            let adapter = instance
                .request_adapter(&wgpu::RequestAdapterOptions {
                    power_preference: wgpu::PowerPreference::HighPerformance,
                    compatible_surface: None,
                    force_fallback_adapter: false,
                })
                .await
                .map_err(|e| Error::Backend(format!("no GPU adapter available: {e}")))?;

            adapter
                .request_device(&wgpu::DeviceDescriptor {
                    label: Some("stochr wgpu device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    trace: wgpu::Trace::Off,
                    experimental_features: wgpu::ExperimentalFeatures::default(),
                })
                .await
                .map_err(|e| Error::Backend(format!("device request failed: {e:?}")))
        })?;

        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("philox_fill"),
            source: wgpu::ShaderSource::Wgsl(shaders::PHILOX_FILL_WGSL.into()),
        });

        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("philox_fill_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: false },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("philox_fill_pipeline_layout"),
            bind_group_layouts: &[&layout],
            immediate_size: 0, // Not using push constants
        });

        let uniform_pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("fill_uniform_f32"),
            layout: Some(&pipeline_layout),
            module: &module,
            entry_point: Some("fill_uniform_f32"),
            compilation_options: Default::default(),
            cache: None,
        });

        let normal_pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("fill_normal_f32"),
            layout: Some(&pipeline_layout),
            module: &module,
            entry_point: Some("fill_normal_f32"),
            compilation_options: Default::default(),
            cache: None,
        });

        Ok(WgpuBackend {
            device,
            queue,
            layout,
            uniform_pipeline,
            normal_pipeline,
        })
    }

    /// Dispatch one fill pipeline over `out` and read the result back
    fn run_fill(
        &self,
        pipeline: &wgpu::ComputePipeline,
        operation: &'static str,
        id: StreamId,
        out: &mut [f32],
    ) -> Result<()> {
        if out.is_empty() {
            return Ok(());
        }
        let numel = u32::try_from(out.len()).map_err(|_| {
            Error::backend_limitation("wgpu", operation, "fills are limited to u32::MAX elements")
        })?;

        let groups = workgroup_count(numel.div_ceil(4));
        let max_groups = self.device.limits().max_compute_workgroups_per_dimension;
        if groups > max_groups {
            return Err(Error::backend_limitation(
                "wgpu",
                operation,
                format!(
                    "{} elements need {} workgroups, device allows {} per dispatch",
                    numel, groups, max_groups
                ),
            ));
        }

        let size_bytes = (out.len() * std::mem::size_of::<f32>()) as u64;

        let storage = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("fill_output"),
            size: size_bytes,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_SRC,
            mapped_at_creation: false,
        });
        let staging = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("fill_staging"),
            size: size_bytes,
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let params_buf = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("params"),
            size: std::mem::size_of::<FillParams>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let params = FillParams {
            numel,
            seed1: id.seed1,
            seed2: id.seed2,
            counter1: id.counter1,
            counter2: id.counter2,
            counter3: id.counter3,
            _pad0: 0,
            _pad1: 0,
        };
        self.queue.write_buffer(&params_buf, 0, bytemuck::bytes_of(&params));

        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("fill_bind_group"),
            layout: &self.layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: storage.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: params_buf.as_entire_binding(),
                },
            ],
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some(operation),
            });
        {
            let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some(operation),
                timestamp_writes: None,
            });
            pass.set_pipeline(pipeline);
            pass.set_bind_group(0, Some(&bind_group), &[]);
            pass.dispatch_workgroups(groups, 1, 1);
        }
        encoder.copy_buffer_to_buffer(&storage, 0, &staging, 0, size_bytes);
        self.queue.submit(std::iter::once(encoder.finish()));

        let slice = staging.slice(..);
        let (sender, receiver) = mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = sender.send(result);
        });

        self.device
            .poll(wgpu::PollType::Wait {
                submission_index: None,
                timeout: Some(Duration::from_secs(60)),
            })
            .map_err(|e| Error::Backend(format!("GPU poll failed during {operation}: {e}")))?;

        receiver
            .recv()
            .map_err(|_| Error::Backend(format!("map_async callback was not invoked during {operation}")))?
            .map_err(|e| Error::Backend(format!("map_async failed during {operation}: {e}")))?;

        {
            let data = slice.get_mapped_range();
            out.copy_from_slice(bytemuck::cast_slice(&data));
        }
        staging.unmap();

        Ok(())
    }
}

impl Backend for WgpuBackend {
    fn name(&self) -> &'static str {
        "wgpu"
    }

    fn fill_uniform_f32(&self, id: StreamId, out: &mut [f32]) -> Result<()> {
        self.run_fill(&self.uniform_pipeline, "fill_uniform_f32", id, out)
    }

    fn fill_uniform_f64(&self, _id: StreamId, _out: &mut [f64]) -> Result<()> {
        Err(Error::backend_limitation(
            "wgpu",
            "fill_uniform_f64",
            "WGSL has no native f64",
        ))
    }

    fn fill_normal_f32(&self, id: StreamId, out: &mut [f32]) -> Result<()> {
        self.run_fill(&self.normal_pipeline, "fill_normal_f32", id, out)
    }

    fn fill_normal_f64(&self, _id: StreamId, _out: &mut [f64]) -> Result<()> {
        Err(Error::backend_limitation(
            "wgpu",
            "fill_normal_f64",
            "WGSL has no native f64",
        ))
    }
}
