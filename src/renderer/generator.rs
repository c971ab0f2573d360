//! One-shot GPU grid generation
//!
//! Dispatches the value-noise compute shader over the full grid, then blocks
//! on a staging-buffer readback. This runs before the main loop starts and
//! every failure is fatal: nothing downstream is valid without the map. The
//! GPU resources only live for the duration of this call; the CPU copy is the
//! session's source of truth and the render pipeline re-uploads it.
//!
//! The shader mirrors `sim::grid::generate` cell for cell.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::consts::NOISE_CELL;
use crate::error::GenerateError;

/// Must match the `Params` struct in generate_shader.wgsl
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct GenParams {
    width: u32,
    height: u32,
    seed_lo: u32,
    seed_hi: u32,
    noise_cell: u32,
    _pad: [u32; 3],
}

/// Generate a `width × height` occupancy field for `seed` on the GPU and
/// read it back into host memory.
pub fn generate_grid(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    width: u32,
    height: u32,
    seed: u64,
) -> Result<Vec<f32>, GenerateError> {
    let cell_count = (width * height) as usize;
    let buffer_size = (cell_count * std::mem::size_of::<f32>()) as u64;

    // Shader/pipeline validation problems surface through the error scope;
    // a broken generator cannot fail open the way the render pipeline does.
    let error_scope = device.push_error_scope(wgpu::ErrorFilter::Validation);

    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("generate_shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("generate_shader.wgsl").into()),
    });

    let params_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("generate_params"),
        contents: bytemuck::bytes_of(&GenParams {
            width,
            height,
            seed_lo: seed as u32,
            seed_hi: (seed >> 32) as u32,
            noise_cell: NOISE_CELL,
            _pad: [0; 3],
        }),
        usage: wgpu::BufferUsages::UNIFORM,
    });

    let cells_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("generate_cells"),
        size: buffer_size,
        usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_SRC,
        mapped_at_creation: false,
    });

    let staging_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("generate_staging"),
        size: buffer_size,
        usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("generate_bind_group_layout"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::COMPUTE,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::COMPUTE,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Storage { read_only: false },
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
        ],
    });

    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("generate_bind_group"),
        layout: &bind_group_layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: params_buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: cells_buffer.as_entire_binding(),
            },
        ],
    });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("generate_pipeline_layout"),
        bind_group_layouts: &[&bind_group_layout],
        immediate_size: 0,
    });

    let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
        label: Some("generate_pipeline"),
        layout: Some(&pipeline_layout),
        module: &shader,
        entry_point: Some("cs_main"),
        compilation_options: Default::default(),
        cache: None,
    });

    if let Some(err) = pollster::block_on(error_scope.pop()) {
        return Err(GenerateError::Validation(err.to_string()));
    }

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("generate_encoder"),
    });
    {
        let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
            label: Some("generate_pass"),
            timestamp_writes: None,
        });
        pass.set_pipeline(&pipeline);
        pass.set_bind_group(0, &bind_group, &[]);
        pass.dispatch_workgroups(width.div_ceil(8), height.div_ceil(8), 1);
    }
    encoder.copy_buffer_to_buffer(&cells_buffer, 0, &staging_buffer, 0, buffer_size);
    queue.submit(std::iter::once(encoder.finish()));

    // Blocking readback: map the staging buffer and wait the device out.
    let (tx, rx) = std::sync::mpsc::channel();
    let slice = staging_buffer.slice(..);
    slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = tx.send(result);
    });
    device
        .poll(wgpu::PollType::wait_indefinitely())
        .map_err(|e| GenerateError::Poll(e.to_string()))?;

    match rx.recv() {
        Ok(Ok(())) => {}
        Ok(Err(e)) => return Err(GenerateError::Map(e.to_string())),
        Err(_) => {
            return Err(GenerateError::Map(
                "map callback dropped without a result".to_string(),
            ));
        }
    }

    let cells: Vec<f32> = {
        let mapped = slice.get_mapped_range();
        bytemuck::cast_slice(&mapped).to_vec()
    };
    staging_buffer.unmap();

    if cells.len() != cell_count {
        return Err(GenerateError::Truncated {
            got: cells.len(),
            expected: cell_count,
        });
    }

    log::info!("Generated {}x{} grid (seed {:#x})", width, height, seed);
    Ok(cells)
}
