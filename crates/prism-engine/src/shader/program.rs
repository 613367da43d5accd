use std::borrow::Cow;
use std::path::Path;

use glam::Mat4;

use crate::device::{FrameError, RenderDevice};
use crate::geometry::ColorVertex;

use super::matrix_buffer::MatrixBuffer;
use super::source::{load_source, ShaderPaths, PIXEL_ENTRY, VERTEX_ENTRY};
use super::validate::validate_wgsl;
use super::ShaderError;

/// Vertex/pixel shader pair, its constant buffer and the render pipeline
/// binding them.
///
/// The pipeline bakes in the device's rasterizer and depth/stencil state, so
/// a program only draws into passes of the device it was built for.
#[derive(Default)]
pub struct ShaderProgram {
    vertex_shader: Option<wgpu::ShaderModule>,
    pixel_shader: Option<wgpu::ShaderModule>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    pipeline_layout: Option<wgpu::PipelineLayout>,
    pipeline: Option<wgpu::RenderPipeline>,

    matrix_buffer: Option<wgpu::Buffer>,
    bind_group: Option<wgpu::BindGroup>,
}

impl ShaderProgram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles both stages from `paths` and builds the pipeline.
    ///
    /// Compile and link failures are logged with the full diagnostic before
    /// being returned. On failure nothing is kept.
    pub fn initialize(
        &mut self,
        device: &RenderDevice<'_>,
        paths: &ShaderPaths,
    ) -> Result<(), ShaderError> {
        if self.is_initialized() || self.vertex_shader.is_some() {
            return Err(ShaderError::AlreadyInitialized);
        }

        let gpu = device.get_device().map_err(|_| ShaderError::DeviceNotReady)?;
        let state = device.pipeline_state().ok_or(ShaderError::DeviceNotReady)?;
        let color_format = device.color_format().ok_or(ShaderError::DeviceNotReady)?;

        let paths = paths.resolve();
        let vertex_source = compile_stage(&paths.vertex, naga::ShaderStage::Vertex, VERTEX_ENTRY)?;
        let pixel_source = compile_stage(&paths.pixel, naga::ShaderStage::Fragment, PIXEL_ENTRY)?;

        // Cross-stage and input-layout mismatches only surface at pipeline
        // creation.
        let scope = gpu.push_error_scope(wgpu::ErrorFilter::Validation);

        let vertex_shader = gpu.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("prism color vertex shader"),
            source: wgpu::ShaderSource::Wgsl(Cow::Owned(vertex_source)),
        });
        let pixel_shader = gpu.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("prism color pixel shader"),
            source: wgpu::ShaderSource::Wgsl(Cow::Owned(pixel_source)),
        });

        let bind_group_layout = gpu.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("prism matrix bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(MatrixBuffer::SIZE),
                },
                count: None,
            }],
        });

        let pipeline_layout = gpu.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("prism color pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = gpu.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("prism color pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &vertex_shader,
                entry_point: Some(VERTEX_ENTRY),
                compilation_options: Default::default(),
                buffers: &[ColorVertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &pixel_shader,
                entry_point: Some(PIXEL_ENTRY),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: color_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: state.rasterizer.primitive_state(),
            depth_stencil: Some(state.depth_stencil_state(device.depth_format())),
            multisample: state.rasterizer.multisample_state(),
            multiview_mask: None,
            cache: None,
        });

        if let Some(e) = pollster::block_on(scope.pop()) {
            let err = ShaderError::Link {
                vertex: paths.vertex.clone(),
                pixel: paths.pixel.clone(),
                report: e.to_string(),
            };
            log::error!("{err}");
            return Err(err);
        }

        let matrix_buffer = gpu.create_buffer(&wgpu::BufferDescriptor {
            label: Some("prism matrix buffer"),
            size: MatrixBuffer::SIZE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = gpu.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("prism matrix bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: matrix_buffer.as_entire_binding(),
            }],
        });

        self.vertex_shader = Some(vertex_shader);
        self.pixel_shader = Some(pixel_shader);
        self.bind_group_layout = Some(bind_group_layout);
        self.pipeline_layout = Some(pipeline_layout);
        self.pipeline = Some(pipeline);
        self.matrix_buffer = Some(matrix_buffer);
        self.bind_group = Some(bind_group);

        log::debug!(
            "shader program ready: {} + {}",
            paths.vertex.display(),
            paths.pixel.display()
        );
        Ok(())
    }

    /// Uploads the matrices, binds the program and draws `index_count`
    /// indices from the bound geometry.
    pub fn render(
        &self,
        queue: &wgpu::Queue,
        pass: &mut wgpu::RenderPass<'_>,
        index_count: u32,
        world: Mat4,
        view: Mat4,
        projection: Mat4,
    ) -> Result<(), FrameError> {
        self.set_shader_parameters(queue, world, view, projection)?;
        self.render_shader(pass, index_count)
    }

    fn set_shader_parameters(
        &self,
        queue: &wgpu::Queue,
        world: Mat4,
        view: Mat4,
        projection: Mat4,
    ) -> Result<(), FrameError> {
        let Some(buffer) = self.matrix_buffer.as_ref() else {
            return Err(FrameError::ConstantBuffer("matrix buffer was not created".into()));
        };
        if !buffer.usage().contains(wgpu::BufferUsages::COPY_DST) {
            return Err(FrameError::ConstantBuffer("matrix buffer is not writable".into()));
        }
        if buffer.size() < MatrixBuffer::SIZE {
            return Err(FrameError::ConstantBuffer(format!(
                "matrix buffer holds {} bytes, {} required",
                buffer.size(),
                MatrixBuffer::SIZE
            )));
        }

        let matrices = MatrixBuffer::new(world, view, projection);
        queue.write_buffer(buffer, 0, bytemuck::bytes_of(&matrices));
        Ok(())
    }

    fn render_shader(
        &self,
        pass: &mut wgpu::RenderPass<'_>,
        index_count: u32,
    ) -> Result<(), FrameError> {
        let (Some(pipeline), Some(bind_group)) = (self.pipeline.as_ref(), self.bind_group.as_ref())
        else {
            return Err(FrameError::NotReady("shader program"));
        };

        pass.set_pipeline(pipeline);
        pass.set_bind_group(0, bind_group, &[]);
        pass.draw_indexed(0..index_count, 0, 0..1);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.pipeline.is_some() && self.bind_group.is_some() && self.matrix_buffer.is_some()
    }

    /// Releases the constant buffer, then the pipeline, then both shaders.
    pub fn shutdown(&mut self) {
        self.bind_group = None;
        if let Some(buffer) = self.matrix_buffer.take() {
            buffer.destroy();
        }

        self.pipeline = None;
        self.pipeline_layout = None;
        self.bind_group_layout = None;

        self.pixel_shader = None;
        self.vertex_shader = None;
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn compile_stage(
    path: &Path,
    stage: naga::ShaderStage,
    entry: &'static str,
) -> Result<String, ShaderError> {
    let source = load_source(path).inspect_err(|e| log::error!("{e}"))?;
    validate_wgsl(path, &source, stage, entry).inspect_err(|e| log::error!("{e}"))?;
    Ok(source)
}
