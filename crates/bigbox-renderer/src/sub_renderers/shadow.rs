//! Soft screen-space shadow renderer

use bigbox_core::{ShadingParameters, ShadowEllipse};
use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::pipeline::{
    PipelineConfig, SHADOW_BLEND, create_uniform_bind_group, uniform_bind_group_layout,
};
use crate::vertex::{SHADOW_QUAD, ShadowVertex, VertexLayout};

/// Shadow shader uniform.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct ShadowUniform {
    /// Ellipse center in NDC
    pub center: [f32; 2],
    /// Radial scale in NDC
    pub scale: [f32; 2],
    /// Fade start and end radius
    pub fade: [f32; 2],
    /// Peak opacity
    pub opacity: f32,
    /// Padding for alignment.
    pub _pad: f32,
}

impl ShadowUniform {
    /// Combine the projected ellipse with the current fade/opacity settings.
    pub fn new(ellipse: &ShadowEllipse, params: &ShadingParameters) -> Self {
        Self {
            center: ellipse.center.to_array(),
            scale: ellipse.scale.to_array(),
            fade: [params.shadow_fade_start, params.shadow_fade_end],
            opacity: params.shadow_opacity.clamp(0.0, 1.0),
            _pad: 0.0,
        }
    }
}

/// Draws a blended quad over the whole target; the fragment shader shapes it.
pub struct ShadowRenderer {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    quad_buffer: wgpu::Buffer,
}

impl ShadowRenderer {
    /// Create the shadow pipeline. Depth test is off so the shadow never
    /// occludes the box, which is drawn afterwards.
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        depth_format: wgpu::TextureFormat,
    ) -> Self {
        let layout = uniform_bind_group_layout(device, "Shadow", wgpu::ShaderStages::FRAGMENT);

        let pipeline = PipelineConfig::new(
            "Shadow",
            include_str!("../shaders/shadow.wgsl"),
            format,
            depth_format,
            &[&layout],
        )
        .with_vertex_layouts(vec![ShadowVertex::layout()])
        .with_topology(wgpu::PrimitiveTopology::TriangleStrip)
        .without_depth_test()
        .with_blend(Some(SHADOW_BLEND))
        .build(device);

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Shadow Uniform Buffer"),
            contents: bytemuck::cast_slice(&[ShadowUniform::default()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = create_uniform_bind_group(device, &layout, &uniform_buffer, "Shadow");

        let quad_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Shadow Quad Buffer"),
            contents: bytemuck::cast_slice(&SHADOW_QUAD),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Self {
            pipeline,
            uniform_buffer,
            bind_group,
            quad_buffer,
        }
    }

    /// Upload this frame's uniform.
    pub fn update(&self, queue: &wgpu::Queue, uniform: &ShadowUniform) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[*uniform]));
    }

    /// Record the draw.
    pub fn render(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.quad_buffer.slice(..));
        render_pass.draw(0..SHADOW_QUAD.len() as u32, 0..1);
    }

    /// Free the GPU buffers now rather than at drop.
    pub fn destroy(&self) {
        self.uniform_buffer.destroy();
        self.quad_buffer.destroy();
    }
}
