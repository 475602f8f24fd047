//! Textured cuboid renderer

use bigbox_core::{CuboidMesh, CuboidVertex};
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;

use crate::pipeline::{
    PipelineConfig, create_uniform_bind_group, texture_bind_group_layout,
    uniform_bind_group_layout,
};
use crate::renderer::AtlasTexture;
use crate::vertex::VertexLayout;

/// Per-frame uniform for the cuboid shader.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CuboidUniform {
    /// Projection × view × model
    pub mvp: [[f32; 4]; 4],
    /// Model matrix
    pub model: [[f32; 4]; 4],
    /// Inverse-transpose of the model matrix
    pub normal_matrix: [[f32; 4]; 4],
    /// Light position (w unused)
    pub light_pos: [f32; 4],
    /// Viewer position (w unused)
    pub view_pos: [f32; 4],
    /// Light color (a unused)
    pub light_color: [f32; 4],
    /// Gloss in [0, 1]
    pub gloss: f32,
    /// Padding for alignment.
    pub _pad: [f32; 3],
}

impl CuboidUniform {
    /// Assemble the uniform from the frame's matrices and lighting rig.
    pub fn new(
        view_proj: Mat4,
        model: Mat4,
        light_pos: Vec3,
        view_pos: Vec3,
        light_color: Vec3,
        gloss: f32,
    ) -> Self {
        Self {
            mvp: (view_proj * model).to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            normal_matrix: bigbox_core::geometry::normal_matrix(model).to_cols_array_2d(),
            light_pos: light_pos.extend(1.0).to_array(),
            view_pos: view_pos.extend(1.0).to_array(),
            light_color: light_color.extend(1.0).to_array(),
            gloss,
            _pad: [0.0; 3],
        }
    }
}

impl Default for CuboidUniform {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY, Mat4::IDENTITY, Vec3::Z, Vec3::Z, Vec3::ONE, 0.0)
    }
}

/// Cuboid renderer: one pipeline, one atlas bind group, one indexed draw.
pub struct CuboidRenderer {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    texture_bind_group: wgpu::BindGroup,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl CuboidRenderer {
    /// Build the pipeline and GPU buffers for `mesh`, sampling from `atlas`.
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        depth_format: wgpu::TextureFormat,
        mesh: &CuboidMesh,
        atlas: &AtlasTexture,
    ) -> Self {
        let uniform_layout =
            uniform_bind_group_layout(device, "Cuboid", wgpu::ShaderStages::VERTEX_FRAGMENT);
        let texture_layout = texture_bind_group_layout(device, "Cuboid");

        let pipeline = PipelineConfig::new(
            "Cuboid",
            include_str!("../shaders/cuboid.wgsl"),
            format,
            depth_format,
            &[&uniform_layout, &texture_layout],
        )
        .with_vertex_layouts(vec![CuboidVertex::layout()])
        .with_cull_mode(Some(wgpu::Face::Back))
        .build(device);

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Cuboid Uniform Buffer"),
            contents: bytemuck::cast_slice(&[CuboidUniform::default()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let uniform_bind_group =
            create_uniform_bind_group(device, &uniform_layout, &uniform_buffer, "Cuboid");

        let texture_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Cuboid Atlas Bind Group"),
            layout: &texture_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&atlas.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&atlas.sampler),
                },
            ],
        });

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Cuboid Vertex Buffer"),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Cuboid Index Buffer"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            pipeline,
            uniform_buffer,
            uniform_bind_group,
            texture_bind_group,
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        }
    }

    /// Upload this frame's uniform.
    pub fn update(&self, queue: &wgpu::Queue, uniform: &CuboidUniform) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[*uniform]));
    }

    /// Record the draw.
    pub fn render(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
        render_pass.set_bind_group(1, &self.texture_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        render_pass.draw_indexed(0..self.index_count, 0, 0..1);
    }

    /// Free the GPU buffers now rather than at drop.
    pub fn destroy(&self) {
        self.uniform_buffer.destroy();
        self.vertex_buffer.destroy();
        self.index_buffer.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_size_is_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<CuboidUniform>(), 256);
    }

    #[test]
    fn test_uniform_fields() {
        let model = bigbox_core::model_matrix(20.0, 30.0);
        let u = CuboidUniform::new(
            Mat4::IDENTITY,
            model,
            Vec3::new(0.0, 0.0, 12.8),
            Vec3::new(0.0, 0.0, 8.0),
            Vec3::ONE,
            0.3,
        );
        assert_eq!(u.mvp, model.to_cols_array_2d());
        assert_eq!(u.light_pos, [0.0, 0.0, 12.8, 1.0]);
        assert_eq!(u.gloss, 0.3);
    }
}
