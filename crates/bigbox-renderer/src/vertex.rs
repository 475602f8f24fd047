//! Vertex layouts
//!
//! The cuboid vertex type lives in `bigbox-core` so the mesh can be built
//! and tested without a GPU; this module attaches its wgpu layout.

use bigbox_core::CuboidVertex;
use bytemuck::{Pod, Zeroable};

/// Creates a vertex attribute with the offset calculated from the struct field.
///
/// This macro uses `std::mem::offset_of!` so the offset always matches the
/// struct layout.
#[macro_export]
macro_rules! vertex_attr {
    ($struct:ty, $field:ident, $location:expr, $format:ident) => {
        wgpu::VertexAttribute {
            offset: std::mem::offset_of!($struct, $field) as u64,
            shader_location: $location,
            format: wgpu::VertexFormat::$format,
        }
    };
}

/// Types that can be bound as a per-vertex buffer.
pub trait VertexLayout {
    /// Returns the vertex buffer layout for this vertex type.
    fn layout() -> wgpu::VertexBufferLayout<'static>;
}

const CUBOID_ATTRIBUTES: &[wgpu::VertexAttribute] = &[
    vertex_attr!(CuboidVertex, position, 0, Float32x3),
    vertex_attr!(CuboidVertex, uv, 1, Float32x2),
    vertex_attr!(CuboidVertex, normal, 2, Float32x3),
];

impl VertexLayout for CuboidVertex {
    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: CUBOID_ATTRIBUTES,
        }
    }
}

/// Position-only vertex for the full-screen shadow quad (NDC).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ShadowVertex {
    /// Position in normalized device coordinates.
    pub position: [f32; 2],
}

impl ShadowVertex {
    /// Vertex attribute descriptors for the shader.
    pub const ATTRIBUTES: &'static [wgpu::VertexAttribute] =
        &[vertex_attr!(ShadowVertex, position, 0, Float32x2)];
}

impl VertexLayout for ShadowVertex {
    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: Self::ATTRIBUTES,
        }
    }
}

/// Triangle-strip quad covering all of NDC.
pub const SHADOW_QUAD: [ShadowVertex; 4] = [
    ShadowVertex {
        position: [-1.0, -1.0],
    },
    ShadowVertex {
        position: [1.0, -1.0],
    },
    ShadowVertex {
        position: [-1.0, 1.0],
    },
    ShadowVertex {
        position: [1.0, 1.0],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cuboid_layout_matches_struct() {
        let layout = CuboidVertex::layout();
        assert_eq!(layout.array_stride, 32);
        let offsets: Vec<u64> = layout.attributes.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 12, 20]);
    }

    #[test]
    fn test_shadow_quad_covers_ndc() {
        let layout = ShadowVertex::layout();
        assert_eq!(layout.array_stride, 8);
        let xs: Vec<f32> = SHADOW_QUAD.iter().map(|v| v.position[0]).collect();
        assert_eq!(xs, vec![-1.0, 1.0, -1.0, 1.0]);
    }
}
