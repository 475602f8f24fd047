//! Cuboid mesh generation

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::atlas::AtlasLayout;
use crate::constants::FACE_COUNT;
use crate::dimensions::CuboidExtents;
use crate::face::Face;

/// Vertices per face.
pub const VERTICES_PER_FACE: usize = 4;
/// Total vertex count.
pub const VERTEX_COUNT: usize = FACE_COUNT * VERTICES_PER_FACE;
/// Total index count (two triangles per face).
pub const INDEX_COUNT: usize = FACE_COUNT * 6;

/// GPU vertex for the cuboid.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct CuboidVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
    pub normal: [f32; 3],
}

/// Vertex and index data for one textured box.
#[derive(Debug, Clone)]
pub struct CuboidMesh {
    pub vertices: Vec<CuboidVertex>,
    pub indices: [u16; INDEX_COUNT],
}

impl CuboidMesh {
    /// Build the 24-vertex box for `extents`, texturing each face from its
    /// region of `layout`.
    pub fn new(extents: &CuboidExtents, layout: &AtlasLayout) -> Self {
        let mut vertices = Vec::with_capacity(VERTEX_COUNT);
        for face in Face::ALL {
            let corners = face_corners(face, extents);
            let uvs = layout.region(face).corner_uvs();
            let normal = face.normal();
            for (position, uv) in corners.into_iter().zip(uvs) {
                vertices.push(CuboidVertex {
                    position,
                    uv,
                    normal,
                });
            }
        }

        Self {
            vertices,
            indices: cuboid_indices(),
        }
    }
}

/// Face corners ordered top-left, top-right, bottom-left, bottom-right as
/// seen from outside the box.
pub fn face_corners(face: Face, extents: &CuboidExtents) -> [[f32; 3]; 4] {
    let (w, h, d) = (extents.half_width, extents.half_height, extents.half_depth);
    match face {
        Face::Front => [[-w, h, d], [w, h, d], [-w, -h, d], [w, -h, d]],
        Face::Back => [[w, h, -d], [-w, h, -d], [w, -h, -d], [-w, -h, -d]],
        Face::Left => [[-w, h, -d], [-w, h, d], [-w, -h, -d], [-w, -h, d]],
        Face::Right => [[w, h, d], [w, h, -d], [w, -h, d], [w, -h, -d]],
        Face::Top => [[-w, h, -d], [w, h, -d], [-w, h, d], [w, h, d]],
        Face::Bottom => [[-w, -h, d], [w, -h, d], [-w, -h, -d], [w, -h, -d]],
    }
}

/// `(0,2,1), (1,2,3)` per face, offset by the face's first vertex.
pub fn cuboid_indices() -> [u16; INDEX_COUNT] {
    let mut indices = [0u16; INDEX_COUNT];
    for face in 0..FACE_COUNT {
        let base = (face * VERTICES_PER_FACE) as u16;
        let quad = [0, 2, 1, 1, 2, 3].map(|i| base + i);
        indices[face * 6..face * 6 + 6].copy_from_slice(&quad);
    }
    indices
}

/// Model rotation: pitch about X applied after yaw about Y.
pub fn model_matrix(angle_x_deg: f32, angle_y_deg: f32) -> Mat4 {
    Mat4::from_rotation_x(angle_x_deg.to_radians())
        * Mat4::from_rotation_y(angle_y_deg.to_radians())
}

/// Inverse-transpose of the model matrix, for transforming normals.
pub fn normal_matrix(model: Mat4) -> Mat4 {
    model.inverse().transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::AtlasBuilder;
    use crate::face::FaceImage;
    use glam::Vec3;

    fn layout_for(extents: CuboidExtents) -> AtlasLayout {
        let faces = (0..6)
            .map(|_| FaceImage::solid(8, 8, [255, 255, 255, 255]).unwrap())
            .collect();
        let (_, layout) = AtlasBuilder::new(extents)
            .build(faces)
            .unwrap()
            .into_parts();
        layout
    }

    fn winding_normal(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> Vec3 {
        let (a, b, c) = (Vec3::from(a), Vec3::from(b), Vec3::from(c));
        (b - a).cross(c - a)
    }

    fn sample_extents() -> CuboidExtents {
        CuboidExtents {
            half_width: 0.7,
            half_height: 1.0,
            half_depth: 0.2,
        }
    }

    #[test]
    fn test_cuboid_mesh() {
        let extents = sample_extents();
        let mesh = CuboidMesh::new(&extents, &layout_for(extents));

        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.indices.len(), 36);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));

        for v in &mesh.vertices {
            assert!((v.position[0].abs() - 0.7).abs() < 1e-6);
            assert!((v.position[1].abs() - 1.0).abs() < 1e-6);
            assert!((v.position[2].abs() - 0.2).abs() < 1e-6);
        }
    }

    #[test]
    fn test_normals_point_outward() {
        let extents = sample_extents();
        let mesh = CuboidMesh::new(&extents, &layout_for(extents));
        for (face, chunk) in Face::ALL.iter().zip(mesh.vertices.chunks(4)) {
            let n = Vec3::from(face.normal());
            for v in chunk {
                assert_eq!(v.normal, face.normal());
                assert!(Vec3::from(v.position).dot(n) > 0.0, "{face}");
            }
        }
    }

    #[test]
    fn test_winding_is_counter_clockwise_from_outside() {
        let extents = sample_extents();
        let mesh = CuboidMesh::new(&extents, &layout_for(extents));
        for tri in mesh.indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| mesh.vertices[i as usize]);
            let wn = winding_normal(a.position, b.position, c.position);
            assert!(wn.dot(Vec3::from(a.normal)) > 0.0);
        }
    }

    #[test]
    fn test_uvs_come_from_layout() {
        let extents = CuboidExtents::cube();
        let layout = layout_for(extents);
        let mesh = CuboidMesh::new(&extents, &layout);
        for face in Face::ALL {
            let r = layout.region(face);
            let base = face.index() * 4;
            assert_eq!(mesh.vertices[base].uv, [r.u0, r.v0]);
            assert_eq!(mesh.vertices[base + 3].uv, [r.u1, r.v1]);
        }
    }

    #[test]
    fn test_index_pattern() {
        let indices = cuboid_indices();
        assert_eq!(&indices[..6], &[0, 2, 1, 1, 2, 3]);
        assert_eq!(&indices[30..], &[20, 22, 21, 21, 22, 23]);
    }

    #[test]
    fn test_model_matrix_order() {
        // Yaw first, then pitch: +Z rotated 90° about Y lands on +X,
        // which pitch about X leaves alone.
        let m = model_matrix(45.0, 90.0);
        let p = m.transform_point3(Vec3::Z);
        assert!((p - Vec3::X).length() < 1e-5);
        assert_eq!(model_matrix(0.0, 0.0), Mat4::IDENTITY);
    }

    #[test]
    fn test_normal_matrix_of_rotation_is_rotation() {
        let m = model_matrix(20.0, 30.0);
        let n = normal_matrix(m);
        assert!(n.abs_diff_eq(m, 1e-5));
    }
}
