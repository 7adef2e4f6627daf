//! Interleaved vertex formats shared with the rendering backend.
//!
//! All three are `bytemuck`-castable so a backend can upload buffers without
//! copying; byte views live on the owning payloads in `node`.

use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct PointVertex {
    pub position: [f32; 3],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_layouts_are_tightly_packed() {
        assert_eq!(std::mem::size_of::<MeshVertex>(), 24);
        assert_eq!(std::mem::size_of::<LineVertex>(), 24);
        assert_eq!(std::mem::size_of::<PointVertex>(), 12);
    }

    #[test]
    fn mesh_vertices_cast_to_bytes() {
        let verts = [
            MeshVertex {
                position: [1.0, 2.0, 3.0],
                normal: [0.0, 0.0, 1.0],
            },
            MeshVertex {
                position: [4.0, 5.0, 6.0],
                normal: [0.0, 1.0, 0.0],
            },
        ];
        let bytes: &[u8] = bytemuck::cast_slice(&verts);
        assert_eq!(bytes.len(), 48);
        let back: &[MeshVertex] = bytemuck::cast_slice(bytes);
        assert_eq!(back, &verts);
    }
}
