use nalgebra_glm as glm;

use super::vertex::{LineVertex, MeshVertex, PointVertex};

/// Rotation matrix for a (not necessarily unit) quaternion.
pub fn quaternion_to_matrix(q: &glm::Quat) -> glm::Mat3 {
    let q = glm::quat_normalize(q);

    let x2 = q.i + q.i;
    let y2 = q.j + q.j;
    let z2 = q.k + q.k;

    let xx = q.i * x2;
    let xy = q.i * y2;
    let xz = q.i * z2;
    let yy = q.j * y2;
    let yz = q.j * z2;
    let zz = q.k * z2;
    let wx = q.w * x2;
    let wy = q.w * y2;
    let wz = q.w * z2;

    glm::mat3(
        1.0 - (yy + zz),
        xy - wz,
        xz + wy,
        xy + wz,
        1.0 - (xx + zz),
        yz - wx,
        xz - wy,
        yz + wx,
        1.0 - (xx + yy),
    )
}

/// Quaternion rotating unit vector `from` onto unit vector `to`.
///
/// Antiparallel inputs rotate half a turn about an arbitrary perpendicular
/// axis; near-identical inputs yield the identity.
pub fn rotation_between(from: &glm::Vec3, to: &glm::Vec3) -> glm::Quat {
    const EPS: f32 = 1e-6;

    let dot = glm::dot(from, to);
    if dot > 1.0 - EPS {
        return glm::quat_identity();
    }
    if dot < -1.0 + EPS {
        // Any axis perpendicular to `from` works for a half turn.
        let mut axis = glm::cross(from, &glm::vec3(1.0, 0.0, 0.0));
        if glm::length(&axis) < EPS {
            axis = glm::cross(from, &glm::vec3(0.0, 1.0, 0.0));
        }
        let axis = glm::normalize(&axis);
        return glm::Quat::new(0.0, axis.x, axis.y, axis.z);
    }

    let axis = glm::cross(from, to);
    let s = ((1.0 + dot) * 2.0).sqrt();
    let inv_s = 1.0 / s;
    glm::quat_normalize(&glm::Quat::new(
        s * 0.5,
        axis.x * inv_s,
        axis.y * inv_s,
        axis.z * inv_s,
    ))
}

/// Local placement of a node: scale, then rotate, then translate.
#[derive(Debug, Clone)]
pub struct Transform {
    pub translation: glm::Vec3,
    pub rotation: glm::Quat,
    pub scale: glm::Vec3,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            translation: glm::vec3(0.0, 0.0, 0.0),
            rotation: glm::quat_identity(),
            scale: glm::vec3(1.0, 1.0, 1.0),
        }
    }

    pub fn from_translation(translation: glm::Vec3) -> Self {
        Self {
            translation,
            ..Self::identity()
        }
    }

    pub fn apply(&self, point: &glm::Vec3) -> glm::Vec3 {
        let r = quaternion_to_matrix(&self.rotation);
        self.translation + r * point.component_mul(&self.scale)
    }

    pub fn to_matrix(&self) -> glm::Mat4 {
        let r = quaternion_to_matrix(&self.rotation);
        let mut m = glm::Mat4::identity();
        for col in 0..3 {
            let axis = r.column(col) * self.scale[col];
            m[(0, col)] = axis[0];
            m[(1, col)] = axis[1];
            m[(2, col)] = axis[2];
        }
        m[(0, 3)] = self.translation.x;
        m[(1, 3)] = self.translation.y;
        m[(2, 3)] = self.translation.z;
        m
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Triangle index buffer; width picked by vertex count so small meshes stay
/// at 16 bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeshIndices {
    U16(Vec<u16>),
    U32(Vec<u32>),
}

impl MeshIndices {
    /// Wraps flat triangle indices, narrowing to u16 whenever every index
    /// can fit (vertex count at most 65,535).
    pub fn pack(indices: Vec<u32>, vertex_count: usize) -> Self {
        if vertex_count > u16::MAX as usize {
            MeshIndices::U32(indices)
        } else {
            MeshIndices::U16(indices.into_iter().map(|i| i as u16).collect())
        }
    }

    pub fn len(&self) -> usize {
        match self {
            MeshIndices::U16(v) => v.len(),
            MeshIndices::U32(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn triangle_count(&self) -> usize {
        self.len() / 3
    }

    pub fn triangle(&self, i: usize) -> [u32; 3] {
        let base = i * 3;
        match self {
            MeshIndices::U16(v) => [v[base] as u32, v[base + 1] as u32, v[base + 2] as u32],
            MeshIndices::U32(v) => [v[base], v[base + 1], v[base + 2]],
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            MeshIndices::U16(v) => bytemuck::cast_slice(v),
            MeshIndices::U32(v) => bytemuck::cast_slice(v),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshStyle {
    Filled,
    Wireframe,
}

/// Triangle mesh payload, upload-ready.
#[derive(Debug, Clone)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: MeshIndices,
    /// Per-vertex RGB, present only when supplied and well-formed.
    pub colors: Option<Vec<[f32; 3]>>,
    /// Flat color used when `colors` is absent.
    pub color: [f32; 3],
    pub style: MeshStyle,
    pub double_sided: bool,
}

impl MeshData {
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        self.indices.as_bytes()
    }

    pub fn color_bytes(&self) -> Option<&[u8]> {
        self.colors.as_deref().map(bytemuck::cast_slice)
    }
}

/// Line list payload: every two vertices draw one segment.
#[derive(Debug, Clone)]
pub struct LineData {
    pub vertices: Vec<LineVertex>,
    pub width: f32,
}

impl LineData {
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

#[derive(Debug, Clone)]
pub struct PointData {
    pub vertices: Vec<PointVertex>,
    pub color: [f32; 3],
    pub size: f32,
}

impl PointData {
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// Camera-facing text label; rasterization is the backend's job.
#[derive(Debug, Clone)]
pub struct LabelData {
    pub text: String,
    pub color: [f32; 3],
    pub font_family: String,
    pub font_size: f32,
    /// World-space height of the rendered label.
    pub world_scale: f32,
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    Group,
    Mesh(MeshData),
    Lines(LineData),
    Points(PointData),
    Label(LabelData),
}

/// One node of a frame's scene tree. Each frame root exclusively owns its
/// subtree; no geometry is shared between frames.
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub kind: NodeKind,
    pub transform: Transform,
    /// Visibility group tag; untagged nodes are never hidden by toggles.
    pub group_id: Option<String>,
    pub visible: bool,
    /// World-space point reported on pick instead of the raw hit (cone tips).
    pub focus_anchor: Option<glm::Vec3>,
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            transform: Transform::identity(),
            group_id: None,
            visible: true,
            focus_anchor: None,
            children: Vec::new(),
        }
    }

    pub fn group() -> Self {
        Self::new(NodeKind::Group)
    }
}
