// Scene construction: tessellation, per-frame trees, visibility, picking.

pub mod assembler;
pub mod builder;
pub mod geometry;
pub mod node;
pub mod pick;
pub mod vertex;
pub mod visibility;

pub use assembler::{FrameScene, assemble_all, assemble_frame, derive_groups};
pub use builder::build_primitive;
pub use node::{
    LabelData, LineData, MeshData, MeshIndices, MeshStyle, NodeKind, PointData, SceneNode,
    Transform,
};
pub use pick::{Hit, Ray, pick_nearest};
pub use vertex::{LineVertex, MeshVertex, PointVertex};
pub use visibility::{GroupVisibility, apply_visibility};
