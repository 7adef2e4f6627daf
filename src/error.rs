use thiserror::Error;

/// Non-fatal data-quality findings raised while building geometry.
///
/// The builder never fails on bad primitive data; it degrades (drops a
/// triangle, ignores an attribute, skips a primitive) and records what
/// happened here. Structural errors in the outer display-list value are the
/// loader's problem and never reach this type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    #[error("polygon {polygon} has {size} vertices, need at least 3; skipped")]
    DegeneratePolygon { polygon: usize, size: usize },

    #[error(
        "vertex color array has {len} values, expected {rgb} (RGB) or {rgba} (RGBA); colors ignored"
    )]
    VertexColorLength { len: usize, rgb: usize, rgba: usize },

    #[error("polygon index {index} is out of range for {vertex_count} vertices; triangle dropped")]
    IndexOutOfRange { index: u32, vertex_count: usize },

    #[error("polygon sizes need {needed} indices but only {available} are present; rest dropped")]
    PolygonIndexUnderrun { needed: usize, available: usize },

    #[error("vertex array length {len} is not a multiple of 3; trailing values ignored")]
    RaggedVertexArray { len: usize },

    #[error("segment array length {len} is not a multiple of 6; trailing values ignored")]
    RaggedSegmentArray { len: usize },

    #[error("point array length {len} is not a multiple of 3; trailing values ignored")]
    RaggedPointArray { len: usize },

    #[error("cylinder start and end coincide; primitive dropped")]
    ZeroLengthCylinder,
}
