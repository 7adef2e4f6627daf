use serde::{Deserialize, Serialize};

use super::primitive::Primitive;

/// One complete scene in the animation sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub id: i64,
    /// Render/traversal order; not otherwise significant.
    pub primitives: Vec<Primitive>,
    /// Free-text overlay shown while this frame is active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
}

/// A named visibility partition over primitives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDef {
    /// Stable internal key, unique within a display list.
    pub id: String,
    pub label: String,
}

/// Top-level container of groups and frames.
///
/// When `groups` is empty the effective set is derived by scanning primitive
/// tags; see `scene::derive_groups`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DisplayList {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<GroupDef>,
    pub frames: Vec<Frame>,
}

/// One frame reference inside a manifest ("playlist") file.
///
/// Manifests are resolved entirely by external loaders; these types exist so
/// loaders and this crate agree on the vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestFrameEntry {
    pub index: i64,
    pub file: String,
    /// Simulation timestamp in picoseconds, when the producer recorded one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_ps: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<GroupDef>,
    pub frames: Vec<ManifestFrameEntry>,
}
