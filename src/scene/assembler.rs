//! Builds per-frame scene trees from a display list.

use std::collections::BTreeSet;

use crate::display_list::{DisplayList, Frame, GroupDef};
use crate::error::Diagnostic;

use super::builder::build_primitive;
use super::node::SceneNode;

/// One frame's scene tree plus everything that degraded while building it.
#[derive(Debug, Clone)]
pub struct FrameScene {
    pub root: SceneNode,
    pub diagnostics: Vec<Diagnostic>,
}

impl FrameScene {
    pub fn primitive_count(&self) -> usize {
        self.root.children.len()
    }
}

/// Builds the scene tree for one frame. Primitives that cannot produce a
/// node are skipped; every degradation is logged with the frame id and kept
/// on the result.
pub fn assemble_frame(frame: &Frame) -> FrameScene {
    let mut diagnostics = Vec::new();
    let mut root = SceneNode::group();

    for prim in &frame.primitives {
        let before = diagnostics.len();
        let node = build_primitive(prim, &mut diagnostics);
        for diag in &diagnostics[before..] {
            log::warn!("frame {}: {} primitive: {diag}", frame.id, prim.kind_name());
        }
        if let Some(node) = node {
            root.children.push(node);
        }
    }

    FrameScene { root, diagnostics }
}

/// One scene tree per frame, in display-list order.
pub fn assemble_all(list: &DisplayList) -> Vec<FrameScene> {
    list.frames.iter().map(assemble_frame).collect()
}

/// Group definitions for the toggle panel.
///
/// Explicit definitions win when present; otherwise the set of tags used by
/// any primitive in any frame is collected, sorted by id, with the id
/// doubling as the label.
pub fn derive_groups(list: &DisplayList) -> Vec<GroupDef> {
    if !list.groups.is_empty() {
        return list.groups.clone();
    }

    let mut ids = BTreeSet::new();
    for frame in &list.frames {
        for prim in &frame.primitives {
            if let Some(group) = prim.group() {
                ids.insert(group.to_owned());
            }
        }
    }

    ids.into_iter()
        .map(|id| GroupDef {
            label: id.clone(),
            id,
        })
        .collect()
}
