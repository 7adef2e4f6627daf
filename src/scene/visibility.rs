//! Group visibility toggles.

use std::collections::HashMap;

use super::node::SceneNode;

/// Per-group visibility flags. Groups that were never toggled count as
/// visible.
#[derive(Debug, Clone, Default)]
pub struct GroupVisibility {
    flags: HashMap<String, bool>,
}

impl GroupVisibility {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, group_id: &str, visible: bool) {
        self.flags.insert(group_id.to_owned(), visible);
    }

    pub fn is_visible(&self, group_id: &str) -> bool {
        self.flags.get(group_id).copied().unwrap_or(true)
    }
}

/// Applies the flags to a whole subtree.
///
/// Tagged nodes take their group's flag, shown or hidden alike; untagged
/// nodes are left untouched. The walk always descends so tags below an
/// untagged parent keep working.
pub fn apply_visibility(node: &mut SceneNode, visibility: &GroupVisibility) {
    if let Some(group_id) = &node.group_id {
        node.visible = visibility.is_visible(group_id);
    }
    for child in &mut node.children {
        apply_visibility(child, visibility);
    }
}
