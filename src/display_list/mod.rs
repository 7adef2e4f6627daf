// Declarative data model: primitives, frames, groups, and the display list
// container, plus the manifest vocabulary shared with external loaders.

pub mod demo;
pub mod frame;
pub mod primitive;

pub use demo::demo_display_list;
pub use frame::{DisplayList, Frame, GroupDef, Manifest, ManifestFrameEntry};
pub use primitive::{Color, Primitive};
