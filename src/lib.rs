//! Core of a display-list viewer: a sequence of declaratively described 3D
//! frames is turned into renderable scene trees, played back as an
//! animation, filtered by named visibility groups, and focused by pointer
//! clicks.
//!
//! The crate is backend-agnostic. It emits scene nodes with upload-ready
//! vertex and index buffers and consumes input events and clock ticks;
//! rasterization and window plumbing belong to the embedder. [`Viewer`] is
//! the session facade most embedders want.

pub mod camera;
pub mod display_list;
pub mod error;
pub mod playback;
pub mod scene;
pub mod settings;
pub mod viewer;

pub use error::Diagnostic;
pub use playback::{LoopMode, PlaybackController};
pub use viewer::Viewer;

/// Application name under which settings files are stored.
pub const CONFY_APP_NAME: &str = "dlvis";
