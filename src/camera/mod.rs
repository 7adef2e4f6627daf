// Camera pose, projection, and click-to-focus behavior.

pub mod focus;
pub mod state;

pub use focus::{CLICK_THRESHOLD_PX, FOCUS_DURATION_MS, FocusController, FocusTransition};
pub use state::CameraState;
