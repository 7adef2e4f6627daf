//! Click-to-focus: gesture classification and the camera glide that follows.

use nalgebra_glm as glm;

use super::state::CameraState;

/// Pointer travel below this many pixels between down and up counts as a
/// click; anything at or past it is an orbit drag.
pub const CLICK_THRESHOLD_PX: f32 = 5.0;

pub const FOCUS_DURATION_MS: f64 = 500.0;

/// The four fixed endpoints of one focus move.
///
/// Sampling is a pure function of progress, so the glide can be tested
/// without a clock.
#[derive(Debug, Clone)]
pub struct FocusTransition {
    start_position: glm::Vec3,
    end_position: glm::Vec3,
    start_target: glm::Vec3,
    end_target: glm::Vec3,
}

impl FocusTransition {
    /// Transition that moves the orbit target to `focus_point` while
    /// keeping the camera-to-target offset, so the viewing angle and
    /// distance survive the move.
    pub fn toward(camera: &CameraState, focus_point: glm::Vec3) -> Self {
        let offset = camera.position - camera.target;
        Self {
            start_position: camera.position,
            end_position: focus_point + offset,
            start_target: camera.target,
            end_target: focus_point,
        }
    }

    /// Camera position and target at progress `t`, clamped into [0, 1].
    pub fn sample(&self, t: f32) -> (glm::Vec3, glm::Vec3) {
        let t = t.clamp(0.0, 1.0);
        (
            glm::lerp(&self.start_position, &self.end_position, t),
            glm::lerp(&self.start_target, &self.end_target, t),
        )
    }
}

#[derive(Debug, Clone)]
struct ActiveGlide {
    transition: FocusTransition,
    start_ms: Option<f64>,
}

/// Tracks the press-release gesture and drives an active transition
/// against the embedder's clock.
#[derive(Debug, Clone, Default)]
pub struct FocusController {
    press: Option<(f32, f32)>,
    active: Option<ActiveGlide>,
}

impl FocusController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.press = Some((x, y));
    }

    /// Ends the gesture. Returns the release position when the pointer
    /// stayed within the click threshold, `None` for drags or an unpaired
    /// release.
    pub fn pointer_up(&mut self, x: f32, y: f32) -> Option<(f32, f32)> {
        let (px, py) = self.press.take()?;
        let dx = x - px;
        let dy = y - py;
        if (dx * dx + dy * dy).sqrt() < CLICK_THRESHOLD_PX {
            Some((x, y))
        } else {
            None
        }
    }

    /// Starts a glide; any glide already running is replaced. The clock
    /// phase is taken from the first tick that follows.
    pub fn begin(&mut self, transition: FocusTransition) {
        self.active = Some(ActiveGlide {
            transition,
            start_ms: None,
        });
    }

    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    pub fn cancel(&mut self) {
        self.press = None;
        self.active = None;
    }

    /// Advances the active glide and returns the pose to apply, or `None`
    /// when nothing is running. The tick that reaches full progress returns
    /// the final pose and finishes the glide.
    pub fn tick(&mut self, now_ms: f64) -> Option<(glm::Vec3, glm::Vec3)> {
        let active = self.active.as_mut()?;
        let start = *active.start_ms.get_or_insert(now_ms);
        let t = ((now_ms - start) / FOCUS_DURATION_MS) as f32;
        let pose = active.transition.sample(t);
        if t >= 1.0 {
            self.active = None;
        }
        Some(pose)
    }
}
