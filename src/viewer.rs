//! The viewer facade: one display list in, stateful viewing session out.
//!
//! Owns the per-frame scene trees, the playback controller, the camera and
//! its focus glide, group visibility, and the overlay state. Embedders feed
//! it input events and clock ticks and read back which scene tree to draw.

use crate::camera::{CameraState, FocusController, FocusTransition};
use crate::display_list::{DisplayList, GroupDef};
use crate::error::Diagnostic;
use crate::playback::{LoopMode, PlaybackController};
use crate::scene::{
    FrameScene, GroupVisibility, LineData, NodeKind, SceneNode, apply_visibility, assemble_all,
    derive_groups, geometry::axes_lines, pick_nearest,
};

const DEFAULT_VIEWPORT: (f32, f32) = (1200.0, 800.0);

const AXES_SIZE: f32 = 2.0;

pub struct Viewer {
    display_list: DisplayList,
    scenes: Vec<FrameScene>,
    groups: Vec<GroupDef>,
    visibility: GroupVisibility,
    playback: PlaybackController,
    camera: CameraState,
    focus: FocusController,
    axes: SceneNode,
    show_axes: bool,
    background: [f32; 3],
    annotations_visible: bool,
    viewport: (f32, f32),
    disposed: bool,
}

impl Viewer {
    /// Builds every frame's scene tree up front and starts paused on
    /// `initial_frame`, clamped into range.
    pub fn new(display_list: DisplayList, initial_frame: usize) -> Self {
        let scenes = assemble_all(&display_list);
        let groups = derive_groups(&display_list);
        let mut playback = PlaybackController::new(scenes.len());
        playback.seek(initial_frame);

        Self {
            display_list,
            scenes,
            groups,
            visibility: GroupVisibility::new(),
            playback,
            camera: CameraState::new(),
            focus: FocusController::new(),
            axes: SceneNode::new(NodeKind::Lines(LineData {
                vertices: axes_lines(AXES_SIZE),
                width: 1.0,
            })),
            show_axes: true,
            background: [0.0, 0.0, 0.0],
            annotations_visible: true,
            viewport: DEFAULT_VIEWPORT,
            disposed: false,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.playback.frame_count()
    }

    pub fn current_frame(&self) -> usize {
        self.playback.current()
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_playing()
    }

    pub fn fps(&self) -> f32 {
        self.playback.fps()
    }

    pub fn loop_mode(&self) -> LoopMode {
        self.playback.loop_mode()
    }

    pub fn groups(&self) -> &[GroupDef] {
        &self.groups
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    /// Mutable camera access for the embedder's orbit/pan/zoom controls.
    pub fn camera_mut(&mut self) -> &mut CameraState {
        &mut self.camera
    }

    pub fn background(&self) -> [f32; 3] {
        self.background
    }

    pub fn set_background(&mut self, background: [f32; 3]) {
        if !self.disposed {
            self.background = background;
        }
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if !self.disposed {
            self.viewport = (width, height);
        }
    }

    /// The scene tree the backend should draw right now, if any.
    pub fn attached_root(&self) -> Option<&SceneNode> {
        if self.disposed {
            return None;
        }
        self.scenes.get(self.playback.current()).map(|s| &s.root)
    }

    /// The origin axes gizmo (X red, Y green, Z blue), drawn alongside the
    /// attached frame unless toggled off.
    pub fn axes_root(&self) -> Option<&SceneNode> {
        if self.disposed || !self.show_axes {
            return None;
        }
        Some(&self.axes)
    }

    pub fn axes_visible(&self) -> bool {
        self.show_axes
    }

    pub fn set_axes_visible(&mut self, visible: bool) {
        if !self.disposed {
            self.show_axes = visible;
        }
    }

    /// Findings recorded while building one frame's tree.
    pub fn frame_diagnostics(&self, index: usize) -> &[Diagnostic] {
        self.scenes
            .get(index)
            .map(|s| s.diagnostics.as_slice())
            .unwrap_or(&[])
    }

    fn refresh_attached(&mut self) {
        let index = self.playback.current();
        if let Some(scene) = self.scenes.get_mut(index) {
            apply_visibility(&mut scene.root, &self.visibility);
        }
    }

    /// Shows `index` without touching the play state; this is the scrub
    /// path. Out-of-range indices are rejected.
    pub fn set_frame(&mut self, index: usize) -> bool {
        if self.disposed || index >= self.frame_count() {
            return false;
        }
        self.playback.seek(index);
        self.refresh_attached();
        true
    }

    /// Pauses and shows `index`. Out-of-range indices are rejected and
    /// leave everything untouched, the play state included.
    pub fn jump_to(&mut self, index: usize) -> bool {
        if self.disposed || !self.playback.jump_to(index) {
            return false;
        }
        self.refresh_attached();
        true
    }

    pub fn step_forward(&mut self) -> usize {
        if self.disposed {
            return self.playback.current();
        }
        let index = self.playback.step_forward();
        self.refresh_attached();
        index
    }

    pub fn step_backward(&mut self) -> usize {
        if self.disposed {
            return self.playback.current();
        }
        let index = self.playback.step_backward();
        self.refresh_attached();
        index
    }

    pub fn play(&mut self) {
        if !self.disposed {
            self.playback.play();
        }
    }

    pub fn pause(&mut self) {
        self.playback.pause();
    }

    pub fn toggle_play(&mut self) -> bool {
        if self.disposed {
            return false;
        }
        self.playback.toggle_play()
    }

    pub fn set_fps(&mut self, fps: f32) {
        if !self.disposed {
            self.playback.set_fps(fps);
        }
    }

    pub fn set_loop_mode(&mut self, loop_mode: LoopMode) {
        if !self.disposed {
            self.playback.set_loop_mode(loop_mode);
        }
    }

    /// Advances playback and the focus glide against a monotonic clock in
    /// milliseconds. Returns the frame index committed this tick, if any.
    pub fn tick(&mut self, now_ms: f64) -> Option<usize> {
        if self.disposed {
            return None;
        }

        let committed = self.playback.tick(now_ms);
        if committed.is_some() {
            self.refresh_attached();
        }

        if let Some((position, target)) = self.focus.tick(now_ms) {
            self.camera.position = position;
            self.camera.target = target;
        }

        committed
    }

    /// Toggles a group and pushes the change into every frame's tree, so
    /// frames shown later arrive already filtered.
    pub fn set_group_visibility(&mut self, group_id: &str, visible: bool) {
        if self.disposed {
            return;
        }
        self.visibility.set(group_id, visible);
        for scene in &mut self.scenes {
            apply_visibility(&mut scene.root, &self.visibility);
        }
    }

    pub fn is_group_visible(&self, group_id: &str) -> bool {
        self.visibility.is_visible(group_id)
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        if !self.disposed {
            self.focus.pointer_down(x, y);
        }
    }

    /// Ends a pointer gesture. A click (under the drag threshold) casts a
    /// ray into the attached scene and, on a hit, starts the focus glide
    /// toward the hit's focus point.
    pub fn pointer_up(&mut self, x: f32, y: f32) {
        if self.disposed {
            return;
        }
        let Some((click_x, click_y)) = self.focus.pointer_up(x, y) else {
            return;
        };
        let Some(ray) = self
            .camera
            .screen_ray(click_x, click_y, self.viewport.0, self.viewport.1)
        else {
            return;
        };
        let Some(root) = self.scenes.get(self.playback.current()).map(|s| &s.root) else {
            return;
        };
        if let Some(hit) = pick_nearest(root, &ray) {
            self.focus
                .begin(FocusTransition::toward(&self.camera, hit.focus_point));
        }
    }

    pub fn is_focusing(&self) -> bool {
        self.focus.is_animating()
    }

    pub fn annotations_visible(&self) -> bool {
        self.annotations_visible
    }

    pub fn set_annotations_visible(&mut self, visible: bool) {
        if !self.disposed {
            self.annotations_visible = visible;
        }
    }

    pub fn toggle_annotations(&mut self) -> bool {
        if !self.disposed {
            self.annotations_visible = !self.annotations_visible;
        }
        self.annotations_visible
    }

    /// Overlay counter, zero-based: `Frame: <current> / <last>`.
    pub fn frame_label(&self) -> String {
        format!(
            "Frame: {} / {}",
            self.playback.current(),
            self.frame_count().saturating_sub(1)
        )
    }

    /// The current frame's annotation, exactly as authored, or `None` when
    /// annotations are toggled off, the frame has none, or the text is
    /// blank.
    pub fn annotation_text(&self) -> Option<&str> {
        if !self.annotations_visible {
            return None;
        }
        let frame = self.display_list.frames.get(self.playback.current())?;
        let text = frame.annotation.as_deref()?;
        if text.trim().is_empty() { None } else { Some(text) }
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Shuts the session down: playback and any focus glide are cancelled
    /// and the scene trees are dropped. Safe to call more than once; every
    /// operation afterwards is a no-op.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.playback.pause();
        self.focus.cancel();
        self.scenes.clear();
    }
}
