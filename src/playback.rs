//! Frame playback: a wall-clock-driven stepper over the frame sequence.
//!
//! The controller never reads the clock itself; the embedder calls
//! [`PlaybackController::tick`] with a monotonic timestamp in milliseconds
//! and applies the returned frame index when one is committed.

use serde::{Deserialize, Serialize};

pub const DEFAULT_FPS: f32 = 30.0;

/// What happens when playback runs off either end of the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoopMode {
    /// Jump to the opposite end and keep going.
    #[default]
    Wrap,
    /// Reverse direction at each end.
    Pingpong,
    /// Clamp to the end and pause.
    Stop,
}

/// Owns the current frame index and the play/pause state.
///
/// All mutations settle immediately: a speed or loop-mode change applies to
/// the very next commit, and manual navigation while playing re-bases the
/// sequence from the new index.
#[derive(Debug, Clone)]
pub struct PlaybackController {
    frame_count: usize,
    current: usize,
    playing: bool,
    fps: f32,
    loop_mode: LoopMode,
    direction: i64,
    last_commit_ms: Option<f64>,
}

impl PlaybackController {
    pub fn new(frame_count: usize) -> Self {
        Self {
            frame_count,
            current: 0,
            playing: false,
            fps: DEFAULT_FPS,
            loop_mode: LoopMode::default(),
            direction: 1,
            last_commit_ms: None,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }

    pub fn loop_mode(&self) -> LoopMode {
        self.loop_mode
    }

    /// Starts playing forward. The commit phase re-bases on the first tick
    /// after this call. A controller over zero frames never starts.
    pub fn play(&mut self) {
        if self.frame_count == 0 {
            return;
        }
        self.playing = true;
        self.direction = 1;
        self.last_commit_ms = None;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Flips between playing and paused; returns the new playing state.
    pub fn toggle_play(&mut self) -> bool {
        if self.playing {
            self.pause();
        } else {
            self.play();
        }
        self.playing
    }

    /// Frames per second for subsequent commits. Non-finite or non-positive
    /// rates fall back to the default.
    pub fn set_fps(&mut self, fps: f32) {
        self.fps = if fps.is_finite() && fps > 0.0 {
            fps
        } else {
            DEFAULT_FPS
        };
    }

    pub fn set_loop_mode(&mut self, loop_mode: LoopMode) {
        self.loop_mode = loop_mode;
    }

    /// Moves to `index`, clamped into range, without touching the play
    /// state. This is the scrub path: playback keeps running from the new
    /// position.
    pub fn seek(&mut self, index: usize) -> usize {
        self.current = index.min(self.frame_count.saturating_sub(1));
        self.current
    }

    /// Pauses and moves to `index` if it is in range. An out-of-range index
    /// is rejected and leaves the controller untouched, playback included.
    pub fn jump_to(&mut self, index: usize) -> bool {
        if index >= self.frame_count {
            return false;
        }
        self.pause();
        self.current = index;
        true
    }

    pub fn step_forward(&mut self) -> usize {
        self.pause();
        self.seek(self.current.saturating_add(1))
    }

    pub fn step_backward(&mut self) -> usize {
        self.pause();
        self.seek(self.current.saturating_sub(1))
    }

    fn frame_duration_ms(&self) -> f64 {
        1000.0 / self.fps as f64
    }

    /// Advances playback against a monotonic clock.
    ///
    /// Returns the committed frame index when a frame interval has elapsed,
    /// `None` otherwise. The first tick after [`play`](Self::play) only
    /// starts the interval. In [`LoopMode::Stop`], running off the end
    /// commits the boundary frame one last time and pauses.
    pub fn tick(&mut self, now_ms: f64) -> Option<usize> {
        if !self.playing || self.frame_count == 0 {
            return None;
        }

        let last = match self.last_commit_ms {
            Some(last) => last,
            None => {
                self.last_commit_ms = Some(now_ms);
                return None;
            }
        };
        if now_ms - last < self.frame_duration_ms() {
            return None;
        }

        let count = self.frame_count as i64;
        let next = self.current as i64 + self.direction;

        let committed = match self.loop_mode {
            LoopMode::Wrap => {
                if next >= count {
                    0
                } else if next < 0 {
                    count - 1
                } else {
                    next
                }
            }
            LoopMode::Pingpong => {
                if next >= count {
                    self.direction = -1;
                    (count - 2).max(0)
                } else if next < 0 {
                    self.direction = 1;
                    if count > 1 { 1 } else { 0 }
                } else {
                    next
                }
            }
            LoopMode::Stop => {
                if next >= count {
                    self.playing = false;
                    count - 1
                } else if next < 0 {
                    self.playing = false;
                    0
                } else {
                    next
                }
            }
        };

        self.current = committed as usize;
        self.last_commit_ms = Some(now_ms);
        Some(self.current)
    }
}
