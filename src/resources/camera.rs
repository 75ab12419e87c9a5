//! Camera behavior controller.
//!
//! [`CameraRig`] derives the camera pose from the player position each tick.
//! Exactly one mode writes the position per tick:
//!
//! - `AutoFollow`: slow exponential chase of `player + follow_offset` with a
//!   constant lerp factor, while `look_at` tracks the player exactly.
//! - `ZoomIn` / `ZoomOut`: eased offset animation toward the close-up offset
//!   and back. ZoomIn always hands over to ZoomOut.
//! - `UserControlled`: pose is owned by the external camera controls until the
//!   next player action calls [`CameraRig::resume_follow`].

use bevy_ecs::prelude::Resource;
use glam::{Mat4, Vec3};

use crate::easing::{Easing, ease, lerp_v3, progress};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CameraMode {
    #[default]
    AutoFollow,
    ZoomIn,
    ZoomOut,
    UserControlled,
}

impl CameraMode {
    pub fn is_zooming(self) -> bool {
        matches!(self, CameraMode::ZoomIn | CameraMode::ZoomOut)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    /// Camera offset from the player while following.
    pub follow_offset: Vec3,
    /// Closer offset reached at the end of a zoom-in.
    pub zoom_offset: Vec3,
    /// Per-tick chase factor in follow mode.
    pub follow_lerp: f32,
    /// Length of each zoom leg, in seconds.
    pub zoom_duration: f32,
    pub zoom_easing: Easing,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            follow_offset: Vec3::new(0.0, 30.0, 60.0),
            zoom_offset: Vec3::new(0.0, 25.0, 48.0),
            follow_lerp: 0.05,
            zoom_duration: 1.0,
            zoom_easing: Easing::QuadInOut,
        }
    }
}

#[derive(Resource, Debug, Clone)]
pub struct CameraRig {
    pub position: Vec3,
    pub look_at: Vec3,
    pub mode: CameraMode,
    /// Start time of the current zoom leg. Only set while zooming.
    pub zoom_started: Option<f32>,
    /// Offset the zoom-in leg starts from.
    pub zoom_from: Vec3,
    /// Mode entered when the zoom-out leg completes.
    pub resume_mode: CameraMode,
    pub settings: CameraSettings,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(Vec3::ZERO, CameraSettings::default())
    }
}

impl CameraRig {
    /// Rig resting at the follow offset from `player`.
    pub fn new(player: Vec3, settings: CameraSettings) -> Self {
        Self {
            position: player + settings.follow_offset,
            look_at: player,
            mode: CameraMode::AutoFollow,
            zoom_started: None,
            zoom_from: settings.follow_offset,
            resume_mode: CameraMode::AutoFollow,
            settings,
        }
    }

    /// Current camera offset from the look-at point.
    pub fn offset(&self) -> Vec3 {
        self.position - self.look_at
    }

    /// Restart the zoom-in leg at `now`, abandoning any zoom in progress.
    ///
    /// The leg starts from the current offset so a restart never jumps.
    pub fn trigger_zoom_in(&mut self, now: f32) {
        if !self.mode.is_zooming() {
            self.resume_mode = self.mode;
        }
        self.zoom_from = self.offset();
        self.mode = CameraMode::ZoomIn;
        self.zoom_started = Some(now);
    }

    /// External controls took over the camera.
    ///
    /// While zooming this only changes where the zoom resumes to.
    pub fn begin_user_control(&mut self) {
        if self.mode.is_zooming() {
            self.resume_mode = CameraMode::UserControlled;
        } else {
            self.mode = CameraMode::UserControlled;
        }
    }

    /// A player action re-asserts automatic follow.
    pub fn resume_follow(&mut self) {
        if self.mode.is_zooming() {
            self.resume_mode = CameraMode::AutoFollow;
        } else {
            self.mode = CameraMode::AutoFollow;
        }
    }

    /// Derive this tick's pose from the player position.
    pub fn update(&mut self, player: Vec3, now: f32) {
        match self.mode {
            CameraMode::AutoFollow => {
                let goal = player + self.settings.follow_offset;
                self.position = self.position.lerp(goal, self.settings.follow_lerp);
                self.look_at = player;
            }
            CameraMode::ZoomIn => {
                let start = self.zoom_started.unwrap_or(now);
                let t = progress(now - start, self.settings.zoom_duration);
                let offset = lerp_v3(
                    self.zoom_from,
                    self.settings.zoom_offset,
                    ease(self.settings.zoom_easing, t),
                );
                self.position = player + offset;
                self.look_at = player;
                if t >= 1.0 {
                    self.mode = CameraMode::ZoomOut;
                    self.zoom_started = Some(start + self.settings.zoom_duration.max(0.0));
                }
            }
            CameraMode::ZoomOut => {
                let start = self.zoom_started.unwrap_or(now);
                let t = progress(now - start, self.settings.zoom_duration);
                let offset = lerp_v3(
                    self.settings.zoom_offset,
                    self.settings.follow_offset,
                    ease(self.settings.zoom_easing, t),
                );
                self.position = player + offset;
                self.look_at = player;
                if t >= 1.0 {
                    self.mode = self.resume_mode;
                    self.zoom_started = None;
                }
            }
            CameraMode::UserControlled => {}
        }
    }

    /// View matrix for the external renderer.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.look_at, Vec3::Y)
    }
}
