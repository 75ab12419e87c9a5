//! Player avatar state machine.
//!
//! [`PlayerAvatar`] holds the authoritative "zone" position of the player
//! (the logical location flowers and the camera react to, separate from the
//! avatar model transform) together with the animation mode and the
//! movement/watering interrupt logic.
//!
//! Modes and transitions:
//!
//! | From     | Event                               | To       |
//! |----------|-------------------------------------|----------|
//! | Idle     | move request                        | Walking  |
//! | Walking  | movement stops                      | Idle     |
//! | any      | [`PlayerAvatar::trigger_water`]     | Watering |
//! | Watering | move request (interrupt)            | Walking  |
//! | Watering | deadline passes, no movement input  | Idle     |
//! | Watering | deadline passes, movement input     | Walking  |
//!
//! Watering completion is a deadline on the player clock checked in
//! [`PlayerAvatar::tick`]. Interrupting clears the deadline, so a stale
//! completion can never fire after the player started walking again.

use bevy_ecs::prelude::Resource;
use glam::Vec3;

use crate::resources::spatial::SpatialResolver;

/// Squared length under which a direction is treated as zero.
const MIN_DIRECTION_SQ: f32 = 1e-8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnimationMode {
    #[default]
    Idle,
    Walking,
    Watering,
}

/// Named clips on the avatar model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationClip {
    Idle,
    Walk,
    Water,
}

impl AnimationClip {
    pub fn name(self) -> &'static str {
        match self {
            AnimationClip::Idle => "idle",
            AnimationClip::Walk => "walk",
            AnimationClip::Water => "water",
        }
    }
}

/// A movement request from one of the input adapters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveRequest {
    /// Walk in a straight line to a world point (pointer click).
    Toward(Vec3),
    /// Keep walking in a direction while it is held (keys).
    Direction(Vec3),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerSettings {
    /// Distance covered per tick.
    pub move_speed: f32,
    /// Collision box size centered on the zone position.
    pub footprint: Vec3,
    /// Zone height above the sampled ground.
    pub height_offset: f32,
    /// Length of one watering action, in seconds.
    pub water_duration: f32,
    /// Radius of the zone around the player that watering reaches.
    pub zone_radius: f32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            move_speed: 0.2,
            footprint: Vec3::new(1.0, 2.0, 1.0),
            height_offset: 1.0,
            water_duration: 2.0,
            zone_radius: 10.0,
        }
    }
}

#[derive(Resource, Debug, Clone)]
pub struct PlayerAvatar {
    pub position: Vec3,
    /// Heading in radians, `atan2(x, z)` of the last non-negligible direction.
    pub facing_angle: f32,
    pub mode: AnimationMode,
    pub is_moving: bool,
    pub is_watering: bool,
    /// Player clock value at which the current watering ends.
    pub water_deadline: Option<f32>,
    /// Click destination, already clamped and ground-snapped.
    pub target: Option<Vec3>,
    /// Normalized horizontal direction of held movement keys.
    pub held_direction: Option<Vec3>,
    /// Sum of every `tick` delta.
    pub clock: f32,
    /// Time since the current clip started.
    pub clip_time: f32,
    pub settings: PlayerSettings,
}

impl Default for PlayerAvatar {
    fn default() -> Self {
        Self::new(Vec3::ZERO, PlayerSettings::default())
    }
}

impl PlayerAvatar {
    pub fn new(position: Vec3, settings: PlayerSettings) -> Self {
        Self {
            position,
            facing_angle: 0.0,
            mode: AnimationMode::Idle,
            is_moving: false,
            is_watering: false,
            water_deadline: None,
            target: None,
            held_direction: None,
            clock: 0.0,
            clip_time: 0.0,
            settings,
        }
    }

    /// Clamp the current position into bounds and put it on the ground.
    pub fn place(&mut self, resolver: &SpatialResolver) {
        self.position = resolver.clamp_to_bounds(self.position);
        self.snap_to_ground(resolver);
    }

    pub fn has_movement_input(&self) -> bool {
        self.target.is_some() || self.held_direction.is_some()
    }

    pub fn current_clip(&self) -> AnimationClip {
        match self.mode {
            AnimationMode::Idle => AnimationClip::Idle,
            AnimationMode::Walking => AnimationClip::Walk,
            AnimationMode::Watering => AnimationClip::Water,
        }
    }

    /// Start or redirect movement.
    ///
    /// Any watering in progress is interrupted. A `Toward` target is clamped
    /// into bounds and put on the ground before walking starts. A zero-length
    /// `Direction` is ignored. Returns whether the request was accepted.
    pub fn request_move(&mut self, request: MoveRequest, resolver: &SpatialResolver) -> bool {
        match request {
            MoveRequest::Toward(point) => {
                let clamped = resolver.clamp_to_bounds(point);
                let y = resolver
                    .sample_ground_height(clamped.x, clamped.z)
                    .map(|h| h + self.settings.height_offset)
                    .unwrap_or(self.position.y);
                let target = Vec3::new(clamped.x, y, clamped.z);
                self.interrupt_watering();
                self.set_facing(target - self.position);
                self.target = Some(target);
            }
            MoveRequest::Direction(dir) => {
                let flat = Vec3::new(dir.x, 0.0, dir.z);
                if flat.length_squared() < MIN_DIRECTION_SQ {
                    return false;
                }
                self.interrupt_watering();
                self.target = None;
                self.held_direction = Some(flat.normalize());
                self.set_facing(flat);
            }
        }
        self.is_moving = true;
        self.set_mode(AnimationMode::Walking);
        true
    }

    /// Movement keys were released.
    pub fn release_direction(&mut self) {
        self.held_direction = None;
    }

    /// Drop every pending movement intent.
    pub fn stop_moving(&mut self) {
        self.target = None;
        self.held_direction = None;
        self.is_moving = false;
    }

    /// Latch a watering action.
    ///
    /// No-op returning `false` while already watering. Otherwise faces
    /// `face_toward` when given, abandons any click destination and starts
    /// the watering deadline.
    pub fn trigger_water(&mut self, face_toward: Option<Vec3>) -> bool {
        if self.is_watering {
            return false;
        }
        if let Some(point) = face_toward {
            self.set_facing(point - self.position);
        }
        self.target = None;
        self.is_moving = false;
        self.is_watering = true;
        self.water_deadline = Some(self.clock + self.settings.water_duration);
        self.set_mode(AnimationMode::Watering);
        true
    }

    /// Turn toward `dir` on the horizontal plane. Near-zero vectors are ignored.
    pub fn set_facing(&mut self, dir: Vec3) {
        if dir.x * dir.x + dir.z * dir.z < MIN_DIRECTION_SQ {
            return;
        }
        self.facing_angle = dir.x.atan2(dir.z);
    }

    /// Resolve one tick of movement against the terrain.
    ///
    /// A click target takes precedence over held keys. Steps that leave the
    /// bounds or overlap an obstacle are dropped whole. A blocked click
    /// target is abandoned. No movement happens while watering.
    pub fn step(&mut self, resolver: &SpatialResolver) {
        if !self.is_watering {
            if let Some(target) = self.target {
                self.step_toward(target, resolver);
            } else if let Some(dir) = self.held_direction {
                self.step_direction(dir, resolver);
            }
        }

        self.is_moving = !self.is_watering && self.has_movement_input();
        if !self.is_watering {
            self.set_mode(if self.is_moving {
                AnimationMode::Walking
            } else {
                AnimationMode::Idle
            });
        }
    }

    /// Advance the player clock by the real frame time and resolve the
    /// watering deadline.
    pub fn tick(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        self.clock += dt;
        self.clip_time += dt;

        let expired = self.water_deadline.is_some_and(|d| self.clock >= d);
        if expired {
            self.is_watering = false;
            self.water_deadline = None;
            self.set_mode(if self.has_movement_input() {
                AnimationMode::Walking
            } else {
                AnimationMode::Idle
            });
        }
    }

    fn step_toward(&mut self, target: Vec3, resolver: &SpatialResolver) {
        let offset = Vec3::new(target.x - self.position.x, 0.0, target.z - self.position.z);
        let remaining = offset.length();
        let travel = self.settings.move_speed;

        if remaining <= travel {
            if resolver.collides_with_obstacle(target, self.settings.footprint) {
                self.target = None;
                return;
            }
            self.position = target;
            self.target = None;
            return;
        }

        let mut next = self.position + offset / remaining * travel;
        if let Some(h) = resolver.sample_ground_height(next.x, next.z) {
            next.y = h + self.settings.height_offset;
        }
        if resolver.collides_with_obstacle(next, self.settings.footprint) {
            self.target = None;
            return;
        }
        self.set_facing(offset);
        self.position = next;
    }

    fn step_direction(&mut self, dir: Vec3, resolver: &SpatialResolver) {
        let mut next = self.position + dir * self.settings.move_speed;
        if !resolver.is_within_bounds(next) {
            return;
        }
        if let Some(h) = resolver.sample_ground_height(next.x, next.z) {
            next.y = h + self.settings.height_offset;
        }
        if resolver.collides_with_obstacle(next, self.settings.footprint) {
            return;
        }
        self.position = next;
    }

    fn snap_to_ground(&mut self, resolver: &SpatialResolver) {
        if let Some(h) = resolver.sample_ground_height(self.position.x, self.position.z) {
            self.position.y = h + self.settings.height_offset;
        }
    }

    fn interrupt_watering(&mut self) {
        if self.is_watering {
            self.is_watering = false;
            self.water_deadline = None;
        }
    }

    fn set_mode(&mut self, mode: AnimationMode) {
        if self.mode != mode {
            self.mode = mode;
            self.clip_time = 0.0;
        }
    }
}
