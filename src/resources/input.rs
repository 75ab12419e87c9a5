//! Per-frame input resource.
//!
//! Raw device capture lives outside the crate. An adapter (the windowed
//! front end, the headless autopilot or a test) writes key presses, pointer
//! clicks resolved against the terrain, and the camera-drag flag into
//! [`InputState`]. The input systems then turn that into player intents.
//!
//! Defaults use WASD for primary movement and arrow keys for secondary
//! directions. Space waters, Enter grows every flower (debug).
use bevy_ecs::prelude::*;
use glam::Vec3;
use rustc_hash::FxHashSet;

/// Keys the garden reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    Up,
    Down,
    Left,
    Right,
    Space,
    Enter,
    Null,
}

#[derive(Debug, Clone, Copy)]
/// Boolean key state with an associated keyboard binding.
pub struct BoolState {
    /// Whether the key is currently active/pressed this frame.
    pub active: bool,
    /// Whether the key was just pressed this frame.
    pub just_pressed: bool,
    /// Whether the key was just released this frame.
    pub just_released: bool,

    /// The key bound to this action.
    pub key_binding: Key,
}

impl BoolState {
    fn bound(key: Key) -> Self {
        Self {
            key_binding: key,
            ..Self::default()
        }
    }

    /// Refresh from the held key set, deriving the edge flags.
    fn refresh(&mut self, held: &FxHashSet<Key>) {
        let now = held.contains(&self.key_binding);
        self.just_pressed = now && !self.active;
        self.just_released = !now && self.active;
        self.active = now;
    }
}

impl Default for BoolState {
    fn default() -> Self {
        Self {
            active: false,
            just_pressed: false,
            just_released: false,
            key_binding: Key::Null,
        }
    }
}

/// Resource capturing the per-frame input state relevant to gameplay.
#[derive(Resource, Debug, Clone)]
pub struct InputState {
    pub maindirection_up: BoolState,
    pub maindirection_left: BoolState,
    pub maindirection_down: BoolState,
    pub maindirection_right: BoolState,
    // Arrow keys
    pub secondarydirection_up: BoolState,
    pub secondarydirection_down: BoolState,
    pub secondarydirection_left: BoolState,
    pub secondarydirection_right: BoolState,
    // Actions
    pub action_water: BoolState,
    pub action_grow_all: BoolState,
    /// Keys currently held, as written by the adapter.
    pub held: FxHashSet<Key>,
    /// Pointer click this frame, already resolved to a world position.
    pub pointer_click: Option<Vec3>,
    /// The user started dragging the camera this frame.
    pub camera_drag_started: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            maindirection_up: BoolState::bound(Key::W),
            maindirection_left: BoolState::bound(Key::A),
            maindirection_down: BoolState::bound(Key::S),
            maindirection_right: BoolState::bound(Key::D),
            secondarydirection_up: BoolState::bound(Key::Up),
            secondarydirection_down: BoolState::bound(Key::Down),
            secondarydirection_left: BoolState::bound(Key::Left),
            secondarydirection_right: BoolState::bound(Key::Right),
            action_water: BoolState::bound(Key::Space),
            action_grow_all: BoolState::bound(Key::Enter),
            held: FxHashSet::default(),
            pointer_click: None,
            camera_drag_started: false,
        }
    }
}

impl InputState {
    pub fn press(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn click(&mut self, world_position: Vec3) {
        self.pointer_click = Some(world_position);
    }

    /// Recompute every [`BoolState`] from the held key set.
    pub fn refresh(&mut self) {
        let held = &self.held;
        for state in [
            &mut self.maindirection_up,
            &mut self.maindirection_left,
            &mut self.maindirection_down,
            &mut self.maindirection_right,
            &mut self.secondarydirection_up,
            &mut self.secondarydirection_down,
            &mut self.secondarydirection_left,
            &mut self.secondarydirection_right,
            &mut self.action_water,
            &mut self.action_grow_all,
        ] {
            state.refresh(held);
        }
    }

    /// Combined direction of the held movement keys on the XZ plane.
    ///
    /// Up is -Z (away from the default camera). Opposing keys cancel, which
    /// yields a zero vector.
    pub fn movement_direction(&self) -> Vec3 {
        let up = self.maindirection_up.active || self.secondarydirection_up.active;
        let down = self.maindirection_down.active || self.secondarydirection_down.active;
        let left = self.maindirection_left.active || self.secondarydirection_left.active;
        let right = self.maindirection_right.active || self.secondarydirection_right.active;
        let axis = |neg: bool, pos: bool| (pos as i32 - neg as i32) as f32;
        Vec3::new(axis(left, right), 0.0, axis(up, down))
    }

    /// Drop one-shot inputs once the frame has consumed them.
    pub fn end_frame(&mut self) {
        self.pointer_click = None;
        self.camera_drag_started = false;
    }
}
