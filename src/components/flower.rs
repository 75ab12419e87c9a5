//! Flower instance component and its growth state machine.
//!
//! Every flower in the garden is an entity carrying one [`FlowerInstance`].
//! Species are a [`FlowerKind`] discriminator on that single component type
//! rather than one component per species.
//!
//! Lifecycle: `Dormant -> Growing -> Grown`. Grown is terminal. The
//! transition to Grown is a convergence test on scale, after which every
//! animated value snaps to its grown target.

use bevy_ecs::prelude::{Component, Resource};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::easing::{Easing, ease, lerp_f32, lerp_v3, progress};

/// Scale of a flower before it is watered.
pub const RESTING_SCALE: Vec3 = Vec3::new(2.0, 0.7, 2.0);
/// Scale of a fully grown flower.
pub const GROWN_SCALE: Vec3 = Vec3::new(2.0, 2.0, 2.0);
/// How far a flower rises while growing.
pub const GROWN_LIFT: f32 = 1.0;
/// Grown rotation is this multiple of the spawn rotation.
pub const ROTATION_GAIN: f32 = 30.0;
/// Grey that dormant flowers are tinted toward.
pub const DORMANT_GREY: Vec3 = Vec3::splat(85.0 / 255.0);
/// Fraction of the way from the species color to [`DORMANT_GREY`].
pub const DORMANT_TINT: f32 = 0.8;

/// The nine flower species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FlowerKind {
    Daffodil,
    Sunflower,
    Hyacinth,
    Cactus,
    Cosmos,
    Daisy,
    Marigold,
    MorningGlory,
    Tulip,
}

impl FlowerKind {
    pub const ALL: [FlowerKind; 9] = [
        FlowerKind::Daffodil,
        FlowerKind::Sunflower,
        FlowerKind::Hyacinth,
        FlowerKind::Cactus,
        FlowerKind::Cosmos,
        FlowerKind::Daisy,
        FlowerKind::Marigold,
        FlowerKind::MorningGlory,
        FlowerKind::Tulip,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FlowerKind::Daffodil => "Daffodil",
            FlowerKind::Sunflower => "Sunflower",
            FlowerKind::Hyacinth => "Hyacinth",
            FlowerKind::Cactus => "Cactus",
            FlowerKind::Cosmos => "Cosmos",
            FlowerKind::Daisy => "Daisy",
            FlowerKind::Marigold => "Marigold",
            FlowerKind::MorningGlory => "Morning Glory",
            FlowerKind::Tulip => "Tulip",
        }
    }

    /// Flower-language meaning shown on the completion label.
    pub fn meaning(self) -> &'static str {
        match self {
            FlowerKind::Daffodil => "self-love",
            FlowerKind::Sunflower => "adoration",
            FlowerKind::Hyacinth => "sorrow and joy",
            FlowerKind::Cactus => "burning love",
            FlowerKind::Cosmos => "innocence",
            FlowerKind::Daisy => "hope",
            FlowerKind::Marigold => "constant thought",
            FlowerKind::MorningGlory => "fleeting love",
            FlowerKind::Tulip => "declaration of love",
        }
    }

    /// Model key handed to the asset loader.
    pub fn model_key(self) -> &'static str {
        match self {
            FlowerKind::Daffodil => "daffodil",
            FlowerKind::Sunflower => "sunflower",
            FlowerKind::Hyacinth => "hyacinth",
            FlowerKind::Cactus => "cactus",
            FlowerKind::Cosmos => "cosmos",
            FlowerKind::Daisy => "daisy",
            FlowerKind::Marigold => "marigold",
            FlowerKind::MorningGlory => "morningGlory",
            FlowerKind::Tulip => "tulip",
        }
    }

    /// Height of the completion label above the species center.
    pub fn label_offset(self) -> f32 {
        match self {
            FlowerKind::Sunflower => 15.0,
            _ => 5.0,
        }
    }

    /// Full-bloom color in linear RGB.
    pub fn color(self) -> Vec3 {
        match self {
            FlowerKind::Daffodil => Vec3::new(1.0, 0.85, 0.2),
            FlowerKind::Sunflower => Vec3::new(1.0, 0.75, 0.05),
            FlowerKind::Hyacinth => Vec3::new(0.45, 0.35, 0.9),
            FlowerKind::Cactus => Vec3::new(0.3, 0.65, 0.3),
            FlowerKind::Cosmos => Vec3::new(0.95, 0.5, 0.75),
            FlowerKind::Daisy => Vec3::new(0.98, 0.98, 0.95),
            FlowerKind::Marigold => Vec3::new(1.0, 0.55, 0.1),
            FlowerKind::MorningGlory => Vec3::new(0.35, 0.45, 1.0),
            FlowerKind::Tulip => Vec3::new(0.95, 0.2, 0.3),
        }
    }

    /// The species color pulled toward grey for the dormant look.
    pub fn dormant_color(self) -> Vec3 {
        self.color().lerp(DORMANT_GREY, DORMANT_TINT)
    }
}

impl std::fmt::Display for FlowerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FlowerState {
    #[default]
    Dormant,
    Growing,
    Grown,
}

/// Stable flower id, assigned in spawn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FlowerId(pub u32);

/// Growth timing shared by every flower.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct GrowthTiming {
    /// Pause after activation before anything moves, in seconds.
    pub delay: f32,
    /// Length of the resting-to-grown interpolation, in seconds.
    pub duration: f32,
    /// Largest per-axis scale difference still counted as grown.
    pub epsilon: f32,
}

impl Default for GrowthTiming {
    fn default() -> Self {
        Self {
            delay: 0.5,
            duration: 3.0,
            epsilon: 0.01,
        }
    }
}

/// One flower in the garden.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct FlowerInstance {
    pub id: FlowerId,
    pub kind: FlowerKind,
    pub position: Vec3,
    pub resting_position: Vec3,
    pub grown_position: Vec3,
    pub scale: Vec3,
    pub resting_scale: Vec3,
    pub grown_scale: Vec3,
    pub color: Vec3,
    pub base_color: Vec3,
    pub grown_color: Vec3,
    pub rotation_y: f32,
    pub resting_rotation_y: f32,
    pub target_rotation_y: f32,
    /// Sway offset in `[0, 2π)`, fixed for the lifetime of the flower.
    pub phase: f32,
    pub state: FlowerState,
    pub activation_time: Option<f32>,
}

impl FlowerInstance {
    /// A dormant flower standing on the ground at `ground`.
    ///
    /// `rotation_y` is the spawn rotation in radians; the grown rotation
    /// is derived from it.
    pub fn new(id: FlowerId, kind: FlowerKind, ground: Vec3, rotation_y: f32, phase: f32) -> Self {
        let base_color = kind.dormant_color();
        Self {
            id,
            kind,
            position: ground,
            resting_position: ground,
            grown_position: ground + Vec3::Y * GROWN_LIFT,
            scale: RESTING_SCALE,
            resting_scale: RESTING_SCALE,
            grown_scale: GROWN_SCALE,
            color: base_color,
            base_color,
            grown_color: kind.color(),
            rotation_y,
            resting_rotation_y: rotation_y,
            target_rotation_y: rotation_y * ROTATION_GAIN,
            phase,
            state: FlowerState::Dormant,
            activation_time: None,
        }
    }

    /// Eligible for watering.
    pub fn is_dormant(&self) -> bool {
        self.state == FlowerState::Dormant
    }

    pub fn is_grown(&self) -> bool {
        self.state == FlowerState::Grown
    }

    /// Start growing. Returns `false` and changes nothing unless dormant.
    pub fn activate(&mut self, now: f32) -> bool {
        if self.state != FlowerState::Dormant {
            return false;
        }
        self.state = FlowerState::Growing;
        self.activation_time = Some(now);
        true
    }

    /// Normalized growth progress at `now`.
    ///
    /// Zero until `delay` has passed since activation, one once
    /// `delay + duration` has passed. Dormant flowers report zero and grown
    /// flowers one.
    pub fn growth_progress(&self, now: f32, timing: &GrowthTiming) -> f32 {
        match (self.state, self.activation_time) {
            (FlowerState::Grown, _) => 1.0,
            (_, Some(start)) => progress(now - start - timing.delay, timing.duration),
            (_, None) => 0.0,
        }
    }

    /// Advance a growing flower to `now`.
    ///
    /// Returns `true` on the tick the flower becomes grown.
    pub fn advance(&mut self, now: f32, timing: &GrowthTiming) -> bool {
        if self.state != FlowerState::Growing {
            return false;
        }
        let t = ease(Easing::Linear, self.growth_progress(now, timing));
        self.scale = lerp_v3(self.resting_scale, self.grown_scale, t);
        self.position = lerp_v3(self.resting_position, self.grown_position, t);
        self.color = lerp_v3(self.base_color, self.grown_color, t);
        self.rotation_y = if t >= 1.0 {
            self.target_rotation_y
        } else {
            lerp_f32(self.resting_rotation_y, self.target_rotation_y, t)
        };

        if t >= 1.0 || (self.scale - self.grown_scale).abs().max_element() <= timing.epsilon {
            self.scale = self.grown_scale;
            self.position = self.grown_position;
            self.color = self.grown_color;
            self.rotation_y = self.target_rotation_y;
            self.state = FlowerState::Grown;
            return true;
        }
        false
    }

    /// Distance to `point` on the XZ plane.
    pub fn horizontal_distance(&self, point: Vec3) -> f32 {
        let dx = self.position.x - point.x;
        let dz = self.position.z - point.z;
        (dx * dx + dz * dz).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn tulip() -> FlowerInstance {
        FlowerInstance::new(FlowerId(0), FlowerKind::Tulip, Vec3::new(1.0, 2.0, 3.0), 0.1, 0.5)
    }

    fn within(value: Vec3, a: Vec3, b: Vec3) -> bool {
        let lo = a.min(b) - Vec3::splat(EPSILON);
        let hi = a.max(b) + Vec3::splat(EPSILON);
        value.cmpge(lo).all() && value.cmple(hi).all()
    }

    #[test]
    fn test_new_flower_is_dormant_at_rest() {
        let f = tulip();
        assert_eq!(f.state, FlowerState::Dormant);
        assert!(f.activation_time.is_none());
        assert_eq!(f.scale, RESTING_SCALE);
        assert_eq!(f.grown_position, Vec3::new(1.0, 3.0, 3.0));
        assert!(approx_eq(f.target_rotation_y, 3.0));
        assert_eq!(f.color, FlowerKind::Tulip.dormant_color());
    }

    #[test]
    fn test_activate_only_once() {
        let mut f = tulip();
        assert!(f.activate(1.0));
        assert_eq!(f.state, FlowerState::Growing);
        assert!(!f.activate(2.0));
        assert_eq!(f.activation_time, Some(1.0));
    }

    #[test]
    fn test_progress_pauses_for_delay() {
        let timing = GrowthTiming::default();
        let mut f = tulip();
        f.activate(0.0);
        assert_eq!(f.growth_progress(0.25, &timing), 0.0);
        assert_eq!(f.growth_progress(0.5, &timing), 0.0);
        assert!(approx_eq(f.growth_progress(2.0, &timing), 0.5));
        assert_eq!(f.growth_progress(3.5, &timing), 1.0);
        assert_eq!(f.growth_progress(10.0, &timing), 1.0);
    }

    #[test]
    fn test_advance_during_delay_keeps_resting_values() {
        let timing = GrowthTiming::default();
        let mut f = tulip();
        let rest = f.clone();
        f.activate(0.0);
        assert!(!f.advance(0.5, &timing));
        assert_eq!(f.scale, rest.scale);
        assert_eq!(f.position, rest.position);
        assert_eq!(f.color, rest.color);
    }

    #[test]
    fn test_advance_never_overshoots() {
        let timing = GrowthTiming::default();
        let mut f = tulip();
        f.activate(0.0);
        let mut now = 0.0;
        while now <= 4.0 {
            f.advance(now, &timing);
            assert!(within(f.scale, f.resting_scale, f.grown_scale), "scale at {}", now);
            assert!(within(f.position, f.resting_position, f.grown_position));
            assert!(within(f.color, f.base_color, f.grown_color));
            now += 1.0 / 60.0;
        }
        assert!(f.is_grown());
    }

    #[test]
    fn test_grown_declared_by_convergence_and_snaps() {
        let timing = GrowthTiming::default();
        let mut f = tulip();
        f.activate(0.0);
        // Scale y gap is 1.3, so t must exceed 1 - 0.01/1.3 before convergence.
        assert!(!f.advance(3.4, &timing));
        assert_eq!(f.state, FlowerState::Growing);
        assert!(f.advance(3.499, &timing));
        assert_eq!(f.state, FlowerState::Grown);
        assert_eq!(f.scale, f.grown_scale);
        assert_eq!(f.position, f.grown_position);
        assert_eq!(f.color, f.grown_color);
        assert_eq!(f.rotation_y, f.target_rotation_y);
    }

    #[test]
    fn test_zero_epsilon_still_finishes_at_full_progress() {
        let timing = GrowthTiming {
            epsilon: 0.0,
            ..GrowthTiming::default()
        };
        let mut f = tulip();
        f.activate(0.0);
        assert!(!f.advance(3.0, &timing));
        assert!(f.advance(10.0, &timing));
        assert_eq!(f.state, FlowerState::Grown);
        assert_eq!(f.scale, f.grown_scale);
    }

    #[test]
    fn test_grown_is_terminal() {
        let timing = GrowthTiming::default();
        let mut f = tulip();
        f.activate(0.0);
        f.advance(3.5, &timing);
        let grown = f.clone();
        assert!(!f.activate(10.0));
        assert!(!f.advance(20.0, &timing));
        assert_eq!(f, grown);
    }

    #[test]
    fn test_dormant_does_not_advance() {
        let timing = GrowthTiming::default();
        let mut f = tulip();
        let before = f.clone();
        assert!(!f.advance(100.0, &timing));
        assert_eq!(f, before);
    }

    #[test]
    fn test_horizontal_distance_ignores_height() {
        let f = tulip();
        assert!(approx_eq(f.horizontal_distance(Vec3::new(4.0, 500.0, 7.0)), 5.0));
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(FlowerKind::Sunflower.label_offset(), 15.0);
        assert_eq!(FlowerKind::Tulip.label_offset(), 5.0);
        assert_eq!(FlowerKind::MorningGlory.model_key(), "morningGlory");
        assert_eq!(FlowerKind::ALL.len(), 9);
    }
}
