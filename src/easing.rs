//! Easing curves and interpolation helpers.
//!
//! Shared by the camera zoom ([`Easing::QuadInOut`]) and the flower growth
//! interpolation ([`Easing::Linear`]). All curves map `[0, 1]` onto `[0, 1]`
//! with `ease(e, 0) == 0` and `ease(e, 1) == 1`, so an eased value never
//! overshoots its endpoints.

use glam::Vec3;

/// Easing functions for smooth interpolation.
///
/// These functions transform a linear `t` value (0.0 to 1.0) to create
/// different acceleration/deceleration curves.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant speed (no easing).
    #[default]
    Linear,
    /// Starts slow, accelerates (quadratic).
    QuadIn,
    /// Starts fast, decelerates (quadratic).
    QuadOut,
    /// Slow start and end (quadratic).
    QuadInOut,
    /// Slow start and end (cubic).
    CubicInOut,
}

/// Apply an easing function to a normalized time value.
///
/// The input `t` is clamped to [0.0, 1.0] and transformed according to the
/// easing curve.
pub fn ease(e: Easing, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    match e {
        Easing::Linear => t,
        Easing::QuadIn => t * t,
        Easing::QuadOut => t * (2.0 - t),
        Easing::QuadInOut => {
            if t < 0.5 {
                2.0 * t * t
            } else {
                let p = -2.0 * t + 2.0;
                1.0 - p * p / 2.0
            }
        }
        Easing::CubicInOut => {
            if t < 0.5 {
                4.0 * t * t * t
            } else {
                let p = 2.0 * t - 2.0;
                0.5 * p * p * p + 1.0
            }
        }
    }
}

/// Linearly interpolate between two floats.
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linearly interpolate between two vectors, returning `b` exactly at `t == 1`.
///
/// `Vec3::lerp` computes `a + (b - a) * t`, which can miss `b` by an ulp;
/// callers that compare against the endpoint rely on the exact value.
pub fn lerp_v3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    if t >= 1.0 { b } else { a + (b - a) * t }
}

/// Normalized progress of `elapsed` through `duration`, clamped to `[0, 1]`.
///
/// A non-positive duration is treated as already finished.
pub fn progress(elapsed: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        return 1.0;
    }
    (elapsed / duration).clamp(0.0, 1.0)
}
