//! Spatial queries over the static garden geometry.
//!
//! [`SpatialResolver`] owns the immutable collision data baked once at scene
//! load: the rectangular play bounds, the ground surface triangles used for
//! height sampling, and the obstacle boxes used for movement rejection.
//! Every query is pure; nothing here mutates after construction.
//!
//! Build one from a [`TerrainDescription`](crate::resources::terrain::TerrainDescription)
//! or directly with [`SpatialResolver::new`] in tests.

use bevy_ecs::prelude::Resource;
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Default height the ground probe starts from.
pub const DEFAULT_PROBE_HEIGHT: f32 = 100.0;

/// Tolerance on barycentric coordinates so points on a shared edge between
/// two triangles hit at least one of them.
const EDGE_TOLERANCE: f32 = 1e-5;

/// Inclusive rectangle on the XZ plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl Bounds {
    /// Build bounds, swapping min/max per axis if they were given reversed.
    pub fn new(min_x: f32, max_x: f32, min_z: f32, max_z: f32) -> Self {
        Self {
            min_x: min_x.min(max_x),
            max_x: min_x.max(max_x),
            min_z: min_z.min(max_z),
            max_z: min_z.max(max_z),
        }
    }

    pub fn contains(&self, position: Vec3) -> bool {
        position.x >= self.min_x
            && position.x <= self.max_x
            && position.z >= self.min_z
            && position.z <= self.max_z
    }

    /// Per-axis clamp on X and Z. Y is passed through untouched.
    pub fn clamp(&self, position: Vec3) -> Vec3 {
        Vec3::new(
            position.x.clamp(self.min_x, self.max_x),
            position.y,
            position.z.clamp(self.min_z, self.max_z),
        )
    }
}

/// Axis-aligned bounding box in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Build a box from two corners in any order.
    pub fn from_corners(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Box of `size` centered on `center`. Negative sizes are normalized.
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size.abs() * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Smallest box enclosing every point, or `None` for an empty slice.
    pub fn enclosing(points: &[Vec3]) -> Option<Self> {
        let first = *points.first()?;
        Some(points.iter().fold(
            Self {
                min: first,
                max: first,
            },
            |acc, p| Self {
                min: acc.min.min(*p),
                max: acc.max.max(*p),
            },
        ))
    }

    /// Strict overlap test; boxes that only touch do not intersect.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }

    /// Whether the vertical line through (x, z) passes through the box footprint.
    pub fn contains_xz(&self, x: f32, z: f32) -> bool {
        x >= self.min.x && x <= self.max.x && z >= self.min.z && z <= self.max.z
    }
}

/// A ground triangle in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub a: Vec3,
    pub b: Vec3,
    pub c: Vec3,
}

impl Triangle {
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self { a, b, c }
    }

    /// Height where a vertical line through (x, z) crosses this triangle.
    ///
    /// Uses barycentric coordinates on the XZ projection. Triangles that are
    /// degenerate in XZ (vertical walls, slivers) never report a hit.
    pub fn height_at(&self, x: f32, z: f32) -> Option<f32> {
        let a = Vec2::new(self.a.x, self.a.z);
        let b = Vec2::new(self.b.x, self.b.z);
        let c = Vec2::new(self.c.x, self.c.z);
        let p = Vec2::new(x, z);

        let v0 = b - a;
        let v1 = c - a;
        let v2 = p - a;
        let denom = v0.perp_dot(v1);
        if denom.abs() < f32::EPSILON {
            return None;
        }
        let v = v2.perp_dot(v1) / denom;
        let w = v0.perp_dot(v2) / denom;
        let u = 1.0 - v - w;
        if u < -EDGE_TOLERANCE || v < -EDGE_TOLERANCE || w < -EDGE_TOLERANCE {
            return None;
        }
        Some(u * self.a.y + v * self.b.y + w * self.c.y)
    }
}

/// A ground surface: a named triangle soup with a cached bounding box.
#[derive(Debug, Clone)]
pub struct GroundMesh {
    pub name: String,
    pub triangles: Vec<Triangle>,
    pub bounds: Option<Aabb>,
}

impl GroundMesh {
    pub fn new(name: impl Into<String>, triangles: Vec<Triangle>) -> Self {
        let corners: Vec<Vec3> = triangles.iter().flat_map(|t| [t.a, t.b, t.c]).collect();
        Self {
            name: name.into(),
            bounds: Aabb::enclosing(&corners),
            triangles,
        }
    }

    /// Highest hit at or below `origin_y` along the vertical through (x, z).
    pub fn highest_hit(&self, x: f32, z: f32, origin_y: f32) -> Option<f32> {
        let bounds = self.bounds?;
        if !bounds.contains_xz(x, z) || bounds.min.y > origin_y {
            return None;
        }
        self.triangles
            .iter()
            .filter_map(|t| t.height_at(x, z))
            .filter(|h| *h <= origin_y)
            .reduce(f32::max)
    }
}

/// A static obstacle box tagged with its source mesh name.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub name: String,
    pub aabb: Aabb,
}

/// Immutable collision geometry and the queries the simulation runs on it.
#[derive(Resource, Debug, Clone)]
pub struct SpatialResolver {
    bounds: Bounds,
    ground: Vec<GroundMesh>,
    obstacles: Vec<Obstacle>,
    probe_height: f32,
}

impl SpatialResolver {
    pub fn new(bounds: Bounds, ground: Vec<GroundMesh>, obstacles: Vec<Obstacle>) -> Self {
        Self {
            bounds,
            ground,
            obstacles,
            probe_height: DEFAULT_PROBE_HEIGHT,
        }
    }

    /// Resolver with bounds only: every height probe misses and nothing blocks.
    pub fn open(bounds: Bounds) -> Self {
        Self::new(bounds, Vec::new(), Vec::new())
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn ground_meshes(&self) -> &[GroundMesh] {
        &self.ground
    }

    /// Cast a downward probe from `probe_height` at (x, z).
    ///
    /// Returns the highest ground intersection, or `None` when no ground
    /// surface lies under the point. Callers keep their previous height on
    /// `None`; zero is never assumed.
    pub fn sample_ground_height(&self, x: f32, z: f32) -> Option<f32> {
        if !x.is_finite() || !z.is_finite() {
            return None;
        }
        self.ground
            .iter()
            .filter_map(|mesh| mesh.highest_hit(x, z, self.probe_height))
            .reduce(f32::max)
    }

    /// Inclusive rectangular bounds test on X/Z.
    pub fn is_within_bounds(&self, position: Vec3) -> bool {
        self.bounds.contains(position)
    }

    /// Clamp X and Z independently into the bounds.
    pub fn clamp_to_bounds(&self, position: Vec3) -> Vec3 {
        self.bounds.clamp(position)
    }

    /// Whether a box of `footprint` centered on `position` overlaps any obstacle.
    pub fn collides_with_obstacle(&self, position: Vec3, footprint: Vec3) -> bool {
        let probe = Aabb::from_center_size(position, footprint);
        self.obstacles.iter().any(|o| probe.intersects(&o.aabb))
    }
}
