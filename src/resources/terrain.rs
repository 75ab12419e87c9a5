//! Terrain description loaded from JSON.
//!
//! The scene exporter writes every static mesh as a named triangle list. At
//! load time each mesh is classified by name:
//!
//! - names starting with `Ground` become ground surfaces for height probes
//! - names (or parent names) containing `rock` or `fence`, case-insensitive,
//!   become obstacle boxes
//! - everything else is decoration and ignored by the simulation
//!
//! # JSON Format
//!
//! ```json
//! {
//!   "bounds": { "min_x": -80.0, "max_x": 80.0, "min_z": -70.0, "max_z": 60.0 },
//!   "meshes": [
//!     {
//!       "name": "Ground_Main",
//!       "vertices": [[-80, 0, -70], [80, 0, -70], [80, 0, 60]],
//!       "indices": [[0, 1, 2]]
//!     },
//!     { "name": "Rock_01", "parent": "Rocks", "vertices": [...], "indices": [...] }
//!   ]
//! }
//! ```

use glam::Vec3;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{self, GardenError, Result};
use crate::resources::spatial::{Aabb, Bounds, GroundMesh, Obstacle, SpatialResolver, Triangle};

const GROUND_PREFIX: &str = "Ground";
const OBSTACLE_MARKERS: [&str; 2] = ["rock", "fence"];

/// How the resolver treats a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshRole {
    Ground,
    Obstacle,
    Decoration,
}

/// One exported mesh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshDescription {
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
    pub vertices: Vec<[f32; 3]>,
    pub indices: Vec<[u32; 3]>,
}

impl MeshDescription {
    pub fn role(&self) -> MeshRole {
        if self.name.starts_with(GROUND_PREFIX) {
            return MeshRole::Ground;
        }
        let marked = |s: &str| {
            let lower = s.to_lowercase();
            OBSTACLE_MARKERS.iter().any(|m| lower.contains(m))
        };
        if marked(&self.name) || self.parent.as_deref().is_some_and(marked) {
            MeshRole::Obstacle
        } else {
            MeshRole::Decoration
        }
    }

    fn vertex(&self, index: u32) -> Result<Vec3> {
        self.vertices
            .get(index as usize)
            .map(|v| Vec3::from_array(*v))
            .ok_or_else(|| {
                GardenError::Terrain(format!(
                    "mesh '{}' references vertex {} but has {}",
                    self.name,
                    index,
                    self.vertices.len()
                ))
            })
    }

    fn triangles(&self) -> Result<Vec<Triangle>> {
        self.indices
            .iter()
            .map(|[a, b, c]| Ok(Triangle::new(self.vertex(*a)?, self.vertex(*b)?, self.vertex(*c)?)))
            .collect()
    }

    fn aabb(&self) -> Option<Aabb> {
        let points: Vec<Vec3> = self.vertices.iter().map(|v| Vec3::from_array(*v)).collect();
        Aabb::enclosing(&points)
    }
}

/// Static scene geometry as exported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainDescription {
    pub bounds: Bounds,
    #[serde(default)]
    pub meshes: Vec<MeshDescription>,
}

impl TerrainDescription {
    /// Load a terrain description from a JSON file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = error::read_to_string(path)?;
        error::parse_json(path, &text)
    }

    /// Classify meshes and bake them into a [`SpatialResolver`].
    ///
    /// Fails if no ground mesh is present or an index points past the
    /// vertex list.
    pub fn build_resolver(&self) -> Result<SpatialResolver> {
        let mut ground = Vec::new();
        let mut obstacles = Vec::new();

        for mesh in &self.meshes {
            match mesh.role() {
                MeshRole::Ground => ground.push(GroundMesh::new(&mesh.name, mesh.triangles()?)),
                MeshRole::Obstacle => match mesh.aabb() {
                    Some(aabb) => obstacles.push(Obstacle {
                        name: mesh.name.clone(),
                        aabb,
                    }),
                    None => warn!("obstacle mesh '{}' has no vertices, skipped", mesh.name),
                },
                MeshRole::Decoration => debug!("mesh '{}' ignored", mesh.name),
            }
        }

        if ground.is_empty() {
            return Err(GardenError::Terrain("no ground mesh found".into()));
        }

        info!(
            "Terrain baked: {} ground meshes, {} obstacles",
            ground.len(),
            obstacles.len()
        );
        Ok(SpatialResolver::new(
            Bounds::new(
                self.bounds.min_x,
                self.bounds.max_x,
                self.bounds.min_z,
                self.bounds.max_z,
            ),
            ground,
            obstacles,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mesh(name: &str, parent: Option<&str>) -> MeshDescription {
        MeshDescription {
            name: name.into(),
            parent: parent.map(str::to_string),
            vertices: vec![[0.0, 0.0, 0.0], [4.0, 0.0, 0.0], [0.0, 0.0, 4.0]],
            indices: vec![[0, 1, 2]],
        }
    }

    #[test]
    fn test_mesh_roles() {
        assert_eq!(mesh("Ground_Main", None).role(), MeshRole::Ground);
        assert_eq!(mesh("Rock_03", None).role(), MeshRole::Obstacle);
        assert_eq!(mesh("BigROCK", None).role(), MeshRole::Obstacle);
        assert_eq!(mesh("Cube.012", Some("Fence_North")).role(), MeshRole::Obstacle);
        assert_eq!(mesh("Field_Tree", None).role(), MeshRole::Decoration);
        // Prefix match is case-sensitive for ground.
        assert_eq!(mesh("ground_lower", None).role(), MeshRole::Decoration);
    }

    #[test]
    fn test_build_resolver_from_json() {
        let json = r#"{
            "bounds": { "min_x": -10.0, "max_x": 10.0, "min_z": -10.0, "max_z": 10.0 },
            "meshes": [
                { "name": "Ground_A",
                  "vertices": [[-10, 2, -10], [10, 2, -10], [10, 2, 10], [-10, 2, 10]],
                  "indices": [[0, 1, 2], [0, 2, 3]] },
                { "name": "Rock_1",
                  "vertices": [[1, 0, 1], [3, 4, 3]],
                  "indices": [] },
                { "name": "Field_Tree",
                  "vertices": [[0, 0, 0]],
                  "indices": [] }
            ]
        }"#;
        let terrain: TerrainDescription = serde_json::from_str(json).unwrap();
        let resolver = terrain.build_resolver().unwrap();
        assert_eq!(resolver.ground_meshes().len(), 1);
        assert_eq!(resolver.obstacles().len(), 1);
        assert_eq!(resolver.sample_ground_height(0.0, 0.0), Some(2.0));
        assert!(resolver.collides_with_obstacle(Vec3::new(2.0, 1.0, 2.0), Vec3::ONE));
    }

    #[test]
    fn test_build_resolver_requires_ground() {
        let terrain = TerrainDescription {
            bounds: Bounds::new(-1.0, 1.0, -1.0, 1.0),
            meshes: vec![mesh("Rock", None)],
        };
        assert!(matches!(
            terrain.build_resolver(),
            Err(GardenError::Terrain(_))
        ));
    }

    #[test]
    fn test_build_resolver_rejects_bad_index() {
        let mut bad = mesh("Ground_Bad", None);
        bad.indices = vec![[0, 1, 7]];
        let terrain = TerrainDescription {
            bounds: Bounds::new(-1.0, 1.0, -1.0, 1.0),
            meshes: vec![bad],
        };
        assert!(terrain.build_resolver().is_err());
    }
}
