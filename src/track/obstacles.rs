//! Obstacle placement
//!
//! Obstacles ride on straight tiles only. The first tile of a run is always
//! left clear so the player lands safely after a turn.

use super::events::TrackEvent;
use super::placement::aligned_rotation;
use super::rng::RandomSource;
use super::state::{GenerationState, ObstacleId, ObstacleInstance, TileInstance};
use crate::catalog::{ObstacleSpec, TileType};

/// Probabilistic obstacle placement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstaclePlacer {
    pub probability: f32,
}

impl ObstaclePlacer {
    pub fn new(probability: f32) -> Self {
        Self { probability }
    }

    /// Roll for an obstacle on `tile`
    ///
    /// No draw is made for the first tile of a run, for turn tiles, or when
    /// obstacles are disabled. On a hit the obstacle is placed at the tile's
    /// position facing the current heading and recorded in the active set.
    pub fn try_place<R: RandomSource>(
        &self,
        state: &mut GenerationState,
        specs: &[ObstacleSpec],
        tile: &TileInstance,
        first_of_run: bool,
        rng: &mut R,
    ) -> Option<ObstacleId> {
        if first_of_run
            || tile.kind != TileType::Straight
            || specs.is_empty()
            || self.probability <= 0.0
        {
            return None;
        }

        let roll = rng.next_unit();
        if roll > self.probability {
            return None;
        }

        let index = rng.next_range(0, specs.len());
        let spec = specs.get(index)?;
        let id = state.next_obstacle_id();
        let obstacle = ObstacleInstance {
            id,
            spec: index,
            tile: tile.id,
            position: tile.position,
            rotation: aligned_rotation(spec.rotation, state.heading),
            active: true,
        };
        log::debug!(
            "Obstacle {} ({}) on tile {} at {:?}",
            id,
            spec.prefab,
            tile.id,
            obstacle.position
        );
        state.push_event(TrackEvent::ObstacleSpawned {
            id,
            tile: tile.id,
            prefab: spec.prefab.clone(),
            position: obstacle.position,
            rotation: obstacle.rotation,
        });
        state.active_obstacles.insert(id, obstacle);
        Some(id)
    }
}
