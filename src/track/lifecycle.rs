//! Tile lifecycle management
//!
//! Runs once per confirmed turn. Everything generated before the most recent
//! tile is behind the player and goes; the most recent tile is kept as the
//! reference for the next placement.

use super::events::TrackEvent;
use super::state::{GenerationState, ObstacleInstance, TileInstance};
use super::trigger::TriggerIndex;

/// What one recycling pass removed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecycleReport {
    pub tiles: Vec<TileInstance>,
    pub obstacles: Vec<ObstacleInstance>,
}

/// Recycle every tile except the newest, and every obstacle
///
/// Only active-set membership changes here: tile geometry is untouched and
/// obstacle cleanup only ever touches the obstacle set.
pub fn recycle_behind_frontier(state: &mut GenerationState, index: &mut TriggerIndex) -> RecycleReport {
    let mut report = RecycleReport::default();

    while state.active_tiles.len() > 1 {
        let Some(mut tile) = state.active_tiles.pop_front() else {
            break;
        };
        tile.mark_recycled();
        index.remove(tile.id);
        state.push_event(TrackEvent::TileRecycled { id: tile.id });
        report.tiles.push(tile);
    }

    let obstacles = std::mem::take(&mut state.active_obstacles);
    for (id, mut obstacle) in obstacles {
        obstacle.active = false;
        state.push_event(TrackEvent::ObstacleRecycled { id });
        report.obstacles.push(obstacle);
    }

    log::debug!(
        "Recycled {} tiles and {} obstacles, {} tile(s) kept",
        report.tiles.len(),
        report.obstacles.len(),
        state.active_tiles.len()
    );
    report
}
