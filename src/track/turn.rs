//! Turn validation
//!
//! Decides whether a turn request is legal for the tile underfoot and where
//! the player should pivot. A refused or impossible turn is a normal outcome:
//! the player simply keeps running straight.

use glam::Vec3;

use super::events::TrackEvent;
use super::heading::{Heading, TurnDirection};
use super::state::{GenerationState, TileId, TileLifecycle};
use super::trigger::TriggerIndex;
use crate::catalog::TileType;

/// A turn the player may take
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcceptedTurn {
    pub tile: TileId,
    /// World-space pivot of the tile
    pub pivot: Vec3,
    pub direction: TurnDirection,
    pub heading: Heading,
}

impl AcceptedTurn {
    /// Where the player stands after snapping onto the pivot (height is kept)
    pub fn snap_position(&self, player: Vec3) -> Vec3 {
        Vec3::new(self.pivot.x, player.y, self.pivot.z)
    }
}

/// Outcome of a turn request
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TurnResolution {
    /// No turn marker underfoot
    NoTurnAvailable,
    /// A turn tile is underfoot but does not allow this direction
    Rejected { tile: TileId, kind: TileType },
    Accepted(AcceptedTurn),
}

impl TurnResolution {
    pub fn accepted(&self) -> Option<&AcceptedTurn> {
        match self {
            TurnResolution::Accepted(turn) => Some(turn),
            _ => None,
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.accepted().is_some()
    }
}

/// Whether `kind` allows turning toward `direction`
pub fn allows(kind: TileType, direction: TurnDirection) -> bool {
    match kind {
        TileType::Left => direction == TurnDirection::Left,
        TileType::Right => direction == TurnDirection::Right,
        TileType::Sideways => direction.is_turn(),
        TileType::Straight => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnValidator {
    /// Probe sphere radius around the player position
    pub radius: f32,
}

impl TurnValidator {
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }

    /// Check a turn request against the tile underfoot
    ///
    /// Tiles already turned on are ignored. When several turn markers overlap
    /// (a corner plus its junction) the oldest decides, and on acceptance all
    /// of them are marked traversed so the junction cannot fire a second turn.
    pub fn resolve(
        &self,
        state: &mut GenerationState,
        index: &TriggerIndex,
        player: Vec3,
        direction: TurnDirection,
    ) -> TurnResolution {
        let candidates: Vec<TileId> = index
            .query(player, self.radius)
            .into_iter()
            .filter(|&id| {
                state
                    .tile(id)
                    .is_some_and(|t| t.lifecycle == TileLifecycle::Active)
            })
            .collect();

        let Some(tile) = candidates.first().and_then(|&id| state.tile(id)) else {
            return TurnResolution::NoTurnAvailable;
        };

        if !allows(tile.kind, direction) {
            log::debug!(
                "Turn {:?} rejected on {} tile {}",
                direction,
                tile.kind.as_str(),
                tile.id
            );
            return TurnResolution::Rejected {
                tile: tile.id,
                kind: tile.kind,
            };
        }

        let heading = state.heading.turned(direction);
        let turn = AcceptedTurn {
            tile: tile.id,
            pivot: tile.pivot,
            direction,
            heading,
        };

        for id in &candidates {
            if let Some(t) = state.tile_mut(*id) {
                t.mark_traversed();
            }
        }
        state.pending_turn = Some(turn.tile);
        state.push_event(TrackEvent::heading_changed(heading));
        log::debug!(
            "Turn {:?} accepted on tile {}, new heading {:?}",
            direction,
            turn.tile,
            heading
        );
        TurnResolution::Accepted(turn)
    }
}
