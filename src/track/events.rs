//! Track events
//!
//! Notifications for the host (renderer, locomotion, audio). Generation only
//! queues them; the host drains the queue once per step.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::heading::Heading;
use super::state::{ObstacleId, TileId};
use crate::catalog::TileType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TrackEvent {
    /// A tile entered the active set
    TileSpawned {
        id: TileId,
        kind: TileType,
        prefab: String,
        position: Vec3,
        rotation: Quat,
    },

    /// An obstacle was placed on a straight tile
    ObstacleSpawned {
        id: ObstacleId,
        tile: TileId,
        prefab: String,
        position: Vec3,
        rotation: Quat,
    },

    TileRecycled { id: TileId },

    ObstacleRecycled { id: ObstacleId },

    /// A turn was accepted; locomotion should face `direction`
    HeadingChanged { heading: Heading, direction: Vec3 },
}

impl TrackEvent {
    pub fn heading_changed(heading: Heading) -> Self {
        TrackEvent::HeadingChanged {
            heading,
            direction: heading.to_vec3(),
        }
    }
}
