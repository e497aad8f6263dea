//! Generation state and placed instances
//!
//! One [`GenerationState`] per track. Only the generator mutates geometry;
//! the lifecycle manager only changes which instances are active.

use std::collections::{BTreeMap, VecDeque};

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::events::TrackEvent;
use super::heading::Heading;
use super::placement::Aabb;
use crate::catalog::{SpecRef, TileType};
use crate::consts::MAX_QUEUED_EVENTS;

/// Stable tile identifier, increasing in generation order
pub type TileId = u32;
/// Stable obstacle identifier, increasing in generation order
pub type ObstacleId = u32;

/// Lifecycle of a placed tile
///
/// `Pending -> Active -> Traversed -> Recycled`; `Active -> Recycled` is
/// also legal for tiles that were never turned on. Nothing leaves `Recycled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileLifecycle {
    /// Placement computed, not yet part of the active set
    Pending,
    Active,
    /// A turn was accepted on this tile
    Traversed,
    Recycled,
}

/// A tile placed in the world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileInstance {
    pub id: TileId,
    pub spec: SpecRef,
    pub kind: TileType,
    pub position: Vec3,
    pub rotation: Quat,
    /// World-space footprint of this instance
    pub world_size: Vec3,
    /// Turn pivot in world space (the tile position for straights)
    pub pivot: Vec3,
    /// World-space turn marker, only on turn tiles
    pub trigger: Option<Aabb>,
    pub lifecycle: TileLifecycle,
}

impl TileInstance {
    pub fn is_active(&self) -> bool {
        matches!(
            self.lifecycle,
            TileLifecycle::Active | TileLifecycle::Traversed
        )
    }

    pub(crate) fn activate(&mut self) {
        if self.lifecycle == TileLifecycle::Pending {
            self.lifecycle = TileLifecycle::Active;
        }
    }

    pub(crate) fn mark_traversed(&mut self) {
        if self.lifecycle == TileLifecycle::Active {
            self.lifecycle = TileLifecycle::Traversed;
        }
    }

    pub(crate) fn mark_recycled(&mut self) {
        self.lifecycle = TileLifecycle::Recycled;
    }
}

/// An obstacle riding on a straight tile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleInstance {
    pub id: ObstacleId,
    /// Index into the obstacle catalog
    pub spec: usize,
    /// Tile the obstacle was placed on
    pub tile: TileId,
    pub position: Vec3,
    pub rotation: Quat,
    pub active: bool,
}

/// Mutable generation state of one track
#[derive(Debug, Clone, Default)]
pub struct GenerationState {
    /// Where the next straight tile goes
    pub cursor: Vec3,
    pub heading: Heading,
    /// Generation order; append at the tail, recycle from the head
    pub active_tiles: VecDeque<TileInstance>,
    pub active_obstacles: BTreeMap<ObstacleId, ObstacleInstance>,
    /// Tile a turn was accepted on and not yet followed by an extension
    pub pending_turn: Option<TileId>,
    /// Confirmed turns so far
    pub turns: u32,
    /// Undrained events, oldest first, capped at `MAX_QUEUED_EVENTS`
    pub events: VecDeque<TrackEvent>,
    dropped_events: usize,
    next_tile_id: TileId,
    next_obstacle_id: ObstacleId,
}

impl GenerationState {
    pub fn new() -> Self {
        Self {
            next_tile_id: 1,
            next_obstacle_id: 1,
            ..Default::default()
        }
    }

    /// Allocate a new tile ID
    pub fn next_tile_id(&mut self) -> TileId {
        let id = self.next_tile_id;
        self.next_tile_id += 1;
        id
    }

    /// Allocate a new obstacle ID
    pub fn next_obstacle_id(&mut self) -> ObstacleId {
        let id = self.next_obstacle_id;
        self.next_obstacle_id += 1;
        id
    }

    /// Most recently placed tile
    pub fn last_tile(&self) -> Option<&TileInstance> {
        self.active_tiles.back()
    }

    pub fn tile(&self, id: TileId) -> Option<&TileInstance> {
        self.active_tiles.iter().find(|t| t.id == id)
    }

    pub fn tile_mut(&mut self, id: TileId) -> Option<&mut TileInstance> {
        self.active_tiles.iter_mut().find(|t| t.id == id)
    }

    /// Queue an event, dropping the oldest once the queue is full
    pub fn push_event(&mut self, event: TrackEvent) {
        if self.events.len() >= MAX_QUEUED_EVENTS {
            self.events.pop_front();
            if self.dropped_events == 0 {
                log::warn!("Event queue full, dropping oldest events until drained");
            }
            self.dropped_events += 1;
        }
        self.events.push_back(event);
    }

    /// Take every queued event and reset the overflow count
    pub fn take_events(&mut self) -> Vec<TrackEvent> {
        if self.dropped_events > 0 {
            log::debug!("{} events were dropped before drain", self.dropped_events);
            self.dropped_events = 0;
        }
        self.events.drain(..).collect()
    }
}
