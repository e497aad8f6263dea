//! Tile and obstacle catalogs
//!
//! Static descriptions of the prefabs the generator may place. Supplied by
//! the host (usually from JSON) before the track is initialized.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, TrackError};

/// Tile geometry kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TileType {
    Straight,
    Left,
    Right,
    /// Crossing / T-junction, either side is open
    Sideways,
}

impl TileType {
    /// Tiles that carry a turn marker
    pub fn is_turn(&self) -> bool {
        !matches!(self, TileType::Straight)
    }

    /// LEFT or RIGHT
    pub fn is_corner(&self) -> bool {
        matches!(self, TileType::Left | TileType::Right)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TileType::Straight => "STRAIGHT",
            TileType::Left => "LEFT",
            TileType::Right => "RIGHT",
            TileType::Sideways => "SIDEWAYS",
        }
    }
}

/// Local-space box that marks where a turn may be taken
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TriggerBox {
    pub center: Vec3,
    pub half_extents: Vec3,
}

/// A tile prefab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileSpec {
    pub prefab: String,
    #[serde(rename = "type")]
    pub kind: TileType,
    /// Local size of the geometry; `None` when the prefab has no bounds
    #[serde(default)]
    pub footprint: Option<Vec3>,
    /// Authored rotation, applied before heading alignment
    #[serde(default)]
    pub rotation: Quat,
    /// Turn pivot relative to the tile origin
    #[serde(default)]
    pub pivot: Vec3,
    /// Turn marker volume; turn tiles default to a column over their footprint
    #[serde(default)]
    pub trigger: Option<TriggerBox>,
}

impl TileSpec {
    pub fn straight(prefab: impl Into<String>, footprint: Vec3) -> Self {
        Self {
            prefab: prefab.into(),
            kind: TileType::Straight,
            footprint: Some(footprint),
            rotation: Quat::IDENTITY,
            pivot: Vec3::ZERO,
            trigger: None,
        }
    }

    pub fn turn(prefab: impl Into<String>, kind: TileType, footprint: Vec3, pivot: Vec3) -> Self {
        Self {
            prefab: prefab.into(),
            kind,
            footprint: Some(footprint),
            rotation: Quat::IDENTITY,
            pivot,
            trigger: None,
        }
    }

    /// Footprint that placement math can rely on
    ///
    /// Horizontal extents must be positive, height may be zero for flat tiles.
    pub fn checked_footprint(&self) -> Result<Vec3, TrackError> {
        let violation = |reason| TrackError::GeometryAssumptionViolation {
            prefab: self.prefab.clone(),
            reason,
        };
        let size = self.footprint.ok_or_else(|| violation("footprint is missing"))?;
        if !size.is_finite() {
            return Err(violation("footprint is not finite"));
        }
        if size.x <= 0.0 || size.z <= 0.0 || size.y < 0.0 {
            return Err(violation("footprint has a non-positive extent"));
        }
        Ok(size)
    }

    /// Turn marker for this tile, if it has one
    ///
    /// Without an authored trigger the marker spans the footprint and rises
    /// `height` above the top face, so a player standing on the tile is inside it.
    pub fn trigger_box(&self, footprint: Vec3, height: f32) -> Option<TriggerBox> {
        if !self.kind.is_turn() {
            return None;
        }
        Some(self.trigger.unwrap_or(TriggerBox {
            center: Vec3::new(0.0, height / 2.0, 0.0),
            half_extents: Vec3::new(footprint.x, footprint.y + height, footprint.z) / 2.0,
        }))
    }
}

/// An obstacle prefab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSpec {
    pub prefab: String,
    #[serde(default)]
    pub rotation: Quat,
}

impl ObstacleSpec {
    pub fn new(prefab: impl Into<String>) -> Self {
        Self {
            prefab: prefab.into(),
            rotation: Quat::IDENTITY,
        }
    }
}

/// Which catalog entry a tile instance came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecRef {
    Start,
    Turn(usize),
}

/// Everything the generator may place
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TileCatalog {
    #[serde(default)]
    pub start_tile: Option<TileSpec>,
    #[serde(default)]
    pub turn_tiles: Vec<TileSpec>,
    #[serde(default)]
    pub obstacles: Vec<ObstacleSpec>,
}

impl TileCatalog {
    /// Check the catalog can sustain generation
    pub fn validate(&self, obstacle_probability: f32) -> Result<(), ConfigurationError> {
        let start = self
            .start_tile
            .as_ref()
            .ok_or(ConfigurationError::MissingStartTile)?;
        if start.kind != TileType::Straight {
            return Err(ConfigurationError::StartTileNotStraight(start.kind));
        }
        if self.turn_tiles.is_empty() {
            return Err(ConfigurationError::NoTurnTiles);
        }
        if let Some(straight) = self.turn_tiles.iter().find(|t| !t.kind.is_turn()) {
            return Err(ConfigurationError::StraightTurnTile(straight.prefab.clone()));
        }
        if self.corner_indices().is_empty() {
            return Err(ConfigurationError::NoCornerTiles);
        }
        if obstacle_probability > 0.0 && self.obstacles.is_empty() {
            return Err(ConfigurationError::NoObstacles(obstacle_probability));
        }
        Ok(())
    }

    /// Resolve a spec reference
    ///
    /// References are only produced from this catalog, so an unknown index
    /// means the catalog was swapped underneath a live track.
    pub fn spec(&self, spec: SpecRef) -> Option<&TileSpec> {
        match spec {
            SpecRef::Start => self.start_tile.as_ref(),
            SpecRef::Turn(i) => self.turn_tiles.get(i),
        }
    }

    /// Indices of LEFT/RIGHT tiles in `turn_tiles`
    pub fn corner_indices(&self) -> Vec<usize> {
        self.turn_tiles
            .iter()
            .enumerate()
            .filter(|(_, t)| t.kind.is_corner())
            .map(|(i, _)| i)
            .collect()
    }

    /// First SIDEWAYS tile, used for the junction after each corner
    pub fn junction_index(&self) -> Option<usize> {
        self.turn_tiles
            .iter()
            .position(|t| t.kind == TileType::Sideways)
    }
}
