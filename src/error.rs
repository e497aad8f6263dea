//! Error types
//!
//! Only fatal conditions live here. A rejected turn is an ordinary
//! [`TurnResolution`](crate::track::TurnResolution), never an error.

use thiserror::Error;

use crate::catalog::TileType;

/// Problems with the supplied catalog or settings, surfaced before any tile is placed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    /// The catalog has no start (straight) tile
    #[error("catalog has no start tile")]
    MissingStartTile,

    /// The start tile must be a straight segment
    #[error("start tile must be STRAIGHT, got {0:?}")]
    StartTileNotStraight(TileType),

    /// No turn tiles at all
    #[error("catalog has no turn tiles")]
    NoTurnTiles,

    /// A straight segment was listed among the turn tiles
    #[error("turn tile `{0}` is STRAIGHT")]
    StraightTurnTile(String),

    /// Runs must end on a LEFT or RIGHT tile
    #[error("catalog has no LEFT or RIGHT tile to end a straight run")]
    NoCornerTiles,

    /// Obstacles are enabled but none are configured
    #[error("obstacle probability is {0} but the obstacle catalog is empty")]
    NoObstacles(f32),

    /// Straight run bounds are inverted
    #[error("invalid straight run length range [{min}, {max})")]
    InvalidRunLength { min: usize, max: usize },

    /// Probability outside [0, 1]
    #[error("obstacle probability {0} is outside [0, 1]")]
    InvalidProbability(f32),

    /// Trigger probe radius must be positive
    #[error("turn trigger radius {0} must be positive")]
    InvalidTriggerRadius(f32),

    /// Marker height above a turn tile must be finite and non-negative
    #[error("turn trigger height {0} must be finite and non-negative")]
    InvalidTriggerHeight(f32),

    /// Grid cells must have positive size
    #[error("trigger cell size {0} must be positive")]
    InvalidCellSize(f32),

    /// Lane width must be finite and non-negative
    #[error("lane width {0} must be finite and non-negative")]
    InvalidLaneWidth(f32),
}

/// Top-level error for generation and config loading
#[derive(Debug, Error)]
pub enum TrackError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// A tile cannot be placed because its bounds are unusable
    #[error("tile `{prefab}` has no usable bounds: {reason}")]
    GeometryAssumptionViolation { prefab: String, reason: &'static str },

    #[error("failed to read track config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse track config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to serialize track snapshot: {0}")]
    Snapshot(serde_json::Error),
}

impl TrackError {
    /// True for errors that stem from bad configuration rather than I/O
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            TrackError::Configuration(_) | TrackError::GeometryAssumptionViolation { .. }
        )
    }
}
