//! Endless Track - procedural track generation for lane-runner games
//!
//! Core modules:
//! - `track`: Deterministic generation (placement, obstacles, turns, recycling)
//! - `catalog`: Tile and obstacle prefab descriptions
//! - `settings`: Data-driven generation tuning and config loading
//! - `error`: Fatal configuration and geometry errors

pub mod catalog;
pub mod error;
pub mod settings;
pub mod track;

pub use catalog::{ObstacleSpec, TileCatalog, TileSpec, TileType, TriggerBox};
pub use error::{ConfigurationError, TrackError};
pub use settings::{TrackConfig, TrackSettings};
pub use track::{
    Heading, SeededRandom, TrackEvent, TrackGenerator, TurnDirection, TurnResolution,
};

/// Generation configuration constants
pub mod consts {
    /// Chance that a straight tile (other than the first of a run) hosts an obstacle
    pub const DEFAULT_OBSTACLE_PROBABILITY: f32 = 0.2;
    /// Radius of the probe sphere used to find a turn marker underfoot
    pub const TURN_TRIGGER_RADIUS: f32 = 0.1;
    /// Height above a turn tile's top face covered by its default marker
    pub const DEFAULT_TURN_TRIGGER_HEIGHT: f32 = 2.0;

    /// Straight tiles laid before the first turn
    pub const DEFAULT_INITIAL_STRAIGHT_COUNT: usize = 10;
    /// Shortest straight run after a turn
    pub const DEFAULT_MIN_STRAIGHT: usize = 3;
    /// Exclusive upper bound for straight run length
    pub const DEFAULT_MAX_STRAIGHT: usize = 15;

    /// Units trimmed from a corner tile's footprint when jumping past it
    pub const DEFAULT_TURN_EXIT_MARGIN: f32 = 1.0;
    /// Cell size of the turn trigger grid (world units, x/z plane)
    pub const DEFAULT_TRIGGER_CELL_SIZE: f32 = 8.0;

    /// Undrained events kept before the oldest are dropped
    pub const MAX_QUEUED_EVENTS: usize = 4096;

    /// Tolerance for placement comparisons
    pub const POSITION_EPSILON: f32 = 1e-4;
}
