//! Generation settings and config loading
//!
//! Settings and the catalog are loaded together from one JSON document.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::TileCatalog;
use crate::consts::*;
use crate::error::{ConfigurationError, TrackError};

/// Tunable generation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackSettings {
    /// Straight tiles laid before the first turn
    pub initial_straight_count: usize,
    /// Shortest straight run after a turn (inclusive)
    pub min_straight: usize,
    /// Longest straight run after a turn (exclusive)
    pub max_straight: usize,
    /// Chance a straight tile hosts an obstacle
    pub obstacle_probability: f32,
    /// Trimmed from a corner tile's footprint when jumping past it
    pub turn_exit_margin: f32,
    /// Lane width used for the half-lane correction after a turn.
    /// Defaults to the start tile's footprint width: tiles are placed by
    /// their centre, so half a width lets the first straight overlap the
    /// corner slightly. Half the start tile's length would leave a gap.
    pub lane_width: Option<f32>,
    /// Probe radius around the player when looking for a turn marker
    pub turn_trigger_radius: f32,
    /// How far a default turn marker reaches above the tile's top face
    pub turn_trigger_height: f32,
    /// Cell size of the turn marker grid
    pub trigger_cell_size: f32,
}

impl Default for TrackSettings {
    fn default() -> Self {
        Self {
            initial_straight_count: DEFAULT_INITIAL_STRAIGHT_COUNT,
            min_straight: DEFAULT_MIN_STRAIGHT,
            max_straight: DEFAULT_MAX_STRAIGHT,
            obstacle_probability: DEFAULT_OBSTACLE_PROBABILITY,
            turn_exit_margin: DEFAULT_TURN_EXIT_MARGIN,
            lane_width: None,
            turn_trigger_radius: TURN_TRIGGER_RADIUS,
            turn_trigger_height: DEFAULT_TURN_TRIGGER_HEIGHT,
            trigger_cell_size: DEFAULT_TRIGGER_CELL_SIZE,
        }
    }
}

impl TrackSettings {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.min_straight > self.max_straight {
            return Err(ConfigurationError::InvalidRunLength {
                min: self.min_straight,
                max: self.max_straight,
            });
        }
        if !(0.0..=1.0).contains(&self.obstacle_probability) {
            return Err(ConfigurationError::InvalidProbability(
                self.obstacle_probability,
            ));
        }
        if !(self.turn_trigger_radius > 0.0 && self.turn_trigger_radius.is_finite()) {
            return Err(ConfigurationError::InvalidTriggerRadius(
                self.turn_trigger_radius,
            ));
        }
        if !(self.turn_trigger_height >= 0.0 && self.turn_trigger_height.is_finite()) {
            return Err(ConfigurationError::InvalidTriggerHeight(
                self.turn_trigger_height,
            ));
        }
        if !(self.trigger_cell_size > 0.0 && self.trigger_cell_size.is_finite()) {
            return Err(ConfigurationError::InvalidCellSize(self.trigger_cell_size));
        }
        if let Some(width) = self.lane_width {
            if !(width >= 0.0 && width.is_finite()) {
                return Err(ConfigurationError::InvalidLaneWidth(width));
            }
        }
        Ok(())
    }

    /// Same settings with a different obstacle probability
    pub fn with_obstacle_probability(mut self, probability: f32) -> Self {
        self.obstacle_probability = probability;
        self
    }
}

/// Settings plus catalog, as supplied by the configuration loader
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackConfig {
    #[serde(default)]
    pub settings: TrackSettings,
    pub catalog: TileCatalog,
}

impl TrackConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, TrackError> {
        let config: TrackConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TrackError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!(
            "Loaded track config from {} ({} turn tiles, {} obstacles)",
            path.display(),
            config.catalog.turn_tiles.len(),
            config.catalog.obstacles.len()
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.settings.validate()?;
        self.catalog.validate(self.settings.obstacle_probability)
    }
}
