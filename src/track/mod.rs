//! Deterministic track generation
//!
//! All generation logic lives here. This module must stay pure and deterministic:
//! - Seeded random source only
//! - Stable iteration order (by tile / obstacle ID)
//! - Work happens on discrete events (start, confirmed turn), never per frame
//! - No rendering, physics or input dependencies

pub mod events;
pub mod generator;
pub mod heading;
pub mod lifecycle;
pub mod obstacles;
pub mod placement;
pub mod rng;
pub mod state;
pub mod trigger;
pub mod turn;

pub use events::TrackEvent;
pub use generator::{ExtendReport, TrackGenerator};
pub use heading::{Heading, TurnDirection};
pub use lifecycle::{RecycleReport, recycle_behind_frontier};
pub use obstacles::ObstaclePlacer;
pub use placement::{Aabb, TurnMargins};
pub use rng::{RandomSource, SeededRandom, SequenceRandom};
pub use state::{
    GenerationState, ObstacleId, ObstacleInstance, TileId, TileInstance, TileLifecycle,
};
pub use trigger::TriggerIndex;
pub use turn::{AcceptedTurn, TurnResolution, TurnValidator};
