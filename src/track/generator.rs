//! Track generator
//!
//! Lays down the initial run, then one straight run plus a corner per
//! confirmed turn. All random choices come from the generator's
//! [`RandomSource`], so a seed fully determines the track.

use glam::Vec3;

use super::events::TrackEvent;
use super::heading::{Heading, TurnDirection};
use super::lifecycle::{RecycleReport, recycle_behind_frontier};
use super::obstacles::ObstaclePlacer;
use super::placement::{
    Aabb, TurnMargins, advance_straight, aligned_rotation, cursor_after_turn, world_extent,
};
use super::rng::{RandomSource, SeededRandom};
use super::state::{GenerationState, ObstacleInstance, TileId, TileInstance, TileLifecycle};
use super::trigger::TriggerIndex;
use super::turn::{TurnResolution, TurnValidator};
use crate::catalog::{SpecRef, TileCatalog, TileType};
use crate::error::{ConfigurationError, TrackError};
use crate::settings::{TrackConfig, TrackSettings};

/// Result of one extension step
#[derive(Debug, Clone, PartialEq)]
pub struct ExtendReport {
    pub recycled: RecycleReport,
    /// Straight tiles in the new run
    pub run_length: usize,
    /// Tiles placed by this step, in order
    pub placed: Vec<TileId>,
}

/// Owns one track: catalog, settings, random source and generation state
#[derive(Debug)]
pub struct TrackGenerator<R: RandomSource = SeededRandom> {
    catalog: TileCatalog,
    settings: TrackSettings,
    rng: R,
    state: GenerationState,
    index: TriggerIndex,
    placer: ObstaclePlacer,
    validator: TurnValidator,
    margins: TurnMargins,
}

impl TrackGenerator<SeededRandom> {
    /// Initialize a track from a loaded config with a seeded PCG source
    pub fn new(config: TrackConfig, seed: u64) -> Result<Self, TrackError> {
        Self::initialize(config.catalog, config.settings, SeededRandom::new(seed))
    }

    /// Seed the track was generated from
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }
}

impl<R: RandomSource> TrackGenerator<R> {
    /// Validate the configuration and lay down the opening run
    ///
    /// Places `initial_straight_count` straight tiles from the origin along
    /// +Z, then one turn tile picked uniformly from the whole turn catalog.
    /// The opening run never carries obstacles.
    pub fn initialize(
        catalog: TileCatalog,
        settings: TrackSettings,
        rng: R,
    ) -> Result<Self, TrackError> {
        settings.validate()?;
        catalog.validate(settings.obstacle_probability)?;

        let start = catalog
            .start_tile
            .as_ref()
            .ok_or(ConfigurationError::MissingStartTile)?;
        let start_size = start.checked_footprint()?;
        // Fail before anything is placed rather than halfway through a run
        for spec in &catalog.turn_tiles {
            spec.checked_footprint()?;
        }

        let margins = TurnMargins {
            exit_margin: settings.turn_exit_margin,
            lane_width: settings.lane_width.unwrap_or(start_size.x),
        };

        let mut generator = Self {
            index: TriggerIndex::new(settings.trigger_cell_size, settings.turn_trigger_radius),
            placer: ObstaclePlacer::new(settings.obstacle_probability),
            validator: TurnValidator::new(settings.turn_trigger_radius),
            margins,
            state: GenerationState::new(),
            catalog,
            settings,
            rng,
        };

        for _ in 0..generator.settings.initial_straight_count {
            generator.place_tile(SpecRef::Start, None)?;
        }
        let turn = generator
            .rng
            .next_range(0, generator.catalog.turn_tiles.len());
        generator.place_tile(SpecRef::Turn(turn), None)?;

        log::info!(
            "Track initialized: {} straight tiles, first turn {} at {:?}",
            generator.settings.initial_straight_count,
            generator
                .state
                .last_tile()
                .map(|t| t.kind.as_str())
                .unwrap_or("?"),
            generator.state.last_tile().map(|t| t.position)
        );
        Ok(generator)
    }

    /// Advance the track after a confirmed turn
    ///
    /// Recycles everything but the newest tile, jumps the cursor past it onto
    /// `heading`, lays a straight run of random length (obstacles allowed
    /// from the second tile on), then a corner and, when the catalog has one,
    /// a SIDEWAYS junction on the same spot.
    pub fn extend_after_turn(&mut self, heading: Heading) -> Result<ExtendReport, TrackError> {
        if self.state.pending_turn.take().is_none() {
            log::warn!("Extending track toward {heading:?} without a confirmed turn");
        }

        self.state.heading = heading;
        let recycled = recycle_behind_frontier(&mut self.state, &mut self.index);

        let margins = self.margins;
        let jump = self.state.last_tile().map(|previous| {
            cursor_after_turn(
                previous.position,
                previous.kind,
                previous.world_size,
                heading,
                margins,
            )
        });
        if let Some(cursor) = jump {
            self.state.cursor = cursor;
        }

        let run_length = self
            .rng
            .next_range(self.settings.min_straight, self.settings.max_straight);
        let mut placed = Vec::with_capacity(run_length + 2);
        for i in 0..run_length {
            placed.push(self.place_tile(SpecRef::Start, Some(i))?);
        }

        let corners = self.catalog.corner_indices();
        let corner = self
            .rng
            .choose(&corners)
            .copied()
            .ok_or(ConfigurationError::NoCornerTiles)?;
        placed.push(self.place_tile(SpecRef::Turn(corner), None)?);

        if let Some(junction) = self.catalog.junction_index() {
            placed.push(self.place_tile(SpecRef::Turn(junction), None)?);
        }

        self.state.turns += 1;
        log::info!(
            "Turn {}: heading {:?}, {} straight tiles, {} recycled",
            self.state.turns,
            heading,
            run_length,
            recycled.tiles.len()
        );
        Ok(ExtendReport {
            recycled,
            run_length,
            placed,
        })
    }

    /// Instantiate one tile at the cursor
    ///
    /// `run_index` is the position within a post-turn straight run; tiles
    /// outside such a run never roll for obstacles.
    fn place_tile(&mut self, spec_ref: SpecRef, run_index: Option<usize>) -> Result<TileId, TrackError> {
        let spec = self.catalog.spec(spec_ref).ok_or(match spec_ref {
            SpecRef::Start => ConfigurationError::MissingStartTile,
            SpecRef::Turn(_) => ConfigurationError::NoTurnTiles,
        })?;
        let local_size = spec.checked_footprint()?;

        let heading = self.state.heading;
        let position = self.state.cursor;
        let rotation = aligned_rotation(spec.rotation, heading);
        let trigger = spec
            .trigger_box(local_size, self.settings.turn_trigger_height)
            .map(|b| Aabb::from_trigger(&b, position, rotation));

        let mut tile = TileInstance {
            id: self.state.next_tile_id(),
            spec: spec_ref,
            kind: spec.kind,
            position,
            rotation,
            world_size: world_extent(rotation, local_size),
            pivot: position + rotation * spec.pivot,
            trigger,
            lifecycle: TileLifecycle::Pending,
        };
        tile.activate();

        log::debug!(
            "Tile {} {} at {:?} heading {:?}",
            tile.id,
            spec.kind.as_str(),
            position,
            heading
        );
        self.state.push_event(TrackEvent::TileSpawned {
            id: tile.id,
            kind: tile.kind,
            prefab: spec.prefab.clone(),
            position,
            rotation,
        });
        if let Some(aabb) = tile.trigger {
            self.index.insert(tile.id, aabb);
        }

        if let Some(i) = run_index {
            self.placer.try_place(
                &mut self.state,
                &self.catalog.obstacles,
                &tile,
                i == 0,
                &mut self.rng,
            );
        }

        if tile.kind == TileType::Straight {
            self.state.cursor = advance_straight(position, tile.world_size, heading);
        }

        let id = tile.id;
        self.state.active_tiles.push_back(tile);
        Ok(id)
    }

    /// Check a turn request; see [`TurnValidator::resolve`]
    pub fn try_resolve_turn(&mut self, player: Vec3, direction: TurnDirection) -> TurnResolution {
        self.validator
            .resolve(&mut self.state, &self.index, player, direction)
    }

    /// Validate a turn and, if accepted, extend the track onto the new heading
    pub fn commit_turn(
        &mut self,
        player: Vec3,
        direction: TurnDirection,
    ) -> Result<TurnResolution, TrackError> {
        let resolution = self.try_resolve_turn(player, direction);
        if let TurnResolution::Accepted(turn) = resolution {
            self.extend_after_turn(turn.heading)?;
        }
        Ok(resolution)
    }

    /// Active turn tile whose marker contains `point`, oldest first
    pub fn turn_tile_at(&self, point: Vec3) -> Option<&TileInstance> {
        self.index
            .query(point, self.validator.radius)
            .into_iter()
            .filter_map(|id| self.state.tile(id))
            .find(|t| t.lifecycle == TileLifecycle::Active)
    }

    /// Active tiles in generation order
    pub fn active_tiles(&self) -> impl Iterator<Item = &TileInstance> {
        self.state.active_tiles.iter()
    }

    pub fn active_obstacles(&self) -> impl Iterator<Item = &ObstacleInstance> {
        self.state.active_obstacles.values()
    }

    /// Take all queued events
    ///
    /// The queue holds at most [`MAX_QUEUED_EVENTS`](crate::consts::MAX_QUEUED_EVENTS);
    /// a host that never drains loses the oldest ones.
    pub fn drain_events(&mut self) -> Vec<TrackEvent> {
        self.state.take_events()
    }

    pub fn cursor(&self) -> Vec3 {
        self.state.cursor
    }

    pub fn heading(&self) -> Heading {
        self.state.heading
    }

    pub fn turns(&self) -> u32 {
        self.state.turns
    }

    pub fn state(&self) -> &GenerationState {
        &self.state
    }

    pub fn catalog(&self) -> &TileCatalog {
        &self.catalog
    }

    pub fn settings(&self) -> &TrackSettings {
        &self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ObstacleSpec, TileSpec};
    use crate::consts::{MAX_QUEUED_EVENTS, POSITION_EPSILON};
    use crate::track::rng::SequenceRandom;
    use proptest::prelude::*;

    fn scenario_catalog() -> TileCatalog {
        TileCatalog {
            start_tile: Some(TileSpec::straight("straight", Vec3::new(1.0, 1.0, 10.0))),
            turn_tiles: vec![
                TileSpec::turn("left", TileType::Left, Vec3::new(10.0, 1.0, 10.0), Vec3::ZERO),
                TileSpec::turn("right", TileType::Right, Vec3::new(10.0, 1.0, 10.0), Vec3::ZERO),
            ],
            obstacles: vec![ObstacleSpec::new("barrier"), ObstacleSpec::new("log")],
        }
    }

    fn junction_catalog() -> TileCatalog {
        let mut catalog = scenario_catalog();
        catalog.turn_tiles.push(TileSpec::turn(
            "crossing",
            TileType::Sideways,
            Vec3::new(10.0, 1.0, 10.0),
            Vec3::ZERO,
        ));
        catalog
    }

    fn scenario_settings() -> TrackSettings {
        TrackSettings {
            initial_straight_count: 3,
            min_straight: 3,
            max_straight: 8,
            ..Default::default()
        }
    }

    fn seeded(catalog: TileCatalog, settings: TrackSettings, seed: u64) -> TrackGenerator {
        TrackGenerator::initialize(catalog, settings, SeededRandom::new(seed)).unwrap()
    }

    /// Pairs of consecutive straight tiles placed by one extension
    fn assert_run_contiguous(generator: &TrackGenerator, report: &ExtendReport) {
        let heading = generator.heading().to_vec3();
        let straights: Vec<&TileInstance> = report
            .placed
            .iter()
            .filter_map(|&id| generator.state().tile(id))
            .filter(|t| t.kind == TileType::Straight)
            .collect();
        assert_eq!(straights.len(), report.run_length);
        for pair in straights.windows(2) {
            let expected = pair[0].position + pair[0].world_size * heading;
            assert!(
                pair[1].position.abs_diff_eq(expected, POSITION_EPSILON),
                "gap between tiles {} and {}: {:?} vs {:?}",
                pair[0].id,
                pair[1].id,
                pair[1].position,
                expected
            );
        }
    }

    #[test]
    fn test_initialize_scenario() {
        let generator = seeded(scenario_catalog(), scenario_settings(), 42);
        let tiles: Vec<&TileInstance> = generator.active_tiles().collect();
        assert_eq!(tiles.len(), 4);
        for (i, tile) in tiles[..3].iter().enumerate() {
            assert_eq!(tile.kind, TileType::Straight);
            assert!(
                tile.position
                    .abs_diff_eq(Vec3::new(0.0, 0.0, i as f32 * 10.0), POSITION_EPSILON)
            );
        }
        assert!(tiles[3].kind.is_corner());
        assert!(tiles[3].position.abs_diff_eq(Vec3::new(0.0, 0.0, 30.0), POSITION_EPSILON));
        assert_eq!(generator.heading().to_vec3(), Vec3::new(0.0, 0.0, 1.0));
        // Turn tiles do not advance the cursor
        assert!(generator.cursor().abs_diff_eq(Vec3::new(0.0, 0.0, 30.0), POSITION_EPSILON));
        assert_eq!(generator.active_obstacles().count(), 0);
    }

    #[test]
    fn test_left_turn_scenario() {
        let mut generator = seeded(scenario_catalog(), scenario_settings(), 42);
        let turn_tile = generator.state().last_tile().unwrap().id;

        let report = generator.extend_after_turn(Heading::West).unwrap();

        let tiles: Vec<&TileInstance> = generator.active_tiles().collect();
        assert_eq!(tiles[0].id, turn_tile);
        assert_eq!(tiles.len(), 1 + report.run_length + 1);
        assert_eq!(report.recycled.tiles.len(), 3);

        // First straight after the jump: 10 - 1 + 0.5 along -x
        let first = tiles[1];
        assert!(first.position.abs_diff_eq(Vec3::new(-9.5, 0.0, 30.0), POSITION_EPSILON));
        for pair in tiles[1..].windows(2) {
            assert!((pair[1].position.z - 30.0).abs() < POSITION_EPSILON);
            assert!(pair[1].position.x < pair[0].position.x);
        }
        assert_run_contiguous(&generator, &report);
    }

    #[test]
    fn test_single_step_per_turn() {
        let mut generator = seeded(junction_catalog(), scenario_settings(), 3);
        let before = generator.state().last_tile().unwrap().id;
        let report = generator.extend_after_turn(Heading::East).unwrap();

        // run + corner + junction, and nothing more
        assert_eq!(report.placed.len(), report.run_length + 2);
        assert_eq!(generator.turns(), 1);
        assert_eq!(generator.heading(), Heading::East);
        assert_eq!(generator.active_tiles().count(), report.placed.len() + 1);
        assert_eq!(generator.active_tiles().next().map(|t| t.id), Some(before));
    }

    #[test]
    fn test_junction_shares_corner_spot() {
        let mut generator = seeded(junction_catalog(), scenario_settings(), 11);
        let report = generator.extend_after_turn(Heading::West).unwrap();
        let n = report.placed.len();
        let corner = generator.state().tile(report.placed[n - 2]).unwrap();
        let junction = generator.state().tile(report.placed[n - 1]).unwrap();
        assert!(corner.kind.is_corner());
        assert_eq!(junction.kind, TileType::Sideways);
        assert_eq!(corner.position, junction.position);
    }

    #[test]
    fn test_cursor_jump_from_junction() {
        let settings = TrackSettings {
            lane_width: Some(2.0),
            ..scenario_settings()
        };
        let mut generator = seeded(junction_catalog(), settings, 5);
        generator.extend_after_turn(Heading::West).unwrap();
        let junction = generator.state().last_tile().unwrap().clone();
        assert_eq!(junction.kind, TileType::Sideways);

        let report = generator.extend_after_turn(Heading::South).unwrap();
        let first = generator.state().tile(report.placed[0]).unwrap();
        // Half of the junction's footprint plus half a lane along -z
        let expected = junction.position + Vec3::new(0.0, 0.0, -(5.0 + 1.0));
        assert!(first.position.abs_diff_eq(expected, POSITION_EPSILON));
    }

    #[test]
    fn test_recycling_keeps_one_previous_tile() {
        let mut generator = seeded(junction_catalog(), scenario_settings(), 8);
        let mut heading = Heading::North;
        for step in 0..5 {
            let previous: Vec<TileId> = generator.active_tiles().map(|t| t.id).collect();
            let survivor = *previous.last().unwrap();
            heading = heading.turned(if step % 2 == 0 {
                TurnDirection::Left
            } else {
                TurnDirection::Right
            });
            let report = generator.extend_after_turn(heading).unwrap();

            let now: Vec<TileId> = generator.active_tiles().map(|t| t.id).collect();
            let survivors: Vec<TileId> =
                now.iter().copied().filter(|id| previous.contains(id)).collect();
            assert_eq!(survivors, vec![survivor]);
            assert_eq!(report.recycled.tiles.len(), previous.len() - 1);
            assert!(generator.active_obstacles().all(|o| report.placed.contains(&o.tile)));
        }
    }

    #[test]
    fn test_first_tile_of_run_is_safe() {
        // Every roll hits, so only the safety margin can keep a tile clear
        let settings = scenario_settings().with_obstacle_probability(1.0);
        let mut generator = seeded(scenario_catalog(), settings, 99);
        let report = generator.extend_after_turn(Heading::East).unwrap();

        let hosts: Vec<TileId> = generator.active_obstacles().map(|o| o.tile).collect();
        assert!(!hosts.contains(&report.placed[0]));
        assert_eq!(hosts.len(), report.run_length - 1);
        for &id in &report.placed[1..report.run_length] {
            assert!(hosts.contains(&id));
        }
    }

    #[test]
    fn test_obstacles_sit_on_their_tile() {
        let settings = scenario_settings().with_obstacle_probability(1.0);
        let mut generator = seeded(scenario_catalog(), settings, 1);
        generator.extend_after_turn(Heading::West).unwrap();
        for obstacle in generator.active_obstacles() {
            let tile = generator.state().tile(obstacle.tile).unwrap();
            assert_eq!(tile.kind, TileType::Straight);
            assert_eq!(obstacle.position, tile.position);
            assert!((obstacle.rotation * Vec3::Z).abs_diff_eq(Vec3::NEG_X, 1e-5));
        }
    }

    #[test]
    fn test_scripted_run_length() {
        // First draw picks the opening turn tile, second the run length
        let rng = SequenceRandom::new(vec![0.0, 0.0]);
        let settings = scenario_settings().with_obstacle_probability(0.0);
        let mut generator =
            TrackGenerator::initialize(scenario_catalog(), settings, rng).unwrap();
        assert_eq!(generator.state().last_tile().unwrap().kind, TileType::Left);
        let report = generator.extend_after_turn(Heading::West).unwrap();
        assert_eq!(report.run_length, 3);
    }

    #[test]
    fn test_empty_run_range_uses_minimum() {
        let settings = TrackSettings {
            min_straight: 4,
            max_straight: 4,
            ..scenario_settings()
        };
        let mut generator = seeded(scenario_catalog(), settings, 2);
        let report = generator.extend_after_turn(Heading::East).unwrap();
        assert_eq!(report.run_length, 4);
    }

    #[test]
    fn test_determinism() {
        let headings = [Heading::West, Heading::South, Heading::East, Heading::North];
        let run = |seed| {
            let mut generator = seeded(junction_catalog(), scenario_settings(), seed);
            for heading in headings {
                generator.extend_after_turn(heading).unwrap();
            }
            generator
                .drain_events()
                .into_iter()
                .filter_map(|e| match e {
                    TrackEvent::TileSpawned { kind, position, .. } => Some((kind, position)),
                    _ => None,
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(run(1234), run(1234));
        assert_ne!(run(1234), run(4321));
    }

    #[test]
    fn test_config_errors_surface_at_initialize() {
        let mut catalog = scenario_catalog();
        catalog.turn_tiles.clear();
        let err = TrackGenerator::initialize(catalog, scenario_settings(), SeededRandom::new(1))
            .unwrap_err();
        assert!(matches!(
            err,
            TrackError::Configuration(ConfigurationError::NoTurnTiles)
        ));

        let mut catalog = scenario_catalog();
        catalog.start_tile = None;
        let err = TrackGenerator::initialize(catalog, scenario_settings(), SeededRandom::new(1))
            .unwrap_err();
        assert!(matches!(
            err,
            TrackError::Configuration(ConfigurationError::MissingStartTile)
        ));
    }

    #[test]
    fn test_missing_bounds_fail_fast() {
        let mut catalog = scenario_catalog();
        catalog.turn_tiles[1].footprint = None;
        let err = TrackGenerator::initialize(catalog, scenario_settings(), SeededRandom::new(1))
            .unwrap_err();
        assert!(matches!(
            err,
            TrackError::GeometryAssumptionViolation { ref prefab, .. } if prefab == "right"
        ));
    }

    #[test]
    fn test_turn_then_extend_round() {
        let mut generator = seeded(scenario_catalog(), scenario_settings(), 21);
        let corner = generator.state().last_tile().unwrap().clone();
        let direction = if corner.kind == TileType::Left {
            TurnDirection::Left
        } else {
            TurnDirection::Right
        };
        let player = corner.position + Vec3::new(0.0, 0.4, -4.0);

        // Wrong way first: ignored, nothing changes
        let wrong = if direction == TurnDirection::Left {
            TurnDirection::Right
        } else {
            TurnDirection::Left
        };
        assert!(matches!(
            generator.commit_turn(player, wrong).unwrap(),
            TurnResolution::Rejected { .. }
        ));
        assert_eq!(generator.turns(), 0);

        let resolution = generator.commit_turn(player, direction).unwrap();
        let turn = resolution.accepted().copied().unwrap();
        assert_eq!(turn.tile, corner.id);
        assert_eq!(generator.heading(), Heading::North.turned(direction));
        assert_eq!(generator.turns(), 1);

        let events = generator.drain_events();
        assert!(events.iter().any(|e| matches!(
            e,
            TrackEvent::HeadingChanged { heading, .. } if *heading == turn.heading
        )));
        assert!(generator.drain_events().is_empty());

        // Still standing on the traversed corner: no second turn
        assert!(generator.turn_tile_at(player).is_none());
        assert_eq!(
            generator.try_resolve_turn(player, direction),
            TurnResolution::NoTurnAvailable
        );
    }

    #[test]
    fn test_player_standing_on_turn_tile_is_found() {
        // Corner top face is at y = 0.5, default marker reaches 2 units above it
        for y in [0.6, 1.0, 1.5, 2.4] {
            let mut generator = seeded(scenario_catalog(), scenario_settings(), 21);
            let corner = generator.state().last_tile().unwrap().clone();
            let direction = if corner.kind == TileType::Left {
                TurnDirection::Left
            } else {
                TurnDirection::Right
            };
            let player = Vec3::new(0.0, y, 30.0);
            assert_eq!(generator.turn_tile_at(player).map(|t| t.id), Some(corner.id));
            let resolution = generator.try_resolve_turn(player, direction);
            assert!(resolution.is_accepted(), "player at y={y}: {resolution:?}");
        }

        let generator = seeded(scenario_catalog(), scenario_settings(), 21);
        assert!(generator.turn_tile_at(Vec3::new(0.0, 3.0, 30.0)).is_none());
    }

    #[test]
    fn test_default_lane_width_overlaps_corner() {
        let mut generator = seeded(scenario_catalog(), scenario_settings(), 42);
        let corner = generator.state().last_tile().unwrap().clone();
        let report = generator.extend_after_turn(Heading::West).unwrap();
        let first = generator.state().tile(report.placed[0]).unwrap();

        // Half the start tile's width (0.5) minus the exit margin (1.0)
        let reach = corner.world_size.x / 2.0 + first.world_size.x / 2.0;
        let gap = (corner.position.x - first.position.x) - reach;
        assert!((gap + 0.5).abs() < POSITION_EPSILON, "gap {gap}");
    }

    #[test]
    fn test_events_stay_bounded_without_draining() {
        let mut generator = seeded(junction_catalog(), scenario_settings(), 17);
        let mut heading = generator.heading();
        for _ in 0..2000 {
            heading = heading.turned(TurnDirection::Left);
            generator.extend_after_turn(heading).unwrap();
        }
        assert_eq!(generator.state().events.len(), MAX_QUEUED_EVENTS);
        // Newest events survive
        let last_id = generator.state().last_tile().unwrap().id;
        assert!(generator.drain_events().iter().any(
            |e| matches!(e, TrackEvent::TileSpawned { id, .. } if *id == last_id)
        ));
        assert!(generator.state().events.is_empty());
    }

    #[test]
    fn test_seed_is_reported() {
        let generator = seeded(scenario_catalog(), scenario_settings(), 77);
        assert_eq!(generator.seed(), 77);
    }

    #[test]
    fn test_straight_tiles_have_no_turn_marker() {
        let generator = seeded(scenario_catalog(), scenario_settings(), 6);
        assert!(generator.turn_tile_at(Vec3::new(0.0, 0.5, 10.0)).is_none());
        assert_eq!(
            generator
                .turn_tile_at(Vec3::new(0.0, 0.5, 30.0))
                .map(|t| t.position),
            Some(Vec3::new(0.0, 0.0, 30.0))
        );
    }

    proptest! {
        #[test]
        fn prop_runs_contiguous(seed in any::<u64>(), lefts in prop::collection::vec(any::<bool>(), 1..6)) {
            let mut generator = seeded(junction_catalog(), scenario_settings(), seed);
            let mut heading = generator.heading();
            for left in lefts {
                heading = heading.turned(if left { TurnDirection::Left } else { TurnDirection::Right });
                let report = generator.extend_after_turn(heading).unwrap();
                assert_run_contiguous(&generator, &report);
                prop_assert!(report.run_length >= 3 && report.run_length < 8);
            }
        }

        #[test]
        fn prop_first_tile_never_hosts_obstacle(seed in any::<u64>(), p in 0.0f32..=1.0) {
            let settings = scenario_settings().with_obstacle_probability(p);
            let mut generator = seeded(scenario_catalog(), settings, seed);
            for heading in [Heading::West, Heading::North, Heading::East] {
                let report = generator.extend_after_turn(heading).unwrap();
                let first = report.placed[0];
                prop_assert!(generator.active_obstacles().all(|o| o.tile != first));
            }
        }

        #[test]
        fn prop_same_seed_same_track(seed in any::<u64>()) {
            let build = || {
                let mut generator = seeded(junction_catalog(), scenario_settings(), seed);
                generator.extend_after_turn(Heading::East).unwrap();
                generator.extend_after_turn(Heading::North).unwrap();
                generator
                    .active_tiles()
                    .map(|t| (t.kind, t.position))
                    .collect::<Vec<_>>()
            };
            prop_assert_eq!(build(), build());
        }
    }
}
