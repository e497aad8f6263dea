//! Travel headings and turn input
//!
//! The track only ever runs along the four horizontal axes, so headings are
//! an enum rather than a free vector. Y is up, +Z is the starting heading.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// One of the four axis-aligned travel directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Heading {
    /// +Z
    #[default]
    North,
    /// +X
    East,
    /// -Z
    South,
    /// -X
    West,
}

impl Heading {
    /// Unit vector for this heading
    pub fn to_vec3(self) -> Vec3 {
        match self {
            Heading::North => Vec3::Z,
            Heading::East => Vec3::X,
            Heading::South => Vec3::NEG_Z,
            Heading::West => Vec3::NEG_X,
        }
    }

    /// Heading closest to an axis-aligned unit vector
    ///
    /// Returns `None` for vectors that are not (approximately) one of the four
    /// horizontal axes.
    pub fn from_vec3(dir: Vec3) -> Option<Self> {
        const TOLERANCE: f32 = 1e-3;
        [Heading::North, Heading::East, Heading::South, Heading::West]
            .into_iter()
            .find(|h| h.to_vec3().abs_diff_eq(dir, TOLERANCE))
    }

    /// Rotation about +Y that maps local +Z onto this heading
    pub fn yaw(self) -> f32 {
        match self {
            Heading::North => 0.0,
            Heading::East => FRAC_PI_2,
            Heading::South => PI,
            Heading::West => -FRAC_PI_2,
        }
    }

    pub fn rotation(self) -> Quat {
        Quat::from_rotation_y(self.yaw())
    }

    /// Heading after a 90 degree turn; `Straight` keeps the heading
    pub fn turned(self, direction: TurnDirection) -> Self {
        match (direction, self) {
            (TurnDirection::Straight, h) => h,
            (TurnDirection::Right, Heading::North) => Heading::East,
            (TurnDirection::Right, Heading::East) => Heading::South,
            (TurnDirection::Right, Heading::South) => Heading::West,
            (TurnDirection::Right, Heading::West) => Heading::North,
            (TurnDirection::Left, Heading::North) => Heading::West,
            (TurnDirection::Left, Heading::West) => Heading::South,
            (TurnDirection::Left, Heading::South) => Heading::East,
            (TurnDirection::Left, Heading::East) => Heading::North,
        }
    }
}

/// Turn request from the input layer: -1 left, 0 none, +1 right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TurnDirection {
    Left,
    #[default]
    Straight,
    Right,
}

impl TurnDirection {
    /// Interpret a raw axis value. The sign decides; near-zero is `Straight`.
    pub fn from_axis(value: f32) -> Self {
        if value <= -0.5 {
            TurnDirection::Left
        } else if value >= 0.5 {
            TurnDirection::Right
        } else {
            TurnDirection::Straight
        }
    }

    pub fn as_axis(self) -> i8 {
        match self {
            TurnDirection::Left => -1,
            TurnDirection::Straight => 0,
            TurnDirection::Right => 1,
        }
    }

    pub fn is_turn(self) -> bool {
        self != TurnDirection::Straight
    }
}
