//! Placement math
//!
//! A tile's position is the centre of its footprint. Rotations are the
//! prefab's authored rotation composed with the heading alignment, and
//! world-space sizes are the axis-aligned extent of the rotated geometry.

use glam::{Mat3, Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::heading::Heading;
use crate::catalog::{TileType, TriggerBox};

/// World rotation of a prefab placed along `heading`
#[inline]
pub fn aligned_rotation(authored: Quat, heading: Heading) -> Quat {
    authored * heading.rotation()
}

/// Axis-aligned world extent of a box of `local_size` under `rotation`
pub fn world_extent(rotation: Quat, local_size: Vec3) -> Vec3 {
    let m = Mat3::from_quat(rotation);
    m.x_axis.abs() * local_size.x + m.y_axis.abs() * local_size.y + m.z_axis.abs() * local_size.z
}

/// Cursor after a straight tile of `world_size` placed at `position`
#[inline]
pub fn advance_straight(position: Vec3, world_size: Vec3, heading: Heading) -> Vec3 {
    position + world_size * heading.to_vec3()
}

/// Margins applied when the cursor jumps past a turn tile onto a new heading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnMargins {
    /// Trimmed from corner tiles
    pub exit_margin: f32,
    pub lane_width: f32,
}

/// Cursor for the first straight tile after a turn
///
/// SIDEWAYS tiles jump half their footprint, corners jump their footprint
/// less `exit_margin`; both add half a lane width so the new run's collision
/// volumes still touch the turn tile.
pub fn cursor_after_turn(
    turn_position: Vec3,
    turn_kind: TileType,
    turn_world_size: Vec3,
    heading: Heading,
    margins: TurnMargins,
) -> Vec3 {
    let half_lane = Vec3::splat(margins.lane_width / 2.0);
    let offset = if turn_kind == TileType::Sideways {
        turn_world_size / 2.0 + half_lane
    } else {
        turn_world_size - Vec3::splat(margins.exit_margin) + half_lane
    };
    turn_position + offset * heading.to_vec3()
}

/// World-space axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// A local trigger box carried by a tile at `position`/`rotation`
    pub fn from_trigger(trigger: &TriggerBox, position: Vec3, rotation: Quat) -> Self {
        let center = position + rotation * trigger.center;
        let half = world_extent(rotation, trigger.half_extents * 2.0) / 2.0;
        Self::from_center(center, half)
    }

    /// Sphere overlap test
    pub fn intersects_sphere(&self, center: Vec3, radius: f32) -> bool {
        let closest = center.clamp(self.min, self.max);
        closest.distance_squared(center) <= radius * radius
    }

    /// Box grown by `amount` on every side
    pub fn expanded(&self, amount: f32) -> Self {
        Self {
            min: self.min - Vec3::splat(amount),
            max: self.max + Vec3::splat(amount),
        }
    }
}
