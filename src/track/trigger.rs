//! Spatial index of turn markers
//!
//! A uniform grid over the x/z plane. Each turn tile's trigger box is
//! registered in every cell it touches; lookups test only the candidates in
//! the player's cell. BTreeMap keeps iteration order stable.

use std::collections::BTreeMap;

use glam::Vec3;

use super::placement::Aabb;
use super::state::TileId;

type Cell = (i32, i32);

#[derive(Debug, Clone)]
pub struct TriggerIndex {
    cell_size: f32,
    /// Boxes are expanded by this much when registered so a probe sphere
    /// centred in a neighbouring cell is still found
    probe_radius: f32,
    cells: BTreeMap<Cell, Vec<TileId>>,
    boxes: BTreeMap<TileId, Aabb>,
}

impl TriggerIndex {
    pub fn new(cell_size: f32, probe_radius: f32) -> Self {
        Self {
            cell_size,
            probe_radius,
            cells: BTreeMap::new(),
            boxes: BTreeMap::new(),
        }
    }

    fn cell_of(&self, x: f32, z: f32) -> Cell {
        (
            (x / self.cell_size).floor() as i32,
            (z / self.cell_size).floor() as i32,
        )
    }

    fn cells_covering(&self, aabb: &Aabb) -> impl Iterator<Item = Cell> + use<> {
        let grown = aabb.expanded(self.probe_radius);
        let (x0, z0) = self.cell_of(grown.min.x, grown.min.z);
        let (x1, z1) = self.cell_of(grown.max.x, grown.max.z);
        (x0..=x1).flat_map(move |x| (z0..=z1).map(move |z| (x, z)))
    }

    pub fn insert(&mut self, id: TileId, aabb: Aabb) {
        for cell in self.cells_covering(&aabb) {
            self.cells.entry(cell).or_default().push(id);
        }
        self.boxes.insert(id, aabb);
    }

    pub fn remove(&mut self, id: TileId) {
        let Some(aabb) = self.boxes.remove(&id) else {
            return;
        };
        for cell in self.cells_covering(&aabb) {
            if let Some(ids) = self.cells.get_mut(&cell) {
                ids.retain(|&other| other != id);
                if ids.is_empty() {
                    self.cells.remove(&cell);
                }
            }
        }
    }

    /// Tiles whose trigger overlaps a probe sphere at `point`, oldest first
    pub fn query(&self, point: Vec3, radius: f32) -> Vec<TileId> {
        let mut hits: Vec<TileId> = self
            .cells
            .get(&self.cell_of(point.x, point.z))
            .into_iter()
            .flatten()
            .copied()
            .filter(|id| {
                self.boxes
                    .get(id)
                    .is_some_and(|aabb| aabb.intersects_sphere(point, radius))
            })
            .collect();
        hits.sort_unstable();
        hits.dedup();
        hits
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}
