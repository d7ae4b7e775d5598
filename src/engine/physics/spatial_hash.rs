// Uniform-grid broad phase

use super::handle::{BodyHandle, BodyPair};
use super::shape::Aabb;
use std::collections::{HashMap, HashSet};

/// Default side length of a grid cell in world units
pub const DEFAULT_CELL_SIZE: f32 = 100.0;

/// Integer grid coordinate of a cell
type CellKey = (i32, i32);

/// Uniform grid over body bounding boxes
///
/// A body is registered in every cell its AABB touches, so bodies straddling
/// cell borders appear in several buckets. The grid is rebuilt from scratch
/// every step (`clear` then `insert`).
#[derive(Debug, Clone)]
pub struct SpatialHash {
    cell_size: f32,
    cells: HashMap<CellKey, Vec<BodyHandle>>,
}

impl SpatialHash {
    /// Create an empty grid; `cell_size` must be positive
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size,
            cells: HashMap::new(),
        }
    }

    /// Side length of a cell
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Number of non-empty cells
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Remove every registration
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Register a body in every cell its box spans
    pub fn insert(&mut self, handle: BodyHandle, aabb: &Aabb) {
        let ((min_x, min_y), (max_x, max_y)) = self.cell_range(aabb);
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                self.cells.entry((x, y)).or_default().push(handle);
            }
        }
    }

    /// All bodies sharing at least one cell with `aabb`, without duplicates
    pub fn query(&self, aabb: &Aabb) -> Vec<BodyHandle> {
        let ((min_x, min_y), (max_x, max_y)) = self.cell_range(aabb);
        let mut seen = HashSet::new();
        let mut result = Vec::new();

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let Some(bucket) = self.cells.get(&(x, y)) else {
                    continue;
                };
                for &handle in bucket {
                    if seen.insert(handle) {
                        result.push(handle);
                    }
                }
            }
        }

        result.sort_unstable();
        result
    }

    /// Every unordered pair of bodies that share a cell, each pair emitted once
    ///
    /// Pairs are sorted so the output does not depend on hash-map iteration order.
    pub fn query_all_potential_collisions(&self) -> Vec<BodyPair> {
        let mut seen = HashSet::new();
        let mut pairs = Vec::new();

        for bucket in self.cells.values() {
            for (i, &a) in bucket.iter().enumerate() {
                for &b in &bucket[i + 1..] {
                    if a == b {
                        continue;
                    }
                    let pair = BodyPair::new(a, b);
                    if seen.insert(pair) {
                        pairs.push(pair);
                    }
                }
            }
        }

        pairs.sort_unstable();
        pairs
    }

    /// Inclusive cell range covered by a box
    fn cell_range(&self, aabb: &Aabb) -> (CellKey, CellKey) {
        let min = (aabb.min / self.cell_size).floor();
        let max = (aabb.max / self.cell_size).floor();
        ((min.x as i32, min.y as i32), (max.x as i32, max.y as i32))
    }
}

impl Default for SpatialHash {
    fn default() -> Self {
        Self::new(DEFAULT_CELL_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn handle(index: u32) -> BodyHandle {
        BodyHandle::new(index, 0)
    }

    fn square(x: f32, y: f32, half: f32) -> Aabb {
        Aabb::new(Vec2::new(x - half, y - half), Vec2::new(x + half, y + half))
    }

    /// Small deterministic generator for randomized scenes
    struct XorShift(u64);

    impl XorShift {
        fn next_f32(&mut self) -> f32 {
            self.0 ^= self.0 << 13;
            self.0 ^= self.0 >> 7;
            self.0 ^= self.0 << 17;
            (self.0 >> 40) as f32 / (1u64 << 24) as f32
        }

        fn range(&mut self, min: f32, max: f32) -> f32 {
            min + (max - min) * self.next_f32()
        }
    }

    #[test]
    fn test_single_cell_pair() {
        let mut hash = SpatialHash::new(10.0);
        hash.insert(handle(0), &square(2.0, 2.0, 1.0));
        hash.insert(handle(1), &square(4.0, 4.0, 1.0));

        let pairs = hash.query_all_potential_collisions();
        assert_eq!(pairs, vec![BodyPair::new(handle(0), handle(1))]);
    }

    #[test]
    fn test_straddling_body_registers_in_every_cell() {
        let mut hash = SpatialHash::new(10.0);
        // Spans cells x in [-1, 0], y in [-1, 0]
        hash.insert(handle(0), &square(0.0, 0.0, 1.0));

        assert_eq!(hash.cell_count(), 4);
    }

    #[test]
    fn test_pair_sharing_many_cells_emitted_once() {
        let mut hash = SpatialHash::new(10.0);
        hash.insert(handle(0), &square(0.0, 0.0, 15.0));
        hash.insert(handle(1), &square(1.0, 1.0, 15.0));

        let pairs = hash.query_all_potential_collisions();
        assert_eq!(pairs.len(), 1);
    }

    #[test]
    fn test_distant_bodies_not_paired() {
        let mut hash = SpatialHash::new(10.0);
        hash.insert(handle(0), &square(5.0, 5.0, 1.0));
        hash.insert(handle(1), &square(55.0, 5.0, 1.0));

        assert!(hash.query_all_potential_collisions().is_empty());
    }

    #[test]
    fn test_clear() {
        let mut hash = SpatialHash::new(10.0);
        hash.insert(handle(0), &square(5.0, 5.0, 1.0));
        hash.insert(handle(1), &square(6.0, 5.0, 1.0));
        hash.clear();

        assert_eq!(hash.cell_count(), 0);
        assert!(hash.query_all_potential_collisions().is_empty());
    }

    #[test]
    fn test_query_deduplicates() {
        let mut hash = SpatialHash::new(10.0);
        hash.insert(handle(0), &square(10.0, 10.0, 3.0));
        hash.insert(handle(1), &square(40.0, 40.0, 1.0));

        let found = hash.query(&square(10.0, 10.0, 2.0));
        assert_eq!(found, vec![handle(0)]);
    }

    #[test]
    fn test_shared_edge_lands_in_common_cell() {
        let mut hash = SpatialHash::new(10.0);
        let left = Aabb::new(Vec2::new(5.0, 0.0), Vec2::new(10.0, 5.0));
        let right = Aabb::new(Vec2::new(10.0, 0.0), Vec2::new(15.0, 5.0));
        hash.insert(handle(0), &left);
        hash.insert(handle(1), &right);

        assert_eq!(hash.query_all_potential_collisions().len(), 1);
    }

    #[test]
    fn test_superset_of_brute_force_overlaps() {
        let mut rng = XorShift(0x9E37_79B9_7F4A_7C15);

        for _ in 0..20 {
            let boxes: Vec<Aabb> = (0..60)
                .map(|_| {
                    let center = Vec2::new(rng.range(-200.0, 200.0), rng.range(-200.0, 200.0));
                    let half = Vec2::new(rng.range(1.0, 30.0), rng.range(1.0, 30.0));
                    Aabb::new(center - half, center + half)
                })
                .collect();

            let mut hash = SpatialHash::new(25.0);
            for (i, aabb) in boxes.iter().enumerate() {
                hash.insert(handle(i as u32), aabb);
            }
            let candidates: HashSet<BodyPair> =
                hash.query_all_potential_collisions().into_iter().collect();

            for i in 0..boxes.len() {
                for j in (i + 1)..boxes.len() {
                    if boxes[i].overlaps(&boxes[j]) {
                        let pair = BodyPair::new(handle(i as u32), handle(j as u32));
                        assert!(candidates.contains(&pair), "Missed {:?}", pair);
                    }
                }
            }
        }
    }
}
