//! Randomised-BFS perfect-maze carver.

use std::collections::VecDeque;

use rand::Rng;

use crate::error::{MapgenError, MapgenResult};
use crate::grid::{Tile, TileGrid};

const STEPS: [(i32, i32); 4] = [(0, -2), (0, 2), (-2, 0), (2, 0)];

/// Carves a perfect maze into a fresh all-Rock grid: starts from a random
/// odd-parity interior cell, then repeatedly pops a frontier cell, looks two
/// steps away in each cardinal direction for cells still Rock, and carves
/// through a uniformly-chosen one — re-queuing both ends so a cell keeps
/// growing new branches until it has none left.
pub fn generate(width: i32, height: i32, rng: &mut impl Rng) -> MapgenResult<TileGrid> {
    if width < 3 || height < 3 {
        return Err(MapgenError::InvalidConfig("maze needs at least a 3x3 region".into()));
    }

    let mut grid = TileGrid::new(width, height)?;

    let xs = odd_coords(1, width - 1);
    let ys = odd_coords(1, height - 1);
    if xs.is_empty() || ys.is_empty() {
        return Err(MapgenError::InvalidConfig("maze region has no odd-parity interior cell".into()));
    }
    let start = (xs[rng.gen_range(0..xs.len())], ys[rng.gen_range(0..ys.len())]);

    grid.set_tile(start.0, start.1, Tile::Corridor);
    let mut queue = VecDeque::new();
    queue.push_back(start);

    while let Some((cx, cy)) = queue.pop_front() {
        let candidates: Vec<(i32, i32)> = STEPS
            .iter()
            .map(|&(dx, dy)| (cx + dx, cy + dy))
            .filter(|&(nx, ny)| grid.in_bounds(nx, ny) && grid.tile_at(nx, ny) == Tile::Rock)
            .collect();
        if candidates.is_empty() {
            continue;
        }
        let chosen = candidates[rng.gen_range(0..candidates.len())];
        let wall = ((cx + chosen.0) / 2, (cy + chosen.1) / 2);
        grid.set_tile(wall.0, wall.1, Tile::Corridor);
        grid.set_tile(chosen.0, chosen.1, Tile::Corridor);
        queue.push_back((cx, cy));
        queue.push_back(chosen);
    }

    Ok(grid)
}

fn odd_coords(lo: i32, hi: i32) -> Vec<i32> {
    (lo..hi).filter(|v| v % 2 == 1).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::rand_core::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn rejects_too_small_a_region() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(generate(2, 2, &mut rng).is_err());
    }

    #[test]
    fn maze_21x21_is_a_single_connected_region() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let grid = generate(21, 21, &mut rng).unwrap();

        let total_corridor = (0..grid.height())
            .flat_map(|y| (0..grid.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| grid.tile_at(x, y) == Tile::Corridor)
            .count();
        assert!(total_corridor > 0);

        let largest = crate::flood_fill::largest_connected_area(&grid).unwrap();
        assert_eq!(crate::flood_fill::scored_count(&largest), total_corridor);
    }

    #[test]
    fn every_corridor_cell_has_at_least_one_corridor_neighbour() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let grid = generate(15, 15, &mut rng).unwrap();
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                if grid.tile_at(x, y) != Tile::Corridor {
                    continue;
                }
                let has_neighbour = [(0, -1), (0, 1), (-1, 0), (1, 0)]
                    .iter()
                    .any(|&(dx, dy)| grid.tile_at(x + dx, y + dy) == Tile::Corridor);
                assert!(has_neighbour, "isolated corridor cell at ({x},{y})");
            }
        }
    }
}
