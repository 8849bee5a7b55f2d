//! Cellular-automata cave generator.

use rand::Rng;

use crate::config::AutomataConfig;
use crate::error::MapgenResult;
use crate::grid::{Tile, TileGrid};

const EIGHT_NEIGHBOURS: [(i32, i32); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1, 0), (1, 0),
    (-1, 1), (0, 1), (1, 1),
];

/// Random fill → birth/survival iteration → optional corridor draw →
/// optional cull → optional border fill.
pub fn generate(width: i32, height: i32, cfg: &AutomataConfig, rng: &mut impl Rng) -> MapgenResult<TileGrid> {
    cfg.validate()?;

    let mut grid = TileGrid::new(width, height)?;
    for y in 0..height {
        for x in 0..width {
            let rock = rng.gen_range(1..=100) <= cfg.chance_cell_initialized;
            grid.set_tile(x, y, if rock { Tile::Rock } else { Tile::Room });
        }
    }

    for _ in 0..cfg.max_iterations {
        step(&mut grid, cfg);
    }

    if cfg.draw_corridors {
        #[cfg(feature = "pathfinding")]
        connect_regions(&mut grid, rng);
    }

    if cfg.cull_unconnected {
        crate::flood_fill::cull_unconnected(&mut grid);
    }

    if cfg.fill_border {
        fill_border(&mut grid);
    }

    Ok(grid)
}

/// One birth/survival generation, applied simultaneously over the whole
/// grid via a scratch buffer.
fn step(grid: &mut TileGrid, cfg: &AutomataConfig) {
    let w = grid.width();
    let h = grid.height();
    let mut next = vec![Tile::Rock; (w * h).max(0) as usize];

    for y in 0..h {
        for x in 0..w {
            let alive = count_alive_neighbours(grid, x, y);
            let currently_alive = grid.tile_at(x, y) == Tile::Rock;
            let born = !currently_alive && alive >= cfg.birth_threshold;
            let survives = currently_alive && alive >= cfg.survival_threshold;
            next[(y * w + x) as usize] = if born || survives { Tile::Rock } else { Tile::Room };
        }
    }

    for y in 0..h {
        for x in 0..w {
            grid.set_tile(x, y, next[(y * w + x) as usize]);
        }
    }
}

/// "Alive" means Rock or out-of-bounds.
fn count_alive_neighbours(grid: &TileGrid, x: i32, y: i32) -> u32 {
    EIGHT_NEIGHBOURS
        .iter()
        .filter(|&&(dx, dy)| {
            let (nx, ny) = (x + dx, y + dy);
            !grid.in_bounds(nx, ny) || grid.tile_at(nx, ny) == Tile::Rock
        })
        .count() as u32
}

/// Finds every distinct connected passable region and, for each, carves a
/// biased-Dijkstra corridor to a random other region.
#[cfg(feature = "pathfinding")]
fn connect_regions(grid: &mut TileGrid, rng: &mut impl Rng) {
    use crate::dijkstra::dijkstra_score;
    use crate::flood_fill::{scored_count, UnitCost};
    use crate::graph::{DefaultPassable, Graph};

    let mut visited = vec![false; (grid.width() * grid.height()).max(0) as usize];
    let mut regions: Vec<Graph> = Vec::new();

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let idx = (y * grid.width() + x) as usize;
            if visited[idx] || !grid.is_passable(x, y) {
                continue;
            }
            let mut graph = Graph::build(grid, &DefaultPassable, true);
            dijkstra_score(grid, &mut graph, idx, &UnitCost);
            for (i, node) in graph.iter() {
                if node.score.is_finite() {
                    visited[i] = true;
                }
            }
            if scored_count(&graph) > 0 {
                regions.push(graph);
            }
        }
    }

    if regions.len() < 2 {
        return;
    }

    for i in 0..regions.len() {
        let Some(a) = first_passable_point(&regions[i]) else { continue };
        let mut j = rng.gen_range(0..regions.len());
        if j == i {
            j = (j + 1) % regions.len();
        }
        let Some(b) = first_passable_point(&regions[j]) else { continue };
        super::carve_dijkstra(grid, a, b, true);
    }
}

#[cfg(feature = "pathfinding")]
fn first_passable_point(region: &crate::graph::Graph) -> Option<(i32, i32)> {
    region.iter().find(|(_, n)| n.score.is_finite()).map(|(_, n)| n.point.floor())
}

fn fill_border(grid: &mut TileGrid) {
    let w = grid.width();
    let h = grid.height();
    for x in 0..w {
        grid.set_tile(x, 0, Tile::Rock);
        grid.set_tile(x, h - 1, Tile::Rock);
    }
    for y in 0..h {
        grid.set_tile(0, y, Tile::Rock);
        grid.set_tile(w - 1, y, Tile::Rock);
    }
}
