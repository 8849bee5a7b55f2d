//! Map generator pipelines.
//!
//! Shared corridor-carving plumbing lives here; each generator picks its
//! own room/region layout, then calls down into this module to cut tiles.

pub mod automata_gen;
pub mod bsp_gen;
pub mod maze_gen;

use crate::dijkstra::EdgeCost;
use crate::geometry::{Distance, Manhattan};
use crate::graph::Graph;
use crate::grid::{Tile, TileGrid};

/// The corridor-biased scorer:
/// `r = current.score + manhattan(current, neighbour)`, then a surcharge
/// depending on what the neighbour cell currently is. Carving a corridor
/// through rock is cheap; carving through a corner wall is heavily
/// discouraged; any other wall gets a smaller discouragement so corridors
/// avoid running parallel to each other.
pub(crate) struct CorridorEdgeCost;

impl EdgeCost for CorridorEdgeCost {
    fn cost(&self, grid: &TileGrid, graph: &Graph, current: usize, current_score: f64, neighbour: usize) -> f64 {
        let a = graph.node(current).point;
        let b = graph.node(neighbour).point;
        let r = current_score + Manhattan.distance(a, b);
        let (nx, ny) = b.floor();
        if grid.tile_is(nx, ny, Tile::Door) {
            r
        } else if grid.is_corner_wall(nx, ny) {
            r + 99.0
        } else if grid.is_wall(nx, ny) {
            r + 9.0
        } else {
            r
        }
    }
}

/// Any in-bounds cell is a carving candidate, passable or not — corridor
/// carving must be able to cut through rock.
pub(crate) fn any_in_bounds(grid: &TileGrid, x: i32, y: i32) -> bool {
    grid.in_bounds(x, y)
}

/// Stamps every non-passable cell along `path` as Corridor, or Door when it
/// is also a room wall and `draw_doors` is set.
/// Cells that are already passable (room interiors at either endpoint) are
/// left untouched.
pub(crate) fn carve_path(grid: &mut TileGrid, path: &crate::path::Path, draw_doors: bool) {
    for p in path.iter() {
        let (x, y) = p.floor();
        if grid.is_passable(x, y) {
            continue;
        }
        if draw_doors && grid.is_room_wall(x, y) {
            grid.set_tile(x, y, Tile::Door);
        } else {
            grid.set_tile(x, y, Tile::Corridor);
        }
    }
}

/// Carves a straight L-shaped corridor between two points, longer axis
/// first, with no pathfinding.
pub(crate) fn carve_l_shaped(grid: &mut TileGrid, a: (i32, i32), b: (i32, i32), draw_doors: bool) {
    let (ax, ay) = a;
    let (bx, by) = b;
    let mut cells = Vec::new();
    if (bx - ax).abs() >= (by - ay).abs() {
        let (x0, x1) = (ax.min(bx), ax.max(bx));
        cells.extend((x0..=x1).map(|x| (x, ay)));
        let (y0, y1) = (ay.min(by), ay.max(by));
        cells.extend((y0..=y1).map(|y| (bx, y)));
    } else {
        let (y0, y1) = (ay.min(by), ay.max(by));
        cells.extend((y0..=y1).map(|y| (ax, y)));
        let (x0, x1) = (ax.min(bx), ax.max(bx));
        cells.extend((x0..=x1).map(|x| (x, by)));
    }
    for (x, y) in cells {
        if grid.is_passable(x, y) {
            continue;
        }
        if draw_doors && grid.is_room_wall(x, y) {
            grid.set_tile(x, y, Tile::Door);
        } else {
            grid.set_tile(x, y, Tile::Corridor);
        }
    }
}

/// Carves a corridor between two points using Dijkstra with the
/// corridor-biased cost.
/// Builds a throwaway graph over the whole grid (every in-bounds cell is a
/// candidate, passable or not) scoped to this one carve.
#[cfg(feature = "pathfinding")]
pub(crate) fn carve_dijkstra(grid: &mut TileGrid, a: (i32, i32), b: (i32, i32), draw_doors: bool) {
    let mut graph = Graph::build(grid, &any_in_bounds, true);
    let path = crate::path::path_create(grid, &mut graph, &any_in_bounds, a, b, &CorridorEdgeCost);
    carve_path(grid, &path, draw_doors);
}
