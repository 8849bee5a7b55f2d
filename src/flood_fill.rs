//! Largest connected passable region via repeated Dijkstra.

use crate::dijkstra::{dijkstra_score, EdgeCost};
use crate::graph::{DefaultPassable, Graph, Passable};
use crate::grid::TileGrid;

/// A distance-free edge cost: every edge costs 1, so `dijkstra_score` with
/// this turns into a breadth-first reachability count — the "no distance
/// function" flood-fill variant the glossary describes.
pub struct UnitCost;

impl EdgeCost for UnitCost {
    fn cost(&self, _grid: &TileGrid, _graph: &Graph, _current: usize, current_score: f64, _neighbour: usize) -> f64 {
        current_score + 1.0
    }
}

/// Number of cells with a finite score after a Dijkstra run from `seed`.
pub fn scored_count(graph: &Graph) -> usize {
    graph.iter().filter(|(_, n)| n.score.is_finite()).count()
}

/// Iterates every passable, unvisited cell; flood-fills from it via
/// [`dijkstra_score`] with [`UnitCost`]; keeps the region with the most
/// reached cells, discarding smaller ones. Returns `None` for an empty map
/// (no passable cells at all).
pub fn largest_connected_area(grid: &TileGrid) -> Option<Graph> {
    let mut visited = vec![false; (grid.width() * grid.height()).max(0) as usize];
    let mut best: Option<Graph> = None;
    let mut best_count = 0usize;

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let idx = (y * grid.width() + x) as usize;
            if visited[idx] || !grid.is_passable(x, y) {
                continue;
            }
            let mut graph = Graph::build(grid, &DefaultPassable, true);
            dijkstra_score(grid, &mut graph, idx, &UnitCost);
            let count = scored_count(&graph);
            for (i, node) in graph.iter() {
                if node.score.is_finite() {
                    visited[i] = true;
                }
            }
            if count > best_count {
                best_count = count;
                best = Some(graph);
            }
        }
    }

    best
}

/// Demotes every cell not part of the largest connected passable region
/// back to Rock (used by the `Randomly` corridor strategy and the automata
/// generator's "cull unconnected" pass).
pub fn cull_unconnected(grid: &mut crate::grid::TileGrid) {
    use crate::grid::Tile;
    let Some(largest) = largest_connected_area(grid) else { return };
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            if !grid.is_passable(x, y) {
                continue;
            }
            let idx = largest.index_of(x, y);
            if !largest.node(idx).score.is_finite() {
                grid.set_tile(x, y, Tile::Rock);
            }
        }
    }
}
