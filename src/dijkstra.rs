//! Dijkstra scoring over a [`Graph`].

use crate::geometry::Distance;
use crate::graph::Graph;
use crate::grid::TileGrid;
use crate::heap::PriorityQueue;

/// The full custom-scoring capability: must itself fold in `current_score`,
/// unlike [`Distance`], which only measures between two points. This is the
/// form corridor carving needs.
pub trait EdgeCost {
    fn cost(&self, grid: &TileGrid, graph: &Graph, current: usize, current_score: f64, neighbour: usize) -> f64;
}

/// Wraps a [`Distance`] capability as an [`EdgeCost`] by adding it to the
/// current node's score — a thin adapter for callers that don't need a
/// custom cost function.
pub struct DistanceEdgeCost<D>(pub D);

impl<D: Distance> EdgeCost for DistanceEdgeCost<D> {
    fn cost(&self, _grid: &TileGrid, graph: &Graph, current: usize, current_score: f64, neighbour: usize) -> f64 {
        let a = graph.node(current).point;
        let b = graph.node(neighbour).point;
        current_score + self.0.distance(a, b)
    }
}

/// Scores every node reachable from `seed` using `edge_cost`. Seeds every
/// node to `+inf`, the seed cell to 0, then relaxes outward with a min-heap
/// keyed by score; each node enters the heap exactly once, the first time
/// its score drops below `+inf`.
pub fn dijkstra_score(grid: &TileGrid, graph: &mut Graph, seed: usize, edge_cost: &impl EdgeCost) {
    graph.reset_scores();
    graph.node_mut(seed).score = 0.0;

    let mut heap: PriorityQueue<(usize, f64)> = PriorityQueue::new(|a: &(usize, f64), b: &(usize, f64)| a.1 < b.1);
    heap.insert((seed, 0.0));

    while let Some((current, popped_score)) = heap.pop() {
        // Lazy deletion: a node can carry more than one heap entry once its
        // score improves after its first push. Stale entries are skipped.
        if popped_score > graph.node(current).score {
            continue;
        }
        let current_score = graph.node(current).score;
        let neighbours: Vec<usize> = graph
            .node(current)
            .neighbours()
            .iter()
            .filter_map(|n| n.map(|i| i as usize))
            .collect();
        for neighbour in neighbours {
            let cost = edge_cost.cost(grid, graph, current, current_score, neighbour);
            if cost < graph.node(neighbour).score {
                graph.node_mut(neighbour).score = cost;
                heap.insert((neighbour, cost));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Manhattan;
    use crate::graph::{DefaultPassable, Graph};
    use crate::grid::Tile;

    #[test]
    fn seed_score_is_zero() {
        let mut grid = TileGrid::new(3, 1).unwrap();
        for x in 0..3 {
            grid.set_tile(x, 0, Tile::Room);
        }
        let mut graph = Graph::build(&grid, &DefaultPassable, false);
        let seed = graph.index_of(2, 0);
        dijkstra_score(&grid, &mut graph, seed, &DistanceEdgeCost(Manhattan));
        assert_eq!(graph.node(seed).score, 0.0);
    }

    #[test]
    fn three_by_one_single_step_scores() {
        let mut grid = TileGrid::new(3, 1).unwrap();
        for x in 0..3 {
            grid.set_tile(x, 0, Tile::Room);
        }
        let mut graph = Graph::build(&grid, &DefaultPassable, false);
        let seed = graph.index_of(2, 0);
        dijkstra_score(&grid, &mut graph, seed, &DistanceEdgeCost(Manhattan));
        assert_eq!(graph.node(graph.index_of(1, 0)).score, 1.0);
        assert_eq!(graph.node(graph.index_of(0, 0)).score, 2.0);
    }

    #[test]
    fn isolated_region_stays_infinite() {
        let mut grid = TileGrid::new(5, 1).unwrap();
        grid.set_tile(0, 0, Tile::Room);
        grid.set_tile(1, 0, Tile::Room);
        // gap at x=2 (Rock) isolates x=3,4
        grid.set_tile(3, 0, Tile::Room);
        grid.set_tile(4, 0, Tile::Room);
        let mut graph = Graph::build(&grid, &DefaultPassable, false);
        let seed = graph.index_of(0, 0);
        dijkstra_score(&grid, &mut graph, seed, &DistanceEdgeCost(Manhattan));
        assert!(graph.node(graph.index_of(4, 0)).score.is_infinite());
    }

    #[test]
    fn finite_score_has_descending_path_to_seed() {
        let mut grid = TileGrid::new(4, 4).unwrap();
        for y in 0..4 {
            for x in 0..4 {
                grid.set_tile(x, y, Tile::Room);
            }
        }
        let mut graph = Graph::build(&grid, &DefaultPassable, true);
        let seed = graph.index_of(0, 0);
        dijkstra_score(&grid, &mut graph, seed, &DistanceEdgeCost(Manhattan));
        let start = graph.index_of(3, 3);
        let mut cur = start;
        let mut steps = 0;
        while graph.node(cur).score > 0.0 {
            let next = graph.lowest_scored_neighbour(cur).expect("finite score must have a descent");
            assert!(graph.node(next).score < graph.node(cur).score);
            cur = next;
            steps += 1;
            assert!(steps < 100, "descent should terminate quickly on a small grid");
        }
        assert_eq!(cur, seed);
    }
}
