//! Path lifecycle.

use std::collections::VecDeque;

use crate::dijkstra::{dijkstra_score, EdgeCost};
use crate::geometry::Point;
use crate::graph::{Graph, Passable};
use crate::grid::TileGrid;

/// An ordered sequence of points from `start` to `end`. `walk` consumes it
/// one point at a time; walking past the last point yields `None` with
/// nothing left to free — `VecDeque` ownership frees each node as it's
/// walked, with no way to leak a partially-walked path.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    points: VecDeque<Point>,
}

impl Path {
    pub fn new() -> Self {
        Self { points: VecDeque::new() }
    }

    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Self {
        Self { points: points.into_iter().collect() }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&Point> {
        self.points.front()
    }

    pub fn last(&self) -> Option<&Point> {
        self.points.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }

    pub fn push_front(&mut self, p: Point) {
        self.points.push_front(p);
    }

    pub fn push_back(&mut self, p: Point) {
        self.points.push_back(p);
    }

    /// Pops and returns the current head. `None` once exhausted.
    pub fn walk(&mut self) -> Option<Point> {
        self.points.pop_front()
    }
}

impl FromIterator<Point> for Path {
    fn from_iter<T: IntoIterator<Item = Point>>(iter: T) -> Self {
        Self::from_points(iter)
    }
}

/// Computes a Dijkstra score from `end`, then descends from `start` via
/// repeated `lowest_scored_neighbour` lookups, producing a path that begins
/// at `start` and ends at `end`. `start == end` is a one-point path. An
/// unreachable `end` from `start` yields a path of just `start`.
pub fn path_create(
    grid: &TileGrid,
    graph: &mut Graph,
    passable: &impl Passable,
    start: (i32, i32),
    end: (i32, i32),
    edge_cost: &impl EdgeCost,
) -> Path {
    let _ = passable; // graph already reflects the passability used to build it
    let seed = graph.index_of(end.0, end.1);
    dijkstra_score(grid, graph, seed, edge_cost);

    let start_idx = graph.index_of(start.0, start.1);
    let mut path = Path::new();
    path.push_back(graph.node(start_idx).point);

    if start == end {
        return path;
    }

    let mut cur = start_idx;
    loop {
        if graph.node(cur).score == 0.0 {
            break;
        }
        let Some(next) = graph.lowest_scored_neighbour(cur) else {
            // Unreachable: no downhill neighbour. Report just the start.
            return Path::from_points([graph.node(start_idx).point]);
        };
        path.push_back(graph.node(next).point);
        cur = next;
    }

    path
}
