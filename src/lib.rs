//! A tile-based procedural map generation toolkit: BSP/cellular-automata/
//! maze generators, Dijkstra pathfinding, shadowcast field of view, and the
//! neighbour-graph and priority-queue primitives they share.

pub mod bsp;
pub mod config;
pub mod dijkstra;
pub mod error;
pub mod flood_fill;
pub mod generators;
pub mod geometry;
pub mod graph;
pub mod grid;
pub mod heap;
pub mod line;
pub mod path;

#[cfg(feature = "fov")]
pub mod fov;

pub use bsp::{BspNode, BspTree, SplitDirection};
pub use config::{AutomataConfig, BspConfig, CorridorStrategy};
pub use dijkstra::{dijkstra_score, DistanceEdgeCost, EdgeCost};
pub use error::{MapgenError, MapgenResult};
pub use flood_fill::{cull_unconnected, largest_connected_area, scored_count};
pub use geometry::{Chebyshev, Distance, Euclidean, Manhattan, Point, Simple};
pub use graph::{DefaultPassable, Graph, GraphNode, Passable};
pub use grid::{Tile, TileGrid, WallMask};
pub use heap::PriorityQueue;
pub use line::rasterize_line;
pub use path::{path_create, Path};

#[cfg(feature = "fov")]
pub use fov::{compute_fov, Visibility, VisibilityGrid, MAX_FOV_RECURSION};

pub use generators::automata_gen;
pub use generators::bsp_gen;
pub use generators::maze_gen;
