//! Map generation configuration.
//!
//! Plain data structs plus a `::normal()` constructor for each, in the same
//! shape as `GameConfig`'s difficulty presets in
//! `examples/arte-fact-the-cave/src/config.rs`.

use crate::error::{MapgenError, MapgenResult};

/// Which corridor-carving strategy the BSP generator should use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CorridorStrategy {
    /// No corridor carving at all; rooms are placed but left unconnected.
    None,
    /// Walk leaves left-to-right, carve a biased-Dijkstra corridor to a
    /// random other leaf, then cull everything outside the largest region.
    Randomly,
    /// Recursive descent: at each internal node, connect a random leaf from
    /// the left subtree to a random leaf from the right via biased Dijkstra.
    Bsp,
    /// Same recursive descent as `Bsp` but carves straight L-shaped
    /// corridors with no pathfinding.
    Simple,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BspConfig {
    pub room_min_w: i32,
    pub room_max_w: i32,
    pub room_min_h: i32,
    pub room_max_h: i32,
    pub room_padding: i32,
    pub draw_corridors: CorridorStrategy,
    pub draw_doors: bool,
    pub max_splits: i32,
}

impl BspConfig {
    /// The defaults named by the "Minimal 80×25 BSP" scenario.
    pub fn normal() -> Self {
        Self {
            room_min_w: 4,
            room_max_w: 6,
            room_min_h: 4,
            room_max_h: 6,
            room_padding: 1,
            draw_corridors: CorridorStrategy::Randomly,
            draw_doors: true,
            max_splits: 100,
        }
    }

    /// Checks for the invalid configurations that warrant
    /// `MapgenError::InvalidConfig`: non-positive dimensions, inverted
    /// min/max pairs, a negative split ceiling.
    pub fn validate(&self) -> MapgenResult<()> {
        if self.room_min_w <= 0 || self.room_min_h <= 0 || self.room_max_w <= 0 || self.room_max_h <= 0 {
            return Err(MapgenError::InvalidConfig("room dimensions must be positive".into()));
        }
        if self.room_min_w > self.room_max_w || self.room_min_h > self.room_max_h {
            return Err(MapgenError::InvalidConfig("room min must not exceed room max".into()));
        }
        if self.room_padding < 0 {
            return Err(MapgenError::InvalidConfig("room padding must not be negative".into()));
        }
        if self.max_splits < 0 {
            return Err(MapgenError::InvalidConfig("max_splits must not be negative".into()));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AutomataConfig {
    /// Percent chance (1..=100) a cell starts Rock.
    pub chance_cell_initialized: u32,
    pub birth_threshold: u32,
    pub survival_threshold: u32,
    pub max_iterations: u32,
    pub draw_corridors: bool,
    pub cull_unconnected: bool,
    pub fill_border: bool,
}

impl AutomataConfig {
    pub fn normal() -> Self {
        Self {
            chance_cell_initialized: 45,
            birth_threshold: 5,
            survival_threshold: 4,
            max_iterations: 4,
            draw_corridors: true,
            cull_unconnected: true,
            fill_border: true,
        }
    }

    pub fn validate(&self) -> MapgenResult<()> {
        if self.chance_cell_initialized == 0 || self.chance_cell_initialized > 100 {
            return Err(MapgenError::InvalidConfig("chance_cell_initialized must be in 1..=100".into()));
        }
        if self.birth_threshold > 8 || self.survival_threshold > 8 {
            return Err(MapgenError::InvalidConfig("birth/survival thresholds must be within the 8-neighbour ring".into()));
        }
        Ok(())
    }
}
