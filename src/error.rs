//! Error taxonomy for the map toolkit.
//!
//! Most queries in this crate are total (out-of-bounds reads return a safe
//! default, never an error). Only constructors and generators — the
//! operations with preconditions or that allocate — return a [`MapgenResult`].

/// Failure modes a generator or constructor can report.
///
/// `NullParameter` is reserved for APIs that accept an `Option<&dyn Trait>`
/// capability (a [`crate::graph::Passable`] or [`crate::dijkstra::EdgeCost`])
/// where a caller-supplied `None` does not make sense for that call site.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum MapgenError {
    #[error("allocation would exceed representable grid size")]
    Memory,
    #[error("required capability was not provided")]
    NullParameter,
    #[error("invalid map generation config: {0}")]
    InvalidConfig(String),
}

pub type MapgenResult<T> = Result<T, MapgenError>;
