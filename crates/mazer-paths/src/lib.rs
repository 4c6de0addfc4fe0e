//! Pathfinding algorithms for grid mazes.
//!
//! This crate provides the graph searches the maze engine relies on, all on
//! 4-connected 2D grids:
//!
//! - **BFS** shortest hop-count path ([`PathRange::bfs_path`])
//! - **A\*** shortest path with a Manhattan heuristic ([`PathRange::astar_path`])
//! - **Reachability** flood fill ([`PathRange::reachable`], [`PathRange::cc_map`])
//!
//! All algorithms operate through [`PathRange`], which owns and reuses internal
//! caches so that repeated queries incur zero allocations after warm-up.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | BFS, reachability |
//! | [`AstarPather`] : [`Pather`] | A* |

mod astar;
mod bfs;
mod cc;
mod distance;
mod pathrange;
mod traits;

pub use distance::manhattan;
pub use pathrange::PathRange;
pub use traits::{AstarPather, Pather};

#[cfg(test)]
mod testing;
