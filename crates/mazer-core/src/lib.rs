//! **mazer-core**: the grid maze model.
//!
//! This crate provides the foundational types used across the *mazer*
//! workspace: geometry primitives, cell kinds, an owned cell matrix, and the
//! [`Maze`] that ties a matrix to its unique Start and Exit cells.

pub mod cell;
pub mod geom;
pub mod grid;
pub mod maze;

pub use cell::CellKind;
pub use geom::{Point, Range};
pub use grid::Grid;
pub use maze::Maze;
