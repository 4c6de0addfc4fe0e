//! Maze generation and solving on top of `mazer-core` and `mazer-paths`:
//! spanning-carve and scatter generators, exit relocation with a repair
//! loop, BFS/A* solving, and the text layout format.

pub mod config;
pub mod exits;
pub mod layout;
pub mod mapgen;
pub mod session;
pub mod solve;

pub use config::MazeConfig;
pub use exits::RecentExits;
pub use layout::{LayoutError, Loaded, Symbols};
pub use mapgen::{DimensionError, Generated, MazeGen, Warning};
pub use session::{Session, SessionError};
pub use solve::{Algorithm, GridPather, PathResult};
