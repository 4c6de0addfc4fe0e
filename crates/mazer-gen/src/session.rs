//! Caller-side state: the current maze, its symbols, and the tools that act
//! on it.

use std::fmt;

use log::info;
use mazer_core::Maze;
use mazer_paths::PathRange;
use rand::Rng;

use crate::config::MazeConfig;
use crate::layout::{self, LayoutError, Symbols};
use crate::mapgen::{DimensionError, MazeGen, Warning};
use crate::solve::{self, Algorithm, PathResult};

#[derive(Debug)]
pub enum SessionError {
    /// The operation needs a maze but none was generated or loaded yet.
    NoMaze,
    Dimensions(DimensionError),
    Layout(LayoutError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoMaze => f.write_str("no maze generated or loaded"),
            Self::Dimensions(err) => write!(f, "invalid dimensions: {err}"),
            Self::Layout(err) => write!(f, "invalid layout: {err}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NoMaze => None,
            Self::Dimensions(err) => Some(err),
            Self::Layout(err) => Some(err),
        }
    }
}

impl From<DimensionError> for SessionError {
    fn from(err: DimensionError) -> Self {
        Self::Dimensions(err)
    }
}

impl From<LayoutError> for SessionError {
    fn from(err: LayoutError) -> Self {
        Self::Layout(err)
    }
}

/// Holds at most one current maze and serializes every operation on it.
///
/// Generating or loading replaces the maze; solving and relocating mutate it
/// in place.
pub struct Session<R: Rng> {
    mapgen: MazeGen<R>,
    paths: PathRange,
    maze: Option<Maze>,
    symbols: Symbols,
}

impl<R: Rng> Session<R> {
    pub fn new(rng: R) -> Self {
        Self::with_config(MazeConfig::default(), rng)
    }

    pub fn with_config(config: MazeConfig, rng: R) -> Self {
        Self {
            mapgen: MazeGen::with_config(config, rng),
            paths: PathRange::new(Default::default()),
            maze: None,
            symbols: Symbols::default(),
        }
    }

    /// Generate a new maze, replacing the current one and resetting the
    /// symbols to their defaults. On error the current maze is kept.
    pub fn generate(
        &mut self,
        rows: i32,
        cols: i32,
        guarantee_path: bool,
    ) -> Result<Vec<Warning>, SessionError> {
        let generated = self.mapgen.generate(rows, cols, guarantee_path)?;
        self.maze = Some(generated.maze);
        self.symbols = Symbols::default();
        Ok(generated.warnings)
    }

    /// Load a maze from layout text. On error the current maze and symbols
    /// are kept.
    pub fn load(&mut self, text: &str) -> Result<(), SessionError> {
        let loaded = layout::load(text)?;
        info!(
            "loaded {}x{} maze, start {} exit {}",
            loaded.maze.rows(),
            loaded.maze.cols(),
            loaded.maze.start(),
            loaded.maze.exit()
        );
        self.mapgen.reset_exits(loaded.maze.exit());
        self.maze = Some(loaded.maze);
        self.symbols = loaded.symbols;
        Ok(())
    }

    /// Solve the current maze, replacing any previous path markings.
    pub fn solve(&mut self, algorithm: Algorithm) -> Result<PathResult, SessionError> {
        let maze = self.maze.as_mut().ok_or(SessionError::NoMaze)?;
        Ok(solve::solve(&mut self.paths, maze, algorithm))
    }

    pub fn solve_bfs(&mut self) -> Result<PathResult, SessionError> {
        self.solve(Algorithm::Bfs)
    }

    pub fn solve_astar(&mut self) -> Result<PathResult, SessionError> {
        self.solve(Algorithm::Astar)
    }

    /// Move the exit of the current maze to a fresh border cell. Path
    /// markings are cleared.
    pub fn relocate_exit(&mut self) -> Result<&Maze, SessionError> {
        let maze = self.maze.as_mut().ok_or(SessionError::NoMaze)?;
        self.mapgen.relocate_exit(maze);
        Ok(&*maze)
    }

    pub fn maze(&self) -> Option<&Maze> {
        self.maze.as_ref()
    }

    pub fn symbols(&self) -> &Symbols {
        &self.symbols
    }

    pub fn mapgen(&self) -> &MazeGen<R> {
        &self.mapgen
    }

    /// Draw the current maze with the active symbols.
    pub fn render(&self) -> Option<String> {
        self.maze.as_ref().map(|m| layout::render(m, &self.symbols))
    }

    /// The current maze in the layout format.
    pub fn export(&self) -> Result<String, SessionError> {
        let maze = self.maze.as_ref().ok_or(SessionError::NoMaze)?;
        Ok(layout::export(maze, &self.symbols))
    }

    /// Number of cells reachable from the start, the start included.
    pub fn start_region_size(&mut self) -> Result<usize, SessionError> {
        let maze = self.maze.as_ref().ok_or(SessionError::NoMaze)?;
        Ok(solve::start_region(&mut self.paths, maze).len())
    }
}
