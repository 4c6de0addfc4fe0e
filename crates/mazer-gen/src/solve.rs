//! Solving a [`Maze`]: shortest paths from Start to Exit and reachability.
//!
//! The searches themselves live in `mazer-paths`; this module adapts a maze
//! grid to the [`Pather`] traits, clears stale `Path` markings before each
//! search and marks the new solution.

use std::fmt;

use mazer_core::{CellKind, Grid, Maze, Point};
use mazer_paths::{AstarPather, PathRange, Pather, manhattan};

/// 4-connected pather over a maze grid: every non-barrier cell can be
/// entered.
pub struct GridPather<'a> {
    grid: &'a Grid,
}

impl<'a> GridPather<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self { grid }
    }
}

impl Pather for GridPather<'_> {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        for n in p.neighbors_4() {
            if self.grid.at(n).is_some_and(CellKind::is_passable) {
                buf.push(n);
            }
        }
    }
}

impl AstarPather for GridPather<'_> {
    fn estimate(&self, from: Point, to: Point) -> i32 {
        manhattan(from, to)
    }
}

/// Search algorithm used to solve a maze.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    /// Breadth-first search.
    Bfs,
    /// A* with a Manhattan heuristic.
    Astar,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bfs => f.write_str("BFS"),
            Self::Astar => f.write_str("A*"),
        }
    }
}

/// Outcome of a solve. Not finding a path is a normal result, not an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathResult {
    /// The full path, Start first and Exit last.
    Found(Vec<Point>),
    Unreachable,
}

impl PathResult {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// The path, if one was found.
    pub fn path(&self) -> Option<&[Point]> {
        match self {
            Self::Found(path) => Some(path),
            Self::Unreachable => None,
        }
    }

    /// Number of moves from Start to Exit.
    pub fn steps(&self) -> Option<usize> {
        self.path().map(|p| p.len().saturating_sub(1))
    }
}

/// Solve `maze` with `algorithm`, replacing any previous `Path` markings.
///
/// On success every cell strictly between Start and Exit is marked `Path`.
/// On failure no cell is marked.
pub fn solve(paths: &mut PathRange, maze: &mut Maze, algorithm: Algorithm) -> PathResult {
    maze.clear_path();
    paths.ensure_range(maze.bounds());

    let (from, to) = (maze.start(), maze.exit());
    let pather = GridPather::new(maze.grid());
    let found = match algorithm {
        Algorithm::Bfs => paths.bfs_path(&pather, from, to),
        Algorithm::Astar => paths.astar_path(&pather, from, to),
    };

    match found {
        Some(path) => {
            if path.len() > 2 {
                for &p in &path[1..path.len() - 1] {
                    maze.set(p, CellKind::Path);
                }
            }
            PathResult::Found(path)
        }
        None => PathResult::Unreachable,
    }
}

/// Solve `maze` with breadth-first search.
pub fn solve_bfs(paths: &mut PathRange, maze: &mut Maze) -> PathResult {
    solve(paths, maze, Algorithm::Bfs)
}

/// Solve `maze` with A*.
pub fn solve_astar(paths: &mut PathRange, maze: &mut Maze) -> PathResult {
    solve(paths, maze, Algorithm::Astar)
}

/// Whether `to` can be reached from `from` on `grid`.
pub fn connected(paths: &mut PathRange, grid: &Grid, from: Point, to: Point) -> bool {
    paths.ensure_range(grid.bounds());
    paths.reachable(&GridPather::new(grid), from, to)
}

/// Whether the Exit of `maze` can be reached from its Start.
pub fn reachable(paths: &mut PathRange, maze: &Maze) -> bool {
    connected(paths, maze.grid(), maze.start(), maze.exit())
}

/// Every cell reachable from the Start of `maze`, the Start included.
pub fn start_region(paths: &mut PathRange, maze: &Maze) -> Vec<Point> {
    paths.ensure_range(maze.bounds());
    paths.cc_map(&GridPather::new(maze.grid()), maze.start())
}
