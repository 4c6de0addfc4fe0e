//! The [`Maze`] type: a [`Grid`] plus its unique Start and Exit cells.

use crate::cell::CellKind;
use crate::geom::{Point, Range};
use crate::grid::Grid;

/// A rectangular maze: a cell matrix with one Start and one Exit.
///
/// Mutation goes through [`set`](Maze::set), [`place_start`](Maze::place_start)
/// and [`place_exit`](Maze::place_exit). `set` never moves the endpoints, so
/// callers writing `Start` or `Exit` kinds directly are responsible for
/// keeping exactly one of each.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Maze {
    grid: Grid,
    start: Point,
    exit: Point,
}

impl Maze {
    /// Build a maze from a grid and its endpoints. The endpoint cells are
    /// marked `Start` and `Exit` in the grid.
    pub fn new(mut grid: Grid, start: Point, exit: Point) -> Self {
        grid.set(start, CellKind::Start);
        grid.set(exit, CellKind::Exit);
        Self { grid, start, exit }
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.grid.height()
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> i32 {
        self.grid.width()
    }

    /// Size as a `Point` (cols = x, rows = y).
    #[inline]
    pub fn size(&self) -> Point {
        self.grid.size()
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        self.grid.bounds()
    }

    /// All cells strictly inside the border.
    #[inline]
    pub fn interior(&self) -> Range {
        self.grid.bounds().shift(1, 1, -1, -1)
    }

    /// Read-only access to the underlying cell matrix.
    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Cell kind at `p`, or `None` outside the maze.
    #[inline]
    pub fn at(&self, p: Point) -> Option<CellKind> {
        self.grid.at(p)
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    #[inline]
    pub fn exit(&self) -> Point {
        self.exit
    }

    /// Whether a walker may step onto `p`.
    #[inline]
    pub fn is_passable(&self, p: Point) -> bool {
        self.grid.at(p).is_some_and(CellKind::is_passable)
    }

    /// Whether `p` lies on the outermost ring of cells.
    pub fn is_border(&self, p: Point) -> bool {
        self.grid.contains(p)
            && (p.x == 0 || p.y == 0 || p.x == self.cols() - 1 || p.y == self.rows() - 1)
    }

    /// Whether `p` is one of the four corner cells.
    pub fn is_corner(&self, p: Point) -> bool {
        self.grid.contains(p)
            && (p.x == 0 || p.x == self.cols() - 1)
            && (p.y == 0 || p.y == self.rows() - 1)
    }

    /// Set the kind of a single cell. Does nothing outside the maze.
    #[inline]
    pub fn set(&mut self, p: Point, kind: CellKind) {
        self.grid.set(p, kind);
    }

    /// Fill the whole maze with `kind`. Start and Exit coordinates are kept
    /// but their cells are overwritten.
    pub fn fill(&mut self, kind: CellKind) {
        self.grid.fill(kind);
    }

    /// Fill a sub-rectangle with `kind`.
    pub fn fill_range(&mut self, rng: Range, kind: CellKind) {
        self.grid.fill_range(rng, kind);
    }

    /// Move the Start to `p`. The previous Start cell, if still marked
    /// `Start`, becomes `Open`.
    pub fn place_start(&mut self, p: Point) {
        if self.grid.at(self.start) == Some(CellKind::Start) {
            self.grid.set(self.start, CellKind::Open);
        }
        self.start = p;
        self.grid.set(p, CellKind::Start);
    }

    /// Move the Exit to `p`. The previous Exit cell, if still marked `Exit`,
    /// becomes `Barrier`.
    pub fn place_exit(&mut self, p: Point) {
        if self.grid.at(self.exit) == Some(CellKind::Exit) {
            self.grid.set(self.exit, CellKind::Barrier);
        }
        self.exit = p;
        self.grid.set(p, CellKind::Exit);
    }

    /// Turn every `Path` cell back into `Open`. Returns how many were cleared.
    pub fn clear_path(&mut self) -> usize {
        let mut cleared = 0;
        self.grid.map_cells(|_, kind| {
            if kind == CellKind::Path {
                cleared += 1;
                CellKind::Open
            } else {
                kind
            }
        });
        cleared
    }

    /// Count how many cells equal `kind`.
    #[inline]
    pub fn count(&self, kind: CellKind) -> usize {
        self.grid.count(kind)
    }
}
