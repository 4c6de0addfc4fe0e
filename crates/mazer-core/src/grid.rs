//! The [`Grid`] type: a row-major 2D matrix of [`CellKind`]s.

use crate::cell::CellKind;
use crate::geom::{Point, Range, RangeIter};

/// A 2D matrix of [`CellKind`]s, filled with [`CellKind::Barrier`] on creation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    cells: Vec<CellKind>,
    bounds: Range,
}

impl Grid {
    /// Create a new grid of the given dimensions, filled with barriers.
    pub fn new(width: i32, height: i32) -> Self {
        let w = width.max(0);
        let h = height.max(0);
        Self {
            cells: vec![CellKind::default(); (w as usize) * (h as usize)],
            bounds: Range::new(0, 0, w, h),
        }
    }

    /// The bounding range of the grid.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Size of the grid as a `Point` (width = x, height = y).
    #[inline]
    pub fn size(&self) -> Point {
        self.bounds.size()
    }

    /// Width (number of columns).
    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    /// Height (number of rows).
    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Whether `p` is inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some((p.y as usize) * (self.bounds.width() as usize) + (p.x as usize))
    }

    /// Get the cell at a point, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, p: Point) -> Option<CellKind> {
        self.index(p).map(|i| self.cells[i])
    }

    /// Set the cell at a point. Does nothing if out of bounds.
    #[inline]
    pub fn set(&mut self, p: Point, kind: CellKind) {
        if let Some(i) = self.index(p) {
            self.cells[i] = kind;
        }
    }

    /// Fill every cell in the grid with `kind`.
    pub fn fill(&mut self, kind: CellKind) {
        self.cells.fill(kind);
    }

    /// Fill every cell of `rng` (clipped to the grid) with `kind`.
    pub fn fill_range(&mut self, rng: Range, kind: CellKind) {
        for p in self.bounds.intersect(rng) {
            self.set(p, kind);
        }
    }

    /// Apply `f` to every cell, replacing each with the return value.
    pub fn map_cells(&mut self, mut f: impl FnMut(Point, CellKind) -> CellKind) {
        for (p, kind) in self.bounds.iter().zip(self.cells.iter_mut()) {
            *kind = f(p, *kind);
        }
    }

    /// Count how many cells equal `kind`.
    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|&&c| c == kind).count()
    }

    /// Row-major iterator over `(Point, CellKind)` pairs.
    pub fn iter(&self) -> GridIter<'_> {
        GridIter {
            cells: self.cells.iter(),
            points: self.bounds.iter(),
        }
    }
}

/// Iterator over `(Point, CellKind)` pairs in a [`Grid`].
pub struct GridIter<'a> {
    cells: std::slice::Iter<'a, CellKind>,
    points: RangeIter,
}

impl Iterator for GridIter<'_> {
    type Item = (Point, CellKind);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        Some((self.points.next()?, *self.cells.next()?))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.points.size_hint()
    }
}

impl ExactSizeIterator for GridIter<'_> {}

impl<'a> IntoIterator for &'a Grid {
    type Item = (Point, CellKind);
    type IntoIter = GridIter<'a>;

    fn into_iter(self) -> GridIter<'a> {
        self.iter()
    }
}
