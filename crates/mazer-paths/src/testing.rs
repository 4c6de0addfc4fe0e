//! ASCII fixtures shared by the search tests.

use mazer_core::{Point, Range};

use crate::{AstarPather, Pather, manhattan};

/// A pather over an ASCII map where `#` blocks and everything else is open.
pub(crate) struct AsciiPather {
    rows: Vec<Vec<char>>,
}

impl AsciiPather {
    pub(crate) fn new(map: &str) -> Self {
        Self {
            rows: map.lines().map(|l| l.trim().chars().collect()).collect(),
        }
    }

    pub(crate) fn range(&self) -> Range {
        Range::new(0, 0, self.rows[0].len() as i32, self.rows.len() as i32)
    }

    /// Position of the first occurrence of `ch`.
    pub(crate) fn find(&self, ch: char) -> Point {
        for (y, row) in self.rows.iter().enumerate() {
            if let Some(x) = row.iter().position(|&c| c == ch) {
                return Point::new(x as i32, y as i32);
            }
        }
        panic!("no {ch:?} in fixture");
    }

    pub(crate) fn is_open(&self, p: Point) -> bool {
        if p.x < 0 || p.y < 0 {
            return false;
        }
        self.rows
            .get(p.y as usize)
            .and_then(|row| row.get(p.x as usize))
            .is_some_and(|&c| c != '#')
    }
}

impl Pather for AsciiPather {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        buf.extend(p.neighbors_4().into_iter().filter(|&n| self.is_open(n)));
    }
}

impl AstarPather for AsciiPather {
    fn estimate(&self, from: Point, to: Point) -> i32 {
        manhattan(from, to)
    }
}
