//! Exit placement on the maze border.

use std::collections::HashSet;

use mazer_core::Point;
use rand::{Rng, RngExt};

/// Bounded memory of exit positions already handed out, so that repeated
/// relocations do not keep landing on the same few cells.
#[derive(Debug, Clone, Default)]
pub struct RecentExits {
    positions: HashSet<Point>,
}

impl RecentExits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn contains(&self, p: Point) -> bool {
        self.positions.contains(&p)
    }

    pub fn record(&mut self, p: Point) {
        self.positions.insert(p);
    }

    pub fn clear(&mut self) {
        self.positions.clear();
    }

    /// Forget everything once more than `cap` positions are remembered.
    pub fn trim_to(&mut self, cap: usize) {
        if self.positions.len() > cap {
            self.positions.clear();
        }
    }
}

/// Number of border cells of a `size` maze that are not corners.
pub fn border_slots(size: Point) -> usize {
    let horizontal = (size.x - 2).max(0) as usize;
    let vertical = (size.y - 2).max(0) as usize;
    2 * horizontal + 2 * vertical
}

/// Draw a random non-corner border cell of a `size` maze.
///
/// A side is chosen uniformly among the four (top, right, bottom, left), then
/// a position uniformly over that side's span excluding the corners. Sides
/// too short to have such a position are skipped; `None` means no side has
/// one.
pub fn random_border_point(rng: &mut impl Rng, size: Point) -> Option<Point> {
    let (w, h) = (size.x, size.y);
    let mut sides = [0u32; 4];
    let mut n = 0;
    for side in 0..4u32 {
        let span = if side % 2 == 0 { w - 2 } else { h - 2 };
        if span > 0 {
            sides[n] = side;
            n += 1;
        }
    }
    if n == 0 {
        return None;
    }
    let p = match sides[rng.random_range(0..n)] {
        0 => Point::new(1 + rng.random_range(0..w - 2), 0),
        1 => Point::new(w - 1, 1 + rng.random_range(0..h - 2)),
        2 => Point::new(1 + rng.random_range(0..w - 2), h - 1),
        _ => Point::new(0, 1 + rng.random_range(0..h - 2)),
    };
    Some(p)
}
