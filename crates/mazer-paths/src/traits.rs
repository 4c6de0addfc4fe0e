use mazer_core::Point;

/// Minimal search interface: which cells can be entered from `p`.
pub trait Pather {
    /// Append the cells reachable in one step from `p` into `buf`.
    /// The caller clears `buf` before calling.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);
}

/// Pather usable by A*: adds a step cost and an admissible heuristic.
pub trait AstarPather: Pather {
    /// Cost of moving from `from` to adjacent `to`. Must be > 0.
    ///
    /// Mazes have uniform terrain, so every step costs 1 unless overridden.
    fn cost(&self, _from: Point, _to: Point) -> i32 {
        1
    }

    /// Estimate of the remaining cost from `from` to `to`.
    /// Must never overestimate the true cost.
    fn estimate(&self, from: Point, to: Point) -> i32;
}
