//! Flood-fill reachability.

use mazer_core::Point;

use crate::PathRange;
use crate::traits::Pather;

impl PathRange {
    /// Start a fresh flood fill: bump the mark generation so every cell reads
    /// as unvisited.
    fn next_cc_generation(&mut self) -> u32 {
        self.cc_generation = self.cc_generation.wrapping_add(1);
        if self.cc_generation == 0 {
            self.cc_marks.fill(0);
            self.cc_generation = 1;
        }
        self.cc_generation
    }

    /// Report whether `to` can be reached from `from` by repeatedly stepping
    /// to neighbours (as defined by `pather`).
    ///
    /// The fill stops as soon as `to` is visited. Points outside the range
    /// are never reachable.
    pub fn reachable<P: Pather>(&mut self, pather: &P, from: Point, to: Point) -> bool {
        let (Some(si), Some(gi)) = (self.idx(from), self.idx(to)) else {
            return false;
        };
        if si == gi {
            return true;
        }

        let mark = self.next_cc_generation();
        let mut nbuf = std::mem::take(&mut self.nbuf);

        self.cc_stack.clear();
        self.cc_stack.push(si);
        self.cc_marks[si] = mark;

        let mut found = false;
        'fill: while let Some(ci) = self.cc_stack.pop() {
            let cp = self.point(ci);
            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                if self.cc_marks[ni] == mark {
                    continue;
                }
                if ni == gi {
                    found = true;
                    break 'fill;
                }
                self.cc_marks[ni] = mark;
                self.cc_stack.push(ni);
            }
        }

        self.nbuf = nbuf;
        found
    }

    /// Flood-fill from a single point and return the set of connected cells,
    /// `p` included.
    pub fn cc_map<P: Pather>(&mut self, pather: &P, p: Point) -> Vec<Point> {
        let mut result = Vec::new();
        let Some(si) = self.idx(p) else {
            return result;
        };

        let mark = self.next_cc_generation();
        let mut nbuf = std::mem::take(&mut self.nbuf);

        self.cc_stack.clear();
        self.cc_stack.push(si);
        self.cc_marks[si] = mark;
        result.push(p);

        while let Some(ci) = self.cc_stack.pop() {
            let cp = self.point(ci);
            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                if let Some(ni) = self.idx(np) {
                    if self.cc_marks[ni] != mark {
                        self.cc_marks[ni] = mark;
                        self.cc_stack.push(ni);
                        result.push(np);
                    }
                }
            }
        }

        self.nbuf = nbuf;
        result
    }
}
