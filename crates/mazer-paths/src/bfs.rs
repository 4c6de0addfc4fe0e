use mazer_core::Point;

use crate::PathRange;
use crate::pathrange::{NO_PARENT, UNREACHABLE};
use crate::traits::Pather;

impl PathRange {
    /// Compute a shortest hop-count path from `from` to `to` with a
    /// breadth-first search.
    ///
    /// Each step has cost 1. The search stops as soon as `to` is dequeued.
    /// Returns the full path (including both endpoints) or `None` if `to`
    /// cannot be reached or either endpoint lies outside the range.
    pub fn bfs_path<P: Pather>(&mut self, pather: &P, from: Point, to: Point) -> Option<Vec<Point>> {
        let start_idx = self.idx(from)?;
        let goal_idx = self.idx(to)?;

        // Reset.
        self.bfs_map.fill(UNREACHABLE);
        self.bfs_parent.fill(NO_PARENT);
        self.bfs_queue.clear();

        self.bfs_map[start_idx] = 0;
        self.bfs_queue.push_back(start_idx);

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut found = false;

        while let Some(ci) = self.bfs_queue.pop_front() {
            if ci == goal_idx {
                found = true;
                break;
            }
            let next_dist = self.bfs_map[ci] + 1;
            let cp = self.point(ci);

            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                if self.bfs_map[ni] != UNREACHABLE {
                    continue;
                }
                self.bfs_map[ni] = next_dist;
                self.bfs_parent[ni] = ci;
                self.bfs_queue.push_back(ni);
            }
        }

        self.nbuf = nbuf;

        if !found {
            return None;
        }
        Some(self.trace(|i| self.bfs_parent[i], goal_idx))
    }

    /// Hop distance from the source of the last [`bfs_path`](Self::bfs_path)
    /// call, or `None` if the point was not reached before the search ended.
    pub fn bfs_at(&self, p: Point) -> Option<i32> {
        let d = self.bfs_map[self.idx(p)?];
        (d != UNREACHABLE).then_some(d)
    }
}
