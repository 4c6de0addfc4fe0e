use std::collections::BinaryHeap;

use mazer_core::Point;

use crate::PathRange;
use crate::pathrange::{NO_PARENT, NodeRef};
use crate::traits::AstarPather;

impl PathRange {
    /// Start a fresh A* search: bump the node generation so every node reads
    /// as untouched.
    fn next_astar_generation(&mut self) -> u32 {
        self.astar_generation = self.astar_generation.wrapping_add(1);
        if self.astar_generation == 0 {
            for node in &mut self.astar_nodes {
                node.generation = 0;
            }
            self.astar_generation = 1;
        }
        self.astar_generation
    }

    /// Compute the shortest path from `from` to `to` using A*.
    ///
    /// The open set pops the lowest `f = g + h` first and, among equal `f`,
    /// the lowest `h`. Closed nodes are never re-expanded, and a neighbor is
    /// only pushed when it improves on the best `g` already recorded for its
    /// cell in this search.
    ///
    /// Returns the full path (including both endpoints) or `None` if no path
    /// exists within the current range.
    pub fn astar_path<P: AstarPather>(
        &mut self,
        pather: &P,
        from: Point,
        to: Point,
    ) -> Option<Vec<Point>> {
        let start_idx = self.idx(from)?;
        let goal_idx = self.idx(to)?;

        if start_idx == goal_idx {
            return Some(vec![from]);
        }

        let cur_gen = self.next_astar_generation();

        let start_h = pather.estimate(from, to);
        {
            let node = &mut self.astar_nodes[start_idx];
            node.g = 0;
            node.h = start_h;
            node.parent = NO_PARENT;
            node.generation = cur_gen;
            node.closed = false;
        }

        let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
        open.push(NodeRef {
            idx: start_idx,
            f: start_h,
            h: start_h,
        });

        let mut nbuf = std::mem::take(&mut self.nbuf);

        let found = 'search: loop {
            let Some(current) = open.pop() else {
                break 'search false;
            };

            let ci = current.idx;

            // A cheaper entry for this cell was already expanded.
            if self.astar_nodes[ci].closed {
                continue;
            }

            if ci == goal_idx {
                break 'search true;
            }

            self.astar_nodes[ci].closed = true;
            let current_g = self.astar_nodes[ci].g;
            let current_point = self.point(ci);

            nbuf.clear();
            pather.neighbors(current_point, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let tentative_g = current_g + pather.cost(current_point, np);

                let n = &mut self.astar_nodes[ni];
                if n.generation == cur_gen {
                    if n.closed || tentative_g >= n.g {
                        continue;
                    }
                } else {
                    n.generation = cur_gen;
                    n.closed = false;
                    n.h = pather.estimate(np, to);
                }

                n.g = tentative_g;
                n.parent = ci;

                open.push(NodeRef {
                    idx: ni,
                    f: tentative_g + n.h,
                    h: n.h,
                });
            }
        };

        self.nbuf = nbuf;

        if !found {
            return None;
        }
        Some(self.trace(|i| self.astar_nodes[i].parent, goal_idx))
    }
}
