use std::collections::VecDeque;

use mazer_core::{Point, Range};

// ---------------------------------------------------------------------------
// Internal node for A* priority-queue searches
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub(crate) struct Node {
    pub(crate) g: i32,
    pub(crate) h: i32,
    pub(crate) parent: usize,
    pub(crate) generation: u32,
    pub(crate) closed: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: 0,
            h: 0,
            parent: usize::MAX,
            generation: 0,
            closed: false,
        }
    }
}

/// Open-set entry for A*: a node index with its `f = g + h` and `h` at push
/// time.
///
/// Ordered so that `BinaryHeap` (a max-heap) pops the smallest `f` first,
/// then the smallest `h` (the entry closer to the goal), then the smallest
/// index so that searches are fully deterministic.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) f: i32,
    pub(crate) h: i32,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.h.cmp(&self.h))
            .then_with(|| other.idx.cmp(&self.idx))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Sentinel distance for cells the last BFS did not reach.
pub(crate) const UNREACHABLE: i32 = i32::MAX;

/// Sentinel parent index for search roots.
pub(crate) const NO_PARENT: usize = usize::MAX;

// ---------------------------------------------------------------------------
// PathRange
// ---------------------------------------------------------------------------

/// Central coordinator for searches on a maze rectangle.
///
/// `PathRange` owns all internal caches (node arrays, BFS distance and parent
/// maps, flood-fill marks) so that repeated queries on mazes of the same size
/// incur no allocations after the first use.
pub struct PathRange {
    pub(crate) rng: Range,
    pub(crate) width: usize,
    // A* caches
    pub(crate) astar_nodes: Vec<Node>,
    pub(crate) astar_generation: u32,
    // BFS caches
    pub(crate) bfs_map: Vec<i32>,
    pub(crate) bfs_parent: Vec<usize>,
    pub(crate) bfs_queue: VecDeque<usize>,
    // flood-fill caches
    pub(crate) cc_marks: Vec<u32>,
    pub(crate) cc_generation: u32,
    pub(crate) cc_stack: Vec<usize>,
    // shared scratch buffer for neighbor queries
    pub(crate) nbuf: Vec<Point>,
}

impl PathRange {
    /// Create a new `PathRange` for the given grid rectangle.
    pub fn new(rng: Range) -> Self {
        let w = rng.width().max(0) as usize;
        let len = rng.len();
        Self {
            rng,
            width: w,
            astar_nodes: vec![Node::default(); len],
            astar_generation: 0,
            bfs_map: vec![UNREACHABLE; len],
            bfs_parent: vec![NO_PARENT; len],
            bfs_queue: VecDeque::new(),
            cc_marks: vec![0; len],
            cc_generation: 0,
            cc_stack: Vec::new(),
            nbuf: Vec::with_capacity(4),
        }
    }

    /// Replace the underlying range, reallocating caches as needed.
    ///
    /// If the new size fits within existing capacity, caches are kept as
    /// they are. Otherwise caches are reallocated.
    pub fn set_range(&mut self, rng: Range) {
        let new_len = rng.len();
        let old_capacity = self.astar_nodes.len();
        self.rng = rng;
        self.width = rng.width().max(0) as usize;

        if new_len <= old_capacity {
            return;
        }

        self.astar_nodes.clear();
        self.astar_nodes.resize(new_len, Node::default());
        self.astar_generation = 0;

        self.bfs_map.clear();
        self.bfs_map.resize(new_len, UNREACHABLE);
        self.bfs_parent.clear();
        self.bfs_parent.resize(new_len, NO_PARENT);
        self.bfs_queue.clear();

        self.cc_marks.clear();
        self.cc_marks.resize(new_len, 0);
        self.cc_generation = 0;
        self.cc_stack.clear();
    }

    /// The grid rectangle being used.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    /// Point `rng` at a new rectangle unless it is already the current one.
    #[inline]
    pub fn ensure_range(&mut self, rng: Range) {
        if self.rng != rng {
            self.set_range(rng);
        }
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Convert a `Point` to a flat index. Returns `None` if out of range.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        if !self.rng.contains(p) {
            return None;
        }
        let x = (p.x - self.rng.min.x) as usize;
        let y = (p.y - self.rng.min.y) as usize;
        Some(y * self.width + x)
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        let x = (idx % self.width) as i32 + self.rng.min.x;
        let y = (idx / self.width) as i32 + self.rng.min.y;
        Point::new(x, y)
    }

    /// Walk a parent chain from `last` back to its root and return the
    /// points in root-to-`last` order.
    pub(crate) fn trace(&self, parents: impl Fn(usize) -> usize, last: usize) -> Vec<Point> {
        let mut path = Vec::new();
        let mut ci = last;
        while ci != NO_PARENT {
            path.push(self.point(ci));
            ci = parents(ci);
        }
        path.reverse();
        path
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for PathRange {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.rng.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for PathRange {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let range = Range::deserialize(deserializer)?;
        Ok(PathRange::new(range))
    }
}
