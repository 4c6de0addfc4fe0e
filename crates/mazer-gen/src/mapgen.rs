//! Maze generation.
//!
//! [`MazeGen`] builds a bordered maze with one exit on the border and one
//! start in the interior. The interior is filled in one of two ways:
//!
//! - **Spanning carve** (guaranteed path): a randomized Prim's carve over
//!   the odd-coordinate lattice, producing a tree of one-cell corridors
//!   separated by walls.
//! - **Scatter**: every interior cell is opened independently with a fixed
//!   probability.
//!
//! Either way a repair loop then relocates the exit until the start can
//! reach it, or gives up after a bounded number of tries.

use std::fmt;

use log::{debug, info, warn};
use mazer_core::{CellKind, Grid, Maze, Point, Range};
use mazer_paths::PathRange;
use rand::{Rng, RngExt};

use crate::config::MazeConfig;
use crate::exits::{RecentExits, border_slots, random_border_point};
use crate::solve;

/// Best-effort outcomes of a generation: the maze is still usable, but one
/// of the bounded retry loops ran out of attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Warning {
    /// No spanning carve connected the start to the exit.
    CarveExhausted { attempts: usize },
    /// The repair loop could not make the exit reachable; start and exit
    /// may be disconnected.
    ExitUnreachable { attempts: usize },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CarveExhausted { attempts } => write!(
                f,
                "could not generate a maze with a valid path after {attempts} attempts"
            ),
            Self::ExitUnreachable { attempts } => write!(
                f,
                "could not ensure exit reachability after {attempts} attempts"
            ),
        }
    }
}

/// A freshly generated maze and any best-effort warnings raised while
/// building it.
#[derive(Debug, Clone)]
pub struct Generated {
    pub maze: Maze,
    pub warnings: Vec<Warning>,
}

impl Generated {
    /// Whether generation met every goal without falling back.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Requested dimensions are below the configured minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionError {
    TooSmall { rows: i32, cols: i32, min: i32 },
}

impl fmt::Display for DimensionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooSmall { rows, cols, min } => write!(
                f,
                "maze dimensions must be at least {min}x{min}, got {rows}x{cols}"
            ),
        }
    }
}

impl std::error::Error for DimensionError {}

/// Maze generator and exit relocator.
///
/// Owns the random source, the recent-exit history and a reusable search
/// cache for its reachability checks.
pub struct MazeGen<R: Rng> {
    pub rng: R,
    config: MazeConfig,
    recent: RecentExits,
    paths: PathRange,
}

impl<R: Rng> MazeGen<R> {
    /// Create a generator with the default configuration.
    pub fn new(rng: R) -> Self {
        Self::with_config(MazeConfig::default(), rng)
    }

    /// Create a generator with a custom configuration.
    pub fn with_config(config: MazeConfig, rng: R) -> Self {
        Self {
            rng,
            config,
            recent: RecentExits::new(),
            paths: PathRange::new(Range::default()),
        }
    }

    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    /// Exit positions handed out since the last generate or reset.
    pub fn recent_exits(&self) -> &RecentExits {
        &self.recent
    }

    /// Forget the exit history and remember only `exit`. Called whenever a
    /// brand-new maze becomes current.
    pub fn reset_exits(&mut self, exit: Point) {
        self.recent.clear();
        self.recent.record(exit);
    }

    /// Generate a new `rows × cols` maze.
    ///
    /// With `guarantee_path` the interior is a spanning carve; otherwise
    /// cells are scattered open at random. In both cases the exit is then
    /// relocated until the start can reach it, within the configured budget.
    pub fn generate(
        &mut self,
        rows: i32,
        cols: i32,
        guarantee_path: bool,
    ) -> Result<Generated, DimensionError> {
        let min = self.config.min_dimension();
        if rows < min || cols < min {
            return Err(DimensionError::TooSmall { rows, cols, min });
        }

        self.recent.clear();
        let mut warnings = Vec::new();

        let mut grid = Grid::new(cols, rows);
        let exit = random_border_point(&mut self.rng, grid.size()).unwrap_or(Point::new(1, 0));
        grid.set(exit, CellKind::Exit);
        self.recent.record(exit);

        let start = if guarantee_path {
            self.carve_until_connected(&mut grid, exit, &mut warnings)
        } else {
            self.scatter_open(&mut grid);
            self.place_start(&mut grid)
        };

        let mut maze = Maze::new(grid, start, exit);
        if !self.ensure_reachable(&mut maze) {
            warnings.push(Warning::ExitUnreachable {
                attempts: self.config.repair_attempts,
            });
        }
        self.reset_exits(maze.exit());

        info!(
            "generated {rows}x{cols} maze (guaranteed path: {guarantee_path}), start {} exit {}",
            maze.start(),
            maze.exit()
        );
        Ok(Generated { maze, warnings })
    }

    /// Carve, place a start, and check the start reaches `exit`; repeat with
    /// a fresh carve until it does or the attempts run out. Returns the start
    /// of the last attempt.
    fn carve_until_connected(
        &mut self,
        grid: &mut Grid,
        exit: Point,
        warnings: &mut Vec<Warning>,
    ) -> Point {
        let interior = grid.bounds().shift(1, 1, -1, -1);
        let attempts = self.config.carve_attempts.max(1);
        let mut start = interior.min;

        for attempt in 1..=attempts {
            grid.fill_range(interior, CellKind::Barrier);
            self.carve(grid);
            start = self.place_start(grid);
            if solve::connected(&mut self.paths, grid, start, exit) {
                debug!("carve attempt {attempt} connected start {start} to exit {exit}");
                return start;
            }
            debug!("carve attempt {attempt} left exit {exit} cut off");
        }

        let warning = Warning::CarveExhausted { attempts };
        warn!("{warning}");
        warnings.push(warning);
        start
    }

    /// Randomized Prim's carve over the interior of `grid`.
    ///
    /// Starts from a random cell with odd coordinates and grows a tree of
    /// open cells two steps at a time, opening the wall in between. The
    /// border is never touched.
    fn carve(&mut self, grid: &mut Grid) {
        let interior = grid.bounds().shift(1, 1, -1, -1);
        if interior.is_empty() {
            return;
        }

        let seed = Point::new(
            self.random_odd(grid.width()),
            self.random_odd(grid.height()),
        );
        grid.set(seed, CellKind::Open);

        let mut walls = Vec::new();
        push_walls(grid, interior, seed, &mut walls);

        while !walls.is_empty() {
            let i = self.rng.random_range(0..walls.len());
            let wall = walls[i];
            let axes = [
                (wall.shift(-1, 0), wall.shift(1, 0)),
                (wall.shift(0, -1), wall.shift(0, 1)),
            ];
            for (a, b) in axes {
                if let Some(next) = carve_target(grid, interior, a, b) {
                    grid.set(wall, CellKind::Open);
                    grid.set(next, CellKind::Open);
                    push_walls(grid, interior, next, &mut walls);
                }
            }
            walls.swap_remove(i);
        }
    }

    /// Uniform odd coordinate in `[1, dim - 2]`.
    fn random_odd(&mut self, dim: i32) -> i32 {
        let available = ((dim - 2) / 2).max(1);
        1 + 2 * self.rng.random_range(0..available)
    }

    /// Open each interior cell independently with the configured
    /// probability.
    fn scatter_open(&mut self, grid: &mut Grid) {
        let interior = grid.bounds().shift(1, 1, -1, -1);
        for p in interior {
            let r: f64 = self.rng.random();
            if r < self.config.open_probability {
                grid.set(p, CellKind::Open);
            }
        }
    }

    /// Mark a uniformly chosen open interior cell as the start. If the
    /// interior has no open cell, one random interior cell is opened first.
    fn place_start(&mut self, grid: &mut Grid) -> Point {
        let interior = grid.bounds().shift(1, 1, -1, -1);
        let mut open: Vec<Point> = interior
            .iter()
            .filter(|&p| grid.at(p) == Some(CellKind::Open))
            .collect();
        if open.is_empty() {
            let p = Point::new(
                self.rng.random_range(interior.min.x..interior.max.x),
                self.rng.random_range(interior.min.y..interior.max.y),
            );
            debug!("no open interior cell, forcing {p} open");
            grid.set(p, CellKind::Open);
            open.push(p);
        }
        let start = open[self.rng.random_range(0..open.len())];
        grid.set(start, CellKind::Start);
        start
    }

    /// Whether the start of `maze` can currently reach its exit.
    pub fn is_solvable(&mut self, maze: &Maze) -> bool {
        solve::reachable(&mut self.paths, maze)
    }

    /// Relocate the exit until the start can reach it, at most
    /// `repair_attempts` times. Returns whether the exit is reachable at the
    /// end; `false` leaves the maze as it is.
    pub fn ensure_reachable(&mut self, maze: &mut Maze) -> bool {
        let mut attempts = 0;
        while !self.is_solvable(maze) {
            if attempts >= self.config.repair_attempts {
                warn!(
                    "{}",
                    Warning::ExitUnreachable {
                        attempts: self.config.repair_attempts
                    }
                );
                return false;
            }
            self.relocate_exit(maze);
            attempts += 1;
        }
        if attempts > 0 {
            debug!("exit reachable after {attempts} relocations");
        }
        true
    }

    /// Move the exit to a new non-corner border cell.
    ///
    /// The old exit becomes a barrier and any path markings are cleared.
    /// Up to `relocate_attempts` draws try to avoid recently used positions;
    /// if all of them collide, further draws are taken regardless of history.
    /// The start cell is never drawn, so a loaded maze whose start sits on
    /// the border keeps it. If no other border cell turns up the exit stays
    /// where it is. Returns the exit position.
    pub fn relocate_exit(&mut self, maze: &mut Maze) -> Point {
        let size = maze.size();
        let (old, start) = (maze.exit(), maze.start());
        if border_slots(size) == 0 {
            warn!("{}x{} maze has no border cell to move the exit to", maze.rows(), maze.cols());
            return old;
        }
        maze.clear_path();

        let cap = maze.rows().min(maze.cols()) as usize;
        let mut chosen = None;
        for _ in 0..self.config.relocate_attempts {
            let Some(p) = random_border_point(&mut self.rng, size) else {
                break;
            };
            self.recent.trim_to(cap);
            if p != start && !self.recent.contains(p) {
                self.recent.record(p);
                chosen = Some(p);
                break;
            }
        }

        if chosen.is_none() {
            debug!("every draw hit a recent exit, taking one regardless");
            chosen = (0..self.config.relocate_attempts.max(1))
                .filter_map(|_| random_border_point(&mut self.rng, size))
                .find(|&p| p != start);
        }

        let Some(exit) = chosen else {
            warn!("no border cell other than the start is free, exit stays at {old}");
            return old;
        };
        maze.set(old, CellKind::Barrier);
        maze.place_exit(exit);
        debug!("exit moved from {old} to {exit}");
        exit
    }
}

/// Push the barrier interior neighbours of `p` onto the wall list.
fn push_walls(grid: &Grid, interior: Range, p: Point, walls: &mut Vec<Point>) {
    for n in p.neighbors_4() {
        if interior.contains(n) && grid.at(n) == Some(CellKind::Barrier) {
            walls.push(n);
        }
    }
}

/// Given the two cells on either side of a wall, return the one to open if
/// exactly one side is open and the other is a barrier inside the interior.
fn carve_target(grid: &Grid, interior: Range, a: Point, b: Point) -> Option<Point> {
    let (ka, kb) = (grid.at(a), grid.at(b));
    if ka == Some(CellKind::Open) && kb == Some(CellKind::Barrier) && interior.contains(b) {
        Some(b)
    } else if kb == Some(CellKind::Open) && ka == Some(CellKind::Barrier) && interior.contains(a) {
        Some(a)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn mapgen(seed: u64) -> MazeGen<StdRng> {
        MazeGen::new(StdRng::seed_from_u64(seed))
    }

    /// Checks the structural invariants every generated maze must satisfy.
    fn assert_well_formed(maze: &Maze) {
        assert!(maze.rows() >= 5 && maze.cols() >= 5);
        assert_eq!(maze.count(CellKind::Start), 1);
        assert_eq!(maze.count(CellKind::Exit), 1);
        assert_eq!(maze.at(maze.start()), Some(CellKind::Start));
        assert_eq!(maze.at(maze.exit()), Some(CellKind::Exit));
        assert!(maze.interior().contains(maze.start()));
        assert!(maze.is_border(maze.exit()));
        assert!(!maze.is_corner(maze.exit()));
        for (p, kind) in maze.grid() {
            if maze.is_border(p) && p != maze.exit() {
                assert_eq!(kind, CellKind::Barrier, "border cell {p}");
            }
        }
    }

    #[test]
    fn rejects_small_dimensions() {
        let mut mg = mapgen(1);
        assert_eq!(
            mg.generate(4, 10, true).unwrap_err(),
            DimensionError::TooSmall {
                rows: 4,
                cols: 10,
                min: 5
            }
        );
        assert!(mg.generate(10, 4, false).is_err());
        assert!(mg.generate(-3, 0, true).is_err());
        assert!(mg.generate(5, 5, true).is_ok());
    }

    #[test]
    fn minimum_size_guaranteed_mazes_are_well_formed_and_solvable() {
        for seed in 0..50 {
            let mut mg = mapgen(seed);
            let generated = mg.generate(5, 5, true).unwrap();
            assert_well_formed(&generated.maze);
            assert!(generated.is_clean(), "seed {seed}: {:?}", generated.warnings);
            assert!(mg.is_solvable(&generated.maze), "seed {seed}");
        }
    }

    #[test]
    fn guaranteed_mazes_of_various_sizes() {
        for (seed, (rows, cols)) in [(15, 20), (6, 6), (9, 30), (30, 7), (21, 21)]
            .into_iter()
            .enumerate()
        {
            let mut mg = mapgen(seed as u64);
            let generated = mg.generate(rows, cols, true).unwrap();
            assert_eq!(generated.maze.rows(), rows);
            assert_eq!(generated.maze.cols(), cols);
            assert_well_formed(&generated.maze);
            if generated.is_clean() {
                assert!(mg.is_solvable(&generated.maze));
            }
        }
    }

    #[test]
    fn scattered_mazes_are_well_formed() {
        for seed in 0..40 {
            let mut mg = mapgen(seed);
            let generated = mg.generate(8, 12, false).unwrap();
            assert_well_formed(&generated.maze);
            let solvable = mg.is_solvable(&generated.maze);
            assert_eq!(generated.is_clean(), solvable, "seed {seed}");
            if !solvable {
                assert_eq!(
                    generated.warnings,
                    vec![Warning::ExitUnreachable { attempts: 100 }]
                );
            }
        }
    }

    #[test]
    fn same_seed_same_maze() {
        let a = mapgen(42).generate(12, 14, true).unwrap().maze;
        let b = mapgen(42).generate(12, 14, true).unwrap().maze;
        assert_eq!(a, b);
    }

    #[test]
    fn carve_builds_a_spanning_tree_on_the_lattice() {
        let mut mg = mapgen(3);
        let mut grid = Grid::new(11, 11);
        mg.carve(&mut grid);
        // 5×5 lattice cells plus the 24 walls joining them into a tree.
        assert_eq!(grid.count(CellKind::Open), 49);
        for y in (1..10).step_by(2) {
            for x in (1..10).step_by(2) {
                assert_eq!(grid.at(Point::new(x, y)), Some(CellKind::Open));
            }
        }
        let mut paths = PathRange::new(grid.bounds());
        let region = paths.cc_map(&solve::GridPather::new(&grid), Point::new(1, 1));
        assert_eq!(region.len(), 49);
    }

    #[test]
    fn carve_never_breaks_the_border() {
        for seed in 0..20 {
            let mut mg = mapgen(seed);
            let mut grid = Grid::new(8, 6);
            mg.carve(&mut grid);
            for (p, kind) in grid.iter() {
                let border = p.x == 0 || p.y == 0 || p.x == 7 || p.y == 5;
                if border {
                    assert_eq!(kind, CellKind::Barrier, "seed {seed} {p}");
                }
            }
        }
    }

    #[test]
    fn full_scatter_opens_whole_interior() {
        let config = MazeConfig {
            open_probability: 1.0,
            ..MazeConfig::default()
        };
        let mut mg = MazeGen::with_config(config, StdRng::seed_from_u64(2));
        let generated = mg.generate(6, 9, false).unwrap();
        assert!(generated.is_clean());
        // Interior is 4×7; one of those cells is the start.
        assert_eq!(generated.maze.count(CellKind::Open), 27);
    }

    #[test]
    fn empty_scatter_forces_one_open_start() {
        let config = MazeConfig {
            open_probability: 0.0,
            repair_attempts: 5,
            ..MazeConfig::default()
        };
        let mut mg = MazeGen::with_config(config, StdRng::seed_from_u64(4));
        let maze = mg.generate(7, 7, false).unwrap().maze;
        assert_well_formed(&maze);
        assert_eq!(maze.count(CellKind::Open), 0);
    }

    #[test]
    fn relocating_25_times_keeps_one_border_exit() {
        let mut mg = mapgen(8);
        let mut maze = mg.generate(5, 5, true).unwrap().maze;
        for _ in 0..25 {
            let exit = mg.relocate_exit(&mut maze);
            assert_eq!(exit, maze.exit());
            assert_eq!(maze.count(CellKind::Exit), 1);
            assert!(maze.is_border(exit));
            assert!(!maze.is_corner(exit));
            assert!(mg.recent_exits().len() <= 6);
        }
    }

    #[test]
    fn relocation_avoids_recent_exits() {
        let mut mg = mapgen(10);
        let mut maze = mg.generate(30, 30, true).unwrap().maze;
        let mut seen = vec![maze.exit()];
        for _ in 0..5 {
            let exit = mg.relocate_exit(&mut maze);
            assert!(!seen.contains(&exit), "{exit} reused");
            assert!(mg.recent_exits().contains(exit));
            seen.push(exit);
        }
    }

    #[test]
    fn relocation_clears_path_markings() {
        let mut mg = mapgen(12);
        let mut maze = mg.generate(9, 9, true).unwrap().maze;
        let mut paths = PathRange::new(maze.bounds());
        assert!(solve::solve_bfs(&mut paths, &mut maze).is_found());
        mg.relocate_exit(&mut maze);
        assert_eq!(maze.count(CellKind::Path), 0);
    }

    #[test]
    fn relocation_never_takes_a_border_start() {
        let mut grid = Grid::new(5, 5);
        grid.fill_range(Range::new(1, 1, 4, 4), CellKind::Open);
        let start = Point::new(1, 0);
        for seed in 0..50 {
            let mut maze = Maze::new(grid.clone(), start, Point::new(3, 3));
            let mut mg = mapgen(seed);
            mg.reset_exits(maze.exit());
            for _ in 0..25 {
                let exit = mg.relocate_exit(&mut maze);
                assert_ne!(exit, start, "seed {seed}");
                assert_eq!(maze.start(), start);
                assert_eq!(maze.at(start), Some(CellKind::Start));
                assert_eq!(maze.count(CellKind::Start), 1);
                assert_eq!(maze.count(CellKind::Exit), 1);
            }
        }
    }

    #[test]
    fn single_row_maze_keeps_exit_when_only_start_is_free() {
        // Top and bottom sides are the same row, whose only non-corner cell
        // holds the start.
        let mut grid = Grid::new(3, 1);
        grid.set(Point::new(0, 0), CellKind::Open);
        let mut maze = Maze::new(grid, Point::new(1, 0), Point::new(2, 0));
        let mut mg = mapgen(3);
        assert_eq!(mg.relocate_exit(&mut maze), Point::new(2, 0));
        assert_eq!(maze.at(Point::new(1, 0)), Some(CellKind::Start));
        assert_eq!(maze.at(Point::new(2, 0)), Some(CellKind::Exit));
    }

    #[test]
    fn repair_finds_the_only_reachable_exits() {
        let mut grid = Grid::new(5, 5);
        grid.set(Point::new(1, 1), CellKind::Open);
        let mut maze = Maze::new(grid, Point::new(1, 1), Point::new(2, 4));
        let mut mg = mapgen(6);
        mg.reset_exits(maze.exit());
        assert!(mg.ensure_reachable(&mut maze));
        assert!(
            maze.exit() == Point::new(1, 0) || maze.exit() == Point::new(0, 1),
            "exit {}",
            maze.exit()
        );
        assert_eq!(maze.count(CellKind::Exit), 1);
    }

    #[test]
    fn repair_gives_up_on_sealed_start() {
        let mut grid = Grid::new(5, 5);
        grid.set(Point::new(2, 2), CellKind::Open);
        let mut maze = Maze::new(grid, Point::new(2, 2), Point::new(2, 0));
        let mut mg = mapgen(13);
        assert!(!mg.ensure_reachable(&mut maze));
        assert_eq!(maze.count(CellKind::Exit), 1);
        assert!(maze.is_border(maze.exit()));
    }

    #[test]
    fn thin_loaded_maze_keeps_its_exit() {
        let mut grid = Grid::new(2, 2);
        grid.set(Point::new(0, 0), CellKind::Open);
        let mut maze = Maze::new(grid, Point::new(0, 0), Point::new(1, 1));
        let mut mg = mapgen(1);
        assert_eq!(mg.relocate_exit(&mut maze), Point::new(1, 1));
        assert_eq!(maze.at(Point::new(1, 1)), Some(CellKind::Exit));
    }

    #[test]
    fn warnings_read_like_status_messages() {
        assert_eq!(
            Warning::ExitUnreachable { attempts: 100 }.to_string(),
            "could not ensure exit reachability after 100 attempts"
        );
        assert!(
            DimensionError::TooSmall {
                rows: 3,
                cols: 9,
                min: 5
            }
            .to_string()
            .contains("3x9")
        );
    }
}
