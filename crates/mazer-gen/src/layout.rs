//! The text layout format: loading, exporting and rendering mazes.
//!
//! A layout file is six header lines followed by the maze rows:
//!
//! ```text
//! 5        rows
//! 5        cols
//! #        barrier symbol
//! .        open symbol
//! S        start symbol
//! E        exit symbol
//! #####
//! #S..#
//! #.#.#
//! #..E#
//! #####
//! ```

use std::fmt;

use mazer_core::{CellKind, Grid, Maze, Point};

/// Candidates for the path marker, tried in order until one does not clash
/// with a loaded symbol.
const PATH_GLYPHS: &str = "+*~@%=";

/// The characters used to read and write each cell kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Symbols {
    pub barrier: char,
    pub open: char,
    pub start: char,
    pub exit: char,
    /// Only used when rendering; exported files write path cells as open.
    pub path: char,
}

impl Default for Symbols {
    fn default() -> Self {
        Self {
            barrier: 'B',
            open: 'O',
            start: 'S',
            exit: 'X',
            path: '+',
        }
    }
}

impl Symbols {
    /// The character drawn for `kind`.
    pub fn glyph(&self, kind: CellKind) -> char {
        match kind {
            CellKind::Barrier => self.barrier,
            CellKind::Open => self.open,
            CellKind::Start => self.start,
            CellKind::Exit => self.exit,
            CellKind::Path => self.path,
        }
    }

    /// The cell kind a layout character stands for. Unknown characters are
    /// open cells.
    pub fn kind_of(&self, ch: char) -> CellKind {
        if ch == self.barrier {
            CellKind::Barrier
        } else if ch == self.open {
            CellKind::Open
        } else if ch == self.start {
            CellKind::Start
        } else if ch == self.exit {
            CellKind::Exit
        } else {
            CellKind::Open
        }
    }

    /// Return a copy whose path marker differs from the four loadable
    /// symbols. Keeps the current marker if it is already free.
    pub fn with_free_path(mut self) -> Self {
        let taken = [self.barrier, self.open, self.start, self.exit];
        if taken.contains(&self.path) {
            if let Some(ch) = PATH_GLYPHS.chars().find(|c| !taken.contains(c)) {
                self.path = ch;
            }
        }
        self
    }
}

/// A successfully parsed layout.
#[derive(Debug, Clone)]
pub struct Loaded {
    pub maze: Maze,
    pub symbols: Symbols,
}

/// Why a layout could not be loaded. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The file ended before header `field`.
    MissingHeader { line: usize, field: &'static str },
    /// A dimension is not a positive integer.
    InvalidDimension {
        line: usize,
        field: &'static str,
        value: String,
    },
    /// A symbol line has no non-blank character.
    BlankSymbol { line: usize, field: &'static str },
    /// Fewer layout rows than the header declares.
    MissingRows { expected: usize, found: usize },
    /// A layout row is narrower than the declared column count.
    ShortLine {
        line: usize,
        expected: usize,
        found: usize,
    },
    DuplicateStart { line: usize },
    DuplicateExit { line: usize },
    MissingStart,
    MissingExit,
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingHeader { line, field } => {
                write!(f, "line {line}: missing {field}")
            }
            Self::InvalidDimension { line, field, value } => write!(
                f,
                "line {line}: {field} must be a positive integer, got \u{201c}{value}\u{201d}"
            ),
            Self::BlankSymbol { line, field } => {
                write!(f, "line {line}: {field} symbol is blank")
            }
            Self::MissingRows { expected, found } => {
                write!(f, "expected {expected} layout rows, found {found}")
            }
            Self::ShortLine {
                line,
                expected,
                found,
            } => write!(
                f,
                "line {line}: expected at least {expected} characters, found {found}"
            ),
            Self::DuplicateStart { line } => write!(f, "line {line}: more than one start"),
            Self::DuplicateExit { line } => write!(f, "line {line}: more than one exit"),
            Self::MissingStart => f.write_str("layout has no start"),
            Self::MissingExit => f.write_str("layout has no exit"),
        }
    }
}

impl std::error::Error for LayoutError {}

const HEADER_LINES: usize = 6;

/// Parse a layout. Nothing is returned on error, so a caller's current maze
/// stays untouched.
pub fn load(text: &str) -> Result<Loaded, LayoutError> {
    let mut lines = text.lines();
    let mut header = |line: usize, field: &'static str| {
        lines
            .next()
            .map(str::trim)
            .ok_or(LayoutError::MissingHeader { line, field })
    };

    let rows = dimension(1, "rows", header(1, "rows")?)?;
    let cols = dimension(2, "cols", header(2, "cols")?)?;
    let symbols = Symbols {
        barrier: symbol(3, "barrier", header(3, "barrier symbol")?)?,
        open: symbol(4, "open", header(4, "open symbol")?)?,
        start: symbol(5, "start", header(5, "start symbol")?)?,
        exit: symbol(6, "exit", header(6, "exit symbol")?)?,
        ..Symbols::default()
    }
    .with_free_path();

    // Allocate only after every declared row was read.
    let mut cells = Vec::new();
    let mut start = None;
    let mut exit = None;

    for y in 0..rows {
        let line = HEADER_LINES + 1 + y;
        let Some(row) = lines.next() else {
            return Err(LayoutError::MissingRows {
                expected: rows,
                found: y,
            });
        };
        let found = row.chars().count();
        if found < cols {
            return Err(LayoutError::ShortLine {
                line,
                expected: cols,
                found,
            });
        }
        for (x, ch) in row.chars().take(cols).enumerate() {
            let p = Point::new(x as i32, y as i32);
            let kind = symbols.kind_of(ch);
            match kind {
                CellKind::Start => {
                    if start.replace(p).is_some() {
                        return Err(LayoutError::DuplicateStart { line });
                    }
                }
                CellKind::Exit => {
                    if exit.replace(p).is_some() {
                        return Err(LayoutError::DuplicateExit { line });
                    }
                }
                _ => {}
            }
            cells.push(kind);
        }
    }

    let start = start.ok_or(LayoutError::MissingStart)?;
    let exit = exit.ok_or(LayoutError::MissingExit)?;
    let mut grid = Grid::new(cols as i32, rows as i32);
    for (p, kind) in grid.bounds().iter().zip(cells) {
        grid.set(p, kind);
    }
    Ok(Loaded {
        maze: Maze::new(grid, start, exit),
        symbols,
    })
}

fn dimension(line: usize, field: &'static str, value: &str) -> Result<usize, LayoutError> {
    match value.parse::<i32>() {
        Ok(n) if n > 0 => Ok(n as usize),
        _ => Err(LayoutError::InvalidDimension {
            line,
            field,
            value: value.to_string(),
        }),
    }
}

fn symbol(line: usize, field: &'static str, value: &str) -> Result<char, LayoutError> {
    value
        .chars()
        .next()
        .ok_or(LayoutError::BlankSymbol { line, field })
}

/// Write `maze` in the layout format. Path markings are written as open
/// cells.
pub fn export(maze: &Maze, symbols: &Symbols) -> String {
    let mut out = format!(
        "{}\n{}\n{}\n{}\n{}\n{}\n",
        maze.rows(),
        maze.cols(),
        symbols.barrier,
        symbols.open,
        symbols.start,
        symbols.exit
    );
    write_rows(&mut out, maze, |kind| match kind {
        CellKind::Path => symbols.open,
        kind => symbols.glyph(kind),
    });
    out
}

/// Draw the maze rows with `symbols`, path markings included.
pub fn render(maze: &Maze, symbols: &Symbols) -> String {
    let mut out = String::with_capacity(maze.grid().bounds().len() + maze.rows() as usize);
    write_rows(&mut out, maze, |kind| symbols.glyph(kind));
    out
}

fn write_rows(out: &mut String, maze: &Maze, glyph: impl Fn(CellKind) -> char) {
    for (p, kind) in maze.grid() {
        out.push(glyph(kind));
        if p.x == maze.cols() - 1 {
            out.push('\n');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapgen::MazeGen;
    use crate::solve;
    use mazer_paths::PathRange;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const SCENARIO: &str = "\
5
5
#
.
S
E
#####
#S..#
#.#.#
#..E#
#####
";

    #[test]
    fn loads_scenario() {
        let loaded = load(SCENARIO).unwrap();
        let maze = &loaded.maze;
        assert_eq!((maze.rows(), maze.cols()), (5, 5));
        assert_eq!(maze.start(), Point::new(1, 1));
        assert_eq!(maze.exit(), Point::new(3, 3));
        assert_eq!(maze.at(Point::new(2, 2)), Some(CellKind::Barrier));
        assert_eq!(maze.at(Point::new(1, 2)), Some(CellKind::Open));
        assert_eq!(loaded.symbols.barrier, '#');
        assert_eq!(loaded.symbols.exit, 'E');
        assert_eq!(loaded.symbols.path, '+');
    }

    #[test]
    fn header_is_trimmed_and_extra_columns_ignored() {
        let text = " 3 \n 4\n  #  \n.\nS\nE\n####zz\n#SE#\n####\n";
        let maze = load(text).unwrap().maze;
        assert_eq!((maze.rows(), maze.cols()), (3, 4));
        assert_eq!(maze.exit(), Point::new(2, 1));
    }

    #[test]
    fn unknown_characters_are_open() {
        let text = "3\n5\n#\n.\nS\nE\n#####\n#S?E#\n#####";
        let maze = load(text).unwrap().maze;
        assert_eq!(maze.at(Point::new(2, 1)), Some(CellKind::Open));
    }

    #[test]
    fn header_errors() {
        assert_eq!(
            load("5\n5\n#\n").unwrap_err(),
            LayoutError::MissingHeader {
                line: 4,
                field: "open symbol"
            }
        );
        assert_eq!(
            load("five\n5\n#\n.\nS\nE\n").unwrap_err(),
            LayoutError::InvalidDimension {
                line: 1,
                field: "rows",
                value: "five".into()
            }
        );
        assert!(matches!(
            load("5\n0\n#\n.\nS\nE\n").unwrap_err(),
            LayoutError::InvalidDimension { line: 2, .. }
        ));
        assert_eq!(
            load("5\n5\n#\n.\n   \nE\n").unwrap_err(),
            LayoutError::BlankSymbol {
                line: 5,
                field: "start"
            }
        );
    }

    #[test]
    fn layout_errors() {
        assert_eq!(
            load("3\n3\n#\n.\nS\nE\n###\n#SE\n").unwrap_err(),
            LayoutError::MissingRows {
                expected: 3,
                found: 2
            }
        );
        assert_eq!(
            load("3\n4\n#\n.\nS\nE\n####\n#SE\n####\n").unwrap_err(),
            LayoutError::ShortLine {
                line: 8,
                expected: 4,
                found: 3
            }
        );
        assert_eq!(
            load("3\n4\n#\n.\nS\nE\n####\n#SE#\n#S##\n").unwrap_err(),
            LayoutError::DuplicateStart { line: 9 }
        );
        assert_eq!(
            load("3\n4\n#\n.\nS\nE\n#E##\n#SE#\n####\n").unwrap_err(),
            LayoutError::DuplicateExit { line: 8 }
        );
        assert_eq!(
            load("3\n4\n#\n.\nS\nE\n####\n#..E\n####\n").unwrap_err(),
            LayoutError::MissingStart
        );
        assert_eq!(
            load("3\n4\n#\n.\nS\nE\n####\n#S..\n####\n").unwrap_err(),
            LayoutError::MissingExit
        );
    }

    #[test]
    fn oversized_header_with_few_rows_is_an_error() {
        let text = "2147483647\n2147483647\n#\n.\nS\nE\n#S#\n";
        assert_eq!(
            load(text).unwrap_err(),
            LayoutError::ShortLine {
                line: 7,
                expected: 2147483647,
                found: 3
            }
        );
        let text = "2147483647\n3\n#\n.\nS\nE\n#S#\n#E#\n";
        assert_eq!(
            load(text).unwrap_err(),
            LayoutError::MissingRows {
                expected: 2147483647,
                found: 2
            }
        );
    }

    #[test]
    fn errors_name_the_line() {
        let err = LayoutError::ShortLine {
            line: 9,
            expected: 5,
            found: 2,
        };
        assert_eq!(
            err.to_string(),
            "line 9: expected at least 5 characters, found 2"
        );
        assert_eq!(LayoutError::MissingExit.to_string(), "layout has no exit");
    }

    #[test]
    fn export_then_load_reproduces_maze() {
        let mut mg = MazeGen::new(StdRng::seed_from_u64(21));
        let mut maze = mg.generate(9, 13, true).unwrap().maze;
        let mut paths = PathRange::new(maze.bounds());
        assert!(solve::solve_bfs(&mut paths, &mut maze).is_found());

        let text = export(&maze, &Symbols::default());
        assert!(!text.contains('+'));
        let loaded = load(&text).unwrap();
        maze.clear_path();
        assert_eq!(loaded.maze, maze);
        assert_eq!(loaded.symbols, Symbols::default());
    }

    #[test]
    fn export_writes_header() {
        let maze = load(SCENARIO).unwrap().maze;
        let text = export(&maze, &Symbols::default());
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("5"));
        assert_eq!(lines.next(), Some("5"));
        assert_eq!(lines.nth(4), Some("BBBBB"));
        assert_eq!(lines.next(), Some("BSOOB"));
    }

    #[test]
    fn render_shows_path() {
        let loaded = load(SCENARIO).unwrap();
        let mut maze = loaded.maze;
        let mut paths = PathRange::new(maze.bounds());
        solve::solve_bfs(&mut paths, &mut maze);
        let drawn = render(&maze, &loaded.symbols);
        assert_eq!(drawn.lines().count(), 5);
        assert_eq!(drawn.matches('+').count(), 3);
        assert_eq!(drawn.lines().next(), Some("#####"));
    }

    #[test]
    fn path_marker_avoids_loaded_symbols() {
        let text = "3\n4\n+\n*\nS\nE\n++++\n+SE+\n++++\n";
        let symbols = load(text).unwrap().symbols;
        assert_eq!(symbols.path, '~');
        assert_eq!(symbols.kind_of('+'), CellKind::Barrier);
        assert_eq!(symbols.kind_of('~'), CellKind::Open);
    }
}
