//! Terminal output shared by the `mazer` command: colored maze drawing,
//! status lines and logger setup.

use std::io::{self, Write};

use crossterm::{
    queue,
    style::{Color as CtColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};
use log::LevelFilter;
use mazer_core::{CellKind, Maze};
use mazer_gen::{Algorithm, PathResult, Symbols};

/// Background colour used for each cell kind.
pub fn cell_color(kind: CellKind) -> CtColor {
    match kind {
        CellKind::Barrier => CtColor::Black,
        CellKind::Open => CtColor::White,
        CellKind::Start => CtColor::Red,
        CellKind::Exit => CtColor::Green,
        CellKind::Path => CtColor::Yellow,
    }
}

/// Write `maze` to `out`, one row per line. With `plain` no escape codes
/// are emitted and the output matches the layout rendering.
pub fn draw_maze(
    out: &mut impl Write,
    maze: &Maze,
    symbols: &Symbols,
    plain: bool,
) -> io::Result<()> {
    if plain {
        write!(out, "{}", mazer_gen::layout::render(maze, symbols))?;
        return out.flush();
    }

    for (p, kind) in maze.grid() {
        let bg = cell_color(kind);
        let fg = if kind == CellKind::Barrier {
            CtColor::White
        } else {
            CtColor::Black
        };
        queue!(
            out,
            SetBackgroundColor(bg),
            SetForegroundColor(fg),
            Print(symbols.glyph(kind))
        )?;
        if p.x == maze.cols() - 1 {
            queue!(out, ResetColor, Print('\n'))?;
        }
    }
    queue!(out, ResetColor)?;
    out.flush()
}

/// One-line summary of a solve.
pub fn status_line(algorithm: Algorithm, result: &PathResult) -> String {
    match result.steps() {
        Some(steps) => format!("{algorithm}: path found ({steps} steps)"),
        None => format!("{algorithm}: no path found"),
    }
}

/// Map the number of `-v` flags to a log level. Warnings are always shown.
pub fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the stderr logger. `RUST_LOG` overrides the verbosity flags.
pub fn init_logging(verbose: u8) {
    env_logger::Builder::new()
        .filter_level(log_level(verbose))
        .parse_default_env()
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
}
