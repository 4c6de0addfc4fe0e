//! `mazer`: generate or load a maze, solve it and move its exit around.

use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, ensure};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;
use mazer_demos::{draw_maze, init_logging, status_line};
use mazer_gen::{Algorithm, MazeConfig, Session};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

/// Maze generator and solver
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Raise the log level (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print the maze without colors
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a new maze
    Generate {
        /// Number of rows
        #[arg(long, default_value_t = 15)]
        rows: i32,

        /// Number of columns
        #[arg(long, default_value_t = 20)]
        cols: i32,

        /// Scatter open cells at random instead of carving a spanning maze
        #[arg(long)]
        no_guarantee: bool,

        /// Chance for each interior cell to be open with --no-guarantee
        #[arg(long, default_value_t = MazeConfig::default().open_probability)]
        open_probability: f64,

        /// Write the maze in the layout format to this file
        #[arg(long)]
        export: Option<PathBuf>,

        #[command(flatten)]
        run: RunArgs,
    },
    /// Load a maze from a layout file
    Solve {
        /// Layout file
        file: PathBuf,

        #[command(flatten)]
        run: RunArgs,
    },
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Solve the maze with this algorithm
    #[arg(long, value_enum)]
    solve: Option<SolveWith>,

    /// Move the exit this many times, solving again after each move
    #[arg(long, default_value_t = 0)]
    relocate: usize,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SolveWith {
    Bfs,
    Astar,
    Both,
}

impl SolveWith {
    fn algorithms(self) -> &'static [Algorithm] {
        match self {
            Self::Bfs => &[Algorithm::Bfs],
            Self::Astar => &[Algorithm::Astar],
            Self::Both => &[Algorithm::Bfs, Algorithm::Astar],
        }
    }
}

fn session(config: MazeConfig, seed: Option<u64>) -> Session<StdRng> {
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    info!("using seed {seed}");
    Session::with_config(config, StdRng::seed_from_u64(seed))
}

fn show(session: &Session<StdRng>, plain: bool) -> anyhow::Result<()> {
    if let Some(maze) = session.maze() {
        let mut stdout = io::stdout().lock();
        draw_maze(&mut stdout, maze, session.symbols(), plain)
            .context("failed to draw maze")?;
    }
    Ok(())
}

fn solve(session: &mut Session<StdRng>, with: Option<SolveWith>, plain: bool) -> anyhow::Result<()> {
    let Some(with) = with else {
        return Ok(());
    };
    for &algorithm in with.algorithms() {
        let result = session.solve(algorithm)?;
        println!("{}", status_line(algorithm, &result));
        show(session, plain)?;
    }
    Ok(())
}

fn run(session: &mut Session<StdRng>, args: &RunArgs, plain: bool) -> anyhow::Result<()> {
    show(session, plain)?;
    solve(session, args.solve, plain)?;
    for _ in 0..args.relocate {
        let exit = session.relocate_exit()?.exit();
        println!("exit moved to {exit}");
        if args.solve.is_some() {
            solve(session, args.solve, plain)?;
        } else {
            show(session, plain)?;
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Generate {
            rows,
            cols,
            no_guarantee,
            open_probability,
            export,
            run: args,
        } => {
            ensure!(
                (0.0..=1.0).contains(&open_probability),
                "open probability must be between 0 and 1, got {open_probability}"
            );
            let config = MazeConfig {
                open_probability,
                ..MazeConfig::default()
            };
            let mut session = session(config, args.seed);
            for warning in session.generate(rows, cols, !no_guarantee)? {
                println!("warning: {warning}");
            }
            if let Some(path) = export {
                let text = session.export()?;
                fs::write(&path, text)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                info!("exported maze to {}", path.display());
            }
            run(&mut session, &args, cli.plain)
        }
        Command::Solve { file, run: args } => {
            let text = fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let mut session = session(MazeConfig::default(), args.seed);
            session
                .load(&text)
                .with_context(|| format!("failed to load {}", file.display()))?;
            run(&mut session, &args, cli.plain)
        }
    }
}
