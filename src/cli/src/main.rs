#![warn(clippy::pedantic)]

mod config;
mod menu;

use clap::{ArgAction, ArgGroup, Parser, Subcommand, ValueEnum};
use color_eyre::{
    eyre::{WrapErr, eyre},
    owo_colors::OwoColorize,
};
use config::CliConfig;
use env_logger::TimestampPrecision;
use log::{LevelFilter, info};
use menu::Session;
use optimal_cube::{
    CubeState, CubieGroup, Move, PruningTable, PruningTables, Solver,
    facelets::load_facelet_file,
    pruning::storage::write_table,
    rotation::{format_move_sequence, parse_move_sequence},
};
use std::{fs, io, path::PathBuf};

/// Finds optimal solutions to the 3x3x3 cube
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// A configuration file, in TOML format.
    #[arg(long, short = 'c', value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (can be repeated)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Defaults to the interactive menu
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum TableChoice {
    Corners,
    Edges1,
    Edges2,
    All,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate pattern databases and write them to the table directory.
    Generate {
        /// Which table to generate
        table: TableChoice,
        /// Overrides the configured depth limit
        #[arg(long)]
        depth: Option<u8>,
    },
    /// Find an optimal solution for a cube.
    #[command(group(ArgGroup::new("cube").required(true).args(["file", "scramble", "random"])))]
    Solve {
        /// A file holding the 54 facelet colours of the cube
        file: Option<PathBuf>,
        /// Solve the cube reached from solved by these moves, e.g.
        /// "RIGHT:CLOCKWISE:TOP:HALF_TURN"
        #[arg(long)]
        scramble: Option<String>,
        /// Solve a random scramble of this many moves
        #[arg(long, value_name = "LENGTH")]
        random: Option<usize>,
        /// Overrides the configured maximum solution length
        #[arg(long)]
        max_length: Option<u8>,
    },
    /// Run the interactive menu.
    Menu,
}

impl TableChoice {
    fn groups(self) -> &'static [CubieGroup] {
        match self {
            TableChoice::Corners => &[CubieGroup::Corners],
            TableChoice::Edges1 => &[CubieGroup::EDGES_ONE],
            TableChoice::Edges2 => &[CubieGroup::EDGES_TWO],
            TableChoice::All => &CubieGroup::ALL,
        }
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    let mut config = CliConfig::load(cli.config.as_deref())?;

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Generate { table, depth } => {
            if let Some(depth) = depth {
                config.depth_limit = depth;
            }
            generate(&config, table)?;
        }
        Commands::Solve {
            file,
            scramble,
            random,
            max_length,
        } => {
            if max_length.is_some() {
                config.max_solution_length = max_length;
            }
            let state = if let Some(file) = file {
                load_facelet_file(&file)?
            } else if let Some(scramble) = scramble {
                CubeState::SOLVED.apply_moves(&parse_move_sequence(&scramble)?)
            } else if let Some(length) = random {
                let scramble = random_scramble(length);
                println!("Scramble: {}", format_move_sequence(&scramble));
                CubeState::SOLVED.apply_moves(&scramble)
            } else {
                return Err(eyre!("No cube to solve"));
            };
            solve(&config, &state)?;
        }
        Commands::Menu => {
            Session::new(&config, io::stdin().lock(), io::stdout().lock()).run()?;
        }
    }

    Ok(())
}

fn generate(config: &CliConfig, table: TableChoice) -> color_eyre::Result<()> {
    fs::create_dir_all(&config.table_dir).wrap_err_with(|| {
        format!(
            "Failed to create the table directory {}",
            config.table_dir.display()
        )
    })?;
    let paths = config.table_paths();

    if table == TableChoice::All {
        let tables = PruningTables::generate_all(config.depth_limit, config.parallelism());
        tables.save(&paths)?;
    } else {
        for &group in table.groups() {
            write_table(paths.for_group(group), &PruningTable::generate(group, config.depth_limit))?;
        }
    }

    for &group in table.groups() {
        println!(
            "Stored the {group} table in {}",
            paths.for_group(group).display().green()
        );
    }
    Ok(())
}

fn solve(config: &CliConfig, state: &CubeState) -> color_eyre::Result<()> {
    if state.is_solved() {
        println!("{}", "This cube is already solved!".green());
        return Ok(());
    }

    let tables = PruningTables::load(&config.table_paths(), config.depth_limit).wrap_err(
        "Pattern databases are unavailable, run `cube_solver generate all` to create them",
    )?;
    let mut solver = Solver::new(&tables);
    if let Some(max_solution_length) = config.max_solution_length {
        solver = solver.with_max_solution_length(max_solution_length);
    }

    let solution = solver.solve(state)?;
    info!(
        "Generated {} nodes for a {} move solution",
        solution.nodes_generated(),
        solution.len()
    );
    println!("{}", solution.green());
    Ok(())
}

fn random_scramble(length: usize) -> Vec<Move> {
    let mut moves: Vec<Move> = Vec::with_capacity(length);
    while moves.len() < length {
        let move_ = Move::ALL[fastrand::usize(..Move::ALL.len())];
        // Turning one face twice in a row is a single turn
        if moves.last().is_none_or(|last| last.face != move_.face) {
            moves.push(move_);
        }
    }
    moves
}
