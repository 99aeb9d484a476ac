//! The interactive text menu.

use crate::config::CliConfig;
use log::{error, warn};
use optimal_cube::{
    CubieGroup, PruningTable, PruningTables, Solver,
    facelets::load_facelet_file,
    pruning::storage::{StorageError, write_table},
};
use std::{
    fs,
    io::{self, BufRead, Write},
    path::Path,
    str::FromStr,
};

const MENU: &str = "
Please select from among the following options.
  0 - Generate heuristic values for the corner cubies.
  1 - Generate heuristic values for edge group one.
  2 - Generate heuristic values for edge group two.
  3 - Search for an optimal solution.
  q - Quit.

  Enter Choice : ";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MenuChoice {
    Generate(CubieGroup),
    Solve,
    Quit,
}

impl FromStr for MenuChoice {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0" => Ok(MenuChoice::Generate(CubieGroup::Corners)),
            "1" => Ok(MenuChoice::Generate(CubieGroup::EDGES_ONE)),
            "2" => Ok(MenuChoice::Generate(CubieGroup::EDGES_TWO)),
            "3" => Ok(MenuChoice::Solve),
            s if s.eq_ignore_ascii_case("q") => Ok(MenuChoice::Quit),
            _ => Err(()),
        }
    }
}

/// One run of the menu. Tables are loaded on the first solve and kept until
/// one of them is regenerated.
pub struct Session<'a, R, W> {
    config: &'a CliConfig,
    tables: Option<PruningTables>,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(config: &'a CliConfig, input: R, output: W) -> Self {
        Self {
            config,
            tables: None,
            input,
            output,
        }
    }

    /// Show the menu until the user quits or the input ends.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            let Some(line) = self.prompt(MENU)? else {
                return Ok(());
            };
            match line.parse() {
                Ok(MenuChoice::Generate(group)) => self.generate(group)?,
                Ok(MenuChoice::Solve) => self.solve()?,
                Ok(MenuChoice::Quit) => return Ok(()),
                Err(()) => writeln!(
                    self.output,
                    "Not a valid choice. Please select an option from the following..."
                )?,
            }
        }
    }

    /// Print `text` and read the next trimmed line, `None` at end of input.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_owned()))
    }

    fn generate(&mut self, group: CubieGroup) -> io::Result<()> {
        let path = self.config.table_paths().for_group(group).to_owned();
        writeln!(
            self.output,
            "Generating the heuristic values for the {group}. This may take a while..."
        )?;
        let table = PruningTable::generate(group, self.config.depth_limit);
        let written = fs::create_dir_all(&self.config.table_dir)
            .map_err(|source| StorageError::Io {
                path: self.config.table_dir.clone(),
                source,
            })
            .and_then(|()| write_table(&path, &table));
        match written {
            Ok(()) => {
                // Loaded tables are stale now
                self.tables = None;
                writeln!(
                    self.output,
                    "Finished generating heuristic values. Results stored in {}.",
                    path.display()
                )
            }
            Err(e) => {
                error!("{e}");
                writeln!(
                    self.output,
                    "An error occurred while writing heuristic values: {e}"
                )
            }
        }
    }

    fn solve(&mut self) -> io::Result<()> {
        let mut text = "Please enter the filename where your cube state is stored, or enter '!' to return to the main menu.\n  Enter Choice: ";
        let state = loop {
            let Some(line) = self.prompt(text)? else {
                return Ok(());
            };
            if line == "!" {
                return Ok(());
            }
            match load_facelet_file(Path::new(&line)) {
                Ok(state) => break state,
                Err(e) => {
                    writeln!(self.output, "{e}")?;
                    text = "Enter the filename where your cube state is stored, or enter '!' to return to the main menu.\n  Enter Choice: ";
                }
            }
        };

        // No tables are needed to recognise a solved cube
        if state.is_solved() {
            return writeln!(self.output, "\nThis cube is already solved!\n");
        }

        let tables = match self.tables.take() {
            Some(tables) => tables,
            None => match PruningTables::load(&self.config.table_paths(), self.config.depth_limit) {
                Ok(tables) => tables,
                Err(e) => {
                    warn!("{e}");
                    return writeln!(
                        self.output,
                        "Unable to load heuristic values, generate them first: {e}"
                    );
                }
            },
        };

        writeln!(self.output, "Initiating search for optimal solution...")?;
        let mut solver = Solver::new(&tables);
        if let Some(max_solution_length) = self.config.max_solution_length {
            solver = solver.with_max_solution_length(max_solution_length);
        }
        let result = solver.solve(&state);
        self.tables = Some(tables);
        match result {
            Ok(solution) => writeln!(self.output, "\nSolution Path: {solution}\n"),
            Err(e) => writeln!(self.output, "{e}"),
        }
    }
}
