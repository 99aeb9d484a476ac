use color_eyre::eyre::WrapErr;
use optimal_cube::{
    Parallelism,
    pruning::{DEFAULT_DEPTH_LIMIT, storage::TablePaths},
};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Settings read from the `--config` TOML file. Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Where pattern databases are written and read.
    pub table_dir: PathBuf,
    pub corner_table: String,
    pub edge_one_table: String,
    pub edge_two_table: String,
    /// How deep pattern databases are generated.
    pub depth_limit: u8,
    /// Generate all three databases at once on separate threads.
    pub parallel_generation: bool,
    /// Give up once the search bound passes this many moves.
    pub max_solution_length: Option<u8>,
}

impl Default for CliConfig {
    fn default() -> Self {
        let table_dir = dirs::cache_dir().map_or_else(
            || PathBuf::from("."),
            |cache| cache.join("optimal-cube-tables"),
        );
        Self {
            table_dir,
            corner_table: "corners.txt".to_owned(),
            edge_one_table: "edges1.txt".to_owned(),
            edge_two_table: "edges2.txt".to_owned(),
            depth_limit: DEFAULT_DEPTH_LIMIT,
            parallel_generation: true,
            max_solution_length: None,
        }
    }
}

impl CliConfig {
    /// Read the configuration at `path`, or the defaults without one.
    pub fn load(path: Option<&Path>) -> color_eyre::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read configuration file {}", path.display()))?;
        Self::parse(&text)
            .wrap_err_with(|| format!("Failed to parse configuration file {}", path.display()))
    }

    pub fn parse(text: &str) -> color_eyre::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    #[must_use]
    pub fn table_paths(&self) -> TablePaths {
        TablePaths {
            corners: self.table_dir.join(&self.corner_table),
            edges_one: self.table_dir.join(&self.edge_one_table),
            edges_two: self.table_dir.join(&self.edge_two_table),
        }
    }

    #[must_use]
    pub fn parallelism(&self) -> Parallelism {
        if self.parallel_generation {
            Parallelism::Threaded
        } else {
            Parallelism::Sequential
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_the_default() {
        assert_eq!(CliConfig::parse("").unwrap(), CliConfig::default());
        assert_eq!(CliConfig::load(None).unwrap(), CliConfig::default());
    }

    #[test]
    fn fields_override_defaults() {
        let config = CliConfig::parse(
            r#"
            table_dir = "/tmp/tables"
            edge_two_table = "second.txt"
            depth_limit = 8
            parallel_generation = false
            max_solution_length = 20
            "#,
        )
        .unwrap();
        assert_eq!(config.depth_limit, 8);
        assert_eq!(config.parallelism(), Parallelism::Sequential);
        assert_eq!(config.max_solution_length, Some(20));

        let paths = config.table_paths();
        assert_eq!(paths.corners, Path::new("/tmp/tables/corners.txt"));
        assert_eq!(paths.edges_one, Path::new("/tmp/tables/edges1.txt"));
        assert_eq!(paths.edges_two, Path::new("/tmp/tables/second.txt"));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(CliConfig::parse("depth = 3").is_err());
    }
}
