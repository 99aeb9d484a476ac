//! Pattern databases on disk: one decimal value per line, in rank order.

use super::{PruningTable, PruningTableError, PruningTables};
use crate::{encoding::CubieGroup, start, success};
use log::{debug, info};
use std::{
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
    time::Instant,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Unable to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to read table values: {0}")]
    Stream(#[from] io::Error),
    #[error("Table is truncated, expected {expected} values but found {actual}")]
    Truncated { expected: usize, actual: usize },
    #[error("Table has more than the expected {expected} values, line {line} is `{text}`")]
    TooLong {
        expected: usize,
        line: usize,
        text: String,
    },
    #[error("Line {line} is not a table value: `{text}`")]
    NotAValue { line: usize, text: String },
    #[error("Line {line} holds {value}, deeper than the depth limit {depth_limit}")]
    TooDeep {
        line: usize,
        value: u8,
        depth_limit: u8,
    },
    #[error(transparent)]
    Table(#[from] PruningTableError),
}

/// Where the three tables live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TablePaths {
    pub corners: PathBuf,
    pub edges_one: PathBuf,
    pub edges_two: PathBuf,
}

impl TablePaths {
    /// The file names the tables have always been stored under.
    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            corners: dir.join("corners.txt"),
            edges_one: dir.join("edges1.txt"),
            edges_two: dir.join("edges2.txt"),
        }
    }

    /// The file of one of the three standard groups.
    ///
    /// # Panics
    ///
    /// If `group` is not one of [`CubieGroup::ALL`].
    #[must_use]
    pub fn for_group(&self, group: CubieGroup) -> &Path {
        match group {
            CubieGroup::Corners => &self.corners,
            g if g == CubieGroup::EDGES_ONE => &self.edges_one,
            g if g == CubieGroup::EDGES_TWO => &self.edges_two,
            CubieGroup::Edges { .. } => unreachable!("no file is configured for the {group}"),
        }
    }
}

/// Write `values` one per line.
///
/// # Errors
///
/// If writing fails.
pub fn write_values(writer: impl Write, values: &[u8]) -> io::Result<()> {
    let mut writer = BufWriter::new(writer);
    for value in values {
        writeln!(writer, "{value}")?;
    }
    writer.flush()
}

/// Read exactly `expected` values, one per line. Only blank lines may follow
/// them.
///
/// # Errors
///
/// If the number of values is not `expected`, a line is not a number, or a
/// value exceeds `depth_limit`.
pub fn read_values(
    mut reader: impl BufRead,
    expected: usize,
    depth_limit: u8,
) -> Result<Box<[u8]>, StorageError> {
    let mut values = Vec::with_capacity(expected);
    let mut line = String::new();
    while values.len() < expected {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Err(StorageError::Truncated {
                expected,
                actual: values.len(),
            });
        }
        let text = line.trim();
        let value = text.parse::<u8>().map_err(|_| StorageError::NotAValue {
            line: values.len() + 1,
            text: text.to_owned(),
        })?;
        if value > depth_limit {
            return Err(StorageError::TooDeep {
                line: values.len() + 1,
                value,
                depth_limit,
            });
        }
        values.push(value);
    }

    let mut line_number = expected;
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Ok(values.into_boxed_slice());
        }
        line_number += 1;
        let text = line.trim();
        if !text.is_empty() {
            return Err(StorageError::TooLong {
                expected,
                line: line_number,
                text: text.to_owned(),
            });
        }
    }
}

/// Write `table` to `path`, replacing whatever was there.
///
/// # Errors
///
/// If the file cannot be created or written.
pub fn write_table(path: &Path, table: &PruningTable) -> Result<(), StorageError> {
    let io_error = |source| StorageError::Io {
        path: path.to_owned(),
        source,
    };
    let start = Instant::now();
    let file = File::create(path).map_err(io_error)?;
    write_values(file, table.values()).map_err(io_error)?;
    debug!(
        "Wrote the {} table to {} in {:.3}s",
        table.group(),
        path.display(),
        start.elapsed().as_secs_f64()
    );
    Ok(())
}

/// Read the `group` table stored at `path`.
///
/// # Errors
///
/// If the file cannot be opened or does not hold a complete table.
pub fn read_table(
    path: &Path,
    group: CubieGroup,
    depth_limit: u8,
) -> Result<PruningTable, StorageError> {
    let start = Instant::now();
    let file = File::open(path).map_err(|source| StorageError::Io {
        path: path.to_owned(),
        source,
    })?;
    let values = read_values(BufReader::new(file), group.table_size(), depth_limit)?;
    debug!(
        "Read the {} table from {} in {:.3}s",
        group,
        path.display(),
        start.elapsed().as_secs_f64()
    );
    Ok(PruningTable::from_values(group, values)?)
}

impl PruningTables {
    /// Read all three tables.
    ///
    /// # Errors
    ///
    /// If any of them is missing or malformed. Nothing is substituted for a
    /// table that fails to load.
    pub fn load(paths: &TablePaths, depth_limit: u8) -> Result<Self, StorageError> {
        info!(start!("Loading pattern databases..."));
        let start = Instant::now();
        let [corners, edges_one, edges_two] = CubieGroup::ALL;
        let tables = PruningTables::new(
            read_table(&paths.corners, corners, depth_limit)?,
            read_table(&paths.edges_one, edges_one, depth_limit)?,
            read_table(&paths.edges_two, edges_two, depth_limit)?,
        )?;
        info!(
            success!("Loaded pattern databases in {:.3}s"),
            start.elapsed().as_secs_f64()
        );
        Ok(tables)
    }

    /// Write all three tables.
    ///
    /// # Errors
    ///
    /// If any of them cannot be written.
    pub fn save(&self, paths: &TablePaths) -> Result<(), StorageError> {
        for table in self.tables() {
            write_table(paths.for_group(table.group()), table)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_what_it_writes() {
        let mut buffer = vec![];
        write_values(&mut buffer, &[0, 3, 11, 7]).unwrap();
        assert_eq!(buffer, b"0\n3\n11\n7\n");
        let values = read_values(&buffer[..], 4, 11).unwrap();
        assert_eq!(&*values, [0, 3, 11, 7]);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            read_values(&b"1\n2\n"[..], 3, 11),
            Err(StorageError::Truncated {
                expected: 3,
                actual: 2
            })
        ));
        assert!(matches!(
            read_values(&b"1\nx\n3\n"[..], 3, 11),
            Err(StorageError::NotAValue { line: 2, .. })
        ));
        assert!(matches!(
            read_values(&b"1\n12\n"[..], 2, 11),
            Err(StorageError::TooDeep {
                line: 2,
                value: 12,
                depth_limit: 11
            })
        ));
    }

    #[test]
    fn tolerates_surrounding_whitespace_and_trailing_blank_lines() {
        let values = read_values(&b" 4\r\n5 \n6\n\n  \r\n"[..], 3, 11).unwrap();
        assert_eq!(&*values, [4, 5, 6]);
    }

    #[test]
    fn rejects_values_past_the_end() {
        assert!(matches!(
            read_values(&b"4\n5\n6\n9\n"[..], 3, 11),
            Err(StorageError::TooLong { expected: 3, line: 4, text }) if text == "9"
        ));
        // Garbage after a blank line counts too
        assert!(matches!(
            read_values(&b"4\n5\n6\n\nx"[..], 3, 11),
            Err(StorageError::TooLong { expected: 3, line: 5, .. })
        ));
    }

    #[test]
    fn paths_follow_the_group() {
        let paths = TablePaths::in_dir(Path::new("tables"));
        assert_eq!(paths.for_group(CubieGroup::Corners), Path::new("tables/corners.txt"));
        assert_eq!(paths.for_group(CubieGroup::EDGES_ONE), Path::new("tables/edges1.txt"));
        assert_eq!(paths.for_group(CubieGroup::EDGES_TWO), Path::new("tables/edges2.txt"));
    }

    #[test]
    #[should_panic(expected = "no file is configured")]
    fn other_edge_groups_have_no_file() {
        let paths = TablePaths::in_dir(Path::new("tables"));
        let _ = paths.for_group(CubieGroup::Edges { start: 10, end: 16 });
    }
}
