use optimal_cube::{
    CubieGroup, Parallelism, PruningTable, PruningTables,
    pruning::storage::{StorageError, TablePaths, read_table, write_table},
};
use std::{fs, io::Write};

#[test_log::test]
fn tables_survive_a_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let paths = TablePaths::in_dir(dir.path());

    let tables = PruningTables::generate_all(2, Parallelism::Threaded);
    tables.save(&paths).unwrap();
    let loaded = PruningTables::load(&paths, 2).unwrap();
    for (saved, loaded) in tables.tables().into_iter().zip(loaded.tables()) {
        assert_eq!(saved, loaded);
    }

    // One value per line in rank order
    let corners = fs::read_to_string(&paths.corners).unwrap();
    assert_eq!(corners.lines().count(), CubieGroup::Corners.table_size());
    assert_eq!(corners.lines().next(), Some("0"));

    // The corner file holds more values than an edge table
    assert!(matches!(
        read_table(&paths.corners, CubieGroup::EDGES_ONE, 2),
        Err(StorageError::TooLong { expected: 42_577_920, line: 42_577_921, .. })
    ));
}

#[test_log::test]
fn loading_fails_instead_of_substituting() {
    let dir = tempfile::tempdir().unwrap();
    let paths = TablePaths::in_dir(dir.path());
    assert!(matches!(
        PruningTables::load(&paths, 11),
        Err(StorageError::Io { path, .. }) if path == paths.corners
    ));

    let table = PruningTable::generate(CubieGroup::EDGES_ONE, 1);
    write_table(&paths.edges_one, &table).unwrap();

    // A table read as the wrong group comes up short
    assert!(matches!(
        read_table(&paths.edges_one, CubieGroup::Corners, 11),
        Err(StorageError::Truncated { expected: 88_179_840, actual: 42_577_920 })
    ));
    // Deeper than the caller allows
    assert!(matches!(
        read_table(&paths.edges_one, CubieGroup::EDGES_ONE, 0),
        Err(StorageError::TooDeep { value: 1, depth_limit: 0, .. })
    ));
    assert_eq!(
        read_table(&paths.edges_one, CubieGroup::EDGES_ONE, 11).unwrap(),
        table
    );

    // One value too many
    let mut longer = fs::OpenOptions::new().append(true).open(&paths.edges_one).unwrap();
    writeln!(longer, "3").unwrap();
    drop(longer);
    assert!(matches!(
        read_table(&paths.edges_one, CubieGroup::EDGES_ONE, 11),
        Err(StorageError::TooLong { line: 42_577_921, text, .. }) if text == "3"
    ));

    fs::write(&paths.edges_two, "0\n1\nnope\n").unwrap();
    assert!(matches!(
        read_table(&paths.edges_two, CubieGroup::EDGES_TWO, 11),
        Err(StorageError::NotAValue { line: 3, .. })
    ));
}
