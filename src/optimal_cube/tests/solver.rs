use common::TABLES;
use optimal_cube::{
    CubeState, Direction, Face, Move, Solution, Solver,
    facelets::{SOLVED_FACELETS, parse_facelets},
    rotation::{format_move_sequence, parse_move_sequence},
    solver::SolverError,
};

mod common;

const SIX_MOVE_SCRAMBLE: &str =
    "FRONT:CLOCKWISE:RIGHT:HALF_TURN:TOP:COUNTER_CLOCKWISE:LEFT:CLOCKWISE:BOTTOM:HALF_TURN:REAR:COUNTER_CLOCKWISE";

fn solve(scramble: &str) -> Solution {
    let state = CubeState::SOLVED.apply_moves(&parse_move_sequence(scramble).unwrap());
    Solver::new(&TABLES).solve(&state).unwrap()
}

#[test_log::test]
fn already_solved() {
    let solution = Solver::new(&TABLES).solve(&CubeState::SOLVED).unwrap();
    assert_eq!(solution, Solution::AlreadySolved);
    assert!(solution.is_empty());
    assert_eq!(solution.to_string(), "already solved");

    let loaded = parse_facelets(SOLVED_FACELETS).unwrap();
    assert!(Solver::new(&TABLES).solve(&loaded).unwrap().is_already_solved());
}

#[test_log::test]
fn single_turns_are_undone() {
    let solution = solve("RIGHT:CLOCKWISE");
    assert_eq!(
        solution.moves(),
        [Move::new(Face::Right, Direction::CounterClockwise)]
    );
    assert_eq!(solution.to_string(), "RIGHT:COUNTER_CLOCKWISE");
    assert!(!solution.is_already_solved());
    assert!(solution.nodes_generated() > 0);

    for move_ in Move::ALL {
        let state = CubeState::SOLVED.apply_move(move_);
        let solution = Solver::new(&TABLES).solve(&state).unwrap();
        assert_eq!(solution.moves(), [move_.inverse()]);
    }
}

#[test_log::test]
fn ties_follow_generation_order() {
    // Both orders undo commuting turns, FRONT comes first
    assert_eq!(
        solve("FRONT:CLOCKWISE:REAR:CLOCKWISE").to_string(),
        "FRONT:COUNTER_CLOCKWISE:REAR:COUNTER_CLOCKWISE"
    );
    assert_eq!(
        solve("FRONT:CLOCKWISE:RIGHT:CLOCKWISE").to_string(),
        "RIGHT:COUNTER_CLOCKWISE:FRONT:COUNTER_CLOCKWISE"
    );
}

#[test_log::test]
fn six_move_scramble_is_solved_optimally() {
    let scramble = parse_move_sequence(SIX_MOVE_SCRAMBLE).unwrap();
    let scrambled = CubeState::SOLVED.apply_moves(&scramble);
    let solution = Solver::new(&TABLES).solve(&scrambled).unwrap();

    assert!(solution.len() <= scramble.len());
    assert!(scrambled.apply_moves(solution.moves()).is_solved());
    assert!(!common::solvable_within(&scrambled, solution.len() as u8 - 1));
}

#[test_log::test]
fn random_scrambles_are_solved_optimally() {
    for _ in 0..5 {
        let scramble = common::random_scramble(5);
        let scrambled = CubeState::SOLVED.apply_moves(&scramble);
        let solution = Solver::new(&TABLES).solve(&scrambled).unwrap();

        let scramble = format_move_sequence(&scramble);
        // Commuting turns can cancel out entirely
        if solution.is_already_solved() {
            assert!(scrambled.is_solved(), "{scramble}");
            continue;
        }
        assert!(scrambled.apply_moves(solution.moves()).is_solved(), "{scramble}");
        assert!(
            !common::solvable_within(&scrambled, solution.len() as u8 - 1),
            "{scramble} solved in {} moves with {solution}",
            solution.len()
        );
    }
}

#[test_log::test]
fn max_solution_length_is_enforced() {
    let state = CubeState::SOLVED
        .apply(Face::Front, Direction::Clockwise)
        .apply(Face::Right, Direction::Clockwise);
    assert_eq!(
        Solver::new(&TABLES)
            .with_max_solution_length(1)
            .solve(&state),
        Err(SolverError::MaxSolutionLengthExceeded)
    );
    assert_eq!(
        Solver::new(&TABLES)
            .with_max_solution_length(2)
            .solve(&state)
            .map(|solution| solution.len()),
        Ok(2)
    );
}
