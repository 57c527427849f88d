//! Game-level properties checked across many seeds and board shapes.

use std::collections::{HashSet, VecDeque};

use uncover_core::*;

const SHAPES: &[(i32, i32, i32)] = &[
    (1, 1, 0),
    (1, 2, 1),
    (2, 2, 3),
    (3, 3, 0),
    (3, 3, 8),
    (5, 7, 10),
    (9, 9, 10),
    (16, 16, 40),
    (16, 30, 99),
    (8, 8, 63),
];

fn all_positions(size: Coord2) -> impl Iterator<Item = Position> {
    (0..size.0).flat_map(move |row| (0..size.1).map(move |col| (row, col)))
}

/// Zero-count region containing `start` plus its numbered border, computed independently.
fn expected_region(board: &Board, start: Position) -> HashSet<Position> {
    let mut region = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(pos) = queue.pop_front() {
        if board.count_adjacent_mines(pos).unwrap() != 0 {
            continue;
        }
        for next in neighbors_of(pos, board.nrows(), board.ncols()) {
            if region.insert(next) {
                queue.push_back(next);
            }
        }
    }
    region
}

#[test]
fn start_game_yields_blank_boards() {
    for &(rows, cols, mines) in SHAPES {
        let game = Game::start_game(rows, cols, mines, 0).unwrap();
        let board = game.board();

        assert_eq!(game.state(), GameState::Ready);
        assert_eq!(board.cell_count(), (rows * cols) as CellCount);
        assert!(
            all_positions(board.size()).all(|pos| board.cell_at(pos).unwrap() == Cell::default())
        );
    }
}

#[test]
fn invalid_parameters_never_start_a_game() {
    for (rows, cols, mines, expected) in [
        (0, 1, 0, GameError::NonPositiveDimension),
        (1, 0, 0, GameError::NonPositiveDimension),
        (-4, 4, 0, GameError::NonPositiveDimension),
        (1, 1, 1, GameError::TooManyMines),
        (4, 4, 16, GameError::TooManyMines),
        (4, 4, 100, GameError::TooManyMines),
        (65535, 65535, 0, GameError::DimensionTooLarge),
    ] {
        let err = Game::start_game(rows, cols, mines, 0).unwrap_err();
        assert_eq!(err, expected);
        assert!(err.is_validation());
    }
}

#[test]
fn first_reveal_is_always_safe_and_places_every_mine() {
    for &(rows, cols, mines) in SHAPES {
        for seed in 0..20u64 {
            let config = GameConfig::new(rows, cols, mines).unwrap();
            for start in all_positions(config.size).step_by(7) {
                let mut game = Game::start_game(rows, cols, mines, seed).unwrap();

                let reveal = game.reveal(start).unwrap();

                assert_ne!(reveal.outcome, RevealOutcome::Exploded);
                assert_ne!(reveal.state, GameState::Lost);
                assert_eq!(game.board().mine_positions().count(), mines as usize);
                assert_eq!(game.move_count(), 1);
            }
        }
    }
}

#[test]
fn cascade_opens_exactly_the_zero_region_and_its_border() {
    for seed in 0..50u64 {
        let mut game = Game::start_game(16, 16, 30, seed).unwrap();
        game.reveal((8, 8)).unwrap();

        let board = game.board().clone();
        for start in all_positions(board.size()) {
            let cell = board.cell_at(start).unwrap();
            if cell.is_opened || cell.is_mine || board.count_adjacent_mines(start).unwrap() != 0 {
                continue;
            }

            let mut scratch = board.clone();
            let outcome = reveal(&mut scratch, start, FlagRule::Ignore).unwrap();
            let RevealOutcome::OpenedCascade(opened) = outcome else {
                panic!("zero cell at {start:?} did not cascade: {outcome:?}");
            };

            let opened: HashSet<_> = opened.into_iter().collect();
            let expected: HashSet<_> = expected_region(&board, start)
                .into_iter()
                .filter(|&pos| !board.cell_at(pos).unwrap().is_opened)
                .collect();
            assert_eq!(opened, expected);
            assert!(opened.iter().all(|&pos| !scratch.cell_at(pos).unwrap().is_mine));
        }
    }
}

#[test]
fn already_open_reveal_changes_nothing() {
    let mut game = Game::start_game(9, 9, 10, 11).unwrap();
    game.reveal((0, 0)).unwrap();

    let opened = all_positions(game.size())
        .find(|&pos| game.board().cell_at(pos).unwrap().is_opened)
        .unwrap();
    let before = game.board().clone();
    let reveal = game.reveal(opened).unwrap();

    assert_eq!(reveal.outcome, RevealOutcome::AlreadyOpen);
    assert_eq!(game.board(), &before);
}

#[test]
fn playing_out_every_safe_cell_wins() {
    for seed in 0..30u64 {
        let mut game = Game::start_game(9, 9, 10, seed).unwrap();
        game.reveal((4, 4)).unwrap();
        let mines: HashSet<_> = game.board().mine_positions().collect();

        let mut last = None;
        for pos in all_positions(game.size()) {
            if game.is_finished() {
                break;
            }
            if !mines.contains(&pos) {
                last = Some(game.reveal(pos).unwrap());
            }
        }

        assert!(game.board().is_cleared());
        assert_eq!(game.state(), GameState::Won);
        if let Some(last) = last {
            assert_eq!(
                last.events.last(),
                Some(&GameEvent::GameWon {
                    moves: game.move_count()
                })
            );
        }
    }
}

#[test]
fn hitting_a_mine_is_terminal() {
    for seed in 0..30u64 {
        let mut game = Game::start_game(9, 9, 10, seed).unwrap();
        game.reveal((4, 4)).unwrap();
        if game.is_finished() {
            continue;
        }
        let mine = game.board().mine_positions().next().unwrap();

        let reveal = game.reveal(mine).unwrap();
        assert_eq!(reveal.outcome, RevealOutcome::Exploded);
        assert_eq!(reveal.state, GameState::Lost);

        let before = game.board().clone();
        let moves = game.move_count();
        for pos in all_positions(game.size()) {
            assert_eq!(game.reveal(pos).unwrap().outcome, RevealOutcome::Ignored);
            assert_eq!(game.toggle_flag(pos).unwrap(), MarkOutcome::NoChange);
        }
        assert_eq!(game.board(), &before);
        assert_eq!(game.move_count(), moves);
        assert_eq!(game.state(), GameState::Lost);
    }
}

#[test]
fn empty_three_by_three_clears_in_one_move() {
    let mut game = Game::start_game(3, 3, 0, 0).unwrap();

    let reveal = game.reveal((1, 1)).unwrap();

    assert_eq!(reveal.outcome.opened_count(), 9);
    assert_eq!(reveal.state, GameState::Won);
    assert_eq!(game.move_count(), 1);
}

#[test]
fn events_serialize_for_external_renderers() {
    let event = GameEvent::CellOpened {
        pos: (2, 3),
        count: 1,
    };

    let json = serde_json::to_value(event).unwrap();

    assert_eq!(
        json,
        serde_json::json!({ "event": "cell_opened", "pos": [2, 3], "count": 1 })
    );
    assert_eq!(
        serde_json::to_value(GameEvent::GameLost { moves: 4 }).unwrap(),
        serde_json::json!({ "event": "game_lost", "moves": 4 })
    );
}
