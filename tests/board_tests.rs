use rand::rngs::SmallRng;
use rand::SeedableRng;
use twenty48::{Board, BoardError, Direction, Tile};

fn board(rows: &[Vec<Tile>]) -> Board {
    Board::from_rows(rows).unwrap()
}

fn empty_row() -> Vec<Tile> {
    vec![0, 0, 0, 0]
}

#[test]
fn test_merge_pair_left() {
    let start = board(&[vec![2, 2, 0, 0], empty_row(), empty_row(), empty_row()]);
    let result = start.shift(Direction::Left);

    let expected = board(&[vec![4, 0, 0, 0], empty_row(), empty_row(), empty_row()]);
    assert_eq!(result.board, expected);
    assert_eq!(result.score_delta, 4);
    assert_eq!(result.merged.count(), 1);
    assert!(result.merged.contains(0, 0).unwrap());
}

#[test]
fn test_merge_pair_right_with_gap() {
    let start = board(&[vec![2, 0, 2, 0], empty_row(), empty_row(), empty_row()]);
    let result = start.shift(Direction::Right);

    let expected = board(&[vec![0, 0, 0, 4], empty_row(), empty_row(), empty_row()]);
    assert_eq!(result.board, expected);
    assert_eq!(result.score_delta, 4);
    assert!(result.merged.contains(0, 3).unwrap());
}

#[test]
fn test_no_double_merge_in_one_move() {
    // the 4 created from 2+2 must not swallow the neighbouring 4
    let start = board(&[vec![2, 2, 4, 0], empty_row(), empty_row(), empty_row()]);
    let result = start.shift(Direction::Left);

    let expected = board(&[vec![4, 4, 0, 0], empty_row(), empty_row(), empty_row()]);
    assert_eq!(result.board, expected);
    assert_eq!(result.score_delta, 4);
    assert!(result.merged.contains(0, 0).unwrap());
    assert!(!result.merged.contains(0, 1).unwrap());
}

#[test]
fn test_four_equal_tiles_merge_in_pairs() {
    let start = board(&[vec![2, 2, 2, 2], empty_row(), empty_row(), empty_row()]);
    let result = start.shift(Direction::Left);

    let expected = board(&[vec![4, 4, 0, 0], empty_row(), empty_row(), empty_row()]);
    assert_eq!(result.board, expected);
    assert_eq!(result.score_delta, 8);
    assert_eq!(result.merged.count(), 2);
    assert!(result.merged.contains(0, 0).unwrap());
    assert!(result.merged.contains(0, 1).unwrap());
}

#[test]
fn test_three_equal_tiles_merge_leading_pair() {
    let start = board(&[vec![2, 2, 2, 0], empty_row(), empty_row(), empty_row()]);

    let left = start.shift(Direction::Left);
    assert_eq!(
        left.board,
        board(&[vec![4, 2, 0, 0], empty_row(), empty_row(), empty_row()])
    );
    assert!(left.merged.contains(0, 0).unwrap());

    // sliding right the pair at the leading edge merges instead
    let right = start.shift(Direction::Right);
    assert_eq!(
        right.board,
        board(&[vec![0, 0, 2, 4], empty_row(), empty_row(), empty_row()])
    );
    assert!(right.merged.contains(0, 3).unwrap());
}

#[test]
fn test_slide_without_merge_scores_nothing() {
    let start = board(&[vec![0, 2, 0, 4], empty_row(), empty_row(), empty_row()]);
    let result = start.shift(Direction::Left);

    let expected = board(&[vec![2, 4, 0, 0], empty_row(), empty_row(), empty_row()]);
    assert_eq!(result.board, expected);
    assert_eq!(result.score_delta, 0);
    assert!(result.merged.is_empty());
}

#[test]
fn test_columns_merge_up_and_down() {
    let start = board(&[
        vec![2, 0, 0, 0],
        vec![2, 0, 0, 0],
        vec![4, 0, 0, 0],
        vec![0, 0, 0, 0],
    ]);

    let up = start.shift(Direction::Up);
    let expected_up = board(&[
        vec![4, 0, 0, 0],
        vec![4, 0, 0, 0],
        vec![0, 0, 0, 0],
        vec![0, 0, 0, 0],
    ]);
    assert_eq!(up.board, expected_up);
    assert_eq!(up.score_delta, 4);
    assert!(up.merged.contains(0, 0).unwrap());

    let down = start.shift(Direction::Down);
    let expected_down = board(&[
        vec![0, 0, 0, 0],
        vec![0, 0, 0, 0],
        vec![4, 0, 0, 0],
        vec![4, 0, 0, 0],
    ]);
    assert_eq!(down.board, expected_down);
    assert_eq!(down.score_delta, 4);
    assert!(down.merged.contains(2, 0).unwrap());
}

#[test]
fn test_blocked_move_returns_unchanged_board() {
    let start = board(&[vec![2, 4, 0, 0], empty_row(), empty_row(), empty_row()]);
    let result = start.shift(Direction::Left);

    assert_eq!(result.board, start);
    assert_eq!(result.score_delta, 0);
    assert!(result.merged.is_empty());
}

#[test]
fn test_shift_leaves_input_untouched() {
    let start = board(&[vec![2, 2, 0, 0], empty_row(), empty_row(), empty_row()]);
    let copy = start.clone();
    let _ = start.shift(Direction::Left);
    assert_eq!(start, copy);
}

#[test]
fn test_full_board_without_pairs_is_game_over() {
    let start = board(&[
        vec![2, 4, 2, 4],
        vec![4, 2, 4, 2],
        vec![2, 4, 2, 4],
        vec![4, 2, 4, 2],
    ]);
    for direction in Direction::ALL {
        assert_eq!(start.shift(direction).board, start);
        assert!(!start.can_shift(direction));
    }
    assert!(start.is_game_over());
}

#[test]
fn test_full_board_with_pair_is_not_over() {
    let start = board(&[
        vec![2, 4, 2, 4],
        vec![4, 2, 4, 2],
        vec![2, 4, 4, 2],
        vec![4, 2, 8, 4],
    ]);
    assert!(start.is_full());
    assert!(!start.is_game_over());
}

#[test]
fn test_board_with_empty_cell_is_not_over() {
    let start = board(&[
        vec![2, 4, 2, 4],
        vec![4, 2, 4, 2],
        vec![2, 4, 2, 4],
        vec![4, 2, 4, 0],
    ]);
    assert!(!start.is_game_over());
}

#[test]
fn test_spawn_on_full_board_is_none() {
    let start = board(&[
        vec![2, 4, 2, 4],
        vec![4, 2, 4, 2],
        vec![2, 4, 2, 4],
        vec![4, 2, 4, 2],
    ]);
    let mut rng = SmallRng::seed_from_u64(42);
    assert!(start.with_random_tile(&mut rng).is_none());
}

#[test]
fn test_spawn_fills_one_empty_cell() {
    let start = board(&[vec![2, 0, 0, 0], empty_row(), empty_row(), empty_row()]);
    let mut rng = SmallRng::seed_from_u64(42);
    let spawn = start.with_random_tile(&mut rng).unwrap();

    assert_eq!(spawn.board.count_empty(), start.count_empty() - 1);
    assert!(spawn.value == 2 || spawn.value == 4);
    let (row, col) = spawn.position;
    assert_eq!(start.get(row, col).unwrap(), 0);
    assert_eq!(spawn.board.get(row, col).unwrap(), spawn.value);
    // input board stays as it was
    assert_eq!(start.count_empty(), 15);
}

#[test]
fn test_spawn_is_deterministic_under_seed() {
    let start = board(&[vec![2, 0, 0, 0], empty_row(), empty_row(), empty_row()]);
    let first = start.with_random_tile(&mut SmallRng::seed_from_u64(7));
    let second = start.with_random_tile(&mut SmallRng::seed_from_u64(7));
    assert_eq!(first, second);
}

#[test]
fn test_empty_board_queries() {
    let empty = Board::empty(4).unwrap();
    assert_eq!(empty.size(), 4);
    assert_eq!(empty.count_empty(), 16);
    assert!(!empty.is_full());
    assert_eq!(empty.highest_tile(), 0);
    assert!(empty.rows().all(|row| row.iter().all(|&t| t == 0)));
}

#[test]
fn test_construction_rejects_bad_shapes() {
    assert_eq!(Board::empty(0).unwrap_err(), BoardError::InvalidSize);
    assert_eq!(Board::from_rows(&[]).unwrap_err(), BoardError::InvalidSize);

    let ragged = [vec![2, 0], vec![2, 0, 4]];
    assert_eq!(
        Board::from_rows(&ragged).unwrap_err(),
        BoardError::InvalidShape {
            expected: 2,
            row: 1,
            len: 3
        }
    );
}

#[test]
fn test_get_out_of_bounds() {
    let empty = Board::empty(4).unwrap();
    assert_eq!(
        empty.get(4, 0).unwrap_err(),
        BoardError::OutOfBounds { row: 4, col: 0 }
    );
    assert_eq!(
        empty.get(0, 4).unwrap_err(),
        BoardError::OutOfBounds { row: 0, col: 4 }
    );
}

#[test]
fn test_check_tiles_is_opt_in() {
    // construction is permissive about values
    let odd = board(&[vec![2, 3, 0, 0], empty_row(), empty_row(), empty_row()]);
    assert_eq!(
        odd.check_tiles().unwrap_err(),
        BoardError::InvalidTile {
            row: 0,
            col: 1,
            value: 3
        }
    );

    let fine = board(&[vec![2, 4, 1024, 0], empty_row(), empty_row(), empty_row()]);
    assert!(fine.check_tiles().is_ok());
}

#[test]
fn test_small_boards_slide_and_merge() {
    let start = board(&[vec![2, 0], vec![2, 0]]);
    let result = start.shift(Direction::Right);
    assert_eq!(result.board, board(&[vec![0, 2], vec![0, 2]]));

    // a gapped pair on a wider single-column board meets and merges
    let tall = board(&[vec![2, 0, 0], vec![0, 0, 0], vec![2, 0, 0]]);
    let down = tall.shift(Direction::Down);
    assert_eq!(down.board, board(&[vec![0, 0, 0], vec![0, 0, 0], vec![4, 0, 0]]));
    assert_eq!(down.score_delta, 4);
    assert!(down.merged.contains(2, 0).unwrap());
}

#[test]
fn test_one_by_one_board_is_stuck() {
    let tiny = board(&[vec![2]]);
    assert!(tiny.is_game_over());
    for direction in Direction::ALL {
        assert_eq!(tiny.shift(direction).board, tiny);
    }
}
