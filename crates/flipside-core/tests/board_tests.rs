use flipside_core::{
    move_to_notation, parse, parse_notation, serialize, Board, Color, Coord, MoveError,
};

fn notations(moves: &[Coord]) -> Vec<String> {
    moves.iter().map(|&c| move_to_notation(c)).collect()
}

fn live_counts(board: &Board) -> (u8, u8) {
    let mut black = 0;
    let mut white = 0;
    for row in 0..8 {
        for col in 0..8 {
            match board.cell(Coord::new_unchecked(row, col)) {
                Some(Color::Black) => black += 1,
                Some(Color::White) => white += 1,
                None => {}
            }
        }
    }
    (black, white)
}

#[test]
fn initial_black_moves_are_the_four_expected_cells() {
    let board = Board::new();
    let moves = board.legal_moves(Color::Black);
    assert_eq!(notations(&moves), ["d3", "c4", "f5", "e6"]);
}

#[test]
fn d3_flips_d4_and_switches_turn() {
    let mut board = Board::new();
    board.apply_move(parse_notation("d3").unwrap()).unwrap();

    assert_eq!(board.cell(Coord::new_unchecked(2, 3)), Some(Color::Black));
    assert_eq!(board.cell(Coord::new_unchecked(3, 3)), Some(Color::Black));
    assert_eq!(board.counts(), (4, 1));
    assert_eq!(board.turn(), Color::White);
    assert_eq!(board.move_number(), 1);
}

#[test]
fn three_disc_run_between_new_disc_and_anchor_flips() {
    // Empty a1, white b1..d1, black anchor e1. Black plays a1 and the whole
    // run flips; the d6/d7 pair leaves White a reply so the turn passes on.
    let state = format!(
        "{}{}{}{}{}b",
        "xwwwbxxx",
        "x".repeat(32),
        "xxxbxxxx",
        "xxxwxxxx",
        "x".repeat(8)
    );
    let mut board = parse(&state).unwrap();
    assert_eq!(board.counts(), (2, 4));

    board.apply_move(parse_notation("a1").unwrap()).unwrap();

    for col in 0..5 {
        assert_eq!(board.cell(Coord::new_unchecked(0, col)), Some(Color::Black));
    }
    assert_eq!(board.counts(), (6, 1));
    assert_eq!(board.turn(), Color::White);
}

#[test]
fn occupied_and_non_flipping_cells_are_rejected_unchanged() {
    let mut board = Board::new();
    let before = board;

    assert_eq!(
        board.apply_move(parse_notation("d4").unwrap()),
        Err(MoveError::Illegal)
    );
    assert_eq!(
        board.apply_move(parse_notation("a1").unwrap()),
        Err(MoveError::Illegal)
    );
    assert_eq!(board, before);
}

#[test]
fn disc_total_rises_by_one_per_applied_move() {
    let mut board = Board::new();
    loop {
        let moves = board.legal_moves(board.turn());
        let Some(&first) = moves.first() else { break };

        let (black, white) = board.counts();
        let total = black + white;
        board.apply_move(first).unwrap();
        let (black_after, white_after) = board.counts();

        assert_eq!(black_after + white_after, total + 1);
        assert_eq!((black_after, white_after), live_counts(&board));
    }
    assert!(board.is_terminal());
}

#[test]
fn forced_pass_keeps_mover_on_turn_for_one_move_number() {
    // Black fills h8, after which White (discs b1, c1, g8) has no reply:
    // the turn reverts to Black while the move counter advances once.
    let state = concat!(
        "xwwbbbbb", "bbbbbbbb", "bbbbbbbb", "bbbbbbbb", "bbbbbbbb", "bbbbbbbb", "bbbbbbbb",
        "bbbbbbwx", "b"
    );
    let mut board = parse(state).unwrap();
    let move_number = board.move_number();
    assert_eq!(board.counts(), (59, 3));

    board.apply_move(parse_notation("h8").unwrap()).unwrap();

    assert_eq!(board.turn(), Color::Black);
    assert_eq!(board.move_number(), move_number + 1);
    assert_eq!(board.counts(), (61, 2));
    assert!(!board.is_terminal());
    assert!(board.legal_moves(Color::White).is_empty());
}

#[test]
fn pass_hands_a_stuck_parsed_turn_to_the_opponent() {
    // Same shape as the forced-pass fixture but serialized with White,
    // the stuck side, nominally to move.
    let state = concat!(
        "xwwbbbbb", "bbbbbbbb", "bbbbbbbb", "bbbbbbbb", "bbbbbbbb", "bbbbbbbb", "bbbbbbbb",
        "bbbbbbbb", "w"
    );
    let mut board = parse(state).unwrap();
    let move_number = board.move_number();
    assert!(board.legal_moves(Color::White).is_empty());
    assert!(!board.legal_moves(Color::Black).is_empty());

    board.pass();

    assert_eq!(board.turn(), Color::Black);
    assert_eq!(board.move_number(), move_number);
}

#[test]
fn board_with_no_moves_for_either_side_is_terminal() {
    let state = format!("x{}b", "b".repeat(63));
    let board = parse(&state).unwrap();

    assert!(board.is_terminal());
    assert_eq!(board.winner(), Some(Color::Black));
    assert_eq!(board.score(), 63);
}

#[test]
fn full_split_board_is_a_draw() {
    let state = format!("{}{}b", "b".repeat(32), "w".repeat(32));
    let board = parse(&state).unwrap();

    assert!(board.is_terminal());
    assert_eq!(board.winner(), None);
    assert_eq!(board.score(), 0);
}

#[test]
fn serialize_round_trips_through_real_play() {
    let mut board = Board::new();
    for _ in 0..12 {
        let moves = board.legal_moves(board.turn());
        let Some(&first) = moves.first() else { break };
        board.apply_move(first).unwrap();

        let recovered = parse(&serialize(&board)).unwrap();
        assert_eq!(recovered, board);
    }
}
