//! Move generator node counts against published perft results.

use chess_core::{legal_moves_into, Move, Position};

fn perft(pos: &mut Position, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    let mut moves: Vec<Move> = Vec::with_capacity(64);
    legal_moves_into(pos, &mut moves);
    if depth == 1 {
        return moves.len() as u64;
    }
    let mut nodes = 0;
    for mv in moves {
        let undo = pos.make_move(mv);
        nodes += perft(pos, depth - 1);
        pos.unmake_move(mv, undo);
    }
    nodes
}

fn check(fen: &str, expected: &[u64]) {
    for (i, &count) in expected.iter().enumerate() {
        let depth = i as u8 + 1;
        let mut pos = Position::from_fen(fen).unwrap();
        assert_eq!(
            perft(&mut pos, depth),
            count,
            "perft mismatch for '{fen}' at depth {depth}"
        );
    }
}

#[test]
fn perft_startpos() {
    check(
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        &[20, 400, 8_902],
    );
}

#[test]
fn perft_kiwipete() {
    check(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        &[48, 2_039],
    );
}

#[test]
fn perft_rook_endgame_with_en_passant_pins() {
    check("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", &[14, 191, 2_812]);
}

#[test]
fn perft_promotions_and_castling_rights() {
    check(
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        &[6, 264, 9_467],
    );
}

#[test]
fn perft_discovered_checks() {
    check(
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        &[44, 1_486],
    );
}
