//! Move notation for display: long algebraic (UCI) and standard algebraic (SAN).

use crate::board::Position;
use crate::movegen::{game_status, legal_moves, GameStatus};
use crate::types::*;

pub fn move_to_uci(mv: Move) -> String {
    let mut s = String::new();
    s.push_str(&sq_to_coord(mv.from));
    s.push_str(&sq_to_coord(mv.to));
    if let Some(p) = mv.promo {
        s.push(p.letter().to_ascii_lowercase());
    }
    s
}

/// Parse a UCI move string and resolve it against the legal moves of `pos`,
/// so castle and en-passant flags come out right.
pub fn parse_uci_move(pos: &Position, txt: &str) -> Option<Move> {
    if txt.len() < 4 || !txt.is_ascii() {
        return None;
    }
    let from = coord_to_sq(&txt[0..2])?;
    let to = coord_to_sq(&txt[2..4])?;
    let promo = match txt.as_bytes().get(4).map(|b| b.to_ascii_lowercase()) {
        None => None,
        Some(b'q') => Some(PieceKind::Queen),
        Some(b'r') => Some(PieceKind::Rook),
        Some(b'b') => Some(PieceKind::Bishop),
        Some(b'n') => Some(PieceKind::Knight),
        Some(_) => return None,
    };

    legal_moves(pos)
        .into_iter()
        .find(|m| m.from == from && m.to == to && m.promo == promo)
}

/// Render `mv` (legal in `pos`) in standard algebraic notation, including
/// disambiguation and the check / mate suffix.
pub fn move_to_san(pos: &Position, mv: Move) -> String {
    let Some(piece) = pos.piece_at(mv.from) else {
        return move_to_uci(mv);
    };

    let mut san = if mv.is_castle {
        if mv.to > mv.from { "O-O" } else { "O-O-O" }.to_string()
    } else {
        let mut san = String::new();
        let is_capture = pos.is_capture(mv);

        if piece.kind == PieceKind::Pawn {
            if is_capture {
                san.push((b'a' + (mv.from % 8)) as char);
            }
        } else {
            san.push(piece.kind.letter());
            san.push_str(&disambiguation(pos, mv, piece));
        }

        if is_capture {
            san.push('x');
        }
        san.push_str(&sq_to_coord(mv.to));

        if let Some(promo) = mv.promo {
            san.push('=');
            san.push(promo.letter());
        }
        san
    };

    let mut after = pos.clone();
    after.make_move(mv);
    if let GameStatus::Checkmate { .. } = game_status(&after) {
        san.push('#');
    } else if after.in_check(after.side_to_move) {
        san.push('+');
    }
    san
}

/// File, rank or full square needed to tell `mv` apart from other moves of
/// the same piece kind to the same square.
fn disambiguation(pos: &Position, mv: Move, piece: Piece) -> String {
    let rivals: Vec<u8> = legal_moves(pos)
        .into_iter()
        .filter(|m| m.to == mv.to && m.from != mv.from && pos.piece_at(m.from) == Some(piece))
        .map(|m| m.from)
        .collect();

    if rivals.is_empty() {
        return String::new();
    }
    let coord = sq_to_coord(mv.from);
    if rivals.iter().all(|&s| file_of(s) != file_of(mv.from)) {
        coord[0..1].to_string()
    } else if rivals.iter().all(|&s| rank_of(s) != rank_of(mv.from)) {
        coord[1..2].to_string()
    } else {
        coord
    }
}

#[cfg(test)]
#[path = "notation_tests.rs"]
mod notation_tests;
