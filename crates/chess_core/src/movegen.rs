use crate::board::{Position, DIAGONALS, KING_OFFSETS, KNIGHT_OFFSETS, ORTHOGONALS};
use crate::types::*;

/// How a position stands with respect to the end of the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    /// The side to move is mated; `winner` delivered it.
    Checkmate { winner: Color },
    Stalemate,
    InsufficientMaterial,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        self != GameStatus::Ongoing
    }
}

/// Generate all legal moves, returning a freshly allocated vector.
/// Internally delegates to `legal_moves_into`, cloning the position only once.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut tmp = pos.clone();
    let mut out = Vec::with_capacity(64);
    legal_moves_into(&mut tmp, &mut out);
    out
}

/// Generate all legal moves into the provided buffer, reusing it across calls.
pub fn legal_moves_into(pos: &mut Position, out: &mut Vec<Move>) {
    out.clear();
    pseudo_moves(pos, out);

    let mover = pos.side_to_move;
    // Filter illegal moves in-place by playing them on the mutable position.
    out.retain(|&mv| {
        let undo = pos.make_move(mv);
        let illegal = pos.in_check(mover);
        pos.unmake_move(mv, undo);
        !illegal
    });
}

/// Whether the side to move has at least one legal move.
pub fn has_legal_move(pos: &Position) -> bool {
    !legal_moves(pos).is_empty()
}

pub fn is_checkmate(pos: &Position) -> bool {
    pos.in_check(pos.side_to_move) && !has_legal_move(pos)
}

pub fn is_stalemate(pos: &Position) -> bool {
    !pos.in_check(pos.side_to_move) && !has_legal_move(pos)
}

/// Classify the position. Mate and stalemate take precedence over
/// insufficient material.
pub fn game_status(pos: &Position) -> GameStatus {
    if !has_legal_move(pos) {
        if pos.in_check(pos.side_to_move) {
            return GameStatus::Checkmate {
                winner: pos.side_to_move.other(),
            };
        }
        return GameStatus::Stalemate;
    }
    if pos.is_insufficient_material() {
        return GameStatus::InsufficientMaterial;
    }
    GameStatus::Ongoing
}

fn pseudo_moves(pos: &Position, out: &mut Vec<Move>) {
    let side = pos.side_to_move;
    for (from, pc) in pos.pieces().filter(|(_, pc)| pc.color == side) {
        match pc.kind {
            PieceKind::Pawn => gen_pawn(pos, from, side, out),
            PieceKind::Knight => gen_steps(pos, from, side, &KNIGHT_OFFSETS, out),
            PieceKind::Bishop => gen_slider(pos, from, side, &DIAGONALS, out),
            PieceKind::Rook => gen_slider(pos, from, side, &ORTHOGONALS, out),
            PieceKind::Queen => {
                gen_slider(pos, from, side, &DIAGONALS, out);
                gen_slider(pos, from, side, &ORTHOGONALS, out);
            }
            PieceKind::King => {
                gen_steps(pos, from, side, &KING_OFFSETS, out);
                gen_castle(pos, from, side, out);
            }
        }
    }
}

fn push_pawn_move(from: u8, to: u8, promo_rank: i8, out: &mut Vec<Move>) {
    if rank_of(to) == promo_rank {
        out.extend(
            PieceKind::PROMOTIONS
                .iter()
                .map(|&pk| Move::with_promo(from, to, pk)),
        );
    } else {
        out.push(Move::new(from, to));
    }
}

fn gen_pawn(pos: &Position, from: u8, c: Color, out: &mut Vec<Move>) {
    let f = file_of(from);
    let r = rank_of(from);
    let (dir, start_rank, promo_rank) = match c {
        Color::White => (1, 1, 7),
        Color::Black => (-1, 6, 0),
    };

    if let Some(to) = sq(f, r + dir) {
        if pos.piece_at(to).is_none() {
            push_pawn_move(from, to, promo_rank, out);

            if r == start_rank {
                if let Some(to2) = sq(f, r + 2 * dir) {
                    if pos.piece_at(to2).is_none() {
                        out.push(Move::new(from, to2));
                    }
                }
            }
        }
    }

    for df in [-1, 1] {
        let Some(to) = sq(f + df, r + dir) else {
            continue;
        };
        match pos.piece_at(to) {
            Some(target) if target.color != c => push_pawn_move(from, to, promo_rank, out),
            None if pos.en_passant == Some(to) => {
                let mut mv = Move::new(from, to);
                mv.is_en_passant = true;
                out.push(mv);
            }
            _ => {}
        }
    }
}

fn gen_steps(pos: &Position, from: u8, c: Color, offsets: &[(i8, i8)], out: &mut Vec<Move>) {
    let f = file_of(from);
    let r = rank_of(from);
    for &(df, dr) in offsets {
        if let Some(to) = sq(f + df, r + dr) {
            match pos.piece_at(to) {
                Some(pc) if pc.color == c => {}
                _ => out.push(Move::new(from, to)),
            }
        }
    }
}

fn gen_slider(pos: &Position, from: u8, c: Color, dirs: &[(i8, i8)], out: &mut Vec<Move>) {
    let f0 = file_of(from);
    let r0 = rank_of(from);
    for &(df, dr) in dirs {
        let mut f = f0 + df;
        let mut r = r0 + dr;
        while let Some(to) = sq(f, r) {
            match pos.piece_at(to) {
                None => out.push(Move::new(from, to)),
                Some(pc) => {
                    if pc.color != c {
                        out.push(Move::new(from, to));
                    }
                    break;
                }
            }
            f += df;
            r += dr;
        }
    }
}

/// Castling: king on its home square, the right still held, the squares
/// between king and rook empty, and the king neither in, passing through nor
/// landing on an attacked square.
fn gen_castle(pos: &Position, from: u8, c: Color, out: &mut Vec<Move>) {
    let (home, kingside, queenside) = match c {
        Color::White => (4u8, pos.castling.wk, pos.castling.wq),
        Color::Black => (60u8, pos.castling.bk, pos.castling.bq),
    };
    if from != home || (!kingside && !queenside) || pos.in_check(c) {
        return;
    }

    let enemy = c.other();
    let rook = Some(Piece::new(c, PieceKind::Rook));
    // (allowed, rook square, squares that must be empty, squares the king crosses, destination)
    let options = [
        (kingside, home + 3, [home + 1, home + 2, home + 2], [home + 1, home + 2], home + 2),
        (queenside, home - 4, [home - 1, home - 2, home - 3], [home - 1, home - 2], home - 2),
    ];
    for (allowed, rook_sq, empty, crossed, to) in options {
        if allowed
            && pos.piece_at(rook_sq) == rook
            && empty.iter().all(|&s| pos.piece_at(s).is_none())
            && crossed.iter().all(|&s| !pos.is_square_attacked(s, enemy))
        {
            let mut mv = Move::new(home, to);
            mv.is_castle = true;
            out.push(mv);
        }
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
