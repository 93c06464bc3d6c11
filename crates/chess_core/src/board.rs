use crate::fen::{self, FenError};
use crate::types::*;

pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

pub(crate) const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

pub(crate) const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub(crate) const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CastlingRights {
    pub wk: bool,
    pub wq: bool,
    pub bk: bool,
    pub bq: bool,
}

impl CastlingRights {
    pub fn all() -> Self {
        Self {
            wk: true,
            wq: true,
            bk: true,
            bq: true,
        }
    }

    /// Drop any right tied to a rook home square that was vacated or captured on.
    fn touch(&mut self, square: u8) {
        match square {
            0 => self.wq = false,
            7 => self.wk = false,
            56 => self.bq = false,
            63 => self.bk = false,
            _ => {}
        }
    }
}

/// Full game state on a 64-square mailbox.
///
/// `Clone` produces a deep, independent copy; nothing inside is shared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub board: [Option<Piece>; 64],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<u8>, // square behind a pawn that just advanced 2
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

/// Everything `unmake_move` needs that the move itself does not carry.
#[derive(Clone, Debug)]
pub struct Undo {
    pub captured: Option<Piece>,
    pub castling: CastlingRights,
    pub en_passant: Option<u8>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    pub moved_piece: Piece,
    pub rook_move: Option<(u8, u8)>, // (rook_from, rook_to) for castling
    pub ep_captured_sq: Option<u8>,  // square actually captured in en-passant
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Position {
    pub fn empty() -> Self {
        Position {
            board: [None; 64],
            side_to_move: Color::White,
            castling: CastlingRights::default(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    pub fn startpos() -> Self {
        let mut p = Position {
            castling: CastlingRights::all(),
            ..Position::empty()
        };

        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (f, &kind) in back.iter().enumerate() {
            p.board[f] = Some(Piece::new(Color::White, kind));
            p.board[8 + f] = Some(Piece::new(Color::White, PieceKind::Pawn));
            p.board[48 + f] = Some(Piece::new(Color::Black, PieceKind::Pawn));
            p.board[56 + f] = Some(Piece::new(Color::Black, kind));
        }
        p
    }

    /// Parse a position from Forsyth-Edwards Notation.
    ///
    /// The half-move clock and full-move number may be omitted.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        fen::parse(fen)
    }

    pub fn to_fen(&self) -> String {
        fen::format(self)
    }

    pub fn king_sq(&self, c: Color) -> Option<u8> {
        (0..64u8).find(|&i| self.board[i as usize] == Some(Piece::new(c, PieceKind::King)))
    }

    pub fn piece_at(&self, sq: u8) -> Option<Piece> {
        self.board[sq as usize]
    }

    pub fn set_piece(&mut self, sq: u8, pc: Option<Piece>) {
        self.board[sq as usize] = pc;
    }

    /// Iterate over occupied squares.
    pub fn pieces(&self) -> impl Iterator<Item = (u8, Piece)> + '_ {
        self.board
            .iter()
            .enumerate()
            .filter_map(|(i, pc)| pc.map(|pc| (i as u8, pc)))
    }

    pub fn in_check(&self, c: Color) -> bool {
        match self.king_sq(c) {
            Some(ksq) => self.is_square_attacked(ksq, c.other()),
            None => false,
        }
    }

    /// True if the move is a capture in this position (en passant included).
    pub fn is_capture(&self, mv: Move) -> bool {
        mv.is_en_passant || self.piece_at(mv.to).is_some()
    }

    /// Copy of this position with `side` to move, for static move counting.
    ///
    /// The en-passant target only belongs to the side that was actually to
    /// move, so it is cleared when the side changes.
    pub fn with_side_to_move(&self, side: Color) -> Position {
        let mut copy = self.clone();
        if side != self.side_to_move {
            copy.side_to_move = side;
            copy.en_passant = None;
        }
        copy
    }

    /// Neither side can possibly deliver mate.
    ///
    /// True for K vs K, a single minor piece against a bare king, and any
    /// number of bishops that all stand on squares of one colour.
    pub fn is_insufficient_material(&self) -> bool {
        let mut minors = 0;
        let mut knights = 0;
        let mut light_bishops = 0;
        let mut dark_bishops = 0;

        for (square, pc) in self.pieces() {
            match pc.kind {
                PieceKind::King => {}
                PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
                PieceKind::Knight => {
                    minors += 1;
                    knights += 1;
                }
                PieceKind::Bishop => {
                    minors += 1;
                    if is_light_square(square) {
                        light_bishops += 1;
                    } else {
                        dark_bishops += 1;
                    }
                }
            }
        }

        minors <= 1 || (knights == 0 && (light_bishops == 0 || dark_bishops == 0))
    }

    pub fn is_square_attacked(&self, target: u8, by: Color) -> bool {
        let tf = file_of(target);
        let tr = rank_of(target);
        let hits = |s: Option<u8>, kinds: &[PieceKind]| {
            s.and_then(|s| self.piece_at(s))
                .is_some_and(|pc| pc.color == by && kinds.contains(&pc.kind))
        };

        // A white pawn attacks upward, so it sits one rank below the target.
        let pawn_rank = match by {
            Color::White => -1,
            Color::Black => 1,
        };
        if [-1, 1]
            .into_iter()
            .any(|df| hits(sq(tf + df, tr + pawn_rank), &[PieceKind::Pawn]))
        {
            return true;
        }

        if KNIGHT_OFFSETS
            .iter()
            .any(|&(df, dr)| hits(sq(tf + df, tr + dr), &[PieceKind::Knight]))
        {
            return true;
        }

        if KING_OFFSETS
            .iter()
            .any(|&(df, dr)| hits(sq(tf + df, tr + dr), &[PieceKind::King]))
        {
            return true;
        }

        let sliders: [(&[(i8, i8)], [PieceKind; 2]); 2] = [
            (&DIAGONALS, [PieceKind::Bishop, PieceKind::Queen]),
            (&ORTHOGONALS, [PieceKind::Rook, PieceKind::Queen]),
        ];
        for (dirs, kinds) in sliders {
            for &(df, dr) in dirs {
                let mut f = tf + df;
                let mut r = tr + dr;
                while let Some(s) = sq(f, r) {
                    if let Some(pc) = self.piece_at(s) {
                        if pc.color == by && kinds.contains(&pc.kind) {
                            return true;
                        }
                        break;
                    }
                    f += df;
                    r += dr;
                }
            }
        }

        false
    }

    /// Apply a move generated for this position.
    ///
    /// # Panics
    /// Panics if the origin square is empty. Only moves produced by the move
    /// generator for this exact position may be applied.
    pub fn make_move(&mut self, mv: Move) -> Undo {
        let from = mv.from;
        let to = mv.to;
        let moved = self.piece_at(from).expect("no piece on from-square");
        let mut captured = self.piece_at(to);
        let undo_castling = self.castling.clone();
        let undo_ep = self.en_passant;
        let undo_hmc = self.halfmove_clock;
        let undo_fmn = self.fullmove_number;

        self.en_passant = None;
        let mut reset_hmc = moved.kind == PieceKind::Pawn || captured.is_some();

        let mut ep_captured_sq = None;
        if mv.is_en_passant {
            let behind = match moved.color {
                Color::White => -1,
                Color::Black => 1,
            };
            if let Some(cs) = sq(file_of(to), rank_of(to) + behind) {
                captured = self.piece_at(cs);
                self.set_piece(cs, None);
                ep_captured_sq = Some(cs);
                reset_hmc = true;
            }
        }

        self.set_piece(from, None);
        let landed = match mv.promo {
            Some(kind) if moved.kind == PieceKind::Pawn => Piece::new(moved.color, kind),
            _ => moved,
        };
        self.set_piece(to, Some(landed));

        let mut rook_move = None;
        if mv.is_castle && moved.kind == PieceKind::King {
            let rook_squares = match (from, to) {
                (4, 6) => Some((7, 5)),
                (4, 2) => Some((0, 3)),
                (60, 62) => Some((63, 61)),
                (60, 58) => Some((56, 59)),
                _ => None,
            };
            if let Some((rf, rt)) = rook_squares {
                let rook = self.piece_at(rf);
                self.set_piece(rf, None);
                self.set_piece(rt, rook);
                rook_move = Some((rf, rt));
            }
        }

        if moved.kind == PieceKind::King {
            match moved.color {
                Color::White => {
                    self.castling.wk = false;
                    self.castling.wq = false;
                }
                Color::Black => {
                    self.castling.bk = false;
                    self.castling.bq = false;
                }
            }
        }
        self.castling.touch(from);
        self.castling.touch(to);

        if moved.kind == PieceKind::Pawn && (rank_of(to) - rank_of(from)).abs() == 2 {
            self.en_passant = sq(file_of(from), (rank_of(from) + rank_of(to)) / 2);
        }

        self.halfmove_clock = if reset_hmc {
            0
        } else {
            self.halfmove_clock + 1
        };
        if self.side_to_move == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = self.side_to_move.other();

        Undo {
            captured,
            castling: undo_castling,
            en_passant: undo_ep,
            halfmove_clock: undo_hmc,
            fullmove_number: undo_fmn,
            moved_piece: moved,
            rook_move,
            ep_captured_sq,
        }
    }

    pub fn unmake_move(&mut self, mv: Move, undo: Undo) {
        self.side_to_move = self.side_to_move.other();
        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_number = undo.fullmove_number;

        if let Some((rf, rt)) = undo.rook_move {
            let rook = self.piece_at(rt);
            self.set_piece(rt, None);
            self.set_piece(rf, rook);
        }

        // The moved piece goes back as it was, which also reverts promotions.
        self.set_piece(mv.to, None);
        self.set_piece(mv.from, Some(undo.moved_piece));

        match undo.ep_captured_sq {
            Some(cs) => self.set_piece(cs, undo.captured),
            None => self.set_piece(mv.to, undo.captured),
        }
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
