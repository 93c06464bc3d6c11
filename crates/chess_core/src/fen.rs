//! Forsyth-Edwards Notation parsing and formatting.

use thiserror::Error;

use crate::board::{CastlingRights, Position};
use crate::types::*;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("expected at least 4 fields, found {0}")]
    MissingFields(usize),
    #[error("expected 8 ranks, found {0}")]
    RankCount(usize),
    #[error("rank {rank} does not describe exactly 8 files")]
    RankWidth { rank: usize },
    #[error("invalid piece character '{0}'")]
    Piece(char),
    #[error("invalid side to move '{0}'")]
    SideToMove(String),
    #[error("invalid castling character '{0}'")]
    Castling(char),
    #[error("invalid en-passant square '{0}'")]
    EnPassant(String),
    #[error("invalid move counter '{0}'")]
    Counter(String),
    #[error("{0} side has {1} kings")]
    KingCount(Color, usize),
}

fn piece_from_char(ch: char) -> Result<Piece, FenError> {
    let color = if ch.is_ascii_uppercase() {
        Color::White
    } else {
        Color::Black
    };
    let kind = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return Err(FenError::Piece(ch)),
    };
    Ok(Piece::new(color, kind))
}

fn piece_to_char(pc: Piece) -> char {
    let ch = pc.kind.letter();
    match pc.color {
        Color::White => ch,
        Color::Black => ch.to_ascii_lowercase(),
    }
}

pub(crate) fn parse(fen: &str) -> Result<Position, FenError> {
    let parts: Vec<&str> = fen.split_whitespace().collect();
    if parts.len() < 4 {
        return Err(FenError::MissingFields(parts.len()));
    }

    let mut pos = Position::empty();

    let ranks: Vec<&str> = parts[0].split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount(ranks.len()));
    }
    for (rank_idx, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - rank_idx as i8; // FEN lists rank 8 .. 1
        let mut file: i8 = 0;
        for ch in rank_str.chars() {
            if let Some(d) = ch.to_digit(10) {
                file += d as i8;
            } else {
                let pc = piece_from_char(ch)?;
                let square = sq(file, rank).ok_or(FenError::RankWidth { rank: 8 - rank_idx })?;
                pos.set_piece(square, Some(pc));
                file += 1;
            }
            if file > 8 {
                return Err(FenError::RankWidth { rank: 8 - rank_idx });
            }
        }
        if file != 8 {
            return Err(FenError::RankWidth { rank: 8 - rank_idx });
        }
    }

    pos.side_to_move = match parts[1] {
        "w" => Color::White,
        "b" => Color::Black,
        other => return Err(FenError::SideToMove(other.to_string())),
    };

    pos.castling = CastlingRights::default();
    if parts[2] != "-" {
        for c in parts[2].chars() {
            match c {
                'K' => pos.castling.wk = true,
                'Q' => pos.castling.wq = true,
                'k' => pos.castling.bk = true,
                'q' => pos.castling.bq = true,
                _ => return Err(FenError::Castling(c)),
            }
        }
    }

    pos.en_passant = match parts[3] {
        "-" => None,
        coord => Some(coord_to_sq(coord).ok_or_else(|| FenError::EnPassant(coord.to_string()))?),
    };

    let counter = |field: Option<&&str>, default: u32| match field {
        Some(s) => s.parse::<u32>().map_err(|_| FenError::Counter(s.to_string())),
        None => Ok(default),
    };
    pos.halfmove_clock = counter(parts.get(4), 0)?;
    pos.fullmove_number = counter(parts.get(5), 1)?;

    for color in [Color::White, Color::Black] {
        let kings = pos
            .pieces()
            .filter(|(_, pc)| *pc == Piece::new(color, PieceKind::King))
            .count();
        if kings != 1 {
            return Err(FenError::KingCount(color, kings));
        }
    }

    Ok(pos)
}

pub(crate) fn format(pos: &Position) -> String {
    let mut out = String::new();
    for rank in (0..8).rev() {
        let mut empty = 0;
        for file in 0..8 {
            match pos.board[rank * 8 + file] {
                Some(pc) => {
                    if empty > 0 {
                        out.push_str(&empty.to_string());
                        empty = 0;
                    }
                    out.push(piece_to_char(pc));
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            out.push_str(&empty.to_string());
        }
        if rank > 0 {
            out.push('/');
        }
    }

    out.push(' ');
    out.push(match pos.side_to_move {
        Color::White => 'w',
        Color::Black => 'b',
    });

    out.push(' ');
    let c = &pos.castling;
    let rights: String = [(c.wk, 'K'), (c.wq, 'Q'), (c.bk, 'k'), (c.bq, 'q')]
        .iter()
        .filter(|(on, _)| *on)
        .map(|(_, ch)| *ch)
        .collect();
    out.push_str(if rights.is_empty() { "-" } else { rights.as_str() });

    out.push(' ');
    match pos.en_passant {
        Some(ep) => out.push_str(&sq_to_coord(ep)),
        None => out.push('-'),
    }

    out.push_str(&format!(" {} {}", pos.halfmove_clock, pos.fullmove_number));
    out
}
