use std::fmt;

use serde::{Deserialize, Serialize};

use crate::games::session_rng::SessionRng;

/// Number of distinct non-empty tokens.
pub const TOKEN_KINDS: usize = 6;

pub const DEFAULT_BOARD_SIZE: usize = 8;

/// Shortest horizontal or vertical run that counts as a match.
pub const MIN_RUN_LENGTH: usize = 3;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum Token {
    Empty,
    Apple,
    Grape,
    Orange,
    Lemon,
    Watermelon,
    Strawberry,
}

impl Token {
    pub const ALL: [Token; TOKEN_KINDS] = [
        Token::Apple,
        Token::Grape,
        Token::Orange,
        Token::Lemon,
        Token::Watermelon,
        Token::Strawberry,
    ];

    pub fn is_empty(self) -> bool {
        self == Token::Empty
    }

    pub fn random(rng: &mut SessionRng) -> Token {
        Self::ALL[rng.random_range(0..TOKEN_KINDS)]
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Token::Empty => "·",
            Token::Apple => "🍎",
            Token::Grape => "🍇",
            Token::Orange => "🍊",
            Token::Lemon => "🍋",
            Token::Watermelon => "🍉",
            Token::Strawberry => "🍓",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn manhattan_distance(self, other: Position) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    pub fn is_adjacent(self, other: Position) -> bool {
        self.manhattan_distance(other) == 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ClearedCell {
    pub position: Position,
    pub token: Token,
}
