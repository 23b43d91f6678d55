use std::fmt;

use serde::{Deserialize, Serialize};

use super::types::{Position, Token};

/// Square token matrix, row-major, row 0 at the top.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Grid {
    cells: Vec<Token>,
    size: usize,
}

impl Grid {
    pub fn new(size: usize) -> Self {
        Self {
            cells: vec![Token::Empty; size * size],
            size,
        }
    }

    pub fn from_fn(size: usize, mut token_at: impl FnMut(Position) -> Token) -> Self {
        let cells = (0..size * size)
            .map(|i| token_at(Position::new(i / size, i % size)))
            .collect();
        Self { cells, size }
    }

    pub fn from_rows(rows: &[Vec<Token>]) -> Result<Self, String> {
        let size = rows.len();
        if let Some((row, cells)) = rows.iter().enumerate().find(|(_, r)| r.len() != size) {
            return Err(format!(
                "Grid must be square: row {} has {} cells, expected {}",
                row,
                cells.len(),
                size
            ));
        }
        Ok(Self {
            cells: rows.iter().flatten().copied().collect(),
            size,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cells(&self) -> &[Token] {
        &self.cells
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    fn index(&self, pos: Position) -> usize {
        pos.row * self.size + pos.col
    }

    pub fn get(&self, pos: Position) -> Option<Token> {
        if !self.in_bounds(pos) {
            return None;
        }
        Some(self.cells[self.index(pos)])
    }

    /// Reads a cell that is known to be on the board; out-of-bounds reads are `Empty`.
    pub fn token_at(&self, row: usize, col: usize) -> Token {
        self.get(Position::new(row, col)).unwrap_or(Token::Empty)
    }

    /// Out-of-bounds writes are no-ops.
    pub fn set(&mut self, pos: Position, token: Token) {
        if self.in_bounds(pos) {
            let index = self.index(pos);
            self.cells[index] = token;
        }
    }

    pub fn swap(&mut self, a: Position, b: Position) {
        if self.in_bounds(a) && self.in_bounds(b) {
            let (ia, ib) = (self.index(a), self.index(b));
            self.cells.swap(ia, ib);
        }
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let size = self.size;
        (0..size * size).map(move |i| Position::new(i / size, i % size))
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|t| t.is_empty()).count()
    }

    pub fn count_of(&self, token: Token) -> usize {
        self.cells.iter().filter(|&&t| t == token).count()
    }

    /// Slides the non-empty tokens of `col` to the bottom, keeping their
    /// top-to-bottom order, and leaves the vacated top cells empty.
    /// Returns how many empty cells now sit at the top of the column.
    pub fn collapse_column(&mut self, col: usize) -> usize {
        if col >= self.size {
            return 0;
        }

        let mut write_row = self.size;
        for row in (0..self.size).rev() {
            let token = self.token_at(row, col);
            if token.is_empty() {
                continue;
            }
            write_row -= 1;
            if write_row != row {
                self.set(Position::new(write_row, col), token);
                self.set(Position::new(row, col), Token::Empty);
            }
        }

        write_row
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size.max(1)) {
            let line: Vec<&str> = row.iter().map(|t| t.symbol()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
