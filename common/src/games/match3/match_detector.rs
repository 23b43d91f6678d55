use super::grid::Grid;
use super::types::{MIN_RUN_LENGTH, Position};

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct MatchResult {
    mask: Vec<bool>,
    size: usize,
    total_matched: usize,
}

impl MatchResult {
    pub fn is_matched(&self, pos: Position) -> bool {
        pos.row < self.size && pos.col < self.size && self.mask[pos.row * self.size + pos.col]
    }

    pub fn has_matches(&self) -> bool {
        self.total_matched > 0
    }

    /// Sum of run lengths over both axes. A cell that sits in a horizontal and
    /// a vertical run contributes to both, so this can exceed `matched_count`.
    pub fn total_matched(&self) -> usize {
        self.total_matched
    }

    /// Number of distinct matched cells.
    pub fn matched_count(&self) -> usize {
        self.mask.iter().filter(|&&m| m).count()
    }

    /// Matched cells in row-major order.
    pub fn matched_positions(&self) -> Vec<Position> {
        self.mask
            .iter()
            .enumerate()
            .filter(|(_, matched)| **matched)
            .map(|(i, _)| Position::new(i / self.size, i % self.size))
            .collect()
    }

    pub fn mask(&self) -> &[bool] {
        &self.mask
    }
}

/// Scans every row, then every column, for runs of `MIN_RUN_LENGTH` or more.
/// The column pass also starts runs on cells the row pass already matched,
/// so both arms of an L or T shape are reported.
pub fn detect(grid: &Grid) -> MatchResult {
    let size = grid.size();
    let mut result = MatchResult {
        mask: vec![false; size * size],
        size,
        total_matched: 0,
    };

    for row in 0..size {
        scan_line(grid, &mut result, |i| Position::new(row, i));
    }
    for col in 0..size {
        scan_line(grid, &mut result, |i| Position::new(i, col));
    }

    result
}

/// Walks one row or column, jumping over each run once it has been measured.
fn scan_line(grid: &Grid, result: &mut MatchResult, position_at: impl Fn(usize) -> Position) {
    let size = grid.size();
    let mut start = 0;

    while start < size {
        let token = grid.token_at(position_at(start).row, position_at(start).col);
        if token.is_empty() {
            start += 1;
            continue;
        }

        let mut run_length = 1;
        while start + run_length < size {
            let next = position_at(start + run_length);
            if grid.token_at(next.row, next.col) != token {
                break;
            }
            run_length += 1;
        }

        if run_length >= MIN_RUN_LENGTH {
            result.total_matched += run_length;
            for i in start..start + run_length {
                let pos = position_at(i);
                result.mask[pos.row * size + pos.col] = true;
            }
        }

        start += run_length;
    }
}
