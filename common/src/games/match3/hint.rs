use super::grid::Grid;
use super::match_detector::detect;
use super::types::Position;
use crate::games::session_rng::SessionRng;

pub type Swap = (Position, Position);

/// Every right/down neighbour swap on the board, each pair listed once.
pub fn adjacent_swaps(size: usize) -> Vec<Swap> {
    let mut swaps = Vec::with_capacity(2 * size * size.saturating_sub(1));
    for row in 0..size {
        for col in 0..size {
            let from = Position::new(row, col);
            if col + 1 < size {
                swaps.push((from, Position::new(row, col + 1)));
            }
            if row + 1 < size {
                swaps.push((from, Position::new(row + 1, col)));
            }
        }
    }
    swaps
}

pub fn would_match(grid: &Grid, from: Position, to: Position) -> bool {
    let mut scratch = grid.clone();
    scratch.swap(from, to);
    detect(&scratch).has_matches()
}

/// Swaps that would be accepted on the current board, in row-major order.
pub fn find_matching_swaps(grid: &Grid) -> Vec<Swap> {
    let mut scratch = grid.clone();
    adjacent_swaps(grid.size())
        .into_iter()
        .filter(|&(from, to)| {
            scratch.swap(from, to);
            let matched = detect(&scratch).has_matches();
            scratch.swap(from, to);
            matched
        })
        .collect()
}

pub fn find_hint(grid: &Grid) -> Option<Swap> {
    find_matching_swaps(grid).into_iter().next()
}

/// Autoplay choice: a random matching swap when one exists, otherwise a
/// random adjacent swap that will be rejected.
pub fn choose_swap(grid: &Grid, rng: &mut SessionRng) -> Option<Swap> {
    let matching = find_matching_swaps(grid);
    let candidates = if matching.is_empty() {
        adjacent_swaps(grid.size())
    } else {
        matching
    };
    if candidates.is_empty() {
        return None;
    }
    Some(candidates[rng.random_range(0..candidates.len())])
}
