use super::grid::Grid;
use super::match_detector::{MatchResult, detect};
use super::types::{ClearedCell, Token};
use crate::games::session_rng::SessionRng;
use crate::log_warn;

pub const DEFAULT_MAX_CASCADE_ITERATIONS: u32 = 1000;

/// One clear → collapse → refill pass.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CascadeStep {
    pub cleared: Vec<ClearedCell>,
    pub grid_after: Grid,
}

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct CascadeReport {
    pub steps: Vec<CascadeStep>,
    pub hit_iteration_cap: bool,
}

impl CascadeReport {
    pub fn iterations(&self) -> usize {
        self.steps.len()
    }

    pub fn cleared_count(&self) -> usize {
        self.steps.iter().map(|s| s.cleared.len()).sum()
    }
}

/// Runs passes until the grid holds no run, calling `on_cleared` once for
/// every cleared cell. `max_iterations` bounds the loop; reaching it leaves
/// the grid full but possibly still holding a run.
pub fn resolve<F>(
    grid: &mut Grid,
    rng: &mut SessionRng,
    max_iterations: u32,
    mut on_cleared: F,
) -> CascadeReport
where
    F: FnMut(Token),
{
    let mut report = CascadeReport::default();

    while let Some(step) = resolve_step(grid, rng, &mut on_cleared) {
        report.steps.push(step);
        if report.steps.len() >= max_iterations as usize {
            if detect(grid).has_matches() {
                log_warn!(
                    "Cascade stopped after {} iterations with matches remaining",
                    report.steps.len()
                );
                report.hit_iteration_cap = true;
            }
            break;
        }
    }

    report
}

/// Performs a single pass. Returns `None` when the grid is already stable.
pub fn resolve_step<F>(grid: &mut Grid, rng: &mut SessionRng, on_cleared: &mut F) -> Option<CascadeStep>
where
    F: FnMut(Token),
{
    let matches = detect(grid);
    if !matches.has_matches() {
        return None;
    }

    let cleared = clear_matches(grid, &matches, on_cleared);
    collapse(grid);
    refill(grid, rng);

    Some(CascadeStep {
        cleared,
        grid_after: grid.clone(),
    })
}

fn clear_matches<F>(grid: &mut Grid, matches: &MatchResult, on_cleared: &mut F) -> Vec<ClearedCell>
where
    F: FnMut(Token),
{
    matches
        .matched_positions()
        .into_iter()
        .map(|position| {
            let token = grid.token_at(position.row, position.col);
            on_cleared(token);
            grid.set(position, Token::Empty);
            ClearedCell { position, token }
        })
        .collect()
}

pub fn collapse(grid: &mut Grid) {
    for col in 0..grid.size() {
        grid.collapse_column(col);
    }
}

/// Refills every empty cell with an unconstrained random token; new runs are allowed.
pub fn refill(grid: &mut Grid, rng: &mut SessionRng) -> usize {
    let empty: Vec<_> = grid
        .positions()
        .filter(|&p| grid.get(p) == Some(Token::Empty))
        .collect();
    for &pos in &empty {
        grid.set(pos, Token::random(rng));
    }
    empty.len()
}
