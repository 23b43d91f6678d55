use super::grid::Grid;
use super::types::{Position, Token};
use crate::games::session_rng::SessionRng;

/// Fills every cell in row-major order, redrawing a token while it would
/// complete a run of three with the two cells to its left or the two above.
/// At most two tokens are ever forbidden for one cell, so with six kinds the
/// redraw loop always finds a candidate.
pub fn fill(grid: &mut Grid, rng: &mut SessionRng) {
    for pos in grid.positions() {
        loop {
            let token = Token::random(rng);
            if !completes_run(grid, pos, token) {
                grid.set(pos, token);
                break;
            }
        }
    }
}

fn completes_run(grid: &Grid, pos: Position, token: Token) -> bool {
    let Position { row, col } = pos;

    let horizontal =
        col >= 2 && grid.token_at(row, col - 1) == token && grid.token_at(row, col - 2) == token;
    let vertical =
        row >= 2 && grid.token_at(row - 1, col) == token && grid.token_at(row - 2, col) == token;

    horizontal || vertical
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::match3::match_detector::detect;

    #[test]
    fn test_fill_leaves_no_empty_cells() {
        let mut rng = SessionRng::new(42);
        let mut grid = Grid::new(8);
        fill(&mut grid, &mut rng);
        assert_eq!(grid.empty_count(), 0);
    }

    #[test]
    fn test_fill_never_produces_a_match() {
        for seed in 0..200 {
            let mut rng = SessionRng::new(seed);
            let mut grid = Grid::new(8);
            fill(&mut grid, &mut rng);
            assert!(!detect(&grid).has_matches(), "seed {} produced a match:\n{}", seed, grid);
        }
    }

    #[test]
    fn test_fill_is_deterministic_per_seed() {
        let mut first = Grid::new(8);
        let mut second = Grid::new(8);
        fill(&mut first, &mut SessionRng::new(9));
        fill(&mut second, &mut SessionRng::new(9));
        assert_eq!(first, second);
    }

    #[test]
    fn test_completes_run_checks_left_and_above() {
        let mut grid = Grid::new(4);
        grid.set(Position::new(0, 0), Token::Apple);
        grid.set(Position::new(0, 1), Token::Apple);
        grid.set(Position::new(0, 3), Token::Grape);
        grid.set(Position::new(1, 3), Token::Grape);

        assert!(completes_run(&grid, Position::new(0, 2), Token::Apple));
        assert!(!completes_run(&grid, Position::new(0, 2), Token::Grape));
        assert!(completes_run(&grid, Position::new(2, 3), Token::Grape));
        assert!(!completes_run(&grid, Position::new(2, 3), Token::Apple));
    }

    #[test]
    fn test_fill_small_board() {
        let mut rng = SessionRng::new(5);
        let mut grid = Grid::new(3);
        fill(&mut grid, &mut rng);
        assert_eq!(grid.empty_count(), 0);
        assert!(!detect(&grid).has_matches());
    }
}
