use std::fmt;

use super::cascade;
use super::events::GameEvent;
use super::grid::Grid;
use super::match_detector::detect;
use super::objectives::ObjectiveTracker;
use super::types::Position;
use crate::games::session_rng::SessionRng;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TurnState {
    Idle,
    AwaitingSwapResolution,
}

/// Why a swap intent was dropped. None of these mutate state or cost a swap.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SwapIgnored {
    OutOfBounds,
    InvalidAdjacency,
    NoBudget,
    Reentrant,
}

impl fmt::Display for SwapIgnored {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            SwapIgnored::OutOfBounds => "cell outside the board",
            SwapIgnored::InvalidAdjacency => "cells are not neighbours",
            SwapIgnored::NoBudget => "no swaps left",
            SwapIgnored::Reentrant => "previous swap still resolving",
        };
        f.write_str(reason)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TurnOutcome {
    Continue,
    LevelComplete,
    GameOver,
}

#[derive(Clone, Debug)]
pub struct TurnResult {
    pub accepted: bool,
    pub iterations: u32,
    pub outcome: TurnOutcome,
    pub events: Vec<GameEvent>,
}

/// Mutable level state a turn operates on, borrowed from the owning session.
pub struct TurnContext<'a> {
    pub grid: &'a mut Grid,
    pub remaining_swaps: &'a mut u32,
    pub tracker: &'a mut ObjectiveTracker,
    pub rng: &'a mut SessionRng,
    pub level_index: u32,
    pub max_cascade_iterations: u32,
}

#[derive(Debug)]
pub struct TurnController {
    state: TurnState,
}

impl Default for TurnController {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnController {
    pub fn new() -> Self {
        Self {
            state: TurnState::Idle,
        }
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn validate(
        &self,
        grid: &Grid,
        remaining_swaps: u32,
        from: Position,
        to: Position,
    ) -> Result<(), SwapIgnored> {
        if self.state != TurnState::Idle {
            return Err(SwapIgnored::Reentrant);
        }
        if remaining_swaps == 0 {
            return Err(SwapIgnored::NoBudget);
        }
        if !grid.in_bounds(from) || !grid.in_bounds(to) {
            return Err(SwapIgnored::OutOfBounds);
        }
        if !from.is_adjacent(to) {
            return Err(SwapIgnored::InvalidAdjacency);
        }
        Ok(())
    }

    /// Runs one full turn: swap, charge one move, then either revert or
    /// resolve the cascade, and finally decide the level outcome.
    pub fn handle_swap(
        &mut self,
        ctx: TurnContext<'_>,
        from: Position,
        to: Position,
    ) -> Result<TurnResult, SwapIgnored> {
        self.validate(ctx.grid, *ctx.remaining_swaps, from, to)?;
        self.state = TurnState::AwaitingSwapResolution;

        ctx.grid.swap(from, to);
        *ctx.remaining_swaps -= 1;

        let mut events = Vec::new();
        let mut iterations = 0;
        let accepted = detect(ctx.grid).has_matches();

        if accepted {
            let tracker = &mut *ctx.tracker;
            let mut objectives_changed = false;
            let report = cascade::resolve(
                ctx.grid,
                ctx.rng,
                ctx.max_cascade_iterations,
                |token| objectives_changed |= tracker.record(token),
            );

            for step in report.steps {
                events.push(GameEvent::CellsCleared(step.cleared));
                events.push(GameEvent::CellsCollapsedAndRefilled(step.grid_after));
                iterations += 1;
            }
            if objectives_changed {
                events.push(GameEvent::ObjectivesChanged(ctx.tracker.collected().clone()));
            }
            events.push(GameEvent::SwapAccepted { iterations });
        } else {
            ctx.grid.swap(from, to);
            events.push(GameEvent::SwapRejected);
        }

        self.state = TurnState::Idle;

        let outcome = if ctx.tracker.is_complete() {
            events.push(GameEvent::LevelComplete {
                new_level_index: ctx.level_index.saturating_add(1),
            });
            TurnOutcome::LevelComplete
        } else if *ctx.remaining_swaps == 0 {
            events.push(GameEvent::GameOver);
            TurnOutcome::GameOver
        } else {
            events.push(GameEvent::Continue {
                remaining_swaps: *ctx.remaining_swaps,
            });
            TurnOutcome::Continue
        };

        Ok(TurnResult {
            accepted,
            iterations,
            outcome,
            events,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::match3::level::Objective;
    use crate::games::match3::types::{TOKEN_KINDS, Token};

    struct Fixture {
        grid: Grid,
        remaining_swaps: u32,
        tracker: ObjectiveTracker,
        rng: SessionRng,
    }

    impl Fixture {
        fn new(grid: Grid, remaining_swaps: u32, objectives: &[Objective]) -> Self {
            Self {
                grid,
                remaining_swaps,
                tracker: ObjectiveTracker::new(objectives),
                rng: SessionRng::new(42),
            }
        }

        fn ctx(&mut self) -> TurnContext<'_> {
            TurnContext {
                grid: &mut self.grid,
                remaining_swaps: &mut self.remaining_swaps,
                tracker: &mut self.tracker,
                rng: &mut self.rng,
                level_index: 0,
                max_cascade_iterations: 1000,
            }
        }
    }

    fn striped_grid() -> Grid {
        Grid::from_fn(8, |p| Token::ALL[(p.row + 2 * p.col) % TOKEN_KINDS])
    }

    /// Swapping (1,2) with (0,2) lines up three apples on row 0.
    fn one_swap_from_match() -> Grid {
        let mut grid = striped_grid();
        grid.set(Position::new(0, 0), Token::Apple);
        grid.set(Position::new(0, 1), Token::Apple);
        grid.set(Position::new(1, 2), Token::Apple);
        grid
    }

    fn big_objective() -> Vec<Objective> {
        vec![Objective { token: Token::Lemon, target: 1000 }]
    }

    #[test]
    fn test_distance_two_swap_is_ignored() {
        let mut fixture = Fixture::new(striped_grid(), 10, &big_objective());
        let before = fixture.grid.clone();
        let mut controller = TurnController::new();

        let result = controller.handle_swap(fixture.ctx(), Position::new(3, 3), Position::new(3, 5));

        assert_eq!(result.unwrap_err(), SwapIgnored::InvalidAdjacency);
        assert_eq!(fixture.remaining_swaps, 10);
        assert_eq!(fixture.grid, before);
        assert_eq!(controller.state(), TurnState::Idle);
    }

    #[test]
    fn test_diagonal_and_out_of_bounds_are_ignored() {
        let mut fixture = Fixture::new(striped_grid(), 10, &big_objective());
        let mut controller = TurnController::new();
        assert_eq!(
            controller
                .handle_swap(fixture.ctx(), Position::new(2, 2), Position::new(3, 3))
                .unwrap_err(),
            SwapIgnored::InvalidAdjacency
        );
        assert_eq!(
            controller
                .handle_swap(fixture.ctx(), Position::new(7, 7), Position::new(7, 8))
                .unwrap_err(),
            SwapIgnored::OutOfBounds
        );
        assert_eq!(fixture.remaining_swaps, 10);
    }

    #[test]
    fn test_no_budget_is_ignored() {
        let mut fixture = Fixture::new(one_swap_from_match(), 0, &big_objective());
        let before = fixture.grid.clone();
        let mut controller = TurnController::new();
        let err = controller
            .handle_swap(fixture.ctx(), Position::new(1, 2), Position::new(0, 2))
            .unwrap_err();
        assert_eq!(err, SwapIgnored::NoBudget);
        assert_eq!(fixture.grid, before);
    }

    #[test]
    fn test_reentrant_request_is_ignored() {
        let mut fixture = Fixture::new(one_swap_from_match(), 5, &big_objective());
        let mut controller = TurnController::new();
        controller.state = TurnState::AwaitingSwapResolution;
        let err = controller
            .handle_swap(fixture.ctx(), Position::new(1, 2), Position::new(0, 2))
            .unwrap_err();
        assert_eq!(err, SwapIgnored::Reentrant);
        assert_eq!(fixture.remaining_swaps, 5);
    }

    #[test]
    fn test_rejected_swap_reverts_and_still_costs_one() {
        let mut fixture = Fixture::new(striped_grid(), 10, &big_objective());
        let before = fixture.grid.clone();
        let mut controller = TurnController::new();

        let result = controller
            .handle_swap(fixture.ctx(), Position::new(3, 3), Position::new(3, 4))
            .unwrap();

        assert!(!result.accepted);
        assert_eq!(fixture.remaining_swaps, 9);
        assert_eq!(fixture.grid, before);
        assert_eq!(
            result.events,
            vec![GameEvent::SwapRejected, GameEvent::Continue { remaining_swaps: 9 }]
        );
        assert_eq!(controller.state(), TurnState::Idle);
    }

    #[test]
    fn test_accepted_swap_costs_one_and_stabilizes() {
        let mut fixture = Fixture::new(one_swap_from_match(), 10, &big_objective());
        let mut controller = TurnController::new();

        let result = controller
            .handle_swap(fixture.ctx(), Position::new(1, 2), Position::new(0, 2))
            .unwrap();

        assert!(result.accepted);
        assert!(result.iterations >= 1);
        assert_eq!(fixture.remaining_swaps, 9);
        assert!(!detect(&fixture.grid).has_matches());
        assert_eq!(result.outcome, TurnOutcome::Continue);

        let GameEvent::CellsCleared(first_cleared) = &result.events[0] else {
            panic!("expected cells-cleared first, got {:?}", result.events[0]);
        };
        assert!(first_cleared.len() >= 3);
        assert!(result.events.contains(&GameEvent::SwapAccepted {
            iterations: result.iterations
        }));
    }

    #[test]
    fn test_objective_accounting_matches_cleared_cells() {
        let objectives = vec![
            Objective { token: Token::Apple, target: 500 },
            Objective { token: Token::Grape, target: 500 },
        ];
        let mut fixture = Fixture::new(one_swap_from_match(), 10, &objectives);
        let mut controller = TurnController::new();

        let result = controller
            .handle_swap(fixture.ctx(), Position::new(1, 2), Position::new(0, 2))
            .unwrap();

        let cleared_of = |token: Token| {
            result
                .events
                .iter()
                .filter_map(|e| match e {
                    GameEvent::CellsCleared(cells) => Some(cells),
                    _ => None,
                })
                .flatten()
                .filter(|c| c.token == token)
                .count() as u32
        };

        assert!(cleared_of(Token::Apple) >= 3);
        assert_eq!(fixture.tracker.collected_of(Token::Apple), cleared_of(Token::Apple));
        assert_eq!(fixture.tracker.collected_of(Token::Grape), cleared_of(Token::Grape));
        assert!(result
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::ObjectivesChanged(_))));
    }

    #[test]
    fn test_completing_objectives_reports_level_complete() {
        let objectives = vec![Objective { token: Token::Apple, target: 3 }];
        let mut fixture = Fixture::new(one_swap_from_match(), 10, &objectives);
        let mut controller = TurnController::new();

        let result = controller
            .handle_swap(fixture.ctx(), Position::new(1, 2), Position::new(0, 2))
            .unwrap();

        assert_eq!(result.outcome, TurnOutcome::LevelComplete);
        assert_eq!(
            result.events.last(),
            Some(&GameEvent::LevelComplete { new_level_index: 1 })
        );
    }

    #[test]
    fn test_last_swap_without_completion_is_game_over() {
        let mut fixture = Fixture::new(striped_grid(), 1, &big_objective());
        let mut controller = TurnController::new();

        let result = controller
            .handle_swap(fixture.ctx(), Position::new(3, 3), Position::new(3, 4))
            .unwrap();
        assert_eq!(result.outcome, TurnOutcome::GameOver);
        assert_eq!(result.events.last(), Some(&GameEvent::GameOver));
        assert_eq!(fixture.remaining_swaps, 0);

        let again = controller.handle_swap(fixture.ctx(), Position::new(3, 3), Position::new(3, 4));
        assert_eq!(again.unwrap_err(), SwapIgnored::NoBudget);
    }

    #[test]
    fn test_last_swap_that_completes_wins() {
        let objectives = vec![Objective { token: Token::Apple, target: 3 }];
        let mut fixture = Fixture::new(one_swap_from_match(), 1, &objectives);
        let mut controller = TurnController::new();

        let result = controller
            .handle_swap(fixture.ctx(), Position::new(1, 2), Position::new(0, 2))
            .unwrap();
        assert_eq!(result.outcome, TurnOutcome::LevelComplete);
        assert!(!result.events.contains(&GameEvent::GameOver));
    }
}
