use super::board_init;
use super::events::GameEvent;
use super::grid::Grid;
use super::level::{self, LevelPlan};
use super::objectives::ObjectiveTracker;
use super::settings::GameSettings;
use super::turn_controller::{SwapIgnored, TurnContext, TurnController, TurnOutcome, TurnState};
use super::types::Position;
use crate::games::session_rng::SessionRng;
use crate::log;

/// The single live game: owns the board, the level plan, the collection
/// progress and the random source. Level changes rebuild all level state.
#[derive(Debug)]
pub struct GameSession {
    level_index: u32,
    remaining_swaps: u32,
    plan: LevelPlan,
    tracker: ObjectiveTracker,
    grid: Grid,
    controller: TurnController,
    rng: SessionRng,
    settings: GameSettings,
    swaps_used: u32,
}

impl GameSession {
    pub fn new(settings: GameSettings, rng: SessionRng) -> Self {
        let mut session = Self {
            level_index: 0,
            remaining_swaps: 0,
            plan: LevelPlan {
                swaps: 0,
                objectives: Vec::new(),
            },
            tracker: ObjectiveTracker::new(&[]),
            grid: Grid::new(settings.board_size),
            controller: TurnController::new(),
            rng,
            settings,
            swaps_used: 0,
        };
        session.start_level(0);
        session
    }

    /// Replaces all level state with a freshly generated level.
    pub fn start_level(&mut self, level_index: u32) -> Vec<GameEvent> {
        let plan = level::generate(
            level_index.saturating_add(1),
            self.settings.max_objectives,
            &mut self.rng,
        );
        let mut grid = Grid::new(self.settings.board_size);
        board_init::fill(&mut grid, &mut self.rng);

        self.level_index = level_index;
        self.remaining_swaps = plan.swaps;
        self.tracker = ObjectiveTracker::new(&plan.objectives);
        self.plan = plan;
        self.grid = grid;
        self.controller = TurnController::new();

        log!(
            "Level {} started: {} swaps, objectives [{}]",
            self.level_number(),
            self.remaining_swaps,
            self.plan
                .objectives
                .iter()
                .map(|o| format!("{} x{}", o.token, o.target))
                .collect::<Vec<_>>()
                .join(", ")
        );

        self.level_events()
    }

    pub fn reset_game(&mut self) -> Vec<GameEvent> {
        self.swaps_used = 0;
        self.start_level(0)
    }

    /// Events describing the current level from scratch, for a view that just attached.
    pub fn level_events(&self) -> Vec<GameEvent> {
        vec![
            GameEvent::LevelStarted {
                level_index: self.level_index,
                plan: self.plan.clone(),
                remaining_swaps: self.remaining_swaps,
            },
            GameEvent::BoardInitialized(self.grid.clone()),
            GameEvent::ObjectivesChanged(self.tracker.collected().clone()),
        ]
    }

    /// The only gameplay entry point. Ignored intents leave the session
    /// untouched; a completed level is replaced by the next one and its
    /// start-up events follow `LevelComplete`.
    pub fn request_swap(&mut self, from: Position, to: Position) -> Result<Vec<GameEvent>, SwapIgnored> {
        let ctx = TurnContext {
            grid: &mut self.grid,
            remaining_swaps: &mut self.remaining_swaps,
            tracker: &mut self.tracker,
            rng: &mut self.rng,
            level_index: self.level_index,
            max_cascade_iterations: self.settings.max_cascade_iterations,
        };
        let result = self.controller.handle_swap(ctx, from, to)?;
        self.swaps_used += 1;

        let mut events = result.events;
        match result.outcome {
            TurnOutcome::LevelComplete => {
                log!("Level {} complete", self.level_number());
                events.extend(self.start_level(self.level_index.saturating_add(1)));
            }
            TurnOutcome::GameOver => {
                log!("Game over on level {}", self.level_number());
            }
            TurnOutcome::Continue => {}
        }

        Ok(events)
    }

    pub fn level_index(&self) -> u32 {
        self.level_index
    }

    /// 1-based number shown to players.
    pub fn level_number(&self) -> u32 {
        self.level_index.saturating_add(1)
    }

    pub fn remaining_swaps(&self) -> u32 {
        self.remaining_swaps
    }

    pub fn swaps_used(&self) -> u32 {
        self.swaps_used
    }

    pub fn plan(&self) -> &LevelPlan {
        &self.plan
    }

    pub fn progress(&self) -> &ObjectiveTracker {
        &self.tracker
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn turn_state(&self) -> TurnState {
        self.controller.state()
    }

    pub fn is_game_over(&self) -> bool {
        self.remaining_swaps == 0 && !self.tracker.is_complete()
    }

    #[cfg(test)]
    fn set_grid(&mut self, grid: Grid) {
        self.grid = grid;
    }

    #[cfg(test)]
    fn set_remaining_swaps(&mut self, remaining_swaps: u32) {
        self.remaining_swaps = remaining_swaps;
    }

    #[cfg(test)]
    fn set_objectives(&mut self, objectives: Vec<super::level::Objective>) {
        self.tracker = ObjectiveTracker::new(&objectives);
        self.plan.objectives = objectives;
    }
}
