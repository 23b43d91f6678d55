use std::collections::BTreeMap;

use serde::Serialize;

use super::grid::Grid;
use super::level::LevelPlan;
use super::types::{ClearedCell, Token};

/// Notifications pushed to the view layer, in the order they happened.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub enum GameEvent {
    LevelStarted {
        level_index: u32,
        plan: LevelPlan,
        remaining_swaps: u32,
    },
    BoardInitialized(Grid),
    CellsCleared(Vec<ClearedCell>),
    CellsCollapsedAndRefilled(Grid),
    SwapRejected,
    SwapAccepted { iterations: u32 },
    ObjectivesChanged(BTreeMap<Token, u32>),
    Continue { remaining_swaps: u32 },
    LevelComplete { new_level_index: u32 },
    GameOver,
}

impl GameEvent {
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::LevelStarted { .. } => "level-started",
            GameEvent::BoardInitialized(_) => "board-initialized",
            GameEvent::CellsCleared(_) => "cells-cleared",
            GameEvent::CellsCollapsedAndRefilled(_) => "cells-collapsed-and-refilled",
            GameEvent::SwapRejected => "swap-rejected",
            GameEvent::SwapAccepted { .. } => "swap-accepted",
            GameEvent::ObjectivesChanged(_) => "objectives-changed",
            GameEvent::Continue { .. } => "continue",
            GameEvent::LevelComplete { .. } => "level-complete",
            GameEvent::GameOver => "game-over",
        }
    }
}
