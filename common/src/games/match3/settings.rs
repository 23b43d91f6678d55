use serde::{Deserialize, Serialize};

use super::cascade::DEFAULT_MAX_CASCADE_ITERATIONS;
use super::level::MAX_OBJECTIVES;
use super::types::{DEFAULT_BOARD_SIZE, MIN_RUN_LENGTH, TOKEN_KINDS};
use crate::config::{Validate, check_range};

pub const MAX_BOARD_SIZE: usize = 16;

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct GameSettings {
    pub board_size: usize,
    pub max_objectives: usize,
    pub max_cascade_iterations: u32,
    /// Fixed seed for reproducible sessions; a random one is drawn when absent.
    pub seed: Option<u64>,
}

impl Validate for GameSettings {
    fn validate(&self) -> Result<(), String> {
        check_range("Board size", self.board_size, MIN_RUN_LENGTH, MAX_BOARD_SIZE)?;
        check_range("Max objectives", self.max_objectives, 1, TOKEN_KINDS)?;
        if self.max_cascade_iterations == 0 {
            return Err("Max cascade iterations must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            max_objectives: MAX_OBJECTIVES,
            max_cascade_iterations: DEFAULT_MAX_CASCADE_ITERATIONS,
            seed: None,
        }
    }
}
