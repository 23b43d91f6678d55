use serde::{Deserialize, Serialize};

use super::types::{TOKEN_KINDS, Token};
use crate::games::session_rng::SessionRng;

pub const MAX_OBJECTIVES: usize = 5;
pub const BASE_SWAP_MULTIPLIER: f64 = 2.5;
pub const MIN_SWAP_MULTIPLIER: f64 = 1.5;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Objective {
    pub token: Token,
    pub target: u32,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct LevelPlan {
    pub swaps: u32,
    pub objectives: Vec<Objective>,
}

impl LevelPlan {
    pub fn total_target(&self) -> u32 {
        sum_targets(&self.objectives)
    }

    pub fn target_for(&self, token: Token) -> Option<u32> {
        self.objectives
            .iter()
            .find(|o| o.token == token)
            .map(|o| o.target)
    }
}

pub fn objective_count(level_number: u32, max_objectives: usize) -> usize {
    let grown = level_number.div_ceil(3) as usize + 1;
    grown.min(max_objectives).min(TOKEN_KINDS)
}

pub fn target_cap(level_number: u32) -> u32 {
    (level_number / 3).saturating_mul(5).saturating_add(25)
}

fn sum_targets(objectives: &[Objective]) -> u32 {
    objectives
        .iter()
        .fold(0u32, |total, o| total.saturating_add(o.target))
}

/// Lower bound on the swap budget for a level with `total_target` tokens to collect.
pub fn min_swaps(total_target: u32) -> u32 {
    (f64::from(total_target) * MIN_SWAP_MULTIPLIER).floor() as u32
}

/// Builds the plan for a 1-based level number. Level 0 is treated as level 1.
pub fn generate(level_number: u32, max_objectives: usize, rng: &mut SessionRng) -> LevelPlan {
    let level_number = level_number.max(1);
    let n = f64::from(level_number);

    let mut available: Vec<Token> = Token::ALL.to_vec();
    let objectives: Vec<Objective> = (0..objective_count(level_number, max_objectives))
        .map(|_| {
            let token = available.remove(rng.random_range(0..available.len()));
            let base_target = (n * 2.0 + rng.random_unit() * n + 3.0).floor() as u32;
            Objective {
                token,
                target: base_target.min(target_cap(level_number)),
            }
        })
        .collect();

    let total_target = sum_targets(&objectives);
    let jitter = 0.9 + rng.random_unit() * 0.2;
    let scaled = (f64::from(total_target) * BASE_SWAP_MULTIPLIER * jitter - n * 0.7).floor();
    let swaps = (scaled.max(0.0) as u32).max(min_swaps(total_target));

    LevelPlan { swaps, objectives }
}
