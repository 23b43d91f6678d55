use std::collections::BTreeMap;

use super::level::Objective;
use super::types::Token;

/// Per-level collection counters, one per objective token.
#[derive(Clone, Debug)]
pub struct ObjectiveTracker {
    objectives: Vec<Objective>,
    collected: BTreeMap<Token, u32>,
}

impl ObjectiveTracker {
    pub fn new(objectives: &[Objective]) -> Self {
        Self {
            objectives: objectives.to_vec(),
            collected: objectives.iter().map(|o| (o.token, 0)).collect(),
        }
    }

    /// Counts one cleared token. Returns whether it belonged to an objective.
    pub fn record(&mut self, token: Token) -> bool {
        match self.collected.get_mut(&token) {
            Some(count) => {
                *count += 1;
                true
            }
            None => false,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.objectives
            .iter()
            .all(|o| self.collected_of(o.token) >= o.target)
    }

    pub fn collected_of(&self, token: Token) -> u32 {
        self.collected.get(&token).copied().unwrap_or(0)
    }

    pub fn remaining(&self, token: Token) -> u32 {
        self.objectives
            .iter()
            .find(|o| o.token == token)
            .map(|o| o.target.saturating_sub(self.collected_of(token)))
            .unwrap_or(0)
    }

    pub fn collected(&self) -> &BTreeMap<Token, u32> {
        &self.collected
    }
}
