use fruit_match_common::games::GameBroadcaster;
use fruit_match_common::log;
use fruit_match_common::match3::{GameEvent, Objective, Token};

/// Stands in for a view layer: writes every notification to the log.
#[derive(Clone)]
pub struct LogBroadcaster {
    dump_events: bool,
}

impl LogBroadcaster {
    pub fn new(dump_events: bool) -> Self {
        Self { dump_events }
    }
}

impl GameBroadcaster for LogBroadcaster {
    async fn broadcast_events(&self, events: Vec<GameEvent>) {
        for event in &events {
            log!("{}", describe_event(event));
            if self.dump_events {
                match serde_yaml_ng::to_string(event) {
                    Ok(yaml) => log!("{}", yaml.trim_end()),
                    Err(e) => log!("Failed to serialize {} event: {}", event.name(), e),
                }
            }
        }
    }
}

fn describe_objectives(objectives: &[Objective]) -> String {
    objectives
        .iter()
        .map(|o| format!("{} x{}", o.token, o.target))
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe_tokens<'a>(tokens: impl Iterator<Item = (&'a Token, &'a u32)>) -> String {
    tokens
        .map(|(token, count)| format!("{} {}", token, count))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn describe_event(event: &GameEvent) -> String {
    match event {
        GameEvent::LevelStarted {
            level_index,
            plan,
            remaining_swaps,
        } => format!(
            "Level {} started: {} swaps, collect {}",
            level_index + 1,
            remaining_swaps,
            describe_objectives(&plan.objectives)
        ),
        GameEvent::BoardInitialized(grid) => format!("Board ready:\n{}", grid),
        GameEvent::CellsCleared(cells) => {
            let tokens: Vec<String> = cells.iter().map(|c| c.token.to_string()).collect();
            format!("Cleared {} cells: {}", cells.len(), tokens.join(""))
        }
        GameEvent::CellsCollapsedAndRefilled(grid) => format!("Board refilled:\n{}", grid),
        GameEvent::SwapRejected => "Swap rejected: no match".to_string(),
        GameEvent::SwapAccepted { iterations } => {
            format!("Swap accepted after {} cascade iteration(s)", iterations)
        }
        GameEvent::ObjectivesChanged(collected) => {
            format!("Collected: {}", describe_tokens(collected.iter()))
        }
        GameEvent::Continue { remaining_swaps } => format!("{} swaps left", remaining_swaps),
        GameEvent::LevelComplete { new_level_index } => {
            format!("Level {} complete!", new_level_index)
        }
        GameEvent::GameOver => "Game over: no swaps left".to_string(),
    }
}
