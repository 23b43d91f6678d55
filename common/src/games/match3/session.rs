use std::sync::Arc;

use tokio::sync::{Mutex, Notify, mpsc};

use super::events::GameEvent;
use super::game_session::GameSession;
use super::settings::GameSettings;
use super::types::Position;
use crate::games::broadcaster::GameBroadcaster;
use crate::games::session_rng::SessionRng;
use crate::log;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SessionCommand {
    RequestSwap { from: Position, to: Position },
    StartLevel(u32),
    ResetGame,
    Quit,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct SessionSummary {
    pub levels_completed: u32,
    pub final_level_index: u32,
    pub swaps_used: u32,
    pub game_over: bool,
}

#[derive(Clone)]
pub struct Match3SessionState {
    pub session_id: String,
    pub game: Arc<Mutex<GameSession>>,
    pub command_processed: Arc<Notify>,
    pub seed: u64,
}

impl Match3SessionState {
    pub fn create(session_id: String, settings: GameSettings) -> Self {
        let rng = match settings.seed {
            Some(seed) => SessionRng::new(seed),
            None => SessionRng::from_random(),
        };
        let seed = rng.seed();

        Self {
            session_id,
            game: Arc::new(Mutex::new(GameSession::new(settings, rng))),
            command_processed: Arc::new(Notify::new()),
            seed,
        }
    }
}

pub struct Match3Session;

impl Match3Session {
    /// Processes commands one at a time until `Quit` or until every sender is
    /// dropped. The game lock is released before broadcasting, and
    /// `command_processed` fires only after the batch has been delivered.
    pub async fn run<B: GameBroadcaster>(
        state: &Match3SessionState,
        mut command_rx: mpsc::UnboundedReceiver<SessionCommand>,
        broadcaster: &B,
    ) -> SessionSummary {
        log!("Session {} started with seed {}", state.session_id, state.seed);

        let initial = state.game.lock().await.level_events();
        broadcaster.broadcast_events(initial).await;

        let mut summary = SessionSummary::default();

        while let Some(command) = command_rx.recv().await {
            if command == SessionCommand::Quit {
                state.command_processed.notify_one();
                break;
            }

            let events = {
                let mut game = state.game.lock().await;
                Self::apply_command(&mut game, command)
            };

            for event in &events {
                match event {
                    GameEvent::LevelComplete { .. } => summary.levels_completed += 1,
                    GameEvent::LevelStarted { .. } => summary.game_over = false,
                    GameEvent::GameOver => summary.game_over = true,
                    GameEvent::SwapAccepted { .. } | GameEvent::SwapRejected => {
                        summary.swaps_used += 1
                    }
                    _ => {}
                }
            }

            if !events.is_empty() {
                broadcaster.broadcast_events(events).await;
            }
            state.command_processed.notify_one();
        }

        let game = state.game.lock().await;
        summary.final_level_index = game.level_index();
        log!(
            "Session {} finished: {} levels completed, {} swaps used",
            state.session_id,
            summary.levels_completed,
            summary.swaps_used
        );
        summary
    }

    fn apply_command(game: &mut GameSession, command: SessionCommand) -> Vec<GameEvent> {
        match command {
            SessionCommand::RequestSwap { from, to } => match game.request_swap(from, to) {
                Ok(events) => events,
                Err(reason) => {
                    log!("Swap {} -> {} ignored: {}", from, to, reason);
                    Vec::new()
                }
            },
            SessionCommand::StartLevel(level_index) => game.start_level(level_index),
            SessionCommand::ResetGame => game.reset_game(),
            SessionCommand::Quit => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::match3::hint::choose_swap;

    #[derive(Clone, Default)]
    struct RecordingBroadcaster {
        batches: Arc<Mutex<Vec<Vec<GameEvent>>>>,
    }

    impl GameBroadcaster for RecordingBroadcaster {
        async fn broadcast_events(&self, events: Vec<GameEvent>) {
            self.batches.lock().await.push(events);
        }
    }

    fn seeded_state(seed: u64) -> Match3SessionState {
        let settings = GameSettings {
            seed: Some(seed),
            ..GameSettings::default()
        };
        Match3SessionState::create("test".to_string(), settings)
    }

    #[tokio::test]
    async fn test_initial_batch_describes_level() {
        let state = seeded_state(42);
        let broadcaster = RecordingBroadcaster::default();
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(SessionCommand::Quit).unwrap();

        let summary = Match3Session::run(&state, rx, &broadcaster).await;

        let batches = broadcaster.batches.lock().await;
        assert_eq!(batches.len(), 1);
        assert!(matches!(batches[0][0], GameEvent::LevelStarted { level_index: 0, .. }));
        assert!(matches!(batches[0][1], GameEvent::BoardInitialized(_)));
        assert_eq!(summary.levels_completed, 0);
        assert_eq!(summary.swaps_used, 0);
        assert_eq!(state.seed, 42);
    }

    #[tokio::test]
    async fn test_ignored_swap_broadcasts_nothing() {
        let state = seeded_state(42);
        let broadcaster = RecordingBroadcaster::default();
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(SessionCommand::RequestSwap {
            from: Position::new(3, 3),
            to: Position::new(3, 5),
        })
        .unwrap();
        drop(tx);

        let summary = Match3Session::run(&state, rx, &broadcaster).await;

        assert_eq!(broadcaster.batches.lock().await.len(), 1);
        assert_eq!(summary.swaps_used, 0);
    }

    #[tokio::test]
    async fn test_swaps_are_processed_in_order() {
        let state = seeded_state(7);
        let broadcaster = RecordingBroadcaster::default();
        let (tx, rx) = mpsc::unbounded_channel();

        let budget = state.game.lock().await.remaining_swaps();
        let mut rng = SessionRng::new(1);
        let (from, to) = choose_swap(state.game.lock().await.grid(), &mut rng).unwrap();
        tx.send(SessionCommand::RequestSwap { from, to }).unwrap();
        tx.send(SessionCommand::Quit).unwrap();

        let summary = Match3Session::run(&state, rx, &broadcaster).await;

        let batches = broadcaster.batches.lock().await;
        assert_eq!(batches.len(), 2);
        assert_eq!(summary.swaps_used, 1);
        let game = state.game.lock().await;
        assert!(game.remaining_swaps() == budget - 1 || summary.levels_completed == 1);
    }

    #[tokio::test]
    async fn test_reset_and_start_level_commands() {
        let state = seeded_state(9);
        let broadcaster = RecordingBroadcaster::default();
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(SessionCommand::StartLevel(3)).unwrap();
        tx.send(SessionCommand::ResetGame).unwrap();
        drop(tx);

        let summary = Match3Session::run(&state, rx, &broadcaster).await;

        let batches = broadcaster.batches.lock().await;
        assert_eq!(batches.len(), 3);
        assert!(matches!(batches[1][0], GameEvent::LevelStarted { level_index: 3, .. }));
        assert!(matches!(batches[2][0], GameEvent::LevelStarted { level_index: 0, .. }));
        assert_eq!(summary.final_level_index, 0);
    }

    #[tokio::test]
    async fn test_swaps_used_survives_reset() {
        let state = seeded_state(13);
        let broadcaster = RecordingBroadcaster::default();
        let (tx, rx) = mpsc::unbounded_channel();
        let mut rng = SessionRng::new(2);

        let (from, to) = choose_swap(state.game.lock().await.grid(), &mut rng).unwrap();
        tx.send(SessionCommand::RequestSwap { from, to }).unwrap();
        tx.send(SessionCommand::ResetGame).unwrap();
        drop(tx);

        let summary = Match3Session::run(&state, rx, &broadcaster).await;

        assert_eq!(summary.swaps_used, 1);
        assert_eq!(state.game.lock().await.swaps_used(), 0);
    }
}
