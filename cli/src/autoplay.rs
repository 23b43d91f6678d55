use std::time::Duration;

use fruit_match_common::games::SessionRng;
use fruit_match_common::log;
use fruit_match_common::match3::{Match3SessionState, SessionCommand, hint};
use tokio::sync::mpsc;

use crate::config::AutoplayConfig;

/// Plays the session like a player would: pick a swap, send it, wait until
/// the session has broadcast the result, repeat. Sends `Quit` when done.
pub async fn autoplay_task(
    state: Match3SessionState,
    command_tx: mpsc::UnboundedSender<SessionCommand>,
    config: AutoplayConfig,
    bot_seed: u64,
) {
    let mut rng = SessionRng::new(bot_seed);
    let start_level = state.game.lock().await.level_index();

    for turn in 0..config.max_turns {
        let next_swap = {
            let game = state.game.lock().await;
            let levels_cleared = game.level_index().saturating_sub(start_level);
            if game.is_game_over() {
                log!("Autoplay stopping after {} turns: game over", turn);
                None
            } else if levels_cleared >= config.max_levels {
                log!("Autoplay stopping after {} turns: {} levels cleared", turn, levels_cleared);
                None
            } else {
                hint::choose_swap(game.grid(), &mut rng)
            }
        };

        let Some((from, to)) = next_swap else {
            break;
        };

        if command_tx
            .send(SessionCommand::RequestSwap { from, to })
            .is_err()
        {
            return;
        }
        state.command_processed.notified().await;

        if config.turn_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(config.turn_delay_ms)).await;
        }
    }

    let _ = command_tx.send(SessionCommand::Quit);
}
