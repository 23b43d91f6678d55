mod autoplay;
mod broadcaster;
mod config;

use clap::Parser;
use fruit_match_common::config::Validate;
use fruit_match_common::match3::{Match3Session, Match3SessionState};
use fruit_match_common::{log, logger};
use tokio::sync::mpsc;

use autoplay::autoplay_task;
use broadcaster::LogBroadcaster;
use config::{CliConfig, DEFAULT_CONFIG_FILE, get_config_manager};

#[derive(Parser)]
#[command(name = "fruit_match", about = "Headless fruit matching session driven by an autoplay bot")]
struct Args {
    /// YAML config file; defaults are used when it does not exist.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: String,

    /// Overrides the configured seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Overrides how many levels the bot plays.
    #[arg(long)]
    levels: Option<u32>,

    /// Also log every notification as YAML.
    #[arg(long)]
    dump_events: bool,

    /// Write the default config to `--config` and exit.
    #[arg(long)]
    write_default_config: bool,

    #[arg(long)]
    use_log_prefix: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = args.use_log_prefix.then(|| "FruitMatch".to_string());
    logger::init_logger(prefix);

    let config_manager = get_config_manager(&args.config);
    if args.write_default_config {
        config_manager.set_config(&CliConfig::default())?;
        log!("Default config written to {}", args.config);
        return Ok(());
    }

    let mut config = config_manager.get_config()?;
    if let Some(seed) = args.seed {
        config.game.seed = Some(seed);
    }
    if let Some(levels) = args.levels {
        config.autoplay.max_levels = levels;
    }
    config.validate()?;

    let state = Match3SessionState::create("cli".to_string(), config.game);
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let broadcaster = LogBroadcaster::new(args.dump_events);

    let session_state = state.clone();
    let session_handle = tokio::spawn(async move {
        Match3Session::run(&session_state, command_rx, &broadcaster).await
    });
    let bot_handle = tokio::spawn(autoplay_task(
        state.clone(),
        command_tx,
        config.autoplay,
        state.seed.wrapping_add(1),
    ));

    let summary = session_handle.await?;
    bot_handle.await?;

    log!(
        "Finished on level {} after {} swaps ({} levels cleared{})",
        summary.final_level_index + 1,
        summary.swaps_used,
        summary.levels_completed,
        if summary.game_over { ", out of swaps" } else { "" }
    );

    Ok(())
}
