pub mod board_init;
pub mod cascade;
mod events;
mod game_session;
pub mod grid;
pub mod hint;
pub mod level;
pub mod match_detector;
mod objectives;
mod session;
mod settings;
mod turn_controller;
mod types;

pub use cascade::{CascadeReport, CascadeStep};
pub use events::GameEvent;
pub use game_session::GameSession;
pub use grid::Grid;
pub use level::{LevelPlan, Objective};
pub use match_detector::MatchResult;
pub use objectives::ObjectiveTracker;
pub use session::{Match3Session, Match3SessionState, SessionCommand, SessionSummary};
pub use settings::{GameSettings, MAX_BOARD_SIZE};
pub use turn_controller::{
    SwapIgnored, TurnContext, TurnController, TurnOutcome, TurnResult, TurnState,
};
pub use types::{ClearedCell, DEFAULT_BOARD_SIZE, MIN_RUN_LENGTH, Position, TOKEN_KINDS, Token};
