//! Tile-matching puzzle engine: level generation, board model, swap turns,
//! match detection and cascade resolution. Rendering and input gestures live
//! in whatever view layer drives [`games::match3::GameSession`].

pub mod config;
pub mod games;
pub mod logger;

pub use games::match3;
