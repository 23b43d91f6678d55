use fruit_match_common::config::{
    ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer, check_range,
};
use fruit_match_common::match3::GameSettings;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "fruit_match.yaml";

pub fn get_config_manager(
    path: &str,
) -> ConfigManager<FileContentConfigProvider, CliConfig, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(path)
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy, Default)]
#[serde(default)]
pub struct CliConfig {
    pub game: GameSettings,
    pub autoplay: AutoplayConfig,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<(), String> {
        self.game.validate()?;
        self.autoplay.validate()?;
        Ok(())
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct AutoplayConfig {
    /// Stop once this many levels have been cleared.
    pub max_levels: u32,
    /// Hard stop on the number of swap intents sent.
    pub max_turns: u32,
    /// Pause between intents so a human can follow the log.
    pub turn_delay_ms: u64,
}

impl Validate for AutoplayConfig {
    fn validate(&self) -> Result<(), String> {
        check_range("Max levels", self.max_levels, 1, 1000)?;
        check_range("Max turns", self.max_turns, 1, 1_000_000)?;
        check_range("Turn delay", self.turn_delay_ms, 0, 5000)?;
        Ok(())
    }
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            max_levels: 3,
            max_turns: 500,
            turn_delay_ms: 0,
        }
    }
}
