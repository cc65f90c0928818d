use luck_core::GameConfig;
use std::path::PathBuf;

/// Settings taken from the global command-line flags.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub config_path: Option<PathBuf>,
    pub seed: Option<u64>,
    pub verbose: bool,
}

impl CliConfig {
    /// Built-in defaults unless a config file was given.
    pub fn game_config(&self) -> luck_core::Result<GameConfig> {
        match &self.config_path {
            Some(path) => GameConfig::from_file(path),
            None => Ok(GameConfig::default()),
        }
    }

    pub fn log_filter(&self) -> String {
        let level = if self.verbose { "debug" } else { "warn" };
        format!(
            "luck_sim={},luck_scratch={},luck_core={}",
            level, level, level
        )
    }
}
