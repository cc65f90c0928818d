pub mod odds;
pub mod play;
pub mod show_config;
pub mod simulate;

pub use odds::show_odds;
pub use play::run_game;
pub use show_config::show_config;
pub use simulate::run_simulation;
