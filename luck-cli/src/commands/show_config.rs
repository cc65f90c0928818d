use anyhow::Result;
use luck_core::GameConfig;

pub fn show_config(config: &GameConfig) -> Result<()> {
    println!("{}", config.to_json()?);
    Ok(())
}
