use anyhow::{bail, Context};
use rulotto_core::GameConfig;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

const GAME_CONFIG_FILE: &str = "game.json";

/// Loads the game settings from `<dir>/game.json`.
pub fn load_game_config(dir: &Path) -> anyhow::Result<GameConfig> {
    let config: GameConfig = load_json(dir.join(GAME_CONFIG_FILE))?;
    validate_game_config(&config)?;
    Ok(config)
}

/// Same as [`load_game_config`], but a missing file falls back to the
/// built-in defaults. Frontends use this so they run without an assets
/// directory next to them.
pub fn load_game_config_or_default(dir: &Path) -> anyhow::Result<GameConfig> {
    let path = dir.join(GAME_CONFIG_FILE);
    if !path.exists() {
        return Ok(GameConfig::default());
    }
    let config: GameConfig = load_json(path)?;
    validate_game_config(&config)?;
    Ok(config)
}

fn validate_game_config(config: &GameConfig) -> anyhow::Result<()> {
    for (label, rule) in [("numbers", config.numbers), ("stars", config.stars)] {
        if rule.min > rule.max {
            bail!("{label} grid has min {} above max {}", rule.min, rule.max);
        }
        if rule.cap == 0 || rule.cap as u64 > rule.span() {
            bail!(
                "{label} grid cap {} does not fit the {}..={} range",
                rule.cap,
                rule.min,
                rule.max
            );
        }
    }
    if config.payout_percentages.is_empty() {
        bail!("payout table cannot be empty");
    }
    if config.payout_percentages.iter().any(|&share| share < 0.0) {
        bail!("payout table cannot hold negative shares");
    }
    Ok(())
}

fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}
