use std::path::PathBuf;

use anyhow::{Context, Result};

const APP_DIR: &str = "ghsearch";

pub fn config_dir() -> Result<PathBuf> {
    let dir = dirs::config_dir()
        .context("cannot locate config directory")?
        .join(APP_DIR);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

pub fn cache_dir() -> Result<PathBuf> {
    let dir = dirs::cache_dir()
        .context("cannot locate cache directory")?
        .join(APP_DIR);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

pub fn config_file() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

pub fn log_file() -> Result<PathBuf> {
    Ok(cache_dir()?.join("ghsearch.log"))
}
