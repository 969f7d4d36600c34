mod config;
pub mod database;

pub use config::{BadgesConfig, Config, GameConfig};
pub use database::{GuessDb, GuessTotals, SubjectResult};

use std::path::PathBuf;

/// Returns `~/.config/shadowguess[-dev]/` based on SHADOWGUESS_ENV.
///
/// Set SHADOWGUESS_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("SHADOWGUESS_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("shadowguess-dev")
    } else {
        base_dir.join("shadowguess")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
