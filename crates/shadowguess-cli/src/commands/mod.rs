pub mod badges;
pub mod config;
pub mod play;
pub mod results;

use shadowguess_core::{Catalog, Config};

/// Catalog named by the config, or the embedded default set.
pub fn load_catalog(config: &Config) -> Result<Catalog, Box<dyn std::error::Error>> {
    match &config.game.subjects_file {
        Some(path) => Ok(Catalog::from_file(path)?),
        None => Ok(Catalog::embedded()),
    }
}
