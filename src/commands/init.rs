//! Init command implementation

use crate::config::Config;
use crate::error::Result;
use crate::store::Store;
use std::path::PathBuf;
use tracing::info;

/// Initialize configuration and database in the given base directory
pub async fn cmd_init(base_dir: Option<PathBuf>, force: bool) -> Result<()> {
    let mut config = Config::load_from(base_dir)?;

    if !config.paths.config_file.exists() || force {
        // reset to defaults when overwriting
        if force {
            let paths = config.paths.clone();
            config = Config::default();
            config.paths = paths;
        }
        config.save()?;
    }

    // creating the store also creates the schema
    let store = Store::connect(&config).await?;
    store.init_schema().await?;

    info!("Initialized at {:?}", config.paths.base_dir);
    Ok(())
}
