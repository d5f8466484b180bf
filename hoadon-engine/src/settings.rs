//! Settings persistence
//!
//! Settings are a JSON file. A missing file means defaults; a present but
//! malformed file is an error so a typo never silently resets the store
//! details on the receipt.

use std::fs;
use std::path::Path;

use shared::AppSettings;
use tracing::{info, instrument};

use crate::error::ConfigResult;

#[instrument]
pub fn load(path: &Path) -> ConfigResult<AppSettings> {
    if !path.exists() {
        info!("settings file not found, using defaults");
        return Ok(AppSettings::default());
    }
    let raw = fs::read_to_string(path)?;
    let settings = serde_json::from_str(&raw)?;
    info!("settings loaded");
    Ok(settings)
}

#[instrument(skip(settings))]
pub fn save(path: &Path, settings: &AppSettings) -> ConfigResult<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;
    info!("settings saved");
    Ok(())
}
