// Grid settings persistence
// Loaded from ~/.config/moneygrid/settings.json by default

use moneygrid_core::{build_settings, Settings};

use crate::error::ConfigError;
use crate::store::SettingsStore;

/// Strict load: `Ok(None)` when nothing is stored, an error for anything
/// unreadable, unparsable or invalid.
pub fn read_settings(store: &dyn SettingsStore) -> Result<Option<Settings>, ConfigError> {
    let Some(contents) = store.load()? else {
        return Ok(None);
    };
    let value: serde_json::Value = serde_json::from_str(&contents).map_err(ConfigError::Parse)?;
    Ok(Some(build_settings(&value)?))
}

/// Load settings, falling back to defaults.
///
/// Failures are logged, never returned: a broken settings file must not keep
/// the grid from showing.
pub fn load_settings(store: &dyn SettingsStore) -> Settings {
    match read_settings(store) {
        Ok(Some(settings)) => settings,
        Ok(None) => {
            log::debug!("No stored settings, using defaults");
            Settings::default()
        }
        Err(e) => {
            log::warn!("Error loading settings: {}", e);
            log::warn!("Using default settings");
            Settings::default()
        }
    }
}

/// Save settings as pretty-printed JSON.
pub fn save_settings(store: &mut dyn SettingsStore, settings: &Settings) -> Result<(), ConfigError> {
    let json = serde_json::to_string_pretty(settings).map_err(ConfigError::Serialize)?;
    store.save(&json)?;
    log::info!(
        "Saved settings: cellWeight={} grid={}x{} has={} toSpend={}",
        settings.cell_weight(),
        settings.rows_count(),
        settings.columns_count(),
        settings.has(),
        settings.to_spend()
    );
    Ok(())
}
