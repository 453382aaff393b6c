// Settings loading for the slat binary.
// Uses the platform config dir: e.g. ~/Library/Application Support/slat/settings.json
// on macOS, ~/.config/slat/settings.json on Linux.

use std::path::{Path, PathBuf};

use slat_input::ReorderSettings;

fn settings_path() -> Option<PathBuf> {
    let config_dir = dirs::config_dir()?;
    Some(config_dir.join("slat").join("settings.json"))
}

/// Load settings from `explicit` if given, else from the config dir.
/// Anything missing or unreadable falls back to defaults.
pub fn load_settings(explicit: Option<&Path>) -> ReorderSettings {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => match settings_path() {
            Some(p) => p,
            None => return ReorderSettings::default(),
        },
    };
    load_from(&path)
}

fn load_from(path: &Path) -> ReorderSettings {
    match std::fs::read_to_string(path) {
        Ok(data) => match serde_json::from_str::<ReorderSettings>(&data) {
            Ok(settings) => settings.sanitized(),
            Err(e) => {
                log::warn!("Failed to parse {}: {}", path.display(), e);
                ReorderSettings::default()
            }
        },
        Err(e) => {
            log::debug!("No settings at {}: {}", path.display(), e);
            ReorderSettings::default()
        }
    }
}
