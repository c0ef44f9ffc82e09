/// Waveform settings shared with the haptics frontend.
///
/// The frontend owns `~/.config/haptics/settings.json`:
///   { "notifications": { ... }, "cursor": { "link_wave": "DAMP COLLISION" } }
/// This daemon only reads `cursor.link_wave`. Missing file, unreadable file
/// or missing field fall back to the default waveform; malformed JSON is
/// logged and falls back too. Settings errors never propagate.

use crate::watcher::{self, FileWatcher};
use std::path::{Path, PathBuf};
use tokio::sync::watch;

pub const DEFAULT_WAVEFORM: &str = "DAMP COLLISION";

/// Default settings file location: $XDG_CONFIG_HOME/haptics/settings.json,
/// falling back to ~/.config/haptics/settings.json.
pub fn default_settings_path() -> String {
    if let Ok(config_home) = std::env::var("XDG_CONFIG_HOME") {
        format!("{config_home}/haptics/settings.json")
    } else if let Ok(home) = std::env::var("HOME") {
        format!("{home}/.config/haptics/settings.json")
    } else {
        "settings.json".into()
    }
}

/// Read the current cursor waveform from the settings file.
pub fn load_waveform(path: &Path) -> String {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => {
            log::info!(
                "Settings file not found at {}, using default waveform",
                path.display()
            );
            return DEFAULT_WAVEFORM.into();
        }
    };

    let value: serde_json::Value = match serde_json::from_str(&contents) {
        Ok(v) => v,
        Err(e) => {
            log::warn!(
                "Failed to parse settings file {}: {e}. Using default waveform.",
                path.display()
            );
            return DEFAULT_WAVEFORM.into();
        }
    };

    match value
        .get("cursor")
        .and_then(|c| c.get("link_wave"))
        .and_then(|w| w.as_str())
    {
        Some(waveform) => {
            log::info!("Loaded cursor waveform from settings: {waveform}");
            waveform.to_string()
        }
        None => {
            log::info!("No cursor.link_wave found in settings, using default waveform");
            DEFAULT_WAVEFORM.into()
        }
    }
}

/// Live-reload loop: republish the waveform on every settings-file change.
///
/// Watches the parent directory so a settings file created after startup is
/// picked up. If the directory itself does not exist, monitoring is skipped
/// and the value seeded at enable time stays in effect.
pub async fn run_settings_watcher(path: PathBuf, tx: watch::Sender<String>) {
    let Some(dir) = path.parent() else {
        log::warn!("Settings path {} has no parent directory", path.display());
        return;
    };
    if !dir.exists() {
        log::info!("Settings directory does not exist, skipping file monitoring");
        return;
    }

    let mut file_watcher = match FileWatcher::new(dir) {
        Ok(w) => w,
        Err(e) => {
            log::warn!("Failed to monitor settings file: {e}");
            return;
        }
    };
    log::info!("Monitoring settings file: {}", path.display());

    while let Some(result) = file_watcher.next_event().await {
        match result {
            Ok(event) if watcher::touches(&event, &path) => {
                log::info!("Settings file changed, reloading...");
                let _ = tx.send(load_waveform(&path));
            }
            Ok(_) => {}
            Err(e) => log::warn!("Settings watch error: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_settings(name: &str, contents: Option<&str>) -> PathBuf {
        let dir = std::env::temp_dir().join("haptic_cursor_test_settings");
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join(name);
        match contents {
            Some(c) => std::fs::write(&path, c).unwrap(),
            None => {
                let _ = std::fs::remove_file(&path);
            }
        }
        path
    }

    #[test]
    fn missing_file_falls_back() {
        let path = temp_settings("absent.json", None);
        assert_eq!(load_waveform(&path), DEFAULT_WAVEFORM);
    }

    #[test]
    fn valid_settings_yield_waveform() {
        let path = temp_settings(
            "valid.json",
            Some(r#"{"notifications": {"enabled": true}, "cursor": {"link_wave": "SHARP TICK"}}"#),
        );
        assert_eq!(load_waveform(&path), "SHARP TICK");
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn malformed_json_falls_back() {
        let path = temp_settings("broken.json", Some(r#"{"cursor": {"link_wave": "#));
        assert_eq!(load_waveform(&path), DEFAULT_WAVEFORM);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_field_falls_back() {
        let path = temp_settings("nofield.json", Some(r#"{"cursor": {}}"#));
        assert_eq!(load_waveform(&path), DEFAULT_WAVEFORM);
        let _ = std::fs::remove_file(&path);

        let path = temp_settings("nocursor.json", Some(r#"{"notifications": {}}"#));
        assert_eq!(load_waveform(&path), DEFAULT_WAVEFORM);
        let _ = std::fs::remove_file(&path);

        // link_wave present but not a string
        let path = temp_settings("notstring.json", Some(r#"{"cursor": {"link_wave": 3}}"#));
        assert_eq!(load_waveform(&path), DEFAULT_WAVEFORM);
        let _ = std::fs::remove_file(&path);
    }
}
