//! Persist and restore window size and position across sessions.
//!
//! Saves a small JSON file next to the logs in the platform data directory.

use std::path::{Path, PathBuf};

use animetrends_core::config::AppConfig;
use iced::{Point, Size};
use serde::{Deserialize, Serialize};

const FILE_NAME: &str = "window.json";

/// Persisted window geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowState {
    pub width: f32,
    pub height: f32,
    pub x: f32,
    pub y: f32,
}

impl Default for WindowState {
    fn default() -> Self {
        Self {
            width: 1100.0,
            height: 760.0,
            x: -1.0,
            y: -1.0,
        }
    }
}

impl WindowState {
    /// Convert to an iced `Size`.
    pub fn size(&self) -> Size {
        Size::new(self.width.max(480.0), self.height.max(360.0))
    }

    /// Convert to an iced window `Position`, if we have a valid saved position.
    pub fn position(&self) -> Option<Point> {
        if self.x >= 0.0 && self.y >= 0.0 {
            Some(Point::new(self.x, self.y))
        } else {
            None
        }
    }

    /// Load from the data directory, returning default if missing or invalid.
    pub fn load() -> Self {
        Self::load_from(&state_path())
    }

    pub fn load_from(path: &Path) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default()
    }

    /// Save to the data directory. Errors are logged but not propagated.
    pub fn save(&self) {
        self.save_to(&state_path());
    }

    pub fn save_to(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(path, json) {
                    tracing::warn!("Failed to save window state: {e}");
                }
            }
            Err(e) => tracing::warn!("Failed to serialize window state: {e}"),
        }
    }
}

/// Path to the window state JSON file.
fn state_path() -> PathBuf {
    AppConfig::data_dir().join(FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_position() {
        let ws = WindowState::default();
        assert!(ws.position().is_none());
        assert_eq!(ws.size(), Size::new(1100.0, 760.0));
    }

    #[test]
    fn test_size_is_clamped() {
        let ws = WindowState {
            width: 10.0,
            height: 10.0,
            ..Default::default()
        };
        assert_eq!(ws.size(), Size::new(480.0, 360.0));
    }

    #[test]
    fn test_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join(FILE_NAME);

        let ws = WindowState {
            width: 1280.0,
            height: 800.0,
            x: 40.0,
            y: 30.0,
        };
        ws.save_to(&path);

        let loaded = WindowState::load_from(&path);
        assert_eq!(loaded.position(), Some(Point::new(40.0, 30.0)));
        assert_eq!(loaded.width, 1280.0);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FILE_NAME);
        std::fs::write(&path, "{not json").unwrap();
        assert_eq!(WindowState::load_from(&path).width, 1100.0);
    }
}
