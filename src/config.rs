//! Runtime options for the editor.
//!
//! The `const` values are the defaults and are usable on their own when no
//! options file exists.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Most control points the editor will hold.
pub const MAX_CONTROL_POINTS: usize = 10;
/// Hit radius in workspace units for picking points and edges.
pub const PICK_RADIUS: f64 = 0.25;
/// Evaluated points per segment, both ends included.
pub const SAMPLES_PER_SEGMENT: usize = 40;

const OPTIONS_FILE: &str = "spline_pad.toml";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EditorOptions {
    pub max_control_points: usize,
    pub pick_radius: f64,
    pub samples_per_segment: usize,

    pub window_width: u32,
    pub window_height: u32,

    /// Curve stroke width in pixels
    pub curve_width: f64,
    /// Control point marker radius in pixels
    pub point_radius: f64,
    pub curve_color: [u8; 3],
    pub point_color: [u8; 3],
    pub background_color: [u8; 3],
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            max_control_points: MAX_CONTROL_POINTS,
            pick_radius: PICK_RADIUS,
            samples_per_segment: SAMPLES_PER_SEGMENT,
            window_width: 1044,
            window_height: 800,
            curve_width: 1.5,
            point_radius: 5.0,
            curve_color: [0, 0, 0],
            point_color: [255, 0, 0],
            background_color: [255, 255, 255],
        }
    }
}

impl EditorOptions {
    /// Reads options from a TOML file, falling back to defaults.
    pub fn load_from_file(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Loaded options from {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Options file is malformed, using defaults: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No options file found, using defaults");
                Self::default()
            }
        }
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Saved options to {}", path.display());
        Ok(())
    }

    /// The options file lives next to the binary.
    pub fn config_path() -> PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| PathBuf::from("spline-pad"))
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(OPTIONS_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let opts: EditorOptions = toml::from_str("max_control_points = 4\n").unwrap();
        assert_eq!(opts.max_control_points, 4);
        assert_eq!(opts.samples_per_segment, SAMPLES_PER_SEGMENT);
        assert_eq!(opts.pick_radius, PICK_RADIUS);
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("spline_pad_{}.toml", std::process::id()));
        let opts = EditorOptions {
            pick_radius: 0.5,
            ..EditorOptions::default()
        };
        opts.save_to_file(&path).unwrap();
        assert_eq!(EditorOptions::load_from_file(&path), opts);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let opts = EditorOptions::load_from_file(Path::new("/nonexistent/spline_pad.toml"));
        assert_eq!(opts, EditorOptions::default());
    }
}
