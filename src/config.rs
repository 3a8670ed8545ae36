use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::types::CellMetrics;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub navbar: NavbarConfig,
    #[serde(default)]
    pub follower: FollowerConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level (overridden by RUST_LOG)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Log file path. The terminal belongs to the renderer, so logs never go to stdout.
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
    /// Palette preset (`portfolio`, `light`)
    #[serde(default = "default_theme")]
    pub theme: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_file: default_log_file(),
            theme: default_theme(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewportConfig {
    /// Virtual pixels per terminal column
    #[serde(default = "default_cell_width")]
    pub cell_width_px: f64,
    /// Virtual pixels per terminal row
    #[serde(default = "default_cell_height")]
    pub cell_height_px: f64,
    /// Viewports this wide (in px) or narrower count as mobile
    #[serde(default = "default_narrow_breakpoint")]
    pub narrow_breakpoint_px: f64,
    /// Pixels scrolled per mouse wheel notch
    #[serde(default = "default_wheel_step")]
    pub wheel_step_px: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            cell_width_px: default_cell_width(),
            cell_height_px: default_cell_height(),
            narrow_breakpoint_px: default_narrow_breakpoint(),
            wheel_step_px: default_wheel_step(),
        }
    }
}

impl ViewportConfig {
    pub fn cell_metrics(&self) -> CellMetrics {
        CellMetrics {
            cell_width: self.cell_width_px.max(1.0),
            cell_height: self.cell_height_px.max(1.0),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavbarConfig {
    /// Scroll offset (px) past which the navbar switches to its scrolled style
    #[serde(default = "default_scrolled_threshold")]
    pub scrolled_threshold_px: f64,
    /// Added to the scroll offset before looking up the active section
    #[serde(default)]
    pub active_anchor_offset_px: f64,
}

impl Default for NavbarConfig {
    fn default() -> Self {
        Self {
            scrolled_threshold_px: default_scrolled_threshold(),
            active_anchor_offset_px: 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowerConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Fraction of the remaining distance the halo covers each frame
    #[serde(default = "default_halo_factor")]
    pub halo_factor: f64,
    /// Fraction of the remaining distance the dot covers each frame
    #[serde(default = "default_dot_factor")]
    pub dot_factor: f64,
}

impl Default for FollowerConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            halo_factor: default_halo_factor(),
            dot_factor: default_dot_factor(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// When false every animation jumps straight to its end state
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Multiplier applied to elapsed time (2.0 plays twice as fast)
    #[serde(default = "default_time_scale")]
    pub time_scale: f64,
    /// Target frames per second for the event loop
    #[serde(default = "default_fps")]
    pub fps: u16,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            time_scale: default_time_scale(),
            fps: default_fps(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("spark-folio")
        .join("spark-folio.log")
}

fn default_theme() -> String {
    "portfolio".to_string()
}

fn default_cell_width() -> f64 {
    8.0
}

fn default_cell_height() -> f64 {
    16.0
}

fn default_narrow_breakpoint() -> f64 {
    768.0
}

fn default_wheel_step() -> f64 {
    48.0
}

fn default_scrolled_threshold() -> f64 {
    20.0
}

fn default_true() -> bool {
    true
}

fn default_halo_factor() -> f64 {
    0.1
}

fn default_dot_factor() -> f64 {
    0.2
}

fn default_time_scale() -> f64 {
    1.0
}

fn default_fps() -> u16 {
    60
}

impl AppConfig {
    /// Load configuration from the default path or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path; a missing file yields defaults
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self =
                toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Reject values the runtime cannot work with
    pub fn validate(&self) -> crate::Result<()> {
        for (name, factor) in [
            ("follower.halo_factor", self.follower.halo_factor),
            ("follower.dot_factor", self.follower.dot_factor),
        ] {
            if !(factor > 0.0 && factor <= 1.0) {
                return Err(crate::Error::Config(format!(
                    "{name} must be in (0, 1], got {factor}"
                )));
            }
        }
        if self.animation.time_scale <= 0.0 {
            return Err(crate::Error::Config(format!(
                "animation.time_scale must be positive, got {}",
                self.animation.time_scale
            )));
        }
        if crate::theme::get_preset(&self.general.theme).is_none() {
            return Err(crate::Error::Config(format!(
                "unknown theme '{}' (available: {})",
                self.general.theme,
                crate::theme::PRESET_NAMES.join(", ")
            )));
        }
        if self.animation.fps == 0 {
            return Err(crate::Error::Config("animation.fps must be at least 1".into()));
        }
        Ok(())
    }

    /// The configured palette (default palette for unknown names)
    pub fn theme(&self) -> crate::theme::Theme {
        crate::theme::get_preset(&self.general.theme).unwrap_or_default()
    }

    /// Get the configuration file path
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("spark-folio")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.navbar.scrolled_threshold_px, 20.0);
        assert_eq!(config.follower.halo_factor, 0.1);
        assert_eq!(config.follower.dot_factor, 0.2);
        assert_eq!(config.viewport.narrow_breakpoint_px, 768.0);
        assert_eq!(config.general.theme, "portfolio");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("nope.toml")).unwrap();
        assert!(config.animation.enabled);
    }

    #[test]
    fn test_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[animation]\nenabled = false\n\n[navbar]\nactive_anchor_offset_px = 100.0").unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert!(!config.animation.enabled);
        assert_eq!(config.animation.fps, 60);
        assert_eq!(config.navbar.active_anchor_offset_px, 100.0);
        assert_eq!(config.navbar.scrolled_threshold_px, 20.0);
    }

    #[test]
    fn test_invalid_factor_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[follower]\nhalo_factor = 1.5").unwrap();

        let err = AppConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_unknown_theme_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[general]\ntheme = \"dracula\"").unwrap();

        assert!(matches!(
            AppConfig::load_from(file.path()),
            Err(crate::Error::Config(_))
        ));
    }

    #[test]
    fn test_malformed_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[general\nlog_level = ").unwrap();

        assert!(matches!(
            AppConfig::load_from(file.path()),
            Err(crate::Error::Config(_))
        ));
    }
}
