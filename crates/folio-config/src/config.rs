//! The `config.toml` file.

use std::fs;
use std::path::Path;
use std::time::Duration;

use color_eyre::eyre::{Result, WrapErr};
use folio_core::{ColorRole, FieldConfig, Palette, Rgb, Theme};
use serde::Deserialize;

use crate::paths::config_dir;

const CONFIG_FILE: &str = "config.toml";
const MAX_FRAME_RATE: u32 = 240;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Particle field tuning.
    pub field: FieldConfig,
    /// Per-theme color overrides.
    pub palette: PaletteOverrides,
    /// Target frames per second.
    pub frame_rate: u32,
    /// Show the key help line at the bottom of the screen.
    pub show_help: bool,
    /// Optional heading drawn over the backdrop.
    pub title: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            field: FieldConfig::default(),
            palette: PaletteOverrides::default(),
            frame_rate: 60,
            show_help: true,
            title: None,
        }
    }
}

impl Config {
    /// Load the config from the platform config directory.
    pub fn load() -> Self {
        match config_dir() {
            Some(dir) => Self::load_or_default(&dir.join(CONFIG_FILE)),
            None => {
                tracing::debug!("no config directory on this platform, using defaults");
                Self::default()
            }
        }
    }

    /// Load the config from `path`.
    ///
    /// A missing file yields the defaults. A malformed file is reported and
    /// also yields the defaults, so a typo never keeps the app from starting.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Self::default();
        }
        match Self::load_from(path) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded config");
                config
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), "ignoring config file: {err:#}");
                Self::default()
            }
        }
    }

    /// Load the config from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&contents).wrap_err_with(|| format!("failed to parse {}", path.display()))
    }

    /// Palette for a theme with this config's overrides applied.
    pub fn palette_for(&self, theme: Theme) -> Palette {
        let mut palette = theme.palette();
        let overrides = match theme {
            Theme::Light => &self.palette.light,
            Theme::Dark => &self.palette.dark,
        };
        overrides.apply(&mut palette);
        palette
    }

    /// Time budget of a single frame.
    pub fn frame_interval(&self) -> Duration {
        let fps = self.frame_rate.clamp(1, MAX_FRAME_RATE);
        Duration::from_millis(1000 / fps as u64)
    }
}

/// Color overrides for both themes.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PaletteOverrides {
    pub light: RoleOverrides,
    pub dark: RoleOverrides,
}

/// Optional replacement for each palette role, written as `#rrggbb`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RoleOverrides {
    pub background: Option<Rgb>,
    pub accent_primary: Option<Rgb>,
    pub accent_secondary: Option<Rgb>,
    pub text_primary: Option<Rgb>,
    pub text_secondary: Option<Rgb>,
}

impl RoleOverrides {
    /// Write every set override into `palette`.
    pub fn apply(&self, palette: &mut Palette) {
        let slots = [
            (ColorRole::Background, self.background),
            (ColorRole::AccentPrimary, self.accent_primary),
            (ColorRole::AccentSecondary, self.accent_secondary),
            (ColorRole::TextPrimary, self.text_primary),
            (ColorRole::TextSecondary, self.text_secondary),
        ];
        for (role, color) in slots {
            if let Some(color) = color {
                palette.set(role, color);
            }
        }
    }
}
