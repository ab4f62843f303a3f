//! Configuration and persisted preferences for folio.
//!
//! Two files live in the platform config directory:
//!
//! - `config.toml`: read-only tuning of the backdrop (particle counts,
//!   distances, palette overrides, frame rate).
//! - `preferences.toml`: a tiny key-value store written by the app. The only
//!   key in use is `theme`.

mod config;
mod paths;
mod prefs;

pub use config::{Config, PaletteOverrides, RoleOverrides};
pub use paths::{config_dir, data_dir};
pub use prefs::{PreferenceStore, THEME_KEY};
