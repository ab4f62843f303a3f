//! Persisted key-value preferences.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr};
use folio_core::Theme;

use crate::paths::config_dir;

const PREFERENCES_FILE: &str = "preferences.toml";

/// Key under which the theme is stored.
pub const THEME_KEY: &str = "theme";

/// String preferences backed by a TOML file.
///
/// Every `set` writes the whole file back. A store without a path keeps
/// values in memory only.
#[derive(Debug, Default)]
pub struct PreferenceStore {
    path: Option<PathBuf>,
    values: BTreeMap<String, String>,
}

impl PreferenceStore {
    /// Open the store in the platform config directory.
    ///
    /// Falls back to an in-memory store when the directory is unknown.
    pub fn open_default() -> Self {
        match config_dir() {
            Some(dir) => Self::open_or_empty(&dir.join(PREFERENCES_FILE)),
            None => {
                tracing::warn!(
                    "no config directory on this platform, preferences will not persist"
                );
                Self::in_memory()
            }
        }
    }

    /// Open the store at `path`, starting empty when the file cannot be read.
    /// The empty store still saves to `path`, replacing the broken file.
    pub fn open_or_empty(path: &Path) -> Self {
        match Self::open(path) {
            Ok(store) => store,
            Err(err) => {
                tracing::warn!(path = %path.display(), "ignoring preferences file: {err:#}");
                Self {
                    path: Some(path.to_path_buf()),
                    values: BTreeMap::new(),
                }
            }
        }
    }

    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: &Path) -> Result<Self> {
        let values = if path.exists() {
            let contents = fs::read_to_string(path)
                .wrap_err_with(|| format!("failed to read {}", path.display()))?;
            toml::from_str(&contents)
                .wrap_err_with(|| format!("failed to parse {}", path.display()))?
        } else {
            BTreeMap::new()
        };
        Ok(Self {
            path: Some(path.to_path_buf()),
            values,
        })
    }

    /// A store that never touches the filesystem.
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Set a value and persist the store.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.save()
    }

    /// Saved theme, light when nothing usable is stored.
    pub fn theme(&self) -> Theme {
        Theme::from_stored(self.get(THEME_KEY))
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        self.set(THEME_KEY, theme.as_str())
    }

    fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .wrap_err_with(|| format!("failed to create {}", parent.display()))?;
        }
        let contents = toml::to_string(&self.values).wrap_err("failed to encode preferences")?;
        fs::write(path, contents).wrap_err_with(|| format!("failed to write {}", path.display()))
    }
}
