use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::error::Error;
use crate::ui::widgets::is_hex_color;

const DEFAULT_CONFIG: &str = include_str!("../config.toml");

#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    ui: UiConfig,
    #[serde(default)]
    color: ColorConfig,
    #[serde(default)]
    logging: LoggingConfig,
}

#[derive(Deserialize, Default)]
struct UiConfig {
    title: Option<String>,
    color_label: Option<String>,
    result_title: Option<String>,
}

#[derive(Deserialize, Default)]
struct ColorConfig {
    palette: Option<Vec<String>>,
}

#[derive(Deserialize, Default)]
struct LoggingConfig {
    filter: Option<String>,
    file: Option<PathBuf>,
}

pub struct Config {
    file: ConfigFile,
}

impl Config {
    /// Embedded defaults merged with the user's config file, if any.
    /// A broken user file is skipped.
    pub fn load() -> Self {
        let mut base = embedded();

        if let Some(path) = user_config_path() {
            if path.exists() {
                match read_config(&path) {
                    Ok(user) => merge(&mut base, user),
                    Err(e) => warn!("ignoring user config: {}", e),
                }
            }
        }

        Config { file: base }
    }

    /// Embedded defaults merged with an explicitly requested file, which must load
    pub fn load_from(path: &Path) -> Result<Self, Error> {
        let mut base = embedded();
        merge(&mut base, read_config(path)?);
        Ok(Config { file: base })
    }

    pub fn title(&self) -> &str {
        self.file.ui.title.as_deref().unwrap_or("")
    }

    pub fn color_label(&self) -> &str {
        self.file.ui.color_label.as_deref().unwrap_or("")
    }

    pub fn result_title(&self) -> &str {
        self.file.ui.result_title.as_deref().unwrap_or("")
    }

    /// Preset colors, with malformed entries dropped
    pub fn palette(&self) -> Vec<String> {
        let palette = self.file.color.palette.as_deref().unwrap_or_default();
        palette
            .iter()
            .filter(|c| {
                let ok = is_hex_color(c);
                if !ok {
                    warn!(color = c.as_str(), "dropping palette entry");
                }
                ok
            })
            .map(|c| c.to_lowercase())
            .collect()
    }

    pub fn log_filter(&self) -> &str {
        self.file.logging.filter.as_deref().unwrap_or("info")
    }

    pub fn log_file(&self) -> Option<&Path> {
        self.file.logging.file.as_deref()
    }
}

fn embedded() -> ConfigFile {
    toml::from_str(DEFAULT_CONFIG).expect("Failed to parse embedded config.toml")
}

fn read_config(path: &Path) -> Result<ConfigFile, Error> {
    let contents = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&contents).map_err(|source| Error::Config {
        path: path.to_path_buf(),
        source,
    })
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("paramedit").join("config.toml"))
}

fn merge(base: &mut ConfigFile, user: ConfigFile) {
    if user.ui.title.is_some() {
        base.ui.title = user.ui.title;
    }
    if user.ui.color_label.is_some() {
        base.ui.color_label = user.ui.color_label;
    }
    if user.ui.result_title.is_some() {
        base.ui.result_title = user.ui.result_title;
    }
    if user.color.palette.is_some() {
        base.color.palette = user.color.palette;
    }
    if user.logging.filter.is_some() {
        base.logging.filter = user.logging.filter;
    }
    if user.logging.file.is_some() {
        base.logging.file = user.logging.file;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_defaults() {
        let config = Config { file: embedded() };
        assert_eq!(config.title(), "Редактор параметров модели");
        assert_eq!(config.color_label(), "Цвет");
        assert_eq!(config.result_title(), "Результат модели:");
        assert_eq!(config.palette().first().map(String::as_str), Some("#000000"));
        assert_eq!(config.log_filter(), "info");
        assert!(config.log_file().is_none());
    }

    #[test]
    fn test_user_file_overrides_only_given_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[ui]\ntitle = \"Dress editor\"\n\n[logging]\nfilter = \"debug\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.title(), "Dress editor");
        assert_eq!(config.color_label(), "Цвет");
        assert_eq!(config.log_filter(), "debug");
    }

    #[test]
    fn test_palette_drops_malformed_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[color]\npalette = [\"#FF0000\", \"red\", \"#00ff00\"]\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.palette(), vec!["#ff0000".to_string(), "#00ff00".to_string()]);
    }

    #[test]
    fn test_explicit_file_errors_surface() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(Config::load_from(&missing), Err(Error::Read { .. })));

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "[ui\ntitle = ").unwrap();
        assert!(matches!(Config::load_from(&broken), Err(Error::Config { .. })));
    }
}
