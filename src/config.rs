use crate::error::{Result, TocError};
use crate::toc::HeadingKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub toc: TocConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TocConfig {
    /// Heading kinds that become tree entries, e.g. `["h1", "h2"]`
    #[serde(default = "default_headings")]
    pub headings: Vec<String>,

    /// Id of the content region the tree is built for
    #[serde(default = "default_region_id")]
    pub region_id: String,

    /// Id of an existing element to hold the tree instead of a generated one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_id: Option<String>,
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            headings: default_headings(),
            region_id: default_region_id(),
            container_id: None,
        }
    }
}

fn default_headings() -> Vec<String> {
    HeadingKind::all().iter().map(|k| k.to_string()).collect()
}

fn default_region_id() -> String {
    "content".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    /// Output format: "html" (default), "json" or "tree"
    #[serde(default = "default_format")]
    pub format: String,

    /// Stylesheet href linked from the generated page's head
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stylesheet: Option<String>,

    /// Title of the generated page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            stylesheet: None,
            title: None,
        }
    }
}

fn default_format() -> String {
    "html".to_string()
}

impl Config {
    /// Get the platform-specific config file path
    /// - Linux: ~/.config/treetoc/config.toml
    /// - macOS: ~/Library/Application Support/treetoc/config.toml
    /// - Windows: %APPDATA%/treetoc/config.toml
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("treetoc").join("config.toml"))
    }

    /// Load config from file, or return default if the file is missing or
    /// malformed
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        Self::load_from(&path).unwrap_or_else(|err| {
            warn!(path = %path.display(), %err, "ignoring unreadable config");
            Self::default()
        })
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| TocError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Save config to the platform config path
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path().ok_or(TocError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Save config to a specific file, creating its parent directory
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;

        Ok(())
    }

    /// Parse the configured heading kind names
    pub fn heading_kinds(&self) -> Result<Vec<HeadingKind>> {
        HeadingKind::parse_list(&self.toc.headings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.toc.region_id, "content");
        assert_eq!(config.output.format, "html");
        assert_eq!(config.heading_kinds().unwrap(), HeadingKind::all());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str("[toc]\nheadings = [\"h2\", \"H3\"]\n").unwrap();
        assert_eq!(
            config.heading_kinds().unwrap(),
            vec![HeadingKind::H2, HeadingKind::H3]
        );
        assert_eq!(config.toc.region_id, "content");
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn test_unknown_heading_kind() {
        let mut config = Config::default();
        config.toc.headings = vec!["h1".into(), "h7".into()];
        let err = config.heading_kinds().unwrap_err();
        assert!(matches!(err, TocError::UnknownHeadingKind(name) if name == "h7"));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.toc.container_id = Some("sidebar".into());
        config.output.format = "json".into();
        config.output.title = Some("Manual".into());
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[toc\nheadings = 3").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(TocError::ConfigParse(_))
        ));
    }
}
