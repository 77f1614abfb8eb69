use std::path::Path;

use anyhow::Context;
use listsync_diff::DiffOptions;
use serde::Deserialize;

/// File-level CLI settings; command-line flags take precedence.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Object field identifying items, used when `--key` is not given.
    pub key: Option<String>,
    pub diff: DiffOptions,
}

impl CliConfig {
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Diff options with the `--detect-moves` flag applied on top.
    pub fn diff_options(&self, detect_moves: bool) -> DiffOptions {
        let mut options = self.diff.clone();
        options.detect_moves |= detect_moves;
        options
    }

    pub fn key<'a>(&'a self, flag: Option<&'a str>) -> Option<&'a str> {
        flag.or(self.key.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_path_gives_defaults() {
        let config = CliConfig::load(None).unwrap();
        assert_eq!(config, CliConfig::default());
        assert!(!config.diff_options(false).detect_moves);
    }

    #[test]
    fn file_values_are_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "key = \"id\"\n\n[diff]\ndetect_moves = true\nmax_len = 500").unwrap();

        let config = CliConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.key(None), Some("id"));
        assert_eq!(config.key(Some("name")), Some("name"));
        assert!(config.diff.detect_moves);
        assert_eq!(config.diff.max_len, Some(500));
    }

    #[test]
    fn flag_enables_moves_over_file() {
        let config: CliConfig = toml::from_str("[diff]\ndetect_moves = false").unwrap();
        assert!(config.diff_options(true).detect_moves);
    }

    #[test]
    fn partial_diff_table_keeps_other_defaults() {
        let config: CliConfig = toml::from_str("[diff]\nmax_len = 10").unwrap();
        assert_eq!(config.key(None), None);
        assert_eq!(config.diff, DiffOptions::new().max_len(10));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[diff\ndetect_moves = 1").unwrap();
        assert!(CliConfig::load(Some(file.path())).is_err());
    }
}
