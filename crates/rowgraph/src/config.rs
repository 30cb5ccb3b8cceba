//! Settings for analysis defaults and type colors.
//!
//! Settings live in an optional YAML file; every field has a default, so an
//! empty file (or no file) is valid. Environment variables override the
//! analysis defaults:
//!
//! - `ROWGRAPH_MAX_PATH_LENGTH`
//! - `ROWGRAPH_MAX_DEPTH`
//! - `ROWGRAPH_MAX_PATH_EXPANSIONS` (`none` or `unlimited` removes the budget)

use crate::analysis::{WorkBudget, DEFAULT_MAX_PATH_EXPANSIONS};
use crate::error::{Error, Result};
use crate::palette::{CyclingPalette, DEFAULT_COLORS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Default maximum path length (in nodes) for path analysis
pub const DEFAULT_MAX_PATH_LENGTH: usize = 10;

/// Default maximum depth (in hops) for impact analysis and filters
pub const DEFAULT_MAX_DEPTH: usize = 3;

/// Name of the settings file looked up in the working directory
pub const SETTINGS_FILE_NAME: &str = "rowgraph.yaml";

const EXPANSIONS: &str = "ROWGRAPH_MAX_PATH_EXPANSIONS";

/// Top-level settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Analysis defaults
    pub analysis: AnalysisSettings,

    /// Colors handed out to classes without an explicit color
    pub palette: Vec<String>,
}

/// Defaults for analysis parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case")]
pub struct AnalysisSettings {
    /// Maximum path length (in nodes)
    pub max_path_length: usize,

    /// Maximum impact/filter depth (in hops)
    pub max_depth: usize,

    /// Work budget for path enumeration; `None` means unlimited
    pub max_path_expansions: Option<usize>,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            max_path_length: DEFAULT_MAX_PATH_LENGTH,
            max_depth: DEFAULT_MAX_DEPTH,
            max_path_expansions: Some(DEFAULT_MAX_PATH_EXPANSIONS),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            analysis: AnalysisSettings::default(),
            palette: DEFAULT_COLORS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl Settings {
    /// Load settings from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid YAML, or
    /// fails [`validate`](Self::validate).
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let settings: Self = if content.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(&content)
                .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Load `path` if given, otherwise `rowgraph.yaml` from `dir` if it
    /// exists, otherwise defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a settings file exists but cannot be loaded.
    pub fn discover(path: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        let candidate = dir.join(SETTINGS_FILE_NAME);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "Using settings file");
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Save settings to a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::Config(format!("YAML error: {e}")))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Check that the analysis bounds are usable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for a zero path length, depth or budget.
    pub fn validate(&self) -> Result<()> {
        if self.analysis.max_path_length == 0 {
            return Err(Error::Config(
                "analysis.max-path-length must be at least 1".to_string(),
            ));
        }
        if self.analysis.max_depth == 0 {
            return Err(Error::Config(
                "analysis.max-depth must be at least 1".to_string(),
            ));
        }
        if self.analysis.max_path_expansions == Some(0) {
            return Err(Error::Config(
                "analysis.max-path-expansions must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Apply `ROWGRAPH_*` environment overrides.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|name| std::env::var(name).ok())
    }

    /// Apply overrides from `lookup`, which maps a variable name to its
    /// value. Invalid values are logged and ignored.
    #[must_use]
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(value) = parse_positive(&lookup, "ROWGRAPH_MAX_PATH_LENGTH") {
            self.analysis.max_path_length = value;
        }
        if let Some(value) = parse_positive(&lookup, "ROWGRAPH_MAX_DEPTH") {
            self.analysis.max_depth = value;
        }

        match lookup(EXPANSIONS) {
            Some(v) if v.eq_ignore_ascii_case("none") || v.eq_ignore_ascii_case("unlimited") => {
                self.analysis.max_path_expansions = None;
            }
            Some(_) => {
                if let Some(value) = parse_positive(&lookup, EXPANSIONS) {
                    self.analysis.max_path_expansions = Some(value);
                }
            }
            None => {}
        }
        self
    }

    /// Work budget for path enumeration.
    #[must_use]
    pub fn work_budget(&self) -> WorkBudget {
        WorkBudget::from(self.analysis.max_path_expansions)
    }

    /// A fresh palette over the configured colors.
    #[must_use]
    pub fn palette(&self) -> CyclingPalette {
        CyclingPalette::new(self.palette.clone())
    }
}

/// Read a positive integer variable, warning about unusable values.
fn parse_positive<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<T>
where
    T: FromStr + PartialEq + Default,
{
    let raw = lookup(name)?;
    match raw.trim().parse::<T>() {
        Ok(value) if value != T::default() => Some(value),
        _ => {
            tracing::warn!(
                env_var = name,
                value = %raw,
                "Invalid value (expected a positive integer), using configured value"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_match_documented_values() {
        let settings = Settings::default();

        assert_eq!(settings.analysis.max_path_length, 10);
        assert_eq!(settings.analysis.max_depth, 3);
        assert_eq!(
            settings.work_budget().max_expansions(),
            Some(DEFAULT_MAX_PATH_EXPANSIONS)
        );
        assert_eq!(settings.palette.len(), DEFAULT_COLORS.len());
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let settings: Settings = serde_yaml::from_str("analysis:\n  max-depth: 7\n").unwrap();

        assert_eq!(settings.analysis.max_depth, 7);
        assert_eq!(settings.analysis.max_path_length, DEFAULT_MAX_PATH_LENGTH);
        assert!(!settings.palette.is_empty());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE_NAME);
        let mut settings = Settings::default();
        settings.analysis.max_path_expansions = None;
        settings.palette = vec!["#111111".to_string()];

        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();

        assert_eq!(loaded, settings);
    }

    #[test]
    fn empty_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE_NAME);
        fs::write(&path, "").unwrap();

        assert_eq!(Settings::load(&path).unwrap(), Settings::default());
    }

    #[test]
    fn discover_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();

        let settings = Settings::discover(None, dir.path()).unwrap();

        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn discover_finds_file_in_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(SETTINGS_FILE_NAME),
            "analysis:\n  max-path-length: 4\n",
        )
        .unwrap();

        let settings = Settings::discover(None, dir.path()).unwrap();

        assert_eq!(settings.analysis.max_path_length, 4);
    }

    #[test]
    fn zero_depth_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE_NAME);
        fs::write(&path, "analysis:\n  max-depth: 0\n").unwrap();

        let err = Settings::load(&path).unwrap_err();

        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("max-depth"));
    }

    #[test]
    fn env_overrides_apply() {
        let settings = Settings::default().with_overrides_from(lookup(&[
            ("ROWGRAPH_MAX_PATH_LENGTH", "6"),
            ("ROWGRAPH_MAX_DEPTH", " 2 "),
            ("ROWGRAPH_MAX_PATH_EXPANSIONS", "unlimited"),
        ]));

        assert_eq!(settings.analysis.max_path_length, 6);
        assert_eq!(settings.analysis.max_depth, 2);
        assert_eq!(settings.work_budget(), WorkBudget::unlimited());
    }

    #[rstest]
    #[case::not_a_number("abc")]
    #[case::zero("0")]
    #[case::negative("-3")]
    fn invalid_env_values_are_ignored(#[case] value: &str) {
        let settings = Settings::default().with_overrides_from(lookup(&[
            ("ROWGRAPH_MAX_DEPTH", value),
            ("ROWGRAPH_MAX_PATH_EXPANSIONS", value),
        ]));

        assert_eq!(settings.analysis.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(
            settings.analysis.max_path_expansions,
            Some(DEFAULT_MAX_PATH_EXPANSIONS)
        );
    }
}
