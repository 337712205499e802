//! Settings for the command line, read from an optional JSON file and
//! overridden by flags.

use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CliError, Result};

/// Accepted range for `max_memory_mb` (64 MB to 128 GB).
pub const MAX_MEMORY_MB_RANGE: RangeInclusive<u32> = 64..=131_072;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Load fails when the estimated peak load memory exceeds this many
    /// megabytes.
    pub max_memory_mb: u32,
    /// Traversal output lists at most this many node ids in text mode.
    pub display_limit: usize,
    /// Node summaries list at most this many neighbors in text mode.
    pub neighbor_display_limit: usize,
    /// `subgraph` keeps at most this many nodes of the BFS order.
    pub subgraph_node_limit: usize,
    pub format: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_memory_mb: 4096,
            display_limit: 20,
            neighbor_display_limit: 15,
            subgraph_node_limit: 200,
            format: OutputFormat::Text,
        }
    }
}

/// Values given on the command line; `None` keeps the file/default value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub max_memory_mb: Option<u32>,
    pub display_limit: Option<usize>,
    pub format: Option<OutputFormat>,
}

impl Settings {
    /// Read settings from a JSON file. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| CliError::ConfigFile {
            message: e.to_string(),
            path: path.to_path_buf(),
        })?;
        serde_json::from_str(&text).map_err(|e| CliError::ConfigFile {
            message: e.to_string(),
            path: path.to_path_buf(),
        })
    }

    /// Defaults, then the file (if any), then flags; validated at the end.
    pub fn resolve(file: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let mut settings = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        settings.apply(overrides);
        settings.validate()?;
        Ok(settings)
    }

    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(mb) = overrides.max_memory_mb {
            self.max_memory_mb = mb;
        }
        if let Some(limit) = overrides.display_limit {
            self.display_limit = limit;
        }
        if let Some(format) = overrides.format {
            self.format = format;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !MAX_MEMORY_MB_RANGE.contains(&self.max_memory_mb) {
            return Err(CliError::Config {
                message: format!(
                    "max_memory_mb must be within {}..={}, got {}",
                    MAX_MEMORY_MB_RANGE.start(),
                    MAX_MEMORY_MB_RANGE.end(),
                    self.max_memory_mb
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_file(json: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(json.as_bytes()).unwrap();
        f
    }

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.max_memory_mb, 4096);
        assert_eq!(s.display_limit, 20);
        assert_eq!(s.neighbor_display_limit, 15);
        assert_eq!(s.subgraph_node_limit, 200);
        assert_eq!(s.format, OutputFormat::Text);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let f = config_file(r#"{ "display_limit": 5, "format": "json" }"#);
        let s = Settings::from_file(f.path()).unwrap();
        assert_eq!(s.display_limit, 5);
        assert_eq!(s.format, OutputFormat::Json);
        assert_eq!(s.max_memory_mb, 4096);
    }

    #[test]
    fn test_flags_override_file() {
        let f = config_file(r#"{ "display_limit": 5, "max_memory_mb": 128 }"#);
        let overrides = Overrides {
            display_limit: Some(50),
            ..Default::default()
        };
        let s = Settings::resolve(Some(f.path()), &overrides).unwrap();
        assert_eq!(s.display_limit, 50);
        assert_eq!(s.max_memory_mb, 128);
    }

    #[test]
    fn test_out_of_range_memory_rejected() {
        let overrides = Overrides {
            max_memory_mb: Some(1),
            ..Default::default()
        };
        let err = Settings::resolve(None, &overrides).unwrap_err();
        assert!(matches!(err, CliError::Config { .. }));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let f = config_file(r#"{ "max_memory": 10 }"#);
        assert!(matches!(
            Settings::from_file(f.path()),
            Err(CliError::ConfigFile { .. })
        ));
    }

    #[test]
    fn test_missing_file_rejected() {
        let err = Settings::from_file(Path::new("/no/such/config.json")).unwrap_err();
        assert!(err.to_string().contains("/no/such/config.json"));
    }

    #[test]
    fn test_serde_roundtrip() {
        let s = Settings::default();
        let json = serde_json::to_string_pretty(&s).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(s, back);
    }
}
