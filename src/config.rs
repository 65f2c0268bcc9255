use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::PlotError;
use crate::series::SeriesKind;

pub const DEFAULT_INPUT: &str = "./training data/example.json";
pub const DEFAULT_WIDTH: u32 = 100;
pub const DEFAULT_HEIGHT: u32 = 40;

// textplots refuses anything smaller
const MIN_WIDTH: u32 = 32;
const MIN_HEIGHT: u32 = 3;

/// Everything a run needs, built once at startup
#[derive(Clone, Debug, PartialEq)]
pub struct PlotConfig {
    pub input: PathBuf,
    pub series: SeriesKind,
    pub width: u32,
    pub height: u32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        PlotConfig {
            input: PathBuf::from(DEFAULT_INPUT),
            series: SeriesKind::Loss,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

/// Optional TOML run config, every field may be left out
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub input: Option<PathBuf>,
    pub series: Option<SeriesKind>,
    #[serde(default)]
    pub chart: ChartConfig,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ChartConfig {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, PlotError> {
        let contents = std::fs::read_to_string(path).map_err(|source| PlotError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| PlotError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl PlotConfig {
    /// Overlay the values set in `file`
    pub fn merge_file(mut self, file: FileConfig) -> Self {
        if let Some(input) = file.input {
            self.input = input;
        }
        if let Some(series) = file.series {
            self.series = series;
        }
        if let Some(width) = file.chart.width {
            self.width = width;
        }
        if let Some(height) = file.chart.height {
            self.height = height;
        }
        self
    }

    pub fn validate(self) -> Result<Self, PlotError> {
        if self.width < MIN_WIDTH {
            return Err(PlotError::Config(format!(
                "chart width must be at least {}, got {}",
                MIN_WIDTH, self.width
            )));
        }
        if self.height < MIN_HEIGHT {
            return Err(PlotError::Config(format!(
                "chart height must be at least {}, got {}",
                MIN_HEIGHT, self.height
            )));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_fixed_run() {
        let config = PlotConfig::default();
        assert_eq!(config.input, PathBuf::from("./training data/example.json"));
        assert_eq!(config.series, SeriesKind::Loss);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_merge_file() {
        let file: FileConfig = toml::from_str(
            r#"
            series = "gradient magnitude"

            [chart]
            height = 20
            "#,
        )
        .unwrap();
        let config = PlotConfig::default().merge_file(file);
        assert_eq!(config.series, SeriesKind::GradientMagnitude);
        assert_eq!(config.height, 20);
        assert_eq!(config.width, DEFAULT_WIDTH);
        assert_eq!(config.input, PathBuf::from(DEFAULT_INPUT));
    }

    #[test]
    fn test_empty_file_changes_nothing() {
        let file: FileConfig = toml::from_str("").unwrap();
        assert_eq!(file, FileConfig::default());
        assert_eq!(PlotConfig::default().merge_file(file), PlotConfig::default());
    }

    #[test]
    fn test_unsupported_series_in_file() {
        let err = toml::from_str::<FileConfig>(r#"series = "accuracy""#).unwrap_err();
        assert!(err.to_string().contains("unsupported series"));
    }

    #[test]
    fn test_unknown_field_in_file() {
        assert!(toml::from_str::<FileConfig>(r#"colour = "red""#).is_err());
    }

    #[test]
    fn test_load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "input = \"runs/a.json\"\n\n[chart]\nwidth = 64").unwrap();
        let loaded = FileConfig::load(file.path()).unwrap();
        assert_eq!(loaded.input, Some(PathBuf::from("runs/a.json")));
        assert_eq!(loaded.chart.width, Some(64));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileConfig::load(&dir.path().join("plot.toml")).unwrap_err();
        assert!(matches!(err, PlotError::ConfigRead { .. }));
    }

    #[test]
    fn test_validate_rejects_small_charts() {
        let narrow = PlotConfig {
            width: 16,
            ..PlotConfig::default()
        };
        assert!(matches!(narrow.validate(), Err(PlotError::Config(_))));
        let short = PlotConfig {
            height: 2,
            ..PlotConfig::default()
        };
        assert!(matches!(short.validate(), Err(PlotError::Config(_))));
    }
}
