use clap::Parser;
use std::path::PathBuf;

use crate::config::{FileConfig, PlotConfig};
use crate::error::PlotError;
use crate::series::SeriesKind;

/// Plot a recorded training metric against epoch
#[derive(Parser, Debug)]
#[command(name = "metrics-plot", version, about)]
pub struct Cli {
    /// Metrics JSON file [default: "./training data/example.json"]
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Series to plot [default: loss]
    #[arg(long, value_enum)]
    pub series: Option<SeriesKind>,

    /// Chart width in dots [default: 100]
    #[arg(long)]
    pub width: Option<u32>,

    /// Chart height in dots [default: 40]
    #[arg(long)]
    pub height: Option<u32>,

    /// TOML file with any of the settings above, flags take precedence
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Defaults, then the config file, then flags
    pub fn into_config(self) -> Result<PlotConfig, PlotError> {
        let mut config = PlotConfig::default();
        if let Some(path) = &self.config {
            tracing::debug!("Reading config file {:?}", path);
            config = config.merge_file(FileConfig::load(path)?);
        }
        if let Some(input) = self.input {
            config.input = input;
        }
        if let Some(series) = self.series {
            config.series = series;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        config.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_HEIGHT, DEFAULT_INPUT};
    use std::io::Write;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("metrics-plot").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_no_flags_gives_defaults() {
        assert_eq!(parse(&[]).into_config().unwrap(), PlotConfig::default());
    }

    #[test]
    fn test_flags() {
        let config = parse(&[
            "--input",
            "runs/b.json",
            "--series",
            "gradient-magnitude",
            "--width",
            "80",
        ])
        .into_config()
        .unwrap();
        assert_eq!(config.input, PathBuf::from("runs/b.json"));
        assert_eq!(config.series, SeriesKind::GradientMagnitude);
        assert_eq!(config.width, 80);
        assert_eq!(config.height, DEFAULT_HEIGHT);
    }

    #[test]
    fn test_unsupported_series_rejected_before_io() {
        let result = Cli::try_parse_from(["metrics-plot", "--series", "accuracy"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "series = \"gradient magnitude\"\n\n[chart]\nwidth = 64\nheight = 12"
        )
        .unwrap();
        let path = file.path().to_str().unwrap();
        let config = parse(&["--config", path, "--series", "loss", "--height", "24"])
            .into_config()
            .unwrap();
        assert_eq!(config.series, SeriesKind::Loss);
        assert_eq!(config.width, 64);
        assert_eq!(config.height, 24);
        assert_eq!(config.input, PathBuf::from(DEFAULT_INPUT));
    }

    #[test]
    fn test_invalid_size() {
        let err = parse(&["--width", "10"]).into_config().unwrap_err();
        assert!(matches!(err, PlotError::Config(_)));
    }
}
