use clap::ValueEnum;
use serde::Deserialize;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::error::PlotError;

/// The metric series a run records once per epoch
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum, Deserialize)]
#[serde(try_from = "String")]
pub enum SeriesKind {
    Loss,
    GradientMagnitude,
}

impl SeriesKind {
    /// Key under which the series is stored in a metrics document
    pub fn key(self) -> &'static str {
        match self {
            SeriesKind::Loss => "loss",
            SeriesKind::GradientMagnitude => "gradient magnitude",
        }
    }

    /// Keys written by the trainer's metadata dump
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            SeriesKind::Loss => &["Loss"],
            SeriesKind::GradientMagnitude => &["GradientMag"],
        }
    }

    /// Every key tried during lookup, canonical first
    pub fn lookup_keys(self) -> Vec<&'static str> {
        std::iter::once(self.key())
            .chain(self.aliases().iter().copied())
            .collect()
    }

    /// Y axis title
    pub fn label(self) -> &'static str {
        self.key()
    }
}

impl Display for SeriesKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SeriesKind {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "loss" => Ok(SeriesKind::Loss),
            "gradient magnitude" | "gradient-magnitude" | "gradient_magnitude" => {
                Ok(SeriesKind::GradientMagnitude)
            }
            other => Err(PlotError::UnsupportedSeries(other.to_string())),
        }
    }
}

impl TryFrom<String> for SeriesKind {
    type Error = PlotError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_supported_names() {
        assert_eq!("loss".parse::<SeriesKind>().unwrap(), SeriesKind::Loss);
        for name in ["gradient magnitude", "gradient-magnitude", "gradient_magnitude"] {
            assert_eq!(
                name.parse::<SeriesKind>().unwrap(),
                SeriesKind::GradientMagnitude
            );
        }
    }

    #[test]
    fn test_parse_unsupported_name() {
        let err = "accuracy".parse::<SeriesKind>().unwrap_err();
        assert!(matches!(err, PlotError::UnsupportedSeries(ref name) if name == "accuracy"));
        // Matching is exact, the trainer's capitalised keys are not series names
        assert!("Loss".parse::<SeriesKind>().is_err());
    }

    #[test]
    fn test_keys_and_labels() {
        assert_eq!(SeriesKind::Loss.key(), "loss");
        assert_eq!(SeriesKind::GradientMagnitude.label(), "gradient magnitude");
        assert_eq!(
            SeriesKind::GradientMagnitude.lookup_keys(),
            vec!["gradient magnitude", "GradientMag"]
        );
    }

    #[test]
    fn test_cli_value_names() {
        let names: Vec<String> = SeriesKind::value_variants()
            .iter()
            .filter_map(|v| v.to_possible_value())
            .map(|v| v.get_name().to_string())
            .collect();
        assert_eq!(names, vec!["loss", "gradient-magnitude"]);
    }
}
