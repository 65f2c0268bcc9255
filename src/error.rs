use std::path::PathBuf;
use thiserror::Error;

use crate::series::SeriesKind;

#[derive(Error, Debug)]
pub enum PlotError {
    #[error("failed to read metrics file {path:?}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse metrics file {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("metrics document {path:?} must be a JSON object at the top level")]
    NotAnObject { path: PathBuf },

    #[error("value under key `{key}` is not an array")]
    NotAnArray { key: String },

    #[error("series `{series}` not found in metrics document (tried keys: {tried:?})")]
    KeyNotFound {
        series: SeriesKind,
        tried: Vec<&'static str>,
    },

    #[error("unsupported series `{0}`, expected `loss` or `gradient magnitude`")]
    UnsupportedSeries(String),

    #[error("element {index} of the series cannot be converted to a float: {value}")]
    Conversion {
        index: usize,
        value: serde_json::Value,
    },

    #[error("failed to display chart")]
    Display(#[source] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to read config file {path:?}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path:?}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
