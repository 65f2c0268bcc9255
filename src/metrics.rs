use serde_json::{Map, Value};
use std::path::Path;

use crate::error::PlotError;
use crate::series::SeriesKind;

/// Parsed top-level object of a metrics file
pub type MetricsDocument = Map<String, Value>;

/// Read the metrics file at `path` and return the requested series in file order
pub fn load(path: &Path, series: SeriesKind) -> Result<Vec<Value>, PlotError> {
    tracing::debug!("Reading metrics file {:?}", path);
    let contents = std::fs::read_to_string(path).map_err(|source| PlotError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;
    let document = parse_from(&contents, path)?;
    let values = select(&document, series)?;
    tracing::info!(
        "Loaded {} epochs of `{}` from {:?}",
        values.len(),
        series,
        path
    );
    Ok(values)
}

/// Parse text into a metrics document. Anything but a JSON object is rejected.
pub fn parse_document(text: &str) -> Result<MetricsDocument, PlotError> {
    parse_from(text, Path::new(""))
}

fn parse_from(text: &str, path: &Path) -> Result<MetricsDocument, PlotError> {
    let value: Value = serde_json::from_str(text).map_err(|source| PlotError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(PlotError::NotAnObject {
            path: path.to_path_buf(),
        }),
    }
}

/// Pick a series out of a document. The canonical key wins over the trainer's alias.
pub fn select(document: &MetricsDocument, series: SeriesKind) -> Result<Vec<Value>, PlotError> {
    let tried = series.lookup_keys();
    let (key, value) = tried
        .iter()
        .find_map(|&key| document.get(key).map(|value| (key, value)))
        .ok_or_else(|| PlotError::KeyNotFound {
            series,
            tried: tried.clone(),
        })?;
    if key != series.key() {
        tracing::debug!("Series `{}` found under alias `{}`", series, key);
    }
    match value {
        Value::Array(values) => Ok(values.clone()),
        _ => Err(PlotError::NotAnArray {
            key: key.to_string(),
        }),
    }
}
