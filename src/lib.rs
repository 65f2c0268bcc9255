#![deny(rustdoc::broken_intra_doc_links)]

pub mod chart;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod metrics;
pub mod series;

pub use chart::{LineChart, SeriesSummary};
pub use config::PlotConfig;
pub use display::{render, Surface, TerminalSurface};
pub use error::PlotError;
pub use metrics::load;
pub use series::SeriesKind;

/// Load the configured series and show it on `surface`
pub fn run<S: Surface + ?Sized>(
    config: &PlotConfig,
    surface: &mut S,
) -> Result<LineChart, PlotError> {
    let values = load(&config.input, config.series)?;
    render(&values, config.series.label(), surface)
}
