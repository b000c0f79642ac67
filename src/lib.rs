//! income_pictogram
//!
//! Renders a pictogram infographic of an income distribution: money and people
//! per income band drawn as icon bars on an SVG canvas, plus an income-vs-taxes
//! comparison. Pairs with the `pictogram` CLI.
//!
//! ### Features
//! - Derive USD bands from local-currency brackets, reconciled against total income
//! - Population- or range-proportional horizontal axis over non-uniform bands
//! - Icon-grid packing in four growth directions
//! - Static SVG/HTML markup, PNG output, and a resize-throttled interactive session
//!
//! ### Example
//! ```no_run
//! use income_pictogram::{compose, dataset, ChartConfig};
//! use income_pictogram::viz::svg;
//!
//! let input = dataset::belstat();
//! let chart = compose(&input, 1200.0, 500.0, &ChartConfig::default())?;
//! std::fs::write("chart.svg", svg::render_to_string(&chart.document))?;
//! income_pictogram::storage::save_csv(&chart.derivation.bands, "bands.csv")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod bands;
pub mod chart;
pub mod config;
pub mod dataset;
pub mod error;
pub mod format;
pub mod models;
pub mod pack;
pub mod scale;
pub mod schedule;
pub mod session;
pub mod storage;
pub mod viz;

pub use chart::{compose, Chart};
pub use config::{ChartConfig, IconDensity};
pub use error::{ChartError, ChartResult};
pub use models::{DerivedBand, Derivation, RawBand, StatInput};
pub use scale::{AxisScale, ScalePolicy};
