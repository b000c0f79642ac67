use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

/// Failures of the layout engine. Any of them aborts the whole render;
/// there is no partial-chart mode.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChartError {
    #[error("invalid packing parameters: {0}")]
    InvalidPacking(String),

    #[error("inconsistent statistical input: {0}")]
    InconsistentData(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("value {value} outside the axis domain [{min}, {max}]")]
    OutOfDomain { value: f64, min: f64, max: f64 },

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: f64, height: f64 },

    #[error("render failed: {0}")]
    Render(String),
}
