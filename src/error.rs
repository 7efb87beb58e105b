use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub type RenderResult<T> = Result<T, RenderError>;
pub type ParamMapperResult<T> = Result<T, ParamMapperError>;
pub type DataExchangeResult<T> = Result<T, DataExchangeError>;

/// Failure while rendering a chart into its target.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("chart widget `{widget_id}` has no chart plugin")]
    PluginNotSet { widget_id: String },

    #[error("[HtmlChartPluginRenderOption.elementId] must be set")]
    MissingChartElementId,

    #[error("chart plugin id `{0}` is already registered")]
    DuplicatePlugin(String),

    #[error("failed to serialize chart script object: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write chart output: {0}")]
    Io(#[from] io::Error),
}

/// Failure while mapping a parameter value (for example a `file:` value).
#[derive(Debug, Error)]
pub enum ParamMapperError {
    #[error("file not found: {}", path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unsupported file value charset: {0}")]
    UnsupportedCharset(String),

    #[error("failed to read file value: {0}")]
    Io(#[from] io::Error),
}

/// Failure surfaced by a data exchange or while waiting on one.
#[derive(Debug, Error)]
pub enum DataExchangeError {
    #[error("data exchange was interrupted before producing a result")]
    Interrupted,

    #[error("data exchange execution failed: {0}")]
    Execution(#[source] Box<DataExchangeError>),

    #[error("data exchange panicked: {0}")]
    Panicked(String),

    #[error("timed out after {0:?} waiting for data exchange results")]
    Timeout(Duration),

    #[error("failed to submit data exchange: {0}")]
    Submit(String),

    #[error("data exchange failed: {0}")]
    Failed(String),

    #[error("data exchange io failure: {0}")]
    Io(#[from] io::Error),
}
