//! datagear: chart widgets, batch data exchange and value resolution for the
//! DataGear analysis platform.
//!
//! - [`analysis`] binds chart definitions to plugins and renders them as
//!   HTML/JavaScript for the browser-side chart runtime.
//! - [`dataexchange`] runs import/export jobs on a worker pool and joins
//!   their results in submission order.
//! - [`persistence`] resolves `file:` parameter values.

pub mod analysis;
pub mod dataexchange;
pub mod error;
pub mod persistence;
pub mod telemetry;

pub use analysis::{ChartPlugin, ChartWidget};
pub use error::{
    DataExchangeError, DataExchangeResult, ParamMapperError, ParamMapperResult, RenderError,
    RenderResult,
};
