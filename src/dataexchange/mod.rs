//! Data import/export jobs and the batch supervisor that runs them.
//!
//! Concrete exchanges (SQL, CSV, Excel...) implement [`DataExchange`]; this
//! module only schedules them on a worker pool and collects their outcome.

mod batch;
mod future;
mod service;

use std::sync::Arc;

use crate::error::{DataExchangeError, DataExchangeResult};

pub use batch::{BatchDataExchange, BatchResults, ListBatchDataExchange};
pub use future::{JobFuture, JobPromise, job_channel};
pub use service::{DataExchangeService, DataExchangeServiceConfig};

/// A unit of data import or export.
pub trait DataExchange: Send + 'static {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Checked before submission; an error marks the job as not submitted.
    fn validate(&self) -> DataExchangeResult<()> {
        Ok(())
    }

    fn exchange(&mut self) -> DataExchangeResult<()>;

    fn listener(&self) -> Option<Arc<dyn DataExchangeListener>> {
        None
    }
}

/// Progress callbacks of one running data exchange.
pub trait DataExchangeListener: Send + Sync {
    fn on_start(&self) {}

    fn on_success(&self) {}

    fn on_exception(&self, _error: &DataExchangeError) {}

    /// Always called last, after `on_success` or `on_exception`.
    fn on_finish(&self) {}
}

/// Submission callbacks of a batch, one per sub exchange.
pub trait BatchDataExchangeListener<T>: Send + Sync {
    fn on_submit_success(&self, _index: usize, _sub_data_exchange: &T) {}

    fn on_submit_fail(&self, _index: usize, _sub_data_exchange: &T, _error: &DataExchangeError) {}
}
