use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::error::{DataExchangeError, DataExchangeResult};

use super::{BatchDataExchange, BatchResults, DataExchange, JobFuture, job_channel};

/// Worker pool settings of a [`DataExchangeService`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataExchangeServiceConfig {
    /// `0` sizes the pool to the available parallelism.
    #[serde(default)]
    pub worker_threads: usize,
    #[serde(default = "default_thread_name_prefix")]
    pub thread_name_prefix: String,
}

impl Default for DataExchangeServiceConfig {
    fn default() -> Self {
        Self {
            worker_threads: 0,
            thread_name_prefix: default_thread_name_prefix(),
        }
    }
}

impl DataExchangeServiceConfig {
    #[must_use]
    pub fn with_worker_threads(mut self, worker_threads: usize) -> Self {
        self.worker_threads = worker_threads;
        self
    }
}

fn default_thread_name_prefix() -> String {
    "datagear-exchange".to_owned()
}

/// Runs data exchanges on an owned worker pool.
pub struct DataExchangeService {
    pool: rayon::ThreadPool,
}

impl DataExchangeService {
    pub fn new(config: &DataExchangeServiceConfig) -> DataExchangeResult<Self> {
        let prefix = config.thread_name_prefix.clone();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.worker_threads)
            .thread_name(move |index| format!("{prefix}-{index}"))
            .build()
            .map_err(|e| DataExchangeError::Submit(format!("failed to build worker pool: {e}")))?;
        debug!(
            worker_threads = pool.current_num_threads(),
            "data exchange service started"
        );
        Ok(Self { pool })
    }

    #[must_use]
    pub fn worker_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Submits one data exchange; the future resolves to it once finished.
    pub fn exchange<D: DataExchange>(&self, data_exchange: D) -> DataExchangeResult<JobFuture<D>> {
        data_exchange.validate()?;
        Ok(self.spawn(data_exchange))
    }

    /// Submits every sub exchange of `batch`.
    ///
    /// Sub exchanges failing validation get an empty slot and are reported to
    /// the batch listener; the others are running when this returns.
    pub fn exchange_batch<B: BatchDataExchange>(
        &self,
        batch: &mut B,
    ) -> DataExchangeResult<BatchResults<B::Sub>> {
        let sub_data_exchanges = batch.sub_data_exchanges()?;
        let listener = batch.listener();
        let total = sub_data_exchanges.len();
        let mut results = Vec::with_capacity(total);

        for (index, sub_data_exchange) in sub_data_exchanges.into_iter().enumerate() {
            match sub_data_exchange.validate() {
                Ok(()) => {
                    if let Some(listener) = &listener {
                        listener.on_submit_success(index, &sub_data_exchange);
                    }
                    results.push(Some(self.spawn(sub_data_exchange)));
                }
                Err(err) => {
                    warn!(
                        index,
                        name = sub_data_exchange.name(),
                        error = %err,
                        "sub data exchange not submitted"
                    );
                    if let Some(listener) = &listener {
                        listener.on_submit_fail(index, &sub_data_exchange, &err);
                    }
                    results.push(None);
                }
            }
        }

        let results = BatchResults::new(results);
        debug!(
            total,
            failed = results.failed_submissions().len(),
            "batch data exchange submitted"
        );
        Ok(results)
    }

    fn spawn<D: DataExchange>(&self, data_exchange: D) -> JobFuture<D> {
        let (promise, future) = job_channel();
        trace!(name = data_exchange.name(), "submit data exchange");
        self.pool.spawn(move || promise.complete(run_exchange(data_exchange)));
        future
    }
}

fn run_exchange<D: DataExchange>(mut data_exchange: D) -> DataExchangeResult<D> {
    let listener = data_exchange.listener();
    if let Some(listener) = &listener {
        listener.on_start();
    }

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| data_exchange.exchange()))
        .unwrap_or_else(|payload| Err(DataExchangeError::Panicked(panic_message(&*payload))));

    match &outcome {
        Ok(()) => {
            trace!(name = data_exchange.name(), "data exchange finished");
            if let Some(listener) = &listener {
                listener.on_success();
            }
        }
        Err(err) => {
            warn!(name = data_exchange.name(), error = %err, "data exchange failed");
            if let Some(listener) = &listener {
                listener.on_exception(err);
            }
        }
    }
    if let Some(listener) = &listener {
        listener.on_finish();
    }

    outcome.map(|()| data_exchange)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_owned()
    }
}
