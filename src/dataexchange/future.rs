use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, bounded};
use tracing::trace;

use crate::error::{DataExchangeError, DataExchangeResult};

/// Creates a connected promise/future pair for one data-exchange job.
#[must_use]
pub fn job_channel<T>() -> (JobPromise<T>, JobFuture<T>) {
    let (sender, receiver) = bounded(1);
    (JobPromise { sender }, JobFuture { receiver })
}

/// Completing side of a job, held by whoever runs it.
#[derive(Debug)]
pub struct JobPromise<T> {
    sender: Sender<DataExchangeResult<T>>,
}

impl<T> JobPromise<T> {
    pub fn complete(self, result: DataExchangeResult<T>) {
        if self.sender.send(result).is_err() {
            trace!("job future dropped before completion; result discarded");
        }
    }
}

/// Waiting side of a job.
///
/// Dropping the promise without completing it resolves the future to
/// [`DataExchangeError::Interrupted`].
#[derive(Debug)]
pub struct JobFuture<T> {
    receiver: Receiver<DataExchangeResult<T>>,
}

impl<T> JobFuture<T> {
    /// Future that is already resolved to `result`.
    #[must_use]
    pub fn completed(result: DataExchangeResult<T>) -> Self {
        let (promise, future) = job_channel();
        promise.complete(result);
        future
    }

    /// Whether a result is available without blocking.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        !self.receiver.is_empty()
    }

    /// Blocks until the job finishes.
    pub fn wait(self) -> DataExchangeResult<T> {
        match self.receiver.recv() {
            Ok(result) => unwrap_job_result(result),
            Err(_) => Err(DataExchangeError::Interrupted),
        }
    }

    pub fn wait_timeout(self, timeout: Duration) -> DataExchangeResult<T> {
        match self.receiver.recv_timeout(timeout) {
            Ok(result) => unwrap_job_result(result),
            Err(RecvTimeoutError::Timeout) => Err(DataExchangeError::Timeout(timeout)),
            Err(RecvTimeoutError::Disconnected) => Err(DataExchangeError::Interrupted),
        }
    }

    /// Blocks until the job finishes or `deadline` passes; `timeout` is the
    /// overall budget reported on expiry.
    pub(crate) fn wait_deadline(
        self,
        deadline: Instant,
        timeout: Duration,
    ) -> DataExchangeResult<T> {
        match self.receiver.recv_deadline(deadline) {
            Ok(result) => unwrap_job_result(result),
            Err(RecvTimeoutError::Timeout) => Err(DataExchangeError::Timeout(timeout)),
            Err(RecvTimeoutError::Disconnected) => Err(DataExchangeError::Interrupted),
        }
    }
}

fn unwrap_job_result<T>(result: DataExchangeResult<T>) -> DataExchangeResult<T> {
    result.map_err(|err| DataExchangeError::Execution(Box::new(err)))
}
