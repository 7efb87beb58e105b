use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::{DataExchangeError, DataExchangeResult};

use super::{BatchDataExchangeListener, DataExchange, JobFuture};

/// A data exchange made of independent sub exchanges.
///
/// [`super::DataExchangeService::exchange_batch`] submits every sub exchange
/// and returns the matching [`BatchResults`].
pub trait BatchDataExchange {
    type Sub: DataExchange;

    /// Units of work to submit, in submission order.
    fn sub_data_exchanges(&mut self) -> DataExchangeResult<Vec<Self::Sub>>;

    fn listener(&self) -> Option<Arc<dyn BatchDataExchangeListener<Self::Sub>>> {
        None
    }
}

/// Batch over a fixed list of sub exchanges; the list is handed out once.
pub struct ListBatchDataExchange<T> {
    sub_data_exchanges: Option<Vec<T>>,
    listener: Option<Arc<dyn BatchDataExchangeListener<T>>>,
}

impl<T: DataExchange> ListBatchDataExchange<T> {
    #[must_use]
    pub fn new(sub_data_exchanges: Vec<T>) -> Self {
        Self {
            sub_data_exchanges: Some(sub_data_exchanges),
            listener: None,
        }
    }

    #[must_use]
    pub fn with_listener(mut self, listener: Arc<dyn BatchDataExchangeListener<T>>) -> Self {
        self.listener = Some(listener);
        self
    }
}

impl<T: DataExchange> BatchDataExchange for ListBatchDataExchange<T> {
    type Sub = T;

    fn sub_data_exchanges(&mut self) -> DataExchangeResult<Vec<T>> {
        self.sub_data_exchanges.take().ok_or_else(|| {
            DataExchangeError::Submit("sub data exchanges were already submitted".to_owned())
        })
    }

    fn listener(&self) -> Option<Arc<dyn BatchDataExchangeListener<T>>> {
        self.listener.clone()
    }
}

/// One future slot per sub exchange, index-aligned with
/// [`BatchDataExchange::sub_data_exchanges`].
///
/// A `None` slot means the sub exchange at that position failed to submit.
#[derive(Debug)]
pub struct BatchResults<T> {
    results: Vec<Option<JobFuture<T>>>,
}

impl<T> BatchResults<T> {
    #[must_use]
    pub fn new(results: Vec<Option<JobFuture<T>>>) -> Self {
        Self { results }
    }

    #[must_use]
    pub fn results(&self) -> &[Option<JobFuture<T>>] {
        &self.results
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Positions whose sub exchange failed to submit.
    #[must_use]
    pub fn failed_submissions(&self) -> Vec<usize> {
        self.results
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.is_none().then_some(index))
            .collect()
    }

    /// Blocks on every submitted job in order.
    ///
    /// The returned list has one entry per slot, `None` where submission
    /// failed. The first job failure is returned once its position is reached,
    /// after every earlier job has been waited on; later jobs keep running.
    pub fn wait_for_results(self) -> DataExchangeResult<Vec<Option<T>>> {
        let total = self.results.len();
        let mut sub_results = Vec::with_capacity(total);
        for (index, slot) in self.results.into_iter().enumerate() {
            let result = match slot {
                Some(future) => Some(future.wait().inspect_err(|err| {
                    debug!(index, total, error = %err, "sub data exchange failed");
                })?),
                None => None,
            };
            sub_results.push(result);
        }
        Ok(sub_results)
    }

    /// Like [`Self::wait_for_results`], with one deadline for the whole batch.
    ///
    /// A timeout too large to form a deadline (such as `Duration::MAX`) waits
    /// without bound.
    pub fn wait_for_results_timeout(
        self,
        timeout: Duration,
    ) -> DataExchangeResult<Vec<Option<T>>> {
        let Some(deadline) = Instant::now().checked_add(timeout) else {
            return self.wait_for_results();
        };
        let mut sub_results = Vec::with_capacity(self.results.len());
        for slot in self.results {
            let result = match slot {
                Some(future) => Some(future.wait_deadline(deadline, timeout)?),
                None => None,
            };
            sub_results.push(result);
        }
        Ok(sub_results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataexchange::job_channel;

    #[test]
    fn empty_slots_stay_empty_in_results() {
        let results = BatchResults::new(vec![
            Some(JobFuture::completed(Ok(1))),
            None,
            Some(JobFuture::completed(Ok(3))),
            None,
        ]);
        assert_eq!(results.failed_submissions(), vec![1, 3]);
        assert_eq!(
            results.wait_for_results().expect("results"),
            vec![Some(1), None, Some(3), None]
        );
    }

    #[test]
    fn failure_surfaces_at_its_position() {
        let results = BatchResults::new(vec![
            Some(JobFuture::completed(Ok(1))),
            Some(JobFuture::completed(Err(DataExchangeError::Failed(
                "bad row".into(),
            )))),
            None,
        ]);
        let err = results.wait_for_results().expect_err("second job failed");
        assert!(matches!(err, DataExchangeError::Execution(_)));
    }

    #[test]
    fn batch_deadline_covers_all_jobs() {
        let (_pending, future) = job_channel::<u8>();
        let results = BatchResults::new(vec![Some(JobFuture::completed(Ok(1))), Some(future)]);
        let err = results
            .wait_for_results_timeout(Duration::from_millis(10))
            .expect_err("second job never completes");
        assert!(matches!(err, DataExchangeError::Timeout(d) if d == Duration::from_millis(10)));
    }

    #[test]
    fn unbounded_timeout_waits_like_plain_join() {
        let (promise, future) = job_channel::<u8>();
        let results =
            BatchResults::new(vec![Some(JobFuture::completed(Ok(1))), None, Some(future)]);
        let worker = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(20));
            promise.complete(Ok(3));
        });

        let finished = results
            .wait_for_results_timeout(Duration::MAX)
            .expect("no deadline applies");

        assert_eq!(finished, vec![Some(1), None, Some(3)]);
        worker.join().expect("worker thread");
    }
}
