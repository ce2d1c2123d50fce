//! Fixed-size worker pool.
//!
//! # Design
//! Workers are named OS threads pulling boxed jobs off one `crossbeam`
//! channel. The pool is a scope: `join` (or dropping the pool) closes the
//! queue and blocks until every job already submitted has run, so nothing is
//! abandoned. Job results are not collected here; callers that want them
//! send them out of the job themselves.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::thread::{self, JoinHandle};

use crossbeam::channel::{unbounded, Receiver, Sender};
use tracing::{debug, error};

use crate::error::ProbeError;

type Job = Box<dyn FnOnce() + Send + 'static>;

pub struct WorkerPool {
    sender: Option<Sender<Job>>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Start `size` workers. `size` must be at least 1.
    pub fn new(size: usize) -> Result<Self, ProbeError> {
        if size == 0 {
            return Err(ProbeError::InvalidConfig(
                "worker pool size must be at least 1".to_string(),
            ));
        }

        let (sender, receiver) = unbounded::<Job>();
        let mut workers = Vec::with_capacity(size);
        for id in 0..size {
            let receiver = receiver.clone();
            let handle = thread::Builder::new()
                .name(format!("probe-worker-{id}"))
                .spawn(move || work(id, receiver))?;
            workers.push(handle);
        }
        debug!(size, "worker pool started");

        Ok(Self {
            sender: Some(sender),
            workers,
        })
    }

    pub fn size(&self) -> usize {
        self.workers.len()
    }

    /// Queue a job. Returns immediately; the job runs on whichever worker is
    /// free first.
    pub fn execute<F>(&self, job: F) -> Result<(), ProbeError>
    where
        F: FnOnce() + Send + 'static,
    {
        let sender = self.sender.as_ref().ok_or(ProbeError::PoolClosed)?;
        sender.send(Box::new(job)).map_err(|_| ProbeError::PoolClosed)
    }

    /// Stop accepting jobs and wait for the queue to drain.
    pub fn join(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        // Workers exit once the queue is empty and every sender is gone.
        drop(self.sender.take());
        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                error!("worker thread exited abnormally");
            }
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn work(id: usize, jobs: Receiver<Job>) {
    for job in jobs.iter() {
        if catch_unwind(AssertUnwindSafe(job)).is_err() {
            error!(worker = id, "job panicked");
        }
    }
    debug!(worker = id, "worker stopped");
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use super::*;

    #[test]
    fn zero_workers_is_rejected() {
        assert!(matches!(
            WorkerPool::new(0),
            Err(ProbeError::InvalidConfig(_))
        ));
    }

    #[test]
    fn join_runs_every_job() {
        let pool = WorkerPool::new(4).unwrap();
        assert_eq!(pool.size(), 4);

        let counter = Arc::new(AtomicUsize::new(0));
        for _ in 0..100 {
            let counter = Arc::clone(&counter);
            pool.execute(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();
        }
        pool.join();

        assert_eq!(counter.load(Ordering::SeqCst), 100);
    }

    #[test]
    fn drop_waits_for_queued_jobs() {
        let counter = Arc::new(AtomicUsize::new(0));
        {
            let pool = WorkerPool::new(2).unwrap();
            for _ in 0..10 {
                let counter = Arc::clone(&counter);
                pool.execute(move || {
                    thread::sleep(Duration::from_millis(5));
                    counter.fetch_add(1, Ordering::SeqCst);
                })
                .unwrap();
            }
        }
        assert_eq!(counter.load(Ordering::SeqCst), 10);
    }

    #[test]
    fn jobs_run_on_named_workers() {
        let names = Arc::new(Mutex::new(Vec::new()));
        let pool = WorkerPool::new(1).unwrap();
        let seen = Arc::clone(&names);
        pool.execute(move || {
            let name = thread::current().name().map(str::to_string);
            seen.lock().unwrap().push(name);
        })
        .unwrap();
        pool.join();

        assert_eq!(
            names.lock().unwrap().as_slice(),
            &[Some("probe-worker-0".to_string())]
        );
    }

    #[test]
    fn panicking_job_does_not_stop_the_worker() {
        let pool = WorkerPool::new(1).unwrap();
        let counter = Arc::new(AtomicUsize::new(0));

        pool.execute(|| panic!("boom")).unwrap();
        let after = Arc::clone(&counter);
        pool.execute(move || {
            after.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();
        pool.join();

        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
