//! Fixed-size worker pool for parser tasks.
//!
//! The pool owns K OS threads that drain a shared task queue guarded by a
//! mutex and condition variable. [`WorkerPool::submit`] consumes a move-only
//! task and hands back a [`CompletionHandle`]; joining the handle blocks
//! until the task finishes and surfaces its error, which is how the pipeline
//! orchestrator learns about parser failures.

use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender, bounded};
use log::debug;
use parking_lot::{Condvar, Mutex};

use crate::errors::{Result, VcfLoadError};

type Task = Box<dyn FnOnce() -> Result<()> + Send + 'static>;

/// Waits for one submitted task and reports its outcome.
///
/// If the pool is shut down before the task ever runs, or the task panics,
/// joining yields a worker-pool error instead of the task's own result.
pub struct CompletionHandle {
    result_rx: Receiver<Result<()>>,
}

impl CompletionHandle {
    /// Block until the task finishes and return its result.
    pub fn join(self) -> Result<()> {
        match self.result_rx.recv() {
            Ok(result) => result,
            Err(_) => Err(VcfLoadError::WorkerPool {
                reason: "task discarded before completion".to_string(),
            }),
        }
    }
}

struct PoolState {
    tasks: VecDeque<(Task, Sender<Result<()>>)>,
    stopping: bool,
}

struct PoolShared {
    state: Mutex<PoolState>,
    task_ready: Condvar,
}

/// A fixed set of worker threads executing submitted tasks.
///
/// Shutdown (explicit or on drop) signals every worker, lets in-flight tasks
/// finish, discards queued-but-unstarted tasks, and joins all threads.
/// Callers holding a handle for a discarded task observe a worker-pool error.
pub struct WorkerPool {
    shared: Arc<PoolShared>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Create a pool with `worker_count` threads (minimum 1).
    #[must_use]
    pub fn new(worker_count: usize) -> Self {
        let worker_count = worker_count.max(1);
        let shared = Arc::new(PoolShared {
            state: Mutex::new(PoolState { tasks: VecDeque::new(), stopping: false }),
            task_ready: Condvar::new(),
        });

        let workers = (0..worker_count)
            .map(|index| {
                let shared = Arc::clone(&shared);
                thread::Builder::new()
                    .name(format!("vcfload-worker-{index}"))
                    .spawn(move || worker_loop(&shared))
                    .expect("failed to spawn worker thread")
            })
            .collect();

        Self { shared, workers }
    }

    /// Number of worker threads in the pool.
    #[must_use]
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Submit a task for execution.
    ///
    /// The task is consumed by move, so it may own buffers, queue handles and
    /// other non-copyable state. Fails once shutdown has been signalled.
    pub fn submit<F>(&self, task: F) -> Result<CompletionHandle>
    where
        F: FnOnce() -> Result<()> + Send + 'static,
    {
        let (result_tx, result_rx) = bounded(1);
        {
            let mut state = self.shared.state.lock();
            if state.stopping {
                return Err(VcfLoadError::WorkerPool {
                    reason: "submit on stopped worker pool".to_string(),
                });
            }
            state.tasks.push_back((Box::new(task), result_tx));
        }
        self.shared.task_ready.notify_one();
        Ok(CompletionHandle { result_rx })
    }

    /// Stop the pool: discard queued tasks, wait for in-flight tasks, join
    /// every worker. Idempotent.
    pub fn shutdown(&mut self) {
        {
            let mut state = self.shared.state.lock();
            if state.stopping && self.workers.is_empty() {
                return;
            }
            state.stopping = true;
            let discarded = state.tasks.len();
            if discarded > 0 {
                debug!("worker pool discarding {discarded} queued task(s) on shutdown");
            }
            // Dropping the queued senders makes their handles observe the
            // discard as a worker-pool error.
            state.tasks.clear();
        }
        self.shared.task_ready.notify_all();
        for worker in self.workers.drain(..) {
            let _ = worker.join();
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn worker_loop(shared: &PoolShared) {
    loop {
        let job = {
            let mut state = shared.state.lock();
            loop {
                if let Some(job) = state.tasks.pop_front() {
                    break Some(job);
                }
                if state.stopping {
                    break None;
                }
                shared.task_ready.wait(&mut state);
            }
        };

        let Some((task, result_tx)) = job else {
            return;
        };

        // A panicking task must not take the worker thread down with it; the
        // panic is converted into an error on the task's handle.
        let result = panic::catch_unwind(AssertUnwindSafe(task)).unwrap_or_else(|_| {
            Err(VcfLoadError::WorkerPool { reason: "task panicked".to_string() })
        });
        // The handle may have been dropped; that is not this worker's problem.
        let _ = result_tx.send(result);
    }
}
