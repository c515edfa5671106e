use super::overlay_error::OverlayError;
use super::task::Task;
use std::panic::{self, AssertUnwindSafe};
use threadpool::ThreadPool;

pub struct AsyncExecutor {
    pool: ThreadPool,
}

impl AsyncExecutor {
    pub fn new(thread_count: usize) -> AsyncExecutor {
        AsyncExecutor {
            pool: ThreadPool::with_name("tile-fetch".to_string(), thread_count.max(1)),
        }
    }

    pub fn queue_task(&self, task: Task) {
        self.pool.execute(move || {
            let Task {
                request,
                responder,
                worker,
            } = task;
            let ret = match panic::catch_unwind(AssertUnwindSafe(worker)) {
                Ok(ret) => ret,
                Err(payload) => {
                    let reason = payload
                        .downcast_ref::<&str>()
                        .map(|s| s.to_string())
                        .or_else(|| payload.downcast_ref::<String>().cloned())
                        .unwrap_or_else(|| "unknown panic".to_string());
                    error!("Fetch worker panicked on {}: {}", request.url, reason);
                    Err(OverlayError::Executor(format!("worker panicked: {}", reason)))
                }
            };

            let mut responder = match responder.lock() {
                Ok(responder) => responder,
                Err(poisoned) => {
                    error!("Task responder poisoned while fetching {}", request.url);
                    poisoned.into_inner()
                }
            };
            match ret {
                Ok(data) => responder.on_task_success(request, data),
                Err(err) => responder.on_task_failure(request, err),
            }
        });
    }

    pub fn active_count(&self) -> usize {
        self.pool.active_count()
    }

    pub fn queued_count(&self) -> usize {
        self.pool.queued_count()
    }

    /// Blocks until every queued task has run.
    pub fn join(&self) -> Result<(), OverlayError> {
        self.pool.join();
        if self.pool.panic_count() > 0 {
            return Err(OverlayError::Executor(format!(
                "{} fetch workers panicked",
                self.pool.panic_count()
            )));
        }
        Ok(())
    }
}
