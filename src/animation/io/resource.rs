use crate::animation::common::async_executor::AsyncExecutor;
use crate::animation::common::task::{Task, TaskReturn, TileRequest};
use crate::animation::common::task_responder::TaskResponder;
use crate::animation::common::types::Threadable;

use std::sync::Arc;

/// Loads the raw bytes behind a tile URL. Called from fetch worker threads.
pub trait TileLoader: Send + Sync {
    fn load(&self, url: &str) -> TaskReturn;
}

pub struct Resource {
    async_executor: AsyncExecutor,
    loader: Arc<dyn TileLoader>,
}

impl Resource {
    pub fn new(worker_count: usize, loader: Arc<dyn TileLoader>) -> Resource {
        Resource {
            async_executor: AsyncExecutor::new(worker_count),
            loader,
        }
    }

    pub fn get(&self, request: TileRequest, responder: Threadable<dyn TaskResponder>) {
        let loader = self.loader.clone();
        let url = request.url.clone();
        let worker = Box::new(move || -> TaskReturn { loader.load(&url) });

        self.async_executor
            .queue_task(Task::new(request, responder, worker));
    }

    pub fn in_flight(&self) -> usize {
        self.async_executor.active_count() + self.async_executor.queued_count()
    }
}
