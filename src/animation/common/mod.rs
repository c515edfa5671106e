pub mod async_executor;
pub mod overlay_error;
pub mod task;
pub mod task_responder;
pub mod types;
