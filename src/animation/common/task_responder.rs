use super::overlay_error::OverlayError;
use super::task::TileRequest;

/// Receives the outcome of a [`Task`](super::task::Task) on the worker thread
/// that ran it.
pub trait TaskResponder: Send {
    fn on_task_success(&mut self, request: TileRequest, data: Option<Vec<u8>>);
    fn on_task_failure(&mut self, request: TileRequest, error: OverlayError);
}
