use super::overlay_error::OverlayError;
use super::task_responder::TaskResponder;
use super::types::Threadable;
use crate::animation::tile_id::TileID;

pub type TaskReturn = Result<Option<Vec<u8>>, OverlayError>;

pub type TaskWorker = Box<dyn FnOnce() -> TaskReturn + Send>;

/// One fetch of one animation frame of one tile.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TileRequest {
    pub url: String,
    pub frame_index: usize,
    pub tile: TileID,
}

impl TileRequest {
    pub fn new(url: String, frame_index: usize, tile: TileID) -> TileRequest {
        TileRequest {
            url,
            frame_index,
            tile,
        }
    }
}

pub struct Task {
    pub request: TileRequest,
    pub responder: Threadable<dyn TaskResponder>,
    pub worker: TaskWorker,
}

impl Task {
    pub fn new(
        request: TileRequest,
        responder: Threadable<dyn TaskResponder>,
        worker: TaskWorker,
    ) -> Task {
        Task {
            request,
            responder,
            worker,
        }
    }
}
