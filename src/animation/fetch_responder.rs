use super::common::overlay_error::OverlayError;
use super::common::task::TileRequest;
use super::common::task_responder::TaskResponder;

use image::DynamicImage;
use std::sync::mpsc::Sender;
use std::sync::Arc;

/// A settled fetch, marshaled from a worker thread back to the overlay's
/// owning thread.
pub enum FetchEvent {
    Loaded {
        request: TileRequest,
        image: Arc<DynamicImage>,
    },
    Failed {
        request: TileRequest,
        error: OverlayError,
    },
}

impl FetchEvent {
    pub fn request(&self) -> &TileRequest {
        match self {
            FetchEvent::Loaded { request, .. } => request,
            FetchEvent::Failed { request, .. } => request,
        }
    }
}

/// Decodes fetched tiles on the worker thread and forwards the outcome.
pub struct FetchResponder {
    events: Sender<FetchEvent>,
}

impl FetchResponder {
    pub fn new(events: Sender<FetchEvent>) -> FetchResponder {
        FetchResponder { events }
    }

    fn send(&self, event: FetchEvent) {
        if self.events.send(event).is_err() {
            // The overlay is gone; nobody is waiting for this tile.
            trace!("Dropping tile fetch result for a released overlay");
        }
    }
}

impl TaskResponder for FetchResponder {
    fn on_task_success(&mut self, request: TileRequest, data: Option<Vec<u8>>) {
        let event = match data {
            Some(bytes) => match image::load_from_memory(&bytes) {
                Ok(image) => FetchEvent::Loaded {
                    request,
                    image: Arc::new(image),
                },
                Err(err) => {
                    let error = OverlayError::Decode {
                        url: request.url.clone(),
                        message: err.to_string(),
                    };
                    FetchEvent::Failed { request, error }
                }
            },
            None => {
                let error = OverlayError::EmptyTile {
                    url: request.url.clone(),
                };
                FetchEvent::Failed { request, error }
            }
        };
        self.send(event);
    }

    fn on_task_failure(&mut self, request: TileRequest, error: OverlayError) {
        self.send(FetchEvent::Failed { request, error });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::tile_id::TileID;
    use std::io::Cursor;
    use std::sync::mpsc::channel;

    fn request() -> TileRequest {
        TileRequest::new("http://tiles/0/0/0.png".to_string(), 0, TileID::new(0, 0, 0))
    }

    #[test]
    fn decodes_png_tiles() {
        let mut png = Cursor::new(Vec::new());
        DynamicImage::new_rgba8(4, 4)
            .write_to(&mut png, image::ImageFormat::Png)
            .unwrap();

        let (sender, receiver) = channel();
        let mut responder = FetchResponder::new(sender);
        responder.on_task_success(request(), Some(png.into_inner()));

        match receiver.recv().unwrap() {
            FetchEvent::Loaded { image, .. } => assert_eq!(image.width(), 4),
            FetchEvent::Failed { error, .. } => panic!("unexpected {}", error),
        }
    }

    #[test]
    fn garbage_and_empty_bodies_fail() {
        let (sender, receiver) = channel();
        let mut responder = FetchResponder::new(sender);
        responder.on_task_success(request(), Some(b"not an image".to_vec()));
        responder.on_task_success(request(), None);

        let codes: Vec<i32> = receiver
            .try_iter()
            .map(|event| match event {
                FetchEvent::Failed { error, .. } => error.code(),
                FetchEvent::Loaded { .. } => 0,
            })
            .collect();
        assert_eq!(codes, vec![4, 3]);
    }

    #[test]
    fn released_overlay_is_not_an_error() {
        let (sender, receiver) = channel();
        drop(receiver);
        let mut responder = FetchResponder::new(sender);
        responder.on_task_failure(request(), OverlayError::Animating);
    }
}
