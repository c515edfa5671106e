use super::task::TileRequest;

use std::fmt::{Display, Formatter, Result};

/// Domain reported alongside every tile fetch failure.
pub const ERROR_DOMAIN: &str = "map_tile_animation.fetch";

#[derive(Debug, Clone, PartialEq, Eq, Fail)]
pub enum OverlayError {
    #[fail(display = "network error fetching {}: {}", url, message)]
    Network { url: String, message: String },
    #[fail(display = "HTTP {} fetching {}", status, url)]
    Status { url: String, status: u16 },
    #[fail(display = "empty tile returned from {}", url)]
    EmptyTile { url: String },
    #[fail(display = "could not decode tile from {}: {}", url, message)]
    Decode { url: String, message: String },
    #[fail(display = "frame index {} out of range for {} frames", index, count)]
    FrameOutOfRange { index: usize, count: usize },
    #[fail(display = "cannot scrub while animating")]
    Animating,
    #[fail(display = "invalid overlay config: {}", _0)]
    Config(String),
    #[fail(display = "could not read {}: {}", path, message)]
    Io { path: String, message: String },
    #[fail(display = "executor error: {}", _0)]
    Executor(String),
}

impl OverlayError {
    pub fn code(&self) -> i32 {
        match self {
            OverlayError::Network { .. } => 1,
            OverlayError::Status { .. } => 2,
            OverlayError::EmptyTile { .. } => 3,
            OverlayError::Decode { .. } => 4,
            OverlayError::FrameOutOfRange { .. } => 10,
            OverlayError::Animating => 11,
            OverlayError::Config(_) => 20,
            OverlayError::Io { .. } => 21,
            OverlayError::Executor(_) => 30,
        }
    }

    /// True for failures of an individual tile fetch.
    pub fn is_fetch_failure(&self) -> bool {
        (1..=4).contains(&self.code())
    }
}

impl From<serde_json::Error> for OverlayError {
    fn from(err: serde_json::Error) -> OverlayError {
        OverlayError::Config(err.to_string())
    }
}

/// A single failed fetch of one frame of one tile, as handed to the delegate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileFetchError {
    pub request: TileRequest,
    pub error: OverlayError,
}

impl TileFetchError {
    pub fn new(request: TileRequest, error: OverlayError) -> TileFetchError {
        TileFetchError { request, error }
    }

    pub fn domain(&self) -> &'static str {
        ERROR_DOMAIN
    }

    pub fn code(&self) -> i32 {
        self.error.code()
    }
}

impl Display for TileFetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "[{} {}] frame {} tile {:?}: {}",
            ERROR_DOMAIN,
            self.code(),
            self.request.frame_index,
            self.request.tile,
            self.error
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::tile_id::TileID;

    #[test]
    fn fetch_failures_are_classified() {
        let status = OverlayError::Status {
            url: "http://tiles/1/2/3.png".to_string(),
            status: 404,
        };
        assert!(status.is_fetch_failure());
        assert!(!OverlayError::Animating.is_fetch_failure());
        assert!(!OverlayError::Config("bad".to_string()).is_fetch_failure());
    }

    #[test]
    fn tile_fetch_error_carries_domain_code_and_description() {
        let request = TileRequest::new(
            "http://tiles/3/1/2.png".to_string(),
            2,
            TileID { x: 1, y: 2, z: 3 },
        );
        let err = TileFetchError::new(
            request,
            OverlayError::EmptyTile {
                url: "http://tiles/3/1/2.png".to_string(),
            },
        );

        assert_eq!(err.domain(), ERROR_DOMAIN);
        assert_eq!(err.code(), 3);
        let text = err.to_string();
        assert!(text.contains("frame 2"));
        assert!(text.contains("empty tile returned from http://tiles/3/1/2.png"));
    }

    #[test]
    fn json_errors_become_config_errors() {
        let err: OverlayError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert_eq!(err.code(), 20);
    }
}
