use crate::animation::common::overlay_error::OverlayError;
use crate::config;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Describes an animated overlay: one URL template per animation frame plus
/// playback and fetch settings.
///
/// ```json
/// {
///   "template_urls": ["https://radar.example/t0/{z}/{x}/{y}.png",
///                     "https://radar.example/t1/{z}/{x}/{y}.png"],
///   "frame_duration_ms": 400,
///   "repeats": false,
///   "headers": { "Authorization": "Bearer ..." }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayConfig {
    pub template_urls: Vec<String>,
    #[serde(default = "default_frame_duration_ms")]
    pub frame_duration_ms: u64,
    #[serde(default = "default_repeats")]
    pub repeats: bool,
    #[serde(default = "default_min_zoom")]
    pub min_zoom: u32,
    #[serde(default = "default_max_zoom")]
    pub max_zoom: u32,
    #[serde(default = "default_fetch_workers")]
    pub fetch_workers: usize,
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

fn default_frame_duration_ms() -> u64 {
    config::DEFAULT_FRAME_DURATION_MS
}

fn default_repeats() -> bool {
    true
}

fn default_min_zoom() -> u32 {
    config::DEFAULT_MIN_ZOOM
}

fn default_max_zoom() -> u32 {
    config::DEFAULT_MAX_ZOOM
}

fn default_fetch_workers() -> usize {
    config::DEFAULT_FETCH_WORKERS
}

impl OverlayConfig {
    pub fn new(template_urls: Vec<String>) -> OverlayConfig {
        OverlayConfig {
            template_urls,
            frame_duration_ms: default_frame_duration_ms(),
            repeats: default_repeats(),
            min_zoom: default_min_zoom(),
            max_zoom: default_max_zoom(),
            fetch_workers: default_fetch_workers(),
            headers: HashMap::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<OverlayConfig, OverlayError> {
        let overlay_config: OverlayConfig = serde_json::from_str(json)?;
        overlay_config.validate()?;
        Ok(overlay_config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<OverlayConfig, OverlayError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|err| OverlayError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        OverlayConfig::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), OverlayError> {
        if self.template_urls.is_empty() {
            return Err(OverlayError::Config(
                "at least one frame template is required".to_string(),
            ));
        }
        for template in &self.template_urls {
            for placeholder in &["{x}", "{y}", "{z}"] {
                if !template.contains(placeholder) {
                    return Err(OverlayError::Config(format!(
                        "template {} is missing {}",
                        template, placeholder
                    )));
                }
            }
        }
        if self.frame_duration_ms == 0 {
            return Err(OverlayError::Config(
                "frame_duration_ms must be positive".to_string(),
            ));
        }
        if self.min_zoom > self.max_zoom {
            return Err(OverlayError::Config(format!(
                "min_zoom {} is above max_zoom {}",
                self.min_zoom, self.max_zoom
            )));
        }
        if self.fetch_workers == 0 {
            return Err(OverlayError::Config(
                "fetch_workers must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_millis(self.frame_duration_ms)
    }

    pub fn supports_zoom(&self, zoom: u32) -> bool {
        zoom >= self.min_zoom && zoom <= self.max_zoom
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TEMPLATE: &str = "https://radar.example/t0/{z}/{x}/{y}.png";

    #[test]
    fn fills_defaults() {
        let parsed = OverlayConfig::from_json(&format!(r#"{{"template_urls": ["{}"]}}"#, TEMPLATE))
            .unwrap();
        assert_eq!(parsed, OverlayConfig::new(vec![TEMPLATE.to_string()]));
        assert_eq!(
            parsed.frame_duration(),
            Duration::from_millis(config::DEFAULT_FRAME_DURATION_MS)
        );
        assert!(parsed.repeats);
    }

    #[test]
    fn reads_every_field() {
        let json = format!(
            r#"{{
                "template_urls": ["{t}", "{t}"],
                "frame_duration_ms": 250,
                "repeats": false,
                "min_zoom": 3,
                "max_zoom": 9,
                "fetch_workers": 8,
                "headers": {{"Authorization": "Bearer abc"}}
            }}"#,
            t = TEMPLATE
        );
        let parsed = OverlayConfig::from_json(&json).unwrap();
        assert_eq!(parsed.template_urls.len(), 2);
        assert_eq!(parsed.frame_duration(), Duration::from_millis(250));
        assert!(!parsed.repeats);
        assert!(parsed.supports_zoom(3));
        assert!(parsed.supports_zoom(9));
        assert!(!parsed.supports_zoom(10));
        assert_eq!(parsed.fetch_workers, 8);
        assert_eq!(parsed.headers["Authorization"], "Bearer abc");
    }

    #[test]
    fn rejects_bad_configs() {
        let mut empty = OverlayConfig::new(vec![]);
        assert!(empty.validate().is_err());

        empty.template_urls = vec!["https://radar.example/{z}/{x}.png".to_string()];
        match empty.validate() {
            Err(OverlayError::Config(msg)) => assert!(msg.contains("{y}")),
            other => panic!("unexpected {:?}", other),
        }

        let mut zero_duration = OverlayConfig::new(vec![TEMPLATE.to_string()]);
        zero_duration.frame_duration_ms = 0;
        assert!(zero_duration.validate().is_err());

        let mut inverted = OverlayConfig::new(vec![TEMPLATE.to_string()]);
        inverted.min_zoom = 10;
        inverted.max_zoom = 2;
        assert!(inverted.validate().is_err());

        let mut no_workers = OverlayConfig::new(vec![TEMPLATE.to_string()]);
        no_workers.fetch_workers = 0;
        assert!(no_workers.validate().is_err());
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        assert_eq!(OverlayConfig::from_json("{").unwrap_err().code(), 20);
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"template_urls": ["{}"], "repeats": false}}"#, TEMPLATE).unwrap();

        let parsed = OverlayConfig::load(file.path()).unwrap();
        assert!(!parsed.repeats);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = OverlayConfig::load(dir.path().join("missing.json")).unwrap_err();
        assert_eq!(err.code(), 21);
    }
}
