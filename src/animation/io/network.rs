use crate::animation::common::overlay_error::OverlayError;
use crate::animation::common::task::TaskReturn;
use crate::animation::io::resource::TileLoader;
use crate::config;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::collections::HashMap;
use std::time::Duration;

/// HTTP tile loader. No retries: a failed request is reported once.
pub struct Network {
    client: Client,
}

impl Network {
    pub fn new(headers: &HashMap<String, String>) -> Result<Network, OverlayError> {
        let mut header_map = HeaderMap::new();
        for (name, value) in headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|err| OverlayError::Config(format!("header {}: {}", name, err)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|err| OverlayError::Config(format!("header {}: {}", name, err)))?;
            header_map.insert(name, value);
        }

        let client = Client::builder()
            .default_headers(header_map)
            .timeout(Duration::from_secs(config::REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|err| OverlayError::Config(err.to_string()))?;

        Ok(Network { client })
    }
}

impl TileLoader for Network {
    fn load(&self, url: &str) -> TaskReturn {
        let network_error = |err: reqwest::Error| OverlayError::Network {
            url: url.to_owned(),
            message: err.to_string(),
        };

        let response = self.client.get(url).send().map_err(network_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(OverlayError::Status {
                url: url.to_owned(),
                status: status.as_u16(),
            });
        }

        let data = response.bytes().map_err(network_error)?;
        if data.is_empty() {
            Ok(None)
        } else {
            Ok(Some(data.to_vec()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_header_names() {
        let mut headers = HashMap::new();
        headers.insert("bad header".to_string(), "value".to_string());
        match Network::new(&headers) {
            Err(OverlayError::Config(msg)) => assert!(msg.contains("bad header")),
            _ => panic!("expected a config error"),
        }
    }

    #[test]
    fn accepts_auth_headers() {
        let mut headers = HashMap::new();
        headers.insert("Authorization".to_string(), "Bearer token".to_string());
        assert!(Network::new(&headers).is_ok());
    }
}
