use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tokgrab_logging::grab_debug;

use crate::wire::parse_response;
use crate::{ConvertError, ConvertOutput, FailureKind};

pub const DEFAULT_ENDPOINT: &str = "http://api.pdwteam.com/v1/convert";

#[derive(Debug, Clone)]
pub struct ConvertSettings {
    pub endpoint: String,
    /// `None` leaves connection set-up to the transport's own behaviour.
    pub connect_timeout: Option<Duration>,
    /// `None` waits for the service indefinitely.
    pub request_timeout: Option<Duration>,
    pub max_bytes: u64,
}

impl Default for ConvertSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: None,
            request_timeout: None,
            max_bytes: 2 * 1024 * 1024,
        }
    }
}

#[async_trait::async_trait]
pub trait Converter: Send + Sync {
    async fn convert(&self, url: &str) -> Result<ConvertOutput, ConvertError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestConverter {
    settings: ConvertSettings,
    client: reqwest::Client,
}

impl ReqwestConverter {
    pub fn new(settings: ConvertSettings) -> Result<Self, ConvertError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ConvertError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }
}

#[async_trait::async_trait]
impl Converter for ReqwestConverter {
    async fn convert(&self, url: &str) -> Result<ConvertOutput, ConvertError> {
        let endpoint = reqwest::Url::parse(&self.settings.endpoint)
            .map_err(|err| ConvertError::new(FailureKind::InvalidEndpoint, err.to_string()))?;
        let payload = serde_json::to_vec(&serde_json::json!({ "url": url }))
            .map_err(|err| ConvertError::new(FailureKind::MalformedBody, err.to_string()))?;

        grab_debug!("POST {} url_len={}", endpoint, url.len());
        let response = self
            .client
            .post(endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConvertError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(ConvertError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(ConvertError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            body.extend_from_slice(&chunk);
        }

        grab_debug!("received {} bytes from {}", body.len(), self.settings.endpoint);
        parse_response(&body)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ConvertError {
    if err.is_timeout() {
        return ConvertError::new(FailureKind::Timeout, err.to_string());
    }
    ConvertError::new(FailureKind::Network, err.to_string())
}
