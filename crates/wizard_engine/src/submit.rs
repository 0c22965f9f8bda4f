use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::ACCEPT;
use reqwest::multipart::Form;
use serde::Deserialize;
use wizard_logging::{wizard_info, wizard_warn};

use crate::{FailureKind, ServerReply, SubmitError};

#[derive(Debug, Clone)]
pub struct SubmitSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_response_bytes: u64,
}

impl Default for SubmitSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_response_bytes: 64 * 1024,
        }
    }
}

#[async_trait::async_trait]
pub trait Submitter: Send + Sync {
    /// Posts the entries as multipart text fields and decodes the reply.
    async fn submit(
        &self,
        action: &str,
        entries: &[(String, String)],
    ) -> Result<ServerReply, SubmitError>;
}

#[derive(Debug, Deserialize)]
struct ReplyBody {
    message: String,
}

#[derive(Debug, Clone)]
pub struct ReqwestSubmitter {
    settings: SubmitSettings,
}

impl ReqwestSubmitter {
    pub fn new(settings: SubmitSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, SubmitError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| SubmitError::new(FailureKind::Network, err.to_string()))
    }
}

#[async_trait::async_trait]
impl Submitter for ReqwestSubmitter {
    async fn submit(
        &self,
        action: &str,
        entries: &[(String, String)],
    ) -> Result<ServerReply, SubmitError> {
        let url = reqwest::Url::parse(action)
            .map_err(|err| SubmitError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let client = self.build_client()?;

        let form = entries
            .iter()
            .fold(Form::new(), |form, (name, value)| {
                form.text(name.clone(), value.clone())
            });

        wizard_info!("Submitting {} fields to {}", entries.len(), url);
        let response = client
            .post(url)
            .header(ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            if body.len() as u64 + chunk.len() as u64 > self.settings.max_response_bytes {
                return Err(SubmitError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_response_bytes,
                        status: status.as_u16(),
                    },
                    "response too large",
                ));
            }
            body.extend_from_slice(&chunk);
        }

        let Some(message) = decode_message(&body) else {
            wizard_warn!(
                "Submission answered {} with {} bytes of non-JSON body",
                status,
                body.len()
            );
            return Err(SubmitError::new(
                FailureKind::MalformedResponse {
                    status: status.as_u16(),
                },
                "response body is not JSON with a message",
            ));
        };

        if status.is_success() {
            Ok(ServerReply::Accepted { message })
        } else {
            wizard_warn!("Submission rejected with {}", status);
            Ok(ServerReply::Rejected {
                status: status.as_u16(),
                message,
            })
        }
    }
}

fn decode_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ReplyBody>(body)
        .ok()
        .map(|reply| reply.message)
}

fn map_reqwest_error(err: reqwest::Error) -> SubmitError {
    if err.is_timeout() {
        return SubmitError::new(FailureKind::Timeout, err.to_string());
    }
    SubmitError::new(FailureKind::Network, err.to_string())
}
