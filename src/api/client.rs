use crate::api::channel::{Channel, ChannelState};
use crate::api::envelope::{Envelope, SoapMessage};
use crate::error::ApiError;
use crate::utils::error_helpers::convert_request_error;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
const USER_AGENT: &str = concat!("bids-report/", env!("CARGO_PKG_VERSION"));

/// Extra transport metadata attached to exactly one outgoing call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallOptions {
    headers: Vec<(String, String)>,
}

impl CallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }
}

/// SOAP-over-HTTP channel bound to a single service endpoint
#[derive(Debug)]
pub struct SoapClient {
    client: Client,
    pub endpoint: String,
    timeout_secs: u64,
    state: ChannelState,
}

impl SoapClient {
    pub fn new(endpoint: &str, timeout_secs: u64) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::Http {
                status: 0,
                endpoint: "client_init".to_string(),
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(SoapClient {
            client,
            endpoint: endpoint.to_string(),
            timeout_secs,
            state: ChannelState::Open,
        })
    }

    /// Send one envelope and parse the reply.
    ///
    /// Only transport failures fault the channel; a SOAP fault or an HTTP error
    /// status still came over a working connection. A faulted channel keeps
    /// accepting calls so a session can be logged off, only a closed one refuses.
    pub async fn call(
        &mut self,
        operation: &str,
        envelope: &Envelope,
        options: &CallOptions,
    ) -> Result<SoapMessage, ApiError> {
        if self.state == ChannelState::Closed {
            return Err(ApiError::ChannelUnavailable {
                endpoint: self.endpoint.clone(),
                state: self.state.to_string(),
            });
        }

        let result = self.exchange(operation, envelope, options).await;
        if let Err(ApiError::Transport { .. } | ApiError::Timeout { .. }) = &result {
            self.state = ChannelState::Faulted;
        }
        result
    }

    async fn exchange(
        &self,
        operation: &str,
        envelope: &Envelope,
        options: &CallOptions,
    ) -> Result<SoapMessage, ApiError> {
        log::debug!("POST {} ({})", self.endpoint, envelope.action());

        let mut request = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, envelope.content_type())
            .body(envelope.to_xml());
        for (name, value) in options.headers() {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request
            .send()
            .await
            .map_err(|e| convert_request_error(e, operation, self.timeout_secs))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| convert_request_error(e, operation, self.timeout_secs))?;

        if status.is_success() {
            let message = SoapMessage::parse(&text, operation)?;
            if let Some(fault) = message.fault() {
                return Err(ApiError::SoapFault {
                    endpoint: operation.to_string(),
                    code: fault.code,
                    reason: fault.reason,
                });
            }
            return Ok(message);
        }

        // Faults arrive with a 500 status; anything else is a plain HTTP failure
        if let Some(fault) = SoapMessage::parse(&text, operation)
            .ok()
            .and_then(|message| message.fault())
        {
            return Err(ApiError::SoapFault {
                endpoint: operation.to_string(),
                code: fault.code,
                reason: fault.reason,
            });
        }

        match status.as_u16() {
            408 | 504 => Err(ApiError::Timeout {
                timeout_secs: self.timeout_secs,
                endpoint: operation.to_string(),
            }),
            code => Err(ApiError::Http {
                status: code,
                endpoint: operation.to_string(),
                message: if text.is_empty() {
                    status.canonical_reason().unwrap_or("Unknown error").to_string()
                } else {
                    text
                },
            }),
        }
    }
}

impl Channel for SoapClient {
    fn state(&self) -> ChannelState {
        self.state
    }

    fn close(&mut self) -> Result<(), ApiError> {
        match self.state {
            ChannelState::Open | ChannelState::Closed => {
                log::debug!("Closing channel to {}", self.endpoint);
                self.state = ChannelState::Closed;
                Ok(())
            }
            ChannelState::Faulted => Err(ApiError::ChannelUnavailable {
                endpoint: self.endpoint.clone(),
                state: self.state.to_string(),
            }),
        }
    }

    fn abort(&mut self) {
        log::debug!("Aborting channel to {}", self.endpoint);
        self.state = ChannelState::Closed;
    }
}
