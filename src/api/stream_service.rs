use crate::api::channel::{Channel, ChannelState};
use crate::api::client::{CallOptions, SoapClient};
use crate::api::envelope::Envelope;
use crate::api::models::{ReportResponseStatus, StreamReportResponse};
use crate::core::services::traits::{StreamConnector, StreamService};
use crate::error::{ApiError, ReportError};
use crate::utils::validation::validate_url;
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::io::Cursor;

pub const STREAM_SERVICE_NS: &str = "http://www.ultipro.com/dataservices/bistream/2";
const STREAM_SERVICE_CONTRACT: &str = "IBIStreamService";

/// Client for the streaming endpoint named in a report's retrieval handle
#[derive(Debug)]
pub struct BiStreamServiceClient {
    soap: SoapClient,
}

impl BiStreamServiceClient {
    pub fn new(retrieval_uri: &str, timeout_secs: u64) -> Result<Self, ApiError> {
        Ok(Self {
            soap: SoapClient::new(retrieval_uri, timeout_secs)?,
        })
    }

    fn retrieve_envelope(&self, report_key: &str) -> Envelope {
        let action = format!(
            "{}/{}/RetrieveReport",
            STREAM_SERVICE_NS, STREAM_SERVICE_CONTRACT
        );
        // The key travels as a message header, the body is an empty request element
        let key_header = format!(
            r#"<h:ReportKey xmlns:h="{ns}" xmlns="{ns}">{}</h:ReportKey>"#,
            quick_xml::escape::escape(report_key),
            ns = STREAM_SERVICE_NS
        );
        Envelope::new(&action, &self.soap.endpoint)
            .with_header(key_header)
            .with_body(format!(r#"<RetrieveReportRequest xmlns="{}"/>"#, STREAM_SERVICE_NS))
    }
}

#[async_trait]
impl StreamService for BiStreamServiceClient {
    async fn retrieve_report(
        &mut self,
        report_key: &str,
    ) -> Result<StreamReportResponse, ApiError> {
        let envelope = self.retrieve_envelope(report_key);
        let message = self
            .soap
            .call("RetrieveReport", &envelope, &CallOptions::default())
            .await?;

        let status = message
            .header("Status")
            .map(ReportResponseStatus::parse)
            .ok_or_else(|| ApiError::MalformedResponse {
                endpoint: "RetrieveReport".to_string(),
                message: "response has no Status header".to_string(),
            })?;
        let status_message = message
            .header("StatusMessage")
            .unwrap_or_default()
            .trim()
            .to_string();

        let content = match message.body("ReportStream") {
            Some(encoded) => {
                let compact: String = encoded.split_whitespace().collect();
                STANDARD
                    .decode(compact.as_bytes())
                    .map_err(|e| ApiError::MalformedResponse {
                        endpoint: "RetrieveReport".to_string(),
                        message: format!("ReportStream is not valid base64: {}", e),
                    })?
            }
            None if status == ReportResponseStatus::Success => {
                return Err(ApiError::MalformedResponse {
                    endpoint: "RetrieveReport".to_string(),
                    message: "successful response has no ReportStream".to_string(),
                });
            }
            None => Vec::new(),
        };

        Ok(StreamReportResponse {
            status,
            status_message,
            stream: Box::new(Cursor::new(content)),
        })
    }
}

impl Channel for BiStreamServiceClient {
    fn state(&self) -> ChannelState {
        self.soap.state()
    }

    fn close(&mut self) -> Result<(), ApiError> {
        self.soap.close()
    }

    fn abort(&mut self) {
        self.soap.abort()
    }
}

/// Opens one [`BiStreamServiceClient`] per retrieval URI
#[derive(Debug, Clone)]
pub struct HttpStreamConnector {
    timeout_secs: u64,
}

impl HttpStreamConnector {
    pub fn new(timeout_secs: u64) -> Self {
        Self { timeout_secs }
    }
}

impl StreamConnector for HttpStreamConnector {
    fn connect(&self, retrieval_uri: &str) -> crate::Result<Box<dyn StreamService>> {
        validate_url(retrieval_uri).map_err(|_| ReportError::InvalidRetrievalUri {
            uri: retrieval_uri.to_string(),
            reason: "URI must start with http:// or https://".to_string(),
        })?;
        let client = BiStreamServiceClient::new(retrieval_uri, self.timeout_secs)?;
        Ok(Box::new(client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn test_retrieve_envelope_puts_key_in_header() {
        let client = BiStreamServiceClient::new("http://stream.example.test/BiStreamingService", 30)
            .expect("client creation failed");
        let xml = client.retrieve_envelope("key&1").to_xml();

        let header_end = xml.find("</s:Header>").unwrap();
        let key_pos = xml.find("key&amp;1").unwrap();
        assert!(key_pos < header_end);
        assert!(xml.contains(
            "http://www.ultipro.com/dataservices/bistream/2/IBIStreamService/RetrieveReport"
        ));
        assert!(xml.contains("<RetrieveReportRequest"));
    }

    #[test]
    fn test_connector_rejects_non_http_uri() {
        let connector = HttpStreamConnector::new(30);
        let result = connector.connect("ftp://stream.example.test/report");
        assert!(matches!(
            result,
            Err(AppError::Report(ReportError::InvalidRetrievalUri { .. }))
        ));
    }

    #[test]
    fn test_connector_opens_fresh_channel() {
        let connector = HttpStreamConnector::new(30);
        let channel = connector
            .connect("https://stream.example.test/BiStreamingService")
            .expect("connect failed");
        assert_eq!(channel.state(), ChannelState::Open);
    }
}
