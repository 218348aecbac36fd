use crate::api::envelope::{SoapMessage, text_element};
use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::io::AsyncRead;

// Authentication models
#[derive(Clone)]
pub struct LogOnRequest {
    pub username: String,
    pub password: String,
    pub client_access_key: String,
    pub user_access_key: String,
}

impl fmt::Debug for LogOnRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogOnRequest")
            .field("username", &self.username)
            .field("password", &"*****")
            .field("client_access_key", &"*****")
            .field("user_access_key", &"*****")
            .finish()
    }
}

impl LogOnRequest {
    pub fn to_xml(&self) -> String {
        // Members are serialized in the alphabetical order the service contract declares
        [
            text_element("ClientAccessKey", &self.client_access_key),
            text_element("Password", &self.password),
            text_element("UserAccessKey", &self.user_access_key),
            text_element("UserName", &self.username),
        ]
        .concat()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextStatus {
    Ok,
    Error,
}

impl ContextStatus {
    fn parse(value: &str) -> Self {
        match value.trim() {
            "Ok" => ContextStatus::Ok,
            _ => ContextStatus::Error,
        }
    }
}

/// Session context returned by `LogOn`
#[derive(Debug, Clone, PartialEq)]
pub struct DataContext {
    pub status: ContextStatus,
    pub status_message: String,
    pub token: String,
    pub service_id: String,
    pub client_access_key: String,
    pub instance_key: String,
}

impl DataContext {
    pub fn is_ok(&self) -> bool {
        self.status == ContextStatus::Ok
    }

    pub fn from_message(message: &SoapMessage, endpoint: &str) -> Result<Self, ApiError> {
        let status = message
            .find("LogOnResult", "Status")
            .ok_or_else(|| ApiError::MalformedResponse {
                endpoint: endpoint.to_string(),
                message: "LogOnResult has no Status".to_string(),
            })?;
        let field = |name: &str| {
            message
                .find("LogOnResult", name)
                .unwrap_or_default()
                .to_string()
        };

        Ok(Self {
            status: ContextStatus::parse(status),
            status_message: field("StatusMessage"),
            token: field("Token"),
            service_id: field("ServiceId"),
            client_access_key: field("ClientAccessKey"),
            instance_key: field("InstanceKey"),
        })
    }

    pub fn to_xml(&self, element: &str) -> String {
        let status = match self.status {
            ContextStatus::Ok => "Ok",
            ContextStatus::Error => "Error",
        };
        format!(
            "<{element}>{}{}{}{}{}{}</{element}>",
            text_element("ClientAccessKey", &self.client_access_key),
            text_element("InstanceKey", &self.instance_key),
            text_element("ServiceId", &self.service_id),
            text_element("Status", status),
            text_element("StatusMessage", &self.status_message),
            text_element("Token", &self.token),
        )
    }
}

// Report models
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportParameter {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default = "default_data_type")]
    pub data_type: String,
    #[serde(default)]
    pub multi_valued: bool,
}

fn default_data_type() -> String {
    "xsdString".to_string()
}

impl ReportParameter {
    pub fn to_xml(&self) -> String {
        format!(
            "<ReportParameter>{}{}{}{}{}</ReportParameter>",
            text_element("DataType", &self.data_type),
            text_element("MultiValued", &self.multi_valued.to_string()),
            text_element("Name", &self.name),
            text_element("Required", &self.required.to_string()),
            text_element("Value", &self.value),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportRequest {
    report_path: String,
    parameters: Vec<ReportParameter>,
}

impl ReportRequest {
    pub fn new(report_path: impl Into<String>, parameters: Vec<ReportParameter>) -> Self {
        Self {
            report_path: report_path.into(),
            parameters,
        }
    }

    pub fn report_path(&self) -> &str {
        &self.report_path
    }

    pub fn parameters(&self) -> &[ReportParameter] {
        &self.parameters
    }

    pub fn to_xml(&self) -> String {
        let parameters: String = self.parameters.iter().map(ReportParameter::to_xml).collect();
        format!(
            "<request><ReportParameters>{}</ReportParameters>{}</request>",
            parameters,
            text_element("ReportPath", &self.report_path),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportRequestStatus {
    Success,
    Failure,
    Working,
}

impl ReportRequestStatus {
    fn parse(value: &str) -> Self {
        match value.trim() {
            "Success" => ReportRequestStatus::Success,
            "Working" => ReportRequestStatus::Working,
            _ => ReportRequestStatus::Failure,
        }
    }
}

/// Where a prepared report can be fetched from
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievalHandle {
    pub uri: String,
    pub report_key: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReportPayload {
    Inline(String),
    Handle(RetrievalHandle),
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportResponse {
    pub status: ReportRequestStatus,
    pub status_message: String,
    pub payload: ReportPayload,
}

impl ReportResponse {
    pub fn is_success(&self) -> bool {
        self.status == ReportRequestStatus::Success
    }

    /// Returns `None` when the body carries no `ExecuteReportResult`, which the
    /// service uses for a null response.
    pub fn from_message(message: &SoapMessage, endpoint: &str) -> Result<Option<Self>, ApiError> {
        if message.find("ExecuteReportResponse", "ExecuteReportResult").is_none() {
            return Ok(None);
        }
        let status = message
            .find("ExecuteReportResult", "Status")
            .ok_or_else(|| ApiError::MalformedResponse {
                endpoint: endpoint.to_string(),
                message: "ExecuteReportResult has no Status".to_string(),
            })?;
        let field = |name: &str| {
            message
                .find("ExecuteReportResult", name)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let payload = match (field("ReportRetrievalUri"), field("ReportKey")) {
            (Some(uri), Some(report_key)) => {
                ReportPayload::Handle(RetrievalHandle { uri, report_key })
            }
            _ => match message.find("ExecuteReportResult", "ReportContent") {
                Some(content) if !content.is_empty() => ReportPayload::Inline(content.to_string()),
                _ => ReportPayload::Empty,
            },
        };

        Ok(Some(Self {
            status: ReportRequestStatus::parse(status),
            status_message: field("StatusMessage").unwrap_or_default(),
            payload,
        }))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportResponseStatus {
    Success,
    Failed,
    Working,
}

impl ReportResponseStatus {
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "Success" => ReportResponseStatus::Success,
            "Working" => ReportResponseStatus::Working,
            _ => ReportResponseStatus::Failed,
        }
    }
}

impl fmt::Display for ReportResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ReportResponseStatus::Success => "Success",
            ReportResponseStatus::Failed => "Failed",
            ReportResponseStatus::Working => "Working",
        };
        f.write_str(label)
    }
}

pub type ReportStream = Box<dyn AsyncRead + Send + Unpin>;

/// Result of `RetrieveReport`; the stream is only readable while the streaming
/// connection that produced it is alive.
pub struct StreamReportResponse {
    pub status: ReportResponseStatus,
    pub status_message: String,
    pub stream: ReportStream,
}

impl fmt::Debug for StreamReportResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamReportResponse")
            .field("status", &self.status)
            .field("status_message", &self.status_message)
            .finish_non_exhaustive()
    }
}
