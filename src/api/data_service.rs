use crate::api::channel::{Channel, ChannelState};
use crate::api::client::{CallOptions, SoapClient};
use crate::api::envelope::Envelope;
use crate::api::models::{DataContext, LogOnRequest, ReportRequest, ReportResponse};
use crate::core::services::traits::DataService;
use crate::error::ApiError;
use async_trait::async_trait;

pub const DATA_SERVICE_NS: &str = "http://www.ultipro.com/dataservices/bidata/2";
const DATA_SERVICE_CONTRACT: &str = "IBIDataService";
const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Client for the BI data service (log on, execute report, log off)
#[derive(Debug)]
pub struct BiDataServiceClient {
    soap: SoapClient,
}

impl BiDataServiceClient {
    pub fn new(endpoint: &str, timeout_secs: u64) -> Result<Self, ApiError> {
        Ok(Self {
            soap: SoapClient::new(endpoint, timeout_secs)?,
        })
    }

    fn envelope(&self, operation: &str, body: String) -> Envelope {
        let action = format!("{}/{}/{}", DATA_SERVICE_NS, DATA_SERVICE_CONTRACT, operation);
        Envelope::new(&action, &self.soap.endpoint).with_body(body)
    }
}

#[async_trait]
impl DataService for BiDataServiceClient {
    async fn log_on(&mut self, request: &LogOnRequest) -> Result<DataContext, ApiError> {
        let body = format!(
            r#"<LogOn xmlns="{}"><logOnRequest xmlns:i="{}">{}</logOnRequest></LogOn>"#,
            DATA_SERVICE_NS,
            XSI_NS,
            request.to_xml()
        );
        let envelope = self.envelope("LogOn", body);
        let message = self
            .soap
            .call("LogOn", &envelope, &CallOptions::default())
            .await?;
        DataContext::from_message(&message, "LogOn")
    }

    async fn log_off(&mut self, context: &DataContext) -> Result<(), ApiError> {
        let body = format!(
            r#"<LogOff xmlns="{}">{}</LogOff>"#,
            DATA_SERVICE_NS,
            context.to_xml("context")
        );
        let envelope = self.envelope("LogOff", body);
        self.soap
            .call("LogOff", &envelope, &CallOptions::default())
            .await?;
        Ok(())
    }

    async fn execute_report(
        &mut self,
        request: &ReportRequest,
        context: &DataContext,
        options: &CallOptions,
    ) -> Result<Option<ReportResponse>, ApiError> {
        let body = format!(
            r#"<ExecuteReport xmlns="{}">{}{}</ExecuteReport>"#,
            DATA_SERVICE_NS,
            request.to_xml(),
            context.to_xml("context")
        );
        let envelope = self.envelope("ExecuteReport", body);
        let message = self.soap.call("ExecuteReport", &envelope, options).await?;
        ReportResponse::from_message(&message, "ExecuteReport")
    }
}

impl Channel for BiDataServiceClient {
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
