use crate::api::channel::Channel;
use crate::api::client::CallOptions;
use crate::api::models::{
    DataContext, LogOnRequest, ReportRequest, ReportResponse, StreamReportResponse,
};
use crate::error::ApiError;
use async_trait::async_trait;

/// Operations offered by the BI data service over one connection
#[async_trait]
pub trait DataService: Channel + Send {
    /// A rejected login is returned as a context with `Error` status, not as `Err`
    async fn log_on(&mut self, request: &LogOnRequest) -> Result<DataContext, ApiError>;

    async fn log_off(&mut self, context: &DataContext) -> Result<(), ApiError>;

    /// `options` apply to this call only
    async fn execute_report(
        &mut self,
        request: &ReportRequest,
        context: &DataContext,
        options: &CallOptions,
    ) -> Result<Option<ReportResponse>, ApiError>;
}

/// The streaming endpoint handed out per report
#[async_trait]
pub trait StreamService: Channel + Send {
    async fn retrieve_report(&mut self, report_key: &str)
    -> Result<StreamReportResponse, ApiError>;
}

/// Opens a fresh streaming connection for a retrieval URI
pub trait StreamConnector: Send + Sync {
    fn connect(&self, retrieval_uri: &str) -> crate::Result<Box<dyn StreamService>>;
}
