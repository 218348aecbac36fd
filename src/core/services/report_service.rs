use super::traits::DataService;
use crate::api::client::CallOptions;
use crate::api::models::{DataContext, ReportRequest, ReportResponse};
use crate::core::delimiter::{DELIMITER_HEADER, Delimiter};
use crate::error::ApiError;
use crate::utils::logging::Reporter;

/// Runs a report on the data service with the delimiter header attached
pub struct ReportExecutor<'a> {
    delimiter: Delimiter,
    reporter: &'a dyn Reporter,
}

impl<'a> ReportExecutor<'a> {
    pub fn new(delimiter: Delimiter, reporter: &'a dyn Reporter) -> Self {
        Self {
            delimiter,
            reporter,
        }
    }

    /// Options for the ExecuteReport call alone; nothing is set on the client
    pub fn call_options(&self) -> CallOptions {
        CallOptions::new().with_header(DELIMITER_HEADER, &self.delimiter.header_value())
    }

    pub async fn execute(
        &self,
        service: &mut dyn DataService,
        request: &ReportRequest,
        context: &DataContext,
    ) -> Result<Option<ReportResponse>, ApiError> {
        self.reporter.verbose(&format!(
            "Executing report {} with {} parameter(s), delimiter {}",
            request.report_path(),
            request.parameters().len(),
            self.delimiter
        ));
        let options = self.call_options();
        service.execute_report(request, context, &options).await
    }
}
