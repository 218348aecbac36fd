use super::traits::{StreamConnector, StreamService};
use super::types::RetrievalOutcome;
use crate::api::channel::shutdown;
use crate::api::models::{ReportResponseStatus, RetrievalHandle};
use crate::utils::file::{copy_stream_to_file, write_report_file};
use crate::utils::logging::Reporter;
use std::path::Path;

/// Fetches a prepared report and writes it to the output file
pub struct StreamRetrieval<'a> {
    connector: &'a dyn StreamConnector,
    reporter: &'a dyn Reporter,
    output_path: &'a Path,
}

impl<'a> StreamRetrieval<'a> {
    pub fn new(
        connector: &'a dyn StreamConnector,
        reporter: &'a dyn Reporter,
        output_path: &'a Path,
    ) -> Self {
        Self {
            connector,
            reporter,
            output_path,
        }
    }

    /// Opens a new connection at the handle's URI; the connection is shut down
    /// before returning, whatever the result.
    pub async fn retrieve(&self, handle: &RetrievalHandle) -> crate::Result<RetrievalOutcome> {
        self.reporter
            .verbose(&format!("Connecting to streaming service at {}", handle.uri));
        let mut channel = self.connector.connect(&handle.uri)?;

        let result = self.fetch(channel.as_mut(), &handle.report_key).await;

        let outcome = shutdown(channel.as_mut());
        self.reporter
            .verbose(&format!("Streaming connection shut down ({:?})", outcome));
        result
    }

    async fn fetch(
        &self,
        channel: &mut dyn StreamService,
        report_key: &str,
    ) -> crate::Result<RetrievalOutcome> {
        let mut response = channel.retrieve_report(report_key).await?;

        match response.status {
            ReportResponseStatus::Success => {
                let bytes = copy_stream_to_file(&mut response.stream, self.output_path).await?;
                Ok(RetrievalOutcome::Written {
                    path: self.output_path.to_path_buf(),
                    bytes,
                })
            }
            ReportResponseStatus::Failed => {
                self.reporter.info(&format!(
                    "Failed to retrieve report due to \"{}\"",
                    response.status_message
                ));
                Ok(RetrievalOutcome::NotReady {
                    status: response.status,
                    message: response.status_message,
                })
            }
            ReportResponseStatus::Working => {
                // No polling: the report has to be fetched again by a later run
                self.reporter.info(&format!(
                    "Working to retrieve report due to \"{}\"",
                    response.status_message
                ));
                Ok(RetrievalOutcome::NotReady {
                    status: response.status,
                    message: response.status_message,
                })
            }
        }
    }

    /// Content returned directly by ExecuteReport needs no streaming connection
    pub async fn write_inline(&self, content: &str) -> crate::Result<RetrievalOutcome> {
        self.reporter.verbose("Report content returned inline");
        let bytes = write_report_file(self.output_path, content.as_bytes()).await?;
        Ok(RetrievalOutcome::Written {
            path: self.output_path.to_path_buf(),
            bytes,
        })
    }
}
