//! Report run sequencing
//!
//! ```text
//! log on ──► execute report ──► retrieve stream ──► write file
//!    │              │                  │
//!    └─ rejected    └─ rejected        └─ failed / working
//! ```
//!
//! Each stage runs only if the previous one succeeded. Whatever context LogOn
//! returned is handed back to LogOff, and both connections are always shut down.

use crate::api::channel::shutdown;
use crate::api::models::{DataContext, ReportPayload, ReportRequest};
use crate::core::auth::Credentials;
use crate::core::delimiter::Delimiter;
use crate::core::services::report_service::ReportExecutor;
use crate::core::services::retrieval_service::StreamRetrieval;
use crate::core::services::session_service::SessionManager;
use crate::core::services::traits::{DataService, StreamConnector};
use crate::core::services::types::{RetrievalOutcome, RunOutcome};
use crate::error::ReportError;
use crate::storage::config::Config;
use crate::utils::logging::Reporter;
use std::path::PathBuf;

/// Everything needed to run one report, independent of credentials
#[derive(Debug, Clone, PartialEq)]
pub struct ReportJob {
    pub request: ReportRequest,
    pub delimiter: Delimiter,
    pub output_path: PathBuf,
}

impl ReportJob {
    pub fn from_config(config: &Config) -> crate::Result<Self> {
        Ok(Self {
            request: config.report_request(),
            delimiter: config.delimiter()?,
            output_path: config.output_file.clone(),
        })
    }
}

pub struct ReportRunner<'a> {
    job: &'a ReportJob,
    connector: &'a dyn StreamConnector,
    reporter: &'a dyn Reporter,
}

impl<'a> ReportRunner<'a> {
    pub fn new(
        job: &'a ReportJob,
        connector: &'a dyn StreamConnector,
        reporter: &'a dyn Reporter,
    ) -> Self {
        Self {
            job,
            connector,
            reporter,
        }
    }

    /// Run the job. The data connection is shut down before this returns, on
    /// success and on error.
    pub async fn run(
        &self,
        data: &mut dyn DataService,
        credentials: &Credentials,
    ) -> crate::Result<RunOutcome> {
        let result = self.run_session(data, credentials).await;

        let outcome = shutdown(data);
        self.reporter
            .verbose(&format!("Data service connection shut down ({:?})", outcome));
        result
    }

    async fn run_session(
        &self,
        data: &mut dyn DataService,
        credentials: &Credentials,
    ) -> crate::Result<RunOutcome> {
        let sessions = SessionManager::new(self.reporter);
        let context = sessions.log_on(data, credentials).await?;

        let result = if context.is_ok() {
            self.run_report(data, &context).await
        } else {
            self.reporter.info(&context.status_message);
            Ok(RunOutcome::AuthenticationRejected {
                message: context.status_message.clone(),
            })
        };

        // Whatever context LogOn returned goes back to LogOff, rejected or not
        sessions.log_off(data, &context).await;
        result
    }

    async fn run_report(
        &self,
        data: &mut dyn DataService,
        context: &DataContext,
    ) -> crate::Result<RunOutcome> {
        let executor = ReportExecutor::new(self.job.delimiter, self.reporter);
        let response = executor.execute(data, &self.job.request, context).await?;

        let response = match response {
            Some(response) if response.is_success() => response,
            Some(response) => {
                self.reporter.info(&response.status_message);
                return Ok(RunOutcome::ReportRejected {
                    message: response.status_message,
                });
            }
            None => {
                let message = "No report response was returned".to_string();
                self.reporter.info(&message);
                return Ok(RunOutcome::ReportRejected { message });
            }
        };

        let retrieval = StreamRetrieval::new(self.connector, self.reporter, &self.job.output_path);
        let retrieved = match &response.payload {
            ReportPayload::Handle(handle) => retrieval.retrieve(handle).await?,
            ReportPayload::Inline(content) => retrieval.write_inline(content).await?,
            ReportPayload::Empty => return Err(ReportError::MissingRetrievalHandle.into()),
        };

        Ok(match retrieved {
            RetrievalOutcome::Written { path, bytes } => {
                self.reporter.info(&format!(
                    "Report saved to {} ({} bytes)",
                    path.display(),
                    bytes
                ));
                RunOutcome::Completed { path, bytes }
            }
            RetrievalOutcome::NotReady { status, message } => {
                RunOutcome::RetrievalIncomplete { status, message }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_from_default_config() {
        let job = ReportJob::from_config(&Config::default()).unwrap();
        assert_eq!(job.delimiter, Delimiter::COMMA);
        assert_eq!(job.output_path, PathBuf::from("Birthdays.csv"));
        assert_eq!(job.request.parameters().len(), 2);
    }

    #[test]
    fn test_job_rejects_bad_delimiter() {
        let config = Config {
            delimiter: "comma".to_string(),
            ..Config::default()
        };
        assert!(ReportJob::from_config(&config).is_err());
    }
}
