use crate::api::data_service::BiDataServiceClient;
use crate::api::stream_service::HttpStreamConnector;
use crate::core::auth::Credentials;
use crate::core::pipeline::{ReportJob, ReportRunner};
use crate::core::services::types::RunOutcome;
use crate::error::AppError;
use crate::storage::config::Config;
use crate::utils::logging::Reporter;
use std::sync::Arc;

pub struct Dispatcher {
    config: Config,
    reporter: Arc<dyn Reporter>,
}

impl Dispatcher {
    pub fn new(config: Config, reporter: Arc<dyn Reporter>) -> Self {
        Self { config, reporter }
    }

    /// Validate inputs, then run the configured report against the HTTP services
    pub async fn dispatch(&self, credentials: Credentials) -> Result<RunOutcome, AppError> {
        credentials.validate()?;
        let job = ReportJob::from_config(&self.config)?;

        self.reporter.verbose(&format!(
            "Using data service {} (timeout {}s)",
            self.config.data_service_url, self.config.timeout_seconds
        ));

        let mut data =
            BiDataServiceClient::new(&self.config.data_service_url, self.config.timeout_seconds)?;
        let connector = HttpStreamConnector::new(self.config.timeout_seconds);

        ReportRunner::new(&job, &connector, self.reporter.as_ref())
            .run(&mut data, &credentials)
            .await
    }

    pub fn report_error(&self, error: &AppError) {
        self.reporter.error(&format!(
            "[{}] {}",
            error.severity().label(),
            error.display_friendly()
        ));
        if let Some(hint) = error.troubleshooting_hint() {
            self.reporter.info(&format!("Hint: {}", hint));
        }
        self.reporter.verbose(&format!("{:?}", error));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use crate::utils::logging::{Level, MemoryReporter};

    fn create_test_dispatcher(reporter: Arc<MemoryReporter>) -> Dispatcher {
        let config = Config {
            // Nothing listens here; tests below must fail before any request
            data_service_url: "http://127.0.0.1:9/services/BiDataService".to_string(),
            ..Config::default()
        };
        Dispatcher::new(config, reporter)
    }

    #[tokio::test]
    async fn test_blank_credentials_rejected_before_network() {
        let reporter = Arc::new(MemoryReporter::new());
        let dispatcher = create_test_dispatcher(reporter.clone());

        let result = dispatcher
            .dispatch(Credentials::new("jdoe", "", "CAK", "UAK"))
            .await;

        assert!(matches!(
            result,
            Err(AppError::Cli(CliError::InvalidArguments(_)))
        ));
        assert!(!reporter.contains("Using data service"));
    }

    #[tokio::test]
    async fn test_invalid_delimiter_rejected_before_network() {
        let reporter = Arc::new(MemoryReporter::new());
        let config = Config {
            delimiter: "  ".to_string(),
            ..Config::default()
        };
        let dispatcher = Dispatcher::new(config, reporter.clone());

        let result = dispatcher
            .dispatch(Credentials::new("jdoe", "pw", "CAK", "UAK"))
            .await;
        assert!(matches!(result, Err(AppError::Config(_))));
        assert!(reporter.lines().is_empty());
    }

    #[test]
    fn test_report_error_prints_hint() {
        let reporter = Arc::new(MemoryReporter::new());
        let dispatcher = create_test_dispatcher(reporter.clone());

        dispatcher.report_error(&AppError::Api(crate::error::ApiError::Timeout {
            timeout_secs: 60,
            endpoint: "ExecuteReport".to_string(),
        }));

        let errors = reporter.messages(Level::Error);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("[WARNING]"));
        assert!(reporter.contains("Hint: Check your network connection"));
    }
}
