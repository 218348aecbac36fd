use super::traits::DataService;
use crate::api::models::DataContext;
use crate::core::auth::Credentials;
use crate::error::ApiError;
use crate::utils::logging::Reporter;

/// Opens and closes the data service session
pub struct SessionManager<'a> {
    reporter: &'a dyn Reporter,
}

impl<'a> SessionManager<'a> {
    pub fn new(reporter: &'a dyn Reporter) -> Self {
        Self { reporter }
    }

    /// Transport failures are errors; a rejected login comes back as a context
    /// with `Error` status and must be checked by the caller.
    pub async fn log_on(
        &self,
        service: &mut dyn DataService,
        credentials: &Credentials,
    ) -> Result<DataContext, ApiError> {
        self.reporter
            .verbose(&format!("Logging on as {}", credentials.username));
        let context = service.log_on(&credentials.to_log_on_request()).await?;

        if context.is_ok() {
            self.reporter.verbose("Session established");
        } else {
            self.reporter
                .verbose(&format!("Log on rejected: {}", context.status_message));
        }
        Ok(context)
    }

    /// Best-effort; a failure is reported and swallowed
    pub async fn log_off(&self, service: &mut dyn DataService, context: &DataContext) {
        match service.log_off(context).await {
            Ok(()) => self.reporter.verbose("Logged off"),
            Err(e) => self.reporter.warn(&format!("Log off failed: {}", e)),
        }
    }
}
