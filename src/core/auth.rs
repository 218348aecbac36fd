use crate::api::models::LogOnRequest;
use crate::error::AppError;
use crate::utils::validation::validate_required;
use std::fmt;

/// Log-on credentials as given on the command line
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub client_access_key: String,
    pub user_access_key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"*****")
            .field("client_access_key", &"*****")
            .field("user_access_key", &"*****")
            .finish()
    }
}

impl Credentials {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        client_access_key: impl Into<String>,
        user_access_key: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            client_access_key: client_access_key.into(),
            user_access_key: user_access_key.into(),
        }
    }

    /// Validate that no credential is blank
    pub fn validate(&self) -> Result<(), AppError> {
        validate_required("Username", &self.username)?;
        validate_required("Password", &self.password)?;
        validate_required("Client access key", &self.client_access_key)?;
        validate_required("User access key", &self.user_access_key)?;
        Ok(())
    }

    pub fn to_log_on_request(&self) -> LogOnRequest {
        LogOnRequest {
            username: self.username.clone(),
            password: self.password.clone(),
            client_access_key: self.client_access_key.clone(),
            user_access_key: self.user_access_key.clone(),
        }
    }
}
