use crate::error::{ApiError, StorageError};
use std::io;
use std::path::Path;

/// Map a reqwest failure onto ApiError with the operation it happened in
pub fn convert_request_error(error: reqwest::Error, endpoint: &str, timeout_secs: u64) -> ApiError {
    if error.is_timeout() {
        return convert_timeout_error(endpoint, timeout_secs);
    }
    if error.is_connect() || error.is_request() || error.is_body() {
        return ApiError::Transport {
            endpoint: endpoint.to_string(),
            message: error.to_string(),
        };
    }
    ApiError::Http {
        status: error.status().map(|s| s.as_u16()).unwrap_or(0),
        endpoint: endpoint.to_string(),
        message: error.to_string(),
    }
}

pub fn convert_timeout_error(endpoint: &str, timeout_secs: u64) -> ApiError {
    ApiError::Timeout {
        timeout_secs,
        endpoint: endpoint.to_string(),
    }
}

pub fn convert_io_error(error: io::Error, path: &Path) -> StorageError {
    StorageError::FileIo {
        path: path.to_string_lossy().to_string(),
        source: error,
    }
}
