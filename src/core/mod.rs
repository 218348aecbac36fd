/// Command line credentials
pub mod auth;

/// `US-DELIMITER` values
pub mod delimiter;

/// Session, report and retrieval sequencing
pub mod pipeline;

/// Session, report and stream services
pub mod services;
