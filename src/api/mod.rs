//! API layer - SOAP clients for the BI data and streaming services

/// Connection states and the close-or-abort shutdown
pub mod channel;

/// SOAP-over-HTTP transport with per-call options
pub mod client;

/// BI data service client (LogOn, ExecuteReport, LogOff)
pub mod data_service;

/// Envelope construction and response parsing
pub mod envelope;

/// Request and response models
pub mod models;

/// BI streaming service client and connector
pub mod stream_service;
