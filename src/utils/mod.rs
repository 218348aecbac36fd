//! Utils module - Shared utilities and helpers
//!
//! This module provides utility functions and helpers that are used across
//! multiple layers of the application architecture.

/// Error conversion helpers
pub mod error_helpers;

/// Report output file handling and chunked copy
pub mod file;

/// Output sink for diagnostics
pub mod logging;

/// Input validation utilities
pub mod validation;
