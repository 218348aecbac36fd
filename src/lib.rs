pub use error::AppError;

/// Main architecture layers (dependency flow: CLI → Core → Storage)
pub mod cli; // Command-line interface
pub mod core; // Session, report and retrieval sequencing
pub mod storage; // Job file loading

/// Support modules (used across layers)
pub mod api; // SOAP clients for the data and streaming services
pub mod error; // Error handling
pub mod utils; // Shared utilities and helpers

pub type Result<T> = std::result::Result<T, AppError>;
