pub mod report_service;
pub mod retrieval_service;
pub mod session_service;
pub mod traits;
pub mod types;
