// Parse Orchestrator and the HTTP surface that feeds it uploads.
// Parsing and rendering are CPU-bound and run inside tokio::task::spawn_blocking.

pub mod handlers;
pub mod orchestrator;

pub use orchestrator::ResumeParser;
