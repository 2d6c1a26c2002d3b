// Application processing: orchestration of extraction, parsing, scoring,
// persistence and notification for submitted applications.
// Collaborators sit behind async traits and are injected from main.

pub mod handlers;
pub mod notify;
pub mod orchestrator;
pub mod requirements;
pub mod resume_url;
pub mod retry;
pub mod store;


pub use orchestrator::{ApplicationOrchestrator, ProcessingError};
