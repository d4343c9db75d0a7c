pub mod email_resolver;
pub mod extract;
pub mod fingerprint;
pub mod handlers;
pub mod models;
pub mod orchestrator;
pub mod prompts;
pub mod response;
pub mod validation;
