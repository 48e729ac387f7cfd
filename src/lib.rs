pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod observability;
pub mod pipeline;
pub mod types;

// Layered boundaries: use cases and the adapters behind their ports
pub mod app;
pub mod infra;
