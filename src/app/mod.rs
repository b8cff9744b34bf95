pub mod api;
pub mod cli;
pub mod commands;
mod context;
pub mod publication;

pub use context::AppContext;
pub use publication::PublicationWorkflow;
