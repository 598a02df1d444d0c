//! Session engine for querylens: state machine and request orchestration.
//!
//! This crate holds the interactive core without any rendering:
//!
//! - [`Session`] - owns the document, its revision, and the latest results;
//!   decides which actions are allowed and which completions are stale
//! - [`Workbench`] - drives a session against a [`QueryService`] on tokio tasks
//! - [`QuerylensConfig`] - `~/.querylens/config.toml` loading
//!
//! [`QueryService`]: querylens_services::QueryService

mod config;
mod session;
mod workbench;

pub use config::{
    AppConfig, ConfigError, QuerylensConfig, SERVICE_URL_ENV, ServiceSection, config_path,
    expand_env_vars,
};
pub use session::{
    Completion, RequestKind, RequestTicket, Session, SessionState, SuggestFixRequest,
    ValidateRequest,
};
pub use workbench::{Workbench, WorkbenchEvent};
