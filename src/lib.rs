//! Core library for the `vultr-cli` server management tool.
//!
//! The crate parses `server` subcommands, validates their flags into
//! immutable provider requests, sends each request through an
//! [`InstanceApi`] gateway and renders the result as plain text. The
//! [`VultrClient`] gateway speaks to the Vultr v2 API; tests substitute the
//! in-memory gateway from [`test_support`].

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod options;
pub mod printer;
pub mod request;
pub mod test_support;
pub mod user_data;
pub mod vultr;

pub use api::InstanceApi;
pub use commands::{CommandError, dispatch};
pub use config::{ConfigError, VultrConfig};
pub use options::{AmbiguousOptionsError, OsSource, OsSourceError};
pub use printer::Printer;
pub use request::{InstanceCreateRequest, RequestError};
pub use user_data::UserDataError;
pub use vultr::{VultrClient, VultrError};
