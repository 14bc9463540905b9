//! Handlers for `vultr-cli server` subcommands.
//!
//! [`dispatch`] binds each leaf of the parsed command tree to one handler.
//! Handlers validate their flags, build at most one request, make at most one
//! gateway call and render the outcome. Failures are returned as
//! [`CommandError`] so the binary decides how to report them.

mod instance;
mod network;
mod storage;

use std::io::{self, Write};

use thiserror::Error;
use tracing::info;

use crate::api::InstanceApi;
use crate::cli::ServerCommand;
use crate::printer::Printer;
use crate::request::RequestError;
use crate::user_data::UserDataError;

/// Errors surfaced by command handlers.
#[derive(Debug, Error)]
pub enum CommandError<E> {
    /// The gateway call failed.
    #[error("error {action} : {source}")]
    Remote {
        /// What the command was doing, for example `starting server`.
        action: &'static str,
        /// Gateway error.
        source: E,
    },
    /// Flags could not be turned into a request for the named action.
    #[error("error {action} : {source}")]
    Invalid {
        /// What the command was doing.
        action: &'static str,
        /// Validation failure.
        source: RequestError,
    },
    /// Flags were rejected before any action started.
    #[error(transparent)]
    Request(#[from] RequestError),
    /// The user-data file could not be read.
    #[error("error reading user-data : {0}")]
    UserData(#[from] UserDataError),
    /// Writing to the output failed.
    #[error("error writing output : {0}")]
    Output(#[from] io::Error),
}

/// Result of a single handler.
type Outcome<A> = Result<(), CommandError<<A as InstanceApi>::Error>>;

/// Builds the [`CommandError::Remote`] mapper for `action`.
fn remote<E>(action: &'static str) -> impl FnOnce(E) -> CommandError<E> {
    move |source| CommandError::Remote { action, source }
}

/// Runs `command` against `api`, rendering results to `out`.
///
/// # Errors
///
/// Returns [`CommandError`] when validation, local I/O, the gateway call or
/// output rendering fails.
pub async fn dispatch<A, W>(
    api: &A,
    command: ServerCommand,
    out: W,
) -> Result<(), CommandError<A::Error>>
where
    A: InstanceApi + Sync,
    W: Write,
{
    let printer = &mut Printer::new(out);
    match command {
        ServerCommand::Start(args) => instance::start(api, &args, printer).await,
        ServerCommand::Stop(args) => instance::stop(api, &args, printer).await,
        ServerCommand::Restart(args) => instance::restart(api, &args, printer).await,
        ServerCommand::Reinstall(args) => instance::reinstall(api, &args, printer).await,
        ServerCommand::Tag(args) => instance::tag(api, &args, printer).await,
        ServerCommand::Delete(args) => instance::delete(api, &args, printer).await,
        ServerCommand::Label(args) => instance::label(api, &args, printer).await,
        ServerCommand::Bandwidth(args) => instance::bandwidth(api, &args, printer).await,
        ServerCommand::List(args) => instance::list(api, &args, printer).await,
        ServerCommand::Get(args) => instance::get(api, &args, printer).await,
        ServerCommand::UpdateFirewallGroup(args) => {
            instance::update_firewall_group(api, &args, printer).await
        }
        ServerCommand::Restore(args) => instance::restore(api, &args, printer).await,
        ServerCommand::Create(args) => instance::create(api, &args, printer).await,
        ServerCommand::Os(command) => instance::os(api, command, printer).await,
        ServerCommand::App(command) => instance::app(api, command, printer).await,
        ServerCommand::Plans(command) => instance::plans(api, command, printer).await,
        ServerCommand::Backup(command) => storage::backup(api, command, printer).await,
        ServerCommand::Iso(command) => storage::iso(api, command, printer).await,
        ServerCommand::UserData(command) => storage::user_data(api, command, printer).await,
        ServerCommand::Ipv4(command) => network::ipv4(api, command, printer).await,
        ServerCommand::Ipv6(command) => network::ipv6(api, command, printer).await,
        ServerCommand::ReverseDns(command) => network::reverse_dns(api, command, printer).await,
    }
}

/// Writes a confirmation line and logs the completed action.
fn confirm<W: Write, E>(
    printer: &mut Printer<W>,
    action: &'static str,
    message: &str,
) -> Result<(), CommandError<E>> {
    info!(action, "command succeeded");
    printer.message(message)?;
    Ok(())
}

#[cfg(test)]
mod tests;
