//! Command-line interface definitions for the `vultr-cli` binary.
//!
//! This module centralises the clap parser structures so both the main binary
//! and the build script can reuse them when generating the manual page. It
//! must only depend on `clap` and `std` for that reason.
//!
//! The derive tree is the command table: every leaf declares its positional
//! arity and flags, and [`crate::commands::dispatch`] binds each leaf to one
//! handler.

use clap::{ArgAction, Args, Parser, Subcommand};

/// Default and maximum page size accepted by the list endpoints.
pub const DEFAULT_PER_PAGE: u32 = 25;

/// Default source for `server user-data set`.
pub const DEFAULT_USER_DATA_PATH: &str = "/dev/stdin";

/// Top-level CLI for the `vultr-cli` binary.
#[derive(Debug, Parser)]
#[command(
    name = "vultr-cli",
    version,
    about = "Manage Vultr server instances from the command line",
    arg_required_else_help = true
)]
pub struct Cli {
    /// Emit debug logs on standard error.
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
    /// Command group to run.
    #[command(subcommand)]
    pub command: RootCommand,
}

/// Root command groups.
#[derive(Debug, Subcommand)]
pub enum RootCommand {
    /// Commands to interact with servers on Vultr.
    #[command(subcommand)]
    Server(ServerCommand),
}

/// Positional instance identifier shared by most server commands.
#[derive(Clone, Debug, Args, Eq, PartialEq)]
pub struct InstanceArg {
    /// Identifier of the instance.
    #[arg(value_name = "INSTANCE_ID")]
    pub instance_id: String,
}

/// Paging flags shared by list commands.
#[derive(Clone, Debug, Args, Eq, PartialEq)]
pub struct PagingArgs {
    /// Cursor for paging.
    #[arg(long, short = 'c')]
    pub cursor: Option<String>,
    /// Number of items requested per page. Default and max are 25.
    #[arg(long, short = 'p', default_value_t = DEFAULT_PER_PAGE)]
    pub per_page: u32,
}

/// Subcommands of `vultr-cli server`.
#[derive(Debug, Subcommand)]
pub enum ServerCommand {
    /// Start a server.
    Start(InstanceArg),
    /// Stop a server.
    Stop(InstanceArg),
    /// Restart a server.
    Restart(InstanceArg),
    /// Reinstall a server.
    Reinstall(InstanceArg),
    /// Add or modify the tag on a server.
    Tag(TagArgs),
    /// Delete (destroy) a server.
    #[command(visible_alias = "destroy")]
    Delete(InstanceArg),
    /// Label a server.
    Label(LabelArgs),
    /// Show bandwidth usage for a server.
    Bandwidth(InstanceArg),
    /// List all available servers.
    #[command(visible_alias = "l")]
    List(PagingArgs),
    /// Get info about a specific server.
    Get(InstanceArg),
    /// Assign a firewall group to a server.
    UpdateFirewallGroup(FirewallGroupArgs),
    /// Restore a server from a backup or snapshot.
    Restore(RestoreArgs),
    /// Create a server instance.
    Create(Box<CreateArgs>),
    /// Update the operating system of a server.
    #[command(subcommand)]
    Os(OsCommand),
    /// Update the application of a server.
    #[command(subcommand)]
    App(AppCommand),
    /// Get and create backup schedules for a server.
    #[command(subcommand)]
    Backup(BackupCommand),
    /// Attach and detach ISOs on a server.
    #[command(subcommand)]
    Iso(IsoCommand),
    /// List, create and delete IPv4 addresses on a server.
    #[command(subcommand)]
    Ipv4(Ipv4Command),
    /// IPv6 addresses of a server.
    #[command(subcommand)]
    Ipv6(Ipv6Command),
    /// Upgrade the plan of a server.
    #[command(subcommand)]
    Plans(PlansCommand),
    /// Manage reverse DNS entries of a server.
    #[command(subcommand)]
    ReverseDns(ReverseDnsCommand),
    /// Get and set the user-data of a server.
    #[command(subcommand)]
    UserData(UserDataCommand),
}

/// Arguments for `server tag`.
#[derive(Clone, Debug, Args, Eq, PartialEq)]
pub struct TagArgs {
    /// Target instance.
    #[command(flatten)]
    pub instance: InstanceArg,
    /// Tag to set on the instance.
    #[arg(long, short = 't')]
    pub tag: String,
}

/// Arguments for `server label`.
#[derive(Clone, Debug, Args, Eq, PartialEq)]
pub struct LabelArgs {
    /// Target instance.
    #[command(flatten)]
    pub instance: InstanceArg,
    /// Label to set on the instance.
    #[arg(long, short = 'l')]
    pub label: String,
}

/// Arguments for `server update-firewall-group`.
#[derive(Clone, Debug, Args, Eq, PartialEq)]
pub struct FirewallGroupArgs {
    /// Instance to update.
    #[arg(long, short = 'i')]
    pub instance_id: String,
    /// Firewall group to assign. A value of 0 unsets the firewall group.
    #[arg(long, short = 'f')]
    pub firewall_group_id: String,
}

/// Arguments for `server restore`.
#[derive(Clone, Debug, Args, Eq, PartialEq)]
pub struct RestoreArgs {
    /// Target instance.
    #[command(flatten)]
    pub instance: InstanceArg,
    /// Backup to restore the instance from.
    #[arg(long, short = 'b')]
    pub backup: Option<String>,
    /// Snapshot to restore the instance from.
    #[arg(long, short = 's')]
    pub snapshot: Option<String>,
}

/// Arguments for `server create`.
#[derive(Clone, Debug, Args, Eq, PartialEq)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "each bool is an independent on/off command-line flag"
)]
pub struct CreateArgs {
    /// Region to create the instance in.
    #[arg(long, short = 'r')]
    pub region: String,
    /// Plan the instance should have.
    #[arg(long, short = 'p')]
    pub plan: String,
    /// Operating system id, used when no app, ISO or snapshot is given.
    #[arg(long, short = 'o')]
    pub os: Option<u32>,
    /// URL to chainload on boot when the custom operating system is selected.
    #[arg(long)]
    pub ipxe: Option<String>,
    /// ISO to create the instance with.
    #[arg(long)]
    pub iso: Option<String>,
    /// Snapshot to create the instance with.
    #[arg(long)]
    pub snapshot: Option<String>,
    /// Startup script id.
    #[arg(long)]
    pub script_id: Option<String>,
    /// Enable IPv6.
    #[arg(long, action = ArgAction::Set, num_args = 0..=1, default_value_t = false, default_missing_value = "true")]
    pub ipv6: bool,
    /// Enable private networking.
    #[arg(long, action = ArgAction::Set, num_args = 0..=1, default_value_t = false, default_missing_value = "true")]
    pub private_network: bool,
    /// Private network ids to attach (repeatable).
    #[arg(long = "network")]
    pub networks: Vec<String>,
    /// Label for the instance.
    #[arg(long, short = 'l')]
    pub label: Option<String>,
    /// SSH key ids to install (repeatable).
    #[arg(long, short = 's')]
    pub ssh_keys: Vec<String>,
    /// Enable automatic backups.
    #[arg(long, short = 'b', action = ArgAction::Set, num_args = 0..=1, default_value_t = false, default_missing_value = "true")]
    pub auto_backup: bool,
    /// Application id to install.
    #[arg(long, short = 'a')]
    pub app: Option<u32>,
    /// Base64 encoded user-data.
    #[arg(long, short = 'u')]
    pub userdata: Option<String>,
    /// Send an activation email when the server has been created.
    #[arg(long, short = 'n', action = ArgAction::Set, num_args = 0..=1, default_value_t = true, default_missing_value = "true")]
    pub notify: bool,
    /// Enable DDoS protection.
    #[arg(long, short = 'd', action = ArgAction::Set, num_args = 0..=1, default_value_t = false, default_missing_value = "true")]
    pub ddos: bool,
    /// Reserved IPv4 address to use as the main IP.
    #[arg(long)]
    pub reserved_ipv4: Option<String>,
    /// Hostname to assign.
    #[arg(long)]
    pub host: Option<String>,
    /// Tag to assign.
    #[arg(long, short = 't')]
    pub tag: Option<String>,
    /// Firewall group to assign.
    #[arg(long)]
    pub firewall_group: Option<String>,
}

/// Subcommands of `server os`.
#[derive(Debug, Subcommand)]
pub enum OsCommand {
    /// Change the operating system.
    Change(OsChangeArgs),
}

/// Arguments for `server os change`.
#[derive(Clone, Debug, Args, Eq, PartialEq)]
pub struct OsChangeArgs {
    /// Target instance.
    #[command(flatten)]
    pub instance: InstanceArg,
    /// Operating system id to switch to.
    #[arg(long, short = 'o')]
    pub os: u32,
}

/// Subcommands of `server app`.
#[derive(Debug, Subcommand)]
pub enum AppCommand {
    /// Change the application.
    Change(AppChangeArgs),
}

/// Arguments for `server app change`.
#[derive(Clone, Debug, Args, Eq, PartialEq)]
pub struct AppChangeArgs {
    /// Target instance.
    #[command(flatten)]
    pub instance: InstanceArg,
    /// Application id to switch to.
    #[arg(long, short = 'a')]
    pub app: u32,
}

/// Subcommands of `server backup`.
#[derive(Debug, Subcommand)]
pub enum BackupCommand {
    /// Get the backup schedule.
    Get(InstanceArg),
    /// Create a backup schedule.
    Create(BackupCreateArgs),
}

/// Arguments for `server backup create`.
#[derive(Clone, Debug, Args, Eq, PartialEq)]
pub struct BackupCreateArgs {
    /// Target instance.
    #[command(flatten)]
    pub instance: InstanceArg,
    /// Backup cron type: daily, weekly, monthly, `daily_alt_even` or
    /// `daily_alt_odd`.
    #[arg(long = "type", short = 't')]
    pub cron_type: String,
    /// Hour value (0-23).
    #[arg(long, short = 'o', default_value_t = 0)]
    pub hour: u32,
    /// Day-of-week value (0-6), used by weekly schedules.
    #[arg(long, short = 'w', default_value_t = 0)]
    pub dow: u32,
    /// Day-of-month value (1-28), used by monthly schedules.
    #[arg(long, short = 'm', default_value_t = 0)]
    pub dom: u32,
}

/// Subcommands of `server iso`.
#[derive(Debug, Subcommand)]
pub enum IsoCommand {
    /// Show the current ISO state.
    Status(InstanceArg),
    /// Attach an ISO.
    Attach(IsoAttachArgs),
    /// Detach the attached ISO.
    Detach(InstanceArg),
}

/// Arguments for `server iso attach`.
#[derive(Clone, Debug, Args, Eq, PartialEq)]
pub struct IsoAttachArgs {
    /// Target instance.
    #[command(flatten)]
    pub instance: InstanceArg,
    /// ISO to attach.
    #[arg(long, short = 'i')]
    pub iso_id: String,
}

/// Subcommands of `server ipv4`.
#[derive(Debug, Subcommand)]
pub enum Ipv4Command {
    /// List IPv4 addresses.
    #[command(visible_alias = "v4")]
    List(InstancePagingArgs),
    /// Add an IPv4 address.
    Create(Ipv4CreateArgs),
    /// Delete an IPv4 address.
    #[command(visible_alias = "destroy")]
    Delete(Ipv4DeleteArgs),
}

/// Instance id plus paging flags.
#[derive(Clone, Debug, Args, Eq, PartialEq)]
pub struct InstancePagingArgs {
    /// Target instance.
    #[command(flatten)]
    pub instance: InstanceArg,
    /// Paging flags.
    #[command(flatten)]
    pub paging: PagingArgs,
}

/// Arguments for `server ipv4 create`.
#[derive(Clone, Debug, Args, Eq, PartialEq)]
pub struct Ipv4CreateArgs {
    /// Target instance.
    #[command(flatten)]
    pub instance: InstanceArg,
    /// Reboot the server after adding the address.
    #[arg(long)]
    pub reboot: bool,
}

/// Arguments for `server ipv4 delete`.
#[derive(Clone, Debug, Args, Eq, PartialEq)]
pub struct Ipv4DeleteArgs {
    /// Target instance.
    #[command(flatten)]
    pub instance: InstanceArg,
    /// IPv4 address to delete.
    #[arg(long, short = 'i')]
    pub ipv4: String,
}

/// Subcommands of `server ipv6`.
#[derive(Debug, Subcommand)]
pub enum Ipv6Command {
    /// List IPv6 addresses.
    #[command(visible_alias = "v6")]
    List(InstancePagingArgs),
}

/// Subcommands of `server plans`.
#[derive(Debug, Subcommand)]
pub enum PlansCommand {
    /// Upgrade to another plan.
    Upgrade(PlanUpgradeArgs),
}

/// Arguments for `server plans upgrade`.
#[derive(Clone, Debug, Args, Eq, PartialEq)]
pub struct PlanUpgradeArgs {
    /// Target instance.
    #[command(flatten)]
    pub instance: InstanceArg,
    /// Plan to upgrade to.
    #[arg(long, short = 'p')]
    pub plan: String,
}

/// Subcommands of `server reverse-dns`.
#[derive(Debug, Subcommand)]
pub enum ReverseDnsCommand {
    /// Reset the reverse DNS entry of an IPv4 address to its default.
    DefaultIpv4(ReverseIpArgs),
    /// List the IPv6 reverse DNS entries.
    ListIpv6(InstanceArg),
    /// Remove the reverse DNS entry of an IPv6 address.
    #[command(visible_alias = "destroy-ipv6")]
    DeleteIpv6(ReverseIpArgs),
    /// Set the reverse DNS entry of an IPv4 address.
    SetIpv4(ReverseEntryArgs),
    /// Set the reverse DNS entry of an IPv6 address.
    SetIpv6(ReverseEntryArgs),
}

/// Instance id plus a single IP address.
#[derive(Clone, Debug, Args, Eq, PartialEq)]
pub struct ReverseIpArgs {
    /// Target instance.
    #[command(flatten)]
    pub instance: InstanceArg,
    /// IP address the entry belongs to.
    #[arg(long, short = 'i')]
    pub ip: String,
}

/// Instance id plus an IP address and its reverse DNS entry.
#[derive(Clone, Debug, Args, Eq, PartialEq)]
pub struct ReverseEntryArgs {
    /// Target instance.
    #[command(flatten)]
    pub instance: InstanceArg,
    /// IP address to set the reverse DNS entry on.
    #[arg(long, short = 'i')]
    pub ip: String,
    /// Reverse DNS entry.
    #[arg(long, short = 'e')]
    pub entry: String,
}

/// Subcommands of `server user-data`.
#[derive(Debug, Subcommand)]
pub enum UserDataCommand {
    /// Set the user-data from a file.
    Set(UserDataSetArgs),
    /// Get the user-data.
    Get(InstanceArg),
}

/// Arguments for `server user-data set`.
#[derive(Clone, Debug, Args, Eq, PartialEq)]
pub struct UserDataSetArgs {
    /// Target instance.
    #[command(flatten)]
    pub instance: InstanceArg,
    /// File to read user-data from (`-` reads standard input).
    #[arg(long, short = 'd', default_value = DEFAULT_USER_DATA_PATH)]
    pub userdata: String,
}
