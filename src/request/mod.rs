//! Request records sent to the instance API.
//!
//! Builders in this module turn parsed flags into immutable, serialisable
//! requests. Each record feeds exactly one gateway call. Optional values that
//! were not provided are omitted from the JSON body entirely.

use serde::Serialize;
use thiserror::Error;

use crate::cli::{BackupCreateArgs, CreateArgs, PagingArgs, RestoreArgs, ReverseEntryArgs};
use crate::options::{OsSource, OsSourceError, non_empty, resolve_exclusive, resolve_os_source};

/// Errors raised while turning flags into a request, before any API call.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum RequestError {
    /// The operating system source could not be resolved.
    #[error(transparent)]
    OsSource(#[from] OsSourceError),
    /// Neither a backup nor a snapshot was given to restore from.
    #[error("at least one flag must be provided (snapshot or backup)")]
    RestoreSourceMissing,
    /// Both a backup and a snapshot were given to restore from.
    #[error("one flag must be provided not both (snapshot or backup)")]
    RestoreSourceConflict,
}

/// Whether automatic backups are enabled on a new instance.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackupsSetting {
    /// Automatic backups on.
    Enabled,
    /// Automatic backups off.
    #[default]
    Disabled,
}

impl From<bool> for BackupsSetting {
    fn from(value: bool) -> Self {
        if value { Self::Enabled } else { Self::Disabled }
    }
}

/// Body of an instance creation call.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "the API models these instance features as independent boolean fields"
)]
pub struct InstanceCreateRequest {
    /// Region to create the instance in.
    pub region: String,
    /// Plan of the instance.
    pub plan: String,
    /// How the operating system is provisioned. Not sent; it determines
    /// `os_id` and which image field is populated.
    #[serde(skip)]
    pub os_source: OsSource,
    /// Operating system id derived from [`Self::os_source`].
    pub os_id: u32,
    /// Application id, only set for application sources.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<u32>,
    /// ISO id, only set for ISO sources.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iso_id: Option<String>,
    /// Snapshot id, only set for snapshot sources.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_id: Option<String>,
    /// iPXE chainload URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipxe_chain_url: Option<String>,
    /// Startup script id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script_id: Option<String>,
    /// Enable IPv6.
    pub enable_ipv6: bool,
    /// Enable private networking.
    pub enable_private_network: bool,
    /// Private networks to attach.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attach_private_network: Vec<String>,
    /// Label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// SSH keys to install.
    #[serde(rename = "sshkey_id", skip_serializing_if = "Vec::is_empty")]
    pub ssh_keys: Vec<String>,
    /// Automatic backups.
    pub backups: BackupsSetting,
    /// Base64 encoded user-data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_data: Option<String>,
    /// Enable DDoS protection.
    pub ddos_protection: bool,
    /// Send an activation email.
    pub activation_email: bool,
    /// Reserved IPv4 address used as the main IP.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reserved_ipv4: Option<String>,
    /// Hostname.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    /// Tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Firewall group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firewall_group_id: Option<String>,
}

fn owned_non_empty(value: Option<&String>) -> Option<String> {
    non_empty(value.map(String::as_str)).map(str::to_owned)
}

impl InstanceCreateRequest {
    /// Builds a creation request from `server create` flags.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::OsSource`] when the operating system source is
    /// ambiguous or missing.
    pub fn from_args(args: &CreateArgs) -> Result<Self, RequestError> {
        let os_source = resolve_os_source(
            args.os,
            args.app,
            args.iso.as_deref(),
            args.snapshot.as_deref(),
        )?;

        let (app_id, iso_id, snapshot_id) = match &os_source {
            OsSource::App(id) => (Some(*id), None, None),
            OsSource::Iso(id) => (None, Some(id.clone()), None),
            OsSource::Snapshot(id) => (None, None, Some(id.clone())),
            OsSource::OsId(_) => (None, None, None),
        };

        Ok(Self {
            region: args.region.clone(),
            plan: args.plan.clone(),
            os_id: os_source.os_id(),
            os_source,
            app_id,
            iso_id,
            snapshot_id,
            ipxe_chain_url: owned_non_empty(args.ipxe.as_ref()),
            script_id: owned_non_empty(args.script_id.as_ref()),
            enable_ipv6: args.ipv6,
            enable_private_network: args.private_network,
            attach_private_network: args.networks.clone(),
            label: owned_non_empty(args.label.as_ref()),
            ssh_keys: args.ssh_keys.clone(),
            backups: BackupsSetting::from(args.auto_backup),
            user_data: owned_non_empty(args.userdata.as_ref()),
            ddos_protection: args.ddos,
            activation_email: args.notify,
            reserved_ipv4: owned_non_empty(args.reserved_ipv4.as_ref()),
            hostname: owned_non_empty(args.host.as_ref()),
            tag: owned_non_empty(args.tag.as_ref()),
            firewall_group_id: owned_non_empty(args.firewall_group.as_ref()),
        })
    }
}

/// Body of a partial instance update. Only populated fields are sent.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct InstanceUpdateRequest {
    /// New tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// New label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Firewall group to assign.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firewall_group_id: Option<String>,
    /// Operating system to switch to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_id: Option<u32>,
    /// Application to switch to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<u32>,
    /// Plan to upgrade to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
    /// Base64 encoded user-data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_data: Option<String>,
}

impl InstanceUpdateRequest {
    /// Update that only sets the tag.
    #[must_use]
    pub fn tag(tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            ..Self::default()
        }
    }

    /// Update that only sets the label.
    #[must_use]
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    /// Update that only assigns a firewall group.
    #[must_use]
    pub fn firewall_group(firewall_group_id: impl Into<String>) -> Self {
        Self {
            firewall_group_id: Some(firewall_group_id.into()),
            ..Self::default()
        }
    }

    /// Update that only changes the operating system.
    #[must_use]
    pub fn os(os_id: u32) -> Self {
        Self {
            os_id: Some(os_id),
            ..Self::default()
        }
    }

    /// Update that only changes the application.
    #[must_use]
    pub fn app(app_id: u32) -> Self {
        Self {
            app_id: Some(app_id),
            ..Self::default()
        }
    }

    /// Update that only upgrades the plan.
    #[must_use]
    pub fn plan(plan: impl Into<String>) -> Self {
        Self {
            plan: Some(plan.into()),
            ..Self::default()
        }
    }

    /// Update that only replaces the user-data.
    #[must_use]
    pub fn user_data(encoded: impl Into<String>) -> Self {
        Self {
            user_data: Some(encoded.into()),
            ..Self::default()
        }
    }
}

/// Body of a backup schedule change.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct BackupScheduleRequest {
    /// Cron type (`daily`, `weekly`, `monthly`, `daily_alt_even`,
    /// `daily_alt_odd`).
    #[serde(rename = "type")]
    pub cron_type: String,
    /// Hour of day.
    pub hour: u32,
    /// Day of week.
    pub dow: u32,
    /// Day of month.
    pub dom: u32,
}

impl From<&BackupCreateArgs> for BackupScheduleRequest {
    fn from(args: &BackupCreateArgs) -> Self {
        Self {
            cron_type: args.cron_type.clone(),
            hour: args.hour,
            dow: args.dow,
            dom: args.dom,
        }
    }
}

/// Body of a restore call; exactly one field is populated.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RestoreRequest {
    /// Backup to restore from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_id: Option<String>,
    /// Snapshot to restore from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_id: Option<String>,
}

impl RestoreRequest {
    /// Builds a restore request from the backup/snapshot pair.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::RestoreSourceMissing`] when neither is given
    /// and [`RequestError::RestoreSourceConflict`] when both are.
    pub fn from_args(args: &RestoreArgs) -> Result<Self, RequestError> {
        let selected = resolve_exclusive([
            ("backup_id", non_empty(args.backup.as_deref())),
            ("snapshot_id", non_empty(args.snapshot.as_deref())),
        ])
        .map_err(|_| RequestError::RestoreSourceConflict)?;

        match selected {
            Some(("snapshot_id", id)) => Ok(Self {
                backup_id: None,
                snapshot_id: Some(id.to_owned()),
            }),
            Some((_, id)) => Ok(Self {
                backup_id: Some(id.to_owned()),
                snapshot_id: None,
            }),
            None => Err(RequestError::RestoreSourceMissing),
        }
    }
}

/// Body of a reverse DNS entry change.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ReverseIpRequest {
    /// Address the entry belongs to.
    pub ip: String,
    /// Hostname the address maps back to.
    pub reverse: String,
}

impl From<&ReverseEntryArgs> for ReverseIpRequest {
    fn from(args: &ReverseEntryArgs) -> Self {
        Self {
            ip: args.ip.clone(),
            reverse: args.entry.clone(),
        }
    }
}

/// Paging parameters for list calls, passed through unmodified.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ListOptions {
    /// Requested page size.
    pub per_page: u32,
    /// Continuation cursor from a previous page.
    pub cursor: Option<String>,
}

impl ListOptions {
    /// Query parameters for the list endpoint.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("per_page", self.per_page.to_string())];
        if let Some(cursor) = non_empty(self.cursor.as_deref()) {
            pairs.push(("cursor", cursor.to_owned()));
        }
        pairs
    }
}

impl From<&PagingArgs> for ListOptions {
    fn from(args: &PagingArgs) -> Self {
        Self {
            per_page: args.per_page,
            cursor: args.cursor.clone(),
        }
    }
}
