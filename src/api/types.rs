//! Entities returned by the instance API.
//!
//! Field names follow the Vultr v2 JSON payloads. Everything defaults so that
//! fields the provider adds or drops do not break decoding.

use std::collections::BTreeMap;

use serde::Deserialize;

/// A compute instance.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct Instance {
    /// Instance identifier.
    pub id: String,
    /// Operating system name.
    pub os: String,
    /// Memory in MB.
    pub ram: u64,
    /// Disk size in GB.
    pub disk: u64,
    /// Primary IPv4 address.
    pub main_ip: String,
    /// Number of virtual CPUs.
    pub vcpu_count: u32,
    /// Region identifier.
    pub region: String,
    /// Plan identifier.
    pub plan: String,
    /// Creation timestamp as reported by the API.
    pub date_created: String,
    /// Subscription status (`active`, `pending`, ...).
    pub status: String,
    /// Monthly bandwidth allowance in GB.
    pub allowed_bandwidth: u64,
    /// Netmask of the primary IPv4 network.
    pub netmask_v4: String,
    /// Gateway of the primary IPv4 network.
    pub gateway_v4: String,
    /// Power status (`running`, `stopped`).
    pub power_status: String,
    /// Server state (`none`, `locked`, `installingbooting`, `ok`).
    pub server_status: String,
    /// IPv6 network.
    pub v6_network: String,
    /// Primary IPv6 address.
    pub v6_main_ip: String,
    /// IPv6 network size.
    pub v6_network_size: u32,
    /// User supplied label.
    pub label: String,
    /// Internal (private network) IP address.
    pub internal_ip: String,
    /// KVM console URL.
    pub kvm: String,
    /// Tag.
    pub tag: String,
    /// Operating system id.
    pub os_id: u32,
    /// Application id.
    pub app_id: u32,
    /// Firewall group id.
    pub firewall_group_id: String,
    /// Enabled features (`auto_backups`, `ipv6`, `ddos_protection`).
    pub features: Vec<String>,
    /// Hostname.
    pub hostname: String,
    /// Initial root password; only returned on creation.
    pub default_password: String,
}

/// Pagination metadata returned with list results.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct Meta {
    /// Total number of items.
    pub total: u64,
    /// Cursors for neighbouring pages.
    pub links: Links,
}

/// Cursors for neighbouring pages; empty when there is no such page.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct Links {
    /// Cursor of the next page.
    pub next: String,
    /// Cursor of the previous page.
    pub prev: String,
}

/// Bandwidth usage keyed by date (`YYYY-MM-DD`).
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(transparent)]
pub struct Bandwidth {
    /// Usage per day, ordered by date.
    pub days: BTreeMap<String, BandwidthUsage>,
}

/// Traffic counted for a single day.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct BandwidthUsage {
    /// Bytes received.
    pub incoming_bytes: u64,
    /// Bytes sent.
    pub outgoing_bytes: u64,
}

/// An IPv4 address attached to an instance.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct Ipv4 {
    /// Address.
    pub ip: String,
    /// Netmask.
    pub netmask: String,
    /// Gateway.
    pub gateway: String,
    /// Address type (`main_ip`, `secondary_ip`).
    #[serde(rename = "type")]
    pub ip_type: String,
    /// Reverse DNS entry.
    pub reverse: String,
}

/// An IPv6 network attached to an instance.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct Ipv6 {
    /// Address.
    pub ip: String,
    /// Network.
    pub network: String,
    /// Network size.
    pub network_size: u32,
    /// Address type.
    #[serde(rename = "type")]
    pub ip_type: String,
}

/// A reverse DNS entry.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct ReverseEntry {
    /// Address.
    pub ip: String,
    /// Hostname the address maps back to.
    pub reverse: String,
}

/// Backup schedule of an instance.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct BackupSchedule {
    /// Whether backups are enabled.
    pub enabled: bool,
    /// Cron type.
    #[serde(rename = "type")]
    pub cron_type: String,
    /// Next scheduled run in UTC.
    pub next_scheduled_time_utc: String,
    /// Hour of day.
    pub hour: u32,
    /// Day of week.
    pub dow: u32,
    /// Day of month.
    pub dom: u32,
}

/// ISO attachment state of an instance.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct IsoStatus {
    /// Attachment state (`ready`, `isomounting`, ...).
    pub state: String,
    /// Attached ISO id, empty when none is attached.
    pub iso_id: String,
}

/// Base64 encoded user-data of an instance.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct UserData {
    /// Base64 payload as stored by the API.
    pub data: String,
}
