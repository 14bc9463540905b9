//! Wire envelopes wrapping API payloads.

use serde::{Deserialize, Serialize};

use crate::api::{
    BackupSchedule, Bandwidth, Instance, Ipv4, Ipv6, IsoStatus, Meta, ReverseEntry, UserData,
};

#[derive(Deserialize)]
pub(super) struct InstanceEnvelope {
    pub(super) instance: Instance,
}

#[derive(Deserialize)]
pub(super) struct InstanceListEnvelope {
    #[serde(default)]
    pub(super) instances: Vec<Instance>,
    #[serde(default)]
    pub(super) meta: Meta,
}

#[derive(Deserialize)]
pub(super) struct BandwidthEnvelope {
    #[serde(default)]
    pub(super) bandwidth: Bandwidth,
}

#[derive(Deserialize)]
pub(super) struct Ipv4ListEnvelope {
    #[serde(default)]
    pub(super) ipv4s: Vec<Ipv4>,
    #[serde(default)]
    pub(super) meta: Meta,
}

#[derive(Deserialize)]
pub(super) struct Ipv6ListEnvelope {
    #[serde(default)]
    pub(super) ipv6s: Vec<Ipv6>,
    #[serde(default)]
    pub(super) meta: Meta,
}

#[derive(Deserialize)]
pub(super) struct Ipv4Envelope {
    pub(super) ipv4: Ipv4,
}

#[derive(Deserialize)]
pub(super) struct BackupScheduleEnvelope {
    pub(super) backup_schedule: BackupSchedule,
}

#[derive(Deserialize)]
pub(super) struct IsoStatusEnvelope {
    pub(super) iso_status: IsoStatus,
}

#[derive(Deserialize)]
pub(super) struct ReverseIpv6Envelope {
    #[serde(default)]
    pub(super) reverse_ipv6s: Vec<ReverseEntry>,
}

#[derive(Deserialize)]
pub(super) struct UserDataEnvelope {
    pub(super) user_data: UserData,
}

#[derive(Serialize)]
pub(super) struct CreateIpv4Body {
    pub(super) reboot: bool,
}

#[derive(Serialize)]
pub(super) struct AttachIsoBody<'a> {
    pub(super) iso_id: &'a str,
}

#[derive(Serialize)]
pub(super) struct IpBody<'a> {
    pub(super) ip: &'a str,
}
