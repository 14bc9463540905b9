//! Gateway abstraction over the provider's instance API.
//!
//! Command handlers receive an [`InstanceApi`] explicitly; nothing in the
//! crate reaches for a shared client. [`crate::vultr::VultrClient`] talks to
//! the real API and [`crate::test_support::ScriptedApi`] records calls for
//! tests.

use std::future::Future;
use std::pin::Pin;

pub mod types;

pub use types::{
    Bandwidth, BandwidthUsage, BackupSchedule, Instance, Ipv4, Ipv6, IsoStatus, Links, Meta,
    ReverseEntry, UserData,
};

use crate::request::{
    BackupScheduleRequest, InstanceCreateRequest, InstanceUpdateRequest, ListOptions,
    RestoreRequest, ReverseIpRequest,
};

/// Future returned by gateway operations.
pub type ApiFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Remote operations on compute instances.
///
/// Each method performs exactly one provider call. Implementations own
/// transport, authentication and error decoding; callers never retry.
pub trait InstanceApi {
    /// Provider specific error type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Powers an instance on.
    fn start<'a>(&'a self, id: &'a str) -> ApiFuture<'a, (), Self::Error>;

    /// Powers an instance off.
    fn halt<'a>(&'a self, id: &'a str) -> ApiFuture<'a, (), Self::Error>;

    /// Reboots an instance.
    fn reboot<'a>(&'a self, id: &'a str) -> ApiFuture<'a, (), Self::Error>;

    /// Reinstalls the operating system of an instance.
    fn reinstall<'a>(&'a self, id: &'a str) -> ApiFuture<'a, (), Self::Error>;

    /// Destroys an instance.
    fn delete<'a>(&'a self, id: &'a str) -> ApiFuture<'a, (), Self::Error>;

    /// Applies a partial update to an instance.
    fn update<'a>(
        &'a self,
        id: &'a str,
        request: &'a InstanceUpdateRequest,
    ) -> ApiFuture<'a, (), Self::Error>;

    /// Fetches a single instance.
    fn get<'a>(&'a self, id: &'a str) -> ApiFuture<'a, Instance, Self::Error>;

    /// Lists instances one page at a time.
    fn list<'a>(
        &'a self,
        options: &'a ListOptions,
    ) -> ApiFuture<'a, (Vec<Instance>, Meta), Self::Error>;

    /// Fetches bandwidth usage of an instance.
    fn get_bandwidth<'a>(&'a self, id: &'a str) -> ApiFuture<'a, Bandwidth, Self::Error>;

    /// Lists IPv4 addresses of an instance.
    fn list_ipv4<'a>(
        &'a self,
        id: &'a str,
        options: &'a ListOptions,
    ) -> ApiFuture<'a, (Vec<Ipv4>, Meta), Self::Error>;

    /// Lists IPv6 networks of an instance.
    fn list_ipv6<'a>(
        &'a self,
        id: &'a str,
        options: &'a ListOptions,
    ) -> ApiFuture<'a, (Vec<Ipv6>, Meta), Self::Error>;

    /// Adds an IPv4 address, optionally rebooting the instance.
    fn create_ipv4<'a>(&'a self, id: &'a str, reboot: bool) -> ApiFuture<'a, Ipv4, Self::Error>;

    /// Removes an IPv4 address.
    fn delete_ipv4<'a>(&'a self, id: &'a str, ip: &'a str) -> ApiFuture<'a, (), Self::Error>;

    /// Fetches the backup schedule.
    fn get_backup_schedule<'a>(
        &'a self,
        id: &'a str,
    ) -> ApiFuture<'a, BackupSchedule, Self::Error>;

    /// Replaces the backup schedule.
    fn set_backup_schedule<'a>(
        &'a self,
        id: &'a str,
        request: &'a BackupScheduleRequest,
    ) -> ApiFuture<'a, (), Self::Error>;

    /// Fetches the ISO attachment state.
    fn iso_status<'a>(&'a self, id: &'a str) -> ApiFuture<'a, IsoStatus, Self::Error>;

    /// Attaches an ISO.
    fn attach_iso<'a>(&'a self, id: &'a str, iso_id: &'a str) -> ApiFuture<'a, (), Self::Error>;

    /// Detaches the attached ISO.
    fn detach_iso<'a>(&'a self, id: &'a str) -> ApiFuture<'a, (), Self::Error>;

    /// Restores an instance from a backup or snapshot.
    fn restore<'a>(
        &'a self,
        id: &'a str,
        request: &'a RestoreRequest,
    ) -> ApiFuture<'a, (), Self::Error>;

    /// Resets the reverse DNS entry of an IPv4 address.
    fn default_reverse_ipv4<'a>(
        &'a self,
        id: &'a str,
        ip: &'a str,
    ) -> ApiFuture<'a, (), Self::Error>;

    /// Lists IPv6 reverse DNS entries.
    fn list_reverse_ipv6<'a>(
        &'a self,
        id: &'a str,
    ) -> ApiFuture<'a, Vec<ReverseEntry>, Self::Error>;

    /// Removes the reverse DNS entry of an IPv6 address.
    fn delete_reverse_ipv6<'a>(
        &'a self,
        id: &'a str,
        ip: &'a str,
    ) -> ApiFuture<'a, (), Self::Error>;

    /// Sets the reverse DNS entry of an IPv4 address.
    fn create_reverse_ipv4<'a>(
        &'a self,
        id: &'a str,
        request: &'a ReverseIpRequest,
    ) -> ApiFuture<'a, (), Self::Error>;

    /// Sets the reverse DNS entry of an IPv6 address.
    fn create_reverse_ipv6<'a>(
        &'a self,
        id: &'a str,
        request: &'a ReverseIpRequest,
    ) -> ApiFuture<'a, (), Self::Error>;

    /// Fetches the user-data.
    fn get_user_data<'a>(&'a self, id: &'a str) -> ApiFuture<'a, UserData, Self::Error>;

    /// Creates an instance.
    fn create<'a>(
        &'a self,
        request: &'a InstanceCreateRequest,
    ) -> ApiFuture<'a, Instance, Self::Error>;
}
