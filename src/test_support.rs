//! Test support utilities shared across unit and integration tests.

use std::collections::BTreeSet;
use std::env;
use std::ffi::OsString;
use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;
use tokio::sync::{Mutex as AsyncMutex, MutexGuard};

use crate::api::{
    ApiFuture, BackupSchedule, Bandwidth, Instance, InstanceApi, Ipv4, Ipv6, IsoStatus, Meta,
    ReverseEntry, UserData,
};
use crate::request::{
    BackupScheduleRequest, InstanceCreateRequest, InstanceUpdateRequest, ListOptions,
    RestoreRequest, ReverseIpRequest,
};

/// A single call recorded by [`ScriptedApi`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ApiCall {
    /// `start(id)`.
    Start(String),
    /// `halt(id)`.
    Halt(String),
    /// `reboot(id)`.
    Reboot(String),
    /// `reinstall(id)`.
    Reinstall(String),
    /// `delete(id)`.
    Delete(String),
    /// `update(id, request)`.
    Update(String, InstanceUpdateRequest),
    /// `get(id)`.
    Get(String),
    /// `list(options)`.
    List(ListOptions),
    /// `get_bandwidth(id)`.
    GetBandwidth(String),
    /// `list_ipv4(id, options)`.
    ListIpv4(String, ListOptions),
    /// `list_ipv6(id, options)`.
    ListIpv6(String, ListOptions),
    /// `create_ipv4(id, reboot)`.
    CreateIpv4(String, bool),
    /// `delete_ipv4(id, ip)`.
    DeleteIpv4(String, String),
    /// `get_backup_schedule(id)`.
    GetBackupSchedule(String),
    /// `set_backup_schedule(id, request)`.
    SetBackupSchedule(String, BackupScheduleRequest),
    /// `iso_status(id)`.
    IsoStatus(String),
    /// `attach_iso(id, iso_id)`.
    AttachIso(String, String),
    /// `detach_iso(id)`.
    DetachIso(String),
    /// `restore(id, request)`.
    Restore(String, RestoreRequest),
    /// `default_reverse_ipv4(id, ip)`.
    DefaultReverseIpv4(String, String),
    /// `list_reverse_ipv6(id)`.
    ListReverseIpv6(String),
    /// `delete_reverse_ipv6(id, ip)`.
    DeleteReverseIpv6(String, String),
    /// `create_reverse_ipv4(id, request)`.
    CreateReverseIpv4(String, ReverseIpRequest),
    /// `create_reverse_ipv6(id, request)`.
    CreateReverseIpv6(String, ReverseIpRequest),
    /// `get_user_data(id)`.
    GetUserData(String),
    /// `create(request)`.
    Create(InstanceCreateRequest),
}

/// Failure injected into [`ScriptedApi`].
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("{0}")]
pub struct ScriptedFailure(pub String);

/// Canned responses returned by [`ScriptedApi`].
#[derive(Clone, Debug, Default)]
pub struct ScriptedResponses {
    /// Returned by `get` and `create`.
    pub instance: Instance,
    /// Returned by `list`.
    pub instances: Vec<Instance>,
    /// Returned by every paged call.
    pub meta: Meta,
    /// Returned by `get_bandwidth`.
    pub bandwidth: Bandwidth,
    /// Returned by `list_ipv4`; the first entry is also returned by
    /// `create_ipv4`.
    pub ipv4: Vec<Ipv4>,
    /// Returned by `list_ipv6`.
    pub ipv6: Vec<Ipv6>,
    /// Returned by `get_backup_schedule`.
    pub backup_schedule: BackupSchedule,
    /// Returned by `iso_status`.
    pub iso_status: IsoStatus,
    /// Returned by `list_reverse_ipv6`.
    pub reverse_ipv6: Vec<ReverseEntry>,
    /// Returned by `get_user_data`.
    pub user_data: UserData,
}

#[derive(Debug, Default)]
struct State {
    calls: Vec<ApiCall>,
    failure: Option<String>,
    responses: ScriptedResponses,
}

/// In-memory [`InstanceApi`] that records calls and replays canned
/// responses.
///
/// Clones share state so a test can hand one clone to the code under test
/// and inspect the recorded calls through another.
#[derive(Clone, Debug, Default)]
pub struct ScriptedApi {
    state: Arc<Mutex<State>>,
}

impl ScriptedApi {
    /// Creates a gateway that succeeds with default responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a gateway that succeeds with `responses`.
    #[must_use]
    pub fn with_responses(responses: ScriptedResponses) -> Self {
        let api = Self::default();
        api.lock().responses = responses;
        api
    }

    /// Creates a gateway whose every call fails with `message`.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        let api = Self::default();
        api.lock().failure = Some(message.into());
        api
    }

    /// Returns a snapshot of all calls recorded so far.
    #[must_use]
    pub fn calls(&self) -> Vec<ApiCall> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn respond<'a, T>(
        &self,
        call: ApiCall,
        pick: impl FnOnce(&ScriptedResponses) -> T,
    ) -> ApiFuture<'a, T, ScriptedFailure>
    where
        T: Send + 'a,
    {
        let result = {
            let mut state = self.lock();
            state.calls.push(call);
            state.failure.clone().map_or_else(
                || Ok(pick(&state.responses)),
                |message| Err(ScriptedFailure(message)),
            )
        };
        Box::pin(async move { result })
    }

    fn acknowledge<'a>(&self, call: ApiCall) -> ApiFuture<'a, (), ScriptedFailure> {
        self.respond(call, |_| ())
    }
}

impl InstanceApi for ScriptedApi {
    type Error = ScriptedFailure;

    fn start<'a>(&'a self, id: &'a str) -> ApiFuture<'a, (), Self::Error> {
        self.acknowledge(ApiCall::Start(id.to_owned()))
    }

    fn halt<'a>(&'a self, id: &'a str) -> ApiFuture<'a, (), Self::Error> {
        self.acknowledge(ApiCall::Halt(id.to_owned()))
    }

    fn reboot<'a>(&'a self, id: &'a str) -> ApiFuture<'a, (), Self::Error> {
        self.acknowledge(ApiCall::Reboot(id.to_owned()))
    }

    fn reinstall<'a>(&'a self, id: &'a str) -> ApiFuture<'a, (), Self::Error> {
        self.acknowledge(ApiCall::Reinstall(id.to_owned()))
    }

    fn delete<'a>(&'a self, id: &'a str) -> ApiFuture<'a, (), Self::Error> {
        self.acknowledge(ApiCall::Delete(id.to_owned()))
    }

    fn update<'a>(
        &'a self,
        id: &'a str,
        request: &'a InstanceUpdateRequest,
    ) -> ApiFuture<'a, (), Self::Error> {
        self.acknowledge(ApiCall::Update(id.to_owned(), request.clone()))
    }

    fn get<'a>(&'a self, id: &'a str) -> ApiFuture<'a, Instance, Self::Error> {
        self.respond(ApiCall::Get(id.to_owned()), |responses| {
            responses.instance.clone()
        })
    }

    fn list<'a>(
        &'a self,
        options: &'a ListOptions,
    ) -> ApiFuture<'a, (Vec<Instance>, Meta), Self::Error> {
        self.respond(ApiCall::List(options.clone()), |responses| {
            (responses.instances.clone(), responses.meta.clone())
        })
    }

    fn get_bandwidth<'a>(&'a self, id: &'a str) -> ApiFuture<'a, Bandwidth, Self::Error> {
        self.respond(ApiCall::GetBandwidth(id.to_owned()), |responses| {
            responses.bandwidth.clone()
        })
    }

    fn list_ipv4<'a>(
        &'a self,
        id: &'a str,
        options: &'a ListOptions,
    ) -> ApiFuture<'a, (Vec<Ipv4>, Meta), Self::Error> {
        self.respond(
            ApiCall::ListIpv4(id.to_owned(), options.clone()),
            |responses| (responses.ipv4.clone(), responses.meta.clone()),
        )
    }

    fn list_ipv6<'a>(
        &'a self,
        id: &'a str,
        options: &'a ListOptions,
    ) -> ApiFuture<'a, (Vec<Ipv6>, Meta), Self::Error> {
        self.respond(
            ApiCall::ListIpv6(id.to_owned(), options.clone()),
            |responses| (responses.ipv6.clone(), responses.meta.clone()),
        )
    }

    fn create_ipv4<'a>(&'a self, id: &'a str, reboot: bool) -> ApiFuture<'a, Ipv4, Self::Error> {
        self.respond(ApiCall::CreateIpv4(id.to_owned(), reboot), |responses| {
            responses.ipv4.first().cloned().unwrap_or_default()
        })
    }

    fn delete_ipv4<'a>(&'a self, id: &'a str, ip: &'a str) -> ApiFuture<'a, (), Self::Error> {
        self.acknowledge(ApiCall::DeleteIpv4(id.to_owned(), ip.to_owned()))
    }

    fn get_backup_schedule<'a>(
        &'a self,
        id: &'a str,
    ) -> ApiFuture<'a, BackupSchedule, Self::Error> {
        self.respond(ApiCall::GetBackupSchedule(id.to_owned()), |responses| {
            responses.backup_schedule.clone()
        })
    }

    fn set_backup_schedule<'a>(
        &'a self,
        id: &'a str,
        request: &'a BackupScheduleRequest,
    ) -> ApiFuture<'a, (), Self::Error> {
        self.acknowledge(ApiCall::SetBackupSchedule(id.to_owned(), request.clone()))
    }

    fn iso_status<'a>(&'a self, id: &'a str) -> ApiFuture<'a, IsoStatus, Self::Error> {
        self.respond(ApiCall::IsoStatus(id.to_owned()), |responses| {
            responses.iso_status.clone()
        })
    }

    fn attach_iso<'a>(&'a self, id: &'a str, iso_id: &'a str) -> ApiFuture<'a, (), Self::Error> {
        self.acknowledge(ApiCall::AttachIso(id.to_owned(), iso_id.to_owned()))
    }

    fn detach_iso<'a>(&'a self, id: &'a str) -> ApiFuture<'a, (), Self::Error> {
        self.acknowledge(ApiCall::DetachIso(id.to_owned()))
    }

    fn restore<'a>(
        &'a self,
        id: &'a str,
        request: &'a RestoreRequest,
    ) -> ApiFuture<'a, (), Self::Error> {
        self.acknowledge(ApiCall::Restore(id.to_owned(), request.clone()))
    }

    fn default_reverse_ipv4<'a>(
        &'a self,
        id: &'a str,
        ip: &'a str,
    ) -> ApiFuture<'a, (), Self::Error> {
        self.acknowledge(ApiCall::DefaultReverseIpv4(id.to_owned(), ip.to_owned()))
    }

    fn list_reverse_ipv6<'a>(
        &'a self,
        id: &'a str,
    ) -> ApiFuture<'a, Vec<ReverseEntry>, Self::Error> {
        self.respond(ApiCall::ListReverseIpv6(id.to_owned()), |responses| {
            responses.reverse_ipv6.clone()
        })
    }

    fn delete_reverse_ipv6<'a>(
        &'a self,
        id: &'a str,
        ip: &'a str,
    ) -> ApiFuture<'a, (), Self::Error> {
        self.acknowledge(ApiCall::DeleteReverseIpv6(id.to_owned(), ip.to_owned()))
    }

    fn create_reverse_ipv4<'a>(
        &'a self,
        id: &'a str,
        request: &'a ReverseIpRequest,
    ) -> ApiFuture<'a, (), Self::Error> {
        self.acknowledge(ApiCall::CreateReverseIpv4(id.to_owned(), request.clone()))
    }

    fn create_reverse_ipv6<'a>(
        &'a self,
        id: &'a str,
        request: &'a ReverseIpRequest,
    ) -> ApiFuture<'a, (), Self::Error> {
        self.acknowledge(ApiCall::CreateReverseIpv6(id.to_owned(), request.clone()))
    }

    fn get_user_data<'a>(&'a self, id: &'a str) -> ApiFuture<'a, UserData, Self::Error> {
        self.respond(ApiCall::GetUserData(id.to_owned()), |responses| {
            responses.user_data.clone()
        })
    }

    fn create<'a>(
        &'a self,
        request: &'a InstanceCreateRequest,
    ) -> ApiFuture<'a, Instance, Self::Error> {
        self.respond(ApiCall::Create(request.clone()), |responses| {
            responses.instance.clone()
        })
    }
}

/// Global mutex used to serialise environment mutation in tests.
pub static ENV_LOCK: AsyncMutex<()> = AsyncMutex::const_new(());

/// Guard that holds the env mutex and restores variables on drop.
pub struct EnvGuard {
    previous: Vec<(String, Option<OsString>)>,
    _guard: MutexGuard<'static, ()>,
}

impl EnvGuard {
    /// Sets and removes environment variables while holding a global mutex.
    ///
    /// Pairs with a `None` value are removed for the lifetime of the guard.
    pub async fn set_vars(pairs: &[(&str, Option<&str>)]) -> Self {
        debug_assert!(
            {
                let mut seen = BTreeSet::new();
                pairs.iter().all(|(key, _)| seen.insert(*key))
            },
            "duplicate environment variable keys passed to EnvGuard::set_vars"
        );

        let guard = ENV_LOCK.lock().await;
        let mut previous = Vec::with_capacity(pairs.len());
        for (key, value) in pairs {
            let old = env::var_os(key);
            // SAFETY: Environment mutation is serialised by `ENV_LOCK`, preventing races.
            unsafe {
                match value {
                    Some(val) => env::set_var(key, val),
                    None => env::remove_var(key),
                }
            }
            previous.push(((*key).to_owned(), old));
        }

        Self {
            previous,
            _guard: guard,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, old) in &self.previous {
            // SAFETY: Environment mutation is serialised by holding `_guard`.
            unsafe {
                match old {
                    Some(val) => env::set_var(key, val),
                    None => env::remove_var(key),
                }
            }
        }
    }
}
