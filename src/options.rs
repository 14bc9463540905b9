//! Resolution of mutually exclusive options.
//!
//! A handful of commands accept several flags of which at most one may be
//! given. Presence is explicit: each option is an `Option`, and only `Some`
//! counts as selected. String options treat an empty value as absent so that
//! `--iso ""` behaves like leaving the flag off.

use std::fmt;

use thiserror::Error;

/// Operating system id the API expects when an application is installed.
pub const APP_OS_ID: u32 = 186;
/// Operating system id the API expects when booting from an ISO.
pub const ISO_OS_ID: u32 = 159;
/// Operating system id the API expects when restoring a snapshot.
pub const SNAPSHOT_OS_ID: u32 = 164;

/// Raised when more than one exclusive option was selected.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("too many options have been selected : [{}] : please select one", .selected.join(", "))]
pub struct AmbiguousOptionsError {
    /// Names of the selected options, in declaration order.
    pub selected: Vec<&'static str>,
}

/// Picks the single present option from `options`.
///
/// Returns `Ok(None)` when nothing was selected so the caller can fall back
/// to a default.
///
/// # Errors
///
/// Returns [`AmbiguousOptionsError`] naming every selected option when more
/// than one is present.
pub fn resolve_exclusive<T>(
    options: impl IntoIterator<Item = (&'static str, Option<T>)>,
) -> Result<Option<(&'static str, T)>, AmbiguousOptionsError> {
    let mut selected: Vec<(&'static str, T)> = options
        .into_iter()
        .filter_map(|(name, value)| value.map(|present| (name, present)))
        .collect();

    if selected.len() > 1 {
        return Err(AmbiguousOptionsError {
            selected: selected.iter().map(|(name, _)| *name).collect(),
        });
    }

    Ok(selected.pop())
}

/// Treats empty strings as "not provided".
#[must_use]
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.is_empty())
}

/// How a new instance's operating system is provisioned.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum OsSource {
    /// Explicit operating system id.
    OsId(u32),
    /// Application image.
    App(u32),
    /// ISO image.
    Iso(String),
    /// Snapshot.
    Snapshot(String),
}

impl OsSource {
    /// API field name describing this source.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::OsId(_) => "os_id",
            Self::App(_) => "app_id",
            Self::Iso(_) => "iso_id",
            Self::Snapshot(_) => "snapshot_id",
        }
    }

    /// Operating system id sent alongside the source.
    #[must_use]
    pub const fn os_id(&self) -> u32 {
        match self {
            Self::OsId(id) => *id,
            Self::App(_) => APP_OS_ID,
            Self::Iso(_) => ISO_OS_ID,
            Self::Snapshot(_) => SNAPSHOT_OS_ID,
        }
    }
}

impl fmt::Display for OsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Errors raised while resolving the operating system source.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum OsSourceError {
    /// More than one of app, ISO and snapshot was given.
    #[error(transparent)]
    Ambiguous(#[from] AmbiguousOptionsError),
    /// Nothing was given and no usable OS id was supplied.
    #[error("an os ID must be provided")]
    Missing,
}

/// Resolves the OS source for instance creation.
///
/// App, ISO and snapshot are mutually exclusive. The explicit OS id only
/// applies when none of them is present; an id of `0` never names a real
/// operating system and counts as absent.
///
/// # Errors
///
/// Returns [`OsSourceError::Ambiguous`] when more than one image source is
/// given and [`OsSourceError::Missing`] when none is given and `os` is absent
/// or zero.
pub fn resolve_os_source(
    os: Option<u32>,
    app: Option<u32>,
    iso: Option<&str>,
    snapshot: Option<&str>,
) -> Result<OsSource, OsSourceError> {
    let selected = resolve_exclusive([
        ("app_id", app.map(OsSource::App)),
        ("iso_id", non_empty(iso).map(|id| OsSource::Iso(id.to_owned()))),
        (
            "snapshot_id",
            non_empty(snapshot).map(|id| OsSource::Snapshot(id.to_owned())),
        ),
    ])?;

    match (selected, os) {
        (Some((_, source)), _) => Ok(source),
        (None, Some(id)) if id != 0 => Ok(OsSource::OsId(id)),
        (None, _) => Err(OsSourceError::Missing),
    }
}
