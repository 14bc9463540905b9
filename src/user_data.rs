//! User-data loading and encoding.
//!
//! The API stores user-data base64 encoded. `server user-data set` reads a
//! local file (or standard input) and encodes it before the update call;
//! `server user-data get` decodes the stored payload for display.

use std::io::{self, Read};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8::File};
use thiserror::Error;

/// Paths that read from standard input instead of the filesystem.
const STDIN_PATHS: [&str; 2] = ["-", "/dev/stdin"];

/// Errors raised while loading user-data.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum UserDataError {
    /// Raised when the path is empty or only whitespace.
    #[error("user-data file path must not be empty")]
    PathEmpty,
    /// Raised when reading the file or standard input fails.
    #[error("failed to read `{path}`: {message}")]
    Read {
        /// Path that failed to read.
        path: String,
        /// Underlying error message.
        message: String,
    },
}

/// Reads `path` and returns its contents base64 encoded.
///
/// # Errors
///
/// Returns [`UserDataError`] when the path is blank or cannot be read.
pub fn load_encoded(path: &str) -> Result<String, UserDataError> {
    let raw = read_source(path)?;
    Ok(encode(&raw))
}

/// Base64 encodes `raw` with the standard padded alphabet.
#[must_use]
pub fn encode(raw: &[u8]) -> String {
    STANDARD.encode(raw)
}

/// Decodes a stored payload for display.
///
/// Payloads that are not valid base64 or not UTF-8 once decoded are returned
/// unchanged.
#[must_use]
pub fn decode_for_display(encoded: &str) -> String {
    STANDARD
        .decode(encoded.trim())
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .unwrap_or_else(|| encoded.to_owned())
}

fn read_source(path: &str) -> Result<Vec<u8>, UserDataError> {
    if path.trim().is_empty() {
        return Err(UserDataError::PathEmpty);
    }

    let read_error = |message: String| UserDataError::Read {
        path: path.to_owned(),
        message,
    };

    if STDIN_PATHS.contains(&path) {
        let mut buffer = Vec::new();
        io::stdin()
            .lock()
            .read_to_end(&mut buffer)
            .map_err(|err| read_error(err.to_string()))?;
        return Ok(buffer);
    }

    read_ambient(path).map_err(read_error)
}

fn read_ambient(path: &str) -> Result<Vec<u8>, String> {
    let mut file = File::open_ambient(Utf8Path::new(path), ambient_authority())
        .map_err(|err| err.to_string())?;
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer).map_err(|err| err.to_string())?;
    Ok(buffer)
}
