//! Read environment variables exactly once.
//!
//! Every accessor removes the variable from the process environment as soon
//! as it has been read, so child processes spawned later never inherit it.
//! The removal happens whether or not the value converts to the requested
//! type. An unset variable is never an error and never touches an output.
//!
//! ```no_run
//! let mut port: u16 = 8080;
//! secureenv::assign(&mut port, "PORT")?;
//!
//! let token: Option<String> = secureenv::fetch("API_TOKEN")?;
//! # Ok::<(), secureenv::ParseError>(())
//! ```
//!
//! # Threading
//!
//! The process environment is global mutable state and nothing here locks
//! it. Consume variables during single-threaded startup or serialize access
//! yourself; see [`ProcessEnv`].

// Public fallible APIs share one error type (`ParseError`).
#![allow(
    clippy::missing_errors_doc,
    reason = "every fallible accessor returns the same ParseError contract"
)]

mod accessor;
pub mod error;
mod numeric;
pub mod table;
mod value;

use std::ffi::OsString;

pub use accessor::SecureEnv;
pub use error::{ErrorPayload, ParseError, ParseErrorKind, Result};
#[cfg(any(test, feature = "test-support"))]
pub use table::MemoryEnv;
pub use table::{EnvTable, ProcessEnv};
pub use value::EnvValue;

/// Consumes `key` from the process environment and converts it to `T`.
pub fn fetch<T: EnvValue>(key: &str) -> Result<Option<T>> {
    SecureEnv::process().fetch(key)
}

/// Consumes `key` from the process environment into `output`.
pub fn assign<T: EnvValue>(output: &mut T, key: &str) -> Result<()> {
    SecureEnv::process().assign(output, key)
}

/// Consumes `key` from the process environment, or returns `default` when unset.
pub fn fetch_or<T: EnvValue>(key: &str, default: T) -> Result<T> {
    SecureEnv::process().fetch_or(key, default)
}

/// Consumes `key` from the process environment without requiring unicode.
pub fn fetch_os(key: &str) -> Option<OsString> {
    SecureEnv::process().fetch_os(key)
}
