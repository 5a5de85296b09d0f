use std::ffi::OsString;

use tracing::debug;

use crate::error::{ParseError, ParseErrorKind, Result};
use crate::table::{EnvTable, ProcessEnv};
use crate::value::EnvValue;

/// Get-once access to an environment table.
///
/// Every lookup that finds its key removes that key before returning, on the
/// success path and on the parse-error path alike. A lookup that misses has
/// no effect. Nothing here locks: see [`ProcessEnv`] for the threading
/// contract of the real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecureEnv<E = ProcessEnv> {
    table: E,
}

impl SecureEnv<ProcessEnv> {
    #[must_use]
    pub const fn process() -> Self {
        Self { table: ProcessEnv }
    }
}

impl<E> SecureEnv<E> {
    #[must_use]
    pub const fn with_table(table: E) -> Self {
        Self { table }
    }

    pub const fn table(&self) -> &E {
        &self.table
    }

    pub fn into_table(self) -> E {
        self.table
    }
}

impl<E: EnvTable> SecureEnv<E> {
    /// Consumes `key` and converts it to `T`.
    ///
    /// `Ok(None)` means the key was not set. `Err` means it was set, has
    /// been removed, and its text did not convert.
    pub fn fetch<T: EnvValue>(&self, key: &str) -> Result<Option<T>> {
        self.consume(key, |raw| convert::<T>(key, raw)).transpose()
    }

    /// Consumes `key` into `output`. `output` is written only when the key
    /// was set and converted successfully.
    pub fn assign<T: EnvValue>(&self, output: &mut T, key: &str) -> Result<()> {
        if let Some(value) = self.fetch(key)? {
            *output = value;
        }
        Ok(())
    }

    /// Consumes `key` and converts it to `T`, or returns `default` when unset.
    pub fn fetch_or<T: EnvValue>(&self, key: &str, default: T) -> Result<T> {
        Ok(self.fetch(key)?.unwrap_or(default))
    }

    /// Consumes `key` without requiring its value to be unicode.
    pub fn fetch_os(&self, key: &str) -> Option<OsString> {
        self.consume(key, |raw| raw)
    }

    fn consume<R>(&self, key: &str, read: impl FnOnce(OsString) -> R) -> Option<R> {
        let raw = self.table.lookup(key)?;
        let _guard = ConsumeGuard {
            table: &self.table,
            key,
        };
        Some(read(raw))
    }
}

/// Removes its key when dropped, including during unwinding.
struct ConsumeGuard<'a, E: EnvTable> {
    table: &'a E,
    key: &'a str,
}

impl<E: EnvTable> Drop for ConsumeGuard<'_, E> {
    fn drop(&mut self) {
        self.table.remove(self.key);
        debug!(key = self.key, "consumed environment variable");
    }
}

fn convert<T: EnvValue>(key: &str, raw: OsString) -> Result<T> {
    let parsed = match raw.into_string() {
        Ok(text) => T::parse_env(&text),
        Err(_) => Err(ParseErrorKind::NotUnicode),
    };
    parsed.map_err(|kind| {
        let err = ParseError::new(key, T::TYPE_NAME, kind);
        debug!(
            key,
            target_type = T::TYPE_NAME,
            code = err.code(),
            "environment variable failed to parse"
        );
        err
    })
}
