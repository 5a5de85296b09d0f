use std::ffi::OsString;

use tracing::debug;

/// Read-and-remove access to an environment table.
///
/// Does **not** require `Send + Sync`; the process table is global state and
/// callers that share it across threads must synchronize themselves.
pub trait EnvTable {
    fn lookup(&self, key: &str) -> Option<OsString>;

    fn remove(&self, key: &str);
}

impl<T: EnvTable + ?Sized> EnvTable for &T {
    fn lookup(&self, key: &str) -> Option<OsString> {
        (**self).lookup(key)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key);
    }
}

/// Keys the host environment API can address without panicking.
#[must_use]
fn is_addressable_key(key: &str) -> bool {
    !key.is_empty() && !key.contains(['=', '\0'])
}

/// Zero-sized handle to the real process environment.
///
/// # Safety contract
///
/// Removing a variable mutates process-wide state. This type assumes it is
/// used during single-threaded startup, or that the caller serializes every
/// access to the environment (including reads made by other libraries).
/// Two unsynchronized callers can both observe a key before either removes it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvTable for ProcessEnv {
    #[inline]
    fn lookup(&self, key: &str) -> Option<OsString> {
        if !is_addressable_key(key) {
            debug!(key, "environment key is not addressable; treating as unset");
            return None;
        }
        std::env::var_os(key)
    }

    fn remove(&self, key: &str) {
        if !is_addressable_key(key) {
            return;
        }
        // SAFETY: see the type-level contract; environment mutation is only
        // sound while no other thread reads or writes the environment.
        unsafe {
            std::env::remove_var(key);
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use memory::MemoryEnv;

#[cfg(any(test, feature = "test-support"))]
mod memory {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::ffi::OsString;

    use super::EnvTable;

    /// Won't touch the global process environment.
    ///
    /// Counts every `remove` call per key, whether or not the key was still
    /// set, so tests can assert a key was cleared exactly once.
    #[derive(Debug, Default)]
    pub struct MemoryEnv {
        vars: RefCell<HashMap<String, OsString>>,
        removals: RefCell<HashMap<String, usize>>,
    }

    impl MemoryEnv {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set(&self, key: impl Into<String>, value: impl Into<OsString>) {
            self.vars.borrow_mut().insert(key.into(), value.into());
        }

        pub fn contains(&self, key: &str) -> bool {
            self.vars.borrow().contains_key(key)
        }

        pub fn len(&self) -> usize {
            self.vars.borrow().len()
        }

        pub fn is_empty(&self) -> bool {
            self.vars.borrow().is_empty()
        }

        pub fn removals(&self, key: &str) -> usize {
            self.removals.borrow().get(key).copied().unwrap_or(0)
        }
    }

    impl EnvTable for MemoryEnv {
        fn lookup(&self, key: &str) -> Option<OsString> {
            self.vars.borrow().get(key).cloned()
        }

        fn remove(&self, key: &str) {
            self.vars.borrow_mut().remove(key);
            *self.removals.borrow_mut().entry(key.to_string()).or_default() += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsStr;

    use super::{EnvTable, MemoryEnv, ProcessEnv, is_addressable_key};

    #[test]
    fn addressable_key_rejects_empty_equals_and_nul() {
        assert!(is_addressable_key("DATABASE_URL"));
        assert!(!is_addressable_key(""));
        assert!(!is_addressable_key("A=B"));
        assert!(!is_addressable_key("A\0B"));
    }

    #[test]
    fn process_env_treats_unaddressable_keys_as_absent() {
        let env = ProcessEnv;
        assert!(env.lookup("").is_none());
        assert!(env.lookup("SECUREENV=UNIT").is_none());
        env.remove("");
        env.remove("SECUREENV=UNIT");
    }

    #[test]
    fn process_env_lookup_misses_unset_key() {
        assert!(ProcessEnv.lookup("SECUREENV_UNIT_DEFINITELY_NOT_SET").is_none());
    }

    #[test]
    fn memory_env_counts_every_removal_call() {
        let env = MemoryEnv::new();
        env.set("TOKEN", "abc");

        env.remove("TOKEN");
        assert!(!env.contains("TOKEN"));
        assert_eq!(env.removals("TOKEN"), 1);

        env.remove("TOKEN");
        env.remove("NEVER_SET");

        assert_eq!(env.removals("TOKEN"), 2);
        assert_eq!(env.removals("NEVER_SET"), 1);
        assert_eq!(env.removals("UNTOUCHED"), 0);
        assert!(env.is_empty());
    }

    #[test]
    fn memory_env_lookup_through_reference() {
        let env = MemoryEnv::new();
        env.set("KEY", "value");
        let by_ref = &env;

        assert_eq!(by_ref.lookup("KEY").as_deref(), Some(OsStr::new("value")));
        assert_eq!(env.len(), 1);
    }
}
