//! Environment-table abstraction.
//!
//! The loader never touches `std::env` directly; it goes through the
//! [`EnvTable`] trait so the process environment stays an injected
//! collaborator. [`ProcessEnv`] is the real thing, [`MemoryEnv`] is an
//! in-memory stand-in for tests and embedders that must not mutate global
//! process state.

use std::collections::HashMap;

use crate::error::{EnvError, EnvResult};

/// A key/value store of environment variables.
///
/// Implementations provide no locking; callers that interleave reads and
/// writes from multiple threads must serialize externally.
pub trait EnvTable {
    /// Looks up a single variable.
    fn get(&self, key: &str) -> Option<String>;

    /// Sets a variable, overwriting any existing value.
    ///
    /// # Errors
    ///
    /// Returns an error if the table refuses the key or value.
    fn set(&mut self, key: &str, value: &str) -> EnvResult<()>;

    /// Removes a variable. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the table refuses the key.
    fn unset(&mut self, key: &str) -> EnvResult<()>;

    /// Returns every `(key, value)` pair in the table.
    fn vars(&self) -> Vec<(String, String)>;
}

/// The host process's environment table.
///
/// `set` and `unset` write through `std::env`, which mutates global process
/// state and is not thread-safe for concurrent environment access. Keys the
/// platform would reject outright (empty, containing `=` or NUL) are turned
/// into errors instead of panics.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvTable for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        // std::env::var panics on names the platform can't represent.
        if check_key(key).is_err() {
            return None;
        }
        std::env::var(key).ok()
    }

    fn set(&mut self, key: &str, value: &str) -> EnvResult<()> {
        check_key(key)?;
        if value.contains('\0') {
            return Err(EnvError::TableRejected {
                key: key.to_string(),
                reason: "value contains a NUL byte".to_string(),
            });
        }
        unsafe {
            std::env::set_var(key, value);
        }
        Ok(())
    }

    fn unset(&mut self, key: &str) -> EnvResult<()> {
        check_key(key)?;
        unsafe {
            std::env::remove_var(key);
        }
        Ok(())
    }

    fn vars(&self) -> Vec<(String, String)> {
        std::env::vars_os()
            .map(|(key, value)| {
                (
                    key.to_string_lossy().into_owned(),
                    value.to_string_lossy().into_owned(),
                )
            })
            .collect()
    }
}

fn check_key(key: &str) -> EnvResult<()> {
    if key.is_empty() || key.contains('=') || key.contains('\0') {
        return Err(EnvError::TableRejected {
            key: key.to_string(),
            reason: "invalid variable name".to_string(),
        });
    }
    Ok(())
}

/// An in-memory environment table.
///
/// # Examples
///
/// ```rust
/// use envful::{EnvTable, MemoryEnv};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut env = MemoryEnv::new();
/// env.set("PORT", "8080")?;
/// assert_eq!(env.get("PORT"), Some("8080".to_string()));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default, Clone)]
pub struct MemoryEnv {
    vars: HashMap<String, String>,
}

impl MemoryEnv {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table pre-populated from an existing map.
    pub fn from_vars(vars: HashMap<String, String>) -> Self {
        Self { vars }
    }

    /// Returns the number of variables in the table.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Returns `true` if the table holds no variables.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl EnvTable for MemoryEnv {
    fn get(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> EnvResult<()> {
        self.vars.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn unset(&mut self, key: &str) -> EnvResult<()> {
        self.vars.remove(key);
        Ok(())
    }

    fn vars(&self) -> Vec<(String, String)> {
        self.vars
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}
