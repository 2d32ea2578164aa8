//! Where raw values come from.
//!
//! Resolution reads a single key from a [`ReadEnv`]. [`SystemEnv`] reads the
//! process environment; [`InMemoryEnv`] is a map that can stand in for it.
//!
//! ```
//! use env_var::{env, InMemoryEnv};
//!
//! let source = InMemoryEnv::new();
//! source.set("WORKERS", "4");
//!
//! let workers = env("WORKERS").as_int().required_from(&source).unwrap();
//! assert_eq!(workers, 4);
//! ```

use std::{
    collections::HashMap,
    env,
    sync::{PoisonError, RwLock},
};

/// Read access to a set of environment variables
pub trait ReadEnv {
    fn var(&self, key: &str) -> Result<String, env::VarError>;
}

impl<E: ReadEnv + ?Sized> ReadEnv for &E {
    fn var(&self, key: &str) -> Result<String, env::VarError> {
        (**self).var(key)
    }
}

/// The environment of the current process
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl ReadEnv for SystemEnv {
    fn var(&self, key: &str) -> Result<String, env::VarError> {
        env::var(key)
    }
}

/// Map-backed environment, populated through `&self`
#[derive(Debug, Default)]
pub struct InMemoryEnv {
    vars: RwLock<HashMap<String, String>>,
}

impl InMemoryEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.vars
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), value.into());
    }

    pub fn remove(&self, key: &str) {
        self.vars
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for InMemoryEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let vars = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            vars: RwLock::new(vars),
        }
    }
}

impl ReadEnv for InMemoryEnv {
    fn var(&self, key: &str) -> Result<String, env::VarError> {
        self.vars
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
            .ok_or(env::VarError::NotPresent)
    }
}
