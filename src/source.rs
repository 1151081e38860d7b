//! Environment variable sources.
//!
//! Parsing never touches `std::env` directly: it goes through an
//! [`EnvSource`], so tests can run against a [`MockEnv`] without mutating the
//! process environment.

use std::ffi::OsString;
use std::io;
use std::string::String;

use indexmap::IndexMap;

/// Trait for abstracting over environment variable sources.
pub trait EnvSource {
    /// Get the value of an environment variable by name.
    fn get(&self, name: &str) -> Option<String>;

    /// Look up a variable, keeping values that are set but not valid UTF-8.
    ///
    /// `None` means unset. `Some(Err(_))` carries the undecodable value.
    fn lookup(&self, name: &str) -> Option<Result<String, OsString>> {
        self.get(name).map(Ok)
    }

    /// Set an environment variable.
    fn set(&mut self, name: &str, value: &str) -> io::Result<()>;

    /// Iterate over all environment variables with UTF-8 names and values.
    fn vars(&self) -> Box<dyn Iterator<Item = (String, String)> + '_>;
}

/// Environment source that reads from and writes to the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdEnv;

impl EnvSource for StdEnv {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn lookup(&self, name: &str) -> Option<Result<String, OsString>> {
        std::env::var_os(name).map(OsString::into_string)
    }

    #[allow(unsafe_code)]
    fn set(&mut self, name: &str, value: &str) -> io::Result<()> {
        check_settable(name, value)?;
        // SAFETY: registration and parsing happen during single-threaded
        // program startup; concurrent environment access is unsupported.
        unsafe { std::env::set_var(name, value) };
        Ok(())
    }

    fn vars(&self) -> Box<dyn Iterator<Item = (String, String)> + '_> {
        Box::new(
            std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?))),
        )
    }
}

/// `std::env::set_var` panics on these inputs instead of failing.
fn check_settable(name: &str, value: &str) -> io::Result<()> {
    if name.is_empty() || name.contains(['=', '\0']) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid environment variable name {name:?}"),
        ));
    }
    if value.contains('\0') {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("value for {name} contains a NUL byte"),
        ));
    }
    Ok(())
}

/// Environment source backed by a map (for testing).
#[derive(Debug, Clone, Default)]
pub struct MockEnv {
    vars: IndexMap<String, String, std::hash::RandomState>,
}

impl MockEnv {
    /// Create a new empty mock environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock environment from an iterator of key-value pairs.
    pub fn from_pairs<I, K, V>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Insert a variable, builder style.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Remove a variable, returning its previous value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.vars.shift_remove(name)
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether the environment is empty.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl EnvSource for MockEnv {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }

    fn set(&mut self, name: &str, value: &str) -> io::Result<()> {
        self.vars.insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn vars(&self) -> Box<dyn Iterator<Item = (String, String)> + '_> {
        Box::new(self.vars.iter().map(|(k, v)| (k.clone(), v.clone())))
    }
}
