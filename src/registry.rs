//! The variable registry.
//!
//! Declaration only: [`Registry::register`] appends and never fails. Every
//! check is deferred to the parse pass so all problems surface together.

use std::cell::RefCell;
use std::fmt;
use std::io::Write;
use std::string::String;
use std::sync::atomic::{AtomicU64, Ordering};
use std::vec::Vec;

use crate::builder::{FailurePolicy, RegistryBuilder};
use crate::help::generate_help;
use crate::resolved::Handle;
use crate::value::EnvType;
use crate::var::{Descriptor, Var};

static NEXT_REGISTRY_ID: AtomicU64 = AtomicU64::new(1);

/// Ordered set of declared environment variables.
pub struct Registry {
    pub(crate) id: u64,
    pub(crate) descriptors: Vec<Descriptor>,
    pub(crate) prefix: String,
    pub(crate) policy: FailurePolicy,
    pub(crate) diagnostics: RefCell<Box<dyn Write>>,
    pub(crate) exit: fn(i32),
    pub(crate) color: bool,
}

impl Registry {
    /// Start configuring a registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// A registry with default settings: no prefix, exit on failure.
    pub fn new() -> Self {
        RegistryBuilder::new().build()
    }

    pub(crate) fn from_parts(
        prefix: String,
        policy: FailurePolicy,
        diagnostics: Box<dyn Write>,
        exit: fn(i32),
        color: bool,
    ) -> Self {
        Self {
            id: NEXT_REGISTRY_ID.fetch_add(1, Ordering::Relaxed),
            descriptors: Vec::new(),
            prefix,
            policy,
            diagnostics: RefCell::new(diagnostics),
            exit,
            color,
        }
    }

    /// Register a variable, returning a handle to its eventual value.
    pub fn register<T: EnvType>(&mut self, var: Var<T>) -> Handle<T> {
        let index = self.descriptors.len();
        self.descriptors.push(var.into_descriptor());
        Handle::new(self.id, index)
    }

    /// The configured prefix (empty if none).
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The configured failure policy.
    pub fn failure_policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Effective environment key for a declared name.
    pub fn key_for(&self, name: &str) -> String {
        if self.prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}_{}", self.prefix, name.to_uppercase())
        }
    }

    /// Effective keys of all registered variables, in registration order.
    pub fn keys(&self) -> impl Iterator<Item = String> + '_ {
        self.descriptors.iter().map(|d| self.key_for(&d.name))
    }

    /// Registered descriptors, in registration order.
    pub fn descriptors(&self) -> &[Descriptor] {
        &self.descriptors
    }

    /// Number of registered variables.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Drop every registered variable.
    ///
    /// Handles issued before the call must not be used afterwards.
    pub fn clear(&mut self) {
        self.descriptors.clear();
        self.id = NEXT_REGISTRY_ID.fetch_add(1, Ordering::Relaxed);
    }

    /// Help text for all registered variables.
    pub fn help(&self) -> String {
        generate_help(
            self.descriptors
                .iter()
                .map(|d| (self.key_for(&d.name), d)),
        )
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("id", &self.id)
            .field("prefix", &self.prefix)
            .field("policy", &self.policy)
            .field("descriptors", &self.descriptors)
            .finish_non_exhaustive()
    }
}
