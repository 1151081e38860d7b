//! The output of a successful parse.
//!
//! A [`Handle<T>`] is handed out at registration time but can only be read
//! through a [`Resolved`], which only exists once parsing succeeded. Reading a
//! value before parsing therefore does not compile.

use std::fmt;
use std::marker::PhantomData;
use std::string::String;
use std::vec::Vec;

use crate::value::{EnvType, Value};

/// Where a resolved value came from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Origin {
    /// The variable was set in the environment.
    Environment {
        /// The raw string read from the environment.
        raw: String,
    },

    /// The variable was unset; the default applies.
    #[default]
    Default,

    /// The variable was unset and its default was written into the environment.
    Created,
}

impl Origin {
    /// Short label, used in logs.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Origin::Environment { .. } => "environment",
            Origin::Default => "default",
            Origin::Created => "created",
        }
    }
}

/// Typed reference to a registered variable.
///
/// Cheap to copy. Read it with [`Resolved::get`].
pub struct Handle<T> {
    pub(crate) registry: u64,
    pub(crate) index: usize,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    pub(crate) fn new(registry: u64, index: usize) -> Self {
        Self {
            registry,
            index,
            _phantom: PhantomData,
        }
    }

    /// Position of the variable in registration order.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("registry", &self.registry)
            .field("index", &self.index)
            .finish()
    }
}

/// One resolved variable.
#[derive(Debug, Clone)]
pub(crate) struct Entry {
    pub(crate) key: String,
    pub(crate) value: Value,
    pub(crate) origin: Origin,
}

/// Values produced by a successful parse, in registration order.
#[derive(Debug, Clone)]
pub struct Resolved {
    registry: u64,
    entries: Vec<Entry>,
}

impl Resolved {
    pub(crate) fn new(registry: u64, entries: Vec<Entry>) -> Self {
        Self { registry, entries }
    }

    /// Get the value behind a handle.
    ///
    /// # Panics
    ///
    /// Panics if the handle was issued by a different registry, or registered
    /// after this parse. That is a programming error, not a configuration
    /// error.
    pub fn get<T: EnvType>(&self, handle: Handle<T>) -> &T {
        let entry = self.entry(handle);
        match T::from_value(&entry.value) {
            Some(value) => value,
            None => panic!(
                "envreg: `{}` holds a {} value, not {}",
                entry.key,
                entry.value.kind(),
                T::KIND
            ),
        }
    }

    /// Like [`Resolved::get`], but returns `None` for a foreign handle.
    pub fn try_get<T: EnvType>(&self, handle: Handle<T>) -> Option<&T> {
        if handle.registry != self.registry {
            return None;
        }
        self.entries
            .get(handle.index)
            .and_then(|entry| T::from_value(&entry.value))
    }

    /// Where the value behind a handle came from.
    ///
    /// # Panics
    ///
    /// Panics if the handle was issued by a different registry.
    pub fn origin<T>(&self, handle: Handle<T>) -> &Origin {
        &self.entry(handle).origin
    }

    /// Effective environment key behind a handle.
    ///
    /// # Panics
    ///
    /// Panics if the handle was issued by a different registry.
    pub fn key<T>(&self, handle: Handle<T>) -> &str {
        &self.entry(handle).key
    }

    /// Iterate over `(key, value, origin)` in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value, &Origin)> + '_ {
        self.entries
            .iter()
            .map(|entry| (entry.key.as_str(), &entry.value, &entry.origin))
    }

    /// Number of resolved variables.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry<T>(&self, handle: Handle<T>) -> &Entry {
        assert!(
            handle.registry == self.registry,
            "envreg: handle was issued by a different registry"
        );
        match self.entries.get(handle.index) {
            Some(entry) => entry,
            None => panic!("envreg: handle was registered after this parse"),
        }
    }
}
