//! Builder API for a [`Registry`].
//!
//! Everything that used to be a process-wide switch (prefix, exit-on-error,
//! output stream) is configured here, once, before variables are registered.

use std::io::Write;
use std::string::String;

use crate::color::ColorChoice;
use crate::registry::Registry;

/// What a parse does when any variable fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Print every error and the help text to the diagnostics sink, then
    /// terminate the process with exit code 1.
    #[default]
    Exit,

    /// Hand the aggregate [`ParseError`](crate::ParseError) back to the caller.
    Return,
}

/// Builder for a [`Registry`].
pub struct RegistryBuilder {
    prefix: String,
    policy: FailurePolicy,
    diagnostics: Option<Box<dyn Write>>,
    exit: fn(i32),
    color: ColorChoice,
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            policy: FailurePolicy::default(),
            diagnostics: None,
            exit: exit_process,
            color: ColorChoice::default(),
        }
    }
}

impl RegistryBuilder {
    /// Create a new registry builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the environment variable prefix.
    ///
    /// With prefix `MYAPP`, a variable named `port` is read from `MYAPP_PORT`.
    /// An empty prefix disables prefixing.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Choose what happens when a parse fails.
    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Shorthand for `failure_policy(FailurePolicy::Return)`.
    pub fn return_errors(self) -> Self {
        self.failure_policy(FailurePolicy::Return)
    }

    /// Where [`FailurePolicy::Exit`] writes its diagnostics. Defaults to stderr.
    pub fn diagnostics(mut self, sink: impl Write + 'static) -> Self {
        self.diagnostics = Some(Box::new(sink));
        self
    }

    /// Function [`FailurePolicy::Exit`] calls to terminate the process.
    /// Defaults to [`std::process::exit`].
    ///
    /// If the function returns, the parse returns the error instead.
    pub fn exit_with(mut self, exit: fn(i32)) -> Self {
        self.exit = exit;
        self
    }

    /// Colour the failure diagnostics header.
    pub fn color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }

    /// Build the registry.
    pub fn build(self) -> Registry {
        let diagnostics = self
            .diagnostics
            .unwrap_or_else(|| Box::new(std::io::stderr()));
        Registry::from_parts(
            self.prefix,
            self.policy,
            diagnostics,
            self.exit,
            self.color.enabled(),
        )
    }
}

fn exit_process(code: i32) {
    std::process::exit(code)
}
