//! The parse pass: resolve, convert and validate every registered variable.
//!
//! # Phases (per variable, in registration order)
//! 1. **Static checks**: name, uniqueness of the effective key, option conflicts
//! 2. **Lookup**: missing variables fall back to their default (or are created)
//! 3. **Convert** the raw string to the declared kind
//! 4. **Validate** against the accepted-value set or the validator
//!
//! A failing variable records one error and the pass moves on. Errors are only
//! acted on once every variable has been visited.

use std::collections::HashSet;
use std::io::{self, Write};
use std::string::String;
use std::vec::Vec;

use owo_colors::OwoColorize;

use crate::builder::FailurePolicy;
use crate::error::{ParseError, VarError, VarErrorKind};
use crate::registry::Registry;
use crate::resolved::{Entry, Origin, Resolved};
use crate::source::{EnvSource, StdEnv};
use crate::value::Value;
use crate::var::Descriptor;

impl Registry {
    /// Parse the process environment.
    ///
    /// See [`Registry::parse_from`].
    pub fn parse(&self) -> Result<Resolved, ParseError> {
        self.parse_from(&mut StdEnv)
    }

    /// Parse every registered variable from `source`.
    ///
    /// Variables marked with [`Var::create`](crate::Var::create) that are
    /// missing are written back into `source`.
    ///
    /// On failure the configured [`FailurePolicy`] applies. With
    /// [`FailurePolicy::Exit`] this does not return unless the exit function
    /// was replaced.
    pub fn parse_from(&self, source: &mut dyn EnvSource) -> Result<Resolved, ParseError> {
        tracing::trace!(
            variables = self.descriptors.len(),
            prefix = %self.prefix,
            "parse: starting pass"
        );

        let mut seen: HashSet<String> = HashSet::with_capacity(self.descriptors.len());
        let mut entries = Vec::with_capacity(self.descriptors.len());
        let mut errors = Vec::new();

        for descriptor in &self.descriptors {
            let key = self.key_for(&descriptor.name);
            match resolve(descriptor, &key, &mut seen, source) {
                Ok((value, origin)) => {
                    tracing::debug!(key = %key, origin = origin.as_str(), "parse: resolved variable");
                    entries.push(Entry { key, value, origin });
                }
                Err(kind) => {
                    tracing::debug!(key = %key, code = kind.code(), "parse: variable failed");
                    errors.push(VarError::new(key, kind));
                }
            }
        }

        if errors.is_empty() {
            tracing::trace!(variables = entries.len(), "parse: pass succeeded");
            return Ok(Resolved::new(self.id, entries));
        }

        tracing::debug!(errors = errors.len(), "parse: pass failed");
        self.fail(ParseError::new(errors))
    }

    /// Write the failure report: every error, a blank line, then the help text.
    pub fn write_failure_report(&self, out: &mut dyn Write, error: &ParseError) -> io::Result<()> {
        if self.color {
            writeln!(out, "{}", "Errors:".red().bold())?;
        } else {
            writeln!(out, "Errors:")?;
        }
        for var_error in error {
            writeln!(out, "{var_error}")?;
        }
        writeln!(out)?;
        write!(out, "{}", self.help())?;
        out.flush()
    }

    fn fail(&self, error: ParseError) -> Result<Resolved, ParseError> {
        match self.policy {
            FailurePolicy::Return => Err(error),
            FailurePolicy::Exit => {
                {
                    let mut sink = self.diagnostics.borrow_mut();
                    if let Err(e) = self.write_failure_report(&mut **sink, &error) {
                        tracing::warn!(error = %e, "parse: could not write failure report");
                    }
                }
                (self.exit)(error.exit_code());
                Err(error)
            }
        }
    }
}

fn resolve(
    descriptor: &Descriptor,
    key: &str,
    seen: &mut HashSet<String>,
    source: &mut dyn EnvSource,
) -> Result<(Value, Origin), VarErrorKind> {
    check_declaration(descriptor, key, seen)?;

    let raw = match source.lookup(key) {
        None => return resolve_missing(descriptor, key, source),
        Some(Ok(raw)) => raw,
        Some(Err(undecodable)) => {
            return Err(VarErrorKind::Conversion {
                kind: descriptor.kind,
                raw: undecodable.to_string_lossy().into_owned(),
                reason: "value is not valid UTF-8".to_string(),
            });
        }
    };

    let value = descriptor
        .kind
        .convert(&raw)
        .map_err(|e| VarErrorKind::Conversion {
            kind: descriptor.kind,
            raw: raw.clone(),
            reason: e.reason,
        })?;

    if let Some(accepted) = &descriptor.accepted {
        if !accepted.contains(&value) {
            return Err(VarErrorKind::NotAccepted {
                raw,
                value,
                accepted: accepted.clone(),
            });
        }
    } else if let Some(validator) = &descriptor.validator
        && let Err(rejection) = validator(&value)
    {
        return Err(VarErrorKind::Validation {
            raw,
            source: rejection,
        });
    }

    Ok((value, Origin::Environment { raw }))
}

/// Checks that only depend on the declaration, not on the environment.
fn check_declaration(
    descriptor: &Descriptor,
    key: &str,
    seen: &mut HashSet<String>,
) -> Result<(), VarErrorKind> {
    if descriptor.name.is_empty() {
        return Err(VarErrorKind::InvalidName);
    }
    if !seen.insert(key.to_string()) {
        return Err(VarErrorKind::DuplicateName);
    }
    if descriptor.required && descriptor.create {
        return Err(VarErrorKind::CreateAndRequired);
    }
    if descriptor.validator.is_some() && descriptor.accepted.is_some() {
        return Err(VarErrorKind::ValidatorAndAccepted);
    }
    Ok(())
}

fn resolve_missing(
    descriptor: &Descriptor,
    key: &str,
    source: &mut dyn EnvSource,
) -> Result<(Value, Origin), VarErrorKind> {
    if descriptor.required {
        return Err(VarErrorKind::MissingRequired);
    }
    if descriptor.create {
        let rendered = descriptor.default.to_string();
        tracing::debug!(key = %key, value = %rendered, "parse: creating missing variable");
        source
            .set(key, &rendered)
            .map_err(|e| VarErrorKind::Create {
                reason: e.to_string(),
            })?;
        return Ok((descriptor.default.clone(), Origin::Created));
    }
    Ok((descriptor.default.clone(), Origin::Default))
}
