//! Errors reported by a parse pass.
//!
//! Every problem found during a pass becomes a [`VarError`]; the pass keeps
//! going and hands all of them back at once as a [`ParseError`].

use std::fmt;
use std::string::String;
use std::vec::Vec;

use crate::value::{Value, VarKind};
use crate::var::ValidationError;

/// An error for a single variable.
#[derive(Debug)]
pub struct VarError {
    /// Effective environment key of the variable.
    pub key: String,

    /// What went wrong.
    pub kind: VarErrorKind,
}

impl VarError {
    pub(crate) fn new(key: impl Into<String>, kind: VarErrorKind) -> Self {
        Self {
            key: key.into(),
            kind,
        }
    }

    /// The raw environment value involved in the error, if there was one.
    pub fn raw_value(&self) -> Option<&str> {
        match &self.kind {
            VarErrorKind::Conversion { raw, .. }
            | VarErrorKind::NotAccepted { raw, .. }
            | VarErrorKind::Validation { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

/// The kinds of per-variable errors.
#[derive(Debug)]
#[non_exhaustive]
pub enum VarErrorKind {
    /// The variable was declared with an empty name.
    InvalidName,

    /// Another variable with the same effective key was registered earlier.
    DuplicateName,

    /// The variable is required but not set.
    MissingRequired,

    /// The variable is both required and marked for creation.
    CreateAndRequired,

    /// The variable has both a validator and an accepted-value set.
    ValidatorAndAccepted,

    /// The raw string could not be converted to the declared kind.
    Conversion {
        /// Declared kind.
        kind: VarKind,
        /// Raw string from the environment.
        raw: String,
        /// Converter message.
        reason: String,
    },

    /// The parsed value is not in the accepted-value set.
    NotAccepted {
        /// Raw string from the environment.
        raw: String,
        /// The parsed value.
        value: Value,
        /// The full accepted-value set.
        accepted: Vec<Value>,
    },

    /// The validator function rejected the parsed value.
    Validation {
        /// Raw string from the environment.
        raw: String,
        /// The error returned by the validator.
        source: ValidationError,
    },

    /// The variable was missing and writing its default to the environment failed.
    Create {
        /// Why the write was refused.
        reason: String,
    },
}

impl VarErrorKind {
    /// Returns a stable error code for this kind.
    pub const fn code(&self) -> &'static str {
        match self {
            VarErrorKind::InvalidName => "env::invalid_name",
            VarErrorKind::DuplicateName => "env::duplicate_name",
            VarErrorKind::MissingRequired => "env::missing_required",
            VarErrorKind::CreateAndRequired => "env::create_and_required",
            VarErrorKind::ValidatorAndAccepted => "env::validator_and_accepted",
            VarErrorKind::Conversion { .. } => "env::conversion",
            VarErrorKind::NotAccepted { .. } => "env::not_accepted",
            VarErrorKind::Validation { .. } => "env::validation",
            VarErrorKind::Create { .. } => "env::create_failed",
        }
    }

    /// Returns a short label for the error.
    pub fn label(&self) -> String {
        match self {
            VarErrorKind::InvalidName => "variable name is invalid".to_string(),
            VarErrorKind::DuplicateName => "variable name already exists".to_string(),
            VarErrorKind::MissingRequired => "variable is required".to_string(),
            VarErrorKind::CreateAndRequired => {
                "variable can't be marked for creation and required at the same time".to_string()
            }
            VarErrorKind::ValidatorAndAccepted => {
                "variable can't have a validator and accepted values at the same time".to_string()
            }
            VarErrorKind::Conversion { kind, .. } => format!("variable is not a valid {kind}"),
            VarErrorKind::NotAccepted { .. } => "variable value not in accepted values".to_string(),
            VarErrorKind::Validation { .. } => "variable validation failed".to_string(),
            VarErrorKind::Create { .. } => "variable could not be created".to_string(),
        }
    }
}

impl fmt::Display for VarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.label(), self.key)?;
        match &self.kind {
            VarErrorKind::Conversion { raw, reason, .. } => write!(f, "={raw:?} ({reason})"),
            VarErrorKind::NotAccepted {
                value, accepted, ..
            } => write!(f, "={value} {}", format_value_set(accepted)),
            VarErrorKind::Validation { source, .. } => write!(f, ": {source}"),
            VarErrorKind::Create { reason } => write!(f, ": {reason}"),
            _ => Ok(()),
        }
    }
}

impl std::error::Error for VarError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            VarErrorKind::Validation { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// Render a value set as `[a, b, c]`.
pub(crate) fn format_value_set(values: &[Value]) -> String {
    let items: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    format!("[{}]", items.join(", "))
}

/// All errors from one parse pass, in registration order.
#[derive(Debug)]
pub struct ParseError {
    errors: Vec<VarError>,
}

impl ParseError {
    pub(crate) fn new(errors: Vec<VarError>) -> Self {
        Self { errors }
    }

    /// The individual errors.
    pub fn errors(&self) -> &[VarError] {
        &self.errors
    }

    /// Iterate over the individual errors.
    pub fn iter(&self) -> std::slice::Iter<'_, VarError> {
        self.errors.iter()
    }

    /// Number of errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Always false for errors returned by a parse.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Find the first error for an effective key.
    pub fn for_key(&self, key: &str) -> Option<&VarError> {
        self.errors.iter().find(|e| e.key == key)
    }

    /// Process exit code for a failed parse.
    pub fn exit_code(&self) -> i32 {
        1
    }

    /// Render every error as an Ariadne report.
    ///
    /// Errors that involve a raw value are shown against a `KEY=value` line
    /// with the value underlined.
    pub fn render_pretty(&self) -> String {
        use ariadne::{Color, Label, Report, ReportKind, Source};

        let mut output = Vec::new();

        for error in &self.errors {
            let Some(raw) = error.raw_value() else {
                output.extend_from_slice(b"Error: ");
                output.extend_from_slice(error.to_string().as_bytes());
                output.push(b'\n');
                continue;
            };

            let line = format!("{}={}", error.key, raw);
            let start = error.key.chars().count() + 1;
            let span = start..(start + raw.chars().count());
            let mut cache = NamedSource {
                name: format!("${}", error.key),
                source: Source::from(line),
            };

            let report = Report::build(ReportKind::Error, span.clone())
                .with_code(error.kind.code())
                .with_message(error.to_string())
                .with_label(
                    Label::new(span)
                        .with_message(error.kind.label())
                        .with_color(Color::Red),
                )
                .finish();

            report.write(&mut cache, &mut output).ok();
        }

        String::from_utf8(output).unwrap_or_else(|_| "error rendering diagnostics".to_string())
    }
}

/// A simple cache that wraps a Source and provides a display name.
struct NamedSource {
    name: String,
    source: ariadne::Source<String>,
}

impl ariadne::Cache<()> for NamedSource {
    type Storage = String;

    fn fetch(&mut self, _: &()) -> Result<&ariadne::Source<Self::Storage>, impl std::fmt::Debug> {
        Ok::<_, std::convert::Infallible>(&self.source)
    }

    fn display<'a>(&self, _: &'a ()) -> Option<impl std::fmt::Display + 'a> {
        Some(self.name.clone())
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse env vars:")?;
        for error in &self.errors {
            write!(f, "\n{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

impl IntoIterator for ParseError {
    type Item = VarError;
    type IntoIter = std::vec::IntoIter<VarError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ParseError {
    type Item = &'a VarError;
    type IntoIter = std::slice::Iter<'a, VarError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
