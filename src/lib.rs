#![warn(missing_docs)]
#![deny(unsafe_code)]
//! # envreg - declared, validated environment variables
//!
//! Declare every environment variable your program reads up front, with its
//! type, default, and constraints. Then parse them all in one pass and get
//! back either the typed values or every problem at once.
//!
//! ## Quick Start
//!
//! ```rust
//! use envreg::{MockEnv, Registry, Var};
//!
//! let mut registry = Registry::builder().prefix("MYAPP").return_errors().build();
//!
//! let level = registry.register(
//!     Var::<String>::new("LOG_LEVEL")
//!         .description("Log level.")
//!         .default("INFO"),
//! );
//! let port = registry.register(
//!     Var::<i64>::new("SERVER_PORT")
//!         .description("Server port.")
//!         .required()
//!         .accepted([80, 443]),
//! );
//!
//! let mut env = MockEnv::from_pairs([("MYAPP_SERVER_PORT", "443")]);
//! let resolved = registry.parse_from(&mut env).unwrap();
//!
//! assert_eq!(resolved.get(level), "INFO");
//! assert_eq!(*resolved.get(port), 443);
//! ```
//!
//! ## Failure handling
//!
//! By default ([`FailurePolicy::Exit`]) a failed parse prints every error and
//! the help text to stderr and exits with code 1. With
//! [`FailurePolicy::Return`] the aggregate [`ParseError`] is returned instead:
//!
//! ```rust
//! use envreg::{MockEnv, Registry, Var, VarErrorKind};
//!
//! let mut registry = Registry::builder().return_errors().build();
//! registry.register(Var::<i64>::new("PORT").accepted([80, 443]));
//! registry.register(Var::<String>::new("TOKEN").required());
//!
//! let mut env = MockEnv::from_pairs([("PORT", "334")]);
//! let err = registry.parse_from(&mut env).unwrap_err();
//!
//! assert_eq!(err.len(), 2);
//! assert!(matches!(err.errors()[0].kind, VarErrorKind::NotAccepted { .. }));
//! assert!(matches!(err.errors()[1].kind, VarErrorKind::MissingRequired));
//! ```
//!
//! ## Options
//!
//! | Option | Effect |
//! |--------|--------|
//! | [`Var::description`] | Text shown in [`Registry::help`] |
//! | [`Var::default`] | Value used when unset (defaults to the type's zero value) |
//! | [`Var::required`] | Unset is an error |
//! | [`Var::create`] | Unset writes the default into the environment |
//! | [`Var::accepted`] | Value must be one of a fixed set |
//! | [`Var::validate`] | Value must pass a function |
//!
//! `required` and `create` are mutually exclusive, and so are `accepted` and
//! `validate`. Both conflicts are reported when parsing.

mod builder;
mod color;
mod error;
pub mod help;
mod parse;
mod registry;
mod resolved;
mod source;
mod value;
mod var;

pub use builder::{FailurePolicy, RegistryBuilder};
pub use color::ColorChoice;
pub use error::{ParseError, VarError, VarErrorKind};
pub use registry::Registry;
pub use resolved::{Handle, Origin, Resolved};
pub use source::{EnvSource, MockEnv, StdEnv};
pub use value::{ConversionError, EnvType, Value, VarKind};
pub use var::{Descriptor, ValidationError, Var};
