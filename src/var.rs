//! Variable descriptors.
//!
//! A [`Var<T>`] is the typed, caller-facing declaration. Registering it erases
//! the type into a [`Descriptor`], which is what the registry iterates over
//! when parsing and when generating help.

use std::error::Error;
use std::fmt;
use std::string::String;
use std::vec::Vec;

use crate::value::{EnvType, Value, VarKind};

/// Error type returned by validator functions.
pub type ValidationError = Box<dyn Error + Send + Sync + 'static>;

/// A validator that has been erased to operate on [`Value`].
pub(crate) type ErasedValidator = Box<dyn Fn(&Value) -> Result<(), ValidationError>>;

/// Declaration of a typed environment variable.
///
/// ```rust
/// use envreg::Var;
///
/// let port = Var::<i64>::new("PORT")
///     .description("Port to listen on.")
///     .default(8080)
///     .accepted([80, 443, 8080]);
/// ```
pub struct Var<T: EnvType> {
    name: String,
    description: String,
    default: T,
    required: bool,
    create: bool,
    validator: Option<Box<dyn Fn(&T) -> Result<(), ValidationError>>>,
    accepted: Option<Vec<T>>,
}

impl<T: EnvType> Var<T> {
    /// Declare a variable with the given name, as expected in the environment
    /// (before any prefix is applied).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            default: T::default(),
            required: false,
            create: false,
            validator: None,
            accepted: None,
        }
    }

    /// Description shown in the help text.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Value used when the variable is not set.
    pub fn default(mut self, value: impl Into<T>) -> Self {
        self.default = value.into();
        self
    }

    /// Mark the variable as required: parsing fails if it is not set.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Write the default value into the environment if the variable is not set.
    ///
    /// Cannot be combined with [`Var::required`].
    pub fn create(mut self) -> Self {
        self.create = true;
        self
    }

    /// Run `f` on the parsed value. Any error it returns fails the variable.
    ///
    /// Cannot be combined with [`Var::accepted`].
    pub fn validate<F, E>(mut self, f: F) -> Self
    where
        F: Fn(&T) -> Result<(), E> + 'static,
        E: Into<ValidationError>,
    {
        self.validator = Some(Box::new(
            move |value: &T| -> Result<(), ValidationError> { f(value).map_err(Into::into) },
        ));
        self
    }

    /// Restrict the parsed value to this exact set.
    ///
    /// Cannot be combined with [`Var::validate`].
    pub fn accepted<I>(mut self, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<T>,
    {
        self.accepted = Some(values.into_iter().map(Into::into).collect());
        self
    }

    pub(crate) fn into_descriptor(self) -> Descriptor {
        let validator = self.validator.map(|f| -> ErasedValidator {
            Box::new(move |value: &Value| match T::from_value(value) {
                Some(typed) => f(typed),
                // Descriptors only ever hold values converted with their own kind.
                None => Err(format!("expected a {} value, got {}", T::KIND, value.kind()).into()),
            })
        });

        Descriptor {
            name: self.name,
            description: self.description,
            kind: T::KIND,
            default: self.default.into_value(),
            required: self.required,
            create: self.create,
            validator,
            accepted: self
                .accepted
                .map(|values| values.into_iter().map(EnvType::into_value).collect()),
        }
    }
}

impl<T: EnvType + fmt::Debug> fmt::Debug for Var<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Var")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("default", &self.default)
            .field("required", &self.required)
            .field("create", &self.create)
            .field("validator", &self.validator.is_some())
            .field("accepted", &self.accepted)
            .finish()
    }
}

/// Type-erased declaration stored by the registry.
pub struct Descriptor {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) kind: VarKind,
    pub(crate) default: Value,
    pub(crate) required: bool,
    pub(crate) create: bool,
    pub(crate) validator: Option<ErasedValidator>,
    pub(crate) accepted: Option<Vec<Value>>,
}

impl Descriptor {
    /// Name as declared, without prefix.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Help description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Declared kind.
    pub fn kind(&self) -> VarKind {
        self.kind
    }

    /// Default value.
    pub fn default_value(&self) -> &Value {
        &self.default
    }

    /// Whether the variable must be set.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Whether the default is written to the environment when unset.
    pub fn is_create(&self) -> bool {
        self.create
    }

    /// Whether a validator function is configured.
    pub fn has_validator(&self) -> bool {
        self.validator.is_some()
    }

    /// The accepted-value set, if configured.
    pub fn accepted(&self) -> Option<&[Value]> {
        self.accepted.as_deref()
    }
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Descriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("default", &self.default)
            .field("required", &self.required)
            .field("create", &self.create)
            .field("validator", &self.validator.is_some())
            .field("accepted", &self.accepted)
            .finish()
    }
}
