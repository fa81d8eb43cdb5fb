//! Error types for binding environment data into configuration structs

use std::fmt;
use std::path::PathBuf;

/// A single field that could not be bound.
///
/// Binding never stops at the first failure; every failing field produces one
/// `BindError` and all of them are returned together as [`BindErrors`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindError {
    /// Required field has neither an environment value nor a default.
    #[error("Field '{field}' requires environment variable '{env_key}' but it is not set and has no default")]
    MissingRequired {
        /// Name of the struct field
        field: String,
        /// Environment variable the field is bound to
        env_key: String,
    },

    /// A value was found but could not be converted into the field's type.
    ///
    /// Occurs for malformed input as well as for values that overflow the
    /// target width.
    #[error("Failed to parse environment variable '{env_key}' into field '{field}' as {type_name}: {message}")]
    ConversionFailed {
        /// Name of the struct field
        field: String,
        /// Environment variable the field is bound to
        env_key: String,
        /// Declared type of the field
        type_name: String,
        /// Diagnostic from the parser
        message: String,
    },

    /// The field's declared type has no conversion rule.
    ///
    /// Reported on every bind regardless of whether a value was supplied.
    #[error("Field '{field}' bound to '{env_key}' has unsupported type {type_name}: {reason}")]
    UnsupportedType {
        /// Name of the struct field
        field: String,
        /// Environment variable the field is bound to
        env_key: String,
        /// Declared type of the field
        type_name: String,
        /// Why the type cannot be bound
        reason: String,
    },
}

/// Discriminant of [`BindError`], convenient for matching and counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindErrorKind {
    MissingRequired,
    ConversionFailed,
    UnsupportedType,
}

impl BindError {
    /// Name of the struct field that failed.
    pub fn field(&self) -> &str {
        match self {
            Self::MissingRequired { field, .. }
            | Self::ConversionFailed { field, .. }
            | Self::UnsupportedType { field, .. } => field,
        }
    }

    /// Environment variable the failing field is bound to.
    pub fn env_key(&self) -> &str {
        match self {
            Self::MissingRequired { env_key, .. }
            | Self::ConversionFailed { env_key, .. }
            | Self::UnsupportedType { env_key, .. } => env_key,
        }
    }

    pub fn kind(&self) -> BindErrorKind {
        match self {
            Self::MissingRequired { .. } => BindErrorKind::MissingRequired,
            Self::ConversionFailed { .. } => BindErrorKind::ConversionFailed,
            Self::UnsupportedType { .. } => BindErrorKind::UnsupportedType,
        }
    }
}

/// Every field failure collected during one bind.
///
/// Never empty when returned from [`bind`](crate::bind).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindErrors {
    errors: Vec<BindError>,
}

impl BindErrors {
    pub(crate) fn new(errors: Vec<BindError>) -> Self {
        Self { errors }
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BindError> {
        self.errors.iter()
    }

    pub fn as_slice(&self) -> &[BindError] {
        &self.errors
    }

    /// Errors of one kind, in field order.
    pub fn of_kind(&self, kind: BindErrorKind) -> impl Iterator<Item = &BindError> {
        self.errors.iter().filter(move |e| e.kind() == kind)
    }

    /// First error reported for the named field, if any.
    pub fn for_field(&self, field: &str) -> Option<&BindError> {
        self.errors.iter().find(|e| e.field() == field)
    }
}

impl fmt::Display for BindErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Configuration failed with {} error(s):", self.errors.len())?;
        for error in &self.errors {
            write!(f, "\n  - {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for BindErrors {}

impl IntoIterator for BindErrors {
    type Item = BindError;
    type IntoIter = std::vec::IntoIter<BindError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a BindErrors {
    type Item = &'a BindError;
    type IntoIter = std::slice::Iter<'a, BindError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// Failure to produce a key/value mapping from a source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The env file exists but could not be read.
    ///
    /// A missing file is not an error; it yields an empty mapping.
    #[error("Failed to read env file '{}': {source}", .path.display())]
    Read {
        /// Path of the env file
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

/// Top-level error for the convenience loaders.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// One or more fields failed to bind.
    #[error(transparent)]
    Bind(#[from] BindErrors),

    /// The source mapping could not be produced.
    #[error(transparent)]
    Source(#[from] SourceError),
}

impl Error {
    /// Field failures, when this is a bind error.
    pub fn bind_errors(&self) -> Option<&BindErrors> {
        match self {
            Self::Bind(errors) => Some(errors),
            Self::Source(_) => None,
        }
    }
}
