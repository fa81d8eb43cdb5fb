//! Per-type binding descriptors.
//!
//! `#[derive(EnvBind)]` emits a lazily built [`FieldSpec`] table for every struct.
//! The table lists each field carrying an `env` key, in declaration order, and
//! is built on first use.

use std::fmt;

use serde::Serialize;

use crate::error::Error;
use crate::source::{EnvFile, Layered, Mapping, ProcessEnv, SourceProvider};

/// Conversion family of a single value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarKind {
    String,
    /// Signed integers of any width
    Int,
    /// Unsigned integers of any width
    Uint,
    Float,
    Bool,
    /// `std::time::Duration` or [`SignedDuration`](crate::SignedDuration)
    Duration,
}

/// Conversion rule of a field, derived from its declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum Kind {
    Scalar(ScalarKind),
    /// `Vec<T>` with a scalar element type
    Slice(ScalarKind),
    /// `HashMap<String, V>` or `BTreeMap<String, V>` with a scalar value type
    Map(ScalarKind),
    /// The declared type has no conversion rule.
    Unsupported {
        /// Why the type cannot be bound
        reason: &'static str,
    },
}

impl Kind {
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported { .. })
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::String => "string",
            Self::Int => "integer",
            Self::Uint => "unsigned integer",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Duration => "duration",
        })
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(kind) => write!(f, "{kind}"),
            Self::Slice(kind) => write!(f, "list of {kind}"),
            Self::Map(kind) => write!(f, "map of string to {kind}"),
            Self::Unsupported { .. } => f.write_str("unsupported"),
        }
    }
}

/// Binding metadata of one struct field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    /// Struct field identifier
    pub name: &'static str,
    /// Environment key, with the struct-level prefix applied
    pub env_key: &'static str,
    /// Raw default used when the key is absent
    pub default: Option<&'static str>,
    /// Whether an absent key without default is an error
    pub required: bool,
    /// Declared type as written in the struct
    pub type_name: &'static str,
    pub kind: Kind,
}

/// A struct that can be populated from environment data.
///
/// Implement with `#[derive(EnvBind)]`:
///
/// ```rust
/// use envbind::EnvBind;
/// use std::collections::HashMap;
///
/// #[derive(Debug, Default, EnvBind)]
/// struct Config {
///     #[bind(env = "PORT", default = "3000")]
///     port: u16,
///
///     #[bind(env = "DEBUG")]
///     debug: bool,
/// }
///
/// # fn main() -> anyhow::Result<()> {
/// let mapping = HashMap::from([("PORT".to_string(), "8080".to_string())]);
/// let mut config = Config::default();
/// envbind::bind(&mut config, &mapping)?;
/// assert_eq!(config.port, 8080);
/// assert!(!config.debug);
/// # Ok(())
/// # }
/// ```
pub trait EnvBind {
    /// Descriptor table of every bound field.
    fn fields() -> &'static [FieldSpec]
    where
        Self: Sized;

    /// Convert `raw` and store it into the field at `index` of [`fields`](Self::fields).
    ///
    /// Returns the parser diagnostic on failure, leaving the field untouched.
    #[doc(hidden)]
    fn assign_field(&mut self, index: usize, raw: &str) -> Result<(), String>;

    /// Build from `Default` and bind the given source.
    fn from_source<S>(source: &S) -> Result<Self, Error>
    where
        Self: Default + Sized,
        S: SourceProvider + ?Sized,
    {
        let mapping = source.mapping()?;
        Ok(Self::from_mapping(&mapping)?)
    }

    /// Build from `Default` and bind an in-memory mapping.
    fn from_mapping(mapping: &Mapping) -> Result<Self, crate::BindErrors>
    where
        Self: Default + Sized,
    {
        let mut config = Self::default();
        crate::bind(&mut config, mapping)?;
        Ok(config)
    }

    /// Load from the process environment only.
    ///
    /// # Errors
    ///
    /// - Required environment variables are not set
    /// - Values cannot be converted into the field types
    fn from_env() -> Result<Self, Error>
    where
        Self: Default + Sized,
    {
        Self::from_source(&ProcessEnv)
    }

    /// Load from an env file only. A missing file binds defaults.
    fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, Error>
    where
        Self: Default + Sized,
    {
        Self::from_source(&EnvFile::new(path))
    }

    /// Load from an env file overlaid by the process environment.
    ///
    /// Process variables win over file entries with the same key. A missing
    /// file is logged as a warning and binding continues from the process
    /// environment and defaults.
    fn load(path: impl AsRef<std::path::Path>) -> Result<Self, Error>
    where
        Self: Default + Sized,
    {
        Self::from_source(&Layered::new(EnvFile::new(path), ProcessEnv))
    }
}
