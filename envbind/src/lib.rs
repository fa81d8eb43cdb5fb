//! Bind `.env` files and environment variables into typed configuration structs
//!
//! `envbind` populates a struct from key/value environment data using
//! declarative per-field attributes. Each field names its source key, an
//! optional default, and whether it is required. All fields are processed in
//! one pass and every problem is reported together.
//!
//! # Features
//!
//! - **Declarative**: Automatic implementation with `#[derive(EnvBind)]`
//! - **Error accumulation**: Missing, malformed and unsupported fields are all reported at once
//! - **Collections**: Comma-separated lists and `key:value` maps
//! - **Durations**: Compound durations such as `1h30m` or `250ms`
//! - **Layered sources**: `.env` file overlaid by the process environment
//!
//! # Value Parsing
//!
//! - Strings: `DATABASE_URL=postgres://localhost/db` (verbatim)
//! - Integers: `MAX_CONNECTIONS=42` (base 10, overflow is an error)
//! - Floats: `RATIO=0.75`, `LIMIT=1e6`
//! - Booleans: `DEBUG=true` (exactly `true`, `false`, `1` or `0`)
//! - Durations: `TIMEOUT=1m30s` into `std::time::Duration` or [`SignedDuration`]
//! - Lists: `TAGS=web,api` into `Vec<T>`; empty segments are dropped
//! - Maps: `LIMITS=cpu:80,memory:512` into `HashMap<String, V>` or `BTreeMap<String, V>`
//!
//! # Example
//!
//! ```rust
//! use envbind::EnvBind;
//! use std::collections::HashMap;
//! use std::time::Duration;
//!
//! #[derive(Debug, Default, EnvBind)]
//! struct Config {
//!     #[bind(env = "PORT", default = "3000")]
//!     pub port: u16,
//!
//!     #[bind(env = "DATABASE_URL", required = "true")]
//!     pub database_url: String,
//!
//!     #[bind(env = "TIMEOUT", default = "30s")]
//!     pub timeout: Duration,
//!
//!     #[bind(env = "TAGS")]
//!     pub tags: Vec<String>,
//! }
//!
//! # fn main() -> anyhow::Result<()> {
//! let mapping = HashMap::from([
//!     ("DATABASE_URL".to_string(), "postgres://localhost/db".to_string()),
//!     ("TAGS".to_string(), "web,,api".to_string()),
//! ]);
//!
//! let mut config = Config::default();
//! envbind::bind(&mut config, &mapping)?;
//!
//! assert_eq!(config.port, 3000);
//! assert_eq!(config.timeout, Duration::from_secs(30));
//! assert_eq!(config.tags, vec!["web", "api"]);
//! # Ok(())
//! # }
//! ```
//!
//! # Attributes
//!
//! ## `#[bind(env = "KEY")]`
//!
//! Source key of the field. Fields without `env` are ignored entirely.
//!
//! ## `#[bind(default = "value")]`
//!
//! Raw value used when the key is absent. A key that is present always wins,
//! even when its value is empty.
//!
//! ## `#[bind(required = "true")]`
//!
//! Report an error when the key is absent and no default exists. The flag
//! may also be written bare, `#[bind(required)]`.
//!
//! ## `#[bind(prefix = "APP_")]` (struct level)
//!
//! Prepend a prefix to every field's key.
//!
//! ```rust
//! # use envbind::EnvBind;
//! #[derive(Default, EnvBind)]
//! #[bind(prefix = "APP_")]
//! struct Config {
//!     // Bound to APP_NAME
//!     #[bind(env = "NAME", default = "demo")]
//!     pub name: String,
//! }
//! # assert_eq!(Config::fields()[0].env_key, "APP_NAME");
//! ```
//!
//! # Loading
//!
//! [`EnvBind::load`] reads an env file, overlays the process environment and
//! binds into `Default::default()`. A missing file is logged as a warning and
//! binding continues from the process environment and defaults.
//! [`EnvBind::from_env`] and [`EnvBind::from_file`] use a single source, and
//! [`bind`] accepts any [`Mapping`].

#[doc(hidden)]
pub mod de;

mod bind;
mod descriptor;
mod duration;
mod error;
mod global;
mod source;
mod template;

pub use bind::bind;
pub use descriptor::{EnvBind, FieldSpec, Kind, ScalarKind};
pub use duration::{NegativeDurationError, ParseDurationError, SignedDuration};
pub use envbind_derive::EnvBind;
pub use error::{BindError, BindErrorKind, BindErrors, Error, SourceError};
pub use global::Global;
pub use source::{parse_env_str, EnvFile, Layered, Mapping, ProcessEnv, SourceProvider};
pub use template::template;

// Re-export for application `main` functions and error context
pub use anyhow;
