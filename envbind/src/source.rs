//! Sources of raw key/value environment data

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::SourceError;

/// Flat key to raw value mapping consumed by [`bind`](crate::bind).
pub type Mapping = HashMap<String, String>;

/// Something that can produce a [`Mapping`].
pub trait SourceProvider {
    fn mapping(&self) -> Result<Mapping, SourceError>;
}

impl<S: SourceProvider + ?Sized> SourceProvider for &S {
    fn mapping(&self) -> Result<Mapping, SourceError> {
        (**self).mapping()
    }
}

impl SourceProvider for Mapping {
    fn mapping(&self) -> Result<Mapping, SourceError> {
        Ok(self.clone())
    }
}

/// A `KEY=VALUE` env file.
///
/// - Blank lines and lines starting with `#` are ignored
/// - Keys and values are trimmed; the value is everything after the first `=`
/// - No quoting, escaping, or variable expansion is performed
///
/// A missing file yields an empty mapping and a warning.
#[derive(Debug, Clone)]
pub struct EnvFile {
    path: PathBuf,
}

impl EnvFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SourceProvider for EnvFile {
    fn mapping(&self) -> Result<Mapping, SourceError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(parse_lines(&contents, &self.path.display().to_string())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::warn!(path = %self.path.display(), "env file not found, using defaults");
                Ok(Mapping::new())
            }
            Err(e) => Err(SourceError::Read {
                path: self.path.clone(),
                source: e,
            }),
        }
    }
}

/// Snapshot of the process environment.
///
/// Variables whose name or value is not valid UTF-8 are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl SourceProvider for ProcessEnv {
    fn mapping(&self) -> Result<Mapping, SourceError> {
        Ok(std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect())
    }
}

/// Two sources merged, with `overlay` entries replacing `base` entries.
#[derive(Debug, Clone)]
pub struct Layered<B, O> {
    base: B,
    overlay: O,
}

impl<B, O> Layered<B, O> {
    pub fn new(base: B, overlay: O) -> Self {
        Self { base, overlay }
    }
}

impl<B: SourceProvider, O: SourceProvider> SourceProvider for Layered<B, O> {
    fn mapping(&self) -> Result<Mapping, SourceError> {
        let mut mapping = self.base.mapping()?;
        mapping.extend(self.overlay.mapping()?);
        Ok(mapping)
    }
}

/// Parse env file contents into a mapping. Later duplicates win.
pub fn parse_env_str(contents: &str) -> Mapping {
    parse_lines(contents, "<string>")
}

fn parse_lines(contents: &str, origin: &str) -> Mapping {
    let mut mapping = Mapping::new();
    for (number, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match line.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                mapping.insert(key.trim().to_string(), value.trim().to_string());
            }
            _ => {
                tracing::warn!(
                    source = origin,
                    line = number + 1,
                    "skipping malformed env line"
                );
            }
        }
    }
    mapping
}
