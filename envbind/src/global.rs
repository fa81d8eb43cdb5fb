//! Process-wide configuration loaded once and read everywhere

use once_cell::sync::OnceCell;

/// A configuration value initialized at most once per process.
///
/// Concurrent first callers of [`get_or_try_init`](Self::get_or_try_init)
/// block until one initializer finishes. A failed initializer leaves the cell
/// empty so that a later caller may try again. Once set, the value is
/// immutable and shared by reference without further locking.
///
/// ```rust
/// use envbind::{EnvBind, Global};
/// use std::collections::HashMap;
///
/// #[derive(Debug, Default, EnvBind)]
/// struct Config {
///     #[bind(env = "WORKERS", default = "4")]
///     workers: usize,
/// }
///
/// static CONFIG: Global<Config> = Global::new();
///
/// # fn main() -> anyhow::Result<()> {
/// let config = CONFIG.get_or_try_init(|| Config::from_mapping(&HashMap::new()))?;
/// assert_eq!(config.workers, 4);
/// assert!(CONFIG.get().is_some());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Global<T> {
    cell: OnceCell<T>,
}

impl<T> Global<T> {
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// The value, if initialization already succeeded.
    pub fn get(&self) -> Option<&T> {
        self.cell.get()
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Return the value, running `init` if no caller has succeeded yet.
    pub fn get_or_try_init<E, F>(&self, init: F) -> Result<&T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        self.cell.get_or_try_init(|| {
            let value = init()?;
            tracing::debug!(config = std::any::type_name::<T>(), "global configuration initialized");
            Ok(value)
        })
    }

    /// Store `value` if the cell is empty; otherwise hand it back.
    pub fn set(&self, value: T) -> Result<(), T> {
        self.cell.set(value)
    }
}

impl<T> Default for Global<T> {
    fn default() -> Self {
        Self::new()
    }
}
