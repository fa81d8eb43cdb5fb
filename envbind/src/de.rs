//! Conversion of raw strings into field values

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::marker::PhantomData;
use std::time::Duration;

pub use once_cell::sync::Lazy;

use crate::descriptor::{Kind, ScalarKind};
use crate::duration::SignedDuration;

/// Types a raw environment string can be converted into.
///
/// Implemented for every type `#[derive(EnvBind)]` accepts. Errors are the
/// parser diagnostic, which the binder wraps with the field name and type.
pub trait FromEnvStr: Sized {
    /// Conversion rule reported in the descriptor.
    const KIND: Kind;

    fn from_env_str(raw: &str) -> Result<Self, String>;
}

/// Types allowed as list elements and map values.
pub trait Scalar: FromEnvStr {
    const SCALAR: ScalarKind;
}

/// Type-level handle on a field type, used by macro-generated code to pick
/// a conversion without naming the type's trait impls.
///
/// `(&&Target::<T>::new()).env_kind(..)` resolves to [`Convertible`] when
/// `T: FromEnvStr` and falls back to [`Inconvertible`] otherwise, so type
/// aliases and foreign types are judged by their impls rather than by name.
#[doc(hidden)]
pub struct Target<T>(PhantomData<fn() -> T>);

impl<T> Target<T> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for Target<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[doc(hidden)]
pub trait Convertible {
    type Value;

    fn env_kind(&self, reason: &'static str) -> Kind;

    fn env_convert(&self, raw: &str) -> Result<Self::Value, String>;
}

impl<T: FromEnvStr> Convertible for &Target<T> {
    type Value = T;

    fn env_kind(&self, _reason: &'static str) -> Kind {
        T::KIND
    }

    fn env_convert(&self, raw: &str) -> Result<T, String> {
        T::from_env_str(raw)
    }
}

#[doc(hidden)]
pub trait Inconvertible {
    type Value;

    fn env_kind(&self, reason: &'static str) -> Kind;

    fn env_convert(&self, raw: &str) -> Result<Self::Value, String>;
}

impl<T> Inconvertible for Target<T> {
    type Value = T;

    fn env_kind(&self, reason: &'static str) -> Kind {
        Kind::Unsupported { reason }
    }

    fn env_convert(&self, _raw: &str) -> Result<T, String> {
        Err("type has no conversion rule".to_string())
    }
}

/// Parse a raw value into `T`.
pub fn parse<T: FromEnvStr>(raw: &str) -> Result<T, String> {
    T::from_env_str(raw)
}

/// Diagnostic for an index the derived struct has no assignment for.
///
/// Used by macro-generated code.
#[doc(hidden)]
pub fn unassignable(index: usize) -> String {
    format!("field #{index} has no conversion rule")
}

impl FromEnvStr for String {
    const KIND: Kind = Kind::Scalar(ScalarKind::String);

    fn from_env_str(raw: &str) -> Result<Self, String> {
        Ok(raw.to_string())
    }
}

macro_rules! impl_integer {
    ($scalar:ident: $($ty:ty),*) => {
        $(
            impl FromEnvStr for $ty {
                const KIND: Kind = Kind::Scalar(ScalarKind::$scalar);

                fn from_env_str(raw: &str) -> Result<Self, String> {
                    raw.parse::<$ty>().map_err(|e| e.to_string())
                }
            }

            impl Scalar for $ty {
                const SCALAR: ScalarKind = ScalarKind::$scalar;
            }
        )*
    };
}

impl_integer!(Int: i8, i16, i32, i64, i128, isize);
impl_integer!(Uint: u8, u16, u32, u64, u128, usize);

fn is_infinity_literal(raw: &str) -> bool {
    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

macro_rules! impl_float {
    ($($ty:ty),*) => {
        $(
            impl FromEnvStr for $ty {
                const KIND: Kind = Kind::Scalar(ScalarKind::Float);

                fn from_env_str(raw: &str) -> Result<Self, String> {
                    let value = raw.parse::<$ty>().map_err(|e| e.to_string())?;
                    // Rust rounds out-of-range literals to infinity
                    if value.is_infinite() && !is_infinity_literal(raw) {
                        return Err(format!("value out of range for {}", stringify!($ty)));
                    }
                    Ok(value)
                }
            }

            impl Scalar for $ty {
                const SCALAR: ScalarKind = ScalarKind::Float;
            }
        )*
    };
}

impl_float!(f32, f64);

impl FromEnvStr for bool {
    const KIND: Kind = Kind::Scalar(ScalarKind::Bool);

    fn from_env_str(raw: &str) -> Result<Self, String> {
        match raw {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err("expected one of 'true', 'false', '1', '0'".to_string()),
        }
    }
}

impl FromEnvStr for SignedDuration {
    const KIND: Kind = Kind::Scalar(ScalarKind::Duration);

    fn from_env_str(raw: &str) -> Result<Self, String> {
        raw.parse::<SignedDuration>().map_err(|e| e.to_string())
    }
}

impl FromEnvStr for Duration {
    const KIND: Kind = Kind::Scalar(ScalarKind::Duration);

    fn from_env_str(raw: &str) -> Result<Self, String> {
        let signed = SignedDuration::from_env_str(raw)?;
        Duration::try_from(signed).map_err(|e| e.to_string())
    }
}

impl Scalar for String {
    const SCALAR: ScalarKind = ScalarKind::String;
}

impl Scalar for bool {
    const SCALAR: ScalarKind = ScalarKind::Bool;
}

impl Scalar for Duration {
    const SCALAR: ScalarKind = ScalarKind::Duration;
}

impl Scalar for SignedDuration {
    const SCALAR: ScalarKind = ScalarKind::Duration;
}

/// Non-empty, trimmed segments of a comma-separated list.
fn segments(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty())
}

impl<T: Scalar> FromEnvStr for Vec<T> {
    const KIND: Kind = Kind::Slice(T::SCALAR);

    fn from_env_str(raw: &str) -> Result<Self, String> {
        segments(raw)
            .enumerate()
            .map(|(i, segment)| T::from_env_str(segment).map_err(|e| format!("element {i}: {e}")))
            .collect()
    }
}

/// Split `key:value` entries, converting each value.
fn entries<V: Scalar>(raw: &str) -> impl Iterator<Item = Result<(String, V), String>> + '_ {
    segments(raw).enumerate().map(|(i, entry)| {
        let (key, value) = entry
            .split_once(':')
            .ok_or_else(|| format!("entry {i} is not in 'key:value' form"))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(format!("entry {i} has an empty key"));
        }
        let value = V::from_env_str(value.trim()).map_err(|e| format!("value of key '{key}': {e}"))?;
        Ok((key.to_string(), value))
    })
}

impl<V: Scalar, S: BuildHasher + Default> FromEnvStr for HashMap<String, V, S> {
    const KIND: Kind = Kind::Map(V::SCALAR);

    fn from_env_str(raw: &str) -> Result<Self, String> {
        entries(raw).collect()
    }
}

impl<V: Scalar> FromEnvStr for BTreeMap<String, V> {
    const KIND: Kind = Kind::Map(V::SCALAR);

    fn from_env_str(raw: &str) -> Result<Self, String> {
        entries(raw).collect()
    }
}
