//! Field resolution and the bind entry point

use crate::descriptor::{EnvBind, FieldSpec, Kind};
use crate::error::{BindError, BindErrors};
use crate::source::Mapping;

/// Raw value chosen for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Resolved<'a> {
    /// Key present in the mapping, possibly with an empty value
    Env(&'a str),
    /// Key absent, declared default used
    Default(&'a str),
    Absent,
}

impl Resolved<'_> {
    fn origin(&self) -> &'static str {
        match self {
            Self::Env(_) => "env",
            Self::Default(_) => "default",
            Self::Absent => "absent",
        }
    }
}

/// Mapping value first, then the declared default.
pub(crate) fn resolve<'a>(spec: &'a FieldSpec, mapping: &'a Mapping) -> Resolved<'a> {
    if let Some(value) = mapping.get(spec.env_key) {
        return Resolved::Env(value);
    }
    match spec.default {
        Some(default) => Resolved::Default(default),
        None => Resolved::Absent,
    }
}

/// Populate `target` from `mapping`.
///
/// Every field declared with an `env` key is resolved, converted and written.
/// Failures do not stop the walk: each failing field contributes one
/// [`BindError`] and all of them are returned together. Fields that bound
/// successfully are written even when siblings fail, so on error the target
/// may be partially populated.
///
/// Fields whose key is absent, with no default and not required, are left
/// untouched.
///
/// # Errors
///
/// - `MissingRequired`: required field with neither a mapping value nor a default
/// - `ConversionFailed`: value does not parse into the field type
/// - `UnsupportedType`: the field type has no conversion rule
pub fn bind<T: EnvBind>(target: &mut T, mapping: &Mapping) -> Result<(), BindErrors> {
    let fields = T::fields();
    let mut errors = Vec::new();

    for (index, spec) in fields.iter().enumerate() {
        if let Kind::Unsupported { reason } = spec.kind {
            errors.push(BindError::UnsupportedType {
                field: spec.name.to_string(),
                env_key: spec.env_key.to_string(),
                type_name: spec.type_name.to_string(),
                reason: reason.to_string(),
            });
            continue;
        }

        let resolved = resolve(spec, mapping);
        tracing::debug!(
            field = spec.name,
            env_key = spec.env_key,
            source = resolved.origin(),
            "resolved field"
        );

        let raw = match resolved {
            Resolved::Env(raw) | Resolved::Default(raw) => raw,
            Resolved::Absent => {
                if spec.required {
                    errors.push(BindError::MissingRequired {
                        field: spec.name.to_string(),
                        env_key: spec.env_key.to_string(),
                    });
                }
                continue;
            }
        };

        if let Err(message) = target.assign_field(index, raw) {
            errors.push(BindError::ConversionFailed {
                field: spec.name.to_string(),
                env_key: spec.env_key.to_string(),
                type_name: spec.type_name.to_string(),
                message,
            });
        }
    }

    tracing::debug!(fields = fields.len(), errors = errors.len(), "bind finished");

    if errors.is_empty() {
        Ok(())
    } else {
        Err(BindErrors::new(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::ScalarKind;
    use crate::error::BindErrorKind;

    fn spec(env_key: &'static str, default: Option<&'static str>, required: bool) -> FieldSpec {
        FieldSpec {
            name: "field",
            env_key,
            default,
            required,
            type_name: "String",
            kind: Kind::Scalar(ScalarKind::String),
        }
    }

    fn mapping(pairs: &[(&str, &str)]) -> Mapping {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_resolve_env_wins_over_default() {
        let spec = spec("KEY", Some("fallback"), false);
        assert_eq!(resolve(&spec, &mapping(&[("KEY", "set")])), Resolved::Env("set"));
    }

    #[test]
    fn test_resolve_empty_env_wins_over_default() {
        let spec = spec("KEY", Some("fallback"), true);
        assert_eq!(resolve(&spec, &mapping(&[("KEY", "")])), Resolved::Env(""));
    }

    #[test]
    fn test_resolve_default_and_absent() {
        let empty = Mapping::new();
        assert_eq!(
            resolve(&spec("KEY", Some("fallback"), false), &empty),
            Resolved::Default("fallback")
        );
        assert_eq!(resolve(&spec("KEY", None, true), &empty), Resolved::Absent);
    }

    /// Hand-written implementation mirroring what the derive generates.
    #[derive(Debug, Default)]
    struct Manual {
        port: u16,
        name: String,
        nested: Vec<Vec<u8>>,
    }

    impl EnvBind for Manual {
        fn fields() -> &'static [FieldSpec] {
            static FIELDS: [FieldSpec; 3] = [
                FieldSpec {
                    name: "port",
                    env_key: "PORT",
                    default: Some("3000"),
                    required: true,
                    type_name: "u16",
                    kind: Kind::Scalar(ScalarKind::Uint),
                },
                FieldSpec {
                    name: "name",
                    env_key: "NAME",
                    default: None,
                    required: true,
                    type_name: "String",
                    kind: Kind::Scalar(ScalarKind::String),
                },
                FieldSpec {
                    name: "nested",
                    env_key: "NESTED",
                    default: None,
                    required: false,
                    type_name: "Vec<Vec<u8>>",
                    kind: Kind::Unsupported {
                        reason: "slice elements must be scalar",
                    },
                },
            ];
            &FIELDS
        }

        fn assign_field(&mut self, index: usize, raw: &str) -> Result<(), String> {
            match index {
                0 => {
                    self.port = crate::de::parse(raw)?;
                    Ok(())
                }
                1 => {
                    self.name = crate::de::parse(raw)?;
                    Ok(())
                }
                _ => Err(crate::de::unassignable(index)),
            }
        }
    }

    #[test]
    fn test_bind_collects_every_error() {
        let mut target = Manual::default();
        let errors = bind(&mut target, &mapping(&[("PORT", "70000")])).unwrap_err();

        let kinds: Vec<_> = errors.iter().map(BindError::kind).collect();
        assert_eq!(
            kinds,
            vec![
                BindErrorKind::ConversionFailed,
                BindErrorKind::MissingRequired,
                BindErrorKind::UnsupportedType,
            ]
        );
        assert_eq!(target.port, 0);
        assert!(target.nested.is_empty());
    }

    #[test]
    fn test_bind_writes_successful_fields_on_failure() {
        let mut target = Manual::default();
        let errors = bind(&mut target, &mapping(&[("NAME", "svc")])).unwrap_err();

        // Only the unsupported field fails; the others are written
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.as_slice()[0].field(), "nested");
        assert_eq!(target.port, 3000);
        assert_eq!(target.name, "svc");
    }
}
