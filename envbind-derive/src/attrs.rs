//! Attribute parsing for `#[bind(...)]` annotations.
//!
//! This module extracts and validates binding attributes from the struct and
//! its fields during macro expansion.

use syn::{DeriveInput, Field, Lit};

/// Parsed struct-level `#[bind(...)]` attributes.
#[derive(Debug, Default)]
pub struct StructAttrs {
    /// Prefix prepended to every field's environment key.
    pub prefix: String,
}

impl StructAttrs {
    pub fn from_derive_input(input: &DeriveInput) -> syn::Result<Self> {
        let mut attrs = Self::default();

        for attr in &input.attrs {
            if !attr.path().is_ident("bind") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                // prefix = "..."
                if meta.path.is_ident("prefix") {
                    let lit: Lit = meta.value()?.parse()?;
                    attrs.prefix = string_value(&lit)?;
                    return Ok(());
                }

                Err(meta.error("unsupported struct-level bind attribute"))
            })?;
        }

        Ok(attrs)
    }
}

/// Parsed `#[bind(...)]` attributes from a struct field.
///
/// Every value is kept as the raw string the runtime resolves; only
/// `required` is interpreted here.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// Environment key. `None` (absent or empty) means the field is not bound
    /// at all.
    pub env: Option<String>,

    /// Raw default used when the key is absent.
    pub default: Option<String>,

    /// Whether an absent key without default is an error.
    pub required: bool,
}

impl FieldAttrs {
    /// Extract and parse `#[bind(...)]` attributes from a struct field.
    ///
    /// Attributes other than `bind` are left for other macros.
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let mut attrs = Self::default();

        for attr in &field.attrs {
            if !attr.path().is_ident("bind") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                // env = "KEY", where an empty key leaves the field unbound
                if meta.path.is_ident("env") {
                    let lit: Lit = meta.value()?.parse()?;
                    let key = string_value(&lit)?;
                    attrs.env = (!key.is_empty()).then_some(key);
                    return Ok(());
                }

                // default = "raw" (numeric and boolean literals keep their text)
                if meta.path.is_ident("default") {
                    let lit: Lit = meta.value()?.parse()?;
                    attrs.default = Some(literal_text(&lit)?);
                    return Ok(());
                }

                // required, required = "true" or required = true
                if meta.path.is_ident("required") {
                    if meta.input.peek(syn::Token![=]) {
                        let lit: Lit = meta.value()?.parse()?;
                        attrs.required = match &lit {
                            Lit::Bool(b) => b.value,
                            Lit::Str(s) => parse_bool(&s.value()).unwrap_or(false),
                            _ => {
                                return Err(syn::Error::new(
                                    lit.span(),
                                    "required expects a string or boolean literal",
                                ))
                            }
                        };
                    } else {
                        attrs.required = true;
                    }
                    return Ok(());
                }

                Err(meta.error("unsupported bind attribute"))
            })?;
        }

        Ok(attrs)
    }
}

/// Boolean spellings accepted for `required = "..."`.
fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

fn string_value(lit: &Lit) -> syn::Result<String> {
    match lit {
        Lit::Str(s) => Ok(s.value()),
        _ => Err(syn::Error::new(lit.span(), "expected a string literal")),
    }
}

fn literal_text(lit: &Lit) -> syn::Result<String> {
    match lit {
        Lit::Str(s) => Ok(s.value()),
        Lit::Int(i) => Ok(i.base10_digits().to_string()),
        Lit::Float(f) => Ok(f.base10_digits().to_string()),
        Lit::Bool(b) => Ok(b.value.to_string()),
        _ => Err(syn::Error::new(
            lit.span(),
            "default expects a string, integer, float or boolean literal",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_parse_env_attribute() {
        let field: Field = parse_quote! {
            #[bind(env = "PORT")]
            pub port: u16
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.env, Some("PORT".to_string()));
        assert_eq!(attrs.default, None);
        assert!(!attrs.required);
    }

    #[test]
    fn test_parse_without_bind_attribute() {
        let field: Field = parse_quote! {
            #[serde(rename = "x")]
            pub internal: String
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert!(attrs.env.is_none());
    }

    #[test]
    fn test_parse_default_string() {
        let field: Field = parse_quote! {
            #[bind(env = "NAME", default = "DefaultApp")]
            pub name: String
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.default, Some("DefaultApp".to_string()));
    }

    #[test]
    fn test_parse_default_literals() {
        let field: Field = parse_quote! {
            #[bind(env = "PORT", default = 3000u16)]
            pub port: u16
        };
        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.default, Some("3000".to_string()));

        let field: Field = parse_quote! {
            #[bind(env = "RATIO", default = 0.5)]
            pub ratio: f64
        };
        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.default, Some("0.5".to_string()));

        let field: Field = parse_quote! {
            #[bind(env = "DEBUG", default = false)]
            pub debug: bool
        };
        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.default, Some("false".to_string()));
    }

    #[test]
    fn test_parse_required_forms() {
        let cases: [(Field, bool); 6] = [
            (parse_quote! { #[bind(env = "A", required = "true")] a: String }, true),
            (parse_quote! { #[bind(env = "A", required = "1")] a: String }, true),
            (parse_quote! { #[bind(env = "A", required = "false")] a: String }, false),
            (parse_quote! { #[bind(env = "A", required = "yes")] a: String }, false),
            (parse_quote! { #[bind(env = "A", required)] a: String }, true),
            (parse_quote! { #[bind(env = "A", required = true)] a: String }, true),
        ];

        for (field, expected) in cases {
            let attrs = FieldAttrs::from_field(&field).unwrap();
            assert_eq!(attrs.required, expected);
        }
    }

    #[test]
    fn test_parse_multiple_bind_attributes() {
        let field: Field = parse_quote! {
            #[bind(env = "DB_URL")]
            #[bind(required)]
            pub database_url: String
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.env, Some("DB_URL".to_string()));
        assert!(attrs.required);
    }

    #[test]
    fn test_reject_unknown_attribute() {
        let field: Field = parse_quote! {
            #[bind(env = "A", from_file)]
            pub a: String
        };

        let err = FieldAttrs::from_field(&field).unwrap_err();
        assert!(err.to_string().contains("unsupported bind attribute"));
    }

    #[test]
    fn test_empty_env_leaves_field_unbound() {
        let field: Field = parse_quote! {
            #[bind(env = "", default = "x")]
            pub a: String
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.env, None);
        assert_eq!(attrs.default, Some("x".to_string()));
    }

    #[test]
    fn test_parse_struct_prefix() {
        let input: DeriveInput = parse_quote! {
            #[bind(prefix = "APP_")]
            struct Config {
                a: String,
            }
        };

        let attrs = StructAttrs::from_derive_input(&input).unwrap();
        assert_eq!(attrs.prefix, "APP_");
    }
}
