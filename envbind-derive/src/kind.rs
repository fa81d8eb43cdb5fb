//! Inspection of declared field types.
//!
//! Whether a field type converts is decided by its `FromEnvStr` impl in the
//! generated code. This module only explains why a type does not, and spots
//! types that depend on the struct's own generic parameters.

use proc_macro2::{TokenStream, TokenTree};
use quote::ToTokens;
use std::collections::HashSet;
use syn::{GenericArgument, GenericParam, Generics, PathArguments, Type};

/// Reason recorded for fields whose type mentions a struct generic parameter.
pub const GENERIC_REASON: &str = "generic field types are not supported";

/// Last path segment of a plain type path, e.g. `HashMap` in
/// `std::collections::HashMap<String, u16>`.
fn last_segment(ty: &Type) -> Option<&syn::PathSegment> {
    match ty {
        Type::Path(type_path) if type_path.qself.is_none() => type_path.path.segments.last(),
        Type::Group(group) => last_segment(&group.elem),
        Type::Paren(paren) => last_segment(&paren.elem),
        _ => None,
    }
}

/// Type arguments of the last segment, e.g. `[String, u16]`.
fn type_args(segment: &syn::PathSegment) -> Vec<&Type> {
    match &segment.arguments {
        PathArguments::AngleBracketed(args) => args
            .args
            .iter()
            .filter_map(|arg| match arg {
                GenericArgument::Type(ty) => Some(ty),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn is_named(ty: &Type, names: &[&str]) -> bool {
    last_segment(ty).is_some_and(|segment| {
        segment.arguments.is_none() && names.iter().any(|name| segment.ident == name)
    })
}

fn is_scalar(ty: &Type) -> bool {
    is_named(
        ty,
        &[
            "String", "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64",
            "u128", "usize", "f32", "f64", "bool", "Duration", "SignedDuration",
        ],
    )
}

/// Diagnostic reported when `ty` turns out to have no conversion rule.
pub fn unsupported_reason(ty: &Type) -> &'static str {
    match ty {
        Type::Reference(_) | Type::Ptr(_) => return "pointer types are not supported",
        Type::Path(_) | Type::Group(_) | Type::Paren(_) => {}
        _ => return "type has no conversion rule",
    }

    let Some(segment) = last_segment(ty) else {
        return "type has no conversion rule";
    };
    let args = type_args(segment);

    match segment.ident.to_string().as_str() {
        "Vec" if !args.first().is_some_and(|elem| is_scalar(elem)) => {
            "slice elements must be a scalar type"
        }
        // HashMap may carry a third hasher argument
        "HashMap" | "BTreeMap" if args.len() >= 2 => {
            if !is_named(args[0], &["String"]) {
                "map keys must be String"
            } else if !is_scalar(args[1]) {
                "map values must be a scalar type"
            } else {
                "type has no conversion rule"
            }
        }
        "Box" | "Rc" | "Arc" | "Cell" | "RefCell" | "Option" => {
            "pointer and optional wrappers are not supported"
        }
        _ if is_scalar(ty) => "type has no conversion rule",
        _ => "nested structures and other types have no conversion rule",
    }
}

/// Whether `ty` names a type or lifetime parameter of `generics`, or `Self`.
pub fn mentions_generics(ty: &Type, generics: &Generics) -> bool {
    let mut params: HashSet<String> = generics
        .params
        .iter()
        .filter_map(|param| match param {
            GenericParam::Type(param) => Some(param.ident.to_string()),
            GenericParam::Lifetime(param) => Some(param.lifetime.ident.to_string()),
            GenericParam::Const(param) => Some(param.ident.to_string()),
        })
        .collect();
    params.insert("Self".to_string());

    fn walk(tokens: TokenStream, params: &HashSet<String>) -> bool {
        tokens.into_iter().any(|token| match token {
            TokenTree::Ident(ident) => params.contains(&ident.to_string()),
            TokenTree::Group(group) => walk(group.stream(), params),
            _ => false,
        })
    }

    // Lifetimes tokenize as a `'` punct followed by their ident
    walk(ty.to_token_stream(), &params)
}

/// Declared type as written, with token spacing removed except between words.
pub fn type_name(ty: &Type) -> String {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let text = ty.to_token_stream().to_string();
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c.is_whitespace() {
            let after_word = out.chars().last().is_some_and(is_word);
            let before_word = chars.peek().copied().is_some_and(is_word);
            if after_word && before_word {
                out.push(' ');
            }
            continue;
        }
        out.push(c);
    }
    out
}
