//! Derive macro implementation for envbind

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{parse_macro_input, Data, DeriveInput, Fields};

mod attrs;
mod kind;

use attrs::{FieldAttrs, StructAttrs};

/// `EnvBind` derive macro
///
/// Implements `envbind::EnvBind` for a struct with named fields: a lazily
/// built descriptor table of every field carrying an `env` key, and the
/// assignment code that writes converted values into those fields.
///
/// # Supported Attributes
///
/// **Struct-level**:
/// - `#[bind(prefix = "PREFIX_")]`: Add prefix to all env keys
///
/// **Field-level**:
/// - `#[bind(env = "KEY")]`: Source key; fields without it are not bound
/// - `#[bind(default = "value")]`: Raw value used when the key is absent
/// - `#[bind(required = "true")]` or `#[bind(required)]`: Fail when absent without default
///
/// Field types without a conversion rule are still listed in the descriptor
/// and reported as unsupported when bound.
///
/// # Example
///
/// See the `envbind` crate documentation for usage examples.
#[proc_macro_derive(EnvBind, attributes(bind))]
pub fn derive_envbind(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;
    let struct_attrs = StructAttrs::from_derive_input(input)?;

    // Only structs with named fields are bindable targets
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            Fields::Unnamed(fields) => {
                return Err(syn::Error::new_spanned(
                    fields,
                    "EnvBind only supports structs with named fields",
                ));
            }
            Fields::Unit => {
                return Err(syn::Error::new_spanned(
                    struct_name,
                    "EnvBind only supports structs with named fields",
                ));
            }
        },
        Data::Enum(data) => {
            return Err(syn::Error::new(
                data.enum_token.span,
                "EnvBind only supports structs, not enums",
            ));
        }
        Data::Union(data) => {
            return Err(syn::Error::new(
                data.union_token.span,
                "EnvBind only supports structs, not unions",
            ));
        }
    };

    let mut specs = Vec::new();
    let mut arms = Vec::new();

    for field in fields {
        let attrs = FieldAttrs::from_field(field)?;
        let Some(env) = attrs.env else {
            continue;
        };

        let Some(field_ident) = field.ident.as_ref() else {
            continue;
        };
        let field_type = &field.ty;
        let index = specs.len();

        let name = field_ident.unraw().to_string();
        let env_key = format!("{}{}", struct_attrs.prefix, env);
        let default = match &attrs.default {
            Some(value) => quote!(::core::option::Option::Some(#value)),
            None => quote!(::core::option::Option::None),
        };
        let required = attrs.required;
        let type_name = kind::type_name(field_type);

        // The descriptor table is shared by every instantiation, so types
        // built from the struct's own parameters cannot be converted
        let field_kind = if kind::mentions_generics(field_type, &input.generics) {
            let reason = kind::GENERIC_REASON;
            quote!(::envbind::Kind::Unsupported { reason: #reason })
        } else {
            let reason = kind::unsupported_reason(field_type);
            arms.push(quote! {
                #index => {
                    self.#field_ident =
                        (&&::envbind::de::Target::<#field_type>::new()).env_convert(raw)?;
                    ::core::result::Result::Ok(())
                }
            });
            quote!((&&::envbind::de::Target::<#field_type>::new()).env_kind(#reason))
        };

        specs.push(quote! {
            ::envbind::FieldSpec {
                name: #name,
                env_key: #env_key,
                default: #default,
                required: #required,
                type_name: #type_name,
                kind: #field_kind,
            }
        });
    }

    let count = specs.len();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::envbind::EnvBind for #struct_name #ty_generics #where_clause {
            fn fields() -> &'static [::envbind::FieldSpec] {
                #[allow(unused_imports)]
                use ::envbind::de::{Convertible as _, Inconvertible as _};

                static FIELDS: ::envbind::de::Lazy<[::envbind::FieldSpec; #count]> =
                    ::envbind::de::Lazy::new(|| [#(#specs),*]);
                &*FIELDS
            }

            #[allow(unused_variables, unused_imports)]
            fn assign_field(
                &mut self,
                index: usize,
                raw: &str,
            ) -> ::core::result::Result<(), ::std::string::String> {
                use ::envbind::de::{Convertible as _, Inconvertible as _};

                match index {
                    #(#arms)*
                    _ => ::core::result::Result::Err(::envbind::de::unassignable(index)),
                }
            }
        }
    })
}
