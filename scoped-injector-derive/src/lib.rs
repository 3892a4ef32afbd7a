//! Derive macros for scoped-injector
//!
//! - `#[derive(Construct)]` - Generate the `Construct` impl (declared
//!   constructor parameters plus the constructor) from a struct's fields
//!
//! # Example
//!
//! ```rust,ignore
//! use scoped_injector::{Construct, Container, FixedParams, Lifetime, Strategy};
//! use std::sync::Arc;
//!
//! trait Clock: Send + Sync {
//!     fn now(&self) -> u64;
//! }
//!
//! trait Scheduler: Send + Sync {}
//!
//! #[derive(Construct)]
//! #[provides(dyn Scheduler)]
//! struct CronScheduler {
//!     // Auto-wired from the registry
//!     clock: Arc<dyn Clock>,
//!     // Auto-wired when registered, None otherwise
//!     audit: Option<Arc<AuditLog>>,
//!     // Supplied through FixedParams
//!     #[param]
//!     tick_ms: u64,
//!     // FixedParams, falling back to Default
//!     #[param(default)]
//!     name: String,
//!     // Everything else uses Default
//!     runs: AtomicU64,
//! }
//!
//! impl Scheduler for CronScheduler {}
//!
//! container.register_with::<dyn Scheduler>(
//!     Strategy::constructor::<CronScheduler>(),
//!     Lifetime::Singleton,
//!     FixedParams::new().value("tick_ms", 250u64),
//! );
//! ```

use proc_macro::TokenStream;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, Token, Type};

/// Derive macro for the `Construct` trait.
///
/// # Field Rules
///
/// - `Arc<T>` - required parameter auto-wired from capability `T`
/// - `Option<Arc<T>>` - optional parameter auto-wired from `T`
/// - `#[param]` - required literal parameter of the field's type
/// - `#[param(default)]` - literal parameter, `Default::default()` when unbound
/// - anything else - `Default::default()`, not a parameter
///
/// Parameter names are the field names.
///
/// # Struct Attributes
///
/// - `#[provides(dyn TraitA, dyn TraitB)]` - emit `Implements` impls so the
///   struct can be registered under those trait-object capabilities
#[proc_macro_derive(Construct, attributes(param, provides))]
pub fn derive_construct(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let name = &input.ident;
    let generics = &input.generics;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    // Only support structs with named fields
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            Fields::Unit => {
                return construct_unit(&input);
            }
            Fields::Unnamed(_) => {
                return syn::Error::new_spanned(
                    &input,
                    "Construct can only be derived for structs with named fields",
                )
                .to_compile_error()
                .into();
            }
        },
        _ => {
            return syn::Error::new_spanned(&input, "Construct can only be derived for structs")
                .to_compile_error()
                .into();
        }
    };

    let mut parameters = Vec::new();
    let mut field_inits = Vec::new();

    for field in fields.iter() {
        let Some(field_name) = field.ident.as_ref() else {
            continue;
        };
        let field_type = &field.ty;
        let param_name = field_name.to_string();

        let param_attr = match find_param_attr(&field.attrs) {
            Ok(attr) => attr,
            Err(err) => return err.to_compile_error().into(),
        };

        match param_attr {
            Some(ParamAttr::Required) => {
                parameters.push(quote! {
                    ::scoped_injector::Parameter::value::<#field_type>(#param_name)
                });
                field_inits.push(quote! {
                    #field_name: args.value::<#field_type>(#param_name)?
                });
            }
            Some(ParamAttr::Default) => {
                parameters.push(quote! {
                    ::scoped_injector::Parameter::value::<#field_type>(#param_name).optional()
                });
                field_inits.push(quote! {
                    #field_name: args.value_or_default::<#field_type>(#param_name)?
                });
            }
            None => {
                if let Some(inner) = extract_arc_inner_type(field_type) {
                    parameters.push(quote! {
                        ::scoped_injector::Parameter::inject::<#inner>(#param_name)
                    });
                    field_inits.push(quote! {
                        #field_name: args.get::<#inner>(#param_name)?
                    });
                } else if let Some(inner) = extract_option_arc_inner_type(field_type) {
                    parameters.push(quote! {
                        ::scoped_injector::Parameter::inject::<#inner>(#param_name).optional()
                    });
                    field_inits.push(quote! {
                        #field_name: args.optional::<#inner>(#param_name)?
                    });
                } else {
                    field_inits.push(quote! {
                        #field_name: ::std::default::Default::default()
                    });
                }
            }
        }
    }

    let provides = match provides_impls(&input) {
        Ok(impls) => impls,
        Err(err) => return err.to_compile_error().into(),
    };

    let expanded = quote! {
        impl #impl_generics ::scoped_injector::Construct for #name #ty_generics #where_clause {
            fn parameters() -> ::std::vec::Vec<::scoped_injector::Parameter> {
                ::std::vec![#(#parameters),*]
            }

            fn construct(
                args: &::scoped_injector::Arguments
            ) -> ::scoped_injector::Result<Self> {
                ::std::result::Result::Ok(Self {
                    #(#field_inits),*
                })
            }
        }

        #provides
    };

    TokenStream::from(expanded)
}

/// Unit structs take no parameters.
fn construct_unit(input: &DeriveInput) -> TokenStream {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let provides = match provides_impls(input) {
        Ok(impls) => impls,
        Err(err) => return err.to_compile_error().into(),
    };

    let expanded = quote! {
        impl #impl_generics ::scoped_injector::Construct for #name #ty_generics #where_clause {
            fn parameters() -> ::std::vec::Vec<::scoped_injector::Parameter> {
                ::std::vec::Vec::new()
            }

            fn construct(
                _args: &::scoped_injector::Arguments
            ) -> ::scoped_injector::Result<Self> {
                ::std::result::Result::Ok(Self)
            }
        }

        #provides
    };

    TokenStream::from(expanded)
}

/// Types of param attributes
enum ParamAttr {
    Required,
    Default,
}

/// Find and parse the #[param] attribute
fn find_param_attr(attrs: &[Attribute]) -> syn::Result<Option<ParamAttr>> {
    for attr in attrs {
        if !attr.path().is_ident("param") {
            continue;
        }
        if attr.meta.require_path_only().is_ok() {
            return Ok(Some(ParamAttr::Required));
        }

        let nested = attr.parse_args::<syn::Ident>()?;
        if nested == "default" {
            return Ok(Some(ParamAttr::Default));
        }
        return Err(syn::Error::new_spanned(
            nested,
            "expected `#[param]` or `#[param(default)]`",
        ));
    }
    Ok(None)
}

/// `Implements` impls for every capability listed in `#[provides(..)]`
fn provides_impls(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let mut impls = Vec::new();
    for attr in input.attrs.iter().filter(|a| a.path().is_ident("provides")) {
        let capabilities =
            attr.parse_args_with(Punctuated::<Type, Token![,]>::parse_terminated)?;

        for capability in capabilities {
            impls.push(quote! {
                impl #impl_generics ::scoped_injector::Implements<#capability>
                    for #name #ty_generics #where_clause
                {
                    #[inline]
                    fn upcast(
                        self: ::std::sync::Arc<Self>
                    ) -> ::std::sync::Arc<#capability> {
                        self
                    }
                }
            });
        }
    }

    Ok(quote! { #(#impls)* })
}

/// Extract T from Arc<T>
fn extract_arc_inner_type(ty: &Type) -> Option<&Type> {
    if let Type::Path(type_path) = ty {
        let segment = type_path.path.segments.last()?;
        if segment.ident == "Arc" {
            if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
                if let Some(syn::GenericArgument::Type(inner)) = args.args.first() {
                    return Some(inner);
                }
            }
        }
    }
    None
}

/// Extract T from Option<Arc<T>>
fn extract_option_arc_inner_type(ty: &Type) -> Option<&Type> {
    if let Type::Path(type_path) = ty {
        let segment = type_path.path.segments.last()?;
        if segment.ident == "Option" {
            if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
                if let Some(syn::GenericArgument::Type(inner)) = args.args.first() {
                    return extract_arc_inner_type(inner);
                }
            }
        }
    }
    None
}
