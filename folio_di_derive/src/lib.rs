use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Field, Fields};

/// Derive `folio_di::Build` for a struct.
///
/// Every field is built from the provider, except fields marked `#[state]`
/// which start out as `Default::default()`. The built value is cached in the
/// provider, so all dependents share one instance (and one copy of its state).
#[proc_macro_derive(Build, attributes(state))]
pub fn derive_build(input: TokenStream) -> TokenStream {
    let DeriveInput {
        ident,
        generics,
        data,
        ..
    } = parse_macro_input!(input as DeriveInput);

    let Data::Struct(data) = data else {
        return quote! { ::core::compile_error!("Build can only be derived for structs"); }.into();
    };

    let type_params = generics
        .type_params()
        .map(|param| &param.ident)
        .collect::<Vec<_>>();

    let dependency_bounds = data
        .fields
        .iter()
        .filter(|field| !is_state(field))
        .map(|Field { ty, .. }| quote! { #ty: ::folio_di::Build<__Provider> });

    let construct = match &data.fields {
        Fields::Named(fields) => {
            let fields = fields.named.iter().map(|field| {
                let ident = &field.ident;
                let value = field_value(field);
                quote! { #ident: #value }
            });
            quote! { Self { #(#fields),* } }
        }
        Fields::Unnamed(fields) => {
            let fields = fields.unnamed.iter().map(field_value);
            quote! { Self(#(#fields),*) }
        }
        Fields::Unit => quote! { Self },
    };

    quote! {
        impl<__Provider, #(#type_params),*> ::folio_di::Build<__Provider>
            for #ident<#(#type_params),*>
        where
            Self: ::core::clone::Clone + 'static,
            __Provider: ::folio_di::Provider,
            #(#dependency_bounds),*
        {
            fn build(provider: &mut __Provider) -> Self {
                let cache = ::folio_di::Provider::cache(provider);
                if let ::core::option::Option::Some(cached) = cache.get::<Self>() {
                    return ::core::clone::Clone::clone(cached);
                }

                let value = #construct;
                ::folio_di::Provider::cache(provider).insert(::core::clone::Clone::clone(&value));
                value
            }
        }
    }
    .into()
}

fn is_state(field: &Field) -> bool {
    field.attrs.iter().any(|attr| attr.path().is_ident("state"))
}

fn field_value(field: &Field) -> TokenStream2 {
    if is_state(field) {
        quote! { ::core::default::Default::default() }
    } else {
        quote! { ::folio_di::Build::build(provider) }
    }
}
