use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, parse_quote, ItemFn};

/// `#[tracing::instrument]` with the return value recorded at trace level,
/// plus a `call` trace event as the first statement of the body.
///
/// Arguments are forwarded to `tracing::instrument`, e.g.
/// `#[trace_instrument(skip(self, api_key))]`.
#[proc_macro_attribute]
pub fn trace_instrument(args: TokenStream, item: TokenStream) -> TokenStream {
    let args = proc_macro2::TokenStream::from(args);
    let mut item = parse_macro_input!(item as ItemFn);

    item.block
        .stmts
        .insert(0, parse_quote!(::tracing::trace!("call");));

    quote! {
        #[::tracing::instrument(ret(level = "trace"), #args)]
        #item
    }
    .into()
}
