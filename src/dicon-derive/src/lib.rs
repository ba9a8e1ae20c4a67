mod attrs;
mod impls;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use syn::Result as SynResult;

/// Implements `Component` for the type of an inherent `impl` block, plus
/// `Provides<I>` for every interface listed in the attribute.
///
/// The component is built by the associated function marked with
/// `#[construct]`, or by `Default::default()` when nothing is marked. A
/// constructor takes no argument or a single `&Container`, and returns
/// `Self`, `Result<Self, ContainerError>` or `Result<Self, E>`.
#[proc_macro_attribute]
pub fn component(attr: TokenStream, item: TokenStream) -> TokenStream {
    match component_impl(attr, item) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

fn component_impl(attr: TokenStream, item: TokenStream) -> SynResult<TokenStream2> {
    let attr_data = attrs::parse_attributes(attr)?;
    let expanded = impls::expand_implementation(item, attr_data)?;
    Ok(expanded)
}
