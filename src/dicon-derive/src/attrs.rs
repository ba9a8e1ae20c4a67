use proc_macro::TokenStream;
use syn::parse::Parser;
use syn::punctuated::Punctuated;
use syn::token::Comma;
use syn::{Result as SynResult, Type};

#[derive(Debug)]
pub struct AttributeData {
    pub interfaces: Vec<Type>,
}

/// Parses `#[component(dyn A, dyn B)]`. An empty list is allowed, in which
/// case the component only provides itself.
pub fn parse_attributes(attr: TokenStream) -> SynResult<AttributeData> {
    let interfaces = Punctuated::<Type, Comma>::parse_terminated.parse(attr)?;
    Ok(AttributeData {
        interfaces: interfaces.into_iter().collect(),
    })
}
