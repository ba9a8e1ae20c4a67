use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::spanned::Spanned;
use syn::visit_mut::{self, VisitMut};
use syn::{
    AngleBracketedGenericArguments, Attribute, Error as SynError, FnArg, GenericArgument, Ident,
    ImplItem, ImplItemFn, ItemImpl, PathArguments, Result as SynResult, ReturnType, Signature,
    Type, TypePath,
};

use crate::attrs::AttributeData;

const RETURN_TYPE_MESSAGE: &str =
    "a constructor's return type should be `Self`, `Result<Self, ContainerError>` or `Result<Self, E>`";

#[derive(Debug)]
enum ConstructorData {
    Default,
    Function {
        identifier: Ident,
        takes_container: bool,
        return_type: ReturnTypeData,
    },
}

#[derive(Debug)]
enum ReturnTypeData {
    Infallible,
    ContainerResult,
    Result { error_type: Type },
}

struct AttributeRemovalVisitor;

impl VisitMut for AttributeRemovalVisitor {
    fn visit_attributes_mut(&mut self, attrs: &mut Vec<Attribute>) {
        attrs.retain(|attr| !is_construct_attribute(attr));
        attrs
            .iter_mut()
            .for_each(|attr| visit_mut::visit_attribute_mut(self, attr));
    }
}

pub fn expand_implementation(
    impls: TokenStream,
    attr_data: AttributeData,
) -> SynResult<TokenStream2> {
    let mut impls = match syn::parse::<ItemImpl>(impls) {
        Ok(impls) => impls,
        Err(err) => {
            return Err(SynError::new(
                err.span(),
                "`#[component]` should be annotated on the `impl` block",
            ))
        }
    };
    if let Some((_, path, _)) = &impls.trait_ {
        return Err(SynError::new(
            path.span(),
            "`#[component]` should be annotated on an inherent `impl` block",
        ));
    }

    let self_type = get_self_type(&impls)?;
    let ctor_data = match get_constructor_signature(&impls.items, impls.span())? {
        Some(signature) => parse_constructor(&self_type, signature)?,
        None => ConstructorData::Default,
    };

    let expanded = expand_component_implementation(&impls, &self_type, ctor_data, attr_data);

    let mut visitor = AttributeRemovalVisitor;
    visitor.visit_item_impl_mut(&mut impls);

    Ok(quote! {
        #impls
        #expanded
    })
}

fn is_construct_attribute(attr: &Attribute) -> bool {
    attr.path().is_ident("construct")
}

fn get_self_type(impls: &ItemImpl) -> SynResult<TypePath> {
    if let Type::Path(ty) = impls.self_ty.as_ref() {
        Ok(ty.clone())
    } else {
        Err(SynError::new(impls.self_ty.span(), "invalid self type"))
    }
}

fn get_constructor_signature(items: &[ImplItem], impl_span: Span) -> SynResult<Option<Signature>> {
    let ctors: Vec<_> = items
        .iter()
        .filter_map(filter_and_map_item_fn)
        .filter(|item_fn| item_fn.attrs.iter().any(is_construct_attribute))
        .collect();

    if ctors.len() > 1 {
        return Err(SynError::new(
            impl_span,
            "only one associated function can be annotated with `#[construct]`",
        ));
    }
    let Some(ctor) = ctors.first() else {
        return Ok(None);
    };

    let signature = ctor.sig.clone();
    if let Some(FnArg::Receiver(rec)) = signature.inputs.first() {
        return Err(SynError::new(
            rec.span(),
            "method is not allowed to be annotated with `#[construct]`",
        ));
    }
    if signature.inputs.len() > 1 {
        return Err(SynError::new(
            signature.inputs.span(),
            "a constructor takes either no argument or a single `&Container`",
        ));
    }

    Ok(Some(signature))
}

fn filter_and_map_item_fn(item: &ImplItem) -> Option<&ImplItemFn> {
    if let ImplItem::Fn(impl_fn) = item {
        Some(impl_fn)
    } else {
        None
    }
}

fn parse_constructor(self_type: &TypePath, signature: Signature) -> SynResult<ConstructorData> {
    let return_type = parse_constructor_return_type(signature.output, self_type)?;

    Ok(ConstructorData::Function {
        identifier: signature.ident,
        takes_container: !signature.inputs.is_empty(),
        return_type,
    })
}

fn parse_constructor_return_type(
    output: ReturnType,
    self_type: &TypePath,
) -> SynResult<ReturnTypeData> {
    let ReturnType::Type(_, return_type) = output else {
        return Err(SynError::new(output.span(), RETURN_TYPE_MESSAGE));
    };
    let Type::Path(return_type) = *return_type else {
        return Err(SynError::new(return_type.span(), RETURN_TYPE_MESSAGE));
    };

    if is_self(&return_type, self_type) {
        return Ok(ReturnTypeData::Infallible);
    }

    let segments: Vec<_> = return_type
        .path
        .segments
        .iter()
        .map(|s| s.ident.to_string())
        .collect();
    let segments: Vec<_> = segments.iter().map(String::as_str).collect();
    let is_result = matches!(
        segments.as_slice(),
        ["Result"] | ["std" | "core", "result", "Result"]
    );
    let Some(last) = return_type.path.segments.last().filter(|_| is_result) else {
        return Err(SynError::new(return_type.span(), RETURN_TYPE_MESSAGE));
    };

    parse_result_return_type(&last.arguments, self_type)
}

fn parse_result_return_type(
    type_args: &PathArguments,
    self_type: &TypePath,
) -> SynResult<ReturnTypeData> {
    let PathArguments::AngleBracketed(AngleBracketedGenericArguments {
        args: type_args, ..
    }) = type_args
    else {
        return Err(SynError::new(type_args.span(), RETURN_TYPE_MESSAGE));
    };

    let (Some(GenericArgument::Type(Type::Path(first_type))), Some(GenericArgument::Type(error_type)), 2) =
        (type_args.get(0), type_args.get(1), type_args.len())
    else {
        return Err(SynError::new(type_args.span(), RETURN_TYPE_MESSAGE));
    };
    if !is_self(first_type, self_type) {
        return Err(SynError::new(first_type.span(), RETURN_TYPE_MESSAGE));
    }

    let is_container_error = matches!(
        error_type,
        Type::Path(path) if path.path.segments.last().is_some_and(|s| s.ident == "ContainerError")
    );
    if is_container_error {
        Ok(ReturnTypeData::ContainerResult)
    } else {
        Ok(ReturnTypeData::Result {
            error_type: error_type.clone(),
        })
    }
}

fn is_self(ty: &TypePath, self_type: &TypePath) -> bool {
    ty == self_type || ty.path.is_ident("Self")
}

fn expand_component_implementation(
    impls: &ItemImpl,
    self_type: &TypePath,
    ctor_data: ConstructorData,
    attr_data: AttributeData,
) -> TokenStream2 {
    let (impl_generics, _, where_clause) = impls.generics.split_for_impl();

    let (associated_type_error, body) = match ctor_data {
        ConstructorData::Default => (
            quote! { type Error = ::std::convert::Infallible; },
            quote! {
                let _ = container;
                Ok(Ok(<Self as ::std::default::Default>::default()))
            },
        ),
        ConstructorData::Function {
            identifier,
            takes_container,
            return_type,
        } => {
            let (unused, call) = if takes_container {
                (quote! {}, quote! { Self::#identifier(container) })
            } else {
                (quote! { let _ = container; }, quote! { Self::#identifier() })
            };
            let (associated_type_error, result) = match return_type {
                ReturnTypeData::Infallible => (
                    quote! { type Error = ::std::convert::Infallible; },
                    quote! { Ok(Ok(#call)) },
                ),
                ReturnTypeData::ContainerResult => (
                    quote! { type Error = ::std::convert::Infallible; },
                    quote! { #call.map(Ok) },
                ),
                ReturnTypeData::Result { error_type } => (
                    quote! { type Error = #error_type; },
                    quote! { Ok(#call) },
                ),
            };
            (associated_type_error, quote! { #unused #result })
        }
    };

    let provides_impls = attr_data
        .interfaces
        .iter()
        .filter(|interface| !matches!(interface, Type::Path(path) if is_self(path, self_type)))
        .map(|interface| {
            quote! {
                impl #impl_generics ::dicon::provider::component::Provides<#interface> for #self_type #where_clause {
                    fn upcast(self: ::std::sync::Arc<Self>) -> ::std::sync::Arc<#interface> {
                        self
                    }
                }
            }
        })
        .collect::<TokenStream2>();

    quote! {
        impl #impl_generics ::dicon::provider::component::Component for #self_type #where_clause {
            #associated_type_error

            fn construct(
                container: &::dicon::container::Container,
            ) -> ::std::result::Result<
                ::std::result::Result<Self, Self::Error>,
                ::dicon::container::ContainerError,
            > {
                #body
            }
        }

        #provides_impls
    }
}
