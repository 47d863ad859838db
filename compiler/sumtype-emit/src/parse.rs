//! Utilities for parsing the structures defined in [`super::definitions`] using
//! the [`syn`] crate.

use proc_macro2::Span;
use sumtype_spec::{FieldToken, UnionOptions, options::SWITCH_OPTIONS};
use syn::{
    Attribute, Ident, LitStr, Path, Token, Type,
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    token,
};

use crate::{
    definitions::{OPTIONS_ATTR_NAME, SumTypeDef, SumTypeDefs, VariantDef},
    printing::SequenceDisplay,
};

/// The name of the option which overrides the runtime crate path.
const CRATE_OPTION_NAME: &str = "crate";

/// Ensure that the given generics are empty, by returning an error otherwise.
///
/// Generics are not allowed in sum type definitions due to the complexity of
/// generating payload types and their impls for them.
fn ensure_generics_empty(generics: &syn::Generics) -> Result<(), syn::Error> {
    if generics.const_params().next().is_some()
        || generics.type_params().next().is_some()
        || generics.lifetimes().next().is_some()
    {
        Err(syn::Error::new(
            generics.span(),
            "Generics and lifetimes are not supported in sum type definitions",
        ))
    } else {
        Ok(())
    }
}

/// Ensure that only documentation is attached to a variant, since every other
/// attribute would have to be consistently applied to several generated items.
fn ensure_doc_attrs_only(attrs: &[Attribute]) -> Result<(), syn::Error> {
    match attrs.iter().find(|attr| !attr.path().is_ident("doc")) {
        Some(attr) => {
            Err(syn::Error::new(attr.span(), "Only doc comments are supported on variants"))
        }
        None => Ok(()),
    }
}

impl Parse for VariantDef {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let attrs = input.call(Attribute::parse_outer)?;
        ensure_doc_attrs_only(&attrs)?;

        let name: Ident = input.parse()?;
        let mut tokens = vec![];
        let mut token_spans = vec![];

        if input.peek(token::Brace) {
            return Err(syn::Error::new(
                name.span(),
                "Variant fields are written as `Name(type, \"label\", type, ...)`",
            ));
        }

        if input.peek(token::Paren) {
            let content;
            syn::parenthesized!(content in input);

            // A comma separated sequence of field tokens, where string literals
            // are labels, and everything else is a type.
            while !content.is_empty() {
                if content.peek(LitStr) {
                    let label: LitStr = content.parse()?;
                    token_spans.push(label.span());
                    tokens.push(FieldToken::Label(label.value()));
                } else {
                    let ty: Type = content.parse()?;
                    token_spans.push(ty.span());
                    tokens.push(FieldToken::Type(ty));
                }

                if content.is_empty() {
                    break;
                }
                content.parse::<Token![,]>()?;
            }
        }

        Ok(VariantDef { attrs, name, tokens, token_spans })
    }
}

/// Attributes of a sum type definition, split up by what they are used for.
struct SplitAttrs {
    forwarded: Vec<Attribute>,
    derives: Vec<Path>,
    options: UnionOptions,
    runtime_path: Option<Path>,
}

/// Parse a `#[sum_type(...)]` attribute into the given options.
fn parse_options_attr(
    attr: &Attribute,
    options: &mut UnionOptions,
    runtime_path: &mut Option<Path>,
) -> syn::Result<()> {
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident(CRATE_OPTION_NAME) {
            let path: LitStr = meta.value()?.parse()?;
            *runtime_path = Some(path.parse()?);
            options.runtime_path = path.value();
            return Ok(());
        }

        let switch = meta.path.get_ident().map(Ident::to_string).unwrap_or_default();
        if options.apply_switch(&switch) {
            Ok(())
        } else {
            let mut expected = SWITCH_OPTIONS.to_vec();
            expected.push(CRATE_OPTION_NAME);
            Err(meta.error(format!(
                "Unknown `{OPTIONS_ATTR_NAME}` option, expected {}",
                SequenceDisplay::either(&expected)
            )))
        }
    })
}

fn split_attrs(attrs: Vec<Attribute>) -> syn::Result<SplitAttrs> {
    let mut split = SplitAttrs {
        forwarded: vec![],
        derives: vec![],
        options: UnionOptions::default(),
        runtime_path: None,
    };

    for attr in attrs {
        if attr.path().is_ident("derive") {
            let paths =
                attr.parse_args_with(Punctuated::<Path, Token![,]>::parse_terminated)?;

            for path in paths {
                if path.segments.last().is_some_and(|segment| segment.ident == "Default") {
                    return Err(syn::Error::new(
                        path.span(),
                        "`Default` is implemented from the first variant and cannot be derived",
                    ));
                }
                split.derives.push(path);
            }
        } else if attr.path().is_ident(OPTIONS_ATTR_NAME) {
            parse_options_attr(&attr, &mut split.options, &mut split.runtime_path)?;
        } else {
            split.forwarded.push(attr);
        }
    }

    Ok(split)
}

impl Parse for SumTypeDef {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let attrs = input.call(Attribute::parse_outer)?;
        let visibility: syn::Visibility = input.parse()?;
        let name: Ident = input.parse()?;

        let generics: syn::Generics = input.parse()?;
        ensure_generics_empty(&generics)?;

        let content;
        let brace = syn::braced!(content in input);
        let variants = Punctuated::<VariantDef, Token![,]>::parse_terminated(&content)?;

        let SplitAttrs { forwarded, derives, options, runtime_path } = split_attrs(attrs)?;
        let runtime_path = match runtime_path {
            Some(path) => path,
            None => syn::parse_str(&options.runtime_path)?,
        };

        Ok(SumTypeDef {
            attrs: forwarded,
            derives,
            options,
            runtime_path,
            visibility,
            name,
            variants: variants.into_iter().collect(),
            body_span: brace.span.join(),
        })
    }
}

impl Parse for SumTypeDefs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut defs = vec![];

        while !input.is_empty() {
            defs.push(input.parse::<SumTypeDef>()?);
        }

        if defs.is_empty() {
            return Err(syn::Error::new(
                Span::call_site(),
                "Expected at least one sum type definition",
            ));
        }

        Ok(SumTypeDefs { defs })
    }
}
