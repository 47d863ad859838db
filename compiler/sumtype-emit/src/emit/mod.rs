//! Functions to emit the union type, its payload types, constructors and
//! matching utilities, given a validated [SumTypeDef].

mod constructors;
mod matching;
mod payload;
mod union;

use log::{debug, trace};
use proc_macro2::TokenStream;
use quote::quote;
use sumtype_spec::{UnionSchema, Variant};

use crate::{
    definitions::{SumTypeDef, VariantDef},
    names::{UnionNames, VariantNames},
    validate::ValidatedSumType,
};

/// Everything that is needed to emit the items of one sum type.
pub(crate) struct EmitCtx<'a> {
    pub(crate) def: &'a SumTypeDef,
    pub(crate) schema: &'a UnionSchema<syn::Type>,
    pub(crate) names: UnionNames,
    pub(crate) variant_names: Vec<VariantNames>,

    /// Derives of the union, its storage enum and its payloads.
    pub(crate) derives: Vec<syn::Path>,
}

/// A variant together with everything that describes it.
pub(crate) struct VariantCtx<'a> {
    pub(crate) index: usize,
    pub(crate) def: &'a VariantDef,
    pub(crate) variant: &'a Variant<syn::Type>,
    pub(crate) names: &'a VariantNames,
}

impl<'a> EmitCtx<'a> {
    fn new(validated: &'a ValidatedSumType<'a>) -> Self {
        let def = validated.def;
        let schema = &validated.schema;

        let mut derives = def.derives.clone();
        if def.options.eq && !def.derives_trait("PartialEq") {
            derives.push(syn::parse_quote!(PartialEq));
        }

        Self {
            def,
            schema,
            names: UnionNames::new(&def.name),
            variant_names: def
                .variants
                .iter()
                .map(|variant| VariantNames::new(&variant.name))
                .collect(),
            derives,
        }
    }

    pub(crate) fn variants(&self) -> impl Iterator<Item = VariantCtx<'_>> {
        self.def
            .variants
            .iter()
            .zip(&self.schema.variants)
            .zip(&self.variant_names)
            .enumerate()
            .map(|(index, ((def, variant), names))| VariantCtx { index, def, variant, names })
    }

    pub(crate) fn runtime(&self) -> &syn::Path {
        &self.def.runtime_path
    }

    /// The type of the payload of the given variant, `module::Variant`.
    pub(crate) fn payload_ty(&self, variant: &VariantCtx<'_>) -> TokenStream {
        let module = &self.names.module;
        let ident = &variant.names.ident;
        quote!(#module::#ident)
    }

    /// The storage enum variant of the given variant, `Kind::Variant`.
    pub(crate) fn kind_path(&self, variant: &VariantCtx<'_>) -> TokenStream {
        let kind = &self.names.kind;
        let ident = &variant.names.ident;
        quote!(#kind::#ident)
    }

    /// Emit `#[derive(...)]` for the forwarded derives and the given extra
    /// ones.
    pub(crate) fn derive_attr(&self, extra: &[TokenStream]) -> TokenStream {
        let derives = &self.derives;
        if derives.is_empty() && extra.is_empty() {
            quote! {}
        } else {
            quote! { #[derive(#(#derives,)* #(#extra),*)] }
        }
    }
}

/// Emit statements which write the textual form of `value`, of type `ty`, to
/// the formatter `f`. Tuples have no `Display` of their own, so they are
/// written element by element as `(a, b)`.
pub(crate) fn emit_write_value(value: TokenStream, ty: &syn::Type) -> TokenStream {
    match ty {
        syn::Type::Paren(paren) => emit_write_value(value, &paren.elem),
        syn::Type::Group(group) => emit_write_value(value, &group.elem),
        syn::Type::Tuple(tuple) => {
            let elements = tuple.elems.iter().enumerate().map(|(index, elem)| {
                let index = syn::Index::from(index);
                let write = emit_write_value(quote!((#value).#index), elem);
                if index.index == 0 {
                    write
                } else {
                    quote!(f.write_str(", ")?; #write)
                }
            });

            quote! {
                f.write_str("(")?;
                #(#elements)*
                f.write_str(")")?;
            }
        }
        _ => quote!(::core::fmt::Display::fmt(&#value, f)?;),
    }
}

/// Emit all of the items of one sum type.
pub fn emit_sum_type(validated: &ValidatedSumType<'_>) -> Result<TokenStream, syn::Error> {
    let ctx = EmitCtx::new(validated);
    debug!("emitting sum type `{}`", ctx.schema.name);

    let payloads = payload::emit_payload_module(&ctx);
    let union = union::emit_union(&ctx);
    let constructors = constructors::emit_constructors(&ctx);
    let matching = matching::emit_matching(&ctx);

    let result = quote! {
        #payloads
        #union
        #constructors
        #matching
    };

    trace!(
        "sum type `{}` expanded to {} tokens",
        ctx.schema.name,
        result.clone().into_iter().count()
    );
    Ok(result)
}

/// Emit all of the given sum types.
pub fn emit_sum_types(validated: &[ValidatedSumType<'_>]) -> Result<TokenStream, syn::Error> {
    validated.iter().map(emit_sum_type).collect()
}
