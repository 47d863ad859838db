//! Emit the payload types of the variants: a unit struct, a transparent
//! wrapper, or an ordered record, depending on the number of fields.

use log::trace;
use proc_macro2::{Span, TokenStream};
use quote::quote;
use sumtype_spec::PayloadKind;
use syn::{Ident, Index};

use super::{EmitCtx, VariantCtx, emit_write_value};
use crate::names::shadows_trait_method;

/// Emit the accessor of a labelled field, `fn label(&self) -> &T`. Labels
/// are known not to be keywords at this point. No accessor is emitted for a
/// label that would shadow a trait method, the field stays reachable by
/// position.
fn emit_label_accessor(label: &str, ty: &syn::Type, index: usize) -> Option<TokenStream> {
    if shadows_trait_method(label) {
        trace!("skipping payload accessor for label `{label}`, it names a trait method");
        return None;
    }

    let name = Ident::new(label, Span::call_site());
    let index = Index::from(index);
    let doc = format!("Get the `{label}` field.");
    Some(quote! {
        #[doc = #doc]
        pub fn #name(&self) -> &#ty {
            &self.#index
        }
    })
}

/// The payload of the first variant derives `Default`, as the default of the
/// union is built from it.
fn default_derive(ctx: &EmitCtx<'_>, variant: &VariantCtx<'_>) -> Vec<TokenStream> {
    if variant.index == 0 && ctx.def.options.default { vec![quote!(Default)] } else { vec![] }
}

/// Emit the `Empty` payload: a zero-size marker.
fn emit_empty_payload(ctx: &EmitCtx<'_>, variant: &VariantCtx<'_>) -> TokenStream {
    let ident = &variant.names.ident;
    let attrs = &variant.def.attrs;
    let derive = ctx.derive_attr(&[quote!(Default)]);

    quote! {
        #(#attrs)*
        #derive
        pub struct #ident;
    }
}

/// Emit the `Single` payload: a wrapper which can be used as if it were the
/// field itself.
fn emit_single_payload(ctx: &EmitCtx<'_>, variant: &VariantCtx<'_>) -> TokenStream {
    let ident = &variant.names.ident;
    let attrs = &variant.def.attrs;
    let field = &variant.variant.fields[0];
    let ty = &field.ty;

    let derive = ctx.derive_attr(&default_derive(ctx, variant));

    let label_accessor =
        field.label.as_deref().and_then(|label| emit_label_accessor(label, ty, field.index));

    let eq_impl = ctx.def.options.eq.then(|| {
        quote! {
            impl ::core::cmp::PartialEq<#ty> for #ident {
                fn eq(&self, other: &#ty) -> bool {
                    self.0 == *other
                }
            }
        }
    });

    let display_impl = ctx.def.options.display.then(|| {
        let write = emit_write_value(quote!(self.0), ty);
        quote! {
            impl ::core::fmt::Display for #ident {
                fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                    #write
                    ::core::result::Result::Ok(())
                }
            }
        }
    });

    quote! {
        #(#attrs)*
        #derive
        pub struct #ident(pub #ty);

        impl #ident {
            /// Get the wrapped value.
            pub fn get(&self) -> &#ty {
                &self.0
            }

            /// Unwrap the value.
            pub fn into_inner(self) -> #ty {
                self.0
            }

            #label_accessor
        }

        impl ::core::ops::Deref for #ident {
            type Target = #ty;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl ::core::convert::AsRef<#ty> for #ident {
            fn as_ref(&self) -> &#ty {
                &self.0
            }
        }

        impl ::core::convert::From<#ty> for #ident {
            fn from(value: #ty) -> Self {
                Self(value)
            }
        }

        #eq_impl
        #display_impl
    }
}

/// Emit the `Multi` payload: an ordered record of the fields, with accessors
/// for the labelled ones.
fn emit_multi_payload(ctx: &EmitCtx<'_>, variant: &VariantCtx<'_>) -> TokenStream {
    let ident = &variant.names.ident;
    let attrs = &variant.def.attrs;
    let fields = &variant.variant.fields;

    let derive = ctx.derive_attr(&default_derive(ctx, variant));

    let tys = fields.iter().map(|field| &field.ty).collect::<Vec<_>>();
    let indices = fields.iter().map(|field| Index::from(field.index)).collect::<Vec<_>>();

    let label_accessors = fields.iter().filter_map(|field| {
        field.label.as_deref().and_then(|label| emit_label_accessor(label, &field.ty, field.index))
    });

    quote! {
        #(#attrs)*
        #derive
        pub struct #ident(#(pub #tys),*);

        impl #ident {
            #(#label_accessors)*

            /// Unwrap the fields into a tuple.
            pub fn into_inner(self) -> (#(#tys,)*) {
                (#(self.#indices,)*)
            }
        }

        impl ::core::convert::From<(#(#tys,)*)> for #ident {
            fn from(value: (#(#tys,)*)) -> Self {
                Self(#(value.#indices),*)
            }
        }
    }
}

/// Emit the module which holds the payload type of each variant.
pub(crate) fn emit_payload_module(ctx: &EmitCtx<'_>) -> TokenStream {
    let visibility = &ctx.def.visibility;
    let module = &ctx.names.module;
    let doc = format!("Payload types of the variants of [`{}`].", ctx.names.union);

    let payloads = ctx.variants().map(|variant| match variant.variant.kind {
        PayloadKind::Empty => emit_empty_payload(ctx, &variant),
        PayloadKind::Single => emit_single_payload(ctx, &variant),
        PayloadKind::Multi => emit_multi_payload(ctx, &variant),
    });

    quote! {
        #[doc = #doc]
        #visibility mod #module {
            #[allow(unused_imports)]
            use super::*;

            #(#payloads)*
        }
    }
}
