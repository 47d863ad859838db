//! Emit the constructors of the union, one named after each variant.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use super::{EmitCtx, VariantCtx};

fn emit_constructor(ctx: &EmitCtx<'_>, variant: &VariantCtx<'_>) -> TokenStream {
    let ident = &variant.names.ident;
    let attrs = &variant.def.attrs;
    let payload = ctx.payload_ty(variant);
    let kind_path = ctx.kind_path(variant);

    // Parameters are named by position. A label may name a unit struct or a
    // constant in scope, which would turn the parameter into a pattern.
    let params = variant
        .variant
        .fields
        .iter()
        .map(|field| format_ident!("_{}", field.index))
        .collect::<Vec<_>>();
    let tys = variant.variant.fields.iter().map(|field| &field.ty);

    let body = if params.is_empty() {
        quote!(#payload)
    } else {
        quote!(#payload(#(#params),*))
    };

    quote! {
        #(#attrs)*
        #[allow(non_snake_case)]
        #[must_use]
        pub fn #ident(#(#params: #tys),*) -> Self {
            Self { kind: #kind_path(#body) }
        }
    }
}

/// Emit an `impl` block with a constructor for every variant.
pub(crate) fn emit_constructors(ctx: &EmitCtx<'_>) -> TokenStream {
    let union = &ctx.names.union;
    let constructors = ctx.variants().map(|variant| emit_constructor(ctx, &variant));

    quote! {
        impl #union {
            #(#constructors)*
        }
    }
}
