//! Emit the ways of dispatching on the active variant besides a plain `match`
//! on the storage enum: a chain of per-variant handlers, and an exhaustive
//! visitor trait.

use proc_macro2::TokenStream;
use quote::quote;

use super::EmitCtx;

/// Emit the matcher, which runs the handler of the first matching variant
/// and falls back to `otherwise`.
fn emit_matcher(ctx: &EmitCtx<'_>) -> TokenStream {
    let visibility = &ctx.def.visibility;
    let union = &ctx.names.union;
    let matcher = &ctx.names.matcher;
    let doc = format!(
        "Dispatch on the active variant of a [`{union}`] with a handler per variant, \
         created by [`{union}::matcher`]."
    );

    let handlers = ctx.variants().map(|variant| {
        let on_fn = &variant.names.on_fn;
        let payload = ctx.payload_ty(&variant);
        let kind_path = ctx.kind_path(&variant);
        let handler_doc = format!("Handle the `{}` variant.", variant.variant.name);

        quote! {
            #[doc = #handler_doc]
            pub fn #on_fn(mut self, handler: impl ::core::ops::FnOnce(&'a #payload) -> R) -> Self {
                let value = self.value;
                if self.result.is_none() {
                    if let #kind_path(payload) = &value.kind {
                        self.result = ::core::option::Option::Some(handler(payload));
                    }
                }
                self
            }
        }
    });

    quote! {
        #[doc = #doc]
        #[must_use]
        #visibility struct #matcher<'a, R> {
            value: &'a #union,
            result: ::core::option::Option<R>,
        }

        #[allow(irrefutable_let_patterns)]
        impl<'a, R> #matcher<'a, R> {
            #(#handlers)*

            /// Finish the chain, running `handler` if no variant matched.
            pub fn otherwise(self, handler: impl ::core::ops::FnOnce(&'a #union) -> R) -> R {
                match self.result {
                    ::core::option::Option::Some(result) => result,
                    ::core::option::Option::None => handler(self.value),
                }
            }
        }

        impl #union {
            /// Start a chain of per-variant handlers.
            pub fn matcher<R>(&self) -> #matcher<'_, R> {
                #matcher { value: self, result: ::core::option::Option::None }
            }
        }
    }
}

/// Emit the visitor trait, which has a method for every variant, and
/// `accept` on the union.
fn emit_visitor(ctx: &EmitCtx<'_>) -> TokenStream {
    let visibility = &ctx.def.visibility;
    let union = &ctx.names.union;
    let visitor = &ctx.names.visitor;
    let doc = format!("Handle every variant of a [`{union}`], see [`{union}::accept`].");

    let methods = ctx
        .variants()
        .map(|variant| {
            let visit_fn = &variant.names.visit_fn;
            let payload = ctx.payload_ty(&variant);
            quote! {
                fn #visit_fn(&mut self, payload: &#payload) -> Self::Output;
            }
        })
        .collect::<Vec<_>>();

    let arms = ctx.variants().map(|variant| {
        let visit_fn = &variant.names.visit_fn;
        let kind_path = ctx.kind_path(&variant);
        quote!(#kind_path(payload) => visitor.#visit_fn(payload))
    });

    quote! {
        #[doc = #doc]
        #visibility trait #visitor {
            type Output;

            #(#methods)*
        }

        impl #union {
            /// Call the method of `visitor` for the active variant.
            pub fn accept<V: #visitor>(&self, visitor: &mut V) -> V::Output {
                match &self.kind {
                    #(#arms),*
                }
            }
        }
    }
}

pub(crate) fn emit_matching(ctx: &EmitCtx<'_>) -> TokenStream {
    let matcher = emit_matcher(ctx);
    let visitor = ctx.def.options.visitor.then(|| emit_visitor(ctx));

    quote! {
        #matcher
        #visitor
    }
}
