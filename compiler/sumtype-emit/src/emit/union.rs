//! Emit the union type itself: its storage enum, its tag, its inherent
//! methods and the trait implementations that tie it to its payloads.

use std::collections::HashSet;

use log::trace;
use proc_macro2::{Span, TokenStream};
use quote::quote;
use sumtype_spec::PayloadKind;
use syn::{Ident, Index};

use super::{EmitCtx, VariantCtx, emit_write_value};
use crate::names::{reserved_union_methods, trait_method_names};

/// Emit the fieldless discriminant of the union.
fn emit_tag(ctx: &EmitCtx<'_>) -> TokenStream {
    let visibility = &ctx.def.visibility;
    let tag = &ctx.names.tag;
    let doc = format!("The variants of [`{}`], without their payloads.", ctx.names.union);

    let idents = ctx.variants().map(|variant| variant.names.ident.clone()).collect::<Vec<_>>();
    let names = ctx.variants().map(|variant| variant.variant.name.clone()).collect::<Vec<_>>();
    let indices = 0..idents.len();
    let count = idents.len();

    quote! {
        #[doc = #doc]
        #[derive(
            ::core::fmt::Debug,
            ::core::clone::Clone,
            ::core::marker::Copy,
            ::core::cmp::PartialEq,
            ::core::cmp::Eq,
            ::core::hash::Hash,
            ::core::cmp::PartialOrd,
            ::core::cmp::Ord,
        )]
        #[allow(non_camel_case_types)]
        #visibility enum #tag {
            #(#idents),*
        }

        impl #tag {
            /// Every tag, in declaration order.
            pub const ALL: [#tag; #count] = [#(#tag::#idents),*];

            /// The declared name of the variant.
            pub const fn name(self) -> &'static str {
                match self {
                    #(#tag::#idents => #names),*
                }
            }

            /// The declaration index of the variant.
            pub const fn index(self) -> usize {
                match self {
                    #(#tag::#idents => #indices),*
                }
            }
        }

        impl ::core::fmt::Display for #tag {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(self.name())
            }
        }
    }
}

/// Emit the storage enum, which holds the payload of the active variant, and
/// the union wrapping it.
fn emit_types(ctx: &EmitCtx<'_>) -> TokenStream {
    let visibility = &ctx.def.visibility;
    let attrs = &ctx.def.attrs;
    let union = &ctx.names.union;
    let kind = &ctx.names.kind;
    let derive = ctx.derive_attr(&[]);
    let kind_doc = format!("The payload of the active variant of [`{union}`].");

    let variants = ctx.variants().map(|variant| {
        let ident = &variant.names.ident;
        let payload = ctx.payload_ty(&variant);
        quote!(#ident(#payload))
    });

    quote! {
        #[doc = #kind_doc]
        #derive
        #[allow(non_camel_case_types)]
        #visibility enum #kind {
            #(#variants),*
        }

        #(#attrs)*
        #derive
        #visibility struct #union {
            kind: #kind,
        }
    }
}

/// Names that an unambiguous label accessor on the union must not take.
fn taken_method_names(ctx: &EmitCtx<'_>) -> HashSet<String> {
    let mut taken: HashSet<String> = reserved_union_methods()
        .iter()
        .chain(trait_method_names())
        .map(|name| name.to_string())
        .collect();

    for variant in ctx.variants() {
        taken.extend(variant.names.union_methods());
        taken.insert(variant.variant.constructor_name().to_string());
    }
    taken
}

/// Emit `fn label(&self) -> Option<&T>` for every label which occurs in only
/// one variant.
fn emit_label_accessors(ctx: &EmitCtx<'_>) -> Vec<TokenStream> {
    let kind = &ctx.names.kind;
    let taken = taken_method_names(ctx);

    ctx.schema
        .unambiguous_labels()
        .into_iter()
        .filter(|(label, _)| {
            let free = !taken.contains(*label);
            if !free {
                trace!("skipping union accessor for label `{label}`, the name is taken");
            }
            free
        })
        .map(|(label, site)| {
            let variant = &ctx.schema.variants[site.variant];
            let field = &variant.fields[site.field];
            let ty = &field.ty;
            let ident = &ctx.variant_names[site.variant].ident;
            let name = Ident::new(label, Span::call_site());
            let index = Index::from(field.index);
            let doc =
                format!("Get the `{label}` field if the active variant is `{}`.", variant.name);

            quote! {
                #[doc = #doc]
                pub fn #name(&self) -> ::core::option::Option<&#ty> {
                    match &self.kind {
                        #kind::#ident(payload) => ::core::option::Option::Some(&payload.#index),
                        _ => ::core::option::Option::None,
                    }
                }
            }
        })
        .collect()
}

/// Emit `is_v`, `as_v` and `into_v` of a variant.
fn emit_variant_methods(ctx: &EmitCtx<'_>, variant: &VariantCtx<'_>) -> TokenStream {
    let names = variant.names;
    let (is_fn, as_fn, into_fn) = (&names.is_fn, &names.as_fn, &names.into_fn);
    let payload = ctx.payload_ty(variant);
    let kind_path = ctx.kind_path(variant);
    let name = &variant.variant.name;

    let is_doc = format!("Whether the active variant is `{name}`.");
    let as_doc = format!("Borrow the payload if the active variant is `{name}`.");
    let into_doc = format!("Move the payload out if the active variant is `{name}`.");

    quote! {
        #[doc = #is_doc]
        pub fn #is_fn(&self) -> bool {
            ::core::matches!(self.kind, #kind_path(_))
        }

        #[doc = #as_doc]
        pub fn #as_fn(&self) -> ::core::option::Option<&#payload> {
            match &self.kind {
                #kind_path(payload) => ::core::option::Option::Some(payload),
                _ => ::core::option::Option::None,
            }
        }

        #[doc = #into_doc]
        pub fn #into_fn(self) -> ::core::result::Result<#payload, Self> {
            match self.kind {
                #kind_path(payload) => ::core::result::Result::Ok(payload),
                kind => ::core::result::Result::Err(Self { kind }),
            }
        }
    }
}

/// Emit the inherent methods of the union.
fn emit_methods(ctx: &EmitCtx<'_>) -> TokenStream {
    let union = &ctx.names.union;
    let kind = &ctx.names.kind;
    let tag = &ctx.names.tag;

    let tag_arms = ctx.variants().map(|variant| {
        let kind_path = ctx.kind_path(&variant);
        let ident = &variant.names.ident;
        quote!(#kind_path(_) => #tag::#ident)
    });

    let variant_methods = ctx.variants().map(|variant| emit_variant_methods(ctx, &variant));
    let label_accessors = emit_label_accessors(ctx);

    quote! {
        #[allow(unreachable_patterns)]
        impl #union {
            /// Borrow the payload of the active variant.
            pub fn kind(&self) -> &#kind {
                &self.kind
            }

            /// Move the payload of the active variant out of the union.
            pub fn into_kind(self) -> #kind {
                self.kind
            }

            /// Get the tag of the active variant.
            pub fn tag(&self) -> #tag {
                match &self.kind {
                    #(#tag_arms),*
                }
            }

            /// Get the declared name of the active variant.
            pub fn name(&self) -> &'static str {
                self.tag().name()
            }

            /// Replace the whole value, returning the previous one.
            pub fn replace(&mut self, value: Self) -> Self {
                ::core::mem::replace(self, value)
            }

            /// Assign a new value, which may be of any variant.
            pub fn set(&mut self, value: impl ::core::convert::Into<Self>) {
                *self = value.into();
            }

            #(#variant_methods)*

            #(#label_accessors)*
        }
    }
}

/// Emit `Default`, which gives the default payload of the first variant.
fn emit_default(ctx: &EmitCtx<'_>) -> TokenStream {
    let union = &ctx.names.union;
    let kind = &ctx.names.kind;
    let first = &ctx.variant_names[0].ident;

    quote! {
        impl ::core::default::Default for #kind {
            fn default() -> Self {
                #kind::#first(::core::default::Default::default())
            }
        }

        impl ::core::default::Default for #union {
            fn default() -> Self {
                Self { kind: ::core::default::Default::default() }
            }
        }
    }
}

/// Emit `Display`, which renders the active variant as `Name` or
/// `Name(v0, v1, ...)`.
fn emit_display(ctx: &EmitCtx<'_>) -> TokenStream {
    let union = &ctx.names.union;

    let arms = ctx.variants().map(|variant| {
        let kind_path = ctx.kind_path(&variant);
        let name = &variant.variant.name;

        match variant.variant.kind {
            PayloadKind::Empty => quote! {
                #kind_path(_) => f.write_str(#name)
            },
            PayloadKind::Single | PayloadKind::Multi => {
                let fields = variant.variant.fields.iter().map(|field| {
                    let index = Index::from(field.index);
                    let write = emit_write_value(quote!(payload.#index), &field.ty);
                    if field.index == 0 { write } else { quote!(f.write_str(", ")?; #write) }
                });
                let open = format!("{name}(");
                quote! {
                    #kind_path(payload) => {
                        f.write_str(#open)?;
                        #(#fields)*
                        f.write_str(")")
                    }
                }
            }
        }
    });

    quote! {
        impl ::core::fmt::Display for #union {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                match &self.kind {
                    #(#arms),*
                }
            }
        }
    }
}

/// Emit the conversions between the union, its storage enum and its payloads,
/// together with the runtime trait implementations.
fn emit_conversions(ctx: &EmitCtx<'_>) -> TokenStream {
    let union = &ctx.names.union;
    let kind = &ctx.names.kind;
    let tag = &ctx.names.tag;
    let rt = ctx.runtime();
    let names = ctx.variants().map(|variant| variant.variant.name.clone());

    let variant_impls = ctx.variants().map(|variant| {
        let payload = ctx.payload_ty(&variant);
        let kind_path = ctx.kind_path(&variant);
        let name = &variant.variant.name;
        let index = variant.index;

        quote! {
            impl ::core::convert::From<#payload> for #union {
                fn from(payload: #payload) -> Self {
                    Self { kind: #kind_path(payload) }
                }
            }

            #[allow(unreachable_patterns)]
            impl #rt::Variant<#union> for #payload {
                const NAME: &'static str = #name;
                const INDEX: usize = #index;

                fn insert(self) -> #union {
                    #union { kind: #kind_path(self) }
                }

                fn extract(
                    value: #union,
                ) -> ::core::result::Result<Self, #rt::BadVariantError<#union>> {
                    match value.kind {
                        #kind_path(payload) => ::core::result::Result::Ok(payload),
                        kind => ::core::result::Result::Err(#rt::BadVariantError::new(
                            #name,
                            #union { kind },
                        )),
                    }
                }

                fn peek(value: &#union) -> ::core::option::Option<&Self> {
                    match &value.kind {
                        #kind_path(payload) => ::core::option::Option::Some(payload),
                        _ => ::core::option::Option::None,
                    }
                }
            }

            impl ::core::convert::TryFrom<#union> for #payload {
                type Error = #rt::BadVariantError<#union>;

                fn try_from(value: #union) -> ::core::result::Result<Self, Self::Error> {
                    <Self as #rt::Variant<#union>>::extract(value)
                }
            }
        }
    });

    quote! {
        impl ::core::convert::From<#kind> for #union {
            fn from(kind: #kind) -> Self {
                Self { kind }
            }
        }

        impl #rt::SumType for #union {
            type Tag = #tag;

            const VARIANT_NAMES: &'static [&'static str] = &[#(#names),*];

            fn tag(&self) -> #tag {
                #union::tag(self)
            }

            fn variant_index(&self) -> usize {
                #union::tag(self).index()
            }
        }

        #(#variant_impls)*
    }
}

/// Emit the union with everything that is implemented directly on it.
pub(crate) fn emit_union(ctx: &EmitCtx<'_>) -> TokenStream {
    let tag = emit_tag(ctx);
    let types = emit_types(ctx);
    let methods = emit_methods(ctx);
    let default = ctx.def.options.default.then(|| emit_default(ctx));
    let display = ctx.def.options.display.then(|| emit_display(ctx));
    let conversions = emit_conversions(ctx);

    quote! {
        #tag
        #types
        #methods
        #default
        #display
        #conversions
    }
}
