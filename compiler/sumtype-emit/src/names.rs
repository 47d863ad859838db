//! Naming conventions of the items generated for a sum type.

use convert_case::{Case, Casing};
use proc_macro2::Span;
use quote::format_ident;
use syn::{Ident, ext::IdentExt};

/// Inherent methods of every generated union, which variant names may not
/// shadow.
pub(crate) fn reserved_union_methods() -> &'static [&'static str] {
    &["kind", "into_kind", "tag", "name", "replace", "set", "matcher", "accept"]
}

/// Methods of the traits that generated unions and payloads implement, or
/// commonly derive. An inherent label accessor of the same name would shadow
/// the trait method at every call site.
pub(crate) fn trait_method_names() -> &'static [&'static str] {
    &[
        // `SumType` and `Variant`
        "tag",
        "variant_index",
        "variant_name",
        "holds",
        "get",
        "take",
        "insert",
        "extract",
        "peek",
        // std
        "clone",
        "clone_from",
        "eq",
        "ne",
        "partial_cmp",
        "cmp",
        "lt",
        "le",
        "gt",
        "ge",
        "max",
        "min",
        "clamp",
        "hash",
        "fmt",
        "to_string",
        "to_owned",
        "default",
        "from",
        "into",
        "try_from",
        "try_into",
        "deref",
        "as_ref",
        "borrow",
        "borrow_mut",
        "type_id",
    ]
}

/// Whether a label accessor named `label` would shadow a trait method.
pub(crate) fn shadows_trait_method(label: &str) -> bool {
    trait_method_names().contains(&label)
}

/// Keywords which cannot be written as raw identifiers.
const NON_RAW_KEYWORDS: &[&str] = &["crate", "self", "super", "Self"];

/// Create an identifier from a string, falling back to a raw identifier when
/// the string is a keyword, or to a trailing `_` when not even that is
/// allowed.
pub(crate) fn ident_or_raw(name: &str, span: Span) -> Ident {
    if syn::parse_str::<Ident>(name).is_ok() {
        Ident::new(name, span)
    } else if NON_RAW_KEYWORDS.contains(&name) {
        format_ident!("{}_", name, span = span)
    } else {
        Ident::new_raw(name, span)
    }
}

/// Names of the items generated for the union itself.
pub(crate) struct UnionNames {
    /// The union type, as declared.
    pub(crate) union: Ident,
    /// The enum holding the active payload, `{Union}Kind`.
    pub(crate) kind: Ident,
    /// The fieldless discriminant, `{Union}Tag`.
    pub(crate) tag: Ident,
    /// The exhaustive visitor trait, `{Union}Visitor`.
    pub(crate) visitor: Ident,
    /// The handler chain, `{Union}Matcher`.
    pub(crate) matcher: Ident,
    /// The module holding the payload types, the union name in snake case.
    pub(crate) module: Ident,
}

impl UnionNames {
    pub(crate) fn new(union: &Ident) -> Self {
        let base = union.unraw().to_string();
        Self {
            union: union.clone(),
            kind: format_ident!("{}Kind", base, span = union.span()),
            tag: format_ident!("{}Tag", base, span = union.span()),
            visitor: format_ident!("{}Visitor", base, span = union.span()),
            matcher: format_ident!("{}Matcher", base, span = union.span()),
            module: ident_or_raw(&base.to_case(Case::Snake), union.span()),
        }
    }
}

/// Names of the items generated for a single variant.
pub(crate) struct VariantNames {
    /// The variant name as declared, which names the constructor, the
    /// payload type, the storage variant and the tag.
    pub(crate) ident: Ident,
    /// The variant name in snake case.
    pub(crate) snake: String,
    pub(crate) is_fn: Ident,
    pub(crate) as_fn: Ident,
    pub(crate) into_fn: Ident,
    pub(crate) visit_fn: Ident,
    pub(crate) on_fn: Ident,
}

impl VariantNames {
    pub(crate) fn new(ident: &Ident) -> Self {
        let snake = ident.unraw().to_string().to_case(Case::Snake);
        let span = ident.span();
        Self {
            ident: ident.clone(),
            is_fn: format_ident!("is_{}", snake, span = span),
            as_fn: format_ident!("as_{}", snake, span = span),
            into_fn: format_ident!("into_{}", snake, span = span),
            visit_fn: format_ident!("visit_{}", snake, span = span),
            on_fn: format_ident!("on_{}", snake, span = span),
            snake,
        }
    }

    /// All of the inherent union methods generated for this variant.
    pub(crate) fn union_methods(&self) -> [String; 3] {
        [self.is_fn.to_string(), self.as_fn.to_string(), self.into_fn.to_string()]
    }
}
