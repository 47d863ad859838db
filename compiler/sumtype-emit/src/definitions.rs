//! Data types for storing the parsed sum type definitions given to the
//! `define_sum_type!` macro.

use proc_macro2::Span;
use sumtype_spec::{FieldToken, UnionOptions, VariantDescriptor};
use syn::ext::IdentExt;

/// The name of the attribute which carries generation options.
pub(crate) const OPTIONS_ATTR_NAME: &str = "sum_type";

/// A variant declaration, `Name` or `Name(type, "label", type, ...)`.
#[derive(Clone, Debug)]
pub struct VariantDef {
    pub(crate) attrs: Vec<syn::Attribute>,
    pub(crate) name: syn::Ident,

    /// The field tokens, in the order in which they were written.
    pub(crate) tokens: Vec<FieldToken<syn::Type>>,

    /// The span of each field token, parallel to `tokens`.
    pub(crate) token_spans: Vec<Span>,
}

impl VariantDef {
    /// Convert the definition into a descriptor for validation.
    pub(crate) fn to_descriptor(&self) -> VariantDescriptor<syn::Type> {
        VariantDescriptor { name: self.name.unraw().to_string(), fields: self.tokens.clone() }
    }

    /// Get the span of the `token`-th field token, defaulting to the name.
    pub(crate) fn token_span(&self, token: usize) -> Span {
        self.token_spans.get(token).copied().unwrap_or_else(|| self.name.span())
    }
}

/// A single sum type definition.
#[derive(Clone, Debug)]
pub struct SumTypeDef {
    /// Attributes that are forwarded onto the union type.
    pub(crate) attrs: Vec<syn::Attribute>,

    /// Derives that are forwarded onto the union type, its storage and its
    /// payloads.
    pub(crate) derives: Vec<syn::Path>,

    pub(crate) options: UnionOptions,

    /// The path to the runtime crate, parsed from [UnionOptions::runtime_path].
    pub(crate) runtime_path: syn::Path,

    pub(crate) visibility: syn::Visibility,
    pub(crate) name: syn::Ident,
    pub(crate) variants: Vec<VariantDef>,

    /// The span of the braces that enclose the variants.
    pub(crate) body_span: Span,
}

impl SumTypeDef {
    pub(crate) fn descriptors(&self) -> Vec<VariantDescriptor<syn::Type>> {
        self.variants.iter().map(VariantDef::to_descriptor).collect()
    }

    /// Whether the given derive is forwarded, comparing the last path
    /// segment.
    pub(crate) fn derives_trait(&self, name: &str) -> bool {
        self.derives.iter().any(|path| path.segments.last().is_some_and(|seg| seg.ident == name))
    }
}

/// All of the definitions given to one invocation of the macro.
#[derive(Clone, Debug)]
pub struct SumTypeDefs {
    pub(crate) defs: Vec<SumTypeDef>,
}

impl SumTypeDefs {
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}
