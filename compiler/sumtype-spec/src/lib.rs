//! The declarative side of sum type definitions: variant descriptors, their
//! validation, and the synthesis of a closed [UnionSchema] from them.
//!
//! The crate is independent of any particular representation of field types,
//! every structure is generic over the type token `T`. The macro front-end
//! uses [`syn::Type`](https://docs.rs/syn), tests use plain strings.

pub mod descriptor;
pub mod error;
pub mod error_codes;
pub mod options;
pub mod schema;
pub mod synthesize;
pub mod validate;

pub use descriptor::{FieldToken, VariantDescriptor};
pub use error::{ErrorLocation, SpecError, SpecErrors, SpecResult};
pub use error_codes::ErrorCode;
pub use options::UnionOptions;
pub use schema::{Field, LabelSite, PayloadKind, UnionSchema, Variant};
pub use synthesize::compile;
