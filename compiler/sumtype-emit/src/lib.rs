//! The implementation of the `define_sum_type!` macro: parsing a sum type
//! definition, validating it against the rules of sum types, and emitting
//! the union with its payloads, constructors and matching utilities.
//!
//! This lives apart from the `proc-macro` crate so that each stage can be
//! driven from ordinary code and tests.

mod definitions;
mod emit;
mod names;
mod parse;
mod printing;
mod validate;

use std::{fmt, str::FromStr};

pub use definitions::{SumTypeDef, SumTypeDefs, VariantDef};
pub use emit::{emit_sum_type, emit_sum_types};
use log::debug;
use proc_macro2::TokenStream;
pub use validate::{ValidatedSumType, validate_sum_type_def, validate_sum_type_defs};

/// The stages of the macro expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Parse,
    Validate,
    Emit,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Parse, Stage::Validate, Stage::Emit];

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Parse => "parse",
            Stage::Validate => "validate",
            Stage::Emit => "emit",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stage::ALL
            .into_iter()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| format!("unknown stage `{s}`"))
    }
}

/// Run the expansion up to and including the given stage. Stages before
/// [Stage::Emit] produce no tokens.
pub fn expand_to(input: TokenStream, stage: Stage) -> syn::Result<TokenStream> {
    let defs: SumTypeDefs = syn::parse2(input)?;
    debug!("parsed {} sum type definition(s)", defs.len());
    if stage == Stage::Parse {
        return Ok(TokenStream::new());
    }

    let validated = validate_sum_type_defs(&defs)?;
    if stage == Stage::Validate {
        return Ok(TokenStream::new());
    }

    emit_sum_types(&validated)
}

/// Expand the input of `define_sum_type!`.
pub fn expand(input: TokenStream) -> syn::Result<TokenStream> {
    expand_to(input, Stage::Emit)
}
