//! Utilities to validate a [SumTypeDef] before emitting, producing the
//! [UnionSchema] that the emitter works from.
use std::collections::HashSet;

use itertools::Itertools;
use proc_macro2::Span;
use sumtype_spec::{ErrorLocation, SpecError, UnionSchema, compile};
use syn::ext::IdentExt;

use crate::{
    definitions::{SumTypeDef, SumTypeDefs},
    names::{UnionNames, VariantNames, reserved_union_methods},
};

/// A validated definition: the parsed form together with its schema.
pub struct ValidatedSumType<'def> {
    pub(crate) def: &'def SumTypeDef,
    pub(crate) schema: UnionSchema<syn::Type>,
}

/// Combine a list of errors into one, if there are any.
fn combine_errors(errors: impl IntoIterator<Item = syn::Error>) -> Result<(), syn::Error> {
    let combined = errors.into_iter().reduce(|mut combined, error| {
        combined.combine(error);
        combined
    });

    match combined {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

/// Get the span that the given descriptor error refers to.
fn spec_error_span(def: &SumTypeDef, error: &SpecError) -> Span {
    match error.location() {
        ErrorLocation::Declaration => def.body_span,
        ErrorLocation::VariantName { variant } => def.variants[variant].name.span(),
        ErrorLocation::FieldToken { variant, token } => def.variants[variant].token_span(token),
    }
}

/// Convert a descriptor error into a spanned diagnostic.
fn spec_error_to_syn(def: &SumTypeDef, error: &SpecError) -> syn::Error {
    syn::Error::new(spec_error_span(def, error), format!("{error} [{}]", error.code()))
}

/// Check the parts of a valid schema that depend on Rust itself: labels must
/// not be keywords, and the generated item names must not collide.
fn check_rust_names(def: &SumTypeDef, schema: &UnionSchema<syn::Type>) -> Vec<syn::Error> {
    let mut errors = vec![];
    let names = def.variants.iter().map(|variant| VariantNames::new(&variant.name)).collect_vec();

    let mut generated: HashSet<String> =
        reserved_union_methods().iter().map(|name| name.to_string()).collect();
    let mut seen_snake: HashSet<&str> = HashSet::new();

    for (variant_def, names) in def.variants.iter().zip(&names) {
        if !seen_snake.insert(&names.snake) {
            errors.push(syn::Error::new(
                variant_def.name.span(),
                format!(
                    "Variant `{}` produces the same method names as another variant (`{}`)",
                    variant_def.name, names.is_fn
                ),
            ));
        }
        generated.extend(names.union_methods());
    }

    for ((variant_def, variant), names) in def.variants.iter().zip(&schema.variants).zip(&names) {
        if generated.contains(&names.ident.unraw().to_string()) {
            errors.push(syn::Error::new(
                variant_def.name.span(),
                format!(
                    "Variant `{}` clashes with a generated method of the sum type",
                    variant.name
                ),
            ));
        }

        for (field, label) in variant.labels() {
            if syn::parse_str::<syn::Ident>(label).is_ok() {
                continue;
            }

            // The label token directly follows the type token of its field.
            let token = variant_def
                .tokens
                .iter()
                .positions(|token| !token.is_label())
                .nth(field.index)
                .map_or(0, |position| position + 1);

            errors.push(syn::Error::new(
                variant_def.token_span(token),
                format!("Label `{label}` in variant `{}` is a keyword", variant.name),
            ));
        }
    }

    errors
}

/// Validate one definition.
pub fn validate_sum_type_def(def: &SumTypeDef) -> Result<ValidatedSumType<'_>, syn::Error> {
    let names = UnionNames::new(&def.name);
    let schema = compile(names.union.unraw().to_string(), def.descriptors(), def.options.clone())
        .map_err(|errors| {
            let mut combined = spec_error_to_syn(def, errors.first());
            for error in errors.iter().skip(1) {
                combined.combine(spec_error_to_syn(def, error));
            }
            combined
        })?;

    combine_errors(check_rust_names(def, &schema))?;
    Ok(ValidatedSumType { def, schema })
}

/// Validate every definition, reporting the errors of all of them.
pub fn validate_sum_type_defs(
    defs: &SumTypeDefs,
) -> Result<Vec<ValidatedSumType<'_>>, syn::Error> {
    let mut validated = vec![];
    let mut errors = vec![];

    for def in &defs.defs {
        match validate_sum_type_def(def) {
            Ok(sum_type) => validated.push(sum_type),
            Err(error) => errors.push(error),
        }
    }

    combine_errors(errors)?;
    Ok(validated)
}
