//! Turning validated descriptors into [Variant]s, and the full
//! descriptor-to-schema pipeline.
use itertools::Itertools;
use log::debug;

use crate::{
    descriptor::VariantDescriptor,
    error::SpecResult,
    options::UnionOptions,
    schema::{Field, PayloadKind, UnionSchema, Variant},
    validate::{ValidatedDescriptor, validate},
};

/// Escape a piece of text for use inside of a `format!` template.
fn escape_template(text: &str) -> String {
    text.replace('{', "{{").replace('}', "}}")
}

/// Build the string form template of a variant: `Name`, `Name({})`,
/// `Name({}, {}, ...)`.
pub fn string_form(name: &str, arity: usize) -> String {
    let name = escape_template(name);
    if arity == 0 { name } else { format!("{name}({})", ["{}"].repeat(arity).join(", ")) }
}

/// Synthesize the [Variant] that a validated descriptor describes.
pub fn synthesize<T>(descriptor: ValidatedDescriptor<T>) -> Variant<T> {
    let ValidatedDescriptor { name, fields } = descriptor;

    let fields = fields
        .into_iter()
        .enumerate()
        .map(|(index, field)| Field { index, ty: field.ty, label: field.label })
        .collect_vec();

    Variant {
        tag_name: name.to_lowercase(),
        kind: PayloadKind::from_arity(fields.len()),
        string_form: string_form(&name, fields.len()),
        name,
        fields,
    }
}

/// Validate the given descriptors, and synthesize a [UnionSchema] from them.
pub fn compile<T>(
    name: impl Into<String>,
    descriptors: Vec<VariantDescriptor<T>>,
    options: UnionOptions,
) -> SpecResult<UnionSchema<T>> {
    let name = name.into();
    let variants = validate(descriptors)?.into_iter().map(synthesize).collect_vec();

    debug!(
        "compiled sum type `{name}` with variants {}",
        variants.iter().map(|variant| variant.name.as_str()).join(", ")
    );

    Ok(UnionSchema { name, variants, options })
}
