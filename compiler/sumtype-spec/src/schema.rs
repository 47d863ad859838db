//! The synthesized description of a sum type: its variants, their payload
//! shapes and their string forms.
use std::collections::HashMap;

use crate::options::UnionOptions;

/// The shape of the payload that a variant carries, decided by its number of
/// fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadKind {
    /// No fields, the payload is a zero-size marker.
    Empty,
    /// One field, the payload is a transparent wrapper around it.
    Single,
    /// Two or more fields, the payload is an ordered record.
    Multi,
}

impl PayloadKind {
    pub fn from_arity(arity: usize) -> Self {
        match arity {
            0 => PayloadKind::Empty,
            1 => PayloadKind::Single,
            _ => PayloadKind::Multi,
        }
    }
}

/// A field of a variant payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field<T> {
    /// Position of the field within the payload.
    pub index: usize,
    pub ty: T,
    pub label: Option<String>,
}

/// A synthesized variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant<T> {
    /// The declared name, which is also the constructor name.
    pub name: String,

    /// The lower-cased name, unique within the sum type.
    pub tag_name: String,

    pub kind: PayloadKind,
    pub fields: Vec<Field<T>>,

    /// A `format!` template for the rendering of the variant, with one `{}`
    /// per field, e.g. `Move({}, {})`.
    pub string_form: String,
}

impl<T> Variant<T> {
    pub fn constructor_name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> usize {
        self.fields.len()
    }

    pub fn labels(&self) -> impl Iterator<Item = (&Field<T>, &str)> {
        self.fields.iter().filter_map(|field| field.label.as_deref().map(|label| (field, label)))
    }

    /// Render the variant given already rendered field values.
    pub fn render(&self, values: &[String]) -> String {
        debug_assert_eq!(values.len(), self.arity());
        let mut rendered = self.name.clone();
        if !values.is_empty() {
            rendered.push('(');
            rendered.push_str(&values.join(", "));
            rendered.push(')');
        }
        rendered
    }
}

/// Where a label can be found within a [UnionSchema].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelSite {
    pub variant: usize,
    pub field: usize,
}

/// The complete, closed description of a sum type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionSchema<T> {
    pub name: String,
    pub variants: Vec<Variant<T>>,
    pub options: UnionOptions,
}

impl<T> UnionSchema<T> {
    /// The variant whose default payload is the default of the sum type, the
    /// first declared one.
    pub fn default_variant(&self) -> &Variant<T> {
        &self.variants[0]
    }

    pub fn variant(&self, name: &str) -> Option<&Variant<T>> {
        self.variants.iter().find(|variant| variant.name == name)
    }

    /// Labels which occur in exactly one variant of the sum type, in
    /// declaration order, together with where they occur.
    pub fn unambiguous_labels(&self) -> Vec<(&str, LabelSite)> {
        let mut occurrences: HashMap<&str, usize> = HashMap::new();
        for variant in &self.variants {
            for (_, label) in variant.labels() {
                *occurrences.entry(label).or_default() += 1;
            }
        }

        self.variants
            .iter()
            .enumerate()
            .flat_map(|(variant_index, variant)| {
                variant.labels().map(move |(field, label)| {
                    (label, LabelSite { variant: variant_index, field: field.index })
                })
            })
            .filter(|(label, _)| occurrences.get(label) == Some(&1))
            .collect()
    }
}
