//! Well-formedness checks over a set of [VariantDescriptor]s.
//!
//! Validation is all-or-nothing: every diagnostic that can be found is
//! collected, and if there is at least one the whole set is rejected.
use std::collections::{HashMap, HashSet};

use log::trace;

use crate::{
    descriptor::{FieldToken, VariantDescriptor},
    error::{SpecError, SpecErrors, SpecResult},
};

/// Accessor names that every payload type defines, and so which can't be used
/// as a field label.
pub const RESERVED_LABELS: &[&str] = &["get", "into_inner"];

/// A field of a descriptor whose token sequence is known to be well formed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedField<T> {
    pub ty: T,
    pub label: Option<String>,
}

/// A descriptor that passed validation, with its field tokens grouped into
/// `(type, label?)` pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedDescriptor<T> {
    pub name: String,
    pub fields: Vec<ValidatedField<T>>,
}

/// Check whether the label is a plain identifier, `[A-Za-z_][A-Za-z0-9_]*`,
/// which isn't just `_`.
pub fn is_valid_label(label: &str) -> bool {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            label != "_" && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Check whether the label shadows a payload accessor, or a positional
/// parameter name `_0`, `_1`, ...
pub fn is_reserved_label(label: &str) -> bool {
    RESERVED_LABELS.contains(&label)
        || label
            .strip_prefix('_')
            .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()))
}

/// Check the field token sequence of a single descriptor, pushing any
/// diagnostics onto `errors`.
fn check_field_tokens<T>(
    index: usize,
    descriptor: &VariantDescriptor<T>,
    errors: &mut Vec<SpecError>,
) {
    let name = &descriptor.name;
    let mut seen_labels = HashSet::new();
    let mut previous_is_type = false;

    for (token, field) in descriptor.fields.iter().enumerate() {
        let label = match field {
            FieldToken::Type(_) => {
                previous_is_type = true;
                continue;
            }
            FieldToken::Label(label) => label,
        };

        let (variant, name, label) = (index, name.clone(), label.clone());
        let error = if token == 0 {
            Some(SpecError::LeadingLabel { variant, token, name, label })
        } else if !previous_is_type {
            Some(SpecError::ConsecutiveLabel { variant, token, name, label })
        } else if !seen_labels.insert(label.clone()) {
            Some(SpecError::DuplicateLabel { variant, token, name, label })
        } else if !is_valid_label(&label) {
            Some(SpecError::InvalidLabel { variant, token, name, label })
        } else if is_reserved_label(&label) {
            Some(SpecError::ReservedLabel { variant, token, name, label })
        } else {
            None
        };

        errors.extend(error);
        previous_is_type = false;
    }
}

/// Check that no two descriptors share a name, exactly or after lower-casing.
fn check_names<T>(descriptors: &[VariantDescriptor<T>], errors: &mut Vec<SpecError>) {
    let mut exact: HashMap<&str, usize> = HashMap::new();
    let mut lowered: HashMap<String, usize> = HashMap::new();

    for (variant, descriptor) in descriptors.iter().enumerate() {
        // Empty names have already been reported.
        if descriptor.name.is_empty() {
            continue;
        }

        if let Some(&previous) = exact.get(descriptor.name.as_str()) {
            errors.push(SpecError::DuplicateVariantName {
                variant,
                previous,
                name: descriptor.name.clone(),
            });
            continue;
        }

        if let Some(&previous) = lowered.get(&descriptor.name.to_lowercase()) {
            errors.push(SpecError::CaseInsensitiveNameClash {
                variant,
                previous,
                name: descriptor.name.clone(),
                previous_name: descriptors[previous].name.clone(),
            });
            continue;
        }

        exact.insert(&descriptor.name, variant);
        lowered.insert(descriptor.name.to_lowercase(), variant);
    }
}

/// Group a well formed token sequence into fields.
fn group_fields<T>(tokens: Vec<FieldToken<T>>) -> Vec<ValidatedField<T>> {
    let mut fields: Vec<ValidatedField<T>> = Vec::with_capacity(tokens.len());

    for token in tokens {
        match token {
            FieldToken::Type(ty) => fields.push(ValidatedField { ty, label: None }),
            FieldToken::Label(label) => {
                if let Some(field) = fields.last_mut() {
                    field.label = Some(label);
                }
            }
        }
    }

    fields
}

/// Validate a full set of descriptors.
///
/// The checks are, in order:
/// 1. there is at least one descriptor,
/// 2. no descriptor has an empty name,
/// 3. labels only ever follow a type token,
/// 4. no label is repeated within a descriptor (and every label is a usable,
///    non-reserved field name),
/// 5. no two descriptors have the same name, or the same lower-cased name.
pub fn validate<T>(
    descriptors: Vec<VariantDescriptor<T>>,
) -> SpecResult<Vec<ValidatedDescriptor<T>>> {
    if descriptors.is_empty() {
        return Err(SpecErrors::new(vec![SpecError::NoVariants]));
    }

    let mut errors = vec![];

    for (variant, descriptor) in descriptors.iter().enumerate() {
        if descriptor.name.is_empty() {
            errors.push(SpecError::EmptyVariantName { variant });
        }
        check_field_tokens(variant, descriptor, &mut errors);
    }

    check_names(&descriptors, &mut errors);

    if !errors.is_empty() {
        return Err(SpecErrors::new(errors));
    }

    Ok(descriptors
        .into_iter()
        .map(|descriptor| {
            trace!("validated variant `{}` ({} tokens)", descriptor.name, descriptor.fields.len());
            ValidatedDescriptor { name: descriptor.name, fields: group_fields(descriptor.fields) }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error_codes::ErrorCode;

    type Descriptor = VariantDescriptor<&'static str>;

    fn codes(descriptors: Vec<Descriptor>) -> Vec<ErrorCode> {
        validate(descriptors).unwrap_err().codes()
    }

    #[test]
    fn test_accepts_well_formed_descriptors() {
        let descriptors = vec![
            Descriptor::new("A"),
            Descriptor::new("B").field("int", "name"),
            Descriptor::new("C").ty("byte").ty("long"),
            Descriptor::new("D").ty("float").field("char", "name"),
            Descriptor::new("E").field("int", "nameA").field("(uint, uint)", "nameB"),
        ];

        let validated = validate(descriptors).unwrap();
        assert_eq!(validated.len(), 5);

        assert!(validated[0].fields.is_empty());
        assert_eq!(
            validated[3].fields,
            vec![
                ValidatedField { ty: "float", label: None },
                ValidatedField { ty: "char", label: Some("name".to_string()) },
            ]
        );
        assert_eq!(validated[4].fields[1].ty, "(uint, uint)");
        assert_eq!(validated[4].fields[1].label.as_deref(), Some("nameB"));
    }

    #[test]
    fn test_rejects_empty_set() {
        assert_eq!(codes(vec![]), vec![ErrorCode::NoVariants]);
    }

    #[test]
    fn test_rejects_empty_name() {
        let errors = validate(vec![Descriptor::new("A"), Descriptor::new("")]).unwrap_err();
        assert_eq!(errors.first(), &SpecError::EmptyVariantName { variant: 1 });
    }

    #[test]
    fn test_rejects_leading_label() {
        let errors = validate(vec![Descriptor::new("A").label("x").ty("int")]).unwrap_err();
        assert_eq!(
            errors.first(),
            &SpecError::LeadingLabel {
                variant: 0,
                token: 0,
                name: "A".to_string(),
                label: "x".to_string()
            }
        );
    }

    #[test]
    fn test_rejects_label_after_label() {
        let descriptor = Descriptor::new("A").ty("int").label("x").label("y");
        assert_eq!(codes(vec![descriptor]), vec![ErrorCode::ConsecutiveLabel]);
    }

    #[test]
    fn test_rejects_duplicate_label() {
        let descriptor = Descriptor::new("A").field("int", "x").field("int", "x");
        let errors = validate(vec![descriptor]).unwrap_err();
        assert_eq!(errors.first().code(), ErrorCode::DuplicateLabel);
        assert_eq!(
            errors.first().location(),
            crate::error::ErrorLocation::FieldToken { variant: 0, token: 3 }
        );
    }

    #[test]
    fn test_same_label_in_different_variants_is_fine() {
        let descriptors = vec![
            Descriptor::new("A").field("int", "x"),
            Descriptor::new("B").field("int", "x"),
        ];
        assert!(validate(descriptors).is_ok());
    }

    #[test]
    fn test_rejects_names_equal_ignoring_case() {
        let errors = validate(vec![Descriptor::new("Foo"), Descriptor::new("foo")]).unwrap_err();
        assert_eq!(
            errors.first(),
            &SpecError::CaseInsensitiveNameClash {
                variant: 1,
                previous: 0,
                name: "foo".to_string(),
                previous_name: "Foo".to_string(),
            }
        );
    }

    #[test]
    fn test_rejects_exact_duplicate_names() {
        let descriptors = vec![Descriptor::new("A"), Descriptor::new("B"), Descriptor::new("A")];
        let errors = validate(descriptors).unwrap_err();
        assert_eq!(
            errors.first(),
            &SpecError::DuplicateVariantName { variant: 2, previous: 0, name: "A".to_string() }
        );
    }

    #[test]
    fn test_rejects_unusable_labels() {
        let descriptors = vec![
            Descriptor::new("A").field("int", "1x"),
            Descriptor::new("B").field("int", "get"),
            Descriptor::new("C").ty("int").field("int", "_0"),
        ];
        assert_eq!(
            codes(descriptors),
            vec![ErrorCode::InvalidLabel, ErrorCode::ReservedLabel, ErrorCode::ReservedLabel]
        );
    }

    #[test]
    fn test_collects_every_error_in_order() {
        let descriptors = vec![
            Descriptor::new("").label("x"),
            Descriptor::new("B").field("int", "y").field("int", "y"),
            Descriptor::new("b"),
        ];
        assert_eq!(
            codes(descriptors),
            vec![
                ErrorCode::EmptyVariantName,
                ErrorCode::LeadingLabel,
                ErrorCode::DuplicateLabel,
                ErrorCode::CaseInsensitiveNameClash,
            ]
        );
    }

    #[test]
    fn test_label_checks() {
        assert!(is_valid_label("x"));
        assert!(is_valid_label("_x1"));
        assert!(!is_valid_label(""));
        assert!(!is_valid_label("_"));
        assert!(!is_valid_label("a-b"));
        assert!(is_reserved_label("_12"));
        assert!(is_reserved_label("into_inner"));
        assert!(!is_reserved_label("_"));
        assert!(!is_reserved_label("_a1"));
    }
}
