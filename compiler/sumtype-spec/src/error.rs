//! Diagnostics that can be produced while validating a set of variant
//! descriptors.
use std::fmt;

use thiserror::Error;

use crate::error_codes::ErrorCode;

/// Where in the descriptor set a [SpecError] originates. The macro layer uses
/// this to map the error back onto a source span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorLocation {
    /// The whole declaration, i.e. no descriptor in particular.
    Declaration,

    /// The name of the descriptor at the given index.
    VariantName { variant: usize },

    /// A token within the field sequence of a descriptor.
    FieldToken { variant: usize, token: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    /// A sum type must have at least one variant.
    #[error("a sum type must declare at least one variant")]
    NoVariants,

    /// A variant with an empty name.
    #[error("variant #{variant} has an empty name")]
    EmptyVariantName { variant: usize },

    /// A label token at the start of the field sequence, with no type to
    /// attach to.
    #[error("label `{label}` in variant `{name}` must follow a field type")]
    LeadingLabel { variant: usize, token: usize, name: String, label: String },

    /// A label token that follows another label token.
    #[error("label `{label}` in variant `{name}` follows another label, expected a field type")]
    ConsecutiveLabel { variant: usize, token: usize, name: String, label: String },

    /// The same label is used for two fields of one variant.
    #[error("label `{label}` is used more than once in variant `{name}`")]
    DuplicateLabel { variant: usize, token: usize, name: String, label: String },

    /// A label that cannot be used as a field name.
    #[error("label `{label}` in variant `{name}` is not a valid field name")]
    InvalidLabel { variant: usize, token: usize, name: String, label: String },

    /// A label that would shadow an accessor of the payload.
    #[error("label `{label}` in variant `{name}` is reserved")]
    ReservedLabel { variant: usize, token: usize, name: String, label: String },

    /// Two variants with the same name.
    #[error("variant `{name}` is declared more than once")]
    DuplicateVariantName { variant: usize, previous: usize, name: String },

    /// Two variants whose names only differ by case.
    #[error("variant `{name}` clashes with variant `{previous_name}` when compared ignoring case")]
    CaseInsensitiveNameClash {
        variant: usize,
        previous: usize,
        name: String,
        previous_name: String,
    },
}

impl SpecError {
    /// The code of this diagnostic.
    pub fn code(&self) -> ErrorCode {
        match self {
            SpecError::NoVariants => ErrorCode::NoVariants,
            SpecError::EmptyVariantName { .. } => ErrorCode::EmptyVariantName,
            SpecError::LeadingLabel { .. } => ErrorCode::LeadingLabel,
            SpecError::ConsecutiveLabel { .. } => ErrorCode::ConsecutiveLabel,
            SpecError::DuplicateLabel { .. } => ErrorCode::DuplicateLabel,
            SpecError::InvalidLabel { .. } => ErrorCode::InvalidLabel,
            SpecError::ReservedLabel { .. } => ErrorCode::ReservedLabel,
            SpecError::DuplicateVariantName { .. } => ErrorCode::DuplicateVariantName,
            SpecError::CaseInsensitiveNameClash { .. } => ErrorCode::CaseInsensitiveNameClash,
        }
    }

    /// The location that this diagnostic should be reported at.
    pub fn location(&self) -> ErrorLocation {
        match *self {
            SpecError::NoVariants => ErrorLocation::Declaration,
            SpecError::EmptyVariantName { variant }
            | SpecError::DuplicateVariantName { variant, .. }
            | SpecError::CaseInsensitiveNameClash { variant, .. } => {
                ErrorLocation::VariantName { variant }
            }
            SpecError::LeadingLabel { variant, token, .. }
            | SpecError::ConsecutiveLabel { variant, token, .. }
            | SpecError::DuplicateLabel { variant, token, .. }
            | SpecError::InvalidLabel { variant, token, .. }
            | SpecError::ReservedLabel { variant, token, .. } => {
                ErrorLocation::FieldToken { variant, token }
            }
        }
    }

    /// Render the diagnostic with its code, `error[E0001]: ...`.
    pub fn render(&self) -> String {
        format!("error[{}]: {self}", self.code())
    }
}

/// All of the diagnostics that were found in a set of descriptors, in the order
/// that they were found. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecErrors {
    errors: Vec<SpecError>,
}

impl SpecErrors {
    pub(crate) fn new(errors: Vec<SpecError>) -> Self {
        debug_assert!(!errors.is_empty());
        Self { errors }
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpecError> {
        self.errors.iter()
    }

    pub fn first(&self) -> &SpecError {
        &self.errors[0]
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn codes(&self) -> Vec<ErrorCode> {
        self.errors.iter().map(SpecError::code).collect()
    }
}

impl IntoIterator for SpecErrors {
    type Item = SpecError;
    type IntoIter = std::vec::IntoIter<SpecError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl fmt::Display for SpecErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, error) in self.errors.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", error.render())?;
        }
        Ok(())
    }
}

impl std::error::Error for SpecErrors {}

pub type SpecResult<T> = Result<T, SpecErrors>;
