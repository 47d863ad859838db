//! Traits which allow for writing code that is generic over the unions
//! generated by [define_sum_type!](crate::define_sum_type), and over their
//! variants.
use std::{fmt, hash::Hash};

use thiserror::Error;

/// A union generated by [define_sum_type!](crate::define_sum_type).
pub trait SumType: Sized {
    /// The fieldless discriminant of the union.
    type Tag: Copy + Eq + Hash + fmt::Debug + 'static;

    /// The names of the variants, in declaration order.
    const VARIANT_NAMES: &'static [&'static str];

    /// Get the tag of the active variant.
    fn tag(&self) -> Self::Tag;

    /// Get the declaration index of the active variant.
    fn variant_index(&self) -> usize;

    /// Get the name of the active variant.
    fn variant_name(&self) -> &'static str {
        Self::VARIANT_NAMES[self.variant_index()]
    }

    /// Whether the active variant carries the payload `V`.
    fn holds<V: Variant<Self>>(&self) -> bool {
        V::peek(self).is_some()
    }

    /// Get the payload of the active variant if it is a `V`.
    fn get<V: Variant<Self>>(&self) -> Option<&V> {
        V::peek(self)
    }

    /// Move the payload out of the union if it is a `V`, otherwise give the
    /// union back within the error.
    fn take<V: Variant<Self>>(self) -> Result<V, BadVariantError<Self>> {
        V::extract(self)
    }
}

/// `impl Variant<U> for P` is the unique embedding of the payload `P` into the
/// union `U`.
///
/// It is always the case that `P::extract(p.insert())` gives back `p`.
pub trait Variant<U: SumType>: Sized {
    /// The name of the variant that carries this payload.
    const NAME: &'static str;

    /// The declaration index of the variant that carries this payload.
    const INDEX: usize;

    /// Wrap the payload into the union.
    fn insert(self) -> U;

    /// Move the payload out of the union.
    fn extract(value: U) -> Result<Self, BadVariantError<U>>;

    /// Borrow the payload from the union.
    fn peek(value: &U) -> Option<&Self>;
}

/// Error returned when extracting a payload from a union whose active variant
/// carries a different payload. The union is handed back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected variant `{expected}`, found `{found}`")]
pub struct BadVariantError<U> {
    expected: &'static str,
    found: &'static str,
    value: U,
}

impl<U: SumType> BadVariantError<U> {
    pub fn new(expected: &'static str, value: U) -> Self {
        Self { expected, found: value.variant_name(), value }
    }
}

impl<U> BadVariantError<U> {
    /// The name of the variant that was asked for.
    pub fn expected(&self) -> &'static str {
        self.expected
    }

    /// The name of the variant that was active.
    pub fn found(&self) -> &'static str {
        self.found
    }

    pub fn value(&self) -> &U {
        &self.value
    }

    /// Get the union back.
    pub fn into_inner(self) -> U {
        self.value
    }
}
