//! Utilities for phrasing lists of items within diagnostics.
use std::fmt;

/// Display a list of alternatives within backticks, joined by commas and a
/// final `or`: "either `a`, `b`, or `c`".
pub struct SequenceDisplay<'a, T: 'a> {
    pub items: &'a [T],
}

impl<'a, T: 'a> SequenceDisplay<'a, T> {
    pub fn either(items: &'a [T]) -> Self {
        Self { items }
    }
}

impl<'a, T: fmt::Display + 'a> fmt::Display for SequenceDisplay<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.items {
            [] => Ok(()),
            [item] => write!(f, "`{item}`"),
            [init @ .., last] => {
                write!(f, "either ")?;

                for item in init {
                    write!(f, "`{item}`, ")?;
                }

                write!(f, "or `{last}`")
            }
        }
    }
}
