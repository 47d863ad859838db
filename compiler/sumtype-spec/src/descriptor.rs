//! The input of the compilation pipeline: a list of variant descriptors,
//! each a name followed by a sequence of field tokens.

/// One token of a variant field sequence.
///
/// A field sequence is made up of type tokens, each of which may be followed
/// by a single label token which names that field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldToken<T> {
    Type(T),
    Label(String),
}

impl<T> FieldToken<T> {
    pub fn is_label(&self) -> bool {
        matches!(self, FieldToken::Label(_))
    }
}

/// The declaration of a single variant prior to validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantDescriptor<T> {
    pub name: String,
    pub fields: Vec<FieldToken<T>>,
}

impl<T> VariantDescriptor<T> {
    /// Create a descriptor with no fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), fields: Vec::new() }
    }

    /// Append a type token.
    pub fn ty(mut self, ty: T) -> Self {
        self.fields.push(FieldToken::Type(ty));
        self
    }

    /// Append a label token, naming the previous type token.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.fields.push(FieldToken::Label(label.into()));
        self
    }

    /// Append a type token that is immediately labelled.
    pub fn field(self, ty: T, label: impl Into<String>) -> Self {
        self.ty(ty).label(label)
    }

    /// The number of type tokens in the field sequence.
    pub fn arity(&self) -> usize {
        self.fields.iter().filter(|token| !token.is_label()).count()
    }
}
