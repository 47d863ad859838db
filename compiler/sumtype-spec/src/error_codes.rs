//! Error code definitions for sum type definition diagnostics.
use std::fmt;

/// Declare the [ErrorCode] table. Each entry is a variant name and its
/// numerical code, which is rendered as `E0001` etc.
macro_rules! error_codes {
    ($($name:ident = $code:expr),* $(,)?) => {
        /// A code that uniquely identifies a kind of definition diagnostic.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ErrorCode {
            $($name = $code),*
        }

        impl ErrorCode {
            /// All of the registered error codes.
            pub const ALL: &'static [ErrorCode] = &[$(ErrorCode::$name),*];

            /// The name of the diagnostic that this code represents.
            pub fn name(self) -> &'static str {
                match self {
                    $(ErrorCode::$name => stringify!($name)),*
                }
            }
        }
    };
}

error_codes! {
    // Descriptor set errors
    NoVariants = 1,
    DuplicateVariantName = 2,
    CaseInsensitiveNameClash = 3,

    // Descriptor errors
    EmptyVariantName = 10,

    // Field token errors
    LeadingLabel = 20,
    ConsecutiveLabel = 21,
    DuplicateLabel = 22,
    InvalidLabel = 23,
    ReservedLabel = 24,
}

impl ErrorCode {
    /// Get the numerical value of the code.
    pub fn as_u32(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.as_u32())
    }
}
