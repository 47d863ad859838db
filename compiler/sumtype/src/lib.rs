//! Closed sum types from a declarative list of variants.
//!
//! The [define_sum_type!] macro compiles a list of variant declarations into
//! a union type, one payload type per variant, a constructor per variant,
//! and matching, default, equality and display behaviour for the union:
//!
//! ```ignore
//! sumtype::define_sum_type! {
//!     #[derive(Debug, Clone)]
//!     pub Message {
//!         Move(i32, "x", i32, "y"),
//!         Echo(String),
//!         ChangeColor(u32, u32, u32),
//!         Quit,
//!     }
//! }
//!
//! let message = Message::Move(4, 5);
//! assert_eq!(message.to_string(), "Move(4, 5)");
//! assert_eq!(message.x(), Some(&4));
//! ```
//!
//! This crate holds the traits that every generated union implements, so that
//! code can be written generically over unions and their variants.

mod variant;

pub use sumtype_def::define_sum_type;
pub use variant::{BadVariantError, SumType, Variant};
