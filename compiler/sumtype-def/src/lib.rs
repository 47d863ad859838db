//! This crate defines a macro [`define_sum_type!`] that can be used to define
//! closed sum types, where every variant carries its own payload type. The
//! macro generates the union, the payloads, constructors named after the
//! variants, and utilities to match on the active variant.

use sumtype_emit::{SumTypeDefs, emit_sum_types, validate_sum_type_defs};
use syn::parse_macro_input;

/// Helper to return a syn error as a compiler error if one of the stages fails.
macro_rules! try_syn_err {
    ($x:expr) => {
        match $x {
            Ok(value) => value,
            Err(error) => return error.to_compile_error().into(),
        }
    };
}

/// Define one or more sum types.
///
/// # Examples
///
/// The following definition:
///
/// ```ignore
/// define_sum_type! {
///     #[derive(Debug, Clone)]
///     pub Message {
///         Quit,
///         Move(i32, "x", i32, "y"),
///         Echo(String),
///         ChangeColor(u8, u8, u8),
///     }
/// }
/// ```
///
/// will generate:
/// - A union `Message`, whose value is always exactly one of the variants.
///   Its default is the default payload of the first variant, and it
///   displays as `Quit`, `Move(4, 5)`, `Echo(hello)`, etc.
/// - A module `message` with a payload type per variant: `message::Quit` is a
///   unit struct, `message::Echo` wraps a `String`, and `message::Move` holds
///   both fields, with accessors `x()` and `y()` for the labels.
/// - Constructors `Message::Quit()`, `Message::Move(x, y)`, etc.
/// - `is_*`, `as_*`, and `into_*` methods on the union for each variant,
///   `tag()` giving a `MessageTag`, and `kind()` giving the `MessageKind` enum
///   that can be matched on exhaustively.
/// - A `MessageMatcher` which chains per-variant handlers, and a
///   `MessageVisitor` trait with a `visit_*` method per variant.
///
/// The generation can be tuned with `#[sum_type(...)]`, which accepts the
/// switches `no_default`, `no_display`, `no_eq`, `no_visitor` and the
/// runtime path `crate = "..."`.
#[proc_macro]
pub fn define_sum_type(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let defs = parse_macro_input!(input as SumTypeDefs);
    let validated = try_syn_err!(validate_sum_type_defs(&defs));
    let result = try_syn_err!(emit_sum_types(&validated));
    proc_macro::TokenStream::from(result)
}
