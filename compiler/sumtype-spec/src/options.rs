//! Generation options of a single sum type definition.

/// The path of the runtime crate that generated code refers to, unless
/// overridden.
pub const DEFAULT_RUNTIME_PATH: &str = "::sumtype";

/// Which parts of the union surface should be generated.
///
/// Everything is enabled by default; the options only ever switch surface
/// off, apart from `runtime_path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionOptions {
    /// Implement `Default` in terms of the first variant.
    pub default: bool,

    /// Implement `Display` using the string form of each variant.
    pub display: bool,

    /// Derive `PartialEq` on the union, its storage and its payloads.
    pub eq: bool,

    /// Emit the visitor trait and `accept`.
    pub visitor: bool,

    /// Path to the runtime crate.
    pub runtime_path: String,
}

impl Default for UnionOptions {
    fn default() -> Self {
        Self {
            default: true,
            display: true,
            eq: true,
            visitor: true,
            runtime_path: DEFAULT_RUNTIME_PATH.to_string(),
        }
    }
}

/// The names of the options that switch part of the surface off.
pub const SWITCH_OPTIONS: &[&str] = &["no_default", "no_display", "no_eq", "no_visitor"];

impl UnionOptions {
    /// Apply a switch from [SWITCH_OPTIONS] by name. Returns `false` if the
    /// switch is unknown.
    pub fn apply_switch(&mut self, switch: &str) -> bool {
        match switch {
            "no_default" => self.default = false,
            "no_display" => self.display = false,
            "no_eq" => self.eq = false,
            "no_visitor" => self.visitor = false,
            _ => return false,
        }
        true
    }
}
