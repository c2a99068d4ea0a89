//! Destructuring options and assumptions.
//!
//! Three sources can toggle the relaxed semantics:
//!
//! - explicit transform options (`allowArrayLike`, `loose`, `useBuiltIns`)
//! - the compilation-wide assumption registry (`iterableIsArray`,
//!   `arrayLikeIsIterable`, `objectRestNoSymbols`)
//! - the built-in default (everything off)
//!
//! They are resolved once into a [`ResolvedConfig`] at the start of a
//! compilation unit; lowering code only ever reads the resolved flags.
//!
//! ```json
//! {
//!   "options": { "loose": true, "useBuiltIns": true },
//!   "assumptions": { "objectRestNoSymbols": false }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{LoweringError, Result};

/// Options given to the destructuring transform itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DestructuringOptions {
    /// Treat array-like, non-iterable values as iterable by index.
    #[serde(default)]
    pub allow_array_like: Option<bool>,
    /// Shorthand for `iterableIsArray` and `objectRestNoSymbols`.
    #[serde(default)]
    pub loose: Option<bool>,
    /// Emit native runtime operations instead of helper calls where one exists.
    #[serde(default)]
    pub use_built_ins: Option<bool>,
}

/// Entries of the compilation-wide assumption registry.
///
/// Unknown keys are ignored: the registry is shared with other transforms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assumptions {
    #[serde(default)]
    pub iterable_is_array: Option<bool>,
    #[serde(default)]
    pub array_like_is_iterable: Option<bool>,
    #[serde(default)]
    pub object_rest_no_symbols: Option<bool>,
}

/// On-disk config: transform options plus the assumption registry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LoweringConfig {
    #[serde(default)]
    pub options: DestructuringOptions,
    #[serde(default)]
    pub assumptions: Assumptions,
}

impl LoweringConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|err| LoweringError::InvalidConfig(err.to_string()))
    }

    pub fn resolve(&self) -> ResolvedConfig {
        ResolvedConfig::resolve(&self.options, &self.assumptions)
    }
}

/// Flags read by the lowering, computed once per compilation unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfig {
    /// Every iterable is a plain array: use indexed reads and `slice`.
    pub iterable_is_array: bool,
    /// Array-like values without `Symbol.iterator` may be walked by index.
    pub array_like_is_iterable: bool,
    /// Object rest copies skip symbol-keyed properties.
    pub object_rest_no_symbols: bool,
    /// Prefer `Object.assign` / `Symbol.iterator` over helpers.
    pub use_built_ins: bool,
}

impl ResolvedConfig {
    /// Resolve the flags.
    ///
    /// `iterableIsArray` and `objectRestNoSymbols` prefer the assumption and
    /// fall back to `loose`; `arrayLikeIsIterable` prefers `allowArrayLike`
    /// and falls back to the assumption.
    pub fn resolve(options: &DestructuringOptions, assumptions: &Assumptions) -> Self {
        Self {
            iterable_is_array: assumptions
                .iterable_is_array
                .or(options.loose)
                .unwrap_or(false),
            array_like_is_iterable: options
                .allow_array_like
                .or(assumptions.array_like_is_iterable)
                .unwrap_or(false),
            object_rest_no_symbols: assumptions
                .object_rest_no_symbols
                .or(options.loose)
                .unwrap_or(false),
            use_built_ins: options.use_built_ins.unwrap_or(false),
        }
    }

    /// Everything relaxed (`loose` with built-ins).
    pub const fn loose() -> Self {
        Self {
            iterable_is_array: true,
            array_like_is_iterable: false,
            object_rest_no_symbols: true,
            use_built_ins: true,
        }
    }
}

#[cfg(test)]
#[path = "../tests/options.rs"]
mod tests;
