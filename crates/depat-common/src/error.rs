//! Lowering errors

use thiserror::Error;

/// Errors that abort lowering of a compilation unit.
///
/// Malformed patterns are not represented here: the syntax tree cannot express
/// a rest element outside its trailing slot, so there is nothing to reject at
/// lowering time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoweringError {
    /// The lowering needs a runtime helper the target does not provide
    #[error("runtime helper `{name}` is not available for this compilation unit")]
    MissingHelper {
        /// Helper name as requested (without the `_` prefix)
        name: String,
    },

    /// Options or assumptions could not be read
    #[error("invalid destructuring config: {0}")]
    InvalidConfig(String),
}

impl LoweringError {
    pub fn missing_helper(name: impl Into<String>) -> Self {
        Self::MissingHelper { name: name.into() }
    }
}

pub type Result<T> = std::result::Result<T, LoweringError>;
