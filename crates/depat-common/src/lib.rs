//! Common types shared by the depat crates.
//!
//! - Destructuring options and the assumption registry (`DestructuringOptions`,
//!   `Assumptions`), resolved once per compilation unit into `ResolvedConfig`
//! - The lowering error type (`LoweringError`)

pub mod error;
pub use error::{LoweringError, Result};

pub mod options;
pub use options::{Assumptions, DestructuringOptions, LoweringConfig, ResolvedConfig};
