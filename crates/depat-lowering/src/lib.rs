//! Destructuring lowering.
//!
//! Rewrites array and object patterns in declarations, assignments, loop heads
//! and catch clauses into flat sequences of plain declarations and assignments,
//! preserving evaluation order, default laziness, rest contents and iterator
//! protocol steps.
//!
//! # Layers
//!
//! - [`classify`]: what kind of binding target a node is
//! - [`transformer`]: the per-call-site [`LoweringContext`]; reference planning
//!   and the recursive pattern walk, with the object and array destructurers in
//!   [`object`] and [`array`]
//! - [`adapters`]: entry points for each syntactic site, splicing the lowered
//!   statements into the surrounding tree
//! - [`pass`]: whole-program traversal applying the adapters
//!
//! Name generation, helper provisioning and scope registration are injected
//! through the traits in [`capabilities`].
//!
//! ```text
//! const { a, b: [c = 1] } = f();
//! ```
//!
//! lowers to
//!
//! ```text
//! const _f = f(), a = _f.a, _f$b = _f.b, _iterator = _getIterator(_f$b),
//!     _step = _iterator.next(), _done = _step.done, _step$value = _done ? void 0 : _step.value,
//!     c = _step$value === void 0 ? 1 : _step$value;
//! _done || _iterator.return == null || _iterator.return();
//! ```

pub mod adapters;
pub mod array;
pub mod capabilities;
pub mod classify;
pub mod object;
pub mod pass;
pub mod transformer;

pub use capabilities::{
    BindingRegistry, HelperRegistry, HelperRequester, LoweringEnv, NameGenerator,
    ScopeRegistrar, UidGenerator,
};
pub use classify::{Classify, PatternKind};
pub use depat_common::{LoweringConfig, LoweringError, ResolvedConfig, Result};
pub use pass::{DestructuringPass, LoweredProgram, ProgramLowerer, lower_program};
pub use transformer::{BindingKind, LoweringContext};
