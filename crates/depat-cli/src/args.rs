use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use depat_common::{Assumptions, DestructuringOptions};

/// CLI arguments for the depat binary.
#[derive(Parser, Debug)]
#[command(
    name = "depat",
    version,
    about = "Lower JavaScript destructuring patterns into plain declarations and assignments"
)]
pub struct CliArgs {
    /// JSON syntax tree to lower, or `-` for stdin.
    pub input: PathBuf,

    /// Config file with `options` and `assumptions`.
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Write the result here instead of stdout.
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Js)]
    pub format: OutputFormat,

    // ==================== Transform Options ====================
    /// Treat every iterable as an array and skip symbols in object rest.
    #[arg(long)]
    pub loose: bool,

    /// Allow array-like values without `Symbol.iterator` as array sources.
    #[arg(long = "allowArrayLike", alias = "allow-array-like")]
    pub allow_array_like: bool,

    /// Use `Object.assign` and `Symbol.iterator` instead of helpers.
    #[arg(long = "useBuiltIns", alias = "use-built-ins")]
    pub use_built_ins: bool,

    /// Enable an assumption; may be repeated.
    #[arg(long = "assume", value_enum)]
    pub assume: Vec<Assumption>,

    // ==================== Diagnostics ====================
    /// Print the requested helpers and introduced bindings to stderr.
    #[arg(long)]
    pub report: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Lowered JavaScript
    Js,
    /// Lowered syntax tree
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Assumption {
    #[value(name = "iterableIsArray", alias = "iterable-is-array")]
    IterableIsArray,
    #[value(name = "arrayLikeIsIterable", alias = "array-like-is-iterable")]
    ArrayLikeIsIterable,
    #[value(name = "objectRestNoSymbols", alias = "object-rest-no-symbols")]
    ObjectRestNoSymbols,
}

impl CliArgs {
    /// Apply the flags given on the command line over config-file values.
    /// Flags can only switch a behavior on.
    pub fn apply_overrides(&self, options: &mut DestructuringOptions, assumptions: &mut Assumptions) {
        if self.loose {
            options.loose = Some(true);
        }
        if self.allow_array_like {
            options.allow_array_like = Some(true);
        }
        if self.use_built_ins {
            options.use_built_ins = Some(true);
        }
        for assumption in &self.assume {
            match assumption {
                Assumption::IterableIsArray => assumptions.iterable_is_array = Some(true),
                Assumption::ArrayLikeIsIterable => assumptions.array_like_is_iterable = Some(true),
                Assumption::ObjectRestNoSymbols => assumptions.object_rest_no_symbols = Some(true),
            }
        }
    }

    /// Whether the input is read from stdin.
    pub fn reads_stdin(&self) -> bool {
        self.input.as_os_str() == "-"
    }
}
