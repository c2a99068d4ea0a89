#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;

use depat_cli::args::CliArgs;
use depat_cli::{driver, tracing_config};

fn main() -> Result<()> {
    // DEPAT_LOG / RUST_LOG enable tracing; DEPAT_LOG_FORMAT=tree|json|text
    tracing_config::init_tracing();

    let args = CliArgs::parse();
    let output = driver::run(&args)?;

    match &args.output {
        Some(path) => std::fs::write(path, &output.text)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(output.text.as_bytes())
                .context("failed to write to stdout")?;
            stdout.flush().context("failed to write to stdout")?;
        }
    }

    if args.report {
        eprintln!("helpers: {}", list_or_none(&output.helpers));
        eprintln!("bindings: {}", list_or_none(&output.bindings));
    }
    Ok(())
}

fn list_or_none(names: &[String]) -> String {
    if names.is_empty() {
        "(none)".to_string()
    } else {
        names.join(", ")
    }
}
