//! Read the input, resolve the config, lower, render.

use anyhow::{Context, Result, bail};
use std::io::Read;

use depat_ast::{Printer, Program};
use depat_common::LoweringConfig;
use depat_lowering::{DestructuringPass, LoweredProgram};

use crate::args::{CliArgs, OutputFormat};

/// Rendered output plus what the lowering reported.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub text: String,
    pub helpers: Vec<String>,
    pub bindings: Vec<String>,
}

pub fn run(args: &CliArgs) -> Result<RunOutput> {
    let config = load_config(args)?;
    let program = read_program(args)?;
    tracing::debug!(
        statements = program.body.len(),
        config = ?config.resolve(),
        "lowering program"
    );

    let lowered = DestructuringPass::new(config.resolve())
        .lower_program(&program)
        .with_context(|| format!("failed to lower {}", args.input.display()))?;
    let text = render(&lowered, args.format)?;
    Ok(RunOutput {
        text,
        helpers: lowered.helpers,
        bindings: lowered.bindings,
    })
}

/// Config file values with command-line overrides applied.
pub fn load_config(args: &CliArgs) -> Result<LoweringConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            LoweringConfig::from_json(&text)
                .with_context(|| format!("failed to parse config {}", path.display()))?
        }
        None => LoweringConfig::default(),
    };
    args.apply_overrides(&mut config.options, &mut config.assumptions);
    Ok(config)
}

pub fn read_program(args: &CliArgs) -> Result<Program> {
    let (text, source) = if args.reads_stdin() {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read program from stdin")?;
        (text, "<stdin>".to_string())
    } else {
        let text = std::fs::read_to_string(&args.input)
            .with_context(|| format!("failed to read {}", args.input.display()))?;
        (text, args.input.display().to_string())
    };
    parse_program(&text, &source)
}

fn parse_program(text: &str, source: &str) -> Result<Program> {
    if text.trim().is_empty() {
        bail!("{source} is empty");
    }
    Program::from_json(text).with_context(|| format!("{source} is not a valid syntax tree"))
}

pub fn render(lowered: &LoweredProgram, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Js => Ok(Printer::print_program(&lowered.program)),
        OutputFormat::Json => {
            let mut json = lowered
                .program
                .to_json_pretty()
                .context("failed to serialize lowered program")?;
            json.push('\n');
            Ok(json)
        }
    }
}
