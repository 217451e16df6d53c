//! `tfx` CLI — convert HCL/Terraform configuration to JSON with
//! interpolation expressions preserved as structured intrinsic trees.
//!
//! ## Usage
//!
//! ```sh
//! # Full pipeline (needs `hcl2json` on PATH)
//! tfx convert -i main.tf
//!
//! # Point at a specific converter binary
//! tfx convert -i main.tf --converter /opt/bin/hcl2json
//!
//! # Converter-free legacy path, straight from the grammar
//! tfx compile -i main.tf
//!
//! # Compile a single interpolation template
//! tfx expr '${var.region}'
//!
//! # Fail on the first unsupported construct instead of degrading it
//! tfx convert -i main.tf --strict
//! ```
//!
//! Diagnostics (unsupported-construct warnings) go to stderr; tune them with
//! `RUST_LOG`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Read};
use tfx_core::{CompileOptions, Hcl2JsonConverter, Value};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "tfx",
    version,
    about = "HCL to JSON converter preserving interpolations as intrinsic trees"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert HCL to JSON via the external document converter
    Convert {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Converter binary to execute (defaults to `hcl2json` on PATH)
        #[arg(long)]
        converter: Option<String>,
        /// Fail on the first unsupported construct instead of degrading it
        #[arg(long)]
        strict: bool,
        /// Emit compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },
    /// Compile a document straight from the grammar, without the converter
    Compile {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Fail on the first unsupported construct instead of degrading it
        #[arg(long)]
        strict: bool,
        /// Emit compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },
    /// Compile a single interpolation template like `${var.name}`
    Expr {
        /// The template (reads from stdin if omitted)
        template: Option<String>,
        /// Fail on the first unsupported construct instead of degrading it
        #[arg(long)]
        strict: bool,
        /// Emit compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output,
            converter,
            strict,
            compact,
        } => {
            let source = read_input(input.as_deref())?;
            let converter = match converter {
                Some(program) => Hcl2JsonConverter::with_program(program),
                None => Hcl2JsonConverter::new(),
            };
            let value = tfx_core::convert_with(&source, &converter, &CompileOptions { strict })
                .context("Failed to convert HCL")?;
            write_output(output.as_deref(), &render(&value, compact)?)?;
        }
        Commands::Compile {
            input,
            output,
            strict,
            compact,
        } => {
            let source = read_input(input.as_deref())?;
            let value = tfx_core::compile_document_with(&source, &CompileOptions { strict })
                .context("Failed to compile HCL document")?;
            write_output(output.as_deref(), &render(&value, compact)?)?;
        }
        Commands::Expr {
            template,
            strict,
            compact,
        } => {
            let template = match template {
                Some(t) => t,
                None => read_input(None)?,
            };
            let value =
                tfx_core::compile_interpolation_with(template.trim(), &CompileOptions { strict })
                    .context("Failed to compile interpolation template")?;
            write_output(None, &render(&value, compact)?)?;
        }
    }

    Ok(())
}

fn render(value: &Value, compact: bool) -> Result<String> {
    let rendered = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    Ok(rendered)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
