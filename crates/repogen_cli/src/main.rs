//! repogen CLI entry point.
//!
//! # Responsibility
//! - Parse generator arguments and drive one generation run.
//! - Stay silent when the named entity has nothing to generate.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

/// Generate a typed repository binding from an annotated struct
/// declaration.
#[derive(Parser, Debug)]
#[command(name = "repogen")]
struct Args {
    /// Source file containing the annotated declaration.
    #[arg(long)]
    src: PathBuf,

    /// Entity (struct) name to generate a binding for.
    #[arg(long)]
    name: String,

    /// Optional log directory; file logging is disabled when absent.
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("repogen: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    if let Some(log_dir) = &args.log_dir {
        let dir = log_dir.to_string_lossy();
        repogen_core::init_logging(repogen_core::default_log_level(), dir.as_ref())
            .map_err(|message| anyhow::anyhow!(message))?;
    }

    let written = repogen_core::generate_file(&args.src, &args.name)
        .with_context(|| format!("failed to generate binding for `{}`", args.name))?;
    if let Some(path) = written {
        println!("generated {}", path.display());
    }
    Ok(())
}
