//! `quill`: run a Quill program from the command line.
//!
//! Usage: `quill [--file PATH | CODE] [ARGS...] [--seed N] [--json]
//! [--advise N] [--tokens]`

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

use quill::{advise, code_page, parse_arguments, run, tokenise, RunConfig};

#[derive(Parser, Debug)]
#[command(name = "quill")]
#[command(about = "Interpreter for the Quill golfing language")]
struct Args {
    /// Program text, followed by its arguments. With `--file` every
    /// positional value is an argument. Put programs starting with `-`
    /// after `--`.
    inputs: Vec<String>,

    /// Read the program from a file
    #[arg(long, short = 'f')]
    file: Option<PathBuf>,

    /// Seed for `?` and `X`
    #[arg(long, env = "QUILL_SEED")]
    seed: Option<u64>,

    /// Print the run outcome as JSON
    #[arg(long)]
    json: bool,

    /// Show alternative spellings of an integer literal and exit
    #[arg(long, value_name = "N")]
    advise: Option<u64>,

    /// Print the operation sequence instead of running
    #[arg(long)]
    tokens: bool,
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("QUILL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    if let Some(n) = args.advise {
        return print_advice(n, args.json);
    }

    let (code, arguments) = split_inputs(&args)?;
    debug!(chars = code.chars().count(), "program loaded");

    if args.tokens {
        let ops = tokenise(&code).context("program does not tokenise")?;
        let page = code_page();
        let rendered: Vec<String> = ops
            .iter()
            .map(|op| op.to_string().chars().map(|c| page.display_of(c)).collect())
            .collect();
        println!("{}", rendered.join(" "));
        return Ok(());
    }

    let arguments = parse_arguments(&arguments.join(" ")).context("invalid program arguments")?;
    let config = RunConfig { seed: args.seed };
    let outcome = run(&code, arguments, &config);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        for value in &outcome.results {
            println!("{value}");
        }
    }

    match outcome.error {
        Some(error) => Err(error).context("program failed"),
        None => Ok(()),
    }
}

/// Separate the program text from its argument words.
fn split_inputs(args: &Args) -> Result<(String, Vec<String>)> {
    match &args.file {
        Some(path) => {
            let code = fs::read_to_string(path)
                .with_context(|| format!("cannot read {}", path.display()))?;
            Ok((code, args.inputs.clone()))
        }
        None => {
            let Some((code, rest)) = args.inputs.split_first() else {
                bail!("no program given; pass CODE or --file PATH");
            };
            Ok((code.clone(), rest.to_vec()))
        }
    }
}

fn print_advice(n: u64, json: bool) -> Result<()> {
    let encodings = advise(n, code_page());
    if json {
        println!("{}", serde_json::to_string_pretty(&encodings)?);
        return Ok(());
    }
    for encoding in encodings {
        println!(
            "{:<16} {:>3}  {}",
            format!("{:?}", encoding.kind),
            encoding.length,
            encoding.text
        );
    }
    Ok(())
}
