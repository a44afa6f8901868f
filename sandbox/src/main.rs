//! `envhost` — run a compiled WASM program with console I/O.
//!
//! ```text
//! envhost [OPTIONS] FILE.wasm
//! ```
//!
//! Exit status is 0 when the entry point returns and 1 for usage errors,
//! load failures, traps, and aborts.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use envhost_hostapi::RunMode;
use envhost_sandbox::config::{
    DEFAULT_ENTRY_POINT, DEFAULT_INITIAL_PAGES, DEFAULT_MAX_PAGES,
};
use envhost_sandbox::{HostIo, Sandbox, SandboxConfig, SandboxError};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "USAGE: envhost [OPTIONS] FILE.wasm";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The WASM module. This can be text or binary format
    file: PathBuf,

    /// Input behavior: `console` aborts on bad input, `interactive` asks
    /// again. Defaults to interactive when stdin is a terminal
    #[arg(long)]
    mode: Option<RunMode>,

    /// Initial size of the shared memory in 64 KiB pages
    #[arg(long, default_value_t = DEFAULT_INITIAL_PAGES)]
    initial_pages: u32,

    /// Maximum size of the shared memory in 64 KiB pages
    #[arg(long, default_value_t = DEFAULT_MAX_PAGES)]
    max_pages: u32,

    /// Longest accepted input line in bytes
    #[arg(long, default_value_t = envhost_hostapi::DEFAULT_MAX_LINE_LEN)]
    max_line_len: usize,

    /// Exported function to call
    #[arg(long, default_value = DEFAULT_ENTRY_POINT)]
    entry: String,
}

fn init_tracing() {
    // RUST_LOG=envhost_sandbox=debug
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact()
        .try_init();
}

fn run(args: Args) -> Result<()> {
    let mode = args
        .mode
        .unwrap_or_else(|| RunMode::detect(std::io::stdin().is_terminal()));
    let config = SandboxConfig {
        initial_memory_pages: args.initial_pages,
        max_memory_pages: args.max_pages,
        max_line_len: args.max_line_len,
        entry_point: args.entry,
        mode,
    };

    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;
    let sandbox = Sandbox::new(&bytes, config)
        .with_context(|| format!("loading {}", args.file.display()))?;

    let io = HostIo::stdio(sandbox.config().max_line_len);
    let outcome = sandbox.run(io)?;
    tracing::debug!(?outcome, "run finished");
    Ok(())
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("{}", USAGE);
            eprint!("{}", e.render());
            return ExitCode::from(1);
        }
    };

    init_tracing();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<SandboxError>() {
                Some(SandboxError::Aborted(host)) => eprintln!("ABORT: {}", host),
                _ => eprintln!("error: {:#}", e),
            }
            ExitCode::from(1)
        }
    }
}
