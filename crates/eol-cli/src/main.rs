mod commands;

use std::ffi::OsString;
use std::path::PathBuf;
use std::process;

use clap::{error::ErrorKind, ArgAction, Parser};
use eol_table::Os;
use tracing_subscriber::EnvFilter;

use commands::Commands;

#[derive(Parser)]
#[command(
    name = "eol-matrix",
    about = "Record how git converts line endings under every attribute and config combination",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Without a subcommand, run the full probe
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory for golden repositories and probe workspaces (wiped first)
    #[arg(long, global = true, default_value = "git-workspace")]
    workspace: PathBuf,

    /// Where to write the table [default: <workspace>/data.json, or
    /// <workspace>/results.json for explore]
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// The git binary to probe
    #[arg(long, global = true, default_value = "git")]
    git: OsString,

    /// Tag every entry with the platform the table was produced on
    #[arg(long, global = true)]
    os: Option<Os>,

    /// Fail when the table breaks a cross-check
    #[arg(long, global = true)]
    strict: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

/// Log to stderr; `RUST_LOG` takes precedence over `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.into()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => process::exit(0),
                _ => process::exit(128),
            }
        }
    };

    init_tracing(cli.verbose);

    match commands::run(cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("fatal: {e:#}");
            process::exit(128);
        }
    }
}
