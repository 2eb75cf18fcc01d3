mod commands;
mod input;
mod output;
mod session;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::analysis::{AnalyzeArgs, WhatIfArgs};
use commands::interactive::InteractiveArgs;

/// Personal finance health checks
#[derive(Parser)]
#[command(
    name = "finhealth",
    version,
    about = "Personal finance health checks",
    long_about = "Scores monthly income, expenses and savings against fixed rules \
                  (savings rate, expense ratio, emergency-fund coverage) and \
                  suggests concrete changes. Run without a subcommand for the \
                  interactive menu."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Output format
    #[arg(long, default_value = "text", global = true)]
    output: OutputFormat,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse one set of monthly figures
    Analyze(AnalyzeArgs),
    /// Compare current figures against a what-if scenario on the same income
    WhatIf(WhatIfArgs),
    /// Menu-driven session: full analysis, what-if simulation, exit
    Interactive(InteractiveArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_logging(verbose: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    // stderr keeps report output on stdout clean
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Some(Commands::Analyze(args)) => commands::analysis::run_analyze(args),
        Some(Commands::WhatIf(args)) => commands::analysis::run_what_if(args),
        Some(Commands::Interactive(args)) => commands::interactive::run_interactive(args),
        Some(Commands::Version) => {
            println!("finhealth {}", env!("CARGO_PKG_VERSION"));
            return;
        }
        None => commands::interactive::run_interactive(InteractiveArgs::default()),
    };

    match result {
        Ok(value) => {
            // Interactive sessions print as they go and return null
            if !value.is_null() {
                output::format_output(&cli.output, &value);
            }
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
