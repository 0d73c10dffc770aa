mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use caucion_core::caucion::CaucionSide;
use commands::caucion::{CaucionArgs, SideArgs};

/// BYMA caución settlement calculations
#[derive(Parser)]
#[command(
    name = "caucion",
    version,
    about = "BYMA caución (repo financing) settlement calculator",
    long_about = "Computes interest, arancel, market dues, guarantee expenses, VAT and \
                  net settlement for colocadora (lending) and tomadora (borrowing) \
                  cauciones with decimal precision. A negative --days is a colocadora."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log debug output to stderr (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Full calculation with assumptions, warnings and metadata
    Calc(CaucionArgs),
    /// Net settlement amount only
    Net(CaucionArgs),
    /// Detailed two-column report (interest, charges, VAT, net)
    Detail(CaucionArgs),
    /// Net amount received as colocadora (lender)
    Colocadora(SideArgs),
    /// Net amount owed as tomadora (borrower)
    Tomadora(SideArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_logging(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time(),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Calc(args) => commands::caucion::run_calc(args),
        Commands::Net(args) => commands::caucion::run_net(args),
        Commands::Detail(args) => commands::caucion::run_detail(args),
        Commands::Colocadora(args) => commands::caucion::run_side(CaucionSide::Colocadora, args),
        Commands::Tomadora(args) => commands::caucion::run_side(CaucionSide::Tomadora, args),
        Commands::Version => {
            println!("caucion {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
