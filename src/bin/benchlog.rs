mod cli_utils;
mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use benchlog::freshness::DEFAULT_FRESHNESS_FACTOR;
use benchlog::RecordKind;
use commands::{cmd_report, ReportOptions};

#[derive(Parser)]
#[command(name = "benchlog")]
#[command(
    about = "Aggregate prover and verifier benchmark logs into result tables",
    long_about = "benchlog - Benchmark log parser and report generator\n\n\
    Reads the plaintext logs written by the prover and verifier benchmark runs, \n\
    extracts file sizes and timings, averages them per file size and writes a \n\
    generated table (LaTeX by default) next to a console summary.\n\n\
    Prover logs carry 'File size:', 'FK20 time:' and 'Proving time:' lines.\n\
    Verifier logs are named out<KiB>-<run>.txt and carry 'Verification took: <n>ms'.\n\n\
    Examples:\n\
      benchlog prover\n\
      benchlog prover -i runs/prover -o tables/prover.tex\n\
      benchlog verifier --format csv\n\
      benchlog verifier --json --no-export"
)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate prover logs (FK20 time, mining time, freshness period)
    Prover {
        #[command(flatten)]
        report: ReportArgs,

        /// Scale from mean mining time (s) to freshness period (s)
        #[arg(long, default_value_t = DEFAULT_FRESHNESS_FACTOR)]
        freshness_factor: f64,
    },

    /// Aggregate verifier logs (verification time)
    Verifier {
        #[command(flatten)]
        report: ReportArgs,
    },
}

#[derive(Args)]
struct ReportArgs {
    /// Directory containing the benchmark logs (default: res/<mode>)
    #[arg(short, long, value_name = "DIR")]
    input: Option<PathBuf>,

    /// Report file to write (default: benchmark_results_<mode>.<format extension>)
    #[arg(short, long, value_name = "FILE", conflicts_with = "no_export")]
    output: Option<PathBuf>,

    /// Print the summary without writing a report file
    #[arg(long)]
    no_export: bool,

    /// Report format: latex (default), csv, or markdown
    #[arg(short, long, default_value = "latex")]
    format: String,

    /// Extension of benchmark log files (.gz compressed variants also match)
    #[arg(long, default_value = "txt", value_name = "EXT")]
    ext: String,

    /// Keep zero-valued measurements instead of treating them as missing
    #[arg(long)]
    allow_zero: bool,

    /// Output the aggregated table and skipped files as JSON
    #[arg(short, long)]
    json: bool,
}

impl ReportArgs {
    fn into_options(self, kind: RecordKind, freshness_factor: f64) -> ReportOptions {
        ReportOptions {
            kind,
            input: self.input,
            output: self.output,
            no_export: self.no_export,
            format: self.format,
            extension: self.ext,
            allow_zero: self.allow_zero,
            json: self.json,
            freshness_factor,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli_utils::init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Prover {
            report,
            freshness_factor,
        } => cmd_report(report.into_options(RecordKind::Prover, freshness_factor)),
        Commands::Verifier { report } => {
            cmd_report(report.into_options(RecordKind::Verifier, DEFAULT_FRESHNESS_FACTOR))
        }
    }
}
