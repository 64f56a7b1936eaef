use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;

use sprint_report::report::ARTIFACT_NAME;
use sprint_report::{Error, LogoSource};

/// Render Strategic Sprint Planner answers into a PDF report.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// JSON answers file (`-` reads stdin)
    input: PathBuf,

    /// Output path
    #[arg(short, long, default_value = ARTIFACT_NAME)]
    output: PathBuf,

    /// Logo image: file path or http(s) URL
    #[arg(long, env = "SPRINT_REPORT_LOGO")]
    logo: Option<String>,

    /// Seconds to wait for a remote logo
    #[arg(long, env = "SPRINT_REPORT_LOGO_TIMEOUT", default_value_t = 10)]
    logo_timeout: u64,

    /// Log layout decisions
    #[arg(short, long)]
    verbose: bool,
}

fn run(cli: &Cli) -> Result<(), Error> {
    let logo = cli
        .logo
        .as_deref()
        .map(LogoSource::parse)
        .unwrap_or(LogoSource::None);
    sprint_report::generate_report(
        &cli.input,
        &cli.output,
        &logo,
        Duration::from_secs(cli.logo_timeout),
    )
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
