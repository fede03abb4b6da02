use anyhow::Result;
use clap::Parser;
use coursescout_browser::DEFAULT_DEBUGGING_PORT;
use coursescout_cli::commands::scrape::{self, ScrapeOptions, DEFAULT_QUERY};
use coursescout_cli::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "coursescout")]
#[command(author, version)]
#[command(
    about = "Scrape one course from the Alura catalog into an in-memory store",
    long_about = "Coursescout searches the Alura course catalog in Chrome, scrapes the first \
                  result's instructor, workload and description, stores the course in an \
                  in-memory store and prints it back."
)]
struct Cli {
    /// Course to search for; also used as the stored title
    #[arg(short, long, default_value = DEFAULT_QUERY)]
    query: String,

    /// Path to the Chrome binary
    #[arg(long, env = "COURSESCOUT_CHROME", value_name = "PATH")]
    chrome_path: Option<PathBuf>,

    /// Named persistent Chrome profile (default: temporary profile)
    #[arg(long)]
    profile: Option<String>,

    /// Run Chrome without a window
    #[arg(long)]
    headless: bool,

    /// Chrome remote debugging port
    #[arg(long, default_value_t = DEFAULT_DEBUGGING_PORT)]
    port: u16,

    /// Replay a recorded page fixture instead of launching Chrome
    #[arg(long, value_name = "FILE")]
    fixture: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum, default_value = "pretty")]
    format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    scrape::execute(ScrapeOptions {
        query: cli.query,
        chrome_path: cli.chrome_path,
        profile: cli.profile,
        headless: cli.headless,
        port: cli.port,
        fixture: cli.fixture,
        format: cli.format,
    })
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new(
            "coursescout=debug,coursescout_cli=debug,coursescout_core=debug,coursescout_browser=debug",
        )
    } else {
        EnvFilter::new("coursescout=info,coursescout_cli=info,coursescout_browser=info")
    };

    // stdout carries only the report
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
