use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use userform::error::AppError;
use userform::runtime::Runtime;
use userform::terminal::Terminal;
use userform::{FormApp, FormConfig, LogSink};

#[derive(Debug, Parser)]
#[command(name = "userform", about = "Collect a name and email in the terminal")]
struct Cli {
    /// YAML or JSON file with form settings.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    submission_delay_ms: Option<u64>,

    #[arg(long)]
    reset_delay_ms: Option<u64>,

    /// Print the final form state as JSON after the form closes.
    #[arg(long)]
    dump_json: bool,

    /// Write logs here. Without it logging is off, since the form owns the screen.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(cli: Cli) -> Result<(), AppError> {
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let mut config = match &cli.config {
        Some(path) => FormConfig::from_path(path)?,
        None => FormConfig::default(),
    };
    if let Some(ms) = cli.submission_delay_ms {
        config.submission_delay_ms = ms;
    }
    if let Some(ms) = cli.reset_delay_ms {
        config.reset_delay_ms = ms;
    }
    config.validate()?;
    tracing::info!(?config, "starting form");

    let app = FormApp::new(&config, LogSink);
    let mut runtime = Runtime::new(app, Terminal::new()?);
    runtime.run()?;

    if cli.dump_json {
        println!("{:#}", runtime.app().snapshot_json());
    }
    Ok(())
}

fn init_logging(path: &Path) -> Result<(), AppError> {
    let file = File::create(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("userform=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
