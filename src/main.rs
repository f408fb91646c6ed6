use anyhow::Result;
use clap::{Parser, Subcommand};
use garmentcad::jobs::{
    parse_sheet_width, read_job, run_nest_job, run_seam_job, NestJob, SeamJob,
};
use garmentcad::settings::{Config, SettingsManager};
use garmentcad::{format_length, get_unit_label, init_logging, BUILD_DATE, VERSION};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "garmentcad")]
#[command(about = "Seam checks and nesting for garment pattern files")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_DATE"), ")"))]
struct Cmd {
    /// Config file (.json or .toml); the platform default when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Check seam lengths; exits with status 2 when a seam fails
    Seams { job: PathBuf },
    /// Lay out pieces on a sheet and print the layout
    Nest {
        job: PathBuf,
        /// Sheet width, e.g. `1500`, `150cm` or `59 1/16in`; bare numbers
        /// use the configured measurement system
        #[arg(long)]
        width: Option<String>,
    },
}

fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let manager = match path {
        Some(path) => SettingsManager::load_or_default(path)?,
        None => match SettingsManager::from_default_location() {
            Ok(manager) => manager,
            Err(e) => {
                warn!(error = %e, "no usable config location; using defaults");
                return Ok(Config::default());
            }
        },
    };
    Ok(manager.config().clone())
}

fn run(cmd: Cmd) -> Result<ExitCode> {
    let config = load_config(cmd.config)?;
    match cmd.action {
        Action::Seams { job } => {
            let job: SeamJob = read_job(&job)?;
            let report = run_seam_job(&job, &config)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(if report.gate.is_pass() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2)
            })
        }
        Action::Nest { job, width } => {
            let width = width
                .map(|w| parse_sheet_width(&w, &config))
                .transpose()?;
            let job: NestJob = read_job(&job)?;
            let layout = run_nest_job(&job, width, &config)?;
            info!(
                length = %format_length(layout.length, config.measurement_system),
                units = get_unit_label(config.measurement_system),
                utilization = layout.utilization,
                "layout ready"
            );
            println!("{}", serde_json::to_string_pretty(&layout)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn main() -> Result<ExitCode> {
    init_logging()?;
    tracing::debug!(version = VERSION, build = BUILD_DATE, "garmentcad starting");
    let cmd = Cmd::parse();
    run(cmd).inspect_err(|e| error!(error = %e, "job failed"))
}
