//! Host-simulation harness for the unfold engine.
//!
//! Wires the engine to a simulated viewer, a file-backed progress store,
//! and an optional filesystem workspace, then drives it with a session
//! script (file or stdin). Useful for acceptance runs and for poking at
//! engine behavior without a real viewer embedding.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use serde::Deserialize;
use unfold_core::{
    app::UnfoldApp,
    progress::PROGRESS_RETENTION_DAYS,
    watchdog::{DEFAULT_POLL_INTERVAL_MS, WatchdogConfig},
    workspace::WorkspaceLinks,
};

#[path = "main/progress_file.rs"]
mod progress_file;
#[path = "main/session_script.rs"]
mod session_script;
#[path = "main/sim_viewer.rs"]
mod sim_viewer;
#[path = "main/workspace_fs.rs"]
mod workspace_fs;

use progress_file::FileProgressStore;
use session_script::Session;
use sim_viewer::SimViewer;
use workspace_fs::FsWorkspace;

#[derive(Parser)]
#[command(name = "unfold", version, about = "Progressive unfold host simulator")]
struct Cli {
    /// Rendered article markup to preload
    #[arg(long)]
    article: Option<PathBuf>,

    /// Initial route (path with optional #anchor)
    #[arg(long, default_value = "/index")]
    route: String,

    /// Session script to execute; reads stdin when omitted
    #[arg(long)]
    script: Option<PathBuf>,

    /// TOML config overriding engine defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Progress state file
    #[arg(long, default_value = ".unfold-progress")]
    state_file: PathBuf,

    /// Workspace root for companion file links; links stay detached when
    /// omitted
    #[arg(long)]
    workspace: Option<PathBuf>,

    /// Simulate an existing pagination region in the page
    #[arg(long)]
    pagination_region: bool,

    /// Simulate an existing footer region in the page
    #[arg(long)]
    footer: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    poll_interval_ms: Option<u64>,
    retention_days: Option<u32>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("unfold: cannot load config: {err}");
            return ExitCode::FAILURE;
        }
    };

    let article = match cli.article.as_deref().map(std::fs::read_to_string) {
        None => None,
        Some(Ok(html)) => Some(html),
        Some(Err(err)) => {
            eprintln!("unfold: cannot read article: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut viewer = SimViewer::new(article);
    viewer.has_pagination = cli.pagination_region;
    viewer.has_footer = cli.footer;

    let store = FileProgressStore::with_retention_days(
        cli.state_file,
        config.retention_days.unwrap_or(PROGRESS_RETENTION_DAYS),
    );
    let watchdog = WatchdogConfig {
        poll_interval_ms: config.poll_interval_ms.unwrap_or(DEFAULT_POLL_INTERVAL_MS),
    };
    let links = WorkspaceLinks::new(cli.workspace.map(FsWorkspace::new));

    let app = UnfoldApp::new(viewer, store, watchdog);
    let mut session = Session::new(app, links, &cli.route, watchdog.poll_interval_ms);

    let outcome = match cli.script.as_deref() {
        Some(path) => match File::open(path) {
            Ok(file) => session.run(BufReader::new(file)),
            Err(err) => {
                eprintln!("unfold: cannot open script {}: {err}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => session.run(io::stdin().lock()),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("unfold: session failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<FileConfig, String> {
    let Some(path) = path else {
        return Ok(FileConfig::default());
    };
    let mut raw = String::new();
    File::open(path)
        .and_then(|mut file| file.read_to_string(&mut raw))
        .map_err(|err| format!("{}: {err}", path.display()))?;
    toml::from_str(&raw).map_err(|err| format!("{}: {err}", path.display()))
}
