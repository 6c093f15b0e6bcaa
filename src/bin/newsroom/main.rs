use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use spdlog::{error, info, warn};

use newsroom::config::Config;
use newsroom::logger::configure_logger;
use newsroom::post_processor::build_site;
use newsroom::repository::FsRepository;
use newsroom::view::html_serializer::HtmlSerializer;

use crate::config::open_config;

mod config;

const CFG_FILE_NAME: &str = "newsroom.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path
    #[arg(short, long)]
    config_path: Option<String>,

    /// Site root. Relative paths in the config are resolved against it.
    /// Defaults to the current directory
    #[arg(short, long)]
    root: Option<String>,
}

fn run(config: &Config) -> Result<()> {
    let serializer = HtmlSerializer::load(config.site.clone(), config.paths.template_dir.as_deref())
        .context("Error loading templates")?;
    let mut repo = FsRepository::from_config(config);

    let report = build_site(&mut repo, config, &serializer)?;

    info!("Pages written: {}", report.pages_written.len());
    info!("Submissions retired: {}", report.retired.len());
    if !report.skipped.is_empty() {
        warn!("Submissions skipped: {}", report.skipped.len());
    }
    match report.featured {
        Some(ref slug) => info!("Featured: {}, stream: {}", slug, report.stream.join(", ")),
        None => info!("Nothing published, homepage featured region unchanged"),
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    let config_path = args.config_path.map(PathBuf::from);

    let root = match args.root.map(PathBuf::from).or_else(|| env::current_dir().ok()) {
        Some(root) => root,
        None => {
            eprintln!("Could not determine the site root");
            eprintln!("Please run newsroom --help");
            return ExitCode::FAILURE;
        }
    };

    let config = match open_config(config_path, &root) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            eprintln!("Please run newsroom --help");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    info!("Starting Newsroom build =-=-=-=-=-=-=-=-=-=-=-=-=-=-");

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("Build failed: {:#}", err);
            eprintln!("Error: {:?}", err);
            ExitCode::FAILURE
        }
    }
}
