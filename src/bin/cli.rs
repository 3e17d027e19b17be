//! Member viewer CLI
//!
//! Renders the member directory page from a CSV export.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use member_viewer::{
    error::{AppError, Result},
    models::{Config, OrderingPolicy, RenderMode},
    pipeline,
    render::PageSink,
    services::AnySource,
    storage::{LocalStorage, PageStorage},
};

/// member-viewer - Organization member directory renderer
#[derive(Parser, Debug)]
#[command(
    name = "member-viewer",
    version,
    about = "Renders an organization member directory from a CSV export"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "member-viewer.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch members and write the rendered page
    Render {
        /// CSV file path or URL (default: source.location)
        #[arg(long)]
        source: Option<String>,

        /// Output page path (default: render.output)
        #[arg(short, long)]
        output: Option<String>,

        /// Page template with {{target}} placeholders
        #[arg(long)]
        template: Option<String>,

        /// Global avatar flag; only "1" enables gravatars
        #[arg(long)]
        allow_avatars: Option<String>,

        /// Ordering policy: active_first or non_inactive_first
        #[arg(long)]
        policy: Option<OrderingPolicy>,

        /// Append cards one by one instead of a single replace
        #[arg(long)]
        append: bool,
    },

    /// Fetch members and print them as JSON in display order
    Parse {
        /// CSV file path or URL (default: source.location)
        #[arg(long)]
        source: Option<String>,
    },

    /// Validate the configuration file
    Validate,

    /// Show the effective configuration
    Info,
}

/// Initialize logging from the verbosity flag or the configured level.
fn init_logging(verbose: bool, level: &str) {
    let level = if verbose { "debug" } else { level };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Peek at the level so logging is up before the real load reports on it.
    let level = Config::load(&cli.config)
        .ok()
        .map(|c| c.logging.level)
        .unwrap_or_else(|| "info".to_string());
    init_logging(cli.verbose, &level);

    let config = Config::load_or_default(&cli.config);
    log::info!("Loaded configuration from {}", cli.config.display());

    match run(cli.command, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, mut config: Config) -> Result<()> {
    match command {
        Command::Render {
            source,
            output,
            template,
            allow_avatars,
            policy,
            append,
        } => {
            if let Some(location) = source {
                config.source.location = location;
            }
            if let Some(path) = output {
                config.render.output = path;
            }
            if template.is_some() {
                config.render.template = template;
            }
            if allow_avatars.is_some() {
                config.avatar.allow_global = allow_avatars;
            }
            if let Some(policy) = policy {
                config.ordering.policy = policy;
            }
            if append {
                config.render.mode = RenderMode::Append;
            }
            config.validate()?;

            let storage = LocalStorage::new(".");
            let mut sink = match &config.render.template {
                Some(key) => match storage.load_template(key).await? {
                    Some(template) => PageSink::with_template(template),
                    None => {
                        return Err(AppError::config(format!(
                            "Template not found: {key}"
                        )));
                    }
                },
                None => PageSink::new(),
            };

            let source = AnySource::from_config(&config.source)?;
            let summary = pipeline::run_viewer(&config, &source, &mut sink).await?;

            storage
                .write_page(&config.render.output, &sink.document())
                .await?;

            log::info!(
                "Rendered {} members from {} in {} ms",
                summary.member_count,
                summary.location,
                (summary.end_time - summary.start_time).num_milliseconds()
            );
        }

        Command::Parse { source } => {
            if let Some(location) = source {
                config.source.location = location;
            }
            config.validate()?;

            let source = AnySource::from_config(&config.source)?;
            let members = pipeline::fetch_members(&config, &source).await?;
            println!("{}", serde_json::to_string_pretty(&members)?);
        }

        Command::Validate => pipeline::run_validate(&config)?,

        Command::Info => {
            log::info!("Effective configuration:");
            for line in toml::to_string_pretty(&config)?.lines() {
                log::info!("    {}", line);
            }
            log::info!("Column layout:");
            for (field, index) in config.columns.entries() {
                log::info!("    {:>2} {}", index, field);
            }
        }
    }

    Ok(())
}
