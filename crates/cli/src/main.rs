mod cli;
mod metrics;

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docpush_core::{
    load_config, validate_config, CancelFlag, HttpTarget, LogProgress, ManifestExtractor,
    SanitizedConfig, Step, TracingNotifier, Workflow,
};

use cli::{Cli, Commands, UploadArgs};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    match cli.command {
        Commands::Upload(args) => upload(args).await,
        Commands::Config { config } => {
            println!("{}", sanitized_config(&config)?);
            Ok(())
        }
    }
}

fn init_logging(cli: &Cli) {
    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(cli.log_json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!cli.log_json).then(tracing_subscriber::fmt::layer))
        .init();
}

async fn upload(args: UploadArgs) -> Result<()> {
    let selection = args.selection()?;
    let config_path = args.config_path();

    let cancel = CancelFlag::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, waiting for running uploads to finish");
            ctrl_c.cancel();
        }
    });

    let workflow = Workflow::new(
        Arc::new(ManifestExtractor::new()),
        Arc::new(HttpTarget),
        Arc::new(TracingNotifier::new()),
        Arc::new(LogProgress::with_cancel_flag(cancel)),
    )
    .with_required_config_file(args.required_config_file());

    let step = workflow
        .run(config_path.as_deref(), &selection, || {
            info!("Upload finished")
        })
        .await;

    if args.metrics {
        print!("{}", metrics::encode_metrics());
    }

    let Step::Continue(report) = step else {
        bail!("Nothing was uploaded");
    };
    if let Some(link) = report.representative_link() {
        println!("{}", link);
    }
    if report.failed > 0 {
        bail!("{} of {} upload(s) failed", report.failed, report.submitted);
    }
    if report.cancelled {
        bail!(
            "Cancelled after {} of {} endpoint(s)",
            report.submitted,
            report.total
        );
    }
    Ok(())
}

/// Loads and validates `path`, rendered as JSON without secrets.
fn sanitized_config(path: &Path) -> Result<String> {
    let config = load_config(path)
        .with_context(|| format!("Failed to load config from {:?}", path))?;
    validate_config(&config).context("Configuration validation failed")?;
    serde_json::to_string_pretty(&SanitizedConfig::from(&config))
        .context("Failed to render configuration")
}
