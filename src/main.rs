//! webhook-notify - HTTP notification dispatcher
//!
//! A small command-line tool that reports an event to a remote endpoint
//! with a single configurable HTTP request. The exit code tells scripts
//! what happened: 0 when the endpoint accepted the notification, 1 when
//! delivery failed, 2 when the configuration is unusable.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use webhook_notify::{
    cli::Cli, config::Config, core::Properties, notifier::Notifier, transport::HttpTransport,
};

const EXIT_UNDELIVERED: i32 = 1;
const EXIT_CONFIG: i32 = 2;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration by layering sources: defaults, file, environment, and CLI args.
    let config = Config::load(&cli).unwrap_or_else(|err| {
        // The subscriber is not installed yet, so report directly.
        eprintln!("failed to load configuration: {err}");
        std::process::exit(EXIT_CONFIG);
    });

    // Initialize logging
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!(
        url = %config.notification.url,
        method = %config.notification.method,
        trigger = %cli.trigger,
        "webhook-notify starting up"
    );

    let transport = Arc::new(HttpTransport::new());
    let notifier = Notifier::new(transport);

    match notifier
        .notify(&cli.trigger, &Properties::new(), &config.notification)
        .await
    {
        Ok(true) => Ok(()),
        Ok(false) => {
            error!("notification was not delivered");
            std::process::exit(EXIT_UNDELIVERED);
        }
        Err(err) => {
            error!(error = %err, "invalid notification configuration");
            std::process::exit(EXIT_CONFIG);
        }
    }
}
