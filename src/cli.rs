//! Command-Line Interface (CLI) argument parsing.
//!
//! This module defines the command-line arguments for the application using the
//! `clap` crate. These arguments are parsed at startup and then merged with
//! the configuration from the `webhook-notify.toml` file and environment
//! variables.

use clap::Parser;
use figment::{
    value::{Dict, Map},
    Error, Metadata, Profile, Provider,
};
use std::path::PathBuf;

/// Sends a single configurable HTTP request to report an event to a
/// remote endpoint.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// URL of the endpoint to notify.
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// HTTP method to use (GET, POST, PUT or DELETE).
    #[arg(long, value_name = "METHOD")]
    pub method: Option<String>,

    /// Content type announced for the request body.
    #[arg(long, value_name = "MIME")]
    pub content_type: Option<String>,

    /// Request body to deliver with POST or PUT.
    #[arg(long, value_name = "TEXT")]
    pub body: Option<String>,

    /// Log level filter (e.g. "info" or "webhook_notify=debug").
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,

    /// Name of the trigger being reported.
    #[arg(long, value_name = "NAME", default_value = "manual")]
    pub trigger: String,
}

impl Provider for Cli {
    fn metadata(&self) -> Metadata {
        Metadata::named("Command-Line Arguments")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let mut dict = Dict::new();

        if let Some(log_level) = &self.log_level {
            dict.insert("log_level".into(), log_level.clone().into());
        }

        let mut notification = Dict::new();
        if let Some(url) = &self.url {
            notification.insert("url".into(), url.clone().into());
        }
        if let Some(method) = &self.method {
            notification.insert("method".into(), method.clone().into());
        }
        if let Some(content_type) = &self.content_type {
            notification.insert("content_type".into(), content_type.clone().into());
        }
        if let Some(body) = &self.body {
            notification.insert("body".into(), body.clone().into());
        }
        if !notification.is_empty() {
            dict.insert("notification".into(), notification.into());
        }

        let mut map = Map::new();
        map.insert(Profile::Default, dict);
        Ok(map)
    }
}
