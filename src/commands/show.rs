//! Preview the request without sending it

use colored::*;
use eyre::{Context, Result};
use indexmap::IndexMap;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::config::{BodyEncoding, Config};

#[derive(Serialize)]
struct RequestPreview {
    method: &'static str,
    url: String,
    encoding: BodyEncoding,
    timeout_secs: u64,
    headers: IndexMap<&'static str, String>,
    body: IndexMap<&'static str, String>,
    warnings: Vec<String>,
}

impl RequestPreview {
    fn from_config(config: &Config) -> Self {
        let event = config.event();
        let mut headers = event.device.header_record();
        if config.target.auth_token.is_some() {
            headers.insert("Authorization", "Basic ********".to_string());
        }

        Self {
            method: "POST",
            url: config.target.url.clone(),
            encoding: config.target.encoding,
            timeout_secs: config.target.timeout_secs,
            headers,
            body: event.telemetry.body_record(),
            warnings: event.telemetry.range_warnings(),
        }
    }
}

pub fn run(format: OutputFormat, quiet: bool, config: &Config) -> Result<()> {
    config.event().validate().context("Event is not sendable")?;
    if quiet {
        return Ok(());
    }
    let preview = RequestPreview::from_config(config);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&preview)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(&preview)?),
        OutputFormat::Text => print_text(&preview),
    }

    Ok(())
}

fn print_text(preview: &RequestPreview) {
    println!("{} {}", preview.method.bold(), preview.url);
    println!(
        "  {}",
        format!("encoding: {:?}, timeout: {}s", preview.encoding, preview.timeout_secs).dimmed()
    );
    println!();

    println!("{}:", "Headers".cyan());
    for (name, value) in &preview.headers {
        println!("  {:20} {}", format!("{}:", name).dimmed(), value);
    }
    println!();

    println!("{}:", "Body".cyan());
    for (name, value) in &preview.body {
        println!("  {:26} {}", format!("{}:", name).dimmed(), value);
    }

    if !preview.warnings.is_empty() {
        println!();
        for warning in &preview.warnings {
            println!("{} {}", "⚠".yellow(), warning);
        }
    }
}
