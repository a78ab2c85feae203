//! Send the event once and report the outcome

use colored::*;
use eyre::{Context, Report, Result};

use crate::cli::OutputFormat;
use crate::config::Config;
use crate::emitter::{EmitResponse, EventEmitter};

pub fn run(format: OutputFormat, quiet: bool, config: &Config) -> Result<()> {
    let emitter = EventEmitter::new(&config.target).context("Invalid target configuration")?;
    let response = match emitter.emit(&config.event()) {
        Ok(response) => response,
        Err(e) if e.is_config() => return Err(Report::new(e).wrap_err("Event is not sendable")),
        Err(e) => {
            debug_assert!(e.is_transport());
            return Err(Report::new(e).wrap_err(format!("Failed to send event to {}", emitter.url())));
        }
    };

    if quiet {
        return Ok(());
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&response)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(&response)?),
        OutputFormat::Text => print_text(emitter.url(), &response),
    }

    Ok(())
}

fn print_text(url: &str, response: &EmitResponse) {
    let status = if response.is_success() {
        format!("{}", response.status).green()
    } else {
        format!("{}", response.status).yellow()
    };
    let mark = if response.is_success() { "✓".green() } else { "!".yellow() };

    println!("{} POST {} → {}", mark, url, status);
    if !response.body.is_empty() {
        println!("  {}", response.body.dimmed());
    }
    if let Some(version) = &response.latest_version {
        println!("  {} {}", "latest firmware:".cyan(), version);
    }
}
