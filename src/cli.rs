use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::config::{BodyEncoding, Config};
use crate::event::Reading;

/// Output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

impl OutputFormat {
    /// Resolve the effective output format.
    /// If user specified a format, use it.
    /// Otherwise: TTY → Text, non-TTY (pipe) → Json
    pub fn resolve(user_choice: Option<OutputFormat>) -> OutputFormat {
        match user_choice {
            Some(fmt) => fmt,
            None => {
                if std::io::stdout().is_terminal() {
                    OutputFormat::Text
                } else {
                    OutputFormat::Json
                }
            }
        }
    }
}

#[derive(Parser)]
#[command(
    name = "fake-event",
    about = "Send a fake sensor event to a plant-monitoring event endpoint",
    version = env!("CARGO_PKG_VERSION"),
    after_help = "Logs are written to: ~/.local/share/fake-event/logs/fake-event.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to fake-event.yaml config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, help = "Suppress non-error output")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Send the event once
    Send {
        #[command(flatten)]
        overrides: EventOverrides,

        /// Output format for the response summary
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },

    /// Print the request that would be sent, without sending it
    Show {
        #[command(flatten)]
        overrides: EventOverrides,

        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

/// Per-invocation overrides on top of the loaded config
#[derive(Args, Debug, Default, Clone)]
pub struct EventOverrides {
    /// Event endpoint URL
    #[arg(long)]
    pub url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// PEM file with the certificate(s) to trust for the endpoint
    #[arg(long)]
    pub ca_cert: Option<PathBuf>,

    /// Do not verify the endpoint's certificate
    #[arg(long)]
    pub insecure: bool,

    /// Token sent as `Authorization: Basic <token>`
    #[arg(long)]
    pub auth_token: Option<String>,

    /// Body encoding
    #[arg(long, value_enum)]
    pub encoding: Option<BodyEncoding>,

    /// MAC_ADDRESS header
    #[arg(long)]
    pub mac_address: Option<String>,

    /// VERSION header (firmware hash)
    #[arg(long)]
    pub version_hash: Option<String>,

    /// TIME_RUNNING header
    #[arg(long)]
    pub time_running: Option<u64>,

    /// VCC header
    #[arg(long)]
    pub vcc: Option<u16>,

    /// FREE_DRAM header
    #[arg(long)]
    pub free_dram: Option<u64>,

    /// FREE_IRAM header
    #[arg(long)]
    pub free_iram: Option<u64>,

    /// FREE_STACK header
    #[arg(long)]
    pub free_stack: Option<u32>,

    /// BIGGEST_BLOCK_DRAM header
    #[arg(long)]
    pub biggest_block_dram: Option<u64>,

    /// BIGGEST_BLOCK_IRAM header
    #[arg(long)]
    pub biggest_block_iram: Option<u64>,

    /// air_temperature_celsius body field
    #[arg(long, allow_hyphen_values = true)]
    pub air_temperature_celsius: Option<Reading>,

    /// air_humidity_percentage body field
    #[arg(long, allow_hyphen_values = true)]
    pub air_humidity_percentage: Option<Reading>,

    /// air_heat_index_celsius body field
    #[arg(long, allow_hyphen_values = true)]
    pub air_heat_index_celsius: Option<Reading>,

    /// soil_resistivity_raw body field
    #[arg(long, allow_hyphen_values = true)]
    pub soil_resistivity_raw: Option<Reading>,

    /// soil_temperature_celsius body field
    #[arg(long, allow_hyphen_values = true)]
    pub soil_temperature_celsius: Option<Reading>,
}

impl EventOverrides {
    /// Layer the flags that were given over `config`
    pub fn apply(&self, mut config: Config) -> Config {
        let target = &mut config.target;
        if let Some(url) = &self.url {
            target.url = url.clone();
        }
        if let Some(secs) = self.timeout_secs {
            target.timeout_secs = secs;
        }
        if let Some(ca_cert) = &self.ca_cert {
            target.ca_cert = Some(ca_cert.clone());
        }
        if self.insecure {
            target.insecure = true;
        }
        if let Some(token) = &self.auth_token {
            target.auth_token = Some(token.clone());
        }
        if let Some(encoding) = self.encoding {
            target.encoding = encoding;
        }

        let device = &mut config.device;
        if let Some(mac) = &self.mac_address {
            device.mac_address = mac.clone();
        }
        if let Some(version) = &self.version_hash {
            device.version = version.clone();
        }
        if let Some(v) = self.time_running {
            device.time_running = v;
        }
        if let Some(v) = self.vcc {
            device.vcc = v;
        }
        if let Some(v) = self.free_dram {
            device.free_dram = v;
        }
        if let Some(v) = self.free_iram {
            device.free_iram = v;
        }
        if let Some(v) = self.free_stack {
            device.free_stack = v;
        }
        if let Some(v) = self.biggest_block_dram {
            device.biggest_block_dram = v;
        }
        if let Some(v) = self.biggest_block_iram {
            device.biggest_block_iram = v;
        }

        let telemetry = &mut config.telemetry;
        if let Some(v) = self.air_temperature_celsius {
            telemetry.air_temperature_celsius = v;
        }
        if let Some(v) = self.air_humidity_percentage {
            telemetry.air_humidity_percentage = v;
        }
        if let Some(v) = self.air_heat_index_celsius {
            telemetry.air_heat_index_celsius = v;
        }
        if let Some(v) = self.soil_resistivity_raw {
            telemetry.soil_resistivity_raw = v;
        }
        if let Some(v) = self.soil_temperature_celsius {
            telemetry.soil_temperature_celsius = v;
        }

        config
    }
}
