//! Device identity and health, sent as HTTP headers

use indexmap::IndexMap;
use lazy_regex::regex_is_match;
use serde::{Deserialize, Serialize};

pub const MAC_ADDRESS: &str = "MAC_ADDRESS";
pub const VERSION: &str = "VERSION";
pub const TIME_RUNNING: &str = "TIME_RUNNING";
pub const VCC: &str = "VCC";
pub const FREE_DRAM: &str = "FREE_DRAM";
pub const FREE_IRAM: &str = "FREE_IRAM";
pub const FREE_STACK: &str = "FREE_STACK";
pub const BIGGEST_BLOCK_DRAM: &str = "BIGGEST_BLOCK_DRAM";
pub const BIGGEST_BLOCK_IRAM: &str = "BIGGEST_BLOCK_IRAM";

/// Diagnostic values a device reports with every event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceMetadata {
    /// Colon-delimited hex octets
    pub mac_address: String,
    /// Firmware hash
    pub version: String,
    /// Uptime in milliseconds
    pub time_running: u64,
    pub vcc: u16,
    pub free_dram: u64,
    pub free_iram: u64,
    pub free_stack: u32,
    /// Largest contiguous free block in DRAM
    pub biggest_block_dram: u64,
    /// Largest contiguous free block in IRAM
    pub biggest_block_iram: u64,
}

impl Default for DeviceMetadata {
    fn default() -> Self {
        Self {
            mac_address: "AA:BB:CC:DD:EE".to_string(),
            version: "ABCD".to_string(),
            time_running: 0,
            vcc: 1024,
            free_dram: 1000,
            free_iram: 1000,
            free_stack: 1000,
            biggest_block_dram: 1000,
            biggest_block_iram: 1000,
        }
    }
}

impl DeviceMetadata {
    /// Header record: header name to text value, in wire order
    pub fn header_record(&self) -> IndexMap<&'static str, String> {
        IndexMap::from([
            (MAC_ADDRESS, self.mac_address.clone()),
            (VERSION, self.version.clone()),
            (TIME_RUNNING, self.time_running.to_string()),
            (VCC, self.vcc.to_string()),
            (FREE_DRAM, self.free_dram.to_string()),
            (FREE_IRAM, self.free_iram.to_string()),
            (FREE_STACK, self.free_stack.to_string()),
            (BIGGEST_BLOCK_DRAM, self.biggest_block_dram.to_string()),
            (BIGGEST_BLOCK_IRAM, self.biggest_block_iram.to_string()),
        ])
    }

    pub fn is_valid_mac(&self) -> bool {
        regex_is_match!(r"^[0-9A-Fa-f]{2}(:[0-9A-Fa-f]{2})*$", &self.mac_address)
    }
}
