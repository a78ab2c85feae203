//! The fake event: telemetry body plus device-metadata headers

pub mod device;
pub mod reading;
pub mod telemetry;

use serde::{Deserialize, Serialize};
use ureq::http::HeaderValue;

use crate::error::{EmitError, Result};

pub use device::DeviceMetadata;
pub use reading::Reading;
pub use telemetry::Telemetry;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FakeEvent {
    pub device: DeviceMetadata,
    pub telemetry: Telemetry,
}

impl FakeEvent {
    pub fn new(device: DeviceMetadata, telemetry: Telemetry) -> Self {
        Self { device, telemetry }
    }

    /// Check everything that would make the request malformed
    pub fn validate(&self) -> Result<()> {
        let non_finite = self.telemetry.non_finite();
        if !non_finite.is_empty() {
            return Err(EmitError::config(format!(
                "non-finite telemetry readings: {}",
                non_finite.join(", ")
            )));
        }

        if !self.device.is_valid_mac() {
            return Err(EmitError::config(format!(
                "MAC address must be colon-delimited hex octets, got {:?}",
                self.device.mac_address
            )));
        }

        for (name, value) in self.device.header_record() {
            HeaderValue::from_str(&value)
                .map_err(|_| EmitError::config(format!("{} is not a valid header value: {:?}", name, value)))?;
        }

        Ok(())
    }
}
