//! Sends one fake event to the event endpoint
//!
//! The emitter is built from a [`TargetConfig`]; building it validates the
//! URL and loads any trust override, so configuration problems show up
//! before a socket is opened. [`EventEmitter::emit`] then performs exactly
//! one blocking POST. There are no retries.

pub mod tls;

#[cfg(test)]
pub(crate) mod test_server;

use serde::Serialize;
use ureq::Agent;
use ureq::http::Uri;

use crate::config::{BodyEncoding, TargetConfig};
use crate::error::{EmitError, Result};
use crate::event::FakeEvent;

/// Response header carrying the firmware hash the server wants the device on
pub const LATEST_VERSION: &str = "latest_version";

/// What came back from the endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmitResponse {
    pub status: u16,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_version: Option<String>,
}

impl EmitResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub struct EventEmitter {
    agent: Agent,
    url: String,
    encoding: BodyEncoding,
    auth_token: Option<String>,
}

impl EventEmitter {
    /// Validate the target and build the HTTP agent
    pub fn new(target: &TargetConfig) -> Result<Self> {
        validate_url(&target.url)?;
        if target.timeout_secs == 0 {
            return Err(EmitError::config("timeout_secs must be at least 1"));
        }

        let tls_config = tls::build(target)?;
        let config = Agent::config_builder()
            .timeout_global(Some(target.timeout()))
            .http_status_as_error(false)
            .tls_config(tls_config)
            .build();

        log::debug!(
            "Emitter ready: url={}, timeout={:?}, encoding={:?}",
            target.url,
            target.timeout(),
            target.encoding
        );

        Ok(Self {
            agent: Agent::new_with_config(config),
            url: target.url.clone(),
            encoding: target.encoding,
            auth_token: target.auth_token.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// POST the event once and hand back whatever the server answered
    pub fn emit(&self, event: &FakeEvent) -> Result<EmitResponse> {
        event.validate()?;

        for warning in event.telemetry.range_warnings() {
            log::warn!("Endpoint will likely reject reading: {}", warning);
        }

        let mut request = self.agent.post(&self.url);
        for (name, value) in event.device.header_record() {
            request = request.header(name, value);
        }
        if let Some(token) = &self.auth_token {
            request = request.header("Authorization", format!("Basic {}", token));
        }

        log::info!(
            "POST {} (MAC: {}, version: {}, encoding: {:?})",
            self.url,
            event.device.mac_address,
            event.device.version,
            self.encoding
        );

        let result = match self.encoding {
            BodyEncoding::Form => request.send_form(event.telemetry.body_record()),
            BodyEncoding::Json => {
                let body = serde_json::to_string(&event.telemetry.readings())
                    .map_err(|e| EmitError::config(format!("failed to encode body: {}", e)))?;
                request
                    .header("Content-Type", "application/json")
                    .send(body.as_bytes())
            }
        };

        let mut response = result.map_err(|e| {
            log::error!("Request to {} failed: {}", self.url, e);
            EmitError::from(e)
        })?;

        let status = response.status().as_u16();
        let latest_version = response
            .headers()
            .get(LATEST_VERSION)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        // A response arrived; an unreadable body does not undo that
        let body = match response.body_mut().read_to_vec() {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                log::warn!("Failed to read response body from {}: {}", self.url, e);
                String::new()
            }
        };

        let response = EmitResponse {
            status,
            body,
            latest_version,
        };

        if response.is_success() {
            log::info!("Endpoint answered {}", status);
        } else {
            log::warn!("Endpoint answered {}: {}", status, response.body);
        }
        if let Some(version) = &response.latest_version {
            log::info!("Endpoint advertises firmware {}", version);
        }

        Ok(response)
    }
}

fn validate_url(url: &str) -> Result<()> {
    let uri: Uri = url
        .parse()
        .map_err(|e| EmitError::config(format!("invalid URL {:?}: {}", url, e)))?;

    match uri.scheme_str() {
        Some("http") | Some("https") => {}
        Some(other) => return Err(EmitError::config(format!("unsupported scheme {:?} in {}", other, url))),
        None => return Err(EmitError::config(format!("URL has no scheme: {}", url))),
    }

    if uri.host().is_none_or(|h| h.is_empty()) {
        return Err(EmitError::config(format!("URL has no host: {}", url)));
    }

    Ok(())
}
