//! Certificate trust for the target endpoint

use std::fs;
use ureq::tls::{Certificate, PemItem, RootCerts, TlsConfig};

use crate::config::{Config, TargetConfig};
use crate::error::{EmitError, Result};

/// Build the TLS config: bundled web roots unless a CA bundle or `insecure` says otherwise
pub fn build(target: &TargetConfig) -> Result<TlsConfig> {
    let mut builder = TlsConfig::builder();

    if let Some(ca_cert) = &target.ca_cert {
        let path = Config::expand_path(ca_cert);
        let pem = fs::read(&path)
            .map_err(|e| EmitError::config(format!("failed to read CA bundle {}: {}", path.display(), e)))?;
        let certs = parse_certificates(&pem)?;
        log::debug!("Trusting {} certificate(s) from {}", certs.len(), path.display());
        builder = builder.root_certs(RootCerts::new_with_certs(&certs));
    }

    if target.insecure {
        log::warn!("Certificate verification is disabled for {}", target.url);
        builder = builder.disable_verification(true);
    }

    Ok(builder.build())
}

fn parse_certificates(pem: &[u8]) -> Result<Vec<Certificate<'static>>> {
    let mut certs = Vec::new();
    for item in ureq::tls::parse_pem(pem) {
        match item {
            Ok(PemItem::Certificate(cert)) => certs.push(cert.to_owned()),
            Ok(_) => {}
            Err(e) => return Err(EmitError::config(format!("invalid PEM: {}", e))),
        }
    }

    if certs.is_empty() {
        return Err(EmitError::config("CA bundle contains no certificates"));
    }
    Ok(certs)
}
