use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;

pub const DEFAULT_CERTIFICATE_URL: &str = "https://curl.haxx.se/ca/cacert.pem";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

pub trait CertificateSource {
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

#[derive(Debug, Clone)]
pub struct HttpCertificateSource {
    client: Client,
}

impl HttpCertificateSource {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("epconf/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build http client")?;
        Ok(Self { client })
    }
}

impl CertificateSource for HttpCertificateSource {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("certificate request failed: {url}"))?;
        let status = response.status();
        let response = response
            .error_for_status()
            .with_context(|| format!("certificate server answered {status}: {url}"))?;
        let body = response
            .bytes()
            .with_context(|| format!("failed reading certificate response body: {url}"))?;
        Ok(body.to_vec())
    }
}

pub fn install_certificate_bundle(
    source: &dyn CertificateSource,
    url: &str,
    destination: &Path,
) -> Result<u64> {
    let payload = source.fetch(url)?;

    let part_path = destination.with_file_name(format!(
        "{}.part",
        destination
            .file_name()
            .and_then(|v| v.to_str())
            .unwrap_or("cacert.pem")
    ));
    if let Err(err) = fs::write(&part_path, &payload) {
        let _ = fs::remove_file(&part_path);
        return Err(err).with_context(|| {
            format!(
                "failed to write certificate bundle: {}",
                part_path.display()
            )
        });
    }

    if destination.exists() {
        fs::remove_file(destination).with_context(|| {
            format!(
                "failed to replace certificate bundle: {}",
                destination.display()
            )
        })?;
    }
    fs::rename(&part_path, destination).with_context(|| {
        format!(
            "failed to move certificate bundle into place: {}",
            destination.display()
        )
    })?;

    Ok(payload.len() as u64)
}
