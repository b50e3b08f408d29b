// SPDX-FileCopyrightText: 2026 Credlock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! k-anonymity password breach check.
//!
//! Queries the breach corpus by the first five hex characters of the
//! password's SHA-1, so the full hash is never disclosed to the service. The
//! check is strictly best-effort: any network, HTTP, or parse failure
//! degrades to "not found" and never blocks a save.

use std::time::Duration;

use credlock_config::model::BreachConfig;
use credlock_core::{CredlockError, PwnedStatus};
use sha1::{Digest, Sha1};
use tracing::{debug, warn};

/// HTTP client for the breach range endpoint.
#[derive(Debug, Clone)]
pub struct BreachClient {
    client: reqwest::Client,
    base_url: String,
    enabled: bool,
}

impl BreachClient {
    /// Build a client from configuration.
    pub fn new(config: &BreachConfig) -> Result<Self, CredlockError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| CredlockError::Network {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            enabled: config.enabled,
        })
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Check whether `password` appears in the breach corpus.
    ///
    /// Infallible: every failure mode collapses to
    /// [`PwnedStatus::NOT_FOUND`].
    pub async fn check(&self, password: &str) -> PwnedStatus {
        if !self.enabled {
            return PwnedStatus::NOT_FOUND;
        }

        let hash = hex::encode_upper(Sha1::digest(password.as_bytes()));
        let (prefix, suffix) = hash.split_at(5);
        let url = format!("{}/range/{prefix}", self.base_url);

        let response = match self
            .client
            .get(&url)
            .header("Add-Padding", "true")
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "breach check unreachable; treating as not found");
                return PwnedStatus::NOT_FOUND;
            }
        };

        if !response.status().is_success() {
            warn!(status = %response.status(), "breach check returned non-success");
            return PwnedStatus::NOT_FOUND;
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "failed to read breach check body");
                return PwnedStatus::NOT_FOUND;
            }
        };

        let status = match_suffix(&body, suffix);
        debug!(pwned = status.pwned, count = status.count, "breach check complete");
        status
    }
}

/// Scan a newline-separated `SUFFIX:COUNT` range response for our suffix.
///
/// Padded responses contain decoy suffixes with count 0; a zero-count match
/// is therefore reported as not breached.
fn match_suffix(body: &str, suffix: &str) -> PwnedStatus {
    for line in body.lines() {
        let line = line.trim_end_matches('\r');
        let Some((candidate, count)) = line.split_once(':') else {
            continue;
        };
        if candidate.eq_ignore_ascii_case(suffix) {
            let count = count.trim().parse::<u64>().unwrap_or(0);
            return PwnedStatus {
                pwned: count > 0,
                count,
            };
        }
    }
    PwnedStatus::NOT_FOUND
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    // SHA-1("password") = 5BAA61E4C9B93F3F0682250B6CF8331B7EE68FD8
    const PREFIX: &str = "5BAA6";
    const SUFFIX: &str = "1E4C9B93F3F0682250B6CF8331B7EE68FD8";

    fn test_client(base_url: &str) -> BreachClient {
        BreachClient::new(&BreachConfig::default())
            .unwrap()
            .with_base_url(base_url.to_string())
    }

    #[tokio::test]
    async fn known_breached_password_is_found_with_count() {
        let server = MockServer::start().await;
        let body = format!(
            "00D4F6E8FA6EECAD2A3AA415EEC418D38EC:2\r\n{SUFFIX}:3730471\r\n011053FD0102E94D6AE2F8B83D76FAF94F6:1"
        );

        Mock::given(method("GET"))
            .and(path(format!("/range/{PREFIX}")))
            .and(header("Add-Padding", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;

        let status = test_client(&server.uri()).check("password").await;
        assert_eq!(
            status,
            PwnedStatus {
                pwned: true,
                count: 3_730_471
            }
        );
    }

    #[tokio::test]
    async fn unmatched_suffix_is_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("/range/{PREFIX}")))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("00D4F6E8FA6EECAD2A3AA415EEC418D38EC:2"),
            )
            .mount(&server)
            .await;

        let status = test_client(&server.uri()).check("password").await;
        assert_eq!(status, PwnedStatus::NOT_FOUND);
    }

    #[tokio::test]
    async fn padded_zero_count_match_is_not_breached() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("/range/{PREFIX}")))
            .respond_with(ResponseTemplate::new(200).set_body_string(format!("{SUFFIX}:0")))
            .mount(&server)
            .await;

        let status = test_client(&server.uri()).check("password").await;
        assert!(!status.pwned);
    }

    #[tokio::test]
    async fn server_error_degrades_to_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let status = test_client(&server.uri()).check("password").await;
        assert_eq!(status, PwnedStatus::NOT_FOUND);
    }

    #[tokio::test]
    async fn unreachable_server_degrades_to_not_found() {
        // Nothing is listening here.
        let client = test_client("http://127.0.0.1:1");
        let status = client.check("password").await;
        assert_eq!(status, PwnedStatus::NOT_FOUND);
    }

    #[tokio::test]
    async fn disabled_check_skips_the_network_entirely() {
        let config = BreachConfig {
            enabled: false,
            base_url: "http://127.0.0.1:1".to_string(),
        };
        let client = BreachClient::new(&config).unwrap();
        assert_eq!(client.check("password").await, PwnedStatus::NOT_FOUND);
    }

    #[test]
    fn match_suffix_parses_crlf_lines() {
        let body = format!("AAAA:1\r\n{SUFFIX}:42\r\n");
        let status = match_suffix(&body, SUFFIX);
        assert_eq!(
            status,
            PwnedStatus {
                pwned: true,
                count: 42
            }
        );
    }
}
