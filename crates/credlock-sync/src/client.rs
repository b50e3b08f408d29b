// SPDX-FileCopyrightText: 2026 Credlock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the vault store API.
//!
//! The store is an opaque collection keyed by `(vault_id, entry_id)`; it
//! only ever sees plaintext URLs and encrypted fields. Non-2xx responses
//! surface as [`CredlockError::Store`] with status and detail; there is no
//! automatic retry -- a save is user-triggered and retried only by the user
//! repeating the action.

use std::time::Duration;

use credlock_config::model::StoreConfig;
use credlock_core::{CredlockError, VaultEntry};
use serde::Deserialize;
use tracing::debug;

/// HTTP client for vault store communication.
#[derive(Debug, Clone)]
pub struct VaultStoreClient {
    client: reqwest::Client,
    base_url: String,
}

/// The list endpoint answers either a bare array or `{data: [...]}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EntriesResponse {
    Bare(Vec<VaultEntry>),
    Wrapped { data: Vec<VaultEntry> },
}

impl VaultStoreClient {
    /// Build a client from configuration.
    pub fn new(config: &StoreConfig) -> Result<Self, CredlockError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| CredlockError::Network {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Submit one encrypted entry. Returns the store's JSON response body.
    pub async fn create_entry(
        &self,
        entry: &VaultEntry,
    ) -> Result<serde_json::Value, CredlockError> {
        let url = format!("{}/vault/entries", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(entry)
            .send()
            .await
            .map_err(|e| CredlockError::Network {
                message: format!("vault store unreachable: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, entry_id = %entry.entry_id, "create entry response");

        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(CredlockError::Store {
                status: status.as_u16(),
                detail,
            });
        }

        response.json().await.map_err(|e| CredlockError::Network {
            message: format!("invalid JSON from vault store: {e}"),
            source: Some(Box::new(e)),
        })
    }

    /// Fetch every stored entry.
    pub async fn list_entries(&self) -> Result<Vec<VaultEntry>, CredlockError> {
        let url = format!("{}/vault/entries", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CredlockError::Network {
                message: format!("vault store unreachable: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(CredlockError::Store {
                status: status.as_u16(),
                detail,
            });
        }

        let entries = match response
            .json::<EntriesResponse>()
            .await
            .map_err(|e| CredlockError::Network {
                message: format!("invalid JSON from vault store: {e}"),
                source: Some(Box::new(e)),
            })? {
            EntriesResponse::Bare(entries) => entries,
            EntriesResponse::Wrapped { data } => data,
        };
        debug!(count = entries.len(), "listed vault entries");
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use credlock_core::{EncryptedField, EntryId, VaultId};
    use wiremock::matchers::{body_json_string, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> VaultStoreClient {
        VaultStoreClient::new(&StoreConfig {
            base_url: base_url.to_string(),
        })
        .unwrap()
    }

    fn test_entry() -> VaultEntry {
        VaultEntry {
            vault_id: VaultId("v-1".into()),
            entry_id: EntryId("e-1".into()),
            url: "https://example.com/login".into(),
            user: EncryptedField("dXNlcg==".into()),
            password: EncryptedField("cHdk".into()),
        }
    }

    #[tokio::test]
    async fn create_entry_posts_flat_wire_shape() {
        let server = MockServer::start().await;
        let expected = serde_json::json!({
            "vault_id": "v-1",
            "entry_id": "e-1",
            "url": "https://example.com/login",
            "user": "dXNlcg==",
            "password": "cHdk",
        });

        Mock::given(method("POST"))
            .and(path("/vault/entries"))
            .and(body_json_string(expected.to_string()))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let body = test_client(&server.uri())
            .create_entry(&test_entry())
            .await
            .unwrap();
        assert_eq!(body["ok"], true);
    }

    #[tokio::test]
    async fn create_entry_surfaces_store_error_with_status_and_detail() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/vault/entries"))
            .respond_with(ResponseTemplate::new(422).set_body_string("missing vault_id"))
            .mount(&server)
            .await;

        let result = test_client(&server.uri()).create_entry(&test_entry()).await;
        match result {
            Err(CredlockError::Store { status, detail }) => {
                assert_eq!(status, 422);
                assert_eq!(detail, "missing vault_id");
            }
            other => panic!("expected Store error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_store_is_a_network_error() {
        let client = test_client("http://127.0.0.1:1");
        let result = client.create_entry(&test_entry()).await;
        assert!(matches!(result, Err(CredlockError::Network { .. })));
    }

    #[tokio::test]
    async fn list_entries_accepts_bare_array() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/vault/entries"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([serde_json::to_value(test_entry()).unwrap()])),
            )
            .mount(&server)
            .await;

        let entries = test_client(&server.uri()).list_entries().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].entry_id.0, "e-1");
    }

    #[tokio::test]
    async fn list_entries_accepts_wrapped_data_shape() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/vault/entries"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [serde_json::to_value(test_entry()).unwrap()]
            })))
            .mount(&server)
            .await;

        let entries = test_client(&server.uri()).list_entries().await.unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn list_entries_propagates_store_errors() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/vault/entries"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let result = test_client(&server.uri()).list_entries().await;
        assert!(matches!(
            result,
            Err(CredlockError::Store { status: 500, .. })
        ));
    }
}
