//! HTTP implementation of the compliance API

use crate::{api::ComplianceApi, config::ClientConfig, metrics, types::*, Error, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use std::time::Instant;
use tracing::{debug, error, info};

/// Compliance API client
///
/// Stateless apart from the configured base URL and the pooled HTTP client;
/// cheap to clone and safe to share across tasks.
#[derive(Debug, Clone)]
pub struct ComplianceClient {
    base_url: Url,
    client: Client,
}

impl ComplianceClient {
    /// Create new client
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Self::with_http_client(&config.base_url, client)
    }

    /// Create client on top of an existing `reqwest::Client`
    pub fn with_http_client(base_url: &str, client: Client) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::Config(format!("Invalid base URL '{}': {}", base_url, e)))?;

        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "Base URL '{}' cannot carry endpoint paths",
                base_url
            )));
        }

        info!("Compliance client targeting {}", base_url);
        Ok(Self { base_url, client })
    }

    /// Configured base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve path segments against the base URL, keeping any base path prefix
    fn endpoint_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("Base URL '{}' cannot carry endpoint paths", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send one request and decode the body; records metrics for the route
    async fn execute<T: DeserializeOwned>(
        &self,
        route: &'static str,
        request: RequestBuilder,
        endpoint: &str,
    ) -> Result<T> {
        let start = Instant::now();
        let result = Self::round_trip(request, endpoint).await;
        metrics::record_request(route, result.is_ok(), start.elapsed().as_secs_f64());
        result
    }

    async fn round_trip<T: DeserializeOwned>(request: RequestBuilder, endpoint: &str) -> Result<T> {
        let transport = |source| Error::Transport {
            endpoint: endpoint.to_string(),
            source,
        };

        let response = request.send().await.map_err(transport)?;
        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .ok()
                .filter(|body| !body.trim().is_empty());

            return Err(Error::Status {
                endpoint: endpoint.to_string(),
                status_code: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(transport)?;
        decode_body(&bytes).map_err(|source| Error::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }
}

/// A user id must stay exactly one path segment; URL normalization drops "." and ".."
fn user_segment(user_id: &str) -> Result<&str> {
    match user_id {
        "" | "." | ".." => Err(Error::InvalidInput(format!(
            "user id '{}' does not name a single path segment",
            user_id
        ))),
        _ => Ok(user_id),
    }
}

/// An empty body decodes as JSON `null`
fn decode_body<T: DeserializeOwned>(bytes: &[u8]) -> serde_json::Result<T> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        serde_json::from_slice(b"null")
    } else {
        serde_json::from_slice(bytes)
    }
}

#[async_trait]
impl ComplianceApi for ComplianceClient {
    async fn authorize_data_request(
        &self,
        partner_id: &str,
        user_id: &str,
        purpose: &str,
    ) -> Result<AuthorizationResult> {
        let url = self.endpoint_url(&["authorize"])?;
        let endpoint = url.path().to_string();
        let body = AuthorizationRequest::new(partner_id, user_id, purpose);

        debug!(
            "Requesting authorization for partner {} on user {} ({})",
            partner_id, user_id, purpose
        );

        self.execute("authorize", self.client.post(url).json(&body), &endpoint)
            .await
            .map_err(|e| {
                error!("Error authorizing data request: {}", e);
                e
            })
    }

    async fn get_audit_logs(&self) -> Result<Vec<AuditLogEntry>> {
        let url = self.endpoint_url(&["logs"])?;
        let endpoint = url.path().to_string();

        let logs: Vec<AuditLogEntry> = self
            .execute("logs", self.client.get(url), &endpoint)
            .await
            .map_err(|e| {
                error!("Error fetching audit logs: {}", e);
                e
            })?;

        debug!("Fetched {} audit log entries", logs.len());
        Ok(logs)
    }

    async fn get_user_audit_logs(&self, user_id: &str) -> Result<Vec<AuditLogEntry>> {
        let url = user_segment(user_id)
            .and_then(|segment| self.endpoint_url(&["logs", segment]))
            .map_err(|e| {
                error!("Error fetching audit logs for user {}: {}", user_id, e);
                e
            })?;
        let endpoint = url.path().to_string();

        let logs: Vec<AuditLogEntry> = self
            .execute("user_logs", self.client.get(url), &endpoint)
            .await
            .map_err(|e| {
                error!("Error fetching audit logs for user {}: {}", user_id, e);
                e
            })?;

        debug!("Fetched {} audit log entries for user {}", logs.len(), user_id);
        Ok(logs)
    }

    async fn get_policies(&self) -> Result<Vec<Policy>> {
        let url = self.endpoint_url(&["policies"])?;
        let endpoint = url.path().to_string();

        let policies: Vec<Policy> = self
            .execute("policies", self.client.get(url), &endpoint)
            .await
            .map_err(|e| {
                error!("Error fetching policies: {}", e);
                e
            })?;

        debug!("Fetched {} policies", policies.len());
        Ok(policies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client(base_url: &str) -> ComplianceClient {
        ComplianceClient::new(ClientConfig::with_base_url(base_url)).unwrap()
    }

    #[test]
    fn test_endpoint_url_from_bare_host() {
        let url = client("http://localhost:5000").endpoint_url(&["logs"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/logs");
    }

    #[test]
    fn test_endpoint_url_tolerates_trailing_slash() {
        let url = client("http://localhost:5000/").endpoint_url(&["policies"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/policies");
    }

    #[test]
    fn test_endpoint_url_keeps_base_path() {
        let c = client("https://gateway.example.com/api/");
        assert_eq!(
            c.endpoint_url(&["authorize"]).unwrap().as_str(),
            "https://gateway.example.com/api/authorize"
        );

        let c = client("https://gateway.example.com/api");
        assert_eq!(
            c.endpoint_url(&["policies"]).unwrap().as_str(),
            "https://gateway.example.com/api/policies"
        );
    }

    #[test]
    fn test_endpoint_url_encodes_user_segment() {
        let url = client("http://localhost:5000")
            .endpoint_url(&["logs", "team/a b"])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/logs/team%2Fa%20b");
    }

    #[test]
    fn test_rejects_unparseable_base_url() {
        let err = ComplianceClient::new(ClientConfig::with_base_url("not a url")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_rejects_non_hierarchical_base_url() {
        let err = ComplianceClient::new(ClientConfig::with_base_url("mailto:ops@example.com"))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_user_segment_rejects_dot_and_empty_ids() {
        for id in ["", ".", ".."] {
            assert!(
                matches!(user_segment(id), Err(Error::InvalidInput(_))),
                "accepted {:?}",
                id
            );
        }
    }

    #[test]
    fn test_user_segment_keeps_dotted_names() {
        for id in ["...", "user.123", ".hidden", "a..b", "%2e%2e"] {
            assert_eq!(user_segment(id).unwrap(), id);
        }

        let c = client("http://localhost:5000");
        let url = c.endpoint_url(&["logs", user_segment("...").unwrap()]).unwrap();
        assert_eq!(url.path(), "/logs/...");
        let url = c.endpoint_url(&["logs", user_segment("%2e%2e").unwrap()]).unwrap();
        assert_eq!(url.path(), "/logs/%252e%252e");
    }

    #[test]
    fn test_decode_body_empty_is_null() {
        let value: AuthorizationResult = decode_body(b"  \n").unwrap();
        assert_eq!(value.as_value(), &json!(null));

        assert!(decode_body::<Vec<Policy>>(b"").is_err());
    }
}
