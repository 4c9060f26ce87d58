//! HTTP client for the EdgeOne `CreatePurgeTask` action.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use purgehub_app::ports::PurgeProvider;
use purgehub_domain::config::PurgeConfig;
use purgehub_domain::error::PurgeHubError;
use purgehub_domain::purge::{PurgeReceipt, PurgeRequest};
use purgehub_domain::time;

use crate::error::EdgeOneError;
use crate::signer::{self, SigningInput};

const ACTION: &str = "CreatePurgeTask";
const VERSION: &str = "2022-09-01";

/// Request body of `CreatePurgeTask`.
#[derive(Serialize)]
struct CreatePurgeTask<'a> {
    #[serde(rename = "ZoneId")]
    zone_id: &'a str,
    #[serde(rename = "Type")]
    purge_type: &'a str,
    #[serde(rename = "Method")]
    method: &'a str,
    #[serde(rename = "Targets", skip_serializing_if = "<[String]>::is_empty")]
    targets: &'a [String],
}

// Replies are decoded leniently: every field is optional.

#[derive(Debug, Default, Deserialize)]
struct Envelope {
    #[serde(rename = "Response", default)]
    response: ReplyBody,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ReplyBody {
    #[serde(default)]
    job_id: Option<String>,
    #[serde(default)]
    failed_list: Vec<FailReason>,
    #[serde(default)]
    error: Option<ReplyError>,
    #[serde(default)]
    request_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct FailReason {
    #[serde(default)]
    targets: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ReplyError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

/// EdgeOne API client implementing [`PurgeProvider`].
///
/// Both regions are served by the same endpoint; the credentials on each
/// [`PurgeConfig`] decide which account the job runs under.
pub struct EdgeOneClient {
    http: Client,
    endpoint: Url,
    host: String,
}

impl EdgeOneClient {
    /// Public EdgeOne API endpoint.
    pub const DEFAULT_ENDPOINT: &'static str = "https://teo.tencentcloudapi.com";

    /// Create a client for the public endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`EdgeOneError::Http`] if the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, EdgeOneError> {
        Self::with_endpoint(Self::DEFAULT_ENDPOINT, timeout)
    }

    /// Create a client for a custom endpoint (a proxy or a test server).
    ///
    /// # Errors
    ///
    /// Returns [`EdgeOneError::Endpoint`] if `endpoint` is not an absolute
    /// URL with a host, or [`EdgeOneError::Http`] if the HTTP client cannot
    /// be built.
    pub fn with_endpoint(endpoint: &str, timeout: Duration) -> Result<Self, EdgeOneError> {
        let endpoint =
            Url::parse(endpoint).map_err(|_| EdgeOneError::Endpoint(endpoint.to_string()))?;
        let Some(host) = endpoint.host_str() else {
            return Err(EdgeOneError::Endpoint(endpoint.to_string()));
        };
        let host = match endpoint.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint,
            host,
        })
    }

    async fn send(
        &self,
        config: &PurgeConfig,
        request: &PurgeRequest,
    ) -> Result<PurgeReceipt, EdgeOneError> {
        let payload = serde_json::to_vec(&CreatePurgeTask {
            zone_id: &config.zone_id,
            purge_type: request.purge_type.as_str(),
            method: request.method.as_str(),
            targets: &request.targets,
        })?;

        let at = time::now();
        let authorization = signer::authorization(&SigningInput {
            secret_id: &config.secret_id,
            secret_key: &config.secret_key,
            host: &self.host,
            action: ACTION,
            payload: &payload,
            at,
        })?;

        tracing::debug!(host = %self.host, zone_id = %config.zone_id, "sending {ACTION}");

        let envelope: Envelope = self
            .http
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, signer::CONTENT_TYPE)
            .header(AUTHORIZATION, authorization)
            .header("X-TC-Action", ACTION)
            .header("X-TC-Version", VERSION)
            .header("X-TC-Timestamp", at.timestamp().to_string())
            .body(payload)
            .send()
            .await?
            .json()
            .await?;

        let reply = envelope.response;
        if let Some(error) = reply.error {
            tracing::warn!(
                code = %error.code,
                request_id = reply.request_id.as_deref().unwrap_or("-"),
                "{ACTION} rejected"
            );
            return Err(EdgeOneError::Api {
                code: error.code,
                message: error.message,
            });
        }

        Ok(PurgeReceipt {
            job_id: reply.job_id,
            failed_targets: reply
                .failed_list
                .into_iter()
                .flat_map(|reason| reason.targets)
                .collect(),
        })
    }
}

impl PurgeProvider for EdgeOneClient {
    async fn create_purge_task(
        &self,
        config: &PurgeConfig,
        request: &PurgeRequest,
    ) -> Result<PurgeReceipt, PurgeHubError> {
        Ok(self.send(config, request).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::http::HeaderMap;
    use axum::routing::post;
    use purgehub_domain::config::Region;
    use purgehub_domain::id::ConfigId;
    use purgehub_domain::purge::{PurgeMethod, PurgeType};
    use serde_json::{Value, json};
    use std::sync::{Arc, Mutex};

    type Captured = Arc<Mutex<Vec<(HeaderMap, Value)>>>;

    async fn mock_server(reply: Value) -> (String, Captured) {
        let captured: Captured = Arc::default();
        let sink = Arc::clone(&captured);
        let app = Router::new().route(
            "/",
            post(move |headers: HeaderMap, body: String| {
                let sink = Arc::clone(&sink);
                let reply = reply.clone();
                async move {
                    let body: Value = serde_json::from_str(&body).unwrap();
                    sink.lock().unwrap().push((headers, body));
                    axum::Json(reply)
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{addr}"), captured)
    }

    fn config() -> PurgeConfig {
        let now = time::now();
        PurgeConfig {
            id: ConfigId::new(1),
            name: None,
            secret_id: "AKIDtest".to_string(),
            secret_key: "key".to_string(),
            zone_id: "zone-2o0i2f3h".to_string(),
            region: Region::International,
            created_at: now,
            updated_at: now,
        }
    }

    fn request(purge_type: PurgeType, targets: &[&str]) -> PurgeRequest {
        PurgeRequest {
            config_id: ConfigId::new(1),
            purge_type,
            method: PurgeMethod::Invalidate,
            targets: targets.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn should_reject_endpoint_without_host() {
        let result = EdgeOneClient::with_endpoint("not a url", Duration::from_secs(1));
        assert!(matches!(result, Err(EdgeOneError::Endpoint(_))));
    }

    #[tokio::test]
    async fn should_send_signed_request_and_return_job_id() {
        let (endpoint, captured) =
            mock_server(json!({"Response": {"JobId": "job-7", "FailedList": [], "RequestId": "r-1"}}))
                .await;
        let client = EdgeOneClient::with_endpoint(&endpoint, Duration::from_secs(5)).unwrap();

        let receipt = client
            .create_purge_task(&config(), &request(PurgeType::PurgeUrl, &["https://a/x"]))
            .await
            .unwrap();

        assert_eq!(receipt.job_id.as_deref(), Some("job-7"));
        assert!(receipt.failed_targets.is_empty());

        let calls = captured.lock().unwrap();
        let (headers, body) = &calls[0];
        assert_eq!(headers["x-tc-action"], "CreatePurgeTask");
        assert_eq!(headers["x-tc-version"], "2022-09-01");
        assert_eq!(headers["content-type"], "application/json; charset=utf-8");
        let auth = headers["authorization"].to_str().unwrap();
        assert!(auth.starts_with("TC3-HMAC-SHA256 Credential=AKIDtest/"));
        assert!(auth.contains("SignedHeaders=content-type;host;x-tc-action"));
        assert_eq!(
            body,
            &json!({
                "ZoneId": "zone-2o0i2f3h",
                "Type": "purge_url",
                "Method": "invalidate",
                "Targets": ["https://a/x"]
            })
        );
    }

    #[tokio::test]
    async fn should_omit_targets_when_empty() {
        let (endpoint, captured) = mock_server(json!({"Response": {"JobId": "job-8"}})).await;
        let client = EdgeOneClient::with_endpoint(&endpoint, Duration::from_secs(5)).unwrap();

        client
            .create_purge_task(&config(), &request(PurgeType::PurgeAll, &[]))
            .await
            .unwrap();

        let calls = captured.lock().unwrap();
        assert!(calls[0].1.get("Targets").is_none());
    }

    #[tokio::test]
    async fn should_collect_failed_targets() {
        let (endpoint, _) = mock_server(json!({"Response": {
            "JobId": "job-9",
            "FailedList": [{"Reason": "not in zone", "Targets": ["https://other/x"]}]
        }}))
        .await;
        let client = EdgeOneClient::with_endpoint(&endpoint, Duration::from_secs(5)).unwrap();

        let receipt = client
            .create_purge_task(&config(), &request(PurgeType::PurgeUrl, &["https://other/x"]))
            .await
            .unwrap();

        assert_eq!(receipt.failed_targets, vec!["https://other/x"]);
    }

    #[tokio::test]
    async fn should_surface_provider_error_message() {
        let (endpoint, _) = mock_server(json!({"Response": {
            "Error": {"Code": "AuthFailure.SecretIdNotFound", "Message": "The SecretId is not found"},
            "RequestId": "r-2"
        }}))
        .await;
        let client = EdgeOneClient::with_endpoint(&endpoint, Duration::from_secs(5)).unwrap();

        let err = client
            .create_purge_task(&config(), &request(PurgeType::PurgeAll, &[]))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "provider error: The SecretId is not found");
    }

    #[tokio::test]
    async fn should_report_unreachable_endpoint_as_transport_failure() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client =
            EdgeOneClient::with_endpoint(&format!("http://{addr}"), Duration::from_secs(2)).unwrap();

        let err = client
            .create_purge_task(&config(), &request(PurgeType::PurgeAll, &[]))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PurgeHubError::Provider(purgehub_domain::error::ProviderError::Transport(_))
        ));
    }
}
