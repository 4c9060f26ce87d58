//! HTTP API client wrapping `gloo-net` for calls to `/api/*` and `/login`.

use gloo_net::http::{Request, RequestBuilder, Response};
use purgehub_domain::config::{ConfigDraft, PurgeConfig};
use purgehub_domain::id::ConfigId;
use purgehub_domain::purge::PurgeRequest;
use purgehub_domain::reply::ActionReply;
use web_sys::UrlSearchParams;

use crate::browser;
use crate::workflow::SaveTarget;

const LOGIN_PAGE: &str = "/login";

/// Error returned by API client methods.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

impl From<wasm_bindgen::JsValue> for ApiError {
    fn from(err: wasm_bindgen::JsValue) -> Self {
        Self {
            message: err
                .as_string()
                .unwrap_or_else(|| format!("{err:?}")),
        }
    }
}

/// Check the HTTP response status and extract an error if non-2xx.
async fn check_response(resp: Response) -> Result<Response, ApiError> {
    if resp.ok() {
        return Ok(resp);
    }
    if resp.status() == 401 {
        browser::navigate(LOGIN_PAGE);
    }
    let message = match resp.json::<ActionReply>().await {
        Ok(reply) => reply.message_or("request failed").to_string(),
        Err(_) => format!("HTTP {}", resp.status()),
    };
    Err(ApiError { message })
}

/// Read an [`ActionReply`] whatever the status: failures carry one too.
async fn read_reply(resp: Response) -> Result<ActionReply, ApiError> {
    if resp.status() == 401 && resp.url().contains("/api/") {
        browser::navigate(LOGIN_PAGE);
    }
    let status = resp.status();
    resp.json::<ActionReply>().await.map_err(|_| ApiError {
        message: format!("HTTP {status}"),
    })
}

/// Fetch every configuration (secrets masked).
pub async fn fetch_configs() -> Result<Vec<PurgeConfig>, ApiError> {
    let resp = check_response(Request::get("/api/configs").send().await?).await?;
    let configs: Vec<PurgeConfig> = resp.json().await?;
    Ok(configs)
}

/// Fetch one configuration with its secrets in plaintext.
pub async fn fetch_config(id: ConfigId) -> Result<PurgeConfig, ApiError> {
    let url = format!("/api/configs/{id}");
    let resp = check_response(Request::get(&url).send().await?).await?;
    let config: PurgeConfig = resp.json().await?;
    Ok(config)
}

/// Create or update a configuration.
pub async fn save_config(target: SaveTarget, draft: &ConfigDraft) -> Result<ActionReply, ApiError> {
    let url = target.url();
    let builder: RequestBuilder = match target {
        SaveTarget::Create => Request::post(&url),
        SaveTarget::Update(_) => Request::put(&url),
    };
    let draft = draft.clone().normalized();
    read_reply(builder.json(&draft)?.send().await?).await
}

/// Delete a configuration.
pub async fn delete_config(id: ConfigId) -> Result<ActionReply, ApiError> {
    let url = format!("/api/configs/{id}");
    read_reply(Request::delete(&url).send().await?).await
}

/// Submit a purge job.
pub async fn submit_purge(request: &PurgeRequest) -> Result<ActionReply, ApiError> {
    read_reply(Request::post("/api/purge").json(request)?.send().await?).await
}

/// Post the login form url-encoded.
pub async fn login(username: &str, password: &str) -> Result<ActionReply, ApiError> {
    let params = UrlSearchParams::new()?;
    params.append("username", username);
    params.append("password", password);
    let resp = Request::post(LOGIN_PAGE).body(params)?.send().await?;
    read_reply(resp).await
}
