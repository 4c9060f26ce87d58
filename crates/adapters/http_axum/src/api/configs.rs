//! JSON handlers for purge configurations.

use std::str::FromStr;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use purgehub_app::ports::{ConfigRepository, PurgeProvider, SessionStore, UserRepository};
use purgehub_domain::config::{ConfigDraft, PurgeConfig};
use purgehub_domain::error::{PurgeHubError, ValidationError};
use purgehub_domain::id::ConfigId;
use purgehub_domain::reply::ActionReply;

use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<PurgeConfig>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<PurgeConfig>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(ConfigId),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(id) => (
                StatusCode::CREATED,
                Json(ActionReply::ok().with_message("Configuration saved").with_id(id)),
            )
                .into_response(),
        }
    }
}

/// Possible responses from the update and delete endpoints.
pub enum ActionResponse {
    Updated,
    Deleted,
}

impl IntoResponse for ActionResponse {
    fn into_response(self) -> Response {
        let message = match self {
            Self::Updated => "Configuration updated",
            Self::Deleted => "Configuration deleted",
        };
        Json(ActionReply::ok().with_message(message)).into_response()
    }
}

fn parse_id(raw: &str) -> Result<ConfigId, ApiError> {
    ConfigId::from_str(raw)
        .map_err(|_| ApiError::from(PurgeHubError::from(ValidationError::InvalidId(raw.to_string()))))
}

/// `GET /api/configs`
pub async fn list<C, U, P, S>(
    State(state): State<AppState<C, U, P, S>>,
) -> Result<ListResponse, ApiError>
where
    C: ConfigRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    P: PurgeProvider + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    let configs = state.config_service.list_configs().await?;
    Ok(ListResponse::Ok(Json(configs)))
}

/// `GET /api/configs/{id}`
pub async fn get<C, U, P, S>(
    State(state): State<AppState<C, U, P, S>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    C: ConfigRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    P: PurgeProvider + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    let config = state.config_service.get_config(parse_id(&id)?).await?;
    Ok(GetResponse::Ok(Json(config)))
}

/// `POST /api/configs`
pub async fn create<C, U, P, S>(
    State(state): State<AppState<C, U, P, S>>,
    payload: Result<Json<ConfigDraft>, JsonRejection>,
) -> Result<CreateResponse, ApiError>
where
    C: ConfigRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    P: PurgeProvider + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    let Json(draft) = payload?;
    let created = state.config_service.create_config(draft).await?;
    Ok(CreateResponse::Created(created.id))
}

/// `PUT /api/configs/{id}`
pub async fn update<C, U, P, S>(
    State(state): State<AppState<C, U, P, S>>,
    Path(id): Path<String>,
    payload: Result<Json<ConfigDraft>, JsonRejection>,
) -> Result<ActionResponse, ApiError>
where
    C: ConfigRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    P: PurgeProvider + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    let id = parse_id(&id)?;
    let Json(draft) = payload?;
    state.config_service.update_config(id, draft).await?;
    Ok(ActionResponse::Updated)
}

/// `DELETE /api/configs/{id}`
pub async fn delete<C, U, P, S>(
    State(state): State<AppState<C, U, P, S>>,
    Path(id): Path<String>,
) -> Result<ActionResponse, ApiError>
where
    C: ConfigRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    P: PurgeProvider + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    state.config_service.delete_config(parse_id(&id)?).await?;
    Ok(ActionResponse::Deleted)
}
