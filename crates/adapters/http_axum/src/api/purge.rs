//! JSON handler for purge submissions.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};

use purgehub_app::ports::{ConfigRepository, PurgeProvider, SessionStore, UserRepository};
use purgehub_app::services::purge_service::PurgeOutcome;
use purgehub_domain::purge::PurgeRequest;
use purgehub_domain::reply::ActionReply;

use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the purge endpoint.
pub enum SubmitResponse {
    Accepted(PurgeOutcome),
}

impl IntoResponse for SubmitResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Accepted(outcome) => Json(
                ActionReply::ok()
                    .with_message(outcome.message)
                    .with_job_id(outcome.receipt.job_id)
                    .with_failed_targets(outcome.receipt.failed_targets),
            )
            .into_response(),
        }
    }
}

/// `POST /api/purge`
pub async fn submit<C, U, P, S>(
    State(state): State<AppState<C, U, P, S>>,
    payload: Result<Json<PurgeRequest>, JsonRejection>,
) -> Result<SubmitResponse, ApiError>
where
    C: ConfigRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    P: PurgeProvider + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    let Json(request) = payload?;
    let outcome = state.purge_service.submit(request).await?;
    Ok(SubmitResponse::Accepted(outcome))
}
