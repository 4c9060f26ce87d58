//! Login, logout and the session guard for `/api`.

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::http::header::SET_COOKIE;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum::{Form, Json};

use purgehub_app::ports::{ConfigRepository, PurgeProvider, SessionStore, UserRepository};
use purgehub_domain::reply::ActionReply;
use purgehub_domain::user::Credentials;

use crate::error::ApiError;
use crate::session::{clear_cookie, open_cookie, session_token};
use crate::state::AppState;

/// Where the browser goes after a successful login.
pub const AFTER_LOGIN: &str = "/dashboard";

/// Possible responses from the login endpoint.
pub enum LoginResponse {
    SignedIn { token: String },
}

impl IntoResponse for LoginResponse {
    fn into_response(self) -> Response {
        match self {
            Self::SignedIn { token } => (
                [(SET_COOKIE, open_cookie(&token))],
                Json(ActionReply::ok().with_redirect(AFTER_LOGIN)),
            )
                .into_response(),
        }
    }
}

/// `POST /login`
///
/// # Errors
///
/// Rejects blank fields with 400 and bad credentials with 401, both as
/// `{success: false, message}`.
pub async fn login<C, U, P, S>(
    State(state): State<AppState<C, U, P, S>>,
    Form(credentials): Form<Credentials>,
) -> Result<LoginResponse, ApiError>
where
    C: ConfigRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    P: PurgeProvider + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    let session = state.auth_service.login(&credentials).await?;
    Ok(LoginResponse::SignedIn {
        token: session.token,
    })
}

/// `GET /logout`
pub async fn logout<C, U, P, S>(
    State(state): State<AppState<C, U, P, S>>,
    headers: HeaderMap,
) -> Response
where
    C: ConfigRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    P: PurgeProvider + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    if let Some(token) = session_token(&headers) {
        state.auth_service.logout(token);
    }
    ([(SET_COOKIE, clear_cookie())], Redirect::to("/login")).into_response()
}

/// Middleware rejecting requests without a live session.
///
/// # Errors
///
/// Responds 401 `{success: false, message: "login required"}`.
pub async fn require_session<C, U, P, S>(
    State(state): State<AppState<C, U, P, S>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError>
where
    C: ConfigRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    P: PurgeProvider + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    state
        .auth_service
        .authenticate(session_token(request.headers()))?;
    Ok(next.run(request).await)
}
