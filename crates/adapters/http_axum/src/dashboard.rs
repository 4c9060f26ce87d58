//! Serving of the compiled dashboard bundle.
//!
//! The dashboard is a single-page app: `/dashboard` and `/login` both
//! answer with `index.html` and the client-side router picks the view.
//! `GET /login` is mounted next to `POST /login` by the top-level router.
//! Every other unmatched path is looked up in the assets directory.

use axum::Router;
use axum::extract::{Request, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use tower::ServiceExt;
use tower_http::services::{ServeDir, ServeFile};

use purgehub_app::ports::{ConfigRepository, PurgeProvider, SessionStore, UserRepository};

use crate::session::session_token;
use crate::state::AppState;

/// Build the dashboard routes. Static assets are served from
/// [`AppState::assets_dir`] as the fallback.
pub fn routes<C, U, P, S>(state: &AppState<C, U, P, S>) -> Router<AppState<C, U, P, S>>
where
    C: ConfigRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    P: PurgeProvider + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(index::<C, U, P, S>))
        .route("/dashboard", get(dashboard::<C, U, P, S>))
        .fallback_service(ServeDir::new(state.assets_dir()))
}

fn signed_in<C, U, P, S>(state: &AppState<C, U, P, S>, request: &Request) -> bool
where
    C: ConfigRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    P: PurgeProvider + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    state
        .auth_service
        .authenticate(session_token(request.headers()))
        .is_ok()
}

async fn serve_index<C, U, P, S>(state: &AppState<C, U, P, S>, request: Request) -> Response
where
    C: ConfigRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    P: PurgeProvider + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    let index = ServeFile::new(state.assets_dir().join("index.html"));
    match index.oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}

/// `GET /`
async fn index<C, U, P, S>(State(state): State<AppState<C, U, P, S>>, request: Request) -> Redirect
where
    C: ConfigRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    P: PurgeProvider + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    if signed_in(&state, &request) {
        Redirect::to("/dashboard")
    } else {
        Redirect::to("/login")
    }
}

/// `GET /dashboard`
async fn dashboard<C, U, P, S>(
    State(state): State<AppState<C, U, P, S>>,
    request: Request,
) -> Response
where
    C: ConfigRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    P: PurgeProvider + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    if !signed_in(&state, &request) {
        return Redirect::to("/login").into_response();
    }
    serve_index(&state, request).await
}

/// `GET /login`
pub async fn login_page<C, U, P, S>(
    State(state): State<AppState<C, U, P, S>>,
    request: Request,
) -> Response
where
    C: ConfigRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    P: PurgeProvider + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    serve_index(&state, request).await
}
