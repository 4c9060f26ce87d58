//! # purgehub-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **JSON API** used by the dashboard
//!   (`/api/configs`, `/api/configs/{id}`, `/api/purge`)
//! - Handle the **login flow** (`POST /login`, `GET /logout`) and guard
//!   `/api/*` behind a session cookie
//! - Serve the **compiled dashboard bundle** (`/`, `/dashboard`, `/login`
//!   and static assets)
//! - Map application results and errors into `{success, message?}` replies
//!
//! ## Dependency rule
//! Depends on `purgehub-app` (for port traits and services) and
//! `purgehub-domain` (for request/response types). Never leaks axum types
//! into the domain.

pub mod api;
pub mod auth;
pub mod dashboard;
pub mod error;
pub mod router;
pub mod session;
pub mod state;
