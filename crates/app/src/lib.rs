//! # purgehub-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `ConfigRepository`: CRUD for purge configurations
//!   - `UserRepository`: operator accounts
//!   - `PurgeProvider`: submit purge jobs to the CDN
//!   - `SessionStore`: browser session tokens
//! - Define **driving/inbound ports** as use-case structs:
//!   - `ConfigService`: create, list (masked), get, update, delete
//!   - `PurgeService`: validate a purge request and submit it
//!   - `AuthService`: bootstrap account, login, session check, logout
//! - Provide **in-process infrastructure** (session store) that doesn't need IO
//! - Orchestrate domain objects without knowing *how* persistence or IO works
//!
//! ## Dependency rule
//! Depends on `purgehub-domain` only (plus `argon2` for password hashing).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
pub mod session_store;
