//! # purgehub-domain
//!
//! Pure domain model for the purgehub CDN cache-purge dashboard.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **purge configurations** (provider credentials bound to a zone and region)
//! - Define **purge requests** (type, method, target list) and target parsing
//! - Define the **action reply** envelope shared by the server and the dashboard
//! - Define **users** and login credentials
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod config;
pub mod purge;
pub mod reply;
pub mod user;
