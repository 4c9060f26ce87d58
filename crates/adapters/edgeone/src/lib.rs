//! # purgehub-adapter-edgeone
//!
//! Purge provider backed by the Tencent Cloud EdgeOne API.
//!
//! ## Responsibilities
//! - Implement the `PurgeProvider` port from `purgehub-app`
//! - Encode `CreatePurgeTask` requests (API version `2022-09-01`)
//! - Sign them with TC3-HMAC-SHA256 using the configuration's credentials
//! - Translate provider replies into receipts or typed errors
//!
//! ## Dependency rule
//! Depends on `purgehub-app` (for the port trait) and `purgehub-domain`.
//! Nothing in the inner layers knows this adapter exists.

mod client;
mod error;
mod signer;

pub use client::EdgeOneClient;
pub use error::EdgeOneError;
