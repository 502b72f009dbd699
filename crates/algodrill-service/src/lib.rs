//! algodrill-service — HTTP boundary to the generation/evaluation service.
//!
//! Implements the one-call-per-operation contract: `POST /test` for session
//! planning, `POST /generate/{kind}` and `POST /evaluate/{kind}` per
//! question. All calls are bounded by a request timeout and surface as
//! typed [`algodrill_core::error::ServiceError`] values.

pub mod client;
pub mod setup;

pub use client::ServiceClient;
pub use setup::SessionPlanRequest;
