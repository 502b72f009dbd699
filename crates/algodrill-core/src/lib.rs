//! algodrill-core — Session engine, data model, and durable storage.
//!
//! This crate defines the question descriptors, the durable session store,
//! the session player state machine, and the descriptor builder that the
//! rest of the algodrill system builds on.

pub mod builder;
pub mod error;
pub mod model;
pub mod player;
pub mod report;
pub mod session;
pub mod storage;
