//! algodrill-adapters — per-question generation/evaluation adapters.
//!
//! One [`adapter::ProblemFamily`] implementation per problem kind, all
//! driven by the generic [`adapter::QuestionAdapter`], which enforces the
//! reconstruction contract: answers are evaluated against the effective
//! configuration of the instance the user actually saw.

pub mod adapter;
pub mod constraint_graph;
pub mod matrix_game;
pub mod probabilistic_network;
pub mod search_strategy;
pub mod sequential_decision;
pub mod tree_search;

pub use adapter::{ProblemFamily, ProblemText, QuestionAdapter};
