//! The session player state machine.
//!
//! The player turns the stored session into a walk over its questions:
//! `NoSession` when the store is empty, `InProgress(i)` while a question is
//! active, `Completed` once the cursor has passed the last index. On
//! `next()` the durable cursor is advanced *before* the in-memory state, so
//! progress survives a crash between rendering and the user's click.

use crate::error::EngineError;
use crate::model::QuestionDescriptor;
use crate::session::{Session, SessionStore};
use crate::storage::KeyValueStorage;

/// Where the player currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    NoSession,
    InProgress(usize),
    Completed,
}

/// The question the player wants rendered right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveQuestion {
    /// Zero-based position in the session.
    pub index: usize,
    /// Total number of questions.
    pub total: usize,
    pub descriptor: QuestionDescriptor,
    /// Whether the adapter should generate immediately with its default
    /// configuration (`mode == Random`) or wait for explicit user action.
    pub auto_generate: bool,
}

/// Read/advance view over the stored session.
pub struct SessionPlayer<S: KeyValueStorage> {
    store: SessionStore<S>,
    session: Option<Session>,
}

impl<S: KeyValueStorage> SessionPlayer<S> {
    /// Initialize from durable storage.
    pub fn load(store: SessionStore<S>) -> Self {
        let session = store.load();
        Self { store, session }
    }

    pub fn state(&self) -> PlayerState {
        match &self.session {
            None => PlayerState::NoSession,
            Some(s) if s.is_empty() || s.is_finished() => PlayerState::Completed,
            Some(s) => PlayerState::InProgress(s.cursor),
        }
    }

    /// The active question, if one is in progress. Pure read: calling this
    /// repeatedly (a benign re-render) has no side effects.
    pub fn current(&self) -> Option<ActiveQuestion> {
        let session = self.session.as_ref()?;
        let descriptor = *session.current()?;
        Some(ActiveQuestion {
            index: session.cursor,
            total: session.len(),
            descriptor,
            auto_generate: descriptor.mode == crate::model::GenerationMode::Random,
        })
    }

    /// Move to the next question. Durable first, then in-memory. A no-op in
    /// `NoSession` and `Completed`.
    pub fn next(&mut self) -> Result<PlayerState, EngineError> {
        if let PlayerState::InProgress(_) = self.state() {
            self.store.advance()?;
            if let Some(session) = self.session.as_mut() {
                session.cursor += 1;
            }
        }
        Ok(self.state())
    }

    /// Leave the finished (or abandoned) session and clear the store.
    pub fn reset_to_setup(&mut self) -> Result<(), EngineError> {
        self.store.clear()?;
        self.session = None;
        Ok(())
    }
}
