//! The practice session and its durable store.
//!
//! A session is the ordered list of question descriptors plus a zero-based
//! cursor. It is owned exclusively by the [`SessionStore`]; the player only
//! holds a read/advance capability over it.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::model::{GenerationMode, QuestionDescriptor};
use crate::storage::KeyValueStorage;

/// Storage key holding the serialized descriptor sequence.
pub const SESSION_KEY: &str = "currentTest";
/// Storage key holding the stringified cursor.
pub const CURSOR_KEY: &str = "currentIndex";

/// One practice run: an ordered descriptor sequence plus a cursor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub questions: Vec<QuestionDescriptor>,
    pub cursor: usize,
}

impl Session {
    pub fn new(questions: Vec<QuestionDescriptor>) -> Self {
        Self {
            questions,
            cursor: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// The cursor has passed the last question.
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.questions.len()
    }

    /// The descriptor under the cursor, if the session is still in progress.
    pub fn current(&self) -> Option<&QuestionDescriptor> {
        self.questions.get(self.cursor)
    }

    /// Flip a question between random and fixed generation. Only meaningful
    /// before that question's generation starts; callers enforce that by
    /// toggling during setup only.
    pub fn toggle_mode(&mut self, index: usize) -> Option<GenerationMode> {
        let q = self.questions.get_mut(index)?;
        q.mode = q.mode.toggled();
        Some(q.mode)
    }
}

/// Durable store for the one active session.
///
/// Single-writer by design: the player is the only mutator, and every
/// operation completes fully before the player reads again.
pub struct SessionStore<S: KeyValueStorage> {
    storage: S,
}

impl<S: KeyValueStorage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Persist the session, overwriting any prior one. The descriptor
    /// sequence is written before the cursor; each write replaces its value
    /// atomically, so a crash in between leaves the store readable.
    pub fn save(&self, session: &Session) -> Result<(), EngineError> {
        let questions = serde_json::to_string(&session.questions)
            .map_err(|e| EngineError::Storage(format!("serialize session: {e}")))?;
        self.storage.set(SESSION_KEY, &questions)?;
        self.storage.set(CURSOR_KEY, &session.cursor.to_string())
    }

    /// Load the persisted session, or `None` if none was ever saved, it was
    /// cleared, or the stored value is unreadable.
    pub fn load(&self) -> Option<Session> {
        let raw = self.storage.get(SESSION_KEY)?;
        let questions: Vec<QuestionDescriptor> = match serde_json::from_str(&raw) {
            Ok(q) => q,
            Err(e) => {
                tracing::warn!(error = %e, "stored session did not parse, treating as empty");
                return None;
            }
        };
        let cursor = self
            .storage
            .get(CURSOR_KEY)
            .and_then(|c| c.trim().parse::<usize>().ok())
            .unwrap_or(0);
        Some(Session { questions, cursor })
    }

    /// Advance the stored cursor by one. A no-op when nothing is stored.
    pub fn advance(&self) -> Result<(), EngineError> {
        let Some(session) = self.load() else {
            return Ok(());
        };
        self.storage
            .set(CURSOR_KEY, &(session.cursor + 1).to_string())
    }

    /// Remove the persisted session entirely.
    pub fn clear(&self) -> Result<(), EngineError> {
        self.storage.remove(SESSION_KEY)?;
        self.storage.remove(CURSOR_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProblemKind;
    use crate::storage::{FileStorage, MemoryStorage};

    fn sample_session() -> Session {
        Session::new(vec![
            QuestionDescriptor {
                kind: ProblemKind::TreeSearch,
                seed: 11,
                mode: GenerationMode::Random,
            },
            QuestionDescriptor {
                kind: ProblemKind::ConstraintGraph,
                seed: 22,
                mode: GenerationMode::Fixed,
            },
        ])
    }

    #[test]
    fn save_then_load_returns_equal_session() {
        let store = SessionStore::new(MemoryStorage::new());
        let session = sample_session();
        store.save(&session).unwrap();
        assert_eq!(store.load(), Some(session));
    }

    #[test]
    fn save_is_idempotent() {
        let store = SessionStore::new(MemoryStorage::new());
        let session = sample_session();
        store.save(&session).unwrap();
        store.save(&session).unwrap();
        assert_eq!(store.load(), Some(session));
    }

    #[test]
    fn load_without_save_is_empty() {
        let store = SessionStore::new(MemoryStorage::new());
        assert_eq!(store.load(), None);
    }

    #[test]
    fn advance_increments_stored_cursor() {
        let store = SessionStore::new(MemoryStorage::new());
        store.save(&sample_session()).unwrap();
        store.advance().unwrap();
        assert_eq!(store.load().unwrap().cursor, 1);
        store.advance().unwrap();
        assert_eq!(store.load().unwrap().cursor, 2);
    }

    #[test]
    fn advance_without_session_is_noop() {
        let store = SessionStore::new(MemoryStorage::new());
        store.advance().unwrap();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn clear_removes_everything() {
        let store = SessionStore::new(MemoryStorage::new());
        store.save(&sample_session()).unwrap();
        store.clear().unwrap();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn garbled_session_value_reads_as_empty() {
        let storage = MemoryStorage::new();
        storage.set(SESSION_KEY, "not json").unwrap();
        storage.set(CURSOR_KEY, "1").unwrap();
        let store = SessionStore::new(storage);
        assert_eq!(store.load(), None);
    }

    #[test]
    fn missing_cursor_defaults_to_zero() {
        let storage = MemoryStorage::new();
        let questions = sample_session().questions;
        storage
            .set(SESSION_KEY, &serde_json::to_string(&questions).unwrap())
            .unwrap();
        let store = SessionStore::new(storage);
        assert_eq!(store.load().unwrap().cursor, 0);
    }

    #[test]
    fn session_survives_process_restart() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = sample_session();
        session.cursor = 1;
        SessionStore::new(FileStorage::new(dir.path()))
            .save(&session)
            .unwrap();

        // A fresh store over the same directory simulates a reload.
        let reopened = SessionStore::new(FileStorage::new(dir.path()));
        assert_eq!(reopened.load(), Some(session));
    }

    #[test]
    fn persisted_layout_matches_the_store_contract() {
        let storage = MemoryStorage::new();
        let store = SessionStore::new(&storage);
        store.save(&sample_session()).unwrap();

        let raw = storage.get(SESSION_KEY).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed[0]["type"], "tree-search");
        assert_eq!(parsed[0]["seed"], 11);
        assert_eq!(parsed[0]["mode"], "random");
        assert_eq!(storage.get(CURSOR_KEY).unwrap(), "0");
    }
}
