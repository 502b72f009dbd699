//! Session setup: building the question descriptor sequence.
//!
//! The builder asks the remote service for an abstract kind sequence (the
//! proportioning policy lives server-side) and stamps each entry with a
//! fresh reproducibility seed and the default `Random` mode. No problem
//! instance is generated here; that is deferred to the player so an
//! abandoned setup costs one cheap call.

use std::collections::HashSet;

use async_trait::async_trait;
use rand::Rng;

use crate::error::EngineError;
use crate::model::{GenerationMode, ProblemKind, QuestionDescriptor};

/// Upper bound (exclusive) of the session seed space.
pub const SEED_SPACE: u64 = 1_000_000;

/// Remote source of abstract question kinds.
///
/// Implemented over HTTP in `algodrill-service`; tests provide canned
/// sequences.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Ask for `count` kinds drawn from the enabled set.
    async fn draw_kinds(
        &self,
        count: usize,
        enabled: &HashSet<ProblemKind>,
    ) -> Result<Vec<ProblemKind>, EngineError>;
}

/// Build the descriptor sequence for a new session.
///
/// Fails with [`EngineError::Configuration`] before any remote call when
/// the input cannot produce a session.
pub async fn build_descriptors(
    count: usize,
    enabled: &HashSet<ProblemKind>,
    source: &dyn QuestionSource,
) -> Result<Vec<QuestionDescriptor>, EngineError> {
    if count < 1 {
        return Err(EngineError::Configuration(
            "a session needs at least one question".into(),
        ));
    }
    if enabled.is_empty() {
        return Err(EngineError::Configuration(
            "at least one problem kind must be enabled".into(),
        ));
    }
    // Seeds must stay distinct, so the seed space caps the session length.
    if count as u64 > SEED_SPACE {
        return Err(EngineError::Configuration(format!(
            "a session cannot hold more than {SEED_SPACE} questions"
        )));
    }

    let kinds = source.draw_kinds(count, enabled).await?;
    tracing::debug!(requested = count, received = kinds.len(), "planned session");

    let mut rng = rand::thread_rng();
    let mut used_seeds = HashSet::with_capacity(kinds.len());
    let descriptors = kinds
        .into_iter()
        .map(|kind| {
            // Seeds double as question identity within the session; keep
            // them unique.
            let mut seed = rng.gen_range(0..SEED_SPACE);
            while !used_seeds.insert(seed) {
                seed = rng.gen_range(0..SEED_SPACE);
            }
            QuestionDescriptor {
                kind,
                seed,
                mode: GenerationMode::Random,
            }
        })
        .collect();

    Ok(descriptors)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Canned source that repeats the first enabled kind.
    struct FixedSource {
        calls: std::sync::atomic::AtomicU32,
    }

    impl FixedSource {
        fn new() -> Self {
            Self {
                calls: std::sync::atomic::AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl QuestionSource for FixedSource {
        async fn draw_kinds(
            &self,
            count: usize,
            enabled: &HashSet<ProblemKind>,
        ) -> Result<Vec<ProblemKind>, EngineError> {
            self.calls.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            let kind = *enabled.iter().next().unwrap();
            Ok(vec![kind; count])
        }
    }

    #[tokio::test]
    async fn builds_descriptors_with_distinct_seeds_and_random_mode() {
        let enabled: HashSet<_> = [ProblemKind::TreeSearch].into_iter().collect();
        let source = FixedSource::new();
        let descriptors = build_descriptors(3, &enabled, &source).await.unwrap();

        assert_eq!(descriptors.len(), 3);
        let seeds: HashSet<u64> = descriptors.iter().map(|d| d.seed).collect();
        assert_eq!(seeds.len(), 3, "seeds must be distinct");
        for d in &descriptors {
            assert_eq!(d.kind, ProblemKind::TreeSearch);
            assert_eq!(d.mode, GenerationMode::Random);
            assert!(d.seed < SEED_SPACE);
        }
        assert_eq!(source.calls.load(std::sync::atomic::Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn zero_questions_is_a_configuration_error() {
        let enabled: HashSet<_> = [ProblemKind::MatrixGame].into_iter().collect();
        let source = FixedSource::new();
        let err = build_descriptors(0, &enabled, &source).await.unwrap_err();
        assert!(matches!(err, EngineError::Configuration(_)));
        // Rejected before any remote call.
        assert_eq!(source.calls.load(std::sync::atomic::Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn more_questions_than_seeds_is_a_configuration_error() {
        let enabled: HashSet<_> = [ProblemKind::TreeSearch].into_iter().collect();
        let source = FixedSource::new();
        let err = build_descriptors(SEED_SPACE as usize + 1, &enabled, &source)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Configuration(_)));
        assert_eq!(source.calls.load(std::sync::atomic::Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn empty_kind_set_is_a_configuration_error() {
        let enabled = HashSet::new();
        let source = FixedSource::new();
        let err = build_descriptors(4, &enabled, &source).await.unwrap_err();
        assert!(matches!(err, EngineError::Configuration(_)));
        assert_eq!(source.calls.load(std::sync::atomic::Ordering::Relaxed), 0);
    }
}
