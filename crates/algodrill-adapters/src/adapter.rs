//! The per-question adapter contract.
//!
//! One [`ProblemFamily`] impl exists per problem kind; the generic
//! [`QuestionAdapter`] drives all of them through the same
//! generate/evaluate flow and owns the one invariant this system lives by:
//! the parameters submitted with an answer are always the *effective*
//! parameters of the most recent successful generation — never whatever a
//! configuration control currently shows.

use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use algodrill_core::error::EngineError;
use algodrill_core::model::{Evaluation, ProblemKind, QuestionKey};
use algodrill_service::ServiceClient;

/// Title/description/requirement block every generated problem carries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemText {
    pub title: String,
    pub description: String,
    pub requirement: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// A problem kind's schemas and request builders.
///
/// Implementations are stateless; all per-question state lives in the
/// adapter.
pub trait ProblemFamily: Send + Sync + 'static {
    const KIND: ProblemKind;

    /// The user-editable generation configuration. `Default` is what
    /// auto-generation sends.
    type Config: Clone + Default + Send + Sync;
    /// The deserialized `/generate` response.
    type Instance: Clone + DeserializeOwned + Send + Sync;
    /// The fully resolved parameters the server actually used — the
    /// LastUsedConfig snapshot.
    type Effective: Clone + Send + Sync;
    /// The user's answer.
    type Answer: Send + Sync;
    /// Wire body for `/generate/{kind}`.
    type GenerateRequest: Serialize + Send + Sync;
    /// Wire body for `/evaluate/{kind}`.
    type EvaluateRequest: Serialize + Send + Sync;

    fn generate_request(seed: u64, config: &Self::Config) -> Self::GenerateRequest;

    /// Server-assigned seed identifying the generated instance (may differ
    /// from the session seed).
    fn problem_seed(instance: &Self::Instance) -> u64;

    /// Resolve the effective parameters out of a generate response. The
    /// request config is available for fields the response does not echo.
    fn effective(config: &Self::Config, instance: &Self::Instance) -> Self::Effective;

    /// Reject incomplete or malformed answers before any network traffic.
    fn validate(answer: &Self::Answer, instance: &Self::Instance) -> Result<(), EngineError>;

    fn evaluate_request(
        problem_seed: u64,
        answer: &Self::Answer,
        effective: &Self::Effective,
    ) -> Self::EvaluateRequest;
}

/// Everything committed by the most recent successful generation.
struct Committed<F: ProblemFamily> {
    problem_seed: u64,
    effective: F::Effective,
    instance: F::Instance,
}

impl<F: ProblemFamily> Clone for Committed<F> {
    fn clone(&self) -> Self {
        Self {
            problem_seed: self.problem_seed,
            effective: self.effective.clone(),
            instance: self.instance.clone(),
        }
    }
}

struct AdapterState<F: ProblemFamily> {
    /// Session seed of the question this adapter currently shows.
    seed: u64,
    /// Whether the one auto-generate call already fired for this target.
    auto_fired: bool,
    committed: Option<Committed<F>>,
}

/// Drives one question's generate/answer/evaluate flow.
///
/// All methods take `&self`; state sits behind a mutex that is never held
/// across an await, so a second in-flight call simply commits whenever it
/// resolves (last-writer-wins). Responses for a seed the adapter no longer
/// targets are dropped without effect.
pub struct QuestionAdapter<F: ProblemFamily> {
    client: Arc<ServiceClient>,
    state: Mutex<AdapterState<F>>,
}

impl<F: ProblemFamily> QuestionAdapter<F> {
    pub fn new(client: Arc<ServiceClient>, seed: u64) -> Self {
        Self {
            client,
            state: Mutex::new(AdapterState {
                seed,
                auto_fired: false,
                committed: None,
            }),
        }
    }

    /// The question identity this adapter currently targets.
    pub fn key(&self) -> QuestionKey {
        QuestionKey {
            kind: F::KIND,
            seed: self.state.lock().unwrap().seed,
        }
    }

    /// Point the adapter at a different question of the same kind. Clears
    /// every trace of the previous one; an in-flight response for the old
    /// seed will be dropped when it arrives.
    pub fn retarget(&self, seed: u64) {
        let mut state = self.state.lock().unwrap();
        state.seed = seed;
        state.auto_fired = false;
        state.committed = None;
    }

    /// The LastUsedConfig snapshot, if a generation succeeded.
    pub fn last_used(&self) -> Option<F::Effective> {
        self.state
            .lock()
            .unwrap()
            .committed
            .as_ref()
            .map(|c| c.effective.clone())
    }

    /// The most recently committed instance.
    pub fn instance(&self) -> Option<F::Instance> {
        self.state
            .lock()
            .unwrap()
            .committed
            .as_ref()
            .map(|c| c.instance.clone())
    }

    /// Request a fresh problem instance.
    ///
    /// Returns `Ok(None)` when the response arrived for a seed the adapter
    /// no longer targets; such responses are dropped silently since they
    /// are not user-actionable. A failed call leaves prior state untouched,
    /// so retrying is always safe.
    pub async fn generate(&self, config: &F::Config) -> Result<Option<F::Instance>, EngineError> {
        let requested_seed = self.state.lock().unwrap().seed;
        let request = F::generate_request(requested_seed, config);

        let instance: F::Instance = self
            .client
            .generate(F::KIND, &request)
            .await
            .map_err(EngineError::Generation)?;

        let mut state = self.state.lock().unwrap();
        if state.seed != requested_seed {
            tracing::debug!(
                kind = %F::KIND,
                requested_seed,
                current_seed = state.seed,
                "dropping stale generate response"
            );
            return Ok(None);
        }

        state.committed = Some(Committed {
            problem_seed: F::problem_seed(&instance),
            effective: F::effective(config, &instance),
            instance: instance.clone(),
        });
        Ok(Some(instance))
    }

    /// The auto-generate path: fire exactly one generation with the default
    /// config on first render. A benign re-render finds `auto_fired` set
    /// and gets the committed instance back without a new call. A failed
    /// call re-arms the guard, so retrying the auto path is always safe.
    pub async fn generate_default(&self) -> Result<Option<F::Instance>, EngineError> {
        {
            let mut state = self.state.lock().unwrap();
            if state.auto_fired {
                return Ok(state.committed.as_ref().map(|c| c.instance.clone()));
            }
            state.auto_fired = true;
        }
        match self.generate(&F::Config::default()).await {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                self.state.lock().unwrap().auto_fired = false;
                Err(e)
            }
        }
    }

    /// Submit an answer for the current instance.
    ///
    /// The evaluate body is built from the committed snapshot only. With no
    /// snapshot (nothing generated yet) this is a [`EngineError::Validation`]
    /// and no remote call is made. `Ok(None)` marks a stale response that
    /// was dropped.
    pub async fn evaluate(&self, answer: &F::Answer) -> Result<Option<Evaluation>, EngineError> {
        let (requested_seed, request) = {
            let state = self.state.lock().unwrap();
            let Some(committed) = state.committed.as_ref() else {
                return Err(EngineError::Validation(
                    "no problem instance has been generated yet".into(),
                ));
            };
            F::validate(answer, &committed.instance)?;
            (
                state.seed,
                F::evaluate_request(committed.problem_seed, answer, &committed.effective),
            )
        };

        let evaluation: Evaluation = self
            .client
            .evaluate(F::KIND, &request)
            .await
            .map_err(EngineError::Evaluation)?;

        let state = self.state.lock().unwrap();
        if state.seed != requested_seed {
            tracing::debug!(
                kind = %F::KIND,
                requested_seed,
                current_seed = state.seed,
                "dropping stale evaluate response"
            );
            return Ok(None);
        }
        Ok(Some(evaluation))
    }
}
