//! Session planning: the `POST /test` boundary.

use std::collections::HashSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use algodrill_core::builder::QuestionSource;
use algodrill_core::error::EngineError;
use algodrill_core::model::ProblemKind;

use crate::client::ServiceClient;

/// Request body for `POST /test`: a question count plus one enable flag per
/// problem kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionPlanRequest {
    pub num_questions: usize,
    pub tree_search: bool,
    pub matrix_game: bool,
    pub constraint_graph: bool,
    pub probabilistic_network: bool,
    pub sequential_decision: bool,
    pub search_strategy: bool,
}

impl SessionPlanRequest {
    pub fn new(num_questions: usize, enabled: &HashSet<ProblemKind>) -> Self {
        Self {
            num_questions,
            tree_search: enabled.contains(&ProblemKind::TreeSearch),
            matrix_game: enabled.contains(&ProblemKind::MatrixGame),
            constraint_graph: enabled.contains(&ProblemKind::ConstraintGraph),
            probabilistic_network: enabled.contains(&ProblemKind::ProbabilisticNetwork),
            sequential_decision: enabled.contains(&ProblemKind::SequentialDecision),
            search_strategy: enabled.contains(&ProblemKind::SearchStrategy),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SessionPlanResponse {
    questions: Vec<PlannedQuestion>,
}

#[derive(Debug, Deserialize)]
struct PlannedQuestion {
    #[serde(rename = "type")]
    kind: ProblemKind,
}

#[async_trait]
impl QuestionSource for ServiceClient {
    async fn draw_kinds(
        &self,
        count: usize,
        enabled: &HashSet<ProblemKind>,
    ) -> Result<Vec<ProblemKind>, EngineError> {
        let request = SessionPlanRequest::new(count, enabled);
        let response: SessionPlanResponse = self
            .post_json("/test", &request)
            .await
            .map_err(EngineError::Generation)?;
        Ok(response.questions.into_iter().map(|q| q.kind).collect())
    }
}
