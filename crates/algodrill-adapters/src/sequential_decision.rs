//! Sequential-decision problems: value iteration or Q-learning over a small
//! grid world. The user reports one computed value (a state value or a
//! Q-update result, named by `question_target`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use algodrill_core::error::EngineError;
use algodrill_core::model::ProblemKind;

use crate::adapter::{ProblemFamily, ProblemText};

pub struct SequentialDecision;

/// Which learning task the grid poses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionTask {
    ValueIteration,
    QLearning,
}

#[derive(Debug, Clone, Serialize)]
pub struct SequentialDecisionConfig {
    pub task: DecisionTask,
    pub rows: u32,
    pub cols: u32,
    pub gamma: f64,
    pub random_gamma: bool,
    pub step_reward: f64,
    pub random_step_reward: bool,
    pub alpha: f64,
    pub random_alpha: bool,
}

impl Default for SequentialDecisionConfig {
    fn default() -> Self {
        Self {
            task: DecisionTask::ValueIteration,
            rows: 3,
            cols: 4,
            gamma: 0.9,
            random_gamma: true,
            step_reward: -0.04,
            random_step_reward: true,
            alpha: 0.1,
            random_alpha: true,
        }
    }
}

/// Grid world returned for value-iteration tasks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridSpec {
    pub rows: u32,
    pub cols: u32,
    pub walls: Vec<(u32, u32)>,
    /// `"row,col"` → terminal reward.
    pub terminals: BTreeMap<String, f64>,
    pub step_reward: f64,
    pub gamma: f64,
}

/// Parameters returned for Q-learning tasks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QData {
    pub gamma: f64,
    pub alpha: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SequentialDecisionInstance {
    pub seed: u64,
    /// Present for value-iteration tasks.
    #[serde(default)]
    pub grid: Option<GridSpec>,
    /// Present for Q-learning tasks.
    #[serde(default)]
    pub q_data: Option<QData>,
    pub text: ProblemText,
    /// Which value the question asks for, e.g. `"V(1,2)"`.
    pub question_target: String,
}

/// Fully resolved parameters; gamma/step-reward/alpha come out of the
/// returned grid or q-data, dimensions and task out of the request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequentialDecisionEffective {
    pub task: DecisionTask,
    pub rows: u32,
    pub cols: u32,
    pub gamma: f64,
    pub step_reward: f64,
    pub alpha: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SequentialDecisionAnswer {
    pub value: f64,
}

#[derive(Debug, Serialize)]
pub struct SequentialDecisionGenerateRequest {
    pub seed: u64,
    #[serde(rename = "type")]
    pub task: DecisionTask,
    pub rows: u32,
    pub cols: u32,
    pub gamma: f64,
    pub random_gamma: bool,
    pub step_reward: f64,
    pub random_step_reward: bool,
    pub alpha: f64,
    pub random_alpha: bool,
}

#[derive(Debug, Serialize)]
pub struct SequentialDecisionEvaluateRequest {
    pub problem_seed: u64,
    #[serde(rename = "problem_type")]
    pub task: DecisionTask,
    pub user_value: f64,
    pub rows: u32,
    pub cols: u32,
    pub gamma: f64,
    pub step_reward: f64,
    pub alpha: f64,
}

impl ProblemFamily for SequentialDecision {
    const KIND: ProblemKind = ProblemKind::SequentialDecision;

    type Config = SequentialDecisionConfig;
    type Instance = SequentialDecisionInstance;
    type Effective = SequentialDecisionEffective;
    type Answer = SequentialDecisionAnswer;
    type GenerateRequest = SequentialDecisionGenerateRequest;
    type EvaluateRequest = SequentialDecisionEvaluateRequest;

    fn generate_request(seed: u64, config: &Self::Config) -> Self::GenerateRequest {
        SequentialDecisionGenerateRequest {
            seed,
            task: config.task,
            rows: config.rows,
            cols: config.cols,
            gamma: config.gamma,
            random_gamma: config.random_gamma,
            step_reward: config.step_reward,
            random_step_reward: config.random_step_reward,
            alpha: config.alpha,
            random_alpha: config.random_alpha,
        }
    }

    fn problem_seed(instance: &Self::Instance) -> u64 {
        instance.seed
    }

    fn effective(config: &Self::Config, instance: &Self::Instance) -> Self::Effective {
        // The response echoes the resolved values in whichever structure
        // the task produced; anything it does not echo keeps the requested
        // value.
        let (gamma, step_reward, alpha) = match (&instance.grid, &instance.q_data) {
            (Some(grid), _) => (grid.gamma, grid.step_reward, config.alpha),
            (None, Some(q)) => (q.gamma, config.step_reward, q.alpha),
            (None, None) => (config.gamma, config.step_reward, config.alpha),
        };
        SequentialDecisionEffective {
            task: config.task,
            rows: config.rows,
            cols: config.cols,
            gamma,
            step_reward,
            alpha,
        }
    }

    fn validate(answer: &Self::Answer, _instance: &Self::Instance) -> Result<(), EngineError> {
        if !answer.value.is_finite() {
            return Err(EngineError::Validation(
                "the answer must be a finite number".into(),
            ));
        }
        Ok(())
    }

    fn evaluate_request(
        problem_seed: u64,
        answer: &Self::Answer,
        effective: &Self::Effective,
    ) -> Self::EvaluateRequest {
        SequentialDecisionEvaluateRequest {
            problem_seed,
            task: effective.task,
            user_value: answer.value,
            rows: effective.rows,
            cols: effective.cols,
            gamma: effective.gamma,
            step_reward: effective.step_reward,
            alpha: effective.alpha,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_instance() -> SequentialDecisionInstance {
        serde_json::from_value(serde_json::json!({
            "seed": 6,
            "grid": {
                "rows": 3,
                "cols": 4,
                "walls": [[1, 1]],
                "terminals": { "0,3": 1.0 },
                "step_reward": -0.02,
                "gamma": 0.85
            },
            "text": { "title": "t", "description": "d", "requirement": "r" },
            "question_target": "V(2,0)"
        }))
        .unwrap()
    }

    fn q_instance() -> SequentialDecisionInstance {
        serde_json::from_value(serde_json::json!({
            "seed": 6,
            "q_data": { "gamma": 0.7, "alpha": 0.25 },
            "text": { "title": "t", "description": "d", "requirement": "r" },
            "question_target": "Q(s,a)"
        }))
        .unwrap()
    }

    #[test]
    fn grid_response_resolves_gamma_and_step_reward() {
        let effective =
            SequentialDecision::effective(&SequentialDecisionConfig::default(), &grid_instance());
        assert_eq!(effective.gamma, 0.85);
        assert_eq!(effective.step_reward, -0.02);
        // Alpha is not part of a value-iteration response.
        assert_eq!(effective.alpha, 0.1);
    }

    #[test]
    fn q_response_resolves_gamma_and_alpha() {
        let config = SequentialDecisionConfig {
            task: DecisionTask::QLearning,
            ..SequentialDecisionConfig::default()
        };
        let effective = SequentialDecision::effective(&config, &q_instance());
        assert_eq!(effective.gamma, 0.7);
        assert_eq!(effective.alpha, 0.25);
        assert_eq!(effective.step_reward, -0.04);
    }

    #[test]
    fn task_serializes_with_the_wire_names() {
        let request = SequentialDecision::generate_request(1, &SequentialDecisionConfig::default());
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["type"], "value_iteration");

        let eval = SequentialDecision::evaluate_request(
            2,
            &SequentialDecisionAnswer { value: 0.5 },
            &SequentialDecisionEffective {
                task: DecisionTask::QLearning,
                rows: 3,
                cols: 4,
                gamma: 0.7,
                step_reward: -0.04,
                alpha: 0.25,
            },
        );
        let json = serde_json::to_value(&eval).unwrap();
        assert_eq!(json["problem_type"], "q_learning");
        assert_eq!(json["gamma"], 0.7);
    }

    #[test]
    fn non_finite_answers_are_invalid() {
        let answer = SequentialDecisionAnswer {
            value: f64::INFINITY,
        };
        assert!(SequentialDecision::validate(&answer, &grid_instance()).is_err());
    }
}
