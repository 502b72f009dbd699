//! Probabilistic-network problems: posterior inference over a small
//! rain/sprinkler network.
//!
//! Evaluation sends the effective priors so the server recomputes ground
//! truth from them; the client never learns or forwards the solution.

use serde::{Deserialize, Serialize};

use algodrill_core::error::EngineError;
use algodrill_core::model::ProblemKind;

use crate::adapter::{ProblemFamily, ProblemText};

pub struct ProbabilisticNetwork;

#[derive(Debug, Clone, Serialize)]
pub struct ProbabilisticNetworkConfig {
    pub random_priors: bool,
    pub p_rain: Option<f64>,
    pub p_sprinkler: Option<f64>,
}

impl Default for ProbabilisticNetworkConfig {
    fn default() -> Self {
        Self {
            random_priors: true,
            p_rain: None,
            p_sprinkler: None,
        }
    }
}

/// The priors the generator actually used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkPriors {
    pub p_rain: f64,
    pub p_sprinkler: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProbabilisticNetworkInstance {
    pub seed: u64,
    pub priors: NetworkPriors,
    pub text: ProblemText,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProbabilisticNetworkAnswer {
    /// The posterior probability the user computed, in `[0, 1]`.
    pub probability: f64,
}

#[derive(Debug, Serialize)]
pub struct ProbabilisticNetworkGenerateRequest {
    pub seed: u64,
    pub random_priors: bool,
    pub p_rain: Option<f64>,
    pub p_sprinkler: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct ProbabilisticNetworkEvaluateRequest {
    pub problem_seed: u64,
    pub user_answer: f64,
    pub p_rain: f64,
    pub p_sprinkler: f64,
}

impl ProblemFamily for ProbabilisticNetwork {
    const KIND: ProblemKind = ProblemKind::ProbabilisticNetwork;

    type Config = ProbabilisticNetworkConfig;
    type Instance = ProbabilisticNetworkInstance;
    type Effective = NetworkPriors;
    type Answer = ProbabilisticNetworkAnswer;
    type GenerateRequest = ProbabilisticNetworkGenerateRequest;
    type EvaluateRequest = ProbabilisticNetworkEvaluateRequest;

    fn generate_request(seed: u64, config: &Self::Config) -> Self::GenerateRequest {
        ProbabilisticNetworkGenerateRequest {
            seed,
            random_priors: config.random_priors,
            p_rain: if config.random_priors {
                None
            } else {
                config.p_rain
            },
            p_sprinkler: if config.random_priors {
                None
            } else {
                config.p_sprinkler
            },
        }
    }

    fn problem_seed(instance: &Self::Instance) -> u64 {
        instance.seed
    }

    fn effective(_config: &Self::Config, instance: &Self::Instance) -> Self::Effective {
        instance.priors.clone()
    }

    fn validate(answer: &Self::Answer, _instance: &Self::Instance) -> Result<(), EngineError> {
        if !answer.probability.is_finite() || !(0.0..=1.0).contains(&answer.probability) {
            return Err(EngineError::Validation(
                "the answer must be a probability between 0 and 1".into(),
            ));
        }
        Ok(())
    }

    fn evaluate_request(
        problem_seed: u64,
        answer: &Self::Answer,
        effective: &Self::Effective,
    ) -> Self::EvaluateRequest {
        ProbabilisticNetworkEvaluateRequest {
            problem_seed,
            user_answer: answer.probability,
            p_rain: effective.p_rain,
            p_sprinkler: effective.p_sprinkler,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance() -> ProbabilisticNetworkInstance {
        serde_json::from_value(serde_json::json!({
            "seed": 8,
            "priors": { "p_rain": 0.2, "p_sprinkler": 0.35 },
            "text": { "title": "t", "description": "d", "requirement": "r" }
        }))
        .unwrap()
    }

    #[test]
    fn probability_outside_unit_interval_is_invalid() {
        let too_big = ProbabilisticNetworkAnswer { probability: 1.2 };
        assert!(ProbabilisticNetwork::validate(&too_big, &instance()).is_err());
        let nan = ProbabilisticNetworkAnswer {
            probability: f64::NAN,
        };
        assert!(ProbabilisticNetwork::validate(&nan, &instance()).is_err());
        let fine = ProbabilisticNetworkAnswer { probability: 0.42 };
        assert!(ProbabilisticNetwork::validate(&fine, &instance()).is_ok());
    }

    #[test]
    fn evaluate_request_sends_priors_not_a_solution() {
        let request = ProbabilisticNetwork::evaluate_request(
            8,
            &ProbabilisticNetworkAnswer { probability: 0.42 },
            &NetworkPriors {
                p_rain: 0.2,
                p_sprinkler: 0.35,
            },
        );
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["p_rain"], 0.2);
        assert_eq!(json["p_sprinkler"], 0.35);
        assert_eq!(json["user_answer"], 0.42);
        assert!(json.get("correct_answer").is_none());
    }

    #[test]
    fn explicit_priors_pass_through_when_not_random() {
        let config = ProbabilisticNetworkConfig {
            random_priors: false,
            p_rain: Some(0.1),
            p_sprinkler: Some(0.5),
        };
        let request = ProbabilisticNetwork::generate_request(3, &config);
        assert_eq!(request.p_rain, Some(0.1));
        assert_eq!(request.p_sprinkler, Some(0.5));
    }
}
