//! Search-strategy problems: given a named problem, pick the best-suited
//! solving strategy from an offered option list.

use serde::{Deserialize, Serialize};

use algodrill_core::error::EngineError;
use algodrill_core::model::ProblemKind;

use crate::adapter::ProblemFamily;

pub struct SearchStrategy;

#[derive(Debug, Clone, Serialize)]
pub struct SearchStrategyConfig {
    pub random_pool: bool,
    /// How many strategy options to offer.
    pub option_count: Option<u32>,
}

impl Default for SearchStrategyConfig {
    fn default() -> Self {
        Self {
            random_pool: true,
            option_count: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchStrategyInstance {
    pub seed: u64,
    pub problem_name: String,
    pub description: String,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchStrategyEffective {
    pub option_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchStrategyAnswer {
    pub chosen_strategy: String,
}

#[derive(Debug, Serialize)]
pub struct SearchStrategyGenerateRequest {
    pub seed: u64,
    pub random_pool: bool,
    pub option_count: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct SearchStrategyEvaluateRequest {
    pub problem_seed: u64,
    pub chosen_strategy: String,
    pub option_count: usize,
}

impl ProblemFamily for SearchStrategy {
    const KIND: ProblemKind = ProblemKind::SearchStrategy;

    type Config = SearchStrategyConfig;
    type Instance = SearchStrategyInstance;
    type Effective = SearchStrategyEffective;
    type Answer = SearchStrategyAnswer;
    type GenerateRequest = SearchStrategyGenerateRequest;
    type EvaluateRequest = SearchStrategyEvaluateRequest;

    fn generate_request(seed: u64, config: &Self::Config) -> Self::GenerateRequest {
        SearchStrategyGenerateRequest {
            seed,
            random_pool: config.random_pool,
            option_count: if config.random_pool {
                None
            } else {
                config.option_count
            },
        }
    }

    fn problem_seed(instance: &Self::Instance) -> u64 {
        instance.seed
    }

    fn effective(_config: &Self::Config, instance: &Self::Instance) -> Self::Effective {
        SearchStrategyEffective {
            option_count: instance.options.len(),
        }
    }

    fn validate(answer: &Self::Answer, instance: &Self::Instance) -> Result<(), EngineError> {
        if answer.chosen_strategy.trim().is_empty() {
            return Err(EngineError::Validation("no strategy chosen".into()));
        }
        if !instance.options.contains(&answer.chosen_strategy) {
            return Err(EngineError::Validation(format!(
                "{} is not one of the offered strategies",
                answer.chosen_strategy
            )));
        }
        Ok(())
    }

    fn evaluate_request(
        problem_seed: u64,
        answer: &Self::Answer,
        effective: &Self::Effective,
    ) -> Self::EvaluateRequest {
        SearchStrategyEvaluateRequest {
            problem_seed,
            chosen_strategy: answer.chosen_strategy.clone(),
            option_count: effective.option_count,
        }
    }
}
