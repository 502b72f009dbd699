//! Adversarial tree-search problems (minimax with alpha-beta pruning).
//!
//! The user reads a game tree and answers with the value computed at the
//! root plus the number of leaves the pruning traversal visits.

use serde::{Deserialize, Serialize};

use algodrill_core::error::EngineError;
use algodrill_core::model::ProblemKind;

use crate::adapter::{ProblemFamily, ProblemText};

pub struct TreeSearch;

/// User-editable generation parameters. Each value can be left to the
/// server (`random_*` set, value null) or pinned explicitly.
#[derive(Debug, Clone, Serialize)]
pub struct TreeSearchConfig {
    pub random_depth: bool,
    pub depth: Option<u32>,
    pub random_root: bool,
    pub is_maximizing_player: Option<bool>,
}

impl Default for TreeSearchConfig {
    fn default() -> Self {
        Self {
            random_depth: true,
            depth: None,
            random_root: true,
            is_maximizing_player: None,
        }
    }
}

/// A node of the rendered game tree; leaves carry values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNode {
    pub name: String,
    #[serde(default)]
    pub value: Option<i64>,
    #[serde(default)]
    pub children: Vec<TreeNode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TreeSearchInstance {
    pub seed: u64,
    pub tree: TreeNode,
    pub text: ProblemText,
    /// Effective depth the generator actually used.
    pub depth: u32,
    /// Effective root player type.
    pub is_maximizing_player: bool,
}

/// The LastUsedConfig snapshot for this kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeSearchEffective {
    pub depth: u32,
    pub is_maximizing_player: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct TreeSearchAnswer {
    pub root_value: i64,
    pub visited_nodes: u32,
}

#[derive(Debug, Serialize)]
pub struct TreeSearchGenerateRequest {
    pub seed: u64,
    pub random_depth: bool,
    pub depth: Option<u32>,
    pub random_root: bool,
    pub is_maximizing_player: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct TreeSearchEvaluateRequest {
    pub problem_seed: u64,
    pub root_value: i64,
    pub visited_nodes: u32,
    pub generated_depth: u32,
    pub generated_is_maximizing: bool,
}

impl ProblemFamily for TreeSearch {
    const KIND: ProblemKind = ProblemKind::TreeSearch;

    type Config = TreeSearchConfig;
    type Instance = TreeSearchInstance;
    type Effective = TreeSearchEffective;
    type Answer = TreeSearchAnswer;
    type GenerateRequest = TreeSearchGenerateRequest;
    type EvaluateRequest = TreeSearchEvaluateRequest;

    fn generate_request(seed: u64, config: &Self::Config) -> Self::GenerateRequest {
        TreeSearchGenerateRequest {
            seed,
            random_depth: config.random_depth,
            depth: if config.random_depth { None } else { config.depth },
            random_root: config.random_root,
            is_maximizing_player: if config.random_root {
                None
            } else {
                config.is_maximizing_player
            },
        }
    }

    fn problem_seed(instance: &Self::Instance) -> u64 {
        instance.seed
    }

    fn effective(_config: &Self::Config, instance: &Self::Instance) -> Self::Effective {
        TreeSearchEffective {
            depth: instance.depth,
            is_maximizing_player: instance.is_maximizing_player,
        }
    }

    fn validate(answer: &Self::Answer, _instance: &Self::Instance) -> Result<(), EngineError> {
        if answer.visited_nodes == 0 {
            return Err(EngineError::Validation(
                "a pruning traversal visits at least one leaf".into(),
            ));
        }
        Ok(())
    }

    fn evaluate_request(
        problem_seed: u64,
        answer: &Self::Answer,
        effective: &Self::Effective,
    ) -> Self::EvaluateRequest {
        TreeSearchEvaluateRequest {
            problem_seed,
            root_value: answer.root_value,
            visited_nodes: answer.visited_nodes,
            generated_depth: effective.depth,
            generated_is_maximizing: effective.is_maximizing_player,
        }
    }
}
