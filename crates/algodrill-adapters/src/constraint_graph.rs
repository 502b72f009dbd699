//! Constraint-graph problems: color a graph so no edge joins two equal
//! colors, starting from a server-chosen partial assignment.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use algodrill_core::error::EngineError;
use algodrill_core::model::ProblemKind;

use crate::adapter::{ProblemFamily, ProblemText};

pub struct ConstraintGraph;

#[derive(Debug, Clone, Serialize)]
pub struct ConstraintGraphConfig {
    pub random_graph: bool,
    pub graph_size: Option<u32>,
    pub random_algo: bool,
    pub algorithm: Option<String>,
    pub random_prefill: bool,
    pub prefill_level: Option<String>,
}

impl Default for ConstraintGraphConfig {
    fn default() -> Self {
        Self {
            random_graph: true,
            graph_size: None,
            random_algo: true,
            algorithm: None,
            random_prefill: true,
            prefill_level: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: u32,
    pub x: i32,
    pub y: i32,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: u32,
    pub target: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstraintGraphShape {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConstraintGraphInstance {
    pub seed: u64,
    pub graph: ConstraintGraphShape,
    /// Remaining domain per variable after the server's propagation.
    pub domains: BTreeMap<String, Vec<String>>,
    /// Server-prefilled assignments the user must keep.
    pub assignments: BTreeMap<String, String>,
    pub all_variables: Vec<String>,
    pub available_colors: Vec<String>,
    pub algorithm_name: String,
    pub text: ProblemText,
}

/// Effective parameters, resolved from the instance the server built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstraintGraphEffective {
    pub graph_size: usize,
    pub algorithm: String,
    pub prefilled: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConstraintGraphAnswer {
    /// Full variable → color assignment, prefilled entries included.
    pub assignments: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
pub struct ConstraintGraphGenerateRequest {
    pub seed: u64,
    pub random_graph: bool,
    pub graph_size: Option<u32>,
    pub random_algo: bool,
    pub algorithm: Option<String>,
    pub random_prefill: bool,
    pub prefill_level: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ConstraintGraphEvaluateRequest {
    pub problem_seed: u64,
    pub user_assignments: BTreeMap<String, String>,
    pub generated_params: ConstraintGraphEffective,
}

impl ProblemFamily for ConstraintGraph {
    const KIND: ProblemKind = ProblemKind::ConstraintGraph;

    type Config = ConstraintGraphConfig;
    type Instance = ConstraintGraphInstance;
    type Effective = ConstraintGraphEffective;
    type Answer = ConstraintGraphAnswer;
    type GenerateRequest = ConstraintGraphGenerateRequest;
    type EvaluateRequest = ConstraintGraphEvaluateRequest;

    fn generate_request(seed: u64, config: &Self::Config) -> Self::GenerateRequest {
        ConstraintGraphGenerateRequest {
            seed,
            random_graph: config.random_graph,
            graph_size: if config.random_graph {
                None
            } else {
                config.graph_size
            },
            random_algo: config.random_algo,
            algorithm: if config.random_algo {
                None
            } else {
                config.algorithm.clone()
            },
            random_prefill: config.random_prefill,
            prefill_level: if config.random_prefill {
                None
            } else {
                config.prefill_level.clone()
            },
        }
    }

    fn problem_seed(instance: &Self::Instance) -> u64 {
        instance.seed
    }

    fn effective(_config: &Self::Config, instance: &Self::Instance) -> Self::Effective {
        ConstraintGraphEffective {
            graph_size: instance.graph.nodes.len(),
            algorithm: instance.algorithm_name.clone(),
            prefilled: instance.assignments.len(),
        }
    }

    fn validate(answer: &Self::Answer, instance: &Self::Instance) -> Result<(), EngineError> {
        for variable in &instance.all_variables {
            let Some(color) = answer.assignments.get(variable) else {
                return Err(EngineError::Validation(format!(
                    "variable {variable} has no color assigned"
                )));
            };
            if !instance.available_colors.contains(color) {
                return Err(EngineError::Validation(format!(
                    "{color} is not one of the available colors"
                )));
            }
        }
        Ok(())
    }

    fn evaluate_request(
        problem_seed: u64,
        answer: &Self::Answer,
        effective: &Self::Effective,
    ) -> Self::EvaluateRequest {
        ConstraintGraphEvaluateRequest {
            problem_seed,
            user_assignments: answer.assignments.clone(),
            generated_params: effective.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance() -> ConstraintGraphInstance {
        serde_json::from_value(serde_json::json!({
            "seed": 5,
            "graph": {
                "nodes": [
                    { "id": 0, "x": 10, "y": 10, "label": "A" },
                    { "id": 1, "x": 40, "y": 10, "label": "B" }
                ],
                "edges": [ { "source": 0, "target": 1 } ]
            },
            "domains": { "A": ["Red", "Green"], "B": ["Green"] },
            "assignments": { "B": "Green" },
            "all_variables": ["A", "B"],
            "available_colors": ["Red", "Green", "Blue"],
            "algorithm_name": "FC",
            "text": { "title": "t", "description": "d", "requirement": "r", "note": "n" }
        }))
        .unwrap()
    }

    #[test]
    fn effective_is_resolved_from_the_instance() {
        let effective = ConstraintGraph::effective(&ConstraintGraphConfig::default(), &instance());
        assert_eq!(effective.graph_size, 2);
        assert_eq!(effective.algorithm, "FC");
        assert_eq!(effective.prefilled, 1);
    }

    #[test]
    fn partial_assignments_are_rejected() {
        let answer = ConstraintGraphAnswer {
            assignments: BTreeMap::from([("A".to_string(), "Red".to_string())]),
        };
        assert!(matches!(
            ConstraintGraph::validate(&answer, &instance()),
            Err(EngineError::Validation(_))
        ));
    }

    #[test]
    fn unknown_colors_are_rejected() {
        let answer = ConstraintGraphAnswer {
            assignments: BTreeMap::from([
                ("A".to_string(), "Purple".to_string()),
                ("B".to_string(), "Green".to_string()),
            ]),
        };
        assert!(ConstraintGraph::validate(&answer, &instance()).is_err());
    }

    #[test]
    fn complete_assignment_passes_validation() {
        let answer = ConstraintGraphAnswer {
            assignments: BTreeMap::from([
                ("A".to_string(), "Red".to_string()),
                ("B".to_string(), "Green".to_string()),
            ]),
        };
        assert!(ConstraintGraph::validate(&answer, &instance()).is_ok());
    }

    #[test]
    fn evaluate_request_wraps_the_effective_params() {
        let answer = ConstraintGraphAnswer {
            assignments: BTreeMap::from([("A".to_string(), "Red".to_string())]),
        };
        let request = ConstraintGraph::evaluate_request(
            99,
            &answer,
            &ConstraintGraphEffective {
                graph_size: 6,
                algorithm: "AC3".to_string(),
                prefilled: 2,
            },
        );
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["generated_params"]["graph_size"], 6);
        assert_eq!(json["generated_params"]["algorithm"], "AC3");
        assert_eq!(json["user_assignments"]["A"], "Red");
    }
}
