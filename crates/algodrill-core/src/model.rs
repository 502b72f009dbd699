//! Core data model types for algodrill.
//!
//! These are the fundamental types the whole system uses to describe
//! practice questions: which problem family a question belongs to, how it
//! is generated, and how an evaluation verdict looks on the wire.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed set of practice-problem families the service can generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProblemKind {
    /// Adversarial tree search (minimax with pruning).
    TreeSearch,
    /// Two-player payoff matrices (pure equilibria).
    MatrixGame,
    /// Constraint graphs (coloring with propagation).
    ConstraintGraph,
    /// Probabilistic inference networks.
    ProbabilisticNetwork,
    /// Reinforcement-learning grids (value/Q iteration).
    SequentialDecision,
    /// Picking the right search strategy for a named problem.
    SearchStrategy,
}

impl ProblemKind {
    /// All kinds, in the order they appear in setup UIs and flag lists.
    pub const ALL: [ProblemKind; 6] = [
        ProblemKind::TreeSearch,
        ProblemKind::MatrixGame,
        ProblemKind::ConstraintGraph,
        ProblemKind::ProbabilisticNetwork,
        ProblemKind::SequentialDecision,
        ProblemKind::SearchStrategy,
    ];

    /// The path segment used by `/generate/{kind}` and `/evaluate/{kind}`.
    pub fn as_path(&self) -> &'static str {
        match self {
            ProblemKind::TreeSearch => "tree-search",
            ProblemKind::MatrixGame => "matrix-game",
            ProblemKind::ConstraintGraph => "constraint-graph",
            ProblemKind::ProbabilisticNetwork => "probabilistic-network",
            ProblemKind::SequentialDecision => "sequential-decision",
            ProblemKind::SearchStrategy => "search-strategy",
        }
    }
}

impl fmt::Display for ProblemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_path())
    }
}

impl FromStr for ProblemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tree-search" => Ok(ProblemKind::TreeSearch),
            "matrix-game" => Ok(ProblemKind::MatrixGame),
            "constraint-graph" => Ok(ProblemKind::ConstraintGraph),
            "probabilistic-network" => Ok(ProblemKind::ProbabilisticNetwork),
            "sequential-decision" => Ok(ProblemKind::SequentialDecision),
            "search-strategy" => Ok(ProblemKind::SearchStrategy),
            other => Err(format!("unknown problem kind: {other}")),
        }
    }
}

/// How a question's problem instance gets its parameters.
///
/// `Random` lets the server pick everything (the descriptor seed is
/// advisory); `Fixed` means the session intends to replay this exact seed,
/// e.g. when resuming or reviewing. The mode may be toggled before the
/// question is generated; it is frozen the instant generation begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    Random,
    Fixed,
}

impl GenerationMode {
    pub fn toggled(self) -> Self {
        match self {
            GenerationMode::Random => GenerationMode::Fixed,
            GenerationMode::Fixed => GenerationMode::Random,
        }
    }
}

/// One entry in a practice session.
///
/// The `kind` never changes after creation. The `seed` is a reproducibility
/// token independent of any server-side randomness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDescriptor {
    #[serde(rename = "type")]
    pub kind: ProblemKind,
    pub seed: u64,
    pub mode: GenerationMode,
}

impl QuestionDescriptor {
    /// The identity of the question this descriptor names.
    pub fn key(&self) -> QuestionKey {
        QuestionKey {
            kind: self.kind,
            seed: self.seed,
        }
    }
}

/// Identity of a single question: its kind plus its session seed.
///
/// Adapters compare this before committing any async result, so a response
/// that arrives after the player moved on is dropped instead of applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuestionKey {
    pub kind: ProblemKind,
    pub seed: u64,
}

impl fmt::Display for QuestionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.kind, self.seed)
    }
}

/// Verdict returned by `/evaluate/{kind}`.
///
/// The service names the correction field differently per kind
/// (`correct_answer`, `correct_value`, `correct_solution`); the aliases fold
/// them into one shape. The field is only present when the score is below
/// 100.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    /// Score in `[0, 100]`.
    pub percentage: u8,
    /// Human-readable explanation of the verdict.
    pub explanation: String,
    /// The correct answer, in a kind-specific shape.
    #[serde(
        default,
        alias = "correct_value",
        alias = "correct_solution",
        skip_serializing_if = "Option::is_none"
    )]
    pub correct_answer: Option<serde_json::Value>,
}

impl Evaluation {
    pub fn is_perfect(&self) -> bool {
        self.percentage == 100
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_display_and_parse() {
        assert_eq!(ProblemKind::TreeSearch.to_string(), "tree-search");
        assert_eq!(
            "matrix-game".parse::<ProblemKind>().unwrap(),
            ProblemKind::MatrixGame
        );
        assert_eq!(
            "Constraint-Graph".parse::<ProblemKind>().unwrap(),
            ProblemKind::ConstraintGraph
        );
        assert!("sudoku".parse::<ProblemKind>().is_err());
    }

    #[test]
    fn kind_serde_uses_kebab_case() {
        let json = serde_json::to_string(&ProblemKind::SequentialDecision).unwrap();
        assert_eq!(json, "\"sequential-decision\"");
        let kind: ProblemKind = serde_json::from_str("\"search-strategy\"").unwrap();
        assert_eq!(kind, ProblemKind::SearchStrategy);
    }

    #[test]
    fn descriptor_serde_roundtrip() {
        let descriptor = QuestionDescriptor {
            kind: ProblemKind::ProbabilisticNetwork,
            seed: 271_828,
            mode: GenerationMode::Fixed,
        };
        let json = serde_json::to_string(&descriptor).unwrap();
        assert!(json.contains("\"type\":\"probabilistic-network\""));
        assert!(json.contains("\"mode\":\"fixed\""));
        let back: QuestionDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, descriptor);
    }

    #[test]
    fn mode_toggles_both_ways() {
        assert_eq!(GenerationMode::Random.toggled(), GenerationMode::Fixed);
        assert_eq!(GenerationMode::Fixed.toggled(), GenerationMode::Random);
    }

    #[test]
    fn evaluation_accepts_aliased_correction_fields() {
        let by_value: Evaluation =
            serde_json::from_str(r#"{"percentage": 40, "explanation": "off", "correct_value": 0.32}"#)
                .unwrap();
        assert_eq!(by_value.correct_answer, Some(serde_json::json!(0.32)));

        let by_solution: Evaluation = serde_json::from_str(
            r#"{"percentage": 100, "explanation": "ok", "correct_solution": ["n0 Red"]}"#,
        )
        .unwrap();
        assert!(by_solution.is_perfect());
        assert!(by_solution.correct_answer.is_some());

        let absent: Evaluation =
            serde_json::from_str(r#"{"percentage": 100, "explanation": "ok"}"#).unwrap();
        assert!(absent.correct_answer.is_none());
    }
}
