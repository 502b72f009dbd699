//! Two-player matrix games: find (or rule out) a pure equilibrium.

use serde::{Deserialize, Serialize};

use algodrill_core::error::EngineError;
use algodrill_core::model::ProblemKind;

use crate::adapter::{ProblemFamily, ProblemText};

pub struct MatrixGame;

#[derive(Debug, Clone, Serialize)]
pub struct MatrixGameConfig {
    pub random_size: bool,
    pub rows: Option<u32>,
    pub cols: Option<u32>,
}

impl Default for MatrixGameConfig {
    fn default() -> Self {
        Self {
            random_size: true,
            rows: None,
            cols: None,
        }
    }
}

/// Payoff matrix: `grid[row][col] = (payoff_p1, payoff_p2)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoffMatrix {
    pub rows: u32,
    pub cols: u32,
    pub grid: Vec<Vec<(i64, i64)>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatrixGameInstance {
    pub seed: u64,
    pub matrix: PayoffMatrix,
    pub text: ProblemText,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixGameEffective {
    pub rows: u32,
    pub cols: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatrixGameAnswer {
    pub has_equilibrium: bool,
    /// `(row, col)`, required when `has_equilibrium`.
    pub equilibrium_point: Option<(u32, u32)>,
}

#[derive(Debug, Serialize)]
pub struct MatrixGameGenerateRequest {
    pub seed: u64,
    pub random_size: bool,
    pub rows: Option<u32>,
    pub cols: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct MatrixGameEvaluateRequest {
    pub problem_seed: u64,
    pub has_equilibrium: bool,
    pub equilibrium_point: Option<(u32, u32)>,
    pub rows: u32,
    pub cols: u32,
}

impl ProblemFamily for MatrixGame {
    const KIND: ProblemKind = ProblemKind::MatrixGame;

    type Config = MatrixGameConfig;
    type Instance = MatrixGameInstance;
    type Effective = MatrixGameEffective;
    type Answer = MatrixGameAnswer;
    type GenerateRequest = MatrixGameGenerateRequest;
    type EvaluateRequest = MatrixGameEvaluateRequest;

    fn generate_request(seed: u64, config: &Self::Config) -> Self::GenerateRequest {
        MatrixGameGenerateRequest {
            seed,
            random_size: config.random_size,
            rows: if config.random_size { None } else { config.rows },
            cols: if config.random_size { None } else { config.cols },
        }
    }

    fn problem_seed(instance: &Self::Instance) -> u64 {
        instance.seed
    }

    fn effective(_config: &Self::Config, instance: &Self::Instance) -> Self::Effective {
        MatrixGameEffective {
            rows: instance.matrix.rows,
            cols: instance.matrix.cols,
        }
    }

    fn validate(answer: &Self::Answer, instance: &Self::Instance) -> Result<(), EngineError> {
        match (answer.has_equilibrium, answer.equilibrium_point) {
            (true, None) => Err(EngineError::Validation(
                "an equilibrium answer needs its (row, col) coordinates".into(),
            )),
            (true, Some((row, col))) => {
                if row >= instance.matrix.rows || col >= instance.matrix.cols {
                    return Err(EngineError::Validation(format!(
                        "({row}, {col}) lies outside the {}x{} matrix",
                        instance.matrix.rows, instance.matrix.cols
                    )));
                }
                Ok(())
            }
            (false, _) => Ok(()),
        }
    }

    fn evaluate_request(
        problem_seed: u64,
        answer: &Self::Answer,
        effective: &Self::Effective,
    ) -> Self::EvaluateRequest {
        MatrixGameEvaluateRequest {
            problem_seed,
            has_equilibrium: answer.has_equilibrium,
            equilibrium_point: if answer.has_equilibrium {
                answer.equilibrium_point
            } else {
                None
            },
            rows: effective.rows,
            cols: effective.cols,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance(rows: u32, cols: u32) -> MatrixGameInstance {
        serde_json::from_value(serde_json::json!({
            "seed": 3,
            "matrix": {
                "rows": rows,
                "cols": cols,
                "grid": vec![vec![(0i64, 0i64); cols as usize]; rows as usize]
            },
            "text": { "title": "t", "description": "d", "requirement": "r" }
        }))
        .unwrap()
    }

    #[test]
    fn equilibrium_claim_requires_coordinates() {
        let answer = MatrixGameAnswer {
            has_equilibrium: true,
            equilibrium_point: None,
        };
        assert!(matches!(
            MatrixGame::validate(&answer, &instance(3, 3)),
            Err(EngineError::Validation(_))
        ));
    }

    #[test]
    fn out_of_bounds_coordinates_are_rejected() {
        let answer = MatrixGameAnswer {
            has_equilibrium: true,
            equilibrium_point: Some((3, 0)),
        };
        assert!(MatrixGame::validate(&answer, &instance(3, 3)).is_err());
        let inside = MatrixGameAnswer {
            has_equilibrium: true,
            equilibrium_point: Some((2, 2)),
        };
        assert!(MatrixGame::validate(&inside, &instance(3, 3)).is_ok());
    }

    #[test]
    fn no_equilibrium_needs_no_point() {
        let answer = MatrixGameAnswer {
            has_equilibrium: false,
            equilibrium_point: None,
        };
        assert!(MatrixGame::validate(&answer, &instance(2, 2)).is_ok());
    }

    #[test]
    fn evaluate_request_carries_effective_dimensions() {
        let request = MatrixGame::evaluate_request(
            17,
            &MatrixGameAnswer {
                has_equilibrium: true,
                equilibrium_point: Some((1, 2)),
            },
            &MatrixGameEffective { rows: 4, cols: 5 },
        );
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["rows"], 4);
        assert_eq!(json["cols"], 5);
        assert_eq!(json["equilibrium_point"], serde_json::json!([1, 2]));
    }

    #[test]
    fn stray_point_is_stripped_when_no_equilibrium_claimed() {
        let request = MatrixGame::evaluate_request(
            17,
            &MatrixGameAnswer {
                has_equilibrium: false,
                equilibrium_point: Some((0, 0)),
            },
            &MatrixGameEffective { rows: 2, cols: 2 },
        );
        assert_eq!(request.equilibrium_point, None);
    }
}
