//! Session report types with JSON persistence.
//!
//! A report accumulates one outcome per answered question and the aggregate
//! score for the whole run. It is a byproduct of playing a session, not
//! part of the durable session state.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{Evaluation, ProblemKind};

/// Outcome of one answered question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionOutcome {
    /// Zero-based position in the session.
    pub index: usize,
    pub kind: ProblemKind,
    /// Session seed of the question.
    pub seed: u64,
    /// `None` when the question was skipped without an evaluation.
    pub evaluation: Option<Evaluation>,
}

/// A complete session report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// One entry per question, in session order.
    pub outcomes: Vec<QuestionOutcome>,
}

impl SessionReport {
    pub fn new(outcomes: Vec<QuestionOutcome>) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            outcomes,
        }
    }

    /// Number of questions that got an evaluation.
    pub fn answered(&self) -> usize {
        self.outcomes.iter().filter(|o| o.evaluation.is_some()).count()
    }

    /// Average percentage over answered questions, or `None` if nothing was
    /// answered.
    pub fn average_percentage(&self) -> Option<f64> {
        let scores: Vec<f64> = self
            .outcomes
            .iter()
            .filter_map(|o| o.evaluation.as_ref())
            .map(|e| f64::from(e.percentage))
            .collect();
        if scores.is_empty() {
            return None;
        }
        Some(scores.iter().sum::<f64>() / scores.len() as f64)
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(index: usize, percentage: Option<u8>) -> QuestionOutcome {
        QuestionOutcome {
            index,
            kind: ProblemKind::TreeSearch,
            seed: index as u64,
            evaluation: percentage.map(|p| Evaluation {
                percentage: p,
                explanation: "test".into(),
                correct_answer: None,
            }),
        }
    }

    #[test]
    fn average_over_answered_questions_only() {
        let report = SessionReport::new(vec![
            outcome(0, Some(100)),
            outcome(1, Some(50)),
            outcome(2, None),
        ]);
        assert_eq!(report.answered(), 2);
        assert_eq!(report.average_percentage(), Some(75.0));
    }

    #[test]
    fn empty_report_has_no_average() {
        let report = SessionReport::new(vec![outcome(0, None)]);
        assert_eq!(report.answered(), 0);
        assert_eq!(report.average_percentage(), None);
    }

    #[test]
    fn report_saves_as_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports/session.json");
        let report = SessionReport::new(vec![outcome(0, Some(80))]);
        report.save_json(&path).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        let parsed: SessionReport = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.id, report.id);
        assert_eq!(parsed.outcomes.len(), 1);
    }
}
