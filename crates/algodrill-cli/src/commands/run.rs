//! The `algodrill run` command: play the stored session to completion.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use comfy_table::{Cell, Table};

use algodrill_adapters::constraint_graph::ConstraintGraph;
use algodrill_adapters::matrix_game::MatrixGame;
use algodrill_adapters::probabilistic_network::ProbabilisticNetwork;
use algodrill_adapters::search_strategy::SearchStrategy;
use algodrill_adapters::sequential_decision::SequentialDecision;
use algodrill_adapters::tree_search::TreeSearch;
use algodrill_adapters::QuestionAdapter;
use algodrill_core::error::EngineError;
use algodrill_core::model::{Evaluation, ProblemKind};
use algodrill_core::player::{ActiveQuestion, PlayerState, SessionPlayer};
use algodrill_core::report::{QuestionOutcome, SessionReport};
use algodrill_core::session::SessionStore;
use algodrill_core::storage::FileStorage;
use algodrill_service::ServiceClient;

use crate::config::load_config_from;
use crate::play::Interactive;
use crate::prompt;

pub async fn execute(report_path: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let store = SessionStore::new(FileStorage::new(&config.storage_dir));
    let mut player = SessionPlayer::load(store);

    match player.state() {
        PlayerState::NoSession => {
            println!("No active session. Plan one with `algodrill setup`.");
            return Ok(());
        }
        PlayerState::Completed => {
            println!("Session already complete. Clear it with `algodrill reset`.");
            return Ok(());
        }
        PlayerState::InProgress(_) => {}
    }

    let client = Arc::new(ServiceClient::with_timeout(
        &config.base_url,
        config.timeout_secs,
    ));
    let mut outcomes = Vec::new();

    while let Some(active) = player.current() {
        println!();
        println!(
            "=== Question {}/{}: {} (seed {}) ===",
            active.index + 1,
            active.total,
            active.descriptor.kind,
            active.descriptor.seed
        );
        let evaluation = play_question(&client, &active).await?;
        outcomes.push(QuestionOutcome {
            index: active.index,
            kind: active.descriptor.kind,
            seed: active.descriptor.seed,
            evaluation,
        });
        player.next()?;
    }

    let report = SessionReport::new(outcomes);
    print_summary(&report);
    if let Some(path) = &report_path {
        report.save_json(path)?;
        println!("Report saved to {}", path.display());
    }
    println!("Run `algodrill reset` to return to setup.");
    Ok(())
}

async fn play_question(
    client: &Arc<ServiceClient>,
    active: &ActiveQuestion,
) -> Result<Option<Evaluation>> {
    match active.descriptor.kind {
        ProblemKind::TreeSearch => play::<TreeSearch>(client, active).await,
        ProblemKind::MatrixGame => play::<MatrixGame>(client, active).await,
        ProblemKind::ConstraintGraph => play::<ConstraintGraph>(client, active).await,
        ProblemKind::ProbabilisticNetwork => play::<ProbabilisticNetwork>(client, active).await,
        ProblemKind::SequentialDecision => play::<SequentialDecision>(client, active).await,
        ProblemKind::SearchStrategy => play::<SearchStrategy>(client, active).await,
    }
}

/// Drive one question end to end. Returns `None` when the question was
/// skipped without an evaluation.
async fn play<F: Interactive>(
    client: &Arc<ServiceClient>,
    active: &ActiveQuestion,
) -> Result<Option<Evaluation>> {
    let adapter = QuestionAdapter::<F>::new(Arc::clone(client), active.descriptor.seed);
    let custom_config = if active.auto_generate {
        None
    } else {
        Some(F::prompt_config()?)
    };

    let instance = loop {
        // Random questions go through the guarded auto path; the guard
        // re-arms on failure, so the retry loop below works for both.
        let attempt = match &custom_config {
            Some(config) => adapter.generate(config).await,
            None => adapter.generate_default().await,
        };
        match attempt {
            Ok(Some(instance)) => break instance,
            Ok(None) => return Ok(None),
            Err(e) if e.is_retryable() => {
                eprintln!("generation failed: {e}");
                if !prompt::read_bool("Retry")? {
                    println!("Question skipped.");
                    return Ok(None);
                }
            }
            Err(e @ (EngineError::Generation(_) | EngineError::Evaluation(_))) => {
                // The service rejected the request outright; retrying the
                // same call cannot help, but the session must keep going.
                eprintln!("generation failed: {e}");
                println!("Question skipped.");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        }
    };

    F::show(&instance);

    loop {
        let answer = F::prompt_answer(&instance)?;
        match adapter.evaluate(&answer).await {
            Ok(Some(evaluation)) => {
                print_verdict(&evaluation);
                return Ok(Some(evaluation));
            }
            Ok(None) => return Ok(None),
            Err(EngineError::Validation(message)) => eprintln!("{message}"),
            Err(e) if e.is_retryable() => {
                eprintln!("evaluation failed: {e}");
                if !prompt::read_bool("Retry")? {
                    println!("Question skipped.");
                    return Ok(None);
                }
            }
            Err(e @ (EngineError::Generation(_) | EngineError::Evaluation(_))) => {
                eprintln!("evaluation failed: {e}");
                println!("Question skipped.");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        }
    }
}

fn print_verdict(evaluation: &Evaluation) {
    println!("Score: {}%", evaluation.percentage);
    println!("{}", evaluation.explanation);
    if let Some(correct) = &evaluation.correct_answer {
        println!("Correct answer: {correct}");
    }
}

fn print_summary(report: &SessionReport) {
    let mut table = Table::new();
    table.set_header(vec!["#", "Kind", "Seed", "Score"]);
    for outcome in &report.outcomes {
        let score = match &outcome.evaluation {
            Some(e) => format!("{}%", e.percentage),
            None => "skipped".to_string(),
        };
        table.add_row(vec![
            Cell::new(outcome.index + 1),
            Cell::new(outcome.kind),
            Cell::new(outcome.seed),
            Cell::new(score),
        ]);
    }
    println!("\n{table}");
    match report.average_percentage() {
        Some(average) => println!(
            "Answered {}/{}, average score {average:.1}%",
            report.answered(),
            report.outcomes.len()
        ),
        None => println!("No questions answered."),
    }
}
