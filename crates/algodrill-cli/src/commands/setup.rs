//! The `algodrill setup` command: plan and persist a new session.

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{Context, Result};

use algodrill_core::builder::build_descriptors;
use algodrill_core::model::ProblemKind;
use algodrill_core::session::{Session, SessionStore};
use algodrill_core::storage::FileStorage;
use algodrill_service::ServiceClient;

use crate::config::load_config_from;

pub async fn execute(
    questions: usize,
    kinds: Option<String>,
    fixed: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let enabled: HashSet<ProblemKind> = match kinds.as_deref() {
        None | Some("all") => ProblemKind::ALL.into_iter().collect(),
        Some(list) => list
            .split(',')
            .map(|raw| {
                raw.trim()
                    .parse::<ProblemKind>()
                    .map_err(|e| anyhow::anyhow!(e))
            })
            .collect::<Result<_>>()?,
    };

    let client = ServiceClient::with_timeout(&config.base_url, config.timeout_secs);
    let descriptors = build_descriptors(questions, &enabled, &client).await?;
    let mut session = Session::new(descriptors);

    if let Some(list) = &fixed {
        for raw in list.split(',') {
            let index: usize = raw
                .trim()
                .parse()
                .with_context(|| format!("invalid question index: '{}'", raw.trim()))?;
            session
                .toggle_mode(index)
                .with_context(|| format!("question index {index} out of range"))?;
        }
    }

    let store = SessionStore::new(FileStorage::new(&config.storage_dir));
    store.save(&session)?;

    println!("Planned {} questions:", session.len());
    println!("{}", super::session_table(&session, None));
    println!("Session saved. Start it with `algodrill run`.");
    Ok(())
}
