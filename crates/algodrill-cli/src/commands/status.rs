//! The `algodrill status` command.

use std::path::PathBuf;

use anyhow::Result;

use algodrill_core::session::SessionStore;
use algodrill_core::storage::FileStorage;

use crate::config::load_config_from;

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let store = SessionStore::new(FileStorage::new(&config.storage_dir));

    let Some(session) = store.load() else {
        println!("No active session. Plan one with `algodrill setup`.");
        return Ok(());
    };

    if session.is_empty() || session.is_finished() {
        println!(
            "Session complete ({} questions). Clear it with `algodrill reset`.",
            session.len()
        );
        return Ok(());
    }

    println!("Question {} of {}:", session.cursor + 1, session.len());
    println!("{}", super::session_table(&session, Some(session.cursor)));
    Ok(())
}
