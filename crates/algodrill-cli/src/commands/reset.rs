//! The `algodrill reset` command: discard the stored session.

use std::path::PathBuf;

use anyhow::Result;

use algodrill_core::session::SessionStore;
use algodrill_core::storage::FileStorage;

use crate::config::load_config_from;

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let store = SessionStore::new(FileStorage::new(&config.storage_dir));

    if store.load().is_none() {
        println!("No active session.");
        return Ok(());
    }

    store.clear()?;
    println!("Session cleared. Plan a new one with `algodrill setup`.");
    Ok(())
}
