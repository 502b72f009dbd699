//! Subcommand implementations.

use comfy_table::{Cell, Table};

use algodrill_core::model::GenerationMode;
use algodrill_core::session::Session;

pub mod reset;
pub mod run;
pub mod setup;
pub mod status;

pub(crate) fn mode_label(mode: GenerationMode) -> &'static str {
    match mode {
        GenerationMode::Random => "random",
        GenerationMode::Fixed => "fixed",
    }
}

/// Render the session's question list; `active` marks the cursor row.
pub(crate) fn session_table(session: &Session, active: Option<usize>) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["", "#", "Kind", "Seed", "Mode"]);
    for (index, question) in session.questions.iter().enumerate() {
        let marker = if active == Some(index) { ">" } else { "" };
        table.add_row(vec![
            Cell::new(marker),
            Cell::new(index + 1),
            Cell::new(question.kind),
            Cell::new(question.seed),
            Cell::new(mode_label(question.mode)),
        ]);
    }
    table
}
