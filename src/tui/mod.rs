//! Interactive history browser: fuzzy-searchable list of past analyses with the selected
//! report rendered alongside.

mod app;
mod events;
mod layout;
mod rendering;
mod report_view;
mod terminal;

use anyhow::Result;
pub use app::App;
pub use terminal::TerminalManager;

use crate::history::HistoryStore;
use crate::storage::KeyValueStore;

/// Run the browser until the user quits
pub fn run_interactive<S: KeyValueStore>(store: HistoryStore<S>) -> Result<()> {
    let mut app = App::new(store)?;

    let mut manager = TerminalManager::new()?;
    let res = app.run(manager.terminal_mut());
    manager.restore()?;

    res
}
