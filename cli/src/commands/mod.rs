mod generate;
mod helpers;
mod history;
mod ingredient;
mod theme;

use anyhow::{Result, bail};

use sous_core::coordinator::RequestCoordinator;
use sous_core::models::HistoryRecord;

pub(crate) use generate::cmd_generate;
pub(crate) use history::{cmd_clear_history, cmd_favorite, cmd_history, cmd_rate, cmd_show};
pub(crate) use ingredient::{
    cmd_ingredient_add, cmd_ingredient_clear, cmd_ingredient_list, cmd_ingredient_remove,
};
pub(crate) use theme::cmd_theme;

/// Find a history record by exact id, or by a prefix that matches exactly one
/// record (the short ids printed in tables).
pub(super) fn resolve_record(coord: &RequestCoordinator, id: &str) -> Result<Option<HistoryRecord>> {
    let id = id.trim();
    if id.is_empty() {
        return Ok(None);
    }
    if let Some(record) = coord.find(id) {
        return Ok(Some(record));
    }

    let mut matches: Vec<HistoryRecord> = coord
        .history(false)
        .into_iter()
        .filter(|r| r.id.starts_with(id))
        .collect();
    match matches.len() {
        0 => Ok(None),
        1 => Ok(matches.pop()),
        n => bail!("'{id}' matches {n} recipes. Use more characters of the id"),
    }
}
