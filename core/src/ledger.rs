use std::collections::HashSet;

use tracing::warn;

use crate::error::SousError;
use crate::models::{HistoryRecord, MAX_RATING, validate_rating};
use crate::store::{HISTORY_KEY, PersistentStore};

/// Chronological, persisted recipe history.
///
/// Every mutation updates the in-memory sequence first and then writes the
/// whole ledger back through the store.
pub struct HistoryLedger {
    records: Vec<HistoryRecord>,
    store: PersistentStore,
}

impl HistoryLedger {
    /// Load the ledger persisted in `store`. Missing or corrupt content yields
    /// an empty ledger.
    #[must_use]
    pub fn load(store: PersistentStore) -> Self {
        let loaded: Vec<HistoryRecord> = store.load(HISTORY_KEY, Vec::new());
        let records = sanitize(loaded);
        Self { records, store }
    }

    pub fn append(&mut self, record: HistoryRecord) -> Result<(), SousError> {
        if self.find_by_id(&record.id).is_some() {
            return Err(SousError::invalid(format!(
                "History already contains a record with id '{}'",
                record.id
            )));
        }
        validate_rating(record.rating)?;
        self.records.push(record);
        self.persist();
        Ok(())
    }

    /// Returns `Ok(false)` when no record has `id`.
    pub fn set_rating(&mut self, id: &str, rating: u8) -> Result<bool, SousError> {
        let rating = validate_rating(rating)?;
        let Some(record) = self.records.iter_mut().find(|r| r.id == id) else {
            return Ok(false);
        };
        record.rating = rating;
        self.persist();
        Ok(true)
    }

    /// Flip the favorite flag, returning the new value, or `None` when no
    /// record has `id`.
    pub fn toggle_favorite(&mut self, id: &str) -> Option<bool> {
        let record = self.records.iter_mut().find(|r| r.id == id)?;
        record.is_favorite = !record.is_favorite;
        let now_favorite = record.is_favorite;
        self.persist();
        Some(now_favorite)
    }

    #[must_use]
    pub fn filter<P>(&self, predicate: P) -> Vec<HistoryRecord>
    where
        P: Fn(&HistoryRecord) -> bool,
    {
        self.records.iter().filter(|r| predicate(r)).cloned().collect()
    }

    /// Most recent first, optionally favorites only.
    #[must_use]
    pub fn newest_first(&self, favorites_only: bool) -> Vec<HistoryRecord> {
        let mut records = self.filter(|r| !favorites_only || r.is_favorite);
        records.reverse();
        records
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.persist();
    }

    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&HistoryRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    #[must_use]
    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn persist(&self) {
        self.store.save(HISTORY_KEY, &self.records);
    }
}

/// Drop duplicate ids (first wins) and clamp out-of-range ratings from
/// hand-edited or foreign data.
fn sanitize(records: Vec<HistoryRecord>) -> Vec<HistoryRecord> {
    let mut seen = HashSet::new();
    let mut clean = Vec::with_capacity(records.len());
    for mut record in records {
        if !seen.insert(record.id.clone()) {
            warn!(id = %record.id, "dropping duplicate history record");
            continue;
        }
        if record.rating > MAX_RATING {
            warn!(id = %record.id, rating = record.rating, "clamping stored rating");
            record.rating = MAX_RATING;
        }
        clean.push(record);
    }
    clean
}
