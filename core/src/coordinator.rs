use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::SousError;
use crate::generation::GenerationClient;
use crate::ledger::HistoryLedger;
use crate::models::{GenerationRequest, HistoryRecord, Preferences, validate_rating};
use crate::providers::{Clock, IdProvider, SystemClock, UuidProvider};

/// What became of one `request_recipe` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    /// The request was the latest one and its record is now active.
    Completed(HistoryRecord),
    /// The request was the latest one and failed; the message is now the
    /// visible error.
    Failed(String),
    /// A newer request started before this one finished. Nothing changed.
    Superseded,
}

/// Everything a rendering layer needs to draw the current state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoordinatorSnapshot {
    pub loading: bool,
    pub generation: u64,
    pub active_record_id: Option<String>,
    pub display: Option<String>,
    pub error: Option<String>,
    pub active_record: Option<HistoryRecord>,
    pub history_len: usize,
}

struct State {
    generation: u64,
    loading: bool,
    active_record_id: Option<String>,
    display: Option<String>,
    error: Option<String>,
    ledger: HistoryLedger,
}

/// Sequences recipe requests and owns the history ledger.
///
/// Each request captures a generation token when it starts. When it
/// finishes, it only touches shared state if no newer request has started in
/// the meantime, so only the latest request ever has a visible outcome. The
/// in-flight call of a superseded request is not aborted. The token check and
/// the ledger append happen under one lock, which is never held across an
/// await.
pub struct RequestCoordinator {
    client: GenerationClient,
    state: Mutex<State>,
    ids: Box<dyn IdProvider>,
    clock: Box<dyn Clock>,
}

impl RequestCoordinator {
    pub fn new(client: GenerationClient, ledger: HistoryLedger) -> Self {
        Self::with_providers(client, ledger, Box::new(UuidProvider), Box::new(SystemClock))
    }

    pub fn with_providers(
        client: GenerationClient,
        ledger: HistoryLedger,
        ids: Box<dyn IdProvider>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            client,
            state: Mutex::new(State {
                generation: 0,
                loading: false,
                active_record_id: None,
                display: None,
                error: None,
                ledger,
            }),
            ids,
            clock,
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub async fn request_recipe(
        &self,
        ingredients: Vec<String>,
        preferences: Preferences,
    ) -> RequestOutcome {
        let my_generation = {
            let mut state = self.lock();
            state.generation += 1;
            state.loading = true;
            state.error = None;
            state.generation
        };
        info!(
            generation = my_generation,
            ingredients = ingredients.len(),
            "requesting recipe"
        );

        let request = GenerationRequest {
            ingredient_names: ingredients,
            preferences,
        };
        let mut guard = InFlight {
            coordinator: self,
            generation: my_generation,
            armed: true,
        };
        let result = self.client.generate(&request).await;
        guard.armed = false;

        let mut state = self.lock();
        if state.generation != my_generation {
            debug!(
                generation = my_generation,
                current = state.generation,
                succeeded = result.is_ok(),
                "discarding superseded recipe result"
            );
            return RequestOutcome::Superseded;
        }

        state.loading = false;
        match result {
            Ok(text) => {
                let record =
                    HistoryRecord::new(self.ids.next_id(), text, &request, self.clock.now());
                if let Err(err) = state.ledger.append(record.clone()) {
                    warn!("could not record generated recipe: {err}");
                    let message = format!("Error: Could not save recipe. {err}");
                    state.error = Some(message.clone());
                    return RequestOutcome::Failed(message);
                }
                state.active_record_id = Some(record.id.clone());
                state.display = Some(record.recipe_text.clone());
                RequestOutcome::Completed(record)
            }
            Err(err) => {
                let message = format!("Error: Could not generate recipe. {err}");
                state.error = Some(message.clone());
                RequestOutcome::Failed(message)
            }
        }
    }

    /// Rate the active record, returning it as updated. `Ok(None)` when
    /// nothing is active.
    pub fn rate(&self, rating: u8) -> Result<Option<HistoryRecord>, SousError> {
        let rating = validate_rating(rating)?;
        let mut state = self.lock();
        let Some(id) = state.active_record_id.clone() else {
            return Ok(None);
        };
        if !state.ledger.set_rating(&id, rating)? {
            return Ok(None);
        }
        Ok(state.ledger.find_by_id(&id).cloned())
    }

    /// Toggle favorite on the active record, returning its id and the new
    /// value.
    pub fn toggle_favorite(&self) -> Option<(String, bool)> {
        let mut state = self.lock();
        let id = state.active_record_id.clone()?;
        let is_favorite = state.ledger.toggle_favorite(&id)?;
        Some((id, is_favorite))
    }

    /// Make a history record the active one and display its text.
    pub fn select_history_record(&self, id: &str) -> Option<HistoryRecord> {
        let mut state = self.lock();
        let record = state.ledger.find_by_id(id)?.clone();
        state.active_record_id = Some(record.id.clone());
        state.display = Some(record.recipe_text.clone());
        Some(record)
    }

    /// Leave the recipe view without touching the history.
    pub fn clear_selection(&self) {
        let mut state = self.lock();
        state.active_record_id = None;
        state.display = None;
    }

    pub fn clear_history(&self) {
        let mut state = self.lock();
        state.ledger.clear();
        state.active_record_id = None;
        state.display = None;
        info!("recipe history cleared");
    }

    #[must_use]
    pub fn history(&self, favorites_only: bool) -> Vec<HistoryRecord> {
        self.lock().ledger.newest_first(favorites_only)
    }

    #[must_use]
    pub fn find(&self, id: &str) -> Option<HistoryRecord> {
        self.lock().ledger.find_by_id(id).cloned()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    #[must_use]
    pub fn snapshot(&self) -> CoordinatorSnapshot {
        let state = self.lock();
        let active_record = state
            .active_record_id
            .as_deref()
            .and_then(|id| state.ledger.find_by_id(id))
            .cloned();
        CoordinatorSnapshot {
            loading: state.loading,
            generation: state.generation,
            active_record_id: state.active_record_id.clone(),
            display: state.display.clone(),
            error: state.error.clone(),
            active_record,
            history_len: state.ledger.len(),
        }
    }
}

/// Clears `loading` if a request future is dropped before its call returns
/// and no newer request has started since.
struct InFlight<'a> {
    coordinator: &'a RequestCoordinator,
    generation: u64,
    armed: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = self.coordinator.lock();
        if state.generation == self.generation {
            state.loading = false;
        }
        debug!(generation = self.generation, "recipe request dropped before completion");
    }
}
