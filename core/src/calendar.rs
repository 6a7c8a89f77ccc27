// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::{BTreeMap, BTreeSet};

use jiff::civil::Date;
use uuid::Uuid;

use crate::{
    Config, DateWindow, DisplayMode, Error, EventDefinition, EventDraft, EventInstance,
    EventPatch, EventRepository, EventStore, JsonFileRepository, Query, Result, SkippedRecord,
    dates_with_matches, filter, group_by_date,
};

/// Calendar application core.
///
/// Owns the event store and writes the whole collection back to its
/// repository after every change.
pub struct Calendar {
    config: Config,
    store: EventStore,
    repository: Box<dyn EventRepository>,
}

impl Calendar {
    /// Opens the calendar stored at the configured events path.
    pub async fn new(mut config: Config) -> Result<Self> {
        config.normalize()?;
        let path = config
            .events_path
            .clone()
            .ok_or_else(|| Error::Config("events path is not set".to_string()))?;

        tracing::debug!(path = %path.display(), "opening calendar");
        Self::with_repository(config, JsonFileRepository::new(path)).await
    }

    /// Opens a calendar over any repository.
    pub async fn with_repository<R>(config: Config, repository: R) -> Result<Self>
    where
        R: EventRepository + 'static,
    {
        let records = repository.load().await?;
        let store = EventStore::from_records(records, config.conflict_policy);
        Ok(Self {
            config,
            store,
            repository: Box::new(repository),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    /// Stored event definitions in insertion order.
    pub fn events(&self) -> &[EventDefinition] {
        self.store.events()
    }

    /// Looks up an event by id or unique id prefix.
    pub fn get(&self, id: &str) -> Result<&EventDefinition> {
        self.store.resolve(id)
    }

    /// A blank draft on `date` at the configured default time.
    pub fn new_draft(&self, date: Date) -> EventDraft {
        EventDraft::new(date, self.config.default_time())
    }

    /// Adds a new event from the given draft.
    #[tracing::instrument(skip_all, fields(title = %draft.title, date = %draft.date))]
    pub async fn add(&mut self, draft: EventDraft) -> Result<EventDefinition> {
        let id = self.generate_id()?;
        let event = draft.into_definition(id);

        let mut store = self.store.clone();
        store.add(event.clone())?;
        self.commit(store).await?;

        tracing::info!(id = %event.id, "event added");
        self.get(&event.id).cloned()
    }

    /// Applies `patch` to the event matching `id`.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update(&mut self, id: &str, patch: &EventPatch) -> Result<EventDefinition> {
        let event = patch.apply_to(self.store.resolve(id)?);

        let mut store = self.store.clone();
        if !store.update(event.clone())? {
            return Err(Error::NotFound(id.to_string()));
        }
        self.commit(store).await?;

        tracing::info!(id = %event.id, "event updated");
        self.get(&event.id).cloned()
    }

    /// Removes the event matching `id` and returns it.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&mut self, id: &str) -> Result<EventDefinition> {
        let event = self.store.resolve(id)?.clone();

        let mut store = self.store.clone();
        store.delete(&event.id);
        self.commit(store).await?;

        tracing::info!(id = %event.id, "event deleted");
        Ok(event)
    }

    /// Moves a non-recurring event to `date`.
    #[tracing::instrument(skip(self))]
    pub async fn reschedule(&mut self, id: &str, date: Date) -> Result<EventDefinition> {
        let full_id = self.store.resolve(id)?.id.clone();

        let mut store = self.store.clone();
        if !store.reschedule(&full_id, date)? {
            return Err(Error::NotFound(id.to_string()));
        }
        self.commit(store).await?;

        tracing::info!(id = %full_id, "event rescheduled");
        self.get(&full_id).cloned()
    }

    /// Everything needed to render one month, with `query` applied.
    pub fn month_view(&self, year: i16, month: i8, query: &Query) -> Result<MonthView> {
        Ok(self.view(DateWindow::month(year, month)?, query))
    }

    /// Like [`month_view`](Self::month_view), over any window.
    pub fn view(&self, window: DateWindow, query: &Query) -> MonthView {
        let materialized = self.store.materialize(&window);
        let instances = filter(&materialized.instances, query);
        let matching_dates = dates_with_matches(&instances, query);
        MonthView {
            window,
            mode: DisplayMode::for_query(query),
            instances,
            matching_dates,
            skipped: materialized.skipped,
        }
    }

    /// Saves the updated store, keeping the old one if the save fails.
    async fn commit(&mut self, store: EventStore) -> Result<()> {
        self.repository.save(&store.to_records()).await?;
        self.store = store;
        Ok(())
    }

    fn generate_id(&self) -> Result<String> {
        let mut id = String::new();
        for _ in 0..16 {
            id = Uuid::new_v4().to_string();
            if self.store.get(&id).is_none() {
                return Ok(id);
            }
        }

        tracing::error!("failed to generate a unique id after multiple attempts");
        Err(Error::DuplicateId(id))
    }
}

impl std::fmt::Debug for Calendar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Calendar")
            .field("config", &self.config)
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

/// The occurrences shown for one window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthView {
    pub window: DateWindow,
    pub mode: DisplayMode,

    /// Occurrences passing the query, in materialization order.
    pub instances: Vec<EventInstance>,

    /// Days holding a match; empty unless a query is active.
    pub matching_dates: BTreeSet<Date>,

    /// Stored records left out of the view.
    pub skipped: Vec<SkippedRecord>,
}

impl MonthView {
    /// Instances grouped by occurrence date.
    pub fn by_date(&self) -> BTreeMap<Date, Vec<&EventInstance>> {
        group_by_date(&self.instances)
    }

    /// The days to display: the whole window, or only matching days while
    /// searching.
    pub fn visible_dates(&self) -> Vec<Date> {
        match self.mode {
            DisplayMode::FullMonth => self.window.days().collect(),
            DisplayMode::SearchResults => self.matching_dates.iter().copied().collect(),
        }
    }

    /// Whether a search is active and found nothing.
    pub fn has_no_results(&self) -> bool {
        self.mode == DisplayMode::SearchResults && self.instances.is_empty()
    }
}
