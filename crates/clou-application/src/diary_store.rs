//! Diary store.
//!
//! Caches the user's diary entries, tracks the selected calendar month, and
//! derives the groupings the calendar views need. Entry dates are plain
//! `NaiveDate`s, so all grouping and ordering is the `YYYY-MM-DD` ordering
//! the backend uses.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

use clou_core::diary::{DiaryApi, DiaryDraft, DiaryEntry};
use clou_core::emotion::Emotion;
use clou_core::error::Result;

use crate::inflight::InFlightTracker;

/// Fetch-ticket key for the entry collection.
const ENTRIES_KEY: &str = "diary";
/// Fetch-ticket key for the single selected-entry slot.
const CURRENT_KEY: &str = "diary:current";

#[derive(Debug, Clone)]
struct DiaryState {
    entries: Vec<DiaryEntry>,
    selected_year: i32,
    selected_month: u32,
    current: Option<DiaryEntry>,
    loading: bool,
    error: Option<String>,
}

impl Default for DiaryState {
    fn default() -> Self {
        let today = Utc::now().date_naive();
        Self {
            entries: Vec::new(),
            selected_year: today.year(),
            selected_month: today.month(),
            current: None,
            loading: false,
            error: None,
        }
    }
}

/// Read-only view of the diary store.
#[derive(Debug, Clone, Serialize)]
pub struct DiarySnapshot {
    pub entries: Vec<DiaryEntry>,
    pub selected_year: i32,
    pub selected_month: u32,
    pub current: Option<DiaryEntry>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Store for diary entries and their calendar groupings.
#[derive(Clone)]
pub struct DiaryStore {
    api: Arc<dyn DiaryApi>,
    state: Arc<RwLock<DiaryState>>,
    inflight: InFlightTracker,
}

impl DiaryStore {
    pub fn new(api: Arc<dyn DiaryApi>) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(DiaryState::default())),
            inflight: InFlightTracker::new(),
        }
    }

    pub async fn snapshot(&self) -> DiarySnapshot {
        let state = self.state.read().await;
        DiarySnapshot {
            entries: state.entries.clone(),
            selected_year: state.selected_year,
            selected_month: state.selected_month,
            current: state.current.clone(),
            loading: state.loading,
            error: state.error.clone(),
        }
    }

    pub async fn clear_error(&self) {
        self.state.write().await.error = None;
    }

    /// Marks an entry as selected without fetching.
    pub async fn set_current(&self, entry: Option<DiaryEntry>) {
        self.state.write().await.current = entry;
    }

    async fn begin(&self) {
        let mut state = self.state.write().await;
        state.loading = true;
        state.error = None;
    }

    async fn fail(&self, error: &clou_core::ClouError) {
        let mut state = self.state.write().await;
        state.loading = false;
        state.error = Some(error.to_string());
    }

    /// Fetches every entry of the current user.
    pub async fn fetch_all(&self) -> Result<Vec<DiaryEntry>> {
        let ticket = self.inflight.begin_fetch(ENTRIES_KEY);
        self.begin().await;

        match self.api.list().await {
            Ok(entries) => {
                if self.inflight.is_current(&ticket) {
                    let mut state = self.state.write().await;
                    state.entries = entries.clone();
                    state.loading = false;
                } else {
                    tracing::debug!("stale diary list dropped");
                }
                Ok(entries)
            }
            Err(e) => {
                if self.inflight.is_current(&ticket) {
                    self.fail(&e).await;
                }
                Err(e)
            }
        }
    }

    /// Fetches the entries of the selected month.
    pub async fn fetch_monthly(&self) -> Result<Vec<DiaryEntry>> {
        let (year, month) = {
            let state = self.state.read().await;
            (state.selected_year, state.selected_month)
        };

        let ticket = self.inflight.begin_fetch(ENTRIES_KEY);
        self.begin().await;

        match self.api.monthly(year, month).await {
            Ok(entries) => {
                if self.inflight.is_current(&ticket) {
                    let mut state = self.state.write().await;
                    state.entries = entries.clone();
                    state.loading = false;
                } else {
                    tracing::debug!(year, month, "stale monthly diary list dropped");
                }
                Ok(entries)
            }
            Err(e) => {
                if self.inflight.is_current(&ticket) {
                    self.fail(&e).await;
                }
                Err(e)
            }
        }
    }

    /// Selects a calendar month and refetches its entries.
    pub async fn set_selected_year_month(&self, year: i32, month: u32) -> Result<Vec<DiaryEntry>> {
        {
            let mut state = self.state.write().await;
            state.selected_year = year;
            state.selected_month = month;
        }
        self.fetch_monthly().await
    }

    /// Fetches one entry into the selected slot.
    pub async fn fetch_entry(&self, id: i64) -> Result<DiaryEntry> {
        let ticket = self.inflight.begin_fetch(CURRENT_KEY);
        self.begin().await;

        match self.api.get(id).await {
            Ok(entry) => {
                if self.inflight.is_current(&ticket) {
                    let mut state = self.state.write().await;
                    state.current = Some(entry.clone());
                    state.loading = false;
                }
                Ok(entry)
            }
            Err(e) => {
                if self.inflight.is_current(&ticket) {
                    self.fail(&e).await;
                }
                Err(e)
            }
        }
    }

    /// Creates an entry, appends it to the collection and selects it.
    ///
    /// A draft without a date fails locally with a validation error before
    /// any network call is made.
    pub async fn create(&self, draft: &DiaryDraft) -> Result<DiaryEntry> {
        draft.validate_for_create()?;

        let lock = self.inflight.mutation_lock("diary:new");
        let _guard = lock.lock().await;

        self.begin().await;
        match self.api.create(draft).await {
            Ok(entry) => {
                let mut state = self.state.write().await;
                state.loading = false;
                if !state.entries.iter().any(|e| e.id == entry.id) {
                    state.entries.push(entry.clone());
                }
                state.current = Some(entry.clone());
                Ok(entry)
            }
            Err(e) => {
                self.fail(&e).await;
                Err(e)
            }
        }
    }

    /// Updates an entry and replaces it in the collection by id.
    pub async fn update(&self, id: i64, draft: &DiaryDraft) -> Result<DiaryEntry> {
        let lock = self.inflight.mutation_lock(&format!("diary:{}", id));
        let _guard = lock.lock().await;

        self.begin().await;
        match self.api.update(id, draft).await {
            Ok(entry) => {
                let mut state = self.state.write().await;
                state.loading = false;
                if let Some(existing) = state.entries.iter_mut().find(|e| e.id == id) {
                    *existing = entry.clone();
                }
                if state.current.as_ref().is_some_and(|c| c.id == id) {
                    state.current = Some(entry.clone());
                }
                Ok(entry)
            }
            Err(e) => {
                self.fail(&e).await;
                Err(e)
            }
        }
    }

    /// Deletes an entry and removes it from the collection by id.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let lock = self.inflight.mutation_lock(&format!("diary:{}", id));
        let _guard = lock.lock().await;

        self.begin().await;
        match self.api.delete(id).await {
            Ok(()) => {
                let mut state = self.state.write().await;
                state.loading = false;
                state.entries.retain(|e| e.id != id);
                if state.current.as_ref().is_some_and(|c| c.id == id) {
                    state.current = None;
                }
                Ok(())
            }
            Err(e) => {
                self.fail(&e).await;
                Err(e)
            }
        }
    }

    // ============================================================================
    // Derived views
    // ============================================================================

    /// Entries falling in the selected month.
    pub async fn monthly_entries(&self) -> Vec<DiaryEntry> {
        let state = self.state.read().await;
        state
            .entries
            .iter()
            .filter(|e| e.is_in_month(state.selected_year, state.selected_month))
            .cloned()
            .collect()
    }

    /// All entries grouped by day, ordered by date.
    pub async fn entries_by_date(&self) -> BTreeMap<NaiveDate, Vec<DiaryEntry>> {
        let state = self.state.read().await;
        let mut grouped: BTreeMap<NaiveDate, Vec<DiaryEntry>> = BTreeMap::new();
        for entry in &state.entries {
            grouped.entry(entry.date).or_default().push(entry.clone());
        }
        grouped
    }

    /// The days of the selected month that have at least one entry, sorted.
    pub async fn dates_with_entries(&self) -> Vec<NaiveDate> {
        let state = self.state.read().await;
        let mut dates: Vec<NaiveDate> = state
            .entries
            .iter()
            .filter(|e| e.is_in_month(state.selected_year, state.selected_month))
            .map(|e| e.date)
            .collect();
        dates.sort();
        dates.dedup();
        dates
    }

    /// Emotion badge per day for the calendar. When an entry carries only
    /// the emotion id, a bare [`Emotion`] is synthesized around it.
    pub async fn emotions_by_date(&self) -> BTreeMap<NaiveDate, Emotion> {
        let state = self.state.read().await;
        let mut map = BTreeMap::new();
        for entry in &state.entries {
            let emotion = match (&entry.emotion_detail, entry.emotion) {
                (Some(detail), _) => detail.clone(),
                (None, Some(id)) => Emotion {
                    id,
                    name: String::new(),
                    description: String::new(),
                },
                (None, None) => continue,
            };
            map.insert(entry.date, emotion);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex as StdMutex;

    use async_trait::async_trait;
    use clou_core::ClouError;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(id: i64, on: NaiveDate, note: &str) -> DiaryEntry {
        DiaryEntry {
            id,
            date: on,
            note: note.to_string(),
            emotion: None,
            emotion_detail: None,
            movie: None,
            movie_detail: None,
            username: None,
            nickname: None,
            created_at: None,
        }
    }

    /// In-memory diary backend.
    #[derive(Default)]
    struct FakeDiaryApi {
        entries: StdMutex<Vec<DiaryEntry>>,
        next_id: StdMutex<i64>,
        fail_mutations: bool,
        calls: StdMutex<usize>,
    }

    impl FakeDiaryApi {
        fn with_entries(entries: Vec<DiaryEntry>) -> Self {
            let next = entries.iter().map(|e| e.id).max().unwrap_or(0) + 1;
            Self {
                entries: StdMutex::new(entries),
                next_id: StdMutex::new(next),
                ..Default::default()
            }
        }

        fn call_count(&self) -> usize {
            *self.calls.lock().unwrap()
        }

        fn tick(&self) {
            *self.calls.lock().unwrap() += 1;
        }
    }

    #[async_trait]
    impl DiaryApi for FakeDiaryApi {
        async fn list(&self) -> Result<Vec<DiaryEntry>> {
            self.tick();
            Ok(self.entries.lock().unwrap().clone())
        }

        async fn monthly(&self, year: i32, month: u32) -> Result<Vec<DiaryEntry>> {
            self.tick();
            Ok(self
                .entries
                .lock()
                .unwrap()
                .iter()
                .filter(|e| e.is_in_month(year, month))
                .cloned()
                .collect())
        }

        async fn get(&self, id: i64) -> Result<DiaryEntry> {
            self.tick();
            self.entries
                .lock()
                .unwrap()
                .iter()
                .find(|e| e.id == id)
                .cloned()
                .ok_or_else(|| ClouError::server(404, "not found"))
        }

        async fn create(&self, draft: &DiaryDraft) -> Result<DiaryEntry> {
            self.tick();
            if self.fail_mutations {
                return Err(ClouError::server(500, "boom"));
            }
            let mut next_id = self.next_id.lock().unwrap();
            let created = DiaryEntry {
                id: *next_id,
                date: draft.date.expect("validated by the store"),
                note: draft.note.clone(),
                emotion: draft.emotion,
                emotion_detail: None,
                movie: draft.movie,
                movie_detail: None,
                username: None,
                nickname: None,
                created_at: None,
            };
            *next_id += 1;
            self.entries.lock().unwrap().push(created.clone());
            Ok(created)
        }

        async fn update(&self, id: i64, draft: &DiaryDraft) -> Result<DiaryEntry> {
            self.tick();
            if self.fail_mutations {
                return Err(ClouError::server(500, "boom"));
            }
            let mut entries = self.entries.lock().unwrap();
            let existing = entries
                .iter_mut()
                .find(|e| e.id == id)
                .ok_or_else(|| ClouError::server(404, "not found"))?;
            if let Some(new_date) = draft.date {
                existing.date = new_date;
            }
            existing.note = draft.note.clone();
            Ok(existing.clone())
        }

        async fn delete(&self, id: i64) -> Result<()> {
            self.tick();
            if self.fail_mutations {
                return Err(ClouError::server(500, "boom"));
            }
            self.entries.lock().unwrap().retain(|e| e.id != id);
            Ok(())
        }
    }

    fn store_with(api: FakeDiaryApi) -> (DiaryStore, Arc<FakeDiaryApi>) {
        let api = Arc::new(api);
        (DiaryStore::new(api.clone()), api)
    }

    #[tokio::test]
    async fn test_create_appends_and_selects() {
        let (store, _) = store_with(FakeDiaryApi::default());

        let draft = DiaryDraft::for_date(date(2024, 5, 1)).with_note("x");
        store.create(&draft).await.unwrap();

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.entries.len(), 1);
        assert_eq!(snapshot.current.as_ref().unwrap().date, date(2024, 5, 1));
        assert_eq!(snapshot.current.unwrap().note, "x");
    }

    #[tokio::test]
    async fn test_create_without_date_fails_before_any_call() {
        let (store, api) = store_with(FakeDiaryApi::default());

        let err = store.create(&DiaryDraft::default()).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(api.call_count(), 0);
        assert!(store.snapshot().await.entries.is_empty());
    }

    #[tokio::test]
    async fn test_failed_create_leaves_collection_unchanged() {
        let api = FakeDiaryApi {
            fail_mutations: true,
            ..Default::default()
        };
        let (store, _) = store_with(api);

        let draft = DiaryDraft::for_date(date(2024, 5, 1));
        assert!(store.create(&draft).await.is_err());

        let snapshot = store.snapshot().await;
        assert!(snapshot.entries.is_empty());
        assert!(snapshot.current.is_none());
        assert!(snapshot.error.is_some());
    }

    #[tokio::test]
    async fn test_update_replaces_by_id() {
        let existing = entry(1, date(2024, 5, 1), "before");
        let (store, _) = store_with(FakeDiaryApi::with_entries(vec![existing]));
        store.fetch_all().await.unwrap();

        let draft = DiaryDraft::for_date(date(2024, 5, 2)).with_note("after");
        store.update(1, &draft).await.unwrap();

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.entries.len(), 1);
        assert_eq!(snapshot.entries[0].note, "after");
        assert_eq!(snapshot.entries[0].date, date(2024, 5, 2));
    }

    #[tokio::test]
    async fn test_delete_removes_by_id_and_clears_selection() {
        let (store, _) = store_with(FakeDiaryApi::with_entries(vec![
            entry(1, date(2024, 5, 1), "a"),
            entry(2, date(2024, 5, 2), "b"),
        ]));
        store.fetch_all().await.unwrap();
        store.fetch_entry(1).await.unwrap();

        store.delete(1).await.unwrap();
        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.entries.len(), 1);
        assert_eq!(snapshot.entries[0].id, 2);
        assert!(snapshot.current.is_none());
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_entry() {
        let api = FakeDiaryApi {
            entries: StdMutex::new(vec![entry(1, date(2024, 5, 1), "a")]),
            fail_mutations: true,
            ..Default::default()
        };
        let (store, _) = store_with(api);
        store.fetch_all().await.unwrap();

        assert!(store.delete(1).await.is_err());
        assert_eq!(store.snapshot().await.entries.len(), 1);
    }

    #[tokio::test]
    async fn test_set_selected_year_month_refetches() {
        let (store, api) = store_with(FakeDiaryApi::with_entries(vec![
            entry(1, date(2024, 5, 1), "may"),
            entry(2, date(2024, 6, 1), "june"),
        ]));

        store.set_selected_year_month(2024, 6).await.unwrap();
        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.selected_month, 6);
        assert_eq!(snapshot.entries.len(), 1);
        assert_eq!(snapshot.entries[0].note, "june");
        assert!(api.call_count() > 0);
    }

    #[tokio::test]
    async fn test_entries_by_date_groups_and_orders() {
        let (store, _) = store_with(FakeDiaryApi::with_entries(vec![
            entry(1, date(2024, 5, 2), "b"),
            entry(2, date(2024, 5, 1), "a1"),
            entry(3, date(2024, 5, 1), "a2"),
        ]));
        store.fetch_all().await.unwrap();

        let grouped = store.entries_by_date().await;
        let days: Vec<NaiveDate> = grouped.keys().cloned().collect();
        assert_eq!(days, vec![date(2024, 5, 1), date(2024, 5, 2)]);
        assert_eq!(grouped[&date(2024, 5, 1)].len(), 2);
    }

    #[tokio::test]
    async fn test_dates_with_entries_dedupes_and_filters_month() {
        let (store, _) = store_with(FakeDiaryApi::with_entries(vec![
            entry(1, date(2024, 5, 1), "a1"),
            entry(2, date(2024, 5, 1), "a2"),
            entry(3, date(2024, 6, 9), "other month"),
        ]));
        store.set_selected_year_month(2024, 5).await.unwrap();
        store.fetch_all().await.unwrap();

        assert_eq!(store.dates_with_entries().await, vec![date(2024, 5, 1)]);
    }

    #[tokio::test]
    async fn test_emotions_by_date_prefers_detail() {
        let mut with_detail = entry(1, date(2024, 5, 1), "a");
        with_detail.emotion = Some(3);
        with_detail.emotion_detail = Some(Emotion {
            id: 3,
            name: "warmth".to_string(),
            description: String::new(),
        });
        let mut id_only = entry(2, date(2024, 5, 2), "b");
        id_only.emotion = Some(7);

        let (store, _) = store_with(FakeDiaryApi::with_entries(vec![with_detail, id_only]));
        store.fetch_all().await.unwrap();

        let map = store.emotions_by_date().await;
        assert_eq!(map[&date(2024, 5, 1)].name, "warmth");
        assert_eq!(map[&date(2024, 5, 2)].id, 7);
        assert!(map[&date(2024, 5, 2)].name.is_empty());
    }

    #[tokio::test]
    async fn test_monthly_entries_filters_selected_month() {
        let (store, _) = store_with(FakeDiaryApi::with_entries(vec![
            entry(1, date(2024, 5, 1), "may"),
            entry(2, date(2024, 6, 1), "june"),
        ]));
        store.set_selected_year_month(2024, 5).await.unwrap();
        store.fetch_all().await.unwrap();

        let monthly = store.monthly_entries().await;
        assert_eq!(monthly.len(), 1);
        assert_eq!(monthly[0].note, "may");
    }
}
