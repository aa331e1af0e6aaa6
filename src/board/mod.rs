//! Interactive state behind the birthdays screen.
//!
//! [`BirthdayBoard`] owns the selected date, the lookup status with its
//! entries, the favourites list and the search text. Every user event is a
//! method; the views the front end draws are derived on demand.

pub mod state;

pub use state::{FetchRequest, FetchState, ResultPanel};

use crate::app::Result;
use crate::domain::{
    BirthEntry, BirthPayload, DateSelection, FavouriteEntry, GroupedFavourites, SelectedDate,
};
use crate::fetcher::BirthdayFetcher;

#[derive(Debug, Default)]
pub struct BirthdayBoard {
    selected_date: Option<SelectedDate>,
    fetch_state: FetchState,
    favourites: Vec<FavouriteEntry>,
    grouped: GroupedFavourites,
    search_query: String,
    generation: u64,
    discard_stale: bool,
}

impl BirthdayBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// When set, a settlement for anything but the latest request is dropped
    /// instead of overwriting the displayed result.
    pub fn discarding_stale(mut self, discard: bool) -> Self {
        self.discard_stale = discard;
        self
    }

    pub fn selected_date(&self) -> Option<&SelectedDate> {
        self.selected_date.as_ref()
    }

    pub fn fetch_state(&self) -> &FetchState {
        &self.fetch_state
    }

    pub fn favourites(&self) -> &[FavouriteEntry] {
        &self.favourites
    }

    pub fn grouped_favourites(&self) -> &GroupedFavourites {
        &self.grouped
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Search only makes sense once a payload with a births list is loaded.
    pub fn is_search_enabled(&self) -> bool {
        self.fetch_state
            .payload()
            .is_some_and(BirthPayload::has_births)
    }

    /// Record a calendar selection and start a lookup for it.
    ///
    /// The returned request must be fetched exactly once and its outcome
    /// handed back through [`settle`](Self::settle).
    pub fn select_date(&mut self, selection: DateSelection) -> Result<FetchRequest> {
        let date = SelectedDate::from_selection(&selection)?;

        self.generation += 1;
        self.selected_date = Some(date);
        self.search_query.clear();
        self.fetch_state = FetchState::Pending;

        let request = FetchRequest {
            month: selection.month_param(),
            day: selection.day_param(),
            generation: self.generation,
        };
        tracing::debug!(
            "Selected {:?}, requesting {}/{} (generation {})",
            self.selected_date,
            request.month,
            request.day,
            request.generation
        );
        Ok(request)
    }

    /// Apply the outcome of a lookup. Returns `false` if it was dropped as stale.
    pub fn settle(&mut self, generation: u64, result: Result<BirthPayload>) -> bool {
        if self.discard_stale && generation != self.generation {
            tracing::warn!(
                "Dropping stale response (generation {}, latest {})",
                generation,
                self.generation
            );
            return false;
        }

        self.fetch_state = match result {
            Ok(payload) => {
                tracing::info!(
                    "Loaded {} births (generation {})",
                    payload.births().len(),
                    generation
                );
                FetchState::Success(payload)
            }
            Err(e) => {
                tracing::warn!("Lookup failed (generation {}): {}", generation, e);
                FetchState::Error(e.to_string())
            }
        };
        true
    }

    /// Select a date and wait for its lookup to settle.
    pub async fn load<F>(&mut self, fetcher: &F, selection: DateSelection) -> Result<()>
    where
        F: BirthdayFetcher + ?Sized,
    {
        let request = self.select_date(selection)?;
        let result = fetcher.fetch(&request.month, &request.day).await;
        self.settle(request.generation, result);
        Ok(())
    }

    /// Flip the favourite flag of `entry`. Returns the new flag.
    ///
    /// Favourites are keyed by text alone: unmarking removes every favourite
    /// with the same text whatever its date, and marking is skipped when that
    /// text is already a favourite. Every loaded entry with a matching text
    /// gets the new flag.
    pub fn toggle_favourite(&mut self, entry: &BirthEntry) -> bool {
        let favourite = !entry.is_favourite;

        if favourite {
            let Some(date) = self.selected_date.clone() else {
                return entry.is_favourite;
            };
            if !self.favourites.iter().any(|f| f.text == entry.text) {
                self.favourites
                    .push(FavouriteEntry::new(date, entry.text.clone()));
            }
        } else {
            self.favourites.retain(|f| f.text != entry.text);
        }
        self.grouped = GroupedFavourites::from_favourites(&self.favourites);

        if let FetchState::Success(payload) = &mut self.fetch_state {
            if let Some(births) = payload.births.take() {
                payload.births = Some(
                    births
                        .into_iter()
                        .map(|birth| {
                            if birth.text == entry.text {
                                BirthEntry {
                                    is_favourite: favourite,
                                    ..birth
                                }
                            } else {
                                birth
                            }
                        })
                        .collect(),
                );
            }
        }

        favourite
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search_query.push(c);
    }

    pub fn pop_search_char(&mut self) {
        self.search_query.pop();
    }

    /// Loaded entries whose text contains the search query, ignoring case.
    pub fn filtered_entries(&self) -> Vec<&BirthEntry> {
        let needle = self.search_query.to_lowercase();
        self.fetch_state
            .payload()
            .map(|payload| {
                payload
                    .births()
                    .iter()
                    .filter(|entry| entry.matches_lowercase(&needle))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn result_panel(&self) -> ResultPanel<'_> {
        match &self.fetch_state {
            FetchState::Idle => ResultPanel::NoDateSelected,
            FetchState::Pending => ResultPanel::Loading,
            FetchState::Success(_) => ResultPanel::Entries(self.filtered_entries()),
            FetchState::Error(message) => ResultPanel::Failed(message),
        }
    }
}
