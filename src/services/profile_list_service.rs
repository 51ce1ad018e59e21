//! Profile list controller.
//!
//! Owns the filter/sort/page parameters and the `Loading` / `Ready` / `Failed`
//! view state. Parameter changes either start a fetch or re-filter the batch
//! that is already cached:
//!
//! - page, gender, nationality and sort changes fetch;
//! - every change except page resets the page to 1;
//! - a search change only re-filters, unless the page reset moved the page or
//!   there is no batch to filter (last fetch failed);
//! - an empty update after a failed fetch is a reload and fetches again.
//!
//! Every fetch gets a generation number. When a response comes back for a
//! generation that is no longer the latest it is dropped, so the newest request
//! always wins regardless of completion order.
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::models::{
    Gender, ListParams, Nationality, SortMode, UserRecord, DEFAULT_RESULTS_PER_PAGE,
};
use crate::services::random_user_service::{FetchRequest, ProfileSource};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum ListState {
    Loading,
    Ready(Vec<UserRecord>),
    Failed(String),
}

impl ListState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ListState::Loading)
    }

    pub fn users(&self) -> &[UserRecord] {
        match self {
            ListState::Ready(users) => users,
            _ => &[],
        }
    }
}

/// Owned copy of the controller state handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListSnapshot {
    pub params: ListParams,
    pub state: ListState,
}

/// A set of parameter changes. `None` leaves the current value alone; for the
/// filters `Some(None)` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamsUpdate {
    pub page: Option<u32>,
    pub search: Option<String>,
    pub gender: Option<Option<Gender>>,
    pub nationality: Option<Option<Nationality>>,
    pub sort: Option<SortMode>,
}

impl ParamsUpdate {
    pub fn is_empty(&self) -> bool {
        *self == ParamsUpdate::default()
    }
}

struct Inner {
    params: ListParams,
    state: ListState,
    generation: u64,
    // Raw batch of the latest successful fetch, before search and sort.
    batch: Option<Vec<UserRecord>>,
    started: bool,
}

pub struct ProfileListController {
    source: Arc<dyn ProfileSource>,
    results_per_page: u32,
    seed: Option<String>,
    inner: RwLock<Inner>,
}

impl ProfileListController {
    pub fn new(source: Arc<dyn ProfileSource>) -> Self {
        Self {
            source,
            results_per_page: DEFAULT_RESULTS_PER_PAGE,
            seed: None,
            inner: RwLock::new(Inner {
                params: ListParams::default(),
                state: ListState::Loading,
                generation: 0,
                batch: None,
                started: false,
            }),
        }
    }

    pub fn with_results_per_page(mut self, results_per_page: u32) -> Self {
        self.results_per_page = results_per_page.max(1);
        self
    }

    pub fn with_seed(mut self, seed: impl Into<String>) -> Self {
        self.seed = Some(seed.into());
        self
    }

    pub async fn snapshot(&self) -> ListSnapshot {
        let inner = self.inner.read().await;
        ListSnapshot {
            params: inner.params.clone(),
            state: inner.state.clone(),
        }
    }

    pub async fn set_page(&self, page: u32) -> ListSnapshot {
        self.apply(ParamsUpdate {
            page: Some(page),
            ..ParamsUpdate::default()
        })
        .await
    }

    pub async fn set_search(&self, search: impl Into<String>) -> ListSnapshot {
        self.apply(ParamsUpdate {
            search: Some(search.into()),
            ..ParamsUpdate::default()
        })
        .await
    }

    pub async fn set_gender(&self, gender: Option<Gender>) -> ListSnapshot {
        self.apply(ParamsUpdate {
            gender: Some(gender),
            ..ParamsUpdate::default()
        })
        .await
    }

    pub async fn set_nationality(&self, nationality: Option<Nationality>) -> ListSnapshot {
        self.apply(ParamsUpdate {
            nationality: Some(nationality),
            ..ParamsUpdate::default()
        })
        .await
    }

    pub async fn set_sort(&self, sort: SortMode) -> ListSnapshot {
        self.apply(ParamsUpdate {
            sort: Some(sort),
            ..ParamsUpdate::default()
        })
        .await
    }

    /// Applies the update and, when it calls for one, waits for the fetch it
    /// started. An empty update on a fresh controller performs the first load.
    pub async fn apply(&self, update: ParamsUpdate) -> ListSnapshot {
        let pending = {
            let mut inner = self.inner.write().await;
            self.plan(&mut inner, update)
        };

        if let Some((generation, request)) = pending {
            self.run_fetch(generation, request).await;
        }

        self.snapshot().await
    }

    fn plan(&self, inner: &mut Inner, update: ParamsUpdate) -> Option<(u64, FetchRequest)> {
        let reload = update.is_empty();
        let before = inner.params.clone();
        let params = &mut inner.params;

        let mut filters_changed = false;
        if let Some(gender) = update.gender.filter(|g| *g != params.gender) {
            params.gender = gender;
            filters_changed = true;
        }
        if let Some(nat) = update.nationality.filter(|n| *n != params.nationality) {
            params.nationality = nat;
            filters_changed = true;
        }
        if let Some(sort) = update.sort.filter(|s| *s != params.sort) {
            params.sort = sort;
            filters_changed = true;
        }

        let mut search_changed = false;
        if let Some(search) = update.search.filter(|s| *s != params.search) {
            params.search = search;
            search_changed = true;
        }

        if filters_changed || search_changed {
            params.page = 1;
        } else if let Some(page) = update.page {
            params.page = page.max(1);
        }

        let page_changed = params.page != before.page;
        if *params != before {
            info!(
                page = params.page,
                search = %params.search,
                gender = params.gender_value(),
                nat = params.nationality_value(),
                sort = params.sort.as_str(),
                "profile list parameters changed"
            );
        }

        // Failed: a reload retries, a search has nothing to filter
        let failed = inner.batch.is_none() && !inner.state.is_loading();
        if !inner.started
            || filters_changed
            || page_changed
            || (failed && (reload || search_changed))
        {
            return Some(self.begin_fetch(inner));
        }

        if search_changed {
            if let Some(batch) = inner.batch.as_deref() {
                inner.state = ListState::Ready(present(batch, &inner.params));
            }
        }
        None
    }

    fn begin_fetch(&self, inner: &mut Inner) -> (u64, FetchRequest) {
        inner.generation += 1;
        inner.started = true;
        inner.state = ListState::Loading;
        inner.batch = None;

        let request = FetchRequest {
            page: inner.params.page,
            results: self.results_per_page,
            gender: inner.params.gender,
            nationality: inner.params.nationality,
            seed: self.seed.clone(),
        };
        (inner.generation, request)
    }

    async fn run_fetch(&self, generation: u64, request: FetchRequest) {
        let result = self.source.fetch_page(&request).await;

        let mut inner = self.inner.write().await;
        if inner.generation != generation {
            debug!(
                generation,
                latest = inner.generation,
                page = request.page,
                "discarding stale profile response"
            );
            return;
        }

        match result {
            Ok(batch) => {
                let shown = present(&batch, &inner.params);
                debug!(fetched = batch.len(), shown = shown.len(), "profile batch ready");
                inner.state = ListState::Ready(shown);
                inner.batch = Some(batch);
            }
            Err(e) => {
                warn!(detail = e.detail(), "Profile fetch failed: {}", e);
                inner.state = ListState::Failed(e.to_string());
                inner.batch = None;
            }
        }
    }
}

/// Search first, then sort.
pub fn present(batch: &[UserRecord], params: &ListParams) -> Vec<UserRecord> {
    sort_users(filter_by_search(batch, &params.search), params.sort)
}

/// Case-insensitive substring match on `"first last"`. Keeps input order.
pub fn filter_by_search(users: &[UserRecord], term: &str) -> Vec<UserRecord> {
    if term.is_empty() {
        return users.to_vec();
    }
    let term = term.to_lowercase();
    users
        .iter()
        .filter(|user| user.name.full().to_lowercase().contains(&term))
        .cloned()
        .collect()
}

pub fn sort_users(mut users: Vec<UserRecord>, mode: SortMode) -> Vec<UserRecord> {
    if mode != SortMode::Default {
        // sort_by is stable, ties keep upstream order
        users.sort_by(|a, b| mode.compare(a, b));
    }
    users
}
