use serde::{Deserialize, Serialize};

use crate::view_model::ListViewModel;
use crate::{Effect, PageRequest, PageResult};

pub type RequestId = u64;

/// Number of entities requested per page.
pub const PAGE_SIZE: u32 = 10;

/// User-facing message shown whenever a fetch fails.
pub const LOAD_ERROR_MESSAGE: &str = "Error al cargar personajes. Intenta nuevamente.";

/// What to do with a completion that belongs to a superseded request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StalePolicy {
    /// Apply only the completion of the most recently issued request.
    #[default]
    Discard,
    /// Apply every completion in arrival order.
    LastWriteWins,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListState<T> {
    items: Vec<T>,
    loading: bool,
    error: Option<String>,
    page: u32,
    has_more: bool,
    query: String,
    stale_policy: StalePolicy,
    next_request_id: RequestId,
    latest_request: Option<RequestId>,
    outstanding: usize,
    dirty: bool,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self::new(1)
    }
}

impl<T> ListState<T> {
    /// Fresh state: loading, assuming more pages, nothing fetched yet.
    pub fn new(initial_page: u32) -> Self {
        Self {
            items: Vec::new(),
            loading: true,
            error: None,
            page: initial_page.max(1),
            has_more: true,
            query: String::new(),
            stale_policy: StalePolicy::default(),
            next_request_id: 1,
            latest_request: None,
            outstanding: 0,
            dirty: false,
        }
    }

    pub fn with_stale_policy(mut self, policy: StalePolicy) -> Self {
        self.stale_policy = policy;
        self
    }

    pub fn view(&self) -> ListViewModel<T>
    where
        T: Clone,
    {
        ListViewModel {
            items: self.items.clone(),
            loading: self.loading,
            error: self.error.clone(),
            has_more: self.has_more,
            query: self.query.clone(),
            page: self.page,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn stale_policy(&self) -> StalePolicy {
        self.stale_policy
    }

    /// Id of the most recently issued fetch, if any.
    pub fn latest_request_id(&self) -> Option<RequestId> {
        self.latest_request
    }

    /// Fetches issued but not yet reported back.
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    /// Returns whether anything changed since the last call, clearing the flag.
    pub fn consume_dirty(&mut self) -> bool {
        let was_dirty = self.dirty;
        self.dirty = false;
        was_dirty
    }

    pub(crate) fn set_query(&mut self, query: String) {
        self.query = query;
        self.dirty = true;
    }

    pub(crate) fn reset_page(&mut self) {
        self.page = 1;
    }

    pub(crate) fn advance_page(&mut self) -> u32 {
        self.page += 1;
        self.page
    }

    pub(crate) fn begin_fetch(&mut self, page: u32) -> Effect {
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.latest_request = Some(request_id);
        self.outstanding += 1;
        self.loading = true;
        self.error = None;
        self.dirty = true;
        Effect::FetchPage {
            request_id,
            request: PageRequest {
                page,
                page_size: PAGE_SIZE,
                query: self.query.clone(),
            },
        }
    }

    /// Whether a completion for `request_id` would be applied.
    pub fn accepts(&self, request_id: RequestId) -> bool {
        match self.stale_policy {
            StalePolicy::LastWriteWins => true,
            StalePolicy::Discard => self.latest_request == Some(request_id),
        }
    }

    pub(crate) fn settle(&mut self) {
        self.outstanding = self.outstanding.saturating_sub(1);
    }

    pub(crate) fn apply_page(&mut self, page: u32, result: PageResult<T>) {
        match result {
            PageResult::Unpaginated(items) => {
                self.items = items;
                self.has_more = false;
            }
            PageResult::Malformed => {
                self.items.clear();
                self.has_more = false;
            }
            PageResult::Paginated { items, meta } => {
                if page == 1 {
                    self.items = items;
                } else {
                    self.items.extend(items);
                }
                self.has_more = meta.has_next();
            }
        }
        self.dirty = true;
    }

    pub(crate) fn apply_failure(&mut self) {
        self.error = Some(LOAD_ERROR_MESSAGE.to_string());
        self.dirty = true;
    }

    pub(crate) fn finish_loading(&mut self) {
        self.loading = false;
        self.dirty = true;
    }
}
