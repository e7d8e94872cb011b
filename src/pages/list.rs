use std::time::{Duration, Instant};

use crate::client::Envelope;
use crate::error::ApiResult;
use crate::utils::debounce::Debounced;

/// Load lifecycle of a list page. Re-enters `Loading` whenever the page
/// number, filters, or debounced search text change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    Errored(String),
}

/// Generic list/pagination/filter controller shared by every list page.
///
/// `F` is the page's filter set; changing it (or settling a new search term)
/// resets the current page to 1 so the user is never stranded on a page that
/// no longer exists under the new query.
#[derive(Debug)]
pub struct ListPage<T, F> {
    items: Vec<T>,
    state: LoadState,
    current_page: u32,
    total_pages: u32,
    total_items: u64,
    page_size: u32,
    filters: F,
    search: Debounced,
}

impl<T, F: Clone + PartialEq + Default> ListPage<T, F> {
    pub fn new(page_size: u32, search_delay: Duration) -> Self {
        Self {
            items: Vec::new(),
            state: LoadState::Idle,
            current_page: 1,
            total_pages: 1,
            total_items: 0,
            page_size,
            filters: F::default(),
            search: Debounced::new(search_delay),
        }
    }

    // ---- query state ----

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn filters(&self) -> &F {
        &self.filters
    }

    /// Settled, non-empty search term used as the actual query parameter.
    pub fn search_term(&self) -> Option<&str> {
        Some(self.search.value()).filter(|s| !s.is_empty())
    }

    /// What the search box currently shows (may still be debouncing).
    pub fn search_raw(&self) -> &str {
        self.search.raw()
    }

    /// Replace the filter set. Returns true when a refetch is due; the page
    /// resets to 1 so the new query starts from the beginning.
    pub fn set_filters(&mut self, filters: F) -> bool {
        if filters == self.filters {
            return false;
        }
        self.filters = filters;
        self.current_page = 1;
        true
    }

    pub fn search_input(&mut self, text: impl Into<String>, now: Instant) {
        self.search.input(text, now);
    }

    /// Advance the debounce window. When the search value settles, the page
    /// resets to 1 and the caller must refetch.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.search.poll(now).is_some() {
            self.current_page = 1;
            true
        } else {
            false
        }
    }

    // ---- pagination ----

    pub fn prev_page(&mut self) -> bool {
        let target = self.current_page.saturating_sub(1).max(1);
        let moved = target != self.current_page;
        self.current_page = target;
        moved
    }

    pub fn next_page(&mut self) -> bool {
        let target = (self.current_page + 1).min(self.total_pages.max(1));
        let moved = target != self.current_page;
        self.current_page = target;
        moved
    }

    pub fn can_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn can_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn page_indicator(&self) -> String {
        format!("{} / {}", self.current_page, self.total_pages.max(1))
    }

    // ---- load cycle ----

    pub fn begin_load(&mut self) {
        self.state = LoadState::Loading;
    }

    /// Consume a fetch result. Application-level failures (`success: false`)
    /// and transport failures both land in the full error state; there is no
    /// separate "refresh failed, keep stale data" state.
    pub fn apply(&mut self, result: ApiResult<Envelope<Vec<T>>>, fallback: &str) {
        match result {
            Ok(Envelope {
                success: true,
                data: Some(items),
                pagination,
                ..
            }) => {
                self.items = items;
                if let Some(p) = pagination {
                    self.total_pages = p.total_pages;
                    self.total_items = p.total_items;
                }
                self.state = LoadState::Loaded;
            }
            Ok(envelope) => {
                let message = envelope
                    .errors
                    .first()
                    .cloned()
                    .unwrap_or_else(|| fallback.to_string());
                self.state = LoadState::Errored(message);
            }
            Err(err) => {
                self.state = LoadState::Errored(err.user_message());
            }
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut Vec<T> {
        &mut self.items
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            LoadState::Errored(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    /// The big spinner only shows on the first load of a filter set; paging
    /// refetches keep the stale rows visible to avoid layout flicker.
    pub fn show_spinner(&self) -> bool {
        self.state == LoadState::Loading && self.items.is_empty()
    }

    pub fn empty_message(&self, noun: &str) -> String {
        match self.search_term() {
            Some(term) => format!("No {noun} found matching \"{term}\""),
            None => format!("No {noun} found"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Pagination;
    use crate::error::ApiError;

    type Page = ListPage<u32, Option<bool>>;

    fn page() -> Page {
        ListPage::new(20, Duration::from_millis(300))
    }

    fn ok_envelope(items: Vec<u32>, pagination: Pagination) -> ApiResult<Envelope<Vec<u32>>> {
        Ok(Envelope {
            success: true,
            data: Some(items),
            errors: vec![],
            warnings: vec![],
            pagination: Some(pagination),
        })
    }

    fn five_pages() -> Pagination {
        Pagination {
            current_page: 1,
            page_size: 20,
            total_items: 97,
            total_pages: 5,
        }
    }

    #[test]
    fn successful_page_load_populates_rows_and_pagination() {
        let mut page = page();
        page.begin_load();
        assert!(page.show_spinner());

        page.apply(ok_envelope((0..20).collect(), five_pages()), "fallback");

        assert_eq!(page.items().len(), 20);
        assert_eq!(page.page_indicator(), "1 / 5");
        assert!(!page.can_prev());
        assert!(page.can_next());
        assert_eq!(page.total_items(), 97);
        assert_eq!(*page.state(), LoadState::Loaded);
    }

    #[test]
    fn application_failure_renders_full_error_state() {
        let mut page = page();
        page.begin_load();
        page.apply(
            Ok(Envelope {
                success: false,
                data: None,
                errors: vec!["Unauthorized".to_string()],
                warnings: vec![],
                pagination: None,
            }),
            "Failed to load users",
        );
        assert_eq!(page.error(), Some("Unauthorized"));
    }

    #[test]
    fn transport_failure_uses_the_network_message() {
        let mut page = page();
        page.begin_load();
        page.apply(
            Err(ApiError::Api {
                status: 503,
                errors: vec![],
            }),
            "Failed to load users",
        );
        assert_eq!(page.error(), Some(crate::error::GENERIC_ERROR));
    }

    #[test]
    fn filter_change_resets_to_page_one() {
        let mut page = page();
        page.apply(ok_envelope(vec![1], five_pages()), "fallback");
        page.next_page();
        page.next_page();
        assert_eq!(page.current_page(), 3);

        assert!(page.set_filters(Some(true)));
        assert_eq!(page.current_page(), 1);

        // Setting the same filters again is not a change.
        page.next_page();
        assert!(!page.set_filters(Some(true)));
        assert_eq!(page.current_page(), 2);
    }

    #[test]
    fn settled_search_resets_to_page_one() {
        let t0 = Instant::now();
        let mut page = page();
        page.apply(ok_envelope(vec![1], five_pages()), "fallback");
        page.next_page();
        assert_eq!(page.current_page(), 2);

        page.search_input("juan", t0);
        assert!(!page.tick(t0 + Duration::from_millis(100)));
        assert_eq!(page.current_page(), 2);

        assert!(page.tick(t0 + Duration::from_millis(300)));
        assert_eq!(page.current_page(), 1);
        assert_eq!(page.search_term(), Some("juan"));
    }

    #[test]
    fn pagination_clamps_at_both_bounds() {
        let mut page = page();
        page.apply(ok_envelope(vec![1], five_pages()), "fallback");

        assert!(!page.prev_page());
        assert_eq!(page.current_page(), 1);

        for _ in 0..10 {
            page.next_page();
        }
        assert_eq!(page.current_page(), 5);
        assert!(!page.can_next());
        assert!(!page.next_page());
    }

    #[test]
    fn spinner_only_on_first_load_of_a_filter_set() {
        let mut page = page();
        page.begin_load();
        assert!(page.show_spinner());

        page.apply(ok_envelope(vec![1, 2, 3], five_pages()), "fallback");
        page.begin_load();
        assert!(page.is_loading());
        assert!(!page.show_spinner());
        assert_eq!(page.items().len(), 3);
    }

    #[test]
    fn empty_message_depends_on_active_search() {
        let t0 = Instant::now();
        let mut page = page();
        assert_eq!(page.empty_message("users"), "No users found");

        page.search_input("ghost", t0);
        page.tick(t0 + Duration::from_millis(300));
        assert_eq!(
            page.empty_message("users"),
            "No users found matching \"ghost\""
        );
    }
}
