use std::time::Duration;

use crate::client::{ApiClient, BookingFilters};
use crate::config::Config;
use crate::models::Booking;

use super::list::ListPage;

/// Bookings list: server-side status/bookingType/search filters.
pub struct BookingsPage {
    pub list: ListPage<Booking, BookingFilters>,
}

impl BookingsPage {
    pub fn new(config: &Config) -> Self {
        Self {
            list: ListPage::new(
                config.page_size,
                Duration::from_millis(config.search_debounce_ms),
            ),
        }
    }

    pub async fn refresh(&mut self, client: &ApiClient) {
        self.list.begin_load();
        let page = self.list.current_page();
        let page_size = self.list.page_size();
        let filters = self.list.filters().clone();
        let search = self.list.search_term().map(str::to_string);

        let result = client
            .list_bookings(page, page_size, &filters, search.as_deref())
            .await;
        self.list.apply(result, "Failed to load bookings");
    }
}
