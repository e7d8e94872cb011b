use std::time::Duration;

use crate::client::{ApiClient, ReviewFilters};
use crate::config::Config;
use crate::models::Review;
use crate::notify::Notifier;

use super::list::ListPage;

/// Reviews list: server-side rating/search filters plus a delete action.
pub struct ReviewsPage {
    pub list: ListPage<Review, ReviewFilters>,
}

impl ReviewsPage {
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
            .list_reviews(page, page_size, &filters, search.as_deref())
            .await;
        self.list.apply(result, "Failed to load reviews");
    }

    pub async fn delete_review(
        &mut self,
        client: &ApiClient,
        review_id: i64,
        notifier: &mut dyn Notifier,
    ) {
        match client.delete_review(review_id).await {
            Ok(envelope) if envelope.success => {
                notifier.success("Review deleted successfully");
                self.refresh(client).await;
            }
            Ok(envelope) => {
                let message = envelope
                    .errors
                    .first()
                    .cloned()
                    .unwrap_or_else(|| "Failed to delete review".to_string());
                notifier.error(&message);
            }
            Err(err) => notifier.error(&err.user_message()),
        }
    }
}
