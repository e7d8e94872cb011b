use std::time::Duration;

use crate::client::ApiClient;
use crate::config::Config;
use crate::models::AdminActionLog;

use super::list::ListPage;

/// Larger page so client-side filtering has more to work with.
pub const LOGS_PAGE_SIZE: u32 = 50;

/// Audit log list. The backend has no search parameter for logs, so the
/// search box filters the currently fetched page in memory; the UI copy must
/// say "filter current page", not "search".
pub struct ActionLogsPage {
    pub list: ListPage<AdminActionLog, ()>,
}

impl ActionLogsPage {
    pub fn new(config: &Config) -> Self {
        Self {
            list: ListPage::new(
                LOGS_PAGE_SIZE,
                Duration::from_millis(config.search_debounce_ms),
            ),
        }
    }

    pub async fn refresh(&mut self, client: &ApiClient) {
        self.list.begin_load();
        let page = self.list.current_page();
        let result = client.action_logs(page, LOGS_PAGE_SIZE).await;
        self.list.apply(result, "Failed to load action logs");
    }

    /// Logs on the current page matching the settled filter text, against
    /// action, description and entity type.
    pub fn filtered(&self) -> Vec<&AdminActionLog> {
        match self.list.search_term() {
            None => self.list.items().iter().collect(),
            Some(term) => {
                let needle = term.to_lowercase();
                self.list
                    .items()
                    .iter()
                    .filter(|log| {
                        log.action.to_lowercase().contains(&needle)
                            || log.description.to_lowercase().contains(&needle)
                            || log.entity_type.to_lowercase().contains(&needle)
                    })
                    .collect()
            }
        }
    }

    /// Footer line; distinguishes filtered counts from the raw page.
    pub fn summary(&self) -> String {
        match self.list.search_term() {
            Some(_) => format!(
                "Showing {} filtered ({} on page, {} total)",
                self.filtered().len(),
                self.list.items().len(),
                self.list.total_items()
            ),
            None => format!(
                "Showing {} of {} logs",
                self.list.items().len(),
                self.list.total_items()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{Envelope, Pagination};
    use std::time::Instant;

    fn log(id: i64, action: &str, description: &str, entity_type: &str) -> AdminActionLog {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "adminId": "7f8d2c1a-0b4e-4f6a-9c3d-5e6f7a8b9c0d",
            "action": action,
            "entityType": entity_type,
            "description": description,
            "createdAt": "2025-03-01T12:00:00Z"
        }))
        .unwrap()
    }

    fn loaded_page() -> ActionLogsPage {
        let mut page = ActionLogsPage::new(&Config::default());
        page.list.apply(
            Ok(Envelope {
                success: true,
                data: Some(vec![
                    log(1, "UpdateStatus", "Deactivated user Juan", "User"),
                    log(2, "DeleteReview", "Removed review 42", "Review"),
                    log(3, "UpdateSetting", "Changed ride_baseFare", "Setting"),
                ]),
                errors: vec![],
                warnings: vec![],
                pagination: Some(Pagination {
                    current_page: 1,
                    page_size: LOGS_PAGE_SIZE,
                    total_items: 120,
                    total_pages: 3,
                }),
            }),
            "Failed to load action logs",
        );
        page
    }

    #[test]
    fn filter_matches_action_description_and_entity_type() {
        let t0 = Instant::now();
        let mut page = loaded_page();

        page.list.search_input("review", t0);
        page.list.tick(t0 + Duration::from_millis(300));

        let filtered = page.filtered();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 2);
    }

    #[test]
    fn summary_distinguishes_filtered_counts() {
        let t0 = Instant::now();
        let mut page = loaded_page();
        assert_eq!(page.summary(), "Showing 3 of 120 logs");

        page.list.search_input("user", t0);
        page.list.tick(t0 + Duration::from_millis(300));
        assert_eq!(page.summary(), "Showing 1 filtered (3 on page, 120 total)");
    }

    #[test]
    fn no_filter_shows_the_whole_page() {
        let page = loaded_page();
        assert_eq!(page.filtered().len(), 3);
    }
}
