use std::collections::{BTreeMap, BTreeSet};

use futures::future::try_join_all;

use crate::client::ApiClient;
use crate::error::{ApiError, ApiResult};
use crate::utils::validate::{is_fare_rate_key, is_valid_email, parse_positive};

use super::list::LoadState;

/// Save-button state for the settings page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveControl {
    /// Enabled, with the number of settings that would be written.
    Ready(usize),
    Saving,
    /// Disabled: nothing changed or a field has a validation error.
    Blocked,
}

/// Platform settings editor. Values are tracked against a snapshot of what
/// the backend returned; only keys that differ from the snapshot are saved,
/// and all of them are written in one batch.
pub struct SettingsPage {
    values: BTreeMap<String, String>,
    original: BTreeMap<String, String>,
    changed: BTreeSet<String>,
    field_errors: BTreeMap<String, String>,
    pub state: LoadState,
    pub saving: bool,
}

impl SettingsPage {
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
            original: BTreeMap::new(),
            changed: BTreeSet::new(),
            field_errors: BTreeMap::new(),
            state: LoadState::Idle,
            saving: false,
        }
    }

    pub async fn load(&mut self, client: &ApiClient) {
        self.state = LoadState::Loading;
        match client
            .settings()
            .await
            .and_then(|env| env.into_data("Failed to load settings"))
        {
            Ok(settings) => {
                self.values = settings
                    .iter()
                    .map(|s| (s.key.clone(), s.value.clone()))
                    .collect();
                self.original = self.values.clone();
                self.changed.clear();
                self.field_errors.clear();
                self.state = LoadState::Loaded;
            }
            Err(err) => {
                self.state = LoadState::Errored(err.user_message());
            }
        }
    }

    fn validate_field(key: &str, value: &str) -> Option<String> {
        if is_fare_rate_key(key) && parse_positive(value).is_none() {
            return Some("Must be a positive number".to_string());
        }
        if key == "support_email" && !is_valid_email(value.trim()) {
            return Some("Invalid email format".to_string());
        }
        None
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match Self::validate_field(key, &value) {
            Some(message) => {
                self.field_errors.insert(key.to_string(), message);
            }
            None => {
                self.field_errors.remove(key);
            }
        }

        if self.original.get(key).map(String::as_str) == Some(value.as_str()) {
            self.changed.remove(key);
        } else {
            self.changed.insert(key.to_string());
        }
        self.values.insert(key.to_string(), value);
    }

    pub fn value_or<'a>(&'a self, key: &str, fallback: &'a str) -> &'a str {
        self.values.get(key).map(String::as_str).unwrap_or(fallback)
    }

    /// Boolean settings are stored as the strings "true" and "false".
    pub fn get_bool(&self, key: &str) -> bool {
        self.value_or(key, "false") == "true"
    }

    pub fn toggle_bool(&mut self, key: &str) {
        let flipped = if self.get_bool(key) { "false" } else { "true" };
        self.set(key, flipped);
    }

    pub fn field_error(&self, key: &str) -> Option<&str> {
        self.field_errors.get(key).map(String::as_str)
    }

    pub fn changed_keys(&self) -> &BTreeSet<String> {
        &self.changed
    }

    pub fn save_control(&self) -> SaveControl {
        if self.saving {
            SaveControl::Saving
        } else if self.changed.is_empty() || !self.field_errors.is_empty() {
            SaveControl::Blocked
        } else {
            SaveControl::Ready(self.changed.len())
        }
    }

    /// Writes every changed setting concurrently. The snapshot is replaced
    /// only when all writes succeed, so a partial failure leaves the dirty
    /// set intact for a retry.
    pub async fn save(&mut self, client: &ApiClient) -> ApiResult<usize> {
        // Same gate as the save button: any field error blocks the batch.
        if let Some(message) = self.field_errors.values().next() {
            return Err(ApiError::Validation(message.clone()));
        }
        if self.changed.is_empty() {
            return Ok(0);
        }

        let pending: Vec<(String, String)> = self
            .changed
            .iter()
            .filter_map(|key| self.values.get(key).map(|v| (key.clone(), v.clone())))
            .collect();

        self.saving = true;
        let result = try_join_all(pending.iter().map(|(key, value)| async {
            client
                .update_setting(key, value, None, None)
                .await?
                .into_data("Failed to save settings")
        }))
        .await;
        self.saving = false;

        result?;
        let count = pending.len();
        self.original = self.values.clone();
        self.changed.clear();
        Ok(count)
    }
}

impl Default for SettingsPage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded_page() -> SettingsPage {
        let mut page = SettingsPage::new();
        page.original = BTreeMap::from([
            ("ride_baseFare".to_string(), "40".to_string()),
            ("support_email".to_string(), "help@sakay.to".to_string()),
            ("maintenance_mode".to_string(), "false".to_string()),
        ]);
        page.values = page.original.clone();
        page.state = LoadState::Loaded;
        page
    }

    #[test]
    fn fare_rate_fields_require_positive_numbers() {
        let mut page = loaded_page();

        page.set("ride_baseFare", "0");
        assert_eq!(
            page.field_error("ride_baseFare"),
            Some("Must be a positive number")
        );
        assert_eq!(page.save_control(), SaveControl::Blocked);

        page.set("ride_baseFare", "-5");
        assert!(page.field_error("ride_baseFare").is_some());

        page.set("ride_baseFare", "abc");
        assert!(page.field_error("ride_baseFare").is_some());

        page.set("ride_baseFare", "45");
        assert!(page.field_error("ride_baseFare").is_none());
        assert_eq!(page.save_control(), SaveControl::Ready(1));
    }

    #[test]
    fn support_email_is_format_checked() {
        let mut page = loaded_page();
        page.set("support_email", "not-an-email");
        assert_eq!(
            page.field_error("support_email"),
            Some("Invalid email format")
        );
    }

    #[test]
    fn reverting_a_value_clears_its_dirty_flag() {
        let mut page = loaded_page();

        page.set("ride_baseFare", "45");
        assert!(page.changed_keys().contains("ride_baseFare"));

        page.set("ride_baseFare", "40");
        assert!(page.changed_keys().is_empty());
        assert_eq!(page.save_control(), SaveControl::Blocked);
    }

    #[tokio::test]
    async fn save_refuses_while_a_field_error_is_present() {
        use crate::client::auth::MemoryTokenStore;
        use crate::config::Config;
        use std::sync::Arc;

        let client = ApiClient::new(&Config::default(), Arc::new(MemoryTokenStore::default()));
        let mut page = loaded_page();
        page.set("ride_baseFare", "0");

        // Returns before any request is issued.
        let err = page.save(&client).await.unwrap_err();
        assert_eq!(err.user_message(), "Must be a positive number");
        assert!(page.changed_keys().contains("ride_baseFare"));
    }

    #[test]
    fn toggling_a_bool_marks_it_changed() {
        let mut page = loaded_page();
        assert!(!page.get_bool("maintenance_mode"));

        page.toggle_bool("maintenance_mode");
        assert!(page.get_bool("maintenance_mode"));
        assert!(page.changed_keys().contains("maintenance_mode"));

        page.toggle_bool("maintenance_mode");
        assert!(page.changed_keys().is_empty());
    }
}
