use std::time::{Duration, Instant};

use crate::client::ApiClient;
use crate::config::Config;
use crate::models::{Motorcycle, VehicleStatus};
use crate::utils::debounce::Debounced;

use super::list::LoadState;

/// Vehicles page over the public motorcycle listing. The endpoint has no
/// search parameter, so search and the status filter apply in memory to the
/// fetched records.
pub struct VehiclesPage {
    motorcycles: Vec<Motorcycle>,
    state: LoadState,
    search: Debounced,
    pub status_filter: Option<VehicleStatus>,
}

impl VehiclesPage {
    pub fn new(config: &Config) -> Self {
        Self {
            motorcycles: Vec::new(),
            state: LoadState::Idle,
            search: Debounced::new(Duration::from_millis(config.search_debounce_ms)),
            status_filter: None,
        }
    }

    pub async fn refresh(&mut self, client: &ApiClient) {
        self.state = LoadState::Loading;
        match client
            .list_motorcycles()
            .await
            .and_then(|env| env.into_data("Failed to load vehicles"))
        {
            Ok(motorcycles) => {
                self.motorcycles = motorcycles;
                self.state = LoadState::Loaded;
            }
            Err(err) => {
                self.state = LoadState::Errored(err.user_message());
            }
        }
    }

    pub fn search_input(&mut self, text: impl Into<String>, now: Instant) {
        self.search.input(text, now);
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        self.search.poll(now).is_some()
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Vehicles matching the status filter and the settled search text
    /// (plate, brand or model, case-insensitive).
    pub fn filtered(&self) -> Vec<&Motorcycle> {
        let needle = self.search.value().to_lowercase();
        self.motorcycles
            .iter()
            .filter(|m| {
                self.status_filter
                    .map(|status| m.status == status)
                    .unwrap_or(true)
            })
            .filter(|m| {
                needle.is_empty()
                    || m.plate_number.to_lowercase().contains(&needle)
                    || m.brand.to_lowercase().contains(&needle)
                    || m.model.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn empty_message(&self) -> String {
        let term = self.search.value();
        if term.is_empty() {
            "No vehicles found".to_string()
        } else {
            format!("No vehicles found matching \"{term}\"")
        }
    }
}
