use crate::client::ApiClient;
use crate::models::{Booking, DashboardStats};

use super::list::LoadState;

const RECENT_BOOKINGS: u32 = 5;

/// Landing page: platform stats plus the most recent bookings.
pub struct DashboardPage {
    pub stats: Option<DashboardStats>,
    pub recent_bookings: Vec<Booking>,
    pub state: LoadState,
}

impl DashboardPage {
    pub fn new() -> Self {
        Self {
            stats: None,
            recent_bookings: Vec::new(),
            state: LoadState::Idle,
        }
    }

    /// Stats and recent bookings are independent resources; both requests are
    /// issued concurrently and applied in whichever order they resolve.
    pub async fn refresh(&mut self, client: &ApiClient) {
        self.state = LoadState::Loading;

        let (stats_result, recent_result) = tokio::join!(
            client.dashboard_stats(),
            client.recent_bookings(RECENT_BOOKINGS),
        );

        let stats = stats_result.and_then(|env| env.into_data("Failed to load dashboard stats"));
        let recent = recent_result.and_then(|env| env.into_data("Failed to load recent bookings"));

        match (stats, recent) {
            (Ok(stats), Ok(recent)) => {
                self.stats = Some(stats);
                self.recent_bookings = recent;
                self.state = LoadState::Loaded;
            }
            (Err(err), _) | (_, Err(err)) => {
                self.state = LoadState::Errored(err.user_message());
            }
        }
    }
}

impl Default for DashboardPage {
    fn default() -> Self {
        Self::new()
    }
}
