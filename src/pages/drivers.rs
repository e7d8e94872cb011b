use std::time::Duration;

use uuid::Uuid;

use crate::client::{ApiClient, BookingFilters};
use crate::config::Config;
use crate::models::{Booking, Driver, User};
use crate::notify::Notifier;

use super::list::{ListPage, LoadState};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RiderFilters {
    pub is_active: Option<bool>,
}

/// Drivers list: riders fetched through the users endpoint.
pub struct DriversPage {
    pub list: ListPage<User, RiderFilters>,
}

impl DriversPage {
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
        let is_active = self.list.filters().is_active;
        let search = self.list.search_term().map(str::to_string);

        let result = client
            .list_riders(page, page_size, is_active, search.as_deref())
            .await;
        self.list.apply(result, "Failed to load drivers");
    }

    pub async fn toggle_status(
        &mut self,
        client: &ApiClient,
        driver_id: Uuid,
        notifier: &mut dyn Notifier,
    ) {
        let Some(current) = self
            .list
            .items()
            .iter()
            .find(|u| u.id == driver_id)
            .map(|u| u.is_active)
        else {
            return;
        };

        match client.update_user_status(driver_id, !current).await {
            Ok(envelope) if envelope.success => {
                if let Some(driver) = self.list.items_mut().iter_mut().find(|u| u.id == driver_id)
                {
                    driver.is_active = !current;
                }
                let verb = if current { "deactivated" } else { "activated" };
                notifier.success(&format!("Driver {verb} successfully"));
            }
            _ => notifier.error("Failed to update driver status"),
        }
    }
}

/// Full driver profile: the driver record plus their recent bookings.
pub struct DriverProfilePage {
    pub driver_id: Uuid,
    pub driver: Option<Driver>,
    pub bookings: Vec<Booking>,
    pub state: LoadState,
}

impl DriverProfilePage {
    pub fn new(driver_id: Uuid) -> Self {
        Self {
            driver_id,
            driver: None,
            bookings: Vec::new(),
            state: LoadState::Idle,
        }
    }

    /// The profile and the bookings are independent resources; both requests
    /// are issued concurrently and may resolve in either order.
    pub async fn refresh(&mut self, client: &ApiClient) {
        self.state = LoadState::Loading;
        let search = self.driver_id.to_string();
        let filters = BookingFilters::default();

        let (driver_result, bookings_result) = tokio::join!(
            client.get_driver(self.driver_id),
            client.list_bookings(1, 10, &filters, Some(&search)),
        );

        match driver_result.and_then(|env| env.into_data("Failed to load driver")) {
            Ok(driver) => {
                self.driver = Some(driver);
                self.state = LoadState::Loaded;
            }
            Err(err) => {
                self.state = LoadState::Errored(err.user_message());
            }
        }

        // Bookings are best-effort; a failure here leaves the list empty
        // without taking down the whole profile.
        if let Ok(envelope) = bookings_result {
            if envelope.success {
                self.bookings =
                    Self::rides_of(self.driver_id, envelope.data.unwrap_or_default());
            }
        }
    }

    /// The UUID search also matches bookings where the driver rode as a
    /// customer; only their rides as the rider belong on the profile.
    fn rides_of(driver_id: Uuid, bookings: Vec<Booking>) -> Vec<Booking> {
        bookings
            .into_iter()
            .filter(|b| b.rider_id == Some(driver_id))
            .collect()
    }

    pub async fn toggle_status(&mut self, client: &ApiClient, notifier: &mut dyn Notifier) {
        let Some((id, current)) = self
            .driver
            .as_ref()
            .map(|driver| (driver.user.id, driver.user.is_active))
        else {
            return;
        };

        match client.update_user_status(id, !current).await {
            Ok(envelope) if envelope.success => {
                if let Some(driver) = self.driver.as_mut() {
                    driver.user.is_active = !current;
                }
                let verb = if current { "deactivated" } else { "activated" };
                notifier.success(&format!("Driver {verb} successfully"));
            }
            _ => notifier.error("Failed to update driver status"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking(id: i64, customer: Uuid, rider: Option<Uuid>) -> Booking {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "customerId": customer,
            "riderId": rider,
            "bookingType": "Ride",
            "status": "Completed",
            "pickupLocation": "SM City Bacolod",
            "dropoffLocation": "Lacson Street",
            "requestedAt": "2025-02-01T10:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn profile_keeps_only_bookings_ridden_by_the_driver() {
        let driver_id = Uuid::new_v4();
        let other = Uuid::new_v4();

        let fetched = vec![
            booking(1, other, Some(driver_id)),
            // Matched by the UUID search as the customer, not the rider.
            booking(2, driver_id, Some(other)),
            booking(3, other, None),
            booking(4, other, Some(driver_id)),
        ];

        let rides = DriverProfilePage::rides_of(driver_id, fetched);
        let ids: Vec<i64> = rides.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 4]);
    }
}
