use std::time::Duration;

use uuid::Uuid;

use crate::client::{ApiClient, BookingFilters, UploadFile, UserFilters};
use crate::config::Config;
use crate::models::{Booking, User, UserUpdate};
use crate::notify::Notifier;

use super::list::{ListPage, LoadState};

/// Users list: server-side search plus userType/isActive filters.
pub struct UsersPage {
    pub list: ListPage<User, UserFilters>,
}

impl UsersPage {
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
            .list_users(page, page_size, &filters, search.as_deref())
            .await;
        self.list.apply(result, "Failed to load users");
    }

    /// Toggle calls the status endpoint with the inverse of the current value
    /// and updates the row in place on success.
    pub async fn toggle_status(
        &mut self,
        client: &ApiClient,
        user_id: Uuid,
        notifier: &mut dyn Notifier,
    ) {
        let Some(current) = self
            .list
            .items()
            .iter()
            .find(|u| u.id == user_id)
            .map(|u| u.is_active)
        else {
            return;
        };

        match client.update_user_status(user_id, !current).await {
            Ok(envelope) if envelope.success => {
                if let Some(user) = self.list.items_mut().iter_mut().find(|u| u.id == user_id) {
                    user.is_active = !current;
                }
                let verb = if current { "deactivated" } else { "activated" };
                notifier.success(&format!("User {verb} successfully"));
            }
            _ => notifier.error("Failed to update user status"),
        }
    }
}

/// User detail page: the record plus any bookings the user was involved in,
/// and the profile picture replacement flow.
pub struct UserProfilePage {
    pub user_id: Uuid,
    pub user: Option<User>,
    pub bookings: Vec<Booking>,
    pub state: LoadState,
    pub uploading_picture: bool,
}

impl UserProfilePage {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            user: None,
            bookings: Vec::new(),
            state: LoadState::Idle,
            uploading_picture: false,
        }
    }

    pub async fn refresh(&mut self, client: &ApiClient) {
        self.state = LoadState::Loading;
        let search = self.user_id.to_string();
        let filters = BookingFilters::default();

        let (user_result, bookings_result) = tokio::join!(
            client.get_user(self.user_id),
            client.list_bookings(1, 10, &filters, Some(&search)),
        );

        match user_result.and_then(|env| env.into_data("Failed to load user")) {
            Ok(user) => {
                self.user = Some(user);
                self.state = LoadState::Loaded;
            }
            Err(err) => {
                self.state = LoadState::Errored(err.user_message());
            }
        }

        if let Ok(envelope) = bookings_result {
            if envelope.success {
                self.bookings =
                    Self::involving(self.user_id, envelope.data.unwrap_or_default());
            }
        }
    }

    /// Bookings where the user took part on either side of the ride.
    fn involving(user_id: Uuid, bookings: Vec<Booking>) -> Vec<Booking> {
        bookings
            .into_iter()
            .filter(|b| b.customer_id == user_id || b.rider_id == Some(user_id))
            .collect()
    }

    /// Upload the image, point the profile at the stored URL, then patch the
    /// local record so the page reflects the change without a refetch.
    pub async fn change_profile_picture(
        &mut self,
        client: &ApiClient,
        file: UploadFile,
        notifier: &mut dyn Notifier,
    ) {
        if self.user.is_none() {
            return;
        }

        self.uploading_picture = true;
        let uploaded = client.upload_profile_picture(file).await;
        let outcome = match uploaded {
            Ok(envelope) if envelope.success && envelope.data.is_some() => {
                let file_url = envelope.data.map(|d| d.file_url).unwrap_or_default();
                let update = UserUpdate {
                    profile_image_url: Some(file_url.clone()),
                    ..Default::default()
                };
                match client.update_user(self.user_id, &update).await {
                    Ok(env) if env.success => {
                        self.apply_profile_image(file_url);
                        Ok(())
                    }
                    Ok(env) => Err(env.errors.first().cloned()),
                    Err(err) => Err(Some(err.user_message())),
                }
            }
            Ok(envelope) => Err(envelope.errors.first().cloned()),
            Err(err) => Err(Some(err.user_message())),
        };
        self.uploading_picture = false;

        match outcome {
            Ok(()) => notifier.success("Profile picture updated successfully"),
            Err(message) => notifier.error(
                message
                    .as_deref()
                    .unwrap_or("Failed to upload profile picture"),
            ),
        }
    }

    fn apply_profile_image(&mut self, url: String) {
        if let Some(user) = self.user.as_mut() {
            user.profile_image_url = Some(url);
        }
    }
}
