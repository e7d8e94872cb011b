use crate::client::ApiClient;
use crate::models::{User, UserUpdate};
use crate::notify::Notifier;
use crate::utils::validate::is_valid_email;

use super::SubmitState;

/// Outcome of a save attempt that did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// Nothing differed from the loaded record; no request was made.
    NoChanges,
    /// The backend accepted the update and returned the fresh record.
    Updated(User),
}

/// Edit-user modal. Fields are compared against the record the modal was
/// opened with, and only the changed ones are sent.
#[derive(Debug, Clone)]
pub struct UserEditForm {
    original: User,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub error: Option<String>,
    pub saving: bool,
}

impl UserEditForm {
    pub fn new(user: &User) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            phone_number: user.phone_number.clone().unwrap_or_default(),
            original: user.clone(),
            error: None,
            saving: false,
        }
    }

    pub fn set_first_name(&mut self, value: impl Into<String>) {
        self.first_name = value.into();
        self.error = None;
    }

    pub fn set_last_name(&mut self, value: impl Into<String>) {
        self.last_name = value.into();
        self.error = None;
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.email = value.into();
        self.error = None;
    }

    pub fn set_phone_number(&mut self, value: impl Into<String>) {
        self.phone_number = value.into();
        self.error = None;
    }

    fn validate(&self) -> Result<(), String> {
        if self.first_name.trim().is_empty() {
            return Err("First name is required".to_string());
        }
        if self.last_name.trim().is_empty() {
            return Err("Last name is required".to_string());
        }
        if self.email.trim().is_empty() {
            return Err("Email is required".to_string());
        }
        if !is_valid_email(self.email.trim()) {
            return Err("Invalid email format".to_string());
        }
        Ok(())
    }

    fn diff(&self) -> UserUpdate {
        let mut update = UserUpdate::default();
        if self.first_name != self.original.first_name {
            update.first_name = Some(self.first_name.clone());
        }
        if self.last_name != self.original.last_name {
            update.last_name = Some(self.last_name.clone());
        }
        if self.email != self.original.email {
            update.email = Some(self.email.clone());
        }
        let original_phone = self.original.phone_number.clone().unwrap_or_default();
        if self.phone_number != original_phone {
            update.phone_number = Some(self.phone_number.clone());
        }
        update
    }

    /// What a save would send right now, or the validation error blocking it.
    pub fn pending_update(&self) -> Result<UserUpdate, String> {
        self.validate()?;
        Ok(self.diff())
    }

    pub fn submit_state(&self) -> SubmitState {
        if self.saving {
            SubmitState::Saving
        } else if self.validate().is_err() {
            SubmitState::Blocked
        } else {
            SubmitState::Ready
        }
    }

    pub async fn save(
        &mut self,
        client: &ApiClient,
        notifier: &mut dyn Notifier,
    ) -> Option<SaveOutcome> {
        if let Err(message) = self.validate() {
            self.error = Some(message);
            return None;
        }

        let update = self.diff();
        if update.is_empty() {
            notifier.success("No changes to save");
            return Some(SaveOutcome::NoChanges);
        }

        self.saving = true;
        let result = client.update_user(self.original.id, &update).await;
        self.saving = false;

        match result {
            Ok(envelope) if envelope.success && envelope.data.is_some() => {
                notifier.success("User updated successfully");
                envelope.data.map(SaveOutcome::Updated)
            }
            Ok(envelope) => {
                self.error = Some(
                    envelope
                        .errors
                        .first()
                        .cloned()
                        .unwrap_or_else(|| "Failed to update user".to_string()),
                );
                None
            }
            Err(err) => {
                let message = err.user_message();
                self.error = Some(message.clone());
                notifier.error(&message);
                None
            }
        }
    }
}
