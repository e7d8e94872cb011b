use crate::client::ApiClient;

/// Login form. On success the client has already persisted the token, so the
/// caller only needs to navigate away.
#[derive(Debug, Default)]
pub struct LoginPage {
    pub email: String,
    pub password: String,
    pub error: Option<String>,
    pub loading: bool,
}

impl LoginPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn submit(&mut self, client: &ApiClient) -> bool {
        self.error = None;
        if self.email.trim().is_empty() || self.password.is_empty() {
            self.error = Some("Email and password are required".to_string());
            return false;
        }

        self.loading = true;
        let result = client.login(self.email.trim(), &self.password).await;
        self.loading = false;

        match result {
            Ok(envelope) if envelope.success && envelope.data.is_some() => true,
            Ok(envelope) => {
                self.error = Some(
                    envelope
                        .errors
                        .first()
                        .cloned()
                        .unwrap_or_else(|| "Login failed".to_string()),
                );
                false
            }
            Err(err) => {
                self.error = Some(err.user_message());
                false
            }
        }
    }
}
