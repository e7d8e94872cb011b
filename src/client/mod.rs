//! Typed client for the Sakay backend's admin REST API.
//!
//! Every backend call answers with the uniform envelope
//! `{success, data, errors, warnings, pagination}`. Non-2xx responses become
//! [`ApiError::Api`] carrying the backend's `errors` array verbatim; a request
//! that never reaches the server becomes [`ApiError::Network`]. Callers must
//! still check `success` on 2xx envelopes for application-level failures.

pub mod auth;

use std::sync::Arc;

use reqwest::multipart;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::error::{ApiError, ApiResult, GENERIC_ERROR};
use crate::models::{
    AdminActionLog, AppSetting, Booking, BookingStatus, BookingType, DashboardStats, Driver,
    Motorcycle, Review, SettingUpdate, User, UserType, UserUpdate, Vehicle, VehicleUpdate,
};
use crate::utils::validate::is_fare_rate_key;
use auth::TokenStore;

/// Client-side cap on profile picture uploads.
pub const MAX_PROFILE_PICTURE_BYTES: usize = 2 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub page_size: u32,
    pub total_items: u64,
    pub total_pages: u32,
}

/// Uniform response wrapper returned by every backend call.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

impl<T> Envelope<T> {
    /// Promote an application-level failure (`success: false` or missing data)
    /// into an error, keeping the backend's messages.
    pub fn into_data(self, fallback: &str) -> ApiResult<T> {
        if self.success {
            if let Some(data) = self.data {
                return Ok(data);
            }
        }
        let errors = if self.errors.is_empty() {
            vec![fallback.to_string()]
        } else {
            self.errors
        };
        Err(ApiError::Api { status: 200, errors })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: User,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub file_url: String,
}

/// In-memory file attachment for multipart uploads.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserFilters {
    pub user_type: Option<UserType>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingFilters {
    pub status: Option<BookingStatus>,
    pub booking_type: Option<BookingType>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewFilters {
    pub rating: Option<u8>,
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    auth: Arc<dyn TokenStore>,
}

impl ApiClient {
    pub fn new(config: &Config, auth: Arc<dyn TokenStore>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            auth,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send_with_fallback<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
        fallback: &str,
    ) -> ApiResult<Envelope<T>> {
        let req = match self.auth.token() {
            Some(token) => req.bearer_auth(token),
            None => req,
        };

        let resp = req.send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            let errors = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("errors").cloned())
                .and_then(|e| serde_json::from_value::<Vec<String>>(e).ok())
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| vec![fallback.to_string()]);
            return Err(ApiError::Api {
                status: status.as_u16(),
                errors,
            });
        }

        // A 2xx body that is not the envelope is a decode failure, not a
        // transport one.
        Ok(serde_json::from_str(&body)?)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
    ) -> ApiResult<Envelope<T>> {
        self.send_with_fallback(req, GENERIC_ERROR).await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ApiResult<Envelope<T>> {
        self.send(self.http.get(self.url(path)).query(query)).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<Envelope<T>> {
        self.send(self.http.post(self.url(path)).json(body)).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<Envelope<T>> {
        self.send(self.http.put(self.url(path)).json(body)).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResult<Envelope<T>> {
        self.send(self.http.delete(self.url(path))).await
    }

    // ============ Auth ============

    /// Login and persist the returned token on success.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<Envelope<LoginData>> {
        let body = serde_json::json!({ "email": email, "password": password });
        let response: Envelope<LoginData> = self.post("/api/auth/login", &body).await?;

        if response.success {
            if let Some(data) = &response.data {
                self.auth.set_token(Some(data.token.clone()));
            }
        }

        Ok(response)
    }

    pub fn logout(&self) {
        self.auth.set_token(None);
    }

    pub async fn get_profile(&self) -> ApiResult<Envelope<User>> {
        self.get("/api/auth/profile", &[]).await
    }

    // ============ Dashboard ============

    pub async fn dashboard_stats(&self) -> ApiResult<Envelope<DashboardStats>> {
        self.get("/api/admin/stats", &[]).await
    }

    // ============ Action Logs ============

    pub async fn action_logs(
        &self,
        page: u32,
        page_size: u32,
    ) -> ApiResult<Envelope<Vec<AdminActionLog>>> {
        let query = [
            ("page", page.to_string()),
            ("pageSize", page_size.to_string()),
        ];
        self.get("/api/admin/action-logs", &query).await
    }

    // ============ Settings ============

    pub async fn settings(&self) -> ApiResult<Envelope<Vec<AppSetting>>> {
        self.get("/api/admin/settings", &[]).await
    }

    pub async fn update_setting(
        &self,
        key: &str,
        value: &str,
        description: Option<&str>,
        category: Option<&str>,
    ) -> ApiResult<Envelope<AppSetting>> {
        let body = SettingUpdate {
            value: value.to_string(),
            description: description.map(str::to_string),
            category: Self::setting_category(key, category),
        };
        self.put(&format!("/api/admin/settings/{key}"), &body).await
    }

    /// Fare-rate keys always land in the `FareRates` category.
    fn setting_category(key: &str, category: Option<&str>) -> String {
        if is_fare_rate_key(key) {
            "FareRates".to_string()
        } else {
            category.unwrap_or("General").to_string()
        }
    }

    // ============ Users ============

    pub async fn list_users(
        &self,
        page: u32,
        page_size: u32,
        filters: &UserFilters,
        search: Option<&str>,
    ) -> ApiResult<Envelope<Vec<User>>> {
        let mut query = vec![
            ("page", page.to_string()),
            ("pageSize", page_size.to_string()),
        ];
        if let Some(user_type) = filters.user_type {
            query.push(("userType", user_type.as_str().to_string()));
        }
        if let Some(search) = search.filter(|s| !s.is_empty()) {
            query.push(("search", search.to_string()));
        }
        if let Some(is_active) = filters.is_active {
            query.push(("isActive", is_active.to_string()));
        }
        self.get("/api/admin/users", &query).await
    }

    pub async fn get_user(&self, user_id: Uuid) -> ApiResult<Envelope<User>> {
        self.get(&format!("/api/admin/users/{user_id}"), &[]).await
    }

    pub async fn update_user(
        &self,
        user_id: Uuid,
        update: &UserUpdate,
    ) -> ApiResult<Envelope<User>> {
        self.put(&format!("/api/admin/users/{user_id}"), update)
            .await
    }

    pub async fn update_user_status(
        &self,
        user_id: Uuid,
        is_active: bool,
    ) -> ApiResult<Envelope<User>> {
        let body = serde_json::json!({ "isActive": is_active });
        self.put(&format!("/api/admin/users/{user_id}/status"), &body)
            .await
    }

    /// Riders are users filtered by type on the same endpoint.
    pub async fn list_riders(
        &self,
        page: u32,
        page_size: u32,
        is_active: Option<bool>,
        search: Option<&str>,
    ) -> ApiResult<Envelope<Vec<User>>> {
        let filters = UserFilters {
            user_type: Some(UserType::Rider),
            is_active,
        };
        self.list_users(page, page_size, &filters, search).await
    }

    // ============ Drivers ============

    pub async fn get_driver(&self, driver_id: Uuid) -> ApiResult<Envelope<Driver>> {
        self.get(&format!("/api/admin/drivers/{driver_id}"), &[])
            .await
    }

    pub async fn update_driver_vehicle(
        &self,
        driver_id: Uuid,
        update: &VehicleUpdate,
    ) -> ApiResult<Envelope<Vehicle>> {
        self.put(&format!("/api/admin/drivers/{driver_id}/vehicle"), update)
            .await
    }

    /// Driver registration bypasses the JSON request body and sends multipart
    /// form data, still parsing the JSON response envelope.
    pub async fn register_driver(&self, form: multipart::Form) -> ApiResult<Envelope<Driver>> {
        let req = self
            .http
            .post(self.url("/api/admin/drivers/register"))
            .multipart(form);
        self.send_with_fallback(req, "Registration failed").await
    }

    // ============ Bookings ============

    pub async fn list_bookings(
        &self,
        page: u32,
        page_size: u32,
        filters: &BookingFilters,
        search: Option<&str>,
    ) -> ApiResult<Envelope<Vec<Booking>>> {
        let mut query = vec![
            ("page", page.to_string()),
            ("pageSize", page_size.to_string()),
        ];
        if let Some(status) = filters.status {
            query.push(("status", status.as_str().to_string()));
        }
        if let Some(booking_type) = filters.booking_type {
            let value = match booking_type {
                BookingType::Ride => "Ride",
                BookingType::Delivery => "Delivery",
            };
            query.push(("bookingType", value.to_string()));
        }
        if let Some(search) = search.filter(|s| !s.is_empty()) {
            query.push(("search", search.to_string()));
        }
        self.get("/api/admin/bookings", &query).await
    }

    pub async fn recent_bookings(&self, limit: u32) -> ApiResult<Envelope<Vec<Booking>>> {
        let query = [("page", "1".to_string()), ("pageSize", limit.to_string())];
        self.get("/api/admin/bookings", &query).await
    }

    // ============ Reviews ============

    pub async fn list_reviews(
        &self,
        page: u32,
        page_size: u32,
        filters: &ReviewFilters,
        search: Option<&str>,
    ) -> ApiResult<Envelope<Vec<Review>>> {
        let mut query = vec![
            ("page", page.to_string()),
            ("pageSize", page_size.to_string()),
        ];
        if let Some(rating) = filters.rating {
            query.push(("rating", rating.to_string()));
        }
        if let Some(search) = search.filter(|s| !s.is_empty()) {
            query.push(("search", search.to_string()));
        }
        self.get("/api/admin/reviews", &query).await
    }

    pub async fn delete_review(&self, review_id: i64) -> ApiResult<Envelope<bool>> {
        self.delete(&format!("/api/admin/reviews/{review_id}"))
            .await
    }

    // ============ Motorcycles (public endpoint) ============

    pub async fn list_motorcycles(&self) -> ApiResult<Envelope<Vec<Motorcycle>>> {
        self.get("/api/motorcycle", &[]).await
    }

    // ============ Uploads ============

    /// Size and MIME type are checked client-side before any network call.
    pub fn validate_profile_picture(file: &UploadFile) -> ApiResult<()> {
        if !file.content_type.starts_with("image/") {
            return Err(ApiError::Validation(
                "Profile picture must be an image".to_string(),
            ));
        }
        if file.bytes.len() > MAX_PROFILE_PICTURE_BYTES {
            return Err(ApiError::Validation(
                "Image must be smaller than 2MB".to_string(),
            ));
        }
        Ok(())
    }

    pub async fn upload_profile_picture(
        &self,
        file: UploadFile,
    ) -> ApiResult<Envelope<UploadedFile>> {
        Self::validate_profile_picture(&file)?;

        let part = multipart::Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.content_type)?;
        let form = multipart::Form::new().part("file", part);

        let req = self
            .http
            .post(self.url("/api/admin/uploads/profile-picture"))
            .multipart(form);
        self.send(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_deserializes_backend_pagination() {
        let json = r#"{
            "success": true,
            "data": [],
            "errors": [],
            "warnings": [],
            "pagination": {
                "currentPage": 1,
                "pageSize": 20,
                "totalItems": 97,
                "totalPages": 5
            }
        }"#;

        let env: Envelope<Vec<User>> = serde_json::from_str(json).unwrap();
        assert!(env.success);
        let pagination = env.pagination.unwrap();
        assert_eq!(pagination.current_page, 1);
        assert_eq!(pagination.total_items, 97);
        assert_eq!(pagination.total_pages, 5);
    }

    #[test]
    fn envelope_tolerates_missing_optional_arrays() {
        let env: Envelope<bool> =
            serde_json::from_str(r#"{ "success": true, "data": true }"#).unwrap();
        assert_eq!(env.into_data("fallback").unwrap(), true);
    }

    #[test]
    fn into_data_promotes_application_failure() {
        let env: Envelope<bool> = serde_json::from_str(
            r#"{ "success": false, "data": null, "errors": ["Unauthorized"] }"#,
        )
        .unwrap();
        let err = env.into_data("fallback").unwrap_err();
        assert_eq!(err.user_message(), "Unauthorized");
    }

    #[test]
    fn into_data_uses_fallback_when_backend_is_silent() {
        let env: Envelope<bool> =
            serde_json::from_str(r#"{ "success": false, "data": null }"#).unwrap();
        let err = env.into_data("Failed to load users").unwrap_err();
        assert_eq!(err.user_message(), "Failed to load users");
    }

    #[test]
    fn fare_rate_keys_force_the_fare_rates_category() {
        assert_eq!(
            ApiClient::setting_category("ride_baseFare", None),
            "FareRates"
        );
        assert_eq!(
            ApiClient::setting_category("delivery_perKm", Some("General")),
            "FareRates"
        );
        assert_eq!(
            ApiClient::setting_category("site_name", Some("Branding")),
            "Branding"
        );
        assert_eq!(ApiClient::setting_category("site_name", None), "General");
    }

    #[test]
    fn profile_picture_preflight_rejects_bad_uploads() {
        let oversized = UploadFile {
            file_name: "big.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![0; MAX_PROFILE_PICTURE_BYTES + 1],
        };
        let err = ApiClient::validate_profile_picture(&oversized).unwrap_err();
        assert_eq!(err.user_message(), "Image must be smaller than 2MB");

        let not_an_image = UploadFile {
            file_name: "doc.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            bytes: vec![0; 16],
        };
        let err = ApiClient::validate_profile_picture(&not_an_image).unwrap_err();
        assert_eq!(err.user_message(), "Profile picture must be an image");

        let ok = UploadFile {
            file_name: "avatar.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            bytes: vec![0; 1024],
        };
        assert!(ApiClient::validate_profile_picture(&ok).is_ok());
    }
}
