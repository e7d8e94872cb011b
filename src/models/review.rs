use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::booking::BookingSummary;
use super::user::UserSummary;

/// Customer review of a completed booking; rating is an integer from 1 to 5.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: i64,
    pub booking_id: i64,
    pub customer_id: Uuid,
    pub rider_id: Option<Uuid>,
    pub motorcycle_id: Option<i64>,
    pub rating: u8,
    pub comment: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub customer: Option<UserSummary>,
    pub rider: Option<UserSummary>,
    pub booking: Option<BookingSummary>,
}
