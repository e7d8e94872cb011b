use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserSummary;
use super::vehicle::MotorcycleSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingType {
    Ride,
    Delivery,
}

/// Booking lifecycle as reported by the backend. Transitions are monotonic in
/// practice but the client only displays whatever the backend reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    Pending,
    Accepted,
    InProgress,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::Accepted => "Accepted",
            BookingStatus::InProgress => "InProgress",
            BookingStatus::Completed => "Completed",
            BookingStatus::Cancelled => "Cancelled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i64,
    pub customer_id: Uuid,
    pub rider_id: Option<Uuid>,
    pub motorcycle_id: Option<i64>,
    pub booking_type: BookingType,
    pub status: BookingStatus,
    pub pickup_location: String,
    pub pickup_latitude: Option<f64>,
    pub pickup_longitude: Option<f64>,
    pub dropoff_location: String,
    pub dropoff_latitude: Option<f64>,
    pub dropoff_longitude: Option<f64>,
    pub estimated_fare: Option<f64>,
    pub final_fare: Option<f64>,
    pub estimated_distance: Option<f64>,
    pub estimated_duration: Option<f64>,
    pub requested_at: DateTime<Utc>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub customer: Option<UserSummary>,
    pub rider: Option<UserSummary>,
    pub motorcycle: Option<MotorcycleSummary>,
}

impl Booking {
    /// Fare to display: the final fare takes precedence when present.
    pub fn display_fare(&self) -> Option<f64> {
        self.final_fare.or(self.estimated_fare)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSummary {
    pub id: i64,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub status: BookingStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking(estimated: Option<f64>, fin: Option<f64>) -> Booking {
        serde_json::from_value(serde_json::json!({
            "id": 42,
            "customerId": "7f8d2c1a-0b4e-4f6a-9c3d-5e6f7a8b9c0d",
            "bookingType": "Ride",
            "status": "Completed",
            "pickupLocation": "SM City Bacolod",
            "dropoffLocation": "Lacson Street",
            "estimatedFare": estimated,
            "finalFare": fin,
            "requestedAt": "2025-02-01T10:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn final_fare_takes_display_precedence() {
        assert_eq!(booking(Some(85.0), Some(90.5)).display_fare(), Some(90.5));
        assert_eq!(booking(Some(85.0), None).display_fare(), Some(85.0));
        assert_eq!(booking(None, None).display_fare(), None);
    }

    #[test]
    fn status_roundtrips_backend_strings() {
        let status: BookingStatus = serde_json::from_str("\"InProgress\"").unwrap();
        assert_eq!(status, BookingStatus::InProgress);
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"InProgress\"");
    }
}
