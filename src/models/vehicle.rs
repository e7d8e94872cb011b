use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserSummary;

/// Free-standing vehicle status, editable independently of other fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleStatus {
    Available,
    Booked,
    Maintenance,
    Inactive,
    Pending,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "Available",
            VehicleStatus::Booked => "Booked",
            VehicleStatus::Maintenance => "Maintenance",
            VehicleStatus::Inactive => "Inactive",
            VehicleStatus::Pending => "Pending",
        }
    }
}

/// Full vehicle record as returned by the driver endpoints.
///
/// Plate, chassis and engine numbers are opaque strings; the backend owns any
/// format rules beyond non-emptiness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: i64,
    pub rider_data_id: i64,
    pub vehicle_type: String,
    pub plate_number: String,
    pub maker: String,
    pub model: String,
    pub color: String,
    pub manufactured_year: String,
    pub chassis_number: String,
    pub engine_number: String,
    pub transmission_type: String,
    pub or_photo_url: Option<String>,
    pub cr_photo_url: Option<String>,
    pub front_photo_url: Option<String>,
    pub back_photo_url: Option<String>,
    pub side_photo_url: Option<String>,
    pub ownership_type: String,
    pub description: Option<String>,
    pub status: VehicleStatus,
    pub price_per_hour: Option<f64>,
    pub price_per_km: Option<f64>,
    pub is_verified: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Public motorcycle listing shape from `/api/motorcycle`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Motorcycle {
    pub id: i64,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub plate_number: String,
    pub color: String,
    pub price_per_km: Option<f64>,
    pub price_per_hour: Option<f64>,
    pub status: VehicleStatus,
    pub owner_id: Uuid,
    pub owner: Option<UserSummary>,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotorcycleSummary {
    pub id: i64,
    pub brand: String,
    pub model: String,
    pub plate_number: String,
}

/// Partial vehicle update sent to the driver-vehicle endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plate_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufactured_year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_km: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_hour: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<VehicleStatus>,
}

impl VehicleUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
