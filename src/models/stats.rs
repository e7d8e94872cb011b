use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_users: i64,
    pub total_riders: i64,
    pub total_customers: i64,
    pub total_bookings: i64,
    pub active_bookings: i64,
    pub completed_bookings: i64,
    pub pending_bookings: i64,
    pub cancelled_bookings: i64,
    pub total_revenue: f64,
    pub average_rating: f64,
    pub total_reviews: i64,
    pub total_motorcycles: i64,
    pub available_motorcycles: i64,
    pub bookings_today: i64,
    pub bookings_this_week: i64,
    pub bookings_this_month: i64,
    pub revenue_today: f64,
    pub revenue_this_week: f64,
    pub revenue_this_month: f64,
    pub user_growth: f64,
    pub booking_growth: f64,
    pub revenue_growth: f64,
}
