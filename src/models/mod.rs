pub mod booking;
pub mod log;
pub mod review;
pub mod settings;
pub mod stats;
pub mod user;
pub mod vehicle;

pub use booking::{Booking, BookingStatus, BookingSummary, BookingType};
pub use log::AdminActionLog;
pub use review::Review;
pub use settings::{AppSetting, SettingUpdate};
pub use stats::DashboardStats;
pub use user::{Driver, RiderData, User, UserSummary, UserType, UserUpdate};
pub use vehicle::{Motorcycle, MotorcycleSummary, Vehicle, VehicleStatus, VehicleUpdate};
