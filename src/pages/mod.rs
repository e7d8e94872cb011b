pub mod action_logs;
pub mod bookings;
pub mod dashboard;
pub mod drivers;
pub mod list;
pub mod login;
pub mod reviews;
pub mod settings;
pub mod users;
pub mod vehicles;

pub use list::{ListPage, LoadState};
