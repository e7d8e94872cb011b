pub mod client;
pub mod config;
pub mod error;
pub mod forms;
pub mod models;
pub mod notify;
pub mod pages;
pub mod utils;

pub use client::ApiClient;
pub use config::Config;
pub use error::{ApiError, ApiResult};
