use std::sync::OnceLock;

use regex::Regex;

/// Setting-key prefixes whose values are fare rates (numeric, category
/// auto-detected as `FareRates`).
pub const FARE_RATE_PREFIXES: [&str; 4] = ["ride_", "delivery_", "cargo_", "express_"];

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

pub fn is_valid_email(value: &str) -> bool {
    let re = EMAIL_RE
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex compiles"));
    re.is_match(value)
}

/// Parse a user-typed numeric field, accepting only finite values > 0.
pub fn parse_positive(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

pub fn is_fare_rate_key(key: &str) -> bool {
    FARE_RATE_PREFIXES.iter().any(|p| key.starts_with(p))
}
