use std::env;
use std::path::PathBuf;

#[derive(Clone)]
pub struct Config {
    pub api_base_url: String,
    pub page_size: u32,
    pub search_debounce_ms: u64,
    pub token_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            api_base_url: env::var("API_BASE_URL")
                .unwrap_or_else(|_| "https://sakay.to".to_string()),
            page_size: env::var("PAGE_SIZE")
                .unwrap_or_else(|_| "20".to_string())
                .parse()
                .expect("PAGE_SIZE must be a number"),
            search_debounce_ms: env::var("SEARCH_DEBOUNCE_MS")
                .unwrap_or_else(|_| "300".to_string())
                .parse()
                .expect("SEARCH_DEBOUNCE_MS must be a number"),
            token_dir: env::var("TOKEN_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "https://sakay.to".to_string(),
            page_size: 20,
            search_debounce_ms: 300,
            token_dir: PathBuf::from("."),
        }
    }
}
