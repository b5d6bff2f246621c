use std::env;

#[derive(Clone)]
pub struct Config {
    pub api_base_url: String,
    pub personel_name: String,
    pub default_loan_days: i64,
    pub request_timeout_secs: u64,
    pub profile: String,
}

impl Config {
    pub fn from_env() -> Self {
        let profile = env::var("PROFILE").unwrap_or_else(|_| "default".to_string());

        Self {
            api_base_url: env::var("API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:5208/api".to_string()),
            personel_name: env::var("PERSONEL_NAME").unwrap_or_else(|_| "Admin".to_string()),
            default_loan_days: env::var("DEFAULT_LOAN_DAYS")
                .ok()
                .and_then(|d| d.parse().ok())
                .unwrap_or(15),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(10),
            profile,
        }
    }
}
