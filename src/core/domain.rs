use std::env;
use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::fees::calculator::FeeSchedule;

// Configuration abstracts config options for the circulation engines
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Configuration {
    pub branch_id: String,
    pub max_borrowed_books: usize,
    pub book_loan_days: i64,
    pub store_timeout_millis: u64,
    pub fees: FeeSchedule,
}

impl Configuration {
    pub fn new(branch_id: &str) -> Self {
        Configuration {
            branch_id: branch_id.to_string(),
            max_borrowed_books: 5,
            book_loan_days: 14,
            store_timeout_millis: 5000,
            fees: FeeSchedule::default(),
        }
    }

    // overrides defaults with LMS_* environment variables when they parse
    pub fn from_env(branch_id: &str) -> Self {
        let mut config = Configuration::new(branch_id);
        if let Some(max) = env_number("LMS_MAX_BORROWED_BOOKS") {
            config.max_borrowed_books = max as usize;
        }
        if let Some(days) = env_number("LMS_BOOK_LOAN_DAYS") {
            config.book_loan_days = days as i64;
        }
        if let Some(millis) = env_number("LMS_STORE_TIMEOUT_MILLIS") {
            config.store_timeout_millis = millis;
        }
        config
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_millis)
    }
}

fn env_number(name: &str) -> Option<u64> {
    let raw = env::var(name).ok()?;
    match raw.trim().parse::<u64>() {
        Ok(n) if n > 0 => Some(n),
        _ => {
            tracing::warn!(variable = name, value = raw.as_str(), "ignoring invalid configuration override");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;
    use crate::core::domain::Configuration;

    #[tokio::test]
    async fn test_should_build_config() {
        let config = Configuration::new("test");
        assert_eq!(5, config.max_borrowed_books);
        assert_eq!(14, config.book_loan_days);
        assert_eq!(Duration::from_secs(5), config.store_timeout());
        assert_eq!(1500, config.fees.max_fee_cents);
    }

    #[tokio::test]
    async fn test_should_override_config_from_env() {
        std::env::set_var("LMS_STORE_TIMEOUT_MILLIS", "250");
        std::env::set_var("LMS_BOOK_LOAN_DAYS", "not-a-number");
        let config = Configuration::from_env("test");
        assert_eq!(250, config.store_timeout_millis);
        assert_eq!(14, config.book_loan_days);
        std::env::remove_var("LMS_STORE_TIMEOUT_MILLIS");
        std::env::remove_var("LMS_BOOK_LOAN_DAYS");
    }
}
