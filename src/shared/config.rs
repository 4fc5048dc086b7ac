//! Application configuration. Data paths, ledger backend, window, civil offset.

use serde::Deserialize;

/// Months published by default (current + next).
pub const DEFAULT_WINDOW_MONTHS: u32 = 2;

/// Business civil offset from UTC in hours (JST).
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 9;

/// Where the override ledger is persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerBackend {
    /// `holidays.json` in the data directory.
    #[default]
    Json,
    /// `ledger.db` (libsql) in the data directory.
    Sqlite,
}

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Directory holding the ledger. Read from CLOSED_DAYS_DATA_DIR.
    #[serde(default)]
    pub data_dir: Option<String>,

    /// Ledger store: "json" or "sqlite". Read from CLOSED_DAYS_LEDGER_BACKEND.
    #[serde(default)]
    pub ledger_backend: Option<LedgerBackend>,

    /// Months in the published window (>= 1). Read from CLOSED_DAYS_WINDOW_MONTHS.
    #[serde(default)]
    pub window_months: Option<u32>,

    /// Civil calendar offset from UTC in whole hours. Read from CLOSED_DAYS_UTC_OFFSET_HOURS.
    #[serde(default)]
    pub utc_offset_hours: Option<i32>,
}

impl AppConfig {
    /// Load from CLOSED_DAYS_* env vars (and .env), plus the file named by
    /// CLOSED_DAYS_CONFIG if set. A present but invalid value is an error.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        Self::from_sources(
            config::Environment::with_prefix("CLOSED_DAYS"),
            std::env::var("CLOSED_DAYS_CONFIG").ok(),
        )
    }

    fn from_sources(
        env: config::Environment,
        file: Option<String>,
    ) -> Result<Self, config::ConfigError> {
        let mut c = config::Config::builder();
        c = c.add_source(env.try_parsing(true));
        if let Some(path) = file {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    /// Returns the data directory. Defaults to "./data".
    pub fn data_dir_or_default(&self) -> String {
        self.data_dir.clone().unwrap_or_else(|| "./data".to_string())
    }

    /// Returns the ledger backend. Defaults to JSON.
    pub fn ledger_backend_or_default(&self) -> LedgerBackend {
        self.ledger_backend.unwrap_or_default()
    }

    /// Returns the window length in months. Defaults to 2; never below 1.
    pub fn window_months_or_default(&self) -> u32 {
        self.window_months.unwrap_or(DEFAULT_WINDOW_MONTHS).max(1)
    }

    /// Returns the UTC offset in hours. Defaults to +9.
    pub fn utc_offset_hours_or_default(&self) -> i32 {
        self.utc_offset_hours.unwrap_or(DEFAULT_UTC_OFFSET_HOURS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.data_dir_or_default(), "./data");
        assert_eq!(cfg.ledger_backend_or_default(), LedgerBackend::Json);
        assert_eq!(cfg.window_months_or_default(), 2);
        assert_eq!(cfg.utc_offset_hours_or_default(), 9);
    }

    #[test]
    fn test_window_never_below_one() {
        let cfg = AppConfig {
            window_months: Some(0),
            ..Default::default()
        };
        assert_eq!(cfg.window_months_or_default(), 1);
    }

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let map: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        config::Environment::with_prefix("CLOSED_DAYS").source(Some(map))
    }

    #[test]
    fn test_env_values_are_read() {
        let cfg = AppConfig::from_sources(
            env(&[
                ("CLOSED_DAYS_LEDGER_BACKEND", "sqlite"),
                ("CLOSED_DAYS_WINDOW_MONTHS", "3"),
            ]),
            None,
        )
        .unwrap();
        assert_eq!(cfg.ledger_backend_or_default(), LedgerBackend::Sqlite);
        assert_eq!(cfg.window_months_or_default(), 3);
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let result =
            AppConfig::from_sources(env(&[("CLOSED_DAYS_LEDGER_BACKEND", "postgres")]), None);
        assert!(result.is_err());
    }

    #[test]
    fn test_backend_names() {
        let backend: LedgerBackend = serde_json::from_str(r#""sqlite""#).unwrap();
        assert_eq!(backend, LedgerBackend::Sqlite);
        assert!(serde_json::from_str::<LedgerBackend>(r#""postgres""#).is_err());
    }
}
