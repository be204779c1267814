//! Environment-driven settings for the backend.

use std::path::PathBuf;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEnvironment {
    Development,
    Production,
    /// No Odoo at all; every call is served from the mock catalog.
    Offline,
}

impl StoreEnvironment {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Some(Self::Development),
            "production" | "prod" => Some(Self::Production),
            "offline" => Some(Self::Offline),
            _ => None,
        }
    }

    fn default_odoo_url(self) -> &'static str {
        match self {
            Self::Development => "http://localhost:8069",
            Self::Production => "https://alsajigroup.odoo.com",
            Self::Offline => "",
        }
    }
}

#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub environment: StoreEnvironment,
    pub odoo_url: String,
    pub odoo_db: String,
    pub odoo_username: String,
    pub odoo_password: String,
    pub catalog_path: PathBuf,
    pub vehicle_index_path: PathBuf,
    pub use_mock_data: bool,
    pub currency_prefix: String,
    /// Order requests taken while running on the static catalog are appended here.
    pub orders_path: PathBuf,
}

impl BackendConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup; unset keys take the
    /// environment profile's defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let environment_name = lookup("STORE_ENV").unwrap_or("development".to_string());
        let environment = StoreEnvironment::parse(&environment_name).unwrap_or_else(|| {
            tracing::warn!("unknown STORE_ENV {:?}, using development", environment_name);
            StoreEnvironment::Development
        });
        let use_mock_data = match lookup("USE_MOCK_DATA") {
            Some(flag) => matches!(flag.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"),
            None => environment == StoreEnvironment::Offline,
        };

        Self {
            environment,
            odoo_url: lookup("ODOO_URL")
                .unwrap_or(environment.default_odoo_url().to_string())
                .trim_end_matches('/')
                .to_string(),
            odoo_db: lookup("ODOO_DB").unwrap_or("alsaji_copy".to_string()),
            odoo_username: lookup("ODOO_USERNAME").unwrap_or_default(),
            odoo_password: lookup("ODOO_PASSWORD").unwrap_or_default(),
            catalog_path: PathBuf::from(lookup("CATALOG_PATH").unwrap_or("data/json/catalog.json".to_string())),
            vehicle_index_path: PathBuf::from(
                lookup("VEHICLE_INDEX_PATH").unwrap_or("data/json/vehicle_compatibility_index.js".to_string()),
            ),
            use_mock_data,
            currency_prefix: lookup("CURRENCY_PREFIX").unwrap_or(common::store_const::DEFAULT_CURRENCY_PREFIX.to_string()),
            orders_path: PathBuf::from(lookup("ORDERS_PATH").unwrap_or("data/orders/orders.jsonl".to_string())),
        }
    }

    /// Whether the service account has enough settings to reach Odoo.
    pub fn has_odoo_credentials(&self) -> bool {
        !self.odoo_url.is_empty() && !self.odoo_username.is_empty() && !self.odoo_password.is_empty()
    }
}

pub fn get_backend_config() -> &'static BackendConfig {
    static CONFIG: OnceLock<BackendConfig> = OnceLock::new();
    CONFIG.get_or_init(|| {
        let config = BackendConfig::from_env();
        tracing::info!(
            "backend config: env={:?} odoo_url={} mock={}",
            config.environment,
            config.odoo_url,
            config.use_mock_data
        );
        config
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> BackendConfig {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        BackendConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn offline_profile_implies_mock_data() {
        let config = config_from(&[("STORE_ENV", "offline")]);
        assert_eq!(config.environment, StoreEnvironment::Offline);
        assert!(config.use_mock_data);
        assert!(!config.has_odoo_credentials());
        assert_eq!(config.orders_path, PathBuf::from("data/orders/orders.jsonl"));
    }

    #[test]
    fn explicit_values_override_the_profile() {
        let config = config_from(&[
            ("STORE_ENV", "production"),
            ("ODOO_URL", "https://erp.example.com/"),
            ("USE_MOCK_DATA", "true"),
            ("CURRENCY_PREFIX", "IQD "),
        ]);
        assert_eq!(config.odoo_url, "https://erp.example.com");
        assert!(config.use_mock_data);
        assert_eq!(config.currency_prefix, "IQD ");
    }

    #[test]
    fn unknown_environment_falls_back_to_development() {
        let config = config_from(&[("STORE_ENV", "staging")]);
        assert_eq!(config.environment, StoreEnvironment::Development);
        assert_eq!(config.odoo_url, "http://localhost:8069");
        assert!(!config.use_mock_data);
    }
}
