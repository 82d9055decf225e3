use std::env;

/// Table name used when `MAIN_TABLE` is not set.
pub const DEFAULT_TABLE_NAME: &str = "CryptoPaymentTable";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Name of the single storage table (default: "CryptoPaymentTable")
    pub table_name: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `MAIN_TABLE` - Storage table name (default: "CryptoPaymentTable")
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            table_name: lookup("MAIN_TABLE")
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| DEFAULT_TABLE_NAME.to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.table_name, "CryptoPaymentTable");
    }

    #[test]
    fn test_main_table_override() {
        let config = Config::from_lookup(|name| match name {
            "MAIN_TABLE" => Some("payments-prod".to_string()),
            _ => None,
        });
        assert_eq!(config.table_name, "payments-prod");
    }

    #[test]
    fn test_empty_main_table_falls_back() {
        let config = Config::from_lookup(|_| Some(String::new()));
        assert_eq!(config.table_name, DEFAULT_TABLE_NAME);
    }
}
