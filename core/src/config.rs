//! Where the client points and how long it waits.

use std::time::Duration;

use crate::error::ConfigError;

pub const HOST_ENV: &str = "EMPLOYEE_API_HOST";
pub const PORT_ENV: &str = "EMPLOYEE_API_PORT";
pub const TIMEOUT_ENV: &str = "EMPLOYEE_API_TIMEOUT_SECS";

/// Connection settings for an `EmployeeClient`.
///
/// `host` includes the scheme (`http://localhost`). `timeout` is applied by
/// the transport; `None` waits indefinitely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "http://localhost".to_string(),
            port: 8080,
            timeout: None,
        }
    }
}

impl ClientConfig {
    /// Read settings from the process environment, falling back to
    /// `ClientConfig::default()` for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(host) = lookup(HOST_ENV) {
            config.host = host;
        }
        if let Some(port) = lookup(PORT_ENV) {
            config.port = port.trim().parse().map_err(|_| ConfigError { key: PORT_ENV, value: port })?;
        }
        if let Some(secs) = lookup(TIMEOUT_ENV) {
            let parsed: u64 = secs.trim().parse().map_err(|_| ConfigError {
                key: TIMEOUT_ENV,
                value: secs.clone(),
            })?;
            config.timeout = Some(Duration::from_secs(parsed));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn unset_variables_use_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn variables_override_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[
            (HOST_ENV, "https://hr.example.com"),
            (PORT_ENV, "8443"),
            (TIMEOUT_ENV, "30"),
        ]))
        .unwrap();
        assert_eq!(config.host, "https://hr.example.com");
        assert_eq!(config.port, 8443);
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn bad_port_is_rejected() {
        let err = ClientConfig::from_lookup(lookup(&[(PORT_ENV, "eighty")])).unwrap_err();
        assert_eq!(err.key, PORT_ENV);
        assert_eq!(err.value, "eighty");
    }

    #[test]
    fn bad_timeout_is_rejected() {
        let err = ClientConfig::from_lookup(lookup(&[(TIMEOUT_ENV, "-1")])).unwrap_err();
        assert_eq!(err.key, TIMEOUT_ENV);
    }
}
