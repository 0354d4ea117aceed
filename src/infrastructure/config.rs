use crate::application::table::MissingValuePolicy;
use serde::Deserialize;
use std::collections::HashMap;

/// Environment variables with this prefix override the file, e.g.
/// `TELEMETRY_VIEW__BACKEND__BASE_URL`.
const ENV_PREFIX: &str = "TELEMETRY_VIEW";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    pub backend: BackendSettings,
    #[serde(default)]
    pub table: TableSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendSettings {
    pub base_url: String,
    #[serde(default = "default_locations_path")]
    pub locations_path: String,
    #[serde(default = "default_telemetry_path")]
    pub telemetry_path: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct TableSettings {
    #[serde(default)]
    pub missing_value_policy: MissingValuePolicy,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            locations_path: default_locations_path(),
            telemetry_path: default_telemetry_path(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_locations_path() -> String {
    "/locations".to_string()
}

fn default_telemetry_path() -> String {
    "/locations/${id}/telemetry".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

pub fn load_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/app").required(false))
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// Replace template variables in a path, URL-encoding each value
pub fn prepare_path(template: &str, vars: &HashMap<String, String>) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        let placeholder = format!("${{{}}}", key);
        result = result.replace(&placeholder, &urlencoding::encode(value));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> AppConfig {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_prepare_path() {
        let mut vars = HashMap::new();
        vars.insert("id".to_string(), "north field/2".to_string());

        let result = prepare_path("/locations/${id}/telemetry", &vars);

        assert_eq!(result, "/locations/north%20field%2F2/telemetry");
    }

    #[test]
    fn test_defaults_fill_missing_sections() {
        let config = parse(
            r#"
            [backend]
            base_url = "http://backend:4000"
            "#,
        );

        assert_eq!(config.server.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.backend.base_url, "http://backend:4000");
        assert_eq!(config.backend.telemetry_path, "/locations/${id}/telemetry");
        assert_eq!(config.backend.timeout_secs, 10);
        assert_eq!(config.table.missing_value_policy, MissingValuePolicy::Falsy);
    }

    #[test]
    fn test_missing_value_policy_override() {
        let config = parse(
            r#"
            [backend]
            base_url = "http://backend:4000"

            [table]
            missing_value_policy = "null_only"
            "#,
        );

        assert_eq!(config.table.missing_value_policy, MissingValuePolicy::NullOnly);
    }
}
