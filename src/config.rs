//! Run configuration.
//!
//! Settings come from a JSON file (path in `COMBINE_NET_CONFIG`), then
//! individual environment variables override single fields.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::path::Path;

pub const CONFIG_ENV: &str = "COMBINE_NET_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "combine_net.json";
pub const DEFAULT_PAC_OUTPUT: &str = "pacnet.txt";
pub const DEFAULT_OUTPUT: &str = "intranet.network";
pub const DEFAULT_MAX_PASSES: usize = 8;
pub const DEFAULT_DNS_TIMEOUT_MSEC: u64 = 5000;

fn default_pac_output() -> String {
    DEFAULT_PAC_OUTPUT.to_string()
}

fn default_net_files() -> Vec<String> {
    vec![DEFAULT_PAC_OUTPUT.to_string(), "intranet.txt".to_string()]
}

fn default_output() -> String {
    DEFAULT_OUTPUT.to_string()
}

fn default_max_passes() -> usize {
    DEFAULT_MAX_PASSES
}

fn default_dns_timeout_ms() -> u64 {
    DEFAULT_DNS_TIMEOUT_MSEC
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// PAC script to extract; the PAC stage is skipped when unset.
    #[serde(default)]
    pub pac_file: Option<String>,
    /// Where the PAC stage writes its networks.
    #[serde(default = "default_pac_output")]
    pub pac_output: String,
    /// Network list files combined, in order.
    #[serde(default = "default_net_files")]
    pub net_files: Vec<String>,
    #[serde(default = "default_output")]
    pub output: String,
    /// Upper bound on reconcile passes.
    #[serde(default = "default_max_passes")]
    pub max_passes: usize,
    #[serde(default = "default_dns_timeout_ms")]
    pub dns_timeout_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            pac_file: None,
            pac_output: default_pac_output(),
            net_files: default_net_files(),
            output: default_output(),
            max_passes: default_max_passes(),
            dns_timeout_ms: default_dns_timeout_ms(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON, reporting the failing field path.
    pub fn from_json(json: &str) -> Result<Settings, Box<dyn Error>> {
        let mut deserializer = serde_json::Deserializer::from_str(json);
        let settings: Settings = serde_path_to_error::deserialize(&mut deserializer)
            .map_err(|e| format!("Error parsing settings: path={} error={}", e.path(), e))?;
        Ok(settings)
    }

    /// Read settings from `config_file`, or defaults if it does not exist.
    pub fn read(config_file: &str) -> Result<Settings, Box<dyn Error>> {
        if !Path::new(config_file).exists() {
            log::info!("No config file {config_file}, using defaults");
            return Ok(Settings::default());
        }
        log::info!("Using config file: {config_file}");
        let json = std::fs::read_to_string(config_file)
            .map_err(|e| format!("Error reading config file {config_file}: {e}"))?;
        Settings::from_json(&json)
    }

    /// Read the configured file and apply environment overrides.
    pub fn load() -> Result<Settings, Box<dyn Error>> {
        let config_file =
            std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        let mut settings = Settings::read(&config_file)?;
        settings.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    /// Override fields from `COMBINE_NET_*` variables looked up through `var`.
    pub fn apply_overrides<F>(&mut self, var: F) -> Result<(), Box<dyn Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(pac_file) = var("COMBINE_NET_PAC_FILE") {
            self.pac_file = Some(pac_file);
        }
        if let Some(output) = var("COMBINE_NET_OUTPUT") {
            self.output = output;
        }
        if let Some(max_passes) = var("COMBINE_NET_MAX_PASSES") {
            self.max_passes = max_passes
                .trim()
                .parse()
                .map_err(|e| format!("Invalid COMBINE_NET_MAX_PASSES '{max_passes}': {e}"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_json() {
        let settings = Settings::from_json("{}").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.net_files, vec!["pacnet.txt", "intranet.txt"]);
    }

    #[test]
    fn test_read_test_config() {
        let settings = Settings::read("src/tests/test_data/combine_net.json")
            .expect("Error reading test config");
        assert_eq!(settings.pac_file.as_deref(), Some("src/tests/test_data/sample.pac"));
        assert_eq!(settings.max_passes, 4);
        assert_eq!(settings.dns_timeout_ms, DEFAULT_DNS_TIMEOUT_MSEC);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let settings = Settings::read("src/tests/test_data/no_such_config.json").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_error_reports_path() {
        let err = Settings::from_json(r#"{"max_passes": "many"}"#).unwrap_err();
        assert!(err.to_string().contains("path=max_passes"), "{err}");
        assert!(Settings::from_json(r#"{"colour": true}"#).is_err());
    }

    #[test]
    fn test_overrides() {
        let mut settings = Settings::default();
        settings
            .apply_overrides(|key| match key {
                "COMBINE_NET_OUTPUT" => Some("routes.txt".to_string()),
                "COMBINE_NET_MAX_PASSES" => Some(" 3 ".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(settings.output, "routes.txt");
        assert_eq!(settings.max_passes, 3);
        assert!(settings.pac_file.is_none());

        let bad = settings.apply_overrides(|key| {
            (key == "COMBINE_NET_MAX_PASSES").then(|| "x".to_string())
        });
        assert!(bad.is_err());
    }
}
