use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::report::template::DEFAULT_TEMPLATE_NAME;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable has a default; only malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// File name probed in the standard template locations.
    pub template_name: String,
    /// Probed before the standard locations when set.
    pub template_path: Option<PathBuf>,
    /// Newline-separated skill vocabulary replacing the built-in one.
    pub skills_file: Option<PathBuf>,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            port: get("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            template_name: get("TEMPLATE_NAME").unwrap_or_else(|| DEFAULT_TEMPLATE_NAME.to_string()),
            template_path: get("TEMPLATE_PATH").map(PathBuf::from),
            skills_file: get("SKILLS_FILE").map(PathBuf::from),
            max_upload_bytes: match get("MAX_UPLOAD_BYTES") {
                Some(v) => v
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a byte count")?,
                None => DEFAULT_MAX_UPLOAD_BYTES,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.template_name, "template.docx");
        assert_eq!(config.template_path, None);
        assert_eq!(config.skills_file, None);
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn test_overrides_are_read() {
        let config = config_from(&[
            ("PORT", "9000"),
            ("TEMPLATE_NAME", "report.docx"),
            ("TEMPLATE_PATH", "/srv/report.docx"),
            ("SKILLS_FILE", "/etc/skills.txt"),
            ("MAX_UPLOAD_BYTES", "2048"),
        ])
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.template_name, "report.docx");
        assert_eq!(config.template_path, Some(PathBuf::from("/srv/report.docx")));
        assert_eq!(config.skills_file, Some(PathBuf::from("/etc/skills.txt")));
        assert_eq!(config.max_upload_bytes, 2048);
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = config_from(&[("TEMPLATE_PATH", "  "), ("PORT", "")]).unwrap();
        assert_eq!(config.template_path, None);
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_invalid_port_is_error() {
        assert!(config_from(&[("PORT", "eighty")]).is_err());
    }
}
