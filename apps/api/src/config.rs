use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::convert::command::{DEFAULT_ARGS, DEFAULT_PROGRAM};
use crate::resume::builder::GroupLimits;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub converter_program: String,
    pub converter_args: Vec<String>,
    pub conversion_timeout: Duration,
    pub conversion_temp_dir: Option<PathBuf>,
    pub group_limits: GroupLimits,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let converter_args = match get("CONVERTER_ARGS") {
            Some(raw) => raw.split_whitespace().map(String::from).collect(),
            None => DEFAULT_ARGS.iter().map(|a| a.to_string()).collect(),
        };

        Ok(Config {
            port: parse_or(&get, "PORT", 8080)?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            converter_program: get("CONVERTER_PROGRAM")
                .unwrap_or_else(|| DEFAULT_PROGRAM.to_string()),
            converter_args,
            conversion_timeout: Duration::from_secs(parse_or(
                &get,
                "CONVERSION_TIMEOUT_SECS",
                60,
            )?),
            conversion_temp_dir: get("CONVERSION_TEMP_DIR")
                .filter(|dir| !dir.is_empty())
                .map(PathBuf::from),
            group_limits: GroupLimits {
                work: cap(parse_or(&get, "MAX_WORK_ENTRIES", 3)?),
                education: cap(parse_or(&get, "MAX_EDUCATION_ENTRIES", 2)?),
            },
        })
    }
}

fn parse_or<T>(get: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}

/// `0` lifts the cap.
fn cap(limit: usize) -> Option<usize> {
    (limit > 0).then_some(limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.converter_program, "soffice");
        assert_eq!(config.converter_args.last().map(String::as_str), Some("{input}"));
        assert_eq!(config.conversion_timeout, Duration::from_secs(60));
        assert_eq!(config.conversion_temp_dir, None);
        assert_eq!(config.group_limits, GroupLimits::default());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("PORT", "9000"),
            ("CONVERTER_PROGRAM", "pandoc"),
            ("CONVERTER_ARGS", "{input} -o {output}"),
            ("CONVERSION_TIMEOUT_SECS", "5"),
            ("CONVERSION_TEMP_DIR", "/var/tmp/resume"),
            ("MAX_WORK_ENTRIES", "0"),
            ("MAX_EDUCATION_ENTRIES", "4"),
        ])
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.converter_program, "pandoc");
        assert_eq!(config.converter_args, vec!["{input}", "-o", "{output}"]);
        assert_eq!(config.conversion_timeout, Duration::from_secs(5));
        assert_eq!(
            config.conversion_temp_dir,
            Some(PathBuf::from("/var/tmp/resume"))
        );
        assert_eq!(config.group_limits.work, None);
        assert_eq!(config.group_limits.education, Some(4));
    }

    #[test]
    fn test_invalid_number_names_the_variable() {
        let err = load(&[("CONVERSION_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert!(err.to_string().contains("CONVERSION_TIMEOUT_SECS"));
    }

    #[test]
    fn test_invalid_port() {
        assert!(load(&[("PORT", "99999")]).is_err());
    }
}
