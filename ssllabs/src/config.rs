use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;

#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub entrypoint: Option<String>,
    pub poll_interval_secs: Option<u64>,
    /// Per-request timeout. Unset means requests may block indefinitely.
    pub timeout_secs: Option<u64>,
    pub publish: Option<bool>,
    pub ignore_mismatch: Option<bool>,
}

impl Config {
    pub fn poll_interval(&self, flag: Option<u64>) -> Duration {
        Duration::from_secs(flag.or(self.poll_interval_secs).unwrap_or(DEFAULT_POLL_INTERVAL_SECS))
    }

    /// Command-line value if given, else the file value, else off.
    pub fn publish(&self, flag: Option<bool>) -> bool {
        flag.or(self.publish).unwrap_or(false)
    }

    pub fn ignore_mismatch(&self, flag: Option<bool>) -> bool {
        flag.or(self.ignore_mismatch).unwrap_or(false)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Load `path`, or `./ssllabs.yaml` when no path is given and it exists.
/// An explicit path that cannot be read or parsed is an error.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let p = Path::new("ssllabs.yaml");
            if p.exists() { p.to_path_buf() } else { return Ok(Config::default()); }
        }
    };
    let s = fs::read_to_string(&path)?;
    parse_config(&s)
}

pub fn parse_config(s: &str) -> anyhow::Result<Config> {
    if s.trim().is_empty() {
        return Ok(Config::default());
    }
    Ok(serde_yaml::from_str(s)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_keys() {
        let cfg = parse_config(
            "entrypoint: https://api.dev.ssllabs.com/api/v2\npoll_interval_secs: 30\ntimeout_secs: 60\npublish: true\nignore_mismatch: false\n",
        )
        .unwrap();
        assert_eq!(cfg.entrypoint.as_deref(), Some("https://api.dev.ssllabs.com/api/v2"));
        assert_eq!(cfg.poll_interval(None), Duration::from_secs(30));
        assert_eq!(cfg.timeout(), Some(Duration::from_secs(60)));
        assert_eq!(cfg.publish, Some(true));
        assert_eq!(cfg.ignore_mismatch, Some(false));
    }

    #[test]
    fn flag_overrides_file_overrides_default() {
        let cfg = Config::default();
        assert_eq!(cfg.poll_interval(None), Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS));
        let cfg = Config { poll_interval_secs: Some(5), ..Config::default() };
        assert_eq!(cfg.poll_interval(None), Duration::from_secs(5));
        assert_eq!(cfg.poll_interval(Some(1)), Duration::from_secs(1));
    }

    #[test]
    fn flags_override_file_both_ways() {
        let cfg = Config { publish: Some(true), ignore_mismatch: Some(true), ..Config::default() };
        assert!(cfg.publish(None));
        assert!(!cfg.publish(Some(false)));
        assert!(!cfg.ignore_mismatch(Some(false)));
        let cfg = Config::default();
        assert!(!cfg.publish(None));
        assert!(cfg.ignore_mismatch(Some(true)));
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(parse_config("").unwrap(), Config::default());
        assert!(parse_config("poll_interval_secs: [").is_err());
    }
}
