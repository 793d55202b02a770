use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::fetcher::FetchOptions;

/// Optional knobs loaded from `~/.config/fanfetch/config.toml`.
///
/// Every field may be omitted; CLI flags override whatever the file says.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Maximum concurrent downloads. `None` = one worker per URL.
    pub max_concurrent: Option<usize>,
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Total per-request timeout in seconds (None = no limit).
    pub timeout_secs: Option<u64>,
    /// Write straight to the destination and leave partial files on failure.
    pub keep_partial: bool,
    /// Disambiguate URLs that map to the same local filename.
    pub dedupe_names: bool,
    /// Directory downloads are written to (None = current directory).
    pub output_dir: Option<PathBuf>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_concurrent: None,
            connect_timeout_secs: 30,
            timeout_secs: None,
            keep_partial: false,
            dedupe_names: true,
            output_dir: None,
        }
    }
}

impl FetchConfig {
    /// Per-transfer options handed to every worker.
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            output_dir: self
                .output_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from(".")),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            timeout: self.timeout_secs.map(Duration::from_secs),
            keep_partial: self.keep_partial,
        }
    }
}

/// Location of the default config file, if one exists.
pub fn default_config_path() -> Result<Option<PathBuf>> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("fanfetch")?;
    Ok(xdg_dirs.find_config_file("config.toml"))
}

/// Load configuration from `path`, or from the default location.
///
/// An explicit path must exist. A missing default file yields built-in defaults
/// and is not created.
pub fn load(path: Option<&Path>) -> Result<FetchConfig> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match default_config_path()? {
            Some(p) => p,
            None => return Ok(FetchConfig::default()),
        },
    };

    let data = fs::read_to_string(&path)
        .with_context(|| format!("read config {}", path.display()))?;
    let cfg: FetchConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    tracing::debug!("loaded config from {}", path.display());
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = FetchConfig::default();
        assert_eq!(cfg.max_concurrent, None);
        assert_eq!(cfg.connect_timeout_secs, 30);
        assert_eq!(cfg.timeout_secs, None);
        assert!(!cfg.keep_partial);
        assert!(cfg.dedupe_names);
        assert!(cfg.output_dir.is_none());
    }

    #[test]
    fn empty_toml_is_default() {
        let cfg: FetchConfig = toml::from_str("").unwrap();
        assert_eq!(cfg, FetchConfig::default());
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            max_concurrent = 4
            timeout_secs = 120
            keep_partial = true
            dedupe_names = false
            output_dir = "/tmp/downloads"
        "#;
        let cfg: FetchConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.max_concurrent, Some(4));
        assert_eq!(cfg.connect_timeout_secs, 30);
        assert_eq!(cfg.timeout_secs, Some(120));
        assert!(cfg.keep_partial);
        assert!(!cfg.dedupe_names);
        assert_eq!(cfg.output_dir.as_deref(), Some(Path::new("/tmp/downloads")));
    }

    #[test]
    fn fetch_options_from_config() {
        let cfg = FetchConfig {
            timeout_secs: Some(5),
            ..FetchConfig::default()
        };
        let opts = cfg.fetch_options();
        assert_eq!(opts.output_dir, PathBuf::from("."));
        assert_eq!(opts.connect_timeout, Duration::from_secs(30));
        assert_eq!(opts.timeout, Some(Duration::from_secs(5)));
        assert!(!opts.keep_partial);
    }

    #[test]
    fn load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "max_concurrent = 2\n").unwrap();
        let cfg = load(Some(&path)).unwrap();
        assert_eq!(cfg.max_concurrent, Some(2));
    }

    #[test]
    fn load_missing_explicit_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(Some(&dir.path().join("nope.toml"))).is_err());
    }
}
