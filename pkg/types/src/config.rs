use anyhow::{Result, bail};
use pkg_constants::audit::DEFAULT_MIN_VALIDITY_DAYS;
use pkg_constants::release::{
    DEFAULT_RELEASE_GROUP, DEFAULT_RELEASE_KIND, DEFAULT_RELEASE_VERSION, DEFAULT_TOUCH_ANNOTATION,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// CLI configuration file (YAML).
///
/// Example `config.yaml`:
/// ```yaml
/// audit:
///   kubeconfig: ~/.kube/config
///   min-validity-days: 365
/// release:
///   kind: HelmRelease
///   annotation: certaudit.io/touched-at
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub audit: AuditConfigFile,
    #[serde(default)]
    pub release: ReleaseConfigFile,
}

/// `audit:` section of the config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditConfigFile {
    #[serde(default)]
    pub kubeconfig: Option<String>,
    #[serde(default, alias = "min-validity-days")]
    pub min_validity_days: Option<f64>,
}

/// `release:` section of the config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReleaseConfigFile {
    #[serde(default)]
    pub kubeconfig: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub annotation: Option<String>,
}

/// Load a YAML config file, returning the default if the file doesn't exist.
pub fn load_config_file<T: serde::de::DeserializeOwned + Default>(path: &str) -> Result<T> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(T::default());
        }
        Err(e) => return Err(e.into()),
    };
    if content.trim().is_empty() {
        return Ok(T::default());
    }
    let config: T = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Expand a leading `~` to the current user's home directory.
pub fn expand_home(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return PathBuf::from(path),
    };
    match dirs::home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => PathBuf::from(path),
    }
}

/// Settings for one audit run. Built once at startup and passed to the evaluator.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditConfig {
    kubeconfig: Option<PathBuf>,
    min_validity_days: f64,
}

impl AuditConfig {
    pub fn new(kubeconfig: Option<PathBuf>, min_validity_days: f64) -> Result<Self> {
        if !min_validity_days.is_finite() {
            bail!("min-validity-days must be a finite number (got {})", min_validity_days);
        }
        if min_validity_days < 0.0 {
            bail!("min-validity-days must not be negative (got {})", min_validity_days);
        }
        Ok(Self {
            kubeconfig,
            min_validity_days,
        })
    }

    /// Merge: CLI args > config file > defaults.
    pub fn from_sources(
        kubeconfig: Option<String>,
        min_validity_days: Option<f64>,
        file: &AuditConfigFile,
    ) -> Result<Self> {
        let kubeconfig = kubeconfig.or_else(|| file.kubeconfig.clone());
        let days = min_validity_days
            .or(file.min_validity_days)
            .unwrap_or(DEFAULT_MIN_VALIDITY_DAYS);
        Self::new(kubeconfig.as_deref().map(expand_home), days)
    }

    /// Explicit kubeconfig path; `None` means the kube client's default chain.
    pub fn kubeconfig(&self) -> Option<&Path> {
        self.kubeconfig.as_deref()
    }

    pub fn min_validity_days(&self) -> f64 {
        self.min_validity_days
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            kubeconfig: None,
            min_validity_days: DEFAULT_MIN_VALIDITY_DAYS,
        }
    }
}

/// Settings for the release annotation toggle. Independent of [`AuditConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseToggleConfig {
    pub kubeconfig: Option<PathBuf>,
    pub group: String,
    pub version: String,
    pub kind: String,
    pub annotation: String,
}

impl ReleaseToggleConfig {
    /// Merge: CLI args > config file > defaults.
    pub fn from_sources(kubeconfig: Option<String>, file: &ReleaseConfigFile) -> Result<Self> {
        let kubeconfig = kubeconfig.or_else(|| file.kubeconfig.clone());
        let config = Self {
            kubeconfig: kubeconfig.as_deref().map(expand_home),
            group: file
                .group
                .clone()
                .unwrap_or_else(|| DEFAULT_RELEASE_GROUP.to_string()),
            version: file
                .version
                .clone()
                .unwrap_or_else(|| DEFAULT_RELEASE_VERSION.to_string()),
            kind: file
                .kind
                .clone()
                .unwrap_or_else(|| DEFAULT_RELEASE_KIND.to_string()),
            annotation: file
                .annotation
                .clone()
                .unwrap_or_else(|| DEFAULT_TOUCH_ANNOTATION.to_string()),
        };
        if config.version.is_empty() || config.kind.is_empty() {
            bail!("release version and kind must not be empty");
        }
        if config.annotation.is_empty() {
            bail!("release annotation must not be empty");
        }
        Ok(config)
    }
}

impl Default for ReleaseToggleConfig {
    fn default() -> Self {
        Self {
            kubeconfig: None,
            group: DEFAULT_RELEASE_GROUP.to_string(),
            version: DEFAULT_RELEASE_VERSION.to_string(),
            kind: DEFAULT_RELEASE_KIND.to_string(),
            annotation: DEFAULT_TOUCH_ANNOTATION.to_string(),
        }
    }
}
