//! Filesystem path constants.

/// Default config file path for the CLI.
pub const DEFAULT_CONFIG: &str = "/etc/certaudit/config.yaml";
