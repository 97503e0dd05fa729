//! Certificate audit constants.

/// Substrings that mark a secret key as a certificate candidate.
/// Matching is case-sensitive and may hit anywhere in the key.
pub const CERT_KEY_MARKERS: &[&str] = &["cert", "crt"];

/// Default minimum validity window, in days.
pub const DEFAULT_MIN_VALIDITY_DAYS: f64 = 365.0;

/// Seconds in one day, used to turn a validity window into fractional days.
pub const SECS_PER_DAY: f64 = 86_400.0;
