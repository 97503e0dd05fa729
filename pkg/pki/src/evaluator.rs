use pkg_constants::audit::CERT_KEY_MARKERS;
use pkg_types::config::AuditConfig;
use pkg_types::secret::CandidateEntry;
use tracing::trace;

use crate::decode::{DecodeError, DecodedCertificate, decode_certificate};

/// Result of checking a decoded certificate against the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Validity window is shorter than the minimum.
    BelowThreshold,
    Acceptable,
}

/// What happened to one candidate entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<'a> {
    /// Key does not look like a certificate.
    Skipped,
    ParseFailed {
        entry: &'a CandidateEntry,
        error: DecodeError,
    },
    Evaluated {
        entry: &'a CandidateEntry,
        certificate: DecodedCertificate,
        verdict: Verdict,
    },
}

/// A key names a certificate if it contains `cert` or `crt` anywhere,
/// case-sensitively. This matches unrelated keys such as `concert` too.
pub fn is_candidate_key(key: &str) -> bool {
    CERT_KEY_MARKERS.iter().any(|marker| key.contains(marker))
}

/// Classifies candidate entries against a fixed minimum validity window.
#[derive(Debug, Clone)]
pub struct CertEvaluator {
    min_validity_days: f64,
}

impl CertEvaluator {
    pub fn new(config: &AuditConfig) -> Self {
        Self {
            min_validity_days: config.min_validity_days(),
        }
    }

    pub fn min_validity_days(&self) -> f64 {
        self.min_validity_days
    }

    /// Evaluate one entry. Pure: the same entry always yields the same outcome.
    pub fn evaluate<'a>(&self, entry: &'a CandidateEntry) -> Outcome<'a> {
        if !is_candidate_key(&entry.key) {
            trace!("Skipping {}: key is not a certificate name", entry);
            return Outcome::Skipped;
        }

        match decode_certificate(&entry.value) {
            Ok(certificate) => {
                let verdict = self.classify(&certificate);
                Outcome::Evaluated {
                    entry,
                    certificate,
                    verdict,
                }
            }
            Err(error) => Outcome::ParseFailed { entry, error },
        }
    }

    /// Windows strictly shorter than the minimum are flagged.
    pub fn classify(&self, certificate: &DecodedCertificate) -> Verdict {
        if certificate.validity_days() < self.min_validity_days {
            Verdict::BelowThreshold
        } else {
            Verdict::Acceptable
        }
    }
}
