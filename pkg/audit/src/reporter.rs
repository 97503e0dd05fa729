use pkg_pki::{DecodeError, DecodedCertificate};
use pkg_types::secret::CandidateEntry;
use tracing::{debug, warn};

/// Sink for audit findings. Only problems are reported; skipped entries and
/// acceptable certificates never reach it.
pub trait Reporter: Send + Sync {
    /// A certificate-named entry that could not be decoded.
    fn parse_failed(&self, entry: &CandidateEntry, error: &DecodeError);

    /// A certificate whose validity window is shorter than the minimum.
    fn below_threshold(
        &self,
        entry: &CandidateEntry,
        certificate: &DecodedCertificate,
        min_validity_days: f64,
    );
}

/// Reports findings as `tracing` warnings with structured fields.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn parse_failed(&self, entry: &CandidateEntry, error: &DecodeError) {
        warn!(
            namespace = %entry.namespace,
            secret = %entry.secret,
            key = %entry.key,
            error = %error,
            "Certificate entry could not be decoded"
        );
        debug!(
            namespace = %entry.namespace,
            secret = %entry.secret,
            key = %entry.key,
            value = %String::from_utf8_lossy(&entry.value),
            "Undecodable certificate value"
        );
    }

    fn below_threshold(
        &self,
        entry: &CandidateEntry,
        certificate: &DecodedCertificate,
        min_validity_days: f64,
    ) {
        warn!(
            namespace = %entry.namespace,
            secret = %entry.secret,
            key = %entry.key,
            validity_days = certificate.validity_days(),
            min_validity_days,
            not_before = %certificate.not_before.to_rfc3339(),
            not_after = %certificate.not_after.to_rfc3339(),
            subject = certificate.subject.as_deref().unwrap_or(""),
            "Certificate validity window is below the minimum"
        );
    }
}
