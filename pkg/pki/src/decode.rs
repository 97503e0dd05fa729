use chrono::{DateTime, TimeDelta, Utc};
use pkg_constants::audit::SECS_PER_DAY;
use thiserror::Error;
use x509_parser::prelude::*;

/// Why a certificate candidate could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// No PEM block was found in the value.
    #[error("pem decode failed")]
    PemDecode,
    /// The first PEM block does not hold a well-formed X.509 certificate.
    #[error("x509 parse failed: {0}")]
    CertificateParse(String),
}

/// The parts of an X.509 certificate the audit looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedCertificate {
    pub not_before: DateTime<Utc>,
    pub not_after: DateTime<Utc>,
    /// Subject common name, for reporting only.
    pub subject: Option<String>,
}

impl DecodedCertificate {
    /// Length of the issued validity window (`notAfter - notBefore`).
    /// Independent of the current time.
    pub fn validity_window(&self) -> TimeDelta {
        self.not_after - self.not_before
    }

    /// Validity window length in fractional days.
    pub fn validity_days(&self) -> f64 {
        self.validity_window().num_seconds() as f64 / SECS_PER_DAY
    }
}

/// Decode the first PEM block of `bytes` as an X.509 certificate.
///
/// Anything before the block is skipped, RFC 1421 headers inside it are
/// accepted, and any further blocks (the rest of a chain, a bundled key) are
/// ignored. The PEM label is not checked.
pub fn decode_certificate(bytes: &[u8]) -> Result<DecodedCertificate, DecodeError> {
    let start = first_block_start(bytes).ok_or(DecodeError::PemDecode)?;
    let pem = ::pem::parse(&bytes[start..]).map_err(|_| DecodeError::PemDecode)?;

    let (rest, cert) = X509Certificate::from_der(pem.contents())
        .map_err(|e| DecodeError::CertificateParse(e.to_string()))?;
    if !rest.is_empty() {
        return Err(DecodeError::CertificateParse(format!(
            "{} trailing bytes after certificate",
            rest.len()
        )));
    }

    let validity = cert.validity();
    let not_before = to_utc(validity.not_before.timestamp())?;
    let not_after = to_utc(validity.not_after.timestamp())?;

    let subject = cert
        .subject()
        .iter_common_name()
        .next()
        .and_then(|cn| cn.as_str().ok())
        .map(str::to_string);

    Ok(DecodedCertificate {
        not_before,
        not_after,
        subject,
    })
}

/// Offset of the first `-----BEGIN ` that starts a line.
fn first_block_start(bytes: &[u8]) -> Option<usize> {
    const BEGIN: &[u8] = b"-----BEGIN ";
    (0..bytes.len()).find(|&i| {
        (i == 0 || bytes[i - 1] == b'\n') && bytes[i..].starts_with(BEGIN)
    })
}

fn to_utc(timestamp: i64) -> Result<DateTime<Utc>, DecodeError> {
    DateTime::<Utc>::from_timestamp(timestamp, 0).ok_or_else(|| {
        DecodeError::CertificateParse(format!("validity timestamp {} out of range", timestamp))
    })
}
