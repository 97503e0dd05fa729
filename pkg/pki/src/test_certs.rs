//! Certificate fixtures for unit tests.

use chrono::{DateTime, NaiveDate, Utc};
use rcgen::{CertificateParams, DnType, KeyPair};

/// Midnight UTC on the given date.
pub fn ymd(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .expect("valid test date")
}

/// PEM of a self-signed certificate valid from `not_before` to `not_after`
/// (both at midnight UTC).
pub fn self_signed_pem(common_name: &str, not_before: (i32, u8, u8), not_after: (i32, u8, u8)) -> String {
    let mut params = CertificateParams::new(vec![common_name.to_string()])
        .expect("valid subject alt name");
    params
        .distinguished_name
        .push(DnType::CommonName, common_name);
    params.not_before = rcgen::date_time_ymd(not_before.0, not_before.1, not_before.2);
    params.not_after = rcgen::date_time_ymd(not_after.0, not_after.1, not_after.2);

    let key_pair = KeyPair::generate().expect("key generation");
    params
        .self_signed(&key_pair)
        .expect("self-signed certificate")
        .pem()
}
