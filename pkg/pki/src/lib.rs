//! Certificate evaluation for secret entries.
//!
//! [`CertEvaluator`] turns one [`pkg_types::secret::CandidateEntry`] into one
//! [`Outcome`]: skipped by the key heuristic, failed to decode, or evaluated
//! against the minimum validity window.

pub mod decode;
pub mod evaluator;

pub use decode::{DecodeError, DecodedCertificate, decode_certificate};
pub use evaluator::{CertEvaluator, Outcome, Verdict, is_candidate_key};

#[cfg(test)]
mod test_certs;
