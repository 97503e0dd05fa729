use std::sync::atomic::{AtomicBool, Ordering};

use pkg_pki::{CertEvaluator, Outcome, Verdict};
use pkg_types::secret::CandidateEntry;
use tracing::{debug, info};

use crate::error::AuditError;
use crate::lister::{NamespaceLister, SecretLister};
use crate::reporter::Reporter;
use crate::traversal::SecretWalker;

/// Drives the walk and reports every finding as soon as it is made.
/// Holds no state between entries.
pub struct Auditor<R> {
    evaluator: CertEvaluator,
    reporter: R,
}

impl<R: Reporter> Auditor<R> {
    pub fn new(evaluator: CertEvaluator, reporter: R) -> Self {
        Self {
            evaluator,
            reporter,
        }
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Audit every secret entry in the cluster.
    ///
    /// `stop` is checked between entries; once set, the run ends with
    /// [`AuditError::Interrupted`]. Listing failures end the run immediately.
    pub async fn run(
        &self,
        namespaces: &dyn NamespaceLister,
        secrets: &dyn SecretLister,
        stop: &AtomicBool,
    ) -> Result<(), AuditError> {
        info!(
            "Auditing certificates (min validity {} days)",
            self.evaluator.min_validity_days()
        );
        let mut walker = SecretWalker::new(namespaces, secrets).await?;
        loop {
            if stop.load(Ordering::SeqCst) {
                return Err(AuditError::Interrupted);
            }
            let Some(entry) = walker.next_entry().await? else {
                break;
            };
            self.inspect(&entry);
        }
        info!("Certificate audit complete");
        Ok(())
    }

    /// Evaluate one entry and report it if it is a finding.
    pub fn inspect(&self, entry: &CandidateEntry) {
        match self.evaluator.evaluate(entry) {
            Outcome::Skipped => {}
            Outcome::ParseFailed { entry, error } => self.reporter.parse_failed(entry, &error),
            Outcome::Evaluated {
                entry,
                certificate,
                verdict: Verdict::BelowThreshold,
            } => self.reporter.below_threshold(
                entry,
                &certificate,
                self.evaluator.min_validity_days(),
            ),
            Outcome::Evaluated {
                entry,
                certificate,
                verdict: Verdict::Acceptable,
            } => debug!(
                "{}: validity {:.1} days, ok",
                entry,
                certificate.validity_days()
            ),
        }
    }
}
