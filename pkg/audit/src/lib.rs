//! Cluster-wide certificate audit.
//!
//! [`traversal::SecretWalker`] walks every key of every secret in every
//! namespace, [`auditor::Auditor`] feeds each entry to the evaluator and hands
//! findings to a [`reporter::Reporter`].

pub mod auditor;
pub mod cluster;
pub mod error;
pub mod lister;
pub mod reporter;
pub mod traversal;

pub use auditor::Auditor;
pub use error::AuditError;
pub use reporter::{Reporter, TracingReporter};
pub use traversal::SecretWalker;
