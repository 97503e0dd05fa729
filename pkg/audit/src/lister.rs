//! Cluster listing seams used by the secret walker.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use pkg_types::secret::SecretRecord;

use crate::error::AuditError;

/// Lists namespace names in the order the cluster returns them.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait NamespaceLister: Send + Sync {
    async fn list_namespaces(&self) -> Result<Vec<String>, AuditError>;
}

/// Lists the secrets of one namespace, with their decoded data.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SecretLister: Send + Sync {
    async fn list_secrets(&self, namespace: &str) -> Result<Vec<SecretRecord>, AuditError>;
}
