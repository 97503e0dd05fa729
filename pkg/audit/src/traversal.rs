use std::collections::btree_map;
use std::vec;

use pkg_types::secret::{CandidateEntry, SecretRecord};
use tracing::debug;

use crate::error::AuditError;
use crate::lister::{NamespaceLister, SecretLister};

/// Secret whose entries are being handed out.
struct OpenSecret {
    name: String,
    entries: btree_map::IntoIter<String, Vec<u8>>,
}

/// Lazily walks every key/value entry of every secret in every namespace.
///
/// Namespaces are listed once, up front. Secrets are listed one namespace at
/// a time, only when the previous namespace is exhausted. Listing order is
/// kept as the cluster returns it. Once exhausted the walker stays exhausted.
pub struct SecretWalker<'a> {
    secrets: &'a dyn SecretLister,
    namespaces: vec::IntoIter<String>,
    namespace: String,
    pending: vec::IntoIter<SecretRecord>,
    open: Option<OpenSecret>,
}

impl<'a> SecretWalker<'a> {
    /// List namespaces and position the walker before the first entry.
    pub async fn new(
        namespaces: &dyn NamespaceLister,
        secrets: &'a dyn SecretLister,
    ) -> Result<Self, AuditError> {
        let names = namespaces.list_namespaces().await?;
        debug!("Walking secrets in {} namespaces", names.len());
        Ok(Self {
            secrets,
            namespaces: names.into_iter(),
            namespace: String::new(),
            pending: Vec::new().into_iter(),
            open: None,
        })
    }

    /// Next entry, `Ok(None)` when every namespace has been walked.
    /// A failed secret listing ends the walk with an error.
    pub async fn next_entry(&mut self) -> Result<Option<CandidateEntry>, AuditError> {
        loop {
            if let Some(open) = self.open.as_mut() {
                if let Some((key, value)) = open.entries.next() {
                    return Ok(Some(CandidateEntry {
                        namespace: self.namespace.clone(),
                        secret: open.name.clone(),
                        key,
                        value,
                    }));
                }
                self.open = None;
            }

            if let Some(secret) = self.pending.next() {
                self.open = Some(OpenSecret {
                    name: secret.name,
                    entries: secret.data.into_iter(),
                });
                continue;
            }

            let Some(namespace) = self.namespaces.next() else {
                return Ok(None);
            };
            let secrets = self.secrets.list_secrets(&namespace).await?;
            debug!("Namespace {}: {} secrets", namespace, secrets.len());
            self.pending = secrets.into_iter();
            self.namespace = namespace;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lister::{MockNamespaceLister, MockSecretLister};

    fn namespaces(names: &[&str]) -> MockNamespaceLister {
        let names: Vec<String> = names.iter().map(|n| n.to_string()).collect();
        let mut lister = MockNamespaceLister::new();
        lister
            .expect_list_namespaces()
            .times(1)
            .returning(move || Ok(names.clone()));
        lister
    }

    async fn collect(walker: &mut SecretWalker<'_>) -> Result<Vec<CandidateEntry>, AuditError> {
        let mut out = Vec::new();
        while let Some(entry) = walker.next_entry().await? {
            out.push(entry);
        }
        Ok(out)
    }

    #[tokio::test]
    async fn walks_every_entry_in_listing_order() {
        let ns = namespaces(&["default", "empty", "payments"]);
        let mut secrets = MockSecretLister::new();
        secrets
            .expect_list_secrets()
            .withf(|ns| ns == "default")
            .times(1)
            .returning(|_| {
                Ok(vec![
                    SecretRecord::new("ingress-tls")
                        .with_entry("tls.crt", "c")
                        .with_entry("tls.key", "k"),
                    SecretRecord::new("no-data"),
                    SecretRecord::new("db").with_entry("username", "admin"),
                ])
            });
        secrets
            .expect_list_secrets()
            .withf(|ns| ns == "empty")
            .times(1)
            .returning(|_| Ok(vec![]));
        secrets
            .expect_list_secrets()
            .withf(|ns| ns == "payments")
            .times(1)
            .returning(|_| Ok(vec![SecretRecord::new("ingress-tls").with_entry("tls.crt", "p")]));

        let mut walker = SecretWalker::new(&ns, &secrets).await.unwrap();
        let entries = collect(&mut walker).await.unwrap();

        let seen: Vec<String> = entries.iter().map(|e| e.to_string()).collect();
        assert_eq!(
            seen,
            vec![
                "default/ingress-tls[tls.crt]",
                "default/ingress-tls[tls.key]",
                "default/db[username]",
                "payments/ingress-tls[tls.crt]",
            ]
        );
        // Same key in two secrets stays two entries.
        assert_eq!(entries[0].value, b"c".to_vec());
        assert_eq!(entries[3].value, b"p".to_vec());

        // Non-restartable: stays exhausted without listing again.
        assert!(walker.next_entry().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn namespace_listing_failure_produces_no_entries() {
        let mut ns = MockNamespaceLister::new();
        ns.expect_list_namespaces()
            .times(1)
            .returning(|| Err(AuditError::NamespaceList("unauthorized".to_string())));
        let mut secrets = MockSecretLister::new();
        secrets.expect_list_secrets().never();

        let result = SecretWalker::new(&ns, &secrets).await;
        assert!(matches!(result, Err(AuditError::NamespaceList(_))));
    }

    #[tokio::test]
    async fn secret_listing_failure_aborts_the_walk() {
        let ns = namespaces(&["default", "locked", "after"]);
        let mut secrets = MockSecretLister::new();
        secrets
            .expect_list_secrets()
            .withf(|ns| ns == "default")
            .times(1)
            .returning(|_| Ok(vec![SecretRecord::new("a").with_entry("tls.crt", "x")]));
        secrets
            .expect_list_secrets()
            .withf(|ns| ns == "locked")
            .times(1)
            .returning(|ns| Err(AuditError::secret_list(ns, "forbidden")));
        secrets
            .expect_list_secrets()
            .withf(|ns| ns == "after")
            .never();

        let mut walker = SecretWalker::new(&ns, &secrets).await.unwrap();
        let first = walker.next_entry().await.unwrap().unwrap();
        assert_eq!(first.to_string(), "default/a[tls.crt]");

        match walker.next_entry().await {
            Err(AuditError::SecretList { namespace, .. }) => assert_eq!(namespace, "locked"),
            other => panic!("expected SecretList error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn secrets_are_listed_lazily() {
        let ns = namespaces(&["first", "second"]);
        let mut secrets = MockSecretLister::new();
        secrets
            .expect_list_secrets()
            .withf(|ns| ns == "first")
            .times(1)
            .returning(|_| Ok(vec![SecretRecord::new("s").with_entry("k", "v")]));
        secrets.expect_list_secrets().withf(|ns| ns == "second").never();

        let mut walker = SecretWalker::new(&ns, &secrets).await.unwrap();
        assert!(walker.next_entry().await.unwrap().is_some());
    }
}
