//! Listers backed by the Kubernetes API.

use std::fmt::Debug;

use async_trait::async_trait;
use k8s_openapi::api::core::v1::{Namespace, Secret};
use kube::api::{Api, ListParams};
use kube::{Client, ResourceExt};
use pkg_constants::kube::LIST_PAGE_SIZE;
use pkg_types::secret::SecretRecord;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::AuditError;
use crate::lister::{NamespaceLister, SecretLister};

/// Lists namespaces and secrets through a kube [`Client`].
#[derive(Clone)]
pub struct KubeClusterLister {
    client: Client,
}

impl KubeClusterLister {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl NamespaceLister for KubeClusterLister {
    async fn list_namespaces(&self) -> Result<Vec<String>, AuditError> {
        let api: Api<Namespace> = Api::all(self.client.clone());
        let namespaces = list_all(&api)
            .await
            .map_err(|e| AuditError::NamespaceList(e.to_string()))?;
        debug!("Listed {} namespaces", namespaces.len());
        Ok(namespaces.iter().map(|ns| ns.name_any()).collect())
    }
}

#[async_trait]
impl SecretLister for KubeClusterLister {
    async fn list_secrets(&self, namespace: &str) -> Result<Vec<SecretRecord>, AuditError> {
        let api: Api<Secret> = Api::namespaced(self.client.clone(), namespace);
        let secrets = list_all(&api)
            .await
            .map_err(|e| AuditError::secret_list(namespace, e.to_string()))?;
        debug!("Listed {} secrets in namespace {}", secrets.len(), namespace);
        Ok(secrets.into_iter().map(secret_record).collect())
    }
}

/// Follow `continue` tokens until the listing is complete.
async fn list_all<K>(api: &Api<K>) -> Result<Vec<K>, kube::Error>
where
    K: Clone + DeserializeOwned + Debug,
{
    let mut items = Vec::new();
    let mut params = ListParams::default().limit(LIST_PAGE_SIZE);
    loop {
        let page = api.list(&params).await?;
        items.extend(page.items);
        match page.metadata.continue_ {
            Some(token) if !token.is_empty() => params = params.continue_token(&token),
            _ => break,
        }
    }
    Ok(items)
}

fn secret_record(secret: Secret) -> SecretRecord {
    let name = secret.name_any();
    let data = secret
        .data
        .unwrap_or_default()
        .into_iter()
        .map(|(key, value)| (key, value.0))
        .collect();
    SecretRecord { name, data }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::ByteString;
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
    use std::collections::BTreeMap;

    #[test]
    fn secret_record_keeps_raw_bytes() {
        let secret = Secret {
            metadata: ObjectMeta {
                name: Some("ingress-tls".to_string()),
                namespace: Some("default".to_string()),
                ..Default::default()
            },
            data: Some(BTreeMap::from([
                ("tls.crt".to_string(), ByteString(b"-----BEGIN".to_vec())),
                ("tls.key".to_string(), ByteString(vec![0, 159, 146, 150])),
            ])),
            ..Default::default()
        };

        let record = secret_record(secret);
        assert_eq!(record.name, "ingress-tls");
        assert_eq!(record.data["tls.crt"], b"-----BEGIN".to_vec());
        assert_eq!(record.data["tls.key"], vec![0, 159, 146, 150]);
    }

    #[test]
    fn secret_without_data_has_no_entries() {
        let secret = Secret {
            metadata: ObjectMeta {
                name: Some("empty".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let record = secret_record(secret);
        assert_eq!(record.name, "empty");
        assert!(record.data.is_empty());
    }
}
