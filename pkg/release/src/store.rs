//! Access to release resources.

use std::fmt::Debug;

use async_trait::async_trait;
use k8s_openapi::api::core::v1::Namespace;
use kube::api::{Api, ApiResource, DynamicObject, GroupVersionKind, ListParams, Patch, PatchParams};
use kube::{Client, ResourceExt};
#[cfg(test)]
use mockall::automock;
use pkg_constants::kube::LIST_PAGE_SIZE;
use pkg_types::config::ReleaseToggleConfig;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::error::ReleaseError;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ReleaseStore: Send + Sync {
    async fn list_namespaces(&self) -> Result<Vec<String>, ReleaseError>;

    /// Names of the release resources in `namespace`.
    async fn list_releases(&self, namespace: &str) -> Result<Vec<String>, ReleaseError>;

    /// Set `key` to `value`, or remove it when `value` is `None`.
    async fn patch_annotation(
        &self,
        namespace: &str,
        name: &str,
        key: &str,
        value: Option<String>,
    ) -> Result<(), ReleaseError>;
}

/// [`ReleaseStore`] over a dynamic kube API for the configured release kind.
pub struct KubeReleaseStore {
    client: Client,
    resource: ApiResource,
}

impl KubeReleaseStore {
    pub fn new(client: Client, config: &ReleaseToggleConfig) -> Self {
        let gvk = GroupVersionKind::gvk(&config.group, &config.version, &config.kind);
        Self {
            client,
            resource: ApiResource::from_gvk(&gvk),
        }
    }

    fn releases(&self, namespace: &str) -> Api<DynamicObject> {
        Api::namespaced_with(self.client.clone(), namespace, &self.resource)
    }
}

#[async_trait]
impl ReleaseStore for KubeReleaseStore {
    async fn list_namespaces(&self) -> Result<Vec<String>, ReleaseError> {
        let api: Api<Namespace> = Api::all(self.client.clone());
        let namespaces = list_all(&api)
            .await
            .map_err(|e| ReleaseError::NamespaceList(e.to_string()))?;
        Ok(namespaces.iter().map(|ns| ns.name_any()).collect())
    }

    async fn list_releases(&self, namespace: &str) -> Result<Vec<String>, ReleaseError> {
        let releases = list_all(&self.releases(namespace))
            .await
            .map_err(|e| ReleaseError::ReleaseList {
                namespace: namespace.to_string(),
                message: e.to_string(),
            })?;
        Ok(releases.iter().map(|release| release.name_any()).collect())
    }

    async fn patch_annotation(
        &self,
        namespace: &str,
        name: &str,
        key: &str,
        value: Option<String>,
    ) -> Result<(), ReleaseError> {
        let patch = annotation_patch(key, value.as_deref());
        self.releases(namespace)
            .patch(name, &PatchParams::default(), &Patch::Merge(&patch))
            .await
            .map_err(|e| ReleaseError::Patch {
                namespace: namespace.to_string(),
                name: name.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }
}

/// Follow `continue` tokens until the listing is complete.
async fn list_all<K>(api: &Api<K>) -> Result<Vec<K>, kube::Error>
where
    K: Clone + DeserializeOwned + Debug,
{
    collect_pages(|token| async move {
        let mut params = ListParams::default().limit(LIST_PAGE_SIZE);
        if let Some(token) = &token {
            params = params.continue_token(token);
        }
        let page = api.list(&params).await?;
        Ok((page.items, page.metadata.continue_))
    })
    .await
}

/// Call `fetch` with each `continue` token until one comes back empty.
async fn collect_pages<T, E, F, Fut>(mut fetch: F) -> Result<Vec<T>, E>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<(Vec<T>, Option<String>), E>>,
{
    let mut items = Vec::new();
    let mut token = None;
    loop {
        let (page, next) = fetch(token).await?;
        items.extend(page);
        match next {
            Some(next) if !next.is_empty() => token = Some(next),
            _ => return Ok(items),
        }
    }
}

/// JSON merge patch for one annotation; `None` deletes the key.
pub fn annotation_patch(key: &str, value: Option<&str>) -> serde_json::Value {
    json!({
        "metadata": {
            "annotations": {
                key: value,
            }
        }
    })
}
