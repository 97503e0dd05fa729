use chrono::{SecondsFormat, Utc};
use pkg_constants::release::SYSTEM_NAMESPACES;
use pkg_types::config::ReleaseToggleConfig;
use tracing::{debug, info, warn};

use crate::error::ReleaseError;
use crate::store::ReleaseStore;

pub fn is_system_namespace(namespace: &str) -> bool {
    SYSTEM_NAMESPACES.contains(&namespace)
}

/// Sets then clears the touch annotation on every release outside the
/// system namespaces.
pub struct ReleaseToggler<S> {
    store: S,
    annotation: String,
}

impl<S: ReleaseStore> ReleaseToggler<S> {
    pub fn new(store: S, config: &ReleaseToggleConfig) -> Self {
        Self {
            store,
            annotation: config.annotation.clone(),
        }
    }

    /// Returns how many releases were toggled. Listing failures abort;
    /// a failed patch is logged and the next release is tried.
    pub async fn run(&self) -> Result<usize, ReleaseError> {
        let namespaces = self.store.list_namespaces().await?;
        let mut toggled = 0;

        for namespace in &namespaces {
            if is_system_namespace(namespace) {
                debug!("Skipping system namespace {}", namespace);
                continue;
            }
            let releases = self.store.list_releases(namespace).await?;
            for name in &releases {
                match self.toggle(namespace, name).await {
                    Ok(()) => toggled += 1,
                    Err(e @ ReleaseError::AnnotationLeftSet { .. }) => {
                        warn!("Release left annotated, remove it manually: {}", e)
                    }
                    Err(e) => warn!("Release toggle failed: {}", e),
                }
            }
        }

        Ok(toggled)
    }

    async fn toggle(&self, namespace: &str, name: &str) -> Result<(), ReleaseError> {
        let stamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        self.store
            .patch_annotation(namespace, name, &self.annotation, Some(stamp))
            .await?;
        self.store
            .patch_annotation(namespace, name, &self.annotation, None)
            .await
            .map_err(|e| ReleaseError::AnnotationLeftSet {
                namespace: namespace.to_string(),
                name: name.to_string(),
                annotation: self.annotation.clone(),
                message: e.to_string(),
            })?;
        info!("Toggled {} on release {}/{}", self.annotation, namespace, name);
        Ok(())
    }
}
