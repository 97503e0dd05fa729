use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};
use pkg_constants::kube::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
use tracing::info;

/// Build a kube client from an explicit kubeconfig, or from the default
/// chain (`KUBECONFIG`, `~/.kube/config`, in-cluster) when none is given.
pub async fn create_client(kubeconfig: Option<&Path>) -> anyhow::Result<Client> {
    let mut config = match kubeconfig {
        Some(path) => {
            info!("Using kubeconfig {}", path.display());
            let kubeconfig = Kubeconfig::read_from(path)
                .with_context(|| format!("failed to read kubeconfig {}", path.display()))?;
            Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
                .await
                .context("failed to load kubeconfig")?
        }
        None => {
            info!("Using default kube client configuration");
            Config::infer()
                .await
                .context("failed to infer kube client configuration")?
        }
    };
    config.connect_timeout = Some(Duration::from_secs(CONNECT_TIMEOUT_SECS));
    config.read_timeout = Some(Duration::from_secs(READ_TIMEOUT_SECS));

    Client::try_from(config).context("failed to create kube client")
}
