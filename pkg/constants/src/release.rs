//! Release annotation toggle constants.

/// Namespaces owned by the cluster itself; releases there are never touched.
pub const SYSTEM_NAMESPACES: &[&str] = &["kube-system", "kube-public", "kube-node-lease"];

/// API group of the release resource.
pub const DEFAULT_RELEASE_GROUP: &str = "helm.toolkit.fluxcd.io";

/// API version of the release resource.
pub const DEFAULT_RELEASE_VERSION: &str = "v2";

/// Kind of the release resource.
pub const DEFAULT_RELEASE_KIND: &str = "HelmRelease";

/// Annotation that is set and then cleared on every release.
pub const DEFAULT_TOUCH_ANNOTATION: &str = "certaudit.io/touched-at";
