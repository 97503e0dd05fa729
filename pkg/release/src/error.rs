use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReleaseError {
    #[error("failed to list namespaces: {0}")]
    NamespaceList(String),

    #[error("failed to list releases in namespace {namespace}: {message}")]
    ReleaseList { namespace: String, message: String },

    #[error("failed to patch release {namespace}/{name}: {message}")]
    Patch {
        namespace: String,
        name: String,
        message: String,
    },

    /// The set patch landed but the clear did not; the annotation must be
    /// removed by hand.
    #[error(
        "annotation {annotation} left set on release {namespace}/{name}, clear failed: {message}"
    )]
    AnnotationLeftSet {
        namespace: String,
        name: String,
        annotation: String,
        message: String,
    },
}
