use thiserror::Error;

/// Errors that end an audit run. Per-entry problems never surface here.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("failed to list namespaces: {0}")]
    NamespaceList(String),

    #[error("failed to list secrets in namespace {namespace}: {message}")]
    SecretList { namespace: String, message: String },

    /// Stop was requested between two entries
    #[error("audit interrupted")]
    Interrupted,
}

impl AuditError {
    pub fn secret_list(namespace: &str, message: impl Into<String>) -> Self {
        Self::SecretList {
            namespace: namespace.to_string(),
            message: message.into(),
        }
    }
}
