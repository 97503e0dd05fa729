use std::collections::BTreeMap;
use std::fmt;

/// Snapshot of a secret as returned by a secret listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecretRecord {
    pub name: String,
    /// Opaque data, already base64-decoded by the API client.
    pub data: BTreeMap<String, Vec<u8>>,
}

impl SecretRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: BTreeMap::new(),
        }
    }

    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }
}

/// One key/value pair of one secret, as seen by the evaluator.
/// Lives for a single evaluation and is never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateEntry {
    pub namespace: String,
    pub secret: String,
    pub key: String,
    pub value: Vec<u8>,
}

impl CandidateEntry {
    pub fn new(
        namespace: impl Into<String>,
        secret: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            secret: secret.into(),
            key: key.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for CandidateEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}[{}]", self.namespace, self.secret, self.key)
    }
}
