//! Release annotation toggle.
//!
//! Sets and immediately clears an annotation on every release resource in
//! every non-system namespace, nudging the release controller to reconcile.
//! Independent of the certificate audit.

pub mod error;
pub mod store;
pub mod toggle;

pub use error::ReleaseError;
pub use store::{KubeReleaseStore, ReleaseStore};
pub use toggle::{ReleaseToggler, is_system_namespace};
