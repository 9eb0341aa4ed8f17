//! Publishing the compiled artifact to a remote document store.

pub mod gist;

pub use gist::GistPublisher;

use anyhow::Result;

/// Accepts the final JSON document.
///
/// Publishing fully overwrites the remote resource, so repeating a publish
/// is harmless. Failures are reported to the caller, never retried here;
/// the local artifact stays valid either way.
#[async_trait::async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, document: &str) -> Result<()>;
}
