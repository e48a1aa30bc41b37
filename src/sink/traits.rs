//! Trait abstraction for form submission to enable mocking in tests

use crate::state::FormSnapshot;
use anyhow::Result;
use async_trait::async_trait;

/// Destination for submitted form snapshots
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    /// Hand over a snapshot of the form
    async fn submit(&self, snapshot: FormSnapshot) -> Result<()>;
}
