//! Sink that writes submissions to the log

use super::SubmissionSink;
use crate::state::FormSnapshot;
use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

/// Logs each snapshot as JSON instead of persisting it
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

#[async_trait]
impl SubmissionSink for LogSink {
    async fn submit(&self, snapshot: FormSnapshot) -> Result<()> {
        let json = serde_json::to_string(&snapshot)?;
        info!(valid = snapshot.valid, "Form submitted: {json}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    #[tokio::test]
    async fn test_log_sink_accepts_snapshot() {
        let snapshot = FormSnapshot {
            value: json!({"firstName": "Ada"}),
            valid: true,
            saved_at: Utc::now(),
        };
        assert!(LogSink.submit(snapshot).await.is_ok());
    }
}
