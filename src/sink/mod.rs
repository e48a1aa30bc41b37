//! Submission sinks
//!
//! Persistence sits behind [`SubmissionSink`]; the crate only ships a sink
//! that logs.

mod log_sink;
mod traits;

pub use log_sink::LogSink;
#[cfg(test)]
pub use traits::MockSubmissionSink;
pub use traits::SubmissionSink;
