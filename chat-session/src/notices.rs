//! User-facing notice channel.
//!
//! Workflow operations report transient outcomes (success banners, blocked
//! preconditions, request failures) and vectorization progress through this
//! trait instead of printing directly, so headless runs and tests can plug in
//! a no-op or recording sink. Suppressed errors (progress-poll failures) do
//! NOT go through here; they are only logged.

/// Sink for transient, user-visible feedback.
pub trait Notices: Send + Sync {
    /// An operation completed successfully.
    fn success(&self, _msg: &str) {}
    /// A precondition was not met; the action was blocked, nothing changed.
    fn warning(&self, _msg: &str) {}
    /// An operation failed; prior state was left intact.
    fn error(&self, _msg: &str) {}
    /// Vectorization progress update, `0..=100`.
    fn progress(&self, _percent: u8) {}
}

/// No-op sink for headless runs.
#[derive(Default, Clone, Copy)]
pub struct NoopNotices;
impl Notices for NoopNotices {}
