//! Run observer port
//!
//! Defines how the orchestration core surfaces messages, thinking state,
//! and progress to whoever is watching. All callbacks are fire-and-forget
//! and must not block; implementations live in the presentation layer.
//!
//! Ordering is guaranteed per target only: events for one circle arrive in
//! the order its chain produced them, but events for different circles (or
//! the judge) may interleave arbitrarily.

use relay_domain::{AgentId, CircleId, Message};

/// Where a message belongs: one circle's transcript, or the judge's
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunTarget {
    Circle(CircleId),
    Judge,
}

/// Callbacks for observing a relay run
pub trait RunObserver: Send + Sync {
    /// A message was appended to the target's transcript
    fn on_message_appended(&self, target: &RunTarget, message: &Message);

    /// The thinking indicator moved to the given agent, or cleared
    fn on_thinking_changed(&self, agent: Option<&AgentId>);

    /// A circle's progress counters advanced
    fn on_progress_changed(&self, circle: &CircleId, sent: u32, total: u32);
}

/// No-op observer for when nothing is watching
pub struct NoObserver;

impl RunObserver for NoObserver {
    fn on_message_appended(&self, _target: &RunTarget, _message: &Message) {}
    fn on_thinking_changed(&self, _agent: Option<&AgentId>) {}
    fn on_progress_changed(&self, _circle: &CircleId, _sent: u32, _total: u32) {}
}
