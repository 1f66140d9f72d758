//! Outbound notifications of the session layer.
//!
//! Sinks are handed to the reconciler at construction, so there is no global
//! broadcast: whoever builds the reconciler decides who hears about adoptions.

use serde::{Deserialize, Serialize};
use std::sync::mpsc::Sender;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// `session-adopted`: a reset converged and the peer's record now holds a
    /// single session.
    Adopted { recipient_id: String },
}

pub trait SessionEventSink {
    fn session_adopted(&self, recipient_id: &str);

    /// Called when we initiated a reset and the peer is still answering on the
    /// old session. Nothing is changed; this only exists for visibility.
    fn reset_still_pending(&self, _recipient_id: &str) {}
}

impl<F> SessionEventSink for F
where
    F: Fn(&str),
{
    fn session_adopted(&self, recipient_id: &str) {
        self(recipient_id)
    }
}

impl SessionEventSink for Sender<SessionEvent> {
    fn session_adopted(&self, recipient_id: &str) {
        let event = SessionEvent::Adopted {
            recipient_id: recipient_id.to_string(),
        };
        if self.send(event).is_err() {
            debug!(
                target: "session::events",
                recipient_id = %recipient_id,
                "Session event receiver dropped"
            );
        }
    }
}
