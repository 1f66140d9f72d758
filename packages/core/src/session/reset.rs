//! Session reset coordination, as seen from the decrypt path.
//!
//! The coordinator owns the reset status of every peer; the reconciler only
//! reads it and asks it to vet unsolicited pre-key messages.

use crate::error::ResetVerificationError;
use crate::session::message::CipherMessage;
use serde::{Deserialize, Serialize};

/// Where a session reset with a peer currently stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionResetStatus {
    /// No reset in flight
    #[default]
    None,
    /// The peer asked us to reset; convergence not yet confirmed
    RequestReceived,
    /// We asked the peer to reset and are waiting for their reply
    RequestSent,
}

pub trait SessionResetCoordinator<C> {
    fn session_reset_status(&self, recipient_id: &str, ctx: &mut C) -> SessionResetStatus;

    /// Checks that an unsolicited pre-key message is a genuine reset or friend
    /// request accept, not a replay or forgery.
    fn verify_friend_request_accept_pre_key(
        &self,
        recipient_id: &str,
        message: &CipherMessage,
        ctx: &mut C,
    ) -> Result<(), ResetVerificationError>;
}

/// Used when the caller has no reset awareness: status is always
/// [`SessionResetStatus::None`] and every pre-key message is accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSessionReset;

impl<C> SessionResetCoordinator<C> for NoSessionReset {
    fn session_reset_status(&self, _recipient_id: &str, _ctx: &mut C) -> SessionResetStatus {
        SessionResetStatus::None
    }

    fn verify_friend_request_accept_pre_key(
        &self,
        _recipient_id: &str,
        _message: &CipherMessage,
        _ctx: &mut C,
    ) -> Result<(), ResetVerificationError> {
        Ok(())
    }
}

impl<C, T: SessionResetCoordinator<C> + ?Sized> SessionResetCoordinator<C> for &T {
    fn session_reset_status(&self, recipient_id: &str, ctx: &mut C) -> SessionResetStatus {
        (**self).session_reset_status(recipient_id, ctx)
    }

    fn verify_friend_request_accept_pre_key(
        &self,
        recipient_id: &str,
        message: &CipherMessage,
        ctx: &mut C,
    ) -> Result<(), ResetVerificationError> {
        (**self).verify_friend_request_accept_pre_key(recipient_id, message, ctx)
    }
}
