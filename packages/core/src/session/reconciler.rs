//! Session-aware decrypt wrapper
//!
//! Оборачивает underlying ratchet cipher и после каждого успешного decrypt
//! решает, не была ли сессия с собеседником молча пересогласована (session
//! reset), и какое состояние должно стать основным.
//!
//! ## Dataflow
//!
//! ```text
//! decrypt(message, ctx)
//!   ├── load record            → previous_state (None если record fresh)
//!   ├── previous_state == None && PreKey
//!   │     └── coordinator.verify_friend_request_accept_pre_key()   ✗ → ResetVerification
//!   ├── cipher.decrypt()       (может promote новый state и архивировать старый)  ✗ → Decrypt
//!   └── reconcile(previous_state)
//!         ├── status == None                     → ничего
//!         ├── epoch changed  + RequestReceived   → restore previous_state
//!         ├── epoch changed  + RequestSent       → оставить только новый state, session-adopted
//!         ├── same epoch     + RequestReceived   → оставить только previous_state, session-adopted
//!         └── same epoch     + RequestSent       → ждём (reset_still_pending hook)
//! ```
//!
//! ## Concurrency
//!
//! Вызовы decrypt для одного (recipient, device) должны быть сериализованы
//! вызывающим кодом. Все чтения и запись идут через один `ctx`.

use crate::error::{Result, StoreError};
use crate::session::address::ProtocolAddress;
use crate::session::cipher::SessionCipher;
use crate::session::events::SessionEventSink;
use crate::session::message::CipherMessage;
use crate::session::record::SessionState;
use crate::session::reset::{NoSessionReset, SessionResetCoordinator, SessionResetStatus};
use crate::session::store::SessionStore;
use std::marker::PhantomData;
use tracing::{debug, error, info, warn};

/// Corrective action chosen after a successful decrypt.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Reconciliation {
    Nothing,
    /// The peer reached us on a stale session: put `previous` back as current.
    Restore(SessionState),
    /// The reset converged: keep only this state and announce it.
    Adopt(Option<SessionState>),
    /// We asked for a reset, the peer still talks on the old session.
    StillPending,
}

fn decide(
    status: SessionResetStatus,
    previous: SessionState,
    after: Option<SessionState>,
) -> Reconciliation {
    let epoch_changed = after.as_ref().map_or(true, |after| !after.same_epoch(&previous));

    match (status, epoch_changed) {
        (SessionResetStatus::None, _) => Reconciliation::Nothing,
        (SessionResetStatus::RequestReceived, true) => Reconciliation::Restore(previous),
        (SessionResetStatus::RequestSent, true) => Reconciliation::Adopt(after),
        // Same epoch as before: take the record's copy, it carries the advanced ratchet
        (SessionResetStatus::RequestReceived, false) => Reconciliation::Adopt(after),
        (SessionResetStatus::RequestSent, false) => Reconciliation::StillPending,
    }
}

/// Decrypts through `X` and reconciles the session record of one peer device.
pub struct SessionReconciler<C, S, X, R = NoSessionReset> {
    address: ProtocolAddress,
    store: S,
    cipher: X,
    session_reset: R,
    sink: Option<Box<dyn SessionEventSink + Send>>,
    _context: PhantomData<fn(&mut C)>,
}

impl<C, S, X> SessionReconciler<C, S, X, NoSessionReset>
where
    S: SessionStore<C>,
    X: SessionCipher<C>,
{
    pub fn new(address: ProtocolAddress, store: S, cipher: X) -> Self {
        Self {
            address,
            store,
            cipher,
            session_reset: NoSessionReset,
            sink: None,
            _context: PhantomData,
        }
    }
}

impl<C, S, X, R> SessionReconciler<C, S, X, R>
where
    S: SessionStore<C>,
    X: SessionCipher<C>,
    R: SessionResetCoordinator<C>,
{
    /// Makes the reconciler reset-aware.
    pub fn with_session_reset<R2: SessionResetCoordinator<C>>(
        self,
        session_reset: R2,
    ) -> SessionReconciler<C, S, X, R2> {
        SessionReconciler {
            address: self.address,
            store: self.store,
            cipher: self.cipher,
            session_reset,
            sink: self.sink,
            _context: PhantomData,
        }
    }

    pub fn with_event_sink(mut self, sink: impl SessionEventSink + Send + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn address(&self) -> &ProtocolAddress {
        &self.address
    }

    pub fn decrypt(&self, message: &CipherMessage, ctx: &mut C) -> Result<Vec<u8>> {
        let previous_state = self.current_state(ctx)?;

        if previous_state.is_none() && message.is_pre_key() {
            self.session_reset.verify_friend_request_accept_pre_key(
                &self.address.recipient_id,
                message,
                ctx,
            )?;
        }

        let plaintext = self.cipher.decrypt(&self.address, message, ctx)?;

        if let Some(previous_state) = previous_state {
            self.handle_session_reset(previous_state, ctx);
        }

        Ok(plaintext)
    }

    /// Encrypts on the current session. No reconciliation happens on this path.
    pub fn encrypt(&self, plaintext: &[u8], ctx: &mut C) -> Result<CipherMessage> {
        Ok(self.cipher.encrypt(&self.address, plaintext, ctx)?)
    }

    fn current_state(&self, ctx: &mut C) -> std::result::Result<Option<SessionState>, StoreError> {
        let record = self.store.load_session(&self.address, ctx)?;
        Ok(if record.is_fresh() {
            None
        } else {
            record.current_state().cloned()
        })
    }

    /// Runs after a successful decrypt. The plaintext is already produced, so
    /// failures here are logged and never surface to the caller.
    fn handle_session_reset(&self, previous_state: SessionState, ctx: &mut C) {
        let recipient_id = self.address.recipient_id.as_str();
        let status = self.session_reset.session_reset_status(recipient_id, ctx);

        if status == SessionResetStatus::None {
            return;
        }

        let after_state = match self.current_state(ctx) {
            Ok(state) => state,
            Err(e) => {
                error!(
                    target: "session::reconciler",
                    address = %self.address,
                    error = %e,
                    "Couldn't reload session after decrypt, skipping reconciliation"
                );
                return;
            }
        };

        let outcome = match decide(status, previous_state, after_state) {
            Reconciliation::Nothing => Ok(()),
            Reconciliation::Restore(previous) => self.restore_session(previous, ctx),
            Reconciliation::Adopt(state) => self.adopt_session(state, ctx),
            Reconciliation::StillPending => {
                debug!(
                    target: "session::reconciler",
                    address = %self.address,
                    "Session reset requested, peer still on the old session"
                );
                if let Some(sink) = &self.sink {
                    sink.reset_still_pending(recipient_id);
                }
                Ok(())
            }
        };

        if let Err(e) = outcome {
            error!(
                target: "session::reconciler",
                address = %self.address,
                status = ?status,
                error = %e,
                "Couldn't persist session reconciliation"
            );
        }
    }

    /// Puts `state` back as current, archiving whatever the cipher just promoted.
    fn restore_session(&self, state: SessionState, ctx: &mut C) -> std::result::Result<(), StoreError> {
        let mut record = self.store.load_session(&self.address, ctx)?;

        let Some(index) = record.position_of_archived(state.alice_base_key()) else {
            warn!(
                target: "session::reconciler",
                address = %self.address,
                "Previous session not found in archive, leaving record untouched"
            );
            return Ok(());
        };
        // The archived copy is the one the cipher last wrote
        let archived = record.remove_archived(index).unwrap_or(state);
        record.promote(archived);

        self.store.store_session(&self.address, &record, ctx)?;

        info!(
            target: "session::reconciler",
            address = %self.address,
            "Peer used an old session, restored it as current"
        );
        Ok(())
    }

    fn adopt_session(&self, state: Option<SessionState>, ctx: &mut C) -> std::result::Result<(), StoreError> {
        let mut record = self.store.load_session(&self.address, ctx)?;
        record.retain_only(state);
        self.store.store_session(&self.address, &record, ctx)?;

        info!(
            target: "session::reconciler",
            address = %self.address,
            "Session reset converged, session adopted"
        );
        if let Some(sink) = &self.sink {
            sink.session_adopted(&self.address.recipient_id);
        }
        Ok(())
    }
}
