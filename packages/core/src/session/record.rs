//! Session epochs and the per-device record holding them.
//!
//! A [`SessionRecord`] keeps one current [`SessionState`] and an archive of
//! previous ones, most recently archived last. No two states in a record share
//! an `alice_base_key`.

use crate::config::Config;
use serde::{Deserialize, Serialize};

/// One negotiated session epoch with a peer device.
///
/// Identity is the initiator's base key. The ratchet state is opaque here: only
/// the underlying session cipher reads or advances it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    alice_base_key: Vec<u8>,
    ratchet_state: Vec<u8>,
}

impl SessionState {
    pub fn new(alice_base_key: Vec<u8>, ratchet_state: Vec<u8>) -> Self {
        Self {
            alice_base_key,
            ratchet_state,
        }
    }

    pub fn alice_base_key(&self) -> &[u8] {
        &self.alice_base_key
    }

    pub fn ratchet_state(&self) -> &[u8] {
        &self.ratchet_state
    }

    pub fn set_ratchet_state(&mut self, ratchet_state: Vec<u8>) {
        self.ratchet_state = ratchet_state;
    }

    pub fn same_epoch(&self, other: &SessionState) -> bool {
        self.alice_base_key == other.alice_base_key
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    current: Option<SessionState>,
    previous: Vec<SessionState>,
}

impl SessionRecord {
    pub fn new_fresh() -> Self {
        Self::default()
    }

    pub fn new(state: SessionState) -> Self {
        Self {
            current: Some(state),
            previous: Vec::new(),
        }
    }

    /// A fresh record has no current state: nothing has been negotiated yet,
    /// or the record was pruned down to nothing.
    pub fn is_fresh(&self) -> bool {
        self.current.is_none()
    }

    pub fn current_state(&self) -> Option<&SessionState> {
        self.current.as_ref()
    }

    pub fn current_state_mut(&mut self) -> Option<&mut SessionState> {
        self.current.as_mut()
    }

    pub fn archived_states(&self) -> &[SessionState] {
        &self.previous
    }

    /// Index of the most recently archived state with this base key.
    pub fn position_of_archived(&self, alice_base_key: &[u8]) -> Option<usize> {
        self.previous
            .iter()
            .rposition(|s| s.alice_base_key() == alice_base_key)
    }

    pub fn has_state(&self, alice_base_key: &[u8]) -> bool {
        self.current
            .as_ref()
            .is_some_and(|s| s.alice_base_key() == alice_base_key)
            || self.position_of_archived(alice_base_key).is_some()
    }

    pub fn remove_archived(&mut self, index: usize) -> Option<SessionState> {
        if index < self.previous.len() {
            Some(self.previous.remove(index))
        } else {
            None
        }
    }

    /// Makes `state` current, archiving whatever was current before.
    pub fn promote(&mut self, state: SessionState) {
        self.drop_archived_epoch(state.alice_base_key());
        if let Some(current) = self.current.take() {
            if !current.same_epoch(&state) {
                self.push_archived(current);
            }
        }
        self.current = Some(state);
    }

    /// Replaces the current state without archiving it.
    pub fn set_current(&mut self, state: SessionState) {
        self.drop_archived_epoch(state.alice_base_key());
        self.current = Some(state);
    }

    pub fn archive_current_state(&mut self) {
        if let Some(current) = self.current.take() {
            self.push_archived(current);
        }
    }

    pub fn remove_previous_states(&mut self) {
        self.previous.clear();
    }

    /// Drops every archived state and leaves `state` as the only one.
    pub fn retain_only(&mut self, state: Option<SessionState>) {
        self.previous.clear();
        self.current = state;
    }

    pub fn state_count(&self) -> usize {
        self.previous.len() + usize::from(self.current.is_some())
    }

    fn drop_archived_epoch(&mut self, alice_base_key: &[u8]) {
        self.previous.retain(|s| s.alice_base_key() != alice_base_key);
    }

    fn push_archived(&mut self, state: SessionState) {
        self.drop_archived_epoch(state.alice_base_key());
        self.previous.push(state);

        let max = Config::global().max_archived_states;
        if self.previous.len() > max {
            let excess = self.previous.len() - max;
            self.previous.drain(..excess);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(key: u8) -> SessionState {
        SessionState::new(vec![key; 33], vec![key])
    }

    #[test]
    fn test_fresh_record() {
        let record = SessionRecord::new_fresh();
        assert!(record.is_fresh());
        assert!(record.current_state().is_none());
        assert_eq!(record.state_count(), 0);
    }

    #[test]
    fn test_promote_archives_current_most_recent_last() {
        let mut record = SessionRecord::new(state(1));
        record.promote(state(2));
        record.promote(state(3));

        assert_eq!(record.current_state(), Some(&state(3)));
        assert_eq!(record.archived_states(), &[state(1), state(2)]);
    }

    #[test]
    fn test_promote_deduplicates_archived_epoch() {
        let mut record = SessionRecord::new(state(1));
        record.promote(state(2));

        // state(1) comes back: it must leave the archive, state(2) goes in
        record.promote(state(1));

        assert_eq!(record.current_state(), Some(&state(1)));
        assert_eq!(record.archived_states(), &[state(2)]);
        assert_eq!(record.state_count(), 2);
    }

    #[test]
    fn test_promote_same_epoch_replaces_current() {
        let mut record = SessionRecord::new(state(1));
        let mut advanced = state(1);
        advanced.set_ratchet_state(vec![9, 9]);

        record.promote(advanced.clone());

        assert_eq!(record.current_state(), Some(&advanced));
        assert!(record.archived_states().is_empty());
    }

    #[test]
    fn test_set_current_does_not_archive() {
        let mut record = SessionRecord::new(state(1));
        record.set_current(state(2));

        assert_eq!(record.current_state(), Some(&state(2)));
        assert!(record.archived_states().is_empty());
    }

    #[test]
    fn test_remove_archived_out_of_range() {
        let mut record = SessionRecord::new(state(1));
        record.promote(state(2));

        assert_eq!(record.remove_archived(5), None);
        assert_eq!(record.remove_archived(0), Some(state(1)));
        assert!(record.archived_states().is_empty());
    }

    #[test]
    fn test_position_and_has_state() {
        let mut record = SessionRecord::new(state(1));
        record.promote(state(2));
        record.promote(state(3));

        assert_eq!(record.position_of_archived(&[2u8; 33]), Some(1));
        assert_eq!(record.position_of_archived(&[3u8; 33]), None);
        assert!(record.has_state(&[3u8; 33]));
        assert!(!record.has_state(&[4u8; 33]));
    }

    #[test]
    fn test_archive_is_bounded() {
        let max = Config::global().max_archived_states;
        let mut record = SessionRecord::new_fresh();
        for key in 0..(max as u8 + 5) {
            record.promote(state(key));
        }

        assert_eq!(record.archived_states().len(), max);
        // the oldest ones are dropped first
        assert_eq!(record.archived_states()[0], state(4));
    }

    #[test]
    fn test_retain_only() {
        let mut record = SessionRecord::new(state(1));
        record.promote(state(2));

        record.retain_only(Some(state(1)));
        assert_eq!(record.current_state(), Some(&state(1)));
        assert!(record.archived_states().is_empty());

        record.retain_only(None);
        assert!(record.is_fresh());
    }
}
