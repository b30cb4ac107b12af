//! Per-session edited snapshots.
//!
//! A committed worksheet replaces the loaded rows for that session only.
//! Sessions never see each other's edits.

use crate::model::RecordSet;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Default)]
pub struct SessionStore {
    snapshots: HashMap<SessionId, RecordSet>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the session's snapshot wholesale
    pub fn commit(&mut self, session: &SessionId, records: RecordSet) {
        log::info!(
            "Session {}: applied worksheet with {} rows",
            session,
            records.len()
        );
        self.snapshots.insert(session.clone(), records);
    }

    pub fn snapshot(&self, session: &SessionId) -> Option<&RecordSet> {
        self.snapshots.get(session)
    }

    pub fn has_snapshot(&self, session: &SessionId) -> bool {
        self.snapshots.contains_key(session)
    }

    /// The rows a render pass should use: the session's snapshot if one was
    /// committed, otherwise the freshly loaded rows
    pub fn working_set<'a>(&'a self, session: &SessionId, loaded: &'a RecordSet) -> &'a RecordSet {
        match self.snapshot(session) {
            Some(snapshot) => {
                log::debug!("Session {}: using edited snapshot", session);
                snapshot
            }
            None => loaded,
        }
    }

    pub fn clear(&mut self, session: &SessionId) -> Option<RecordSet> {
        self.snapshots.remove(session)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_supersedes_loaded_rows() {
        let loaded = RecordSet::from_rows(&["Name"], &[vec!["Asha"], vec!["Ravi"]]);
        let edited = RecordSet::from_rows(&["Name"], &[vec!["Kiran"]]);
        let session = SessionId::new("alice");

        let mut store = SessionStore::new();
        assert_eq!(store.working_set(&session, &loaded), &loaded);
        assert!(store.snapshot(&session).is_none());

        store.commit(&session, edited.clone());
        assert_eq!(store.snapshot(&session), Some(&edited));
        assert_eq!(store.working_set(&session, &loaded), &edited);
        // Still in force on the next pass
        assert_eq!(store.working_set(&session, &loaded), &edited);
    }

    #[test]
    fn test_sessions_are_isolated() {
        let loaded = RecordSet::from_rows(&["Name"], &[vec!["Asha"]]);
        let edited = RecordSet::from_rows(&["Name"], &[vec!["Kiran"]]);
        let alice = SessionId::new("alice");
        let bob = SessionId::new("bob");

        let mut store = SessionStore::new();
        store.commit(&alice, edited.clone());

        assert_eq!(store.working_set(&bob, &loaded), &loaded);
        assert!(!store.has_snapshot(&bob));

        assert_eq!(store.clear(&alice), Some(edited));
        assert_eq!(store.working_set(&alice, &loaded), &loaded);
        assert!(store.is_empty());
    }
}
