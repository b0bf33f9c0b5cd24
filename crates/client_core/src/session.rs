//! Read-only access to the client-persisted session blob.
//!
//! The session entry is a base64-encoded JSON document keyed by
//! [`AUTH_USER_KEY`], written by the login flow (out of scope here) and only
//! ever read back by this layer to stamp authorship on new articles.

use std::{collections::HashMap, sync::Mutex};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use shared::{error::SessionError, protocol::SessionUser};

/// Key under which the signed-in user's identity is persisted.
pub const AUTH_USER_KEY: &str = "auth_user_info";

pub trait SessionStore: Send + Sync {
    fn get_by(&self, key: &str) -> Option<String>;

    /// Identity of the signed-in user. Fails when the session entry is
    /// absent or does not decode, before any request is sent.
    fn user(&self) -> Result<SessionUser, SessionError> {
        let raw = self.get_by(AUTH_USER_KEY).ok_or_else(|| SessionError::Missing {
            key: AUTH_USER_KEY.to_string(),
        })?;
        decode_session_user(&raw)
    }
}

fn decode_session_user(raw: &str) -> Result<SessionUser, SessionError> {
    let bytes = STANDARD
        .decode(raw)
        .map_err(|err| SessionError::Malformed {
            key: AUTH_USER_KEY.to_string(),
            reason: format!("invalid base64: {err}"),
        })?;
    serde_json::from_slice(&bytes).map_err(|err| SessionError::Malformed {
        key: AUTH_USER_KEY.to_string(),
        reason: format!("invalid json: {err}"),
    })
}

/// In-memory session store. Entries are stored the same way a cookie jar
/// would hold them: base64-encoded JSON strings.
#[derive(Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.into(), value.into());
    }

    /// Persists the user identity under [`AUTH_USER_KEY`].
    pub fn store_user(&self, user: &SessionUser) {
        let json = serde_json::to_vec(user).unwrap_or_default();
        self.insert(AUTH_USER_KEY, STANDARD.encode(json));
    }
}

impl SessionStore for MemorySessionStore {
    fn get_by(&self, key: &str) -> Option<String> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.get(key).cloned()
    }
}

/// Session store with no persisted session at all.
pub struct MissingSessionStore;

impl SessionStore for MissingSessionStore {
    fn get_by(&self, _key: &str) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use shared::domain::UserId;

    use super::*;

    #[test]
    fn stored_user_round_trips() {
        let store = MemorySessionStore::new();
        store.store_user(&SessionUser {
            id: UserId(7),
            username: "alice".into(),
        });

        let user = store.user().expect("user");
        assert_eq!(user.id, UserId(7));
        assert_eq!(user.username, "alice");
    }

    #[test]
    fn missing_session_entry_fails() {
        let err = MissingSessionStore.user().expect_err("must fail");
        assert!(matches!(err, SessionError::Missing { .. }));
    }

    #[test]
    fn malformed_session_entry_fails() {
        let store = MemorySessionStore::new();
        store.insert(AUTH_USER_KEY, "not-base64!!");
        let err = store.user().expect_err("must fail");
        assert!(matches!(err, SessionError::Malformed { .. }));
    }

    #[test]
    fn garbage_json_is_rejected() {
        let store = MemorySessionStore::new();
        store.insert(AUTH_USER_KEY, STANDARD.encode(b"{\"id\": true}"));
        let err = store.user().expect_err("must fail");
        assert!(matches!(err, SessionError::Malformed { .. }));
    }
}
