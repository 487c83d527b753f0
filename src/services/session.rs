use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use rand::Rng;

pub const SESSION_KEY_LENGTH: usize = 32;
// Wider alphabet than the alias one; every character is valid in a
// cookie value.
const SESSION_KEY_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!#$%&'*+-./:<=>?@^_`{|}~";

/// An authenticated identity bound to a session key.
#[derive(Debug, Clone)]
pub struct Session {
    pub username: String,
}

/// In-memory session store: session key -> username. Lost on restart.
///
/// Backed by a `DashMap` so concurrent logins and logouts from
/// different workers never race on an unsynchronized map. At most one
/// live session exists per username; creating a new one evicts the old.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<DashMap<String, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evicts any existing session for `username`, then mints a fresh
    /// key for it. The entry API makes the collision check and the
    /// insert a single step, so two logins can never share a key.
    pub fn create(&self, username: &str, rng: &mut impl Rng) -> String {
        self.inner.retain(|_, session| session.username != username);

        loop {
            let key = random_session_key(rng);
            match self.inner.entry(key.clone()) {
                Entry::Occupied(_) => continue,
                Entry::Vacant(entry) => {
                    entry.insert(Session {
                        username: username.to_string(),
                    });
                    return key;
                }
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<Session> {
        self.inner.get(key).map(|session| session.clone())
    }

    /// Removes the session unconditionally; an absent key is a no-op.
    pub fn remove(&self, key: &str) {
        self.inner.remove(key);
    }
}

fn random_session_key(rng: &mut impl Rng) -> String {
    (0..SESSION_KEY_LENGTH)
        .map(|_| SESSION_KEY_ALPHABET[rng.random_range(0..SESSION_KEY_ALPHABET.len())] as char)
        .collect()
}
