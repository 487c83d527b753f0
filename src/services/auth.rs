use std::sync::Arc;

use bcrypt::{DEFAULT_COST, hash, verify};
use rand::Rng;

use crate::errors::AppError;
use crate::services::keys::user_key;
use crate::services::session::SessionStore;
use crate::store::KvStore;

/// Username/password registration and session issuance. Credentials
/// live in the store as bcrypt hashes; sessions live in memory only.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn KvStore>,
    sessions: SessionStore,
}

impl AuthService {
    pub fn new(store: Arc<dyn KvStore>, sessions: SessionStore) -> Self {
        Self { store, sessions }
    }

    /// Stores a salted password hash for a new username. The existence
    /// check and the write are two store calls; two racing registrations
    /// for the same name can both pass the check and the later write
    /// wins.
    pub async fn register(&self, username: &str, password: &str) -> Result<(), AppError> {
        let key = user_key(username);

        if self.store.exists(&key).await? {
            return Err(AppError::Conflict("User already exists".to_string()));
        }

        let password_hash = hash(password, DEFAULT_COST)?;
        self.store.set(&key, &password_hash).await?;
        Ok(())
    }

    /// Verifies the password and returns a freshly minted session key,
    /// evicting any session the user already had.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        rng: &mut impl Rng,
    ) -> Result<String, AppError> {
        let password_hash = self
            .store
            .get(&user_key(username))
            .await?
            .ok_or_else(|| AppError::Auth("User not found".to_string()))?;

        if !verify(password, &password_hash)? {
            return Err(AppError::Auth("Invalid password".to_string()));
        }

        Ok(self.sessions.create(username, rng))
    }

    pub fn logout(&self, session_key: &str) {
        self.sessions.remove(session_key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn service() -> (AuthService, SessionStore) {
        let sessions = SessionStore::new();
        let auth = AuthService::new(Arc::new(MemoryStore::new()), sessions.clone());
        (auth, sessions)
    }

    #[tokio::test]
    async fn register_then_login() {
        let (auth, sessions) = service();
        let mut rng = StdRng::seed_from_u64(1);

        auth.register("greta", "hunter2").await.unwrap();
        let key = auth.login("greta", "hunter2", &mut rng).await.unwrap();

        assert_eq!(sessions.get(&key).unwrap().username, "greta");
    }

    #[tokio::test]
    async fn duplicate_registration_conflicts() {
        let (auth, _) = service();

        auth.register("greta", "hunter2").await.unwrap();
        let err = auth.register("greta", "other").await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn login_rejects_unknown_user_and_bad_password() {
        let (auth, _) = service();
        let mut rng = StdRng::seed_from_u64(1);

        let err = auth.login("nobody", "pw", &mut rng).await.unwrap_err();
        assert_eq!(err.to_string(), "User not found");

        auth.register("greta", "hunter2").await.unwrap();
        let err = auth.login("greta", "wrong", &mut rng).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid password");
    }

    #[tokio::test]
    async fn relogin_invalidates_previous_session() {
        let (auth, sessions) = service();
        let mut rng = StdRng::seed_from_u64(1);

        auth.register("greta", "hunter2").await.unwrap();
        let first = auth.login("greta", "hunter2", &mut rng).await.unwrap();
        let second = auth.login("greta", "hunter2", &mut rng).await.unwrap();

        assert!(sessions.get(&first).is_none());
        assert!(sessions.get(&second).is_some());
    }

    #[tokio::test]
    async fn logout_removes_session() {
        let (auth, sessions) = service();
        let mut rng = StdRng::seed_from_u64(1);

        auth.register("greta", "hunter2").await.unwrap();
        let key = auth.login("greta", "hunter2", &mut rng).await.unwrap();

        auth.logout(&key);
        assert!(sessions.get(&key).is_none());

        // Unknown key is a no-op.
        auth.logout("never-existed");
    }
}
