use std::sync::Arc;

use rand::Rng;

use crate::errors::AppError;
use crate::services::alias::{self, is_valid_alias};
use crate::services::keys::{dates_key, user_links_key};
use crate::services::normalize::normalize;
use crate::store::KvStore;

/// Owns the alias -> long-URL mapping and the per-user ownership lists.
#[derive(Clone)]
pub struct LinkService {
    store: Arc<dyn KvStore>,
}

impl LinkService {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// Normalizes `raw_url`, allocates a fresh alias, stores the mapping
    /// with no expiry, and front-pushes the alias onto `owner`'s list
    /// when one is given.
    ///
    /// The store write and the ownership push are two separate calls: if
    /// the push fails the whole request errors, but the alias stays
    /// resolvable and untracked.
    pub async fn shorten(
        &self,
        raw_url: &str,
        owner: Option<&str>,
        rng: &mut impl Rng,
    ) -> Result<String, AppError> {
        let long_url = normalize(raw_url)?;

        let alias = alias::generate(self.store.as_ref(), rng).await?;
        self.store.set(&alias, &long_url).await?;

        if let Some(username) = owner {
            self.store
                .list_push_front(&user_links_key(username), &alias)
                .await?;
        }

        Ok(alias)
    }

    /// Resolves an alias to its long URL. A structurally invalid alias
    /// is rejected without a store round-trip.
    pub async fn resolve(&self, alias: &str) -> Result<String, AppError> {
        if !is_valid_alias(alias) {
            return Err(AppError::NotFound("Could not find short url".to_string()));
        }

        self.store
            .get(alias)
            .await?
            .ok_or_else(|| AppError::NotFound("Could not find short url".to_string()))
    }

    /// Returns the aliases owned by `username`, newest first.
    pub async fn list_owned(&self, username: &str) -> Result<Vec<String>, AppError> {
        Ok(self
            .store
            .list_range(&user_links_key(username), 0, -1)
            .await?)
    }

    /// Deletes the alias mapping together with its click history, then
    /// prunes the alias from `username`'s list.
    ///
    /// Deliberately does not verify that `username` owns the alias: any
    /// authenticated user can delete any alias's global record, and only
    /// their own list entry gets pruned. Kept as-is until the product
    /// behavior is reconsidered.
    pub async fn remove(&self, alias: &str, username: &str) -> Result<(), AppError> {
        self.store.delete(&[alias, &dates_key(alias)]).await?;
        self.store
            .list_remove(&user_links_key(username), 0, alias)
            .await?;
        Ok(())
    }
}
