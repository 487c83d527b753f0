use rand::Rng;

use crate::store::{KvStore, StoreError};

/// 6 characters out of 62 gives 62^6 ~ 5.68e10 distinct aliases.
pub const ALIAS_LENGTH: usize = 6;
const ALIAS_ALPHABET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Draws one candidate alias. Every call redraws all six characters.
pub fn random_alias(rng: &mut impl Rng) -> String {
    (0..ALIAS_LENGTH)
        .map(|_| ALIAS_ALPHABET[rng.random_range(0..ALIAS_ALPHABET.len())] as char)
        .collect()
}

/// Generates an alias that does not currently exist in the store.
///
/// Redraws the whole alias on collision, with no retry bound: at the
/// alphabet size above, a long collision streak would mean the store is
/// effectively full. The existence check reserves nothing; the caller's
/// subsequent `set` is what takes the alias.
pub async fn generate(store: &dyn KvStore, rng: &mut impl Rng) -> Result<String, StoreError> {
    loop {
        let alias = random_alias(rng);
        if !store.exists(&alias).await? {
            return Ok(alias);
        }
    }
}

/// True when `alias` has the shape the generator produces: exactly six
/// ASCII alphanumeric characters.
pub fn is_valid_alias(alias: &str) -> bool {
    alias.len() == ALIAS_LENGTH && alias.bytes().all(|b| b.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn random_alias_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let alias = random_alias(&mut rng);
            assert!(is_valid_alias(&alias), "bad alias: {alias}");
        }
    }

    #[test]
    fn valid_alias_shapes() {
        assert!(is_valid_alias("abc123"));
        assert!(is_valid_alias("ZZZZZZ"));
        assert!(!is_valid_alias("abc12"));
        assert!(!is_valid_alias("abc1234"));
        assert!(!is_valid_alias("abc12!"));
        assert!(!is_valid_alias("abc 12"));
        assert!(!is_valid_alias(""));
    }

    #[tokio::test]
    async fn no_reservation_without_store_write() {
        let store = MemoryStore::new();

        // Two generators with the same seed draw the same alias as long
        // as nothing was stored in between.
        let a = generate(&store, &mut StdRng::seed_from_u64(42)).await.unwrap();
        let b = generate(&store, &mut StdRng::seed_from_u64(42)).await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn collision_forces_full_redraw() {
        let store = MemoryStore::new();

        let first = random_alias(&mut StdRng::seed_from_u64(42));
        store.set(&first, "http://example.com").await.unwrap();

        // Same seed now collides on its first draw and must come back
        // with a completely fresh alias.
        let next = generate(&store, &mut StdRng::seed_from_u64(42)).await.unwrap();
        assert_ne!(first, next);
        assert!(is_valid_alias(&next));
    }
}
