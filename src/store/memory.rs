use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::store::{KvStore, StoreError};

#[derive(Debug, Clone)]
enum Value {
    Str(String),
    List(VecDeque<String>),
}

/// In-memory [`KvStore`] with Redis list semantics. Used by the test
/// suite and usable as a non-durable fallback when no Redis is around.
///
/// A single `Mutex` over the whole map is enough here: no lock is held
/// across an await point and the critical sections are tiny.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn wrong_type(key: &str) -> StoreError {
    StoreError::Operation(format!(
        "key '{key}' holds the wrong kind of value for this operation"
    ))
}

/// Resolves a Redis-style range (negative indices count from the end)
/// against a list of `len` elements. Returns `None` for an empty slice.
fn resolve_range(start: isize, stop: isize, len: usize) -> Option<(usize, usize)> {
    let len = len as isize;
    let from = (if start < 0 { len + start } else { start }).max(0);
    let to = (if stop < 0 { len + stop } else { stop }).min(len - 1);
    if from > to || from >= len || to < 0 {
        return None;
    }
    Some((from as usize, to as usize))
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn exists(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.inner.lock().unwrap().contains_key(key))
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self.inner.lock().unwrap().get(key) {
            Some(Value::Str(s)) => Ok(Some(s.clone())),
            Some(Value::List(_)) => Err(wrong_type(key)),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.inner
            .lock()
            .unwrap()
            .insert(key.to_string(), Value::Str(value.to_string()));
        Ok(())
    }

    async fn delete(&self, keys: &[&str]) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        for key in keys {
            inner.remove(*key);
        }
        Ok(())
    }

    async fn list_push_front(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        match inner
            .entry(key.to_string())
            .or_insert_with(|| Value::List(VecDeque::new()))
        {
            Value::List(list) => {
                list.push_front(value.to_string());
                Ok(())
            }
            Value::Str(_) => Err(wrong_type(key)),
        }
    }

    async fn list_range(
        &self,
        key: &str,
        start: isize,
        stop: isize,
    ) -> Result<Vec<String>, StoreError> {
        let inner = self.inner.lock().unwrap();
        let list = match inner.get(key) {
            Some(Value::List(list)) => list,
            Some(Value::Str(_)) => return Err(wrong_type(key)),
            None => return Ok(Vec::new()),
        };
        let Some((from, to)) = resolve_range(start, stop, list.len()) else {
            return Ok(Vec::new());
        };
        Ok(list.iter().skip(from).take(to - from + 1).cloned().collect())
    }

    async fn list_remove(&self, key: &str, count: isize, value: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let list = match inner.get_mut(key) {
            Some(Value::List(list)) => list,
            Some(Value::Str(_)) => return Err(wrong_type(key)),
            None => return Ok(()),
        };
        // count == 0 removes every occurrence; non-zero counts cap the
        // removals head-first, which is all this service ever asks for.
        let mut remaining = if count == 0 { usize::MAX } else { count.unsigned_abs() };
        list.retain(|v| {
            if remaining > 0 && v == value {
                remaining -= 1;
                false
            } else {
                true
            }
        });
        if list.is_empty() {
            inner.remove(key);
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
