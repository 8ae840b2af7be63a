use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::OwnedMutexGuard;
use crate::core::library::{LibraryError, LibraryResult};

const PRUNE_THRESHOLD: usize = 1024;

// KeyedLocks hands out one async mutex per key (patron id, book id) so that check-then-mutate
// sequences on the same key are serialized while unrelated keys proceed in parallel.
#[derive(Debug, Default)]
pub struct KeyedLocks {
    name: String,
    locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl KeyedLocks {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub async fn acquire(&self, key: &str, timeout: Duration) -> LibraryResult<OwnedMutexGuard<()>> {
        let lock = self.lock_for(key)?;
        match tokio::time::timeout(timeout, lock.lock_owned()).await {
            Ok(guard) => Ok(guard),
            Err(_) => {
                tracing::warn!(lock = self.name.as_str(), key, "timed out waiting for key lock");
                Err(LibraryError::store_timeout(
                    format!("{}_lock", self.name).as_str(), timeout.as_millis() as u64))
            }
        }
    }

    fn lock_for(&self, key: &str) -> LibraryResult<Arc<tokio::sync::Mutex<()>>> {
        let mut locks = self.locks.lock().map_err(|err| {
            LibraryError::runtime(format!("{} lock table poisoned {:?}", self.name, err).as_str(), None)
        })?;
        if locks.len() > PRUNE_THRESHOLD {
            // only the table holds a reference to idle locks
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        }
        Ok(locks.entry(key.to_string())
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone())
    }
}
