//! In-memory pattern store
//!
//! Holds aliases in process memory. Used for embedding the engine in a host
//! application that owns its alias list, and in tests.

use alias_application::{PatternStorePort, StoreError};
use alias_domain::Alias;
use async_trait::async_trait;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Pattern store backed by a `Vec<Alias>`.
///
/// A poisoned lock is recovered, so writes after a panic are never dropped.
#[derive(Debug, Default)]
pub struct InMemoryPatternStore {
    aliases: RwLock<Vec<Alias>>,
}

impl InMemoryPatternStore {
    pub fn new(aliases: Vec<Alias>) -> Self {
        Self {
            aliases: RwLock::new(aliases),
        }
    }

    /// Replace the whole alias set. Takes effect on the next snapshot refresh.
    pub fn replace(&self, aliases: Vec<Alias>) {
        *self.write() = aliases;
    }

    /// Append one alias record
    pub fn push(&self, alias: Alias) {
        self.write().push(alias);
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Alias>> {
        self.aliases.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Alias>> {
        self.aliases.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl PatternStorePort for InMemoryPatternStore {
    fn id(&self) -> &str {
        "memory"
    }

    async fn load_snapshot(&self) -> Result<Vec<Alias>, StoreError> {
        Ok(self.read().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_replace_and_push() {
        let store = InMemoryPatternStore::new(vec![Alias::new("my tasks")]);
        assert_eq!(store.len(), 1);

        store.push(Alias::new("my meetings"));
        assert_eq!(store.load_snapshot().await.unwrap().len(), 2);

        store.replace(Vec::new());
        assert!(store.is_empty());
        assert!(store.load_snapshot().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_writes_survive_poisoned_lock() {
        let store = Arc::new(InMemoryPatternStore::default());

        let holder = Arc::clone(&store);
        let _ = std::thread::spawn(move || {
            let _guard = holder.aliases.write().unwrap();
            panic!("writer panicked while holding the alias list");
        })
        .join();
        assert!(store.aliases.is_poisoned());

        store.push(Alias::new("my tasks"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.load_snapshot().await.unwrap().len(), 1);

        store.replace(vec![Alias::new("a"), Alias::new("b")]);
        assert_eq!(store.load_snapshot().await.unwrap().len(), 2);
    }
}
