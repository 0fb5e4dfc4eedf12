use std::ops::Deref;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::table::KeyValueTable;

/// The Store is a handle to a single [`KeyValueTable`] that can be cloned cheaply and shared
/// between callers. The whole table sits behind one lock, which is held for as long as the guard
/// returned by [`InnerStore::lock`] is alive, so a single `put`, `get` or `remove` never
/// interleaves with another.
#[derive(Clone)]
pub struct Store {
    inner: Arc<InnerStore>,
}

impl Store {
    pub fn new() -> Store {
        Self::from_table(KeyValueTable::new())
    }

    pub fn from_table(table: KeyValueTable) -> Store {
        let inner = Arc::new(InnerStore {
            table: Mutex::new(table),
        });

        Self { inner }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

pub struct InnerStore {
    table: Mutex<KeyValueTable>,
}

impl InnerStore {
    pub fn lock(&self) -> MutexGuard<'_, KeyValueTable> {
        // Every table operation either completes or leaves the table as it was, so the data
        // behind a poisoned lock is still consistent.
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Deref for Store {
    type Target = InnerStore;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::HasherKind;
    use std::thread;

    #[test]
    fn clones_share_the_table() {
        let store = Store::new();
        let other = store.clone();

        store.lock().put(1, 100);

        assert_eq!(other.lock().get(1), Some(100));
    }

    #[test]
    fn concurrent_writers() {
        let table = KeyValueTable::with_hasher(16, HasherKind::Identity).unwrap();
        let store = Store::from_table(table);

        let handles: Vec<_> = (0..8i64)
            .map(|worker| {
                let store = store.clone();
                thread::spawn(move || {
                    for i in 0..1_000i64 {
                        store.lock().put(worker * 1_000 + i, worker);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let table = store.lock();
        assert_eq!(table.len(), 8_000);
        for worker in 0..8i64 {
            assert_eq!(table.get(worker * 1_000 + 999), Some(worker));
        }
    }

    #[test]
    fn recovers_from_poisoned_lock() {
        let store = Store::new();
        store.lock().put(7, 7);

        let poisoner = store.clone();
        let _ = thread::spawn(move || {
            let _guard = poisoner.lock();
            panic!("poison the lock");
        })
        .join();

        assert_eq!(store.lock().get(7), Some(7));
    }
}
