//! A hash table from `i64` keys to `i64` values using separate chaining.
//!
//! The table owns a fixed number of buckets. A bucket starts out untouched and allocates nothing;
//! the first insert that hashes to it gives it a chain head, which it keeps for the rest of the
//! table's life even after all of its entries are removed. Chain nodes live in a single arena and
//! link to each other through their arena index, and slots freed by removals are reused by later
//! inserts.
//!
//! Every lookup goes through [`KeyValueTable::seek`], which walks one chain and reports the link
//! right before the key (or the last link when the key is absent). `put`, `get` and `remove` are
//! each that walk plus a small branch on its result.

use std::fmt;
use thiserror::Error as ThisError;
use tracing::debug;

use crate::hash::{HasherKind, KeyHasher};

/// Bucket count used by [`KeyValueTable::new`].
pub const DEFAULT_BUCKETS: usize = 10_000;

#[derive(Debug, ThisError, PartialEq)]
pub enum TableError {
    #[error("bucket count must be greater than zero")]
    ZeroBuckets,
}

/// A key and the value stored for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Entry {
    pub key: i64,
    pub value: i64,
}

type NodeId = usize;

#[derive(Debug)]
struct Node {
    entry: Entry,
    next: Option<NodeId>,
}

/// Head of a touched bucket.
#[derive(Clone, Copy, Debug, Default)]
struct Chain {
    first: Option<NodeId>,
}

/// A place a node can be linked after: the chain head itself or another node.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Link {
    Head,
    Node(NodeId),
}

#[derive(Debug)]
struct Seek {
    /// The link right before `target`, or the last link of the chain if the key is absent.
    prev: Link,
    target: Option<NodeId>,
}

/// Summary of how entries are spread over the buckets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TableStats {
    pub entries: usize,
    pub buckets: usize,
    pub touched: usize,
    pub longest_chain: usize,
    pub load_factor: f64,
}

pub struct KeyValueTable<H = HasherKind> {
    buckets: Vec<Option<Chain>>,
    nodes: Vec<Node>,
    free: Vec<NodeId>,
    len: usize,
    hasher: H,
}

impl KeyValueTable<HasherKind> {
    pub fn new() -> Self {
        Self::build(DEFAULT_BUCKETS, HasherKind::default())
    }

    pub fn with_buckets(buckets: usize) -> Result<Self, TableError> {
        Self::with_hasher(buckets, HasherKind::default())
    }
}

impl Default for KeyValueTable<HasherKind> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: KeyHasher> KeyValueTable<H> {
    // TODO: grow and rehash once `load_factor` crosses a threshold instead of keeping the bucket
    // count fixed for the table's lifetime.
    pub fn with_hasher(buckets: usize, hasher: H) -> Result<Self, TableError> {
        if buckets == 0 {
            return Err(TableError::ZeroBuckets);
        }
        Ok(Self::build(buckets, hasher))
    }

    fn build(buckets: usize, hasher: H) -> Self {
        debug!(buckets, "allocating key-value table");
        Self {
            buckets: vec![None; buckets],
            nodes: Vec::new(),
            free: Vec::new(),
            len: 0,
            hasher,
        }
    }

    /// Stores `value` under `key`, overwriting the previous value in place if the key is already
    /// present.
    pub fn put(&mut self, key: i64, value: i64) {
        let index = self.bucket_index(key);
        let chain = *self.buckets[index].get_or_insert_with(Chain::default);

        let Seek { prev, target } = self.seek(chain, key);
        match target {
            Some(id) => self.nodes[id].entry.value = value,
            None => {
                let id = self.alloc(Entry { key, value });
                self.link_after(index, prev, Some(id));
                self.len += 1;
            }
        }
    }

    pub fn get(&self, key: i64) -> Option<i64> {
        let chain = self.buckets[self.bucket_index(key)]?;
        self.seek(chain, key)
            .target
            .map(|id| self.nodes[id].entry.value)
    }

    /// Unlinks the entry for `key` and hands it back. Absent keys leave the table untouched.
    pub fn remove(&mut self, key: i64) -> Option<Entry> {
        let index = self.bucket_index(key);
        let chain = self.buckets[index]?;

        let Seek { prev, target } = self.seek(chain, key);
        let id = target?;

        let next = self.nodes[id].next.take();
        self.link_after(index, prev, next);
        self.free.push(id);
        self.len -= 1;

        Some(self.nodes[id].entry)
    }

    pub fn contains_key(&self, key: i64) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    pub fn bucket_index(&self, key: i64) -> usize {
        (self.hasher.hash(key) % self.buckets.len() as u64) as usize
    }

    /// Number of entries chained in bucket `index`, or `None` if nothing was ever inserted there.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`bucket_count`](Self::bucket_count).
    pub fn chain_len(&self, index: usize) -> Option<usize> {
        self.buckets[index].map(|chain| self.walk(chain).count())
    }

    /// Entries of bucket `index` in chain order.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`bucket_count`](Self::bucket_count).
    pub fn bucket_entries(&self, index: usize) -> impl Iterator<Item = &Entry> + '_ {
        self.buckets[index]
            .into_iter()
            .flat_map(move |chain| self.walk(chain))
    }

    /// All entries, bucket by bucket.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> + '_ {
        self.buckets
            .iter()
            .flatten()
            .flat_map(move |&chain| self.walk(chain))
    }

    pub fn stats(&self) -> TableStats {
        let touched = self.buckets.iter().flatten().count();
        let longest_chain = self
            .buckets
            .iter()
            .flatten()
            .map(|&chain| self.walk(chain).count())
            .max()
            .unwrap_or(0);

        TableStats {
            entries: self.len,
            buckets: self.buckets.len(),
            touched,
            longest_chain,
            load_factor: self.load_factor(),
        }
    }

    fn seek(&self, chain: Chain, key: i64) -> Seek {
        let mut prev = Link::Head;
        let mut cursor = chain.first;

        while let Some(id) = cursor {
            let node = &self.nodes[id];
            if node.entry.key == key {
                return Seek {
                    prev,
                    target: Some(id),
                };
            }
            prev = Link::Node(id);
            cursor = node.next;
        }

        Seek { prev, target: None }
    }

    fn walk(&self, chain: Chain) -> Walk<'_> {
        Walk {
            nodes: &self.nodes,
            cursor: chain.first,
        }
    }

    fn link_after(&mut self, index: usize, link: Link, next: Option<NodeId>) {
        match link {
            Link::Head => {
                if let Some(chain) = self.buckets[index].as_mut() {
                    chain.first = next;
                }
            }
            Link::Node(id) => self.nodes[id].next = next,
        }
    }

    fn alloc(&mut self, entry: Entry) -> NodeId {
        let node = Node { entry, next: None };
        match self.free.pop() {
            Some(id) => {
                self.nodes[id] = node;
                id
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }
}

struct Walk<'a> {
    nodes: &'a [Node],
    cursor: Option<NodeId>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Entry;

    fn next(&mut self) -> Option<Self::Item> {
        let node = &self.nodes[self.cursor?];
        self.cursor = node.next;
        Some(&node.entry)
    }
}

impl<H: KeyHasher> Extend<(i64, i64)> for KeyValueTable<H> {
    fn extend<I: IntoIterator<Item = (i64, i64)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl FromIterator<(i64, i64)> for KeyValueTable<HasherKind> {
    fn from_iter<I: IntoIterator<Item = (i64, i64)>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl<H: KeyHasher> fmt::Debug for KeyValueTable<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|entry| (entry.key, entry.value)))
            .finish()
    }
}
