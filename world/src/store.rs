//! Fixed-bucket separate-chaining store keyed by unsigned integers.
//!
//! The bucket count is fixed at construction: there is no resizing and no
//! rehashing, so the caller chooses a count that bounds worst-case chain
//! length for the expected key distribution. Chains are singly linked with
//! most-recently-inserted entries at the head.

/// Hash routine supplied by the caller at construction.
///
/// The output is reduced modulo the bucket count, so a hash that already
/// produces a bucket index (like `key % buckets`) and one that produces a
/// full-range value both route correctly.
pub type HashFn = fn(u32) -> u32;

type Link<V> = Option<Box<Entry<V>>>;

struct Entry<V> {
    key: u32,
    value: V,
    next: Link<V>,
}

/// Separate-chaining associative store with a caller-supplied hash function.
///
/// The store owns its chain nodes and the values inside them; every removal
/// path is explicit about whether the value moves out to the caller
/// ([`BucketStore::remove`]) or is destroyed in place
/// ([`BucketStore::discard`]).
pub struct BucketStore<V> {
    buckets: Vec<Link<V>>,
    hash: HashFn,
    len: usize,
}

impl<V> BucketStore<V> {
    /// Creates a store with every chain empty.
    ///
    /// # Panics
    ///
    /// Panics when `bucket_count` is zero. A store without buckets cannot
    /// route any key; this is a hard precondition, not a recoverable error.
    #[must_use]
    pub fn new(hash: HashFn, bucket_count: usize) -> Self {
        assert!(
            bucket_count > 0,
            "bucket store requires at least one bucket"
        );
        let mut buckets = Vec::with_capacity(bucket_count);
        buckets.resize_with(bucket_count, || None);
        Self {
            buckets,
            hash,
            len: 0,
        }
    }

    fn bucket_index(&self, key: u32) -> usize {
        ((self.hash)(key) as usize) % self.buckets.len()
    }

    /// Inserts a value, replacing and returning the previous value when the
    /// key is already present. Fresh keys are prepended to their chain.
    pub fn insert(&mut self, key: u32, value: V) -> Option<V> {
        let index = self.bucket_index(key);
        let mut cursor = self.buckets[index].as_deref_mut();
        while let Some(entry) = cursor {
            if entry.key == key {
                return Some(std::mem::replace(&mut entry.value, value));
            }
            cursor = entry.next.as_deref_mut();
        }

        let head = self.buckets[index].take();
        self.buckets[index] = Some(Box::new(Entry {
            key,
            value,
            next: head,
        }));
        self.len += 1;
        None
    }

    /// Borrows the value stored under `key`, if any.
    #[must_use]
    pub fn get(&self, key: u32) -> Option<&V> {
        let index = self.bucket_index(key);
        let mut cursor = self.buckets[index].as_deref();
        while let Some(entry) = cursor {
            if entry.key == key {
                return Some(&entry.value);
            }
            cursor = entry.next.as_deref();
        }
        None
    }

    /// Unlinks `key` and moves its value out to the caller.
    ///
    /// The chain node is reclaimed immediately; ownership of the value
    /// transfers to the caller, so nothing is dropped here.
    pub fn remove(&mut self, key: u32) -> Option<V> {
        let index = self.bucket_index(key);
        let mut link = &mut self.buckets[index];
        loop {
            let head_matches = match link.as_ref() {
                None => return None,
                Some(entry) => entry.key == key,
            };
            if head_matches {
                let mut entry = link.take().expect("presence checked above");
                *link = entry.next.take();
                self.len -= 1;
                return Some(entry.value);
            }
            link = &mut link.as_mut().expect("presence checked above").next;
        }
    }

    /// Unlinks `key` and destroys the entry and its value in place.
    ///
    /// Returns whether the key was present.
    pub fn discard(&mut self, key: u32) -> bool {
        self.remove(key).is_some()
    }

    /// Number of entries currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<V> Drop for BucketStore<V> {
    // Teardown is iterative: a long chain dropped node-by-node cannot
    // overflow the stack the way the default recursive Box drop would.
    fn drop(&mut self) {
        for bucket in &mut self.buckets {
            let mut cursor = bucket.take();
            while let Some(mut entry) = cursor {
                cursor = entry.next.take();
            }
        }
    }
}

impl<V> std::fmt::Debug for BucketStore<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BucketStore")
            .field("buckets", &self.buckets.len())
            .field("len", &self.len)
            .finish()
    }
}
