//! LRU Tracker Module
//!
//! Implements Least Recently Used tracking for cache eviction.

/// Null link in the node arena.
const NIL: usize = usize::MAX;

#[derive(Debug)]
struct Node<K> {
    key: Option<K>,
    prev: usize,
    next: usize,
}

// == LRU Tracker ==
/// Tracks access order for LRU eviction strategy.
///
/// Keys live in an arena of doubly linked nodes where:
/// - Head = Least recently used
/// - Tail = Most recently used
///
/// [`LruTracker::push`] hands back a slot index that the caller keeps next to
/// its map entry, so touching and removing a key never scans the list.
#[derive(Debug)]
pub struct LruTracker<K> {
    nodes: Vec<Node<K>>,
    head: usize,
    tail: usize,
    /// Vacated slots available for reuse
    free: Vec<usize>,
    len: usize,
}

impl<K> Default for LruTracker<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> LruTracker<K> {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            head: NIL,
            tail: NIL,
            free: Vec::new(),
            len: 0,
        }
    }

    /// Creates an empty tracker with room for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            ..Self::new()
        }
    }

    // == Push ==
    /// Appends a key as most recently used and returns its slot.
    pub fn push(&mut self, key: K) -> usize {
        let node = Node {
            key: Some(key),
            prev: NIL,
            next: NIL,
        };
        let slot = match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = node;
                slot
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        };
        self.link_back(slot);
        self.len += 1;
        slot
    }

    // == Touch ==
    /// Marks the key in `slot` as recently used (moves to tail).
    pub fn touch(&mut self, slot: usize) {
        if self.tail == slot {
            return;
        }
        self.unlink(slot);
        self.link_back(slot);
    }

    // == Remove ==
    /// Removes the key in `slot` from the tracker and returns it.
    ///
    /// Returns None if the slot is not live.
    pub fn remove(&mut self, slot: usize) -> Option<K> {
        let key = self.nodes.get_mut(slot)?.key.take()?;
        self.unlink(slot);
        self.free.push(slot);
        self.len -= 1;
        Some(key)
    }

    // == Peek Oldest ==
    /// Returns the least recently used key and its slot without removing it.
    pub fn peek_oldest(&self) -> Option<(usize, &K)> {
        if self.head == NIL {
            return None;
        }
        self.nodes[self.head]
            .key
            .as_ref()
            .map(|key| (self.head, key))
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used key.
    ///
    /// Returns None if tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<K> {
        let head = self.head;
        if head == NIL {
            return None;
        }
        self.remove(head)
    }

    // == Clear ==
    /// Drops every tracked key.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.head = NIL;
        self.tail = NIL;
        self.len = 0;
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.len
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterates keys from least to most recently used.
    pub fn iter(&self) -> impl Iterator<Item = &K> + '_ {
        let mut cursor = self.head;
        std::iter::from_fn(move || {
            if cursor == NIL {
                return None;
            }
            let node = &self.nodes[cursor];
            cursor = node.next;
            node.key.as_ref()
        })
    }

    fn unlink(&mut self, slot: usize) {
        let (prev, next) = (self.nodes[slot].prev, self.nodes[slot].next);
        if prev == NIL {
            self.head = next;
        } else {
            self.nodes[prev].next = next;
        }
        if next == NIL {
            self.tail = prev;
        } else {
            self.nodes[next].prev = prev;
        }
        self.nodes[slot].prev = NIL;
        self.nodes[slot].next = NIL;
    }

    fn link_back(&mut self, slot: usize) {
        self.nodes[slot].prev = self.tail;
        self.nodes[slot].next = NIL;
        if self.tail == NIL {
            self.head = slot;
        } else {
            self.nodes[self.tail].next = slot;
        }
        self.tail = slot;
    }
}
