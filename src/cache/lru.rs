//! LRU Recency List Module
//!
//! Implements the recency ordering used for eviction: a doubly-linked list
//! whose nodes live in a slot arena, addressed by stable handles.

use std::iter::FusedIterator;

use crate::cache::Entry;

// == Handle ==
/// Non-owning reference to an entry's slot in a [`RecencyList`].
///
/// A handle stays valid until its entry is removed; after that the slot may
/// be reused by a later insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(usize);

// == Recency List ==
/// Doubly-linked list of entries ordered by access time.
///
/// - Front = Most recently used
/// - Back = Least recently used
///
/// Entries are owned by the slot arena; freed slots are recycled through a
/// free list so push/remove/move-to-front are all O(1).
#[derive(Debug)]
pub struct RecencyList<K, V> {
    /// Entry storage, `None` for free slots
    slots: Vec<Option<Entry<K, V>>>,
    /// Indices of free slots
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<K, V> Default for RecencyList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> RecencyList<K, V> {
    // == Constructor ==
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    // == Push Front ==
    /// Inserts a new entry as most recently used and returns its handle.
    pub fn push_front(&mut self, key: K, value: V) -> Handle {
        let entry = Entry::new(key, value);
        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(entry);
                idx
            }
            None => {
                self.slots.push(Some(entry));
                self.slots.len() - 1
            }
        };

        self.link_front(idx);
        self.len += 1;
        Handle(idx)
    }

    // == Move To Front ==
    /// Marks an entry as most recently used.
    pub fn move_to_front(&mut self, handle: Handle) {
        let idx = handle.0;
        if self.head == Some(idx) || !self.is_live(idx) {
            return;
        }

        self.unlink(idx);
        self.link_front(idx);
    }

    // == Remove ==
    /// Detaches an entry and returns it, freeing its slot.
    ///
    /// Returns None if the handle does not refer to a live entry.
    pub fn remove(&mut self, handle: Handle) -> Option<Entry<K, V>> {
        let idx = handle.0;
        if !self.is_live(idx) {
            return None;
        }

        self.unlink(idx);
        let entry = self.slots[idx].take()?;
        self.free.push(idx);
        self.len -= 1;
        Some(entry)
    }

    // == Pop Back ==
    /// Removes and returns the least recently used entry.
    pub fn pop_back(&mut self) -> Option<Entry<K, V>> {
        let tail = self.tail?;
        self.remove(Handle(tail))
    }

    /// Returns the least recently used entry without removing it.
    pub fn back(&self) -> Option<&Entry<K, V>> {
        self.tail.and_then(|idx| self.slots[idx].as_ref())
    }

    /// Returns the entry behind a handle.
    pub fn get(&self, handle: Handle) -> Option<&Entry<K, V>> {
        self.slots.get(handle.0).and_then(Option::as_ref)
    }

    /// Returns the entry behind a handle, mutably.
    ///
    /// Only the value should be changed; the key is mirrored by the index.
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut Entry<K, V>> {
        self.slots.get_mut(handle.0).and_then(Option::as_mut)
    }

    // == Length ==
    /// Returns the number of linked entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Clear ==
    /// Drops every entry and releases all slots.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    // == Iterate ==
    /// Iterates from most to least recently used.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            front: self.head,
            back: self.tail,
            remaining: self.len,
        }
    }

    fn is_live(&self, idx: usize) -> bool {
        matches!(self.slots.get(idx), Some(Some(_)))
    }

    /// Links a detached live slot at the head.
    fn link_front(&mut self, idx: usize) {
        let old_head = self.head;
        if let Some(entry) = self.slots[idx].as_mut() {
            entry.prev = None;
            entry.next = old_head;
        }

        match old_head {
            Some(head_idx) => {
                if let Some(head) = self.slots[head_idx].as_mut() {
                    head.prev = Some(idx);
                }
            }
            None => self.tail = Some(idx),
        }

        self.head = Some(idx);
    }

    /// Splices a live slot out of the chain, leaving it detached.
    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match self.slots[idx].as_mut() {
            Some(entry) => (entry.prev.take(), entry.next.take()),
            None => return,
        };

        match prev {
            Some(prev_idx) => {
                if let Some(prev_entry) = self.slots[prev_idx].as_mut() {
                    prev_entry.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(next_idx) => {
                if let Some(next_entry) = self.slots[next_idx].as_mut() {
                    next_entry.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }

    /// Walks the chain both ways and checks it agrees with `len`.
    #[cfg(test)]
    pub(crate) fn assert_links(&self) {
        let mut forward = Vec::new();
        let mut prev = None;
        let mut cursor = self.head;
        while let Some(idx) = cursor {
            let entry = self.slots[idx].as_ref().expect("linked slot is free");
            assert_eq!(entry.prev, prev, "broken prev link at slot {}", idx);
            forward.push(idx);
            prev = Some(idx);
            cursor = entry.next;
            assert!(forward.len() <= self.len, "cycle in recency list");
        }
        assert_eq!(self.tail, prev, "tail does not match last node");
        assert_eq!(forward.len(), self.len, "len does not match chain");

        let live = self.slots.iter().filter(|slot| slot.is_some()).count();
        assert_eq!(live, self.len, "unlinked live slot");
        assert_eq!(live + self.free.len(), self.slots.len(), "leaked slot");
    }
}

// == Iterator ==
/// Front-to-back iterator over a [`RecencyList`].
pub struct Iter<'a, K, V> {
    list: &'a RecencyList<K, V>,
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let list = self.list;
        let entry = list.slots.get(self.front?)?.as_ref()?;
        self.front = entry.next;
        self.remaining -= 1;
        Some((&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let list = self.list;
        let entry = list.slots.get(self.back?)?.as_ref()?;
        self.back = entry.prev;
        self.remaining -= 1;
        Some((&entry.key, &entry.value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn keys(list: &RecencyList<&'static str, u32>) -> Vec<&'static str> {
        list.iter().map(|(k, _)| *k).collect()
    }

    #[test]
    fn test_list_new() {
        let list: RecencyList<&str, u32> = RecencyList::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert!(list.back().is_none());
        list.assert_links();
    }

    #[test]
    fn test_list_push_front_order() {
        let mut list = RecencyList::new();

        list.push_front("key1", 1);
        list.push_front("key2", 2);
        list.push_front("key3", 3);

        assert_eq!(list.len(), 3);
        assert_eq!(keys(&list), vec!["key3", "key2", "key1"]);
        // key1 is oldest (added first)
        assert_eq!(list.back().map(|e| e.key), Some("key1"));
        list.assert_links();
    }

    #[test]
    fn test_list_move_to_front() {
        let mut list = RecencyList::new();

        let a = list.push_front("a", 1);
        list.push_front("b", 2);
        list.push_front("c", 3);

        list.move_to_front(a);

        assert_eq!(keys(&list), vec!["a", "c", "b"]);
        assert_eq!(list.back().map(|e| e.key), Some("b"));
        list.assert_links();
    }

    #[test]
    fn test_list_move_head_and_tail() {
        let mut list = RecencyList::new();

        let a = list.push_front("a", 1);
        let b = list.push_front("b", 2);

        // Already at front
        list.move_to_front(b);
        assert_eq!(keys(&list), vec!["b", "a"]);

        list.move_to_front(a);
        assert_eq!(keys(&list), vec!["a", "b"]);
        list.assert_links();
    }

    #[test]
    fn test_list_pop_back_order() {
        let mut list = RecencyList::new();

        let a = list.push_front("a", 1);
        let b = list.push_front("b", 2);
        let c = list.push_front("c", 3);

        // front=[b, c, a]=back after these touches
        list.move_to_front(a);
        list.move_to_front(c);
        list.move_to_front(b);

        assert_eq!(list.pop_back().map(Entry::into_parts), Some(("a", 1)));
        assert_eq!(list.pop_back().map(Entry::into_parts), Some(("c", 3)));
        assert_eq!(list.pop_back().map(Entry::into_parts), Some(("b", 2)));
        assert!(list.pop_back().is_none());
        list.assert_links();
    }

    #[test]
    fn test_list_remove_middle() {
        let mut list = RecencyList::new();

        list.push_front("key1", 1);
        let key2 = list.push_front("key2", 2);
        list.push_front("key3", 3);

        let removed = list.remove(key2).unwrap();

        assert_eq!(removed.value, 2);
        assert_eq!(list.len(), 2);
        assert_eq!(keys(&list), vec!["key3", "key1"]);
        list.assert_links();
    }

    #[test]
    fn test_list_remove_twice() {
        let mut list = RecencyList::new();

        let handle = list.push_front("key1", 1);
        assert!(list.remove(handle).is_some());
        assert!(list.remove(handle).is_none());

        // Moving a dead handle is a no-op
        list.move_to_front(handle);
        assert!(list.is_empty());
        list.assert_links();
    }

    #[test]
    fn test_list_reuses_free_slots() {
        let mut list = RecencyList::new();

        let a = list.push_front("a", 1);
        list.push_front("b", 2);
        list.remove(a);

        let c = list.push_front("c", 3);

        assert_eq!(c, a);
        assert_eq!(list.get(c).map(|e| e.key), Some("c"));
        assert_eq!(keys(&list), vec!["c", "b"]);
        list.assert_links();
    }

    #[test]
    fn test_list_get_mut_updates_value() {
        let mut list = RecencyList::new();

        let handle = list.push_front("a", 1);
        if let Some(entry) = list.get_mut(handle) {
            entry.value = 10;
        }

        assert_eq!(list.get(handle).map(|e| e.value), Some(10));
    }

    #[test]
    fn test_list_iter_both_ends() {
        let mut list = RecencyList::new();

        list.push_front("a", 1);
        list.push_front("b", 2);
        list.push_front("c", 3);

        let mut iter = list.iter();
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.next(), Some((&"c", &3)));
        assert_eq!(iter.next_back(), Some((&"a", &1)));
        assert_eq!(iter.next(), Some((&"b", &2)));
        assert_eq!(iter.next_back(), None);
        assert_eq!(iter.next(), None);

        let backwards: Vec<_> = list.iter().rev().map(|(k, _)| *k).collect();
        assert_eq!(backwards, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_list_clear() {
        let mut list = RecencyList::new();

        list.push_front("a", 1);
        list.push_front("b", 2);
        list.clear();

        assert!(list.is_empty());
        assert_eq!(list.iter().count(), 0);
        list.assert_links();
    }
}
