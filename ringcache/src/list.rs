//  Copyright 2026 Ringcache Authors
//
//  Licensed under the Apache License, Version 2.0 (the "License");
//  you may not use this file except in compliance with the License.
//  You may obtain a copy of the License at
//
//  http://www.apache.org/licenses/LICENSE-2.0
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.

//! A safe, arena-indexed doubly-linked list.
//!
//! The LRU needs O(1) "move this node to the front" and O(1) "unlink the back node",
//! which is normally an intrusive pointer-linked list. Here the list lives in a `Vec`
//! of slots; links are `Option<usize>` indices into that `Vec` rather than raw
//! pointers, and freed slots are recycled from a free list instead of returned to the
//! allocator. Index `0` has no special meaning; `head` is the most-recently-used slot,
//! `tail` is the least-recently-used and the next eviction victim.

pub(crate) struct Node<K, V> {
    pub key: K,
    pub value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

pub(crate) struct Arena<K, V> {
    slots: Vec<Option<Node<K, V>>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<K, V> Arena<K, V> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn back(&self) -> Option<usize> {
        self.tail
    }

    pub fn get(&self, idx: usize) -> &Node<K, V> {
        self.slots[idx].as_ref().expect("dangling arena index")
    }

    pub fn get_mut(&mut self, idx: usize) -> &mut Node<K, V> {
        self.slots[idx].as_mut().expect("dangling arena index")
    }

    /// Insert a new node at the front (MRU position) and return its slot index.
    pub fn push_front(&mut self, key: K, value: V) -> usize {
        let node = Node {
            key,
            value,
            prev: None,
            next: self.head,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                idx
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        };
        if let Some(head) = self.head {
            self.get_mut(head).prev = Some(idx);
        }
        self.head = Some(idx);
        if self.tail.is_none() {
            self.tail = Some(idx);
        }
        self.len += 1;
        idx
    }

    /// Unlink `idx` from wherever it sits and relink it at the front.
    pub fn move_to_front(&mut self, idx: usize) {
        if self.head == Some(idx) {
            return;
        }
        self.unlink(idx);
        self.get_mut(idx).prev = None;
        self.get_mut(idx).next = self.head;
        if let Some(head) = self.head {
            self.get_mut(head).prev = Some(idx);
        }
        self.head = Some(idx);
        if self.tail.is_none() {
            self.tail = Some(idx);
        }
    }

    /// Remove `idx` from the list entirely and return its key/value, freeing the slot
    /// for reuse.
    pub fn remove(&mut self, idx: usize) -> (K, V) {
        self.unlink(idx);
        let node = self.slots[idx].take().expect("dangling arena index");
        self.free.push(idx);
        self.len -= 1;
        (node.key, node.value)
    }

    /// Detach `idx` from the `prev`/`next` chain without freeing its slot.
    fn unlink(&mut self, idx: usize) {
        let (prev, next) = {
            let node = self.get(idx);
            (node.prev, node.next)
        };
        match prev {
            Some(p) => self.get_mut(p).next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.get_mut(n).prev = prev,
            None => self.tail = prev,
        }
        self.get_mut(idx).prev = None;
        self.get_mut(idx).next = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_front_and_back_order() {
        let mut arena: Arena<&'static str, u32> = Arena::new();
        let a = arena.push_front("a", 1);
        let _b = arena.push_front("b", 2);
        let _c = arena.push_front("c", 3);
        assert_eq!(arena.len(), 3);
        assert_eq!(arena.back(), Some(a));
    }

    #[test]
    fn move_to_front_updates_victim() {
        let mut arena: Arena<&'static str, u32> = Arena::new();
        let a = arena.push_front("a", 1);
        let b = arena.push_front("b", 2);
        let _c = arena.push_front("c", 3);
        assert_eq!(arena.back(), Some(a));
        arena.move_to_front(a);
        assert_eq!(arena.back(), Some(b));
    }

    #[test]
    fn remove_frees_slot_for_reuse() {
        let mut arena: Arena<&'static str, u32> = Arena::new();
        let a = arena.push_front("a", 1);
        let (k, v) = arena.remove(a);
        assert_eq!((k, v), ("a", 1));
        assert_eq!(arena.len(), 0);
        let reused = arena.push_front("d", 4);
        assert_eq!(reused, a);
    }
}
