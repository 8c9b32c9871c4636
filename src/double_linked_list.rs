//! DoubleLinkedList: a doubly linked list whose nodes live in a `SlotMap` arena.
//!
//! Links are generational slot keys rather than pointers, so the list needs
//! no `unsafe` and no `Rc<RefCell<_>>`. Positional operations walk from the
//! nearer end.

use crate::error::Error;
use core::fmt;
use core::iter::FusedIterator;
use slotmap::{DefaultKey, SlotMap};

#[derive(Debug, Clone)]
struct Node<T> {
    data: T,
    prev: Option<DefaultKey>,
    next: Option<DefaultKey>,
}

#[derive(Clone)]
pub struct DoubleLinkedList<T> {
    nodes: SlotMap<DefaultKey, Node<T>>,
    front: Option<DefaultKey>,
    back: Option<DefaultKey>,
}

impl<T> DoubleLinkedList<T> {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            front: None,
            back: None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Key of the node at `index`, walking from the nearer end.
    fn key_at(&self, index: usize) -> Result<DefaultKey, Error> {
        let len = self.len();
        let out_of_range = Error::IndexOutOfRange { index, len };
        if index >= len {
            return Err(out_of_range);
        }
        let cur = if index < len / 2 {
            let mut cur = self.front;
            for _ in 0..index {
                cur = cur.and_then(|k| self.nodes[k].next);
            }
            cur
        } else {
            let mut cur = self.back;
            for _ in index..len - 1 {
                cur = cur.and_then(|k| self.nodes[k].prev);
            }
            cur
        };
        cur.ok_or(out_of_range)
    }

    /// Append to the back.
    pub fn add(&mut self, item: T) {
        let k = self.nodes.insert(Node {
            data: item,
            prev: self.back,
            next: None,
        });
        match self.back {
            Some(b) => self.nodes[b].next = Some(k),
            None => self.front = Some(k),
        }
        self.back = Some(k);
    }

    /// Remove and return the back element.
    pub fn remove(&mut self) -> Result<T, Error> {
        let k = self.back.ok_or(Error::EmptyContainer)?;
        Ok(self.unlink(k))
    }

    pub fn get(&self, index: usize) -> Result<&T, Error> {
        let k = self.key_at(index)?;
        Ok(&self.nodes[k].data)
    }

    /// Replace the element at `index`, returning the old one.
    pub fn set(&mut self, index: usize, item: T) -> Result<T, Error> {
        let k = self.key_at(index)?;
        Ok(core::mem::replace(&mut self.nodes[k].data, item))
    }

    /// Insert so that `item` ends up at `index`; `index == len` appends.
    pub fn insert(&mut self, index: usize, item: T) -> Result<(), Error> {
        let len = self.len();
        if index > len {
            return Err(Error::IndexOutOfRange { index, len });
        }
        if index == len {
            self.add(item);
            return Ok(());
        }
        let next = self.key_at(index)?;
        let prev = self.nodes[next].prev;
        let k = self.nodes.insert(Node {
            data: item,
            prev,
            next: Some(next),
        });
        self.nodes[next].prev = Some(k);
        match prev {
            Some(p) => self.nodes[p].next = Some(k),
            None => self.front = Some(k),
        }
        Ok(())
    }

    /// Remove and return the element at `index`.
    pub fn delete(&mut self, index: usize) -> Result<T, Error> {
        let k = self.key_at(index)?;
        Ok(self.unlink(k))
    }

    fn unlink(&mut self, k: DefaultKey) -> T {
        let node = self.nodes.remove(k).expect("linked key must be live");
        match node.prev {
            Some(p) => self.nodes[p].next = node.next,
            None => self.front = node.next,
        }
        match node.next {
            Some(n) => self.nodes[n].prev = node.prev,
            None => self.back = node.prev,
        }
        node.data
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            front: self.front,
            back: self.back,
            remaining: self.len(),
        }
    }
}

impl<T: PartialEq> DoubleLinkedList<T> {
    /// Position of the first element equal to `item`.
    pub fn index_of(&self, item: &T) -> Option<usize> {
        self.iter().position(|x| x == item)
    }

    pub fn contains(&self, item: &T) -> bool {
        self.index_of(item).is_some()
    }
}

impl<T> Default for DoubleLinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for DoubleLinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Extend<T> for DoubleLinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}

impl<T> FromIterator<T> for DoubleLinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut l = Self::new();
        l.extend(iter);
        l
    }
}

/// Front-to-back iterator; also walks back-to-front.
pub struct Iter<'a, T> {
    list: &'a DoubleLinkedList<T>,
    front: Option<DefaultKey>,
    back: Option<DefaultKey>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.nodes.get(self.front?)?;
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.data)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.nodes.get(self.back?)?;
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.data)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a DoubleLinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
