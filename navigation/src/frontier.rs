//! Open-set implementations for the A* search.
//!
//! Both variants pop the node with the lowest `f` score and break ties on the
//! lowest node id, so they yield identical routes. They differ only in cost:
//! the linear scan is O(V) per pop, the heap O(log V) amortised.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use wayfind_core::model::NodeId;

pub trait OpenSet: Default {
    /// Add `id` with priority `f`, or lower its priority if already present.
    fn admit(&mut self, id: NodeId, f: f64);
    /// Remove and return the entry with minimal `(f, id)`.
    fn pop_min(&mut self) -> Option<NodeId>;
    fn is_empty(&self) -> bool;
    fn len(&self) -> usize;
}

fn entry_order(a: (f64, NodeId), b: (f64, NodeId)) -> Ordering {
    a.0.total_cmp(&b.0).then(a.1.cmp(&b.1))
}

/// Unordered set scanned in full on every pop.
#[derive(Debug, Default)]
pub struct LinearOpenSet {
    entries: HashMap<NodeId, f64>,
}

impl OpenSet for LinearOpenSet {
    fn admit(&mut self, id: NodeId, f: f64) {
        self.entries.insert(id, f);
    }

    fn pop_min(&mut self) -> Option<NodeId> {
        let id = self
            .entries
            .iter()
            .map(|(&id, &f)| (f, id))
            .min_by(|a, b| entry_order(*a, *b))
            .map(|(_, id)| id)?;
        self.entries.remove(&id);
        Some(id)
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

#[derive(Debug, Clone, Copy)]
struct HeapEntry {
    f: f64,
    id: NodeId,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the max-heap yields the smallest (f, id)
        entry_order((other.f, other.id), (self.f, self.id))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Binary min-heap with lazy invalidation. Re-admitting a node pushes a fresh
/// entry; the outdated one is skipped when it surfaces.
#[derive(Debug, Default)]
pub struct HeapOpenSet {
    heap: BinaryHeap<HeapEntry>,
    live: HashMap<NodeId, f64>,
}

impl OpenSet for HeapOpenSet {
    fn admit(&mut self, id: NodeId, f: f64) {
        self.live.insert(id, f);
        self.heap.push(HeapEntry { f, id });
    }

    fn pop_min(&mut self) -> Option<NodeId> {
        while let Some(entry) = self.heap.pop() {
            match self.live.get(&entry.id) {
                Some(&f) if f.total_cmp(&entry.f) == Ordering::Equal => {
                    self.live.remove(&entry.id);
                    return Some(entry.id);
                }
                _ => continue, // stale
            }
        }
        None
    }

    fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    fn len(&self) -> usize {
        self.live.len()
    }
}
