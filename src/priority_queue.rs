//! Min-priority queue used to order pending tree nodes by weight.
//!
//! Equal weights are popped in insertion order: each entry is stamped with a
//! sequence number and the lower one wins.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Debug, Clone, Copy)]
struct Entry<T> {
    weight: u64,
    seq: u64,
    item: T,
}

impl<T> Eq for Entry<T> {}
impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.seq == other.seq
    }
}
impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // min-heap on (weight, seq)
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

#[derive(Debug, Clone)]
pub struct PriorityQueue<T> {
    heap: BinaryHeap<Entry<T>>,
    next_seq: u64,
}

impl<T> PriorityQueue<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            next_seq: 0,
        }
    }

    pub fn push(&mut self, weight: u64, item: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry { weight, seq, item });
    }

    /// Remove the lowest-weight entry, oldest first among equal weights.
    pub fn pop_min(&mut self) -> Option<(u64, T)> {
        self.heap.pop().map(|entry| (entry.weight, entry.item))
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pops_in_weight_order() {
        let mut pq = PriorityQueue::new();
        pq.push(3, 'a');
        pq.push(2, 'b');
        pq.push(1, 'c');
        assert_eq!(pq.len(), 3);

        assert_eq!(pq.pop_min(), Some((1, 'c')));
        assert_eq!(pq.pop_min(), Some((2, 'b')));
        assert_eq!(pq.pop_min(), Some((3, 'a')));
        assert_eq!(pq.pop_min(), None);
        assert!(pq.is_empty());
    }

    #[test]
    fn test_ties_pop_in_insertion_order() {
        let mut pq = PriorityQueue::new();
        for item in ["first", "second", "third"] {
            pq.push(7, item);
        }
        pq.push(1, "light");
        assert_eq!(pq.pop_min(), Some((1, "light")));
        assert_eq!(pq.pop_min(), Some((7, "first")));
        assert_eq!(pq.pop_min(), Some((7, "second")));
        assert_eq!(pq.pop_min(), Some((7, "third")));
    }

    #[test]
    fn test_interleaved_push_pop() {
        let mut pq = PriorityQueue::with_capacity(4);
        pq.push(5, 0);
        pq.push(9, 1);
        assert_eq!(pq.pop_min(), Some((5, 0)));
        pq.push(9, 2);
        pq.push(4, 3);
        assert_eq!(pq.pop_min(), Some((4, 3)));
        assert_eq!(pq.pop_min(), Some((9, 1)));
        assert_eq!(pq.pop_min(), Some((9, 2)));
    }

    #[test]
    fn test_empty_queue() {
        let mut pq: PriorityQueue<u8> = PriorityQueue::default();
        assert!(pq.is_empty());
        assert_eq!(pq.pop_min(), None);
    }
}
