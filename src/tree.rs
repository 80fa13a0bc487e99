//! Huffman tree construction
//!
//! Nodes live in an arena and refer to their children by [`NodeId`]; the root
//! is the last node left in the queue once the merge loop finishes.

use crate::frequency::FrequencyTable;
use crate::priority_queue::PriorityQueue;

/// Index of a node in a [`HuffmanTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: u8,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: NodeId,
        right: NodeId,
    },
}

impl Node {
    pub fn weight(&self) -> u64 {
        match *self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

#[derive(Debug, Clone)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl HuffmanTree {
    /// Build a tree from symbol frequencies.
    ///
    /// Leaves are queued in ascending symbol order and equal weights are merged
    /// oldest first, so the same table always yields the same tree. Returns
    /// `None` for an empty table; a single symbol yields a lone leaf.
    pub fn build(frequencies: &FrequencyTable) -> Option<Self> {
        let mut nodes = Vec::with_capacity(frequencies.len() * 2);
        let mut queue = PriorityQueue::with_capacity(frequencies.len());

        for (symbol, weight) in frequencies.iter() {
            let id = NodeId(nodes.len());
            nodes.push(Node::Leaf { symbol, weight });
            queue.push(weight, id);
        }

        while queue.len() > 1 {
            let (left_weight, left) = queue.pop_min()?;
            let (right_weight, right) = queue.pop_min()?;
            let weight = left_weight + right_weight;

            let id = NodeId(nodes.len());
            nodes.push(Node::Internal {
                weight,
                left,
                right,
            });
            queue.push(weight, id);
        }

        let (_, root) = queue.pop_min()?;
        Some(Self { nodes, root })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Total weight, equal to the sum of all leaf weights.
    pub fn weight(&self) -> u64 {
        self.node(self.root).weight()
    }

    /// Number of nodes, leaves and internal.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Leaves as `(symbol, weight)` pairs.
    pub fn leaves(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.nodes.iter().filter_map(|node| match *node {
            Node::Leaf { symbol, weight } => Some((symbol, weight)),
            Node::Internal { .. } => None,
        })
    }
}
