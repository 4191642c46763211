//! Arena storage for search nodes, addressed by dense integer id.

use std::fmt;
use std::ops::{Index, IndexMut};

use ahash::AHashMap;

/// A stable handle to a node in a [`NodeTable`].
///
/// Ids are positions in the table's arena. They are never reused within a
/// run, and the node they refer to is never moved or dropped until the table
/// is cleared, so a held id stays valid for the remainder of the search.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeId(u32);

impl NodeId {
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A growable arena of search nodes with a hash → id index for duplicate
/// detection.
///
/// The index maps each state's 64-bit hash value to the id of the node
/// created for it, giving O(1) expected duplicate lookup. One node is stored
/// per distinct hash value; the table trusts the hash to be injective over
/// the reachable states of a run (see [`crate::traits::StateHash`]).
pub struct NodeTable<N> {
    nodes: Vec<N>,
    index: AHashMap<u64, NodeId>,
}

impl<N> NodeTable<N> {
    pub fn new() -> Self {
        NodeTable {
            nodes: vec![],
            index: AHashMap::new(),
        }
    }

    /// Stores `node` under `hash` and returns its id.
    ///
    /// The caller must have checked that `hash` is not already present;
    /// inserting a duplicate is an engine bug and panics.
    #[track_caller]
    pub fn insert(&mut self, node: N, hash: u64) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        let previous = self.index.insert(hash, id);
        assert!(
            previous.is_none(),
            "hash {hash:#x} is already associated with node {}",
            previous.unwrap(),
        );
        self.nodes.push(node);
        id
    }

    /// The id the next call to [`NodeTable::insert`] will assign.
    ///
    /// Lets a caller link a node to itself (the root's self-parent) before
    /// the node is stored.
    #[inline(always)]
    pub fn next_id(&self) -> NodeId {
        NodeId(self.nodes.len() as u32)
    }

    /// The id of the node stored under `hash`, if any.
    #[inline(always)]
    pub fn lookup(&self, hash: u64) -> Option<NodeId> {
        debug_assert_eq!(self.nodes.len(), self.index.len());
        self.index.get(&hash).copied()
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drops every node and the index.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.index.clear();
    }
}

impl<N> Index<NodeId> for NodeTable<N> {
    type Output = N;

    #[track_caller]
    #[inline(always)]
    fn index(&self, id: NodeId) -> &N {
        &self.nodes[id.index()]
    }
}

impl<N> IndexMut<NodeId> for NodeTable<N> {
    #[track_caller]
    #[inline(always)]
    fn index_mut(&mut self, id: NodeId) -> &mut N {
        &mut self.nodes[id.index()]
    }
}

impl<N> Default for NodeTable<N> {
    fn default() -> Self {
        NodeTable::new()
    }
}
