//! Value-identity nodes and the arena that links them together.
//!
//! A [Node] is identified by its value alone: two nodes holding equal
//! values are the same vertex, whatever their name, cost or position.
//! Structure (children and parent back-links) is expressed with
//! [NodeId] handles into a [NodeArena], so following a parent chain
//! never touches ownership.

use std::borrow::Cow;
use std::fmt::{self, Debug};
use std::hash::{Hash, Hasher};
use std::ops::{Index, IndexMut};
use std::sync::atomic::{AtomicU32, Ordering};

use crate::errors::{Result, SearchError};

/// Numeric cost attached to a node. Its meaning depends on the strategy.
pub type Cost = f64;

/// Values usable as node identities.
pub trait NodeValue: Clone + Eq + Hash + Debug {}
impl<T> NodeValue for T where T: Clone + Eq + Hash + Debug {}

static NEXT_ARENA: AtomicU32 = AtomicU32::new(1);

/// Handle to a node stored in a [NodeArena].
///
/// Handles carry the tag of the arena that issued them, so a handle
/// from one arena is never mistaken for a node of another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: u32,
    arena: u32,
}

impl NodeId {
    /// Position of the node in its arena.
    pub fn index(self) -> usize {
        self.index as usize
    }
}

/// A vertex in a search graph.
#[derive(Clone)]
pub struct Node<V> {
    value: V,
    name: Option<String>,
    cost: Cost,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl<V> Node<V> {
    /// Build a detached node with zero cost and no name.
    pub fn new(value: V) -> Self {
        Self {
            value,
            name: None,
            cost: 0.0,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Attach a display name.
    pub fn named<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attach a cost.
    pub fn with_cost(mut self, cost: Cost) -> Self {
        self.cost = cost;
        self
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn set_value(&mut self, value: V) {
        self.value = value;
    }

    pub fn set_name<S: Into<String>>(&mut self, name: S) {
        self.name = Some(name.into());
    }

    pub fn cost(&self) -> Cost {
        self.cost
    }

    pub fn set_cost(&mut self, cost: Cost) {
        self.cost = cost;
    }

    /// The node which discovered this one, if any.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub(crate) fn push_child(&mut self, child: NodeId) {
        self.children.push(child);
    }

    pub fn into_value(self) -> V {
        self.value
    }

    /// Strip structural links, leaving value, name and cost.
    pub(crate) fn detached(&self) -> Self
    where
        V: Clone,
    {
        Self {
            value: self.value.clone(),
            name: self.name.clone(),
            cost: self.cost,
            parent: None,
            children: Vec::new(),
        }
    }
}

impl<V: Debug> Node<V> {
    /// Display name, falling back to the value's debug form.
    pub fn name(&self) -> Cow<'_, str> {
        match &self.name {
            Some(name) => Cow::Borrowed(name.as_str()),
            None => Cow::Owned(format!("{:?}", self.value)),
        }
    }
}

impl<V> From<V> for Node<V> {
    fn from(value: V) -> Self {
        Node::new(value)
    }
}

impl<V: PartialEq> PartialEq for Node<V> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<V: Eq> Eq for Node<V> {}

impl<V: Hash> Hash for Node<V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state)
    }
}

impl<V: Debug> Debug for Node<V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name())
            .field("value", &self.value)
            .field("cost", &self.cost)
            .finish()
    }
}

impl<V: Debug> fmt::Display for Node<V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Storage for linked nodes.
///
/// Nodes are never removed from an arena, so a handle stays valid for
/// the arena's whole life.
#[derive(Debug, Clone)]
pub struct NodeArena<V> {
    tag: u32,
    nodes: Vec<Node<V>>,
}

impl<V> Default for NodeArena<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> NodeArena<V> {
    pub fn new() -> Self {
        Self {
            tag: NEXT_ARENA.fetch_add(1, Ordering::Relaxed),
            nodes: Vec::new(),
        }
    }

    /// Number of nodes stored.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Move a node into the arena. Any links it carried are dropped.
    pub fn insert(&mut self, mut node: Node<V>) -> NodeId {
        node.parent = None;
        node.children.clear();
        let id = NodeId {
            index: self.nodes.len() as u32,
            arena: self.tag,
        };
        self.nodes.push(node);
        id
    }

    /// Does this handle belong to this arena?
    pub fn contains(&self, id: NodeId) -> bool {
        id.arena == self.tag && id.index() < self.nodes.len()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node<V>> {
        if self.contains(id) {
            self.nodes.get(id.index())
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node<V>> {
        if self.contains(id) {
            self.nodes.get_mut(id.index())
        } else {
            None
        }
    }

    /// Like [NodeArena::get], but a foreign handle is an error.
    pub fn node(&self, id: NodeId) -> Result<&Node<V>> {
        self.get(id).ok_or_else(|| foreign(id))
    }

    fn check(&self, id: NodeId) -> Result<()> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(foreign(id))
        }
    }

    /// Iterate over every node with its handle, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node<V>)> {
        let tag = self.tag;
        self.nodes.iter().enumerate().map(move |(i, n)| {
            (
                NodeId {
                    index: i as u32,
                    arena: tag,
                },
                n,
            )
        })
    }

    /// Children of a node, resolved to nodes. A foreign handle has none.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &Node<V>> {
        self.get(id)
            .into_iter()
            .flat_map(move |n| n.children.iter().map(move |c| &self[*c]))
    }

    /// The parent node of a node, if it has one.
    pub fn parent(&self, id: NodeId) -> Option<&Node<V>> {
        self.get(id).and_then(|n| n.parent).map(|p| &self[p])
    }

    /// Walk parent links from `id` up to the root, `id` first.
    pub fn ancestry(&self, id: NodeId) -> Ancestry<'_, V> {
        Ancestry {
            arena: self,
            next: Some(id).filter(|id| self.contains(*id)),
        }
    }

    /// The chain of handles from the root down to `id`.
    pub fn path_to(&self, id: NodeId) -> Vec<NodeId> {
        let mut path: Vec<NodeId> = self.ancestry(id).map(|(id, _)| id).collect();
        path.reverse();
        path
    }

    /// Make `parent` the discoverer of `child`.
    ///
    /// Fails if either handle is foreign, or if the link would close a
    /// cycle of parent links.
    pub fn set_parent(&mut self, child: NodeId, parent: NodeId) -> Result<()> {
        self.check(child)?;
        self.check(parent)?;
        if self.ancestry(parent).any(|(id, _)| id == child) {
            return Err(SearchError::InvalidArgument(format!(
                "node {} is an ancestor of node {}",
                child.index(),
                parent.index()
            )));
        }
        self[child].parent = Some(parent);
        Ok(())
    }

    /// Record `parent` as the discoverer of `child` without the cycle
    /// check. Searches only link an open node to the node being
    /// expanded, whose own ancestry is entirely closed.
    pub(crate) fn link(&mut self, child: NodeId, parent: NodeId) {
        self[child].parent = Some(parent);
    }

    pub fn clear_parent(&mut self, id: NodeId) -> Result<()> {
        self.check(id)?;
        self[id].parent = None;
        Ok(())
    }

    /// Append `child` to the children of `parent`.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.check(parent)?;
        self.check(child)?;
        self[parent].children.push(child);
        Ok(())
    }

    /// Drop every child link of a node.
    pub fn clear_children(&mut self, id: NodeId) -> Result<()> {
        self.check(id)?;
        self[id].children.clear();
        Ok(())
    }
}

impl<V: PartialEq + Debug> NodeArena<V> {
    /// Remove the first child of `parent` whose value equals `child`'s.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.check(parent)?;
        self.check(child)?;
        let position = self[parent]
            .children
            .iter()
            .position(|c| self[*c].value == self[child].value);
        match position {
            Some(i) => {
                self[parent].children.remove(i);
                Ok(())
            }
            None => Err(SearchError::NotFound(format!(
                "{} is not a child of {}",
                self[child].name(),
                self[parent].name()
            ))),
        }
    }

    /// Is a node with `child`'s value among the children of `parent`?
    pub fn has_child(&self, parent: NodeId, child: NodeId) -> bool {
        match (self.get(parent), self.get(child)) {
            (Some(p), Some(c)) => p.children.iter().any(|id| self[*id].value == c.value),
            _ => false,
        }
    }

    /// Find the first node holding `value`.
    pub fn find(&self, value: &V) -> Option<NodeId> {
        self.iter().find(|(_, n)| &n.value == value).map(|(id, _)| id)
    }
}

impl<V> NodeArena<V>
where
    V: Clone,
{
    /// Copy the nodes at `ids` into a fresh arena as a plain chain:
    /// each node's parent is the one before it, and its only child is
    /// the one after it.
    pub fn extract_chain(&self, ids: &[NodeId]) -> (NodeArena<V>, Vec<NodeId>) {
        let mut arena = NodeArena::new();
        let mut chain: Vec<NodeId> = Vec::with_capacity(ids.len());
        for id in ids {
            let copy = arena.insert(self[*id].detached());
            if let Some(previous) = chain.last().copied() {
                arena[copy].parent = Some(previous);
                arena[previous].children.push(copy);
            }
            chain.push(copy);
        }
        (arena, chain)
    }
}

fn foreign(id: NodeId) -> SearchError {
    SearchError::InvalidArgument(format!(
        "node handle {} does not belong to this arena",
        id.index()
    ))
}

/// Direct access by handle. Panics on a foreign handle, like indexing a
/// slice out of bounds; use [NodeArena::get] or [NodeArena::node] when the
/// handle's origin is not known.
impl<V> Index<NodeId> for NodeArena<V> {
    type Output = Node<V>;

    fn index(&self, id: NodeId) -> &Self::Output {
        assert_eq!(id.arena, self.tag, "node handle from a different arena");
        &self.nodes[id.index()]
    }
}

impl<V> IndexMut<NodeId> for NodeArena<V> {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        assert_eq!(id.arena, self.tag, "node handle from a different arena");
        &mut self.nodes[id.index()]
    }
}

/// Iterator over a parent chain, see [NodeArena::ancestry].
#[derive(Debug)]
pub struct Ancestry<'a, V> {
    arena: &'a NodeArena<V>,
    next: Option<NodeId>,
}

impl<'a, V> Iterator for Ancestry<'a, V> {
    type Item = (NodeId, &'a Node<V>);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let node = &self.arena[id];
        self.next = node.parent;
        Some((id, node))
    }
}
