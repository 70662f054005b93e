//! Routes produced by the search engines.

use std::fmt::{self, Debug};

use itertools::Itertools;

use crate::errors::{Result, SearchError};
use crate::node::{Cost, Node, NodeArena, NodeId};

/// An ordered sequence of nodes, from origin to destination.
///
/// The nodes are a private copy of the route, linked as a plain chain:
/// each node's parent is the node before it. The write methods exist so
/// a caller can post-process a route before handing it on.
#[derive(Debug, Clone)]
pub struct PathResult<V> {
    arena: NodeArena<V>,
    steps: Vec<NodeId>,
}

impl<V> Default for PathResult<V> {
    fn default() -> Self {
        Self {
            arena: NodeArena::new(),
            steps: Vec::new(),
        }
    }
}

impl<V: Clone> PathResult<V> {
    /// Copy the route `ids` out of `arena`.
    pub(crate) fn from_chain(arena: &NodeArena<V>, ids: &[NodeId]) -> Self {
        let (arena, steps) = arena.extract_chain(ids);
        Self { arena, steps }
    }
}

impl<V> PathResult<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Append a node to the end of the route.
    pub fn add(&mut self, node: Node<V>) -> NodeId {
        let id = self.arena.insert(node);
        self.steps.push(id);
        id
    }

    /// Forget every node. The route is empty afterwards.
    pub fn clear(&mut self) {
        self.steps.clear();
        self.arena = NodeArena::new();
    }

    /// The node at a given position.
    pub fn get(&self, index: usize) -> Option<&Node<V>> {
        self.steps.get(index).map(|id| &self.arena[*id])
    }

    pub fn first(&self) -> Option<&Node<V>> {
        self.get(0)
    }

    pub fn last(&self) -> Option<&Node<V>> {
        self.steps.last().map(|id| &self.arena[*id])
    }

    /// Iterate over the nodes in order.
    pub fn iter(&self) -> impl Iterator<Item = &Node<V>> {
        self.steps.iter().map(move |id| &self.arena[*id])
    }

    /// Handles of the nodes in order, valid in [PathResult::arena].
    pub fn ids(&self) -> &[NodeId] {
        &self.steps
    }

    /// Storage backing this route, for walking parent links.
    pub fn arena(&self) -> &NodeArena<V> {
        &self.arena
    }

    /// The recorded parent of a node in this route.
    pub fn parent_of(&self, node: &Node<V>) -> Option<&Node<V>> {
        node.parent().and_then(|p| self.arena.get(p))
    }

    /// The values along the route.
    pub fn raw(&self) -> Vec<&V> {
        self.iter().map(|n| n.value()).collect()
    }

    /// Cost recorded on the final node.
    pub fn total_cost(&self) -> Option<Cost> {
        self.last().map(|n| n.cost())
    }
}

impl<V: PartialEq + Debug> PathResult<V> {
    /// Remove the first node holding `value`.
    pub fn remove(&mut self, value: &V) -> Result<Node<V>>
    where
        V: Clone,
    {
        let position = self
            .steps
            .iter()
            .position(|id| self.arena[*id].value() == value)
            .ok_or_else(|| SearchError::NotFound(format!("{:?} is not on the path", value)))?;
        let id = self.steps.remove(position);
        Ok(self.arena[id].detached())
    }
}

impl<V: Debug> PathResult<V> {
    /// Display names along the route.
    pub fn names(&self) -> Vec<String> {
        self.iter().map(|n| n.name().into_owned()).collect()
    }

    /// `(parent, child)` name pairs for every node with a parent,
    /// the shape a diagram renderer draws as edges.
    pub fn links(&self) -> Vec<(String, String)> {
        self.iter()
            .filter_map(|n| {
                self.parent_of(n)
                    .map(|p| (p.name().into_owned(), n.name().into_owned()))
            })
            .collect()
    }
}

impl<V: Debug> fmt::Display for PathResult<V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.iter().map(|n| n.name()).join(" -> "))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn route() -> PathResult<u32> {
        let mut arena = NodeArena::new();
        let ids: Vec<NodeId> = (1..=3u32)
            .map(|v| arena.insert(Node::new(v).with_cost(v as Cost)))
            .collect();
        PathResult::from_chain(&arena, &ids)
    }

    #[test]
    fn chain_links() {
        let path = route();
        assert_eq!(path.raw(), vec![&1, &2, &3]);
        assert_eq!(path.to_string(), "1 -> 2 -> 3");
        assert_eq!(
            path.links(),
            vec![
                ("1".to_string(), "2".to_string()),
                ("2".to_string(), "3".to_string())
            ]
        );
        assert_eq!(path.total_cost(), Some(3.0));

        let last = path.last().unwrap();
        assert_eq!(path.parent_of(last).map(|n| *n.value()), Some(2));
        assert!(path.parent_of(path.first().unwrap()).is_none());
    }

    #[test]
    fn edit() {
        let mut path = route();
        path.add(Node::new(4).named("four"));
        assert_eq!(path.len(), 4);
        assert_eq!(path.names().last().map(String::as_str), Some("four"));

        let removed = path.remove(&2).unwrap();
        assert_eq!(*removed.value(), 2);
        assert_eq!(path.raw(), vec![&1, &3, &4]);
        assert!(matches!(path.remove(&2), Err(SearchError::NotFound(_))));

        path.clear();
        assert!(path.is_empty());
        assert!(path.last().is_none());
        assert_eq!(path.to_string(), "");
    }
}
