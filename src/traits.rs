use crate::node::Node;

/// Expands a node into candidate neighbors.
///
/// Providers return freshly built nodes, carrying whatever cost the
/// strategy expects (an edge weight for Dijkstra, g + h for A*). They
/// need not avoid values already seen: the search algorithm drops
/// duplicates by value and records the parent link itself.
///
/// Any `FnMut(&Node<V>) -> Vec<Node<V>>` closure is a provider. Wrap a
/// closure with [lineage] when it also needs the node's parent.
pub trait NeighborProvider<V> {
    fn neighbors(&mut self, node: &Node<V>, parent: Option<&Node<V>>) -> Vec<Node<V>>;
}

impl<V, F> NeighborProvider<V> for F
where
    F: FnMut(&Node<V>) -> Vec<Node<V>>,
{
    fn neighbors(&mut self, node: &Node<V>, _parent: Option<&Node<V>>) -> Vec<Node<V>> {
        self(node)
    }
}

/// Provider built from a closure which also receives the parent of the
/// node being expanded.
#[derive(Debug, Clone)]
pub struct Lineage<F>(F);

/// Build a [NeighborProvider] from a closure taking the node and its parent.
pub fn lineage<V, F>(f: F) -> Lineage<F>
where
    F: FnMut(&Node<V>, Option<&Node<V>>) -> Vec<Node<V>>,
{
    Lineage(f)
}

impl<V, F> NeighborProvider<V> for Lineage<F>
where
    F: FnMut(&Node<V>, Option<&Node<V>>) -> Vec<Node<V>>,
{
    fn neighbors(&mut self, node: &Node<V>, parent: Option<&Node<V>>) -> Vec<Node<V>> {
        (self.0)(node, parent)
    }
}
