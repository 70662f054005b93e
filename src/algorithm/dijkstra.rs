//! Dijkstra's Algorithm

use std::default::Default;

use super::{OpenList, SearchAlgorithm, SearchQueue};
use crate::node::{Node, NodeArena, NodeId, NodeValue};
use crate::path::PathResult;
use crate::traits::NeighborProvider;

/// A priority queue to always search the next shortest path
/// by measured distance.
///
/// Offered nodes carry the weight of the edge that reached them; the
/// queue turns that into a running total. When a cheaper route reaches
/// a node that is still open, that node's cost and parent are
/// overwritten in place.
#[derive(Debug)]
pub struct DijkstraQueue<V> {
    open: OpenList<V>,
}

impl<V> Default for DijkstraQueue<V> {
    fn default() -> Self {
        DijkstraQueue {
            open: OpenList::default(),
        }
    }
}

impl<V: NodeValue> SearchQueue<V> for DijkstraQueue<V> {
    fn seed(&mut self, arena: &mut NodeArena<V>, start: NodeId) {
        arena[start].set_cost(0.0);
        self.open.push(arena, start);
    }

    fn pop(&mut self, arena: &NodeArena<V>) -> Option<NodeId> {
        self.open.pop(arena)
    }

    fn offer(&mut self, arena: &mut NodeArena<V>, current: NodeId, mut candidate: Node<V>) {
        let distance = arena[current].cost() + candidate.cost();

        match self.open.get(candidate.value()) {
            Some(existing) => {
                if distance < arena[existing].cost() {
                    arena[existing].set_cost(distance);
                    arena.link(existing, current);
                }
            }
            None => {
                candidate.set_cost(distance);
                let id = arena.insert(candidate);
                arena.link(id, current);
                self.open.push(arena, id);
            }
        }
    }

    fn len(&self) -> usize {
        self.open.len()
    }
}

/// Search algorithm which implements Dijkstra's Algorithm for
/// graph searches.
pub type DijkstraSearch<V, P> = SearchAlgorithm<V, P, DijkstraQueue<V>>;

/// Build a Dijkstra's Alogrithm Searcher
pub fn build<V, P>(provider: P) -> DijkstraSearch<V, P>
where
    V: NodeValue,
    P: NeighborProvider<V>,
{
    SearchAlgorithm::new(provider)
}

/// Perform a search using Dijkstra's algorithm.
///
/// Dijkstra's algorithm behaves like a breadth first search, but always
/// expands the open node with the lowest total cost, so routes with more
/// hops win when their summed weight is smaller. Each node's cost on the
/// returned path is its distance from the start.
pub fn run<V, P>(provider: P, start: Node<V>, goal: Node<V>) -> Option<PathResult<V>>
where
    V: NodeValue,
    P: NeighborProvider<V>,
{
    build(provider).run(start, goal)
}
