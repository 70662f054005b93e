use std::default::Default;

use super::{OpenList, SearchAlgorithm, SearchQueue};
use crate::node::{Node, NodeArena, NodeId, NodeValue};
use crate::path::PathResult;
use crate::traits::NeighborProvider;

/// Open set for A*, ordered by the cost each neighbor arrives with.
///
/// The provider is expected to set that cost to the estimated total
/// (g + h); the queue never computes a heuristic itself. When a value
/// that is still open is offered again with a lower cost, the new node
/// takes the old one's place in the queue, parent and all.
#[derive(Debug)]
pub struct AStarQueue<V> {
    open: OpenList<V>,
}

impl<V> Default for AStarQueue<V> {
    fn default() -> Self {
        AStarQueue {
            open: OpenList::default(),
        }
    }
}

impl<V: NodeValue> SearchQueue<V> for AStarQueue<V> {
    fn seed(&mut self, arena: &mut NodeArena<V>, start: NodeId) {
        self.open.push(arena, start);
    }

    fn pop(&mut self, arena: &NodeArena<V>) -> Option<NodeId> {
        self.open.pop(arena)
    }

    fn offer(&mut self, arena: &mut NodeArena<V>, current: NodeId, candidate: Node<V>) {
        match self.open.get(candidate.value()) {
            Some(existing) => {
                if arena[existing].cost() > candidate.cost() {
                    let id = arena.insert(candidate);
                    arena.link(id, current);
                    self.open.replace(arena, existing, id);
                }
            }
            None => {
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

pub type AStarSearcher<V, P> = SearchAlgorithm<V, P, AStarQueue<V>>;

/// A* search. Admissibility of the heuristic folded into each
/// neighbor's cost is the provider's responsibility.
pub fn astar<V, P>(provider: P, start: Node<V>, goal: Node<V>) -> Option<PathResult<V>>
where
    V: NodeValue,
    P: NeighborProvider<V>,
{
    AStarSearcher::new(provider).run(start, goal)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::algorithm::dijkstra;
    use crate::algorithm::helpers::*;
    use crate::traits::lineage;

    type Cell = (i32, i32);

    fn manhattan(a: Cell, b: Cell) -> f64 {
        ((a.0 - b.0).abs() + (a.1 - b.1).abs()) as f64
    }

    #[test]
    fn open_grid_corner_to_corner() {
        let goal = (1, 1);
        let free = |c: &Cell| c.0 >= 0 && c.0 < 2 && c.1 >= 0 && c.1 < 2;

        let path = astar(
            |n: &Node<Cell>| -> Vec<Node<Cell>> {
                let (x, y) = *n.value();
                let g = n.cost() - manhattan((x, y), goal);
                vec![(x - 1, y), (x + 1, y), (x, y - 1), (x, y + 1)]
                    .into_iter()
                    .filter(|c| free(c))
                    .map(|c| Node::new(c).with_cost(g + 1.0 + manhattan(c, goal)))
                    .collect()
            },
            Node::new((0, 0)).with_cost(manhattan((0, 0), goal)),
            Node::new(goal),
        )
        .unwrap();

        assert_eq!(path.len(), 3);
        let middle = *path.raw()[1];
        assert!(middle == (1, 0) || middle == (0, 1));
        assert_eq!(path.total_cost(), Some(2.0));
    }

    #[test]
    fn zero_heuristic_matches_dijkstra() {
        let graph = Graph::default()
            .undirected('a', 'b', 4.0)
            .undirected('a', 'c', 1.0)
            .undirected('c', 'b', 2.0)
            .undirected('b', 'd', 1.0)
            .undirected('c', 'd', 5.0)
            .undirected('d', 'e', 3.0);

        let best = astar(|n: &Node<char>| graph.accumulated(n), Node::new('a'), Node::new('e')).unwrap();
        let reference =
            dijkstra::run(|n: &Node<char>| graph.weighted(n), Node::new('a'), Node::new('e')).unwrap();

        assert_eq!(best.raw(), reference.raw());
        assert_eq!(best.total_cost(), reference.total_cost());
        assert_eq!(best.total_cost(), Some(7.0));
    }

    #[test]
    fn cheaper_offer_replaces_open_entry() {
        let graph = Graph::default()
            .edge('a', 'c', 5.0)
            .edge('a', 'b', 1.0)
            .edge('b', 'c', 1.0)
            .edge('c', 'd', 1.0);

        let path = astar(|n: &Node<char>| graph.accumulated(n), Node::new('a'), Node::new('d')).unwrap();
        assert_eq!(path.raw(), vec![&'a', &'b', &'c', &'d']);
        assert_eq!(path.total_cost(), Some(3.0));
    }

    #[test]
    fn provider_sees_parent() {
        // Going straight is cheaper than turning, which the provider can
        // only know by looking at where it came from.
        let goal = (2, 1);
        let free = |c: &Cell| c.0 >= 0 && c.0 < 3 && c.1 >= 0 && c.1 < 2;
        let path = astar(
            lineage(|n: &Node<Cell>, parent: Option<&Node<Cell>>| {
                let (x, y) = *n.value();
                let heading = parent.map(|p| (x - p.value().0, y - p.value().1));
                let g = n.cost() - manhattan((x, y), goal);
                vec![(x + 1, y), (x, y + 1)]
                    .into_iter()
                    .filter(|c| free(c))
                    .map(|c| {
                        let step = if heading == Some((c.0 - x, c.1 - y)) { 1.0 } else { 1.5 };
                        Node::new(c).with_cost(g + step + manhattan(c, goal))
                    })
                    .collect()
            }),
            Node::new((0, 0)).with_cost(manhattan((0, 0), goal)),
            Node::new(goal),
        )
        .unwrap();

        assert_eq!(path.raw(), vec![&(0, 0), &(1, 0), &(2, 0), &(2, 1)]);
        assert_eq!(path.total_cost(), Some(4.0));
    }
}
