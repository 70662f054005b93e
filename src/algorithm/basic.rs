pub use bfs::{bfs, BreadthFirstSearcher, BreadthQueue};
pub use dfs::{dfs, DepthFirstSearcher, DepthQueue};

mod bfs {
    use std::collections::{HashSet, VecDeque};
    use std::default::Default;

    use crate::algorithm::{SearchAlgorithm, SearchQueue};
    use crate::node::{Node, NodeArena, NodeId, NodeValue};
    use crate::path::PathResult;
    use crate::traits::NeighborProvider;

    /// First in, first out. A value is offered at most once while it
    /// is queued.
    #[derive(Debug)]
    pub struct BreadthQueue<V> {
        queue: VecDeque<NodeId>,
        queued: HashSet<V>,
    }

    impl<V> Default for BreadthQueue<V> {
        fn default() -> Self {
            BreadthQueue {
                queue: VecDeque::new(),
                queued: HashSet::new(),
            }
        }
    }

    impl<V: NodeValue> SearchQueue<V> for BreadthQueue<V> {
        fn seed(&mut self, arena: &mut NodeArena<V>, start: NodeId) {
            self.queued.insert(arena[start].value().clone());
            self.queue.push_back(start);
        }

        fn pop(&mut self, arena: &NodeArena<V>) -> Option<NodeId> {
            let id = self.queue.pop_front()?;
            self.queued.remove(arena[id].value());
            Some(id)
        }

        fn offer(&mut self, arena: &mut NodeArena<V>, current: NodeId, candidate: Node<V>) {
            if self.queued.contains(candidate.value()) {
                return;
            }
            self.queued.insert(candidate.value().clone());
            let id = arena.insert(candidate);
            arena.link(id, current);
            self.queue.push_back(id);
        }

        fn len(&self) -> usize {
            self.queue.len()
        }
    }

    pub type BreadthFirstSearcher<V, P> = SearchAlgorithm<V, P, BreadthQueue<V>>;

    /// Breadth-first search, where the order is determined
    /// by the neighbors returned by the provider.
    pub fn bfs<V, P>(provider: P, start: Node<V>, goal: Node<V>) -> Option<PathResult<V>>
    where
        V: NodeValue,
        P: NeighborProvider<V>,
    {
        BreadthFirstSearcher::new(provider).run(start, goal)
    }
}

mod dfs {
    use std::collections::{HashSet, VecDeque};
    use std::default::Default;

    use crate::algorithm::{SearchAlgorithm, SearchQueue};
    use crate::node::{Node, NodeArena, NodeId, NodeValue};
    use crate::path::PathResult;
    use crate::traits::NeighborProvider;

    /// Last in, first out. A value already on the stack is not pushed
    /// again.
    #[derive(Debug)]
    pub struct DepthQueue<V> {
        queue: VecDeque<NodeId>,
        stacked: HashSet<V>,
    }

    impl<V> Default for DepthQueue<V> {
        fn default() -> Self {
            DepthQueue {
                queue: VecDeque::new(),
                stacked: HashSet::new(),
            }
        }
    }

    impl<V: NodeValue> SearchQueue<V> for DepthQueue<V> {
        fn seed(&mut self, arena: &mut NodeArena<V>, start: NodeId) {
            self.stacked.insert(arena[start].value().clone());
            self.queue.push_front(start);
        }

        fn pop(&mut self, arena: &NodeArena<V>) -> Option<NodeId> {
            let id = self.queue.pop_front()?;
            self.stacked.remove(arena[id].value());
            Some(id)
        }

        fn offer(&mut self, arena: &mut NodeArena<V>, current: NodeId, candidate: Node<V>) {
            if self.stacked.contains(candidate.value()) {
                return;
            }
            self.stacked.insert(candidate.value().clone());
            let id = arena.insert(candidate);
            arena.link(id, current);
            self.queue.push_front(id);
        }

        fn len(&self) -> usize {
            self.queue.len()
        }
    }

    pub type DepthFirstSearcher<V, P> = SearchAlgorithm<V, P, DepthQueue<V>>;

    /// Depth-first search. The neighbor offered last is explored first.
    pub fn dfs<V, P>(provider: P, start: Node<V>, goal: Node<V>) -> Option<PathResult<V>>
    where
        V: NodeValue,
        P: NeighborProvider<V>,
    {
        DepthFirstSearcher::new(provider).run(start, goal)
    }
}
