//! Provides the building blocks for search algorithms

use std::collections::{HashMap, HashSet};
use std::default::Default;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use log::{debug, trace};

use crate::errors::{Result, SearchError};
use crate::node::{Node, NodeArena, NodeId, NodeValue};
use crate::path::PathResult;
use crate::traits::NeighborProvider;

pub mod astar;
pub mod basic;
pub mod dijkstra;

use self::astar::AStarQueue;
use self::basic::{BreadthQueue, DepthQueue};
use self::dijkstra::DijkstraQueue;

/// Trait used to implement the open set of a search: the nodes which
/// have been discovered but not yet expanded.
///
/// Each strategy decides which node comes out next, and what happens
/// when a value that is already open is offered again.
pub trait SearchQueue<V>: Default {
    /// Queue the start node.
    fn seed(&mut self, arena: &mut NodeArena<V>, start: NodeId);

    /// Select and remove the next node to expand.
    fn pop(&mut self, arena: &NodeArena<V>) -> Option<NodeId>;

    /// Consider a neighbor of `current` which is not closed.
    fn offer(&mut self, arena: &mut NodeArena<V>, current: NodeId, candidate: Node<V>);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Options which tune how a search reports on itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Emit a progress line every this many expansions.
    pub progress: Option<usize>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            progress: Some(10_000),
        }
    }
}

/// The traversal strategies offered by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    BreadthFirst,
    DepthFirst,
    Dijkstra,
    AStar,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Strategy::BreadthFirst => "bfs",
            Strategy::DepthFirst => "dfs",
            Strategy::Dijkstra => "dijkstra",
            Strategy::AStar => "astar",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Strategy {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" | "breadth-first" | "breadth_first" => Ok(Strategy::BreadthFirst),
            "dfs" | "depth-first" | "depth_first" => Ok(Strategy::DepthFirst),
            "dijkstra" => Ok(Strategy::Dijkstra),
            "astar" | "a*" | "a-star" => Ok(Strategy::AStar),
            other => Err(SearchError::InvalidArgument(format!(
                "unknown search strategy '{}'",
                other
            ))),
        }
    }
}

/// Implementation of search, using generic components.
///
/// Uses a generic neighbor provider (P) and a generic open set (Q) to
/// provide a single foundation for every strategy. Each call to
/// [SearchAlgorithm::run] works on its own nodes and collections.
#[derive(Debug)]
pub struct SearchAlgorithm<V, P, Q> {
    provider: P,
    options: SearchOptions,
    queue: PhantomData<fn() -> (V, Q)>,
}

impl<V, P, Q> SearchAlgorithm<V, P, Q>
where
    V: NodeValue,
    P: NeighborProvider<V>,
    Q: SearchQueue<V>,
{
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            options: SearchOptions::default(),
            queue: PhantomData,
        }
    }

    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    /// Find a route from `start` to the node with `goal`'s value.
    ///
    /// Returns `None` when every reachable node has been expanded
    /// without meeting the goal.
    pub fn run(&mut self, start: Node<V>, goal: Node<V>) -> Option<PathResult<V>> {
        explore::<V, P, Q>(&mut self.provider, &self.options, start, goal.value())
    }
}

fn explore<V, P, Q>(
    provider: &mut P,
    options: &SearchOptions,
    start: Node<V>,
    goal: &V,
) -> Option<PathResult<V>>
where
    V: NodeValue,
    P: NeighborProvider<V>,
    Q: SearchQueue<V>,
{
    let mut arena = NodeArena::new();
    let mut queue = Q::default();
    let mut closed: HashSet<V> = HashSet::new();

    let origin = arena.insert(start);
    queue.seed(&mut arena, origin);

    let mut n = 0;
    while let Some(current) = queue.pop(&arena) {
        n += 1;
        closed.insert(arena[current].value().clone());

        if arena[current].value() == goal {
            debug!(
                "Reached {} after {} expansions (cost {})",
                arena[current],
                n,
                arena[current].cost()
            );
            return Some(PathResult::from_chain(&arena, &arena.path_to(current)));
        }

        let neighbors = provider.neighbors(&arena[current], arena.parent(current));
        trace!("Expanding {} into {} neighbors", arena[current], neighbors.len());

        if let Some(interval) = options.progress {
            if interval > 0 && n % interval == 0 {
                debug!(
                    "Q{} C{} N{} ({})",
                    queue.len(),
                    closed.len(),
                    arena.len(),
                    n
                );
            }
        }

        for candidate in neighbors {
            if closed.contains(candidate.value()) {
                continue;
            }
            queue.offer(&mut arena, current, candidate);
        }
    }

    debug!("No route to {:?} after {} expansions", goal, n);
    None
}

/// Open set ordered by node cost, shared by the weighted strategies.
///
/// The minimum is found with a linear scan; among equal costs the node
/// queued first wins.
#[derive(Debug)]
pub(crate) struct OpenList<V> {
    open: Vec<NodeId>,
    index: HashMap<V, NodeId>,
}

impl<V> Default for OpenList<V> {
    fn default() -> Self {
        Self {
            open: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<V: NodeValue> OpenList<V> {
    pub(crate) fn push(&mut self, arena: &NodeArena<V>, id: NodeId) {
        self.index.insert(arena[id].value().clone(), id);
        self.open.push(id);
    }

    pub(crate) fn pop(&mut self, arena: &NodeArena<V>) -> Option<NodeId> {
        let mut best: Option<usize> = None;
        for (i, id) in self.open.iter().enumerate() {
            let cost = arena[*id].cost();
            match best {
                Some(b) if arena[self.open[b]].cost().total_cmp(&cost).is_le() => {}
                _ => best = Some(i),
            }
        }
        let id = self.open.remove(best?);
        self.index.remove(arena[id].value());
        Some(id)
    }

    /// The open node holding `value`, if there is one.
    pub(crate) fn get(&self, value: &V) -> Option<NodeId> {
        self.index.get(value).copied()
    }

    /// Put `new` where `old` was in the queue.
    pub(crate) fn replace(&mut self, arena: &NodeArena<V>, old: NodeId, new: NodeId) {
        if let Some(slot) = self.open.iter_mut().find(|id| **id == old) {
            *slot = new;
            self.index.insert(arena[new].value().clone(), new);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.open.len()
    }
}

/// Run a single search with the given strategy.
pub fn search<V, P>(
    strategy: Strategy,
    mut provider: P,
    start: Node<V>,
    goal: Node<V>,
) -> Option<PathResult<V>>
where
    V: NodeValue,
    P: NeighborProvider<V>,
{
    dispatch(strategy, &mut provider, &SearchOptions::default(), start, goal.value())
}

fn dispatch<V, P>(
    strategy: Strategy,
    provider: &mut P,
    options: &SearchOptions,
    start: Node<V>,
    goal: &V,
) -> Option<PathResult<V>>
where
    V: NodeValue,
    P: NeighborProvider<V>,
{
    debug!("Starting {} search from {}", strategy, start);
    match strategy {
        Strategy::BreadthFirst => explore::<V, P, BreadthQueue<V>>(provider, options, start, goal),
        Strategy::DepthFirst => explore::<V, P, DepthQueue<V>>(provider, options, start, goal),
        Strategy::Dijkstra => explore::<V, P, DijkstraQueue<V>>(provider, options, start, goal),
        Strategy::AStar => explore::<V, P, AStarQueue<V>>(provider, options, start, goal),
    }
}

/// Assembles a [Searcher] whose strategy is chosen at runtime.
#[derive(Debug)]
pub struct SearchBuilder<P> {
    strategy: Strategy,
    options: SearchOptions,
    provider: Option<P>,
}

impl<P> Default for SearchBuilder<P> {
    fn default() -> Self {
        Self {
            strategy: Strategy::BreadthFirst,
            options: SearchOptions::default(),
            provider: None,
        }
    }
}

impl<P> SearchBuilder<P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn provider(mut self, provider: P) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Finish the searcher. A neighbor provider is required.
    pub fn build(self) -> Result<Searcher<P>> {
        let provider = self
            .provider
            .ok_or(SearchError::MissingArgument("neighbor provider"))?;
        Ok(Searcher {
            strategy: self.strategy,
            options: self.options,
            provider,
        })
    }
}

/// A bound provider plus a strategy picked at runtime.
#[derive(Debug)]
pub struct Searcher<P> {
    strategy: Strategy,
    options: SearchOptions,
    provider: P,
}

impl<P> Searcher<P> {
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Find a route from `start` to the node with `goal`'s value.
    pub fn path<V>(&mut self, start: Node<V>, goal: Node<V>) -> Option<PathResult<V>>
    where
        V: NodeValue,
        P: NeighborProvider<V>,
    {
        dispatch(
            self.strategy,
            &mut self.provider,
            &self.options,
            start,
            goal.value(),
        )
    }
}

#[cfg(test)]
pub(crate) mod helpers {
    use std::collections::HashMap;

    use crate::node::{Cost, Node};

    /// A directed graph with weighted edges, listed in insertion order.
    #[derive(Debug, Default, Clone)]
    pub(crate) struct Graph {
        edges: HashMap<char, Vec<(char, Cost)>>,
    }

    impl Graph {
        pub(crate) fn edge(mut self, from: char, to: char, weight: Cost) -> Self {
            self.edges.entry(from).or_default().push((to, weight));
            self
        }

        pub(crate) fn undirected(self, a: char, b: char, weight: Cost) -> Self {
            self.edge(a, b, weight).edge(b, a, weight)
        }

        /// Neighbors carrying their edge weight as cost.
        pub(crate) fn weighted(&self, node: &Node<char>) -> Vec<Node<char>> {
            self.edges
                .get(node.value())
                .map(|edges| {
                    edges
                        .iter()
                        .map(|(to, w)| Node::new(*to).with_cost(*w))
                        .collect()
                })
                .unwrap_or_default()
        }

        /// Neighbors carrying the accumulated cost, for A* with no heuristic.
        pub(crate) fn accumulated(&self, node: &Node<char>) -> Vec<Node<char>> {
            self.weighted(node)
                .into_iter()
                .map(|n| {
                    let cost = node.cost() + n.cost();
                    n.with_cost(cost)
                })
                .collect()
        }
    }

    pub(crate) fn line() -> Graph {
        Graph::default().edge('a', 'b', 1.0).edge('b', 'c', 1.0)
    }
}
