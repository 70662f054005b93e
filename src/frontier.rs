//! Eager breadth-first expansion of a whole reachable graph into an
//! explicit discovered-by tree.

use std::collections::{HashMap, VecDeque};
use std::fmt;

use log::debug;

use crate::allpaths::AllPaths;
use crate::errors::{Result, SearchError};
use crate::node::{Node, NodeArena, NodeId, NodeValue};
use crate::path::PathResult;

/// A graph described by its start, its stop value and a way to list
/// the children of any value.
pub trait Environment {
    type Value: NodeValue;

    fn start(&self) -> Self::Value;

    fn stop(&self) -> Self::Value;

    fn children_of(&self, value: &Self::Value) -> Vec<Self::Value>;

    fn name_of(&self, value: &Self::Value) -> String {
        format!("{:?}", value)
    }
}

type Children<V> = Box<dyn Fn(&V) -> Vec<V>>;
type Namer<V> = Box<dyn Fn(&V) -> String>;

/// An [Environment] built from closures, see [EnvBuilder].
pub struct Env<V> {
    start: V,
    stop: V,
    children: Children<V>,
    namer: Option<Namer<V>>,
}

impl<V: fmt::Debug> fmt::Debug for Env<V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Env")
            .field("start", &self.start)
            .field("stop", &self.stop)
            .finish()
    }
}

impl<V: NodeValue> Environment for Env<V> {
    type Value = V;

    fn start(&self) -> V {
        self.start.clone()
    }

    fn stop(&self) -> V {
        self.stop.clone()
    }

    fn children_of(&self, value: &V) -> Vec<V> {
        (self.children)(value)
    }

    fn name_of(&self, value: &V) -> String {
        match &self.namer {
            Some(namer) => namer(value),
            None => format!("{:?}", value),
        }
    }
}

/// Assembles an [Env]. Start, stop and a child function are required.
pub struct EnvBuilder<V> {
    start: Option<V>,
    stop: Option<V>,
    children: Option<Children<V>>,
    namer: Option<Namer<V>>,
}

impl<V> Default for EnvBuilder<V> {
    fn default() -> Self {
        Self {
            start: None,
            stop: None,
            children: None,
            namer: None,
        }
    }
}

impl<V: NodeValue> EnvBuilder<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(mut self, value: V) -> Self {
        self.start = Some(value);
        self
    }

    pub fn stop(mut self, value: V) -> Self {
        self.stop = Some(value);
        self
    }

    pub fn children<F>(mut self, f: F) -> Self
    where
        F: Fn(&V) -> Vec<V> + 'static,
    {
        self.children = Some(Box::new(f));
        self
    }

    pub fn names<F>(mut self, f: F) -> Self
    where
        F: Fn(&V) -> String + 'static,
    {
        self.namer = Some(Box::new(f));
        self
    }

    pub fn build(self) -> Result<Env<V>> {
        let missing = |what: &str| SearchError::InvalidEnvironment(format!("no {} given", what));
        Ok(Env {
            start: self.start.ok_or_else(|| missing("start value"))?,
            stop: self.stop.ok_or_else(|| missing("stop value"))?,
            children: self.children.ok_or_else(|| missing("child function"))?,
            namer: self.namer,
        })
    }
}

#[derive(Debug, Clone)]
struct Fitted<V> {
    arena: NodeArena<V>,
    root: NodeId,
    stop: Option<NodeId>,
    order: Vec<NodeId>,
}

/// The discovered-by tree of an [Environment].
///
/// Construction expands the environment immediately. Each value gets a
/// single node, expanded once, whose parent is the first node to
/// discover it. Every generated edge is still kept in the child lists,
/// so a node may be the child of several nodes.
#[derive(Debug)]
pub struct FrontierTree<E: Environment> {
    env: E,
    fitted: Option<Fitted<E::Value>>,
}

impl<E: Environment> FrontierTree<E> {
    /// Build the tree for `env`, expanding it right away.
    pub fn new(env: E) -> Self {
        let mut tree = Self { env, fitted: None };
        tree.fit();
        tree
    }

    pub fn environment(&self) -> &E {
        &self.env
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    /// Drop the tree. Queries fail with [SearchError::NotFitted] until
    /// [FrontierTree::fit] is called again.
    pub fn clear(&mut self) {
        self.fitted = None;
    }

    /// Expand the environment from its start value, breadth first,
    /// until the stop value is dequeued or nothing is left.
    pub fn fit(&mut self) {
        let env = &self.env;
        let goal = env.stop();

        let mut arena = NodeArena::new();
        let start = env.start();
        let root = arena.insert(Node::new(start.clone()).named(env.name_of(&start)));

        let mut queue: VecDeque<NodeId> = VecDeque::new();
        let mut discovered: HashMap<E::Value, NodeId> = HashMap::new();
        let mut order = Vec::new();
        let mut stop = None;

        queue.push_back(root);
        discovered.insert(start, root);

        while let Some(current) = queue.pop_front() {
            let value = arena[current].value().clone();
            order.push(current);

            if value == goal {
                stop = Some(current);
                break;
            }

            for child in env.children_of(&value) {
                let id = match discovered.get(&child).copied() {
                    Some(id) => id,
                    None => {
                        let node = Node::new(child.clone()).named(env.name_of(&child));
                        let id = arena.insert(node);
                        arena.link(id, current);
                        discovered.insert(child, id);
                        queue.push_back(id);
                        id
                    }
                };
                if !arena[current].children().contains(&id) {
                    arena[current].push_child(id);
                }
            }
        }

        debug!(
            "Fitted frontier tree: {} nodes, {} expanded, stop {}",
            arena.len(),
            order.len(),
            if stop.is_some() { "found" } else { "not found" }
        );

        self.fitted = Some(Fitted {
            arena,
            root,
            stop,
            order,
        });
    }

    fn fitted(&self) -> Result<&Fitted<E::Value>> {
        self.fitted.as_ref().ok_or(SearchError::NotFitted)
    }

    /// Storage holding the tree's nodes.
    pub fn arena(&self) -> Result<&NodeArena<E::Value>> {
        Ok(&self.fitted()?.arena)
    }

    pub fn root(&self) -> Result<NodeId> {
        Ok(self.fitted()?.root)
    }

    /// The node holding the stop value, if expansion reached it.
    pub fn stop_node(&self) -> Result<Option<NodeId>> {
        Ok(self.fitted()?.stop)
    }

    pub fn found(&self) -> Result<bool> {
        Ok(self.fitted()?.stop.is_some())
    }

    /// The nodes in the order they were dequeued.
    pub fn order(&self) -> Result<&[NodeId]> {
        Ok(&self.fitted()?.order)
    }

    /// The tree's route from the root to the stop node, following
    /// parent links.
    pub fn route(&self) -> Result<Option<PathResult<E::Value>>> {
        let fitted = self.fitted()?;
        Ok(fitted
            .stop
            .map(|stop| PathResult::from_chain(&fitted.arena, &fitted.arena.path_to(stop))))
    }

    /// Fewest-node path between two values, see [AllPaths::shortest].
    pub fn shortest(&self, start: &E::Value, end: &E::Value) -> Result<Option<PathResult<E::Value>>> {
        AllPaths::new(self)?.shortest(start, end)
    }

    /// Most-node path between two values, see [AllPaths::longest].
    pub fn longest(&self, start: &E::Value, end: &E::Value) -> Result<Option<PathResult<E::Value>>> {
        AllPaths::new(self)?.longest(start, end)
    }
}
