//! Enumerate every root-to-node path of a [FrontierTree] and pick the
//! shortest or longest route between two values.

use log::debug;

use crate::errors::Result;
use crate::frontier::{Environment, FrontierTree};
use crate::node::{NodeArena, NodeId};
use crate::path::PathResult;

/// All paths accumulated over a fitted [FrontierTree].
///
/// Paths grow breadth first from the root: each accumulated path is
/// extended by a copy for every child of its last node, in child-list
/// order, unless that child's value is already on the path. Child lists
/// keep every edge the environment produced, so a node reached from
/// several parents ends several paths; none are filtered out.
#[derive(Debug)]
pub struct AllPaths<'t, E: Environment> {
    arena: &'t NodeArena<E::Value>,
    paths: Vec<Vec<NodeId>>,
    route: Option<PathResult<E::Value>>,
}

impl<'t, E: Environment> AllPaths<'t, E> {
    /// Enumerate the paths of `tree`, which must be fitted.
    pub fn new(tree: &'t FrontierTree<E>) -> Result<Self> {
        let arena = tree.arena()?;
        let root = tree.root()?;

        let mut paths = vec![vec![root]];
        let mut next = 0;

        while next < paths.len() {
            let path = paths[next].clone();
            next += 1;

            let last = path[path.len() - 1];
            for child in arena[last].children() {
                let value = arena[*child].value();
                if path.iter().any(|id| arena[*id].value() == value) {
                    continue;
                }
                let mut extended = path.clone();
                extended.push(*child);
                paths.push(extended);
            }
        }

        debug!("Enumerated {} paths over {} nodes", paths.len(), arena.len());

        Ok(Self {
            arena,
            paths,
            route: None,
        })
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Every accumulated path, as values.
    pub fn paths(&self) -> Vec<Vec<&'t E::Value>> {
        let arena = self.arena;
        self.paths
            .iter()
            .map(|p| p.iter().map(|id| arena[*id].value()).collect())
            .collect()
    }

    /// The path with the fewest nodes from `start` to `end`.
    ///
    /// When several tie, the first one enumerated wins. Returns `None`
    /// when no accumulated path joins the two values.
    pub fn shortest(
        &mut self,
        start: &E::Value,
        end: &E::Value,
    ) -> Result<Option<PathResult<E::Value>>> {
        Ok(self.select(start, end, |candidate, best| candidate < best))
    }

    /// The path with the most nodes from `start` to `end`.
    pub fn longest(
        &mut self,
        start: &E::Value,
        end: &E::Value,
    ) -> Result<Option<PathResult<E::Value>>> {
        Ok(self.select(start, end, |candidate, best| candidate > best))
    }

    /// The most recently selected route, as a standalone chain.
    pub fn route(&self) -> Option<&PathResult<E::Value>> {
        self.route.as_ref()
    }

    fn select<F>(
        &mut self,
        start: &E::Value,
        end: &E::Value,
        better: F,
    ) -> Option<PathResult<E::Value>>
    where
        F: Fn(usize, usize) -> bool,
    {
        let arena = self.arena;
        let joins = |path: &&Vec<NodeId>| match (path.first(), path.last()) {
            (Some(first), Some(last)) => arena[*first].value() == start && arena[*last].value() == end,
            _ => false,
        };

        let mut winner: Option<&Vec<NodeId>> = None;
        for path in self.paths.iter().filter(joins) {
            match winner {
                Some(best) if !better(path.len(), best.len()) => {}
                _ => winner = Some(path),
            }
        }

        let route = PathResult::from_chain(arena, winner?);
        self.route = Some(route.clone());
        Some(route)
    }
}

#[cfg(test)]
mod test {
    use anyhow::anyhow;

    use super::*;
    use crate::frontier::helpers::env;
    use crate::frontier::FrontierTree;

    #[test]
    fn diamond_routes_tie() {
        let tree = FrontierTree::new(env(
            "a",
            "d",
            &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")],
        ));
        let mut all = AllPaths::new(&tree).unwrap();

        let shortest = all.shortest(&"a", &"d").unwrap().unwrap();
        assert_eq!(shortest.len(), 3);
        let longest = all.longest(&"a", &"d").unwrap().unwrap();
        assert_eq!(longest.len(), 3);
        // Both branches are enumerated; the first one found wins the tie.
        let values = all.paths();
        assert!(values.contains(&vec![&"a", &"b", &"d"]));
        assert!(values.contains(&vec![&"a", &"c", &"d"]));
        let middle = shortest.get(1).map(|n| *n.value());
        assert_eq!(middle, Some("b"));
        assert_eq!(longest.raw(), shortest.raw());
    }

    #[test]
    fn same_endpoints_different_lengths() {
        // 'd' is reached from 'b' first, then again from 'e' after it
        // has already been expanded.
        let tree = FrontierTree::new(env(
            "a",
            "zz",
            &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "e"), ("e", "d")],
        ));
        let mut all = AllPaths::new(&tree).unwrap();
        assert!(all.paths().contains(&vec![&"a", &"c", &"e", &"d"]));

        let shortest = all.shortest(&"a", &"d").unwrap().unwrap();
        let longest = all.longest(&"a", &"d").unwrap().unwrap();
        assert_eq!(shortest.raw(), vec![&"a", &"b", &"d"]);
        assert_eq!(longest.raw(), vec![&"a", &"c", &"e", &"d"]);
        assert!(longest.len() > shortest.len());
        assert_eq!(all.route().map(|r| r.len()), Some(4));
        assert_eq!(longest.to_string(), "A -> C -> E -> D");
    }

    #[test]
    fn cycles_end_paths() {
        let tree = FrontierTree::new(env(
            "a",
            "zz",
            &[("a", "b"), ("b", "c"), ("c", "a"), ("c", "b")],
        ));
        let all = AllPaths::new(&tree).unwrap();
        assert_eq!(
            all.paths(),
            vec![vec![&"a"], vec![&"a", &"b"], vec![&"a", &"b", &"c"]]
        );
    }

    #[test]
    fn paths_reach_every_node() {
        // a -> e directly, and a -> b -> c -> d on a separate branch
        // ending at 'd'. Paths are enumerated to every node.
        let tree = FrontierTree::new(env(
            "a",
            "zz",
            &[("a", "b"), ("a", "e"), ("b", "c"), ("c", "d"), ("e", "f")],
        ));
        let mut all = AllPaths::new(&tree).unwrap();

        let values = all.paths();
        assert_eq!(values.len(), 6);
        assert!(values.contains(&vec![&"a", &"b", &"c", &"d"]));

        let to_c = all.longest(&"a", &"c").unwrap().unwrap();
        assert_eq!(to_c.raw(), vec![&"a", &"b", &"c"]);

        let to_a = all.shortest(&"a", &"a").unwrap().unwrap();
        assert_eq!(to_a.len(), 1);
    }

    #[test]
    fn missing_route_is_none() {
        let tree = FrontierTree::new(env("a", "b", &[("a", "b"), ("c", "d")]));
        let mut all = AllPaths::new(&tree).unwrap();
        assert!(all.shortest(&"a", &"d").unwrap().is_none());
        assert!(all.longest(&"b", &"a").unwrap().is_none());
        assert!(all.route().is_none());
    }

    #[test]
    fn selection_is_repeatable() {
        let tree = FrontierTree::new(env(
            "a",
            "e",
            &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d"), ("d", "e"), ("c", "e")],
        ));
        let mut all = AllPaths::new(&tree).unwrap();

        let first = all.shortest(&"a", &"e").unwrap().unwrap();
        let second = all.shortest(&"a", &"e").unwrap().unwrap();
        assert_eq!(first.len(), second.len());
        assert_eq!(first.raw(), second.raw());

        let first = all.longest(&"a", &"e").unwrap().unwrap();
        let second = all.longest(&"a", &"e").unwrap().unwrap();
        assert_eq!(first.len(), second.len());
    }

    #[test]
    fn route_is_a_plain_chain() {
        let tree = FrontierTree::new(env(
            "a",
            "d",
            &[("a", "b"), ("a", "x"), ("b", "d"), ("b", "y")],
        ));
        let mut all = AllPaths::new(&tree).unwrap();
        all.shortest(&"a", &"d").unwrap().unwrap();

        let route = all.route().unwrap();
        assert_eq!(route.raw(), vec![&"a", &"b", &"d"]);
        let arena = route.arena();
        for (i, id) in route.ids().iter().enumerate() {
            let expected: Vec<NodeId> = route.ids().get(i + 1).copied().into_iter().collect();
            assert_eq!(arena[*id].children(), expected.as_slice());
        }
        assert_eq!(
            route.links(),
            vec![
                ("A".to_string(), "B".to_string()),
                ("B".to_string(), "D".to_string())
            ]
        );
    }

    #[test]
    fn tree_shortcuts() -> anyhow::Result<()> {
        let tree = FrontierTree::new(env("a", "c", &[("a", "b"), ("b", "c")]));
        let shortest = tree.shortest(&"a", &"c")?.ok_or_else(|| anyhow!("no route a -> c"))?;
        assert_eq!(shortest.len(), 3);
        let longest = tree.longest(&"a", &"b")?.ok_or_else(|| anyhow!("no route a -> b"))?;
        assert_eq!(longest.len(), 2);
        Ok(())
    }
}
