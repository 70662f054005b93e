//! Trait to define a map suitable for pathfinding
//! on a 2D coordinate grid.
use std::fmt;

use vagabond::{bfs, Node, PathResult};

use super::Point;

/// Defines a map of locations on a coordinate grid.
///
/// The storage of the map is left to the implementing
/// structure, this trait simply requires a map to
/// return whether a given location is traversable.
///
/// Maps assume that traversal happens one square at
/// a time in 2-D space.
pub trait Map: fmt::Debug {
    /// Can the sprite step on this location on the path?
    fn is_traversable(&self, location: Point) -> bool;

    /// Traversable locations one step away from `location`.
    fn neighbors(&self, location: Point) -> Vec<Point> {
        location
            .adjacent()
            .filter(|p| self.is_traversable(*p))
            .collect()
    }

    /// Fewest-step path on this map, ignoring any weights.
    fn path(&self, origin: Point, destination: Point) -> Option<PathResult<Point>> {
        bfs(
            |node: &Node<Point>| -> Vec<Node<Point>> {
                self.neighbors(*node.value())
                    .into_iter()
                    .map(Node::new)
                    .collect()
            },
            Node::new(origin),
            Node::new(destination),
        )
    }
}

#[cfg(test)]
pub(crate) mod helpers {
    use std::collections::HashSet;
    use std::str::FromStr;

    use super::super::Point;
    use super::Map;
    use crate::Position;

    #[derive(Debug, Default, Clone)]
    pub(crate) struct SimpleMap {
        spaces: HashSet<Point>,
    }

    impl FromStr for SimpleMap {
        type Err = String;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            let mut map = SimpleMap::default();
            for (y, line) in s.lines().enumerate() {
                for (x, c) in line.trim().chars().enumerate() {
                    match c {
                        '.' => {
                            map.spaces.insert((x as Position, y as Position).into());
                        }
                        '#' => {}
                        _ => return Err(format!("Unexpected map character: {}", c)),
                    };
                }
            }
            Ok(map)
        }
    }

    impl Map for SimpleMap {
        fn is_traversable(&self, location: Point) -> bool {
            self.spaces.contains(&location)
        }
    }
}

#[cfg(test)]
mod test {
    use super::helpers::SimpleMap;
    use super::*;

    #[test]
    fn path_around_walls() {
        let map: SimpleMap = "
        ...
        ##.
        ...
        "
        .trim()
        .parse()
        .unwrap();

        assert_eq!(
            map.neighbors(Point::new(2, 1)),
            vec![Point::new(2, 0), Point::new(2, 2)]
        );

        let path = map.path(Point::new(0, 0), Point::new(0, 2)).unwrap();
        assert_eq!(path.len(), 7);
        assert_eq!(path.first().map(|n| *n.value()), Some(Point::new(0, 0)));
        assert_eq!(path.last().map(|n| *n.value()), Some(Point::new(0, 2)));
        assert!(path.raw().contains(&&Point::new(2, 1)));
    }

    #[test]
    fn walled_off() {
        let map: SimpleMap = "
        .#.
        ##.
        ...
        "
        .trim()
        .parse()
        .unwrap();

        assert!(map.path(Point::new(0, 0), Point::new(2, 2)).is_none());
        assert_eq!(map.path(Point::new(2, 0), Point::new(2, 0)).unwrap().len(), 1);
    }
}
