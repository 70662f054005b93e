//! Rectangular grids of free-space weights, routed with A*.
//!
//! Each cell holds a weight in `[0, 1]`: 1 is open floor, 0 is a wall,
//! and anything between is passable at a price. Moving into a cell
//! costs `1 - weight` (rounded to hundredths) plus a small penalty
//! which is larger when the route turns.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use log::debug;
use thiserror::Error;
use vagabond::{astar, Cost, NeighborProvider, Node, PathResult};

use crate::coord2d::map::Map;
use crate::coord2d::Point;
use crate::Position;

/// Added to a step which keeps the previous heading.
const STRAIGHT_PENALTY: Cost = 0.1;

/// Added to a step which changes heading, or is the first step.
const TURN_PENALTY: Cost = 0.5;

/// Error when parsing a grid from text.
#[derive(Debug, Error, PartialEq)]
pub enum ParseGridError {
    #[error("Grid has no cells")]
    Empty,

    #[error("Invalid weight {literal:?} at row {row}, column {column}")]
    InvalidWeight {
        row: usize,
        column: usize,
        literal: String,
    },

    #[error("Weight {weight} at row {row}, column {column} is outside [0, 1]")]
    OutOfRange {
        row: usize,
        column: usize,
        weight: f64,
    },

    #[error("Row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// A rectangular grid of free-space weights.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<f64>,
}

impl Grid {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, location: Point) -> Option<usize> {
        if location.x < 0 || location.y < 0 {
            return None;
        }
        let (x, y) = (location.x as usize, location.y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    /// Every location on the grid, row by row.
    pub fn locations(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.height as Position)
            .flat_map(move |y| (0..self.width as Position).map(move |x| Point::new(x, y)))
    }

    /// Weight of the cell at `location`, or `None` off the grid.
    pub fn weight(&self, location: Point) -> Option<f64> {
        self.index(location).map(|i| self.cells[i])
    }

    /// Cheapest route from `from` to `to`, where cell weights and
    /// turns both count.
    pub fn astar(&self, from: Point, to: Point) -> Option<PathResult<Point>> {
        self.route(from, to, StepCost::Weighted)
    }

    /// Route from `from` to `to` using the given step costs.
    ///
    /// Returns `None` when either end is a wall or off the grid, or
    /// when no open route joins them.
    pub fn route(&self, from: Point, to: Point, mode: StepCost) -> Option<PathResult<Point>> {
        if !self.is_traversable(from) || !self.is_traversable(to) {
            debug!("No route from {} to {}: endpoint is blocked", from, to);
            return None;
        }
        let pather = GridPather::new(self, to).with_mode(mode);
        astar(pather, Node::new(from).named(label(from)), Node::new(to))
    }
}

impl Map for Grid {
    fn is_traversable(&self, location: Point) -> bool {
        matches!(self.weight(location), Some(w) if w > 0.0)
    }
}

impl FromStr for Grid {
    type Err = ParseGridError;

    /// Parse whitespace separated weights, one row per line. Blank
    /// lines are skipped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut width = None;
        let mut height = 0;
        let mut cells = Vec::new();

        for (row, line) in s.lines().filter(|l| !l.trim().is_empty()).enumerate() {
            let mut found = 0;
            for (column, literal) in line.split_whitespace().enumerate() {
                let weight: f64 = literal.parse().map_err(|_| ParseGridError::InvalidWeight {
                    row,
                    column,
                    literal: literal.to_string(),
                })?;
                if !(0.0..=1.0).contains(&weight) {
                    return Err(ParseGridError::OutOfRange {
                        row,
                        column,
                        weight,
                    });
                }
                cells.push(weight);
                found += 1;
            }

            match width {
                None => width = Some(found),
                Some(expected) if expected != found => {
                    return Err(ParseGridError::Ragged {
                        row,
                        expected,
                        found,
                    })
                }
                Some(_) => {}
            }
            height += 1;
        }

        match width {
            Some(width) if width > 0 => Ok(Grid {
                width,
                height,
                cells,
            }),
            _ => Err(ParseGridError::Empty),
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.width == 0 {
            return Ok(());
        }
        for row in self.cells.chunks(self.width) {
            writeln!(f, "{}", row.iter().join(" "))?;
        }
        Ok(())
    }
}

/// How a [GridPather] prices a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepCost {
    /// Heading penalty plus `1 - weight` of the cell entered.
    Weighted,

    /// Every step costs 1.
    Uniform,
}

/// Neighbor provider for A* over a [Grid] towards a fixed target.
///
/// Each neighbor is given the cost `g + step + h`, where `g` is the
/// best known cost to reach the current cell and `h` is the Manhattan
/// distance from the neighbor to the target.
#[derive(Debug)]
pub struct GridPather<'g> {
    grid: &'g Grid,
    target: Point,
    mode: StepCost,
    reached: HashMap<Point, Cost>,
}

impl<'g> GridPather<'g> {
    pub fn new(grid: &'g Grid, target: Point) -> Self {
        Self {
            grid,
            target,
            mode: StepCost::Weighted,
            reached: HashMap::new(),
        }
    }

    pub fn with_mode(mut self, mode: StepCost) -> Self {
        self.mode = mode;
        self
    }

    /// Price of moving from `current` to the adjacent `next`, having
    /// arrived at `current` from `previous`.
    pub fn step_cost(&self, previous: Option<Point>, current: Point, next: Point) -> Cost {
        match self.mode {
            StepCost::Uniform => 1.0,
            StepCost::Weighted => {
                let heading = previous.and_then(|p| p.direction(current));
                let penalty = if heading.is_some() && heading == current.direction(next) {
                    STRAIGHT_PENALTY
                } else {
                    TURN_PENALTY
                };
                let weight = self.grid.weight(next).unwrap_or(0.0);
                penalty + round2(1.0 - weight)
            }
        }
    }

    pub fn heuristic(&self, location: Point) -> Cost {
        Cost::from(location.manhattan_distance(self.target))
    }
}

impl<'g> NeighborProvider<Point> for GridPather<'g> {
    fn neighbors(&mut self, node: &Node<Point>, parent: Option<&Node<Point>>) -> Vec<Node<Point>> {
        let current = *node.value();
        let previous = parent.map(|p| *p.value());
        let g = self.reached.get(&current).copied().unwrap_or(0.0);

        let mut neighbors = Vec::new();
        for next in self.grid.neighbors(current) {
            let cost = g + self.step_cost(previous, current, next);
            let best = self.reached.entry(next).or_insert(Cost::INFINITY);
            if cost < *best {
                *best = cost;
            }
            let estimate = cost + self.heuristic(next);
            neighbors.push(Node::new(next).named(label(next)).with_cost(estimate));
        }
        neighbors
    }
}

fn label(location: Point) -> String {
    format!("({}, {})", location.x, location.y)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl From<Vec<Vec<f64>>> for Grid {
    /// Build a grid from rows of weights. Short rows are padded with
    /// walls.
    fn from(rows: Vec<Vec<f64>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let height = rows.len();
        let mut cells = Vec::with_capacity(width * height);
        for mut row in rows {
            row.resize(width, 0.0);
            cells.extend(row.into_iter().map(|w| w.clamp(0.0, 1.0)));
        }
        Grid {
            width,
            height,
            cells,
        }
    }
}
