//! Frontier search over the field.
//!
//! The engine knows nothing about snakes: callers pick the pop order and pass
//! an admissibility predicate deciding which cells may enter the frontier.
//! Nodes live in an arena ([`SearchTree`]) and point at their parent by index,
//! so a finished search can hand the whole tree back to the caller.

use std::collections::{HashSet, VecDeque};

use super::grid::neighbors;
use super::types::{FieldSize, Point};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Traversal {
    /// Queue order, breadth first.
    Fifo,
    /// Stack order, depth first.
    Lifo,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchGoal {
    Cell(Point),
    /// Never matches; the search runs until the reachable component is exhausted.
    Exhaust,
}

impl SearchGoal {
    fn is_reached(&self, point: Point) -> bool {
        match self {
            SearchGoal::Cell(goal) => *goal == point,
            SearchGoal::Exhaust => false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchNode {
    pub point: Point,
    pub parent: Option<usize>,
    pub depth: usize,
}

#[derive(Clone, Debug, Default)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
}

impl SearchTree {
    fn push(&mut self, node: SearchNode) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub fn node(&self, index: usize) -> &SearchNode {
        &self.nodes[index]
    }

    pub fn nodes(&self) -> &[SearchNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Cells from the root (exclusive) down to `index` (inclusive).
    pub fn path_to(&self, index: usize) -> Vec<Point> {
        let mut path = Vec::with_capacity(self.nodes[index].depth);
        let mut current = index;
        while let Some(parent) = self.nodes[current].parent {
            path.push(self.nodes[current].point);
            current = parent;
        }
        path.reverse();
        path
    }
}

#[derive(Clone, Debug)]
pub enum SearchOutcome {
    /// Path from the start (exclusive) to the goal (inclusive).
    Found(Vec<Point>),
    /// The goal was never reached. `visited` holds the arena indices of every
    /// expanded node, in expansion order.
    Exhausted {
        tree: SearchTree,
        visited: Vec<usize>,
    },
}

impl SearchOutcome {
    pub fn into_path(self) -> Option<Vec<Point>> {
        match self {
            SearchOutcome::Found(path) => Some(path),
            SearchOutcome::Exhausted { .. } => None,
        }
    }
}

struct Frontier {
    traversal: Traversal,
    items: VecDeque<usize>,
}

impl Frontier {
    fn new(traversal: Traversal) -> Self {
        Self {
            traversal,
            items: VecDeque::new(),
        }
    }

    fn push(&mut self, index: usize) {
        self.items.push_back(index);
    }

    fn pop(&mut self) -> Option<usize> {
        match self.traversal {
            Traversal::Fifo => self.items.pop_front(),
            Traversal::Lifo => self.items.pop_back(),
        }
    }
}

pub fn search<F>(
    start: Point,
    goal: SearchGoal,
    field_size: &FieldSize,
    traversal: Traversal,
    admissible: F,
) -> SearchOutcome
where
    F: Fn(Point) -> bool,
{
    let mut tree = SearchTree::default();
    let mut frontier = Frontier::new(traversal);
    // Cells that were ever queued; a cell enters the frontier at most once.
    let mut discovered = HashSet::new();
    let mut visited = Vec::new();

    let root = tree.push(SearchNode {
        point: start,
        parent: None,
        depth: 0,
    });
    discovered.insert(start);
    frontier.push(root);

    while let Some(index) = frontier.pop() {
        let node = *tree.node(index);
        if goal.is_reached(node.point) {
            return SearchOutcome::Found(tree.path_to(index));
        }
        visited.push(index);

        for neighbor in neighbors(node.point, field_size) {
            if !admissible(neighbor) || !discovered.insert(neighbor) {
                continue;
            }
            let child = tree.push(SearchNode {
                point: neighbor,
                parent: Some(index),
                depth: node.depth + 1,
            });
            frontier.push(child);
        }
    }

    SearchOutcome::Exhausted { tree, visited }
}
