//! Autopilot strategies built on the frontier search.
//!
//! Every search-based mode is described by a [`SearchPlan`] looked up from its
//! tag. Strategies only read a [`NavigationInput`] snapshot and hand back a
//! fresh list of directions for the session to consume one per tick.

use std::cmp::Reverse;
use std::collections::{HashMap, VecDeque};
use std::iter;

use crate::log_debug;
use super::grid::neighbors;
use super::search::{SearchGoal, SearchOutcome, Traversal, search};
use super::types::{Direction, FieldSize, NavigationMode, Point};

/// Heading used when the head has no admissible neighbor at all.
pub const BOXED_IN_DIRECTION: Direction = Direction::Down;

pub struct NavigationInput<'a> {
    pub snake: &'a VecDeque<Point>,
    pub food: Point,
    pub field_size: FieldSize,
    head: Point,
    segment_index: HashMap<Point, usize>,
}

impl<'a> NavigationInput<'a> {
    /// # Panics
    ///
    /// Panics if `snake` is empty; a session body always holds its head.
    pub fn new(snake: &'a VecDeque<Point>, food: Point, field_size: FieldSize) -> Self {
        let head = *snake.front().expect("Snake body should never be empty");
        let mut segment_index = HashMap::with_capacity(snake.len());
        for (index, segment) in snake.iter().enumerate() {
            segment_index.entry(*segment).or_insert(index);
        }
        Self {
            snake,
            food,
            field_size,
            head,
            segment_index,
        }
    }

    pub fn head(&self) -> Point {
        self.head
    }

    pub fn is_occupied(&self, cell: Point) -> bool {
        self.segment_index.contains_key(&cell)
    }

    /// Ticks until the segment covering `cell` leaves it, counted from the tail.
    pub fn ticks_until_vacated(&self, cell: Point) -> Option<usize> {
        self.segment_index
            .get(&cell)
            .map(|index| self.snake.len() - index)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NeighborFilter {
    /// Every occupied cell is an obstacle.
    AvoidBody,
    /// Occupied cells are admitted once the head could not reach them before
    /// the covering segment moves away.
    AvoidBodyUnlessVacated,
}

impl NeighborFilter {
    pub fn admits(&self, input: &NavigationInput<'_>, cell: Point) -> bool {
        match self {
            NeighborFilter::AvoidBody => !input.is_occupied(cell),
            NeighborFilter::AvoidBodyUnlessVacated => match input.ticks_until_vacated(cell) {
                None => true,
                Some(ticks) => input.head().manhattan_distance(cell) as usize >= ticks,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlanGoal {
    Food,
    /// Search the whole reachable component and follow the deepest node.
    DeepestCell,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchPlan {
    pub traversal: Traversal,
    pub filter: NeighborFilter,
    pub goal: PlanGoal,
}

const BFS_PLAN: SearchPlan = SearchPlan {
    traversal: Traversal::Fifo,
    filter: NeighborFilter::AvoidBody,
    goal: PlanGoal::Food,
};

/// Search configuration for each search-driven mode. `Manual` and
/// `Heuristic` do not run a search of their own.
pub fn search_plan(mode: NavigationMode) -> Option<SearchPlan> {
    match mode {
        NavigationMode::Manual | NavigationMode::Heuristic => None,
        NavigationMode::Bfs => Some(BFS_PLAN),
        NavigationMode::BfsManhattan => Some(SearchPlan {
            filter: NeighborFilter::AvoidBodyUnlessVacated,
            ..BFS_PLAN
        }),
        NavigationMode::Dfs => Some(SearchPlan {
            traversal: Traversal::Lifo,
            ..BFS_PLAN
        }),
        NavigationMode::LongestPath => Some(SearchPlan {
            goal: PlanGoal::DeepestCell,
            ..BFS_PLAN
        }),
    }
}

/// Plans the directions to follow from the current snapshot.
pub fn find(mode: NavigationMode, input: &NavigationInput<'_>) -> Vec<Direction> {
    match mode {
        NavigationMode::Manual => Vec::new(),
        NavigationMode::Heuristic => greedy_step(input),
        _ => match search_plan(mode) {
            Some(plan) => follow_plan(&plan, input),
            None => Vec::new(),
        },
    }
}

fn follow_plan(plan: &SearchPlan, input: &NavigationInput<'_>) -> Vec<Direction> {
    let head = input.head();
    let admissible = |cell: Point| plan.filter.admits(input, cell);

    let path = match plan.goal {
        PlanGoal::Food => search(
            head,
            SearchGoal::Cell(input.food),
            &input.field_size,
            plan.traversal,
            admissible,
        )
        .into_path(),
        PlanGoal::DeepestCell => deepest_path(search(
            head,
            SearchGoal::Exhaust,
            &input.field_size,
            plan.traversal,
            admissible,
        )),
    };

    match path {
        Some(path) if !path.is_empty() => {
            log_debug!("Path found: {} steps from {}", path.len(), head);
            directions_along(head, &path)
        }
        _ => {
            log_debug!("No path found from {}", head);
            fallback(plan.filter, input)
        }
    }
}

fn deepest_path(outcome: SearchOutcome) -> Option<Vec<Point>> {
    match outcome {
        SearchOutcome::Found(path) => Some(path),
        SearchOutcome::Exhausted { tree, mut visited } => {
            // Stable: among equally deep nodes the first expanded wins.
            visited.sort_by_key(|&index| Reverse(tree.node(index).depth));
            visited.first().map(|&index| tree.path_to(index))
        }
    }
}

/// One step along the axis that closes in on the food, vertical first.
/// Falls back to a single BFS step when that step runs into the body.
fn greedy_step(input: &NavigationInput<'_>) -> Vec<Direction> {
    let head = input.head();
    let dx = input.food.x - head.x;
    let dy = input.food.y - head.y;

    let step = if dy > 0 {
        Some(Direction::Down)
    } else if dy < 0 {
        Some(Direction::Up)
    } else if dx > 0 {
        Some(Direction::Right)
    } else if dx < 0 {
        Some(Direction::Left)
    } else {
        None
    };

    match step {
        Some(direction) if !input.is_occupied(head.step(direction)) => vec![direction],
        _ => {
            log_debug!("Greedy step from {} is blocked, escalating to BFS", head);
            follow_plan(&BFS_PLAN, input).into_iter().take(1).collect()
        }
    }
}

fn fallback(filter: NeighborFilter, input: &NavigationInput<'_>) -> Vec<Direction> {
    let head = input.head();
    match neighbors(head, &input.field_size)
        .into_iter()
        .find(|cell| filter.admits(input, *cell))
    {
        Some(cell) => vec![head.direction_to(cell)],
        None => vec![BOXED_IN_DIRECTION],
    }
}

/// Converts a node path into headings: head to the first node, then node to node.
pub fn directions_along(start: Point, path: &[Point]) -> Vec<Direction> {
    iter::once(start)
        .chain(path.iter().copied())
        .zip(path.iter().copied())
        .map(|(from, to)| from.direction_to(to))
        .collect()
}
