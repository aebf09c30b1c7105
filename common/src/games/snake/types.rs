use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn manhattan_distance(self, other: Point) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Direction of a single step from `self` towards an adjacent `target`.
    /// Horizontal differences win over vertical ones; equal points yield `Down`.
    pub fn direction_to(self, target: Point) -> Direction {
        if target.x > self.x {
            Direction::Right
        } else if target.x < self.x {
            Direction::Left
        } else if target.y > self.y {
            Direction::Down
        } else if target.y < self.y {
            Direction::Up
        } else {
            Direction::Down
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_opposite(&self, other: &Direction) -> bool {
        self.opposite() == *other
    }

    /// Unit delta with the y axis growing downwards.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    Init,
    Live,
    Paused,
    Fail,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TickSpeed {
    #[default]
    Default,
    Fast,
}

impl TickSpeed {
    pub fn toggled(self) -> TickSpeed {
        match self {
            TickSpeed::Default => TickSpeed::Fast,
            TickSpeed::Fast => TickSpeed::Default,
        }
    }
}

/// What the external tick source should do after a session step or command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickSignal {
    Run(TickSpeed),
    Halt,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NavigationMode {
    #[default]
    Manual,
    Bfs,
    BfsManhattan,
    Dfs,
    Heuristic,
    LongestPath,
}

impl NavigationMode {
    pub const ALL: [NavigationMode; 6] = [
        NavigationMode::Manual,
        NavigationMode::Bfs,
        NavigationMode::BfsManhattan,
        NavigationMode::Dfs,
        NavigationMode::Heuristic,
        NavigationMode::LongestPath,
    ];

    pub fn state_name(&self) -> &'static str {
        match self {
            NavigationMode::Manual => "Manual",
            NavigationMode::Bfs => "BFS",
            NavigationMode::BfsManhattan => "BFS with Manhattan",
            NavigationMode::Dfs => "DFS",
            NavigationMode::Heuristic => "Heuristic",
            NavigationMode::LongestPath => "Longest path",
        }
    }

    pub fn full_description(&self) -> &'static str {
        match self {
            NavigationMode::Manual => "Manual",
            NavigationMode::Bfs => "Breadth First Search",
            NavigationMode::BfsManhattan => {
                "Breadth First Search, with Manhattan distances, ignoring tail"
            }
            NavigationMode::Dfs => "Depth First Search",
            NavigationMode::Heuristic => "Greedy step towards food, BFS when blocked",
            NavigationMode::LongestPath => "Follow the deepest reachable cell",
        }
    }

    /// Input key selecting this mode; `Manual` has none.
    pub fn matching_key(&self) -> Option<char> {
        match self {
            NavigationMode::Manual => None,
            NavigationMode::Bfs => Some('b'),
            NavigationMode::BfsManhattan => Some('m'),
            NavigationMode::Dfs => Some('d'),
            NavigationMode::Heuristic => Some('h'),
            NavigationMode::LongestPath => Some('l'),
        }
    }

    pub fn for_key(key: char) -> Option<NavigationMode> {
        let key = key.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|mode| mode.matching_key() == Some(key))
    }

    pub fn is_manual(&self) -> bool {
        matches!(self, NavigationMode::Manual)
    }
}

impl fmt::Display for NavigationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.state_name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSize {
    pub width: usize,
    pub height: usize,
}

impl FieldSize {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.width
            && (point.y as usize) < self.height
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }
}
