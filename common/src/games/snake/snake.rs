use std::collections::VecDeque;

use super::types::{Direction, Point};

/// Snake body, head first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    pub body: VecDeque<Point>,
}

impl Snake {
    /// Lays out `length` segments with the head at `head`, trailing away from
    /// `direction`.
    pub fn new(head: Point, length: usize, direction: Direction) -> Self {
        let behind = direction.opposite();
        let mut body = VecDeque::with_capacity(length.max(1));
        let mut segment = head;
        body.push_back(segment);
        for _ in 1..length {
            segment = segment.step(behind);
            body.push_back(segment);
        }
        Self { body }
    }

    pub fn head(&self) -> Point {
        *self.body.front().expect("Snake body should never be empty")
    }

    pub(crate) fn len(&self) -> usize {
        self.body.len()
    }

    pub fn occupies(&self, point: Point) -> bool {
        self.body.contains(&point)
    }

    /// Translates the snake one cell along `direction` and returns the cell
    /// the tail left behind.
    pub fn advance(&mut self, direction: Direction) -> Point {
        let next_head = self.head().step(direction);
        self.body.push_front(next_head);
        self.body
            .pop_back()
            .expect("Snake body should never be empty")
    }

    /// Re-attaches the cell returned by [`Snake::advance`].
    pub fn grow(&mut self, vacated: Point) {
        self.body.push_back(vacated);
    }

    pub fn head_overlaps_body(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }
}
