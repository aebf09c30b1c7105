use super::types::{Direction, FieldSize, Point};

/// In-bounds 4-connected neighbors of `point`, in `Direction::ALL` order.
pub fn neighbors(point: Point, field_size: &FieldSize) -> Vec<Point> {
    Direction::ALL
        .into_iter()
        .map(|direction| point.step(direction))
        .filter(|candidate| field_size.contains(*candidate))
        .collect()
}
