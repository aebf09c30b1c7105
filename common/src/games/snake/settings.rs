use serde::{Deserialize, Serialize};

use crate::config::{Validate, check_range};
use super::types::{FieldSize, NavigationMode, Point};

pub const MIN_FIELD_SIZE: usize = 5;
pub const MAX_FIELD_SIZE: usize = 500;
pub const MIN_STARTING_LENGTH: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeSessionSettings {
    pub field_width: usize,
    pub field_height: usize,
    /// Number of segments, head included.
    pub starting_length: usize,
    pub start_x: i32,
    pub start_y: i32,
    pub navigation: NavigationMode,
}

impl SnakeSessionSettings {
    pub fn field_size(&self) -> FieldSize {
        FieldSize::new(self.field_width, self.field_height)
    }

    pub fn start(&self) -> Point {
        Point::new(self.start_x, self.start_y)
    }
}

impl Default for SnakeSessionSettings {
    fn default() -> Self {
        Self {
            field_width: 50,
            field_height: 50,
            starting_length: 5,
            start_x: 5,
            start_y: 5,
            navigation: NavigationMode::Manual,
        }
    }
}

impl Validate for SnakeSessionSettings {
    fn validate(&self) -> Result<(), String> {
        check_range("field_width", self.field_width, MIN_FIELD_SIZE, MAX_FIELD_SIZE)?;
        check_range("field_height", self.field_height, MIN_FIELD_SIZE, MAX_FIELD_SIZE)?;
        check_range(
            "starting_length",
            self.starting_length,
            MIN_STARTING_LENGTH,
            self.field_width,
        )?;

        // The body trails to the left of the head.
        let field = self.field_size();
        let tail = Point::new(self.start_x - (self.starting_length as i32 - 1), self.start_y);
        if !field.contains(self.start()) || !field.contains(tail) {
            return Err(format!(
                "starting snake from {} to {} does not fit in a {}x{} field",
                self.start(),
                tail,
                self.field_width,
                self.field_height
            ));
        }
        Ok(())
    }
}
