mod command;
mod game_state;
pub mod grid;
pub mod navigation;
pub mod search;
mod settings;
mod snake;
mod types;

pub use command::SessionCommand;
pub use game_state::{STARTING_DIRECTION, SessionSnapshot, SnakeGameState};
pub use navigation::{NavigationInput, NeighborFilter, find};
pub use settings::SnakeSessionSettings;
pub use snake::Snake;
pub use types::{
    Direction, FieldSize, GameState, NavigationMode, Point, TickSignal, TickSpeed,
};
