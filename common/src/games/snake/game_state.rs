use std::collections::VecDeque;

use crate::config::Validate;
use crate::games::SessionRng;
use crate::{log, log_debug};
use super::command::SessionCommand;
use super::navigation::{self, NavigationInput};
use super::settings::SnakeSessionSettings;
use super::snake::Snake;
use super::types::{Direction, FieldSize, GameState, NavigationMode, Point, TickSignal, TickSpeed};

pub const STARTING_DIRECTION: Direction = Direction::Right;

/// Read-only view of a session taken after a step.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionSnapshot {
    pub state: GameState,
    pub snake: Vec<Point>,
    pub food: Point,
    pub direction: Direction,
    pub navigation: NavigationMode,
    pub statuses: Vec<String>,
    pub score: u32,
    pub tick: u64,
}

#[derive(Clone, Debug)]
pub struct SnakeGameState {
    settings: SnakeSessionSettings,
    field_size: FieldSize,
    snake: Snake,
    food: Point,
    direction: Direction,
    state: GameState,
    navigation: NavigationMode,
    path_to_follow: VecDeque<Direction>,
    speed: TickSpeed,
    score: u32,
    tick: u64,
}

impl SnakeGameState {
    pub fn new(settings: SnakeSessionSettings, rng: &mut SessionRng) -> Result<Self, String> {
        settings.validate()?;

        let field_size = settings.field_size();
        let start = settings.start();
        let mut game_state = Self {
            snake: Snake::new(start, settings.starting_length, STARTING_DIRECTION),
            food: start,
            direction: STARTING_DIRECTION,
            state: GameState::Init,
            navigation: settings.navigation,
            path_to_follow: VecDeque::new(),
            speed: TickSpeed::Default,
            score: 0,
            tick: 0,
            field_size,
            settings,
        };
        game_state.init_game(rng);
        Ok(game_state)
    }

    fn init_game(&mut self, rng: &mut SessionRng) {
        self.direction = STARTING_DIRECTION;
        self.path_to_follow.clear();
        self.snake = Snake::new(
            self.settings.start(),
            self.settings.starting_length,
            STARTING_DIRECTION,
        );
        self.score = 0;
        self.tick = 0;
        if !self.relocate_food(rng) {
            self.state = GameState::Fail;
        }
    }

    /// Moves the food to a random free cell. Returns `false` when the snake
    /// covers the whole field and no such cell exists.
    fn relocate_food(&mut self, rng: &mut SessionRng) -> bool {
        if self.snake.len() >= self.field_size.cell_count() {
            return false;
        }

        loop {
            let candidate = Point::new(
                rng.random_range(0..self.field_size.width as i32),
                rng.random_range(0..self.field_size.height as i32),
            );
            if !self.snake.occupies(candidate) {
                self.food = candidate;
                log_debug!("Food placed at {}", candidate);
                return true;
            }
        }
    }

    /// Applies one simulation step. Does nothing unless the session is live.
    pub fn tick(&mut self, rng: &mut SessionRng) -> TickSignal {
        if self.state != GameState::Live {
            return self.tick_signal();
        }
        self.tick += 1;

        if !self.navigation.is_manual() && self.path_to_follow.is_empty() {
            let input = NavigationInput::new(&self.snake.body, self.food, self.field_size);
            self.path_to_follow = navigation::find(self.navigation, &input).into();
        }
        if let Some(next) = self.path_to_follow.pop_front() {
            self.direction = next;
        }

        let vacated = self.snake.advance(self.direction);

        if self.snake.head() == self.food {
            self.snake.grow(vacated);
            self.score += 1;
            log!(
                "Ate food at {}. Length: {}, score: {}",
                self.food,
                self.snake.len(),
                self.score
            );
            if !self.relocate_food(rng) {
                log!("Field is full, no cell left for food");
                self.state = GameState::Fail;
            }
        }

        let head = self.snake.head();
        if self.snake.head_overlaps_body() {
            log!("Game over: ran into own body at {} on tick {}", head, self.tick);
            self.state = GameState::Fail;
        } else if !self.field_size.contains(head) {
            log!("Game over: left the field at {} on tick {}", head, self.tick);
            self.state = GameState::Fail;
        }

        self.tick_signal()
    }

    pub fn apply_command(&mut self, command: SessionCommand, rng: &mut SessionRng) -> TickSignal {
        match command {
            SessionCommand::SetHeading(direction) => {
                if !direction.is_opposite(&self.direction) {
                    self.direction = direction;
                }
            }
            SessionCommand::TogglePause => match self.state {
                GameState::Live => self.state = GameState::Paused,
                GameState::Paused => self.state = GameState::Live,
                GameState::Init | GameState::Fail => self.restart(rng),
            },
            SessionCommand::ToggleMode(mode) => {
                self.navigation = if self.navigation == mode {
                    NavigationMode::Manual
                } else {
                    mode
                };
                self.path_to_follow.clear();
                log!("Navigation mode: {}", self.navigation);
            }
            SessionCommand::ToggleSpeed => self.speed = self.speed.toggled(),
            SessionCommand::Restart => self.restart(rng),
        }
        self.tick_signal()
    }

    fn restart(&mut self, rng: &mut SessionRng) {
        self.state = GameState::Live;
        self.init_game(rng);
        log!(
            "Game started on a {}x{} field, food at {}",
            self.field_size.width,
            self.field_size.height,
            self.food
        );
    }

    pub fn tick_signal(&self) -> TickSignal {
        match self.state {
            GameState::Live => TickSignal::Run(self.speed),
            GameState::Init | GameState::Paused | GameState::Fail => TickSignal::Halt,
        }
    }

    /// Human-readable flags: the active autopilot and the fast rate.
    pub fn statuses(&self) -> Vec<String> {
        let mut statuses = Vec::new();
        if !self.navigation.is_manual() {
            statuses.push(format!("AutoSnek: {}", self.navigation.state_name()));
        }
        if self.speed == TickSpeed::Fast {
            statuses.push("Fast".to_string());
        }
        statuses
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state,
            snake: self.snake.body.iter().copied().collect(),
            food: self.food,
            direction: self.direction,
            navigation: self.navigation,
            statuses: self.statuses(),
            score: self.score,
            tick: self.tick,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Point {
        self.food
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn navigation(&self) -> NavigationMode {
        self.navigation
    }

    pub fn speed(&self) -> TickSpeed {
        self.speed
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn field_size(&self) -> FieldSize {
        self.field_size
    }

    #[cfg(test)]
    fn set_food(&mut self, food: Point) {
        self.food = food;
    }

    #[cfg(test)]
    fn set_snake(&mut self, snake: Snake) {
        self.snake = snake;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_state(settings: SnakeSessionSettings) -> (SnakeGameState, SessionRng) {
        let mut rng = SessionRng::new(42);
        let state = SnakeGameState::new(settings, &mut rng).unwrap();
        (state, rng)
    }

    fn create_live_state() -> (SnakeGameState, SessionRng) {
        let (mut state, mut rng) = create_state(SnakeSessionSettings::default());
        state.apply_command(SessionCommand::Restart, &mut rng);
        (state, rng)
    }

    #[test]
    fn test_new_starts_in_init_with_seeded_snake() {
        let (state, _) = create_state(SnakeSessionSettings::default());
        assert_eq!(state.state(), GameState::Init);
        assert_eq!(state.direction(), Direction::Right);
        let expected: Vec<Point> = (1..=5).rev().map(|x| Point::new(x, 5)).collect();
        assert_eq!(state.snapshot().snake, expected);
        assert!(!state.snake().occupies(state.food()));
        assert!(state.field_size().contains(state.food()));
    }

    #[test]
    fn test_new_rejects_invalid_settings() {
        let mut rng = SessionRng::new(1);
        let settings = SnakeSessionSettings {
            field_width: 2,
            ..SnakeSessionSettings::default()
        };
        assert!(SnakeGameState::new(settings, &mut rng).is_err());
    }

    #[test]
    fn test_tick_does_nothing_before_start() {
        let (mut state, mut rng) = create_state(SnakeSessionSettings::default());
        let before = state.snapshot();
        assert_eq!(state.tick(&mut rng), TickSignal::Halt);
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_eating_food_grows_and_relocates() {
        let (mut state, mut rng) = create_live_state();
        state.set_food(Point::new(6, 5));

        assert_eq!(state.tick(&mut rng), TickSignal::Run(TickSpeed::Default));

        let snapshot = state.snapshot();
        assert_eq!(snapshot.state, GameState::Live);
        assert_eq!(snapshot.snake.len(), 6);
        assert_eq!(snapshot.snake[0], Point::new(6, 5));
        assert_eq!(*snapshot.snake.last().unwrap(), Point::new(1, 5));
        assert_eq!(snapshot.score, 1);
        assert!(!snapshot.snake.contains(&snapshot.food));
    }

    #[test]
    fn test_move_without_food_translates_snake() {
        let (mut state, mut rng) = create_live_state();
        state.set_food(Point::new(40, 40));
        let before = state.snapshot().snake;

        state.tick(&mut rng);

        let after = state.snapshot().snake;
        assert_eq!(after.len(), before.len());
        assert_eq!(after[0], Point::new(6, 5));
        assert_eq!(&after[1..], &before[..before.len() - 1]);
    }

    #[test]
    fn test_leaving_right_edge_fails() {
        let settings = SnakeSessionSettings {
            start_x: 49,
            ..SnakeSessionSettings::default()
        };
        let (mut state, mut rng) = create_state(settings);
        state.apply_command(SessionCommand::Restart, &mut rng);

        assert_eq!(state.tick(&mut rng), TickSignal::Halt);
        assert_eq!(state.state(), GameState::Fail);
        assert_eq!(state.snake().head(), Point::new(50, 5));
    }

    #[test]
    fn test_running_into_body_fails() {
        let (mut state, mut rng) = create_live_state();
        state.set_food(Point::new(40, 40));
        for direction in [Direction::Down, Direction::Left, Direction::Up] {
            state.apply_command(SessionCommand::SetHeading(direction), &mut rng);
            state.tick(&mut rng);
        }
        assert_eq!(state.state(), GameState::Fail);
        assert!(state.snake().head_overlaps_body());
    }

    #[test]
    fn test_reverse_heading_is_rejected() {
        let (mut state, mut rng) = create_live_state();
        state.apply_command(SessionCommand::SetHeading(Direction::Left), &mut rng);
        assert_eq!(state.direction(), Direction::Right);
        state.apply_command(SessionCommand::SetHeading(Direction::Up), &mut rng);
        assert_eq!(state.direction(), Direction::Up);
    }

    #[test]
    fn test_pause_toggles_and_halts_ticks() {
        let (mut state, mut rng) = create_state(SnakeSessionSettings::default());
        assert_eq!(
            state.apply_command(SessionCommand::TogglePause, &mut rng),
            TickSignal::Run(TickSpeed::Default)
        );
        assert_eq!(state.state(), GameState::Live);

        assert_eq!(
            state.apply_command(SessionCommand::TogglePause, &mut rng),
            TickSignal::Halt
        );
        assert_eq!(state.state(), GameState::Paused);
        let before = state.snapshot();
        state.tick(&mut rng);
        assert_eq!(state.snapshot(), before);

        state.apply_command(SessionCommand::TogglePause, &mut rng);
        assert_eq!(state.state(), GameState::Live);
    }

    #[test]
    fn test_restart_after_failure_reinitializes() {
        let settings = SnakeSessionSettings {
            start_x: 49,
            ..SnakeSessionSettings::default()
        };
        let (mut state, mut rng) = create_state(settings);
        state.apply_command(SessionCommand::Restart, &mut rng);
        state.tick(&mut rng);
        assert_eq!(state.state(), GameState::Fail);

        state.apply_command(SessionCommand::TogglePause, &mut rng);
        assert_eq!(state.state(), GameState::Live);
        assert_eq!(state.snake().head(), Point::new(49, 5));
        assert_eq!(state.snake().len(), 5);
        assert_eq!(state.direction(), Direction::Right);
        assert_eq!(state.snapshot().tick, 0);
    }

    #[test]
    fn test_toggle_mode_twice_returns_to_manual() {
        let (mut state, mut rng) = create_live_state();
        state.apply_command(SessionCommand::ToggleMode(NavigationMode::Bfs), &mut rng);
        assert_eq!(state.navigation(), NavigationMode::Bfs);
        assert_eq!(state.statuses(), vec!["AutoSnek: BFS".to_string()]);

        state.apply_command(SessionCommand::ToggleMode(NavigationMode::Dfs), &mut rng);
        assert_eq!(state.navigation(), NavigationMode::Dfs);

        state.apply_command(SessionCommand::ToggleMode(NavigationMode::Dfs), &mut rng);
        assert_eq!(state.navigation(), NavigationMode::Manual);
        assert!(state.statuses().is_empty());
    }

    #[test]
    fn test_toggle_speed_changes_signal_and_status() {
        let (mut state, mut rng) = create_live_state();
        assert_eq!(
            state.apply_command(SessionCommand::ToggleSpeed, &mut rng),
            TickSignal::Run(TickSpeed::Fast)
        );
        assert_eq!(state.statuses(), vec!["Fast".to_string()]);
        state.apply_command(SessionCommand::ToggleSpeed, &mut rng);
        assert_eq!(state.speed(), TickSpeed::Default);
    }

    #[test]
    fn test_full_field_cannot_place_food() {
        let settings = SnakeSessionSettings {
            field_width: 5,
            field_height: 5,
            start_x: 4,
            start_y: 0,
            ..SnakeSessionSettings::default()
        };
        let (mut state, mut rng) = create_state(settings);
        let mut body = VecDeque::new();
        for y in 0..5 {
            for x in 0..5 {
                let x = if y % 2 == 0 { 4 - x } else { x };
                body.push_back(Point::new(x, y));
            }
        }
        state.set_snake(Snake { body });
        assert!(!state.relocate_food(&mut rng));
    }

    #[test]
    fn test_autopilot_preserves_movement_and_food_invariants() {
        let settings = SnakeSessionSettings {
            field_width: 12,
            field_height: 10,
            navigation: NavigationMode::Bfs,
            ..SnakeSessionSettings::default()
        };
        for mode in NavigationMode::ALL {
            let (mut state, mut rng) = create_state(settings.clone());
            state.apply_command(SessionCommand::Restart, &mut rng);
            if state.navigation() != mode {
                state.apply_command(SessionCommand::ToggleMode(mode), &mut rng);
            }

            for _ in 0..400 {
                if state.state() == GameState::Fail {
                    state.apply_command(SessionCommand::Restart, &mut rng);
                }
                if mode.is_manual() {
                    let turn = Direction::ALL[rng.random_range(0..4usize)];
                    state.apply_command(SessionCommand::SetHeading(turn), &mut rng);
                }
                let before = state.snapshot();
                state.tick(&mut rng);
                let after = state.snapshot();

                if after.state == GameState::Fail {
                    continue;
                }
                let grew = after.score == before.score + 1;
                assert!(grew || after.score == before.score);
                let expected_len = before.snake.len() + usize::from(grew);
                assert_eq!(after.snake.len(), expected_len, "{mode}");
                assert_eq!(after.snake[0], before.snake[0].step(after.direction));
                let kept = before.snake.len();
                assert_eq!(&after.snake[1..kept], &before.snake[..kept - 1]);
                assert!(!after.snake.contains(&after.food), "{mode}");
            }
        }
    }

    #[test]
    fn test_bfs_autopilot_eats() {
        let settings = SnakeSessionSettings {
            field_width: 20,
            field_height: 20,
            navigation: NavigationMode::Bfs,
            ..SnakeSessionSettings::default()
        };
        let (mut state, mut rng) = create_state(settings);
        state.apply_command(SessionCommand::Restart, &mut rng);
        for _ in 0..200 {
            state.tick(&mut rng);
        }
        assert!(state.score() > 0);
    }
}
