use autosnek_common::games::snake::{FieldSize, GameState, NavigationMode, Point, SessionSnapshot};

const HEAD: char = '@';
const BODY: char = 'o';
const FOOD: char = '*';
const EMPTY: char = ' ';
const WALL: char = '#';

pub fn options_list() -> Vec<String> {
    let mut options = vec!["Options:".to_string(), "F: Fast".to_string()];
    for mode in NavigationMode::ALL {
        if let Some(key) = mode.matching_key() {
            options.push(format!("{}: {}", key.to_ascii_uppercase(), mode.full_description()));
        }
    }
    options
}

fn state_message(state: GameState) -> Option<&'static str> {
    match state {
        GameState::Init => Some("Welcome to Snek! Press Space to play"),
        GameState::Paused => Some("Paused"),
        GameState::Fail => Some("Game Over, Press Space to restart"),
        GameState::Live => None,
    }
}

pub fn render_frame(snapshot: &SessionSnapshot, field_size: FieldSize) -> String {
    let mut rows = vec![vec![EMPTY; field_size.width]; field_size.height];
    let mut put = |point: Point, cell: char| {
        if field_size.contains(point) {
            rows[point.y as usize][point.x as usize] = cell;
        }
    };
    put(snapshot.food, FOOD);
    for (index, point) in snapshot.snake.iter().enumerate().rev() {
        put(*point, if index == 0 { HEAD } else { BODY });
    }

    let border: String = std::iter::repeat_n(WALL, field_size.width + 2).collect();
    let mut lines = Vec::with_capacity(field_size.height + 6);
    lines.push(format!("Score: {}  Tick: {}", snapshot.score, snapshot.tick));
    lines.extend(snapshot.statuses.iter().cloned());
    lines.push(border.clone());
    for row in rows {
        lines.push(format!("{WALL}{}{WALL}", row.into_iter().collect::<String>()));
    }
    lines.push(border);
    if let Some(message) = state_message(snapshot.state) {
        lines.push(message.to_string());
    }
    if snapshot.state == GameState::Paused {
        lines.extend(options_list());
    }
    lines.join("\n")
}
