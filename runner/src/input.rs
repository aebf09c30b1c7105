//! Text input translation. Each line typed on stdin becomes zero or more
//! commands: whole words first, otherwise one command per key.

use autosnek_common::games::snake::{Direction, NavigationMode, SessionCommand};
use std::io::BufRead;

use tokio::sync::mpsc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunnerCommand {
    Session(SessionCommand),
    Quit,
}

const ARROW_KEYS: [(&str, Direction); 4] = [
    ("\x1b[A", Direction::Up),
    ("\x1b[B", Direction::Down),
    ("\x1b[C", Direction::Right),
    ("\x1b[D", Direction::Left),
];

fn parse_word(word: &str) -> Option<RunnerCommand> {
    let command = match word {
        "up" => SessionCommand::SetHeading(Direction::Up),
        "down" => SessionCommand::SetHeading(Direction::Down),
        "left" => SessionCommand::SetHeading(Direction::Left),
        "right" => SessionCommand::SetHeading(Direction::Right),
        "pause" => SessionCommand::TogglePause,
        "fast" => SessionCommand::ToggleSpeed,
        "restart" => SessionCommand::Restart,
        "quit" | "exit" => return Some(RunnerCommand::Quit),
        _ => return None,
    };
    Some(RunnerCommand::Session(command))
}

pub fn parse_key(key: char) -> Option<RunnerCommand> {
    let command = match key.to_ascii_lowercase() {
        ' ' | 'p' => SessionCommand::TogglePause,
        'f' => SessionCommand::ToggleSpeed,
        'r' => SessionCommand::Restart,
        'q' => return Some(RunnerCommand::Quit),
        other => SessionCommand::ToggleMode(NavigationMode::for_key(other)?),
    };
    Some(RunnerCommand::Session(command))
}

pub fn parse_line(line: &str) -> Vec<RunnerCommand> {
    let line = line.trim_end_matches(['\r', '\n']);
    if let Some(command) = parse_word(&line.trim().to_ascii_lowercase()) {
        return vec![command];
    }

    let mut commands = Vec::new();
    let mut rest = line;
    while let Some(key) = rest.chars().next() {
        if let Some((sequence, direction)) = ARROW_KEYS
            .iter()
            .find(|(sequence, _)| rest.starts_with(sequence))
        {
            commands.push(RunnerCommand::Session(SessionCommand::SetHeading(*direction)));
            rest = &rest[sequence.len()..];
            continue;
        }
        commands.extend(parse_key(key));
        rest = &rest[key.len_utf8()..];
    }
    commands
}

/// Forwards parsed stdin lines until input closes or the receiver goes away.
/// Runs on a plain thread so a pending read never holds up runtime shutdown.
pub fn read_commands(tx: mpsc::UnboundedSender<RunnerCommand>) {
    for line in std::io::stdin().lock().lines() {
        let Ok(line) = line else {
            return;
        };
        for command in parse_line(&line) {
            if tx.send(command).is_err() {
                return;
            }
        }
    }
}
