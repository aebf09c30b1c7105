use autosnek_common::games::SessionRng;
use autosnek_common::games::snake::{GameState, SessionCommand, SnakeGameState, TickSignal};
use autosnek_common::log;
use tokio::sync::mpsc;
use tokio::time::{Interval, MissedTickBehavior};

use crate::config::RunnerConfig;
use crate::input::RunnerCommand;
use crate::render::render_frame;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub games: u32,
    pub best_score: u32,
}

fn build_timer(signal: TickSignal, config: &RunnerConfig) -> Option<Interval> {
    match signal {
        TickSignal::Run(speed) => {
            let mut timer = tokio::time::interval(config.tick_interval(speed));
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            Some(timer)
        }
        TickSignal::Halt => None,
    }
}

async fn next_tick(timer: &mut Option<Interval>) {
    match timer {
        Some(timer) => {
            timer.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

fn starts_game(command: SessionCommand, state: GameState) -> bool {
    match command {
        SessionCommand::Restart => true,
        SessionCommand::TogglePause => matches!(state, GameState::Init | GameState::Fail),
        _ => false,
    }
}

fn draw(session: &SnakeGameState, config: &RunnerConfig) {
    if config.render {
        println!("{}\n", render_frame(&session.snapshot(), session.field_size()));
    }
}

/// Drives the session until quit, ctrl-c, the tick limit, or until input is
/// gone while nothing is scheduled.
pub async fn run_session(
    mut session: SnakeGameState,
    mut rng: SessionRng,
    config: &RunnerConfig,
    command_rx: &mut mpsc::UnboundedReceiver<RunnerCommand>,
    max_ticks: Option<u64>,
) -> RunSummary {
    let mut summary = RunSummary::default();
    if config.autostart {
        session.apply_command(SessionCommand::TogglePause, &mut rng);
        summary.games += 1;
    }

    let mut signal = session.tick_signal();
    let mut timer = build_timer(signal, config);
    let mut input_open = true;
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);
    draw(&session, config);

    loop {
        let previous = signal;
        tokio::select! {
            _ = next_tick(&mut timer) => {
                signal = session.tick(&mut rng);
                summary.ticks += 1;
                summary.best_score = summary.best_score.max(session.score());
                draw(&session, config);

                if session.state() == GameState::Fail {
                    log!("Game {} over, score {}", summary.games, session.score());
                    if config.auto_restart {
                        signal = session.apply_command(SessionCommand::Restart, &mut rng);
                        summary.games += 1;
                    }
                }
                if max_ticks.is_some_and(|max| summary.ticks >= max) {
                    log!("Tick limit of {} reached", summary.ticks);
                    break;
                }
            }
            command = command_rx.recv(), if input_open => match command {
                Some(RunnerCommand::Session(command)) => {
                    if starts_game(command, session.state()) {
                        summary.games += 1;
                    }
                    signal = session.apply_command(command, &mut rng);
                    draw(&session, config);
                }
                Some(RunnerCommand::Quit) => {
                    log!("Quit requested");
                    break;
                }
                None => input_open = false,
            },
            _ = &mut shutdown => {
                log!("Shutdown signal received");
                break;
            }
        }

        if !input_open && signal == TickSignal::Halt {
            break;
        }
        if signal != previous {
            timer = build_timer(signal, config);
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use autosnek_common::games::snake::{NavigationMode, SnakeSessionSettings};

    fn autopilot_config(auto_restart: bool) -> RunnerConfig {
        RunnerConfig {
            session: SnakeSessionSettings {
                field_width: 10,
                field_height: 10,
                navigation: NavigationMode::Bfs,
                ..SnakeSessionSettings::default()
            },
            default_tick_interval_ms: 1,
            fast_tick_interval_ms: 1,
            auto_restart,
            ..RunnerConfig::default()
        }
    }

    #[tokio::test]
    async fn test_run_stops_at_tick_limit() {
        let config = autopilot_config(true);
        let mut rng = SessionRng::new(11);
        let session = SnakeGameState::new(config.session.clone(), &mut rng).unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();
        drop(tx);

        let summary = run_session(session, rng, &config, &mut rx, Some(40)).await;
        assert_eq!(summary.ticks, 40);
        assert!(summary.games >= 1);
    }

    #[tokio::test]
    async fn test_quit_command_ends_halted_session() {
        let config = RunnerConfig {
            autostart: false,
            ..autopilot_config(false)
        };
        let mut rng = SessionRng::new(5);
        let session = SnakeGameState::new(config.session.clone(), &mut rng).unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send(RunnerCommand::Quit).unwrap();

        let summary = run_session(session, rng, &config, &mut rx, None).await;
        assert_eq!(summary, RunSummary::default());
    }

    #[tokio::test]
    async fn test_closed_input_ends_after_game_over() {
        let mut config = autopilot_config(false);
        config.session.navigation = NavigationMode::Manual;
        let mut rng = SessionRng::new(3);
        let session = SnakeGameState::new(config.session.clone(), &mut rng).unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();
        drop(tx);

        // Manual heading Right from (5,5) leaves a 10-wide field on the fifth tick.
        let summary = run_session(session, rng, &config, &mut rx, Some(1000)).await;
        assert_eq!(summary.games, 1);
        assert_eq!(summary.ticks, 5);
    }

    #[test]
    fn test_starts_game_only_from_idle_states() {
        assert!(starts_game(SessionCommand::TogglePause, GameState::Init));
        assert!(starts_game(SessionCommand::TogglePause, GameState::Fail));
        assert!(!starts_game(SessionCommand::TogglePause, GameState::Live));
        assert!(starts_game(SessionCommand::Restart, GameState::Paused));
    }
}
