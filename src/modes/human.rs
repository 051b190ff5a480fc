use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use std::io::{Stderr, stderr};
use tokio::time::{Instant, interval, sleep_until};
use tracing::{info, warn};

use crate::game::{GameEvent, Session, TickResult};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

pub struct HumanMode {
    session: Session,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    /// Follow the terminal size instead of the configured grid
    fit_to_screen: bool,
    should_quit: bool,
    /// When the lose screen comes down
    teardown_at: Option<Instant>,
}

impl HumanMode {
    pub fn new(session: Session, fit_to_screen: bool) -> Self {
        Self {
            session,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            fit_to_screen,
            should_quit: false,
            teardown_at: None,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let result = self.start(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn start(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        if self.fit_to_screen {
            let size = terminal.size().context("Failed to read terminal size")?;
            let (rows, cols) = Renderer::grid_for_screen(Rect::new(0, 0, size.width, size.height))
                .context("Terminal is too small to play")?;
            self.session.handle(GameEvent::Resize { rows, cols })?;
            self.session.handle(GameEvent::Restart)?;
        }

        let state = self.session.state();
        info!(rows = state.rows(), cols = state.cols(), "game started");
        self.run_game_loop(terminal).await
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut tick_timer = interval(self.session.config().tick_interval());

        loop {
            let teardown_at = self.teardown_at;
            let linger = async move {
                match teardown_at {
                    Some(deadline) => sleep_until(deadline).await,
                    None => std::future::pending().await,
                }
            };

            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                        self.draw(terminal)?;
                    }
                }

                // Draw the current frame, then advance the game
                _ = tick_timer.tick() => {
                    self.draw(terminal)?;
                    if self.update_game()? {
                        self.draw(terminal)?;
                    }
                }

                // Lose screen has been up long enough
                _ = linger => {
                    info!("game over screen closed");
                    self.should_quit = true;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        self.metrics.update();
        let snapshot = self.session.snapshot();
        terminal
            .draw(|frame| {
                self.renderer.render(frame, &snapshot, &self.metrics);
            })
            .context("Failed to draw frame")?;
        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Key(key) => {
                // Only process key press events, not release
                if key.kind != KeyEventKind::Press {
                    return Ok(());
                }

                let action = self.input_handler.handle_key_event(key);
                if action == KeyAction::Quit {
                    self.should_quit = true;
                    return Ok(());
                }
                if let Some(event) = action.game_event() {
                    self.session.handle(event)?;
                }
                if action == KeyAction::Restart {
                    self.metrics.on_game_start();
                    self.teardown_at = None;
                }
            }
            Event::Resize(width, height) if self.fit_to_screen => {
                match Renderer::grid_for_screen(Rect::new(0, 0, width, height)) {
                    Ok((rows, cols)) => {
                        self.session.handle(GameEvent::Resize { rows, cols })?;
                    }
                    Err(err) => warn!(width, height, %err, "ignoring resize"),
                }
            }
            _ => {}
        }

        Ok(())
    }

    /// Run one tick if the game is still going. Returns true when it just ended.
    fn update_game(&mut self) -> Result<bool> {
        if !self.session.is_running() {
            return Ok(false);
        }

        let result = self.session.handle(GameEvent::Tick)?;
        if result != Some(TickResult::Collided) {
            return Ok(false);
        }

        let snapshot = self.session.snapshot();
        self.metrics.on_game_over(&snapshot);
        self.teardown_at = Some(Instant::now() + self.session.config().game_over_linger());
        info!(
            score = snapshot.score,
            high_score = self.metrics.high_score,
            games_played = self.metrics.games_played,
            "game over"
        );
        Ok(true)
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, GameConfig, GameEngine, GameState, Location, Snake};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn mode() -> HumanMode {
        HumanMode::new(Session::new(GameConfig::default()).unwrap(), false)
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_game_initialization() {
        let mode = mode();
        assert!(mode.session.is_running());
        assert_eq!(mode.session.state().score, 0);
        assert!(mode.teardown_at.is_none());
    }

    #[test]
    fn test_steer_key_reaches_queue() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Up)).unwrap();
        assert_eq!(mode.session.state().direction(), Direction::Up);
    }

    #[test]
    fn test_quit_key() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Char('q'))).unwrap();
        assert!(mode.should_quit);
    }

    #[test]
    fn test_resize_ignored_with_fixed_grid() {
        let mut mode = mode();
        mode.handle_event(Event::Resize(80, 24)).unwrap();
        assert_eq!(mode.session.state().rows(), 20);
        assert_eq!(mode.session.state().cols(), 20);
    }

    #[test]
    fn test_resize_followed_when_fitting() {
        let mut mode = HumanMode::new(Session::new(GameConfig::default()).unwrap(), true);
        mode.handle_event(Event::Resize(80, 24)).unwrap();
        assert_eq!(mode.session.state().rows(), 20);
        assert_eq!(mode.session.state().cols(), 39);

        // too small: keep the previous grid
        mode.handle_event(Event::Resize(2, 2)).unwrap();
        assert_eq!(mode.session.state().cols(), 39);
    }

    #[test]
    fn test_game_over_schedules_teardown() {
        let config = GameConfig::small();
        let snake = Snake::from_segments([
            Location::new(0, 2),
            Location::new(0, 1),
            Location::new(0, 0),
        ])
        .unwrap();
        let state = GameState::new(snake, Location::new(4, 4), 5, 5).unwrap();
        let engine = GameEngine::new(config).unwrap();
        let mut mode = HumanMode::new(Session::from_state(engine, state), false);

        // heading right from (0,0) runs into (0,1)
        assert!(mode.update_game().unwrap());
        assert!(!mode.session.is_running());
        assert!(mode.teardown_at.is_some());
        assert_eq!(mode.metrics.games_played, 1);

        // no further ticks once the game is over
        assert!(!mode.update_game().unwrap());
        assert_eq!(mode.metrics.games_played, 1);
    }

    #[test]
    fn test_game_reset() {
        let mut mode = mode();
        mode.teardown_at = Some(Instant::now());
        mode.handle_event(key(KeyCode::Char('r'))).unwrap();
        assert_eq!(mode.session.state().score, 0);
        assert!(mode.session.is_running());
        assert!(mode.teardown_at.is_none());
    }
}
