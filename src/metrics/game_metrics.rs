//! In-memory statistics for one run of the program. Nothing is saved.

use std::time::{Duration, Instant};

use crate::game::Snapshot;

pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub longest_snake: usize,
    pub games_played: u32,
    clock_running: bool,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            longest_snake: 0,
            games_played: 0,
            clock_running: true,
        }
    }

    /// Refresh the game clock; it stops once the game is over
    pub fn update(&mut self) {
        if self.clock_running {
            self.elapsed_time = self.start_time.elapsed();
        }
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.clock_running = true;
    }

    pub fn on_game_over(&mut self, last: &Snapshot) {
        self.update();
        self.clock_running = false;
        self.games_played += 1;
        self.high_score = self.high_score.max(last.score);
        self.longest_snake = self.longest_snake.max(last.snake.len());
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Location;

    fn finished(score: u32, length: usize) -> Snapshot {
        Snapshot {
            rows: 10,
            cols: 10,
            snake: (0..length).map(|col| Location::new(0, col)).collect(),
            food: Location::new(5, 5),
            score,
            steps: 0,
            running: false,
        }
    }

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_high_score_tracking() {
        let mut metrics = GameMetrics::new();

        metrics.on_game_over(&finished(9, 4));
        assert_eq!(metrics.high_score, 9);
        assert_eq!(metrics.longest_snake, 4);
        assert_eq!(metrics.games_played, 1);

        metrics.on_game_over(&finished(3, 2));
        assert_eq!(metrics.high_score, 9); // Should not decrease
        assert_eq!(metrics.longest_snake, 4);
        assert_eq!(metrics.games_played, 2);

        metrics.on_game_over(&finished(15, 6));
        assert_eq!(metrics.high_score, 15);
        assert_eq!(metrics.longest_snake, 6);
        assert_eq!(metrics.games_played, 3);
    }

    #[test]
    fn test_clock_stops_on_game_over() {
        let mut metrics = GameMetrics::new();
        metrics.on_game_over(&finished(0, 1));
        let frozen = metrics.elapsed_time;

        std::thread::sleep(Duration::from_millis(20));
        metrics.update();
        assert_eq!(metrics.elapsed_time, frozen);
    }

    #[test]
    fn test_game_start_resets_time() {
        let mut metrics = GameMetrics::new();
        std::thread::sleep(Duration::from_millis(50));
        metrics.update();

        assert!(metrics.elapsed_time.as_millis() >= 50);

        metrics.on_game_start();
        metrics.update();
        assert!(metrics.elapsed_time.as_millis() < 50);
    }
}
