use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use wrap_snake::game::{GameConfig, Session};
use wrap_snake::modes::HumanMode;

#[derive(Parser)]
#[command(name = "wrap_snake")]
#[command(version, about = "Snake on a wrap-around grid")]
struct Cli {
    /// JSON file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid rows (default: fit the terminal)
    #[arg(long)]
    rows: Option<usize>,

    /// Grid columns (default: fit the terminal)
    #[arg(long)]
    cols: Option<usize>,

    /// Milliseconds between ticks
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Score gained per food eaten
    #[arg(long)]
    food_score: Option<u32>,

    /// Write logs here; the terminal itself is taken by the game
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Read game settings from a JSON file.
///
/// Missing fields fall back to their defaults. The result is validated.
fn load_config(path: &Path) -> Result<GameConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: GameConfig = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

impl Cli {
    /// Merge file settings and flags. Returns the config and whether the grid
    /// should follow the terminal size.
    fn game_config(&self) -> Result<(GameConfig, bool)> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => GameConfig::default(),
        };
        let fit_to_screen = self.config.is_none() && self.rows.is_none() && self.cols.is_none();

        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = tick_ms;
        }
        if let Some(food_score) = self.food_score {
            config.food_score = food_score;
        }

        config.validate().context("Invalid game settings")?;
        Ok((config, fit_to_screen))
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "wrap_snake=info".into()),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let (config, fit_to_screen) = cli.game_config()?;
    let session = Session::new(config)?;

    let mut human_mode = HumanMode::new(session, fit_to_screen);
    human_mode.run().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_fit_screen() {
        let cli = Cli::parse_from(["wrap_snake"]);
        let (config, fit) = cli.game_config().unwrap();
        assert!(fit);
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_flags_override() {
        let cli = Cli::parse_from([
            "wrap_snake",
            "--rows",
            "8",
            "--cols",
            "12",
            "--tick-ms",
            "100",
            "--food-score",
            "1",
        ]);
        let (config, fit) = cli.game_config().unwrap();
        assert!(!fit);
        assert_eq!(config.rows, 8);
        assert_eq!(config.cols, 12);
        assert_eq!(config.tick_interval_ms, 100);
        assert_eq!(config.food_score, 1);
    }

    #[test]
    fn test_zero_rows_rejected() {
        let cli = Cli::parse_from(["wrap_snake", "--rows", "0"]);
        assert!(cli.game_config().is_err());
    }

    #[test]
    fn test_load_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "rows": 12, "food_score": 5 }}"#).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.rows, 12);
        assert_eq!(config.cols, 20);
        assert_eq!(config.food_score, 5);
    }

    #[test]
    fn test_load_invalid_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "rows": 0 }}"#).unwrap();
        assert!(load_config(file.path()).is_err());

        let mut garbage = tempfile::NamedTempFile::new().unwrap();
        write!(garbage, "not json").unwrap();
        assert!(load_config(garbage.path()).is_err());

        assert!(load_config(Path::new("/nonexistent/wrap_snake.json")).is_err());
    }

    #[test]
    fn test_config_file_then_flags() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "rows": 9, "cols": 9, "food_score": 4 }}"#).unwrap();
        let path = file.path().to_str().unwrap();

        let cli = Cli::parse_from(["wrap_snake", "--config", path, "--food-score", "2"]);
        let (config, fit) = cli.game_config().unwrap();
        assert!(!fit);
        assert_eq!((config.rows, config.cols), (9, 9));
        assert_eq!(config.food_score, 2);
    }
}
