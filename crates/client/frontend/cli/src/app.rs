//! Line-oriented game loop.
use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use game_core::{Game, GameStatus, LevelStatus, PcgRng, TurnError, TurnEvent};

use crate::config::CliConfig;
use crate::observer::TracingObserver;

const HELP: &str = "Commands: u d l r move, E waits; a line may hold several. \
                    'restart' replays the level, 'quit' leaves.";

/// Terminal front-end over a [`Game`].
pub struct CliApp {
    game: Game,
    rng: PcgRng,
    observer: TracingObserver,
}

impl CliApp {
    pub fn new(game: Game) -> Self {
        Self {
            game,
            rng: PcgRng,
            observer: TracingObserver,
        }
    }

    /// Loads the campaign and game config named by `config`.
    pub fn from_config(config: &CliConfig) -> Result<Self> {
        let campaign = config.load_campaign()?;
        let game_config = config.load_game_config()?;
        let seed = config.seed();
        tracing::info!(seed, levels = campaign.len(), "Starting campaign");

        let game = Game::new(&campaign, game_config, seed).context("building campaign")?;
        Ok(Self::new(game))
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Plays until the campaign ends, the input runs out, or `quit`.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<GameStatus> {
        writeln!(output, "{}", HELP)?;
        self.print_level(&mut output)?;

        for line in input.lines() {
            let line = line?;
            match line.trim() {
                "quit" => break,
                "restart" => {
                    self.game.restart_level();
                    self.print_level(&mut output)?;
                    continue;
                }
                _ => {}
            }

            for command in line.chars().filter(|c| !c.is_whitespace()) {
                match self.game.play(&self.rng, &mut self.observer, command) {
                    Ok(report) => {
                        if report
                            .events
                            .iter()
                            .any(|event| matches!(event, TurnEvent::LevelStarted { .. }))
                        {
                            writeln!(output, "The exit leads deeper.")?;
                            self.print_level(&mut output)?;
                        }
                    }
                    Err(TurnError::InvalidCommand(error)) => writeln!(output, "{}", error)?,
                    Err(TurnError::LevelOver { .. }) => break,
                    Err(error) => return Err(error.into()),
                }
                if self.game.status().is_over() {
                    break;
                }
            }

            write!(output, "{}", self.game.level())?;
            if self.game.status().is_over() {
                break;
            }
        }

        let status = self.game.status();
        writeln!(output, "{}", outcome(status))?;
        Ok(status)
    }

    fn print_level<W: Write>(&self, output: &mut W) -> Result<()> {
        let level = self.game.level();
        writeln!(
            output,
            "Level {}/{}: {}",
            level.index(),
            self.game.level_count(),
            level.name()
        )?;
        write!(output, "{}", level)?;
        Ok(())
    }
}

fn outcome(status: GameStatus) -> &'static str {
    match status {
        GameStatus::Playing => "Game abandoned.",
        GameStatus::Won => "You escaped!",
        GameStatus::Lost(LevelStatus::Fatality) => "An ogre's club found you. Game over.",
        GameStatus::Lost(_) => "You were captured. Game over.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{GameConfig, LevelLayout};
    use std::io::Cursor;

    fn app(rows: &[&str]) -> CliApp {
        let layout = LevelLayout::new("room", rows.iter().map(|row| row.to_string()).collect())
            .with_movable_enemies(false)
            .with_movable_weapons(false);
        CliApp::new(Game::new(&[layout], GameConfig::default(), 1).unwrap())
    }

    fn run(app: &mut CliApp, input: &str) -> (GameStatus, String) {
        let mut output = Vec::new();
        let status = app.run(Cursor::new(input), &mut output).unwrap();
        (status, String::from_utf8(output).unwrap())
    }

    #[test]
    fn escape_wins_the_campaign() {
        let mut app = app(&["XXXXXX", "XH   X", "X k GX", "XXIXXX"]);
        let (status, output) = run(&mut app, "r x\ndd\n");
        assert_eq!(status, GameStatus::Won);
        assert!(output.contains("Level 1/1: room"));
        assert!(output.contains("unrecognized command 'x'"));
        assert!(output.ends_with("You escaped!\n"));
    }

    #[test]
    fn capture_ends_the_run() {
        let mut app = app(&["XXXXXX", "XH  GX", "X k  X", "XXIXXX"]);
        let (status, output) = run(&mut app, "rrrr\nll\n");
        assert_eq!(status, GameStatus::Lost(LevelStatus::Captured));
        assert!(output.contains("captured"));
        assert_eq!(app.game().level().turn(), 2);
    }

    #[test]
    fn restart_and_quit() {
        let mut app = app(&["XXXXXX", "XH   X", "X k GX", "XXIXXX"]);
        let (status, output) = run(&mut app, "r\nrestart\nquit\nd\n");
        assert_eq!(status, GameStatus::Playing);
        assert_eq!(app.game().level().turn(), 0);
        assert!(output.ends_with("Game abandoned.\n"));
    }
}
