use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use gesture_snake::game::GameConfig;
use gesture_snake::logging;
use gesture_snake::modes::{CaptureOptions, HeadlessMode, PlayMode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gesture_snake")]
#[command(version, about = "Snake steered by a noisy hand-gesture signal")]
struct Cli {
    /// Game mode
    #[arg(long, default_value = "play")]
    mode: Mode,

    /// TOML file with game constants; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width
    #[arg(long)]
    width: Option<usize>,

    /// Grid height
    #[arg(long)]
    height: Option<usize>,

    /// Driver ticks (1/60 s) per snake move
    #[arg(long)]
    move_speed: Option<f32>,

    /// Seed for food placement and the simulated classifier
    #[arg(long)]
    seed: Option<u64>,

    /// Gesture script to replay (headless mode)
    #[arg(long)]
    script: Option<PathBuf>,

    /// Chance the simulated classifier reports a random direction
    #[arg(long, default_value_t = 0.15)]
    noise: f64,

    /// Chance the simulated classifier reports nothing for a visible hand
    #[arg(long, default_value_t = 0.1)]
    dropout: f64,

    /// Log file (play mode logs nowhere without one)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play in the terminal; the keyboard stands in for the camera
    Play,
    /// Replay a gesture script without a terminal UI
    Headless,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_toml_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(move_speed) = self.move_speed {
            config.move_speed = move_speed;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate().context("Invalid configuration")?;
        Ok(config)
    }

    fn capture_options(&self) -> Result<CaptureOptions> {
        for (name, value) in [("noise", self.noise), ("dropout", self.dropout)] {
            if !(0.0..=1.0).contains(&value) {
                bail!("--{name} must be in [0, 1], got {value}");
            }
        }

        Ok(CaptureOptions {
            noise: self.noise,
            dropout: self.dropout,
            ..CaptureOptions::default()
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.game_config()?;

    // Dispatch to appropriate mode
    let summary = match cli.mode {
        Mode::Play => {
            let _guard = match cli.log_file.as_deref() {
                Some(path) => logging::init(Some(path))?,
                None => None,
            };
            let mut play_mode = PlayMode::new(config, cli.capture_options()?)?;
            play_mode.run().await?
        }
        Mode::Headless => {
            let _guard = logging::init(cli.log_file.as_deref())?;
            let script = cli
                .script
                .as_deref()
                .context("--script is required in headless mode")?;
            let mut headless_mode = HeadlessMode::new(config)?;
            headless_mode.run_script(script)?
        }
    };

    println!("{summary}");
    Ok(())
}
