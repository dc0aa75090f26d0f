//! A terminal client for the Morse code word game.
//!
//! The client reads symbols from the hardware decoder (over a TCP bridge or
//! a character device) or from a recorded transcript, and plays rounds
//! against randomly chosen words.

use anyhow::{Context, Result, bail};
use ctrlc::set_handler;
use env_logger::{Env, Target};
use log::info;
use morse_game::entities::RoundStatus;
use pico_args::Arguments;
use std::fs::File;

use morse_client::{
    app::App,
    config::{CliArgs, ClientConfig, SourceConfig},
    headless,
    tui_app::TuiApp,
};

const HELP: &str = "\
Play the Morse code word game

USAGE:
  morse_client [OPTIONS]

OPTIONS:
  --connect IP:PORT      Symbol bridge address        [default: env MORSE_LINK_ADDR]
  --device PATH          Serial device to read from   [default: env MORSE_DEVICE]
  --replay FILE          Play a recorded transcript
  --words LIST           Comma-separated word list    [default: env MORSE_WORDS or built-in]
  --tick-rate N          Game loop ticks per second   [default: env MORSE_TICK_RATE or 60]
  --seed N               Seed for word selection      [default: env MORSE_SEED or random]
  --log-file PATH        Write logs to PATH           [default: env MORSE_LOG_FILE]

FLAGS:
  --headless             Play without the terminal UI, logging to stderr
  --json                 Print the final round as JSON (headless only)
  -h, --help             Print help information

ENVIRONMENT:
  RUST_LOG               Log filter (e.g., debug)
";

fn main() -> Result<()> {
    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = CliArgs {
        connect: pargs.opt_value_from_str("--connect")?,
        device: pargs.opt_value_from_str("--device")?,
        replay: pargs.opt_value_from_str("--replay")?,
        words: pargs.opt_value_from_str("--words")?,
        tick_rate: pargs.opt_value_from_str("--tick-rate")?,
        seed: pargs.opt_value_from_str("--seed")?,
        log_file: pargs.opt_value_from_str("--log-file")?,
        headless: pargs.contains("--headless"),
        json: pargs.contains("--json"),
    };

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        bail!("unexpected arguments: {remaining:?}");
    }

    let config = ClientConfig::from_env(args)?;
    config.validate()?;
    init_logging(&config)?;

    run(config)
}

fn init_logging(config: &ClientConfig) -> Result<()> {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    builder.format_target(false);

    match &config.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            builder.target(Target::Pipe(Box::new(file)));
        }
        // Logging to the terminal would corrupt the TUI.
        None if !config.headless => return Ok(()),
        None => {}
    }

    builder.try_init().context("Failed to initialize logging")
}

fn run(config: ClientConfig) -> Result<()> {
    match &config.source {
        SourceConfig::Connect(addr) => info!("Reading symbols from {addr}"),
        SourceConfig::Device(path) => info!("Reading symbols from {}", path.display()),
        SourceConfig::Replay(path) => info!("Replaying {}", path.display()),
    }

    let app = App::from_config(&config)?;

    if config.headless {
        // Catching signals for exit.
        set_handler(|| std::process::exit(0))?;

        let view = headless::run(app, config.tick_interval())?;
        if config.json {
            println!("{}", serde_json::to_string_pretty(&view)?);
        } else {
            match view.status {
                RoundStatus::Won => println!("Congratulations! You've won!"),
                RoundStatus::Lost => println!("Game Over! You've run out of lives."),
                RoundStatus::InProgress => println!("Round unfinished."),
            }
            println!("The word was: {}", view.target_word);
        }
        return Ok(());
    }

    let terminal = ratatui::init();
    let result = TuiApp::new(app, config.tick_interval()).run(terminal);
    ratatui::restore();
    result
}
