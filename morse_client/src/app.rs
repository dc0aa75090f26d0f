//! The game loop driver shared by the TUI and headless modes.
//!
//! One [`App::tick`] polls the symbol source once and pushes whatever it
//! yields through the session. Nothing here blocks.

use anyhow::{Context, Result};
use log::{info, warn};
use morse_game::{
    DeviceLink, Link, LinkError, ScriptLink, Session, SymbolSource, TcpLink, TokenizerEvent,
    entities::{RoundState, RoundView},
};
use std::fs;

use crate::config::{ClientConfig, SourceConfig};

/// What a single tick did to the round.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TickOutcome {
    pub event: TokenizerEvent,
    /// Whether the event cost a life.
    pub life_lost: bool,
}

#[derive(Debug)]
pub struct App {
    session: Session,
    link: Link,
    /// Where `link` came from, so it can be opened again.
    source: Option<SourceConfig>,
}

impl App {
    #[must_use]
    pub fn new(session: Session, link: Link) -> Self {
        Self {
            session,
            link,
            source: None,
        }
    }

    /// Remember the source `link` was opened from, enabling [`App::reopen_link`].
    #[must_use]
    pub fn with_source(mut self, source: SourceConfig) -> Self {
        self.source = Some(source);
        self
    }

    /// Open the configured symbol source and start the first round.
    ///
    /// # Errors
    ///
    /// Returns an error if the symbol source can't be opened.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let link = open_link(&config.source)?;
        let vocabulary = config.vocabulary.clone();
        let session = match config.seed {
            Some(seed) => Session::with_seed(vocabulary, seed),
            None => Session::new(vocabulary),
        };
        Ok(Self::new(session, link).with_source(config.source.clone()))
    }

    /// Poll the link once. Once the round is over the link isn't read at
    /// all, so symbols sent after the end wait for the next round's clear.
    ///
    /// # Errors
    ///
    /// Returns an error if the link fails.
    pub fn tick(&mut self) -> Result<Option<TickOutcome>, LinkError> {
        if self.session.status().is_over() {
            return Ok(None);
        }

        let Some(symbol) = self.link.poll_symbol()? else {
            return Ok(None);
        };
        let lives = self.session.state().lives;
        Ok(self
            .session
            .handle_symbol(symbol)
            .map(|event| TickOutcome {
                event,
                life_lost: self.session.state().lives < lives,
            }))
    }

    /// Start a new round, dropping anything the link buffered meanwhile.
    pub fn restart(&mut self) {
        if let Err(error) = self.link.clear() {
            warn!("Failed to clear symbol link: {error}");
        }
        self.session.restart();
    }

    /// Replace the link with a freshly opened one from the same source.
    ///
    /// # Errors
    ///
    /// Returns an error if the app wasn't built from a source or opening it
    /// fails again.
    pub fn reopen_link(&mut self) -> Result<()> {
        let source = self
            .source
            .as_ref()
            .context("Symbol link can't be reopened without a source")?;
        self.link = open_link(source)?;
        info!("Reopened symbol link");
        Ok(())
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn state(&self) -> &RoundState {
        self.session.state()
    }

    #[must_use]
    pub fn view(&self) -> RoundView {
        self.session.view()
    }

    #[must_use]
    pub fn link(&self) -> &Link {
        &self.link
    }
}

/// Open a symbol source.
///
/// # Errors
///
/// Returns an error if connecting, opening the device or reading the replay
/// file fails.
pub fn open_link(source: &SourceConfig) -> Result<Link> {
    let link = match source {
        SourceConfig::Connect(addr) => TcpLink::connect(addr)
            .with_context(|| format!("Failed to connect to symbol bridge at {addr}"))?
            .into(),
        SourceConfig::Device(path) => DeviceLink::open(path)
            .with_context(|| format!("Failed to open device {}", path.display()))?
            .into(),
        SourceConfig::Replay(path) => {
            let script = fs::read(path)
                .with_context(|| format!("Failed to read replay {}", path.display()))?;
            ScriptLink::new(&script).into()
        }
    };
    Ok(link)
}

#[cfg(test)]
mod tests {
    use super::*;
    use morse_game::{
        Vocabulary,
        entities::{MAX_LIVES, RoundStatus},
    };
    use std::path::PathBuf;

    fn app(word: &str, script: &str) -> App {
        let session = Session::with_seed(Vocabulary::new([word]).unwrap(), 0);
        App::new(session, ScriptLink::from(script).into())
    }

    fn run_until_idle(app: &mut App) -> Vec<TickOutcome> {
        let mut outcomes = Vec::new();
        for _ in 0..1000 {
            match app.tick().unwrap() {
                Some(outcome) => outcomes.push(outcome),
                None if app.link().is_exhausted() || app.session().status().is_over() => break,
                None => {}
            }
        }
        outcomes
    }

    #[test]
    fn test_tick_reports_lost_life() {
        let mut app = app("FIBER", "..-. -..- ");
        let outcomes = run_until_idle(&mut app);
        let resolved: Vec<_> = outcomes
            .iter()
            .filter(|outcome| matches!(outcome.event, TokenizerEvent::CharacterResolved(_)))
            .collect();
        assert_eq!(resolved.len(), 2);
        assert!(!resolved[0].life_lost);
        assert!(resolved[1].life_lost);
        assert_eq!(app.state().lives, MAX_LIVES - 1);
    }

    #[test]
    fn test_tick_stops_reading_after_game_over() {
        let mut app = app("E", ". .-");
        run_until_idle(&mut app);
        assert_eq!(app.session().status(), RoundStatus::Won);
        assert_eq!(app.tick().unwrap(), None);
        assert!(!app.link().is_exhausted());
    }

    #[test]
    fn test_restart_clears_link() {
        let mut app = app("E", ". .-");
        run_until_idle(&mut app);
        app.restart();
        assert!(app.link().is_exhausted());
        assert_eq!(app.session().round(), 2);
        assert_eq!(app.session().status(), RoundStatus::InProgress);
    }

    #[test]
    fn test_reopen_link_reads_source_again() {
        let path = std::env::temp_dir().join(format!(
            "morse_client_reopen_{}.txt",
            std::process::id()
        ));
        std::fs::write(&path, ". ").unwrap();

        let mut app = app("E", "").with_source(SourceConfig::Replay(path.clone()));
        assert!(app.link().is_exhausted());
        app.reopen_link().unwrap();
        run_until_idle(&mut app);
        assert_eq!(app.session().status(), RoundStatus::Won);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_reopen_link_without_source() {
        let mut app = app("E", "");
        let err = app.reopen_link().unwrap_err();
        assert!(err.to_string().contains("without a source"));
    }

    #[test]
    fn test_open_missing_replay() {
        let source = SourceConfig::Replay(PathBuf::from("/nonexistent/round.txt"));
        let err = open_link(&source).unwrap_err();
        assert!(err.to_string().contains("Failed to read replay"));
    }
}
