//! Headless mode: plays one round without a terminal UI, reporting progress
//! through the logger.

use anyhow::{Result, anyhow};
use log::{info, warn};
use morse_game::{LinkError, SymbolSource, TokenizerEvent, entities::RoundView};
use std::{thread, time::Duration};

use crate::app::App;

/// Run the loop until the round ends or the symbol source runs dry.
///
/// # Errors
///
/// Returns an error if the link fails for any reason other than a clean
/// disconnect.
pub fn run(mut app: App, tick_interval: Duration) -> Result<RoundView> {
    info!("Target word has {} letters", app.state().target_word.len());

    while !app.session().status().is_over() {
        match app.tick() {
            Ok(Some(outcome)) => match outcome.event {
                TokenizerEvent::CharacterResolved(ch) if outcome.life_lost => {
                    info!("Wrong letter {ch}, {} live(s) left", app.state().lives);
                }
                TokenizerEvent::CharacterResolved(ch) => {
                    info!("Decoded {ch}: {}", app.view().decoded_message);
                }
                TokenizerEvent::DecodeFailed => {
                    info!("Unknown letter, {} live(s) left", app.state().lives);
                }
                _ => {}
            },
            Ok(None) if app.link().is_exhausted() => {
                info!("Symbol source exhausted");
                break;
            }
            Ok(None) => {}
            Err(LinkError::Disconnected) => {
                warn!("Symbol source disconnected");
                break;
            }
            Err(error) => return Err(anyhow!(error).context("Symbol link failed")),
        }

        if !tick_interval.is_zero() {
            thread::sleep(tick_interval);
        }
    }

    let view = app.view();
    info!("Round finished ({}), word was {}", view.status, view.target_word);
    Ok(view)
}
