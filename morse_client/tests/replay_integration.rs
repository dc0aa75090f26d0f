/// Integration tests for replaying recorded transcripts
///
/// These tests go through the same path as the binary: flags are turned
/// into a configuration, the replay file is opened as a symbol link and the
/// headless loop plays the round to the end.
use morse_client::{
    app::App,
    config::{CliArgs, ClientConfig},
    headless,
};
use morse_game::entities::{RoundStatus, RoundView};
use std::{fs, path::PathBuf, time::Duration};

fn write_replay(name: &str, transcript: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "morse_client_{name}_{}.txt",
        std::process::id()
    ));
    fs::write(&path, transcript).unwrap();
    path
}

fn play(name: &str, words: &str, transcript: &str) -> RoundView {
    let path = write_replay(name, transcript);
    let args = CliArgs {
        replay: Some(path.clone()),
        words: Some(words.to_string()),
        seed: Some(3),
        headless: true,
        ..Default::default()
    };
    let config = ClientConfig::from_env(args).unwrap();
    config.validate().unwrap();

    let app = App::from_config(&config).unwrap();
    let view = headless::run(app, Duration::ZERO).unwrap();
    fs::remove_file(path).unwrap();
    view
}

#[test]
fn test_replay_winning_round() {
    let view = play("win", "FIBER", "..-. .. -... . .-. \n");
    assert_eq!(view.status, RoundStatus::Won);
    assert_eq!(view.lives, 3);
    assert_eq!(view.received_morse, "..-. .. -... . .-. ");
}

#[test]
fn test_replay_with_mistakes() {
    let view = play("mistakes", "FIBER", "..-. -..- .. ...... -... . .-. ");
    assert_eq!(view.status, RoundStatus::Won);
    assert_eq!(view.lives, 1);
}

#[test]
fn test_replay_losing_round() {
    let view = play("lose", "ROUTER", "- - - .-. ");
    assert_eq!(view.status, RoundStatus::Lost);
    assert_eq!(view.lives, 0);
    assert!(view.decoded_message.is_empty());
}

#[test]
fn test_replay_word_pauses_in_log() {
    let view = play("pauses", "SOS", "... / --- / ...");
    assert_eq!(view.status, RoundStatus::InProgress);
    assert_eq!(view.received_morse, "...  ---  ...");
    assert_eq!(view.decoded_message, "S O");
    assert_eq!(view.current_token, "...");
}

#[test]
fn test_view_serializes_to_json() {
    let view = play("json", "E", ". ");
    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["target_word"], "E");
    assert_eq!(json["status"], "Won");
    assert_eq!(json["lives"], 3);
}
