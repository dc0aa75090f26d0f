//! Play one round from a transcript given on the command line.
//!
//! ```text
//! cargo run --example decode_transcript -- FIBER "..-. .. -... . .-. "
//! ```

use morse_game::{Session, Vocabulary, entities::RoundStatus};

fn main() {
    let mut args = std::env::args().skip(1);
    let word = args.next().unwrap_or_else(|| "FIBER".to_string());
    let transcript = args
        .next()
        .unwrap_or_else(|| "..-. .. -... . .-. ".to_string());

    let vocabulary = match Vocabulary::new([word.as_str()]) {
        Ok(vocabulary) => vocabulary,
        Err(error) => {
            eprintln!("{error}");
            std::process::exit(1);
        }
    };
    let mut session = Session::with_seed(vocabulary, 0);

    for byte in transcript.bytes() {
        if let Some(event) = session.handle_byte(byte) {
            println!("{:>14} -> {event}", format!("{:?}", char::from(byte)));
        }
    }

    let view = session.view();
    println!();
    println!("Target word:     {}", view.target_word);
    println!("Received morse:  {}", view.received_morse);
    println!("Decoded message: {}", view.decoded_message);
    println!("Lives:           {}", view.lives);
    match view.status {
        RoundStatus::Won => println!("Congratulations! You've won!"),
        RoundStatus::Lost => println!("Game Over! You've run out of lives."),
        RoundStatus::InProgress => println!("Round still in progress."),
    }
}
