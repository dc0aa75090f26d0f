//! International Morse code table for `A`-`Z` and `0`-`9`.
//!
//! The table is a compile-time constant; both directions of the mapping are
//! pure lookups over it.

use super::entities::MorseToken;

/// Every supported code paired with the character it spells.
pub const MORSE_TABLE: [(&str, char); 36] = [
    (".-", 'A'),
    ("-...", 'B'),
    ("-.-.", 'C'),
    ("-..", 'D'),
    (".", 'E'),
    ("..-.", 'F'),
    ("--.", 'G'),
    ("....", 'H'),
    ("..", 'I'),
    (".---", 'J'),
    ("-.-", 'K'),
    (".-..", 'L'),
    ("--", 'M'),
    ("-.", 'N'),
    ("---", 'O'),
    (".--.", 'P'),
    ("--.-", 'Q'),
    (".-.", 'R'),
    ("...", 'S'),
    ("-", 'T'),
    ("..-", 'U'),
    ("...-", 'V'),
    (".--", 'W'),
    ("-..-", 'X'),
    ("-.--", 'Y'),
    ("--..", 'Z'),
    ("-----", '0'),
    (".----", '1'),
    ("..---", '2'),
    ("...--", '3'),
    ("....-", '4'),
    (".....", '5'),
    ("-....", '6'),
    ("--...", '7'),
    ("---..", '8'),
    ("----.", '9'),
];

/// Character spelled by a code string such as `"..-."`.
#[must_use]
pub fn decode(code: &str) -> Option<char> {
    MORSE_TABLE
        .iter()
        .find(|(entry, _)| *entry == code)
        .map(|&(_, ch)| ch)
}

/// Character spelled by an accumulated token.
#[must_use]
pub fn decode_token(token: &MorseToken) -> Option<char> {
    MORSE_TABLE
        .iter()
        .find(|(entry, _)| token.matches(entry))
        .map(|&(_, ch)| ch)
}

/// Code for an uppercase letter or digit.
#[must_use]
pub fn encode(ch: char) -> Option<&'static str> {
    MORSE_TABLE
        .iter()
        .find(|&&(_, entry)| entry == ch)
        .map(|&(code, _)| code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entities::Mark;
    use std::collections::HashSet;

    #[test]
    fn test_table_is_bijective() {
        let codes: HashSet<_> = MORSE_TABLE.iter().map(|(code, _)| *code).collect();
        let chars: HashSet<_> = MORSE_TABLE.iter().map(|(_, ch)| *ch).collect();
        assert_eq!(codes.len(), 36);
        assert_eq!(chars.len(), 36);
    }

    #[test]
    fn test_table_covers_alphanumerics() {
        for ch in ('A'..='Z').chain('0'..='9') {
            assert!(encode(ch).is_some(), "missing code for {ch}");
        }
    }

    #[test]
    fn test_decode_known_codes() {
        assert_eq!(decode("..-."), Some('F'));
        assert_eq!(decode("-..-"), Some('X'));
        assert_eq!(decode("-----"), Some('0'));
        assert_eq!(decode("----."), Some('9'));
    }

    #[test]
    fn test_decode_unknown_codes() {
        assert_eq!(decode(""), None);
        assert_eq!(decode("......"), None);
        assert_eq!(decode("..--"), None);
    }

    #[test]
    fn test_encode_rejects_lowercase() {
        assert_eq!(encode('a'), None);
        assert_eq!(encode(' '), None);
    }

    #[test]
    fn test_decode_token_matches_decode() {
        for (code, ch) in MORSE_TABLE {
            let token: MorseToken = code
                .chars()
                .map(|c| if c == '.' { Mark::Dot } else { Mark::Dash })
                .collect();
            assert_eq!(decode_token(&token), Some(ch));
        }
    }
}
