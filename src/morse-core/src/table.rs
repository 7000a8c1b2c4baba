// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! ITU Morse table for `A`-`Z`, `0`-`9` and the word separator.

use crate::symbol::MorseCode;
use crate::symbol::MorseSymbol::{self, Dash as H, Dot as D};

/// Returned by [`decode`] when no character matches.
pub const UNKNOWN: char = '?';

/// Longest code in the table.
pub const MAX_CODE_LEN: usize = 5;

/// Every character [`encode`] accepts, in upper case.
pub const ALPHABET: &[char] = &[
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', ' ',
];

/// Look up the code for `c`. Letters are case-insensitive.
pub fn encode(c: char) -> Option<MorseCode> {
    let symbols: &'static [MorseSymbol] = match c.to_ascii_uppercase() {
        'A' => &[D, H],
        'B' => &[H, D, D, D],
        'C' => &[H, D, H, D],
        'D' => &[H, D, D],
        'E' => &[D],
        'F' => &[D, D, H, D],
        'G' => &[H, H, D],
        'H' => &[D, D, D, D],
        'I' => &[D, D],
        'J' => &[D, H, H, H],
        'K' => &[H, D, H],
        'L' => &[D, H, D, D],
        'M' => &[H, H],
        'N' => &[H, D],
        'O' => &[H, H, H],
        'P' => &[D, H, H, D],
        'Q' => &[H, H, D, H],
        'R' => &[D, H, D],
        'S' => &[D, D, D],
        'T' => &[H],
        'U' => &[D, D, H],
        'V' => &[D, D, D, H],
        'W' => &[D, H, H],
        'X' => &[H, D, D, H],
        'Y' => &[H, D, H, H],
        'Z' => &[H, H, D, D],
        '0' => &[H, H, H, H, H],
        '1' => &[D, H, H, H, H],
        '2' => &[D, D, H, H, H],
        '3' => &[D, D, D, H, H],
        '4' => &[D, D, D, D, H],
        '5' => &[D, D, D, D, D],
        '6' => &[H, D, D, D, D],
        '7' => &[H, H, D, D, D],
        '8' => &[H, H, H, D, D],
        '9' => &[H, H, H, H, D],
        ' ' => return Some(MorseCode::WORD_SEPARATOR),
        _ => return None,
    };
    Some(MorseCode::new(symbols))
}

/// Exact-match inverse of [`encode`]; anything unmatched is [`UNKNOWN`].
pub fn decode(symbols: &[MorseSymbol]) -> char {
    if symbols.len() > MAX_CODE_LEN {
        return UNKNOWN;
    }
    ALPHABET
        .iter()
        .copied()
        .find(|&c| encode(c).is_some_and(|code| code.symbols() == symbols))
        .unwrap_or(UNKNOWN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_is_case_insensitive() {
        assert_eq!(encode('a'), encode('A'));
        assert_eq!(encode('z').map(|c| c.to_string()), Some("--..".to_string()));
    }

    #[test]
    fn test_encode_unsupported() {
        assert_eq!(encode('!'), None);
        assert_eq!(encode('.'), None);
        assert_eq!(encode('é'), None);
        assert_eq!(encode('\n'), None);
    }

    #[test]
    fn test_space_is_word_separator() {
        let code = encode(' ').unwrap();
        assert!(code.is_word_separator());
        for &c in ALPHABET.iter().filter(|&&c| c != ' ') {
            assert!(!encode(c).unwrap().is_word_separator(), "{c}");
        }
    }

    #[test]
    fn test_table_round_trip() {
        for &c in ALPHABET {
            let code = encode(c).unwrap();
            assert_eq!(decode(code.symbols()), c, "code {code}");
        }
    }

    #[test]
    fn test_codes_are_unique() {
        for (i, &a) in ALPHABET.iter().enumerate() {
            for &b in &ALPHABET[i + 1..] {
                assert_ne!(encode(a), encode(b), "{a} and {b} share a code");
            }
        }
    }

    #[test]
    fn test_decode_unknown() {
        assert_eq!(decode(&[D, D, H, H]), UNKNOWN);
        assert_eq!(decode(&[H, H, H, H]), UNKNOWN);
        assert_eq!(decode(&[D; 6]), UNKNOWN);
        assert_eq!(decode(&[H; 10]), UNKNOWN);
    }

    #[test]
    fn test_decode_known() {
        assert_eq!(decode(&[D]), 'E');
        assert_eq!(decode(&[D, D]), 'I');
        assert_eq!(decode(&[D, D, D]), 'S');
        assert_eq!(decode(&[H, H, H]), 'O');
        assert_eq!(decode(&[H, H, H, H, D]), '9');
    }

    #[test]
    fn test_max_code_len() {
        let longest = ALPHABET
            .iter()
            .filter_map(|&c| encode(c))
            .map(|code| code.len())
            .max();
        assert_eq!(longest, Some(MAX_CODE_LEN));
    }
}
