// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Morse symbols and the codes built from them.

use std::fmt;

/// A single Morse element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MorseSymbol {
    Dot,
    Dash,
}

impl MorseSymbol {
    /// Nominal key-down length in timing units.
    pub const fn units(self) -> u64 {
        match self {
            MorseSymbol::Dot => 1,
            MorseSymbol::Dash => 3,
        }
    }

    pub const fn as_char(self) -> char {
        match self {
            MorseSymbol::Dot => '.',
            MorseSymbol::Dash => '-',
        }
    }
}

impl fmt::Display for MorseSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Ordered symbols for one character.
///
/// The empty code is the word separator: it stands for an inter-word pause
/// rather than a symbol sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MorseCode(&'static [MorseSymbol]);

impl MorseCode {
    pub const WORD_SEPARATOR: MorseCode = MorseCode(&[]);

    pub const fn new(symbols: &'static [MorseSymbol]) -> Self {
        Self(symbols)
    }

    pub fn symbols(&self) -> &'static [MorseSymbol] {
        self.0
    }

    pub fn is_word_separator(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for MorseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_word_separator() {
            return write!(f, "/");
        }
        for symbol in self.0 {
            write!(f, "{}", symbol)?;
        }
        Ok(())
    }
}

/// Render a symbol slice as dots and dashes, for logging.
pub fn format_symbols(symbols: &[MorseSymbol]) -> String {
    symbols.iter().map(|s| s.as_char()).collect()
}
