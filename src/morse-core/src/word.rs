// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

use thiserror::Error;

pub const DEFAULT_WORD_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("word buffer full ({capacity} characters), cannot append '{rejected}'")]
pub struct WordOverflow {
    pub capacity: usize,
    pub rejected: char,
}

/// Bounded, append-only buffer of decoded characters.
#[derive(Debug, Clone)]
pub struct WordBuffer {
    word: String,
    len: usize,
    capacity: usize,
}

impl WordBuffer {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_WORD_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            word: String::with_capacity(capacity),
            len: 0,
            capacity,
        }
    }

    pub fn append(&mut self, c: char) -> Result<(), WordOverflow> {
        if self.is_full() {
            return Err(WordOverflow {
                capacity: self.capacity,
                rejected: c,
            });
        }
        self.word.push(c);
        self.len += 1;
        Ok(())
    }

    pub fn as_str(&self) -> &str {
        &self.word
    }

    /// Number of characters held.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Hand out the word and start over empty.
    pub fn take(&mut self) -> String {
        self.len = 0;
        std::mem::take(&mut self.word)
    }
}

impl Default for WordBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_read() {
        let mut word = WordBuffer::new();
        assert!(word.is_empty());
        word.append('H').unwrap();
        word.append('I').unwrap();
        assert_eq!(word.as_str(), "HI");
        assert_eq!(word.len(), 2);
        assert_eq!(word.capacity(), DEFAULT_WORD_CAPACITY);
    }

    #[test]
    fn test_overflow_after_capacity() {
        let mut word = WordBuffer::with_capacity(3);
        for c in ['A', 'B', 'C'] {
            word.append(c).unwrap();
        }
        assert!(word.is_full());
        assert_eq!(
            word.append('D'),
            Err(WordOverflow {
                capacity: 3,
                rejected: 'D'
            })
        );
        assert_eq!(word.as_str(), "ABC");
        assert!(word.append('E').is_err());
        assert_eq!(word.len(), 3);
    }

    #[test]
    fn test_default_capacity_overflow() {
        let mut word = WordBuffer::default();
        for _ in 0..DEFAULT_WORD_CAPACITY {
            word.append('E').unwrap();
        }
        assert!(word.append('?').is_err());
        assert_eq!(word.len(), DEFAULT_WORD_CAPACITY);
    }

    #[test]
    fn test_zero_capacity_rejects_everything() {
        let mut word = WordBuffer::with_capacity(0);
        assert!(word.append('A').is_err());
        assert!(word.is_empty());
    }

    #[test]
    fn test_take_resets() {
        let mut word = WordBuffer::with_capacity(2);
        word.append('O').unwrap();
        word.append('K').unwrap();
        assert_eq!(word.take(), "OK");
        assert!(word.is_empty());
        word.append('E').unwrap();
        assert_eq!(word.as_str(), "E");
    }
}
