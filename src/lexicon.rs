// Copyright (C) 2024-2026 Andy Kurnia.

use super::{alphabet, error};
use std::collections::HashSet;

pub type WordId = usize;

// only words in this length range participate in the formability index.
pub const MIN_INDEXED_LEN: usize = 3;
pub const MAX_INDEXED_LEN: usize = 12;

pub struct Entry {
    pub letters: Box<[u8]>,
    pub tally: alphabet::Tally,
}

// the single word oracle. membership and formability both answer from the
// same loaded list, there is no second opinion anywhere in the crate.
pub struct Lexicon {
    word_set: HashSet<Box<[u8]>>,
    entries: Vec<Entry>,
}

impl Lexicon {
    pub fn new<I, S>(words: I) -> error::Returns<Lexicon>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut word_set = HashSet::new();
        let mut entries = Vec::new();
        for word in words {
            let word = word.as_ref();
            if word.is_empty() {
                return_error!("empty word in word list".into());
            }
            let mut letters = Vec::with_capacity(word.len());
            for c in word.chars() {
                match c {
                    'a'..='z' => letters.push(c as u8 - b'a'),
                    _ => return_error!(format!("word {:?} is not lowercase ascii letters", word)),
                }
            }
            let letters = letters.into_boxed_slice();
            let len = letters.len();
            if word_set.insert(letters.clone()) && (MIN_INDEXED_LEN..=MAX_INDEXED_LEN).contains(&len)
            {
                let tally = alphabet::Tally::from_letters(&letters);
                entries.push(Entry { letters, tally });
            }
        }
        Ok(Lexicon { word_set, entries })
    }

    #[inline(always)]
    pub fn is_word(&self, letters: &[u8]) -> bool {
        self.word_set.contains(letters)
    }

    #[inline(always)]
    pub fn num_words(&self) -> usize {
        self.word_set.len()
    }

    #[inline(always)]
    pub fn entry(&self, id: WordId) -> &Entry {
        &self.entries[id]
    }

    #[inline(always)]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    // every indexed word whose letters are covered by the tally.
    pub fn formable(&self, tally: &alphabet::Tally) -> Vec<WordId> {
        (0..self.entries.len())
            .filter(|&id| self.entries[id].tally.is_dominated_by(tally))
            .collect()
    }

    pub fn any_formable(&self, tally: &alphabet::Tally) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.tally.is_dominated_by(tally))
    }
}
