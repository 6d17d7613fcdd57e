// Copyright (C) 2024-2026 Andy Kurnia.

use super::alphabet;
use rand::prelude::*;

pub struct DiceSet(pub Box<[[u8; 6]]>);

impl DiceSet {
    #[inline(always)]
    pub fn num_dice(&self) -> usize {
        self.0.len()
    }

    // reroll the whole set until the vowel floor is met.
    pub fn roll(
        &self,
        alphabet: &alphabet::Alphabet,
        min_vowels: u8,
        rng: &mut dyn RngCore,
    ) -> Vec<u8> {
        loop {
            let letters: Vec<u8> = self
                .0
                .iter()
                .map(|faces| faces[rng.gen_range(0..faces.len())])
                .collect();
            let num_vowels = letters
                .iter()
                .filter(|&&letter| alphabet.is_vowel(letter))
                .count();
            if num_vowels >= min_vowels as usize {
                return letters;
            }
        }
    }
}

fn die(faces: &[u8; 6]) -> [u8; 6] {
    let mut codes = [0u8; 6];
    for (code, &face) in codes.iter_mut().zip(faces.iter()) {
        *code = face - b'a';
    }
    codes
}

pub fn make_standard_dice() -> DiceSet {
    DiceSet(Box::new([
        die(b"mmllby"),
        die(b"vfgkpp"),
        die(b"hhnnrr"),
        die(b"dfrllw"),
        die(b"rrdlgg"),
        die(b"xkbszn"),
        die(b"whhttp"),
        die(b"ccbtjd"),
        die(b"ccmtts"),
        die(b"oiinny"),
        die(b"aeiouu"),
        die(b"aaeeoo"),
    ]))
}
