// Copyright (C) 2023-2026 Andy Kurnia.

use super::{alphabet, dice};

pub struct StaticGameConfig {
    alphabet: alphabet::Alphabet,
    dice: dice::DiceSet,
    rack_size: u8,
    min_vowels: u8,
}

pub enum GameConfig {
    Static(StaticGameConfig),
}

impl GameConfig {
    #[inline(always)]
    pub fn alphabet(&self) -> &alphabet::Alphabet {
        match self {
            GameConfig::Static(x) => &x.alphabet,
        }
    }

    #[inline(always)]
    pub fn dice(&self) -> &dice::DiceSet {
        match self {
            GameConfig::Static(x) => &x.dice,
        }
    }

    #[inline(always)]
    pub fn rack_size(&self) -> u8 {
        match self {
            GameConfig::Static(x) => x.rack_size,
        }
    }

    #[inline(always)]
    pub fn min_vowels(&self) -> u8 {
        match self {
            GameConfig::Static(x) => x.min_vowels,
        }
    }
}

pub fn make_english_game_config() -> GameConfig {
    GameConfig::Static(StaticGameConfig {
        alphabet: alphabet::make_english_alphabet(),
        dice: dice::make_standard_dice(),
        rack_size: 12,
        min_vowels: 2,
    })
}

// every search knob lives here. these are tuning parameters, not
// invariants; the defaults are the ones the regression harness runs at.
#[derive(Clone, Copy)]
pub struct SearchConfig {
    // how many candidate words to try at the root frame and below it.
    pub root_word_cap: usize,
    pub deep_word_cap: usize,
    // how many placements to try per candidate word.
    pub root_placement_cap: usize,
    pub deep_placement_cap: usize,
    // share of the total budget spent on the full-rack attempt.
    pub full_rack_percent: u8,
}

pub fn make_common_search_config() -> SearchConfig {
    SearchConfig {
        root_word_cap: 60,
        deep_word_cap: 30,
        root_placement_cap: 8,
        deep_placement_cap: 4,
        full_rack_percent: 70,
    }
}
