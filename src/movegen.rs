// Copyright (C) 2024-2026 Andy Kurnia.

use super::{alphabet, board, lexicon};

pub const SEED_ROW: u8 = 3;

#[derive(Clone, Debug)]
pub struct Placement {
    pub word: lexicon::WordId,
    pub row: u8,
    pub col: u8,
    pub down: bool,
    pub new_letters: Vec<u8>,
    pub intersections: u8,
    pub rarity: i32,
}

// decide whether one word fits at one spot, and what it would consume.
// purely decisional: neither the grid nor the tally is touched.
pub fn try_place(
    grid: &board::Grid,
    lexicon: &lexicon::Lexicon,
    alphabet: &alphabet::Alphabet,
    word: lexicon::WordId,
    start_row: i8,
    start_col: i8,
    down: bool,
    remaining: &alphabet::Tally,
) -> Option<Placement> {
    let entry = lexicon.entry(word);
    let len = entry.letters.len() as i8;
    let dim = board::DIM as i8;
    let (row_step, col_step) = if down { (1i8, 0i8) } else { (0i8, 1i8) };
    let end_row = start_row + row_step * (len - 1);
    let end_col = start_col + col_step * (len - 1);
    if start_row < 0 || start_col < 0 || end_row >= dim || end_col >= dim {
        return None;
    }

    // the word must not silently extend an adjacent run: the cells just
    // before the start and just after the end have to be open or off-board.
    let before_row = start_row - row_step;
    let before_col = start_col - col_step;
    if before_row >= 0
        && before_col >= 0
        && !grid.is_cell_empty(before_row as u8, before_col as u8)
    {
        return None;
    }
    let after_row = end_row + row_step;
    let after_col = end_col + col_step;
    if after_row < dim && after_col < dim && !grid.is_cell_empty(after_row as u8, after_col as u8) {
        return None;
    }

    let mut spent = alphabet::Tally::new();
    let mut new_letters = Vec::with_capacity(entry.letters.len());
    let mut intersections = 0u8;
    for (i, &letter) in entry.letters.iter().enumerate() {
        let row = (start_row + row_step * i as i8) as u8;
        let col = (start_col + col_step * i as i8) as u8;
        match grid.letter_at(row, col) {
            Some(existing) if existing == letter => intersections += 1,
            Some(_) => return None,
            None => {
                spent.add(letter);
                if spent.count(letter) > remaining.count(letter) {
                    return None;
                }
                new_letters.push(letter);
            }
        }
    }
    if new_letters.is_empty() {
        return None;
    }
    if !grid.is_board_empty() && intersections == 0 {
        return None;
    }

    // tentative write, then the full scan catches bad perpendicular runs
    // and length-2 neighbors.
    let mut probe = *grid;
    for (i, &letter) in entry.letters.iter().enumerate() {
        probe.set_letter(
            (start_row + row_step * i as i8) as u8,
            (start_col + col_step * i as i8) as u8,
            letter,
        );
    }
    if !probe.is_valid(lexicon) {
        return None;
    }

    let rarity = alphabet.rack_rarity(&new_letters);
    Some(Placement {
        word,
        row: start_row as u8,
        col: start_col as u8,
        down,
        new_letters,
        intersections,
        rarity,
    })
}

// all distinct spots for one word: anchored on every matching filled cell,
// or the canonical seed if the board is bare.
pub fn enumerate_placements(
    grid: &board::Grid,
    lexicon: &lexicon::Lexicon,
    alphabet: &alphabet::Alphabet,
    word: lexicon::WordId,
    remaining: &alphabet::Tally,
    plays: &mut Vec<Placement>,
) {
    let entry = lexicon.entry(word);
    if grid.is_board_empty() {
        let col = (board::DIM as i8 - entry.letters.len() as i8) / 2;
        if let Some(play) = try_place(
            grid,
            lexicon,
            alphabet,
            word,
            SEED_ROW as i8,
            col,
            false,
            remaining,
        ) {
            plays.push(play);
        }
        return;
    }
    let mut seen = 0u128;
    for row in 0..board::DIM {
        for col in 0..board::DIM {
            let anchor = match grid.letter_at(row, col) {
                Some(letter) => letter,
                None => continue,
            };
            for (i, &letter) in entry.letters.iter().enumerate() {
                if letter != anchor {
                    continue;
                }
                let starts = [
                    (false, row as i8, col as i8 - i as i8),
                    (true, row as i8 - i as i8, col as i8),
                ];
                for &(down, start_row, start_col) in starts.iter() {
                    if start_row < 0 || start_col < 0 {
                        continue;
                    }
                    let key = 1u128
                        << (((down as u32) << 6)
                            | ((start_row as u32) << 3)
                            | (start_col as u32));
                    if seen & key != 0 {
                        continue;
                    }
                    seen |= key;
                    if let Some(play) = try_place(
                        grid, lexicon, alphabet, word, start_row, start_col, down, remaining,
                    ) {
                        plays.push(play);
                    }
                }
            }
        }
    }
}
