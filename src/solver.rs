// Copyright (C) 2024-2026 Andy Kurnia.

use super::{alphabet, board, error, game_config, game_state, lexicon, movegen};
use rand::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct TilePlacement {
    pub tile_id: String,
    pub row: u8,
    pub col: u8,
}

#[derive(Clone, Copy, Debug, Default, serde::Serialize)]
pub struct SolveStats {
    pub attempts: u64,
    pub combos_checked: u64,
    pub ms: u64,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct SolveResult {
    pub placements: Vec<TilePlacement>,
    pub success: bool,
    pub removed_letter: Option<char>,
    pub stats: SolveStats,
}

struct SearchEnv<'a> {
    lexicon: &'a lexicon::Lexicon,
    alphabet: &'a alphabet::Alphabet,
    config: &'a game_config::SearchConfig,
    root_words: Vec<lexicon::WordId>,
    deadline: std::time::Instant,
    rng: &'a mut rand_chacha::ChaCha20Rng,
    attempts: &'a mut u64,
    combos_checked: &'a mut u64,
}

// rarity of the letters this word would actually draw from the rack.
fn drawn_rarity(
    alphabet: &alphabet::Alphabet,
    entry: &lexicon::Entry,
    remaining: &alphabet::Tally,
) -> i32 {
    remaining
        .letters()
        .map(|letter| {
            (entry.tally.count(letter).min(remaining.count(letter)) as i32)
                * (alphabet.rarity(letter) as i32)
        })
        .sum()
}

fn apply_placement(
    grid: &mut board::Grid,
    remaining: &mut alphabet::Tally,
    entry: &lexicon::Entry,
    play: &movegen::Placement,
) {
    let (row_step, col_step) = if play.down { (1u8, 0u8) } else { (0u8, 1u8) };
    for (i, &letter) in entry.letters.iter().enumerate() {
        let row = play.row + row_step * i as u8;
        let col = play.col + col_step * i as u8;
        if grid.is_cell_empty(row, col) {
            grid.set_letter(row, col, letter);
            remaining.remove(letter);
        }
    }
}

// depth-first descent. the grid is 64 bytes and copied by value, so sibling
// branches never see each other's writes.
fn search(
    env: &mut SearchEnv<'_>,
    grid: board::Grid,
    remaining: alphabet::Tally,
    depth: u8,
) -> Option<board::Grid> {
    if remaining.is_exhausted() {
        return Some(grid);
    }
    if std::time::Instant::now() >= env.deadline {
        return None;
    }
    if remaining.total() >= 3 && !env.lexicon.any_formable(&remaining) {
        return None;
    }

    let mut candidates: Vec<(lexicon::WordId, i32)> = Vec::new();
    for &word in env.root_words.iter() {
        let entry = env.lexicon.entry(word);
        if grid.is_board_empty() {
            // the seed word has no grid to borrow from.
            if !entry.tally.is_dominated_by(&remaining) {
                continue;
            }
        } else if !entry.tally.shares_letter_with(&remaining) {
            continue;
        }
        candidates.push((word, drawn_rarity(env.alphabet, entry, &remaining)));
    }
    // seeded shuffle, then a stable sort: equal-priority order varies by
    // seed but is reproducible.
    candidates.shuffle(env.rng);
    candidates.sort_by(|a, b| {
        b.1.cmp(&a.1).then_with(|| {
            env.lexicon
                .entry(b.0)
                .letters
                .len()
                .cmp(&env.lexicon.entry(a.0).letters.len())
        })
    });

    let (word_cap, placement_cap) = if depth == 0 {
        (env.config.root_word_cap, env.config.root_placement_cap)
    } else {
        (env.config.deep_word_cap, env.config.deep_placement_cap)
    };

    let mut plays = Vec::new();
    for &(word, _) in candidates.iter().take(word_cap) {
        plays.clear();
        movegen::enumerate_placements(&grid, env.lexicon, env.alphabet, word, &remaining, &mut plays);
        *env.combos_checked += plays.len() as u64;
        plays.sort_by(|a, b| {
            b.rarity
                .cmp(&a.rarity)
                .then(b.new_letters.len().cmp(&a.new_letters.len()))
                .then(b.intersections.cmp(&a.intersections))
        });
        for play in plays.iter().take(placement_cap) {
            if std::time::Instant::now() >= env.deadline {
                return None;
            }
            *env.attempts += 1;
            let mut next_grid = grid;
            let mut next_remaining = remaining;
            apply_placement(
                &mut next_grid,
                &mut next_remaining,
                env.lexicon.entry(word),
                play,
            );
            if let Some(done) = search(env, next_grid, next_remaining, depth + 1) {
                return Some(done);
            }
        }
    }
    None
}

#[allow(clippy::too_many_arguments)]
fn run_phase(
    lexicon: &lexicon::Lexicon,
    alphabet: &alphabet::Alphabet,
    config: &game_config::SearchConfig,
    tally: alphabet::Tally,
    deadline: std::time::Instant,
    rng: &mut rand_chacha::ChaCha20Rng,
    attempts: &mut u64,
    combos_checked: &mut u64,
) -> Option<board::Grid> {
    // one shared candidate snapshot per phase. letters drawn via
    // intersections come from the rack too (the grid is built from it), so
    // formability against the whole tally covers every later word as well.
    let root_words: Vec<lexicon::WordId> = lexicon
        .formable(&tally)
        .into_iter()
        .filter(|&word| lexicon.entry(word).letters.len() <= board::DIM as usize)
        .collect();
    if root_words.is_empty() {
        return None;
    }
    let mut env = SearchEnv {
        lexicon,
        alphabet,
        config,
        root_words,
        deadline,
        rng,
        attempts,
        combos_checked,
    };
    search(&mut env, board::Grid::new(), tally, 0)
}

// match grid cells back to specific tiles, row-major. tiles sharing a
// letter are interchangeable, so the first unused one wins.
fn reify(grid: &board::Grid, tiles: &[game_state::Tile]) -> Vec<TilePlacement> {
    let mut used = vec![false; tiles.len()];
    let mut placements = Vec::with_capacity(grid.letter_count() as usize);
    for row in 0..board::DIM {
        for col in 0..board::DIM {
            if let Some(letter) = grid.letter_at(row, col) {
                let idx = tiles
                    .iter()
                    .enumerate()
                    .position(|(i, tile)| !used[i] && tile.letter == letter)
                    .unwrap_or_else(|| {
                        panic!(
                            "solved grid holds {:?} but no unused tile has it",
                            alphabet::to_char(letter)
                        )
                    });
                used[idx] = true;
                placements.push(TilePlacement {
                    tile_id: tiles[idx].id.clone(),
                    row,
                    col,
                });
            }
        }
    }
    placements
}

pub fn solve(
    tiles: &[game_state::Tile],
    lexicon: &lexicon::Lexicon,
    game_config: &game_config::GameConfig,
    search_config: &game_config::SearchConfig,
    deadline_ms: i64,
    seed: Option<u64>,
) -> error::Returns<SolveResult> {
    let start = std::time::Instant::now();
    let rack_size = game_config.rack_size() as usize;
    if tiles.len() != rack_size && tiles.len() + 1 != rack_size {
        return_error!(format!(
            "expected {} or {} tiles, got {}",
            rack_size - 1,
            rack_size,
            tiles.len()
        ));
    }
    let alphabet = game_config.alphabet();
    for tile in tiles {
        if tile.letter >= alphabet.len() {
            return_error!(format!("tile {:?} has letter {} out of range", tile.id, tile.letter));
        }
    }
    for (i, tile) in tiles.iter().enumerate() {
        if tiles[..i].iter().any(|earlier| earlier.id == tile.id) {
            return_error!(format!("duplicate tile id {:?}", tile.id));
        }
    }
    if deadline_ms < 0 {
        return_error!(format!("deadline {} ms is negative", deadline_ms));
    }

    let mut stats = SolveStats::default();
    if deadline_ms == 0 {
        return Ok(SolveResult {
            placements: Vec::new(),
            success: false,
            removed_letter: None,
            stats,
        });
    }

    let letters: Vec<u8> = tiles.iter().map(|tile| tile.letter).collect();
    let full_tally = alphabet::Tally::from_letters(&letters);
    let mut rng = match seed {
        Some(seed) => rand_chacha::ChaCha20Rng::seed_from_u64(seed),
        None => rand_chacha::ChaCha20Rng::from_entropy(),
    };

    let total_ms = deadline_ms as u64;
    let hard_deadline = start + std::time::Duration::from_millis(total_ms);
    let full_rack_ms = if tiles.len() == rack_size {
        total_ms * search_config.full_rack_percent as u64 / 100
    } else {
        // a short rack gets the whole budget, there is no drop phase below.
        total_ms
    };

    if let Some(grid) = run_phase(
        lexicon,
        alphabet,
        search_config,
        full_tally,
        start + std::time::Duration::from_millis(full_rack_ms),
        &mut rng,
        &mut stats.attempts,
        &mut stats.combos_checked,
    ) {
        let placements = reify(&grid, tiles);
        assert_eq!(placements.len(), tiles.len());
        stats.ms = start.elapsed().as_millis() as u64;
        return Ok(SolveResult {
            placements,
            success: true,
            removed_letter: None,
            stats,
        });
    }

    if tiles.len() == rack_size {
        // drop one letter, rarest first: freeing a hard letter unlocks the
        // most new words. remaining time is split over the attempts left.
        let mut drops: Vec<u8> = full_tally.letters().collect();
        drops.sort_by(|a, b| alphabet.rarity(*b).cmp(&alphabet.rarity(*a)).then(a.cmp(b)));
        for (i, &letter) in drops.iter().enumerate() {
            let now = std::time::Instant::now();
            if now >= hard_deadline {
                break;
            }
            let left_ms = hard_deadline.saturating_duration_since(now).as_millis() as u64;
            let share_ms = std::cmp::max(1, left_ms / (drops.len() - i) as u64);
            let mut smaller = full_tally;
            smaller.remove(letter);
            if let Some(grid) = run_phase(
                lexicon,
                alphabet,
                search_config,
                smaller,
                now + std::time::Duration::from_millis(share_ms),
                &mut rng,
                &mut stats.attempts,
                &mut stats.combos_checked,
            ) {
                let placements = reify(&grid, tiles);
                assert_eq!(placements.len(), tiles.len() - 1);
                stats.ms = start.elapsed().as_millis() as u64;
                return Ok(SolveResult {
                    placements,
                    success: true,
                    removed_letter: Some(alphabet::to_char(letter)),
                    stats,
                });
            }
        }
    }

    stats.ms = start.elapsed().as_millis() as u64;
    Ok(SolveResult {
        placements: Vec::new(),
        success: false,
        removed_letter: None,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::tiles_from_letters;

    fn word_codes(word: &str) -> Vec<u8> {
        word.chars()
            .map(|c| alphabet::from_char(c).unwrap())
            .collect()
    }

    fn make_lexicon(words: &[&str]) -> lexicon::Lexicon {
        lexicon::Lexicon::new(words.iter().copied()).unwrap()
    }

    fn grid_of(result: &SolveResult, tiles: &[game_state::Tile]) -> board::Grid {
        let mut grid = board::Grid::new();
        for placement in &result.placements {
            let tile = tiles
                .iter()
                .find(|tile| tile.id == placement.tile_id)
                .unwrap();
            assert!(grid.is_cell_empty(placement.row, placement.col));
            grid.set_letter(placement.row, placement.col, tile.letter);
        }
        grid
    }

    #[test]
    fn solves_a_full_rack() {
        let lexicon = make_lexicon(&["tars", "tone", "sold", "eyed"]);
        let config = game_config::make_english_game_config();
        let search_config = game_config::make_common_search_config();
        let tiles = tiles_from_letters(&word_codes("adeelnoorsty"));
        let result = solve(&tiles, &lexicon, &config, &search_config, 5000, Some(1)).unwrap();
        assert!(result.success);
        assert_eq!(result.removed_letter, None);
        assert_eq!(result.placements.len(), 12);
        let grid = grid_of(&result, &tiles);
        assert!(grid.is_valid(&lexicon));
        assert!(grid.is_connected());
        assert_eq!(grid.letter_count(), 12);
        assert_eq!(
            grid.tally(),
            alphabet::Tally::from_letters(&word_codes("adeelnoorsty"))
        );
    }

    #[test]
    fn solved_rack_wins_the_game() {
        let lexicon = make_lexicon(&["tars", "tone", "sold", "eyed"]);
        let config = game_config::make_english_game_config();
        let search_config = game_config::make_common_search_config();
        let tiles = tiles_from_letters(&word_codes("adeelnoorsty"));
        let result = solve(&tiles, &lexicon, &config, &search_config, 5000, Some(7)).unwrap();
        assert!(result.success);
        let mut state = game_state::GameState::new(&config);
        state.set_letters(&word_codes("adeelnoorsty"));
        for placement in &result.placements {
            state
                .place_letter(&placement.tile_id, placement.row, placement.col)
                .unwrap();
        }
        assert!(state.check_win(&lexicon));
    }

    #[test]
    fn same_seed_same_answer() {
        let lexicon = make_lexicon(&["tars", "tone", "sold", "eyed", "dose", "lend"]);
        let config = game_config::make_english_game_config();
        let search_config = game_config::make_common_search_config();
        let tiles = tiles_from_letters(&word_codes("adeelnoorsty"));
        let first = solve(&tiles, &lexicon, &config, &search_config, 5000, Some(42)).unwrap();
        let second = solve(&tiles, &lexicon, &config, &search_config, 5000, Some(42)).unwrap();
        assert_eq!(first.success, second.success);
        assert_eq!(first.placements, second.placements);
        assert_eq!(first.removed_letter, second.removed_letter);
    }

    #[test]
    fn zero_deadline_fails_without_searching() {
        let lexicon = make_lexicon(&["tars", "tone", "sold", "eyed"]);
        let config = game_config::make_english_game_config();
        let search_config = game_config::make_common_search_config();
        let tiles = tiles_from_letters(&word_codes("adeelnoorsty"));
        let result = solve(&tiles, &lexicon, &config, &search_config, 0, Some(1)).unwrap();
        assert!(!result.success);
        assert!(result.placements.is_empty());
        assert_eq!(result.stats.attempts, 0);
        assert!(solve(&tiles, &lexicon, &config, &search_config, -1, Some(1)).is_err());
    }

    #[test]
    fn rejects_malformed_input() {
        let lexicon = make_lexicon(&["tars"]);
        let config = game_config::make_english_game_config();
        let search_config = game_config::make_common_search_config();
        let too_few = tiles_from_letters(&word_codes("tars"));
        assert!(solve(&too_few, &lexicon, &config, &search_config, 1000, None).is_err());
        let mut dupes = tiles_from_letters(&word_codes("adeelnoorsty"));
        dupes[1].id = "t0".into();
        assert!(solve(&dupes, &lexicon, &config, &search_config, 1000, None).is_err());
    }

    #[test]
    fn all_vowels_fails_fast_and_mutates_nothing() {
        let lexicon = make_lexicon(&["tars", "tone", "sold", "eyed"]);
        let config = game_config::make_english_game_config();
        let search_config = game_config::make_common_search_config();
        let tiles = tiles_from_letters(&word_codes("aaeeiioouuee"));
        let result = solve(&tiles, &lexicon, &config, &search_config, 10000, Some(1)).unwrap();
        assert!(!result.success);
        assert!(result.placements.is_empty());
        assert_eq!(result.stats.attempts, 0);
        assert!(result.stats.ms < 1000);
        assert!(tiles.iter().all(|tile| tile.position.is_none()));
    }

    #[test]
    fn drops_the_rarest_blocking_letter() {
        // no word carries the z, so the full rack is impossible; dropping
        // the z (rarest in hand) leaves tares + sold + tone, 11 cells.
        let lexicon = make_lexicon(&["tares", "tars", "tone", "sold", "eyed"]);
        let config = game_config::make_english_game_config();
        let search_config = game_config::make_common_search_config();
        let tiles = tiles_from_letters(&word_codes("adeelnoorstz"));
        let result = solve(&tiles, &lexicon, &config, &search_config, 5000, Some(3)).unwrap();
        assert!(result.success);
        assert_eq!(result.removed_letter, Some('z'));
        assert_eq!(result.placements.len(), 11);
        let grid = grid_of(&result, &tiles);
        assert!(grid.is_valid(&lexicon));
        assert!(grid.is_connected());
        assert_eq!(grid.letter_count(), 11);
        assert_eq!(
            grid.tally(),
            alphabet::Tally::from_letters(&word_codes("adeelnoorst"))
        );
        // the unplaced tile is the z.
        let placed_ids: Vec<&str> = result
            .placements
            .iter()
            .map(|placement| placement.tile_id.as_str())
            .collect();
        let leftover: Vec<&game_state::Tile> = tiles
            .iter()
            .filter(|tile| !placed_ids.contains(&tile.id.as_str()))
            .collect();
        assert_eq!(leftover.len(), 1);
        assert_eq!(leftover[0].letter, alphabet::from_char('z').unwrap());
    }

    #[test]
    fn short_rack_solves_without_a_drop_phase() {
        let lexicon = make_lexicon(&["tares", "tone", "sold"]);
        let config = game_config::make_english_game_config();
        let search_config = game_config::make_common_search_config();
        let tiles = tiles_from_letters(&word_codes("adeelnoorst"));
        let result = solve(&tiles, &lexicon, &config, &search_config, 5000, Some(5)).unwrap();
        assert!(result.success);
        assert_eq!(result.removed_letter, None);
        assert_eq!(result.placements.len(), 11);
    }
}
