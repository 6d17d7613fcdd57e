// Copyright (C) 2024-2026 Andy Kurnia.

use rand::prelude::*;
use qless::{alphabet, error, game_config, game_state, lexicon, solver, stats};

fn read_word_list(path: &str) -> error::Returns<lexicon::Lexicon> {
    let contents = std::fs::read_to_string(path)?;
    let words: Vec<String> = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && line.chars().all(|c| c.is_ascii_alphabetic()))
        .map(str::to_ascii_lowercase)
        .collect();
    lexicon::Lexicon::new(words)
}

// roll-and-solve regression harness: the aggregate success rate over the
// canonical dice is the number being watched, individual rolls may fail.
fn main() -> error::Returns<()> {
    let args: Vec<String> = std::env::args().collect();
    let mut dict_path = "words.txt".to_string();
    let mut num_rolls = 25usize;
    let mut deadline_ms = 15000i64;
    let mut seed = None;
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--dict" => {
                i += 1;
                dict_path = args.get(i).ok_or("--dict needs a path")?.clone();
            }
            "--count" => {
                i += 1;
                num_rolls = args.get(i).ok_or("--count needs a number")?.parse()?;
            }
            "--ms" => {
                i += 1;
                deadline_ms = args.get(i).ok_or("--ms needs a number")?.parse()?;
            }
            "--seed" => {
                i += 1;
                seed = Some(args.get(i).ok_or("--seed needs a number")?.parse()?);
            }
            arg => {
                return Err(error::new(format!("unexpected argument {:?}", arg)).into());
            }
        }
        i += 1;
    }

    let game_config = game_config::make_english_game_config();
    let search_config = game_config::make_common_search_config();
    let lexicon = read_word_list(&dict_path)?;
    eprintln!("{}: {} words", dict_path, lexicon.num_words());

    let mut rng = match seed {
        Some(seed) => rand_chacha::ChaCha20Rng::seed_from_u64(seed),
        None => rand_chacha::ChaCha20Rng::from_entropy(),
    };

    let mut full_rack_wins = 0usize;
    let mut drop_one_wins = 0usize;
    let mut solve_ms = stats::Stats::new();
    for roll in 0..num_rolls {
        let letters = game_config.dice().roll(
            game_config.alphabet(),
            game_config.min_vowels(),
            &mut rng,
        );
        let rack: String = letters.iter().map(|&letter| alphabet::to_char(letter)).collect();
        let tiles = game_state::tiles_from_letters(&letters);
        let result = solver::solve(
            &tiles,
            &lexicon,
            &game_config,
            &search_config,
            deadline_ms,
            Some(rng.gen()),
        )?;
        solve_ms.update(result.stats.ms as f64);
        let outcome = if result.success {
            match result.removed_letter {
                Some(letter) => {
                    drop_one_wins += 1;
                    format!("solved minus {}", letter)
                }
                None => {
                    full_rack_wins += 1;
                    "solved".to_string()
                }
            }
        } else {
            "unsolved".to_string()
        };
        println!(
            "{:3} {} {} in {} ms ({} attempts)",
            roll + 1,
            rack,
            outcome,
            result.stats.ms,
            result.stats.attempts
        );
    }

    let solved = full_rack_wins + drop_one_wins;
    let rate = solved as f64 / num_rolls.max(1) as f64;
    println!(
        "{}/{} solved ({:.0}%): {} full racks, {} with a tile set aside",
        solved,
        num_rolls,
        rate * 100.0,
        full_rack_wins,
        drop_one_wins
    );
    println!(
        "solve time ms: mean {:.0} sd {:.0} min {:.0} max {:.0}",
        solve_ms.mean(),
        solve_ms.standard_deviation(),
        solve_ms.min(),
        solve_ms.max()
    );
    if rate < 0.8 {
        std::process::exit(1);
    }
    Ok(())
}
