// Copyright (C) 2024-2026 Andy Kurnia.

use qless::{alphabet, display, error, game_config, game_state, lexicon, solver};

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

fn main() -> error::Returns<()> {
    let args: Vec<String> = std::env::args().collect();
    let mut letters_arg = None;
    let mut dict_path = "words.txt".to_string();
    let mut deadline_ms = 10000i64;
    let mut seed = None;
    let mut json = false;
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--dict" => {
                i += 1;
                dict_path = args.get(i).ok_or("--dict needs a path")?.clone();
            }
            "--ms" => {
                i += 1;
                deadline_ms = args.get(i).ok_or("--ms needs a number")?.parse()?;
            }
            "--seed" => {
                i += 1;
                seed = Some(args.get(i).ok_or("--seed needs a number")?.parse()?);
            }
            "--json" => {
                json = true;
            }
            arg if letters_arg.is_none() => {
                letters_arg = Some(arg.to_string());
            }
            arg => {
                return Err(error::new(format!("unexpected argument {:?}", arg)).into());
            }
        }
        i += 1;
    }
    let letters_arg = letters_arg.ok_or(
        "usage: qless LETTERS [--dict words.txt] [--ms 10000] [--seed N] [--json]",
    )?;

    let game_config = game_config::make_english_game_config();
    let search_config = game_config::make_common_search_config();
    let mut letters = Vec::with_capacity(letters_arg.len());
    for c in letters_arg.chars() {
        letters.push(
            alphabet::from_char(c)
                .ok_or_else(|| error::new(format!("{:?} is not a letter", c)))?,
        );
    }

    let lexicon = read_word_list(&dict_path)?;
    eprintln!("{}: {} words", dict_path, lexicon.num_words());

    let tiles = game_state::tiles_from_letters(&letters);
    let result = solver::solve(&tiles, &lexicon, &game_config, &search_config, deadline_ms, seed)?;

    if json {
        println!("{}", serde_json::to_string(&result)?);
    } else if result.success {
        let mut state = game_state::GameState::new(&game_config);
        state.set_letters(&letters);
        for placement in &result.placements {
            state.place_letter(&placement.tile_id, placement.row, placement.col)?;
        }
        print!("{}", display::GridFmt(&state.grid));
        println!("{}", display::GridLine(&state.grid));
        match result.removed_letter {
            Some(letter) => println!("solved with {} set aside", letter),
            None => println!(
                "solved, all {} tiles used (win check: {})",
                tiles.len(),
                state.check_win(&lexicon)
            ),
        }
        println!(
            "{} ms, {} attempts, {} combos",
            result.stats.ms, result.stats.attempts, result.stats.combos_checked
        );
    } else {
        println!(
            "no solution in {} ms ({} attempts, {} combos)",
            result.stats.ms, result.stats.attempts, result.stats.combos_checked
        );
    }

    if !result.success {
        std::process::exit(1);
    }
    Ok(())
}
