// Copyright (C) 2023-2026 Andy Kurnia.

use super::{board, error, game_config, lexicon};
use rand::prelude::*;

#[derive(Clone, Debug)]
pub struct Tile {
    pub id: String,
    pub letter: u8,
    pub position: Option<(u8, u8)>,
}

pub fn tiles_from_letters(letters: &[u8]) -> Vec<Tile> {
    letters
        .iter()
        .enumerate()
        .map(|(i, &letter)| Tile {
            id: format!("t{}", i),
            letter,
            position: None,
        })
        .collect()
}

pub struct GameState<'a> {
    pub game_config: &'a game_config::GameConfig,
    pub tiles: Vec<Tile>,
    pub grid: board::Grid,
}

impl<'a> Clone for GameState<'a> {
    #[inline(always)]
    fn clone(&self) -> Self {
        Self {
            game_config: self.game_config,
            tiles: self.tiles.clone(),
            grid: self.grid,
        }
    }

    #[inline(always)]
    fn clone_from(&mut self, source: &Self) {
        self.game_config = source.game_config;
        self.tiles.clone_from(&source.tiles);
        self.grid = source.grid;
    }
}

impl<'a> GameState<'a> {
    pub fn new(game_config: &'a game_config::GameConfig) -> Self {
        Self {
            game_config,
            tiles: Vec::with_capacity(game_config.rack_size() as usize),
            grid: board::Grid::new(),
        }
    }

    pub fn set_letters(&mut self, letters: &[u8]) {
        self.tiles = tiles_from_letters(letters);
        self.grid = board::Grid::new();
    }

    pub fn reset_and_roll_tiles(&mut self, rng: &mut dyn RngCore) {
        let letters = self.game_config.dice().roll(
            self.game_config.alphabet(),
            self.game_config.min_vowels(),
            rng,
        );
        self.set_letters(&letters);
    }

    fn find_tile(&self, tile_id: &str) -> error::Returns<usize> {
        self.tiles
            .iter()
            .position(|tile| tile.id == tile_id)
            .ok_or_else(|| error::new(format!("no tile {:?}", tile_id)).into())
    }

    pub fn place_letter(&mut self, tile_id: &str, row: u8, col: u8) -> error::Returns<()> {
        if row >= board::DIM || col >= board::DIM {
            return_error!(format!("cell ({}, {}) is off the board", row, col));
        }
        let idx = self.find_tile(tile_id)?;
        if self.tiles[idx].position.is_some() {
            return_error!(format!("tile {:?} is already placed", tile_id));
        }
        if !self.grid.is_cell_empty(row, col) {
            return_error!(format!("cell ({}, {}) is occupied", row, col));
        }
        self.grid.set_letter(row, col, self.tiles[idx].letter);
        self.tiles[idx].position = Some((row, col));
        Ok(())
    }

    pub fn remove_letter(&mut self, tile_id: &str) -> error::Returns<()> {
        let idx = self.find_tile(tile_id)?;
        match self.tiles[idx].position.take() {
            Some((row, col)) => {
                self.grid.clear_cell(row, col);
                Ok(())
            }
            None => Err(error::new(format!("tile {:?} is not on the board", tile_id)).into()),
        }
    }

    // won when the full rack is down, every letter is part of some word of
    // length >= 3, the grid scans clean, and the cells hang together.
    pub fn check_win(&self, lexicon: &lexicon::Lexicon) -> bool {
        if self.tiles.len() != self.game_config.rack_size() as usize
            || self.tiles.iter().any(|tile| tile.position.is_none())
        {
            return false;
        }
        if !self.grid.is_valid(lexicon) || !self.grid.is_connected() {
            return false;
        }
        self.tiles.iter().all(|tile| {
            let (row, col) = tile.position.unwrap();
            self.grid.run_len_across(row, col) >= 3 || self.grid.run_len_down(row, col) >= 3
        })
    }
}
