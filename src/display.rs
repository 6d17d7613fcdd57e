// Copyright (C) 2024-2026 Andy Kurnia.

use super::{alphabet, board, error};

// compact notation: eight rows of eight cells joined by '/', '.' for empty.
pub struct GridLine<'a>(pub &'a board::Grid);

impl std::fmt::Display for GridLine<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..board::DIM {
            if row > 0 {
                write!(f, "/")?;
            }
            for col in 0..board::DIM {
                match self.0.letter_at(row, col) {
                    Some(letter) => write!(f, "{}", alphabet::to_char(letter))?,
                    None => write!(f, ".")?,
                }
            }
        }
        Ok(())
    }
}

pub fn parse_grid_line(s: &str) -> error::Returns<board::Grid> {
    let mut grid = board::Grid::new();
    let rows: Vec<&str> = s.split('/').collect();
    if rows.len() != board::DIM as usize {
        return_error!(format!("expected {} rows, got {}", board::DIM, rows.len()));
    }
    for (row, row_str) in rows.iter().enumerate() {
        if row_str.chars().count() != board::DIM as usize {
            return_error!(format!("row {} is not {} cells", row + 1, board::DIM));
        }
        for (col, c) in row_str.chars().enumerate() {
            if c == '.' {
                continue;
            }
            match alphabet::from_char(c) {
                Some(letter) => grid.set_letter(row as u8, col as u8, letter),
                None => return_error!(format!("bad cell {:?} at row {}", c, row + 1)),
            }
        }
    }
    Ok(grid)
}

// bordered rendering with coordinate rulers for terminals.
pub struct GridFmt<'a>(pub &'a board::Grid);

impl std::fmt::Display for GridFmt<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "  ")?;
        for col in 0..board::DIM {
            write!(f, " {}", (col + b'a') as char)?;
        }
        writeln!(f)?;
        write!(f, "  +")?;
        for _ in 1..board::DIM {
            write!(f, "--")?;
        }
        writeln!(f, "-+")?;
        for row in 0..board::DIM {
            write!(f, "{:2}|", row + 1)?;
            for col in 0..board::DIM {
                if col > 0 {
                    write!(f, " ")?;
                }
                match self.0.letter_at(row, col) {
                    Some(letter) => write!(f, "{}", alphabet::to_char(letter).to_ascii_uppercase())?,
                    None => write!(f, " ")?,
                }
            }
            writeln!(f, "|{}", row + 1)?;
        }
        write!(f, "  +")?;
        for _ in 1..board::DIM {
            write!(f, "--")?;
        }
        writeln!(f, "-+")
    }
}
