//! Test fixtures: small, fully synthetic score tables.
//!
//! Every grid cell gets a named color by lightness band:
//!
//! | L         | name | term counts          | total |
//! |-----------|------|----------------------|-------|
//! | 0 ..= 20  | 0    | one term × 10        | 10    |
//! | 25 ..= 45 | 1    | four terms × 5       | 20    |
//! | 50 ..= 70 | 2    | sixteen terms × 2    | 32    |
//! | 75 ..= 95 | 3    | 6 and 2              | 8     |
//! | 100       | 4    | nothing observed     | 0     |
//!
//! Hue and chroma are the real LCh values of each cell, so the region
//! penalty behaves like it does on production tables.
//!
//! The scores crate's unit tests build the same tables in
//! `tables::synthetic_parts`; change both together.

use colorgorical_scores::grid::ACHROMATIC_TABLE_LEN;
use colorgorical_scores::{GridCell, ScoreTables, TableLoader, TableParts, TermCount, GRID_CELLS, TERMS};
use std::path::Path;
use tempfile::TempDir;

/// Named color with no observations (every L = 100 cell maps to it)
pub const UNOBSERVED_NAME: usize = 4;

pub fn synthetic_parts() -> TableParts {
    let names = 5;
    let mut name_terms = vec![TermCount::UNOBSERVED_SENTINEL; names * TERMS];
    name_terms[0] = 10;
    for t in 0..4 {
        name_terms[TERMS + t] = 5;
    }
    for t in 0..16 {
        name_terms[2 * TERMS + t] = 2;
    }
    name_terms[3 * TERMS] = 6;
    name_terms[3 * TERMS + 1] = 2;

    let mut color_name_index = Vec::with_capacity(GRID_CELLS);
    let mut hue_chroma = Vec::with_capacity(GRID_CELLS * 2);
    let mut coolness = Vec::with_capacity(GRID_CELLS);
    for cell in GridCell::all() {
        color_name_index.push(cell.l() / 25);
        let lch = cell.to_lab().to_lch();
        hue_chroma.push(lch.c);
        hue_chroma.push(lch.h);
        coolness.push(cell.l() as f64 / 10.0);
    }

    TableParts {
        color_name_index,
        name_terms,
        name_totals: vec![10, 20, 32, 8, 0],
        hue_chroma,
        coolness,
        achromatic_preference: (0..ACHROMATIC_TABLE_LEN).map(|i| i as f64 * 0.001).collect(),
    }
}

pub fn synthetic_tables() -> ScoreTables {
    ScoreTables::new(synthetic_parts()).expect("synthetic tables are valid")
}

/// Write the synthetic tables into `dir`
pub fn write_tables(dir: &Path) {
    TableLoader::new(dir)
        .write(&synthetic_tables())
        .expect("Failed to write tables");
}

/// A temporary data directory holding the synthetic tables
pub fn table_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    write_tables(dir.path());
    dir
}

/// Palettes used across tests
pub mod palettes {
    /// Three chromatic colors in different lightness bands
    pub const TRIAD: &str = r##"[[30, 40, -20], [55, -30, 45], [80, 10, 60]]"##;

    /// Same colors, given as sRGB
    pub const SRGB: &str = r##"["#e41a1c", "#377eb8", "rgb(77, 175, 74)"]"##;
}
