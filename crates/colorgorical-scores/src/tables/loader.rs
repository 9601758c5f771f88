//! Binary table directory format
//!
//! A table directory holds one file per table, each a flat little-endian
//! array without header:
//!
//! | file                         | element |
//! |------------------------------|---------|
//! | `color_name_index.i32`       | i32     |
//! | `name_terms.i32`             | i32     |
//! | `name_totals.i32`            | i32     |
//! | `hue_chroma.f64`             | f64     |
//! | `coolness.f64`               | f64     |
//! | `achromatic_preference.f64`  | f64     |

use std::fs;
use std::path::{Path, PathBuf};

use super::{ScoreTables, TableError, TableParts};

const COLOR_NAME_INDEX: &str = "color_name_index.i32";
const NAME_TERMS: &str = "name_terms.i32";
const NAME_TOTALS: &str = "name_totals.i32";
const HUE_CHROMA: &str = "hue_chroma.f64";
const COOLNESS: &str = "coolness.f64";
const ACHROMATIC_PREFERENCE: &str = "achromatic_preference.f64";

/// Reads and writes [`ScoreTables`] from a table directory.
#[derive(Debug, Clone)]
pub struct TableLoader {
    dir: PathBuf,
}

impl TableLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File names expected in a table directory.
    pub fn file_names() -> [&'static str; 6] {
        [
            COLOR_NAME_INDEX,
            NAME_TERMS,
            NAME_TOTALS,
            HUE_CHROMA,
            COOLNESS,
            ACHROMATIC_PREFERENCE,
        ]
    }

    /// Read every table file and validate the result.
    pub fn load(&self) -> Result<ScoreTables, TableError> {
        tracing::debug!(dir = %self.dir.display(), "Loading score tables");

        let parts = TableParts {
            color_name_index: self.read_i32(COLOR_NAME_INDEX)?,
            name_terms: self.read_i32(NAME_TERMS)?,
            name_totals: self.read_i32(NAME_TOTALS)?,
            hue_chroma: self.read_f64(HUE_CHROMA)?,
            coolness: self.read_f64(COOLNESS)?,
            achromatic_preference: self.read_f64(ACHROMATIC_PREFERENCE)?,
        };

        ScoreTables::new(parts)
    }

    /// Write tables in the format [`load`](Self::load) reads, creating the
    /// directory if needed.
    pub fn write(&self, tables: &ScoreTables) -> Result<(), TableError> {
        fs::create_dir_all(&self.dir).map_err(|source| TableError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let parts = tables.to_parts();
        self.write_bytes(COLOR_NAME_INDEX, i32_bytes(&parts.color_name_index))?;
        self.write_bytes(NAME_TERMS, i32_bytes(&parts.name_terms))?;
        self.write_bytes(NAME_TOTALS, i32_bytes(&parts.name_totals))?;
        self.write_bytes(HUE_CHROMA, f64_bytes(&parts.hue_chroma))?;
        self.write_bytes(COOLNESS, f64_bytes(&parts.coolness))?;
        self.write_bytes(ACHROMATIC_PREFERENCE, f64_bytes(&parts.achromatic_preference))?;

        tracing::debug!(dir = %self.dir.display(), "Score tables written");
        Ok(())
    }

    fn read_bytes(&self, name: &str, element_size: usize) -> Result<Vec<u8>, TableError> {
        let path = self.dir.join(name);
        let bytes = fs::read(&path).map_err(|source| TableError::Io {
            path: path.clone(),
            source,
        })?;
        if bytes.len() % element_size != 0 {
            return Err(TableError::Truncated {
                path,
                len: bytes.len() as u64,
                element_size,
            });
        }
        tracing::debug!(file = name, bytes = bytes.len(), "Read table file");
        Ok(bytes)
    }

    fn read_i32(&self, name: &str) -> Result<Vec<i32>, TableError> {
        let bytes = self.read_bytes(name, 4)?;
        Ok(bytes
            .chunks_exact(4)
            .map(|c| i32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect())
    }

    fn read_f64(&self, name: &str) -> Result<Vec<f64>, TableError> {
        let bytes = self.read_bytes(name, 8)?;
        Ok(bytes
            .chunks_exact(8)
            .map(|c| {
                let mut buf = [0u8; 8];
                buf.copy_from_slice(c);
                f64::from_le_bytes(buf)
            })
            .collect())
    }

    fn write_bytes(&self, name: &str, bytes: Vec<u8>) -> Result<(), TableError> {
        let path = self.dir.join(name);
        fs::write(&path, bytes).map_err(|source| TableError::Io { path, source })
    }
}

fn i32_bytes(values: &[i32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

fn f64_bytes(values: &[f64]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}
