//! The discretized Lab grid and its flat table indices
//!
//! The naming study sampled Lab space every 5 units:
//!
//! | axis | range         | cells |
//! |------|---------------|-------|
//! | L    | 0 ..= 100     | 21    |
//! | a    | -85 ..= 100   | 38    |
//! | b    | -110 ..= 95   | 42    |
//!
//! Every table keyed by "Lab index" is laid out L-major, then a, then b:
//!
//! ```text
//! index = ((L/5) * 38 + (a+85)/5) * 42 + (b+110)/5
//! ```
//!
//! Changing this ordering or these extents invalidates every precomputed
//! table, so the layout lives here and nowhere else.

use crate::color::Lab;

/// Grid spacing along every axis.
pub const STEP: i32 = 5;

/// Number of cells along L.
pub const L_STEPS: usize = 21;
/// Number of cells along a.
pub const A_STEPS: usize = 38;
/// Number of cells along b.
pub const B_STEPS: usize = 42;

/// Total number of grid cells, and the length of every Lab-indexed table.
pub const GRID_CELLS: usize = L_STEPS * A_STEPS * B_STEPS;

/// Number of achromatic comparison lightness bins (L = 0, 5, ..., 100).
pub const ACHROMATIC_BINS: usize = L_STEPS;

/// Length of the achromatic preference table.
pub const ACHROMATIC_TABLE_LEN: usize = GRID_CELLS * ACHROMATIC_BINS;

const L_MIN: i32 = 0;
const L_MAX: i32 = 100;
const A_MIN: i32 = -85;
const A_MAX: i32 = 100;
const B_MIN: i32 = -110;
const B_MAX: i32 = 95;

/// Error for a Lab color that cannot be used as a grid cell.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    #[error("{axis} = {value} is not a multiple of 5")]
    NotOnGrid { axis: &'static str, value: f64 },

    #[error("{axis} = {value} is outside the supported range {min}..={max}")]
    OutOfRange {
        axis: &'static str,
        value: f64,
        min: i32,
        max: i32,
    },

    #[error("grid index {0} is out of range (grid has 33516 cells)")]
    IndexOutOfRange(usize),
}

/// A Lab color that sits exactly on the discretized grid.
///
/// Holding a `GridCell` proves the coordinates are multiples of 5 inside the
/// supported cube, so its [`index`](GridCell::index) is always a valid
/// position in every Lab-indexed table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCell {
    l: i32,
    a: i32,
    b: i32,
}

impl GridCell {
    /// Create a grid cell from integer coordinates.
    ///
    /// # Example
    ///
    /// ```
    /// use colorgorical_scores::GridCell;
    ///
    /// let cell = GridCell::new(50, -20, 35).unwrap();
    /// assert_eq!(GridCell::from_index(cell.index()).unwrap(), cell);
    ///
    /// assert!(GridCell::new(52, 0, 0).is_err());
    /// ```
    pub fn new(l: i32, a: i32, b: i32) -> Result<Self, GridError> {
        Ok(Self {
            l: check_axis("L", l as f64, L_MIN, L_MAX)?,
            a: check_axis("a", a as f64, A_MIN, A_MAX)?,
            b: check_axis("b", b as f64, B_MIN, B_MAX)?,
        })
    }

    /// Recover the grid cell stored at a flat table index.
    pub fn from_index(index: usize) -> Result<Self, GridError> {
        if index >= GRID_CELLS {
            return Err(GridError::IndexOutOfRange(index));
        }
        Ok(Self::decode(index))
    }

    fn decode(index: usize) -> Self {
        let b = index % B_STEPS;
        let a = (index / B_STEPS) % A_STEPS;
        let l = index / (A_STEPS * B_STEPS);
        Self {
            l: l as i32 * STEP + L_MIN,
            a: a as i32 * STEP + A_MIN,
            b: b as i32 * STEP + B_MIN,
        }
    }

    /// Flat index into every Lab-indexed table (L-major, then a, then b).
    #[inline]
    pub fn index(self) -> usize {
        let l = ((self.l - L_MIN) / STEP) as usize;
        let a = ((self.a - A_MIN) / STEP) as usize;
        let b = ((self.b - B_MIN) / STEP) as usize;
        (l * A_STEPS + a) * B_STEPS + b
    }

    /// Index into the achromatic preference table for this (chromatic) cell
    /// compared against an achromatic color of lightness `achromatic.l()`.
    #[inline]
    pub fn achromatic_index(self, achromatic: GridCell) -> usize {
        self.index() * ACHROMATIC_BINS + ((achromatic.l - L_MIN) / STEP) as usize
    }

    #[inline]
    pub fn l(self) -> i32 {
        self.l
    }

    #[inline]
    pub fn a(self) -> i32 {
        self.a
    }

    #[inline]
    pub fn b(self) -> i32 {
        self.b
    }

    /// True for a neutral gray (`a == 0 && b == 0`).
    #[inline]
    pub fn is_achromatic(self) -> bool {
        self.a == 0 && self.b == 0
    }

    /// The cell as a Lab color.
    #[inline]
    pub fn to_lab(self) -> Lab {
        Lab::new(self.l as f64, self.a as f64, self.b as f64)
    }

    /// Iterate over every grid cell in table order.
    pub fn all() -> impl Iterator<Item = GridCell> {
        (0..GRID_CELLS).map(Self::decode)
    }
}

impl TryFrom<Lab> for GridCell {
    type Error = GridError;

    /// Accept a Lab color only if it is exactly on the grid.
    ///
    /// No rounding or clamping happens here: an off-grid color would index
    /// the wrong table row. Use [`Lab::snap_to_grid`] first when rounding
    /// is what the caller wants.
    fn try_from(lab: Lab) -> Result<Self, Self::Error> {
        Ok(Self {
            l: check_axis("L", lab.l, L_MIN, L_MAX)?,
            a: check_axis("a", lab.a, A_MIN, A_MAX)?,
            b: check_axis("b", lab.b, B_MIN, B_MAX)?,
        })
    }
}

impl From<GridCell> for Lab {
    fn from(cell: GridCell) -> Self {
        cell.to_lab()
    }
}

fn check_axis(axis: &'static str, value: f64, min: i32, max: i32) -> Result<i32, GridError> {
    if !(value >= min as f64 && value <= max as f64) {
        // also catches NaN
        return Err(GridError::OutOfRange {
            axis,
            value,
            min,
            max,
        });
    }
    if value.fract() != 0.0 || (value as i32) % STEP != 0 {
        return Err(GridError::NotOnGrid { axis, value });
    }
    Ok(value as i32)
}
