use colorgorical_scores::{GridCell, GridError, Lab, ParseColorError, Rgb8};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One palette color as supplied by a user.
///
/// JSON accepts either `[L, a, b]` or an sRGB string (`"#e41a1c"`,
/// `"#f00"`, `"rgb(228, 26, 28)"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorInput {
    Lab([f64; 3]),
    Srgb(String),
}

#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("color {index} ({input}): {source}")]
    Parse {
        index: usize,
        input: String,
        source: ParseColorError,
    },

    #[error("color {index} ({input}): {source}")]
    OutOfGamut {
        index: usize,
        input: String,
        source: GridError,
    },
}

impl ColorInput {
    /// D65 Lab value of this input, before snapping.
    pub fn to_lab(&self) -> Result<Lab, ParseColorError> {
        match self {
            ColorInput::Lab(lab) => Ok(Lab::from_array(*lab)),
            ColorInput::Srgb(text) => Ok(text.parse::<Rgb8>()?.to_lab()),
        }
    }
}

impl fmt::Display for ColorInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorInput::Lab([l, a, b]) => write!(f, "{l},{a},{b}"),
            ColorInput::Srgb(text) => f.write_str(text),
        }
    }
}

impl FromStr for ColorInput {
    type Err = ParseColorError;

    /// Parse a command-line color: `L,a,b` or any sRGB string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if let [l, a, b] = parts.as_slice() {
            if let (Ok(l), Ok(a), Ok(b)) = (l.parse(), a.parse(), b.parse()) {
                return Ok(ColorInput::Lab([l, a, b]));
            }
        }
        // validate now so the CLI reports bad input before loading tables
        s.parse::<Rgb8>()?;
        Ok(ColorInput::Srgb(s.trim().to_string()))
    }
}

/// A palette color snapped onto the table grid.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteColor {
    pub input: ColorInput,
    pub cell: GridCell,
}

impl PaletteColor {
    pub fn lab(&self) -> Lab {
        self.cell.to_lab()
    }
}

/// An ordered list of grid-snapped colors.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Palette {
    colors: Vec<PaletteColor>,
}

impl Palette {
    /// Convert and snap every input color.
    ///
    /// Snapping rounds each coordinate to the nearest multiple of 5. A color
    /// whose snapped value is still outside the grid is rejected.
    pub fn from_inputs(inputs: &[ColorInput]) -> Result<Self, PaletteError> {
        let colors = inputs
            .iter()
            .enumerate()
            .map(|(index, input)| {
                let lab = input.to_lab().map_err(|source| PaletteError::Parse {
                    index,
                    input: input.to_string(),
                    source,
                })?;
                let cell = GridCell::try_from(lab.snap_to_grid()).map_err(|source| {
                    PaletteError::OutOfGamut {
                        index,
                        input: input.to_string(),
                        source,
                    }
                })?;
                Ok(PaletteColor {
                    input: input.clone(),
                    cell,
                })
            })
            .collect::<Result<Vec<_>, PaletteError>>()?;
        Ok(Self { colors })
    }

    pub fn colors(&self) -> &[PaletteColor] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// All unordered index pairs `(i, j)` with `i < j`, in lexicographic order.
    pub fn pair_indexes(&self) -> Vec<[usize; 2]> {
        let n = self.colors.len();
        (0..n)
            .flat_map(|i| (i + 1..n).map(move |j| [i, j]))
            .collect()
    }
}
