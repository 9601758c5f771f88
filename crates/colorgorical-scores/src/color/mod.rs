//! Color types and conversion utilities
//!
//! - [`Lab`] / [`Lch`]: CIE L*a*b* (D65) and its cylindrical form. Every
//!   score works on these.
//! - [`Xyz`] / [`WhitePoint`]: tristimulus values, needed to move a Lab
//!   color from D65 to Illuminant C for the preference model.
//! - [`Rgb8`]: 8-bit sRGB, for palettes that arrive as hex or `rgb(...)`.
//!
//! # Example
//!
//! ```
//! use colorgorical_scores::{Lab, Rgb8};
//!
//! let lab = "#1b9e77".parse::<Rgb8>().unwrap().to_lab().snap_to_grid();
//! assert_eq!(lab.l % 5.0, 0.0);
//! ```

mod illuminant;
mod lab;
mod srgb;

pub use illuminant::{WhitePoint, Xyz};
pub use lab::{Lab, Lch};
pub use srgb::{ParseColorError, Rgb8};
