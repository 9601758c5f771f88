//! CIE L*a*b* and its cylindrical form
//!
//! All scores in this crate are defined over CIE Lab characterized with
//! Illuminant D65. Values are plain `f64` and are never clamped; range
//! checks happen when a color is turned into a [`GridCell`](crate::GridCell).

use std::f64::consts::PI;

use super::illuminant::{WhitePoint, Xyz};

/// A color in CIE L*a*b* space.
///
/// # Components
///
/// - `l`: Lightness, roughly 0.0 (black) to 100.0 (white)
/// - `a`: Green-red axis, roughly -85.0 to 100.0 for the colors scored here
/// - `b`: Blue-yellow axis, roughly -110.0 to 95.0 for the colors scored here
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    /// Lightness
    pub l: f64,
    /// Green-red axis
    pub a: f64,
    /// Blue-yellow axis
    pub b: f64,
}

/// Cylindrical representation of a Lab color.
///
/// `h` is the hue angle in degrees, normalized to `0.0..360.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lch {
    /// Lightness (same as [`Lab::l`])
    pub l: f64,
    /// Chroma, `sqrt(a² + b²)`
    pub c: f64,
    /// Hue angle in degrees
    pub h: f64,
}

impl Lab {
    /// Create a new Lab color.
    ///
    /// # Example
    ///
    /// ```
    /// use colorgorical_scores::Lab;
    ///
    /// let gray = Lab::new(50.0, 0.0, 0.0);
    /// assert!(gray.is_achromatic());
    /// ```
    #[inline]
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Build a Lab color from an `[L, a, b]` slice of a batch row.
    #[inline]
    pub fn from_array(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }

    /// Components as `[L, a, b]`.
    #[inline]
    pub fn to_array(self) -> [f64; 3] {
        [self.l, self.a, self.b]
    }

    /// Chroma in standard Lab, `sqrt(a² + b²)`.
    #[inline]
    pub fn chroma(self) -> f64 {
        (self.a * self.a + self.b * self.b).sqrt()
    }

    /// True for a neutral gray (`a == 0 && b == 0`), which has no hue.
    #[inline]
    pub fn is_achromatic(self) -> bool {
        self.a == 0.0 && self.b == 0.0
    }

    /// Convert to the cylindrical (lightness, chroma, hue) representation.
    ///
    /// # Example
    ///
    /// ```
    /// use colorgorical_scores::Lab;
    ///
    /// let lch = Lab::new(50.0, 0.0, -20.0).to_lch();
    /// assert!((lch.c - 20.0).abs() < 1e-12);
    /// assert!((lch.h - 270.0).abs() < 1e-12);
    /// ```
    pub fn to_lch(self) -> Lch {
        let mut h = self.b.atan2(self.a) * 180.0 / PI;
        if h < 0.0 {
            h += 360.0;
        }
        Lch {
            l: self.l,
            c: self.chroma(),
            h,
        }
    }

    /// Round every coordinate to the nearest multiple of 5.
    ///
    /// Colors supplied by users rarely sit on the discretized grid; the
    /// tooling layer snaps them before scoring, the same way the naming
    /// study discretized its samples.
    ///
    /// # Example
    ///
    /// ```
    /// use colorgorical_scores::Lab;
    ///
    /// let snapped = Lab::new(52.4, -12.6, 7.5).snap_to_grid();
    /// assert_eq!(snapped, Lab::new(50.0, -15.0, 10.0));
    /// ```
    pub fn snap_to_grid(self) -> Self {
        fn snap(v: f64) -> f64 {
            let s = 5.0 * (v / 5.0).round();
            // avoid -0.0, which would otherwise print as "-0"
            if s == 0.0 {
                0.0
            } else {
                s
            }
        }
        Self::new(snap(self.l), snap(self.a), snap(self.b))
    }

    /// Convert to XYZ tristimulus values relative to `white`.
    pub fn to_xyz(self, white: WhitePoint) -> Xyz {
        let fy = (self.l + 16.0) / 116.0;
        let fx = fy + self.a / 500.0;
        let fz = fy - self.b / 200.0;
        Xyz {
            x: white.x * lab_f_inv(fx),
            y: white.y * lab_f_inv(fy),
            z: white.z * lab_f_inv(fz),
        }
    }

    /// Re-express a D65 Lab color in Illuminant C Lab.
    ///
    /// The color goes back to XYZ using the D65 reference white and forward
    /// to Lab using the Illuminant C reference white. No chromatic
    /// adaptation is applied; this is the conversion the pair preference
    /// regression was fitted with.
    pub fn d65_to_illuminant_c(self) -> Self {
        self.to_xyz(WhitePoint::D65).to_lab(WhitePoint::C)
    }
}

impl From<[f64; 3]> for Lab {
    fn from(v: [f64; 3]) -> Self {
        Self::from_array(v)
    }
}

const DELTA: f64 = 6.0 / 29.0;

/// Forward companding used by XYZ -> Lab.
#[inline]
pub(crate) fn lab_f(t: f64) -> f64 {
    if t > DELTA * DELTA * DELTA {
        t.cbrt()
    } else {
        t / (3.0 * DELTA * DELTA) + 4.0 / 29.0
    }
}

/// Inverse companding used by Lab -> XYZ.
#[inline]
pub(crate) fn lab_f_inv(t: f64) -> f64 {
    if t > DELTA {
        t * t * t
    } else {
        3.0 * DELTA * DELTA * (t - 4.0 / 29.0)
    }
}
