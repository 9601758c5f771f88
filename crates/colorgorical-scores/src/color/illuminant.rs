//! Reference whites and XYZ tristimulus values
//!
//! Only the two illuminants the scores need are defined. White points are
//! scaled so that `Y = 100`.

use super::lab::{lab_f, Lab};

/// Reference white of an illuminant, as XYZ with `Y = 100`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WhitePoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl WhitePoint {
    /// CIE standard illuminant D65 (the working space of every score).
    pub const D65: Self = Self {
        x: 95.047,
        y: 100.0,
        z: 108.883,
    };

    /// CIE standard illuminant C (the space of the pair preference study).
    pub const C: Self = Self {
        x: 98.074,
        y: 100.0,
        z: 118.232,
    };
}

/// CIE XYZ tristimulus values on the same scale as [`WhitePoint`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Xyz {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Xyz {
    /// Convert to Lab relative to `white`.
    pub fn to_lab(self, white: WhitePoint) -> Lab {
        let fx = lab_f(self.x / white.x);
        let fy = lab_f(self.y / white.y);
        let fz = lab_f(self.z / white.z);
        Lab {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_white_point_maps_to_lab_white() {
        for white in [WhitePoint::D65, WhitePoint::C] {
            let lab = Xyz {
                x: white.x,
                y: white.y,
                z: white.z,
            }
            .to_lab(white);
            assert!((lab.l - 100.0).abs() < 1e-9);
            assert!(lab.a.abs() < 1e-9);
            assert!(lab.b.abs() < 1e-9);
        }
    }

    #[test]
    fn test_black_is_origin() {
        let lab = Xyz {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
        .to_lab(WhitePoint::D65);
        assert!(lab.l.abs() < 1e-9);
        assert!(lab.a.abs() < 1e-9);
        assert!(lab.b.abs() < 1e-9);
    }
}
