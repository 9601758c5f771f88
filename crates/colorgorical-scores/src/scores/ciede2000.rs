//! CIEDE2000 color difference
//!
//! Reference-weighted form (`kL = kC = kH = 1`) following Sharma, Wu and
//! Dalal, "The CIEDE2000 Color-Difference Formula: Implementation Notes,
//! Supplementary Test Data, and Mathematical Observations" (2005).
//! Hue angles are kept in radians throughout and only converted to degrees
//! for the hue rotation term.

use std::f64::consts::PI;

use crate::color::Lab;

/// 25^7, the chroma pivot of the G and R_C terms.
const POW25_7: f64 = 6_103_515_625.0;

/// Perceptual distance between two Lab colors.
///
/// Always finite and non-negative for finite input; zero for identical
/// colors and symmetric in its arguments.
///
/// # Example
///
/// ```
/// use colorgorical_scores::{ciede2000, Lab};
///
/// let de = ciede2000(Lab::new(50.0, 2.6772, -79.7751), Lab::new(50.0, 0.0, -82.7485));
/// assert!((de - 2.0425).abs() < 1e-4);
/// ```
pub fn ciede2000(reference: Lab, sample: Lab) -> f64 {
    let c_bar = (reference.chroma() + sample.chroma()) / 2.0;
    let c_bar7 = c_bar.powi(7);
    let g = 0.5 * (1.0 - (c_bar7 / (c_bar7 + POW25_7)).sqrt());

    let ap1 = (1.0 + g) * reference.a;
    let ap2 = (1.0 + g) * sample.a;
    let cp1 = ap1.hypot(reference.b);
    let cp2 = ap2.hypot(sample.b);
    let cp_prod = cp1 * cp2;

    let hp1 = hue_angle(reference.b, ap1);
    let hp2 = hue_angle(sample.b, ap2);

    let dl = sample.l - reference.l;
    let dc = cp2 - cp1;

    let mut dhp = hp2 - hp1;
    if dhp > PI {
        dhp -= 2.0 * PI;
    }
    if dhp < -PI {
        dhp += 2.0 * PI;
    }
    if cp_prod == 0.0 {
        dhp = 0.0;
    }
    let dh = 2.0 * cp_prod.sqrt() * (dhp / 2.0).sin();

    let lp = (reference.l + sample.l) / 2.0;
    let cp = (cp1 + cp2) / 2.0;

    // mean hue, with the wraparound and neutral-color cases
    let mut hp = (hp1 + hp2) / 2.0;
    if (hp1 - hp2).abs() > PI {
        hp -= PI;
    }
    if hp < 0.0 {
        hp += 2.0 * PI;
    }
    if cp_prod == 0.0 {
        hp = hp1 + hp2;
    }

    let lpm50_sq = (lp - 50.0) * (lp - 50.0);
    let sl = 1.0 + 0.015 * lpm50_sq / (20.0 + lpm50_sq).sqrt();
    let sc = 1.0 + 0.045 * cp;
    let t = 1.0 - 0.17 * (hp - PI / 6.0).cos()
        + 0.24 * (2.0 * hp).cos()
        + 0.32 * (3.0 * hp + PI / 30.0).cos()
        - 0.20 * (4.0 * hp - 63.0_f64.to_radians()).cos();
    let sh = 1.0 + 0.015 * cp * t;

    let delta_theta = 30.0_f64.to_radians() * (-((hp.to_degrees() - 275.0) / 25.0).powi(2)).exp();
    let cp7 = cp.powi(7);
    let rc = 2.0 * (cp7 / (cp7 + POW25_7)).sqrt();
    let rt = -(2.0 * delta_theta).sin() * rc;

    let l_term = dl / sl;
    let c_term = dc / sc;
    let h_term = dh / sh;

    (l_term * l_term + c_term * c_term + h_term * h_term + rt * c_term * h_term)
        .max(0.0)
        .sqrt()
}

/// Hue angle in `[0, 2π)`.
#[inline]
fn hue_angle(b: f64, a: f64) -> f64 {
    let h = b.atan2(a);
    if h < 0.0 {
        h + 2.0 * PI
    } else {
        h
    }
}
