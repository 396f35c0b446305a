//! Closeness bands and the hardness score.

use serde::Serialize;
use std::fmt;

/// Coarse closeness bucket, A (closest) through F.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Band {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl Band {
    pub const ALL: [Band; 6] = [Band::A, Band::B, Band::C, Band::D, Band::E, Band::F];

    pub fn as_str(&self) -> &'static str {
        match self {
            Band::A => "A",
            Band::B => "B",
            Band::C => "C",
            Band::D => "D",
            Band::E => "E",
            Band::F => "F",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Band of a closeness score. Thresholds apply to |a|.
pub fn band_from_closeness(a: f64) -> Band {
    let x = a.abs();
    if x >= 0.90 {
        Band::A
    } else if x >= 0.70 {
        Band::B
    } else if x >= 0.50 {
        Band::C
    } else if x >= 0.30 {
        Band::D
    } else if x >= 0.10 {
        Band::E
    } else {
        Band::F
    }
}

pub fn clamp01(x: f64) -> f64 {
    if x < 0.0 {
        0.0
    } else if x > 1.0 {
        1.0
    } else {
        x
    }
}

/// Hardness = 0.7 * clamp01(|a|) + 0.3 * clamp01(1 / (1 + |energy|)).
///
/// Absent when either input is absent.
pub fn hardness(closest_a: Option<f64>, s_energy: Option<f64>) -> Option<f64> {
    let a_term = clamp01(closest_a?.abs());
    let s_term = clamp01(1.0 / (1.0 + s_energy?.abs()));
    Some(0.7 * a_term + 0.3 * s_term)
}

pub fn invert_hardness(h: f64) -> f64 {
    1.0 - h
}
