//! Zodiac sign type.

use crate::error::HoraryError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

pub const SIGN_ORDER: [Sign; 12] = [
    Sign::Aries,
    Sign::Taurus,
    Sign::Gemini,
    Sign::Cancer,
    Sign::Leo,
    Sign::Virgo,
    Sign::Libra,
    Sign::Scorpio,
    Sign::Sagittarius,
    Sign::Capricorn,
    Sign::Aquarius,
    Sign::Pisces,
];

impl Sign {
    /// Sign index (0-11), Aries first.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Sign containing an absolute longitude.
    pub fn from_longitude(longitude: f64) -> Self {
        let normalized = longitude.rem_euclid(360.0);
        SIGN_ORDER[((normalized / 30.0) as usize) % 12]
    }

    pub fn name(self) -> &'static str {
        match self {
            Sign::Aries => "aries",
            Sign::Taurus => "taurus",
            Sign::Gemini => "gemini",
            Sign::Cancer => "cancer",
            Sign::Leo => "leo",
            Sign::Virgo => "virgo",
            Sign::Libra => "libra",
            Sign::Scorpio => "scorpio",
            Sign::Sagittarius => "sagittarius",
            Sign::Capricorn => "capricorn",
            Sign::Aquarius => "aquarius",
            Sign::Pisces => "pisces",
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Sign {
    type Err = HoraryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        SIGN_ORDER
            .iter()
            .copied()
            .find(|sign| sign.name() == lower)
            .ok_or_else(|| HoraryError::UnknownSign { name: s.to_string() })
    }
}

/// Days until a body leaves its current sign at the given rate.
///
/// `None` for a body with no motion: it never leaves.
pub fn days_to_sign_exit(longitude: f64, rate: f64) -> Option<f64> {
    if rate.abs() < 1e-9 {
        return None;
    }
    let degree_in_sign = longitude.rem_euclid(30.0);
    if rate > 0.0 {
        Some((30.0 - degree_in_sign) / rate)
    } else {
        Some(degree_in_sign / -rate)
    }
}
