use crate::chart::Planet;
use crate::error::HoraryError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ptolemaic aspects
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aspect {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
}

/// Evaluation order used by every search
pub const ASPECTS: [Aspect; 5] = [
    Aspect::Conjunction,
    Aspect::Sextile,
    Aspect::Square,
    Aspect::Trine,
    Aspect::Opposition,
];

impl Aspect {
    /// Target separation in degrees
    pub fn degrees(self) -> f64 {
        match self {
            Aspect::Conjunction => 0.0,
            Aspect::Sextile => 60.0,
            Aspect::Square => 90.0,
            Aspect::Trine => 120.0,
            Aspect::Opposition => 180.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Aspect::Conjunction => "conjunction",
            Aspect::Sextile => "sextile",
            Aspect::Square => "square",
            Aspect::Trine => "trine",
            Aspect::Opposition => "opposition",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Aspect::Conjunction => "Conjunction",
            Aspect::Sextile => "Sextile",
            Aspect::Square => "Square",
            Aspect::Trine => "Trine",
            Aspect::Opposition => "Opposition",
        }
    }

    /// Square and opposition
    pub fn is_hard(self) -> bool {
        matches!(self, Aspect::Square | Aspect::Opposition)
    }

    /// Signed separations at which the aspect is exact.
    ///
    /// Non-axial aspects perfect on either side (±A); the opposition at ±180.
    pub fn target_separations(self) -> &'static [f64] {
        match self {
            Aspect::Conjunction => &[0.0],
            Aspect::Sextile => &[60.0, -60.0],
            Aspect::Square => &[90.0, -90.0],
            Aspect::Trine => &[120.0, -120.0],
            Aspect::Opposition => &[180.0, -180.0],
        }
    }
}

impl fmt::Display for Aspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Aspect {
    type Err = HoraryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        ASPECTS
            .iter()
            .copied()
            .find(|a| a.as_str() == lower)
            .ok_or_else(|| HoraryError::UnknownAspect {
                name: s.to_string(),
                valid: ASPECTS.iter().map(|a| a.as_str().to_string()).collect(),
            })
    }
}

/// A solved aspect between a body and `target`.
///
/// `timing` is positive for an application (days until exact) and negative
/// for a separation (days since exact).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectHit {
    pub aspect: Aspect,
    pub timing: f64,
    pub target: Planet,
    /// Arc between now and exactness, in degrees of relative motion
    pub degrees: f64,
}

/// Earliest direct perfection between the significators.
///
/// The faster body is the applier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectRoute {
    pub aspect: Aspect,
    pub timing: f64,
    pub applier: Planet,
    pub receiver: Planet,
}
