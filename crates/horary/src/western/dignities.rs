//! Essential dignities for the classical bodies.
//!
//! Rulership, detriment, exaltation and fall, plus a point score used to
//! judge a collector's strength.

use crate::chart::Planet;
use crate::western::rulers::{domiciles, exaltation_sign, opposite};
use crate::western::types::Sign;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DignityType {
    Rulership,
    Detriment,
    Exaltation,
    Fall,
}

impl DignityType {
    pub fn score(self) -> i32 {
        match self {
            DignityType::Rulership => 5,
            DignityType::Exaltation => 4,
            DignityType::Detriment => -5,
            DignityType::Fall => -4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DignityResult {
    #[serde(rename = "type")]
    pub dignity_type: DignityType,
    pub sign: Sign,
}

pub struct DignitiesService;

impl DignitiesService {
    /// Get dignities of a planet placed in `sign`
    pub fn get_dignities(&self, planet: Planet, sign: Sign) -> Vec<DignityResult> {
        let mut result = Vec::new();

        let ruled = domiciles(planet);
        if ruled.contains(&sign) {
            result.push(DignityResult { dignity_type: DignityType::Rulership, sign });
        } else if ruled.iter().any(|s| opposite(*s) == sign) {
            result.push(DignityResult { dignity_type: DignityType::Detriment, sign });
        }

        if let Some(exalted) = exaltation_sign(planet) {
            if exalted == sign {
                result.push(DignityResult { dignity_type: DignityType::Exaltation, sign });
            } else if opposite(exalted) == sign {
                result.push(DignityResult { dignity_type: DignityType::Fall, sign });
            }
        }

        result
    }

    /// Summed essential dignity score; 0 for a peregrine body.
    pub fn essential_score(&self, planet: Planet, sign: Sign) -> i32 {
        self.get_dignities(planet, sign)
            .iter()
            .map(|d| d.dignity_type.score())
            .sum()
    }

    pub fn has_dignity(&self, planet: Planet, sign: Sign, dignity: DignityType) -> bool {
        self.get_dignities(planet, sign)
            .iter()
            .any(|d| d.dignity_type == dignity)
    }
}
