use crate::error::HoraryError;
use crate::western::Sign;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The seven classical bodies tracked by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Planet {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
}

/// Fixed search order for third-body scans.
pub const CLASSICAL_PLANETS: [Planet; 7] = [
    Planet::Sun,
    Planet::Moon,
    Planet::Mercury,
    Planet::Venus,
    Planet::Mars,
    Planet::Jupiter,
    Planet::Saturn,
];

impl Planet {
    /// Position of the body in [`CLASSICAL_PLANETS`].
    pub fn index(self) -> usize {
        match self {
            Planet::Sun => 0,
            Planet::Moon => 1,
            Planet::Mercury => 2,
            Planet::Venus => 3,
            Planet::Mars => 4,
            Planet::Jupiter => 5,
            Planet::Saturn => 6,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Planet::Sun => "sun",
            Planet::Moon => "moon",
            Planet::Mercury => "mercury",
            Planet::Venus => "venus",
            Planet::Mars => "mars",
            Planet::Jupiter => "jupiter",
            Planet::Saturn => "saturn",
        }
    }

    /// Bodies that classically station and turn retrograde.
    pub fn can_station(self) -> bool {
        matches!(
            self,
            Planet::Mercury | Planet::Venus | Planet::Mars | Planet::Jupiter | Planet::Saturn
        )
    }

    pub fn is_malefic(self) -> bool {
        matches!(self, Planet::Mars | Planet::Saturn)
    }

    pub fn is_benefic(self) -> bool {
        matches!(self, Planet::Jupiter | Planet::Venus)
    }
}

impl fmt::Display for Planet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Planet {
    type Err = HoraryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        CLASSICAL_PLANETS
            .iter()
            .copied()
            .find(|p| p.as_str() == lower)
            .ok_or_else(|| HoraryError::UnknownBody {
                name: s.to_string(),
                valid: CLASSICAL_PLANETS.iter().map(|p| p.as_str().to_string()).collect(),
            })
    }
}

/// Condition of a body relative to the Sun.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolarCondition {
    Cazimi,
    Combustion,
    UnderBeams,
    Free,
}

/// Raw position snapshot as supplied by the chart builder.
///
/// Either `daily_motion` or `speed` must be present for the body to be tracked.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanetPosition {
    /// Longitude in degrees (0-360)
    pub longitude: f64,
    /// Daily motion in longitude (degrees per day, signed)
    #[serde(default)]
    pub daily_motion: Option<f64>,
    /// Legacy alias for daily motion
    #[serde(default)]
    pub speed: Option<f64>,
    /// House index (1-12)
    #[serde(default)]
    pub house: Option<u8>,
    #[serde(default)]
    pub sign: Option<Sign>,
    #[serde(default)]
    pub solar_condition: Option<SolarCondition>,
    /// Essential dignity score, if the chart builder computed one
    #[serde(default)]
    pub dignity_score: Option<i32>,
}

impl PlanetPosition {
    /// Angular rate in degrees per day.
    ///
    /// Resolution order: `daily_motion`, then `speed`. `None` means the body
    /// cannot be tracked.
    pub fn resolve_rate(&self) -> Option<f64> {
        self.daily_motion.or(self.speed)
    }
}

/// Normalized body used throughout the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AngularBody {
    pub planet: Planet,
    pub longitude: f64,
    /// Signed daily motion, degrees per day
    pub rate: f64,
    pub house: Option<u8>,
    pub sign: Sign,
    pub solar_condition: Option<SolarCondition>,
    pub dignity_score: Option<i32>,
}

impl AngularBody {
    pub fn new(planet: Planet, longitude: f64, rate: f64) -> Self {
        let longitude = longitude.rem_euclid(360.0);
        Self {
            planet,
            longitude,
            rate,
            house: None,
            sign: Sign::from_longitude(longitude),
            solar_condition: None,
            dignity_score: None,
        }
    }

    pub fn with_house(mut self, house: u8) -> Self {
        self.house = Some(house);
        self
    }

    pub fn with_solar_condition(mut self, condition: SolarCondition) -> Self {
        self.solar_condition = Some(condition);
        self
    }

    pub fn with_dignity_score(mut self, score: i32) -> Self {
        self.dignity_score = Some(score);
        self
    }

    /// Normalize a raw position. Returns `None` when no angular rate resolves.
    pub fn from_position(planet: Planet, pos: &PlanetPosition) -> Option<Self> {
        let rate = pos.resolve_rate()?;
        let longitude = pos.longitude.rem_euclid(360.0);
        Some(Self {
            planet,
            longitude,
            rate,
            house: pos.house,
            sign: pos.sign.unwrap_or_else(|| Sign::from_longitude(longitude)),
            solar_condition: pos.solar_condition,
            dignity_score: pos.dignity_score,
        })
    }

    pub fn speed(&self) -> f64 {
        self.rate.abs()
    }
}

/// Houses of the two significators' matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignificatorHouses {
    #[serde(default = "default_querent_house")]
    pub querent_house: u8,
    #[serde(default = "default_quesited_house")]
    pub quesited_house: u8,
}

fn default_querent_house() -> u8 {
    1
}

fn default_quesited_house() -> u8 {
    7
}

impl Default for SignificatorHouses {
    fn default() -> Self {
        Self {
            querent_house: default_querent_house(),
            quesited_house: default_quesited_house(),
        }
    }
}

/// Serialized chart snapshot, as produced by an external chart builder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChartSnapshot {
    pub planets: BTreeMap<Planet, PlanetPosition>,
    /// House cusps 1..12, longitude each
    #[serde(default)]
    pub cusps: Vec<f64>,
    #[serde(default)]
    pub significators: Option<SignificatorHouses>,
}

/// Read-only chart consumed by the engine.
#[derive(Debug, Clone, Default)]
pub struct Chart {
    bodies: BTreeMap<Planet, AngularBody>,
    cusps: Option<[f64; 12]>,
    significators: Option<SignificatorHouses>,
}

impl Chart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, body: AngularBody) -> Self {
        self.bodies.insert(body.planet, body);
        self
    }

    pub fn with_cusps(mut self, cusps: [f64; 12]) -> Self {
        self.cusps = Some(cusps);
        self
    }

    pub fn with_significators(mut self, querent_house: u8, quesited_house: u8) -> Self {
        self.significators = Some(SignificatorHouses {
            querent_house,
            quesited_house,
        });
        self
    }

    pub fn from_snapshot(snapshot: &ChartSnapshot) -> Self {
        let mut chart = Chart::new();
        for (planet, pos) in &snapshot.planets {
            match AngularBody::from_position(*planet, pos) {
                Some(body) => {
                    chart.bodies.insert(*planet, body);
                }
                None => log::warn!("Chart: {planet} has neither daily_motion nor speed, untracked"),
            }
        }
        if snapshot.cusps.len() >= 12 {
            let mut cusps = [0.0; 12];
            cusps.copy_from_slice(&snapshot.cusps[..12]);
            chart.cusps = Some(cusps);
        }
        chart.significators = snapshot.significators;
        chart
    }

    pub fn from_json(text: &str) -> Result<Self, HoraryError> {
        let snapshot: ChartSnapshot = serde_json::from_str(text)?;
        Ok(Self::from_snapshot(&snapshot))
    }

    pub fn body(&self, planet: Planet) -> Option<&AngularBody> {
        self.bodies.get(&planet)
    }

    /// Absolute daily motion, 0 for an untracked body.
    pub fn speed_of(&self, planet: Planet) -> f64 {
        self.body(planet).map(AngularBody::speed).unwrap_or(0.0)
    }

    pub fn cusps(&self) -> Option<&[f64; 12]> {
        self.cusps.as_ref()
    }

    pub fn significators(&self) -> Option<SignificatorHouses> {
        self.significators
    }
}
