use crate::aspects::Aspect;
use crate::chart::Planet;
use crate::reception::ReceptionSummary;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Tolerance for comparing event timings, in days (about 1.44 minutes)
pub const EPS: f64 = 1e-3;

/// Event families detected by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventFamily {
    Direct,
    DirectPenalized,
    HousePlacement,
    Translation,
    Collection,
    Prohibition,
    Abscission,
    Refranation,
    Frustration,
    CombustionVeto,
}

impl EventFamily {
    pub fn as_str(self) -> &'static str {
        match self {
            EventFamily::Direct => "direct",
            EventFamily::DirectPenalized => "direct_penalized",
            EventFamily::HousePlacement => "house_placement",
            EventFamily::Translation => "translation",
            EventFamily::Collection => "collection",
            EventFamily::Prohibition => "prohibition",
            EventFamily::Abscission => "abscission",
            EventFamily::Refranation => "refranation",
            EventFamily::Frustration => "frustration",
            EventFamily::CombustionVeto => "combustion_veto",
        }
    }

    /// Tie-break rank among events with equal timing; lower sorts first.
    pub fn priority(self) -> u8 {
        match self {
            EventFamily::Direct => 0,
            EventFamily::DirectPenalized => 1,
            EventFamily::Translation => 2,
            EventFamily::Collection => 3,
            EventFamily::Prohibition => 4,
            EventFamily::CombustionVeto => 5,
            EventFamily::HousePlacement => 6,
            EventFamily::Refranation => 7,
            EventFamily::Frustration => 8,
            EventFamily::Abscission => 9,
        }
    }

    /// Direct, penalized direct, translation and collection.
    pub fn is_positive(self) -> bool {
        matches!(
            self,
            EventFamily::Direct
                | EventFamily::DirectPenalized
                | EventFamily::Translation
                | EventFamily::Collection
        )
    }

    /// Refranation, frustration and abscission.
    pub fn is_denial(self) -> bool {
        matches!(
            self,
            EventFamily::Refranation | EventFamily::Frustration | EventFamily::Abscission
        )
    }

    /// Families dropped when they coincide with a positive event.
    pub fn yields_to_positive(self) -> bool {
        self == EventFamily::Prohibition || self.is_denial()
    }
}

impl fmt::Display for EventFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Challenge and quality tags attached to events.
pub mod tags {
    pub const HARD_ASPECT: &str = "hard_aspect";
    pub const CADENT_QUERENT: &str = "cadent_querent";
    pub const CADENT_QUESITED: &str = "cadent_quesited";
    pub const COMBUSTION: &str = "combustion";
    pub const HARD_SECOND_LEG_NO_RECEPTION: &str = "hard_second_leg_no_reception";
    pub const ANTI_RECEPTION_FIRST_LEG: &str = "anti_reception_first_leg";
    pub const WEAK_RECEPTION_TO_COLLECTOR: &str = "weak_reception_to_collector";
    pub const COLLECTOR_POOR_DIGNITY: &str = "collector_poor_dignity";

    pub const WITH_DIFFICULTY: &str = "with difficulty";
    pub const EASIER: &str = "easier";
    pub const MITIGATED_BY_RECEPTION: &str = "mitigated by reception";
    pub const IDENTITY_UNION: &str = "identity/union";
    pub const TRANSLATION: &str = "translation";
    pub const HOSTILE: &str = "hostile";
}

/// Stable identity of an event, used for de-duplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventKey {
    pub family: EventFamily,
    pub querent: Planet,
    pub quesited: Planet,
    pub mediator: Option<Planet>,
    pub aspect: Option<Aspect>,
    /// Timing in units of 1e-4 days
    pub timing: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerfectionEvent {
    pub family: EventFamily,
    pub querent: Planet,
    pub quesited: Planet,
    pub mediator: Option<Planet>,
    pub aspect: Option<Aspect>,
    pub reception: Option<ReceptionSummary>,
    /// Days until the event; `None` when immediate or indeterminate
    pub exact_in_days: Option<f64>,
    pub favorable: bool,
    /// 0-100
    pub confidence: Option<i32>,
    pub reason: String,
    pub challenges: Vec<String>,
    pub quality_tags: Vec<String>,
    pub metadata: BTreeMap<String, Value>,
}

impl PerfectionEvent {
    pub fn new(family: EventFamily, querent: Planet, quesited: Planet, reason: impl Into<String>) -> Self {
        Self {
            family,
            querent,
            quesited,
            mediator: None,
            aspect: None,
            reception: None,
            exact_in_days: None,
            favorable: true,
            confidence: None,
            reason: reason.into(),
            challenges: Vec::new(),
            quality_tags: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn at(mut self, days: f64) -> Self {
        self.exact_in_days = Some(days);
        self
    }

    pub fn mediator(mut self, planet: Planet) -> Self {
        self.mediator = Some(planet);
        self
    }

    pub fn aspect(mut self, aspect: Aspect) -> Self {
        self.aspect = Some(aspect);
        self
    }

    pub fn reception(mut self, reception: ReceptionSummary) -> Self {
        self.reception = Some(reception);
        self
    }

    pub fn favorable(mut self, favorable: bool) -> Self {
        self.favorable = favorable;
        self
    }

    pub fn confidence(mut self, confidence: i32) -> Self {
        self.confidence = Some(confidence);
        self
    }

    pub fn challenges(mut self, challenges: Vec<String>) -> Self {
        self.challenges = challenges;
        self
    }

    pub fn quality_tags(mut self, tags: Vec<String>) -> Self {
        self.quality_tags = tags;
        self
    }

    pub fn meta(mut self, key: &str, value: impl Serialize) -> Self {
        let value = serde_json::to_value(value).unwrap_or(Value::Null);
        self.metadata.insert(key.to_string(), value);
        self
    }

    pub fn key(&self) -> EventKey {
        EventKey {
            family: self.family,
            querent: self.querent,
            quesited: self.quesited,
            mediator: self.mediator,
            aspect: self.aspect,
            timing: self.exact_in_days.map(|t| (t * 1e4).round() as i64),
        }
    }

    /// Timing for ordering; indeterminate sorts last.
    pub fn sort_timing(&self) -> f64 {
        self.exact_in_days.unwrap_or(f64::INFINITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_rounds_timing() {
        let a = PerfectionEvent::new(EventFamily::Direct, Planet::Mars, Planet::Venus, "a").at(2.00001);
        let b = PerfectionEvent::new(EventFamily::Direct, Planet::Mars, Planet::Venus, "b").at(2.00004);
        let c = PerfectionEvent::new(EventFamily::Direct, Planet::Mars, Planet::Venus, "c").at(2.0002);
        assert_eq!(a.key(), b.key());
        assert_ne!(a.key(), c.key());
    }

    #[test]
    fn test_key_distinguishes_mediator() {
        let a = PerfectionEvent::new(EventFamily::Translation, Planet::Mars, Planet::Venus, "")
            .mediator(Planet::Moon)
            .at(1.0);
        let b = a.clone().mediator(Planet::Mercury);
        assert_ne!(a.key(), b.key());
    }

    #[test]
    fn test_family_partitions() {
        assert!(EventFamily::Collection.is_positive());
        assert!(!EventFamily::HousePlacement.is_positive());
        assert!(EventFamily::Abscission.is_denial());
        assert!(EventFamily::Prohibition.yields_to_positive());
        assert!(!EventFamily::CombustionVeto.yields_to_positive());
    }

    #[test]
    fn test_serializes_family_snake_case() {
        let e = PerfectionEvent::new(EventFamily::DirectPenalized, Planet::Mars, Planet::Venus, "x");
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["family"], "direct_penalized");
        assert_eq!(json["querent"], "mars");
    }
}
