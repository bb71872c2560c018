use crate::chart::{Chart, Planet};
use crate::error::HoraryError;
use serde::{Deserialize, Serialize};

/// Overall reception tag between an ordered pair of bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceptionKind {
    None,
    Identity,
    OneWay,
    MutualRulership,
    MutualExaltation,
    MixedReception,
    /// The first body sits in a sign of the second body's detriment or fall
    DetrimentOrFallAgainst,
}

impl ReceptionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ReceptionKind::None => "none",
            ReceptionKind::Identity => "identity",
            ReceptionKind::OneWay => "one_way",
            ReceptionKind::MutualRulership => "mutual_rulership",
            ReceptionKind::MutualExaltation => "mutual_exaltation",
            ReceptionKind::MixedReception => "mixed_reception",
            ReceptionKind::DetrimentOrFallAgainst => "detriment_or_fall_against",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutualReception {
    None,
    Identity,
    MutualRulership,
    MutualExaltation,
    MixedReception,
}

impl MutualReception {
    /// Mutual rulership or mutual exaltation
    pub fn is_strong(self) -> bool {
        matches!(self, MutualReception::MutualRulership | MutualReception::MutualExaltation)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceptionDignity {
    Rulership,
    Exaltation,
}

/// `receiver` receives `received`: the received body stands in a sign
/// where the receiver has dignity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneWayReception {
    pub receiver: Planet,
    pub received: Planet,
    pub dignity: ReceptionDignity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceptionSummary {
    #[serde(rename = "type")]
    pub kind: ReceptionKind,
    pub mutual: MutualReception,
    pub one_way: Vec<OneWayReception>,
}

impl ReceptionSummary {
    pub fn none() -> Self {
        Self {
            kind: ReceptionKind::None,
            mutual: MutualReception::None,
            one_way: Vec::new(),
        }
    }

    pub fn identity() -> Self {
        Self {
            kind: ReceptionKind::Identity,
            mutual: MutualReception::Identity,
            one_way: Vec::new(),
        }
    }

    /// Any mutual or one-way reception (identity excluded).
    pub fn has_reception(&self) -> bool {
        !matches!(self.mutual, MutualReception::None | MutualReception::Identity)
            || !self.one_way.is_empty()
    }

    /// Whether `receiver` receives `received` in this summary.
    pub fn receives(&self, receiver: Planet, received: Planet) -> bool {
        let mutual = !matches!(self.mutual, MutualReception::None | MutualReception::Identity);
        mutual
            || self
                .one_way
                .iter()
                .any(|r| r.receiver == receiver && r.received == received)
    }
}

/// Reception/dignity classification capability.
///
/// Implementations must be deterministic and free of side effects.
pub trait ReceptionClassifier {
    fn classify(&self, chart: &Chart, a: Planet, b: Planet) -> Result<ReceptionSummary, HoraryError>;
}
