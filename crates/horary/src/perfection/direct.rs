//! Direct aspects between the significators, combustion veto, and house placement.

use crate::aspects::{Aspect, ASPECTS};
use crate::chart::{ordinal, Chart, Planet, SolarCondition};
use crate::perfection::detector::EventDetector;
use crate::perfection::event::{tags, EventFamily, PerfectionEvent};
use crate::reception::{MutualReception, ReceptionSummary};
use log::{debug, trace};

const CADENT_HOUSES: [u8; 4] = [3, 6, 9, 12];

/// Outcome of weighing a direct aspect.
struct DirectQuality {
    favorable: bool,
    challenges: Vec<String>,
    quality_tags: Vec<String>,
}

impl<'a> EventDetector<'a> {
    pub(crate) fn detect_direct(
        &mut self,
        chart: &Chart,
        querent: Planet,
        quesited: Planet,
        window_days: f64,
    ) -> Vec<PerfectionEvent> {
        let mut chosen: Option<(Aspect, f64)> = None;
        for aspect in ASPECTS {
            let Some(t) = self.kernel.when_exact_in_days(querent, quesited, aspect, chart) else {
                continue;
            };
            if t > window_days {
                trace!("Direct {aspect}: {t:.2}d outside window");
                continue;
            }
            if chosen.map_or(true, |(_, best)| t < best) {
                chosen = Some((aspect, t));
            }
        }
        let Some((aspect, timing)) = chosen else {
            return Vec::new();
        };

        if aspect == Aspect::Conjunction {
            if let Some(combust) = combust_partner(chart, querent, quesited) {
                debug!("Direct conjunction vetoed: {combust} combust");
                let reason =
                    self.prohibition_reason(chart, Planet::Sun, combust, aspect, timing, Some(timing));
                let event = PerfectionEvent::new(EventFamily::CombustionVeto, querent, quesited, reason)
                    .mediator(Planet::Sun)
                    .aspect(aspect)
                    .at(timing)
                    .favorable(false)
                    .challenges(vec![tags::COMBUSTION.to_string()]);
                return vec![event];
            }
        }

        let reception = self.reception(chart, querent, quesited);
        let quality = assess_quality(chart, aspect, &reception, querent, quesited);
        let family = if quality.challenges.is_empty() {
            EventFamily::Direct
        } else {
            EventFamily::DirectPenalized
        };
        let confidence = self.direct_confidence(aspect, &reception, &quality.challenges);
        debug!(
            "Direct {aspect} in {timing:.2}d: {family}, favorable={}, challenges={:?}",
            quality.favorable, quality.challenges
        );

        vec![PerfectionEvent::new(
            family,
            querent,
            quesited,
            format!("{} between significators", aspect.display_name()),
        )
        .aspect(aspect)
        .reception(reception)
        .at(timing)
        .favorable(quality.favorable)
        .confidence(confidence)
        .challenges(quality.challenges)
        .quality_tags(quality.quality_tags)]
    }

    /// Base less the hard-aspect penalty plus the mutual-reception bonus,
    /// clamped to 10..=100.
    fn direct_confidence(&self, aspect: Aspect, reception: &ReceptionSummary, challenges: &[String]) -> i32 {
        let c = &self.config.confidence;
        let mut confidence = c.direct_basic;
        if challenges.iter().any(|ch| ch == tags::HARD_ASPECT) {
            confidence -= match aspect {
                Aspect::Square => c.hard_square_penalty,
                _ => c.hard_opposition_penalty,
            };
        }
        confidence += match reception.mutual {
            MutualReception::MutualRulership => c.mutual_rulership_bonus,
            MutualReception::MutualExaltation => c.mutual_exaltation_bonus,
            _ => 0,
        };
        confidence.clamp(10, 100)
    }

    /// Immediate perfection by a significator standing in the other's house.
    ///
    /// Needs the chart's significator-house mapping; without it nothing fires.
    pub(crate) fn detect_house_placement(
        &self,
        chart: &Chart,
        querent: Planet,
        quesited: Planet,
    ) -> Vec<PerfectionEvent> {
        let Some(houses) = chart.significators() else {
            trace!("House placement: chart carries no significator houses");
            return Vec::new();
        };
        let confidence = self.config.confidence.house_placement;
        let mut events = Vec::new();

        if chart.body(querent).and_then(|b| b.house) == Some(houses.quesited_house) {
            events.push(
                PerfectionEvent::new(
                    EventFamily::HousePlacement,
                    querent,
                    quesited,
                    format!(
                        "{querent} placed in the {} house (quesited's house)",
                        ordinal(houses.quesited_house)
                    ),
                )
                .at(0.0)
                .confidence(confidence)
                .meta("placement_type", "querent_in_quesited_house"),
            );
        }
        if chart.body(quesited).and_then(|b| b.house) == Some(houses.querent_house) {
            events.push(
                PerfectionEvent::new(
                    EventFamily::HousePlacement,
                    querent,
                    quesited,
                    format!(
                        "{quesited} placed in the {} house (querent's house)",
                        ordinal(houses.querent_house)
                    ),
                )
                .at(0.0)
                .confidence(confidence)
                .meta("placement_type", "quesited_in_querent_house"),
            );
        }
        events
    }
}

/// The non-solar significator when the pair is the Sun and a combust body.
fn combust_partner(chart: &Chart, querent: Planet, quesited: Planet) -> Option<Planet> {
    let other = match (querent, quesited) {
        (Planet::Sun, other) | (other, Planet::Sun) => other,
        _ => return None,
    };
    let condition = chart.body(other)?.solar_condition;
    (condition == Some(SolarCondition::Combustion)).then_some(other)
}

fn assess_quality(
    chart: &Chart,
    aspect: Aspect,
    reception: &ReceptionSummary,
    querent: Planet,
    quesited: Planet,
) -> DirectQuality {
    let mut challenges = Vec::new();
    let mut quality_tags = Vec::new();

    if aspect.is_hard() {
        challenges.push(tags::HARD_ASPECT.to_string());
        quality_tags.push(tags::WITH_DIFFICULTY.to_string());
    } else {
        quality_tags.push(tags::EASIER.to_string());
    }

    let cadent = |p: Planet| {
        chart
            .body(p)
            .and_then(|b| b.house)
            .map_or(false, |h| CADENT_HOUSES.contains(&h))
    };
    if cadent(querent) {
        challenges.push(tags::CADENT_QUERENT.to_string());
    }
    if cadent(quesited) {
        challenges.push(tags::CADENT_QUESITED.to_string());
    }

    match reception.mutual {
        MutualReception::Identity => {
            return DirectQuality {
                favorable: true,
                challenges: Vec::new(),
                quality_tags: vec![tags::IDENTITY_UNION.to_string()],
            };
        }
        MutualReception::MutualRulership | MutualReception::MutualExaltation => {
            if let Some(pos) = challenges.iter().position(|c| c == tags::HARD_ASPECT) {
                challenges.remove(pos);
                quality_tags = vec![tags::EASIER.to_string()];
            }
        }
        MutualReception::MixedReception => {
            quality_tags.push(tags::MITIGATED_BY_RECEPTION.to_string());
        }
        MutualReception::None => {}
    }

    DirectQuality {
        favorable: challenges.is_empty() || reception.mutual.is_strong(),
        challenges,
        quality_tags,
    }
}
