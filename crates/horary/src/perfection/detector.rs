//! Candidate event detection.
//!
//! One detector lives for one call: it owns the reception cache for the
//! chart it is run against and is dropped afterwards.

use crate::aspects::{Aspect, TimingKernel};
use crate::chart::{Chart, Planet, CLASSICAL_PLANETS};
use crate::config::PerfectionConfig;
use crate::perfection::event::{tags, EventFamily, PerfectionEvent};
use crate::perfection::pipeline;
use crate::reception::{ReceptionCache, ReceptionClassifier, ReceptionSummary};
use log::debug;

pub struct EventDetector<'a> {
    pub(crate) config: &'a PerfectionConfig,
    pub(crate) kernel: TimingKernel,
    pub(crate) receptions: ReceptionCache<'a>,
}

impl<'a> EventDetector<'a> {
    pub fn new(config: &'a PerfectionConfig, classifier: &'a dyn ReceptionClassifier) -> Self {
        Self {
            config,
            kernel: TimingKernel::new(&config.timing),
            receptions: ReceptionCache::new(classifier),
        }
    }

    /// Warm the reception cache for every pair of bodies. Failures are left
    /// for on-demand lookup.
    pub fn precompute_receptions(&mut self, chart: &Chart) {
        let failures = self.receptions.precompute(chart);
        if failures > 0 {
            debug!("Reception precompute: {failures} pair(s) deferred to on-demand lookup");
        }
    }

    /// Every surviving event for the pair, de-duplicated and sorted by priority.
    pub fn detect_all_events(
        &mut self,
        chart: &Chart,
        querent: Planet,
        quesited: Planet,
        window_days: f64,
    ) -> Vec<PerfectionEvent> {
        debug!("Detecting events for {querent}/{quesited} within {window_days} days");

        if querent == quesited {
            let mut events = self.detect_house_placement(chart, querent, quesited);
            events.push(self.identity_event(querent));
            debug!("Same body signifies both parties: {} event(s)", events.len());
            return pipeline::sort_by_priority(pipeline::deduplicate(events));
        }

        let mut events = Vec::new();

        let direct = self.detect_direct(chart, querent, quesited, window_days);
        debug!("Direct: {} event(s)", direct.len());
        events.extend(direct);

        let placement = self.detect_house_placement(chart, querent, quesited);
        debug!("House placement: {} event(s)", placement.len());
        events.extend(placement);

        let translation = self.detect_translation(chart, querent, quesited, window_days);
        debug!("Translation: {} event(s)", translation.len());
        events.extend(translation);

        let collection = self.detect_collection(chart, querent, quesited, window_days);
        debug!("Collection: {} event(s)", collection.len());
        events.extend(collection);

        let earliest_positive = events
            .iter()
            .filter(|e| e.family.is_positive())
            .filter_map(|e| e.exact_in_days)
            .min_by(f64::total_cmp);
        let prohibition =
            self.detect_prohibition(chart, querent, quesited, window_days, earliest_positive);
        debug!("Prohibition: {} event(s)", prohibition.len());
        events.extend(prohibition);

        let denials = self.detect_denials(chart, querent, quesited, window_days);
        debug!("Denial: {} event(s)", denials.len());
        events.extend(denials);

        let events = pipeline::deduplicate(events);
        let events = pipeline::deconflict(events);
        pipeline::sort_by_priority(events)
    }

    fn identity_event(&self, planet: Planet) -> PerfectionEvent {
        PerfectionEvent::new(
            EventFamily::Direct,
            planet,
            planet,
            "Same planet rules both significators: unity of matter and querent",
        )
        .aspect(Aspect::Conjunction)
        .reception(ReceptionSummary::identity())
        .at(0.0)
        .favorable(true)
        .confidence(self.config.confidence.same_ruler)
        .quality_tags(vec![tags::IDENTITY_UNION.to_string()])
    }

    /// Cached reception from `a` toward `b`.
    pub(crate) fn reception(&mut self, chart: &Chart, a: Planet, b: Planet) -> ReceptionSummary {
        self.receptions.get(chart, a, b)
    }

    /// Classical bodies other than those in `skip`, in search order.
    pub(crate) fn third_bodies(skip: &[Planet]) -> impl Iterator<Item = Planet> + '_ {
        CLASSICAL_PLANETS.into_iter().filter(move |p| !skip.contains(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::AngularBody;
    use crate::reception::TraditionalReception;

    #[test]
    fn test_identity_short_circuits() {
        // Moon would translate between anything; the identity case must ignore it
        let chart = Chart::new()
            .with_body(AngularBody::new(Planet::Venus, 100.0, 1.0))
            .with_body(AngularBody::new(Planet::Moon, 95.0, 13.0));
        let config = PerfectionConfig::default();
        let mut detector = EventDetector::new(&config, &TraditionalReception);
        let events = detector.detect_all_events(&chart, Planet::Venus, Planet::Venus, 30.0);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].family, EventFamily::Direct);
        assert_eq!(events[0].exact_in_days, Some(0.0));
        assert_eq!(events[0].confidence, Some(80));
        assert!(events[0].favorable);
    }

    #[test]
    fn test_third_bodies_keep_order() {
        let rest: Vec<Planet> = EventDetector::third_bodies(&[Planet::Moon, Planet::Mars]).collect();
        assert_eq!(
            rest,
            vec![Planet::Sun, Planet::Mercury, Planet::Venus, Planet::Jupiter, Planet::Saturn]
        );
    }

    #[test]
    fn test_empty_chart_yields_nothing() {
        let config = PerfectionConfig::default();
        let mut detector = EventDetector::new(&config, &TraditionalReception);
        detector.precompute_receptions(&Chart::new());
        let events = detector.detect_all_events(&Chart::new(), Planet::Mars, Planet::Venus, 30.0);
        assert!(events.is_empty());
    }
}
