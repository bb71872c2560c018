//! Collection of light: both significators apply to a slower third body.

use crate::chart::{Chart, Planet};
use crate::perfection::detector::EventDetector;
use crate::perfection::event::{tags, EventFamily, PerfectionEvent, EPS};
use crate::western::DignitiesService;
use log::{debug, trace};

impl<'a> EventDetector<'a> {
    pub(crate) fn detect_collection(
        &mut self,
        chart: &Chart,
        querent: Planet,
        quesited: Planet,
        window_days: f64,
    ) -> Vec<PerfectionEvent> {
        let mut events = Vec::new();
        for collector in Self::third_bodies(&[querent, quesited]) {
            if let Some(event) = self.try_collection(chart, collector, querent, quesited, window_days) {
                events.push(event);
            }
        }
        events
    }

    fn try_collection(
        &mut self,
        chart: &Chart,
        collector: Planet,
        querent: Planet,
        quesited: Planet,
        window_days: f64,
    ) -> Option<PerfectionEvent> {
        let collector_speed = chart.speed_of(collector);
        if !(collector_speed < chart.speed_of(querent) && collector_speed < chart.speed_of(quesited)) {
            trace!("Collection by {collector}: not slower than both significators");
            return None;
        }

        let max_deg = self.config.collection.max_application_deg;
        let querent_app = self
            .kernel
            .find_applying_aspect(chart, querent, collector, window_days, max_deg)?;
        let quesited_app = self
            .kernel
            .find_applying_aspect(chart, quesited, collector, window_days, max_deg)?;
        let t_collect = querent_app.timing.max(quesited_app.timing);

        for other in Self::third_bodies(&[collector, querent, quesited]) {
            let Some(cut) = self.kernel.find_applying_aspect(chart, other, collector, window_days, None) else {
                continue;
            };
            if cut.timing > 0.0 && cut.timing < t_collect - EPS {
                debug!(
                    "Collection by {collector} abscised: {other} reaches it in {:.2}d",
                    cut.timing
                );
                return Some(
                    PerfectionEvent::new(
                        EventFamily::Abscission,
                        querent,
                        quesited,
                        format!("Abscission: {other} perfects with {collector} before collection completes"),
                    )
                    .mediator(other)
                    .aspect(cut.aspect)
                    .at(cut.timing)
                    .favorable(false)
                    .confidence(self.config.confidence.abscission)
                    .meta("collector", collector)
                    .meta("interceptor", other),
                );
            }
        }

        for sig in [querent, quesited] {
            let next = self.kernel.find_earliest_application(chart, sig, window_days, &[]);
            if next.map(|n| n.target) != Some(collector) {
                trace!("Collection by {collector}: {sig} applies elsewhere first");
                return None;
            }
        }

        let received = self.reception(chart, collector, querent).receives(collector, querent)
            && self.reception(chart, collector, quesited).receives(collector, quesited);
        let mut favorable = received;
        let mut challenges = Vec::new();
        if !received {
            challenges.push(tags::WEAK_RECEPTION_TO_COLLECTOR.to_string());
        }

        let rules = &self.config.collection;
        let score = chart.body(collector).map(|body| {
            body.dignity_score
                .unwrap_or_else(|| DignitiesService.essential_score(collector, body.sign))
        });
        if let Some(score) = score {
            if score < rules.minimum_dignity_score {
                if rules.require_collector_dignity {
                    debug!(
                        "Collection by {collector} rejected: dignity {score} below {}",
                        rules.minimum_dignity_score
                    );
                    return None;
                }
                favorable = false;
                challenges.push(tags::COLLECTOR_POOR_DIGNITY.to_string());
            }
        }

        let base = self.config.confidence.collection_of_light;
        let confidence = if favorable { base } else { (base - 15).max(25) };
        debug!("Collection by {collector} in {t_collect:.2}d, favorable={favorable}");

        let reception = self.reception(chart, querent, quesited);
        Some(
            PerfectionEvent::new(
                EventFamily::Collection,
                querent,
                quesited,
                format!("Collection by {collector}"),
            )
            .mediator(collector)
            .reception(reception)
            .at(t_collect)
            .favorable(favorable)
            .confidence(confidence)
            .challenges(challenges)
            .meta("querent_application", querent_app)
            .meta("quesited_application", quesited_app),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::AngularBody;
    use crate::config::{CollectionConfig, PerfectionConfig};
    use crate::reception::TraditionalReception;

    // Mercury (Capricorn) reaches Saturn's conjunction in 5 days, Venus (Libra)
    // its square in 4. Saturn rules Capricorn and is exalted in Libra.
    fn scene(saturn_rate: f64) -> Chart {
        Chart::new()
            .with_body(AngularBody::new(Planet::Saturn, 280.0, saturn_rate))
            .with_body(AngularBody::new(Planet::Mercury, 275.0, 1.03125))
            .with_body(AngularBody::new(Planet::Venus, 186.0, 1.03125))
    }

    fn collections(chart: &Chart, config: &PerfectionConfig) -> Vec<PerfectionEvent> {
        let mut detector = EventDetector::new(config, &TraditionalReception);
        detector.detect_collection(chart, Planet::Mercury, Planet::Venus, 30.0)
    }

    #[test]
    fn test_collection_with_reception() {
        let events = collections(&scene(0.03125), &PerfectionConfig::default());
        assert_eq!(events.len(), 1);
        let e = &events[0];
        assert_eq!(e.family, EventFamily::Collection);
        assert_eq!(e.mediator, Some(Planet::Saturn));
        assert_eq!(e.exact_in_days, Some(5.0));
        assert!(e.favorable);
        assert!(e.challenges.is_empty());
        assert_eq!(e.confidence, Some(75));
        assert_eq!(e.metadata["quesited_application"]["aspect"], "square");
    }

    #[test]
    fn test_collector_not_receiving_both() {
        // Venus in Scorpio reaches Saturn's sextile in 4 days; Saturn has no dignity there
        let chart = scene(0.03125).with_body(AngularBody::new(Planet::Venus, 216.0, 1.03125));
        let events = collections(&chart, &PerfectionConfig::default());
        assert_eq!(events.len(), 1);
        let e = &events[0];
        assert_eq!(e.family, EventFamily::Collection);
        assert_eq!(e.exact_in_days, Some(5.0));
        assert!(!e.favorable);
        assert_eq!(e.challenges, vec!["weak_reception_to_collector".to_string()]);
        assert_eq!(e.confidence, Some(60));
    }

    #[test]
    fn test_collector_must_be_slower() {
        assert!(collections(&scene(1.03125), &PerfectionConfig::default()).is_empty());
        assert!(collections(&scene(1.5), &PerfectionConfig::default()).is_empty());
    }

    #[test]
    fn test_abscission_on_collector() {
        let chart = scene(0.03125).with_body(AngularBody::new(Planet::Mars, 278.0, 1.03125));
        let events = collections(&chart, &PerfectionConfig::default());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].family, EventFamily::Abscission);
        assert_eq!(events[0].mediator, Some(Planet::Mars));
        assert_eq!(events[0].exact_in_days, Some(2.0));
    }

    #[test]
    fn test_poor_dignity_downgrades_or_rejects() {
        let chart = scene(0.03125)
            .with_body(AngularBody::new(Planet::Saturn, 280.0, 0.03125).with_dignity_score(-5));
        let events = collections(&chart, &PerfectionConfig::default());
        assert_eq!(events.len(), 1);
        assert!(!events[0].favorable);
        assert_eq!(events[0].challenges, vec!["collector_poor_dignity".to_string()]);
        assert_eq!(events[0].confidence, Some(60));

        let strict = PerfectionConfig {
            collection: CollectionConfig {
                require_collector_dignity: true,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(collections(&chart, &strict).is_empty());
    }
}
