//! Denials of the direct route: refranation, abscission and frustration.

use crate::aspects::ASPECTS;
use crate::chart::{Chart, Planet};
use crate::perfection::detector::EventDetector;
use crate::perfection::event::{EventFamily, PerfectionEvent, EPS};
use log::{debug, trace};

impl<'a> EventDetector<'a> {
    pub(crate) fn detect_denials(
        &self,
        chart: &Chart,
        querent: Planet,
        quesited: Planet,
        window_days: f64,
    ) -> Vec<PerfectionEvent> {
        let mut events = self.detect_refranation(chart, querent, quesited, window_days);
        events.extend(self.detect_route_abscission(chart, querent, quesited, window_days));
        events.extend(self.detect_frustration(chart, querent, quesited, window_days));
        events
    }

    /// A direct body near its station before the aspect completes.
    ///
    /// Station is approximated by forward motion below
    /// `timing.station_speed_threshold`; no ephemeris lookahead is done.
    pub(crate) fn detect_refranation(
        &self,
        chart: &Chart,
        querent: Planet,
        quesited: Planet,
        window_days: f64,
    ) -> Vec<PerfectionEvent> {
        let threshold = self.config.timing.station_speed_threshold;
        let near_station = |p: Planet| {
            chart
                .body(p)
                .map_or(false, |b| p.can_station() && b.rate > 0.0 && b.rate < threshold)
        };

        let mut events = Vec::new();
        for aspect in ASPECTS {
            let Some(t) = self.kernel.when_exact_in_days(querent, quesited, aspect, chart) else {
                continue;
            };
            if !(t > 0.0 && t <= window_days) {
                continue;
            }
            for planet in [querent, quesited] {
                if !near_station(planet) {
                    continue;
                }
                debug!("Refranation: {planet} near station before {aspect} in {t:.2}d");
                events.push(
                    PerfectionEvent::new(
                        EventFamily::Refranation,
                        querent,
                        quesited,
                        format!(
                            "Refranation: {planet} turns retrograde before {}",
                            aspect.display_name()
                        ),
                    )
                    .aspect(aspect)
                    .at(t)
                    .favorable(false)
                    .confidence(self.config.confidence.refranation)
                    .meta("refraning_planet", planet),
                );
            }
        }
        events
    }

    /// A faster third body reaches the applier before the applier reaches
    /// the receiver.
    pub(crate) fn detect_route_abscission(
        &self,
        chart: &Chart,
        querent: Planet,
        quesited: Planet,
        window_days: f64,
    ) -> Vec<PerfectionEvent> {
        let Some(route) = self
            .kernel
            .current_direct_route(chart, querent, quesited, window_days)
        else {
            return Vec::new();
        };
        let (applier, receiver) = (route.applier, route.receiver);
        let applier_speed = chart.speed_of(applier);

        let mut events = Vec::new();
        for p in Self::third_bodies(&[querent, quesited]) {
            let Some(app) = self.kernel.find_applying_aspect(chart, p, applier, window_days, None) else {
                continue;
            };
            if !(app.timing > 0.0 && app.timing < route.timing - EPS) {
                continue;
            }
            if chart.speed_of(p) <= applier_speed {
                continue;
            }
            let next = self
                .kernel
                .find_earliest_application(chart, p, window_days, &[applier]);
            if let Some(next) = next {
                if next.target == receiver && (next.timing - app.timing).abs() <= EPS {
                    trace!("Abscission: {p} carries {applier}'s light on to {receiver}");
                    continue;
                }
            }

            debug!("Abscission: {p} reaches {applier} in {:.2}d", app.timing);
            events.push(
                PerfectionEvent::new(
                    EventFamily::Abscission,
                    querent,
                    quesited,
                    format!("Abscission: {p} takes light from {applier} before it reaches {receiver}"),
                )
                .mediator(p)
                .aspect(app.aspect)
                .at(app.timing)
                .favorable(false)
                .confidence(self.config.confidence.abscission)
                .meta("applier", applier)
                .meta("receiver", receiver)
                .meta("interceptor", p),
            );
        }
        events
    }

    /// The applier perfects with some other body before the receiver.
    pub(crate) fn detect_frustration(
        &self,
        chart: &Chart,
        querent: Planet,
        quesited: Planet,
        window_days: f64,
    ) -> Vec<PerfectionEvent> {
        let Some(route) = self
            .kernel
            .current_direct_route(chart, querent, quesited, window_days)
        else {
            return Vec::new();
        };
        let (applier, receiver) = (route.applier, route.receiver);

        let Some(next) = self
            .kernel
            .find_earliest_application(chart, applier, window_days, &[])
        else {
            return Vec::new();
        };
        if next.target == receiver || next.timing >= route.timing - EPS {
            return Vec::new();
        }
        let chain = self
            .kernel
            .find_applying_aspect(chart, next.target, receiver, window_days, None);
        if chain.map_or(false, |c| c.timing > 0.0 && c.timing <= next.timing + EPS) {
            trace!("Frustration: {} chains on to {receiver}", next.target);
            return Vec::new();
        }

        debug!("Frustration: {applier} meets {} in {:.2}d first", next.target, next.timing);
        vec![PerfectionEvent::new(
            EventFamily::Frustration,
            querent,
            quesited,
            format!(
                "Frustration: applier {applier} perfects with {} before reaching {receiver}",
                next.target
            ),
        )
        .mediator(next.target)
        .aspect(next.aspect)
        .at(next.timing)
        .favorable(false)
        .confidence(self.config.confidence.frustration)
        .meta("applier", applier)
        .meta("receiver", receiver)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aspects::Aspect;
    use crate::chart::AngularBody;
    use crate::config::{PerfectionConfig, TimingConfig};
    use crate::reception::TraditionalReception;

    fn with_detector<T>(f: impl FnOnce(&EventDetector<'_>) -> T) -> T {
        let config = PerfectionConfig::default();
        let detector = EventDetector::new(&config, &TraditionalReception);
        f(&detector)
    }

    #[test]
    fn test_refranation_near_station() {
        // Moon reaches a crawling Mars in 5/6 of a day
        let chart = Chart::new()
            .with_body(AngularBody::new(Planet::Mars, 100.0, 0.05))
            .with_body(AngularBody::new(Planet::Moon, 90.0, 12.05));
        let events = with_detector(|d| d.detect_refranation(&chart, Planet::Moon, Planet::Mars, 30.0));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].family, EventFamily::Refranation);
        assert_eq!(events[0].aspect, Some(Aspect::Conjunction));
        assert_eq!(events[0].metadata["refraning_planet"], "mars");
        assert!((events[0].exact_in_days.unwrap() - 10.0 / 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_refranation_for_luminaries() {
        let chart = Chart::new()
            .with_body(AngularBody::new(Planet::Sun, 100.0, 0.05))
            .with_body(AngularBody::new(Planet::Moon, 90.0, 12.05));
        let events = with_detector(|d| d.detect_refranation(&chart, Planet::Moon, Planet::Sun, 30.0));
        assert!(events.is_empty());
    }

    // Mercury closes on Saturn in 8 days
    fn route() -> Chart {
        Chart::new()
            .with_body(AngularBody::new(Planet::Saturn, 100.0, 0.03125))
            .with_body(AngularBody::new(Planet::Mercury, 92.0, 1.03125))
    }

    #[test]
    fn test_route_abscission() {
        let chart = route().with_body(AngularBody::new(Planet::Moon, 90.8, 13.03125));
        let events =
            with_detector(|d| d.detect_route_abscission(&chart, Planet::Mercury, Planet::Saturn, 30.0));
        assert_eq!(events.len(), 1);
        let e = &events[0];
        assert_eq!(e.family, EventFamily::Abscission);
        assert_eq!(e.mediator, Some(Planet::Moon));
        assert!((e.exact_in_days.unwrap() - 0.1).abs() < 1e-9);
        assert_eq!(e.metadata["applier"], "mercury");
        assert_eq!(e.metadata["receiver"], "saturn");
    }

    #[test]
    fn test_abscission_hand_off_to_receiver() {
        let config = PerfectionConfig {
            timing: TimingConfig {
                allow_out_of_sign: true,
                ..Default::default()
            },
            ..Default::default()
        };
        let detector = EventDetector::new(&config, &TraditionalReception);
        // Mercury reaches Saturn in 15.5 days. The Moon sextiles Mercury and
        // squares Saturn at the same moment, half a day out.
        let chart = |moon: f64| {
            Chart::new()
                .with_body(AngularBody::new(Planet::Saturn, 100.0, 0.03125))
                .with_body(AngularBody::new(Planet::Mercury, 69.0, 2.03125))
                .with_body(AngularBody::new(Planet::Moon, moon, 13.03125))
        };

        let events = detector.detect_route_abscission(&chart(3.5), Planet::Mercury, Planet::Saturn, 30.0);
        assert!(events.is_empty());

        let events = detector.detect_route_abscission(&chart(3.0), Planet::Mercury, Planet::Saturn, 30.0);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].mediator, Some(Planet::Moon));
        assert_eq!(events[0].aspect, Some(Aspect::Sextile));
        assert!((events[0].exact_in_days.unwrap() - 6.0 / 11.0).abs() < 1e-9);
    }

    #[test]
    fn test_frustration() {
        // Mercury meets Venus in 3 days; Venus keeps pace with Saturn and never reaches it
        let chart = route().with_body(AngularBody::new(Planet::Venus, 95.0, 0.03125));
        let events = with_detector(|d| d.detect_frustration(&chart, Planet::Mercury, Planet::Saturn, 30.0));
        assert_eq!(events.len(), 1);
        let e = &events[0];
        assert_eq!(e.family, EventFamily::Frustration);
        assert_eq!(e.mediator, Some(Planet::Venus));
        assert_eq!(e.exact_in_days, Some(3.0));
        assert_eq!(e.confidence, Some(65));
    }

    #[test]
    fn test_frustrating_body_chains_to_receiver() {
        // Mercury meets Venus's sextile in 5 days, but retrograde Venus already
        // reaches Saturn's sextile in 1
        let chart = route().with_body(AngularBody::new(Planet::Venus, 160.75, -0.71875));
        let events = with_detector(|d| d.detect_frustration(&chart, Planet::Mercury, Planet::Saturn, 30.0));
        assert!(events.is_empty());
    }

    #[test]
    fn test_no_denials_without_route() {
        let chart = Chart::new()
            .with_body(AngularBody::new(Planet::Saturn, 100.0, 0.03125))
            .with_body(AngularBody::new(Planet::Mercury, 105.0, 1.03125))
            .with_body(AngularBody::new(Planet::Venus, 110.0, 0.03125));
        let events = with_detector(|d| {
            let mut all = d.detect_route_abscission(&chart, Planet::Mercury, Planet::Saturn, 30.0);
            all.extend(d.detect_frustration(&chart, Planet::Mercury, Planet::Saturn, 30.0));
            all
        });
        assert!(events.is_empty());
    }
}
